use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    error::{CdpError, CdpResult},
    math::{percent::with_bonus, safe_math::SafeMath},
    state::position::PositionHealth,
};

/// Collateral taken from a liquidated position.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[cfg_attr(
    feature = "client",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Seizure {
    /// Atoms worth exactly the repaid debt
    pub base_collateral: u128,
    /// Atoms paid on top as liquidation bonus
    pub bonus_collateral: u128,
}

impl Seizure {
    pub fn total(&self) -> CdpResult<u128> {
        self.base_collateral.safe_add(self.bonus_collateral)
    }
}

/// Sizes the seizure for `base_collateral` atoms worth of repaid debt.
///
/// When the deposit cannot pay the full bonus the bonus shrinks to what is left. A deposit
/// smaller than the base amount fails with `InsufficientBalance`.
pub fn compute_seizure(base_collateral: u128, deposited: u128, bonus: u8) -> CdpResult<Seizure> {
    if base_collateral > deposited {
        return Err(CdpError::InsufficientBalance.into());
    }
    let with_full_bonus = with_bonus(base_collateral, bonus)?;
    let total = with_full_bonus.min(deposited);
    Ok(Seizure {
        base_collateral,
        bonus_collateral: total.safe_sub(base_collateral)?,
    })
}

/// Result of a liquidation, as executed or previewed.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[cfg_attr(
    feature = "client",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct LiquidationOutcome {
    pub debt_repaid: u128,
    pub seizure: Seizure,
    pub health_before_liquidation: PositionHealth,
    pub health_after_liquidation: PositionHealth,
}

impl LiquidationOutcome {
    pub fn collateral_seized(&self) -> CdpResult<u128> {
        self.seizure.total()
    }
}
