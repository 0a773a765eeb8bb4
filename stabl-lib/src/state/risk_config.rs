use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    constant::PRECISION_DECIMALS,
    error::{CdpError, CdpResult},
    math::{percent::ONE_HUNDRED_PERCENT, wad::Wad},
    oracle::oracle_config::OracleValidationConfig,
    state::ids::AssetId,
};

pub const DEFAULT_LIQUIDATION_THRESHOLD: u8 = 50;
pub const DEFAULT_LIQUIDATION_BONUS: u8 = 10;
pub const MAX_LIQUIDATION_BONUS: u8 = 20;

/// Solvency parameters, fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[cfg_attr(
    feature = "client",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct RiskParameters {
    /// Share of the collateral value, in percent, which may back debt
    pub liquidation_threshold: u8,
    /// Extra collateral, in percent of the repaid value, paid to a liquidator
    pub liquidation_bonus: u8,
    /// Health factor under which a position can be liquidated
    pub min_health_factor: Wad,
}

impl Default for RiskParameters {
    fn default() -> Self {
        Self {
            liquidation_threshold: DEFAULT_LIQUIDATION_THRESHOLD,
            liquidation_bonus: DEFAULT_LIQUIDATION_BONUS,
            min_health_factor: Wad::ONE,
        }
    }
}

impl RiskParameters {
    pub fn validate(&self) -> CdpResult {
        if self.liquidation_threshold == 0 || self.liquidation_threshold > ONE_HUNDRED_PERCENT {
            return Err(CdpError::InvalidRiskParameters.into());
        }
        if self.liquidation_bonus > MAX_LIQUIDATION_BONUS {
            return Err(CdpError::InvalidRiskParameters.into());
        }
        // a position liquidated right at the threshold must still hold the bonus
        let threshold_with_bonus = self.liquidation_threshold as u32
            * (ONE_HUNDRED_PERCENT as u32 + self.liquidation_bonus as u32);
        if threshold_with_bonus > ONE_HUNDRED_PERCENT as u32 * ONE_HUNDRED_PERCENT as u32 {
            return Err(CdpError::InvalidRiskParameters.into());
        }
        if self.min_health_factor < Wad::ONE {
            return Err(CdpError::InvalidRiskParameters.into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[cfg_attr(
    feature = "client",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct AssetConfig {
    pub asset: AssetId,
    /// Decimals of the asset atoms, at most 18
    pub decimals: u8,
    #[cfg_attr(feature = "client", serde(default))]
    pub validation: OracleValidationConfig,
}

impl AssetConfig {
    pub fn new(asset: AssetId, decimals: u8) -> Self {
        Self {
            asset,
            decimals,
            validation: OracleValidationConfig::default(),
        }
    }

    pub fn with_validation(mut self, validation: OracleValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    pub fn validate(&self) -> CdpResult {
        if self.decimals > PRECISION_DECIMALS {
            return Err(CdpError::UnsupportedDecimals.into());
        }
        Ok(())
    }
}

/// Everything an engine is built from, apart from its collaborators.
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[cfg_attr(
    feature = "client",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct EngineConfig {
    #[cfg_attr(feature = "client", serde(default))]
    pub risk: RiskParameters,
    pub assets: Vec<AssetConfig>,
}
