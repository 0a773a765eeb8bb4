use crate::{
    constant::PRECISION,
    error::{CdpError, CdpResult},
    math::{percent::apply_percent_wad, wad::Wad, wide::mul_div_floor},
    oracle::oracle_adapter::OracleAdapter,
    operation::valuation::total_collateral_value,
    state::{
        ids::AccountId, ledgers::Ledgers, position::PositionHealth, risk_config::RiskParameters,
    },
};

/// `collateral_value * threshold / 100 * PRECISION / debt`.
///
/// A debt-free position, or one whose factor does not fit, gets `Wad::MAX`.
pub fn calculate_health_factor(
    debt: u128,
    collateral_value: Wad,
    params: &RiskParameters,
) -> CdpResult<Wad> {
    if debt == 0 {
        return Ok(Wad::MAX);
    }
    let adjusted = apply_percent_wad(collateral_value, params.liquidation_threshold as u128)?;
    match mul_div_floor(adjusted.bits(), PRECISION, debt) {
        Ok(bits) => Ok(Wad::from_bits(bits)),
        Err(err) if err == CdpError::MultiplicationOverflow => Ok(Wad::MAX),
        Err(err) => Err(err),
    }
}

pub fn is_healthy(health_factor: Wad, params: &RiskParameters) -> bool {
    health_factor >= params.min_health_factor
}

/// Prices every deposit of `account`, even when it has no debt.
pub fn position_health(
    oracle: &OracleAdapter,
    ledgers: &Ledgers,
    account: &AccountId,
    params: &RiskParameters,
) -> CdpResult<PositionHealth> {
    let debt = ledgers.debt().debt(account);
    let collateral_value = total_collateral_value(oracle, ledgers.collateral(), account)?;
    Ok(PositionHealth {
        debt,
        collateral_value,
        health_factor: calculate_health_factor(debt, collateral_value, params)?,
    })
}

/// Health factor of `account`. A debt-free account is not priced.
pub fn health_factor(
    oracle: &OracleAdapter,
    ledgers: &Ledgers,
    account: &AccountId,
    params: &RiskParameters,
) -> CdpResult<Wad> {
    if ledgers.debt().debt(account) == 0 {
        return Ok(Wad::MAX);
    }
    position_health(oracle, ledgers, account, params).map(|health| health.health_factor)
}

#[track_caller]
pub fn require_healthy(
    oracle: &OracleAdapter,
    ledgers: &Ledgers,
    account: &AccountId,
    params: &RiskParameters,
) -> CdpResult {
    let health_factor = health_factor(oracle, ledgers, account, params)?;
    if !is_healthy(health_factor, params) {
        return Err(CdpError::breaks_health_factor(health_factor).into());
    }
    Ok(())
}
