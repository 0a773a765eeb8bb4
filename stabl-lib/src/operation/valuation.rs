use crate::{
    error::CdpResult,
    math::{safe_math::SafeMath, wad::Wad},
    oracle::oracle_adapter::OracleAdapter,
    state::{
        collateral_ledger::CollateralLedger,
        ids::{AccountId, AssetId},
        position::CollateralPosition,
    },
};

/// `amount` atoms of `asset` in the unit of account, truncated.
#[track_caller]
pub fn value_of(oracle: &OracleAdapter, asset: &AssetId, amount: u128) -> CdpResult<Wad> {
    let registered = oracle.registry().require_supported(asset)?;
    oracle
        .get_price(asset)?
        .value_of(amount, registered.decimals())
}

/// Atoms of `asset` worth `value`, truncated. Not an exact inverse of [`value_of`].
#[track_caller]
pub fn amount_from_value(oracle: &OracleAdapter, asset: &AssetId, value: Wad) -> CdpResult<u128> {
    let registered = oracle.registry().require_supported(asset)?;
    oracle
        .get_price(asset)?
        .amount_from_value(value, registered.decimals())
}

/// Collateral lines of `account` in registry order. Empty lines are skipped and never priced.
pub fn collateral_positions(
    oracle: &OracleAdapter,
    ledger: &CollateralLedger,
    account: &AccountId,
) -> CdpResult<Vec<CollateralPosition>> {
    let mut positions = Vec::new();
    for registered in oracle.registry().iter() {
        let amount = ledger.balance(account, registered.id());
        if amount == 0 {
            continue;
        }
        positions.push(CollateralPosition {
            asset: *registered.id(),
            amount,
            value: value_of(oracle, registered.id(), amount)?,
        });
    }
    Ok(positions)
}

pub fn total_collateral_value(
    oracle: &OracleAdapter,
    ledger: &CollateralLedger,
    account: &AccountId,
) -> CdpResult<Wad> {
    total_collateral_value_with(oracle, ledger, account, None)
}

/// Same as [`total_collateral_value`] with the balance of one asset replaced, used to price a
/// position before a change is applied.
pub fn total_collateral_value_with(
    oracle: &OracleAdapter,
    ledger: &CollateralLedger,
    account: &AccountId,
    replaced: Option<(&AssetId, u128)>,
) -> CdpResult<Wad> {
    let mut total = Wad::ZERO;
    for registered in oracle.registry().iter() {
        let amount = match replaced {
            Some((asset, amount)) if asset == registered.id() => amount,
            _ => ledger.balance(account, registered.id()),
        };
        if amount == 0 {
            continue;
        }
        total = total.safe_add(value_of(oracle, registered.id(), amount)?)?;
    }
    Ok(total)
}
