pub mod asset_registry;
pub mod collateral_ledger;
pub mod debt_ledger;
pub mod ids;
pub mod ledgers;
pub mod position;
pub mod risk_config;
