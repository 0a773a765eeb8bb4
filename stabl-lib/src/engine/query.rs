use crate::{
    engine::cdp_engine::CdpEngine,
    error::CdpResult,
    event::CdpEvent,
    math::wad::Wad,
    operation::{health, valuation},
    oracle::oracle_price::OraclePrice,
    state::{
        ids::{AccountId, AssetId},
        position::{AccountInformation, CollateralPosition, PositionHealth},
        risk_config::RiskParameters,
    },
};

/// Read-only views. None of them take the re-entrancy guard, so collaborators may call them
/// while an operation is in flight.
impl CdpEngine {
    pub fn collateral_value(&self, account: &AccountId) -> CdpResult<Wad> {
        let ledgers = self.ledgers.borrow();
        valuation::total_collateral_value(&self.oracle, ledgers.collateral(), account)
    }

    pub fn debt(&self, account: &AccountId) -> u128 {
        self.ledgers.borrow().debt().debt(account)
    }

    pub fn account_information(&self, account: &AccountId) -> CdpResult<AccountInformation> {
        Ok(AccountInformation {
            debt_minted: self.debt(account),
            collateral_value: self.collateral_value(account)?,
        })
    }

    /// `Wad::MAX` for an account without debt, whatever its collateral.
    pub fn health_factor(&self, account: &AccountId) -> CdpResult<Wad> {
        let ledgers = self.ledgers.borrow();
        health::health_factor(&self.oracle, &ledgers, account, &self.params)
    }

    pub fn position_health(&self, account: &AccountId) -> CdpResult<PositionHealth> {
        let ledgers = self.ledgers.borrow();
        health::position_health(&self.oracle, &ledgers, account, &self.params)
    }

    pub fn is_healthy(&self, account: &AccountId) -> CdpResult<bool> {
        Ok(health::is_healthy(self.health_factor(account)?, &self.params))
    }

    /// Health factor of a hypothetical position under this engine's parameters.
    pub fn calculate_health_factor(&self, debt: u128, collateral_value: Wad) -> CdpResult<Wad> {
        health::calculate_health_factor(debt, collateral_value, &self.params)
    }

    pub fn collateral_balance(&self, account: &AccountId, asset: &AssetId) -> u128 {
        self.ledgers.borrow().collateral().balance(account, asset)
    }

    pub fn collateral_positions(&self, account: &AccountId) -> CdpResult<Vec<CollateralPosition>> {
        let ledgers = self.ledgers.borrow();
        valuation::collateral_positions(&self.oracle, ledgers.collateral(), account)
    }

    pub fn value_of(&self, asset: &AssetId, amount: u128) -> CdpResult<Wad> {
        valuation::value_of(&self.oracle, asset, amount)
    }

    pub fn amount_from_value(&self, asset: &AssetId, value: Wad) -> CdpResult<u128> {
        valuation::amount_from_value(&self.oracle, asset, value)
    }

    pub fn price(&self, asset: &AssetId) -> CdpResult<OraclePrice> {
        self.oracle.get_price(asset)
    }

    /// Approved collateral assets in registration order.
    pub fn approved_assets(&self) -> Vec<AssetId> {
        self.oracle.registry().asset_ids()
    }

    pub fn total_deposited(&self, asset: &AssetId) -> u128 {
        self.ledgers.borrow().collateral().total_deposited(asset)
    }

    pub fn total_debt(&self) -> u128 {
        self.ledgers.borrow().debt().total_debt()
    }

    pub fn parameters(&self) -> &RiskParameters {
        &self.params
    }

    /// Every committed event, oldest first.
    pub fn events(&self) -> Vec<CdpEvent> {
        self.ledgers.borrow().events().to_vec()
    }
}
