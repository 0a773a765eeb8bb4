use crate::{
    engine::cdp_engine::{compensate, require_amount, token_call, CdpEngine},
    error::{CdpError, CdpResult, CdpResultExt},
    operation::health::require_healthy,
    state::{
        asset_registry::RegisteredAsset,
        ids::{AccountId, AssetId},
    },
};

/// Entry points an account calls on its own position.
///
/// Each runs as: guard, argument checks, ledger effects, health check, then collaborator calls
/// with every pull ahead of every push. A rejected operation therefore never reaches a token,
/// and a collaborator failing after an earlier call succeeded gets that call reversed.
impl CdpEngine {
    pub fn deposit_collateral(
        &self,
        account: &AccountId,
        asset: &AssetId,
        amount: u128,
    ) -> CdpResult {
        self.execute("deposit_collateral", &[*account], || {
            let registered = self.apply_deposit(account, asset, amount)?;
            self.pull_collateral(registered, account, amount)
        })
    }

    /// Health is checked before the debt token is called: a mint that is both unhealthy and
    /// rejected by the token fails with `BreaksHealthFactor`.
    pub fn mint_debt(&self, account: &AccountId, amount: u128) -> CdpResult {
        self.execute("mint_debt", &[*account], || {
            self.apply_mint(account, amount)?;
            self.check_health(account)?;
            self.push_debt(account, amount)
        })
    }

    pub fn deposit_collateral_and_mint(
        &self,
        account: &AccountId,
        asset: &AssetId,
        collateral_amount: u128,
        debt_amount: u128,
    ) -> CdpResult {
        self.execute("deposit_collateral_and_mint", &[*account], || {
            require_amount(debt_amount)?;
            let registered = self.apply_deposit(account, asset, collateral_amount)?;
            self.apply_mint(account, debt_amount)?;
            self.check_health(account)?;
            self.pull_collateral(registered, account, collateral_amount)?;
            self.push_debt(account, debt_amount).map_err(|err| {
                compensate(err, "collateral refund", || {
                    registered.token().transfer_out(account, collateral_amount)
                })
            })
        })
    }

    /// Repays debt of `account` with its own debt tokens. Burning never needs a health check.
    pub fn burn_debt(&self, account: &AccountId, amount: u128) -> CdpResult {
        self.execute("burn_debt", &[*account], || {
            self.apply_burn(account, amount)?;
            self.pull_and_burn_debt(account, amount)
        })
    }

    pub fn redeem_collateral(
        &self,
        account: &AccountId,
        asset: &AssetId,
        amount: u128,
    ) -> CdpResult {
        self.execute("redeem_collateral", &[*account], || {
            let registered = self.apply_redeem(account, asset, amount)?;
            self.check_health(account)?;
            self.push_collateral(registered, account, amount)
        })
    }

    /// Burns first so the redemption is checked against the reduced debt.
    pub fn redeem_collateral_and_burn(
        &self,
        account: &AccountId,
        asset: &AssetId,
        collateral_amount: u128,
        debt_amount: u128,
    ) -> CdpResult {
        self.execute("redeem_collateral_and_burn", &[*account], || {
            require_amount(collateral_amount)?;
            self.oracle.registry().require_allowed(asset)?;
            self.apply_burn(account, debt_amount)?;
            let registered = self.apply_redeem(account, asset, collateral_amount)?;
            self.check_health(account)?;
            self.pull_and_burn_debt(account, debt_amount)?;
            self.push_collateral(registered, account, collateral_amount)
                .map_err(|err| self.remint_debt(err, account, debt_amount))
        })
    }

    fn apply_deposit(
        &self,
        account: &AccountId,
        asset: &AssetId,
        amount: u128,
    ) -> CdpResult<&RegisteredAsset> {
        require_amount(amount)?;
        let registered = self.oracle.registry().require_allowed(asset)?;
        self.ledgers.borrow_mut().deposit(account, asset, amount)?;
        Ok(registered)
    }

    fn apply_mint(&self, account: &AccountId, amount: u128) -> CdpResult {
        require_amount(amount)?;
        self.ledgers.borrow_mut().mint(account, amount)
    }

    fn apply_burn(&self, account: &AccountId, amount: u128) -> CdpResult {
        require_amount(amount)?;
        self.ledgers.borrow_mut().burn(account, account, amount)
    }

    fn apply_redeem(
        &self,
        account: &AccountId,
        asset: &AssetId,
        amount: u128,
    ) -> CdpResult<&RegisteredAsset> {
        require_amount(amount)?;
        let registered = self.oracle.registry().require_allowed(asset)?;
        self.ledgers
            .borrow_mut()
            .redeem(account, account, asset, amount)?;
        Ok(registered)
    }

    pub(crate) fn check_health(&self, account: &AccountId) -> CdpResult {
        let ledgers = self.ledgers.borrow();
        require_healthy(&self.oracle, &ledgers, account, &self.params).track_caller()
    }

    fn pull_collateral(
        &self,
        registered: &RegisteredAsset,
        account: &AccountId,
        amount: u128,
    ) -> CdpResult {
        token_call(
            registered.token().transfer_in(account, amount),
            CdpError::TransferFailed,
        )
    }

    pub(crate) fn push_collateral(
        &self,
        registered: &RegisteredAsset,
        to: &AccountId,
        amount: u128,
    ) -> CdpResult {
        token_call(
            registered.token().transfer_out(to, amount),
            CdpError::TransferFailed,
        )
    }

    fn push_debt(&self, account: &AccountId, amount: u128) -> CdpResult {
        token_call(self.debt_token.mint(account, amount), CdpError::MintFailed)
    }
}
