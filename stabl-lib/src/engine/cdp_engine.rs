use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::{
    engine::guard::ReentrancyGuard,
    error::{CdpError, CdpResult, ErrorWithContext},
    oracle::{
        oracle_adapter::OracleAdapter,
        oracle_provider::{Clock, PriceFeed},
    },
    state::{
        asset_registry::AssetRegistry,
        ids::AccountId,
        ledgers::Ledgers,
        risk_config::{EngineConfig, RiskParameters},
    },
    token::{CollateralToken, DebtToken, TokenError},
};

/// Collateralized debt engine.
///
/// Every method takes `&self`: collaborators are called while an operation is in flight and
/// may call back into the engine. Mutating entry points are serialized by a re-entrancy guard,
/// read-only queries stay available to collaborators and observe the effects applied so far.
/// The engine is neither `Send` nor `Sync`.
pub struct CdpEngine {
    pub(crate) params: RiskParameters,
    pub(crate) oracle: OracleAdapter,
    pub(crate) debt_token: Rc<dyn DebtToken>,
    pub(crate) ledgers: RefCell<Ledgers>,
    entered: Cell<bool>,
}

impl CdpEngine {
    /// `feeds` and `collateral_tokens` are co-indexed with `config.assets`.
    pub fn new(
        config: EngineConfig,
        feeds: Vec<Rc<dyn PriceFeed>>,
        collateral_tokens: Vec<Rc<dyn CollateralToken>>,
        debt_token: Rc<dyn DebtToken>,
    ) -> CdpResult<Self> {
        config.risk.validate()?;
        let registry = AssetRegistry::new(config.assets, feeds, collateral_tokens)?;
        tracing::info!(
            assets = registry.len(),
            liquidation_threshold = config.risk.liquidation_threshold,
            liquidation_bonus = config.risk.liquidation_bonus,
            min_health_factor = %config.risk.min_health_factor,
            "engine created"
        );
        Ok(Self {
            params: config.risk,
            oracle: OracleAdapter::new(registry),
            debt_token,
            ledgers: RefCell::new(Ledgers::default()),
            entered: Cell::new(false),
        })
    }

    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.oracle = self.oracle.with_clock(clock);
        self
    }

    /// Runs `op` as one atomic unit: on error every ledger entry of `accounts`, the system totals
    /// and the event log are put back as they were.
    pub(crate) fn execute<T>(
        &self,
        operation: &'static str,
        accounts: &[AccountId],
        op: impl FnOnce() -> CdpResult<T>,
    ) -> CdpResult<T> {
        let _guard = match ReentrancyGuard::enter(&self.entered) {
            Ok(guard) => guard,
            Err(err) => {
                tracing::warn!(operation, "re-entrant call rejected");
                return Err(err);
            }
        };
        let checkpoint = self.ledgers.borrow().checkpoint(accounts);
        match op() {
            Ok(value) => {
                let ledgers = self.ledgers.borrow();
                for event in ledgers.events_since(&checkpoint) {
                    event.log();
                }
                tracing::debug!(operation, "operation committed");
                Ok(value)
            }
            Err(err) => {
                self.ledgers.borrow_mut().restore(checkpoint);
                tracing::warn!(operation, error = %err.error, msg = ?err.msg, "operation rolled back");
                Err(err)
            }
        }
    }

    /// Pulls `amount` of the debt asset from `payer` and destroys it.
    pub(crate) fn pull_and_burn_debt(&self, payer: &AccountId, amount: u128) -> CdpResult {
        token_call(
            self.debt_token.transfer_in(payer, amount),
            CdpError::TransferFailed,
        )?;
        token_call(self.debt_token.burn(amount), CdpError::TransferFailed).map_err(|err| {
            compensate(err, "debt refund", || self.debt_token.transfer_out(payer, amount))
        })
    }

    /// Gives back debt burned by [`CdpEngine::pull_and_burn_debt`] when a later call fails.
    pub(crate) fn remint_debt(
        &self,
        err: ErrorWithContext<CdpError>,
        payer: &AccountId,
        amount: u128,
    ) -> ErrorWithContext<CdpError> {
        compensate(err, "debt re-mint", || self.debt_token.mint(payer, amount))
    }
}

/// Undoes a collaborator call that went through before `err` aborted the operation.
///
/// Ledgers are restored by `execute`, token state only by this reverse call. A failed reverse
/// call is logged and recorded in the returned error.
pub(crate) fn compensate(
    err: ErrorWithContext<CdpError>,
    undo: &'static str,
    reverse: impl FnOnce() -> Result<(), TokenError>,
) -> ErrorWithContext<CdpError> {
    match reverse() {
        Ok(()) => {
            tracing::warn!(undo, error = %err.error, "collaborator call compensated");
            err
        }
        Err(reverse_err) => {
            tracing::error!(undo, error = %err.error, %reverse_err, "compensation failed");
            err.with_msg(format!("{undo} failed: {reverse_err}"))
        }
    }
}

#[track_caller]
pub(crate) fn require_amount(amount: u128) -> CdpResult {
    if amount == 0 {
        return Err(CdpError::InvalidAmount.into());
    }
    Ok(())
}

/// Maps a collaborator failure to `kind`, keeping the collaborator's message.
#[track_caller]
pub(crate) fn token_call(result: Result<(), TokenError>, kind: CdpError) -> CdpResult {
    let location = std::panic::Location::caller();
    result.map_err(|err| ErrorWithContext::new(kind, location).with_msg(err.to_string()))
}

impl std::fmt::Debug for CdpEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdpEngine")
            .field("params", &self.params)
            .field("oracle", &self.oracle)
            .field("ledgers", &self.ledgers)
            .finish_non_exhaustive()
    }
}
