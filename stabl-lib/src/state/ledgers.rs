use crate::{
    error::CdpResult,
    event::{
        CdpEvent, CollateralDepositedEvent, CollateralRedeemedEvent, DebtBurnedEvent,
        DebtMintedEvent,
    },
    state::{
        collateral_ledger::{CollateralCheckpoint, CollateralLedger},
        debt_ledger::{DebtCheckpoint, DebtLedger},
        ids::{AccountId, AssetId},
    },
};

/// Collateral and debt books plus the audit trail of every committed change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledgers {
    collateral: CollateralLedger,
    debt: DebtLedger,
    events: Vec<CdpEvent>,
}

impl Ledgers {
    pub fn collateral(&self) -> &CollateralLedger {
        &self.collateral
    }

    pub fn debt(&self) -> &DebtLedger {
        &self.debt
    }

    pub fn events(&self) -> &[CdpEvent] {
        &self.events
    }

    #[track_caller]
    pub fn deposit(&mut self, account: &AccountId, asset: &AssetId, amount: u128) -> CdpResult {
        self.collateral.increase(account, asset, amount)?;
        self.events
            .push(CdpEvent::CollateralDeposited(CollateralDepositedEvent {
                account: *account,
                asset: *asset,
                amount,
            }));
        Ok(())
    }

    #[track_caller]
    pub fn redeem(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        asset: &AssetId,
        amount: u128,
    ) -> CdpResult {
        self.collateral.decrease(from, asset, amount)?;
        self.events
            .push(CdpEvent::CollateralRedeemed(CollateralRedeemedEvent {
                from: *from,
                to: *to,
                asset: *asset,
                amount,
            }));
        Ok(())
    }

    #[track_caller]
    pub fn mint(&mut self, account: &AccountId, amount: u128) -> CdpResult {
        self.debt.increase(account, amount)?;
        self.events.push(CdpEvent::DebtMinted(DebtMintedEvent {
            account: *account,
            amount,
        }));
        Ok(())
    }

    #[track_caller]
    pub fn burn(&mut self, on_behalf_of: &AccountId, payer: &AccountId, amount: u128) -> CdpResult {
        self.debt.decrease(on_behalf_of, amount)?;
        self.events.push(CdpEvent::DebtBurned(DebtBurnedEvent {
            on_behalf_of: *on_behalf_of,
            payer: *payer,
            amount,
        }));
        Ok(())
    }

    pub fn record(&mut self, event: CdpEvent) {
        self.events.push(event);
    }

    pub fn checkpoint(&self, accounts: &[AccountId]) -> LedgerCheckpoint {
        LedgerCheckpoint {
            collateral: self.collateral.checkpoint(accounts),
            debt: self.debt.checkpoint(accounts),
            events_len: self.events.len(),
        }
    }

    /// Puts back every entry captured by `checkpoint`, dropping the events recorded since.
    pub fn restore(&mut self, checkpoint: LedgerCheckpoint) {
        self.collateral.restore(checkpoint.collateral);
        self.debt.restore(checkpoint.debt);
        self.events.truncate(checkpoint.events_len);
    }

    pub fn events_since(&self, checkpoint: &LedgerCheckpoint) -> &[CdpEvent] {
        self.events.get(checkpoint.events_len..).unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct LedgerCheckpoint {
    collateral: CollateralCheckpoint,
    debt: DebtCheckpoint,
    events_len: usize,
}
