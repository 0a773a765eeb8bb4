use std::collections::BTreeMap;

use crate::{
    error::{CdpError, CdpResult},
    map_context,
    math::safe_math::SafeMath,
    state::ids::AccountId,
};

/// Debt minted per account, and the total outstanding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebtLedger {
    debt: BTreeMap<AccountId, u128>,
    total_debt: u128,
}

impl DebtLedger {
    pub fn debt(&self, account: &AccountId) -> u128 {
        self.debt.get(account).copied().unwrap_or_default()
    }

    pub fn total_debt(&self) -> u128 {
        self.total_debt
    }

    pub fn has_account(&self, account: &AccountId) -> bool {
        self.debt.contains_key(account)
    }

    #[track_caller]
    pub fn increase(&mut self, account: &AccountId, amount: u128) -> CdpResult {
        if amount == 0 {
            return Err(CdpError::InvalidAmount.into());
        }
        let total_debt = self.total_debt.safe_add(amount)?;
        let debt = self.debt(account).safe_add(amount)?;
        self.debt.insert(*account, debt);
        self.total_debt = total_debt;
        tracing::debug!(%account, amount, debt, "debt increased");
        Ok(())
    }

    #[track_caller]
    pub fn decrease(&mut self, account: &AccountId, amount: u128) -> CdpResult {
        if amount == 0 {
            return Err(CdpError::InvalidAmount.into());
        }
        let debt = self
            .debt(account)
            .safe_sub(amount)
            .map_err(map_context!(CdpError::InsufficientBalance))?;
        self.total_debt = self.total_debt.safe_sub(amount)?;
        if debt == 0 {
            self.debt.remove(account);
        } else {
            self.debt.insert(*account, debt);
        }
        tracing::debug!(%account, amount, debt, "debt decreased");
        Ok(())
    }

    pub(crate) fn checkpoint(&self, accounts: &[AccountId]) -> DebtCheckpoint {
        DebtCheckpoint {
            debt: accounts
                .iter()
                .map(|account| (*account, self.debt.get(account).copied()))
                .collect(),
            total_debt: self.total_debt,
        }
    }

    pub(crate) fn restore(&mut self, checkpoint: DebtCheckpoint) {
        for (account, debt) in checkpoint.debt {
            match debt {
                Some(debt) => self.debt.insert(account, debt),
                None => self.debt.remove(&account),
            };
        }
        self.total_debt = checkpoint.total_debt;
    }
}

#[derive(Debug, Clone)]
pub(crate) struct DebtCheckpoint {
    debt: Vec<(AccountId, Option<u128>)>,
    total_debt: u128,
}
