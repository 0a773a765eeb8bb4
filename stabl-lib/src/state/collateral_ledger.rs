use std::collections::BTreeMap;

use crate::{
    error::{CdpError, CdpResult},
    map_context,
    math::safe_math::SafeMath,
    state::ids::{AccountId, AssetId},
};

/// Per-account, per-asset collateral deposits, and the per-asset total.
///
/// Zero balances are never stored: an account that withdrew everything has no entry left.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollateralLedger {
    deposits: BTreeMap<AccountId, BTreeMap<AssetId, u128>>,
    total_deposited: BTreeMap<AssetId, u128>,
}

impl CollateralLedger {
    pub fn balance(&self, account: &AccountId, asset: &AssetId) -> u128 {
        self.deposits
            .get(account)
            .and_then(|assets| assets.get(asset))
            .copied()
            .unwrap_or_default()
    }

    pub fn total_deposited(&self, asset: &AssetId) -> u128 {
        self.total_deposited.get(asset).copied().unwrap_or_default()
    }

    pub fn has_account(&self, account: &AccountId) -> bool {
        self.deposits.contains_key(account)
    }

    #[track_caller]
    pub fn increase(&mut self, account: &AccountId, asset: &AssetId, amount: u128) -> CdpResult {
        if amount == 0 {
            return Err(CdpError::InvalidAmount.into());
        }
        let total = self.total_deposited(asset).safe_add(amount)?;
        let balance = self.balance(account, asset).safe_add(amount)?;
        self.deposits
            .entry(*account)
            .or_default()
            .insert(*asset, balance);
        self.total_deposited.insert(*asset, total);
        tracing::debug!(%account, %asset, amount, balance, "collateral increased");
        Ok(())
    }

    #[track_caller]
    pub fn decrease(&mut self, account: &AccountId, asset: &AssetId, amount: u128) -> CdpResult {
        if amount == 0 {
            return Err(CdpError::InvalidAmount.into());
        }
        let balance = self
            .balance(account, asset)
            .safe_sub(amount)
            .map_err(map_context!(CdpError::InsufficientBalance))?;
        let total = self.total_deposited(asset).safe_sub(amount)?;
        set_or_remove(&mut self.total_deposited, asset, total);
        if let Some(assets) = self.deposits.get_mut(account) {
            set_or_remove(assets, asset, balance);
            if assets.is_empty() {
                self.deposits.remove(account);
            }
        }
        tracing::debug!(%account, %asset, amount, balance, "collateral decreased");
        Ok(())
    }

    /// Copy of everything a mutation of `accounts` may change.
    pub(crate) fn checkpoint(&self, accounts: &[AccountId]) -> CollateralCheckpoint {
        CollateralCheckpoint {
            deposits: accounts
                .iter()
                .map(|account| (*account, self.deposits.get(account).cloned()))
                .collect(),
            total_deposited: self.total_deposited.clone(),
        }
    }

    pub(crate) fn restore(&mut self, checkpoint: CollateralCheckpoint) {
        for (account, deposits) in checkpoint.deposits {
            match deposits {
                Some(deposits) => self.deposits.insert(account, deposits),
                None => self.deposits.remove(&account),
            };
        }
        self.total_deposited = checkpoint.total_deposited;
    }
}

fn set_or_remove(map: &mut BTreeMap<AssetId, u128>, asset: &AssetId, amount: u128) {
    if amount == 0 {
        map.remove(asset);
    } else {
        map.insert(*asset, amount);
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CollateralCheckpoint {
    deposits: Vec<(AccountId, Option<BTreeMap<AssetId, u128>>)>,
    total_deposited: BTreeMap<AssetId, u128>,
}
