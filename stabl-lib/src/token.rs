use crate::state::ids::AccountId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("insufficient funds: {available} available, {requested} requested")]
    InsufficientFunds { available: u128, requested: u128 },
    #[error("token rejected the call: {0}")]
    Rejected(String),
}

/// Token collaborator backing one collateral asset.
///
/// `transfer_in` pulls atoms from a user into engine custody, `transfer_out` pushes them back.
pub trait CollateralToken {
    fn transfer_in(&self, from: &AccountId, amount: u128) -> Result<(), TokenError>;

    fn transfer_out(&self, to: &AccountId, amount: u128) -> Result<(), TokenError>;
}

/// The single debt asset, minted and burned by the engine.
///
/// `burn` destroys atoms previously pulled into custody with `transfer_in`.
pub trait DebtToken: CollateralToken {
    fn mint(&self, to: &AccountId, amount: u128) -> Result<(), TokenError>;

    fn burn(&self, amount: u128) -> Result<(), TokenError>;
}
