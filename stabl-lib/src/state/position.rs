use borsh::{BorshDeserialize, BorshSerialize};

use crate::{math::wad::Wad, state::ids::AssetId};

/// Snapshot of an account's solvency at current prices.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[cfg_attr(
    feature = "client",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct PositionHealth {
    pub debt: u128,
    pub collateral_value: Wad,
    pub health_factor: Wad,
}

/// One collateral line of an account, valued at current price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[cfg_attr(
    feature = "client",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CollateralPosition {
    pub asset: AssetId,
    pub amount: u128,
    pub value: Wad,
}

/// Debt and collateral value of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, BorshSerialize, BorshDeserialize)]
#[cfg_attr(
    feature = "client",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct AccountInformation {
    pub debt_minted: u128,
    pub collateral_value: Wad,
}
