use borsh::{BorshDeserialize, BorshSerialize};
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{
    math::wad::Wad,
    state::ids::{AccountId, AssetId},
};

#[repr(u8)]
#[derive(
    Clone, Copy, Debug, PartialEq, BorshSerialize, BorshDeserialize, IntoPrimitive, TryFromPrimitive,
)]
pub enum CdpEventTag {
    CollateralDeposited,
    CollateralRedeemed,
    DebtMinted,
    DebtBurned,
    Liquidated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[cfg_attr(
    feature = "client",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CollateralDepositedEvent {
    pub account: AccountId,
    pub asset: AssetId,
    pub amount: u128,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[cfg_attr(
    feature = "client",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CollateralRedeemedEvent {
    /// Account whose ledger entry decreased
    pub from: AccountId,
    /// Receiver of the atoms, the liquidator during a liquidation
    pub to: AccountId,
    pub asset: AssetId,
    pub amount: u128,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[cfg_attr(
    feature = "client",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct DebtMintedEvent {
    pub account: AccountId,
    pub amount: u128,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[cfg_attr(
    feature = "client",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct DebtBurnedEvent {
    pub on_behalf_of: AccountId,
    pub payer: AccountId,
    pub amount: u128,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[cfg_attr(
    feature = "client",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct LiquidatedEvent {
    pub liquidator: AccountId,
    pub target: AccountId,
    pub asset: AssetId,
    pub debt_repaid: u128,
    /// Total atoms moved to the liquidator, bonus included
    pub collateral_seized: u128,
    pub bonus_collateral: u128,
    pub health_factor_before: Wad,
    pub health_factor_after: Wad,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "client",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "event")
)]
pub enum CdpEvent {
    CollateralDeposited(CollateralDepositedEvent),
    CollateralRedeemed(CollateralRedeemedEvent),
    DebtMinted(DebtMintedEvent),
    DebtBurned(DebtBurnedEvent),
    Liquidated(LiquidatedEvent),
}

impl CdpEvent {
    pub fn tag(&self) -> CdpEventTag {
        match self {
            CdpEvent::CollateralDeposited(_) => CdpEventTag::CollateralDeposited,
            CdpEvent::CollateralRedeemed(_) => CdpEventTag::CollateralRedeemed,
            CdpEvent::DebtMinted(_) => CdpEventTag::DebtMinted,
            CdpEvent::DebtBurned(_) => CdpEventTag::DebtBurned,
            CdpEvent::Liquidated(_) => CdpEventTag::Liquidated,
        }
    }

    pub fn to_bytes(&self) -> std::io::Result<Vec<u8>> {
        let mut data = Vec::with_capacity(160);
        self.serialize(&mut data)?;
        Ok(data)
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<CdpEvent> {
        let (tag, _) = bytes.split_first()?;
        CdpEventTag::try_from(*tag).ok()?;
        CdpEvent::try_from_slice(bytes).ok()
    }

    /// Emits the event to the `tracing` subscriber.
    pub fn log(&self) {
        match self {
            CdpEvent::CollateralDeposited(e) => tracing::info!(
                account = %e.account, asset = %e.asset, amount = e.amount,
                "collateral deposited"
            ),
            CdpEvent::CollateralRedeemed(e) => tracing::info!(
                from = %e.from, to = %e.to, asset = %e.asset, amount = e.amount,
                "collateral redeemed"
            ),
            CdpEvent::DebtMinted(e) => {
                tracing::info!(account = %e.account, amount = e.amount, "debt minted")
            }
            CdpEvent::DebtBurned(e) => tracing::info!(
                on_behalf_of = %e.on_behalf_of, payer = %e.payer, amount = e.amount,
                "debt burned"
            ),
            CdpEvent::Liquidated(e) => tracing::info!(
                liquidator = %e.liquidator, target = %e.target, asset = %e.asset,
                debt_repaid = e.debt_repaid, collateral_seized = e.collateral_seized,
                health_factor_before = %e.health_factor_before,
                health_factor_after = %e.health_factor_after,
                "position liquidated"
            ),
        }
    }
}

impl BorshSerialize for CdpEvent {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> Result<(), std::io::Error> {
        self.tag().serialize(writer)?;
        match self {
            CdpEvent::CollateralDeposited(event) => event.serialize(writer),
            CdpEvent::CollateralRedeemed(event) => event.serialize(writer),
            CdpEvent::DebtMinted(event) => event.serialize(writer),
            CdpEvent::DebtBurned(event) => event.serialize(writer),
            CdpEvent::Liquidated(event) => event.serialize(writer),
        }
    }
}

impl BorshDeserialize for CdpEvent {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> Result<Self, std::io::Error> {
        let tag = CdpEventTag::deserialize_reader(reader)?;
        match tag {
            CdpEventTag::CollateralDeposited => Ok(CdpEvent::CollateralDeposited(
                <_>::deserialize_reader(reader)?,
            )),
            CdpEventTag::CollateralRedeemed => Ok(CdpEvent::CollateralRedeemed(
                <_>::deserialize_reader(reader)?,
            )),
            CdpEventTag::DebtMinted => Ok(CdpEvent::DebtMinted(<_>::deserialize_reader(reader)?)),
            CdpEventTag::DebtBurned => Ok(CdpEvent::DebtBurned(<_>::deserialize_reader(reader)?)),
            CdpEventTag::Liquidated => Ok(CdpEvent::Liquidated(<_>::deserialize_reader(reader)?)),
        }
    }
}
