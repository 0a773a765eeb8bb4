use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    error::{CdpError, CdpResult, CdpResultExt, ErrorWithContext},
    oracle::{oracle_config::OracleValidationConfig, oracle_price::OraclePrice},
};

/// One aggregator round as reported by a price feed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[cfg_attr(
    feature = "client",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct RoundData {
    pub round_id: u128,
    pub answer: i128,
    pub started_at: u64,
    /// Zero while the round is still open.
    pub updated_at: u64,
    pub answered_in_round: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("price feed failure: {0}")]
pub struct FeedError(pub String);

/// External source of prices for a single asset.
pub trait PriceFeed {
    /// Number of digits after the decimal point in `answer`.
    fn decimals(&self) -> u8;

    fn latest_round_data(&self) -> Result<RoundData, FeedError>;
}

pub trait Clock {
    fn unix_timestamp(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UncheckedOraclePrice {
    round: RoundData,
    decimals: u8,
}

impl UncheckedOraclePrice {
    pub fn new(round: RoundData, decimals: u8) -> Self {
        Self { round, decimals }
    }

    #[track_caller]
    pub fn load(feed: &dyn PriceFeed) -> CdpResult<Self> {
        let decimals = feed.decimals();
        let round = feed.latest_round_data().map_err(|err| {
            ErrorWithContext::from(CdpError::OracleError).with_msg(err.to_string())
        })?;
        Ok(Self::new(round, decimals))
    }

    #[track_caller]
    pub fn validate(
        &self,
        config: &OracleValidationConfig,
        unix_timestamp: u64,
    ) -> CdpResult<OraclePrice> {
        let round = &self.round;
        if round.updated_at == 0 {
            return Err(ErrorWithContext::from(CdpError::StalePrice))
                .with_msg("incomplete round");
        }
        if round.answered_in_round < round.round_id {
            return Err(ErrorWithContext::from(CdpError::StalePrice))
                .with_msg("answer carried over from a previous round");
        }
        let age = unix_timestamp.saturating_sub(round.updated_at);
        if config.max_age().is_some_and(|max_age| age > max_age) {
            return Err(ErrorWithContext::from(CdpError::StalePrice))
                .with_msg("round too old");
        }
        OraclePrice::try_from_answer(round.answer, self.decimals)
    }
}
