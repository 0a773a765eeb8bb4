use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    constant::{MAX_FEED_DECIMALS, POSITIVE_POWER_OF_TEN, PRECISION_DECIMALS},
    error::{CdpError, CdpResult, CdpResultExt, ErrorWithContext},
    map_context,
    math::{safe_math::SafeMath, wad::Wad, wide::mul_div_floor},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, BorshSerialize, BorshDeserialize)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
/// Price of one whole unit of an asset, in the unit of account, on the 18-digit scale.
///
/// Ex : ETH price = 2000 => one ETH (10^18 atoms of an 18-decimals asset) is worth 2000
pub struct OraclePrice(Wad);

impl OraclePrice {
    /// Zero is not a price.
    #[track_caller]
    pub fn new(price: Wad) -> CdpResult<Self> {
        if price.is_zero() {
            return Err(CdpError::OracleError.into());
        }
        Ok(Self(price))
    }

    /// Rescales a raw feed answer expressed with `feed_decimals` digits to 18 digits.
    /// Finer feeds are truncated.
    #[track_caller]
    pub fn try_from_answer(answer: i128, feed_decimals: u8) -> CdpResult<Self> {
        if answer <= 0 {
            return Err(ErrorWithContext::from(CdpError::OracleError))
                .with_msg("non-positive answer");
        }
        if feed_decimals > MAX_FEED_DECIMALS {
            return Err(ErrorWithContext::from(CdpError::OracleError))
                .with_msg("feed decimals out of range");
        }
        let answer = answer as u128;
        let bits = if feed_decimals <= PRECISION_DECIMALS {
            let scale = POSITIVE_POWER_OF_TEN[(PRECISION_DECIMALS - feed_decimals) as usize];
            answer
                .safe_mul(scale)
                .map_err(map_context!(CdpError::OracleError))
                .with_msg("answer does not fit the internal scale")?
        } else {
            let scale = POSITIVE_POWER_OF_TEN[(feed_decimals - PRECISION_DECIMALS) as usize];
            answer / scale
        };
        Self::new(Wad::from_bits(bits)).with_msg("answer truncated to zero")
    }

    pub fn price(&self) -> Wad {
        self.0
    }

    /// `amount * price / 10^decimals`, truncated.
    #[track_caller]
    pub fn value_of(&self, amount: u128, decimals: u8) -> CdpResult<Wad> {
        mul_div_floor(
            amount,
            self.0.bits(),
            POSITIVE_POWER_OF_TEN[decimals as usize],
        )
        .map(Wad::from_bits)
    }

    /// `value * 10^decimals / price`, truncated.
    #[track_caller]
    pub fn amount_from_value(&self, value: Wad, decimals: u8) -> CdpResult<u128> {
        mul_div_floor(
            value.bits(),
            POSITIVE_POWER_OF_TEN[decimals as usize],
            self.0.bits(),
        )
    }
}

impl std::fmt::Display for OraclePrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OraclePrice({})", self.0)
    }
}
