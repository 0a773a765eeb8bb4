use std::str::FromStr;

use crate::{
    constant::{POSITIVE_POWER_OF_TEN, PRECISION, PRECISION_DECIMALS},
    error::{CdpError, CdpResult},
    math::{safe_math::SafeMath, wide::mul_div_floor},
    with_context,
};

/// Unsigned decimal fixed point with 18 fractional digits.
///
/// Prices, collateral values and health factors all share this scale. `Wad::MAX` doubles as the
/// "infinite" health factor of a debt-free position.
#[repr(transparent)]
#[derive(
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    borsh::BorshSerialize,
    borsh::BorshDeserialize,
)]
pub struct Wad(u128);

impl Wad {
    pub const ZERO: Self = Wad(0);
    pub const ONE: Self = Wad(PRECISION);
    pub const MAX: Self = Wad(u128::MAX);

    pub const fn from_bits(bits: u128) -> Self {
        Wad(bits)
    }

    pub const fn bits(self) -> u128 {
        self.0
    }

    pub const fn from_units(units: u64) -> Self {
        Wad(units as u128 * PRECISION)
    }

    #[track_caller]
    pub fn checked_from_units(units: u128) -> CdpResult<Self> {
        units
            .checked_mul(PRECISION)
            .map(Wad)
            .ok_or_else(with_context!(CdpError::MultiplicationOverflow))
    }

    /// `num / den` truncated to 18 digits.
    #[track_caller]
    pub fn from_ratio(num: u128, den: u128) -> CdpResult<Self> {
        mul_div_floor(num, PRECISION, den).map(Wad)
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_max(self) -> bool {
        self.0 == u128::MAX
    }

    pub fn to_float(self) -> f64 {
        if self.is_max() {
            return f64::INFINITY;
        }
        self.0 as f64 / PRECISION as f64
    }
}

impl std::fmt::Display for Wad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_max() {
            return write!(f, "max");
        }
        let units = self.0 / PRECISION;
        let frac = self.0 % PRECISION;
        if frac == 0 {
            return write!(f, "{units}");
        }
        let digits = format!("{frac:0width$}", width = PRECISION_DECIMALS as usize);
        write!(f, "{units}.{}", digits.trim_end_matches('0'))
    }
}

impl std::fmt::Debug for Wad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Wad({self})")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseWadError {
    #[error("empty input")]
    Empty,
    #[error("invalid digit in {0:?}")]
    InvalidDigit(String),
    #[error("more than 18 fractional digits in {0:?}")]
    TooPrecise(String),
    #[error("{0:?} does not fit")]
    Overflow(String),
}

impl FromStr for Wad {
    type Err = ParseWadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseWadError::Empty);
        }
        if s == "max" {
            return Ok(Wad::MAX);
        }
        let (units, frac) = s.split_once('.').unwrap_or((s, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if units.is_empty() || !all_digits(units) || !all_digits(frac) {
            return Err(ParseWadError::InvalidDigit(s.to_owned()));
        }
        if frac.len() > PRECISION_DECIMALS as usize {
            return Err(ParseWadError::TooPrecise(s.to_owned()));
        }
        let overflow = || ParseWadError::Overflow(s.to_owned());
        let units: u128 = units.parse().map_err(|_| overflow())?;
        let frac_bits = if frac.is_empty() {
            0
        } else {
            let scale = POSITIVE_POWER_OF_TEN[PRECISION_DECIMALS as usize - frac.len()];
            frac.parse::<u128>().map_err(|_| overflow())? * scale
        };
        units
            .checked_mul(PRECISION)
            .and_then(|bits| bits.checked_add(frac_bits))
            .map(Wad)
            .ok_or_else(overflow)
    }
}

#[cfg(feature = "client")]
impl serde::Serialize for Wad {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "client")]
impl<'de> serde::Deserialize<'de> for Wad {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str> as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl SafeMath for Wad {
    fn safe_add(self, other: Self) -> CdpResult<Self> {
        self.0.safe_add(other.0).map(Wad)
    }

    fn safe_sub(self, other: Self) -> CdpResult<Self> {
        self.0.safe_sub(other.0).map(Wad)
    }

    fn safe_mul(self, other: Self) -> CdpResult<Self> {
        mul_div_floor(self.0, other.0, PRECISION).map(Wad)
    }

    fn safe_div(self, other: Self) -> CdpResult<Self> {
        mul_div_floor(self.0, PRECISION, other.0).map(Wad)
    }
}
