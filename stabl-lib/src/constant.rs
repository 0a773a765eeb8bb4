/// Number of decimal digits carried by every price, value and health factor.
pub const PRECISION_DECIMALS: u8 = 18;

pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// The debt asset is denominated in the unit of account, one unit being 10^18 atoms.
pub const DEBT_DECIMALS: u8 = PRECISION_DECIMALS;

/// Highest feed precision the oracle adapter accepts before normalization.
pub const MAX_FEED_DECIMALS: u8 = 36;

pub const POSITIVE_POWER_OF_TEN: [u128; 37] = {
    let mut powers = [1u128; 37];
    let mut i = 1;
    while i < powers.len() {
        powers[i] = powers[i - 1] * 10;
        i += 1;
    }
    powers
};

crate::const_assert!(POSITIVE_POWER_OF_TEN[PRECISION_DECIMALS as usize] == PRECISION);
crate::const_assert!(POSITIVE_POWER_OF_TEN.len() == MAX_FEED_DECIMALS as usize + 1);
