use crate::{error::CdpResult, math::wad::Wad, math::wide::mul_div_floor};

pub const ONE_HUNDRED_PERCENT: u8 = 100;

/// `amount * percent / 100`, truncated.
#[track_caller]
pub fn apply_percent(amount: u128, percent: u128) -> CdpResult<u128> {
    mul_div_floor(amount, percent, ONE_HUNDRED_PERCENT as u128)
}

#[track_caller]
pub fn apply_percent_wad(value: Wad, percent: u128) -> CdpResult<Wad> {
    apply_percent(value.bits(), percent).map(Wad::from_bits)
}

/// `amount * (100 + bonus) / 100`, the amount grossed up by a bonus.
#[track_caller]
pub fn with_bonus(amount: u128, bonus: u8) -> CdpResult<u128> {
    apply_percent(amount, ONE_HUNDRED_PERCENT as u128 + bonus as u128)
}
