use crate::{
    error::{CdpError, CdpResult},
    math::wad::Wad,
    math::wide::mul_div_floor,
    with_context,
};

pub trait SafeMath<Other = Self, Output = Self>: Sized {
    #[track_caller]
    fn safe_add(self, other: Other) -> CdpResult<Output>;
    #[track_caller]
    fn safe_sub(self, other: Other) -> CdpResult<Output>;
    #[track_caller]
    fn safe_mul(self, other: Other) -> CdpResult<Output>;
    #[track_caller]
    fn safe_div(self, other: Other) -> CdpResult<Output>;
}

impl SafeMath for u128 {
    fn safe_add(self, other: Self) -> CdpResult<Self> {
        self.checked_add(other)
            .ok_or_else(with_context!(CdpError::AdditionOverflow))
    }

    fn safe_sub(self, other: Self) -> CdpResult<Self> {
        self.checked_sub(other)
            .ok_or_else(with_context!(CdpError::SubtractionOverflow))
    }

    fn safe_mul(self, other: Self) -> CdpResult<Self> {
        self.checked_mul(other)
            .ok_or_else(with_context!(CdpError::MultiplicationOverflow))
    }

    fn safe_div(self, other: Self) -> CdpResult<Self> {
        self.checked_div(other)
            .ok_or_else(with_context!(CdpError::DivisionByZero))
    }
}

/// Scaling a decimal by a plain integer, the result stays on the 18-digit scale.
impl SafeMath<u128, Wad> for Wad {
    fn safe_add(self, other: u128) -> CdpResult<Wad> {
        self.safe_add(Wad::checked_from_units(other)?)
    }

    fn safe_sub(self, other: u128) -> CdpResult<Wad> {
        self.safe_sub(Wad::checked_from_units(other)?)
    }

    fn safe_mul(self, other: u128) -> CdpResult<Wad> {
        self.bits().safe_mul(other).map(Wad::from_bits)
    }

    fn safe_div(self, other: u128) -> CdpResult<Wad> {
        mul_div_floor(self.bits(), 1, other).map(Wad::from_bits)
    }
}
