use primitive_types::U256;

use crate::error::{CdpError, CdpResult};

/// `a * b / c` rounded toward zero. The product of two 128-bit operands always fits in 256 bits.
#[track_caller]
pub fn mul_div_floor(a: u128, b: u128, c: u128) -> CdpResult<u128> {
    if c == 0 {
        return Err(CdpError::DivisionByZero.into());
    }
    let quotient = U256::from(a) * U256::from(b) / U256::from(c);
    if quotient > U256::from(u128::MAX) {
        return Err(CdpError::MultiplicationOverflow.into());
    }
    Ok(quotient.low_u128())
}
