//! Fixed-scale decimal arithmetic with round-half-up
//!
//! `BigDecimal`'s own division works to a fixed number of significant digits
//! and would round twice when the result is rescaled. The helpers here divide
//! the unscaled integers exactly and round once, so `a / b` at scale 10 is
//! bit-for-bit reproducible.

use crate::error::{FxError, Result};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

/// Number of fractional digits every rate is stored with
pub const RATE_SCALE: i64 = 10;

/// Divide `dividend` by `divisor`, rounding half-up to `scale` fractional digits
pub fn divide_half_up(dividend: &BigDecimal, divisor: &BigDecimal, scale: i64) -> Result<BigDecimal> {
    let (num, num_scale) = dividend.as_bigint_and_exponent();
    let (den, den_scale) = divisor.as_bigint_and_exponent();

    if den.is_zero() {
        return Err(FxError::Arithmetic(format!(
            "Division of {} by zero",
            dividend
        )));
    }

    // dividend / divisor * 10^scale == num / den * 10^(scale + den_scale - num_scale)
    let shift = scale + den_scale - num_scale;
    let (num, den) = if shift >= 0 {
        (num * pow10(shift)?, den)
    } else {
        (num, den * pow10(-shift)?)
    };

    Ok(BigDecimal::new(div_round_half_up(&num, &den), scale))
}

/// Rescale `value` to `scale` fractional digits, rounding half-up
pub fn round_half_up(value: &BigDecimal, scale: i64) -> Result<BigDecimal> {
    let (digits, current) = value.as_bigint_and_exponent();

    let rounded = if current <= scale {
        digits * pow10(scale - current)?
    } else {
        div_round_half_up(&digits, &pow10(current - scale)?)
    };
    Ok(BigDecimal::new(rounded, scale))
}

/// Integer division rounding halves away from zero
fn div_round_half_up(num: &BigInt, den: &BigInt) -> BigInt {
    let negative = num.is_negative() != den.is_negative();
    let num = num.abs();
    let den = den.abs();

    // floor((2|n| + |d|) / 2|d|) == round_half_up(|n| / |d|)
    let two_den = &den * 2u32;
    let quotient = (num * 2u32 + den) / two_den;

    if negative {
        -quotient
    } else {
        quotient
    }
}

fn pow10(exp: i64) -> Result<BigInt> {
    let exp = u32::try_from(exp).map_err(|_| {
        FxError::Arithmetic(format!("Decimal exponent out of range: {}", exp))
    })?;
    Ok(BigInt::from(10u32).pow(exp))
}
