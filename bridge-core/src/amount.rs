//! Fixed-point conversions between raw minor-unit integers and decimals
//!
//! Chain clients and config tables speak raw integer amounts ("planck"
//! units); everything downstream works in `Decimal` values whose scale is
//! the token's configured precision. Conversions never round silently.

use crate::{Error, Result};
use rust_decimal::Decimal;

/// Decimal precision assumed when a token entry does not configure one
pub const DEFAULT_DECIMALS: u32 = 12;

/// Largest scale `Decimal` can carry
const MAX_DECIMALS: u32 = 28;

/// Build a decimal amount from a raw minor-unit integer and a precision.
///
/// The resulting value keeps `decimals` as its scale, so
/// `from_raw(79_999_999, 12)` is `0.000079999999` with scale 12.
pub fn from_raw(raw: u128, decimals: u32) -> Result<Decimal> {
    let overflow = || Error::AmountOverflow { raw, decimals };

    if decimals > MAX_DECIMALS {
        return Err(overflow());
    }

    let mantissa = i128::try_from(raw).map_err(|_| overflow())?;
    Decimal::try_from_i128_with_scale(mantissa, decimals).map_err(|_| overflow())
}

/// Convert a decimal amount back to raw minor units at the given precision.
///
/// Fails on negative amounts and on amounts carrying more fractional digits
/// than the precision can hold; money is never rounded on the way out.
pub fn to_raw(amount: Decimal, decimals: u32) -> Result<u128> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(Error::AmountNegative { amount });
    }

    // Work on the mantissa directly; `rescale` caps at the 96-bit mantissa
    // and would silently stop short of the requested scale.
    let mantissa = u128::try_from(amount.mantissa()).map_err(|_| Error::AmountNegative { amount })?;
    let scale = amount.scale();

    if scale > decimals {
        // Finer than the chain representation: only exact values convert.
        let factor = 10u128.pow(scale - decimals);
        if mantissa % factor != 0 {
            return Err(Error::PrecisionLoss { amount, decimals });
        }
        Ok(mantissa / factor)
    } else {
        let too_large = || Error::AmountTooLarge { amount, decimals };
        let factor = 10u128.checked_pow(decimals - scale).ok_or_else(too_large)?;
        mantissa.checked_mul(factor).ok_or_else(too_large)
    }
}
