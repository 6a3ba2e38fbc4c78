//! Conversions between integer cents (storage, fulfillment platform) and
//! two-place decimals (API, storefront platform).

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Converts a price to cents, rejecting negative amounts and fractions of a cent.
pub fn decimal_to_cents(price: Decimal) -> Result<i64, String> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(format!("price must not be negative, got {price}"));
    }
    let cents = price
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| format!("price is out of range: {price}"))?;
    if cents.fract() != Decimal::ZERO {
        return Err(format!("price has more than two decimal places: {price}"));
    }
    cents
        .trunc()
        .to_i64()
        .ok_or_else(|| format!("price is out of range: {price}"))
}

/// Parses a storefront price string such as `"20.99"` or `"$20.99"`.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let cleaned = raw.trim().trim_start_matches('$').replace(',', "");
    cleaned.parse::<Decimal>().ok()
}
