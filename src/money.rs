//! Money

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// A price in a fixed ISO currency.
pub type Price = Money<'static, Currency>;

/// Errors that can occur while reading a price.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The text is not a number.
    #[error("malformed price: {0:?}")]
    Malformed(String),

    /// The number is below zero.
    #[error("negative price: {0}")]
    Negative(String),

    /// The number does not fit in minor units.
    #[error("price out of range: {0}")]
    OutOfRange(String),

    /// The currency code is not one the storefront supports.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Look up a supported currency by ISO code.
///
/// # Errors
///
/// Returns [`PriceError::UnknownCurrency`] for any code outside the supported set.
pub fn currency_from_code(code: &str) -> Result<&'static Currency, PriceError> {
    match code {
        "PHP" => Ok(iso::PHP),
        "USD" => Ok(iso::USD),
        "GBP" => Ok(iso::GBP),
        "EUR" => Ok(iso::EUR),
        other => Err(PriceError::UnknownCurrency(other.to_string())),
    }
}

/// Parse a fixture price string (e.g. `"150 PHP"`) into minor units and currency.
///
/// # Errors
///
/// Returns an error if the string is not in the format `AMOUNT CURRENCY`, if the
/// amount is not a non-negative decimal, or if the currency is unknown.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), PriceError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(PriceError::Malformed(format!(
            "expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = currency_from_code(code)?;
    let minor_units = amount_to_minor(amount, currency)?;

    Ok((minor_units, currency))
}

/// Parse a shelf price as displayed on a menu card (e.g. `"₱150"`, `"$12.50"`, `"70"`).
///
/// Only the symbol of `currency` may precede the amount; anything else is malformed.
///
/// # Errors
///
/// Returns an error if nothing numeric remains, if the amount is negative, or if
/// it does not fit in minor units.
pub fn parse_shelf_price(text: &str, currency: &'static Currency) -> Result<Price, PriceError> {
    let trimmed = text.trim();

    let amount = trimmed
        .strip_prefix(currency.symbol)
        .unwrap_or(trimmed)
        .trim();

    let minor_units = amount_to_minor(amount, currency).map_err(|error| match error {
        PriceError::Malformed(_) => PriceError::Malformed(text.to_string()),
        other => other,
    })?;

    Ok(Money::from_minor(minor_units, currency))
}

fn amount_to_minor(amount: &str, currency: &'static Currency) -> Result<i64, PriceError> {
    let value = amount
        .parse::<Decimal>()
        .map_err(|_err| PriceError::Malformed(amount.to_string()))?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(PriceError::Negative(amount.to_string()));
    }

    let scale = 10_i64
        .checked_pow(currency.exponent)
        .ok_or_else(|| PriceError::OutOfRange(amount.to_string()))?;

    value
        .checked_mul(Decimal::from(scale))
        .and_then(|minor| minor.round_dp(0).to_i64())
        .ok_or_else(|| PriceError::OutOfRange(amount.to_string()))
}

/// Format a price as its currency symbol followed by the amount, dropping
/// trailing zero decimals (`₱200`, `$12.5`).
pub fn format_price(price: &Price) -> String {
    format!("{}{}", price.currency().symbol, price.amount().normalize())
}

/// Format an order total the way the cart footer shows it.
pub fn format_total(total: &Price) -> String {
    format!("Total: {}", format_price(total))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{PHP, USD};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_reads_amount_and_currency() -> TestResult {
        let (minor, currency) = parse_price("150 PHP")?;

        assert_eq!(minor, 15_000);
        assert_eq!(currency, PHP);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        assert!(matches!(
            parse_price("150PHP"),
            Err(PriceError::Malformed(_))
        ));
        assert!(matches!(
            parse_price("150 PHP extra"),
            Err(PriceError::Malformed(_))
        ));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(PriceError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn shelf_price_strips_symbol() -> TestResult {
        assert_eq!(parse_shelf_price("₱150", PHP)?, Money::from_minor(15_000, PHP));
        assert_eq!(parse_shelf_price(" $12.50 ", USD)?, Money::from_minor(1250, USD));
        assert_eq!(parse_shelf_price("70", PHP)?, Money::from_minor(7000, PHP));

        Ok(())
    }

    #[test]
    fn shelf_price_rejects_garbage() {
        assert!(matches!(
            parse_shelf_price("₱", PHP),
            Err(PriceError::Malformed(_))
        ));
        assert!(matches!(
            parse_shelf_price("NaN", PHP),
            Err(PriceError::Malformed(_))
        ));
        assert!(matches!(
            parse_shelf_price("₱abc", PHP),
            Err(PriceError::Malformed(_))
        ));
    }

    #[test]
    fn shelf_price_rejects_text_before_amount() {
        assert!(matches!(
            parse_shelf_price("abc5", USD),
            Err(PriceError::Malformed(text)) if text == "abc5"
        ));
        assert!(matches!(
            parse_shelf_price("USD 7", USD),
            Err(PriceError::Malformed(_))
        ));
        assert!(matches!(
            parse_shelf_price("Total: 12", USD),
            Err(PriceError::Malformed(_))
        ));
        assert!(matches!(
            parse_shelf_price("₱5", USD),
            Err(PriceError::Malformed(_))
        ));
    }

    #[test]
    fn shelf_price_rejects_negative() {
        assert!(matches!(
            parse_shelf_price("-5", USD),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn shelf_price_rounds_to_minor_units() -> TestResult {
        assert_eq!(parse_shelf_price("0.125", USD)?, Money::from_minor(12, USD));

        Ok(())
    }

    #[test]
    fn format_drops_trailing_zeros() {
        assert_eq!(format_price(&Money::from_minor(20_000, USD)), "$200");
        assert_eq!(format_price(&Money::from_minor(1250, USD)), "$12.5");
        assert_eq!(format_price(&Money::from_minor(0, PHP)), "₱0");
    }

    #[test]
    fn total_has_label() {
        assert_eq!(format_total(&Money::from_minor(19_000, USD)), "Total: $190");
    }
}
