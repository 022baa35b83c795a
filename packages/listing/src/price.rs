//! Price normalization and currency formatting.

use crate::error::{ListingError, Result};
use crate::record::Price;

/// Derive the canonical numeric price from its source representation.
///
/// Numeric input is returned unchanged. Textual input is stripped of every
/// character that is not a decimal digit or decimal point and parsed as a
/// number; when nothing parseable remains ("free", "Call for price") this
/// fails with [`ListingError::InvalidPrice`] rather than coercing to zero.
pub fn normalize_price(price: &Price) -> Result<f64> {
    match price {
        Price::Number(number) => Ok(*number),
        Price::Text(text) => {
            let digits: String = text
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();

            digits
                .parse::<f64>()
                .map_err(|_| ListingError::InvalidPrice { raw: text.clone() })
        }
    }
}

/// Format a numeric value as a US-locale currency string: dollar sign,
/// thousands separators, exactly two decimal places.
pub fn format_usd(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{fraction:02}")
}
