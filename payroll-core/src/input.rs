//! Normalization of text inputs coming from a form or command line.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::PayrollError;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`) and a leading
/// dollar sign. Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    let normalized = normalized.strip_prefix('$').unwrap_or(&normalized);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Converts a rate given as a whole-number percentage into a fraction.
///
/// Values above 1 are taken to be percentages (`12` means 12%); values at or
/// below 1 are already fractions.
pub fn normalize_rate(rate: Decimal) -> Decimal {
    if rate > Decimal::ONE {
        rate / Decimal::ONE_HUNDRED
    } else {
        rate
    }
}

/// Parses a withholding rate such as `"12"`, `"0.12"` or `"12%"`.
///
/// All three forms yield `0.12`. Empty input means no rate is configured.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::input::parse_rate;
///
/// assert_eq!(parse_rate("12%").unwrap(), Some(dec!(0.12)));
/// assert_eq!(parse_rate("0.05").unwrap(), Some(dec!(0.05)));
/// assert_eq!(parse_rate("  ").unwrap(), None);
/// ```
pub fn parse_rate(s: &str) -> Result<Option<Decimal>, ParseDecimalError> {
    let stripped = s.trim().replace('%', "");
    if stripped.trim().is_empty() {
        return Ok(None);
    }
    parse_decimal(&stripped).map(|rate| Some(normalize_rate(rate)))
}

/// Parses a comma-separated list of per-day hour totals, e.g. `"10,10,10,10,4"`.
///
/// Blank entries (such as a trailing comma) are skipped.
///
/// # Errors
///
/// Returns [`PayrollError::InvalidDailyHours`] for an entry that is not a number.
pub fn parse_daily_hours(s: &str) -> Result<Vec<Decimal>, PayrollError> {
    s.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<Decimal>()
                .map_err(|_| PayrollError::InvalidDailyHours(entry.to_string()))
        })
        .collect()
}
