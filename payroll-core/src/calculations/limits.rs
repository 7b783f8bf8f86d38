//! Magnitude limits on caller input.
//!
//! `Decimal` arithmetic panics on overflow. Keeping every input within these
//! limits keeps the largest intermediate (annualized wages for the multiple
//! jobs adjustment) far below `Decimal::MAX`.

use rust_decimal::Decimal;

use crate::PayrollError;
use crate::models::{HoursInput, PayInput, PayrollConfiguration};

/// Largest money amount accepted, in dollars.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest hours value accepted, per entry and for the whole period.
pub const MAX_HOURS: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Largest pay multiplier accepted.
pub const MAX_MULTIPLIER: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Largest flat withholding rate accepted, as a fraction.
pub const MAX_RATE: Decimal = Decimal::ONE;

/// Largest number of pay periods per year accepted (daily payroll).
pub const MAX_PAY_PERIODS: u32 = 366;

/// Returns `value` when its magnitude is at most `limit`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::limits::{MAX_HOURS, ensure_within};
///
/// assert!(ensure_within("hours", dec!(-8), MAX_HOURS).is_ok());
/// assert!(ensure_within("hours", dec!(10000.5), MAX_HOURS).is_err());
/// ```
pub fn ensure_within(
    field: &'static str,
    value: Decimal,
    limit: Decimal,
) -> Result<Decimal, PayrollError> {
    if value.abs() > limit {
        return Err(PayrollError::OutOfRange { field, value });
    }
    Ok(value)
}

fn ensure_optional_within(
    field: &'static str,
    value: Option<Decimal>,
    limit: Decimal,
) -> Result<(), PayrollError> {
    match value {
        Some(value) => ensure_within(field, value, limit).map(|_| ()),
        None => Ok(()),
    }
}

/// Checks the rate, hours, multipliers and salary of a pay input.
///
/// Only magnitudes are checked; missing fields and negative values are
/// handled by the gross pay calculation.
pub fn validate_pay_input(input: &PayInput) -> Result<(), PayrollError> {
    ensure_optional_within("hourly_rate", input.hourly_rate, MAX_AMOUNT)?;
    ensure_optional_within("salary", input.salary, MAX_AMOUNT)?;
    ensure_within("overtime_multiplier", input.overtime_multiplier, MAX_MULTIPLIER)?;
    ensure_within(
        "double_time_multiplier",
        input.double_time_multiplier,
        MAX_MULTIPLIER,
    )?;

    match &input.hours {
        HoursInput::Explicit {
            regular,
            overtime,
            double_time,
        } => {
            ensure_within("regular_hours", *regular, MAX_HOURS)?;
            ensure_within("overtime_hours", *overtime, MAX_HOURS)?;
            ensure_within("double_time_hours", *double_time, MAX_HOURS)?;
            ensure_within(
                "total_hours",
                regular.abs() + overtime.abs() + double_time.abs(),
                MAX_HOURS,
            )?;
        }
        HoursInput::Daily { days, .. } => {
            let mut total = Decimal::ZERO;
            for day in days {
                total += ensure_within("daily_hours", *day, MAX_HOURS)?.abs();
                ensure_within("total_hours", total, MAX_HOURS)?;
            }
        }
    }

    Ok(())
}

/// Checks every amount, rate and the pay period count of a configuration.
pub fn validate_configuration(config: &PayrollConfiguration) -> Result<(), PayrollError> {
    ensure_within("ytd_wages", config.ytd_wages, MAX_AMOUNT)?;
    ensure_optional_within("federal_rate", config.federal_rate, MAX_RATE)?;
    ensure_optional_within("state_rate", config.state_rate, MAX_RATE)?;
    if config.pay_periods_per_year > MAX_PAY_PERIODS {
        return Err(PayrollError::OutOfRange {
            field: "pay_periods_per_year",
            value: Decimal::from(config.pay_periods_per_year),
        });
    }

    let w4 = &config.w4;
    ensure_within("dependent_credit", w4.dependent_credit, MAX_AMOUNT)?;
    ensure_within("other_income", w4.other_income, MAX_AMOUNT)?;
    ensure_within("extra_deductions", w4.extra_deductions, MAX_AMOUNT)?;
    ensure_within("extra_withholding", w4.extra_withholding, MAX_AMOUNT)?;

    let pre_tax = &config.pre_tax;
    ensure_within("retirement", pre_tax.retirement, MAX_AMOUNT)?;
    ensure_within("health_premiums", pre_tax.health_premiums, MAX_AMOUNT)?;
    ensure_within("health_savings", pre_tax.health_savings, MAX_AMOUNT)?;

    Ok(())
}
