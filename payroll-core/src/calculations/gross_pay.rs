//! Gross pay for hourly and salaried paychecks.
//!
//! Hourly pay can be given as hours the caller already classified, or as
//! raw per-day totals that are split according to an [`OvertimePolicy`]:
//!
//! | Policy | Regular | Overtime | Double-time |
//! |--------|---------|----------|-------------|
//! | Weekly | first 40 hours of the period | hours over 40 | none |
//! | Daily  | first 8 hours of each day | hours 8 to 12 of each day | hours over 12 of each day |
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::PayInput;
//! use payroll_core::calculations::gross_pay;
//!
//! // $20/hr, 40 regular hours and 5 overtime hours at 1.5x
//! let input = PayInput::hourly(dec!(20), dec!(40), dec!(5));
//!
//! assert_eq!(gross_pay(&input).unwrap(), dec!(950.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::PayrollError;
use crate::calculations::common::{clamp, non_negative, round_half_up};
use crate::calculations::limits::validate_pay_input;
use crate::models::{HoursInput, OvertimePolicy, PayInput, PayType};

/// Hours per workweek before weekly overtime starts.
pub const WEEKLY_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// Hours per day before daily overtime starts.
pub const DAILY_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Hours per day before daily double-time starts.
pub const DAILY_DOUBLE_TIME_THRESHOLD: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Hours split into the three pay tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursBreakdown {
    pub regular: Decimal,
    pub overtime: Decimal,
    pub double_time: Decimal,
}

impl HoursBreakdown {
    pub fn total(&self) -> Decimal {
        self.regular + self.overtime + self.double_time
    }

    fn has_positive_hours(&self) -> bool {
        self.regular > Decimal::ZERO
            || self.overtime > Decimal::ZERO
            || self.double_time > Decimal::ZERO
    }
}

/// Gross pay together with the figures it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossPayBreakdown {
    pub pay_type: PayType,
    /// Present for hourly pay only.
    pub hourly_rate: Option<Decimal>,
    /// Present for hourly pay only.
    pub hours: Option<HoursBreakdown>,
    /// Multipliers after normalization.
    pub overtime_multiplier: Decimal,
    pub double_time_multiplier: Decimal,
    pub regular_pay: Decimal,
    pub overtime_pay: Decimal,
    pub double_time_pay: Decimal,
    /// Gross pay rounded to cents.
    pub gross: Decimal,
}

/// Splits per-day totals using the weekly rule: everything past 40 hours is overtime.
pub fn classify_weekly(days: &[Decimal]) -> HoursBreakdown {
    let total: Decimal = days.iter().copied().map(non_negative).sum();

    HoursBreakdown {
        regular: total.min(WEEKLY_OVERTIME_THRESHOLD),
        overtime: non_negative(total - WEEKLY_OVERTIME_THRESHOLD),
        double_time: Decimal::ZERO,
    }
}

/// Splits per-day totals using the daily rule, one day at a time.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::classify_daily;
///
/// let hours = classify_daily(&[dec!(10), dec!(10), dec!(10), dec!(10), dec!(4)]);
///
/// assert_eq!(hours.regular, dec!(36));
/// assert_eq!(hours.overtime, dec!(8));
/// assert_eq!(hours.double_time, dec!(0));
/// ```
pub fn classify_daily(days: &[Decimal]) -> HoursBreakdown {
    days.iter()
        .copied()
        .map(non_negative)
        .fold(HoursBreakdown::default(), |acc, day| HoursBreakdown {
            regular: acc.regular + day.min(DAILY_OVERTIME_THRESHOLD),
            overtime: acc.overtime
                + clamp(
                    day - DAILY_OVERTIME_THRESHOLD,
                    Decimal::ZERO,
                    DAILY_DOUBLE_TIME_THRESHOLD - DAILY_OVERTIME_THRESHOLD,
                ),
            double_time: acc.double_time + non_negative(day - DAILY_DOUBLE_TIME_THRESHOLD),
        })
}

/// Resolves an [`HoursInput`] into regular, overtime and double-time hours.
///
/// Negative explicit hours are treated as zero.
pub fn classify_hours(hours: &HoursInput) -> HoursBreakdown {
    match hours {
        HoursInput::Explicit {
            regular,
            overtime,
            double_time,
        } => {
            if *regular < Decimal::ZERO
                || *overtime < Decimal::ZERO
                || *double_time < Decimal::ZERO
            {
                warn!(
                    regular = %regular,
                    overtime = %overtime,
                    double_time = %double_time,
                    "Negative hours treated as zero"
                );
            }
            HoursBreakdown {
                regular: non_negative(*regular),
                overtime: non_negative(*overtime),
                double_time: non_negative(*double_time),
            }
        }
        HoursInput::Daily { days, policy } => match policy {
            OvertimePolicy::Weekly => classify_weekly(days),
            OvertimePolicy::Daily => classify_daily(days),
        },
    }
}

/// Falls back to straight time when a multiplier is zero or negative.
fn effective_multiplier(
    name: &'static str,
    multiplier: Decimal,
) -> Decimal {
    if multiplier <= Decimal::ZERO {
        warn!(
            multiplier = %multiplier,
            kind = name,
            "Non-positive pay multiplier; using straight time"
        );
        return Decimal::ONE;
    }
    multiplier
}

/// Calculates gross pay and keeps every intermediate figure.
///
/// # Errors
///
/// * [`PayrollError::MissingHourlyRate`] for hourly pay without a rate.
/// * [`PayrollError::NoPositiveHours`] for hourly pay with no positive hours.
/// * [`PayrollError::MissingSalary`] for salary pay without an amount.
/// * [`PayrollError::OutOfRange`] for a rate, hours, multiplier or salary
///   beyond the [limits](crate::calculations::limits).
pub fn calculate_gross_pay(input: &PayInput) -> Result<GrossPayBreakdown, PayrollError> {
    validate_pay_input(input)?;

    match input.pay_type {
        PayType::Hourly => hourly_gross_pay(input),
        PayType::Salary => {
            let salary = input.salary.ok_or(PayrollError::MissingSalary)?;
            let gross = round_half_up(salary);
            debug!(gross = %gross, "Salary gross pay");

            Ok(GrossPayBreakdown {
                pay_type: PayType::Salary,
                hourly_rate: None,
                hours: None,
                overtime_multiplier: input.overtime_multiplier,
                double_time_multiplier: input.double_time_multiplier,
                regular_pay: gross,
                overtime_pay: Decimal::ZERO,
                double_time_pay: Decimal::ZERO,
                gross,
            })
        }
    }
}

fn hourly_gross_pay(input: &PayInput) -> Result<GrossPayBreakdown, PayrollError> {
    let rate = input.hourly_rate.ok_or(PayrollError::MissingHourlyRate)?;

    let hours = classify_hours(&input.hours);
    if !hours.has_positive_hours() {
        return Err(PayrollError::NoPositiveHours);
    }

    let overtime_multiplier = effective_multiplier("overtime", input.overtime_multiplier);
    let double_time_multiplier =
        effective_multiplier("double_time", input.double_time_multiplier);

    let regular_pay = rate * hours.regular;
    let overtime_pay = rate * hours.overtime * overtime_multiplier;
    let double_time_pay = rate * hours.double_time * double_time_multiplier;
    let gross = round_half_up(regular_pay + overtime_pay + double_time_pay);

    debug!(
        rate = %rate,
        regular = %hours.regular,
        overtime = %hours.overtime,
        double_time = %hours.double_time,
        gross = %gross,
        "Hourly gross pay"
    );

    Ok(GrossPayBreakdown {
        pay_type: PayType::Hourly,
        hourly_rate: Some(rate),
        hours: Some(hours),
        overtime_multiplier,
        double_time_multiplier,
        regular_pay,
        overtime_pay,
        double_time_pay,
        gross,
    })
}

/// Gross pay for the period, rounded to cents.
///
/// See [`calculate_gross_pay`] for the error conditions.
pub fn gross_pay(input: &PayInput) -> Result<Decimal, PayrollError> {
    calculate_gross_pay(input).map(|breakdown| breakdown.gross)
}
