use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by the payroll engine.
///
/// Every variant describes caller input that cannot produce an estimate.
/// Anything the engine can reasonably normalize (unknown tax year, negative
/// pre-tax amounts, whole-number percentages) is handled without an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayrollError {
    /// Hourly pay was requested without an hourly rate.
    #[error("hourly pay requires an hourly rate")]
    MissingHourlyRate,

    /// Hourly pay was requested but every hours field was zero or empty.
    #[error("hourly pay requires at least one positive hours value")]
    NoPositiveHours,

    /// Salary pay was requested without a salary amount.
    #[error("salary pay requires a salary amount per pay period")]
    MissingSalary,

    /// The pay type discriminator was neither `hourly` nor `salary`.
    #[error("pay type must be 'hourly' or 'salary', got '{0}'")]
    UnknownPayType(String),

    /// A daily-hours list contained an entry that is not a number.
    #[error("invalid daily hours entry '{0}'")]
    InvalidDailyHours(String),

    /// A value is too large in magnitude to compute with.
    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: Decimal },
}
