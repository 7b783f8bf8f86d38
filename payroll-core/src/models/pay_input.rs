use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::PayrollError;

/// Standard overtime multiplier (time and a half).
pub const DEFAULT_OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Standard double-time multiplier.
pub const DEFAULT_DOUBLE_TIME_MULTIPLIER: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayType {
    Hourly,
    Salary,
}

impl PayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Salary => "salary",
        }
    }
}

impl FromStr for PayType {
    type Err = PayrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hourly" => Ok(Self::Hourly),
            "salary" => Ok(Self::Salary),
            _ => Err(PayrollError::UnknownPayType(s.to_string())),
        }
    }
}

/// How per-day hour totals are split into regular and premium hours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OvertimePolicy {
    /// Hours over 40 in the week are overtime. No double-time.
    #[default]
    Weekly,
    /// Per day: over 8 hours is overtime, over 12 hours is double-time.
    Daily,
}

/// Hours worked in the pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoursInput {
    /// Hours already classified by the caller.
    Explicit {
        regular: Decimal,
        overtime: Decimal,
        double_time: Decimal,
    },
    /// Raw per-day totals, classified according to `policy`.
    Daily {
        days: Vec<Decimal>,
        policy: OvertimePolicy,
    },
}

impl Default for HoursInput {
    fn default() -> Self {
        Self::Explicit {
            regular: Decimal::ZERO,
            overtime: Decimal::ZERO,
            double_time: Decimal::ZERO,
        }
    }
}

/// Pay inputs for one paycheck.
///
/// Which fields matter depends on `pay_type`: hourly pay reads the rate,
/// hours and multipliers, salary pay reads only `salary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayInput {
    pub pay_type: PayType,
    pub hourly_rate: Option<Decimal>,
    pub hours: HoursInput,
    pub overtime_multiplier: Decimal,
    pub double_time_multiplier: Decimal,
    /// Salary amount per pay period.
    pub salary: Option<Decimal>,
}

impl PayInput {
    /// Hourly pay with explicit regular and overtime hours.
    pub fn hourly(
        hourly_rate: Decimal,
        regular: Decimal,
        overtime: Decimal,
    ) -> Self {
        Self {
            pay_type: PayType::Hourly,
            hourly_rate: Some(hourly_rate),
            hours: HoursInput::Explicit {
                regular,
                overtime,
                double_time: Decimal::ZERO,
            },
            overtime_multiplier: DEFAULT_OVERTIME_MULTIPLIER,
            double_time_multiplier: DEFAULT_DOUBLE_TIME_MULTIPLIER,
            salary: None,
        }
    }

    /// Hourly pay from per-day totals.
    pub fn daily(
        hourly_rate: Decimal,
        days: Vec<Decimal>,
        policy: OvertimePolicy,
    ) -> Self {
        Self {
            hours: HoursInput::Daily { days, policy },
            ..Self::hourly(hourly_rate, Decimal::ZERO, Decimal::ZERO)
        }
    }

    /// Flat salary for the period.
    pub fn salary(amount: Decimal) -> Self {
        Self {
            pay_type: PayType::Salary,
            hourly_rate: None,
            hours: HoursInput::default(),
            overtime_multiplier: DEFAULT_OVERTIME_MULTIPLIER,
            double_time_multiplier: DEFAULT_DOUBLE_TIME_MULTIPLIER,
            salary: Some(amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn pay_type_parses_case_insensitively() {
        assert_eq!("hourly".parse::<PayType>(), Ok(PayType::Hourly));
        assert_eq!(" Salary ".parse::<PayType>(), Ok(PayType::Salary));
    }

    #[test]
    fn pay_type_rejects_unknown_discriminator() {
        assert_eq!(
            "commission".parse::<PayType>(),
            Err(PayrollError::UnknownPayType("commission".to_string()))
        );
    }

    #[test]
    fn default_multipliers_are_time_and_a_half_and_double() {
        assert_eq!(DEFAULT_OVERTIME_MULTIPLIER, dec!(1.5));
        assert_eq!(DEFAULT_DOUBLE_TIME_MULTIPLIER, dec!(2));
    }

    #[test]
    fn daily_constructor_keeps_hourly_defaults() {
        let input = PayInput::daily(dec!(20), vec![dec!(8)], OvertimePolicy::Daily);

        assert_eq!(input.pay_type, PayType::Hourly);
        assert_eq!(input.hourly_rate, Some(dec!(20)));
        assert_eq!(input.overtime_multiplier, dec!(1.5));
        assert_eq!(
            input.hours,
            HoursInput::Daily {
                days: vec![dec!(8)],
                policy: OvertimePolicy::Daily
            }
        );
    }
}
