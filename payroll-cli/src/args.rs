//! Command-line arguments and their mapping onto the engine inputs.

use std::path::PathBuf;

use clap::Parser;
use payroll_core::input::{parse_daily_hours, parse_decimal, parse_rate};
use payroll_core::{
    FilingStatus, HoursInput, OvertimePolicy, PayInput, PayType, PayrollConfiguration,
    PayrollError, WithholdingMethod,
};
use rust_decimal::Decimal;

/// Accepts `12`, `0.12` or `12%`. An empty value is rejected.
fn parse_rate_arg(s: &str) -> Result<Decimal, String> {
    parse_rate(s)
        .map_err(|err| err.to_string())?
        .ok_or_else(|| "rate must not be empty".to_string())
}

fn parse_filing_status(s: &str) -> Result<FilingStatus, String> {
    FilingStatus::parse(s).ok_or_else(|| {
        format!("unknown filing status '{s}' (expected single, married or head-of-household)")
    })
}

fn parse_method(s: &str) -> Result<WithholdingMethod, String> {
    WithholdingMethod::parse(s)
        .ok_or_else(|| format!("unknown withholding method '{s}' (expected flat or percentage)"))
}

/// Estimate one paycheck: gross pay, FICA, income tax withholding and net pay.
///
/// Settings from `--config` are applied first; any flag given on the command
/// line overrides the matching setting.
#[derive(Debug, Parser)]
#[command(name = "paycheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Pay type for this paycheck (hourly or salary)
    #[arg(long, required_unless_present = "ot_rules")]
    pub pay_type: Option<PayType>,

    /// Hourly rate (for hourly pay)
    #[arg(long, value_parser = parse_decimal)]
    pub hourly_rate: Option<Decimal>,

    /// Regular hours in this pay period (for hourly pay)
    #[arg(long, value_parser = parse_decimal)]
    pub hours: Option<Decimal>,

    /// Overtime hours this period. Typical FLSA weekly overtime is hours over 40
    #[arg(long, value_parser = parse_decimal)]
    pub overtime_hours: Option<Decimal>,

    /// Double-time hours this period
    #[arg(long, value_parser = parse_decimal)]
    pub double_time_hours: Option<Decimal>,

    /// Comma-separated hours worked each day, e.g. "10,10,10,10,4".
    /// Replaces --hours, --overtime-hours and --double-time-hours
    #[arg(long)]
    pub daily_hours: Option<String>,

    /// Classify --daily-hours with daily overtime (over 8) and double time (over 12)
    /// instead of weekly overtime (over 40)
    #[arg(long, default_value_t = false)]
    pub daily_overtime: bool,

    /// Overtime pay multiplier
    #[arg(long, value_parser = parse_decimal, default_value = "1.5")]
    pub overtime_multiplier: Decimal,

    /// Double-time pay multiplier
    #[arg(long, value_parser = parse_decimal, default_value = "2")]
    pub double_time_multiplier: Decimal,

    /// Salary amount per pay period (for salary pay)
    #[arg(long, value_parser = parse_decimal)]
    pub salary: Option<Decimal>,

    /// Tax year (for the Social Security wage base)
    #[arg(long)]
    pub year: Option<i32>,

    /// Year-to-date FICA taxable wages before this paycheck
    #[arg(long, value_parser = parse_decimal)]
    pub ytd_wages: Option<Decimal>,

    /// Federal withholding method (flat or percentage)
    #[arg(long, value_parser = parse_method)]
    pub method: Option<WithholdingMethod>,

    /// Flat federal withholding rate (e.g. 12, 0.12 or 12%)
    #[arg(long, value_parser = parse_rate_arg)]
    pub federal_rate: Option<Decimal>,

    /// Flat state withholding rate (e.g. 5, 0.05 or 5%)
    #[arg(long, value_parser = parse_rate_arg)]
    pub state_rate: Option<Decimal>,

    /// Filing status for the percentage method (single, married, head-of-household)
    #[arg(long, value_parser = parse_filing_status)]
    pub filing_status: Option<FilingStatus>,

    /// Pay periods per year (52 weekly, 26 biweekly, 24 semimonthly, 12 monthly)
    #[arg(long)]
    pub pay_periods: Option<u32>,

    /// W-4 Step 2: multiple jobs or spouse works
    #[arg(long, default_value_t = false)]
    pub multiple_jobs: bool,

    /// W-4 Step 3: annual dependent credit
    #[arg(long, value_parser = parse_decimal)]
    pub dependent_credit: Option<Decimal>,

    /// W-4 Step 4(a): annual other income
    #[arg(long, value_parser = parse_decimal)]
    pub other_income: Option<Decimal>,

    /// W-4 Step 4(b): annual deductions beyond the standard deduction
    #[arg(long, value_parser = parse_decimal)]
    pub extra_deductions: Option<Decimal>,

    /// W-4 Step 4(c): extra withholding per pay period
    #[arg(long, value_parser = parse_decimal)]
    pub extra_withholding: Option<Decimal>,

    /// Pre-tax retirement deferral per period (reduces income-tax wages only)
    #[arg(long, value_parser = parse_decimal)]
    pub retirement: Option<Decimal>,

    /// Pre-tax health premiums per period (reduces FICA and income-tax wages)
    #[arg(long, value_parser = parse_decimal)]
    pub health_premiums: Option<Decimal>,

    /// Pre-tax HSA contribution per period (reduces FICA and income-tax wages)
    #[arg(long, value_parser = parse_decimal)]
    pub hsa: Option<Decimal>,

    /// Print every intermediate figure instead of the summary
    #[arg(long, default_value_t = false)]
    pub explain: bool,

    /// Append the result to this CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// TOML settings file with the payroll configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print overtime rules with worked examples and exit
    #[arg(long, default_value_t = false)]
    pub ot_rules: bool,
}

impl Cli {
    /// Applies command-line overrides on top of `config`.
    pub fn apply_overrides(
        &self,
        mut config: PayrollConfiguration,
    ) -> PayrollConfiguration {
        if let Some(year) = self.year {
            config.tax_year = year;
        }
        if let Some(ytd) = self.ytd_wages {
            config.ytd_wages = ytd;
        }
        if let Some(method) = self.method {
            config.withholding_method = method;
        }
        if self.federal_rate.is_some() {
            config.federal_rate = self.federal_rate;
        }
        if self.state_rate.is_some() {
            config.state_rate = self.state_rate;
        }
        if let Some(status) = self.filing_status {
            config.filing_status = status;
        }
        if let Some(periods) = self.pay_periods {
            config.pay_periods_per_year = periods;
        }

        let w4 = &mut config.w4;
        w4.multiple_jobs |= self.multiple_jobs;
        if let Some(credit) = self.dependent_credit {
            w4.dependent_credit = credit;
        }
        if let Some(income) = self.other_income {
            w4.other_income = income;
        }
        if let Some(deductions) = self.extra_deductions {
            w4.extra_deductions = deductions;
        }
        if let Some(extra) = self.extra_withholding {
            w4.extra_withholding = extra;
        }

        let pre_tax = &mut config.pre_tax;
        if let Some(retirement) = self.retirement {
            pre_tax.retirement = retirement;
        }
        if let Some(premiums) = self.health_premiums {
            pre_tax.health_premiums = premiums;
        }
        if let Some(hsa) = self.hsa {
            pre_tax.health_savings = hsa;
        }

        config
    }

    /// Builds the pay inputs from the command line.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::UnknownPayType`] when no pay type was given and
    /// [`PayrollError::InvalidDailyHours`] for a malformed `--daily-hours` list.
    pub fn pay_input(&self) -> Result<PayInput, PayrollError> {
        let pay_type = self
            .pay_type
            .ok_or_else(|| PayrollError::UnknownPayType(String::new()))?;

        let hours = match &self.daily_hours {
            Some(list) => HoursInput::Daily {
                days: parse_daily_hours(list)?,
                policy: if self.daily_overtime {
                    OvertimePolicy::Daily
                } else {
                    OvertimePolicy::Weekly
                },
            },
            None => HoursInput::Explicit {
                regular: self.hours.unwrap_or_default(),
                overtime: self.overtime_hours.unwrap_or_default(),
                double_time: self.double_time_hours.unwrap_or_default(),
            },
        };

        Ok(PayInput {
            pay_type,
            hourly_rate: self.hourly_rate,
            hours,
            overtime_multiplier: self.overtime_multiplier,
            double_time_multiplier: self.double_time_multiplier,
            salary: self.salary,
        })
    }
}
