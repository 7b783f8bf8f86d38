//! Line-by-line explanation of a paycheck.
//!
//! Formatting only: every figure shown here was produced by the other
//! calculation modules.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::calculations::fica::{MedicareResult, SocialSecurityResult};
use crate::calculations::gross_pay::GrossPayBreakdown;
use crate::calculations::pre_tax::TaxableWages;
use crate::calculations::withholding::{
    PercentageMethodWorksheet, flat_withholding, percentage_method_worksheet,
};
use crate::models::{PayType, PaycheckResult, PayrollConfiguration, PreTaxDeductions, WithholdingMethod};
use crate::tables::{ADDITIONAL_MEDICARE_RATE, MEDICARE_RATE, SOCIAL_SECURITY_RATE};

/// How federal withholding was determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FederalWithholdingDetail {
    Flat {
        rate: Option<Decimal>,
        taxable_wages: Decimal,
        amount: Decimal,
    },
    PercentageMethod(PercentageMethodWorksheet),
}

impl FederalWithholdingDetail {
    /// Runs the configured strategy, keeping its intermediate figures.
    pub fn compute(
        taxable_wages: Decimal,
        config: &PayrollConfiguration,
    ) -> Self {
        match config.withholding_method {
            WithholdingMethod::Flat => Self::Flat {
                rate: config.federal_rate,
                taxable_wages,
                amount: flat_withholding(taxable_wages, config.federal_rate),
            },
            WithholdingMethod::PercentageMethod => {
                Self::PercentageMethod(percentage_method_worksheet(taxable_wages, config))
            }
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Self::Flat { amount, .. } => *amount,
            Self::PercentageMethod(worksheet) => worksheet.withholding,
        }
    }
}

/// A paycheck result with every figure used to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaycheckExplanation {
    pub tax_year: i32,
    pub ytd_wages: Decimal,
    pub gross: GrossPayBreakdown,
    pub pre_tax: PreTaxDeductions,
    pub bases: TaxableWages,
    pub social_security: SocialSecurityResult,
    pub medicare: MedicareResult,
    pub federal: FederalWithholdingDetail,
    pub state_rate: Option<Decimal>,
    pub result: PaycheckResult,
}

fn money(amount: Decimal) -> String {
    format!("${:.2}", round_half_up(amount))
}

fn percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

fn hours(value: Decimal) -> String {
    value.normalize().to_string()
}

impl PaycheckExplanation {
    fn write_gross(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let gross = &self.gross;
        writeln!(f, "Gross pay ({})", gross.pay_type.as_str())?;

        if let (PayType::Hourly, Some(rate), Some(split)) =
            (gross.pay_type, gross.hourly_rate, gross.hours)
        {
            writeln!(
                f,
                "  Regular:     {} h x {} = {}",
                hours(split.regular),
                money(rate),
                money(gross.regular_pay)
            )?;
            if split.overtime > Decimal::ZERO {
                writeln!(
                    f,
                    "  Overtime:    {} h x {} x {} = {}",
                    hours(split.overtime),
                    money(rate),
                    gross.overtime_multiplier.normalize(),
                    money(gross.overtime_pay)
                )?;
            }
            if split.double_time > Decimal::ZERO {
                writeln!(
                    f,
                    "  Double-time: {} h x {} x {} = {}",
                    hours(split.double_time),
                    money(rate),
                    gross.double_time_multiplier.normalize(),
                    money(gross.double_time_pay)
                )?;
            }
        }
        writeln!(f, "  Gross: {}", money(gross.gross))
    }

    fn write_bases(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Pre-tax deductions")?;
        writeln!(f, "  Retirement (income tax only): {}", money(self.pre_tax.retirement))?;
        writeln!(f, "  Health premiums: {}", money(self.pre_tax.health_premiums))?;
        writeln!(f, "  HSA: {}", money(self.pre_tax.health_savings))?;
        writeln!(f, "  FICA taxable wages: {}", money(self.bases.fica_taxable))?;
        writeln!(
            f,
            "  Income tax taxable wages: {}",
            money(self.bases.income_tax_taxable)
        )
    }

    fn write_fica(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let ss = &self.social_security;
        writeln!(f, "Social Security")?;
        if ss.wage_base_year == self.tax_year {
            writeln!(f, "  Wage base ({}): {}", ss.wage_base_year, money(ss.wage_base))?;
        } else {
            writeln!(
                f,
                "  Wage base ({}, no table for {}): {}",
                ss.wage_base_year,
                self.tax_year,
                money(ss.wage_base)
            )?;
        }
        writeln!(f, "  YTD wages before this check: {}", money(self.ytd_wages))?;
        writeln!(f, "  Remaining room: {}", money(ss.remaining_room))?;
        writeln!(
            f,
            "  Taxable this check: {} x {} = {}",
            money(ss.taxable_wages),
            percent(SOCIAL_SECURITY_RATE),
            money(ss.tax)
        )?;

        let medicare = &self.medicare;
        writeln!(f, "Medicare")?;
        writeln!(
            f,
            "  Base: {} x {} = {}",
            money(self.bases.fica_taxable),
            percent(MEDICARE_RATE),
            money(medicare.base_tax)
        )?;
        writeln!(
            f,
            "  Wages before additional tax threshold: {}",
            money(medicare.threshold_remaining)
        )?;
        writeln!(
            f,
            "  Additional: {} x {} = {}",
            money(medicare.additional_taxable),
            percent(ADDITIONAL_MEDICARE_RATE),
            money(medicare.additional_tax)
        )?;
        writeln!(f, "  Medicare total: {}", money(medicare.tax))
    }

    fn write_federal(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match &self.federal {
            FederalWithholdingDetail::Flat {
                rate,
                taxable_wages,
                amount,
            } => match rate {
                Some(rate) if *rate > Decimal::ZERO => {
                    writeln!(f, "Federal income tax (flat)")?;
                    writeln!(
                        f,
                        "  {} x {} = {}",
                        money(*taxable_wages),
                        percent(*rate),
                        money(*amount)
                    )
                }
                _ => writeln!(f, "Federal income tax: not configured"),
            },
            FederalWithholdingDetail::PercentageMethod(ws) => {
                writeln!(f, "Federal income tax (percentage method)")?;
                writeln!(
                    f,
                    "  Annualized: {} x {} periods = {}",
                    money(ws.taxable_wages),
                    ws.pay_periods,
                    money(ws.annualized_wages)
                )?;
                if ws.multiple_jobs_applied {
                    writeln!(
                        f,
                        "  Multiple jobs (doubled): {}",
                        money(ws.adjusted_annual_wages)
                    )?;
                }
                writeln!(
                    f,
                    "  + other income {} - extra deductions {} = {}",
                    money(ws.other_income),
                    money(ws.extra_deductions),
                    money(ws.annual_wages_after_adjustments)
                )?;
                writeln!(
                    f,
                    "  - standard deduction {} = taxable income {}",
                    money(ws.standard_deduction),
                    money(ws.annual_taxable_income)
                )?;
                for step in &ws.bracket_steps {
                    let upper = step
                        .max_income
                        .map_or_else(|| "and up".to_string(), money);
                    writeln!(
                        f,
                        "    {} to {} at {}: {} -> {}",
                        money(step.min_income),
                        upper,
                        percent(step.tax_rate),
                        money(step.taxed_income),
                        money(step.tax)
                    )?;
                }
                writeln!(f, "  Annual tax: {}", money(ws.annual_tax))?;
                writeln!(
                    f,
                    "  - dependent credit {} = {}",
                    money(ws.dependent_credit),
                    money(ws.annual_tax_after_credits)
                )?;
                writeln!(
                    f,
                    "  / {} periods = {} + extra withholding {} = {}",
                    ws.pay_periods,
                    money(ws.per_period_tax),
                    money(ws.extra_withholding),
                    money(ws.withholding)
                )
            }
        }
    }

    fn write_state(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self.state_rate {
            Some(rate) if rate > Decimal::ZERO => {
                writeln!(f, "State income tax (flat)")?;
                writeln!(
                    f,
                    "  {} x {} = {}",
                    money(self.bases.income_tax_taxable),
                    percent(rate),
                    money(self.result.state_income_tax)
                )
            }
            _ => writeln!(f, "State income tax: not configured"),
        }
    }

    fn write_totals(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = &self.result;
        writeln!(f, "Totals")?;
        writeln!(
            f,
            "  Total deductions: {} + {} + {} + {} = {}",
            money(r.social_security),
            money(r.medicare),
            money(r.federal_income_tax),
            money(r.state_income_tax),
            money(r.total_deductions)
        )?;
        writeln!(
            f,
            "  Net pay: {} - {} = {}",
            money(r.gross),
            money(r.total_deductions),
            money(r.net)
        )?;
        writeln!(f, "Employer taxes")?;
        writeln!(f, "  Social Security: {}", money(r.employer_social_security))?;
        writeln!(f, "  Medicare: {}", money(r.employer_medicare))?;
        write!(f, "  Employer total: {}", money(r.employer_total))
    }
}

impl fmt::Display for PaycheckExplanation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        self.write_gross(f)?;
        self.write_bases(f)?;
        self.write_fica(f)?;
        self.write_federal(f)?;
        self.write_state(f)?;
        self.write_totals(f)
    }
}
