//! Federal and state income tax withholding.
//!
//! Federal withholding uses one of two strategies chosen by
//! [`WithholdingMethod`]; both take the income-tax taxable wages of the
//! paycheck and the configuration and return a per-period amount.
//!
//! # Percentage Method
//!
//! The percentage method approximates graduated withholding:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Annualize: taxable wages × pay periods (doubled for multiple jobs) |
//! | 2    | Add other income, subtract extra deductions (minimum 0) |
//! | 3    | Subtract the standard deduction (minimum 0) |
//! | 4    | Apply the marginal brackets for the filing status |
//! | 5    | Subtract the dependent credit (minimum 0) |
//! | 6    | Divide by pay periods and add extra withholding |
//! | 7    | Round to cents |
//!
//! Doubling annual wages for the multiple-jobs checkbox is a deliberate
//! simplification of the W-4 multiple jobs worksheet.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::{non_negative, round_half_up};
use crate::models::{PayrollConfiguration, TaxBracket, WithholdingMethod};
use crate::tables::{standard_deduction, tax_brackets};

/// Income taxed within one bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketStep {
    pub min_income: Decimal,
    /// `None` for the open-ended top bracket.
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    pub taxed_income: Decimal,
    pub tax: Decimal,
}

/// Every intermediate figure of a percentage-method computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentageMethodWorksheet {
    pub taxable_wages: Decimal,
    /// Pay periods after normalization (at least 1).
    pub pay_periods: u32,
    /// Step 1, before the multiple-jobs adjustment.
    pub annualized_wages: Decimal,
    pub multiple_jobs_applied: bool,
    /// Step 1, after the multiple-jobs adjustment.
    pub adjusted_annual_wages: Decimal,
    pub other_income: Decimal,
    pub extra_deductions: Decimal,
    /// Step 2.
    pub annual_wages_after_adjustments: Decimal,
    pub standard_deduction: Decimal,
    /// Step 3.
    pub annual_taxable_income: Decimal,
    /// Step 4, one entry per bracket that holds part of the income.
    pub bracket_steps: Vec<BracketStep>,
    pub annual_tax: Decimal,
    pub dependent_credit: Decimal,
    /// Step 5.
    pub annual_tax_after_credits: Decimal,
    /// Step 6, before extra withholding.
    pub per_period_tax: Decimal,
    pub extra_withholding: Decimal,
    /// Step 7.
    pub withholding: Decimal,
}

/// Flat-rate withholding: `taxable × rate`, or zero without a positive rate.
pub fn flat_withholding(
    taxable_wages: Decimal,
    rate: Option<Decimal>,
) -> Decimal {
    match rate {
        Some(rate) if rate > Decimal::ZERO => round_half_up(taxable_wages * rate),
        _ => Decimal::ZERO,
    }
}

/// Applies a marginal rate schedule to annual taxable income.
///
/// Each bracket taxes only the income between its lower bound and the next
/// bracket's lower bound. Returns the total tax (unrounded) and the steps
/// for every bracket that received income.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::FilingStatus;
/// use payroll_core::calculations::bracket_tax;
/// use payroll_core::tables::tax_brackets;
///
/// let (tax, steps) = bracket_tax(dec!(37000), tax_brackets(FilingStatus::Single));
///
/// assert_eq!(tax, dec!(4201.50));
/// assert_eq!(steps.len(), 2);
/// ```
pub fn bracket_tax(
    income: Decimal,
    brackets: &[TaxBracket],
) -> (Decimal, Vec<BracketStep>) {
    let mut steps = Vec::new();

    for (index, bracket) in brackets.iter().enumerate() {
        if income <= bracket.min_income {
            break;
        }

        let max_income = brackets.get(index + 1).map(|next| next.min_income);
        let upper = max_income.map_or(income, |max| income.min(max));
        let taxed_income = upper - bracket.min_income;

        steps.push(BracketStep {
            min_income: bracket.min_income,
            max_income,
            tax_rate: bracket.tax_rate,
            taxed_income,
            tax: taxed_income * bracket.tax_rate,
        });
    }

    let tax: Decimal = steps.iter().map(|step| step.tax).sum();
    (tax, steps)
}

fn normalized_pay_periods(pay_periods: u32) -> u32 {
    if pay_periods == 0 {
        warn!("Pay periods per year is zero; treating the paycheck as annual");
        return 1;
    }
    pay_periods
}

fn clamped_adjustment(
    name: &'static str,
    amount: Decimal,
) -> Decimal {
    if amount < Decimal::ZERO {
        warn!(
            adjustment = name,
            amount = %amount,
            "Negative W-4 adjustment treated as zero"
        );
    }
    non_negative(amount)
}

/// Runs the percentage method and returns every intermediate figure.
///
/// Negative W-4 amounts count as zero, so the result is never negative.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::{PayrollConfiguration, WithholdingMethod};
/// use payroll_core::calculations::percentage_method_worksheet;
///
/// let config = PayrollConfiguration {
///     withholding_method: WithholdingMethod::PercentageMethod,
///     pay_periods_per_year: 26,
///     ..Default::default()
/// };
///
/// let worksheet = percentage_method_worksheet(dec!(2000), &config);
///
/// assert_eq!(worksheet.annualized_wages, dec!(52000));
/// assert_eq!(worksheet.annual_taxable_income, dec!(37000));
/// assert_eq!(worksheet.withholding, dec!(161.60));
/// ```
pub fn percentage_method_worksheet(
    taxable_wages: Decimal,
    config: &PayrollConfiguration,
) -> PercentageMethodWorksheet {
    let w4 = &config.w4;
    let other_income = clamped_adjustment("other_income", w4.other_income);
    let extra_deductions = clamped_adjustment("extra_deductions", w4.extra_deductions);
    let dependent_credit = clamped_adjustment("dependent_credit", w4.dependent_credit);
    let extra_withholding = clamped_adjustment("extra_withholding", w4.extra_withholding);

    let pay_periods = normalized_pay_periods(config.pay_periods_per_year);
    let periods = Decimal::from(pay_periods);

    // Step 1
    let annualized_wages = taxable_wages * periods;
    let adjusted_annual_wages = if w4.multiple_jobs {
        annualized_wages * Decimal::TWO
    } else {
        annualized_wages
    };

    // Step 2
    let annual_wages_after_adjustments =
        non_negative(adjusted_annual_wages + other_income - extra_deductions);

    // Step 3
    let standard_deduction = standard_deduction(config.filing_status);
    let annual_taxable_income = non_negative(annual_wages_after_adjustments - standard_deduction);

    // Step 4
    let (annual_tax, bracket_steps) =
        bracket_tax(annual_taxable_income, tax_brackets(config.filing_status));

    // Step 5
    let annual_tax_after_credits = non_negative(annual_tax - dependent_credit);

    // Steps 6 and 7
    let per_period_tax = annual_tax_after_credits / periods;
    let withholding = round_half_up(per_period_tax + extra_withholding);

    debug!(
        annual_taxable_income = %annual_taxable_income,
        annual_tax = %annual_tax,
        withholding = %withholding,
        "Percentage method withholding"
    );

    PercentageMethodWorksheet {
        taxable_wages,
        pay_periods,
        annualized_wages,
        multiple_jobs_applied: w4.multiple_jobs,
        adjusted_annual_wages,
        other_income,
        extra_deductions,
        annual_wages_after_adjustments,
        standard_deduction,
        annual_taxable_income,
        bracket_steps,
        annual_tax,
        dependent_credit,
        annual_tax_after_credits,
        per_period_tax,
        extra_withholding,
        withholding,
    }
}

/// Percentage-method withholding for one paycheck, rounded to cents.
pub fn percentage_method_withholding(
    taxable_wages: Decimal,
    config: &PayrollConfiguration,
) -> Decimal {
    percentage_method_worksheet(taxable_wages, config).withholding
}

impl WithholdingMethod {
    /// Federal withholding for one paycheck using this strategy.
    pub fn withhold(
        &self,
        taxable_wages: Decimal,
        config: &PayrollConfiguration,
    ) -> Decimal {
        match self {
            Self::Flat => flat_withholding(taxable_wages, config.federal_rate),
            Self::PercentageMethod => percentage_method_withholding(taxable_wages, config),
        }
    }
}

/// Federal withholding using the configured strategy.
pub fn federal_withholding(
    taxable_wages: Decimal,
    config: &PayrollConfiguration,
) -> Decimal {
    config.withholding_method.withhold(taxable_wages, config)
}

/// State withholding at the configured flat state rate.
pub fn state_withholding(
    taxable_wages: Decimal,
    config: &PayrollConfiguration,
) -> Decimal {
    flat_withholding(taxable_wages, config.state_rate)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{FilingStatus, W4Adjustments};

    fn percentage_config() -> PayrollConfiguration {
        PayrollConfiguration {
            withholding_method: WithholdingMethod::PercentageMethod,
            filing_status: FilingStatus::Single,
            pay_periods_per_year: 26,
            ..Default::default()
        }
    }

    // =========================================================================
    // flat_withholding tests
    // =========================================================================

    #[test]
    fn flat_withholding_applies_rate() {
        assert_eq!(flat_withholding(dec!(950), Some(dec!(0.12))), dec!(114.00));
    }

    #[test]
    fn flat_withholding_rounds_to_cents() {
        assert_eq!(flat_withholding(dec!(333.33), Some(dec!(0.05))), dec!(16.67));
    }

    #[test]
    fn flat_withholding_without_rate_is_zero() {
        assert_eq!(flat_withholding(dec!(950), None), dec!(0));
        assert_eq!(flat_withholding(dec!(950), Some(dec!(0))), dec!(0));
        assert_eq!(flat_withholding(dec!(950), Some(dec!(-0.1))), dec!(0));
    }

    // =========================================================================
    // bracket_tax tests
    // =========================================================================

    #[test]
    fn bracket_tax_zero_income_has_no_steps() {
        let (tax, steps) = bracket_tax(dec!(0), tax_brackets(FilingStatus::Single));

        assert_eq!(tax, dec!(0));
        assert!(steps.is_empty());
    }

    #[test]
    fn bracket_tax_within_first_bracket() {
        let (tax, steps) = bracket_tax(dec!(9700), tax_brackets(FilingStatus::Single));

        assert_eq!(tax, dec!(970));
        assert_eq!(steps, vec![BracketStep {
            min_income: dec!(0),
            max_income: Some(dec!(11925)),
            tax_rate: dec!(0.10),
            taxed_income: dec!(9700),
            tax: dec!(970),
        }]);
    }

    #[test]
    fn bracket_tax_exactly_at_bracket_boundary() {
        let (tax, steps) = bracket_tax(dec!(11925), tax_brackets(FilingStatus::Single));

        assert_eq!(tax, dec!(1192.50));
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn bracket_tax_spans_two_brackets() {
        let (tax, steps) = bracket_tax(dec!(37000), tax_brackets(FilingStatus::Single));

        assert_eq!(steps[0].taxed_income, dec!(11925));
        assert_eq!(steps[1].taxed_income, dec!(25075));
        assert_eq!(steps[1].tax, dec!(3009));
        assert_eq!(tax, dec!(4201.50));
    }

    #[test]
    fn bracket_tax_top_bracket_is_open_ended() {
        let (tax, steps) = bracket_tax(dec!(700000), tax_brackets(FilingStatus::Single));

        assert_eq!(steps.len(), 7);
        assert_eq!(steps[6].max_income, None);
        assert_eq!(steps[6].taxed_income, dec!(73650));
        assert_eq!(tax, dec!(216020.25));
    }

    // =========================================================================
    // percentage_method_worksheet tests
    // =========================================================================

    #[test]
    fn percentage_method_single_biweekly() {
        let worksheet = percentage_method_worksheet(dec!(2000), &percentage_config());

        assert_eq!(worksheet.annualized_wages, dec!(52000));
        assert_eq!(worksheet.standard_deduction, dec!(15000));
        assert_eq!(worksheet.annual_taxable_income, dec!(37000));
        assert_eq!(worksheet.annual_tax, dec!(4201.50));
        assert_eq!(worksheet.withholding, dec!(161.60));
    }

    #[test]
    fn percentage_method_below_standard_deduction_is_zero() {
        let worksheet = percentage_method_worksheet(dec!(500), &percentage_config());

        assert_eq!(worksheet.annual_taxable_income, dec!(0));
        assert_eq!(worksheet.withholding, dec!(0));
    }

    #[test]
    fn percentage_method_multiple_jobs_doubles_annual_wages() {
        let config = PayrollConfiguration {
            filing_status: FilingStatus::Married,
            w4: W4Adjustments {
                multiple_jobs: true,
                ..Default::default()
            },
            ..percentage_config()
        };

        let worksheet = percentage_method_worksheet(dec!(2000), &config);

        assert!(worksheet.multiple_jobs_applied);
        assert_eq!(worksheet.adjusted_annual_wages, dec!(104000));
        assert_eq!(worksheet.annual_taxable_income, dec!(74000));
        assert_eq!(worksheet.annual_tax, dec!(8403));
        assert_eq!(worksheet.withholding, dec!(323.19));
    }

    #[test]
    fn percentage_method_applies_credit_and_extra_withholding() {
        let config = PayrollConfiguration {
            w4: W4Adjustments {
                dependent_credit: dec!(2000),
                extra_withholding: dec!(25),
                ..Default::default()
            },
            ..percentage_config()
        };

        let worksheet = percentage_method_worksheet(dec!(2000), &config);

        assert_eq!(worksheet.annual_tax_after_credits, dec!(2201.50));
        assert_eq!(worksheet.withholding, dec!(109.67));
    }

    #[test]
    fn percentage_method_credit_larger_than_tax_leaves_extra_withholding() {
        let config = PayrollConfiguration {
            w4: W4Adjustments {
                dependent_credit: dec!(10000),
                extra_withholding: dec!(40),
                ..Default::default()
            },
            ..percentage_config()
        };

        let worksheet = percentage_method_worksheet(dec!(2000), &config);

        assert_eq!(worksheet.annual_tax_after_credits, dec!(0));
        assert_eq!(worksheet.withholding, dec!(40.00));
    }

    #[test]
    fn percentage_method_other_income_and_extra_deductions() {
        let config = PayrollConfiguration {
            w4: W4Adjustments {
                other_income: dec!(5200),
                extra_deductions: dec!(2600),
                ..Default::default()
            },
            ..percentage_config()
        };

        let worksheet = percentage_method_worksheet(dec!(2000), &config);

        assert_eq!(worksheet.annual_wages_after_adjustments, dec!(54600));
        assert_eq!(worksheet.annual_taxable_income, dec!(39600));
        assert_eq!(worksheet.withholding, dec!(173.60));
    }

    #[test]
    fn percentage_method_extra_deductions_floor_at_zero() {
        let config = PayrollConfiguration {
            w4: W4Adjustments {
                extra_deductions: dec!(1000000),
                ..Default::default()
            },
            ..percentage_config()
        };

        let worksheet = percentage_method_worksheet(dec!(2000), &config);

        assert_eq!(worksheet.annual_wages_after_adjustments, dec!(0));
        assert_eq!(worksheet.withholding, dec!(0));
    }

    #[test]
    fn percentage_method_zero_pay_periods_treated_as_one() {
        let config = PayrollConfiguration {
            pay_periods_per_year: 0,
            ..percentage_config()
        };

        let worksheet = percentage_method_worksheet(dec!(52000), &config);

        assert_eq!(worksheet.pay_periods, 1);
        assert_eq!(worksheet.withholding, dec!(4201.50));
    }

    #[test]
    fn percentage_method_negative_extra_withholding_treated_as_zero() {
        let config = PayrollConfiguration {
            w4: W4Adjustments {
                extra_withholding: dec!(-50),
                ..Default::default()
            },
            ..percentage_config()
        };

        let worksheet = percentage_method_worksheet(dec!(500), &config);

        assert_eq!(worksheet.extra_withholding, dec!(0));
        assert_eq!(worksheet.withholding, dec!(0));
    }

    #[test]
    fn percentage_method_negative_w4_amounts_do_not_raise_tax() {
        let config = PayrollConfiguration {
            w4: W4Adjustments {
                dependent_credit: dec!(-2600),
                extra_deductions: dec!(-10000),
                other_income: dec!(-5200),
                ..Default::default()
            },
            ..percentage_config()
        };

        let worksheet = percentage_method_worksheet(dec!(2000), &config);

        assert_eq!(worksheet.dependent_credit, dec!(0));
        assert_eq!(worksheet.extra_deductions, dec!(0));
        assert_eq!(worksheet.other_income, dec!(0));
        assert_eq!(worksheet.annual_tax_after_credits, dec!(4201.50));
        assert_eq!(worksheet.withholding, dec!(161.60));
    }

    // =========================================================================
    // strategy dispatch tests
    // =========================================================================

    #[test]
    fn federal_withholding_dispatches_on_method() {
        let flat = PayrollConfiguration {
            federal_rate: Some(dec!(0.12)),
            ..Default::default()
        };
        let percentage = PayrollConfiguration {
            federal_rate: Some(dec!(0.12)),
            ..percentage_config()
        };

        assert_eq!(federal_withholding(dec!(2000), &flat), dec!(240.00));
        assert_eq!(federal_withholding(dec!(2000), &percentage), dec!(161.60));
    }

    #[test]
    fn state_withholding_uses_state_rate() {
        let config = PayrollConfiguration {
            federal_rate: Some(dec!(0.22)),
            state_rate: Some(dec!(0.05)),
            ..Default::default()
        };

        assert_eq!(state_withholding(dec!(950), &config), dec!(47.50));
    }
}
