//! Paycheck aggregation.
//!
//! Runs every calculation in dependency order:
//!
//! 1. Gross pay
//! 2. Pre-tax deductions → FICA and income-tax bases
//! 3. Social Security and Medicare on the FICA base
//! 4. Federal and state withholding on the income-tax base
//! 5. Totals, net pay and employer taxes
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::{PayInput, PaycheckCalculator, PayrollConfiguration};
//!
//! let calculator = PaycheckCalculator::new(PayrollConfiguration::default());
//! let input = PayInput::hourly(dec!(20), dec!(40), dec!(5));
//!
//! let result = calculator.calculate(&input).unwrap();
//!
//! assert_eq!(result.gross, dec!(950.00));
//! assert_eq!(result.total_deductions, dec!(72.68));
//! assert_eq!(result.net, dec!(877.32));
//! ```

use tracing::info;

use crate::PayrollError;
use crate::calculations::common::round_half_up;
use crate::calculations::explain::{FederalWithholdingDetail, PaycheckExplanation};
use crate::calculations::fica::{
    calculate_medicare, calculate_social_security, employer_medicare, employer_social_security,
};
use crate::calculations::gross_pay::calculate_gross_pay;
use crate::calculations::limits::validate_configuration;
use crate::calculations::pre_tax::taxable_wages;
use crate::calculations::withholding::state_withholding;
use crate::models::{PayInput, PaycheckResult, PayrollConfiguration};

/// Computes paychecks for one payroll configuration.
///
/// The calculator holds no state besides its configuration; the same input
/// always produces the same result.
#[derive(Debug, Clone)]
pub struct PaycheckCalculator {
    config: PayrollConfiguration,
}

impl PaycheckCalculator {
    pub fn new(config: PayrollConfiguration) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PayrollConfiguration {
        &self.config
    }

    /// Calculates the paycheck.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError`] when the pay inputs cannot produce a gross
    /// pay amount, or when an input or configuration value is out of range.
    pub fn calculate(
        &self,
        input: &PayInput,
    ) -> Result<PaycheckResult, PayrollError> {
        self.explain(input).map(|explanation| explanation.result)
    }

    /// Calculates the paycheck and keeps every intermediate figure.
    ///
    /// The returned [`PaycheckExplanation`] renders as a line-by-line trace
    /// through its `Display` implementation.
    ///
    /// # Errors
    ///
    /// Same as [`PaycheckCalculator::calculate`].
    pub fn explain(
        &self,
        input: &PayInput,
    ) -> Result<PaycheckExplanation, PayrollError> {
        let config = &self.config;
        validate_configuration(config)?;

        let gross = calculate_gross_pay(input)?;
        let bases = taxable_wages(gross.gross, &config.pre_tax);

        let social_security =
            calculate_social_security(bases.fica_taxable, config.tax_year, config.ytd_wages);
        let medicare = calculate_medicare(bases.fica_taxable, config.ytd_wages);

        let federal = FederalWithholdingDetail::compute(bases.income_tax_taxable, config);
        let state_income_tax = state_withholding(bases.income_tax_taxable, config);

        let total_deductions = round_half_up(
            social_security.tax + medicare.tax + federal.amount() + state_income_tax,
        );
        let net = round_half_up(gross.gross - total_deductions);

        let employer_social_security =
            employer_social_security(bases.fica_taxable, config.tax_year, config.ytd_wages);
        let employer_medicare = employer_medicare(bases.fica_taxable);
        let employer_total = round_half_up(employer_social_security + employer_medicare);

        let result = PaycheckResult {
            gross: gross.gross,
            fica_taxable: bases.fica_taxable,
            fit_taxable: bases.income_tax_taxable,
            social_security: social_security.tax,
            medicare: medicare.tax,
            federal_income_tax: federal.amount(),
            state_income_tax,
            total_deductions,
            net,
            employer_social_security,
            employer_medicare,
            employer_total,
        };

        info!(
            gross = %result.gross,
            total_deductions = %result.total_deductions,
            net = %result.net,
            "Paycheck calculated"
        );

        Ok(PaycheckExplanation {
            tax_year: config.tax_year,
            ytd_wages: config.ytd_wages,
            gross,
            pre_tax: config.pre_tax.clone(),
            bases,
            social_security,
            medicare,
            federal,
            state_rate: config.state_rate,
            result,
        })
    }
}
