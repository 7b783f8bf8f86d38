//! Pre-tax deductions and the two taxable wage bases they produce.
//!
//! | Deduction | FICA base | Income-tax base |
//! |-----------|-----------|-----------------|
//! | `retirement` | unchanged | reduced |
//! | `health_premiums` | reduced | reduced |
//! | `health_savings` | reduced | reduced |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::common::{non_negative, round_half_up};
use crate::models::PreTaxDeductions;

/// Taxable wages after pre-tax deductions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxableWages {
    /// Base for Social Security and Medicare.
    pub fica_taxable: Decimal,
    /// Base for federal and state income tax withholding.
    pub income_tax_taxable: Decimal,
}

fn clamped_deduction(
    name: &'static str,
    amount: Decimal,
) -> Decimal {
    if amount < Decimal::ZERO {
        warn!(
            deduction = name,
            amount = %amount,
            "Negative pre-tax deduction treated as zero"
        );
    }
    non_negative(amount)
}

/// Derives the FICA and income-tax bases from gross pay.
///
/// Negative deductions count as zero and neither base goes below zero.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::PreTaxDeductions;
/// use payroll_core::calculations::taxable_wages;
///
/// let deductions = PreTaxDeductions {
///     retirement: dec!(100),
///     health_premiums: dec!(50),
///     health_savings: dec!(25),
/// };
///
/// let bases = taxable_wages(dec!(1000), &deductions);
///
/// assert_eq!(bases.fica_taxable, dec!(925));
/// assert_eq!(bases.income_tax_taxable, dec!(825));
/// ```
pub fn taxable_wages(
    gross: Decimal,
    deductions: &PreTaxDeductions,
) -> TaxableWages {
    let retirement = clamped_deduction("retirement", deductions.retirement);
    let health_premiums = clamped_deduction("health_premiums", deductions.health_premiums);
    let health_savings = clamped_deduction("health_savings", deductions.health_savings);

    let reduces_both = health_premiums + health_savings;

    TaxableWages {
        fica_taxable: round_half_up(non_negative(gross - reduces_both)),
        income_tax_taxable: round_half_up(non_negative(gross - (retirement + reduces_both))),
    }
}
