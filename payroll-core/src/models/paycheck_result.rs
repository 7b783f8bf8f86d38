use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of one paycheck estimate.
///
/// Every amount is rounded to cents on its own; the totals are sums of the
/// rounded components, rounded again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaycheckResult {
    pub gross: Decimal,
    /// Wages subject to Social Security and Medicare.
    pub fica_taxable: Decimal,
    /// Wages subject to federal and state income tax withholding.
    pub fit_taxable: Decimal,
    pub social_security: Decimal,
    /// Employee Medicare, including any Additional Medicare Tax.
    pub medicare: Decimal,
    pub federal_income_tax: Decimal,
    pub state_income_tax: Decimal,
    pub total_deductions: Decimal,
    pub net: Decimal,
    pub employer_social_security: Decimal,
    pub employer_medicare: Decimal,
    pub employer_total: Decimal,
}
