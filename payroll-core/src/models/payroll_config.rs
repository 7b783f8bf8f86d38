use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FilingStatus;

/// Strategy used to estimate federal income tax withholding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum WithholdingMethod {
    /// Flat percentage of income-tax taxable wages.
    #[default]
    Flat,
    /// Annualized bracket computation modeled on the IRS percentage method.
    PercentageMethod,
}

impl WithholdingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::PercentageMethod => "percentage-method",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Some(Self::Flat),
            "percentage" | "percentage-method" | "percentage_method" => {
                Some(Self::PercentageMethod)
            }
            _ => None,
        }
    }
}

impl TryFrom<String> for WithholdingMethod {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| {
            format!("unknown withholding method '{value}', expected flat or percentage-method")
        })
    }
}

/// Form W-4 style adjustments used by the percentage method.
///
/// Annual amounts are spread over the configured pay periods; the extra
/// withholding is already per period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct W4Adjustments {
    /// Step 2 checkbox (multiple jobs or spouse works).
    pub multiple_jobs: bool,
    /// Step 3 annual credit for dependents.
    pub dependent_credit: Decimal,
    /// Step 4(a) annual other income.
    pub other_income: Decimal,
    /// Step 4(b) annual deductions beyond the standard deduction.
    pub extra_deductions: Decimal,
    /// Step 4(c) extra withholding per pay period.
    pub extra_withholding: Decimal,
}

/// Per-period elective pre-tax deductions.
///
/// The categories differ in which taxable base they reduce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreTaxDeductions {
    /// Traditional 401(k)/403(b) deferrals. Reduce the income-tax base only.
    pub retirement: Decimal,
    /// Section 125 health premiums. Reduce both the FICA and income-tax bases.
    pub health_premiums: Decimal,
    /// HSA contributions through a cafeteria plan. Reduce both bases.
    pub health_savings: Decimal,
}

/// Everything besides the pay inputs that a paycheck estimate depends on.
///
/// `ytd_wages` is read, never updated; callers carry year-to-date totals
/// between paychecks themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfiguration {
    /// Tax year, used to pick the Social Security wage base.
    pub tax_year: i32,
    /// FICA taxable wages already paid this year, before this paycheck.
    pub ytd_wages: Decimal,
    pub withholding_method: WithholdingMethod,
    /// Flat federal rate as a fraction (0.12 for 12%).
    pub federal_rate: Option<Decimal>,
    /// Flat state rate as a fraction.
    pub state_rate: Option<Decimal>,
    pub filing_status: FilingStatus,
    pub pay_periods_per_year: u32,
    pub w4: W4Adjustments,
    pub pre_tax: PreTaxDeductions,
}

impl Default for PayrollConfiguration {
    fn default() -> Self {
        Self {
            tax_year: 2025,
            ytd_wages: Decimal::ZERO,
            withholding_method: WithholdingMethod::Flat,
            federal_rate: None,
            state_rate: None,
            filing_status: FilingStatus::Single,
            pay_periods_per_year: 26,
            w4: W4Adjustments::default(),
            pre_tax: PreTaxDeductions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_configuration_uses_flat_single_biweekly() {
        let config = PayrollConfiguration::default();

        assert_eq!(config.tax_year, 2025);
        assert_eq!(config.withholding_method, WithholdingMethod::Flat);
        assert_eq!(config.filing_status, FilingStatus::Single);
        assert_eq!(config.pay_periods_per_year, 26);
        assert_eq!(config.federal_rate, None);
        assert_eq!(config.state_rate, None);
    }

    #[test]
    fn withholding_method_parse_accepts_aliases() {
        assert_eq!(WithholdingMethod::parse("flat"), Some(WithholdingMethod::Flat));
        assert_eq!(
            WithholdingMethod::parse("Percentage"),
            Some(WithholdingMethod::PercentageMethod)
        );
        assert_eq!(
            WithholdingMethod::parse("percentage-method"),
            Some(WithholdingMethod::PercentageMethod)
        );
        assert_eq!(WithholdingMethod::parse("wage-bracket"), None);
    }
}
