//! Social Security and Medicare (FICA) taxes for one paycheck.
//!
//! Both taxes look at year-to-date wages paid before this paycheck:
//!
//! - Social Security stops once year-to-date wages reach the annual wage
//!   base for the tax year. The employer pays the same amount.
//! - Medicare has no cap. The employee additionally pays 0.9% on the part
//!   of this paycheck that takes year-to-date wages past $200,000. The
//!   employer never pays the additional tax.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{clamp, max, non_negative, round_half_up};
use crate::tables::{
    ADDITIONAL_MEDICARE_RATE, ADDITIONAL_MEDICARE_THRESHOLD, MEDICARE_RATE,
    SOCIAL_SECURITY_RATE, WageBase, social_security_wage_base,
};

/// Social Security for one paycheck, with the wage base math behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSecurityResult {
    /// Table year actually used for the wage base.
    pub wage_base_year: i32,
    pub wage_base: Decimal,
    /// Wages that can still be taxed this year before this paycheck.
    pub remaining_room: Decimal,
    /// Portion of this paycheck subject to the tax.
    pub taxable_wages: Decimal,
    pub tax: Decimal,
}

/// Employee Medicare for one paycheck, split into its two parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicareResult {
    /// 1.45% of all wages, unrounded.
    pub base_tax: Decimal,
    /// Wages this paycheck can pay before the additional tax starts.
    pub threshold_remaining: Decimal,
    pub additional_taxable: Decimal,
    /// 0.9% of `additional_taxable`, unrounded.
    pub additional_tax: Decimal,
    /// `base_tax + additional_tax`, rounded to cents.
    pub tax: Decimal,
}

/// Calculates Social Security with the year-to-date wage base cap.
///
/// Unknown tax years use the most recent wage base on file.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::calculate_social_security;
///
/// // $1,000 of room left under the 2025 base of $174,000
/// let result = calculate_social_security(dec!(2000), 2025, dec!(173000));
///
/// assert_eq!(result.remaining_room, dec!(1000));
/// assert_eq!(result.taxable_wages, dec!(1000));
/// assert_eq!(result.tax, dec!(62.00));
/// ```
pub fn calculate_social_security(
    wages: Decimal,
    tax_year: i32,
    ytd_wages: Decimal,
) -> SocialSecurityResult {
    let WageBase {
        tax_year: wage_base_year,
        amount: wage_base,
    } = social_security_wage_base(tax_year);

    let already_counted = ytd_wages.min(wage_base);
    let remaining_room = non_negative(wage_base - already_counted);
    let taxable_wages = clamp(wages, Decimal::ZERO, remaining_room);
    let tax = round_half_up(taxable_wages * SOCIAL_SECURITY_RATE);

    debug!(
        wage_base = %wage_base,
        remaining_room = %remaining_room,
        taxable_wages = %taxable_wages,
        tax = %tax,
        "Social Security"
    );

    SocialSecurityResult {
        wage_base_year,
        wage_base,
        remaining_room,
        taxable_wages,
        tax,
    }
}

/// Employee Social Security tax, rounded to cents.
pub fn social_security(
    wages: Decimal,
    tax_year: i32,
    ytd_wages: Decimal,
) -> Decimal {
    calculate_social_security(wages, tax_year, ytd_wages).tax
}

/// Employer Social Security tax. The employer rate equals the employee rate.
pub fn employer_social_security(
    wages: Decimal,
    tax_year: i32,
    ytd_wages: Decimal,
) -> Decimal {
    social_security(wages, tax_year, ytd_wages)
}

/// Calculates employee Medicare, including Additional Medicare Tax.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::calculate_medicare;
///
/// // This paycheck crosses the $200,000 threshold halfway through.
/// let result = calculate_medicare(dec!(1000), dec!(199500));
///
/// assert_eq!(result.additional_taxable, dec!(500));
/// assert_eq!(result.tax, dec!(19.00));
/// ```
pub fn calculate_medicare(
    wages: Decimal,
    ytd_wages: Decimal,
) -> MedicareResult {
    let base_tax = wages * MEDICARE_RATE;

    let threshold_remaining = max(ADDITIONAL_MEDICARE_THRESHOLD - ytd_wages, Decimal::ZERO);
    let additional_taxable = non_negative(wages - threshold_remaining);
    let additional_tax = additional_taxable * ADDITIONAL_MEDICARE_RATE;
    let tax = round_half_up(base_tax + additional_tax);

    debug!(
        base_tax = %base_tax,
        additional_taxable = %additional_taxable,
        additional_tax = %additional_tax,
        tax = %tax,
        "Medicare"
    );

    MedicareResult {
        base_tax,
        threshold_remaining,
        additional_taxable,
        additional_tax,
        tax,
    }
}

/// Employee Medicare tax, rounded to cents.
pub fn medicare(
    wages: Decimal,
    ytd_wages: Decimal,
) -> Decimal {
    calculate_medicare(wages, ytd_wages).tax
}

/// Employer Medicare tax: the base rate only, with no additional tax.
pub fn employer_medicare(wages: Decimal) -> Decimal {
    round_half_up(wages * MEDICARE_RATE)
}
