//! Static rate tables used by the payroll calculations.
//!
//! The values are illustrative figures for the years listed and are not
//! meant to track every revision of the published tables. Lookups never
//! fail: an unknown tax year resolves to the most recent year on file.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::models::{FilingStatus, TaxBracket};

const fn dollars(amount: u32) -> Decimal {
    Decimal::from_parts(amount, 0, 0, false, 0)
}

const fn percent(hundredths: u32) -> Decimal {
    Decimal::from_parts(hundredths, 0, 0, false, 2)
}

const fn bracket(
    min_income: u32,
    rate_hundredths: u32,
) -> TaxBracket {
    TaxBracket {
        min_income: dollars(min_income),
        tax_rate: percent(rate_hundredths),
    }
}

/// Employee (and matching employer) Social Security rate, 6.2%.
pub const SOCIAL_SECURITY_RATE: Decimal = Decimal::from_parts(62, 0, 0, false, 3);

/// Employee (and matching employer) Medicare rate, 1.45%.
pub const MEDICARE_RATE: Decimal = Decimal::from_parts(145, 0, 0, false, 4);

/// Additional Medicare Tax rate, 0.9%, withheld from the employee only.
pub const ADDITIONAL_MEDICARE_RATE: Decimal = Decimal::from_parts(9, 0, 0, false, 3);

/// Year-to-date wages above which Additional Medicare Tax is withheld.
pub const ADDITIONAL_MEDICARE_THRESHOLD: Decimal = dollars(200_000);

/// Annual Social Security wage base by tax year, ascending.
static SOCIAL_SECURITY_WAGE_BASES: [(i32, Decimal); 3] = [
    (2023, dollars(160_200)),
    (2024, dollars(168_600)),
    (2025, dollars(174_000)),
];

static SINGLE_BRACKETS: [TaxBracket; 7] = [
    bracket(0, 10),
    bracket(11_925, 12),
    bracket(48_475, 22),
    bracket(103_350, 24),
    bracket(197_300, 32),
    bracket(250_525, 35),
    bracket(626_350, 37),
];

static MARRIED_BRACKETS: [TaxBracket; 7] = [
    bracket(0, 10),
    bracket(23_850, 12),
    bracket(96_950, 22),
    bracket(206_700, 24),
    bracket(394_600, 32),
    bracket(501_050, 35),
    bracket(751_600, 37),
];

static HEAD_OF_HOUSEHOLD_BRACKETS: [TaxBracket; 7] = [
    bracket(0, 10),
    bracket(17_000, 12),
    bracket(64_850, 22),
    bracket(103_350, 24),
    bracket(197_300, 32),
    bracket(250_500, 35),
    bracket(626_350, 37),
];

/// The wage base applied to a paycheck, with the table year it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WageBase {
    /// Year whose row was used. Differs from the requested year on fallback.
    pub tax_year: i32,
    pub amount: Decimal,
}

/// Looks up the Social Security wage base for `tax_year`.
///
/// Years missing from the table use the most recent year on file.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::tables::social_security_wage_base;
///
/// assert_eq!(social_security_wage_base(2024).amount, dec!(168600));
/// assert_eq!(social_security_wage_base(2031).tax_year, 2025);
/// ```
pub fn social_security_wage_base(tax_year: i32) -> WageBase {
    if let Some(&(year, amount)) = SOCIAL_SECURITY_WAGE_BASES
        .iter()
        .find(|(year, _)| *year == tax_year)
    {
        return WageBase {
            tax_year: year,
            amount,
        };
    }

    let (latest_year, amount) = SOCIAL_SECURITY_WAGE_BASES[SOCIAL_SECURITY_WAGE_BASES.len() - 1];
    warn!(
        requested = tax_year,
        used = latest_year,
        "No Social Security wage base for tax year; using most recent year"
    );
    WageBase {
        tax_year: latest_year,
        amount,
    }
}

/// Annual marginal rate schedule for a filing status, ascending by bracket.
pub fn tax_brackets(filing_status: FilingStatus) -> &'static [TaxBracket] {
    match filing_status {
        FilingStatus::Single => &SINGLE_BRACKETS,
        FilingStatus::Married => &MARRIED_BRACKETS,
        FilingStatus::HeadOfHousehold => &HEAD_OF_HOUSEHOLD_BRACKETS,
    }
}

/// Annual standard deduction for a filing status.
pub fn standard_deduction(filing_status: FilingStatus) -> Decimal {
    match filing_status {
        FilingStatus::Single => dollars(15_000),
        FilingStatus::Married => dollars(30_000),
        FilingStatus::HeadOfHousehold => dollars(22_500),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;

    /// Initializes tracing subscriber for tests that exercise warn paths.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_span_events(FmtSpan::NONE)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    const ALL_STATUSES: [FilingStatus; 3] = [
        FilingStatus::Single,
        FilingStatus::Married,
        FilingStatus::HeadOfHousehold,
    ];

    // =========================================================================
    // rate constant tests
    // =========================================================================

    #[test]
    fn rate_constants_match_statutory_percentages() {
        assert_eq!(SOCIAL_SECURITY_RATE, dec!(0.062));
        assert_eq!(MEDICARE_RATE, dec!(0.0145));
        assert_eq!(ADDITIONAL_MEDICARE_RATE, dec!(0.009));
        assert_eq!(ADDITIONAL_MEDICARE_THRESHOLD, dec!(200000));
    }

    // =========================================================================
    // social_security_wage_base tests
    // =========================================================================

    #[test]
    fn wage_base_returns_known_years() {
        assert_eq!(social_security_wage_base(2023).amount, dec!(160200));
        assert_eq!(social_security_wage_base(2024).amount, dec!(168600));
        assert_eq!(social_security_wage_base(2025).amount, dec!(174000));
    }

    #[test]
    fn wage_base_falls_back_to_latest_year() {
        let _guard = init_test_tracing();

        let base = social_security_wage_base(1999);

        assert_eq!(
            base,
            WageBase {
                tax_year: 2025,
                amount: dec!(174000),
            }
        );
    }

    #[test]
    fn wage_base_table_is_ascending_by_year() {
        assert!(
            SOCIAL_SECURITY_WAGE_BASES
                .windows(2)
                .all(|pair| pair[0].0 < pair[1].0)
        );
    }

    // =========================================================================
    // bracket table tests
    // =========================================================================

    #[test]
    fn every_bracket_table_starts_at_zero() {
        for status in ALL_STATUSES {
            assert_eq!(tax_brackets(status)[0].min_income, Decimal::ZERO);
        }
    }

    #[test]
    fn bracket_lower_bounds_strictly_increase() {
        for status in ALL_STATUSES {
            let brackets = tax_brackets(status);
            assert!(
                brackets
                    .windows(2)
                    .all(|pair| pair[0].min_income < pair[1].min_income),
                "brackets for {status:?} are not strictly increasing"
            );
        }
    }

    #[test]
    fn single_brackets_match_published_schedule() {
        let brackets = tax_brackets(FilingStatus::Single);

        assert_eq!(brackets[1], TaxBracket {
            min_income: dec!(11925),
            tax_rate: dec!(0.12),
        });
        assert_eq!(brackets[6].tax_rate, dec!(0.37));
    }

    #[test]
    fn standard_deductions_by_status() {
        assert_eq!(standard_deduction(FilingStatus::Single), dec!(15000));
        assert_eq!(standard_deduction(FilingStatus::Married), dec!(30000));
        assert_eq!(standard_deduction(FilingStatus::HeadOfHousehold), dec!(22500));
    }
}
