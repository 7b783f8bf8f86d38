//! Appends paycheck results to a CSV file.
//!
//! ## CSV Format
//!
//! | Column | Notes |
//! |----------------------------|---------------------------------------|
//! | `gross` | |
//! | `fica_taxable` | Base for Social Security and Medicare |
//! | `fit_taxable` | Base for federal and state withholding |
//! | `social_security` | |
//! | `medicare` | Includes Additional Medicare Tax |
//! | `federal_income_tax` | |
//! | `state_income_tax` | |
//! | `total_deductions` | |
//! | `net` | |
//! | `employer_social_security` | |
//! | `employer_medicare` | |
//! | `employer_total` | |
//!
//! Amounts are written with exactly two decimal places. The header row is
//! written only when the file is new or empty; later runs append rows.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use payroll_core::PaycheckResult;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when exporting results.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(String),
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Csv(err.to_string())
    }
}

/// One exported CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRecord {
    pub gross: String,
    pub fica_taxable: String,
    pub fit_taxable: String,
    pub social_security: String,
    pub medicare: String,
    pub federal_income_tax: String,
    pub state_income_tax: String,
    pub total_deductions: String,
    pub net: String,
    pub employer_social_security: String,
    pub employer_medicare: String,
    pub employer_total: String,
}

fn cents(amount: Decimal) -> String {
    format!("{amount:.2}")
}

impl From<&PaycheckResult> for ExportRecord {
    fn from(result: &PaycheckResult) -> Self {
        Self {
            gross: cents(result.gross),
            fica_taxable: cents(result.fica_taxable),
            fit_taxable: cents(result.fit_taxable),
            social_security: cents(result.social_security),
            medicare: cents(result.medicare),
            federal_income_tax: cents(result.federal_income_tax),
            state_income_tax: cents(result.state_income_tax),
            total_deductions: cents(result.total_deductions),
            net: cents(result.net),
            employer_social_security: cents(result.employer_social_security),
            employer_medicare: cents(result.employer_medicare),
            employer_total: cents(result.employer_total),
        }
    }
}

/// Writes records as CSV to any writer.
pub fn write_records<W: Write>(
    writer: W,
    records: &[ExportRecord],
    include_header: bool,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(include_header)
        .from_writer(writer);

    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Appends one result to the CSV file at `path`, creating it if needed.
pub fn append_result(
    path: &Path,
    result: &PaycheckResult,
) -> Result<(), ExportError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let include_header = file.metadata()?.len() == 0;

    write_records(file, &[ExportRecord::from(result)], include_header)?;

    info!(path = %path.display(), include_header, "Exported paycheck to CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample_result() -> PaycheckResult {
        PaycheckResult {
            gross: dec!(950),
            fica_taxable: dec!(950),
            fit_taxable: dec!(950),
            social_security: dec!(58.9),
            medicare: dec!(13.78),
            federal_income_tax: dec!(0),
            state_income_tax: dec!(0),
            total_deductions: dec!(72.68),
            net: dec!(877.32),
            employer_social_security: dec!(58.9),
            employer_medicare: dec!(13.78),
            employer_total: dec!(72.68),
        }
    }

    #[test]
    fn amounts_always_have_two_decimals() {
        let record = ExportRecord::from(&sample_result());

        assert_eq!(record.gross, "950.00");
        assert_eq!(record.social_security, "58.90");
        assert_eq!(record.federal_income_tax, "0.00");
    }

    #[test]
    fn header_lists_columns_in_order() {
        let mut buffer = Vec::new();
        write_records(&mut buffer, &[ExportRecord::from(&sample_result())], true).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some(
                "gross,fica_taxable,fit_taxable,social_security,medicare,\
                 federal_income_tax,state_income_tax,total_deductions,net,\
                 employer_social_security,employer_medicare,employer_total"
            )
        );
        assert_eq!(
            lines.next(),
            Some("950.00,950.00,950.00,58.90,13.78,0.00,0.00,72.68,877.32,58.90,13.78,72.68")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn rows_without_header() {
        let mut buffer = Vec::new();
        write_records(&mut buffer, &[ExportRecord::from(&sample_result())], false).unwrap();

        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("950.00,"));
    }
}
