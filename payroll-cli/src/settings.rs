//! TOML settings file holding a [`PayrollConfiguration`].
//!
//! Every key is optional; missing keys keep their defaults. Rates may be
//! written as fractions (`0.05`) or whole percentages (`5`).
//!
//! ```toml
//! tax_year = 2025
//! ytd_wages = "40000"
//! withholding_method = "percentage-method"
//! filing_status = "head-of-household"
//! pay_periods_per_year = 24
//! state_rate = 5
//!
//! [w4]
//! dependent_credit = "2000"
//!
//! [pre_tax]
//! retirement = "250"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use payroll_core::PayrollConfiguration;
use payroll_core::input::normalize_rate;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Parses settings from TOML text.
pub fn parse_settings(text: &str) -> Result<PayrollConfiguration, toml::de::Error> {
    let mut config: PayrollConfiguration = toml::from_str(text)?;
    config.federal_rate = config.federal_rate.map(normalize_rate);
    config.state_rate = config.state_rate.map(normalize_rate);
    Ok(config)
}

/// Reads and parses the settings file at `path`.
pub fn load_settings(path: &Path) -> Result<PayrollConfiguration, SettingsError> {
    let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_settings(&text).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), ?config, "Loaded payroll settings");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use payroll_core::{FilingStatus, WithholdingMethod};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(parse_settings("").unwrap(), PayrollConfiguration::default());
    }

    #[test]
    fn whole_number_rates_become_fractions() {
        let config = parse_settings("federal_rate = 12\nstate_rate = 0.05\n").unwrap();

        assert_eq!(config.federal_rate, Some(dec!(0.12)));
        assert_eq!(config.state_rate, Some(dec!(0.05)));
    }

    #[test]
    fn nested_tables_are_read() {
        let text = r#"
            withholding_method = "percentage-method"
            filing_status = "married"
            pay_periods_per_year = 52

            [w4]
            multiple_jobs = true
            extra_withholding = "15.50"

            [pre_tax]
            health_premiums = "80"
        "#;

        let config = parse_settings(text).unwrap();

        assert_eq!(config.withholding_method, WithholdingMethod::PercentageMethod);
        assert_eq!(config.filing_status, FilingStatus::Married);
        assert_eq!(config.pay_periods_per_year, 52);
        assert!(config.w4.multiple_jobs);
        assert_eq!(config.w4.extra_withholding, dec!(15.50));
        assert_eq!(config.pre_tax.health_premiums, dec!(80));
        assert_eq!(config.pre_tax.retirement, dec!(0));
    }

    #[test]
    fn short_codes_match_command_line_aliases() {
        let config = parse_settings("withholding_method = \"percentage\"\nfiling_status = \"hoh\"\n")
            .unwrap();

        assert_eq!(config.withholding_method, WithholdingMethod::PercentageMethod);
        assert_eq!(config.filing_status, FilingStatus::HeadOfHousehold);

        let config =
            parse_settings("withholding_method = \"Percentage_Method\"\nfiling_status = \"MFJ\"\n")
                .unwrap();

        assert_eq!(config.withholding_method, WithholdingMethod::PercentageMethod);
        assert_eq!(config.filing_status, FilingStatus::Married);
        assert_eq!(parse_settings("filing_status = \"s\"").unwrap().filing_status, FilingStatus::Single);
    }

    #[test]
    fn unknown_filing_status_is_rejected() {
        assert!(parse_settings("filing_status = \"widowed\"").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_settings(Path::new("does/not/exist.toml")).unwrap_err();

        assert!(matches!(err, SettingsError::Read { .. }));
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
