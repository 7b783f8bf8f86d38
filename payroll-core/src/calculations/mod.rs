//! Paycheck calculation modules.
//!
//! One module per step of a paycheck, from gross pay through withholding,
//! plus the aggregator that runs them in order and its explanation trace.

pub mod common;
pub mod explain;
pub mod fica;
pub mod gross_pay;
pub mod limits;
pub mod paycheck;
pub mod pre_tax;
pub mod withholding;

pub use explain::{FederalWithholdingDetail, PaycheckExplanation};
pub use fica::{
    MedicareResult, SocialSecurityResult, calculate_medicare, calculate_social_security,
    employer_medicare, employer_social_security, medicare, social_security,
};
pub use gross_pay::{
    GrossPayBreakdown, HoursBreakdown, calculate_gross_pay, classify_daily, classify_hours,
    classify_weekly, gross_pay,
};
pub use paycheck::PaycheckCalculator;
pub use pre_tax::{TaxableWages, taxable_wages};
pub use withholding::{
    BracketStep, PercentageMethodWorksheet, bracket_tax, federal_withholding, flat_withholding,
    percentage_method_withholding, percentage_method_worksheet, state_withholding,
};
