mod filing_status;
mod pay_input;
mod paycheck_result;
mod payroll_config;
mod tax_bracket;

pub use filing_status::FilingStatus;
pub use pay_input::{
    DEFAULT_DOUBLE_TIME_MULTIPLIER, DEFAULT_OVERTIME_MULTIPLIER, HoursInput, OvertimePolicy,
    PayInput, PayType,
};
pub use paycheck_result::PaycheckResult;
pub use payroll_config::{PayrollConfiguration, PreTaxDeductions, W4Adjustments, WithholdingMethod};
pub use tax_bracket::TaxBracket;
