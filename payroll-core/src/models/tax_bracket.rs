use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a marginal rate schedule.
///
/// The bracket covers income from `min_income` up to the next bracket's
/// `min_income`; the last bracket in a table is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub tax_rate: Decimal,
}
