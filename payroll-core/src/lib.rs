pub mod calculations;
pub mod error;
pub mod input;
pub mod models;
pub mod tables;

pub use calculations::{PaycheckCalculator, PaycheckExplanation};
pub use error::PayrollError;
pub use models::*;
