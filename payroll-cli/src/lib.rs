//! Command-line front end for the payroll engine.
//!
//! The `paycheck` binary is a thin wrapper over these modules so that the
//! argument handling, settings file, report and CSV export can be tested
//! without spawning a process.

pub mod args;
pub mod export;
pub mod report;
pub mod settings;
