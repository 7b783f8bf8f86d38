use anyhow::{Context, Result};
use clap::Parser;
use payroll_cli::args::Cli;
use payroll_cli::export::append_result;
use payroll_cli::report::{overtime_rules, render_summary};
use payroll_cli::settings::load_settings;
use payroll_core::{PaycheckCalculator, PayrollConfiguration};
use tracing::debug;
use tracing_subscriber::EnvFilter;

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
/// * Writes to stderr so the report on stdout stays pipeable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    if cli.ot_rules {
        println!("{}", overtime_rules().context("Failed to compute overtime examples")?);
        return Ok(());
    }

    let settings = match &cli.config {
        Some(path) => load_settings(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?,
        None => PayrollConfiguration::default(),
    };
    let config = cli.apply_overrides(settings);
    debug!(?config, "Effective payroll configuration");

    let input = cli.pay_input().context("Invalid pay inputs")?;
    let calculator = PaycheckCalculator::new(config);

    let result = if cli.explain {
        let explanation = calculator
            .explain(&input)
            .context("Failed to calculate paycheck")?;
        println!("{explanation}");
        explanation.result
    } else {
        let result = calculator
            .calculate(&input)
            .context("Failed to calculate paycheck")?;
        println!("{}", render_summary(&result, calculator.config()));
        result
    };

    if let Some(path) = &cli.export {
        append_result(path, &result)
            .with_context(|| format!("Failed to export to: {}", path.display()))?;
    }

    Ok(())
}
