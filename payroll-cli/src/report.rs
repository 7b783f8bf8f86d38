//! Plain-text output for the `paycheck` binary.

use payroll_core::calculations::{GrossPayBreakdown, calculate_gross_pay};
use payroll_core::{
    OvertimePolicy, PayInput, PaycheckResult, PayrollConfiguration, PayrollError,
    WithholdingMethod,
};
use rust_decimal::Decimal;

fn money(amount: Decimal) -> String {
    format!("${amount:.2}")
}

fn federal_configured(config: &PayrollConfiguration) -> bool {
    match config.withholding_method {
        WithholdingMethod::PercentageMethod => true,
        WithholdingMethod::Flat => config.federal_rate.is_some_and(|rate| !rate.is_zero()),
    }
}

fn state_configured(config: &PayrollConfiguration) -> bool {
    config.state_rate.is_some_and(|rate| !rate.is_zero())
}

/// Renders the paycheck summary.
///
/// Income tax lines appear only when that tax is configured. Taxable bases
/// appear only when pre-tax deductions moved them away from gross pay.
pub fn render_summary(
    result: &PaycheckResult,
    config: &PayrollConfiguration,
) -> String {
    let mut lines = vec![format!("Gross: {}", money(result.gross))];

    if result.fica_taxable != result.gross || result.fit_taxable != result.gross {
        lines.push(format!("FICA Taxable: {}", money(result.fica_taxable)));
        lines.push(format!("Income Tax Taxable: {}", money(result.fit_taxable)));
    }

    lines.push(format!("- Social Security: {}", money(result.social_security)));
    lines.push(format!("- Medicare: {}", money(result.medicare)));
    if federal_configured(config) {
        lines.push(format!("- Federal Income Tax: {}", money(result.federal_income_tax)));
    }
    if state_configured(config) {
        lines.push(format!("- State Income Tax: {}", money(result.state_income_tax)));
    }
    lines.push(format!("Total Deductions: {}", money(result.total_deductions)));
    lines.push(format!("Net Pay: {}", money(result.net)));

    lines.push(String::new());
    lines.push(format!(
        "Employer Social Security: {}",
        money(result.employer_social_security)
    ));
    lines.push(format!("Employer Medicare: {}", money(result.employer_medicare)));
    lines.push(format!("Employer Total: {}", money(result.employer_total)));

    lines.join("\n")
}

struct OvertimeExample {
    title: &'static str,
    rate: Decimal,
    days: Vec<Decimal>,
    policy: OvertimePolicy,
}

fn hours(values: &[i64]) -> Vec<Decimal> {
    values.iter().map(|&h| Decimal::from(h)).collect()
}

fn overtime_examples() -> Vec<OvertimeExample> {
    vec![
        OvertimeExample {
            title: "45 hours in the week (5 OT)",
            rate: Decimal::from(20),
            days: hours(&[9, 9, 9, 9, 9]),
            policy: OvertimePolicy::Weekly,
        },
        OvertimeExample {
            title: "38 hours in the week (no OT)",
            rate: Decimal::from(30),
            days: hours(&[8, 8, 8, 8, 6]),
            policy: OvertimePolicy::Weekly,
        },
        OvertimeExample {
            title: "50 hours in the week (10 OT)",
            rate: Decimal::from(30),
            days: hours(&[10, 10, 10, 10, 10]),
            policy: OvertimePolicy::Weekly,
        },
        OvertimeExample {
            title: "days of 10, 10, 10, 10 and 4 hours under daily overtime",
            rate: Decimal::from(20),
            days: hours(&[10, 10, 10, 10, 4]),
            policy: OvertimePolicy::Daily,
        },
    ]
}

fn describe_example(
    number: usize,
    example: &OvertimeExample,
    breakdown: &GrossPayBreakdown,
) -> Vec<String> {
    let rate = money(example.rate);
    let mut lines = vec![format!("{number}) {rate}/hr, {}:", example.title)];

    if let Some(hours) = breakdown.hours {
        lines.push(format!(
            "   Regular: {} x {rate} = {}",
            hours.regular.normalize(),
            money(breakdown.regular_pay)
        ));
        if hours.overtime > Decimal::ZERO {
            lines.push(format!(
                "   Overtime: {} x {rate} x {} = {}",
                hours.overtime.normalize(),
                breakdown.overtime_multiplier.normalize(),
                money(breakdown.overtime_pay)
            ));
        }
        if hours.double_time > Decimal::ZERO {
            lines.push(format!(
                "   Double time: {} x {rate} x {} = {}",
                hours.double_time.normalize(),
                breakdown.double_time_multiplier.normalize(),
                money(breakdown.double_time_pay)
            ));
        }
    }
    lines.push(format!("   Gross = {}", money(breakdown.gross)));
    lines
}

/// Help text on overtime rules, with worked examples computed by the engine.
pub fn overtime_rules() -> Result<String, PayrollError> {
    let mut lines: Vec<String> = [
        "Overtime Basics (U.S. FLSA)",
        "",
        "- Most non-exempt employees earn at least 1.5x the regular rate for hours over 40 in a workweek.",
        "- Some states add daily overtime: hours past 8 in a day at 1.5x, past 12 at 2x (e.g., California).",
        "- Use --daily-hours with --daily-overtime to apply daily rules, or enter overtime and",
        "  double-time hours directly with their multipliers.",
        "",
        "Examples:",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect();

    for (index, example) in overtime_examples().iter().enumerate() {
        let input = PayInput::daily(example.rate, example.days.clone(), example.policy);
        let breakdown = calculate_gross_pay(&input)?;
        lines.extend(describe_example(index + 1, example, &breakdown));
        lines.push(String::new());
    }

    lines.push(
        "Note: salaried employees may still be non-exempt depending on duties and salary \
         thresholds. This tool does not determine exemption status."
            .to_string(),
    );
    Ok(lines.join("\n"))
}
