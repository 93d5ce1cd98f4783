//! Text rendering of mixture reports
//!
//! Each record is a block of `key : value` lines with keys padded to a fixed
//! width, followed by a blank line. Masses and quantities are echoed as
//! computed; ratios, percents and molar figures are rounded to `round` places.

use crate::core::tokenizer::number_text;
use crate::types::{
    Concentration, MixtureReport, ProductRecord, RunningTotals, SoluteLine, SolutionRecord,
};

const KEY_WIDTH: usize = 13;

/// Render every record of a report
pub fn render_report(report: &MixtureReport, round: usize) -> Vec<String> {
    let unit = report.product.unit.as_str();
    let mut lines = Vec::new();

    for solution in &report.solutions {
        render_solution(&mut lines, solution, unit, round);
        lines.push(String::new());
    }
    render_product(&mut lines, &report.product, round);
    lines.push(String::new());

    lines
}

fn line(key: &str, value: impl AsRef<str>) -> String {
    format!("{:<KEY_WIDTH$} : {}", key, value.as_ref())
        .trim_end()
        .to_string()
}

fn with_unit(value: &str, unit: &str) -> String {
    if unit.is_empty() {
        value.to_string()
    } else {
        format!("{value} {unit}")
    }
}

fn render_solution(lines: &mut Vec<String>, solution: &SolutionRecord, unit: &str, round: usize) {
    lines.push(line("Type", format!("Solution.{}", solution.id)));
    lines.push(line("Formula", &solution.formula));

    let mut quantity = with_unit(&solution.quantity_text, &solution.unit);
    if let Some(liters) = solution.split_liters {
        quantity = format!("{quantity} ({liters:.round$} L)");
    }
    lines.push(line(solution.classification.property_name(), quantity));

    for solute in &solution.solutes {
        lines.push(solute_line(
            &solute.solute,
            solute,
            &solution.quantity_text,
            unit,
            round,
        ));
    }

    if let Some(running) = &solution.running {
        render_running(lines, running, solution.classification.property_name(), round);
    }
}

fn render_running(lines: &mut Vec<String>, running: &RunningTotals, property: &str, round: usize) {
    let total = number_text(running.total);
    lines.push(line(
        &format!("Total_{property}"),
        with_unit(&total, &running.unit),
    ));
    for solute in &running.solutes {
        lines.push(solute_line(
            &format!("Total_{}", solute.solute),
            solute,
            &total,
            &running.unit,
            round,
        ));
    }
}

fn render_product(lines: &mut Vec<String>, product: &ProductRecord, round: usize) {
    let property = format!("Total_{}", product.classification.property_name());
    let total = number_text(product.total_quantity);

    lines.push(line("Type", "Product"));
    lines.push(line("Formula", &product.formula));

    let mut quantity = with_unit(&total, &product.unit);
    if let Some(liters) = product.split_liters {
        quantity = format!("{quantity} ({liters:.round$} L)");
    }
    lines.push(line(&property, quantity));

    for solute in product.solutes.iter().chain(product.solid.iter()) {
        lines.push(solute_line(
            &format!("Total_{}", solute.solute),
            solute,
            &total,
            &product.unit,
            round,
        ));
    }
}

/// One solute line. `quantity` is the divisor as it should be echoed.
fn solute_line(key: &str, solute: &SoluteLine, quantity: &str, unit: &str, round: usize) -> String {
    let mass = with_unit(&number_text(solute.mass), &solute.mass_unit);

    let value = match &solute.concentration {
        Concentration::AbsoluteMass => mass,
        Concentration::Ratio {
            ratio,
            percent,
            label,
        } => format!(
            "{mass} / {} = {ratio:.round$} ({percent:.round$} {label})",
            with_unit(quantity, unit)
        ),
        Concentration::Molar {
            grams,
            denominator: None,
            ..
        } => format!("{} g ({mass})", number_text(*grams)),
        Concentration::Molar {
            grams,
            molar_mass,
            denominator: Some(denominator),
            denominator_unit,
            value,
            unit: molar_unit,
        } => format!(
            "{} g / {molar_mass:.round$} amu / {} = {value:.round$} {molar_unit}",
            number_text(*grams),
            with_unit(&number_text(*denominator), denominator_unit),
        ),
    };

    line(key, value)
}
