use crate::cli::report::render_report;
use crate::composition::{Composition, CompositionTable, MolarMassLookup};
use crate::core::MixtureCalculator;
use crate::error::{SolmixError, SolmixResult};
use crate::parser::split_formulas;
use crate::types::{ConcentrationMode, MixtureReport};
use colored::Colorize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options of the calc command
#[derive(Debug, Clone, Default)]
pub struct CalcOptions {
    pub mode: ConcentrationMode,
    /// Decimal places for ratios, percents and molar figures
    pub round: usize,
    /// Show running totals after each solution
    pub verbose: bool,
    pub json: bool,
    /// YAML file of `name: g/mol` overrides
    pub masses: Option<PathBuf>,
}

/// Load the molar mass table, with overrides when a file is given
pub fn load_table(masses: Option<&Path>) -> SolmixResult<CompositionTable> {
    match masses {
        Some(path) => {
            debug!(path = %path.display(), "loading molar mass overrides");
            CompositionTable::from_yaml_file(path)
        }
        None => Ok(CompositionTable::new()),
    }
}

/// Calculate every formula of a batch, handing each report to `emit` as soon
/// as it resolves. The first failing formula stops the batch; reports already
/// emitted stand.
pub fn for_each_report<F>(
    text: &str,
    options: &CalcOptions,
    lookup: &dyn MolarMassLookup,
    mut emit: F,
) -> SolmixResult<usize>
where
    F: FnMut(MixtureReport) -> SolmixResult<()>,
{
    let calculator =
        MixtureCalculator::new(options.mode, lookup).with_running_totals(options.verbose);

    let mut count = 0;
    for (index, formula) in split_formulas(text).iter().enumerate() {
        match calculator.calculate(formula)? {
            Some(report) => {
                emit(report)?;
                count += 1;
            }
            None => debug!(line = index + 1, "formula skipped"),
        }
    }
    info!(count, "formulas calculated");
    Ok(count)
}

/// Calculate every formula of a batch into a list
pub fn calculate_batch(
    text: &str,
    options: &CalcOptions,
    lookup: &dyn MolarMassLookup,
) -> SolmixResult<Vec<MixtureReport>> {
    let mut reports = Vec::new();
    for_each_report(text, options, lookup, |report| {
        reports.push(report);
        Ok(())
    })?;
    Ok(reports)
}

/// Execute the calc command
pub fn calc(formulas: Vec<String>, options: CalcOptions) -> SolmixResult<()> {
    let text = if formulas.is_empty() {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        input
    } else {
        formulas.join(";")
    };

    let table = load_table(options.masses.as_deref())?;

    if options.json {
        // The array is printed even when a later formula fails
        let mut reports = Vec::new();
        let result = for_each_report(&text, &options, &table, |report| {
            reports.push(report);
            Ok(())
        });
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return result.map(|_| ());
    }

    for_each_report(&text, &options, &table, |report| {
        for line in render_report(&report, options.round) {
            println!("{line}");
        }
        Ok(())
    })?;
    Ok(())
}

/// Print a fatal error on stderr
pub fn print_error(error: &SolmixError) {
    eprintln!("{} {error}", "Error:".red().bold());
}

/// Execute the mass command - molar mass and element composition
pub fn mass(formulas: Vec<String>, round: usize, masses: Option<PathBuf>) -> SolmixResult<()> {
    let table = load_table(masses.as_deref())?;

    for formula in &formulas {
        let molar_mass = table.molar_mass(formula)?;
        println!(
            "{} : {molar_mass:.round$} g/mol",
            format!("{formula:<13}").bold()
        );

        if table.overrides().contains_key(formula.as_str()) {
            println!("   {}", "(from overrides)".dimmed());
        } else {
            for line in composition_lines(&Composition::parse(formula)?, round) {
                println!("{line}");
            }
        }
        println!();
    }
    Ok(())
}

fn composition_lines(composition: &Composition, round: usize) -> Vec<String> {
    composition
        .elements
        .iter()
        .map(|(symbol, count)| {
            let atomic = crate::composition::atomic_mass(symbol).unwrap_or(0.0);
            format!(
                "   {symbol:<10} : {count} x {atomic:.round$} = {:.round$}",
                atomic * *count as f64
            )
        })
        .collect()
}
