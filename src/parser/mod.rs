//! Formula splitter
//!
//! A batch is split on `;` into formulas, a formula on `+` into solution
//! terms, a solution term on its first `:` into a quantity and a concentration
//! section, and the concentration section on `,` into clauses.

use crate::core::tokenizer::{split_concentration, split_quantity};
use crate::error::{SolmixError, SolmixResult};
use crate::types::{ConcentrationTerm, SolutionTerm};

/// Prefix for solute names generated for unnamed clauses
pub const AUTO_NAME_PREFIX: &str = "M";

/// Split a batch of `;`-delimited formulas, trimming each one
pub fn split_formulas(text: &str) -> Vec<String> {
    text.lines()
        .flat_map(|line| line.split(';'))
        .map(|formula| formula.trim().to_string())
        .collect()
}

/// Split a formula into raw solution terms on `+`
pub fn split_formula(formula: &str) -> Vec<&str> {
    formula.split('+').map(str::trim).collect()
}

/// Split a solution term into `(quantity, concentrations)` on the first `:`
pub fn split_solution_term(raw: &str) -> (&str, &str) {
    match raw.split_once(':') {
        Some((quantity, concentrations)) => (quantity.trim(), concentrations.trim()),
        None => (raw.trim(), ""),
    }
}

/// Split a concentration section on `,`, dropping empty clauses
pub fn split_concentration_spec(spec: &str) -> Vec<&str> {
    spec.split(',')
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .collect()
}

/// Formula text as echoed in reports: no whitespace, ` + ` between terms
pub fn display_formula(formula: &str) -> String {
    remove_whitespace(formula).replace('+', " + ")
}

pub(crate) fn remove_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parse one raw solution term into a typed term
///
/// An empty quantity before a `:` (`:15NaCl`) reads as zero; an empty term
/// without one (a trailing `+`) is rejected. Unnamed clauses are named
/// `M1`, `M2`... by their position within this term.
pub fn parse_solution_term(id: usize, raw: &str) -> SolmixResult<SolutionTerm> {
    let compact = remove_whitespace(raw);
    let (quantity_spec, concentration_spec) = split_solution_term(&compact);
    let quantity_spec = match (quantity_spec.is_empty(), compact.contains(':')) {
        (true, true) => "0",
        (true, false) => {
            return Err(SolmixError::parse(raw, "empty solution term"));
        }
        (false, _) => quantity_spec,
    };

    let quantity = split_quantity(quantity_spec)?;

    let concentrations = split_concentration_spec(concentration_spec)
        .into_iter()
        .enumerate()
        .map(|(index, clause)| {
            let parts = split_concentration(clause)?;
            let auto_named = parts.suffix.is_empty();
            let solute = if auto_named {
                format!("{AUTO_NAME_PREFIX}{}", index + 1)
            } else {
                parts.suffix
            };
            Ok(ConcentrationTerm {
                raw: clause.to_string(),
                solute,
                auto_named,
                value: parts.value,
            })
        })
        .collect::<SolmixResult<Vec<_>>>()?;

    Ok(SolutionTerm {
        id,
        raw: compact.clone(),
        quantity: quantity.value,
        quantity_text: quantity.text,
        unit: quantity.suffix,
        split: quantity.split,
        concentrations,
    })
}
