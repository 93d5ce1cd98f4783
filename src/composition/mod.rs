//! Molar mass lookup for chemical formulas
//!
//! The mixer only needs `MolarMassLookup`. `CompositionTable` is the default
//! implementation: user overrides first, then the element table applied to
//! formulas such as `NaCl`, `Ca(NO3)2`, `K4[Fe(CN)6]` or `CuSO4·5H2O`.

pub mod elements;

use crate::error::{SolmixError, SolmixResult};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

pub use elements::{atomic_mass, Element, ELEMENTS};

static TOKEN_PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

/// Element, open bracket, or close bracket with its multiplier
fn token_pattern(formula: &str) -> SolmixResult<&'static Regex> {
    TOKEN_PATTERN
        .get_or_init(|| {
            Regex::new(
                r"(?P<element>[A-Z][a-z]?)(?P<count>\d*)|(?P<open>[(\[])|(?P<close>[)\]])(?P<multiplier>\d*)",
            )
        })
        .as_ref()
        .map_err(|e| SolmixError::unknown_compound(formula, format!("regex error: {e}")))
}

/// Resolve a solute name to its molar mass in g/mol
pub trait MolarMassLookup {
    fn molar_mass(&self, formula: &str) -> SolmixResult<f64>;
}

/// Element counts of a formula, in first-seen order
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub formula: String,
    pub elements: Vec<(String, usize)>,
}

impl Composition {
    /// Parse a chemical formula
    pub fn parse(formula: &str) -> SolmixResult<Self> {
        let trimmed = formula.trim();
        if trimmed.is_empty() {
            return Err(SolmixError::unknown_compound(formula, "empty formula"));
        }

        let token_pattern = token_pattern(formula)?;

        let mut elements = Vec::new();
        for segment in trimmed.split('·') {
            let (multiplier, body) = split_leading_count(formula, segment)?;
            let counts = parse_group(formula, body, token_pattern)?;
            for (symbol, count) in counts {
                add_count(formula, &mut elements, &symbol, scale(formula, count, multiplier)?)?;
            }
        }

        Ok(Self {
            formula: trimmed.to_string(),
            elements,
        })
    }

    /// Sum of atomic masses
    pub fn molar_mass(&self) -> f64 {
        self.elements
            .iter()
            .map(|(symbol, count)| atomic_mass(symbol).unwrap_or(0.0) * *count as f64)
            .sum()
    }

    /// Number of atoms of one element
    pub fn count(&self, symbol: &str) -> usize {
        self.elements
            .iter()
            .find(|(s, _)| s == symbol)
            .map_or(0, |(_, count)| *count)
    }
}

fn split_leading_count<'s>(formula: &str, segment: &'s str) -> SolmixResult<(usize, &'s str)> {
    let digits = segment.chars().take_while(char::is_ascii_digit).count();
    let multiplier = parse_count(formula, &segment[..digits])?;
    Ok((multiplier, &segment[digits..]))
}

/// An absent count means one atom
fn parse_count(formula: &str, text: &str) -> SolmixResult<usize> {
    if text.is_empty() {
        return Ok(1);
    }
    text.parse()
        .map_err(|_| SolmixError::unknown_compound(formula, format!("count '{text}' is too large")))
}

fn scale(formula: &str, count: usize, multiplier: usize) -> SolmixResult<usize> {
    count
        .checked_mul(multiplier)
        .ok_or_else(|| SolmixError::unknown_compound(formula, "atom count overflows"))
}

fn add_count(
    formula: &str,
    counts: &mut Vec<(String, usize)>,
    symbol: &str,
    count: usize,
) -> SolmixResult<()> {
    match counts.iter_mut().find(|(s, _)| s == symbol) {
        Some((_, existing)) => {
            *existing = existing
                .checked_add(count)
                .ok_or_else(|| SolmixError::unknown_compound(formula, "atom count overflows"))?;
        }
        None => counts.push((symbol.to_string(), count)),
    }
    Ok(())
}

fn parse_group(
    formula: &str,
    body: &str,
    token_pattern: &Regex,
) -> SolmixResult<Vec<(String, usize)>> {
    // Each open bracket pushes a frame; closing merges it into its parent
    let mut stack: Vec<(char, Vec<(String, usize)>)> = vec![(' ', Vec::new())];
    let mut position = 0;

    for caps in token_pattern.captures_iter(body) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() != position {
            return Err(SolmixError::unknown_compound(
                formula,
                format!("unexpected '{}'", &body[position..whole.start()]),
            ));
        }
        position = whole.end();

        if let Some(element) = caps.name("element") {
            let symbol = element.as_str();
            if atomic_mass(symbol).is_none() {
                return Err(SolmixError::unknown_compound(
                    formula,
                    format!("unknown element '{symbol}'"),
                ));
            }
            let count = match caps.name("count") {
                Some(m) => parse_count(formula, m.as_str())?,
                None => 1,
            };
            if let Some((_, top)) = stack.last_mut() {
                add_count(formula, top, symbol, count)?;
            }
        } else if let Some(open) = caps.name("open") {
            let opener = open.as_str().chars().next().unwrap_or('(');
            stack.push((opener, Vec::new()));
        } else if let Some(close) = caps.name("close") {
            let expected = if close.as_str() == ")" { '(' } else { '[' };
            if stack.len() < 2 || stack.last().map(|(opener, _)| *opener) != Some(expected) {
                return Err(SolmixError::unknown_compound(formula, "unbalanced brackets"));
            }
            let multiplier = match caps.name("multiplier") {
                Some(m) => parse_count(formula, m.as_str())?,
                None => 1,
            };
            if let Some((_, group)) = stack.pop() {
                if let Some((_, parent)) = stack.last_mut() {
                    for (symbol, count) in group {
                        add_count(formula, parent, &symbol, scale(formula, count, multiplier)?)?;
                    }
                }
            }
        }
    }

    if position != body.len() {
        return Err(SolmixError::unknown_compound(
            formula,
            format!("unexpected '{}'", &body[position..]),
        ));
    }
    if stack.len() != 1 {
        return Err(SolmixError::unknown_compound(formula, "unbalanced brackets"));
    }

    let counts = stack.pop().map(|(_, counts)| counts).unwrap_or_default();
    if counts.is_empty() {
        return Err(SolmixError::unknown_compound(formula, "no elements found"));
    }
    Ok(counts)
}

/// Built-in lookup with optional user overrides
#[derive(Debug, Clone, Default)]
pub struct CompositionTable {
    overrides: HashMap<String, f64>,
}

impl CompositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the molar mass of a name
    pub fn with_override(mut self, name: impl Into<String>, molar_mass: f64) -> Self {
        self.overrides.insert(name.into(), molar_mass);
        self
    }

    /// Load overrides from a YAML mapping of `name: g/mol`
    pub fn from_yaml_file(path: &Path) -> SolmixResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> SolmixResult<Self> {
        let overrides: HashMap<String, f64> = serde_yaml::from_str(content)?;
        if let Some((name, mass)) = overrides.iter().find(|(_, mass)| **mass <= 0.0) {
            return Err(SolmixError::parse(
                name.as_str(),
                format!("molar mass must be positive, got {mass}"),
            ));
        }
        debug!(count = overrides.len(), "loaded molar mass overrides");
        Ok(Self { overrides })
    }

    pub fn overrides(&self) -> &HashMap<String, f64> {
        &self.overrides
    }
}

impl MolarMassLookup for CompositionTable {
    fn molar_mass(&self, formula: &str) -> SolmixResult<f64> {
        if let Some(mass) = self.overrides.get(formula) {
            return Ok(*mass);
        }
        let mass = Composition::parse(formula)?.molar_mass();
        debug!(formula, mass, "resolved molar mass");
        Ok(mass)
    }
}
