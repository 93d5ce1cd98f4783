//! Mass-balance accumulators
//!
//! `QuantityAccumulator` keeps the running total of the mixture's base
//! quantity, `SoluteLedger` the running mass of every solute plus the Solid
//! aggregate. Each formula owns a fresh pair.

use crate::core::units::UnitSpec;
use crate::error::{SolmixError, SolmixResult};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Reserved name of the aggregate of all solutes
pub const SOLID_NAME: &str = "Solid";

//==============================================================================
// Quantity
//==============================================================================

/// Running total of the solution quantity, in the first term's unit
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityAccumulator {
    total: f64,
    unit: UnitSpec,
    split_total: Option<f64>,
}

impl QuantityAccumulator {
    /// Start from the first solution term. Split tracking is enabled only if
    /// that term carried a density split.
    pub fn new(amount: f64, unit: &str, split_volume: Option<f64>) -> Self {
        Self {
            total: amount,
            unit: UnitSpec::parse(unit),
            split_total: split_volume,
        }
    }

    /// Add a later term's quantity
    pub fn add(&mut self, amount: f64, unit: &str) -> SolmixResult<()> {
        self.check_unit(unit)?;
        self.total += amount;
        Ok(())
    }

    /// Add a later term's split volume. No-op once tracking is disabled.
    pub fn add_split(&mut self, amount: f64, unit: &str) -> SolmixResult<()> {
        self.check_unit(unit)?;
        if let Some(split_total) = self.split_total.as_mut() {
            *split_total += amount;
        }
        Ok(())
    }

    /// Stop tracking split volumes for the rest of the formula
    pub fn disable_split(&mut self) {
        if self.split_total.take().is_some() {
            debug!("split volume tracking disabled");
        }
    }

    pub fn is_split_enabled(&self) -> bool {
        self.split_total.is_some()
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn split_total(&self) -> Option<f64> {
        self.split_total
    }

    pub fn unit(&self) -> &UnitSpec {
        &self.unit
    }

    fn check_unit(&self, unit: &str) -> SolmixResult<()> {
        if self.unit.accepts(unit) {
            Ok(())
        } else {
            Err(SolmixError::UnitMismatch {
                found: unit.to_string(),
                expected: self.unit.token.clone(),
            })
        }
    }
}

//==============================================================================
// Solutes
//==============================================================================

/// Running mass of one solute
#[derive(Debug, Clone, PartialEq)]
pub struct SoluteAccumulator {
    pub name: String,
    pub running_mass: f64,
    /// g/mol, molar modes only
    pub molar_mass: Option<f64>,
}

impl SoluteAccumulator {
    fn new(name: &str, molar_mass: Option<f64>) -> Self {
        Self {
            name: name.to_string(),
            running_mass: 0.0,
            molar_mass,
        }
    }
}

/// Mass contributed by one clause: the literal value itself for a zero
/// quantity, `value * quantity` otherwise
pub fn contribution(value: f64, quantity: f64) -> f64 {
    if quantity == 0.0 {
        value
    } else {
        value * quantity
    }
}

/// All solutes of one formula, in first-seen order, plus the Solid aggregate
#[derive(Debug, Clone)]
pub struct SoluteLedger {
    solutes: Vec<SoluteAccumulator>,
    index: HashMap<String, usize>,
    solid: SoluteAccumulator,
    formula_names: bool,
}

impl SoluteLedger {
    /// `formula_names` enforces names usable as chemical formulas (molar modes)
    pub fn new(formula_names: bool) -> Self {
        Self {
            solutes: Vec::new(),
            index: HashMap::new(),
            solid: SoluteAccumulator::new(SOLID_NAME, None),
            formula_names,
        }
    }

    /// Check a solute name before it is registered or contributed to
    pub fn validate_name(&self, name: &str) -> SolmixResult<()> {
        if name == SOLID_NAME {
            return Err(SolmixError::ReservedName(name.to_string()));
        }
        if self.formula_names && name.contains('-') {
            return Err(SolmixError::InvalidName(name.to_string()));
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Create a solute with zero mass if it is not known yet
    pub fn register(&mut self, name: &str, molar_mass: Option<f64>) -> SolmixResult<()> {
        self.validate_name(name)?;
        if !self.contains(name) {
            trace!(solute = name, ?molar_mass, "registering solute");
            self.index.insert(name.to_string(), self.solutes.len());
            self.solutes.push(SoluteAccumulator::new(name, molar_mass));
        }
        Ok(())
    }

    /// Add one clause's mass to the named solute and to Solid.
    /// Returns the mass contributed.
    pub fn contribute(&mut self, name: &str, value: f64, quantity: f64) -> SolmixResult<f64> {
        self.register(name, None)?;
        let mass = contribution(value, quantity);
        if let Some(&position) = self.index.get(name) {
            self.solutes[position].running_mass += mass;
        }
        self.solid.running_mass += mass;
        trace!(solute = name, mass, "contributed");
        Ok(mass)
    }

    /// Record the molar mass of a registered solute
    pub fn set_molar_mass(&mut self, name: &str, molar_mass: f64) {
        if let Some(&position) = self.index.get(name) {
            self.solutes[position].molar_mass = Some(molar_mass);
        }
    }

    pub fn get(&self, name: &str) -> Option<&SoluteAccumulator> {
        if name == SOLID_NAME {
            return Some(&self.solid);
        }
        self.index.get(name).map(|&position| &self.solutes[position])
    }

    /// Solutes in first-seen order, Solid excluded
    pub fn solutes(&self) -> &[SoluteAccumulator] {
        &self.solutes
    }

    pub fn solid(&self) -> &SoluteAccumulator {
        &self.solid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_accumulates_in_first_unit() {
        let mut total = QuantityAccumulator::new(100.0, "mL", None);
        total.add(100.0, "mL").unwrap();
        total.add(200.0, "").unwrap();
        assert_eq!(total.total(), 400.0);
        assert_eq!(total.unit().token, "mL");
    }

    #[test]
    fn test_quantity_unit_compare_ignores_case() {
        let mut total = QuantityAccumulator::new(1.0, "mL", None);
        assert!(total.add(1.0, "ML").is_ok());
    }

    #[test]
    fn test_quantity_unit_mismatch() {
        let mut total = QuantityAccumulator::new(100.0, "L", None);
        let err = total.add(50.0, "mL").unwrap_err();
        assert!(matches!(err, SolmixError::UnitMismatch { .. }));
        assert_eq!(total.total(), 100.0);
    }

    #[test]
    fn test_unitless_accumulator_rejects_units() {
        let mut total = QuantityAccumulator::new(100.0, "", None);
        assert!(total.add(100.0, "g").is_err());
        assert!(total.add(100.0, "").is_ok());
    }

    #[test]
    fn test_split_tracking() {
        let mut total = QuantityAccumulator::new(1170.0, "g", Some(1000.0));
        assert!(total.is_split_enabled());
        total.add_split(500.0, "g").unwrap();
        assert_eq!(total.split_total(), Some(1500.0));

        total.disable_split();
        assert!(!total.is_split_enabled());
        total.add_split(500.0, "g").unwrap();
        assert_eq!(total.split_total(), None);
    }

    #[test]
    fn test_split_disabled_from_start() {
        let total = QuantityAccumulator::new(100.0, "g", None);
        assert!(!total.is_split_enabled());
    }

    #[test]
    fn test_contribution() {
        assert!((contribution(0.3, 100.0) - 30.0).abs() < 1e-9);
        assert_eq!(contribution(15.0, 0.0), 15.0);
    }

    #[test]
    fn test_ledger_contribute_and_solid() {
        let mut ledger = SoluteLedger::new(false);
        ledger.contribute("NaCl", 0.3, 100.0).unwrap();
        ledger.contribute("T-N", 0.03, 100.0).unwrap();
        ledger.contribute("T-N", 0.03, 100.0).unwrap();

        let nacl = ledger.get("NaCl").unwrap().running_mass;
        let tn = ledger.get("T-N").unwrap().running_mass;
        assert!((nacl - 30.0).abs() < 1e-9);
        assert!((tn - 6.0).abs() < 1e-9);
        assert!((ledger.solid().running_mass - (nacl + tn)).abs() < 1e-9);
    }

    #[test]
    fn test_ledger_keeps_first_seen_order() {
        let mut ledger = SoluteLedger::new(false);
        ledger.contribute("B", 1.0, 0.0).unwrap();
        ledger.contribute("A", 1.0, 0.0).unwrap();
        ledger.contribute("B", 1.0, 0.0).unwrap();
        let names: Vec<&str> = ledger.solutes().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_ledger_absolute_add() {
        let mut ledger = SoluteLedger::new(false);
        let mass = ledger.contribute("NaCl", 15.0, 0.0).unwrap();
        assert_eq!(mass, 15.0);
        assert_eq!(ledger.get("NaCl").unwrap().running_mass, 15.0);
    }

    #[test]
    fn test_ledger_reserved_name() {
        let mut ledger = SoluteLedger::new(false);
        let err = ledger.contribute("Solid", 15.0, 100.0).unwrap_err();
        assert!(matches!(err, SolmixError::ReservedName(_)));
        assert_eq!(ledger.solid().running_mass, 0.0);
    }

    #[test]
    fn test_ledger_hyphen_only_rejected_for_formula_names() {
        let mut plain = SoluteLedger::new(false);
        assert!(plain.contribute("T-N", 0.1, 10.0).is_ok());

        let mut molar = SoluteLedger::new(true);
        let err = molar.contribute("T-N", 0.1, 10.0).unwrap_err();
        assert!(matches!(err, SolmixError::InvalidName(_)));
    }

    #[test]
    fn test_ledger_molar_mass() {
        let mut ledger = SoluteLedger::new(true);
        ledger.register("NaCl", Some(58.44)).unwrap();
        assert_eq!(ledger.get("NaCl").unwrap().molar_mass, Some(58.44));
        ledger.set_molar_mass("NaCl", 58.443);
        assert_eq!(ledger.get("NaCl").unwrap().molar_mass, Some(58.443));
    }
}
