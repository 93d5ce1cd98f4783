//! Mixture calculator
//!
//! Drives one formula through the pipeline: each solution term is parsed,
//! added to the quantity accumulator, its clauses added to the solute ledger,
//! and after the last term the product figures are resolved. Terms are
//! processed strictly left to right and the first error aborts the formula.

use crate::composition::MolarMassLookup;
use crate::core::accumulator::{QuantityAccumulator, SoluteLedger, SOLID_NAME};
use crate::core::resolver::{self, MolarBasis};
use crate::core::tokenizer::starts_numeric;
use crate::error::{SolmixError, SolmixResult};
use crate::parser::{display_formula, parse_solution_term, split_formula};
use crate::types::{
    Classification, Concentration, ConcentrationMode, MixtureReport, ProductRecord,
    RunningTotals, SoluteLine, SolutionRecord, SolutionTerm,
};
use tracing::{debug, trace};

/// Mixture calculator for one concentration mode
pub struct MixtureCalculator<'a> {
    mode: ConcentrationMode,
    lookup: &'a dyn MolarMassLookup,
    running_totals: bool,
}

impl<'a> MixtureCalculator<'a> {
    pub fn new(mode: ConcentrationMode, lookup: &'a dyn MolarMassLookup) -> Self {
        Self {
            mode,
            lookup,
            running_totals: false,
        }
    }

    /// Attach running totals to every solution record (mass-percent mode only)
    pub fn with_running_totals(mut self, enabled: bool) -> Self {
        self.running_totals = enabled;
        self
    }

    /// Calculate one formula.
    ///
    /// Returns `Ok(None)` for a blank formula or one that does not start with
    /// a number; such input is skipped rather than rejected.
    pub fn calculate(&self, formula: &str) -> SolmixResult<Option<MixtureReport>> {
        let formula = formula.trim();
        if !starts_numeric(formula) {
            debug!(formula, "skipping formula without a leading number");
            return Ok(None);
        }
        debug!(formula, mode = ?self.mode, "calculating mixture");

        let mut raw_terms = split_formula(formula).into_iter().enumerate();
        let Some((_, first_raw)) = raw_terms.next() else {
            return Ok(None);
        };

        let mut ledger = SoluteLedger::new(self.mode.is_molar());
        let mut solutions = Vec::new();

        let first = self.parse_term(1, first_raw)?;
        let mut total =
            QuantityAccumulator::new(first.quantity, &first.unit, first.split.map(|s| s.volume));
        solutions.push(self.mix_term(&first, &total, &mut ledger)?);

        for (index, raw) in raw_terms {
            let term = self.parse_term(index + 1, raw)?;
            extend_total(&mut total, &term)?;
            solutions.push(self.mix_term(&term, &total, &mut ledger)?);
        }

        let product = self.resolve_product(formula, &total, &ledger)?;

        Ok(Some(MixtureReport {
            formula: display_formula(formula),
            mode: self.mode,
            solutions,
            product,
        }))
    }

    fn parse_term(&self, id: usize, raw: &str) -> SolmixResult<SolutionTerm> {
        let term = parse_solution_term(id, raw)?;
        if self.mode.is_molar() && term.unit.is_empty() {
            return Err(SolmixError::MissingUnit(term.raw));
        }
        trace!(id, quantity = term.quantity, unit = %term.unit, "parsed solution term");
        Ok(term)
    }

    /// Add every clause of a term to the ledger and resolve the term's own figures
    fn mix_term(
        &self,
        term: &SolutionTerm,
        total: &QuantityAccumulator,
        ledger: &mut SoluteLedger,
    ) -> SolmixResult<SolutionRecord> {
        let unit = total.unit();
        let mut solutes = Vec::with_capacity(term.concentrations.len());

        for clause in &term.concentrations {
            if self.mode.is_molar() && clause.auto_named {
                return Err(SolmixError::MissingSoluteName(term.raw.clone()));
            }
            ledger.validate_name(&clause.solute)?;
            if !ledger.contains(&clause.solute) {
                ledger.register(&clause.solute, None)?;
                if self.mode.is_molar() {
                    let molar_mass = self.lookup.molar_mass(&clause.solute)?;
                    ledger.set_molar_mass(&clause.solute, molar_mass);
                }
            }

            let mass = ledger.contribute(&clause.solute, clause.value, term.quantity)?;

            let concentration = if self.mode.is_molar() {
                let split_volume = if total.is_split_enabled() {
                    term.split.map(|s| s.volume)
                } else {
                    None
                };
                let basis = MolarBasis {
                    quantity: term.quantity,
                    split_volume,
                };
                resolver::molar(
                    mass,
                    molar_mass_of(ledger, &clause.solute)?,
                    basis,
                    unit,
                    self.mode,
                )?
            } else if term.is_zero() {
                Concentration::AbsoluteMass
            } else {
                resolver::mass_percent(mass, term.quantity, unit)?
            };

            solutes.push(SoluteLine {
                solute: clause.solute.clone(),
                mass,
                mass_unit: unit.solute_unit.clone(),
                concentration,
            });
        }

        let split_liters =
            if unit.classification == Classification::Weight && total.is_split_enabled() {
                term.split.map(|s| unit.to_base(s.volume))
            } else {
                None
            };

        let running = if self.running_totals && !self.mode.is_molar() {
            Some(running_totals(total, ledger)?)
        } else {
            None
        };

        Ok(SolutionRecord {
            id: term.id,
            formula: term.raw.clone(),
            quantity: term.quantity,
            quantity_text: term.quantity_text.clone(),
            unit: term.unit.clone(),
            classification: unit.classification,
            split_liters,
            solutes,
            running,
        })
    }

    fn resolve_product(
        &self,
        formula: &str,
        total: &QuantityAccumulator,
        ledger: &SoluteLedger,
    ) -> SolmixResult<ProductRecord> {
        let unit = total.unit();
        let basis = MolarBasis {
            quantity: total.total(),
            split_volume: total.split_total(),
        };

        let mut solutes = Vec::with_capacity(ledger.solutes().len());
        for solute in ledger.solutes() {
            let concentration = if self.mode.is_molar() {
                let molar_mass = solute.molar_mass.ok_or_else(|| {
                    SolmixError::unknown_compound(solute.name.as_str(), "molar mass not resolved")
                })?;
                resolver::molar(solute.running_mass, molar_mass, basis, unit, self.mode)?
            } else {
                resolver::mass_percent(solute.running_mass, total.total(), unit)?
            };
            solutes.push(SoluteLine {
                solute: solute.name.clone(),
                mass: solute.running_mass,
                mass_unit: unit.solute_unit.clone(),
                concentration,
            });
        }

        let solid_mass = ledger.solid().running_mass;
        let solid = if self.mode.is_molar() {
            None
        } else {
            Some(SoluteLine {
                solute: SOLID_NAME.to_string(),
                mass: solid_mass,
                mass_unit: unit.solute_unit.clone(),
                concentration: resolver::mass_percent(solid_mass, total.total(), unit)?,
            })
        };

        let split_liters = if unit.classification == Classification::Weight {
            total.split_total().map(|split| unit.to_base(split))
        } else {
            None
        };

        Ok(ProductRecord {
            formula: display_formula(formula),
            total_quantity: total.total(),
            unit: unit.token.clone(),
            classification: unit.classification,
            split_liters,
            solutes,
            solid_mass,
            solid,
        })
    }
}

/// Add a later term to the quantity total and keep split tracking consistent
fn extend_total(total: &mut QuantityAccumulator, term: &SolutionTerm) -> SolmixResult<()> {
    total.add(term.quantity, &term.unit)?;
    if total.unit().classification == Classification::Weight && total.is_split_enabled() {
        match term.split {
            Some(split) => total.add_split(split.volume, &term.unit)?,
            None => total.disable_split(),
        }
    }
    Ok(())
}

fn molar_mass_of(ledger: &SoluteLedger, name: &str) -> SolmixResult<f64> {
    ledger
        .get(name)
        .and_then(|solute| solute.molar_mass)
        .ok_or_else(|| SolmixError::unknown_compound(name, "molar mass not resolved"))
}

/// Snapshot of the totals so far: Solid first, then each solute
fn running_totals(
    total: &QuantityAccumulator,
    ledger: &SoluteLedger,
) -> SolmixResult<RunningTotals> {
    let unit = total.unit();
    let quantity = total.total();

    let line = |name: &str, mass: f64| -> SolmixResult<SoluteLine> {
        let concentration = if quantity == 0.0 {
            Concentration::AbsoluteMass
        } else {
            resolver::mass_percent(mass, quantity, unit)?
        };
        Ok(SoluteLine {
            solute: name.to_string(),
            mass,
            mass_unit: unit.solute_unit.clone(),
            concentration,
        })
    };

    let mut solutes = vec![line(SOLID_NAME, ledger.solid().running_mass)?];
    for solute in ledger.solutes() {
        solutes.push(line(&solute.name, solute.running_mass)?);
    }

    Ok(RunningTotals {
        total: quantity,
        unit: unit.token.clone(),
        solutes,
    })
}
