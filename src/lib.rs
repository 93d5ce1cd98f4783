//! Solmix - mass balance for mixed chemical solutions
//!
//! This library parses compact mixing formulas such as
//! `100 mL : 0.3 NaCl, 3% T-N + 200 mL`, accumulates solvent quantity and
//! solute mass across every solution term, and resolves the concentration of
//! each solute in each solution and in the final product.
//!
//! # Features
//!
//! - Volume (kL, L, mL) and weight (t, kg, g, mg) units, or unit-free quantities
//! - Mass percent (w/v%, w/w%), molar (mol/L) and mass molar (mol/kg) modes
//! - Density-scaled quantities (`1.17 * 1000 g`) tracked as split volumes
//! - Molar mass lookup from chemical formulas with user overrides
//!
//! # Example
//!
//! ```
//! use royalbit_solmix::composition::CompositionTable;
//! use royalbit_solmix::core::MixtureCalculator;
//! use royalbit_solmix::types::ConcentrationMode;
//!
//! let table = CompositionTable::new();
//! let calculator = MixtureCalculator::new(ConcentrationMode::MassPercent, &table);
//! let report = calculator.calculate("100 g : 10% NaCl + 0 g : 15.0 NaCl")?;
//!
//! if let Some(report) = report {
//!     println!("Total: {} {}", report.product.total_quantity, report.product.unit);
//! }
//! # Ok::<(), royalbit_solmix::error::SolmixError>(())
//! ```

pub mod cli;
pub mod composition;
pub mod core;
pub mod error;
pub mod parser;
pub mod types;

// Re-export commonly used types
pub use composition::{CompositionTable, MolarMassLookup};
pub use crate::core::MixtureCalculator;
pub use error::{SolmixError, SolmixResult};
pub use types::{ConcentrationMode, MixtureReport};
