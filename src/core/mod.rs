//! Mass-balance engine: units, term tokenizer, accumulators and resolver

pub mod accumulator;
pub mod mixer;
pub mod resolver;
pub mod tokenizer;
pub mod units;

pub use accumulator::{QuantityAccumulator, SoluteLedger, SOLID_NAME};
pub use mixer::MixtureCalculator;
pub use units::UnitSpec;
