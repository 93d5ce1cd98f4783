//! CLI command handlers

pub mod commands;
pub mod report;

pub use commands::{
    calc, calculate_batch, for_each_report, load_table, mass, print_error, CalcOptions,
};
pub use report::render_report;
