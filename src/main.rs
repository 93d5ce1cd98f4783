use clap::{Parser, Subcommand};
use royalbit_solmix::cli::{self, CalcOptions};
use royalbit_solmix::types::ConcentrationMode;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "solmix")]
#[command(about = "Mass balance for mixed chemical solutions")]
#[command(long_about = "Solmix - Recalculate concentrations when mixing solutions

Each formula is a '+'-separated list of solutions. A solution is a quantity
with an optional unit, then ':' and a ','-separated list of concentrations:

  100 mL : 0.3 NaCl, 3% T-N + 100 mL : 3.0% T-N + 200 mL

UNITS:
  Volume  kL, L, mL        (w/v%, mol/L)
  Weight  t, kg, g, mg     (w/w%, mol/L or mol/kg)
  none                     (%)

COMMANDS:
  calc  - Calculate the solutions and the mixed product
  mass  - Molar mass and element composition of chemical formulas

EXAMPLES:
  solmix calc -f \"100 g : 10% NaCl + 0 g : 15.0 NaCl\"
  solmix calc --molar -f \"1.17 * 1000 g : 35% HCl\"
  echo \"100:0.15+100\" | solmix calc -r 2
  solmix mass \"CuSO4·5H2O\"")]
#[command(version)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Calculate solutions and their mixed product.

Formulas are read from -f or, when -f is absent, from standard input.
Several formulas may be given at once, separated by ';' or newlines.
Blank lines and lines not starting with a number are skipped.

A quantity may be written as density * volume (e.g. '1.17 * 1000 g'); for
weight formulas the volume part is tracked so molar concentrations can be
given per litre of solution.

A concentration is a ratio ('0.3 NaCl') or a percent ('30% NaCl'). In a
solution of quantity 0 it is an absolute mass instead ('0 g : 15 NaCl').
Unnamed concentrations are called M1, M2... by position.

MODES:
  default             mass percent (w/v%, w/w%)
  -m, --molar         molar concentration, needs units and formula names
  -M, --mass-molarity moles per kg of solvent

EXAMPLES:
  solmix calc -f \"100 mL : 0.3 NaCl, 0.03 T-N + 100 mL : 3.0% T-N + 200 mL\" -r 2
  solmix calc -m -f \"1000 ml : 35% HCl\"
  solmix calc -M -f \"1.2 * 1000 g : 20% NaOH\"
  solmix calc -m --masses masses.yaml -f \"1 L : 18% Glucose\"")]
    /// Calculate solutions and their mixed product
    Calc {
        /// Formulas, ';'-separated (reads stdin when omitted)
        #[arg(short, long, value_delimiter = ';')]
        formula: Vec<String>,

        /// Report molar concentrations
        #[arg(short, long)]
        molar: bool,

        /// Report mass molar concentrations (mol/kg of solvent)
        #[arg(short = 'M', long)]
        mass_molarity: bool,

        /// Decimal places for ratios and concentrations
        #[arg(short, long, default_value_t = 3, env = "SOLMIX_ROUND")]
        round: usize,

        /// Show running totals after each solution
        #[arg(short, long)]
        verbose: bool,

        /// Print the reports as JSON
        #[arg(long)]
        json: bool,

        /// YAML file of molar mass overrides (name: g/mol)
        #[arg(long, env = "SOLMIX_MASSES")]
        masses: Option<PathBuf>,
    },

    /// Molar mass and element composition of chemical formulas
    Mass {
        /// Chemical formulas (e.g. NaCl, Ca(NO3)2, CuSO4·5H2O)
        #[arg(required = true)]
        formulas: Vec<String>,

        /// Decimal places
        #[arg(short, long, default_value_t = 3, env = "SOLMIX_ROUND")]
        round: usize,

        /// YAML file of molar mass overrides (name: g/mol)
        #[arg(long, env = "SOLMIX_MASSES")]
        masses: Option<PathBuf>,
    },
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "royalbit_solmix=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Commands::Calc {
            formula,
            molar,
            mass_molarity,
            round,
            verbose,
            json,
            masses,
        } => cli::calc(
            formula,
            CalcOptions {
                mode: ConcentrationMode::from_flags(molar, mass_molarity),
                round,
                verbose,
                json,
                masses,
            },
        ),

        Commands::Mass {
            formulas,
            round,
            masses,
        } => cli::mass(formulas, round, masses),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cli::print_error(&e);
            ExitCode::FAILURE
        }
    }
}
