use thiserror::Error;

pub type SolmixResult<T> = Result<T, SolmixError>;

#[derive(Error, Debug)]
pub enum SolmixError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error in '{term}': {message}")]
    Parse { term: String, message: String },

    #[error("Unit mismatch: '{found}' cannot be mixed with '{expected}'")]
    UnitMismatch { found: String, expected: String },

    #[error("Name '{0}' is reserved for the total of all solutes. Please use another name")]
    ReservedName(String),

    #[error("Hyphen cannot be used in a molecular formula: '{0}'")]
    InvalidName(String),

    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("Unknown compound '{name}': {reason}")]
    UnknownCompound { name: String, reason: String },

    #[error("Please specify the solution unit (e.g. L, mL, g, mg, kg): '{0}'")]
    MissingUnit(String),

    #[error("Please specify the molecule name: '{0}'")]
    MissingSoluteName(String),
}

impl SolmixError {
    pub(crate) fn parse(term: impl Into<String>, message: impl Into<String>) -> Self {
        SolmixError::Parse {
            term: term.into(),
            message: message.into(),
        }
    }

    pub(crate) fn unknown_compound(name: impl Into<String>, reason: impl Into<String>) -> Self {
        SolmixError::UnknownCompound {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
