use thiserror::Error;

#[derive(Error, Debug)]
pub enum SowPlanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Errors from month-name arithmetic. The engine turns these into "no result"
/// values before they reach a caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("unrecognized month name '{name}'")]
    UnknownMonth { name: String },

    #[error("month name is blank")]
    BlankMonth,

    #[error("month range {start}-{end} runs backwards (year wraparound is not supported)")]
    ReversedRange { start: String, end: String },
}

pub type Result<T> = std::result::Result<T, SowPlanError>;
