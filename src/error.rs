
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GroundForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Geometry Error: {0}")]
    Geometry(String),

    #[error("{model} has no coefficients for {imt}")]
    UnknownPeriod { model: &'static str, imt: String },

    #[error("Unsupported Configuration: {0}")]
    UnsupportedConfiguration(String),

    #[error("Parameter not set: {0}")]
    ParameterNotSet(&'static str),
}

pub type GfResult<T> = Result<T, GroundForgeError>;
