// crates/wsrmse-core/src/error.rs

use std::path::PathBuf;

use thiserror::Error;
use wsrmse_parser::ParserError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("File I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: ParserError,
    },

    #[error("File '{path}' is not valid UTF-8")]
    Encoding { path: String },

    #[error("Invalid input file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Event log line {line} invalid: {message}")]
    EventLog { line: usize, message: String },
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
