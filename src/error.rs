use std::path::PathBuf;

use thiserror::Error;

/// Root error type for the beam-background module.
#[derive(Error, Debug)]
pub enum BackgroundError {
    /// Invalid or incomplete module/filter configuration.
    #[error("config error: {0}")]
    Config(String),

    /// QA was requested but nothing was supplied to record it into.
    #[error("QA is enabled but no histogram sink was provided")]
    MissingSink,

    /// Fill or increment of a histogram that was never booked.
    #[error("unknown histogram: {0}")]
    UnknownHistogram(String),

    /// Increment of a labelled bin that the histogram does not define.
    #[error("histogram {hist} has no bin labelled {label:?}")]
    UnknownBin { hist: String, label: String },

    /// A histogram with the same name is already registered.
    #[error("histogram already booked: {0}")]
    DuplicateHistogram(String),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type BackgroundResult<T> = Result<T, BackgroundError>;
