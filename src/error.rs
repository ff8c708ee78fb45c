use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a run.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid caller-supplied settings. Raised before the report is read.
    #[error("{0}")]
    Config(String),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid XML mutations file: {}: {reason}", path.display())]
    MalformedReport { path: PathBuf, reason: String },

    #[error("Invalid event payload {}: {reason}", path.display())]
    Event { path: PathBuf, reason: String },

    /// The remote status publisher rejected the check, or was unreachable (status 0).
    #[error("API error: {status} - {message}")]
    Publish { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
