//! Error types for the recent scrubber

use std::path::PathBuf;

use grms_01_prefix_blacklist::BlacklistError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrubError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed recent items file {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    /// No record with the requested URI (the URI is deliberately not kept)
    #[error("Recent item not found")]
    ItemNotFound,

    #[error(transparent)]
    Blacklist(#[from] BlacklistError),
}

impl ScrubError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
