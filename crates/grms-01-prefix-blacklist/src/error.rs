//! Error types for the prefix blacklist

use thiserror::Error;

/// Errors surfaced by blacklist load/save
#[derive(Debug, Error)]
pub enum BlacklistError {
    #[error("Malformed blacklist ({location}): {source}. Fix or delete the file.")]
    Format {
        location: String,
        #[source]
        source: FormatError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BlacklistError {
    /// True if the store held content that could not be parsed
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}

/// Malformed persisted content
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("content is not valid UTF-8")]
    InvalidUtf8,

    #[error("line {line}: expected 2 fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: digest must be {expected} characters, found {found}")]
    DigestWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: digest is not hexadecimal")]
    DigestNotHex { line: usize },

    #[error("line {line}: prefix length {value:?} is not a non-negative integer")]
    InvalidLength { line: usize, value: String },
}

impl FormatError {
    /// Attach a line number to an error produced without one
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            Self::InvalidUtf8 => Self::InvalidUtf8,
            Self::FieldCount { found, .. } => Self::FieldCount { line, found },
            Self::DigestWidth {
                expected, found, ..
            } => Self::DigestWidth {
                line,
                expected,
                found,
            },
            Self::DigestNotHex { .. } => Self::DigestNotHex { line },
            Self::InvalidLength { value, .. } => Self::InvalidLength { line, value },
        }
    }
}

/// Errors from a backing store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Write rejected by {location}: {message}")]
    WriteRejected { location: String, message: String },
}

impl StoreError {
    pub fn io(location: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            location: location.into(),
            source,
        }
    }
}
