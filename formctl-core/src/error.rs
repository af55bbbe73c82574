/// Structured error types for formctl-core.
///
/// Library consumers get `FormError`; the `formctl` binary wraps these in
/// `anyhow` at the edges.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for formctl-core operations
#[derive(Error, Debug)]
pub enum FormError {
    /// An option value carried the wire delimiter
    #[error("option '{value}' contains the ',' delimiter")]
    OptionContainsDelimiter { value: String },

    /// A lone empty option encodes to "" and reads back as no options
    #[error("a single empty option cannot be stored; use an empty option set")]
    LoneEmptyOption,

    /// I/O operation failed
    #[error("I/O error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for formctl-core operations
pub type Result<T> = std::result::Result<T, FormError>;

impl FormError {
    /// Create an I/O error tied to a path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
