//! Error types for the reconciliation engine

use thiserror::Error;

/// Fatal conditions raised while reconciling settings
///
/// Every variant aborts the whole run; nothing here is retried.
#[derive(Error, Debug)]
pub enum Error {
    /// Descriptor has no way to be written (table defect)
    #[error("setting '{label}' has neither a variable name nor a setter")]
    MissingWriter { label: String },

    /// The store or setter rejected the write
    #[error("failed to update '{label}'")]
    WriteFailed {
        label: String,
        #[source]
        source: anyhow::Error,
    },

    /// Write was accepted but a re-read still differs from the expected value
    #[error("failed to update '{label}': value is '{actual}' after update, expected '{expected}'")]
    NotConverged {
        label: String,
        actual: String,
        expected: String,
    },
}

impl Error {
    /// Label of the setting that caused the failure
    pub fn label(&self) -> &str {
        match self {
            Self::MissingWriter { label }
            | Self::WriteFailed { label, .. }
            | Self::NotConverged { label, .. } => label,
        }
    }

    /// Returns true if the error points at a broken descriptor table
    pub fn is_table_defect(&self) -> bool {
        matches!(self, Self::MissingWriter { .. })
    }
}

/// Result type for reconciliation operations
pub type Result<T> = std::result::Result<T, Error>;
