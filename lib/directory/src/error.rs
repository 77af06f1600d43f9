//! Error types for the Chat Directory capability.
//!
//! Errors are designed for layered context using rootcause: callers wrap
//! a `DirectoryError` in their own error type when a directory failure
//! crosses a component boundary.

use std::fmt;

/// Errors from Chat Directory operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The directory could not be reached.
    Unavailable { reason: String },
    /// The request did not complete within the client timeout.
    Timeout,
    /// The directory answered with a non-success status.
    Rejected { status: u16, reason: String },
    /// The directory answered with a body this client cannot interpret.
    InvalidResponse { reason: String },
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { reason } => {
                write!(f, "chat directory unavailable: {reason}")
            }
            Self::Timeout => write!(f, "chat directory request timed out"),
            Self::Rejected { status, reason } => {
                write!(f, "chat directory rejected request ({status}): {reason}")
            }
            Self::InvalidResponse { reason } => {
                write!(f, "invalid chat directory response: {reason}")
            }
        }
    }
}

impl std::error::Error for DirectoryError {}
