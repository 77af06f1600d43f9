//! Error types for transcript synchronization.
//!
//! Errors are designed for layered context using rootcause: the
//! synchronizer wraps a store failure with the phase it happened in, and
//! the failure boundary in [`crate::sync`] logs the report instead of
//! letting it cross the component boundary.

use deskrelay_contacts::ContactStoreError;
use std::fmt;

/// Errors from a single synchronization attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Reading the stored transcript failed.
    Read(ContactStoreError),
    /// Writing the updated transcript failed.
    Write(ContactStoreError),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(e) => write!(f, "transcript read failed: {e}"),
            Self::Write(e) => write!(f, "transcript write failed: {e}"),
        }
    }
}

impl std::error::Error for SyncError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_phase() {
        let err = SyncError::Write(ContactStoreError::Timeout);
        assert!(err.to_string().contains("write failed"));
        assert!(err.to_string().contains("timed out"));
    }
}
