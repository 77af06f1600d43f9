//! Error types for registration provisioning.
//!
//! Errors are designed for layered context using rootcause: the HTTP
//! layer branches on the variant to pick a status code, so the taxonomy
//! separates caller mistakes (`Validation`) from upstream failures.

use deskrelay_contacts::ContactStoreError;
use deskrelay_directory::DirectoryError;
use std::fmt;

/// Errors from the registration orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionError {
    /// A registration field was empty after normalization.
    Validation { field: &'static str },
    /// The Contact Store failed.
    ContactStore(ContactStoreError),
    /// The Chat Directory failed.
    Directory(DirectoryError),
}

impl fmt::Display for ProvisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { field } => {
                write!(f, "registration field '{field}' must not be empty")
            }
            Self::ContactStore(e) => write!(f, "contact store error: {e}"),
            Self::Directory(e) => write!(f, "chat directory error: {e}"),
        }
    }
}

impl std::error::Error for ProvisionError {}

impl From<ContactStoreError> for ProvisionError {
    fn from(e: ContactStoreError) -> Self {
        Self::ContactStore(e)
    }
}

impl From<DirectoryError> for ProvisionError {
    fn from(e: DirectoryError) -> Self {
        Self::Directory(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_names_the_field() {
        let err = ProvisionError::Validation { field: "firstName" };
        assert!(err.to_string().contains("firstName"));
    }

    #[test]
    fn wrapped_errors_keep_their_detail() {
        let err = ProvisionError::Directory(DirectoryError::Timeout);
        assert!(err.to_string().contains("timed out"));
    }
}
