//! Error types for the Contact Store capability.
//!
//! Errors are designed for layered context using rootcause: callers wrap
//! a `ContactStoreError` in their own error type when a store failure
//! crosses a component boundary. `NotFound` is an expected case for the
//! transcript synchronizer (channels without a CRM counterpart) and is
//! branched on, not just displayed.

use deskrelay_core::ContactId;
use std::fmt;

/// Errors from Contact Store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactStoreError {
    /// No contact record exists for the id.
    NotFound { id: ContactId },
    /// The store could not be reached.
    Unavailable { reason: String },
    /// The request did not complete within the client timeout.
    Timeout,
    /// The store answered with a non-success status.
    Rejected { status: u16, reason: String },
    /// The store answered with a body this client cannot interpret.
    InvalidResponse { reason: String },
}

impl fmt::Display for ContactStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "contact not found: {id}"),
            Self::Unavailable { reason } => {
                write!(f, "contact store unavailable: {reason}")
            }
            Self::Timeout => write!(f, "contact store request timed out"),
            Self::Rejected { status, reason } => {
                write!(f, "contact store rejected request ({status}): {reason}")
            }
            Self::InvalidResponse { reason } => {
                write!(f, "invalid contact store response: {reason}")
            }
        }
    }
}

impl std::error::Error for ContactStoreError {}
