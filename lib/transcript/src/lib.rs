//! Transcript synchronization for deskrelay.
//!
//! This crate provides:
//!
//! - **DeliveryNotification**: the chat platform's webhook payload
//! - **ContactLanes**: per-contact mutual exclusion for the
//!   read-modify-write against the shared transcript field
//! - **Synchronizer**: best-effort, always-acknowledged application of
//!   message notifications to the CRM transcript

pub mod error;
pub mod lanes;
pub mod notification;
pub mod sync;

pub use error::SyncError;
pub use lanes::ContactLanes;
pub use notification::{Author, DeliveryNotification, MESSAGE_EVENT, MessageRecord};
pub use sync::{SyncOutcome, Synchronizer, TRANSCRIPT_FIELD};
