//! Core domain types and utilities for deskrelay.
//!
//! This crate provides the foundational types shared by the provisioning
//! and transcript-synchronization components: error handling, strongly-
//! typed ids, and the chat identity model with its deterministic
//! derivation rules.

pub mod error;
pub mod id;
pub mod identity;

pub use error::Result;
pub use id::{ChannelId, ContactId, IdentityId};
pub use identity::{
    ChatIdentity, ChatRole, SupportIdentity, derive_customer_id, normalize_email, normalize_name,
};
