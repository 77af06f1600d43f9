//! Contact Store (CRM) capability for deskrelay.
//!
//! This crate provides:
//!
//! - **ContactStore trait**: create contacts, read and write named fields
//! - **HttpContactStore**: reqwest client for a CRM v3-style objects API
//! - **ContactStoreError**: the capability's error taxonomy

pub mod client;
pub mod error;

pub use client::{ContactStore, ContactStoreConfig, HttpContactStore, NewContact};
pub use error::ContactStoreError;
