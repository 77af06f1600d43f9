//! Chat Directory capability for deskrelay.
//!
//! This crate provides:
//!
//! - **ChatDirectory trait**: the seam provisioning talks through
//! - **HttpChatDirectory**: reqwest client for the directory REST API
//! - **DirectoryError**: the capability's error taxonomy

pub mod client;
pub mod error;

pub use client::{ChatDirectory, DirectoryConfig, HttpChatDirectory};
pub use error::DirectoryError;
