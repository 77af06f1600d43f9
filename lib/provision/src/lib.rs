//! Registration orchestration for deskrelay.
//!
//! This crate provides:
//!
//! - **Provisioner**: the registration orchestrator, generic over the
//!   Chat Directory and Contact Store capability traits
//! - **RegistrationRequest / Registration**: the registration contract
//! - **ProvisionError**: validation vs. upstream failure taxonomy

pub mod error;
pub mod orchestrator;

pub use error::ProvisionError;
pub use orchestrator::{Provisioner, Registration, RegistrationRequest};
