//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables
//! (`DIRECTORY__API_KEY`, `CONTACTS__API_KEY`, ...). Secrets are loaded
//! once at process start and are read-only afterwards.

use deskrelay_contacts::ContactStoreConfig;
use deskrelay_core::{IdentityId, SupportIdentity};
use deskrelay_directory::DirectoryConfig;
use serde::Deserialize;

/// Server configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Chat Directory credentials and endpoint.
    pub directory: DirectoryConfig,

    /// Contact Store credentials and endpoint.
    pub contacts: ContactStoreConfig,

    /// The singleton support identity every customer channel shares.
    #[serde(default = "default_support")]
    pub support: SupportIdentity,
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_support() -> SupportIdentity {
    SupportIdentity {
        id: IdentityId::new("support-desk"),
        display_name: "Support".to_string(),
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
