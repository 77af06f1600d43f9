//! Shared application state.

use crate::config::ServerConfig;
use deskrelay_contacts::HttpContactStore;
use deskrelay_directory::HttpChatDirectory;
use deskrelay_provision::Provisioner;
use deskrelay_transcript::Synchronizer;

/// Long-lived state shared by all request handlers.
///
/// Both components talk to the same Contact Store; the HTTP clients are
/// cheap to clone (they share the underlying connection pool).
pub struct AppState {
    pub provisioner: Provisioner<HttpChatDirectory, HttpContactStore>,
    pub synchronizer: Synchronizer<HttpContactStore>,
}

impl AppState {
    /// Creates the application state from configuration and clients.
    pub fn new(
        config: &ServerConfig,
        directory: HttpChatDirectory,
        contacts: HttpContactStore,
    ) -> Self {
        Self {
            provisioner: Provisioner::new(
                directory,
                contacts.clone(),
                config.support.clone(),
                config.directory.api_key.clone(),
            ),
            synchronizer: Synchronizer::new(contacts),
        }
    }
}
