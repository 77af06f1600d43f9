//! Registration orchestration.
//!
//! Turns a registration request into a CRM contact, a paired set of chat
//! identities, a support channel, and an issued token. Every step talks
//! through the capability traits, so the orchestrator itself is pure
//! sequencing: validate, create the contact, derive identities, upsert
//! them, create the channel keyed by the contact id, issue the token.

use crate::error::ProvisionError;
use deskrelay_contacts::{ContactStore, NewContact};
use deskrelay_core::{
    ChannelId, ChatIdentity, ContactId, IdentityId, SupportIdentity, normalize_email,
    normalize_name,
};
use deskrelay_directory::ChatDirectory;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Channel kind used for customer/support conversations.
const CHANNEL_KIND: &str = "messaging";

/// An inbound registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// The provisioned result returned to the registering client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Derived customer identity id.
    pub customer_id: IdentityId,
    /// Token the customer's chat client authenticates with.
    pub customer_token: String,
    /// Channel shared with the support desk; equals the CRM contact id.
    pub channel_id: ChannelId,
    /// Public directory API key the chat client connects with.
    pub directory_api_key: String,
}

/// The registration orchestrator.
///
/// Failure partway through leaves no compensation behind: a contact
/// created before a later step fails stays in the store (it is logged so
/// operators can reconcile). Retries belong to the caller; re-running a
/// registration is safe on the directory side because identity ids are
/// deterministic, upserts update in place, and channel creation is
/// idempotent by key.
pub struct Provisioner<D, C> {
    directory: D,
    contacts: C,
    support: SupportIdentity,
    directory_api_key: String,
}

impl<D: ChatDirectory, C: ContactStore> Provisioner<D, C> {
    /// Creates a new orchestrator.
    pub fn new(
        directory: D,
        contacts: C,
        support: SupportIdentity,
        directory_api_key: String,
    ) -> Self {
        Self {
            directory,
            contacts,
            support,
            directory_api_key,
        }
    }

    /// Registers a customer end to end.
    ///
    /// # Errors
    ///
    /// Fails on empty-after-normalization input and on the first failing
    /// capability call; no step is retried and nothing already created is
    /// rolled back.
    pub async fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<Registration, ProvisionError> {
        let first_name = normalize_name(&request.first_name);
        let last_name = normalize_name(&request.last_name);
        let email = normalize_email(&request.email);

        if first_name.is_empty() {
            return Err(ProvisionError::Validation { field: "firstName" });
        }
        if last_name.is_empty() {
            return Err(ProvisionError::Validation { field: "lastName" });
        }
        if email.is_empty() {
            return Err(ProvisionError::Validation { field: "email" });
        }

        let contact_id = self
            .contacts
            .create_contact(&NewContact {
                first_name,
                last_name,
                email,
            })
            .await?;

        let customer = ChatIdentity::customer(&request.first_name, &request.last_name);
        let (channel_id, customer_token) = match self.provision_chat(&customer, &contact_id).await {
            Ok(provisioned) => provisioned,
            Err(e) => {
                // The contact has no chat identity and will not be
                // retried here; operators reconcile from this log line.
                warn!(contact = %contact_id, error = %e, "contact left orphaned by failed chat provisioning");
                return Err(e.into());
            }
        };

        info!(customer = %customer.id, channel = %channel_id, "registered customer");

        Ok(Registration {
            customer_id: customer.id,
            customer_token,
            channel_id,
            directory_api_key: self.directory_api_key.clone(),
        })
    }

    /// Directory half of registration: identities, channel, token.
    async fn provision_chat(
        &self,
        customer: &ChatIdentity,
        contact_id: &ContactId,
    ) -> Result<(ChannelId, String), deskrelay_directory::DirectoryError> {
        self.directory
            .upsert_identities(&[customer.clone(), self.support.identity()])
            .await?;

        let members = [customer.id.clone(), self.support.id.clone()];
        let key = ChannelId::from(contact_id.clone());
        let channel_id = self
            .directory
            .create_channel(CHANNEL_KIND, &key, &members)
            .await?;

        let token = self.directory.issue_token(&customer.id).await?;

        Ok((channel_id, token))
    }
}
