//! Contact Store trait and HTTP client.
//!
//! The [`ContactStore`] trait is the seam both provisioning and transcript
//! synchronization talk through. The HTTP implementation targets a CRM
//! v3-style objects API; tests substitute in-memory fakes.

use crate::error::ContactStoreError;
use async_trait::async_trait;
use deskrelay_core::ContactId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// A contact to be created in the store, fields already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewContact {
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    pub email: String,
}

/// Operations the CRM exposes to this system.
///
/// `create_contact` is not idempotent: repeated registration with the same
/// email may create a duplicate record unless the store is configured to
/// dedupe by email. Field reads and writes are keyed by the store-assigned
/// contact id and scoped to a single named field.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Creates a contact and returns its store-assigned id.
    async fn create_contact(&self, contact: &NewContact) -> Result<ContactId, ContactStoreError>;

    /// Reads one named field. `Ok(None)` means the contact exists but the
    /// field is unset; a missing contact is `Err(NotFound)`.
    async fn get_field(
        &self,
        id: &ContactId,
        field: &str,
    ) -> Result<Option<String>, ContactStoreError>;

    /// Writes one named field.
    async fn set_field(
        &self,
        id: &ContactId,
        field: &str,
        value: &str,
    ) -> Result<(), ContactStoreError>;
}

/// Configuration for the contact store HTTP client.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactStoreConfig {
    /// Private app token used as the bearer credential.
    pub api_key: String,
    /// Base URL of the CRM API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "https://api.hubapi.com".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

/// Wire body for contact create and field update: the CRM keys everything
/// under a `properties` map.
#[derive(Debug, Serialize)]
struct PropertiesRequest<T: Serialize> {
    properties: T,
}

/// Wire response for contact create and read.
#[derive(Debug, Deserialize)]
struct ContactResponse {
    id: ContactId,
    #[serde(default)]
    properties: HashMap<String, Option<String>>,
}

/// Contact Store client over a CRM v3-style objects API.
#[derive(Debug, Clone)]
pub struct HttpContactStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpContactStore {
    /// Creates a new contact store client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    /// (e.g. the API key is not a valid header value).
    pub fn new(config: &ContactStoreConfig) -> Result<Self, ContactStoreError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let bearer = format!("Bearer {}", config.api_key)
            .parse()
            .map_err(|_| ContactStoreError::Unavailable {
                reason: "API key is not a valid header value".to_string(),
            })?;
        headers.insert(reqwest::header::AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()
            .map_err(|e| ContactStoreError::Unavailable {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn contact_url(&self, id: &ContactId) -> String {
        format!("{}/crm/v3/objects/contacts/{id}", self.base_url)
    }

    async fn check(
        response: reqwest::Response,
        id: Option<&ContactId>,
    ) -> Result<reqwest::Response, ContactStoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == reqwest::StatusCode::NOT_FOUND
            && let Some(id) = id
        {
            return Err(ContactStoreError::NotFound { id: id.clone() });
        }
        let reason = response.text().await.unwrap_or_default();
        Err(ContactStoreError::Rejected {
            status: status.as_u16(),
            reason,
        })
    }
}

#[async_trait]
impl ContactStore for HttpContactStore {
    #[instrument(skip(self, contact), fields(email = %contact.email))]
    async fn create_contact(&self, contact: &NewContact) -> Result<ContactId, ContactStoreError> {
        let response = self
            .client
            .post(format!("{}/crm/v3/objects/contacts", self.base_url))
            .json(&PropertiesRequest {
                properties: contact,
            })
            .send()
            .await
            .map_err(transport_error)?;

        let created: ContactResponse = Self::check(response, None)
            .await?
            .json()
            .await
            .map_err(|e| ContactStoreError::InvalidResponse {
                reason: e.to_string(),
            })?;

        debug!(contact = %created.id, "created contact");
        Ok(created.id)
    }

    #[instrument(skip(self), fields(contact = %id, field))]
    async fn get_field(
        &self,
        id: &ContactId,
        field: &str,
    ) -> Result<Option<String>, ContactStoreError> {
        let response = self
            .client
            .get(self.contact_url(id))
            .query(&[("properties", field), ("archived", "false")])
            .send()
            .await
            .map_err(transport_error)?;

        let mut contact: ContactResponse = Self::check(response, Some(id))
            .await?
            .json()
            .await
            .map_err(|e| ContactStoreError::InvalidResponse {
                reason: e.to_string(),
            })?;

        Ok(contact.properties.remove(field).flatten())
    }

    #[instrument(skip(self, value), fields(contact = %id, field))]
    async fn set_field(
        &self,
        id: &ContactId,
        field: &str,
        value: &str,
    ) -> Result<(), ContactStoreError> {
        let response = self
            .client
            .patch(self.contact_url(id))
            .json(&PropertiesRequest {
                properties: HashMap::from([(field, value)]),
            })
            .send()
            .await
            .map_err(transport_error)?;

        Self::check(response, Some(id)).await?;
        Ok(())
    }
}

/// Maps a reqwest transport failure onto the store error taxonomy.
fn transport_error(e: reqwest::Error) -> ContactStoreError {
    if e.is_timeout() {
        ContactStoreError::Timeout
    } else {
        ContactStoreError::Unavailable {
            reason: e.to_string(),
        }
    }
}
