//! Chat Directory trait and HTTP client.
//!
//! The [`ChatDirectory`] trait is the seam between provisioning and the
//! external chat platform. The HTTP implementation talks to the
//! directory's REST API; tests substitute in-memory fakes.

use crate::error::DirectoryError;
use async_trait::async_trait;
use deskrelay_core::{ChannelId, ChatIdentity, IdentityId};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Operations the chat platform exposes to this system.
///
/// `create_channel` is idempotent by key on the directory side: creating a
/// channel that already exists for the key returns the existing channel.
/// Provisioning relies on that rather than implementing its own existence
/// check. `upsert_identities` likewise updates rather than conflicts when
/// an identity id is already known.
#[async_trait]
pub trait ChatDirectory: Send + Sync {
    /// Creates or updates the given identities in a single call.
    async fn upsert_identities(&self, identities: &[ChatIdentity]) -> Result<(), DirectoryError>;

    /// Creates (or returns) the channel for `key` with the given members.
    async fn create_channel(
        &self,
        kind: &str,
        key: &ChannelId,
        members: &[IdentityId],
    ) -> Result<ChannelId, DirectoryError>;

    /// Issues a client-usable authentication token for an identity.
    async fn issue_token(&self, identity: &IdentityId) -> Result<String, DirectoryError>;
}

/// Configuration for the directory HTTP client.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    /// Public API key, sent with every request and echoed to registering
    /// clients so they can connect directly.
    pub api_key: String,
    /// Server-side API secret used as the bearer credential.
    pub api_secret: String,
    /// Base URL of the directory REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "https://chat.deskrelay.dev".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

/// Wire body for the identity upsert endpoint.
#[derive(Debug, Serialize)]
struct UpsertIdentitiesRequest<'a> {
    identities: &'a [ChatIdentity],
}

/// Wire body for the channel create endpoint.
#[derive(Debug, Serialize)]
struct CreateChannelRequest<'a> {
    members: &'a [IdentityId],
}

/// Wire response for the channel create endpoint.
#[derive(Debug, Deserialize)]
struct ChannelResponse {
    id: ChannelId,
}

/// Wire response for the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Chat Directory client over the directory's REST API.
#[derive(Debug, Clone)]
pub struct HttpChatDirectory {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpChatDirectory {
    /// Creates a new directory client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    /// (e.g. the API secret is not a valid header value).
    pub fn new(config: &DirectoryConfig) -> Result<Self, DirectoryError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let bearer = format!("Bearer {}", config.api_secret)
            .parse()
            .map_err(|_| DirectoryError::Unavailable {
                reason: "API secret is not a valid header value".to_string(),
            })?;
        headers.insert(reqwest::header::AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()
            .map_err(|e| DirectoryError::Unavailable {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, DirectoryError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let reason = response.text().await.unwrap_or_default();
        Err(DirectoryError::Rejected {
            status: status.as_u16(),
            reason: truncate(&reason),
        })
    }
}

#[async_trait]
impl ChatDirectory for HttpChatDirectory {
    #[instrument(skip(self, identities), fields(count = identities.len()))]
    async fn upsert_identities(&self, identities: &[ChatIdentity]) -> Result<(), DirectoryError> {
        let response = self
            .client
            .put(self.url("v1/identities"))
            .query(&[("api_key", self.api_key.as_str())])
            .json(&UpsertIdentitiesRequest { identities })
            .send()
            .await
            .map_err(transport_error)?;

        Self::check(response).await?;
        debug!("upserted identities");
        Ok(())
    }

    #[instrument(skip(self, members), fields(key = %key))]
    async fn create_channel(
        &self,
        kind: &str,
        key: &ChannelId,
        members: &[IdentityId],
    ) -> Result<ChannelId, DirectoryError> {
        let response = self
            .client
            .post(self.url(&format!("v1/channels/{kind}/{key}")))
            .query(&[("api_key", self.api_key.as_str())])
            .json(&CreateChannelRequest { members })
            .send()
            .await
            .map_err(transport_error)?;

        let channel: ChannelResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| DirectoryError::InvalidResponse {
                reason: e.to_string(),
            })?;

        debug!(channel = %channel.id, "channel ready");
        Ok(channel.id)
    }

    #[instrument(skip(self), fields(identity = %identity))]
    async fn issue_token(&self, identity: &IdentityId) -> Result<String, DirectoryError> {
        let response = self
            .client
            .post(self.url(&format!("v1/identities/{identity}/tokens")))
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        let token: TokenResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| DirectoryError::InvalidResponse {
                reason: e.to_string(),
            })?;

        Ok(token.token)
    }
}

/// Maps a reqwest transport failure onto the directory error taxonomy.
fn transport_error(e: reqwest::Error) -> DirectoryError {
    if e.is_timeout() {
        DirectoryError::Timeout
    } else {
        DirectoryError::Unavailable {
            reason: e.to_string(),
        }
    }
}

/// Bounds an upstream error body for inclusion in an error message.
fn truncate(body: &str) -> String {
    const MAX: usize = 500;
    if body.len() > MAX {
        let cut = body
            .char_indices()
            .take_while(|(i, _)| *i <= MAX)
            .last()
            .map_or(0, |(i, _)| i);
        format!("{}... (truncated)", &body[..cut])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskrelay_core::ContactId;

    fn config() -> DirectoryConfig {
        DirectoryConfig {
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            base_url: "https://chat.example.test/".to_string(),
            timeout_seconds: 5,
        }
    }

    #[test]
    fn client_builds_from_config() {
        let directory = HttpChatDirectory::new(&config()).expect("client");
        assert_eq!(directory.base_url, "https://chat.example.test");
    }

    #[test]
    fn url_joins_without_double_slash() {
        let directory = HttpChatDirectory::new(&config()).expect("client");
        let key = ChannelId::from(ContactId::new("9051"));
        assert_eq!(
            directory.url(&format!("v1/channels/messaging/{key}")),
            "https://chat.example.test/v1/channels/messaging/9051"
        );
    }

    #[test]
    fn upsert_request_wire_shape() {
        let identities = vec![ChatIdentity::customer("Jane", "Doe")];
        let body = serde_json::to_value(UpsertIdentitiesRequest {
            identities: &identities,
        })
        .expect("serialize");
        assert_eq!(
            body["identities"][0],
            serde_json::json!({
                "id": "jane-doe",
                "name": "jane",
                "role": "user",
            })
        );
    }

    #[test]
    fn channel_response_wire_shape() {
        let channel: ChannelResponse =
            serde_json::from_str(r#"{"id": "9051", "kind": "messaging"}"#).expect("deserialize");
        assert_eq!(channel.id, ChannelId::from(ContactId::new("9051")));
    }

    #[test]
    fn truncate_bounds_long_bodies() {
        let long = "x".repeat(2000);
        let truncated = truncate(&long);
        assert!(truncated.len() < 600);
        assert!(truncated.ends_with("(truncated)"));
    }

    #[test]
    fn default_timeout_is_thirty_seconds() {
        assert_eq!(default_timeout_seconds(), 30);
    }
}
