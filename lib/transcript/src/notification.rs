//! Delivery notification wire model.
//!
//! The chat platform posts one notification per channel event. Only the
//! new-message event carries work for this system; the channel id is the
//! join key back to the CRM contact (channel id == contact id by
//! construction).

use chrono::{DateTime, Utc};
use deskrelay_core::{ChannelId, IdentityId};
use serde::Deserialize;

/// Event type of a message delivery.
pub const MESSAGE_EVENT: &str = "message.new";

/// An asynchronous, at-least-once notification of a channel event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeliveryNotification {
    /// Event discriminator; only [`MESSAGE_EVENT`] is meaningful here.
    #[serde(rename = "type")]
    pub event_type: String,
    /// The delivered message.
    pub message: MessageRecord,
    /// Channel the event happened in.
    pub channel_id: ChannelId,
}

/// A delivered chat message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageRecord {
    /// The sending identity.
    #[serde(rename = "user")]
    pub author: Author,
    /// When the platform accepted the message.
    pub created_at: DateTime<Utc>,
    /// Message body.
    pub text: String,
}

/// The message author as the platform reports it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
    pub id: IdentityId,
}

impl DeliveryNotification {
    /// Whether this notification describes a delivered message.
    #[must_use]
    pub fn is_message(&self) -> bool {
        self.event_type == MESSAGE_EVENT
    }
}
