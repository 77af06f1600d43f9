//! Transcript synchronization.
//!
//! Consumes message delivery notifications and appends each message to
//! the contact's transcript field in the Contact Store. Synchronization
//! is best-effort by policy: the notification source treats anything but
//! acknowledgment as "redeliver", and redelivery cannot fix a CRM-side
//! failure, so every internal failure is logged and swallowed here.

use crate::error::SyncError;
use crate::lanes::ContactLanes;
use crate::notification::{DeliveryNotification, MessageRecord};
use deskrelay_contacts::{ContactStore, ContactStoreError};
use deskrelay_core::{ContactId, Result};
use tracing::{debug, error, info};

/// Contact field accumulating the chat transcript.
pub const TRANSCRIPT_FIELD: &str = "chat_transcript";

/// What a notification amounted to. Observability only; the transport is
/// acknowledged the same way regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The message was appended to the stored transcript.
    Appended,
    /// The event was not a message delivery; nothing to do.
    IgnoredEvent,
    /// No CRM record exists for the channel. Expected for internal or
    /// test channels with no contact counterpart.
    MissingContact,
    /// The read-modify-write failed; details were logged.
    Failed,
}

/// The transcript synchronizer.
///
/// Notifications for the same contact are applied strictly in arrival
/// order, holding that contact's lane across the whole read-modify-write;
/// without this, two concurrent notifications each read the same prior
/// value and the second write silently discards the first (the store's
/// field update carries no version token). Different contacts proceed in
/// parallel.
pub struct Synchronizer<C> {
    contacts: C,
    lanes: ContactLanes,
}

impl<C: ContactStore> Synchronizer<C> {
    /// Creates a new synchronizer.
    pub fn new(contacts: C) -> Self {
        Self {
            contacts,
            lanes: ContactLanes::new(),
        }
    }

    /// Processes one delivery notification.
    ///
    /// This is the component's single failure boundary: it never returns
    /// an error and never panics on capability failures, so the transport
    /// layer can always acknowledge.
    pub async fn handle(&self, notification: &DeliveryNotification) -> SyncOutcome {
        if !notification.is_message() {
            return SyncOutcome::IgnoredEvent;
        }

        let contact_id = notification.channel_id.contact_id();
        let lane = self.lanes.lane(&contact_id);
        let outcome = {
            let _serialized = lane.lock().await;
            match self.apply(&contact_id, &notification.message).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(contact = %contact_id, error = %e, "transcript sync failed");
                    SyncOutcome::Failed
                }
            }
        };
        drop(lane);
        self.lanes.collect(&contact_id);

        outcome
    }

    /// The serialized read-modify-write. Callers hold the contact's lane.
    async fn apply(
        &self,
        contact_id: &ContactId,
        message: &MessageRecord,
    ) -> Result<SyncOutcome, SyncError> {
        let prior = match self.contacts.get_field(contact_id, TRANSCRIPT_FIELD).await {
            Ok(value) => value.unwrap_or_default(),
            Err(ContactStoreError::NotFound { .. }) => {
                debug!(contact = %contact_id, "no contact for channel, skipping");
                return Ok(SyncOutcome::MissingContact);
            }
            Err(e) => return Err(SyncError::Read(e).into()),
        };

        let updated = append_entry(&prior, message);
        self.contacts
            .set_field(contact_id, TRANSCRIPT_FIELD, &updated)
            .await
            .map_err(SyncError::Write)?;

        info!(contact = %contact_id, author = %message.author.id, "appended transcript entry");
        Ok(SyncOutcome::Appended)
    }
}

/// Extends a transcript with one message entry.
///
/// The prior value is preserved verbatim; the entry format is stable
/// because the field is shared with humans and other CRM tooling.
fn append_entry(prior: &str, message: &MessageRecord) -> String {
    format!(
        "{prior}\nFROM: {}\nSENT AT: {}\nMESSAGE: {}",
        message.author.id,
        message.created_at.to_rfc3339(),
        message.text
    )
}
