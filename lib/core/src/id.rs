//! Strongly-typed ID types for domain entities.
//!
//! Every id in this system is either assigned by an external service (the
//! Contact Store mints contact ids) or derived deterministically from
//! registration data (chat identity ids). They are opaque strings on the
//! wire; the newtypes exist so the two external id spaces cannot be mixed
//! up, and so the channel/contact join key is an explicit conversion
//! rather than a convention.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate a strongly-typed wrapper around an opaque string id.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an id from its string form.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for a CRM contact, assigned by the Contact Store.
    ContactId
);

define_id!(
    /// Unique identifier for a chat identity in the Chat Directory.
    ///
    /// Customer identity ids are derived deterministically from the
    /// registrant's name; see [`crate::identity::derive_customer_id`].
    IdentityId
);

define_id!(
    /// Unique identifier for a chat channel in the Chat Directory.
    ///
    /// A channel is always keyed by the CRM contact id it was provisioned
    /// for, so `ChannelId` and [`ContactId`] convert losslessly in both
    /// directions. That conversion is the join key that lets a message
    /// delivery notification be mapped back to a CRM record without a
    /// lookup.
    ChannelId
);

impl From<ContactId> for ChannelId {
    fn from(id: ContactId) -> Self {
        Self(id.0)
    }
}

impl ChannelId {
    /// Returns the CRM contact id this channel is keyed by.
    #[must_use]
    pub fn contact_id(&self) -> ContactId {
        ContactId::new(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_id_display_is_raw() {
        let id = ContactId::new("9051");
        assert_eq!(id.to_string(), "9051");
    }

    #[test]
    fn channel_id_round_trips_through_contact_id() {
        let contact = ContactId::new("9051");
        let channel = ChannelId::from(contact.clone());
        assert_eq!(channel.contact_id(), contact);
    }

    #[test]
    fn id_equality_and_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(IdentityId::new("jane-doe"));
        set.insert(IdentityId::new("jane-doe"));
        set.insert(IdentityId::new("john-doe"));

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn id_serde_is_transparent() {
        let id = ContactId::new("9051");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, r#""9051""#);
        let parsed: ContactId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, parsed);
    }
}
