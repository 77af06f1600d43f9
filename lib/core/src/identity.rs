//! Chat identity model and deterministic identity derivation.
//!
//! The customer identity id is a pure function of the registrant's
//! first/last name: normalize each part (trim, collapse internal
//! whitespace to `_`, lower-case) and join the pair with `-`. The same
//! name pair always yields the same id, which is what makes registration
//! safe to retry against the directory's upsert semantics.

use crate::id::IdentityId;
use serde::{Deserialize, Serialize};

/// The role a chat identity plays in a support channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    /// A registered customer.
    #[serde(rename = "user")]
    Customer,
    /// The pooled support desk.
    #[serde(rename = "admin")]
    Support,
}

/// An identity in the Chat Directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatIdentity {
    /// Directory id; derived for customers, configured for support.
    pub id: IdentityId,
    /// Display name shown in the chat client.
    #[serde(rename = "name")]
    pub display_name: String,
    /// Directory role.
    pub role: ChatRole,
}

impl ChatIdentity {
    /// Builds the customer identity for a registrant.
    ///
    /// Both the id and the display name come from the normalized names,
    /// so re-registering the same person produces an identical identity.
    #[must_use]
    pub fn customer(first_name: &str, last_name: &str) -> Self {
        Self {
            id: derive_customer_id(first_name, last_name),
            display_name: normalize_name(first_name),
            role: ChatRole::Customer,
        }
    }
}

/// The process-wide singleton support identity.
///
/// One support identity is shared across every customer channel; it is
/// configuration, not something provisioning derives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SupportIdentity {
    /// Directory id of the support desk.
    pub id: IdentityId,
    /// Display name shown in the chat client.
    pub display_name: String,
}

impl SupportIdentity {
    /// Returns the directory identity for the support desk.
    #[must_use]
    pub fn identity(&self) -> ChatIdentity {
        ChatIdentity {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            role: ChatRole::Support,
        }
    }
}

/// Normalizes a name for identity derivation: trim, collapse each run of
/// internal whitespace to a single `_`, lower-case.
///
/// Whitespace is not a valid identity-key character, so `"Jane  Doe"`
/// becomes `"jane_doe"`. Returns an empty string for all-whitespace input;
/// callers treat that as a validation failure.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Normalizes an email address: trim and lower-case.
#[must_use]
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Derives the customer identity id from a first/last name pair.
///
/// `("Jane", "Doe")` → `jane-doe`; `("Jane  Doe", "Smith")` →
/// `jane_doe-smith`. Pure and total: no two registrations for the same
/// name pair may produce divergent ids.
#[must_use]
pub fn derive_customer_id(first_name: &str, last_name: &str) -> IdentityId {
    IdentityId::new(format!(
        "{}-{}",
        normalize_name(first_name),
        normalize_name(last_name)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        assert_eq!(
            derive_customer_id("Jane", "Doe"),
            derive_customer_id("Jane", "Doe")
        );
        assert_eq!(derive_customer_id("Jane", "Doe").as_str(), "jane-doe");
    }

    #[test]
    fn internal_whitespace_collapses_to_underscores() {
        assert_eq!(
            derive_customer_id("Jane  Doe", "Smith").as_str(),
            "jane_doe-smith"
        );
        assert_eq!(
            derive_customer_id(" Jane\tDoe ", "Smith").as_str(),
            "jane_doe-smith"
        );
    }

    #[test]
    fn derivation_lower_cases() {
        assert_eq!(derive_customer_id("JANE", "DOE").as_str(), "jane-doe");
    }

    #[test]
    fn all_whitespace_name_normalizes_to_empty() {
        assert_eq!(normalize_name("   "), "");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn email_normalization() {
        assert_eq!(normalize_email(" Jane.Doe@Example.COM "), "jane.doe@example.com");
    }

    #[test]
    fn customer_identity_uses_normalized_first_name_for_display() {
        let identity = ChatIdentity::customer("Jane  Doe", "Smith");
        assert_eq!(identity.id.as_str(), "jane_doe-smith");
        assert_eq!(identity.display_name, "jane_doe");
        assert_eq!(identity.role, ChatRole::Customer);
    }

    #[test]
    fn support_identity_is_reused_verbatim() {
        let support = SupportIdentity {
            id: IdentityId::new("support-desk"),
            display_name: "Support".to_string(),
        };
        let identity = support.identity();
        assert_eq!(identity.id.as_str(), "support-desk");
        assert_eq!(identity.role, ChatRole::Support);
    }

    #[test]
    fn chat_role_wire_names() {
        assert_eq!(
            serde_json::to_string(&ChatRole::Customer).expect("serialize"),
            r#""user""#
        );
        assert_eq!(
            serde_json::to_string(&ChatRole::Support).expect("serialize"),
            r#""admin""#
        );
    }
}
