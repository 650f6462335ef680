use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// Token claims payload.
///
/// Carries the authenticated principal (`user_id`) and the validity window
/// (`iat`/`exp`, Unix timestamps in UTC seconds). `iat` and `exp` are stamped
/// by the token service at issuance; additional fields round-trip through the
/// flattened `extra` map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Authenticated account identifier (string form)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Additional custom fields (flattened into the token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims identifying a user account.
    ///
    /// The validity window is stamped later by the token service.
    pub fn for_user(user_id: impl ToString) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
            ..Self::default()
        }
    }

    /// Add a custom field.
    pub fn with_field(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Check whether the validity window has elapsed.
    ///
    /// A token is valid only while the current time is strictly before `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| exp <= current_timestamp)
    }
}

impl Default for Claims {
    fn default() -> Self {
        Self {
            user_id: None,
            iat: None,
            exp: None,
            extra: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_user() {
        let claims = Claims::for_user("user123");
        assert_eq!(claims.user_id, Some("user123".to_string()));
        assert!(claims.iat.is_none());
        assert!(claims.exp.is_none());
    }

    #[test]
    fn test_with_field() {
        let claims = Claims::for_user("user123").with_field("role", "moderator");
        assert_eq!(
            claims.extra.get("role").and_then(|v| v.as_str()),
            Some("moderator")
        );
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let claims = Claims::new();
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims {
            exp: Some(1000),
            ..Claims::new()
        };

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000)); // window is now < exp
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_is_expired_without_exp_claim() {
        let claims = Claims::new();
        assert!(!claims.is_expired(9_999_999_999));
    }
}
