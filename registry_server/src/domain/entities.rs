use serde::{Deserialize, Serialize};
use serde_json::Value;

// User record held by the registry. Field values are stored exactly as the
// client sent them (any JSON value, null included); missing fields stay absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
}

// Fields supplied by a create request; no validation is applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewUser {
    pub name: Option<Value>,
    pub email: Option<Value>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(Value::String(name.into())),
            email: Some(Value::String(email.into())),
        }
    }
}

/// How the registry assigns ids to newly created users.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdStrategy {
    /// `len + 1` at creation time. Ids repeat after a delete followed by a create.
    #[default]
    CollectionLength,
    /// One past the highest id ever issued. Ids are never reused.
    Monotonic,
}

impl IdStrategy {
    // Parse the env/config spelling; unknown values yield None.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "length" | "collection_length" => Some(Self::CollectionLength),
            "monotonic" => Some(Self::Monotonic),
            _ => None,
        }
    }

    // Compute the next id given the current collection size and the highest id issued so far.
    pub fn next_id(self, current_len: usize, highest_issued: u64) -> u64 {
        match self {
            Self::CollectionLength => current_len as u64 + 1,
            Self::Monotonic => highest_issued + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_user_has_no_name_then_name_is_omitted_from_json() {
        let user = User {
            id: 3,
            name: None,
            email: Some(Value::from("x@example.com")),
        };

        let json = serde_json::to_value(&user).expect("expected user to serialize");

        assert_eq!(json, serde_json::json!({"id": 3, "email": "x@example.com"}));
    }

    #[test]
    fn when_user_field_holds_null_then_null_is_serialized() {
        let user = User {
            id: 1,
            name: Some(Value::Null),
            email: Some(Value::from(5)),
        };

        let json = serde_json::to_value(&user).expect("expected user to serialize");

        assert_eq!(json, serde_json::json!({"id": 1, "name": null, "email": 5}));
    }

    #[test]
    fn when_strategy_is_collection_length_then_next_id_ignores_history() {
        assert_eq!(IdStrategy::CollectionLength.next_id(1, 2), 2);
    }

    #[test]
    fn when_strategy_is_monotonic_then_next_id_follows_highest_issued() {
        assert_eq!(IdStrategy::Monotonic.next_id(1, 2), 3);
    }

    #[test]
    fn when_strategy_name_is_unknown_then_parse_returns_none() {
        assert_eq!(IdStrategy::parse("Monotonic"), Some(IdStrategy::Monotonic));
        assert_eq!(IdStrategy::parse(" length "), Some(IdStrategy::CollectionLength));
        assert_eq!(IdStrategy::parse("uuid"), None);
    }
}
