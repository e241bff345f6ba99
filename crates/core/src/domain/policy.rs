use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyId(pub String);

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PolicyId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The slice of the external policy record this core reads: identity, naming,
/// lifecycle status, version counter, and the effective date range. Field
/// names match the upstream row serialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    pub id: PolicyId,
    #[serde(default)]
    pub policy_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub version: i32,
    #[serde(default)]
    pub effective_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
}

impl PolicyRecord {
    pub fn new(id: impl Into<PolicyId>) -> Self {
        Self {
            id: id.into(),
            policy_name: None,
            status: None,
            version: 1,
            effective_date: None,
            expiry_date: None,
        }
    }
}

impl From<String> for PolicyId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::PolicyRecord;

    #[test]
    fn decodes_a_minimal_policy_row() {
        let record: PolicyRecord =
            serde_json::from_value(json!({"id": "pol-1", "policy_name": "Term Life 20"}))
                .expect("decode policy record");
        assert_eq!(record.id.0, "pol-1");
        assert_eq!(record.policy_name.as_deref(), Some("Term Life 20"));
        assert!(record.effective_date.is_none());
    }
}
