//! User and marker models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use ranklist_common::{Text, UserId};

/// A contestant or team
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub name: Text,
    /// Unofficial users are left out of official-only rankings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Text>,
    /// Ids of declared markers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl User {
    pub fn is_official(&self) -> bool {
        self.official.unwrap_or(true)
    }

    /// Look up a user field by name as text.
    ///
    /// `id`, `name` and `organization` are first-class; any other scalar
    /// field in the extra map is matched by its JSON name.
    pub fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => self.id.as_ref().map(|id| id.to_string()),
            "name" => Some(self.name.fallback().to_string()),
            "organization" => self
                .organization
                .as_ref()
                .map(|org| org.fallback().to_string()),
            _ => match self.extra.get(name)? {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            },
        }
    }
}

/// A tag that can be attached to users, e.g. a "girls team" badge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub label: Text,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_defaults() {
        let user: User = serde_json::from_value(json!({ "name": "Team A" })).unwrap();
        assert!(user.is_official());
        assert!(user.id.is_none());
        assert!(user.markers.is_empty());
    }

    #[test]
    fn test_user_field_lookup() {
        let user: User = serde_json::from_value(json!({
            "id": 42,
            "name": { "fallback": "Team A", "zh-CN": "A 队" },
            "organization": "Peking University",
            "location": "Beijing",
            "seat": 17,
            "avatar": { "src": "a.png" }
        }))
        .unwrap();

        assert_eq!(user.field("id").as_deref(), Some("42"));
        assert_eq!(user.field("name").as_deref(), Some("Team A"));
        assert_eq!(user.field("organization").as_deref(), Some("Peking University"));
        assert_eq!(user.field("location").as_deref(), Some("Beijing"));
        assert_eq!(user.field("seat").as_deref(), Some("17"));
        assert_eq!(user.field("avatar"), None);
        assert_eq!(user.field("missing"), None);
    }

    #[test]
    fn test_extra_fields_round_trip() {
        let raw = json!({
            "name": "Team B",
            "official": false,
            "teamMembers": [{ "name": "alice" }]
        });
        let user: User = serde_json::from_value(raw.clone()).unwrap();
        assert!(!user.is_official());
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }
}
