//! Shapes the vision model is asked to produce for a photo.
//!
//! The prompt requests `[{"name": "...", "quantity": n}]`, but with
//! `response_format = json_object` most models wrap the array as
//! `{"items": [...]}`. Both are accepted; anything else is rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DetectionReply {
    Bare(Vec<Value>),
    Wrapped { items: Vec<Value> },
}

impl DetectionReply {
    /// Entries that are at least objects; non-object array members are dropped.
    pub fn into_entries(self) -> Vec<DetectedEntry> {
        let raw = match self {
            DetectionReply::Bare(items) | DetectionReply::Wrapped { items } => items,
        };
        raw.into_iter()
            .filter_map(|v| serde_json::from_value::<DetectedEntry>(v).ok())
            .collect()
    }
}

/// One detected food item, before any coercion.
///
/// `quantity` stays untyped: models emit numbers, numeric strings, and
/// occasionally words like `"two"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DetectedEntry {
    #[serde(default)]
    pub name: Option<Value>,

    #[serde(default)]
    pub quantity: Option<Value>,
}

impl DetectedEntry {
    /// Trimmed name, if it is a non-blank string.
    pub fn name(&self) -> Option<&str> {
        match &self.name {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_array() {
        let reply: DetectionReply =
            serde_json::from_str(r#"[{"name":"Apple","quantity":3}]"#).expect("parse");
        let entries = reply.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name(), Some("Apple"));
    }

    #[test]
    fn accepts_items_wrapper() {
        let reply: DetectionReply =
            serde_json::from_str(r#"{"items":[{"name":"Egg","quantity":"6"}]}"#).expect("parse");
        assert_eq!(reply.into_entries().len(), 1);
    }

    #[test]
    fn rejects_other_objects() {
        let res = serde_json::from_str::<DetectionReply>(r#"{"foods":[{"name":"Egg"}]}"#);
        assert!(res.is_err());
    }

    #[test]
    fn drops_non_object_members() {
        let reply: DetectionReply =
            serde_json::from_str(r#"["Apple", {"name":"Pear"}]"#).expect("parse");
        let entries = reply.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name(), Some("Pear"));
    }
}
