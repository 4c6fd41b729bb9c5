//! Intent catalog model: named intents with trigger patterns and canned responses.

use serde::{Deserialize, Serialize};

/// Intent produced when the user introduces themselves.
pub const NAME_INTRO: &str = "name_intro";
/// Intent produced when the message carries an order number.
pub const ORDER_TRACKING: &str = "order_tracking";
/// Greeting intent, also used as the last-resort keyword fallback.
pub const GREETING: &str = "greeting";
/// Fallback intent when nothing else matches.
pub const DEFAULT: &str = "default";

/// Intents checked first with whole-word subset matching, in this order.
pub const PRIORITY_INTENTS: [&str; 5] = ["return", "refund", "shipping", "payment", "contact"];

/// Patterns and responses for a single intent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentDefinition {
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub responses: Vec<String>,
}

/// Ordered collection of intents. Order is the match order for non-priority intents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntentCatalog {
    entries: Vec<(String, IntentDefinition)>,
}

impl IntentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an intent, keeping the original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, definition: IntentDefinition) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = definition,
            None => self.entries.push((name, definition)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&IntentDefinition> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IntentDefinition)> {
        self.entries.iter().map(|(n, d)| (n.as_str(), d))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn for_each_mut(&mut self, mut f: impl FnMut(&str, &mut IntentDefinition)) {
        for (name, definition) in &mut self.entries {
            f(name, definition);
        }
    }
}

impl Serialize for IntentCatalog {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, definition) in &self.entries {
            map.serialize_entry(name, definition)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for IntentCatalog {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // serde_json's preserve_order keeps the file's key order.
        let map = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut catalog = IntentCatalog::new();
        for (name, value) in map {
            let definition: IntentDefinition =
                serde_json::from_value(value).map_err(serde::de::Error::custom)?;
            catalog.insert(name, definition);
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_keeps_file_order() {
        let json = r#"{
            "zeta": {"patterns": ["z"], "responses": ["Z"]},
            "alpha": {"patterns": ["a"], "responses": ["A"]},
            "default": {"responses": ["?"]}
        }"#;
        let catalog: IntentCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.names(), vec!["zeta", "alpha", "default"]);
        assert!(catalog.get("default").unwrap().patterns.is_empty());
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut catalog = IntentCatalog::new();
        catalog.insert("a", IntentDefinition::default());
        catalog.insert("b", IntentDefinition::default());
        catalog.insert(
            "a",
            IntentDefinition {
                patterns: vec![],
                responses: vec!["new".to_string()],
            },
        );
        assert_eq!(catalog.names(), vec!["a", "b"]);
        assert_eq!(catalog.get("a").unwrap().responses, vec!["new"]);
    }

    #[test]
    fn rejects_non_object_intent() {
        let json = r#"{"greeting": "hello"}"#;
        assert!(serde_json::from_str::<IntentCatalog>(json).is_err());
    }
}
