use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque name of an action handler (e.g. `web_search`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionId(String);

impl ActionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ActionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ActionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named slot -> extracted value. Values are kept as strings; numeric slots
/// are canonicalized by the extractor before they land here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentBundle {
    slots: BTreeMap<String, String>,
}

impl ArgumentBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slot: impl Into<String>, value: impl Into<String>) {
        self.slots.insert(slot.into(), value.into());
    }

    pub fn with(mut self, slot: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(slot, value);
        self
    }

    pub fn get(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).map(String::as_str)
    }

    pub fn get_int(&self, slot: &str) -> Option<i64> {
        self.get(slot).and_then(|v| v.parse().ok())
    }

    pub fn get_float(&self, slot: &str) -> Option<f64> {
        self.get(slot).and_then(|v| v.parse().ok())
    }

    pub fn contains(&self, slot: &str) -> bool {
        self.slots.contains_key(slot)
    }

    pub fn merge(&mut self, other: ArgumentBundle) {
        self.slots.extend(other.slots);
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for ArgumentBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{}={:?}", k, v)).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// Result of running a rule's extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Complete(ArgumentBundle),
    /// A required slot could not be produced. Never dispatched.
    NeedsClarification { slot: String },
}

/// Output of the Intent Matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub matched: bool,
    pub action_id: Option<ActionId>,
    /// Position of the winning rule in the table.
    pub rule_index: Option<usize>,
    pub arguments: ArgumentBundle,
}

impl MatchResult {
    pub fn unmatched() -> Self {
        Self {
            matched: false,
            action_id: None,
            rule_index: None,
            arguments: ArgumentBundle::new(),
        }
    }
}
