use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::kernel::error::EngineError;

pub const DEFAULT_CAPABILITY_HINT: &str =
    "I can help you with web searches, playing videos, sending emails, creating files, and more. Just let me know what you need.";

/// Loaded once at start. Every field has a default, so a partial JSON file
/// (or none at all) is fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub assistant_name: String,
    pub user_name: String,
    /// Appended to every "unknown" fallback reply.
    pub capability_hint: String,
    /// Fixes reply sampling for reproducible runs.
    pub seed: Option<u64>,
    pub todo_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            assistant_name: "Jarvis".to_string(),
            user_name: "User".to_string(),
            capability_hint: DEFAULT_CAPABILITY_HINT.to_string(),
            seed: None,
            todo_path: PathBuf::from("assets/data/todo_list.json"),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
