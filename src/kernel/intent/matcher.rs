use std::sync::Arc;

use super::rules::{Rule, RuleTable};

/// First-match-wins over the rule table. Deterministic: same utterance,
/// same table, same rule.
#[derive(Debug, Clone)]
pub struct IntentMatcher {
    table: Arc<RuleTable>,
}

impl IntentMatcher {
    pub fn new(table: Arc<RuleTable>) -> Self {
        Self { table }
    }

    /// Expects a normalized utterance. Returns the winning rule and its index.
    pub fn find(&self, utterance: &str) -> Option<(usize, &Rule)> {
        self.table
            .rules()
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.fires_on(utterance))
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }
}
