use std::collections::{BTreeMap, VecDeque};

use super::event::TelemetryEvent;

#[derive(Debug, Clone, Default)]
pub struct TelemetrySnapshot {
    pub dispatch_stats: DispatchStats,
    /// Matched rules per action id.
    pub matches_per_action: BTreeMap<String, u64>,
    /// Fallback replies per conversational category.
    pub fallback_categories: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Default)]
pub struct DispatchStats {
    pub matched: u64,
    pub completed: u64,
    pub failed: u64,
    pub clarifications: u64,
    pub missing_handlers: u64,
    pub conversational: u64,
    /// Share of handled calls that never reached a rule.
    pub fallback_ratio: f64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::RuleMatched { action, .. } => {
                snap.dispatch_stats.matched += 1;
                *snap.matches_per_action.entry(action.to_string()).or_insert(0) += 1;
            }
            TelemetryEvent::ClarificationRequested { .. } => {
                snap.dispatch_stats.clarifications += 1
            }
            TelemetryEvent::HandlerCompleted { .. } => snap.dispatch_stats.completed += 1,
            TelemetryEvent::HandlerFailed { .. } => snap.dispatch_stats.failed += 1,
            TelemetryEvent::HandlerMissing { .. } => snap.dispatch_stats.missing_handlers += 1,
            TelemetryEvent::FallbackReply { category, .. } => {
                snap.dispatch_stats.conversational += 1;
                *snap.fallback_categories.entry(category.clone()).or_insert(0) += 1;
            }
        }
    }

    // Each interpret call emits exactly one RuleMatched or one FallbackReply.
    let total = snap.dispatch_stats.matched + snap.dispatch_stats.conversational;
    if total > 0 {
        snap.dispatch_stats.fallback_ratio =
            snap.dispatch_stats.conversational as f64 / total as f64;
    }

    snap
}
