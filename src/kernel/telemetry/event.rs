use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::kernel::intent::types::ActionId;

/// One id per `interpret` call; ties the events of a single dispatch together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DispatchId(pub Uuid);

impl DispatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DispatchId {
    fn default() -> Self {
        Self::new()
    }
}

// Allowed: IDs, rule positions, category names, slot NAMES
// Forbidden: utterance text, slot values, reply text

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    RuleMatched {
        dispatch_id: DispatchId,
        action: ActionId,
        rule_index: usize,
    },

    ClarificationRequested {
        dispatch_id: DispatchId,
        action: ActionId,
        slot: String,
    },

    HandlerCompleted {
        dispatch_id: DispatchId,
        action: ActionId,
    },

    HandlerFailed {
        dispatch_id: DispatchId,
        action: ActionId,
    },

    HandlerMissing {
        dispatch_id: DispatchId,
        action: ActionId,
    },

    FallbackReply {
        dispatch_id: DispatchId,
        category: String,
    },
}

impl TelemetryEvent {
    pub fn dispatch_id(&self) -> DispatchId {
        match self {
            TelemetryEvent::RuleMatched { dispatch_id, .. }
            | TelemetryEvent::ClarificationRequested { dispatch_id, .. }
            | TelemetryEvent::HandlerCompleted { dispatch_id, .. }
            | TelemetryEvent::HandlerFailed { dispatch_id, .. }
            | TelemetryEvent::HandlerMissing { dispatch_id, .. }
            | TelemetryEvent::FallbackReply { dispatch_id, .. } => *dispatch_id,
        }
    }
}
