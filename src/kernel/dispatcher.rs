use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use tracing::{info, warn};

use super::intent::types::{ActionId, ArgumentBundle, MatchResult};
use crate::handlers::todo::TodoError;

/// Failure reported by a handler. Opaque to the engine: it is logged and
/// surfaced, never retried.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("missing argument `{slot}`")]
    MissingSlot { slot: String },

    #[error("invalid value {value:?} for `{slot}`")]
    InvalidArgument { slot: String, value: String },

    #[error("{0}")]
    Failed(String),

    #[error("{0}")]
    Store(#[from] TodoError),
}

/// The seam where real-world effects plug in (browser, email, files...).
///
/// Invocation is synchronous. A handler may block on further input or
/// spawn background work it owns; the engine neither waits for nor cancels it.
pub trait ActionHandler: Send + Sync {
    /// Returns the text to speak back (may be empty).
    fn handle(&self, args: &ArgumentBundle) -> Result<String, HandlerError>;
}

impl<F> ActionHandler for F
where
    F: Fn(&ArgumentBundle) -> Result<String, HandlerError> + Send + Sync,
{
    fn handle(&self, args: &ArgumentBundle) -> Result<String, HandlerError> {
        self(args)
    }
}

/// action_id -> handler, filled once at start by the surrounding application.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<ActionId, Box<dyn ActionHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any handler already bound to `action`.
    pub fn register<H>(&mut self, action: impl Into<ActionId>, handler: H)
    where
        H: ActionHandler + 'static,
    {
        self.handlers.insert(action.into(), Box::new(handler));
    }

    pub fn get(&self, action: &ActionId) -> Option<&dyn ActionHandler> {
        self.handlers.get(action).map(|h| h.as_ref())
    }

    pub fn contains(&self, action: &ActionId) -> bool {
        self.handlers.contains_key(action)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut actions: Vec<&str> = self.handlers.keys().map(ActionId::as_str).collect();
        actions.sort_unstable();
        f.debug_struct("HandlerRegistry").field("actions", &actions).finish()
    }
}

/// What the handler said about its own run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerReport {
    Completed(String),
    Failed(String),
}

impl HandlerReport {
    pub fn is_success(&self) -> bool {
        matches!(self, HandlerReport::Completed(_))
    }

    pub fn text(&self) -> &str {
        match self {
            HandlerReport::Completed(text) | HandlerReport::Failed(text) => text,
        }
    }
}

/// Every call to `interpret` ends in exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A handler ran. Its own success or failure is in `report`.
    Dispatched {
        action: ActionId,
        arguments: ArgumentBundle,
        report: HandlerReport,
    },
    /// A rule matched but a required slot is missing; nothing was invoked.
    Clarification {
        action: ActionId,
        missing_slot: String,
        prompt: String,
    },
    /// No rule matched; the fallback responder answered.
    Conversational(String),
    /// Configuration defect: the matched rule points at an unbound action.
    HandlerMissing(ActionId),
}

impl DispatchOutcome {
    pub fn action(&self) -> Option<&ActionId> {
        match self {
            DispatchOutcome::Dispatched { action, .. }
            | DispatchOutcome::Clarification { action, .. }
            | DispatchOutcome::HandlerMissing(action) => Some(action),
            DispatchOutcome::Conversational(_) => None,
        }
    }

    /// Text for the speech layer.
    pub fn reply(&self) -> String {
        match self {
            DispatchOutcome::Dispatched { report, .. } => report.text().to_string(),
            DispatchOutcome::Clarification { prompt, .. } => prompt.clone(),
            DispatchOutcome::Conversational(text) => text.clone(),
            DispatchOutcome::HandlerMissing(action) => {
                format!("The action `{}` is not available right now.", action)
            }
        }
    }
}

pub struct Dispatcher {
    registry: HandlerRegistry,
}

impl Dispatcher {
    pub fn new(registry: HandlerRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Invokes the handler bound to a matched result.
    ///
    /// Callers only pass matched results; an unmatched one is reported as
    /// a missing handler with an empty id rather than panicking.
    pub fn dispatch(&self, result: MatchResult) -> DispatchOutcome {
        let action = match (result.matched, result.action_id) {
            (true, Some(action)) => action,
            _ => return DispatchOutcome::HandlerMissing(ActionId::new("")),
        };

        let Some(handler) = self.registry.get(&action) else {
            warn!(action = %action, "no handler registered");
            return DispatchOutcome::HandlerMissing(action);
        };

        let report = match handler.handle(&result.arguments) {
            Ok(text) => {
                info!(action = %action, "handler completed");
                HandlerReport::Completed(text)
            }
            Err(e) => {
                warn!(action = %action, error = %e, "handler failed");
                HandlerReport::Failed(e.to_string())
            }
        };

        DispatchOutcome::Dispatched {
            action,
            arguments: result.arguments,
            report,
        }
    }
}
