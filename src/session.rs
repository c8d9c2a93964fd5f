//! The conversational loop around the engine: history, follow-up answers to
//! clarification prompts, and the exit command.

use tracing::{debug, info};

use crate::kernel::dispatcher::DispatchOutcome;
use crate::kernel::engine::Engine;

pub const EXIT_ACTION: &str = "exit";

/// Append-only log of raw inputs, oldest first.
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: Vec<String>,
}

impl CommandHistory {
    pub fn push(&mut self, utterance: &str) {
        self.entries.push(utterance.to_string());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }
}

pub struct Session {
    engine: Engine,
    history: CommandHistory,
    /// Utterance that ended in a clarification prompt; the next input completes it.
    pending: Option<String>,
    finished: bool,
}

impl Session {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            history: CommandHistory::default(),
            pending: None,
            finished: false,
        }
    }

    /// `None` for blank input, which is neither logged nor interpreted.
    pub fn handle(&mut self, input: &str) -> Option<DispatchOutcome> {
        let input = input.trim();
        if input.is_empty() || self.finished {
            return None;
        }
        self.history.push(input);

        let follow_up = self.pending.take();
        let utterance = match &follow_up {
            Some(previous) => {
                debug!("completing pending command");
                format!("{} {}", previous, input)
            }
            None => input.to_string(),
        };

        let outcome = self.engine.interpret(&utterance);
        match &outcome {
            // One follow-up per prompt; a second miss starts over.
            DispatchOutcome::Clarification { .. } if follow_up.is_some() => {
                debug!("follow-up did not complete the command");
            }
            DispatchOutcome::Clarification { .. } => self.pending = Some(utterance),
            DispatchOutcome::Dispatched { action, .. } if action.as_str() == EXIT_ACTION => {
                info!(commands = self.history.len(), "session ended");
                self.finished = true;
            }
            _ => {}
        }
        Some(outcome)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_waiting_for_clarification(&self) -> bool {
        self.pending.is_some()
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }
}
