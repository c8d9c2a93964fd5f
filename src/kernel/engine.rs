use std::sync::Arc;

use tracing::{debug, info, warn};

use super::dispatcher::{DispatchOutcome, Dispatcher, HandlerRegistry, HandlerReport};
use super::error::EngineError;
use super::fallback::{FallbackResponder, RandomSampler, ReplySampler};
use super::intent::{ActionId, Extraction, IntentMatcher, MatchResult, RuleTable};
use super::normalize::normalize;
use super::telemetry::event::{DispatchId, TelemetryEvent};
use super::telemetry::recorder::TelemetryRecorder;
use super::time::{Clock, SystemClock};
use crate::config::EngineConfig;

/// Command interpretation pipeline:
/// normalize -> match -> extract -> dispatch, or fall back to conversation.
///
/// Single-threaded and synchronous per utterance. The rule table and pools
/// are immutable; the sampler and the telemetry buffer are the only things
/// that change between calls, and neither affects which rule wins.
pub struct Engine {
    matcher: IntentMatcher,
    dispatcher: Dispatcher,
    responder: FallbackResponder,
    sampler: Box<dyn ReplySampler>,
    clock: Box<dyn Clock>,
    pub telemetry: TelemetryRecorder,
}

impl Engine {
    /// Standard rule table and pools, random (or seeded) sampling, system clock.
    pub fn new(config: &EngineConfig, registry: HandlerRegistry) -> Result<Self, EngineError> {
        let table = Arc::new(RuleTable::standard()?);
        let responder =
            FallbackResponder::standard(&config.assistant_name, &config.capability_hint)?;
        let sampler: Box<dyn ReplySampler> = match config.seed {
            Some(seed) => Box::new(RandomSampler::seeded(seed)),
            None => Box::new(RandomSampler::from_entropy()),
        };
        Ok(Self::from_parts(table, responder, registry, sampler, Box::new(SystemClock)))
    }

    pub fn from_parts(
        table: Arc<RuleTable>,
        responder: FallbackResponder,
        registry: HandlerRegistry,
        sampler: Box<dyn ReplySampler>,
        clock: Box<dyn Clock>,
    ) -> Self {
        for action in table.actions() {
            if !registry.contains(&action) {
                warn!(action = %action, "rule points at an action with no handler");
            }
        }
        info!(rules = table.len(), handlers = registry.len(), "engine ready");

        Self {
            matcher: IntentMatcher::new(table),
            dispatcher: Dispatcher::new(registry),
            responder,
            sampler,
            clock,
            telemetry: TelemetryRecorder::new(),
        }
    }

    pub fn with_sampler(mut self, sampler: Box<dyn ReplySampler>) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn matcher(&self) -> &IntentMatcher {
        &self.matcher
    }

    pub fn responder(&self) -> &FallbackResponder {
        &self.responder
    }

    /// Total: every input, however malformed, yields exactly one outcome.
    pub fn interpret(&mut self, utterance: &str) -> DispatchOutcome {
        let dispatch_id = DispatchId::new();
        let normalized = normalize(utterance);
        debug!(utterance = %normalized, "interpreting");

        // 1. Match
        let Some((rule_index, rule)) = self.matcher.find(&normalized) else {
            // 2b. Fallback
            let reply = self
                .responder
                .respond(&normalized, self.sampler.as_mut(), self.clock.as_ref());
            self.telemetry.record(TelemetryEvent::FallbackReply {
                dispatch_id,
                category: reply.category,
            });
            return DispatchOutcome::Conversational(reply.text);
        };

        let action = rule.action.clone();
        info!(action = %action, rule_index, "rule matched");
        self.telemetry.record(TelemetryEvent::RuleMatched {
            dispatch_id,
            action: action.clone(),
            rule_index,
        });

        // 2. Extract
        let arguments = match rule.extractor.extract(&normalized) {
            Extraction::Complete(arguments) => arguments,
            Extraction::NeedsClarification { slot } => {
                info!(action = %action, slot = %slot, "clarification needed");
                let prompt = rule.clarify_prompt.clone();
                self.telemetry.record(TelemetryEvent::ClarificationRequested {
                    dispatch_id,
                    action: action.clone(),
                    slot: slot.clone(),
                });
                return DispatchOutcome::Clarification {
                    action,
                    missing_slot: slot,
                    prompt,
                };
            }
        };

        // 3. Dispatch
        let outcome = self.dispatcher.dispatch(MatchResult {
            matched: true,
            action_id: Some(action.clone()),
            rule_index: Some(rule_index),
            arguments,
        });
        self.record_dispatch(dispatch_id, action, &outcome);
        outcome
    }

    fn record_dispatch(
        &mut self,
        dispatch_id: DispatchId,
        action: ActionId,
        outcome: &DispatchOutcome,
    ) {
        let event = match outcome {
            DispatchOutcome::Dispatched { report, .. } => match report {
                HandlerReport::Completed(_) => {
                    TelemetryEvent::HandlerCompleted { dispatch_id, action }
                }
                HandlerReport::Failed(_) => TelemetryEvent::HandlerFailed { dispatch_id, action },
            },
            DispatchOutcome::HandlerMissing(_) => {
                TelemetryEvent::HandlerMissing { dispatch_id, action }
            }
            _ => return,
        };
        self.telemetry.record(event);
    }
}
