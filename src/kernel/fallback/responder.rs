use tracing::debug;

use super::pools::{ResponsePool, ResponsePools};
use super::sampler::ReplySampler;
use crate::kernel::error::EngineError;
use crate::kernel::time::{spoken_date, spoken_time, Clock};

/// What a matched conversational category answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Pool(ResponsePool),
    /// Topic questions always get the same answer.
    Fixed(String),
    CurrentTime,
    CurrentDate,
}

#[derive(Debug, Clone)]
pub struct ConversationalRule {
    pub category: String,
    triggers: Vec<String>,
    pub reply: Reply,
}

impl ConversationalRule {
    pub fn new(category: &str, triggers: &[&str], reply: Reply) -> Result<Self, EngineError> {
        let triggers: Vec<String> = triggers
            .iter()
            .map(|t| t.to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        if triggers.is_empty() {
            return Err(EngineError::EmptyTriggers {
                action: category.to_string(),
            });
        }
        Ok(Self {
            category: category.to_string(),
            triggers,
            reply,
        })
    }

    fn fires_on(&self, utterance: &str) -> bool {
        self.triggers.iter().any(|t| utterance.contains(t.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackReply {
    /// Matched category, or `unknown`.
    pub category: String,
    pub text: String,
}

/// Terminal stage: always answers. Stateless across calls; the only thing
/// that moves is the sampler handed in by the caller.
#[derive(Debug, Clone)]
pub struct FallbackResponder {
    rules: Vec<ConversationalRule>,
    unknown: ResponsePool,
    capability_hint: String,
}

pub const UNKNOWN_CATEGORY: &str = "unknown";

impl FallbackResponder {
    pub fn new(
        rules: Vec<ConversationalRule>,
        unknown: ResponsePool,
        capability_hint: &str,
    ) -> Self {
        Self {
            rules,
            unknown,
            capability_hint: capability_hint.trim().to_string(),
        }
    }

    pub fn standard(assistant_name: &str, capability_hint: &str) -> Result<Self, EngineError> {
        let rules = vec![
            ConversationalRule::new(
                "greeting",
                &["hello", "hi", "hey", "greetings"],
                Reply::Pool(ResponsePools::greetings()?),
            )?,
            ConversationalRule::new(
                "farewell",
                &["bye", "goodbye", "see you", "farewell"],
                Reply::Pool(ResponsePools::farewells()?),
            )?,
            ConversationalRule::new(
                "gratitude",
                &["thank you", "thanks", "appreciate it"],
                Reply::Pool(ResponsePools::gratitude()?),
            )?,
            ConversationalRule::new(
                "apology",
                &["sorry", "apologize", "my fault"],
                Reply::Pool(ResponsePools::apologies()?),
            )?,
            ConversationalRule::new(
                "identity",
                &["who are you", "what are you", "your name"],
                Reply::Pool(ResponsePools::identity()?),
            )?,
            ConversationalRule::new(
                "capability",
                &["what can you do", "your abilities", "help me with", "capable of"],
                Reply::Pool(ResponsePools::capability()?),
            )?,
            ConversationalRule::new(
                "compliment",
                &["good job", "well done", "you're great", "you're amazing", "smart", "clever"],
                Reply::Pool(ResponsePools::compliments()?),
            )?,
            ConversationalRule::new(
                "birthday",
                &["birthday", "born"],
                Reply::Fixed(
                    "I don't have a birthday in the traditional sense. I was put together by my developers, but I don't age like humans do."
                        .to_string(),
                ),
            )?,
            // Unreachable while "identity" also claims "your name".
            ConversationalRule::new(
                "name",
                &["your name"],
                Reply::Fixed(format!("My name is {}, your personal assistant.", assistant_name)),
            )?,
            ConversationalRule::new(
                "creator",
                &["creator", "who made you"],
                Reply::Fixed(
                    "I was built by a small team of developers to help you with everyday tasks."
                        .to_string(),
                ),
            )?,
            ConversationalRule::new(
                "favorite",
                &["favorite", "like best"],
                Reply::Fixed(
                    "As an AI assistant, I don't have personal preferences, but I'm always happy to help you with whatever you need!"
                        .to_string(),
                ),
            )?,
            ConversationalRule::new(
                "home",
                &["where do you live", "where are you"],
                Reply::Fixed(
                    "I exist as a software program running on your computer. I don't have a physical presence like humans do."
                        .to_string(),
                ),
            )?,
            ConversationalRule::new(
                "age",
                &["how old", "your age"],
                Reply::Fixed(
                    "I don't have an age in the traditional sense. I'm a software program that was recently set up for you."
                        .to_string(),
                ),
            )?,
            ConversationalRule::new(
                "time",
                &["current time", "time now", "what time"],
                Reply::CurrentTime,
            )?,
            ConversationalRule::new(
                "date",
                &["today's date", "what day", "what date"],
                Reply::CurrentDate,
            )?,
        ];

        Ok(Self::new(rules, ResponsePools::unknown()?, capability_hint))
    }

    pub fn rules(&self) -> &[ConversationalRule] {
        &self.rules
    }

    pub fn unknown_pool(&self) -> &ResponsePool {
        &self.unknown
    }

    pub fn capability_hint(&self) -> &str {
        &self.capability_hint
    }

    /// Expects a normalized utterance. Never returns empty text.
    pub fn respond(
        &self,
        utterance: &str,
        sampler: &mut dyn ReplySampler,
        clock: &dyn Clock,
    ) -> FallbackReply {
        if let Some(rule) = self.rules.iter().find(|r| r.fires_on(utterance)) {
            debug!(category = %rule.category, "fallback category matched");
            let text = match &rule.reply {
                Reply::Pool(pool) => pool.sample(sampler).to_string(),
                Reply::Fixed(text) => text.clone(),
                Reply::CurrentTime => spoken_time(clock),
                Reply::CurrentDate => spoken_date(clock),
            };
            return FallbackReply {
                category: rule.category.clone(),
                text,
            };
        }

        let base = self.unknown.sample(sampler);
        let text = if self.capability_hint.is_empty() {
            base.to_string()
        } else {
            format!("{} {}", base, self.capability_hint)
        };
        FallbackReply {
            category: UNKNOWN_CATEGORY.to_string(),
            text,
        }
    }
}
