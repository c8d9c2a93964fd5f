use regex::Regex;

use super::types::{ArgumentBundle, Extraction};
use crate::kernel::error::EngineError;

/// How a captured string is coerced before it lands in the bundle.
/// A value that fails coercion is treated as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Text,
    Integer,
    Float,
}

impl SlotKind {
    fn coerce(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match self {
            SlotKind::Text => Some(raw.to_string()),
            SlotKind::Integer => raw.parse::<i64>().ok().map(|n| n.to_string()),
            SlotKind::Float => raw
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| f.to_string()),
        }
    }
}

/// Removes filler phrases and keeps whatever is left as one free-text slot.
#[derive(Debug, Clone)]
pub struct StripSpec {
    pub slot: String,
    phrases: Vec<String>,
    pub required: bool,
}

/// First matching pattern wins; group 1 is the value.
#[derive(Debug, Clone)]
pub struct CaptureSpec {
    pub slot: String,
    patterns: Vec<Regex>,
    pub kind: SlotKind,
    pub required: bool,
    pub default: Option<String>,
}

/// Maps the first keyword found in the utterance to a canonical value.
/// Several keywords may share a value.
#[derive(Debug, Clone)]
pub struct KeywordSpec {
    pub slot: String,
    choices: Vec<(String, String)>,
    pub required: bool,
    pub default: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DurationSpec {
    minutes_and_seconds: Regex,
    minutes: Regex,
    seconds: Regex,
    numbers: Regex,
}

#[derive(Debug, Clone)]
pub enum Extractor {
    /// The action takes no arguments.
    Nothing,
    Strip(StripSpec),
    Capture(CaptureSpec),
    Keyword(KeywordSpec),
    Constant { slot: String, value: String },
    /// Timer durations: yields `minutes` and `seconds`.
    Duration(DurationSpec),
    /// Runs every part, merging results. The first missing slot wins.
    All(Vec<Extractor>),
}

fn compile(pattern: &str) -> Result<Regex, EngineError> {
    Regex::new(pattern).map_err(|source| EngineError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

impl Extractor {
    pub fn strip(slot: &str, phrases: &[&str]) -> Self {
        Extractor::Strip(StripSpec {
            slot: slot.to_string(),
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
            required: true,
        })
    }

    pub fn capture(slot: &str, patterns: &[&str], kind: SlotKind) -> Result<Self, EngineError> {
        let patterns = patterns
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Extractor::Capture(CaptureSpec {
            slot: slot.to_string(),
            patterns,
            kind,
            required: true,
            default: None,
        }))
    }

    pub fn keyword(slot: &str, choices: &[(&str, &str)]) -> Self {
        Extractor::Keyword(KeywordSpec {
            slot: slot.to_string(),
            choices: choices
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
            required: true,
            default: None,
        })
    }

    pub fn constant(slot: &str, value: &str) -> Self {
        Extractor::Constant {
            slot: slot.to_string(),
            value: value.to_string(),
        }
    }

    pub fn duration() -> Result<Self, EngineError> {
        Ok(Extractor::Duration(DurationSpec {
            minutes_and_seconds: compile(r"(\d+)\s*minute.*?(\d+)\s*second")?,
            minutes: compile(r"(\d+)\s*minute")?,
            seconds: compile(r"(\d+)\s*second")?,
            numbers: compile(r"\d+")?,
        }))
    }

    /// Absent value is fine; the handler decides what to do without it.
    pub fn optional(mut self) -> Self {
        match &mut self {
            Extractor::Strip(spec) => spec.required = false,
            Extractor::Capture(spec) => spec.required = false,
            Extractor::Keyword(spec) => spec.required = false,
            _ => {}
        }
        self
    }

    /// Fills the slot with `value` when nothing was extracted.
    pub fn or_default(mut self, value: &str) -> Self {
        match &mut self {
            Extractor::Capture(spec) => {
                spec.required = false;
                spec.default = Some(value.to_string());
            }
            Extractor::Keyword(spec) => {
                spec.required = false;
                spec.default = Some(value.to_string());
            }
            _ => {}
        }
        self
    }

    /// Runs against an already-normalized utterance.
    pub fn extract(&self, utterance: &str) -> Extraction {
        let mut bundle = ArgumentBundle::new();
        match self.extract_into(utterance, &mut bundle) {
            Ok(()) => Extraction::Complete(bundle),
            Err(slot) => Extraction::NeedsClarification { slot },
        }
    }

    fn extract_into(&self, utterance: &str, bundle: &mut ArgumentBundle) -> Result<(), String> {
        match self {
            Extractor::Nothing => Ok(()),
            Extractor::Strip(spec) => {
                let rest = strip_phrases(utterance, &spec.phrases);
                fill(bundle, &spec.slot, SlotKind::Text.coerce(&rest), None, spec.required)
            }
            Extractor::Capture(spec) => {
                let value = capture_first(&spec.patterns, utterance)
                    .and_then(|raw| spec.kind.coerce(&raw));
                fill(bundle, &spec.slot, value, spec.default.as_deref(), spec.required)
            }
            Extractor::Keyword(spec) => {
                let value = spec
                    .choices
                    .iter()
                    .find(|(key, _)| utterance.contains(key.as_str()))
                    .map(|(_, value)| value.clone());
                fill(bundle, &spec.slot, value, spec.default.as_deref(), spec.required)
            }
            Extractor::Constant { slot, value } => {
                bundle.insert(slot.clone(), value.clone());
                Ok(())
            }
            Extractor::Duration(spec) => {
                let (minutes, seconds) = spec.parse(utterance);
                if minutes.saturating_mul(60).saturating_add(seconds) == 0 {
                    return Err("duration".to_string());
                }
                bundle.insert("minutes", minutes.to_string());
                bundle.insert("seconds", seconds.to_string());
                Ok(())
            }
            Extractor::All(parts) => {
                for part in parts {
                    part.extract_into(utterance, bundle)?;
                }
                Ok(())
            }
        }
    }
}

fn fill(
    bundle: &mut ArgumentBundle,
    slot: &str,
    value: Option<String>,
    default: Option<&str>,
    required: bool,
) -> Result<(), String> {
    match value.or_else(|| default.map(str::to_string)) {
        Some(v) => {
            bundle.insert(slot, v);
            Ok(())
        }
        None if required => Err(slot.to_string()),
        None => Ok(()),
    }
}

fn capture_first(patterns: &[Regex], utterance: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|re| re.captures(utterance))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Removes every phrase (longest first), then collapses leftover whitespace.
///
/// Callers pass phrases in any order; sorting here keeps "search" from
/// eating the front of "search for" and leaving a stray "for".
pub fn strip_phrases<S: AsRef<str>>(utterance: &str, phrases: &[S]) -> String {
    let mut ordered: Vec<&str> = phrases
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| !p.is_empty())
        .collect();
    // Stable sort: equal-length phrases keep the caller's order.
    ordered.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut rest = utterance.to_string();
    for phrase in ordered {
        rest = rest.replace(phrase, " ");
    }
    rest.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl DurationSpec {
    /// (minutes, seconds). Zero/zero means nothing usable was said.
    fn parse(&self, text: &str) -> (u64, u64) {
        let num = |caps: &regex::Captures, i: usize| -> u64 {
            caps.get(i).and_then(|m| m.as_str().parse().ok()).unwrap_or(0)
        };

        let has_minute = text.contains("minute");
        let has_second = text.contains("second");

        if has_minute && has_second {
            self.minutes_and_seconds
                .captures(text)
                .map(|c| (num(&c, 1), num(&c, 2)))
                .unwrap_or((0, 0))
        } else if has_minute {
            self.minutes.captures(text).map(|c| (num(&c, 1), 0)).unwrap_or((0, 0))
        } else if has_second {
            self.seconds.captures(text).map(|c| (0, num(&c, 1))).unwrap_or((0, 0))
        } else {
            // Bare numbers: one means seconds, two or more mean minutes then seconds.
            let numbers: Vec<u64> = self
                .numbers
                .find_iter(text)
                .filter_map(|m| m.as_str().parse().ok())
                .collect();
            match numbers.as_slice() {
                [] => (0, 0),
                [s] => (0, *s),
                [m, s, ..] => (*m, *s),
            }
        }
    }
}
