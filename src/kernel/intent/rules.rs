use super::extractor::{Extractor, SlotKind};
use super::types::ActionId;
use crate::kernel::error::EngineError;

/// One (predicate, extractor, action) binding. Immutable once built.
#[derive(Debug, Clone)]
pub struct Rule {
    pub action: ActionId,
    /// Any one of these as a substring fires the rule. Never empty.
    triggers: Vec<String>,
    /// When non-empty, at least one of these must also be present.
    gate: Vec<String>,
    pub extractor: Extractor,
    /// Spoken back when a required slot is missing.
    pub clarify_prompt: String,
}

impl Rule {
    pub fn new(action: &str, triggers: &[&str], extractor: Extractor) -> Result<Self, EngineError> {
        let triggers: Vec<String> = triggers
            .iter()
            .map(|t| t.to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        if triggers.is_empty() {
            return Err(EngineError::EmptyTriggers {
                action: action.to_string(),
            });
        }
        Ok(Self {
            action: ActionId::new(action),
            triggers,
            gate: Vec::new(),
            extractor,
            clarify_prompt: "Could you give me a bit more detail?".to_string(),
        })
    }

    pub fn gated_by(mut self, gate: &[&str]) -> Self {
        self.gate = gate.iter().map(|g| g.to_lowercase()).collect();
        self
    }

    pub fn clarify(mut self, prompt: &str) -> Self {
        self.clarify_prompt = prompt.to_string();
        self
    }

    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    /// Plain substring containment. "hi" fires inside "history"; table
    /// order is what keeps such collisions in check.
    pub fn fires_on(&self, utterance: &str) -> bool {
        let triggered = self.triggers.iter().any(|t| utterance.contains(t.as_str()));
        triggered
            && (self.gate.is_empty() || self.gate.iter().any(|g| utterance.contains(g.as_str())))
    }
}

/// Ordered rules. Position is priority: earlier rules shadow later ones.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Distinct action ids in first-appearance order.
    pub fn actions(&self) -> Vec<ActionId> {
        let mut seen: Vec<ActionId> = Vec::new();
        for rule in &self.rules {
            if !seen.contains(&rule.action) {
                seen.push(rule.action.clone());
            }
        }
        seen
    }

    /// The assistant's command set.
    ///
    /// Ordering notes:
    /// - exit/greeting/time/date come first and win over everything else.
    /// - the gated `calculate` rule only takes arithmetic; the specific math
    ///   rules follow, then the ungated `calculate` catch-all for the rest
    ///   of the math vocabulary ("what is" included).
    /// - exact workflow phrases ("send an email") precede the broad
    ///   keywords ("game", "timer", "news").
    pub fn standard() -> Result<Self, EngineError> {
        const MATH: &[&str] = &["calculate", "what is", "solve", "computation"];
        const ARITHMETIC: &[&str] = &["plus", "minus", "times", "divided by", "multiplied by"];

        let rules = vec![
            Rule::new("exit", &["bye", "goodbye", "exit", "quit"], Extractor::Nothing)?,
            Rule::new("greet", &["hello", "hi", "hey"], Extractor::Nothing)?,
            Rule::new("tell_time", &["what time", "current time"], Extractor::Nothing)?,
            Rule::new("tell_date", &["what date", "what day", "current date"], Extractor::Nothing)?,
            // Math
            Rule::new("calculate", MATH, Extractor::strip("expression", MATH))?
                .gated_by(ARITHMETIC)
                .clarify("What would you like me to calculate?"),
            Rule::new(
                "factorial",
                &["factorial"],
                Extractor::capture(
                    "n",
                    &[r"factorial\s+(\d+)", r"factorial\s+of\s+(\d+)"],
                    SlotKind::Integer,
                )?,
            )?
            .clarify("Please specify a number for the factorial calculation."),
            Rule::new(
                "binary_convert",
                &["binary"],
                Extractor::capture(
                    "n",
                    &[r"binary\s+of\s+(\d+)", r"binary\s+(\d+)"],
                    SlotKind::Integer,
                )?,
            )?
            .clarify("Please specify a number for the binary conversion."),
            Rule::new(
                "trigonometry",
                &["sin", "cos", "tangent"],
                Extractor::All(vec![
                    Extractor::keyword(
                        "function",
                        &[("sin", "sin"), ("cos", "cos"), ("tan", "tan")],
                    ),
                    Extractor::capture(
                        "angle",
                        &[r"(?:sine|sin|cosine|cos|tangent|tan)\s+(?:of\s+)?(\d+)"],
                        SlotKind::Integer,
                    )?,
                    Extractor::keyword("unit", &[("degree", "degrees")]).or_default("radians"),
                ]),
            )?
            .clarify("Please specify an angle for the calculation."),
            Rule::new(
                "logarithm",
                &["log"],
                Extractor::All(vec![
                    Extractor::capture(
                        "n",
                        &[r"log\s+of\s+(\d+)", r"log\s+(\d+)"],
                        SlotKind::Float,
                    )?,
                    Extractor::capture("base", &[r"base\s+(\d+)"], SlotKind::Float)?.optional(),
                ]),
            )?
            .clarify("Please specify a number for the logarithm calculation."),
            Rule::new(
                "square_root",
                &["square root"],
                Extractor::capture(
                    "n",
                    &[r"square\s+root\s+of\s+(\d+)", r"square\s+root\s+(\d+)"],
                    SlotKind::Float,
                )?,
            )?
            .clarify("Please specify a number for the square root calculation."),
            Rule::new(
                "bit_shift",
                &["right shift", "left shift"],
                Extractor::All(vec![
                    Extractor::keyword(
                        "direction",
                        &[("right shift", "right"), ("left shift", "left")],
                    ),
                    Extractor::capture(
                        "n",
                        &[r"(?:right|left)\s+shift\s+(\d+)"],
                        SlotKind::Integer,
                    )?,
                    Extractor::capture("positions", &[r"by\s+(\d+)"], SlotKind::Integer)?
                        .or_default("1"),
                ]),
            )?
            .clarify("Please specify a number to shift."),
            Rule::new("calculate", MATH, Extractor::strip("expression", MATH))?
                .clarify("I couldn't understand what calculation you want me to perform."),
            // Browser
            Rule::new(
                "web_search",
                &["search for", "search", "look up", "find", "google"],
                Extractor::strip("query", &["search for", "search", "look up", "find", "google"]),
            )?
            .clarify("What would you like me to search for?"),
            Rule::new(
                "wikipedia",
                &["wikipedia", "who is"],
                Extractor::strip("query", &["wikipedia", "who is"]),
            )?
            .clarify("What would you like me to look up on Wikipedia?"),
            Rule::new(
                "play_youtube",
                &["youtube"],
                Extractor::strip("query", &["play", "on youtube", "youtube"]),
            )?
            .gated_by(&["play"])
            .clarify("What would you like me to play on YouTube?"),
            Rule::new(
                "show_images",
                &["images of", "pictures of"],
                Extractor::strip("query", &["show me", "show", "images of", "pictures of"]),
            )?
            .clarify("What would you like to see images of?"),
            Rule::new(
                "directions",
                &["directions"],
                Extractor::All(vec![
                    Extractor::capture("origin", &[r"from\s+(.+?)\s+to\s+"], SlotKind::Text)?
                        .optional(),
                    Extractor::capture("destination", &[r"\bto\s+(.+)$"], SlotKind::Text)?,
                ]),
            )?
            .clarify("What is your destination?"),
            Rule::new(
                "open_maps",
                &["open maps", "show on map", "where is"],
                Extractor::strip(
                    "location",
                    &["open maps for", "open maps", "show on map", "where is"],
                ),
            )?
            .clarify("Which location should I open on the map?"),
            // Communication
            Rule::new("send_email", &["send an email", "send email"], Extractor::Nothing)?,
            Rule::new(
                "send_whatsapp",
                &["send a whatsapp message", "send whatsapp"],
                Extractor::Nothing,
            )?,
            // Files
            Rule::new(
                "create_file",
                &["create a file", "create file", "new file"],
                Extractor::keyword(
                    "file_type",
                    &[
                        ("python", "python"),
                        ("java", "java"),
                        ("html", "html"),
                        ("text", "text"),
                        ("txt", "text"),
                    ],
                ),
            )?
            .clarify("What type of file would you like to create? Python, Java, HTML, or Text?"),
            Rule::new(
                "create_html_project",
                &["create a html project", "create html project"],
                Extractor::Nothing,
            )?,
            // System
            Rule::new("system_info", &["system information", "system info"], Extractor::Nothing)?,
            Rule::new("battery", &["battery"], Extractor::Nothing)?,
            Rule::new(
                "take_photo",
                &["take a selfie", "click a photo", "take photo"],
                Extractor::Nothing,
            )?,
            Rule::new("screenshot", &["take a screenshot", "screenshot"], Extractor::Nothing)?,
            Rule::new(
                "adjust_volume",
                &["increase volume", "volume up"],
                Extractor::constant("direction", "up"),
            )?,
            Rule::new(
                "adjust_volume",
                &["decrease volume", "volume down"],
                Extractor::constant("direction", "down"),
            )?,
            Rule::new(
                "adjust_volume",
                &["mute volume", "mute"],
                Extractor::constant("direction", "mute"),
            )?,
            Rule::new(
                "adjust_volume",
                &["full volume", "maximum volume"],
                Extractor::constant("direction", "max"),
            )?,
            // Leisure and utilities
            Rule::new(
                "play_game",
                &["let's play a game", "play game", "game"],
                Extractor::Nothing,
            )?,
            Rule::new("set_timer", &["set a timer", "timer"], Extractor::duration()?)?
                .clarify("I couldn't understand the time. Please try again."),
            Rule::new(
                "weather",
                &["weather"],
                Extractor::capture("city", &[r"weather\s+(?:in|for|at)\s+(.+)$"], SlotKind::Text)?
                    .optional(),
            )?,
            Rule::new(
                "news",
                &["news"],
                Extractor::keyword(
                    "category",
                    &[
                        ("business", "business"),
                        ("entertainment", "entertainment"),
                        ("health", "health"),
                        ("science", "science"),
                        ("sports", "sports"),
                        ("technology", "technology"),
                        ("tech", "technology"),
                    ],
                )
                .optional(),
            )?,
            Rule::new("tell_joke", &["joke", "tell me a joke"], Extractor::Nothing)?,
            Rule::new(
                "coin_toss",
                &["flip a coin", "toss a coin", "coin toss"],
                Extractor::Nothing,
            )?,
            Rule::new(
                "roll_dice",
                &[
                    "roll a dice",
                    "roll a die",
                    "roll dice",
                    "roll the dice",
                    "sided dice",
                    "sided die",
                ],
                Extractor::capture("sides", &[r"(\d+)[- ]sided"], SlotKind::Integer)?.optional(),
            )?,
            Rule::new(
                "add_todo",
                &["add to my list", "add to list"],
                Extractor::strip("item", &["add to my list", "add to list"]),
            )?
            .clarify("What would you like to add to your list?"),
            Rule::new("show_todo", &["show my list", "show list"], Extractor::Nothing)?,
        ];

        Ok(Self { rules })
    }
}
