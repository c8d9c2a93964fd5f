pub mod types;
pub mod rules;
pub mod matcher;
pub mod extractor;

pub use types::*;
pub use rules::{Rule, RuleTable};
pub use matcher::IntentMatcher;
pub use extractor::{strip_phrases, Extractor, SlotKind};
