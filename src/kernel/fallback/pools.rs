use super::sampler::ReplySampler;
use crate::kernel::error::EngineError;

/// Fixed, ordered canned replies for one conversational category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePool {
    name: String,
    replies: Vec<String>,
}

impl ResponsePool {
    /// Rejects empty pools and blank replies, so sampling always yields text.
    pub fn new(name: &str, replies: &[&str]) -> Result<Self, EngineError> {
        let replies: Vec<String> = replies
            .iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        if replies.is_empty() {
            return Err(EngineError::EmptyPool {
                category: name.to_string(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            replies,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn replies(&self) -> &[String] {
        &self.replies
    }

    pub fn contains(&self, reply: &str) -> bool {
        self.replies.iter().any(|r| r == reply)
    }

    pub fn sample(&self, sampler: &mut dyn ReplySampler) -> &str {
        let idx = sampler.pick(self.replies.len()).min(self.replies.len() - 1);
        &self.replies[idx]
    }
}

pub struct ResponsePools;

impl ResponsePools {
    pub fn greetings() -> Result<ResponsePool, EngineError> {
        ResponsePool::new(
            "greeting",
            &[
                "Hello! How can I help you today?",
                "Hi there! What can I do for you?",
                "Greetings! How may I assist you?",
                "Hey! I'm here to help. What do you need?",
            ],
        )
    }

    pub fn farewells() -> Result<ResponsePool, EngineError> {
        ResponsePool::new(
            "farewell",
            &[
                "Goodbye! Have a great day!",
                "Bye! Call me if you need anything.",
                "See you later! Take care!",
                "Farewell! It was nice talking to you.",
            ],
        )
    }

    pub fn gratitude() -> Result<ResponsePool, EngineError> {
        ResponsePool::new(
            "gratitude",
            &["You're welcome!", "Happy to help!", "My pleasure!", "No problem at all!"],
        )
    }

    pub fn apologies() -> Result<ResponsePool, EngineError> {
        ResponsePool::new(
            "apology",
            &[
                "It's alright, no need to apologize.",
                "No worries at all.",
                "That's okay, don't worry about it.",
                "No problem, I understand.",
            ],
        )
    }

    pub fn identity() -> Result<ResponsePool, EngineError> {
        ResponsePool::new(
            "identity",
            &[
                "I'm your personal assistant, designed to help you with various tasks.",
                "I'm an AI assistant created to make your life easier.",
                "Think of me as your digital helper, ready to assist with what you need.",
                "I'm your virtual assistant, always ready to help!",
            ],
        )
    }

    pub fn capability() -> Result<ResponsePool, EngineError> {
        ResponsePool::new(
            "capability",
            &[
                "I can help you with tasks like web searches, playing videos, sending emails, creating files, and much more!",
                "I can search the web, play YouTube videos, send emails, create files, and provide information on various topics.",
                "I'm designed to assist with searches, media playback, communications, file creation, and answering questions.",
                "I can perform many tasks including searches, playing media, sending messages, file operations, and providing information.",
            ],
        )
    }

    pub fn compliments() -> Result<ResponsePool, EngineError> {
        ResponsePool::new(
            "compliment",
            &[
                "Thank you! I'm happy to hear that.",
                "That's very kind of you to say!",
                "I appreciate your feedback!",
                "Thanks! I'm glad I could be helpful.",
            ],
        )
    }

    pub fn unknown() -> Result<ResponsePool, EngineError> {
        ResponsePool::new(
            "unknown",
            &[
                "I'm not sure I understand. Could you rephrase that?",
                "I don't have enough information to help with that.",
                "I'm still learning about that topic.",
                "I'm afraid I don't know how to help with that yet.",
            ],
        )
    }

    pub fn jokes() -> Result<ResponsePool, EngineError> {
        ResponsePool::new(
            "joke",
            &[
                "Why don't scientists trust atoms? Because they make up everything!",
                "Did you hear about the mathematician who's afraid of negative numbers? He'll stop at nothing to avoid them!",
                "Why was six afraid of seven? Because seven eight nine!",
                "I told my wife she was drawing her eyebrows too high. She looked surprised.",
                "What do you call a fake noodle? An impasta!",
                "How do you organize a space party? You planet!",
                "Why don't eggs tell jokes? They'd crack each other up!",
                "I'm reading a book on anti-gravity. It's impossible to put down!",
                "Did you hear about the guy who invented the knock-knock joke? He won the 'no-bell' prize!",
                "I used to be a baker, but I couldn't make enough dough.",
            ],
        )
    }
}
