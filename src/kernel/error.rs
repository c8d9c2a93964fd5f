use thiserror::Error;

/// Construction-time failures. Nothing in here is reachable from `interpret`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("rule for action `{action}` has no trigger phrases")]
    EmptyTriggers { action: String },

    #[error("invalid extraction pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("response pool `{category}` is empty")]
    EmptyPool { category: String },

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
