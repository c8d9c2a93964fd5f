pub mod pools;
pub mod responder;
pub mod sampler;

pub use pools::{ResponsePool, ResponsePools};
pub use responder::{ConversationalRule, FallbackReply, FallbackResponder, Reply, UNKNOWN_CATEGORY};
pub use sampler::{CyclingSampler, RandomSampler, ReplySampler};
