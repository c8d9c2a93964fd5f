pub mod config;
pub mod handlers;
pub mod kernel;
pub mod session;

// Re-export the pieces the surrounding application wires together
pub use config::EngineConfig;
pub use kernel::dispatcher::{
    ActionHandler, DispatchOutcome, HandlerError, HandlerRegistry, HandlerReport,
};
pub use kernel::engine::Engine;
pub use kernel::error::EngineError;
pub use kernel::intent::{ActionId, ArgumentBundle};
pub use kernel::normalize::normalize;
pub use session::Session;
