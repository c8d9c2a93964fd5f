pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod intent;
pub mod normalize;
pub mod telemetry;
pub mod time;
