//! Dispatch telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer.
//! It must **NEVER** be read inside matching, extraction or dispatch.
//!
//! # PRIVACY INVARIANT
//! Events must **NEVER** contain user content (utterances, slot values, replies).
//! Only dispatch ids, action ids, rule positions and category names are allowed.

pub mod event;
pub mod metrics;
pub mod recorder;
