//! State module for tracking crawl session progress
//!
//! # Components
//!
//! - `SessionPhase`: the single-use lifecycle of a crawl session
//!   (idle, initializing, running, finished)

mod session_phase;

pub use session_phase::SessionPhase;
