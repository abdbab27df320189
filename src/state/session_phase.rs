//! Session phase definitions for tracking crawl lifecycle
//!
//! A crawl session moves strictly forward through these phases and is never reused.
use std::fmt;

/// Represents the current phase of a crawl session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// Session constructed, nothing loaded yet
    Idle,

    /// Seeds loaded, waiting for the crawl loop to start
    Initializing,

    /// Crawl loop in progress
    Running,

    /// Crawl loop ended; results are read-only
    Finished,
}

impl SessionPhase {
    /// Returns true if `next` directly follows this phase
    pub fn can_transition_to(&self, next: SessionPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Initializing)
                | (Self::Initializing, Self::Running)
                | (Self::Running, Self::Finished)
        )
    }

    /// Returns the lowercase name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Initializing => "initializing",
            Self::Running => "running",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
