//! Lifecycle of one generation call.

use std::fmt;

/// Phase of a single generation call.
///
/// Every call starts `Idle` and reaches exactly one terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Not started.
    #[default]
    Idle,
    /// Building the request and waiting for the provider to answer.
    Requesting,
    /// Deltas are being delivered.
    Streaming,
    /// The provider finished normally.
    Completed,
    /// The call ended with an error.
    Failed,
}

impl Phase {
    /// Whether this phase ends the call.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Whether the call may move from `self` to `next`.
    pub fn can_advance(self, next: Phase) -> bool {
        use Phase::*;
        matches!(
            (self, next),
            (Idle, Requesting)
                | (Requesting, Streaming)
                | (Requesting, Completed)
                | (Requesting, Failed)
                | (Streaming, Completed)
                | (Streaming, Failed)
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Requesting => "requesting",
            Self::Streaming => "streaming",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Tracks and logs the phase of one call.
#[derive(Debug)]
pub struct Tracker {
    backend: &'static str,
    phase: Phase,
}

impl Tracker {
    /// A tracker in the `Idle` phase.
    pub fn new(backend: &'static str) -> Self {
        Self {
            backend,
            phase: Phase::Idle,
        }
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Move to `next`. Staying in the same phase is a no-op; invalid moves
    /// are ignored so a terminal phase is never left.
    pub fn advance(&mut self, next: Phase) -> bool {
        if self.phase == next {
            return true;
        }
        if !self.phase.can_advance(next) {
            tracing::trace!("{}: ignoring {} -> {}", self.backend, self.phase, next);
            return false;
        }
        tracing::debug!("{}: {} -> {}", self.backend, self.phase, next);
        self.phase = next;
        true
    }
}
