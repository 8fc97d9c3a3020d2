//! Time source for event timestamps
//!
//! Live tracking stamps events with wall-clock time; tests and replays use
//! a fixed clock that advances by a constant tick so successive events keep
//! distinct, ordered timestamps.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Clock the event log samples for each appended event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchClock {
    /// Wall-clock time
    System,
    /// Frozen time advancing by `tick_ms` per sample
    Fixed {
        current: DateTime<Utc>,
        tick_ms: i64,
    },
}

impl MatchClock {
    /// Wall-clock time source
    pub fn system() -> Self {
        MatchClock::System
    }

    /// Fixed time source advancing one second per sample
    pub fn fixed(start: DateTime<Utc>) -> Self {
        Self::fixed_with_tick(start, 1_000)
    }

    /// Fixed time source with an explicit tick in milliseconds
    pub fn fixed_with_tick(start: DateTime<Utc>, tick_ms: i64) -> Self {
        MatchClock::Fixed {
            current: start,
            tick_ms,
        }
    }

    /// Sample the clock; a fixed clock advances after sampling
    pub fn now(&mut self) -> DateTime<Utc> {
        match self {
            MatchClock::System => Utc::now(),
            MatchClock::Fixed { current, tick_ms } => {
                let sampled = *current;
                *current = sampled + Duration::milliseconds(*tick_ms);
                sampled
            }
        }
    }
}

impl Default for MatchClock {
    fn default() -> Self {
        MatchClock::System
    }
}
