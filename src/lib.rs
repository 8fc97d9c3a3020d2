//! Volleyball Match Tracking Engine (VMTE)
//!
//! A library for tracking a live volleyball match as an append-only event
//! log with replayable derived state: scores, rotations, substitutions,
//! timeouts, rule facts, and momentum analytics.

pub mod audit;
pub mod clock;
pub mod error;
pub mod event;
pub mod hasher;
pub mod log;
pub mod logging;
pub mod momentum;
pub mod record;
pub mod rotation;
pub mod rules;
pub mod serialization;
pub mod setup;
pub mod state;
pub mod types;

// Re-export core types
pub use audit::{AuditReport, FieldAudit};
pub use clock::MatchClock;
pub use error::{ConfigError, MatchError, RecordError, RotationError, SerializationError};
pub use event::{EntryEdit, StatDraft, StatLog, StatMetadata, StatOutcome, StatType};
pub use hasher::{RecordHash, SnapshotHasher};
pub use log::EventLog;
pub use logging::{LogEntry, LogLevel, MatchLogger};
pub use momentum::{MomentumInput, MomentumReading, TimeoutSuggestion, Trend};
pub use record::{MatchRecord, MatchRecordUpdate, MatchResult};
pub use rotation::{
    IllegalLibero, LineupPosition, Rotation, RotationDirection, SwapOutcome,
};
pub use serialization::{BincodeSerializer, JsonSerializer, RecordSerializer};
pub use setup::MatchSetup;
pub use state::{MatchState, RecordOutcome, RotationReport, SubReport};
pub use types::{
    MatchConfig, MatchId, Player, PlayerId, RallyPhase, Score, SetConfig, SetResult, Team,
};
