//! Error types for the match tracking engine

use thiserror::Error;

use crate::event::StatType;
use crate::types::{MatchId, PlayerId};

/// Top-level error type wrapping every failure category
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rotation error: {0}")]
    Rotation(#[from] RotationError),

    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),
}

/// Setup and configuration validation failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Set {set_index}: cap {cap} is below target score {target_score}")]
    CapBelowTarget {
        set_index: usize,
        target_score: u16,
        cap: u16,
    },

    #[error("Set {set_index}: win-by must be at least 1, got {win_by}")]
    WinByTooSmall { set_index: usize, win_by: u16 },

    #[error("Total sets must be at least 1, got {total_sets}")]
    InvalidTotalSets { total_sets: u8 },

    #[error("No set configurations provided")]
    NoSetsConfigured,

    #[error("Missing required setup field: {field}")]
    MissingField { field: String },

    #[error("Duplicate roster id: {player_id}")]
    DuplicateRosterId { player_id: PlayerId },

    #[error("Lineup references {player_id} who is not on the roster")]
    UnknownLineupPlayer { player_id: PlayerId },

    #[error("Cannot resume record: {reason}")]
    ResumeMismatch { reason: String },
}

/// Lineup invariant violations and substitution-path rejections
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RotationError {
    #[error("Position {position} is out of range (expected 1-6)")]
    InvalidPosition { position: u8 },

    #[error("{player_id} is already assigned to position {position}")]
    DuplicatePlayer { player_id: PlayerId, position: u8 },

    #[error("{player_id} may only swap with designated partner {partner_id}")]
    PairConflict {
        player_id: PlayerId,
        partner_id: PlayerId,
    },

    #[error("No substitutions remaining this set")]
    SubsExhausted,

    #[error("Match is finalized and read-only")]
    MatchFinalized,
}

/// Event log edit and record patch failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("No log entry with id {id}")]
    EntryNotFound { id: u64 },

    #[error("Cannot change {from:?} to {to:?}: the edit would alter the point outcome")]
    OutcomeChange { from: StatType, to: StatType },

    #[error("Update targets match {expected} but was applied to {actual}")]
    IdMismatch { expected: MatchId, actual: MatchId },

    #[error("Match is finalized and read-only")]
    MatchFinalized,
}

/// Snapshot encoding and decoding failures
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("Serialization failed: {reason}")]
    SerializationFailed { reason: String },

    #[error("Deserialization failed: {reason}")]
    DeserializationFailed { reason: String },
}
