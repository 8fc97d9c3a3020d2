//! The snapshot value object handed to the persistence collaborator
//!
//! The core never writes storage. It builds `MatchRecord` snapshots and
//! accepts `MatchRecordUpdate` patches keyed by match id; everything else
//! (where records live, how they sync) belongs to the caller.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::RecordError;
use crate::event::StatLog;
use crate::rotation::Rotation;
use crate::types::{MatchConfig, MatchId, PlayerId, Score, Team};

/// Outcome of a match from the tracked team's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    Win,
    Loss,
    Scheduled,
}

/// Complete snapshot of a match: everything needed to persist, resume, or
/// display it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub season_id: Option<String>,
    pub event_id: Option<String>,
    pub opponent_name: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub result: MatchResult,
    pub sets_won: Score,
    pub scores: Vec<Score>,
    pub history: Vec<StatLog>,
    pub config: MatchConfig,
    /// Per-set lineups, value copies frozen as each set was played
    pub lineups: BTreeMap<u8, Rotation>,
    /// First server chosen for each set
    pub first_servers: BTreeMap<u8, Team>,
    /// Persistent libero designations
    pub libero_ids: BTreeSet<PlayerId>,
    pub ai_narrative: Option<String>,
}

impl MatchRecord {
    /// Apply a partial update. The update must target this record's id.
    pub fn apply_update(&mut self, update: MatchRecordUpdate) -> Result<(), RecordError> {
        if update.match_id != self.id {
            return Err(RecordError::IdMismatch {
                expected: update.match_id,
                actual: self.id.clone(),
            });
        }

        if let Some(opponent_name) = update.opponent_name {
            self.opponent_name = opponent_name;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(time) = update.time {
            self.time = Some(time);
        }
        if let Some(result) = update.result {
            self.result = result;
        }
        if let Some(season_id) = update.season_id {
            self.season_id = Some(season_id);
        }
        if let Some(event_id) = update.event_id {
            self.event_id = Some(event_id);
        }
        if let Some(narrative) = update.ai_narrative {
            self.ai_narrative = Some(narrative);
        }
        Ok(())
    }
}

/// Partial field update for a stored record, keyed by match id. Absent
/// fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRecordUpdate {
    pub match_id: MatchId,
    pub opponent_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub result: Option<MatchResult>,
    pub season_id: Option<String>,
    pub event_id: Option<String>,
    pub ai_narrative: Option<String>,
}

impl MatchRecordUpdate {
    /// Create an empty update targeting a match
    pub fn for_match(match_id: MatchId) -> Self {
        Self {
            match_id,
            ..Self::default()
        }
    }

    /// Attach a generated narrative
    pub fn with_narrative(mut self, narrative: impl Into<String>) -> Self {
        self.ai_narrative = Some(narrative.into());
        self
    }

    /// Reschedule the match
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the start time
    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Correct the opponent name
    pub fn with_opponent_name(mut self, name: impl Into<String>) -> Self {
        self.opponent_name = Some(name.into());
        self
    }

    /// Overwrite the result
    pub fn with_result(mut self, result: MatchResult) -> Self {
        self.result = Some(result);
        self
    }
}
