//! Append-only event log and the pure projections derived from it
//!
//! The log is the single source of truth. Scores, serve ownership, rally
//! phase, and timeout/substitution counters are all recomputable by folding
//! over the recorded events, which is what keeps undo exact: remove the
//! tail, re-project, and every derived value is consistent again.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::clock::MatchClock;
use crate::error::RecordError;
use crate::event::{EntryEdit, StatDraft, StatLog, StatType};
use crate::types::{PlayerId, RallyPhase, Score, Team};

/// The match history: an ordered, append-only sequence of events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<StatLog>,
    next_id: u64,
    clock: MatchClock,
}

impl EventLog {
    /// Create an empty log sampling the given clock
    pub fn new(clock: MatchClock) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            clock,
        }
    }

    /// Rebuild a log from previously recorded entries
    pub fn from_entries(entries: Vec<StatLog>, clock: MatchClock) -> Self {
        let next_id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self {
            entries,
            next_id,
            clock,
        }
    }

    /// Sample the log's clock
    pub fn now(&mut self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Assign identity to a draft and append it. The snapshot is the score
    /// *before* the event's effect.
    pub fn append(&mut self, draft: StatDraft, set_number: u8, score_snapshot: Score) -> &StatLog {
        let id = self.next_id;
        self.next_id += 1;
        let timestamp = self.clock.now();

        self.entries.push(StatLog {
            id,
            stat_type: draft.stat_type,
            team: draft.team,
            set_number,
            player_id: draft.player_id,
            assist_player_id: draft.assist_player_id,
            score_snapshot,
            timestamp,
            metadata: draft.metadata,
        });
        self.entries.last().expect("entry was just pushed")
    }

    /// Remove and return the most recent entry
    pub fn undo_last(&mut self) -> Option<StatLog> {
        self.entries.pop()
    }

    /// All recorded entries in order
    pub fn entries(&self) -> &[StatLog] {
        &self.entries
    }

    /// The most recent entry
    pub fn last(&self) -> Option<&StatLog> {
        self.entries.last()
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find an entry by id
    pub fn find(&self, id: u64) -> Option<&StatLog> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries belonging to one set, in order
    pub fn entries_for_set(&self, set_number: u8) -> impl Iterator<Item = &StatLog> {
        self.entries
            .iter()
            .filter(move |e| e.set_number == set_number)
    }

    /// In-place correction of a historical entry. Identity fields (id, set
    /// number, score snapshot) and the acting team are untouchable; a stat
    /// type change must keep the same point outcome, and administrative
    /// types cannot change at all, so recorded scores stay truthful without
    /// recomputation.
    pub fn edit_entry(&mut self, id: u64, edit: EntryEdit) -> Result<(), RecordError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(RecordError::EntryNotFound { id })?;

        if let Some(new_type) = edit.stat_type {
            let outcome_changes = new_type.outcome() != entry.stat_type.outcome();
            let administrative_retype =
                entry.stat_type.is_administrative() && new_type != entry.stat_type;
            if outcome_changes || administrative_retype {
                return Err(RecordError::OutcomeChange {
                    from: entry.stat_type,
                    to: new_type,
                });
            }
            entry.stat_type = new_type;
        }

        if edit.clear_player {
            entry.player_id = None;
        } else if let Some(player_id) = edit.player_id {
            entry.player_id = Some(player_id);
        }

        if edit.clear_assist {
            entry.assist_player_id = None;
        } else if let Some(assist) = edit.assist_player_id {
            entry.assist_player_id = Some(assist);
        }

        if let Some(notes) = edit.notes {
            entry.metadata.get_or_insert_with(Default::default).notes = Some(notes);
        }

        Ok(())
    }

    /// The trailing contiguous run of one set's events that share the last
    /// event's score snapshot: everything since the last point was scored.
    /// Administrative events ride along in the narrative.
    pub fn current_rally(&self, set_number: u8) -> Option<Vec<&StatLog>> {
        let set_events: Vec<&StatLog> = self.entries_for_set(set_number).collect();
        let last = *set_events.last()?;

        let mut rally: Vec<&StatLog> = set_events
            .into_iter()
            .rev()
            .take_while(|e| e.score_snapshot == last.score_snapshot)
            .collect();
        rally.reverse();
        Some(rally)
    }

    /// The side awarded the point by a flushed rally segment: only the last
    /// point-producing event decides it
    pub fn rally_winner(rally: &[&StatLog]) -> Option<Team> {
        rally.iter().rev().find_map(|e| e.point_winner())
    }
}

/// Fold one set's events into its score. Point-producing events increment
/// the winner; manual adjustments apply their signed delta, clamped at zero.
pub fn project_score(entries: &[StatLog], set_number: u8) -> Score {
    let mut score = Score::default();
    for event in entries.iter().filter(|e| e.set_number == set_number) {
        if let Some(winner) = event.point_winner() {
            score.increment(winner);
        } else if event.stat_type == StatType::PointAdjust {
            let delta = event
                .metadata
                .as_ref()
                .and_then(|m| m.adjustment)
                .unwrap_or(0);
            let adjusted = (score.get(event.team) as i32 + delta).max(0) as u16;
            score.set(event.team, adjusted);
        }
    }
    score
}

/// Fold serve ownership from the set's first server: each point winner
/// serves next
pub fn project_serving_team(entries: &[StatLog], set_number: u8, first_server: Team) -> Team {
    let mut serving = first_server;
    for event in entries.iter().filter(|e| e.set_number == set_number) {
        if let Some(winner) = event.point_winner() {
            serving = winner;
        }
    }
    serving
}

/// Fold the rally phase: continuation events open a rally, points close it,
/// administrative events leave it unchanged
pub fn project_rally_phase(entries: &[StatLog], set_number: u8) -> RallyPhase {
    let mut phase = RallyPhase::PreServe;
    for event in entries.iter().filter(|e| e.set_number == set_number) {
        match event.stat_type.outcome() {
            crate::event::StatOutcome::Continuation => phase = RallyPhase::InRally,
            crate::event::StatOutcome::PointToActor
            | crate::event::StatOutcome::PointAgainstActor => phase = RallyPhase::PreServe,
            crate::event::StatOutcome::Administrative => {}
        }
    }
    phase
}

/// Timeouts a team has used in a set
pub fn project_timeouts_used(entries: &[StatLog], set_number: u8, team: Team) -> u16 {
    entries
        .iter()
        .filter(|e| {
            e.set_number == set_number && e.team == team && e.stat_type == StatType::Timeout
        })
        .count() as u16
}

/// Substitutions a team has spent in a set; libero auto-swaps and initial
/// assignments are free
pub fn project_subs_used(entries: &[StatLog], set_number: u8, team: Team) -> u16 {
    entries
        .iter()
        .filter(|e| {
            e.set_number == set_number && e.team == team && e.stat_type == StatType::Substitution
        })
        .filter(|e| {
            e.metadata
                .as_ref()
                .map(|m| !m.auto_swap && !m.is_assignment)
                .unwrap_or(true)
        })
        .count() as u16
}

/// Active one-for-one substitution pairings for a set, rebuilt from its
/// substitution events
pub fn project_sub_pairs(entries: &[StatLog], set_number: u8) -> HashMap<PlayerId, PlayerId> {
    let mut pairs = HashMap::new();
    for event in entries.iter().filter(|e| {
        e.set_number == set_number && e.stat_type == StatType::Substitution
    }) {
        let Some(metadata) = &event.metadata else {
            continue;
        };
        if metadata.auto_swap || metadata.is_assignment {
            continue;
        }
        if let (Some(sub_in), Some(sub_out)) = (&metadata.sub_in, &metadata.sub_out) {
            if !pairs.contains_key(sub_in) && !pairs.contains_key(sub_out) {
                pairs.insert(sub_in.clone(), sub_out.clone());
                pairs.insert(sub_out.clone(), sub_in.clone());
            }
        }
    }
    pairs
}
