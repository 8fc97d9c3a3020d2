//! The match aggregate: a single-writer state machine over the event log
//!
//! Every mutation flows through a named command. Commands append to the
//! log, update the memoized counters, and report facts (set finished,
//! illegal libero) for the caller to react to; the aggregate never decides
//! navigation or persistence. Guard failures are returned values, never
//! panics, so a coach can keep scoring through an invalid tap.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use chrono::{NaiveDate, NaiveTime};

use crate::audit::{self, AuditReport};
use crate::error::{RecordError, RotationError};
use crate::event::{EntryEdit, StatDraft, StatLog, StatMetadata, StatOutcome, StatType};
use crate::log::{self, EventLog};
use crate::logging::MatchLogger;
use crate::momentum::{self, MomentumInput, MomentumReading};
use crate::record::{MatchRecord, MatchResult};
use crate::rotation::{is_front_row, IllegalLibero, Rotation, RotationDirection};
use crate::rules;
use crate::types::{MatchConfig, MatchId, PlayerId, RallyPhase, Score, SetResult, Team};

/// What a recorded stat did to the match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub event_id: u64,
    pub point_winner: Option<Team>,
    /// The set just reached a finished score; the caller runs the
    /// end-of-set flow and decides when to start the next set
    pub set_finished: bool,
    /// Enough sets are won to decide the match
    pub match_decided: bool,
}

/// Facts from a logged rotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationReport {
    pub event_id: u64,
    pub illegal_libero: Option<IllegalLibero>,
}

/// Facts from a completed substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubReport {
    pub event_id: u64,
    pub outgoing: Option<PlayerId>,
    pub auto_swap: bool,
    pub illegal_libero: Option<IllegalLibero>,
}

/// The aggregate root owning the event log and every memoized projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub(crate) match_id: MatchId,
    pub(crate) season_id: Option<String>,
    pub(crate) event_id: Option<String>,
    pub(crate) my_team_name: String,
    pub(crate) opponent_name: String,
    pub(crate) date: NaiveDate,
    pub(crate) time: Option<NaiveTime>,
    pub(crate) config: MatchConfig,
    pub(crate) current_set: u8,
    pub(crate) scores: Vec<Score>,
    pub(crate) sets_won: Score,
    pub(crate) set_results: Vec<SetResult>,
    pub(crate) log: EventLog,
    pub(crate) serving_team: Team,
    pub(crate) rally_phase: RallyPhase,
    pub(crate) rotations_by_set: BTreeMap<u8, Rotation>,
    pub(crate) timeouts_remaining: Score,
    pub(crate) subs_remaining: Score,
    pub(crate) sub_pairs: HashMap<PlayerId, PlayerId>,
    pub(crate) libero_ids: HashSet<PlayerId>,
    pub(crate) first_server_per_set: BTreeMap<u8, Team>,
    pub(crate) finalized: bool,
    pub(crate) logger: MatchLogger,
}

impl MatchState {
    // ------------------------------------------------------------------
    // Read model
    // ------------------------------------------------------------------

    /// Tracked team name
    pub fn my_team_name(&self) -> &str {
        &self.my_team_name
    }

    /// Opponent name
    pub fn opponent_name(&self) -> &str {
        &self.opponent_name
    }

    /// Match configuration
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Active set number (1-based)
    pub fn current_set(&self) -> u8 {
        self.current_set
    }

    /// Score of the active set
    pub fn current_score(&self) -> Score {
        self.scores[self.current_set as usize - 1]
    }

    /// Scores of all started sets
    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    /// Sets won per side
    pub fn sets_won(&self) -> Score {
        self.sets_won
    }

    /// Results of completed sets
    pub fn set_results(&self) -> &[SetResult] {
        &self.set_results
    }

    /// The full event history
    pub fn history(&self) -> &[StatLog] {
        self.log.entries()
    }

    /// Which side serves next
    pub fn serving_team(&self) -> Team {
        self.serving_team
    }

    /// Serve/rally phase
    pub fn rally_phase(&self) -> RallyPhase {
        self.rally_phase
    }

    /// Lineup of the active set
    pub fn current_rotation(&self) -> Option<&Rotation> {
        self.rotations_by_set.get(&self.current_set)
    }

    /// Lineup stored for any started set
    pub fn rotation_for_set(&self, set_number: u8) -> Option<&Rotation> {
        self.rotations_by_set.get(&set_number)
    }

    /// Timeouts left for a team this set
    pub fn timeouts_remaining(&self, team: Team) -> u16 {
        self.timeouts_remaining.get(team)
    }

    /// Substitutions left for a team this set
    pub fn subs_remaining(&self, team: Team) -> u16 {
        self.subs_remaining.get(team)
    }

    /// Persistent libero designations
    pub fn libero_ids(&self) -> &HashSet<PlayerId> {
        &self.libero_ids
    }

    /// First server recorded for a set
    pub fn first_server(&self, set_number: u8) -> Option<Team> {
        self.first_server_per_set.get(&set_number).copied()
    }

    /// Whether the aggregate is terminal and read-only
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Structured log of command dispositions
    pub fn logger(&self) -> &MatchLogger {
        &self.logger
    }

    /// Whether the active set has reached a finished score
    pub fn is_current_set_finished(&self) -> bool {
        rules::is_set_finished(&self.current_score(), self.config.set_config(self.current_set))
    }

    /// Whether a team holds set point
    pub fn is_set_point(&self, team: Team) -> bool {
        let score = self.current_score();
        rules::is_set_point(
            score.get(team),
            score.get(team.other()),
            self.config.set_config(self.current_set),
        )
    }

    /// Whether a team holds match point
    pub fn is_match_point(&self, team: Team) -> bool {
        rules::is_match_point(
            self.is_set_point(team),
            self.sets_won.get(team) as u8,
            self.config.total_sets,
        )
    }

    /// Deuce indicator for the active set
    pub fn deuce_message(&self) -> Option<String> {
        rules::must_win_by_message(&self.current_score(), self.config.set_config(self.current_set))
    }

    /// Whether either side has won enough sets to decide the match
    pub fn is_match_decided(&self) -> bool {
        let to_win = self.config.sets_to_win() as u16;
        self.sets_won.my_team >= to_win || self.sets_won.opponent >= to_win
    }

    /// Events since the last point was scored in the active set
    pub fn current_rally(&self) -> Option<Vec<&StatLog>> {
        self.log.current_rally(self.current_set)
    }

    /// Momentum reading over the active set's tail
    pub fn momentum(&self, dismissed_at_total_score: Option<u16>) -> MomentumReading {
        let events: Vec<StatLog> = self
            .log
            .entries_for_set(self.current_set)
            .cloned()
            .collect();
        momentum::analyze(&MomentumInput {
            events: &events,
            current_score: self.current_score(),
            serving_team: self.serving_team,
            dismissed_at_total_score,
        })
    }

    /// Compare every memoized counter against its log projection
    pub fn audit(&self) -> AuditReport {
        audit::audit_match(self)
    }

    /// Snapshot for the persistence collaborator
    pub fn snapshot(&self) -> MatchRecord {
        let result = if !self.finalized {
            MatchResult::Scheduled
        } else if self.sets_won.my_team > self.sets_won.opponent {
            MatchResult::Win
        } else {
            MatchResult::Loss
        };

        MatchRecord {
            id: self.match_id.clone(),
            season_id: self.season_id.clone(),
            event_id: self.event_id.clone(),
            opponent_name: self.opponent_name.clone(),
            date: self.date,
            time: self.time,
            result,
            sets_won: self.sets_won,
            scores: self.scores.clone(),
            history: self.log.entries().to_vec(),
            config: self.config.clone(),
            lineups: self.rotations_by_set.clone(),
            first_servers: self.first_server_per_set.clone(),
            libero_ids: self.libero_ids.iter().cloned().collect::<BTreeSet<_>>(),
            ai_narrative: None,
        }
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Record a stat. Two-player attribution for attacks and blocks: with
    /// two selections the first is the assist, the second the primary.
    /// Returns `None` when a guard rejects the command (finalized match,
    /// finished set, wrong side serving or receiving, administrative type).
    pub fn record_stat(
        &mut self,
        team: Team,
        stat_type: StatType,
        players: &[PlayerId],
    ) -> Option<RecordOutcome> {
        if self.finalized || stat_type.is_administrative() || self.is_current_set_finished() {
            self.reject(format!("record_stat {stat_type:?} rejected"));
            return None;
        }
        if stat_type.is_serve()
            && (self.rally_phase != RallyPhase::PreServe || team != self.serving_team)
        {
            self.reject(format!("serve stat for non-serving side {team}"));
            return None;
        }
        if stat_type.is_receive()
            && (self.rally_phase != RallyPhase::PreServe || team == self.serving_team)
        {
            self.reject(format!("receive stat for serving side {team}"));
            return None;
        }

        let mut draft = StatDraft::new(stat_type, team);
        if stat_type.supports_assist() && players.len() >= 2 {
            draft = draft
                .with_assist(players[0].clone())
                .with_player(players[1].clone());
        } else if let Some(first) = players.first() {
            draft = draft.with_player(first.clone());
        }

        let snapshot = self.current_score();
        let event = self.log.append(draft, self.current_set, snapshot);
        let event_id = event.id;
        let timestamp = event.timestamp;
        let point_winner = event.point_winner();

        match stat_type.outcome() {
            StatOutcome::Continuation => self.rally_phase = RallyPhase::InRally,
            StatOutcome::PointToActor | StatOutcome::PointAgainstActor => {
                if let Some(winner) = point_winner {
                    let index = self.current_set as usize - 1;
                    self.scores[index].increment(winner);
                    self.serving_team = winner;
                    self.rally_phase = RallyPhase::PreServe;
                }
            }
            StatOutcome::Administrative => {}
        }

        self.sync_set_result();
        let set_finished = self.is_current_set_finished();
        let match_decided = self.is_match_decided();

        self.logger.info(
            timestamp,
            format!("{stat_type:?} by {team}, score {}", self.current_score()),
        );

        Some(RecordOutcome {
            event_id,
            point_winner,
            set_finished,
            match_decided,
        })
    }

    /// Manually add a point, logged as an adjustment
    pub fn increment_score(&mut self, team: Team) -> bool {
        self.adjust_score(team, 1)
    }

    /// Manually remove a point; a no-op at zero
    pub fn decrement_score(&mut self, team: Team) -> bool {
        if self.current_score().get(team) == 0 {
            self.reject(format!("decrement below zero for {team}"));
            return false;
        }
        self.adjust_score(team, -1)
    }

    /// Overwrite one side's score, logged as a single adjustment delta
    pub fn set_score(&mut self, team: Team, value: u16) -> bool {
        let delta = value as i32 - self.current_score().get(team) as i32;
        if delta == 0 {
            return true;
        }
        self.adjust_score(team, delta)
    }

    fn adjust_score(&mut self, team: Team, delta: i32) -> bool {
        if self.finalized {
            self.reject("score adjustment on finalized match".to_string());
            return false;
        }
        let snapshot = self.current_score();
        let event = self.log.append(
            StatDraft::new(StatType::PointAdjust, team)
                .with_metadata(StatMetadata::adjustment(delta)),
            self.current_set,
            snapshot,
        );
        let timestamp = event.timestamp;

        let index = self.current_set as usize - 1;
        let adjusted = (snapshot.get(team) as i32 + delta).max(0) as u16;
        self.scores[index].set(team, adjusted);
        self.sync_set_result();

        self.logger.info(
            timestamp,
            format!("manual adjust {delta:+} for {team}, score {}", self.current_score()),
        );
        true
    }

    /// Charge a timeout. Rejected when none remain.
    pub fn use_timeout(&mut self, team: Team) -> bool {
        if self.finalized || self.timeouts_remaining.get(team) == 0 {
            self.reject(format!("timeout for {team} with none remaining"));
            return false;
        }
        let snapshot = self.current_score();
        let event = self
            .log
            .append(StatDraft::new(StatType::Timeout, team), self.current_set, snapshot);
        let timestamp = event.timestamp;
        self.timeouts_remaining.decrement(team);
        self.logger.info(
            timestamp,
            format!(
                "timeout {team}, {} remaining",
                self.timeouts_remaining.get(team)
            ),
        );
        true
    }

    /// Rotate the lineup and log it. Reports a libero caught in the front
    /// row; the rotation is applied regardless.
    pub fn rotate(&mut self, direction: RotationDirection) -> Option<RotationReport> {
        if self.finalized {
            return None;
        }
        let illegal_libero = {
            let rotation = self.rotations_by_set.get_mut(&self.current_set)?;
            rotation.rotate(direction);
            rotation.detect_illegal_libero(&self.libero_ids)
        };

        let snapshot = self.current_score();
        let event = self.log.append(
            StatDraft::new(StatType::Rotation, Team::MyTeam)
                .with_metadata(StatMetadata::rotation(direction)),
            self.current_set,
            snapshot,
        );
        let event_id = event.id;
        let timestamp = event.timestamp;

        if let Some(illegal) = &illegal_libero {
            self.logger.warn(
                timestamp,
                format!("libero {} in front row position {}", illegal.player_id, illegal.position),
            );
        }

        Some(RotationReport {
            event_id,
            illegal_libero,
        })
    }

    /// Substitute a player into the active lineup. Libero auto-swaps and
    /// paired swaps are validated here; lineup invariants (position range,
    /// duplicate assignment) are enforced by the rotation itself.
    pub fn substitute(
        &mut self,
        position: u8,
        incoming: PlayerId,
        is_libero: bool,
    ) -> Result<SubReport, RotationError> {
        if self.finalized {
            return Err(RotationError::MatchFinalized);
        }
        let is_libero = is_libero || self.libero_ids.contains(&incoming);

        let outgoing_peek = self
            .current_rotation()
            .and_then(|r| r.player_at(position).cloned());
        let prospective_auto_swap =
            is_libero && !is_front_row(position) && outgoing_peek.is_some();

        if !prospective_auto_swap {
            if self.subs_remaining.get(Team::MyTeam) == 0 {
                self.reject("substitution with none remaining".to_string());
                return Err(RotationError::SubsExhausted);
            }
        }
        if !is_libero {
            if let Some(partner) = self.sub_pairs.get(&incoming) {
                if outgoing_peek.as_ref() != Some(partner) {
                    return Err(RotationError::PairConflict {
                        player_id: incoming,
                        partner_id: partner.clone(),
                    });
                }
            }
            if let Some(outgoing) = &outgoing_peek {
                if let Some(partner) = self.sub_pairs.get(outgoing) {
                    if *partner != incoming {
                        return Err(RotationError::PairConflict {
                            player_id: outgoing.clone(),
                            partner_id: partner.clone(),
                        });
                    }
                }
            }
        }

        let (outcome, illegal_libero) = {
            let rotation = self
                .rotations_by_set
                .get_mut(&self.current_set)
                .ok_or(RotationError::InvalidPosition { position })?;
            let outcome = rotation.substitute(position, incoming.clone(), is_libero)?;
            let illegal = rotation.detect_illegal_libero(&self.libero_ids);
            (outcome, illegal)
        };

        if !outcome.auto_swap && !is_libero {
            self.subs_remaining.decrement(Team::MyTeam);
            if let Some(outgoing) = &outcome.outgoing {
                if !self.sub_pairs.contains_key(&incoming)
                    && !self.sub_pairs.contains_key(outgoing)
                {
                    self.sub_pairs.insert(incoming.clone(), outgoing.clone());
                    self.sub_pairs.insert(outgoing.clone(), incoming.clone());
                }
            }
        } else if !outcome.auto_swap {
            // Libero entering the front row still consumes the allowance
            self.subs_remaining.decrement(Team::MyTeam);
        }

        let snapshot = self.current_score();
        let event = self.log.append(
            StatDraft::new(StatType::Substitution, Team::MyTeam)
                .with_player(incoming.clone())
                .with_metadata(StatMetadata::substitution(
                    position,
                    incoming,
                    outcome.outgoing.clone(),
                    outcome.auto_swap,
                )),
            self.current_set,
            snapshot,
        );
        let event_id = event.id;
        let timestamp = event.timestamp;

        if let Some(illegal) = &illegal_libero {
            self.logger.warn(
                timestamp,
                format!("libero {} in front row position {}", illegal.player_id, illegal.position),
            );
        }

        Ok(SubReport {
            event_id,
            outgoing: outcome.outgoing,
            auto_swap: outcome.auto_swap,
            illegal_libero,
        })
    }

    /// Place a player in the starting lineup before play, outside the
    /// substitution allowance
    pub fn assign_position(
        &mut self,
        position: u8,
        player: PlayerId,
        is_libero: bool,
    ) -> Result<(), RotationError> {
        if self.finalized {
            return Err(RotationError::MatchFinalized);
        }
        let outgoing = {
            let rotation = self
                .rotations_by_set
                .get_mut(&self.current_set)
                .ok_or(RotationError::InvalidPosition { position })?;
            rotation.substitute(position, player.clone(), is_libero)?.outgoing
        };
        if is_libero {
            self.libero_ids.insert(player.clone());
        }

        let snapshot = self.current_score();
        self.log.append(
            StatDraft::new(StatType::Substitution, Team::MyTeam)
                .with_player(player.clone())
                .with_metadata(
                    StatMetadata::substitution(position, player, outgoing, false).as_assignment(),
                ),
            self.current_set,
            snapshot,
        );
        Ok(())
    }

    /// Suggested first server: none for set 1 and the deciding set, the
    /// alternate of the previous set's choice otherwise
    pub fn suggest_first_server(&self, set_number: u8) -> Option<Team> {
        if set_number <= 1 || set_number >= self.config.total_sets {
            return None;
        }
        self.first_server_per_set
            .get(&(set_number - 1))
            .map(|team| team.other())
    }

    /// Choose the first server for the active set, before play begins.
    /// When the opponent serves first the starting lineup shifts backward
    /// once so positions match legal standing relative to the server; this
    /// adjustment is not logged as a rotation event.
    pub fn set_first_server(&mut self, team: Team) -> bool {
        if self.finalized {
            return false;
        }
        let set = self.current_set;
        if self.first_server_per_set.contains_key(&set) {
            self.reject(format!("first server already chosen for set {set}"));
            return false;
        }
        let play_started = self
            .log
            .entries_for_set(set)
            .any(|e| !e.stat_type.is_administrative());
        if play_started {
            self.reject(format!("first server chosen after play began in set {set}"));
            return false;
        }

        self.first_server_per_set.insert(set, team);
        self.serving_team = team;
        self.rally_phase = RallyPhase::PreServe;
        if team == Team::Opponent {
            if let Some(rotation) = self.rotations_by_set.get_mut(&set) {
                rotation.rotate(RotationDirection::Backward);
            }
        }
        let timestamp = self.log.now();
        self.logger
            .info(timestamp, format!("set {set} first server: {team}"));
        true
    }

    /// Remove the most recent event and re-derive every counter from the
    /// remaining log. Lineup side effects (rotation, substitution) are
    /// inverted exactly; scores, serve, rally phase, timeouts, subs, and
    /// pairings are re-projected rather than decremented. Undo does not
    /// cross a set boundary.
    pub fn undo_last(&mut self) -> Option<StatLog> {
        if self.finalized {
            return None;
        }
        if self.log.last()?.set_number != self.current_set {
            self.reject("undo across set boundary".to_string());
            return None;
        }
        let undone = self.log.undo_last()?;

        match undone.stat_type {
            StatType::Rotation => {
                if let Some(direction) = undone
                    .metadata
                    .as_ref()
                    .and_then(|m| m.rotation_direction)
                {
                    if let Some(rotation) = self.rotations_by_set.get_mut(&self.current_set) {
                        rotation.rotate(direction.inverse());
                    }
                }
            }
            StatType::Substitution => {
                if let Some(position) =
                    undone.metadata.as_ref().and_then(|m| m.position)
                {
                    let previous = undone.metadata.as_ref().and_then(|m| m.sub_out.clone());
                    if let Some(rotation) = self.rotations_by_set.get_mut(&self.current_set) {
                        match previous {
                            Some(player) => {
                                let was_libero = self.libero_ids.contains(&player);
                                rotation.substitute(position, player, was_libero).ok();
                            }
                            None => {
                                rotation.clear(position).ok();
                            }
                        }
                    }
                }
            }
            _ => {}
        }

        self.reproject_derived();
        self.sync_set_result();

        let timestamp = self.log.now();
        self.logger.info(
            timestamp,
            format!("undid {:?} (event {})", undone.stat_type, undone.id),
        );
        Some(undone)
    }

    /// Correct a historical entry without disturbing order or snapshots
    pub fn edit_log_entry(&mut self, id: u64, edit: EntryEdit) -> Result<(), RecordError> {
        if self.finalized {
            return Err(RecordError::MatchFinalized);
        }
        self.log.edit_entry(id, edit)
    }

    /// Advance to the next set once the current one is finished. Cascades
    /// the lineup as a value copy and resets per-set allowances.
    pub fn start_next_set(&mut self) -> bool {
        if self.finalized || !self.is_current_set_finished() {
            self.reject("start_next_set before set finished".to_string());
            return false;
        }
        if self.current_set >= self.config.total_sets {
            self.reject("start_next_set past final set".to_string());
            return false;
        }

        let previous = self.current_set;
        let next = previous + 1;
        self.current_set = next;
        self.scores.push(Score::default());
        let cascaded = self
            .rotations_by_set
            .get(&previous)
            .map(Rotation::cascade)
            .unwrap_or_default();
        self.rotations_by_set.insert(next, cascaded);
        self.timeouts_remaining = Score::both(self.config.timeouts_per_set);
        self.subs_remaining = Score::both(self.config.subs_per_set);
        self.sub_pairs.clear();
        self.rally_phase = RallyPhase::PreServe;

        let timestamp = self.log.now();
        self.logger.info(timestamp, format!("set {next} started"));
        true
    }

    /// Freeze the aggregate once the match is decided and hand off the
    /// record. Returns the record again on repeated calls.
    pub fn finalize_match(&mut self) -> Option<MatchRecord> {
        if self.finalized {
            return Some(self.snapshot());
        }
        if !self.is_match_decided() {
            self.reject("finalize before match decided".to_string());
            return None;
        }
        self.finalized = true;
        let timestamp = self.log.now();
        self.logger.info(
            timestamp,
            format!("match finalized {}", self.sets_won),
        );
        Some(self.snapshot())
    }

    // ------------------------------------------------------------------
    // Internal
    // ------------------------------------------------------------------

    /// Keep the completed-set record in step with the live score: record
    /// the result the moment a set reaches a finished score, withdraw it if
    /// an undo or adjustment un-finishes the set.
    fn sync_set_result(&mut self) {
        let set = self.current_set;
        let score = self.current_score();
        let finished = rules::is_set_finished(&score, self.config.set_config(set));
        let recorded = self.set_results.iter().position(|r| r.set_number == set);

        match (finished, recorded) {
            (true, None) => {
                if let Some(winner) = score.leader() {
                    self.set_results.push(SetResult {
                        set_number: set,
                        score,
                        winner,
                    });
                    self.sets_won.increment(winner);
                    let timestamp = self.log.now();
                    self.logger
                        .info(timestamp, format!("set {set} finished {score}, winner {winner}"));
                }
            }
            (false, Some(index)) => {
                let withdrawn = self.set_results.remove(index);
                self.sets_won.decrement(withdrawn.winner);
            }
            _ => {}
        }
    }

    /// Recompute every memoized counter for the active set from the log
    fn reproject_derived(&mut self) {
        let set = self.current_set;
        let entries = self.log.entries();

        let score = log::project_score(entries, set);
        let rally_phase = log::project_rally_phase(entries, set);
        let serving = self
            .first_server_per_set
            .get(&set)
            .map(|first| log::project_serving_team(entries, set, *first));
        let timeouts = Score::new(
            self.config
                .timeouts_per_set
                .saturating_sub(log::project_timeouts_used(entries, set, Team::MyTeam)),
            self.config
                .timeouts_per_set
                .saturating_sub(log::project_timeouts_used(entries, set, Team::Opponent)),
        );
        let subs = Score::new(
            self.config
                .subs_per_set
                .saturating_sub(log::project_subs_used(entries, set, Team::MyTeam)),
            self.config
                .subs_per_set
                .saturating_sub(log::project_subs_used(entries, set, Team::Opponent)),
        );
        let pairs = log::project_sub_pairs(entries, set);

        let index = set as usize - 1;
        self.scores[index] = score;
        self.rally_phase = rally_phase;
        if let Some(serving) = serving {
            self.serving_team = serving;
        }
        self.timeouts_remaining = timeouts;
        self.subs_remaining = subs;
        self.sub_pairs = pairs;
    }

    fn reject(&mut self, message: String) {
        let timestamp = self.log.now();
        self.logger.warn(timestamp, message);
    }
}
