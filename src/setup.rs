//! Setup collaborator adapter: the only way a match aggregate is born
//!
//! Configuration, roster, and starting lineup originate outside the core.
//! The builder validates what it is given and produces a live aggregate;
//! `resume` rebuilds one from a previously persisted record by re-deriving
//! every counter from the recorded history.

use std::collections::{BTreeMap, HashSet};

use chrono::{NaiveDate, NaiveTime};

use crate::clock::MatchClock;
use crate::error::ConfigError;
use crate::log::{self, EventLog};
use crate::logging::MatchLogger;
use crate::record::{MatchRecord, MatchResult};
use crate::rotation::{Rotation, RotationDirection};
use crate::rules;
use crate::state::MatchState;
use crate::types::{MatchConfig, MatchId, Player, PlayerId, RallyPhase, Score, SetResult, Team};

/// Fluent builder for a new match
#[derive(Debug, Clone)]
pub struct MatchSetup {
    match_id: Option<MatchId>,
    season_id: Option<String>,
    event_id: Option<String>,
    my_team_name: Option<String>,
    opponent_name: Option<String>,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    config: MatchConfig,
    roster: Vec<Player>,
    libero_ids: Vec<PlayerId>,
    starting_rotation: Option<Rotation>,
    first_server: Option<Team>,
    clock: MatchClock,
}

impl MatchSetup {
    /// Start an empty setup with the default configuration
    pub fn new() -> Self {
        Self {
            match_id: None,
            season_id: None,
            event_id: None,
            my_team_name: None,
            opponent_name: None,
            date: None,
            time: None,
            config: MatchConfig::default(),
            roster: Vec::new(),
            libero_ids: Vec::new(),
            starting_rotation: None,
            first_server: None,
            clock: MatchClock::system(),
        }
    }

    /// Set the match id; generated ids are the caller's concern
    pub fn with_match_id(mut self, id: impl Into<String>) -> Self {
        self.match_id = Some(MatchId::new(id));
        self
    }

    /// Attach a season
    pub fn with_season_id(mut self, id: impl Into<String>) -> Self {
        self.season_id = Some(id.into());
        self
    }

    /// Attach an event
    pub fn with_event_id(mut self, id: impl Into<String>) -> Self {
        self.event_id = Some(id.into());
        self
    }

    /// Name the tracked team
    pub fn with_my_team_name(mut self, name: impl Into<String>) -> Self {
        self.my_team_name = Some(name.into());
        self
    }

    /// Name the opponent
    pub fn with_opponent_name(mut self, name: impl Into<String>) -> Self {
        self.opponent_name = Some(name.into());
        self
    }

    /// Schedule the match date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Schedule the start time
    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Replace the default configuration
    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Supply the roster
    pub fn with_roster(mut self, roster: Vec<Player>) -> Self {
        self.roster = roster;
        self
    }

    /// Designate a libero
    pub fn with_libero(mut self, player_id: PlayerId) -> Self {
        self.libero_ids.push(player_id);
        self
    }

    /// Seed the starting lineup for set 1
    pub fn with_starting_rotation(mut self, rotation: Rotation) -> Self {
        self.starting_rotation = Some(rotation);
        self
    }

    /// Choose who serves first in set 1
    pub fn with_first_server(mut self, team: Team) -> Self {
        self.first_server = Some(team);
        self
    }

    /// Use an explicit clock (fixed clocks make runs reproducible)
    pub fn with_clock(mut self, clock: MatchClock) -> Self {
        self.clock = clock;
        self
    }

    fn validate_roster(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for player in &self.roster {
            if !seen.insert(&player.id) {
                return Err(ConfigError::DuplicateRosterId {
                    player_id: player.id.clone(),
                });
            }
        }
        if self.roster.is_empty() {
            return Ok(());
        }
        let roster_ids: HashSet<&PlayerId> = self.roster.iter().map(|p| &p.id).collect();
        if let Some(rotation) = &self.starting_rotation {
            for slot in rotation.slots() {
                if let Some(player_id) = &slot.player_id {
                    if !roster_ids.contains(player_id) {
                        return Err(ConfigError::UnknownLineupPlayer {
                            player_id: player_id.clone(),
                        });
                    }
                }
            }
        }
        for libero in &self.libero_ids {
            if !roster_ids.contains(libero) {
                return Err(ConfigError::UnknownLineupPlayer {
                    player_id: libero.clone(),
                });
            }
        }
        Ok(())
    }

    /// Validate and produce a live aggregate at set 1, score 0-0
    pub fn build(self) -> Result<MatchState, ConfigError> {
        self.config.validate()?;
        self.validate_roster()?;

        let my_team_name = self.my_team_name.ok_or_else(|| ConfigError::MissingField {
            field: "my_team_name".to_string(),
        })?;
        let opponent_name = self.opponent_name.ok_or_else(|| ConfigError::MissingField {
            field: "opponent_name".to_string(),
        })?;
        let date = self.date.ok_or_else(|| ConfigError::MissingField {
            field: "date".to_string(),
        })?;

        let mut rotation = self.starting_rotation.unwrap_or_default();
        let mut first_server_per_set = BTreeMap::new();
        let serving_team = self.first_server.unwrap_or(Team::MyTeam);
        if let Some(team) = self.first_server {
            first_server_per_set.insert(1, team);
            if team == Team::Opponent {
                // Opponent serves first: shift the starting lineup once so
                // stored positions match legal standing
                rotation.rotate(RotationDirection::Backward);
            }
        }

        let mut rotations_by_set = BTreeMap::new();
        rotations_by_set.insert(1, rotation);

        Ok(MatchState {
            match_id: self.match_id.unwrap_or_default(),
            season_id: self.season_id,
            event_id: self.event_id,
            my_team_name,
            opponent_name,
            date,
            time: self.time,
            timeouts_remaining: Score::both(self.config.timeouts_per_set),
            subs_remaining: Score::both(self.config.subs_per_set),
            config: self.config,
            current_set: 1,
            scores: vec![Score::default()],
            sets_won: Score::default(),
            set_results: Vec::new(),
            log: EventLog::new(self.clock),
            serving_team,
            rally_phase: RallyPhase::PreServe,
            rotations_by_set,
            sub_pairs: Default::default(),
            libero_ids: self.libero_ids.into_iter().collect(),
            first_server_per_set,
            finalized: false,
            logger: MatchLogger::default(),
        })
    }

    /// Rebuild a live aggregate from a persisted record. Every derived
    /// counter is re-projected from the recorded history; a record whose
    /// stored sets-won disagrees with its own history is rejected.
    pub fn resume(self, record: MatchRecord) -> Result<MatchState, ConfigError> {
        record.config.validate()?;

        let my_team_name = self.my_team_name.ok_or_else(|| ConfigError::MissingField {
            field: "my_team_name".to_string(),
        })?;

        let scores = if record.scores.is_empty() {
            vec![Score::default()]
        } else {
            record.scores.clone()
        };
        let current_set = scores.len() as u8;

        let mut set_results = Vec::new();
        let mut sets_won = Score::default();
        for (index, score) in scores.iter().enumerate() {
            let set_number = index as u8 + 1;
            if rules::is_set_finished(score, record.config.set_config(set_number)) {
                if let Some(winner) = score.leader() {
                    set_results.push(SetResult {
                        set_number,
                        score: *score,
                        winner,
                    });
                    sets_won.increment(winner);
                }
            }
        }
        if sets_won != record.sets_won {
            return Err(ConfigError::ResumeMismatch {
                reason: format!(
                    "record says sets won {} but history derives {}",
                    record.sets_won, sets_won
                ),
            });
        }

        let log = EventLog::from_entries(record.history, self.clock);
        let entries = log.entries();

        let first_server_per_set: BTreeMap<u8, Team> = record.first_servers;
        let serving_team = first_server_per_set
            .get(&current_set)
            .map(|first| log::project_serving_team(entries, current_set, *first))
            .unwrap_or(Team::MyTeam);
        let rally_phase = log::project_rally_phase(entries, current_set);
        let timeouts_remaining = Score::new(
            record
                .config
                .timeouts_per_set
                .saturating_sub(log::project_timeouts_used(entries, current_set, Team::MyTeam)),
            record
                .config
                .timeouts_per_set
                .saturating_sub(log::project_timeouts_used(entries, current_set, Team::Opponent)),
        );
        let subs_remaining = Score::new(
            record
                .config
                .subs_per_set
                .saturating_sub(log::project_subs_used(entries, current_set, Team::MyTeam)),
            record
                .config
                .subs_per_set
                .saturating_sub(log::project_subs_used(entries, current_set, Team::Opponent)),
        );
        let sub_pairs = log::project_sub_pairs(entries, current_set);

        let mut rotations_by_set = record.lineups;
        rotations_by_set.entry(current_set).or_default();

        Ok(MatchState {
            match_id: record.id,
            season_id: record.season_id,
            event_id: record.event_id,
            my_team_name,
            opponent_name: record.opponent_name,
            date: record.date,
            time: record.time,
            config: record.config,
            current_set,
            scores,
            sets_won,
            set_results,
            log,
            serving_team,
            rally_phase,
            rotations_by_set,
            timeouts_remaining,
            subs_remaining,
            sub_pairs,
            libero_ids: record.libero_ids.into_iter().collect(),
            first_server_per_set,
            finalized: record.result != MatchResult::Scheduled,
            logger: MatchLogger::default(),
        })
    }
}

impl Default for MatchSetup {
    fn default() -> Self {
        Self::new()
    }
}
