//! Core data types for the match tracking engine

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigError;

/// Identifier for a player, resolved against an externally supplied roster
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Identifier for a match record
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(pub String);

impl MatchId {
    /// Create a new match id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two sides of a match, always from the tracked team's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Team {
    MyTeam,
    Opponent,
}

impl Team {
    /// The other side
    pub fn other(&self) -> Team {
        match self {
            Team::MyTeam => Team::Opponent,
            Team::Opponent => Team::MyTeam,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::MyTeam => write!(f, "my_team"),
            Team::Opponent => write!(f, "opponent"),
        }
    }
}

/// A pair of per-team counters: set scores, sets won, timeouts or
/// substitutions remaining all share this shape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub my_team: u16,
    pub opponent: u16,
}

impl Score {
    /// Create a score with explicit values
    pub fn new(my_team: u16, opponent: u16) -> Self {
        Self { my_team, opponent }
    }

    /// Create a counter pair with the same value on both sides
    pub fn both(value: u16) -> Self {
        Self {
            my_team: value,
            opponent: value,
        }
    }

    /// Get one side's value
    pub fn get(&self, team: Team) -> u16 {
        match team {
            Team::MyTeam => self.my_team,
            Team::Opponent => self.opponent,
        }
    }

    /// Set one side's value
    pub fn set(&mut self, team: Team, value: u16) {
        match team {
            Team::MyTeam => self.my_team = value,
            Team::Opponent => self.opponent = value,
        }
    }

    /// Increment one side by one
    pub fn increment(&mut self, team: Team) {
        let value = self.get(team).saturating_add(1);
        self.set(team, value);
    }

    /// Decrement one side by one, clamping at zero
    pub fn decrement(&mut self, team: Team) {
        let value = self.get(team).saturating_sub(1);
        self.set(team, value);
    }

    /// Total points across both sides
    pub fn total(&self) -> u16 {
        self.my_team + self.opponent
    }

    /// The side currently ahead, if any
    pub fn leader(&self) -> Option<Team> {
        match self.my_team.cmp(&self.opponent) {
            std::cmp::Ordering::Greater => Some(Team::MyTeam),
            std::cmp::Ordering::Less => Some(Team::Opponent),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.my_team, self.opponent)
    }
}

/// Scoring parameters for a single set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetConfig {
    pub target_score: u16,
    pub win_by: u16,
    pub cap: u16,
}

impl SetConfig {
    /// Create a set configuration
    pub fn new(target_score: u16, win_by: u16, cap: u16) -> Self {
        Self {
            target_score,
            win_by,
            cap,
        }
    }

    /// Validate the set configuration invariants
    pub fn validate(&self, set_index: usize) -> Result<(), ConfigError> {
        if self.cap < self.target_score {
            return Err(ConfigError::CapBelowTarget {
                set_index,
                target_score: self.target_score,
                cap: self.cap,
            });
        }
        if self.win_by < 1 {
            return Err(ConfigError::WinByTooSmall {
                set_index,
                win_by: self.win_by,
            });
        }
        Ok(())
    }
}

impl Default for SetConfig {
    fn default() -> Self {
        Self {
            target_score: 25,
            win_by: 2,
            cap: 27,
        }
    }
}

/// Immutable per-match configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub total_sets: u8,
    pub sets: Vec<SetConfig>,
    pub timeouts_per_set: u16,
    pub subs_per_set: u16,
}

impl MatchConfig {
    /// Create a match configuration
    pub fn new(
        total_sets: u8,
        sets: Vec<SetConfig>,
        timeouts_per_set: u16,
        subs_per_set: u16,
    ) -> Self {
        Self {
            total_sets,
            sets,
            timeouts_per_set,
            subs_per_set,
        }
    }

    /// Configuration for a given set number (1-based); the last entry is
    /// reused when the set number exceeds the configured list
    pub fn set_config(&self, set_number: u8) -> &SetConfig {
        let index = (set_number.max(1) as usize - 1).min(self.sets.len().saturating_sub(1));
        &self.sets[index]
    }

    /// Number of set wins required to take the match
    pub fn sets_to_win(&self) -> u8 {
        (self.total_sets + 1) / 2
    }

    /// Validate the configuration invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_sets == 0 {
            return Err(ConfigError::InvalidTotalSets {
                total_sets: self.total_sets,
            });
        }
        if self.sets.is_empty() {
            return Err(ConfigError::NoSetsConfigured);
        }
        for (index, set) in self.sets.iter().enumerate() {
            set.validate(index)?;
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            total_sets: 3,
            sets: vec![
                SetConfig::new(25, 2, 27),
                SetConfig::new(25, 2, 27),
                SetConfig::new(15, 2, 17),
            ],
            timeouts_per_set: 2,
            subs_per_set: 12,
        }
    }
}

/// Historical record of a completed set, immutable once appended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetResult {
    pub set_number: u8,
    pub score: Score,
    pub winner: Team,
}

/// The serve/rally phase of the state machine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RallyPhase {
    #[default]
    PreServe,
    InRally,
}

/// A roster entry supplied by the setup collaborator; the core stores only
/// ids and leaves name resolution to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub jersey_number: u8,
    pub positions: Vec<String>,
}

impl Player {
    /// Create a roster entry
    pub fn new(id: impl Into<String>, name: impl Into<String>, jersey_number: u8) -> Self {
        Self {
            id: PlayerId::new(id),
            name: name.into(),
            jersey_number,
            positions: Vec::new(),
        }
    }

    /// Add a position the player can fill
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.positions.push(position.into());
        self
    }
}
