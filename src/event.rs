//! Stat event types: the atomic units of match history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rotation::RotationDirection;
use crate::types::{PlayerId, Score, Team};

/// Closed set of recordable stat types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatType {
    // Serve outcomes
    Ace,
    ServeGood,
    ServeError,
    // Receive quality
    Receive3,
    Receive2,
    Receive1,
    Receive0,
    ReceiveError,
    // Attack outcomes
    Kill,
    AttackGood,
    AttackError,
    // Defense
    Block,
    Dig,
    DigError,
    // Faults
    SetError,
    PassError,
    Drop,
    // Administrative
    Timeout,
    PointAdjust,
    Substitution,
    Rotation,
}

/// Effect of a stat on the rally, derived exhaustively from the type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatOutcome {
    /// The acting team earned the point
    PointToActor,
    /// The acting team's error awarded the point to the other side
    PointAgainstActor,
    /// Play continues, no point decided
    Continuation,
    /// Bookkeeping entry, outside rally resolution
    Administrative,
}

impl StatType {
    /// How this stat resolves the rally. Errors award the point to the
    /// other team; earned skills award it to the acting team.
    pub fn outcome(&self) -> StatOutcome {
        match self {
            StatType::Ace | StatType::Kill | StatType::Block => StatOutcome::PointToActor,
            StatType::ServeError
            | StatType::Receive0
            | StatType::ReceiveError
            | StatType::AttackError
            | StatType::DigError
            | StatType::SetError
            | StatType::PassError
            | StatType::Drop => StatOutcome::PointAgainstActor,
            StatType::ServeGood
            | StatType::Receive3
            | StatType::Receive2
            | StatType::Receive1
            | StatType::AttackGood
            | StatType::Dig => StatOutcome::Continuation,
            StatType::Timeout
            | StatType::PointAdjust
            | StatType::Substitution
            | StatType::Rotation => StatOutcome::Administrative,
        }
    }

    /// Bookkeeping types that never resolve a rally
    pub fn is_administrative(&self) -> bool {
        self.outcome() == StatOutcome::Administrative
    }

    /// Types that decide a point for one side
    pub fn is_point_producing(&self) -> bool {
        matches!(
            self.outcome(),
            StatOutcome::PointToActor | StatOutcome::PointAgainstActor
        )
    }

    /// Serve-phase types, only legal for the serving team
    pub fn is_serve(&self) -> bool {
        matches!(self, StatType::Ace | StatType::ServeGood | StatType::ServeError)
    }

    /// Receive-phase types, only legal for the receiving team
    pub fn is_receive(&self) -> bool {
        matches!(
            self,
            StatType::Receive3
                | StatType::Receive2
                | StatType::Receive1
                | StatType::Receive0
                | StatType::ReceiveError
        )
    }

    /// Attack and block types that credit a setter when two players are
    /// selected
    pub fn supports_assist(&self) -> bool {
        matches!(
            self,
            StatType::Kill | StatType::AttackGood | StatType::AttackError | StatType::Block
        )
    }

    /// Unforced-error types counted by the momentum error chain
    pub fn is_unforced_error(&self) -> bool {
        matches!(
            self,
            StatType::ServeError
                | StatType::AttackError
                | StatType::DigError
                | StatType::Receive0
                | StatType::SetError
        )
    }

    /// Earned-skill types that break an error chain
    pub fn is_earned_skill(&self) -> bool {
        matches!(self, StatType::Kill | StatType::Ace | StatType::Block)
    }
}

/// Optional context attached to administrative events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatMetadata {
    /// Incoming player of a substitution
    pub sub_in: Option<PlayerId>,
    /// Outgoing player of a substitution
    pub sub_out: Option<PlayerId>,
    /// Lineup position a substitution touched
    pub position: Option<u8>,
    /// Libero entered for a back-row player; presentation hint only
    pub auto_swap: bool,
    /// Initial lineup assignment, outside the substitution allowance
    pub is_assignment: bool,
    /// Direction of a logged rotation
    pub rotation_direction: Option<RotationDirection>,
    /// Signed delta of a manual score adjustment
    pub adjustment: Option<i32>,
    /// Free-form annotation
    pub notes: Option<String>,
}

impl StatMetadata {
    /// Metadata for a substitution event
    pub fn substitution(
        position: u8,
        sub_in: PlayerId,
        sub_out: Option<PlayerId>,
        auto_swap: bool,
    ) -> Self {
        Self {
            sub_in: Some(sub_in),
            sub_out,
            position: Some(position),
            auto_swap,
            ..Self::default()
        }
    }

    /// Metadata for a logged rotation
    pub fn rotation(direction: RotationDirection) -> Self {
        Self {
            rotation_direction: Some(direction),
            ..Self::default()
        }
    }

    /// Metadata for a manual score adjustment
    pub fn adjustment(delta: i32) -> Self {
        Self {
            adjustment: Some(delta),
            ..Self::default()
        }
    }

    /// Mark as an initial lineup assignment
    pub fn as_assignment(mut self) -> Self {
        self.is_assignment = true;
        self
    }

    /// Attach a note
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A recorded event: immutable once appended, except through the explicit
/// edit operation on non-identity fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLog {
    pub id: u64,
    pub stat_type: StatType,
    pub team: Team,
    pub set_number: u8,
    pub player_id: Option<PlayerId>,
    pub assist_player_id: Option<PlayerId>,
    /// Score before this event applied
    pub score_snapshot: Score,
    pub timestamp: DateTime<Utc>,
    pub metadata: Option<StatMetadata>,
}

impl StatLog {
    /// Which side this event awarded the point to, if any
    pub fn point_winner(&self) -> Option<Team> {
        match self.stat_type.outcome() {
            StatOutcome::PointToActor => Some(self.team),
            StatOutcome::PointAgainstActor => Some(self.team.other()),
            StatOutcome::Continuation | StatOutcome::Administrative => None,
        }
    }
}

/// An event before the log assigns identity: everything the caller knows
/// without owning the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatDraft {
    pub stat_type: StatType,
    pub team: Team,
    pub player_id: Option<PlayerId>,
    pub assist_player_id: Option<PlayerId>,
    pub metadata: Option<StatMetadata>,
}

impl StatDraft {
    /// Create a draft for a stat type and acting team
    pub fn new(stat_type: StatType, team: Team) -> Self {
        Self {
            stat_type,
            team,
            player_id: None,
            assist_player_id: None,
            metadata: None,
        }
    }

    /// Credit the primary player
    pub fn with_player(mut self, player_id: PlayerId) -> Self {
        self.player_id = Some(player_id);
        self
    }

    /// Credit the assisting player
    pub fn with_assist(mut self, player_id: PlayerId) -> Self {
        self.assist_player_id = Some(player_id);
        self
    }

    /// Attach metadata
    pub fn with_metadata(mut self, metadata: StatMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Field updates for the post-hoc edit operation. Identity fields (id, set
/// number, score snapshot) and the acting team are never editable; a stat
/// type change must preserve the point outcome.
#[derive(Debug, Clone, Default)]
pub struct EntryEdit {
    pub stat_type: Option<StatType>,
    pub player_id: Option<PlayerId>,
    pub clear_player: bool,
    pub assist_player_id: Option<PlayerId>,
    pub clear_assist: bool,
    pub notes: Option<String>,
}

impl EntryEdit {
    /// Create an empty edit
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the stat type (must preserve the point outcome)
    pub fn with_stat_type(mut self, stat_type: StatType) -> Self {
        self.stat_type = Some(stat_type);
        self
    }

    /// Reassign the primary player
    pub fn with_player(mut self, player_id: PlayerId) -> Self {
        self.player_id = Some(player_id);
        self
    }

    /// Remove the primary player credit
    pub fn clearing_player(mut self) -> Self {
        self.clear_player = true;
        self
    }

    /// Reassign the assisting player
    pub fn with_assist(mut self, player_id: PlayerId) -> Self {
        self.assist_player_id = Some(player_id);
        self
    }

    /// Remove the assist credit
    pub fn clearing_assist(mut self) -> Self {
        self.clear_assist = true;
        self
    }

    /// Replace the notes annotation
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
