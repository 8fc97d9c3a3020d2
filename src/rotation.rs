//! Lineup state and rotation mechanics
//!
//! A rotation is the assignment of six on-court players to positions 1-6.
//! Mutations that would corrupt the lineup (duplicate assignment, bad
//! position index) are rejected here and never reach the event log; a
//! libero standing in the front row is a reported fact, not a blocked
//! mutation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::RotationError;
use crate::types::PlayerId;

/// Direction of a cyclic rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationDirection {
    /// Position N's occupant moves to N-1, position 1 wraps to 6
    Forward,
    /// Inverse of forward
    Backward,
}

impl RotationDirection {
    /// The direction that undoes this one
    pub fn inverse(&self) -> RotationDirection {
        match self {
            RotationDirection::Forward => RotationDirection::Backward,
            RotationDirection::Backward => RotationDirection::Forward,
        }
    }
}

/// One of the six lineup slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupPosition {
    pub position: u8,
    pub player_id: Option<PlayerId>,
    pub is_libero: bool,
    pub designated_sub_id: Option<PlayerId>,
}

impl LineupPosition {
    fn vacant(position: u8) -> Self {
        Self {
            position,
            player_id: None,
            is_libero: false,
            designated_sub_id: None,
        }
    }
}

/// Result of a completed substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOutcome {
    pub position: u8,
    pub outgoing: Option<PlayerId>,
    /// Libero entered for a back-row player; a presentation hint, the
    /// rotation mechanics are unchanged
    pub auto_swap: bool,
}

/// A libero detected in the front row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IllegalLibero {
    pub position: u8,
    pub player_id: PlayerId,
}

/// Front-row positions, where a libero may not stand
pub fn is_front_row(position: u8) -> bool {
    matches!(position, 2 | 3 | 4)
}

/// The six-slot lineup for one set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rotation {
    slots: [LineupPosition; 6],
}

impl Rotation {
    /// Six vacant slots
    pub fn empty() -> Self {
        Self {
            slots: [
                LineupPosition::vacant(1),
                LineupPosition::vacant(2),
                LineupPosition::vacant(3),
                LineupPosition::vacant(4),
                LineupPosition::vacant(5),
                LineupPosition::vacant(6),
            ],
        }
    }

    /// Value copy of a previous set's lineup for a newly started set.
    /// Later edits to either copy never affect the other.
    pub fn cascade(previous: &Rotation) -> Rotation {
        previous.clone()
    }

    /// All six slots in position order
    pub fn slots(&self) -> &[LineupPosition; 6] {
        &self.slots
    }

    /// The slot at a position (1-6)
    pub fn slot(&self, position: u8) -> Option<&LineupPosition> {
        if (1..=6).contains(&position) {
            Some(&self.slots[position as usize - 1])
        } else {
            None
        }
    }

    /// The occupant of a position
    pub fn player_at(&self, position: u8) -> Option<&PlayerId> {
        self.slot(position).and_then(|s| s.player_id.as_ref())
    }

    /// The position a player currently occupies
    pub fn position_of(&self, player_id: &PlayerId) -> Option<u8> {
        self.slots
            .iter()
            .find(|s| s.player_id.as_ref() == Some(player_id))
            .map(|s| s.position)
    }

    /// Cyclically shift all six occupants one position. Slot payloads
    /// (player, libero flag, designated sub) travel together; the position
    /// numbers stay fixed to the slots.
    pub fn rotate(&mut self, direction: RotationDirection) {
        let payload = |slot: &LineupPosition| {
            (
                slot.player_id.clone(),
                slot.is_libero,
                slot.designated_sub_id.clone(),
            )
        };
        let old: Vec<_> = self.slots.iter().map(payload).collect();
        for index in 0..6 {
            let source = match direction {
                RotationDirection::Forward => (index + 1) % 6,
                RotationDirection::Backward => (index + 5) % 6,
            };
            let (player_id, is_libero, designated_sub_id) = old[source].clone();
            let slot = &mut self.slots[index];
            slot.player_id = player_id;
            slot.is_libero = is_libero;
            slot.designated_sub_id = designated_sub_id;
        }
    }

    /// Replace the occupant of a position. Rejects out-of-range positions
    /// and players already assigned to a different slot (clear that slot
    /// first). Returns the outgoing player and whether this was a libero
    /// entering for a back-row player.
    pub fn substitute(
        &mut self,
        position: u8,
        incoming: PlayerId,
        is_libero: bool,
    ) -> Result<SwapOutcome, RotationError> {
        if !(1..=6).contains(&position) {
            return Err(RotationError::InvalidPosition { position });
        }
        if let Some(existing) = self.position_of(&incoming) {
            if existing != position {
                return Err(RotationError::DuplicatePlayer {
                    player_id: incoming,
                    position: existing,
                });
            }
        }

        let slot = &mut self.slots[position as usize - 1];
        let outgoing = slot.player_id.replace(incoming);
        slot.is_libero = is_libero;
        let auto_swap = is_libero && !is_front_row(position) && outgoing.is_some();

        Ok(SwapOutcome {
            position,
            outgoing,
            auto_swap,
        })
    }

    /// Vacate a position
    pub fn clear(&mut self, position: u8) -> Result<Option<PlayerId>, RotationError> {
        if !(1..=6).contains(&position) {
            return Err(RotationError::InvalidPosition { position });
        }
        let slot = &mut self.slots[position as usize - 1];
        slot.is_libero = false;
        Ok(slot.player_id.take())
    }

    /// Record a designated substitute for a position
    pub fn set_designated_sub(
        &mut self,
        position: u8,
        sub_id: Option<PlayerId>,
    ) -> Result<(), RotationError> {
        if !(1..=6).contains(&position) {
            return Err(RotationError::InvalidPosition { position });
        }
        self.slots[position as usize - 1].designated_sub_id = sub_id;
        Ok(())
    }

    /// A libero (by slot flag or membership in the persistent libero set)
    /// occupying a front-row position. Reported, never blocked: the match
    /// continues and the caller alerts.
    pub fn detect_illegal_libero(&self, libero_ids: &HashSet<PlayerId>) -> Option<IllegalLibero> {
        for position in [2u8, 3, 4] {
            let slot = &self.slots[position as usize - 1];
            if let Some(player_id) = &slot.player_id {
                if slot.is_libero || libero_ids.contains(player_id) {
                    return Some(IllegalLibero {
                        position,
                        player_id: player_id.clone(),
                    });
                }
            }
        }
        None
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::empty()
    }
}
