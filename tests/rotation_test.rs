use proptest::prelude::*;
use std::collections::HashSet;

use vmte::{PlayerId, Rotation, RotationDirection, RotationError};

fn lineup(ids: &[&str; 6]) -> Rotation {
    let mut rotation = Rotation::empty();
    for (index, id) in ids.iter().enumerate() {
        rotation
            .substitute(index as u8 + 1, PlayerId::new(*id), false)
            .unwrap();
    }
    rotation
}

#[test]
fn test_forward_rotation_wraps_position_one_to_six() {
    let mut rotation = lineup(&["s", "oh1", "mb1", "opp", "oh2", "mb2"]);
    rotation.rotate(RotationDirection::Forward);

    assert_eq!(rotation.player_at(1), Some(&PlayerId::new("oh1")));
    assert_eq!(rotation.player_at(6), Some(&PlayerId::new("s")));
}

#[test]
fn test_backward_rotation_is_inverse_of_forward() {
    let original = lineup(&["s", "oh1", "mb1", "opp", "oh2", "mb2"]);
    let mut rotation = original.clone();

    rotation.rotate(RotationDirection::Forward);
    assert_ne!(rotation, original);
    rotation.rotate(RotationDirection::Backward);
    assert_eq!(rotation, original);
}

#[test]
fn test_six_forward_rotations_are_identity() {
    let original = lineup(&["s", "oh1", "mb1", "opp", "oh2", "mb2"]);
    let mut rotation = original.clone();
    for _ in 0..6 {
        rotation.rotate(RotationDirection::Forward);
    }
    assert_eq!(rotation, original);
}

#[test]
fn test_duplicate_assignment_is_rejected_before_reaching_state() {
    let mut rotation = lineup(&["s", "oh1", "mb1", "opp", "oh2", "mb2"]);
    let result = rotation.substitute(1, PlayerId::new("mb1"), false);

    assert_eq!(
        result,
        Err(RotationError::DuplicatePlayer {
            player_id: PlayerId::new("mb1"),
            position: 3,
        })
    );
    // Lineup unchanged by the rejected call
    assert_eq!(rotation.player_at(1), Some(&PlayerId::new("s")));
}

#[test]
fn test_cleared_player_can_be_reassigned() {
    let mut rotation = lineup(&["s", "oh1", "mb1", "opp", "oh2", "mb2"]);
    let removed = rotation.clear(3).unwrap();
    assert_eq!(removed, Some(PlayerId::new("mb1")));

    rotation.substitute(1, PlayerId::new("mb1"), false).unwrap();
    assert_eq!(rotation.player_at(1), Some(&PlayerId::new("mb1")));
}

#[test]
fn test_libero_detection_in_each_front_row_position() {
    let libero = PlayerId::new("lib");
    let mut libero_ids = HashSet::new();
    libero_ids.insert(libero.clone());

    for position in [2u8, 3, 4] {
        let mut rotation = lineup(&["s", "oh1", "mb1", "opp", "oh2", "mb2"]);
        rotation.clear(position).unwrap();
        rotation.substitute(position, libero.clone(), true).unwrap();

        let found = rotation.detect_illegal_libero(&libero_ids).unwrap();
        assert_eq!(found.position, position);
        assert_eq!(found.player_id, libero);
    }

    for position in [1u8, 5, 6] {
        let mut rotation = lineup(&["s", "oh1", "mb1", "opp", "oh2", "mb2"]);
        rotation.clear(position).unwrap();
        rotation.substitute(position, libero.clone(), true).unwrap();
        assert!(rotation.detect_illegal_libero(&libero_ids).is_none());
    }
}

#[test]
fn test_designated_sub_travels_with_rotation() {
    let mut rotation = lineup(&["s", "oh1", "mb1", "opp", "oh2", "mb2"]);
    rotation
        .set_designated_sub(3, Some(PlayerId::new("bench")))
        .unwrap();

    rotation.rotate(RotationDirection::Forward);
    // mb1 moved from 3 to 2, the designation follows
    assert_eq!(
        rotation.slot(2).unwrap().designated_sub_id,
        Some(PlayerId::new("bench"))
    );
}

proptest! {
    /// Rotation round-trip: forward then backward is the identity, and six
    /// forward steps return every payload to its slot
    #[test]
    fn prop_rotation_round_trip(ids in proptest::collection::hash_set(0u32..1000, 6)) {
        let ids: Vec<u32> = ids.into_iter().collect();
        let mut rotation = Rotation::empty();
        for (index, id) in ids.iter().enumerate() {
            rotation
                .substitute(index as u8 + 1, PlayerId::new(format!("p{id}")), index == 0)
                .unwrap();
        }
        let original = rotation.clone();

        rotation.rotate(RotationDirection::Forward);
        rotation.rotate(RotationDirection::Backward);
        prop_assert_eq!(&rotation, &original);

        for _ in 0..6 {
            rotation.rotate(RotationDirection::Forward);
        }
        prop_assert_eq!(&rotation, &original);
    }

    /// The occupant of position N lands on N-1 after a forward rotation
    #[test]
    fn prop_forward_moves_occupants_down_one(ids in proptest::collection::hash_set(0u32..1000, 6)) {
        let ids: Vec<u32> = ids.into_iter().collect();
        let mut rotation = Rotation::empty();
        for (index, id) in ids.iter().enumerate() {
            rotation
                .substitute(index as u8 + 1, PlayerId::new(format!("p{id}")), false)
                .unwrap();
        }
        let before = rotation.clone();
        rotation.rotate(RotationDirection::Forward);

        for position in 2..=6u8 {
            prop_assert_eq!(
                rotation.player_at(position - 1),
                before.player_at(position)
            );
        }
        prop_assert_eq!(rotation.player_at(6), before.player_at(1));
    }
}
