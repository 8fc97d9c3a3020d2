use chrono::{NaiveDate, TimeZone, Utc};

use vmte::{
    BincodeSerializer, JsonSerializer, MatchClock, MatchRecordUpdate, MatchSetup, MatchState,
    PlayerId, RecordSerializer, Rotation, RotationDirection, SnapshotHasher, StatType, Team,
};

fn fixed_clock() -> MatchClock {
    MatchClock::fixed(Utc.with_ymd_and_hms(2025, 10, 4, 18, 0, 0).unwrap())
}

fn lineup() -> Rotation {
    let mut rotation = Rotation::empty();
    for (index, id) in ["s", "oh1", "mb1", "opp", "oh2", "mb2"].iter().enumerate() {
        rotation
            .substitute(index as u8 + 1, PlayerId::new(*id), false)
            .unwrap();
    }
    rotation
}

fn setup() -> MatchState {
    MatchSetup::new()
        .with_match_id("m1")
        .with_season_id("fall-2025")
        .with_my_team_name("Falcons")
        .with_opponent_name("Ridgeview")
        .with_date(NaiveDate::from_ymd_opt(2025, 10, 4).unwrap())
        .with_first_server(Team::MyTeam)
        .with_starting_rotation(lineup())
        .with_clock(fixed_clock())
        .build()
        .unwrap()
}

fn play_a_bit(state: &mut MatchState) {
    state.record_stat(Team::MyTeam, StatType::Ace, &[PlayerId::new("s")]);
    state.record_stat(Team::MyTeam, StatType::ServeGood, &[]);
    state.record_stat(
        Team::Opponent,
        StatType::Kill,
        &[PlayerId::new("x1"), PlayerId::new("x2")],
    );
    state.use_timeout(Team::MyTeam);
    state.substitute(3, PlayerId::new("bench1"), false).unwrap();
    state.rotate(RotationDirection::Forward).unwrap();
    state.record_stat(Team::Opponent, StatType::ServeError, &[]);
}

#[test]
fn test_bincode_round_trip() {
    let mut state = setup();
    play_a_bit(&mut state);
    let record = state.snapshot();

    let serializer = BincodeSerializer::new();
    let bytes = serializer.serialize(&record).unwrap();
    let decoded = serializer.deserialize(&bytes).unwrap();

    assert_eq!(decoded, record);
    assert_eq!(serializer.name(), "bincode");
}

#[test]
fn test_json_round_trip_both_modes() {
    let mut state = setup();
    play_a_bit(&mut state);
    let record = state.snapshot();

    for serializer in [JsonSerializer::new(), JsonSerializer::new_pretty()] {
        let bytes = serializer.serialize(&record).unwrap();
        let decoded = serializer.deserialize(&bytes).unwrap();
        assert_eq!(decoded, record);
    }
}

#[test]
fn test_json_rejects_garbage() {
    let serializer = JsonSerializer::new();
    assert!(serializer.deserialize(b"not json").is_err());
}

#[test]
fn test_identical_command_sequences_fingerprint_identically() {
    let mut first = setup();
    let mut second = setup();
    play_a_bit(&mut first);
    play_a_bit(&mut second);

    let hasher = SnapshotHasher::new();
    assert_eq!(first.snapshot(), second.snapshot());
    assert_eq!(
        hasher.hash(&first.snapshot()),
        hasher.hash(&second.snapshot())
    );
}

#[test]
fn test_divergent_histories_fingerprint_differently() {
    let mut first = setup();
    let mut second = setup();
    play_a_bit(&mut first);
    play_a_bit(&mut second);
    second.record_stat(Team::MyTeam, StatType::Ace, &[]);

    let hasher = SnapshotHasher::new();
    assert_ne!(
        hasher.hash(&first.snapshot()),
        hasher.hash(&second.snapshot())
    );
}

#[test]
fn test_resume_rebuilds_equivalent_aggregate() {
    let mut live = setup();
    play_a_bit(&mut live);
    let record = live.snapshot();

    let resumed = MatchSetup::new()
        .with_my_team_name("Falcons")
        .with_clock(fixed_clock())
        .resume(record.clone())
        .unwrap();

    assert_eq!(resumed.current_set(), live.current_set());
    assert_eq!(resumed.current_score(), live.current_score());
    assert_eq!(resumed.serving_team(), live.serving_team());
    assert_eq!(resumed.rally_phase(), live.rally_phase());
    assert_eq!(
        resumed.timeouts_remaining(Team::MyTeam),
        live.timeouts_remaining(Team::MyTeam)
    );
    assert_eq!(
        resumed.subs_remaining(Team::MyTeam),
        live.subs_remaining(Team::MyTeam)
    );
    assert_eq!(resumed.history(), live.history());
    assert_eq!(resumed.snapshot(), record);
    assert!(resumed.audit().is_consistent());
}

#[test]
fn test_resumed_aggregate_keeps_playing() {
    let mut live = setup();
    play_a_bit(&mut live);
    let record = live.snapshot();

    let mut resumed = MatchSetup::new()
        .with_my_team_name("Falcons")
        .with_clock(fixed_clock())
        .resume(record)
        .unwrap();

    let outcome = resumed
        .record_stat(resumed.serving_team(), StatType::Ace, &[])
        .unwrap();
    assert!(outcome.point_winner.is_some());
    assert!(resumed.audit().is_consistent());
}

#[test]
fn test_resume_rejects_sets_won_mismatch() {
    let mut live = setup();
    play_a_bit(&mut live);
    let mut record = live.snapshot();
    record.sets_won.my_team = 2;

    let result = MatchSetup::new()
        .with_my_team_name("Falcons")
        .resume(record);
    assert!(result.is_err());
}

#[test]
fn test_finalized_record_resumes_read_only() {
    let mut live = setup();
    for _ in 0..25 {
        live.record_stat(live.serving_team(), StatType::Ace, &[]);
    }
    // My team serves throughout: 25-0, set one done
    assert!(live.start_next_set());
    live.set_first_server(Team::Opponent);
    loop {
        let team = Team::MyTeam;
        let stat = if live.serving_team() == team {
            StatType::Ace
        } else {
            StatType::Kill
        };
        live.record_stat(team, stat, &[]);
        if live.is_current_set_finished() {
            break;
        }
    }
    let record = live.finalize_match().unwrap();

    let mut resumed = MatchSetup::new()
        .with_my_team_name("Falcons")
        .resume(record)
        .unwrap();
    assert!(resumed.is_finalized());
    assert!(resumed.record_stat(Team::MyTeam, StatType::Ace, &[]).is_none());
}

#[test]
fn test_record_update_attaches_narrative_after_handoff() {
    let mut state = setup();
    play_a_bit(&mut state);
    let mut record = state.snapshot();
    let id = record.id.clone();

    record
        .apply_update(MatchRecordUpdate::for_match(id).with_narrative("Tight opener."))
        .unwrap();
    assert_eq!(record.ai_narrative.as_deref(), Some("Tight opener."));
}
