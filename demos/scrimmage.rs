//! Scrimmage walkthrough
//!
//! Tracks a short two-set match end to end: setup, live stat recording,
//! a timeout, a substitution, momentum readings, undo, finalization, and
//! the snapshot handed to a persistence layer.

use chrono::{NaiveDate, TimeZone, Utc};

use vmte::{
    JsonSerializer, MatchClock, MatchSetup, MatchState, Player, PlayerId, RecordSerializer,
    Rotation, SnapshotHasher, StatType, Team,
};

fn roster() -> Vec<Player> {
    vec![
        Player::new("p1", "Ada", 1).with_position("S"),
        Player::new("p2", "Bea", 7).with_position("OH"),
        Player::new("p3", "Cam", 11).with_position("MB"),
        Player::new("p4", "Dre", 4).with_position("OPP"),
        Player::new("p5", "Eve", 9).with_position("OH"),
        Player::new("p6", "Fay", 15).with_position("MB"),
        Player::new("p7", "Gia", 3).with_position("L"),
        Player::new("p8", "Hana", 12).with_position("MB"),
    ]
}

fn starting_lineup() -> Rotation {
    let mut rotation = Rotation::empty();
    for (index, id) in ["p1", "p2", "p3", "p4", "p5", "p6"].iter().enumerate() {
        rotation
            .substitute(index as u8 + 1, PlayerId::new(*id), false)
            .expect("starting lineup is valid");
    }
    rotation
}

fn win_set(state: &mut MatchState) {
    while !state.is_current_set_finished() {
        let stat = if state.serving_team() == Team::MyTeam {
            StatType::Ace
        } else {
            StatType::Kill
        };
        state.record_stat(Team::MyTeam, stat, &[PlayerId::new("p2")]);
    }
}

fn main() {
    // ====================================================================
    // Setup
    // ====================================================================
    let start = Utc.with_ymd_and_hms(2025, 10, 4, 18, 0, 0).unwrap();
    let mut state = MatchSetup::new()
        .with_match_id("scrimmage-001")
        .with_my_team_name("Falcons")
        .with_opponent_name("Ridgeview")
        .with_date(NaiveDate::from_ymd_opt(2025, 10, 4).unwrap())
        .with_roster(roster())
        .with_libero(PlayerId::new("p7"))
        .with_starting_rotation(starting_lineup())
        .with_first_server(Team::MyTeam)
        .with_clock(MatchClock::fixed(start))
        .build()
        .expect("setup is valid");

    println!(
        "{} vs {}, best of {}",
        state.my_team_name(),
        state.opponent_name(),
        state.config().total_sets
    );

    // ====================================================================
    // Set 1: a rough patch, a timeout, a recovery
    // ====================================================================
    state.record_stat(Team::MyTeam, StatType::ServeError, &[PlayerId::new("p1")]);
    state.record_stat(Team::Opponent, StatType::Ace, &[]);
    state.record_stat(Team::Opponent, StatType::Ace, &[]);

    let momentum = state.momentum(None);
    println!(
        "momentum {} ({:?}), suggest timeout: {}",
        momentum.score, momentum.trend, momentum.suggestion.should_timeout
    );
    if momentum.suggestion.should_timeout {
        println!("  reason: {}", momentum.suggestion.reason.unwrap_or_default());
        state.use_timeout(Team::MyTeam);
    }

    // Libero in for the back-row middle: free auto-swap
    let report = state
        .substitute(6, PlayerId::new("p7"), true)
        .expect("libero swap is legal");
    println!(
        "libero in at 6 (auto swap: {}), subs remaining {}",
        report.auto_swap,
        state.subs_remaining(Team::MyTeam)
    );

    // A mis-tap, undone
    state.record_stat(Team::Opponent, StatType::ServeGood, &[]);
    state.undo_last();

    win_set(&mut state);
    println!(
        "set 1: {} (sets {})",
        state.scores()[0],
        state.sets_won()
    );

    // ====================================================================
    // Set 2
    // ====================================================================
    state.start_next_set();
    if let Some(suggested) = state.suggest_first_server(2) {
        state.set_first_server(suggested);
    }
    state
        .substitute(3, PlayerId::new("p8"), false)
        .expect("fresh middle is legal");
    win_set(&mut state);
    println!("set 2: {} (sets {})", state.scores()[1], state.sets_won());

    // ====================================================================
    // Handoff to persistence
    // ====================================================================
    let record = state.finalize_match().expect("match is decided");
    let audit = state.audit();
    println!(
        "finalized: {:?}, audit consistent: {}",
        record.result,
        audit.is_consistent()
    );

    let serializer = JsonSerializer::new_pretty();
    let bytes = serializer
        .serialize(&record)
        .expect("record serializes");
    let fingerprint = SnapshotHasher::new().hash(&record);
    println!(
        "snapshot: {} bytes of {}, fingerprint {}",
        bytes.len(),
        serializer.name(),
        fingerprint
    );
}
