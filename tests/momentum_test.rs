use chrono::{TimeZone, Utc};

use vmte::momentum::{analyze, MomentumInput};
use vmte::{EventLog, MatchClock, Score, StatDraft, StatType, Team, Trend};

fn fixed_clock() -> MatchClock {
    MatchClock::fixed(Utc.with_ymd_and_hms(2025, 10, 4, 18, 0, 0).unwrap())
}

fn play(stats: &[(StatType, Team)]) -> (EventLog, Score) {
    let mut log = EventLog::new(fixed_clock());
    let mut score = Score::default();
    for (stat, team) in stats {
        let event = log.append(StatDraft::new(*stat, *team), 1, score);
        if let Some(winner) = event.point_winner() {
            score.increment(winner);
        }
    }
    (log, score)
}

fn read(log: &EventLog, score: Score, dismissed: Option<u16>) -> vmte::MomentumReading {
    analyze(&MomentumInput {
        events: log.entries(),
        current_score: score,
        serving_team: Team::MyTeam,
        dismissed_at_total_score: dismissed,
    })
}

#[test]
fn test_run_of_three_triggers_and_a_fourth_never_untriggers() {
    let mut stats = vec![(StatType::Kill, Team::Opponent); 3];
    let (log, score) = play(&stats);
    let at_three = read(&log, score, None);
    assert!(at_three.suggestion.should_timeout);
    assert_eq!(
        at_three.suggestion.reason.as_deref(),
        Some("Opponent Run (3-0)")
    );

    stats.push((StatType::Kill, Team::Opponent));
    let (log, score) = play(&stats);
    let at_four = read(&log, score, None);
    assert!(at_four.suggestion.should_timeout);
    assert_eq!(
        at_four.suggestion.reason.as_deref(),
        Some("Opponent Run (4-0)")
    );
    // Momentum keeps sliding in the opponent's favor
    assert!(at_four.score < at_three.score);
}

#[test]
fn test_score_magnitude_grows_until_window_caps() {
    let mut previous = 0;
    for n in 1..=5 {
        let (log, score) = play(&vec![(StatType::Kill, Team::Opponent); n]);
        let reading = read(&log, score, None);
        assert!(
            reading.score < previous,
            "expected strict growth at {n} points"
        );
        previous = reading.score;
    }

    // Past the window the score stops moving
    let (log, score) = play(&vec![(StatType::Kill, Team::Opponent); 6]);
    assert_eq!(read(&log, score, None).score, previous);
    assert_eq!(previous, -80);
}

#[test]
fn test_clamped_to_bounds() {
    let (log, score) = play(&vec![(StatType::Kill, Team::MyTeam); 10]);
    let reading = read(&log, score, None);
    assert!(reading.score <= 100);
    assert_eq!(reading.score, 80);
    assert_eq!(reading.trend, Trend::Rising);
}

#[test]
fn test_timeout_stops_every_scan() {
    let (mut log, score) = play(&vec![(StatType::AttackError, Team::MyTeam); 4]);
    log.append(StatDraft::new(StatType::Timeout, Team::MyTeam), 1, score);

    let reading = read(&log, score, None);
    assert!(!reading.suggestion.should_timeout);
    assert_eq!(reading.score, 0);
    assert_eq!(reading.trend, Trend::Stable);
}

#[test]
fn test_error_chain_counts_only_unforced_errors() {
    // Opponent earns one, then my unforced errors stack
    let (log, score) = play(&[
        (StatType::Kill, Team::Opponent),
        (StatType::ServeError, Team::MyTeam),
        (StatType::AttackError, Team::MyTeam),
    ]);
    let reading = read(&log, score, None);
    assert!(reading.suggestion.should_timeout);
    assert_eq!(
        reading.suggestion.reason.as_deref(),
        Some("Consecutive Errors (2)")
    );
}

#[test]
fn test_receive_error_is_not_in_the_unforced_chain() {
    let (log, score) = play(&[
        (StatType::ReceiveError, Team::MyTeam),
        (StatType::ReceiveError, Team::MyTeam),
    ]);
    let reading = read(&log, score, None);
    // Two opponent points but neither a chain of unforced errors nor a run
    // of three
    assert!(!reading.suggestion.should_timeout);
}

#[test]
fn test_gap_widening_requires_late_set_deficit() {
    let mut stats = vec![(StatType::Kill, Team::MyTeam); 17];
    stats.extend_from_slice(&[(StatType::Kill, Team::Opponent); 2]);

    // Opponent at 19: no trigger yet
    let (log, _) = play(&stats);
    let reading = read(&log, Score::new(17, 19), None);
    assert!(!reading.suggestion.should_timeout);

    stats.push((StatType::Kill, Team::Opponent));
    let (log, _) = play(&stats);
    let reading = read(&log, Score::new(17, 20), None);
    assert!(reading.suggestion.should_timeout);
    assert_eq!(reading.suggestion.reason.as_deref(), Some("Gap Widening"));
}

#[test]
fn test_dismissal_holds_until_total_changes() {
    let (log, score) = play(&vec![(StatType::Kill, Team::Opponent); 4]);

    let dismissed = read(&log, score, Some(score.total()));
    assert!(!dismissed.suggestion.should_timeout);
    assert!(dismissed.suggestion.reason.is_none());

    // A stale dismissal no longer suppresses
    let stale = read(&log, score, Some(score.total() - 1));
    assert!(stale.suggestion.should_timeout);
}

#[test]
fn test_trend_bands() {
    let (log, score) = play(&[(StatType::Kill, Team::MyTeam)]);
    assert_eq!(read(&log, score, None).trend, Trend::Rising);

    let (log, score) = play(&[(StatType::Kill, Team::Opponent)]);
    assert_eq!(read(&log, score, None).trend, Trend::Falling);

    let (log, score) = play(&[
        (StatType::Kill, Team::MyTeam),
        (StatType::Kill, Team::Opponent),
    ]);
    assert_eq!(read(&log, score, None).trend, Trend::Stable);
}
