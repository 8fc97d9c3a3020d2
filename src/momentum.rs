//! Momentum analysis over the current set's event tail
//!
//! A read-only observer of the log: it never mutates match state and is
//! recomputed on demand. Timeouts reset the accounting, so every scan walks
//! backward from the most recent event and stops at the first timeout.

use serde::{Deserialize, Serialize};

use crate::event::{StatLog, StatType};
use crate::types::{Score, Team};

/// Window of recent points contributing to the momentum score
const SCORE_WINDOW: usize = 5;
/// Weight of the most recent point; each older point loses `WEIGHT_STEP`
const BASE_WEIGHT: i32 = 20;
const WEIGHT_STEP: i32 = 2;

/// Direction of the recent scoring trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

/// Whether the tracked team should consider a timeout, and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutSuggestion {
    pub should_timeout: bool,
    pub reason: Option<String>,
}

impl TimeoutSuggestion {
    fn none() -> Self {
        Self {
            should_timeout: false,
            reason: None,
        }
    }
}

/// The analyzer's output: a bounded score, its trend, and a suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomentumReading {
    /// Bounded to [-100, 100]; positive favors the tracked team
    pub score: i32,
    pub trend: Trend,
    pub suggestion: TimeoutSuggestion,
}

/// Read-model snapshot the analyzer consumes: the current set's events in
/// order, plus the scoreboard context callers already hold
#[derive(Debug, Clone)]
pub struct MomentumInput<'a> {
    pub events: &'a [StatLog],
    pub current_score: Score,
    pub serving_team: Team,
    /// Total point count at which the caller last dismissed a suggestion;
    /// suppresses re-triggering until the total changes
    pub dismissed_at_total_score: Option<u16>,
}

/// Analyze the tail of the current set
pub fn analyze(input: &MomentumInput<'_>) -> MomentumReading {
    let opponent_run = opponent_run(input.events);
    let error_chain = error_chain(input.events);
    let score = momentum_score(input.events);

    let mut suggestion = TimeoutSuggestion::none();
    if opponent_run >= 3 {
        suggestion.should_timeout = true;
        suggestion.reason = Some(format!("Opponent Run ({opponent_run}-0)"));
    }
    if error_chain >= 2 {
        suggestion.should_timeout = true;
        suggestion.reason = Some(format!("Consecutive Errors ({error_chain})"));
    }
    let gap_widening = input.current_score.opponent >= 20
        && opponent_run >= 2
        && input.current_score.opponent >= input.current_score.my_team + 2;
    if gap_widening {
        suggestion.should_timeout = true;
        suggestion.reason = Some("Gap Widening".to_string());
    }

    if input.dismissed_at_total_score == Some(input.current_score.total()) {
        suggestion = TimeoutSuggestion::none();
    }

    let trend = if score > 10 {
        Trend::Rising
    } else if score < -10 {
        Trend::Falling
    } else {
        Trend::Stable
    };

    MomentumReading {
        score,
        trend,
        suggestion,
    }
}

/// Point-producing events newest-first, stopping at the first timeout
fn terminal_tail(events: &[StatLog]) -> impl Iterator<Item = &StatLog> {
    events
        .iter()
        .rev()
        .take_while(|e| e.stat_type != StatType::Timeout)
        .filter(|e| e.point_winner().is_some())
}

/// Consecutive opponent-won points since the tracked team last scored (or
/// the last timeout)
fn opponent_run(events: &[StatLog]) -> u32 {
    let mut run = 0;
    for event in terminal_tail(events) {
        match event.point_winner() {
            Some(Team::Opponent) => run += 1,
            _ => break,
        }
    }
    run
}

/// Consecutive tracked-team unforced errors in the tail; an opponent point
/// earned by their own skill (or any tracked-team point) ends the chain
fn error_chain(events: &[StatLog]) -> u32 {
    let mut chain = 0;
    for event in terminal_tail(events) {
        if event.team == Team::MyTeam && event.stat_type.is_unforced_error() {
            chain += 1;
        } else {
            break;
        }
    }
    chain
}

/// Weighted sum of the last few points: the most recent counts
/// `BASE_WEIGHT`, each older point two less, clamped to [-100, 100]
fn momentum_score(events: &[StatLog]) -> i32 {
    let mut score = 0;
    for (recency, event) in terminal_tail(events).take(SCORE_WINDOW).enumerate() {
        let weight = BASE_WEIGHT - WEIGHT_STEP * recency as i32;
        match event.point_winner() {
            Some(Team::MyTeam) => score += weight,
            Some(Team::Opponent) => score -= weight,
            None => {}
        }
    }
    score.clamp(-100, 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MatchClock;
    use crate::event::StatDraft;
    use crate::log::EventLog;
    use chrono::{TimeZone, Utc};

    fn log_with(stats: &[(StatType, Team)]) -> EventLog {
        let start = Utc.with_ymd_and_hms(2025, 10, 4, 18, 0, 0).unwrap();
        let mut log = EventLog::new(MatchClock::fixed(start));
        let mut score = Score::default();
        for (stat, team) in stats {
            let event = log.append(StatDraft::new(*stat, *team), 1, score);
            if let Some(winner) = event.point_winner() {
                score.increment(winner);
            }
        }
        log
    }

    fn read(log: &EventLog, score: Score) -> MomentumReading {
        analyze(&MomentumInput {
            events: log.entries(),
            current_score: score,
            serving_team: Team::MyTeam,
            dismissed_at_total_score: None,
        })
    }

    #[test]
    fn test_opponent_run_triggers_suggestion() {
        let log = log_with(&[
            (StatType::Kill, Team::Opponent),
            (StatType::Kill, Team::Opponent),
            (StatType::Kill, Team::Opponent),
        ]);
        let reading = read(&log, Score::new(0, 3));

        assert!(reading.suggestion.should_timeout);
        assert_eq!(reading.suggestion.reason.as_deref(), Some("Opponent Run (3-0)"));
        assert_eq!(reading.trend, Trend::Falling);
    }

    #[test]
    fn test_my_point_breaks_the_run() {
        let log = log_with(&[
            (StatType::Kill, Team::Opponent),
            (StatType::Kill, Team::Opponent),
            (StatType::Kill, Team::MyTeam),
            (StatType::Kill, Team::Opponent),
            (StatType::Kill, Team::Opponent),
        ]);
        let reading = read(&log, Score::new(1, 4));
        assert!(!reading.suggestion.should_timeout);
    }

    #[test]
    fn test_timeout_resets_accounting() {
        let log = log_with(&[
            (StatType::Kill, Team::Opponent),
            (StatType::Kill, Team::Opponent),
            (StatType::Kill, Team::Opponent),
            (StatType::Timeout, Team::MyTeam),
        ]);
        let reading = read(&log, Score::new(0, 3));

        assert!(!reading.suggestion.should_timeout);
        assert_eq!(reading.score, 0);
        assert_eq!(reading.trend, Trend::Stable);
    }

    #[test]
    fn test_error_chain_triggers_suggestion() {
        let log = log_with(&[
            (StatType::AttackError, Team::MyTeam),
            (StatType::ServeError, Team::MyTeam),
        ]);
        let reading = read(&log, Score::new(0, 2));

        assert!(reading.suggestion.should_timeout);
        assert_eq!(
            reading.suggestion.reason.as_deref(),
            Some("Consecutive Errors (2)")
        );
    }

    #[test]
    fn test_opponent_earned_skill_is_not_an_error_chain() {
        let log = log_with(&[
            (StatType::Kill, Team::Opponent),
            (StatType::Ace, Team::Opponent),
        ]);
        let reading = read(&log, Score::new(0, 2));
        // Run of 2 is below threshold and no unforced errors in the tail
        assert!(!reading.suggestion.should_timeout);
    }

    #[test]
    fn test_later_trigger_overwrites_reason_but_keeps_flag() {
        // Three straight unforced errors: run trigger fires first, the
        // error-chain trigger overwrites its reason
        let log = log_with(&[
            (StatType::AttackError, Team::MyTeam),
            (StatType::ServeError, Team::MyTeam),
            (StatType::DigError, Team::MyTeam),
        ]);
        let reading = read(&log, Score::new(0, 3));

        assert!(reading.suggestion.should_timeout);
        assert_eq!(
            reading.suggestion.reason.as_deref(),
            Some("Consecutive Errors (3)")
        );
    }

    #[test]
    fn test_gap_widening_reason() {
        let mut stats = vec![(StatType::Kill, Team::MyTeam); 18];
        stats.push((StatType::Kill, Team::Opponent));
        stats.push((StatType::Kill, Team::Opponent));
        let log = log_with(&stats);
        let reading = read(&log, Score::new(18, 20));

        assert!(reading.suggestion.should_timeout);
        assert_eq!(reading.suggestion.reason.as_deref(), Some("Gap Widening"));
    }

    #[test]
    fn test_momentum_score_weights_recent_points() {
        let log = log_with(&[(StatType::Kill, Team::MyTeam)]);
        let reading = read(&log, Score::new(1, 0));
        assert_eq!(reading.score, 20);
        assert_eq!(reading.trend, Trend::Rising);

        let log = log_with(&[
            (StatType::Kill, Team::MyTeam),
            (StatType::Kill, Team::Opponent),
        ]);
        // Opponent point is most recent: -20, mine second: +18
        let reading = read(&log, Score::new(1, 1));
        assert_eq!(reading.score, -2);
        assert_eq!(reading.trend, Trend::Stable);
    }

    #[test]
    fn test_score_window_caps_at_five_points() {
        let log = log_with(&[(StatType::Kill, Team::Opponent); 8]);
        let reading = read(&log, Score::new(0, 8));
        // -(20 + 18 + 16 + 14 + 12)
        assert_eq!(reading.score, -80);
    }

    #[test]
    fn test_dismissal_suppresses_suggestion_until_score_changes() {
        let log = log_with(&[
            (StatType::Kill, Team::Opponent),
            (StatType::Kill, Team::Opponent),
            (StatType::Kill, Team::Opponent),
        ]);
        let dismissed = analyze(&MomentumInput {
            events: log.entries(),
            current_score: Score::new(0, 3),
            serving_team: Team::MyTeam,
            dismissed_at_total_score: Some(3),
        });
        assert!(!dismissed.suggestion.should_timeout);

        let later = analyze(&MomentumInput {
            events: log.entries(),
            current_score: Score::new(0, 3),
            serving_team: Team::MyTeam,
            dismissed_at_total_score: Some(2),
        });
        assert!(later.suggestion.should_timeout);
    }
}
