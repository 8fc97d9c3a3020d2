//! Pure scoring rules: set completion, set point, match point

use crate::types::{Score, SetConfig};

/// True when `side` has won the set against `other` under `config`: target
/// reached with the win-by margin, or the cap reached while strictly ahead
/// (the cap short-circuits the win-by requirement).
fn side_has_won(side: u16, other: u16, config: &SetConfig) -> bool {
    if side >= config.target_score && side >= other.saturating_add(config.win_by) {
        return true;
    }
    side == config.cap && side > other
}

/// Whether either side has won the set
pub fn is_set_finished(score: &Score, config: &SetConfig) -> bool {
    side_has_won(score.my_team, score.opponent, config)
        || side_has_won(score.opponent, score.my_team, config)
}

/// Whether scoring one more point would win the set for the team holding
/// `team_score`. Evaluated per side; both sides can hold set point at once
/// only when tied one point shy of the cap.
pub fn is_set_point(team_score: u16, other_score: u16, config: &SetConfig) -> bool {
    if team_score >= config.cap {
        return false;
    }
    side_has_won(team_score + 1, other_score, config)
}

/// Whether a set point would also decide the match
pub fn is_match_point(set_point_for_team: bool, sets_won_by_team: u8, total_sets: u8) -> bool {
    set_point_for_team && sets_won_by_team + 1 == sets_to_win(total_sets)
}

/// Number of set wins that decides a match
pub fn sets_to_win(total_sets: u8) -> u8 {
    (total_sets + 1) / 2
}

/// Deuce indicator: present when both sides are at or past one shy of the
/// target and the gap is still below the win-by margin
pub fn must_win_by_message(score: &Score, config: &SetConfig) -> Option<String> {
    let threshold = config.target_score.saturating_sub(1);
    if score.my_team < threshold || score.opponent < threshold {
        return None;
    }
    let gap = score.my_team.abs_diff(score.opponent);
    if gap < config.win_by {
        Some(format!("Deuce: win by {}", config.win_by))
    } else {
        None
    }
}
