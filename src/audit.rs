//! Drift detection between memoized counters and the event log
//!
//! The scores, serve ownership, rally phase, and per-set allowances the
//! aggregate caches must always equal what a pure fold over the log
//! produces. This module checks them field by field, which is how drift
//! bugs (a counter mutated outside the command path) surface in tests and
//! in the host application's debug tooling.

use serde::{Deserialize, Serialize};

use crate::log;
use crate::state::MatchState;
use crate::types::Team;

/// One cached field compared against its projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldAudit {
    pub field: String,
    pub cached: String,
    pub derived: String,
    pub matches: bool,
}

impl FieldAudit {
    fn compare<T: PartialEq + std::fmt::Debug>(field: impl Into<String>, cached: T, derived: T) -> Self {
        let matches = cached == derived;
        Self {
            field: field.into(),
            cached: format!("{cached:?}"),
            derived: format!("{derived:?}"),
            matches,
        }
    }
}

/// Field-by-field comparison of cached state against log projections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub fields: Vec<FieldAudit>,
}

impl AuditReport {
    /// Whether every cached field equals its projection
    pub fn is_consistent(&self) -> bool {
        self.fields.iter().all(|f| f.matches)
    }

    /// The fields that drifted
    pub fn mismatches(&self) -> Vec<&FieldAudit> {
        self.fields.iter().filter(|f| !f.matches).collect()
    }
}

/// Audit every memoized counter of a match against the event log
pub fn audit_match(state: &MatchState) -> AuditReport {
    let entries = state.history();
    let mut fields = Vec::new();

    for (index, cached) in state.scores().iter().enumerate() {
        let set_number = index as u8 + 1;
        let derived = log::project_score(entries, set_number);
        fields.push(FieldAudit::compare(
            format!("scores[set {set_number}]"),
            *cached,
            derived,
        ));
    }

    let set = state.current_set();
    if let Some(first) = state.first_server(set) {
        fields.push(FieldAudit::compare(
            "serving_team",
            state.serving_team(),
            log::project_serving_team(entries, set, first),
        ));
    }
    fields.push(FieldAudit::compare(
        "rally_phase",
        state.rally_phase(),
        log::project_rally_phase(entries, set),
    ));

    let config = state.config();
    for team in [Team::MyTeam, Team::Opponent] {
        fields.push(FieldAudit::compare(
            format!("timeouts_remaining[{team}]"),
            state.timeouts_remaining(team),
            config
                .timeouts_per_set
                .saturating_sub(log::project_timeouts_used(entries, set, team)),
        ));
        fields.push(FieldAudit::compare(
            format!("subs_remaining[{team}]"),
            state.subs_remaining(team),
            config
                .subs_per_set
                .saturating_sub(log::project_subs_used(entries, set, team)),
        ));
    }

    AuditReport { fields }
}
