//! Integrity fingerprints for persisted match records
//!
//! Blake3 over the canonical bincode encoding gives the persistence
//! collaborator a cheap way to detect snapshot corruption and to verify
//! that two replays of the same history produced the same record.

use blake3::Hasher as Blake3Hasher;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::MatchRecord;

/// 32-byte fingerprint of a serialized record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordHash(pub [u8; 32]);

impl fmt::Display for RecordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Computes fingerprints for match records
///
/// # Panics
/// Hashing panics if record serialization fails, which should never happen
/// for a well-formed record.
#[derive(Debug, Clone, Default)]
pub struct SnapshotHasher;

impl SnapshotHasher {
    /// Create a new hasher
    pub fn new() -> Self {
        Self
    }

    /// Fingerprint one record
    pub fn hash(&self, record: &MatchRecord) -> RecordHash {
        let serialized =
            bincode::serialize(record).expect("record serialization should never fail");

        let mut hasher = Blake3Hasher::new();
        hasher.update(&serialized);
        RecordHash(*hasher.finalize().as_bytes())
    }

    /// Fingerprint an ordered sequence of record hashes, e.g. a season's
    /// worth of matches
    pub fn hash_chain(&self, hashes: &[RecordHash]) -> RecordHash {
        let mut hasher = Blake3Hasher::new();
        for hash in hashes {
            hasher.update(&hash.0);
        }
        RecordHash(*hasher.finalize().as_bytes())
    }

    /// Extend a chain with one more record hash without re-hashing the
    /// whole sequence
    pub fn extend_chain(&self, previous: &RecordHash, new_hash: &RecordHash) -> RecordHash {
        let mut hasher = Blake3Hasher::new();
        hasher.update(&previous.0);
        hasher.update(&new_hash.0);
        RecordHash(*hasher.finalize().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MatchResult;
    use crate::types::{MatchConfig, MatchId, Score};
    use chrono::NaiveDate;
    use std::collections::{BTreeMap, BTreeSet};

    fn record(opponent: &str) -> MatchRecord {
        MatchRecord {
            id: MatchId::new("m1"),
            season_id: None,
            event_id: None,
            opponent_name: opponent.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 10, 4).unwrap(),
            time: None,
            result: MatchResult::Scheduled,
            sets_won: Score::default(),
            scores: Vec::new(),
            history: Vec::new(),
            config: MatchConfig::default(),
            lineups: BTreeMap::new(),
            first_servers: BTreeMap::new(),
            libero_ids: BTreeSet::new(),
            ai_narrative: None,
        }
    }

    #[test]
    fn test_hash_is_deterministic() {
        let hasher = SnapshotHasher::new();
        let record = record("Ridgeview");
        assert_eq!(hasher.hash(&record), hasher.hash(&record));
    }

    #[test]
    fn test_different_records_hash_differently() {
        let hasher = SnapshotHasher::new();
        assert_ne!(
            hasher.hash(&record("Ridgeview")),
            hasher.hash(&record("Lakeside"))
        );
    }

    #[test]
    fn test_chain_order_matters() {
        let hasher = SnapshotHasher::new();
        let a = hasher.hash(&record("Ridgeview"));
        let b = hasher.hash(&record("Lakeside"));

        assert_ne!(hasher.hash_chain(&[a, b]), hasher.hash_chain(&[b, a]));
    }

    #[test]
    fn test_extend_chain_produces_valid_hash() {
        let hasher = SnapshotHasher::new();
        let a = hasher.hash(&record("Ridgeview"));
        let b = hasher.hash(&record("Lakeside"));

        let chain = hasher.hash_chain(&[a]);
        let extended = hasher.extend_chain(&chain, &b);
        assert_ne!(extended, chain);
    }
}
