//! Pluggable snapshot encodings for the persistence collaborator

use crate::error::SerializationError;
use crate::record::MatchRecord;

/// Trait for pluggable record serialization
pub trait RecordSerializer: Send + Sync {
    /// Encode a record to bytes
    fn serialize(&self, record: &MatchRecord) -> Result<Vec<u8>, SerializationError>;

    /// Decode a record from bytes
    fn deserialize(&self, bytes: &[u8]) -> Result<MatchRecord, SerializationError>;

    /// Name of this encoding
    fn name(&self) -> &str;
}

/// Compact binary encoding
#[derive(Debug, Clone, Default)]
pub struct BincodeSerializer;

impl BincodeSerializer {
    /// Create a new bincode serializer
    pub fn new() -> Self {
        Self
    }
}

impl RecordSerializer for BincodeSerializer {
    fn serialize(&self, record: &MatchRecord) -> Result<Vec<u8>, SerializationError> {
        bincode::serialize(record).map_err(|e| SerializationError::SerializationFailed {
            reason: format!("Bincode serialization failed: {e}"),
        })
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<MatchRecord, SerializationError> {
        bincode::deserialize(bytes).map_err(|e| SerializationError::DeserializationFailed {
            reason: format!("Bincode deserialization failed: {e}"),
        })
    }

    fn name(&self) -> &str {
        "bincode"
    }
}

/// JSON encoding, the interchange format for cloud sync
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    /// Compact JSON
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Human-readable JSON
    pub fn new_pretty() -> Self {
        Self { pretty: true }
    }
}

impl RecordSerializer for JsonSerializer {
    fn serialize(&self, record: &MatchRecord) -> Result<Vec<u8>, SerializationError> {
        let result = if self.pretty {
            serde_json::to_vec_pretty(record)
        } else {
            serde_json::to_vec(record)
        };
        result.map_err(|e| SerializationError::SerializationFailed {
            reason: format!("JSON serialization failed: {e}"),
        })
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<MatchRecord, SerializationError> {
        serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializationFailed {
            reason: format!("JSON deserialization failed: {e}"),
        })
    }

    fn name(&self) -> &str {
        "json"
    }
}
