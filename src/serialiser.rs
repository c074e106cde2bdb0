//! Byte encoding for persisted locks.
//!
//! The canonical encoding is a JSON object:
//!
//! ```json
//! {"id": "reports", "actor": "alice@build-01:4242", "until": "2024-05-01T12:00:00Z"}
//! ```
//!
//! `id` is omitted for locks on the default key. An absent lock encodes as
//! `null`; empty input also decodes as absent.

use crate::error::{LatchError, Result};
use crate::locks::{Held, Lock};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Converts locks to and from bytes.
pub trait LockSerialiser: Send + Sync {
    fn serialise(&self, lock: &Lock) -> Result<Vec<u8>>;
    fn unserialise(&self, bytes: &[u8]) -> Result<Lock>;
}

/// On-disk shape of a held lock.
#[derive(Debug, Serialize, Deserialize)]
struct LockRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    actor: String,
    until: DateTime<Utc>,
}

/// JSON encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLockSerialiser;

impl LockSerialiser for JsonLockSerialiser {
    fn serialise(&self, lock: &Lock) -> Result<Vec<u8>> {
        let record = lock.as_held().map(|held| LockRecord {
            id: held.id().map(str::to_string),
            actor: held.actor().to_string(),
            until: held.until(),
        });

        serde_json::to_vec(&record)
            .map_err(|e| LatchError::Serialisation(format!("failed to encode lock: {}", e)))
    }

    fn unserialise(&self, bytes: &[u8]) -> Result<Lock> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Lock::Absent);
        }

        let record: Option<LockRecord> = serde_json::from_slice(bytes)
            .map_err(|e| LatchError::Serialisation(format!("failed to decode lock: {}", e)))?;

        match record {
            None => Ok(Lock::Absent),
            Some(record) => Held::build(record.id, record.actor, record.until)
                .map(Lock::Held)
                .map_err(|e| LatchError::Serialisation(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::at;

    #[test]
    fn absent_lock_encodes_as_null() {
        let bytes = JsonLockSerialiser.serialise(&Lock::Absent).unwrap();
        assert_eq!(bytes, b"null");
        assert_eq!(JsonLockSerialiser.unserialise(&bytes).unwrap(), Lock::Absent);
    }

    #[test]
    fn empty_input_decodes_as_absent() {
        assert_eq!(JsonLockSerialiser.unserialise(b"").unwrap(), Lock::Absent);
        assert_eq!(JsonLockSerialiser.unserialise(b" \n").unwrap(), Lock::Absent);
    }

    #[test]
    fn default_key_lock_omits_id() {
        let lock = Lock::Held(Held::new("alice", at(100)).unwrap());
        let json = String::from_utf8(JsonLockSerialiser.serialise(&lock).unwrap()).unwrap();

        assert_eq!(json, r#"{"actor":"alice","until":"1970-01-01T00:01:40Z"}"#);
        assert_eq!(JsonLockSerialiser.unserialise(json.as_bytes()).unwrap(), lock);
    }

    #[test]
    fn keyed_lock_round_trips_with_id() {
        let lock = Lock::Held(Held::with_id("reports", "bob", at(1_700_000_000)).unwrap());
        let bytes = JsonLockSerialiser.serialise(&lock).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["id"], "reports");
        assert_eq!(value["actor"], "bob");

        assert_eq!(JsonLockSerialiser.unserialise(&bytes).unwrap(), lock);
    }

    #[test]
    fn accepts_rfc3339_with_offset() {
        let json = r#"{"actor":"alice","until":"1970-01-01T01:01:40+01:00"}"#;
        let lock = JsonLockSerialiser.unserialise(json.as_bytes()).unwrap();
        assert_eq!(lock, Lock::Held(Held::new("alice", at(100)).unwrap()));
    }

    #[test]
    fn malformed_data_is_a_serialisation_error() {
        let err = JsonLockSerialiser.unserialise(b"{not json").unwrap_err();
        assert!(matches!(err, LatchError::Serialisation(_)));

        let err = JsonLockSerialiser
            .unserialise(br#"{"actor":"alice","until":"yesterday"}"#)
            .unwrap_err();
        assert!(matches!(err, LatchError::Serialisation(_)));
    }

    #[test]
    fn persisted_empty_actor_is_rejected() {
        let err = JsonLockSerialiser
            .unserialise(br#"{"actor":"","until":"1970-01-01T00:01:40Z"}"#)
            .unwrap_err();
        assert!(matches!(err, LatchError::Serialisation(_)));
    }
}
