//! Sled-backed audit log for unresolved queries.
//!
//! When the pipeline ends in the generic-suggestion tier, the query is
//! recorded here for later curation of the knowledge content. This is the
//! only persistent state in the crate; knowledge data itself is immutable
//! in-memory. A failed audit write is logged and never surfaced to the user.

use serde::{Deserialize, Serialize};
use sled::Db;
use std::path::Path;
use uuid::Uuid;

/// Key prefix for unresolved-query records.
pub const UNRESOLVED_LOG_PREFIX: &str = "unresolved/";

const AUDIT_TREE: &str = "copilot_audit";

/// One unresolved query, written when no tier could answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnresolvedQuery {
    /// Unique identifier for this record.
    pub id: Uuid,
    /// The raw user text that could not be resolved.
    pub raw_text: String,
    /// Identity of the requester (badge id or account name).
    pub requester_identity: String,
    /// Role the requester held at the time.
    pub requester_role: String,
    /// Unix timestamp (milliseconds) when the query was given up on.
    pub timestamp_ms: i64,
}

impl UnresolvedQuery {
    /// Record stamped now.
    pub fn now(
        raw_text: impl Into<String>,
        requester_identity: impl Into<String>,
        requester_role: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            raw_text: raw_text.into(),
            requester_identity: requester_identity.into(),
            requester_role: requester_role.into(),
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Serializes to JSON bytes for storage.
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }

    /// Deserializes from JSON bytes.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }
}

/// Append-style store for audit records.
pub struct AuditStore {
    db: Db,
}

impl AuditStore {
    /// Opens or creates the audit DB at the given path.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, sled::Error> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Persist one unresolved query. Keys embed the timestamp and id so
    /// records never collide and scan in chronological order.
    pub fn record_unresolved(&self, record: &UnresolvedQuery) -> Result<(), sled::Error> {
        let key = format!(
            "{}{:020}_{}",
            UNRESOLVED_LOG_PREFIX, record.timestamp_ms, record.id
        );
        let tree = self.db.open_tree(AUDIT_TREE)?;
        tree.insert(key.as_bytes(), record.to_bytes())?;
        tracing::info!(
            target: "copilot::audit",
            requester = %record.requester_identity,
            "unresolved query recorded"
        );
        Ok(())
    }

    /// Most recent unresolved queries, newest first.
    pub fn recent_unresolved(&self, limit: usize) -> Result<Vec<UnresolvedQuery>, sled::Error> {
        let tree = self.db.open_tree(AUDIT_TREE)?;
        let mut records: Vec<UnresolvedQuery> = tree
            .scan_prefix(UNRESOLVED_LOG_PREFIX.as_bytes())
            .filter_map(|kv| kv.ok())
            .filter_map(|(_, bytes)| UnresolvedQuery::from_bytes(&bytes))
            .collect();
        records.sort_by_key(|r| std::cmp::Reverse(r.timestamp_ms));
        records.truncate(limit);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuditStore::open_path(dir.path().join("audit")).unwrap();

        let record = UnresolvedQuery::now("xyzabc nonsense", "emp-1", "employee");
        store.record_unresolved(&record).unwrap();

        let recent = store.recent_unresolved(10).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].raw_text, "xyzabc nonsense");
        assert_eq!(recent[0].requester_role, "employee");
    }

    #[test]
    fn test_recent_is_bounded_and_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuditStore::open_path(dir.path().join("audit")).unwrap();

        for i in 0..5 {
            let mut record = UnresolvedQuery::now(format!("query {}", i), "emp-1", "employee");
            // Force distinct, ordered timestamps.
            record.timestamp_ms = 1_000 + i;
            store.record_unresolved(&record).unwrap();
        }

        let recent = store.recent_unresolved(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].raw_text, "query 4");
        assert_eq!(recent[2].raw_text, "query 2");
    }
}
