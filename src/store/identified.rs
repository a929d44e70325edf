//! Per-identity record lists where each record gets a sequential id.
//!
//! Ids come from a counter kept next to the records under one per-identity
//! mutex, so concurrent saves for the same identity never share an id.
//! Distinct identities only contend on the outer map lock, and only while a
//! log is first created.

use crate::auth::Identity;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A stored value paired with its per-identity id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedRecord {
    pub id: u64,
    pub data: Value,
}

struct RecordLog {
    next_id: u64,
    records: Vec<IdentifiedRecord>,
}

impl Default for RecordLog {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: Vec::new(),
        }
    }
}

#[derive(Default)]
pub struct IdentifiedStore {
    logs: RwLock<HashMap<Identity, Arc<Mutex<RecordLog>>>>,
}

impl IdentifiedStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn existing_log(&self, identity: &Identity) -> Option<Arc<Mutex<RecordLog>>> {
        self.logs.read().get(identity).cloned()
    }

    fn log_for(&self, identity: &Identity) -> Arc<Mutex<RecordLog>> {
        if let Some(log) = self.existing_log(identity) {
            return log;
        }
        self.logs
            .write()
            .entry(identity.clone())
            .or_default()
            .clone()
    }

    /// Append a record and return the id assigned to it.
    pub fn append(&self, identity: &Identity, data: Value) -> u64 {
        let log = self.log_for(identity);
        let mut log = log.lock();

        let id = log.next_id;
        log.next_id += 1;
        log.records.push(IdentifiedRecord { id, data });
        id
    }

    /// All records for the identity, in insertion order.
    pub fn list(&self, identity: &Identity) -> Vec<IdentifiedRecord> {
        match self.existing_log(identity) {
            Some(log) => {
                let log = log.lock();
                log.records.clone()
            }
            None => Vec::new(),
        }
    }

    /// First record with a matching id. An identity that never saved
    /// anything has no records, not an error.
    pub fn get(&self, identity: &Identity, id: u64) -> Option<IdentifiedRecord> {
        let log = self.existing_log(identity)?;
        let log = log.lock();
        log.records.iter().find(|r| r.id == id).cloned()
    }
}

/// Parse a record id from a path segment.
///
/// Matching is numeric rather than textual: surrounding whitespace is ignored
/// and `"02"` or `"2.0"` both name record 2. Anything that is not a positive
/// whole number yields `None`.
pub fn parse_record_id(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<u64>() {
        return (id > 0).then_some(id);
    }

    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value >= 1.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Some(value as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sequential_ids_per_identity() {
        let store = IdentifiedStore::new();
        let alice = Identity::new("alice");
        let bob = Identity::new("bob");

        assert_eq!(store.append(&alice, json!("d1")), 1);
        assert_eq!(store.append(&alice, json!("d2")), 2);
        assert_eq!(store.append(&bob, json!("b1")), 1);
        assert_eq!(store.append(&alice, json!("d3")), 3);

        let ids: Vec<u64> = store.list(&alice).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(
            store.get(&alice, 2),
            Some(IdentifiedRecord {
                id: 2,
                data: json!("d2")
            })
        );
    }

    #[test]
    fn test_lookup_is_isolated_between_identities() {
        let store = IdentifiedStore::new();
        let alice = Identity::new("alice");
        let bob = Identity::new("bob");
        store.append(&alice, json!({"secret": true}));

        assert!(store.list(&bob).is_empty());
        assert_eq!(store.get(&bob, 1), None);
    }

    #[test]
    fn test_missing_identity_and_missing_id_are_not_found() {
        let store = IdentifiedStore::new();
        let alice = Identity::new("alice");

        assert_eq!(store.get(&alice, 1), None);

        store.append(&alice, json!(1));
        assert_eq!(store.get(&alice, 9999), None);
    }

    #[test]
    fn test_concurrent_appends_assign_unique_ids() {
        let store = Arc::new(IdentifiedStore::new());
        let alice = Identity::new("alice");

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                let alice = alice.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store.append(&alice, json!([t, i]));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut ids: Vec<u64> = store.list(&alice).iter().map(|r| r.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=400).collect::<Vec<u64>>());
    }

    #[test]
    fn test_parse_record_id() {
        assert_eq!(parse_record_id("1"), Some(1));
        assert_eq!(parse_record_id(" 7 "), Some(7));
        assert_eq!(parse_record_id("02"), Some(2));
        assert_eq!(parse_record_id("2.0"), Some(2));
        assert_eq!(parse_record_id("0"), None);
        assert_eq!(parse_record_id("-1"), None);
        assert_eq!(parse_record_id("1.5"), None);
        assert_eq!(parse_record_id("abc"), None);
        assert_eq!(parse_record_id(""), None);
        assert_eq!(parse_record_id("NaN"), None);
    }
}
