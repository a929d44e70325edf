//! Append-only per-identity value lists with no record ids.

use crate::auth::Identity;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Default)]
pub struct AnonymousStore {
    records: RwLock<HashMap<Identity, Vec<Value>>>,
}

impl AnonymousStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to the identity's list, creating the list on first write.
    /// Returns the list length after the append.
    pub fn append(&self, identity: &Identity, data: Value) -> usize {
        let mut records = self.records.write();
        let list = records.entry(identity.clone()).or_default();
        list.push(data);
        list.len()
    }

    /// All values saved by the identity, in insertion order.
    pub fn list(&self, identity: &Identity) -> Vec<Value> {
        self.records
            .read()
            .get(identity)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_append_preserves_order() {
        let store = AnonymousStore::new();
        let alice = Identity::new("alice");

        assert_eq!(store.append(&alice, json!("d1")), 1);
        assert_eq!(store.append(&alice, json!({"k": 2})), 2);
        assert_eq!(store.append(&alice, json!([3])), 3);

        assert_eq!(store.list(&alice), vec![json!("d1"), json!({"k": 2}), json!([3])]);
    }

    #[test]
    fn test_unknown_identity_lists_empty() {
        let store = AnonymousStore::new();
        store.append(&Identity::new("alice"), json!(1));

        assert!(store.list(&Identity::new("bob")).is_empty());
    }

    #[test]
    fn test_list_is_repeatable() {
        let store = AnonymousStore::new();
        let alice = Identity::new("alice");
        store.append(&alice, Value::Null);

        assert_eq!(store.list(&alice), store.list(&alice));
        assert_eq!(store.list(&alice), vec![Value::Null]);
    }
}
