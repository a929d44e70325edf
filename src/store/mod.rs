//! In-memory user data storage
//!
//! - Anonymous store: append-only value lists, list-only access
//! - Identified store: records with per-identity sequential ids
//!
//! Both live for the lifetime of the process; nothing is persisted.

mod anonymous;
mod identified;

pub use anonymous::AnonymousStore;
pub use identified::{parse_record_id, IdentifiedRecord, IdentifiedStore};

/// Storage component shared by all request handlers
#[derive(Default)]
pub struct UserDataStore {
    pub anonymous: AnonymousStore,
    pub identified: IdentifiedStore,
}

impl UserDataStore {
    pub fn new() -> Self {
        Self::default()
    }
}
