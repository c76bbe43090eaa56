//! Repository Implementation

use crate::StoreError;
use identity_verify::{Identity, TemplatePair};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// Stored enrollment for one identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub identity: Identity,
    pub pair: TemplatePair,
}

/// Repository of enrolled templates (in-memory with file snapshots)
pub struct TemplateStore {
    /// Records keyed by identity id
    records: Mutex<HashMap<Uuid, TemplateRecord>>,
}

impl TemplateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Insert a record, replacing any previous enrollment of the identity
    pub fn insert(&self, record: TemplateRecord) -> Result<(), StoreError> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        let id = record.identity.id;
        let replaced = records.insert(id, record).is_some();
        debug!("Stored template for {} (replaced: {})", id, replaced);
        Ok(())
    }

    /// Fetch a record by identity id
    pub fn get(&self, id: Uuid) -> Result<Option<TemplateRecord>, StoreError> {
        let records = self
            .records
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        Ok(records.get(&id).cloned())
    }

    /// Remove a record, returning it if present
    pub fn remove(&self, id: Uuid) -> Result<Option<TemplateRecord>, StoreError> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        Ok(records.remove(&id))
    }

    /// Number of stored records
    pub fn count(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Clear all records (for testing)
    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }

    /// Serialize every record to a snapshot file
    pub fn save_snapshot(&self, path: &Path) -> Result<(), StoreError> {
        let records = self
            .records
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        // Sort by id so identical contents produce identical snapshots
        let mut snapshot: Vec<&TemplateRecord> = records.values().collect();
        snapshot.sort_by_key(|r| r.identity.id);

        let bytes = postcard::to_allocvec(&snapshot)?;
        fs::write(path, &bytes)?;

        info!("Saved {} templates to {}", snapshot.len(), path.display());
        Ok(())
    }

    /// Load a store from a snapshot file
    pub fn load_snapshot(path: &Path) -> Result<Self, StoreError> {
        let bytes = fs::read(path)?;
        let snapshot: Vec<TemplateRecord> = postcard::from_bytes(&bytes)?;

        info!("Loaded {} templates from {}", snapshot.len(), path.display());
        let records = snapshot
            .into_iter()
            .map(|record| (record.identity.id, record))
            .collect();
        Ok(Self {
            records: Mutex::new(records),
        })
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(name: &str) -> TemplateRecord {
        TemplateRecord {
            identity: Identity::new(name),
            pair: TemplatePair {
                template: vec![1.0, 2.0, 3.0],
                steps: vec![0.002, 0.002, 0.8],
            },
        }
    }

    fn scratch_file(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("template-store-{}-{}.bin", tag, std::process::id()))
    }

    #[test]
    fn test_insert_and_get() {
        let store = TemplateStore::new();
        let rec = record("alice");
        let id = rec.identity.id;

        store.insert(rec).unwrap();
        assert_eq!(store.count(), 1);

        let fetched = store.get(id).unwrap().unwrap();
        assert_eq!(fetched.identity.name, "alice");
        assert_eq!(fetched.pair.template, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_insert_replaces_previous_enrollment() {
        let store = TemplateStore::new();
        let mut rec = record("alice");
        let id = rec.identity.id;

        store.insert(rec.clone()).unwrap();
        rec.pair.template = vec![9.0, 9.0, 9.0];
        store.insert(rec).unwrap();

        assert_eq!(store.count(), 1);
        let fetched = store.get(id).unwrap().unwrap();
        assert_eq!(fetched.pair.template, vec![9.0, 9.0, 9.0]);
    }

    #[test]
    fn test_get_missing_is_none() {
        let store = TemplateStore::new();
        assert!(store.get(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_remove_and_clear() {
        let store = TemplateStore::new();
        let rec = record("alice");
        let id = rec.identity.id;
        store.insert(rec).unwrap();
        store.insert(record("bob")).unwrap();

        assert!(store.remove(id).unwrap().is_some());
        assert_eq!(store.count(), 1);

        store.clear();
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let store = TemplateStore::new();
        let alice = record("alice");
        let bob = record("bob");
        let (alice_id, bob_id) = (alice.identity.id, bob.identity.id);
        store.insert(alice).unwrap();
        store.insert(bob).unwrap();

        let path = scratch_file("roundtrip");
        store.save_snapshot(&path).unwrap();

        let loaded = TemplateStore::load_snapshot(&path).unwrap();
        assert_eq!(loaded.count(), 2);
        assert_eq!(loaded.get(alice_id).unwrap().unwrap().identity.name, "alice");
        assert_eq!(
            loaded.get(bob_id).unwrap().unwrap().pair.steps,
            vec![0.002, 0.002, 0.8]
        );

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_snapshot_is_an_io_error() {
        let path = scratch_file("missing");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            TemplateStore::load_snapshot(&path),
            Err(StoreError::Io(_))
        ));
    }
}
