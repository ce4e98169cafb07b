//! Generic write-through collection store.
//!
//! A [`CollectionStore`] owns the live records of one entity kind and writes
//! the whole collection back through its adapter after every mutation.
//! Writes are not transactional: when the adapter rejects a write the
//! in-memory mutation stands, the failure is logged, and it stays visible
//! through [`CollectionStore::last_write_error`] until the next good write.

use std::collections::HashSet;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::bus::{ChangeBus, ChangeEvent};
use crate::entities::Record;
use crate::error::{ErpError, Result};
use crate::storage::envelope::{self, Decoded, Skipped};
use crate::storage::{PersistenceAdapter, PersistenceExt};

struct Subscription {
    bus: ChangeBus,
    rx: Receiver<ChangeEvent>,
}

/// Where the live collection came from on the last load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Stored blob at the current schema version.
    Stored,
    /// Stored blob at an older version, upgraded and written back.
    Migrated { from: u32 },
    /// Nothing usable was stored; the seed was loaded and written.
    Seeded,
    /// Stored blob is from a newer build; the seed is live in memory only.
    NewerSchema { version: u32 },
    /// Some stored records did not decode. The readable ones are live and
    /// the stored blob is left as is until the next mutation.
    Partial { skipped: usize },
}

pub struct CollectionStore<T: Record> {
    adapter: Arc<dyn PersistenceAdapter>,
    seed: Vec<T>,
    items: Vec<T>,
    instance: String,
    outcome: LoadOutcome,
    last_write_error: Option<String>,
    subscription: Option<Subscription>,
}

impl<T: Record> CollectionStore<T> {
    /// Load the collection stored under `T::STORAGE_KEY`, falling back to
    /// `seed` when nothing usable is stored.
    pub fn open(adapter: Arc<dyn PersistenceAdapter>, seed: Vec<T>) -> Self {
        let mut store = Self {
            adapter,
            seed,
            items: Vec::new(),
            instance: Uuid::new_v4().to_string(),
            outcome: LoadOutcome::Seeded,
            last_write_error: None,
            subscription: None,
        };
        store.load();
        store
    }

    /// Like [`open`](Self::open), and also join `bus` so writes from other
    /// stores of the same key can be picked up with [`sync`](Self::sync).
    pub fn open_with_bus(adapter: Arc<dyn PersistenceAdapter>, seed: Vec<T>, bus: &ChangeBus) -> Self {
        let rx = bus.subscribe(T::STORAGE_KEY);
        let mut store = Self::open(adapter, seed);
        store.subscription = Some(Subscription {
            bus: bus.clone(),
            rx,
        });
        store
    }

    pub fn key(&self) -> &'static str {
        T::STORAGE_KEY
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn load_outcome(&self) -> LoadOutcome {
        self.outcome
    }

    /// Message of the most recent failed write, cleared by the next
    /// successful one.
    pub fn last_write_error(&self) -> Option<&str> {
        self.last_write_error.as_deref()
    }

    /// Append `record` under a freshly generated id and return that id.
    ///
    /// Any id already set on `record` is replaced.
    pub fn add(&mut self, mut record: T) -> String {
        let id = self.fresh_id();
        record.set_id(id.clone());
        record.normalize();
        self.items.push(record);
        self.persist();
        id
    }

    /// Parse a JSON object as a `T` and [`add`](Self::add) it.
    ///
    /// # Errors
    ///
    /// Returns `ErpError::Validation` if `draft` does not describe a valid
    /// record. The collection is left untouched.
    pub fn add_json(&mut self, draft: Value) -> Result<String> {
        let record: T = serde_json::from_value(draft)
            .map_err(|e| ErpError::Validation(format!("Invalid {} record: {}", T::STORAGE_KEY, e)))?;
        Ok(self.add(record))
    }

    /// Merge the top-level fields of `patch` over the record with `id`.
    ///
    /// Returns `Ok(false)` if no record has that id. An `id` field in the
    /// patch is ignored.
    ///
    /// # Errors
    ///
    /// Returns `ErpError::InvalidInput` if `patch` is not a JSON object, or
    /// `ErpError::Validation` if the merged record is not a valid `T`. Either
    /// way the collection is unchanged.
    pub fn update(&mut self, id: &str, patch: &Value) -> Result<bool> {
        let Value::Object(fields) = patch else {
            return Err(ErpError::InvalidInput(
                "Update patch must be a JSON object".to_string(),
            ));
        };
        let Some(index) = self.items.iter().position(|item| item.id() == id) else {
            return Ok(false);
        };

        let mut merged = match serde_json::to_value(&self.items[index])? {
            Value::Object(map) => map,
            _ => {
                return Err(ErpError::Serialization(format!(
                    "{} record does not serialize to an object",
                    T::STORAGE_KEY
                )))
            }
        };
        for (field, value) in fields {
            if field != "id" {
                merged.insert(field.clone(), value.clone());
            }
        }

        let mut updated: T = serde_json::from_value(Value::Object(merged)).map_err(|e| {
            ErpError::Validation(format!("Update of {} rejected: {}", id, e))
        })?;
        updated.set_id(id.to_string());
        updated.normalize();
        self.items[index] = updated;
        self.persist();
        Ok(true)
    }

    /// Drop every record whose id is in `ids`; returns how many were removed.
    pub fn remove<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let doomed: HashSet<&str> = ids.iter().map(AsRef::as_ref).collect();
        let before = self.items.len();
        self.items.retain(|item| !doomed.contains(item.id()));
        let removed = before - self.items.len();
        if removed > 0 {
            self.persist();
        }
        removed
    }

    /// Replace the whole collection.
    ///
    /// Records without an id get one; a repeated id keeps its first record.
    pub fn replace_all(&mut self, records: Vec<T>) {
        let mut seen = HashSet::new();
        let mut next = Vec::with_capacity(records.len());
        for mut record in records {
            if record.id().is_empty() {
                record.set_id(Uuid::new_v4().to_string());
            }
            if !seen.insert(record.id().to_string()) {
                tracing::debug!(key = T::STORAGE_KEY, id = record.id(), "duplicate id dropped");
                continue;
            }
            record.normalize();
            next.push(record);
        }
        self.items = next;
        self.persist();
    }

    /// Re-read the collection from storage.
    pub fn reload(&mut self) {
        self.load();
    }

    /// Apply pending change events from other stores of the same key.
    ///
    /// Reloads at most once, and only when another store wrote and the
    /// stored collection differs from the live one. Returns whether the
    /// live collection changed.
    pub fn sync(&mut self) -> bool {
        let Some(subscription) = &self.subscription else {
            return false;
        };
        let mut foreign = false;
        while let Ok(event) = subscription.rx.try_recv() {
            if event.source != self.instance {
                foreign = true;
            }
        }
        if !foreign {
            return false;
        }

        let before = signature(&self.items);
        let (items, outcome) = self.read_stored();
        if signature(&items) == before {
            return false;
        }
        tracing::debug!(key = T::STORAGE_KEY, "collection changed by another store");
        self.items = items;
        self.outcome = outcome;
        true
    }

    fn load(&mut self) {
        let (items, outcome) = self.read_stored();
        self.items = items;
        self.outcome = outcome;
        match outcome {
            LoadOutcome::Seeded | LoadOutcome::Migrated { .. } => self.persist(),
            LoadOutcome::Stored | LoadOutcome::NewerSchema { .. } | LoadOutcome::Partial { .. } => {}
        }
    }

    fn read_stored(&self) -> (Vec<T>, LoadOutcome) {
        let key = T::STORAGE_KEY;
        let Some(raw) = self.adapter.read::<Value>(key) else {
            return (self.seed.clone(), LoadOutcome::Seeded);
        };

        match envelope::decode::<T>(raw) {
            Decoded::Current { records, skipped } => {
                let outcome = partial_or(key, &skipped, LoadOutcome::Stored);
                (records, outcome)
            }
            Decoded::Migrated {
                from,
                records,
                skipped,
            } => {
                tracing::debug!(key, from, "stored collection migrated");
                let outcome = partial_or(key, &skipped, LoadOutcome::Migrated { from });
                (records, outcome)
            }
            Decoded::Newer(version) => {
                tracing::warn!(
                    key,
                    version,
                    "stored collection has a newer schema; using seed until the next change"
                );
                (self.seed.clone(), LoadOutcome::NewerSchema { version })
            }
            Decoded::Malformed(reason) => {
                tracing::warn!(key, %reason, "stored collection unreadable; using seed");
                (self.seed.clone(), LoadOutcome::Seeded)
            }
        }
    }

    fn persist(&mut self) {
        let key = T::STORAGE_KEY;
        match self.adapter.write(key, &envelope::encode(&self.items)) {
            Ok(()) => {
                tracing::debug!(key, records = self.items.len(), "collection written");
                self.last_write_error = None;
                if let LoadOutcome::NewerSchema { .. } | LoadOutcome::Partial { .. } = self.outcome {
                    self.outcome = LoadOutcome::Stored;
                }
                if let Some(subscription) = &self.subscription {
                    subscription.bus.publish(ChangeEvent {
                        key: key.to_string(),
                        source: self.instance.clone(),
                    });
                }
            }
            Err(err) => {
                tracing::warn!(key, adapter = self.adapter.name(), error = %err, "write failed");
                self.last_write_error = Some(err.to_string());
            }
        }
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

/// Log each undecodable record and downgrade `outcome` when any were found.
fn partial_or(key: &str, skipped: &[Skipped], outcome: LoadOutcome) -> LoadOutcome {
    for record in skipped {
        tracing::warn!(key, index = record.index, reason = %record.reason, "stored record skipped");
    }
    if skipped.is_empty() {
        outcome
    } else {
        LoadOutcome::Partial {
            skipped: skipped.len(),
        }
    }
}

fn signature<T: Record>(items: &[T]) -> String {
    serde_json::to_string(items).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Contact, ContactTab, User};
    use crate::storage::MemoryAdapter;
    use chrono::NaiveDate;
    use serde_json::json;

    fn memory() -> Arc<dyn PersistenceAdapter> {
        Arc::new(MemoryAdapter::new())
    }

    fn users(adapter: &Arc<dyn PersistenceAdapter>) -> CollectionStore<User> {
        CollectionStore::open(adapter.clone(), User::seed(NaiveDate::default()))
    }

    /// Adapter whose writes always fail.
    struct ReadOnly(MemoryAdapter);

    impl PersistenceAdapter for ReadOnly {
        fn name(&self) -> &'static str {
            "read-only"
        }
        fn read_raw(&self, key: &str) -> Result<Option<String>> {
            self.0.read_raw(key)
        }
        fn write_raw(&self, _key: &str, _value: &str) -> Result<()> {
            Err(ErpError::Storage("disk full".to_string()))
        }
        fn remove(&self, key: &str) -> Result<()> {
            self.0.remove(key)
        }
        fn keys(&self) -> Result<Vec<String>> {
            self.0.keys()
        }
    }

    #[test]
    fn test_open_writes_seed() {
        let adapter = memory();
        let store = users(&adapter);
        assert_eq!(store.load_outcome(), LoadOutcome::Seeded);
        assert_eq!(store.len(), 1);
        let raw = adapter.read_raw(User::STORAGE_KEY).unwrap().unwrap();
        assert!(raw.contains("\"schema_version\":1"));
    }

    #[test]
    fn test_add_assigns_new_id() {
        let adapter = memory();
        let mut store = users(&adapter);
        let draft = User {
            id: "U001".to_string(),
            ..store.items()[0].clone()
        };
        let id = store.add(draft);
        assert_ne!(id, "U001");
        assert_eq!(store.len(), 2);
        assert!(store.get(&id).is_some());
    }

    #[test]
    fn test_update_merges_and_ignores_id() {
        let adapter = memory();
        let mut store = users(&adapter);
        let changed = store
            .update("U001", &json!({"nome": "Erick S", "id": "hijack"}))
            .unwrap();
        assert!(changed);
        let user = store.get("U001").unwrap();
        assert_eq!(user.name, "Erick S");
        assert_eq!(user.login.as_deref(), Some("erick"));
    }

    #[test]
    fn test_update_unknown_and_invalid() {
        let adapter = memory();
        let mut store = users(&adapter);
        assert!(!store.update("nope", &json!({"nome": "x"})).unwrap());
        assert!(matches!(
            store.update("U001", &json!({"nome": 42})),
            Err(ErpError::Validation(_))
        ));
        assert!(matches!(
            store.update("U001", &json!(["nome"])),
            Err(ErpError::InvalidInput(_))
        ));
        assert_eq!(store.items(), User::seed(NaiveDate::default()).as_slice());
    }

    #[test]
    fn test_add_json_rejects_bad_draft() {
        let adapter = memory();
        let mut store = users(&adapter);
        assert!(store.add_json(json!({"email": "sem nome"})).is_err());
        assert_eq!(store.len(), 1);
        let id = store
            .add_json(json!({"nome": "Bia", "email": "bia@example.com", "permissao": "Leitura"}))
            .unwrap();
        assert_eq!(store.get(&id).unwrap().name, "Bia");
    }

    #[test]
    fn test_replace_all_dedupes() {
        let adapter = memory();
        let mut store: CollectionStore<Contact> =
            CollectionStore::open(adapter.clone(), Contact::seed(NaiveDate::default()));
        let mut first = store.items()[0].clone();
        first.name = "Primeiro".to_string();
        let mut dup = first.clone();
        dup.name = "Repetido".to_string();
        let mut fresh = first.clone();
        fresh.id = String::new();
        fresh.kind = ContactTab::Fornecedores;

        store.replace_all(vec![first, dup, fresh]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.items()[0].name, "Primeiro");
        assert!(!store.items()[1].id.is_empty());
    }

    #[test]
    fn test_write_failure_is_recorded_not_raised() {
        let adapter: Arc<dyn PersistenceAdapter> = Arc::new(ReadOnly(MemoryAdapter::new()));
        let mut store = users(&adapter);
        assert_eq!(store.last_write_error(), Some("Storage error: disk full"));

        let id = store.add(store.items()[0].clone());
        assert_eq!(store.len(), 2);
        assert!(store.get(&id).is_some());
        assert!(store.last_write_error().is_some());
    }

    #[test]
    fn test_newer_schema_not_overwritten_until_mutation() {
        let adapter = memory();
        let future = r#"{"schema_version":7,"records":[{"whatever":true}]}"#;
        adapter.write_raw(User::STORAGE_KEY, future).unwrap();

        let mut store = users(&adapter);
        assert_eq!(store.load_outcome(), LoadOutcome::NewerSchema { version: 7 });
        assert_eq!(store.len(), 1);
        assert_eq!(
            adapter.read_raw(User::STORAGE_KEY).unwrap().as_deref(),
            Some(future)
        );

        store.remove(&["U001"]);
        assert_eq!(store.load_outcome(), LoadOutcome::Stored);
        assert_ne!(
            adapter.read_raw(User::STORAGE_KEY).unwrap().as_deref(),
            Some(future)
        );
    }

    #[test]
    fn test_sync_picks_up_foreign_writes() {
        let adapter = memory();
        let bus = ChangeBus::new();
        let seed = User::seed(NaiveDate::default());
        let mut left = CollectionStore::open_with_bus(adapter.clone(), seed.clone(), &bus);
        let mut right = CollectionStore::open_with_bus(adapter.clone(), seed, &bus);

        assert!(!left.sync());
        assert!(!right.sync());

        left.remove(&["U001"]);
        assert!(!left.sync());
        assert!(right.sync());
        assert!(right.is_empty());
    }
}
