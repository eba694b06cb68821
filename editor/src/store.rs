//! Persistence contract: a transactional key-value store of JSON records.
//!
//! DESIGN
//! ======
//! The store knows nothing about the entity types. It holds plain JSON objects
//! per named [`Collection`], keyed by their `id` field and indexed by `name`.
//! Typed access goes through the [`Entity`] trait and the free helpers at the
//! bottom of this module, so both the in-memory store below and the browser
//! IndexedDB store in the client crate implement only the untyped seam.
//!
//! ERROR HANDLING
//! ==============
//! Every operation is atomic per call; [`Store::commit`] extends that to a
//! batch. Failures surface as [`StorageError`] and are never retried here.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

// =============================================================================
// TYPES
// =============================================================================

/// The four record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    BaseMaps,
    Categories,
    Pois,
    EventMaps,
}

impl Collection {
    pub const ALL: [Collection; 4] = [Self::BaseMaps, Self::Categories, Self::Pois, Self::EventMaps];

    /// Object store name in the browser database.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::BaseMaps => "baseMaps",
            Self::Categories => "categories",
            Self::Pois => "pois",
            Self::EventMaps => "eventMaps",
        }
    }

    /// Whether the `name` index rejects duplicates.
    #[must_use]
    pub fn unique_names(self) -> bool {
        matches!(self, Self::Categories)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{collection}: record {id} already exists")]
    Duplicate { collection: Collection, id: String },
    #[error("{collection}: name {name:?} is already taken")]
    UniqueName { collection: Collection, name: String },
    #[error("{collection}: record has no string `id`")]
    MissingKey { collection: Collection },
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// A single write inside an atomic [`Store::commit`].
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Put { collection: Collection, record: Value },
    Delete { collection: Collection, id: String },
}

impl WriteOp {
    /// Insert-or-replace `entity` as part of a batch.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the entity cannot be encoded.
    pub fn put<T: Entity>(entity: &T) -> Result<Self, StorageError> {
        Ok(Self::Put { collection: T::COLLECTION, record: serde_json::to_value(entity)? })
    }

    /// Delete the `T` record with `id` as part of a batch.
    #[must_use]
    pub fn delete<T: Entity>(id: &str) -> Self {
        Self::Delete { collection: T::COLLECTION, id: id.to_owned() }
    }
}

/// A record type stored in one collection.
pub trait Entity: Serialize + DeserializeOwned {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
}

/// Local transactional key-value store.
#[async_trait(?Send)]
pub trait Store {
    /// Insert a new record. Fails if a record with the same id exists.
    async fn add(&self, collection: Collection, record: Value) -> Result<(), StorageError>;

    /// Insert or replace a record.
    async fn put(&self, collection: Collection, record: Value) -> Result<(), StorageError>;

    /// Fetch a record by id. `Ok(None)` when absent.
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StorageError>;

    /// Every record in the collection, in unspecified order.
    async fn get_all(&self, collection: Collection) -> Result<Vec<Value>, StorageError>;

    /// Delete a record by id. Deleting a missing record succeeds.
    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StorageError>;

    /// Records whose `name` equals `name` exactly.
    async fn find_by_name(&self, collection: Collection, name: &str) -> Result<Vec<Value>, StorageError>;

    /// Apply a batch of writes atomically: all succeed or none are visible.
    async fn commit(&self, batch: Vec<WriteOp>) -> Result<(), StorageError>;
}

/// Read the `id` key of a JSON record.
///
/// # Errors
///
/// Returns [`StorageError::MissingKey`] if the record has no string id.
pub fn record_id(collection: Collection, record: &Value) -> Result<&str, StorageError> {
    record
        .get("id")
        .and_then(Value::as_str)
        .ok_or(StorageError::MissingKey { collection })
}

fn record_name(record: &Value) -> Option<&str> {
    record.get("name").and_then(Value::as_str)
}

// =============================================================================
// MEMORY STORE
// =============================================================================

type Tables = HashMap<Collection, Vec<Value>>;

/// In-memory [`Store`] that preserves insertion order.
///
/// Used as the test double for the editor and as a fallback when the browser
/// database cannot be opened. Writes can be made to fail on demand.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RefCell<Tables>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with a backend error until reset.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful write calls so far (a commit counts once).
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Number of records in `collection`.
    #[must_use]
    pub fn len(&self, collection: Collection) -> usize {
        self.tables.borrow().get(&collection).map_or(0, Vec::len)
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Backend("write rejected".into()));
        }
        Ok(())
    }

    fn finish_write(&self) {
        self.writes.set(self.writes.get() + 1);
    }
}

fn check_unique_name(tables: &Tables, collection: Collection, id: &str, record: &Value) -> Result<(), StorageError> {
    if !collection.unique_names() {
        return Ok(());
    }
    let Some(name) = record_name(record) else {
        return Ok(());
    };
    let taken = tables.get(&collection).is_some_and(|rows| {
        rows.iter()
            .any(|row| record_name(row) == Some(name) && row.get("id").and_then(Value::as_str) != Some(id))
    });
    if taken {
        return Err(StorageError::UniqueName { collection, name: name.to_owned() });
    }
    Ok(())
}

fn position(tables: &Tables, collection: Collection, id: &str) -> Option<usize> {
    tables
        .get(&collection)?
        .iter()
        .position(|row| row.get("id").and_then(Value::as_str) == Some(id))
}

fn put_into(tables: &mut Tables, collection: Collection, record: Value) -> Result<(), StorageError> {
    let id = record_id(collection, &record)?.to_owned();
    check_unique_name(tables, collection, &id, &record)?;
    let index = position(tables, collection, &id);
    let rows = tables.entry(collection).or_default();
    match index {
        Some(i) => rows[i] = record,
        None => rows.push(record),
    }
    Ok(())
}

fn delete_from(tables: &mut Tables, collection: Collection, id: &str) {
    if let Some(rows) = tables.get_mut(&collection) {
        rows.retain(|row| row.get("id").and_then(Value::as_str) != Some(id));
    }
}

#[async_trait(?Send)]
impl Store for MemoryStore {
    async fn add(&self, collection: Collection, record: Value) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut tables = self.tables.borrow_mut();
        let id = record_id(collection, &record)?;
        if position(&tables, collection, id).is_some() {
            return Err(StorageError::Duplicate { collection, id: id.to_owned() });
        }
        put_into(&mut tables, collection, record)?;
        self.finish_write();
        Ok(())
    }

    async fn put(&self, collection: Collection, record: Value) -> Result<(), StorageError> {
        self.check_writable()?;
        put_into(&mut self.tables.borrow_mut(), collection, record)?;
        self.finish_write();
        Ok(())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StorageError> {
        let tables = self.tables.borrow();
        Ok(position(&tables, collection, id).and_then(|i| tables.get(&collection).map(|rows| rows[i].clone())))
    }

    async fn get_all(&self, collection: Collection) -> Result<Vec<Value>, StorageError> {
        Ok(self.tables.borrow().get(&collection).cloned().unwrap_or_default())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        delete_from(&mut self.tables.borrow_mut(), collection, id);
        self.finish_write();
        Ok(())
    }

    async fn find_by_name(&self, collection: Collection, name: &str) -> Result<Vec<Value>, StorageError> {
        Ok(self
            .tables
            .borrow()
            .get(&collection)
            .map(|rows| rows.iter().filter(|row| record_name(row) == Some(name)).cloned().collect())
            .unwrap_or_default())
    }

    async fn commit(&self, batch: Vec<WriteOp>) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut staged = self.tables.borrow().clone();
        for op in batch {
            match op {
                WriteOp::Put { collection, record } => put_into(&mut staged, collection, record)?,
                WriteOp::Delete { collection, id } => delete_from(&mut staged, collection, &id),
            }
        }
        *self.tables.borrow_mut() = staged;
        self.finish_write();
        Ok(())
    }
}

// =============================================================================
// TYPED HELPERS
// =============================================================================

/// Add a new entity.
///
/// # Errors
///
/// Propagates [`Store::add`] failures.
pub async fn insert<T: Entity>(store: &dyn Store, entity: &T) -> Result<(), StorageError> {
    store.add(T::COLLECTION, serde_json::to_value(entity)?).await
}

/// Insert or replace an entity.
///
/// # Errors
///
/// Propagates [`Store::put`] failures.
pub async fn upsert<T: Entity>(store: &dyn Store, entity: &T) -> Result<(), StorageError> {
    store.put(T::COLLECTION, serde_json::to_value(entity)?).await
}

/// Fetch one entity by id.
///
/// # Errors
///
/// Propagates [`Store::get`] failures and decoding errors.
#[cfg(test)]
pub(crate) async fn fetch<T: Entity>(store: &dyn Store, id: &str) -> Result<Option<T>, StorageError> {
    match store.get(T::COLLECTION, id).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Fetch every entity of a collection.
///
/// # Errors
///
/// Propagates [`Store::get_all`] failures and decoding errors.
pub async fn fetch_all<T: Entity>(store: &dyn Store) -> Result<Vec<T>, StorageError> {
    store
        .get_all(T::COLLECTION)
        .await?
        .into_iter()
        .map(|value| serde_json::from_value(value).map_err(StorageError::from))
        .collect()
}

/// Delete an entity by id.
///
/// # Errors
///
/// Propagates [`Store::delete`] failures.
pub async fn remove<T: Entity>(store: &dyn Store, id: &str) -> Result<(), StorageError> {
    store.delete(T::COLLECTION, id).await
}
