//! IndexedDB-backed [`Store`].
//!
//! ARCHITECTURE
//! ============
//! One database with four object stores (`baseMaps`, `categories`, `pois`,
//! `eventMaps`), each keyed by `id` with a `by_name` index; the category index
//! is unique and POIs also carry a `by_category` index. The shim below owns the
//! IndexedDB request/transaction plumbing and hands JSON text back and forth,
//! so the Rust side never touches `IDB*` types directly.

use async_trait::async_trait;
use editor::store::{Collection, StorageError, Store, WriteOp, record_id};
use js_sys::Promise;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::storage::codec::{classify_write_error, decode_record, decode_records, encode_batch};

#[wasm_bindgen(inline_js = "
const __emb_dbs = new Map();

export function emb_idb_open(name, version) {
    const key = name + '@' + version;
    if (__emb_dbs.has(key)) return __emb_dbs.get(key);

    const promise = new Promise((resolve, reject) => {
        try {
            const req = indexedDB.open(name, version);
            req.onupgradeneeded = () => {
                const db = req.result;
                const ensure = (store, indexes) => {
                    const os = db.objectStoreNames.contains(store)
                        ? req.transaction.objectStore(store)
                        : db.createObjectStore(store, { keyPath: 'id' });
                    for (const [index, path, unique] of indexes) {
                        if (!os.indexNames.contains(index)) os.createIndex(index, path, { unique });
                    }
                };
                ensure('baseMaps', [['by_name', 'name', false]]);
                ensure('categories', [['by_name', 'name', true]]);
                ensure('pois', [['by_name', 'name', false], ['by_category', 'categoryId', false]]);
                ensure('eventMaps', [['by_name', 'name', false]]);
            };
            req.onsuccess = () => resolve(req.result);
            req.onerror = () => reject(req.error || new Error('IndexedDB open failed'));
            req.onblocked = () => reject(new Error('IndexedDB open blocked by another tab'));
        } catch (e) {
            reject(e);
        }
    });
    __emb_dbs.set(key, promise);
    promise.catch(() => __emb_dbs.delete(key));
    return promise;
}

function __emb_write(db, stores, apply) {
    return new Promise((resolve, reject) => {
        try {
            const tx = db.transaction(stores, 'readwrite');
            let failure = null;
            for (const req of [].concat(apply(tx))) {
                req.onerror = () => { failure = req.error; };
            }
            tx.oncomplete = () => resolve(true);
            tx.onerror = () => reject(failure || tx.error || new Error('IndexedDB write failed'));
            tx.onabort = () => reject(failure || tx.error || new Error('IndexedDB write aborted'));
        } catch (e) {
            reject(e);
        }
    });
}

function __emb_read(db, store, query) {
    return new Promise((resolve, reject) => {
        try {
            const tx = db.transaction([store], 'readonly');
            const req = query(tx.objectStore(store));
            req.onsuccess = () => resolve(req.result);
            req.onerror = () => reject(req.error || new Error('IndexedDB read failed'));
        } catch (e) {
            reject(e);
        }
    });
}

export function emb_idb_add(db, store, json) {
    return __emb_write(db, [store], tx => tx.objectStore(store).add(JSON.parse(json)));
}

export function emb_idb_put(db, store, json) {
    return __emb_write(db, [store], tx => tx.objectStore(store).put(JSON.parse(json)));
}

export function emb_idb_delete(db, store, id) {
    return __emb_write(db, [store], tx => tx.objectStore(store).delete(id));
}

export function emb_idb_get(db, store, id) {
    return __emb_read(db, store, os => os.get(id))
        .then(row => (row === undefined ? null : JSON.stringify(row)));
}

export function emb_idb_get_all(db, store) {
    return __emb_read(db, store, os => os.getAll()).then(rows => JSON.stringify(rows));
}

export function emb_idb_find_by_name(db, store, name) {
    return __emb_read(db, store, os => os.index('by_name').getAll(name)).then(rows => JSON.stringify(rows));
}

export function emb_idb_commit(db, json) {
    const ops = JSON.parse(json);
    if (ops.length === 0) return Promise.resolve(true);
    const stores = [...new Set(ops.map(op => op.store))];
    return __emb_write(db, stores, tx =>
        ops.map(op => (op.op === 'put'
            ? tx.objectStore(op.store).put(op.record)
            : tx.objectStore(op.store).delete(op.id))));
}
")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn emb_idb_open(name: &str, version: u32) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch)]
    fn emb_idb_add(db: &JsValue, store: &str, json: &str) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch)]
    fn emb_idb_put(db: &JsValue, store: &str, json: &str) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch)]
    fn emb_idb_delete(db: &JsValue, store: &str, id: &str) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch)]
    fn emb_idb_get(db: &JsValue, store: &str, id: &str) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch)]
    fn emb_idb_get_all(db: &JsValue, store: &str) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch)]
    fn emb_idb_find_by_name(db: &JsValue, store: &str, name: &str) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch)]
    fn emb_idb_commit(db: &JsValue, json: &str) -> Result<Promise, JsValue>;
}

async fn settle(promise: Result<Promise, JsValue>) -> Result<JsValue, JsValue> {
    JsFuture::from(promise?).await
}

/// `name` and `message` of a rejected promise's reason.
fn js_error_parts(err: &JsValue) -> (Option<String>, String) {
    let field = |key: &str| js_sys::Reflect::get(err, &JsValue::from_str(key)).ok().and_then(|v| v.as_string());
    let message = field("message").or_else(|| err.as_string()).unwrap_or_else(|| format!("{err:?}"));
    (field("name"), message)
}

fn backend_error(err: &JsValue) -> StorageError {
    StorageError::Backend(js_error_parts(err).1)
}

fn write_error(collection: Collection, record: Option<&Value>, err: &JsValue) -> StorageError {
    let (name, message) = js_error_parts(err);
    classify_write_error(collection, record, name.as_deref(), message)
}

pub struct IdbStore {
    db: JsValue,
}

impl IdbStore {
    /// Open (creating or upgrading as needed) the database.
    ///
    /// # Errors
    ///
    /// Returns a backend error if IndexedDB is unavailable or the open is
    /// blocked.
    pub async fn open(name: &str, version: u32) -> Result<Self, StorageError> {
        let db = settle(emb_idb_open(name, version)).await.map_err(|e| backend_error(&e))?;
        log::info!("opened IndexedDB {name} v{version}");
        Ok(Self { db })
    }

    async fn write(&self, collection: Collection, record: &Value, overwrite: bool) -> Result<(), StorageError> {
        record_id(collection, record)?;
        let json = record.to_string();
        let promise = if overwrite {
            emb_idb_put(&self.db, collection.name(), &json)
        } else {
            emb_idb_add(&self.db, collection.name(), &json)
        };
        settle(promise).await.map_err(|e| write_error(collection, Some(record), &e))?;
        Ok(())
    }

    async fn read_text(&self, promise: Result<Promise, JsValue>) -> Result<Option<String>, StorageError> {
        let value = settle(promise).await.map_err(|e| backend_error(&e))?;
        Ok(value.as_string())
    }
}

#[async_trait(?Send)]
impl Store for IdbStore {
    async fn add(&self, collection: Collection, record: Value) -> Result<(), StorageError> {
        self.write(collection, &record, false).await
    }

    async fn put(&self, collection: Collection, record: Value) -> Result<(), StorageError> {
        self.write(collection, &record, true).await
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>, StorageError> {
        let raw = self.read_text(emb_idb_get(&self.db, collection.name(), id)).await?;
        decode_record(raw)
    }

    async fn get_all(&self, collection: Collection) -> Result<Vec<Value>, StorageError> {
        let raw = self.read_text(emb_idb_get_all(&self.db, collection.name())).await?;
        decode_records(raw.as_deref().unwrap_or("[]"))
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StorageError> {
        settle(emb_idb_delete(&self.db, collection.name(), id)).await.map_err(|e| write_error(collection, None, &e))?;
        Ok(())
    }

    async fn find_by_name(&self, collection: Collection, name: &str) -> Result<Vec<Value>, StorageError> {
        let raw = self.read_text(emb_idb_find_by_name(&self.db, collection.name(), name)).await?;
        decode_records(raw.as_deref().unwrap_or("[]"))
    }

    async fn commit(&self, batch: Vec<WriteOp>) -> Result<(), StorageError> {
        let Some(first) = batch.first() else {
            return Ok(());
        };
        let collection = match first {
            WriteOp::Put { collection, .. } | WriteOp::Delete { collection, .. } => *collection,
        };
        settle(emb_idb_commit(&self.db, &encode_batch(&batch))).await.map_err(|e| {
            log::warn!("batch of {} writes rolled back", batch.len());
            write_error(collection, None, &e)
        })?;
        Ok(())
    }
}
