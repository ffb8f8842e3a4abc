//! Persistence service contract.
//!
//! Records are opaque key/value documents grouped in named collections.
//! The service appends documents and returns them ordered by one field.

use std::cmp::Ordering;
use std::sync::RwLock;

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::core::PersistenceError;

/// A stored record.
pub type Document = serde_json::Map<String, Value>;

/// Append-only document store.
pub trait PersistenceService: Send + Sync {
    /// Store a document at the end of a collection.
    fn append(&self, collection: &str, document: Document) -> Result<(), PersistenceError>;

    /// All documents of a collection, ascending by `order_by`. Documents
    /// with equal keys keep insertion order; documents missing the field
    /// come last. Unknown collections are empty.
    fn query(&self, collection: &str, order_by: &str) -> Result<Vec<Document>, PersistenceError>;
}

/// Thread-safe in-process store. Not persistent across restarts.
#[derive(Debug, Default)]
pub struct InMemoryPersistence {
    collections: RwLock<FxHashMap<String, Vec<Document>>>,
}

impl InMemoryPersistence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection.
    pub fn len(&self, collection: &str) -> Result<usize, PersistenceError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| PersistenceError::LockPoisoned)?;
        Ok(collections.get(collection).map_or(0, Vec::len))
    }
}

impl PersistenceService for InMemoryPersistence {
    fn append(&self, collection: &str, document: Document) -> Result<(), PersistenceError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| PersistenceError::LockPoisoned)?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    fn query(&self, collection: &str, order_by: &str) -> Result<Vec<Document>, PersistenceError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| PersistenceError::LockPoisoned)?;
        let mut documents = collections.get(collection).cloned().unwrap_or_default();
        documents.sort_by(|a, b| compare_field(a.get(order_by), b.get(order_by)));
        Ok(documents)
    }
}

/// Order two field values: numbers numerically, strings lexically,
/// missing or mixed-type values after everything else.
fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => Ordering::Equal,
        },
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}
