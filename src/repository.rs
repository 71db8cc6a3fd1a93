use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::error;

use crate::store::{
    ATTENDANCE_COLLECTION, Document, DocumentStore, EMPLOYEE_COLLECTION, LOG_COLLECTION,
};

/// Record repository over an injected document-store handle.
///
/// This is the error boundary for the whole crate: every transport and
/// serialization failure is absorbed here, traced, and converted to an
/// `Option`/`bool` result. Nothing above this layer ever sees a raw store
/// error, and a `None` is how "not found" is modeled — it is not an error.
pub struct Repository<S> {
    store: S,
}

impl<S: DocumentStore> Repository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create the three well-known collections. Run once at startup.
    pub async fn ensure_collections(&self) -> bool {
        for name in [EMPLOYEE_COLLECTION, ATTENDANCE_COLLECTION, LOG_COLLECTION] {
            if let Err(e) = self.store.get_or_create_collection(name).await {
                error!(error = %e, collection = name, "Collection bootstrap failed");
                return false;
            }
        }
        true
    }

    /// Point lookup within a collection. A store failure is traced and reads
    /// as not-found to the caller.
    pub async fn get_by_id(&self, collection: &str, id: &str) -> Option<Document> {
        match self.store.point_lookup(collection, id).await {
            Ok(doc) => doc,
            Err(e) => {
                error!(error = %e, collection, id, "Point lookup failed");
                None
            }
        }
    }

    /// Full scan of a collection. `None` means the scan itself failed,
    /// as opposed to an empty collection.
    pub async fn get_all(&self, collection: &str) -> Option<Vec<Document>> {
        match self.store.scan(collection).await {
            Ok(docs) => Some(docs),
            Err(e) => {
                error!(error = %e, collection, "Collection scan failed");
                None
            }
        }
    }

    /// Idempotent creation: an existing document is returned unchanged,
    /// otherwise the payload is inserted. Read-then-write, not atomic.
    pub async fn create_if_absent<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        payload: &T,
    ) -> Option<Document> {
        if let Some(existing) = self.get_by_id(collection, id).await {
            return Some(existing);
        }
        let body = match serde_json::to_value(payload) {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, collection, id, "Payload serialization failed");
                return None;
            }
        };
        match self.store.insert(collection, body).await {
            Ok(doc) => Some(doc),
            Err(e) => {
                error!(error = %e, collection, id, "Document creation failed");
                None
            }
        }
    }

    /// Whole-document overwrite keyed by a handle fetched immediately prior.
    /// Failure is reported to the caller, never escalated.
    pub async fn replace<T: Serialize>(&self, doc: &Document, payload: &T) -> bool {
        let body = match serde_json::to_value(payload) {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, id = %doc.id, "Payload serialization failed");
                return false;
            }
        };
        match self.store.replace(doc, body).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, collection = %doc.collection, id = %doc.id, "Replace failed");
                false
            }
        }
    }

    /// Decode a fetched document body. A malformed document is traced and
    /// skipped by callers rather than aborting a whole pass.
    pub fn decode<T: DeserializeOwned>(&self, doc: &Document) -> Option<T> {
        match serde_json::from_value(doc.body.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                error!(error = %e, collection = %doc.collection, id = %doc.id, "Malformed document");
                None
            }
        }
    }

    /// Fetch and decode in one step, keeping the raw handle for a later
    /// `replace`.
    pub async fn get_typed<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Option<(Document, T)> {
        let doc = self.get_by_id(collection, id).await?;
        let value = self.decode(&doc)?;
        Some((doc, value))
    }
}
