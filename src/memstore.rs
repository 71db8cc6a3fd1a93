use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Result, anyhow, bail};
use serde_json::Value;

use crate::store::{Document, DocumentStore};

struct StoredDoc {
    etag: u64,
    body: Value,
}

/// In-process document store. Backs the interactive demo and every test; a
/// networked client implements the same `DocumentStore` trait and can be
/// swapped in at construction without touching any caller.
pub struct MemoryStore {
    collections: Mutex<HashMap<String, HashMap<String, StoredDoc>>>,
}

impl MemoryStore {
    /// Same construction shape as a remote client so the two stay
    /// interchangeable; the in-process store has no remote to dial.
    pub fn connect(_endpoint: &str, _key: &str) -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, HashMap<String, StoredDoc>>>> {
        self.collections
            .lock()
            .map_err(|_| anyhow!("store state poisoned"))
    }
}

impl DocumentStore for MemoryStore {
    async fn get_or_create_collection(&self, name: &str) -> Result<()> {
        self.lock()?.entry(name.to_string()).or_default();
        Ok(())
    }

    async fn point_lookup(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let state = self.lock()?;
        let coll = state
            .get(collection)
            .ok_or_else(|| anyhow!("no such collection: {collection}"))?;
        Ok(coll.get(id).map(|stored| Document {
            collection: collection.to_string(),
            id: id.to_string(),
            etag: stored.etag,
            body: stored.body.clone(),
        }))
    }

    async fn scan(&self, collection: &str) -> Result<Vec<Document>> {
        let state = self.lock()?;
        let coll = state
            .get(collection)
            .ok_or_else(|| anyhow!("no such collection: {collection}"))?;
        Ok(coll
            .iter()
            .map(|(id, stored)| Document {
                collection: collection.to_string(),
                id: id.clone(),
                etag: stored.etag,
                body: stored.body.clone(),
            })
            .collect())
    }

    async fn insert(&self, collection: &str, body: Value) -> Result<Document> {
        let id = body
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("document body has no string id field"))?
            .to_string();
        let mut state = self.lock()?;
        let coll = state
            .get_mut(collection)
            .ok_or_else(|| anyhow!("no such collection: {collection}"))?;
        if coll.contains_key(&id) {
            bail!("conflict: document {id} already exists in {collection}");
        }
        coll.insert(id.clone(), StoredDoc { etag: 1, body: body.clone() });
        Ok(Document {
            collection: collection.to_string(),
            id,
            etag: 1,
            body,
        })
    }

    async fn replace(&self, doc: &Document, body: Value) -> Result<()> {
        let mut state = self.lock()?;
        let coll = state
            .get_mut(&doc.collection)
            .ok_or_else(|| anyhow!("no such collection: {}", doc.collection))?;
        let stored = coll
            .get_mut(&doc.id)
            .ok_or_else(|| anyhow!("document {} vanished from {}", doc.id, doc.collection))?;
        // Last-writer-wins: the handle's etag is not compared, only bumped.
        stored.etag += 1;
        stored.body = body;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> MemoryStore {
        MemoryStore::connect("https://store.local:443/", "key")
    }

    #[tokio::test]
    async fn insert_then_lookup_roundtrips() {
        let store = store();
        store.get_or_create_collection("Employees").await.expect("bootstrap");

        let doc = store
            .insert("Employees", json!({"id": "42", "name": "Ada"}))
            .await
            .expect("insert");
        assert_eq!(doc.id, "42");

        let found = store
            .point_lookup("Employees", "42")
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(found.body["name"], "Ada");
    }

    #[tokio::test]
    async fn lookup_of_absent_id_is_none_not_error() {
        let store = store();
        store.get_or_create_collection("Employees").await.expect("bootstrap");

        let found = store.point_lookup("Employees", "7").await.expect("lookup");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn unknown_collection_is_an_error() {
        let store = store();
        assert!(store.point_lookup("Nope", "1").await.is_err());
        assert!(store.scan("Nope").await.is_err());
    }

    #[tokio::test]
    async fn duplicate_insert_conflicts() {
        let store = store();
        store.get_or_create_collection("Employees").await.expect("bootstrap");
        store
            .insert("Employees", json!({"id": "1"}))
            .await
            .expect("first insert");

        assert!(store.insert("Employees", json!({"id": "1"})).await.is_err());
    }

    #[tokio::test]
    async fn replace_overwrites_and_bumps_etag() {
        let store = store();
        store.get_or_create_collection("Employees").await.expect("bootstrap");
        let doc = store
            .insert("Employees", json!({"id": "1", "name": "old"}))
            .await
            .expect("insert");

        store
            .replace(&doc, json!({"id": "1", "name": "new"}))
            .await
            .expect("replace");

        let found = store
            .point_lookup("Employees", "1")
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(found.body["name"], "new");
        assert_eq!(found.etag, doc.etag + 1);
    }

    #[tokio::test]
    async fn scan_returns_every_document() {
        let store = store();
        store.get_or_create_collection("Employees").await.expect("bootstrap");
        for id in ["1", "2", "3"] {
            store
                .insert("Employees", json!({"id": id}))
                .await
                .expect("insert");
        }

        let docs = store.scan("Employees").await.expect("scan");
        assert_eq!(docs.len(), 3);
    }
}
