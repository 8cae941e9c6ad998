//! In-process implementations of the store client traits.
//!
//! These back the test suites and pin down the reference semantics of the
//! interfaces: lexicographic scan order, cascading document deletes, and
//! all-or-nothing batch commits. The only way a batch can fail is the size
//! check, which runs before any mutation, so atomicity holds by
//! construction.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::{BlobStore, DocumentStore, MAX_BATCH_OPERATIONS, WriteBatch, WriteOp};
use crate::document::{DocumentPath, Fields};
use crate::error::StoreError;

#[derive(Debug, Default)]
struct DocumentNode {
    fields: Fields,
    subcollections: BTreeMap<String, BTreeMap<String, Fields>>,
}

type Collections = BTreeMap<String, BTreeMap<String, DocumentNode>>;

/// Keyed document store held entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: Mutex<Collections>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply(collections: &mut Collections, op: WriteOp) {
        match op {
            WriteOp::Set { path, fields } => {
                let documents = collections.entry(path.collection().to_owned()).or_default();
                match path.nested() {
                    None => {
                        documents.entry(path.document().to_owned()).or_default().fields = fields;
                    }
                    Some((subcollection, document)) => {
                        // Writing a nested document materialises the parent
                        // node if it does not exist yet.
                        documents
                            .entry(path.document().to_owned())
                            .or_default()
                            .subcollections
                            .entry(subcollection.to_owned())
                            .or_default()
                            .insert(document.to_owned(), fields);
                    }
                }
            }
            WriteOp::Delete { path } => {
                let Some(documents) = collections.get_mut(path.collection()) else {
                    return;
                };
                match path.nested() {
                    // Top-level delete drops the node, sub-collections and all.
                    None => {
                        documents.remove(path.document());
                    }
                    Some((subcollection, document)) => {
                        if let Some(node) = documents.get_mut(path.document()) {
                            if let Some(nested) = node.subcollections.get_mut(subcollection) {
                                nested.remove(document);
                            }
                        }
                    }
                }
            }
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn list(&self, collection: &str) -> Result<Vec<(String, Fields)>, StoreError> {
        let collections = self.collections.lock().expect("store lock poisoned");
        Ok(collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .map(|(key, node)| (key.clone(), node.fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_nested(
        &self,
        collection: &str,
        document: &str,
        subcollection: &str,
    ) -> Result<Vec<(String, Fields)>, StoreError> {
        let collections = self.collections.lock().expect("store lock poisoned");
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(document))
            .and_then(|node| node.subcollections.get(subcollection))
            .map(|documents| {
                documents
                    .iter()
                    .map(|(key, fields)| (key.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn count(&self, collection: &str) -> Result<usize, StoreError> {
        let collections = self.collections.lock().expect("store lock poisoned");
        Ok(collections.get(collection).map_or(0, BTreeMap::len))
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        if batch.len() > MAX_BATCH_OPERATIONS {
            return Err(StoreError::BatchTooLarge(batch.len()));
        }

        let mut collections = self.collections.lock().expect("store lock poisoned");
        for op in batch {
            Self::apply(&mut collections, op);
        }
        Ok(())
    }
}

/// Keyed blob store held entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    blobs: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, path: &str, data: &[u8]) -> Result<(), StoreError> {
        let mut blobs = self.blobs.lock().expect("blob lock poisoned");
        blobs.insert(path.to_owned(), data.to_vec());
        Ok(())
    }

    async fn fetch(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        let blobs = self.blobs.lock().expect("blob lock poisoned");
        blobs
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_owned()))
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        let mut blobs = self.blobs.lock().expect("blob lock poisoned");
        blobs
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(path.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Value;

    fn fields(title: &str) -> Fields {
        Fields::from([("title".to_owned(), Value::Str(title.to_owned()))])
    }

    #[tokio::test]
    async fn scan_order_is_lexicographic_not_numeric() {
        let store = InMemoryDocumentStore::new();
        let batch = ["2", "10", "1"]
            .into_iter()
            .map(|key| WriteOp::Set {
                path: DocumentPath::new("plans", key),
                fields: fields(key),
            })
            .collect();
        store.commit(batch).await.expect("commit should succeed");

        let keys: Vec<String> = store
            .list("plans")
            .await
            .expect("list should succeed")
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        // "10" before "2": the hazard positional callers must sort around.
        assert_eq!(keys, ["1", "10", "2"]);
    }

    #[tokio::test]
    async fn oversized_batch_is_rejected_before_any_write() {
        let store = InMemoryDocumentStore::new();
        let batch: WriteBatch = (0..=MAX_BATCH_OPERATIONS)
            .map(|i| WriteOp::Set {
                path: DocumentPath::new("plans", i.to_string()),
                fields: fields("plan"),
            })
            .collect();

        let err = store.commit(batch).await.expect_err("commit should fail");
        assert!(matches!(err, StoreError::BatchTooLarge(n) if n == MAX_BATCH_OPERATIONS + 1));
        assert_eq!(store.count("plans").await.expect("count"), 0);
    }

    #[tokio::test]
    async fn deleting_a_document_drops_its_subcollections() {
        let store = InMemoryDocumentStore::new();
        store
            .commit(vec![
                WriteOp::Set {
                    path: DocumentPath::new("plans", "0"),
                    fields: fields("plan"),
                },
                WriteOp::Set {
                    path: DocumentPath::new("plans", "0").child("schedules", "0"),
                    fields: fields("schedule"),
                },
            ])
            .await
            .expect("commit should succeed");

        store
            .commit(vec![WriteOp::Delete {
                path: DocumentPath::new("plans", "0"),
            }])
            .await
            .expect("delete should succeed");

        assert!(
            store
                .list_nested("plans", "0", "schedules")
                .await
                .expect("list should succeed")
                .is_empty()
        );
    }

    #[tokio::test]
    async fn missing_blob_reports_not_found() {
        let store = InMemoryBlobStore::new();
        store.put("memories/m1", &[1, 2, 3]).await.expect("put");
        assert_eq!(store.fetch("memories/m1").await.expect("fetch"), [1, 2, 3]);

        let err = store.fetch("memories/m2").await.expect_err("should miss");
        assert!(matches!(err, StoreError::NotFound(_)));
        store.delete("memories/m1").await.expect("delete");
        let err = store.delete("memories/m1").await.expect_err("already gone");
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
