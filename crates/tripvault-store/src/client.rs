//! Client interfaces for the remote document and blob stores.
//!
//! Concrete backends (the hosted document database, the in-memory store in
//! [`crate::memory`]) implement these traits. Both traits are intentionally
//! object-safe so repositories can hold them as `Arc<dyn DocumentStore>` /
//! `Arc<dyn BlobStore>` without caring which backend is behind them.

use async_trait::async_trait;

use crate::document::{DocumentPath, Fields};
use crate::error::StoreError;

/// Upper bound on the number of operations in one atomic batch.
///
/// Mirrors the remote store's documented commit limit. Oversized batches are
/// rejected whole; there is no internal splitting, because a split batch
/// would forfeit atomicity.
pub const MAX_BATCH_OPERATIONS: usize = 500;

/// One write inside an atomic batch. Operations apply in batch order.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Create or fully overwrite the document at `path`.
    Set { path: DocumentPath, fields: Fields },
    /// Remove the document at `path`, together with every document nested in
    /// its sub-collections.
    Delete { path: DocumentPath },
}

/// An ordered sequence of writes applied atomically by
/// [`DocumentStore::commit`].
pub type WriteBatch = Vec<WriteOp>;

/// Keyed document store: flat top-level collections, one level of
/// sub-collection nesting, and an all-or-nothing write batch.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Full scan of a top-level collection.
    ///
    /// Documents come back in store-native string-key order, where `"10"`
    /// sorts before `"2"`. Callers that need positional order must sort the
    /// returned keys numerically themselves.
    async fn list(&self, collection: &str) -> Result<Vec<(String, Fields)>, StoreError>;

    /// Full scan of a sub-collection nested under one document. Same key
    /// ordering caveat as [`DocumentStore::list`]. A missing parent document
    /// yields an empty scan, not an error.
    async fn list_nested(
        &self,
        collection: &str,
        document: &str,
        subcollection: &str,
    ) -> Result<Vec<(String, Fields)>, StoreError>;

    /// Number of documents currently in a top-level collection.
    async fn count(&self, collection: &str) -> Result<usize, StoreError>;

    /// Apply `batch` atomically: either every operation lands or none does.
    ///
    /// A batch larger than [`MAX_BATCH_OPERATIONS`] fails with
    /// [`StoreError::BatchTooLarge`] before anything is written.
    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;
}

// Compile-time assertion: DocumentStore must stay object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn DocumentStore) {}
};

/// Keyed binary blob store.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload `data` under `path`, overwriting any existing blob.
    async fn put(&self, path: &str, data: &[u8]) -> Result<(), StoreError>;

    /// Download the blob at `path`.
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, StoreError>;

    /// Delete the blob at `path`.
    async fn delete(&self, path: &str) -> Result<(), StoreError>;
}

// Compile-time assertion: BlobStore must stay object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn BlobStore) {}
};
