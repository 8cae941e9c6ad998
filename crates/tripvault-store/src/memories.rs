//! Persistence for memory records.
//!
//! Memories live in a flat collection keyed `memory{index}`; the index is a
//! stable caller-assigned number, not a dense position, so there is no
//! reindexing here. Upload and delete address the same prefixed key.

use std::sync::Arc;

use tracing::debug;

use tripvault_core::Memory;

use crate::client::{DocumentStore, WriteOp};
use crate::document::DocumentPath;
use crate::dto;
use crate::error::MemoriesError;
use crate::paths;

pub struct MemoriesRepository {
    store: Arc<dyn DocumentStore>,
}

impl MemoriesRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn memory_path(index: i64) -> DocumentPath {
        DocumentPath::new(paths::MEMORIES, paths::memory_key(index))
    }

    /// Create or overwrite the record for `memory.index`.
    pub async fn upload(&self, memory: &Memory) -> Result<(), MemoriesError> {
        let batch = vec![WriteOp::Set {
            path: Self::memory_path(memory.index),
            fields: dto::memory_fields(memory),
        }];

        debug!(index = memory.index, "uploading memory");
        self.store.commit(batch).await.map_err(MemoriesError::Upload)
    }

    /// Read every memory record, ordered by stored index.
    pub async fn read(&self) -> Result<Vec<Memory>, MemoriesError> {
        let documents = self
            .store
            .list(paths::MEMORIES)
            .await
            .map_err(MemoriesError::Read)?;

        let mut memories = documents
            .iter()
            .map(|(key, fields)| {
                let path = DocumentPath::new(paths::MEMORIES, key.clone());
                dto::memory_from_fields(&path.to_string(), fields)
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(MemoriesError::Read)?;
        memories.sort_by_key(|memory| memory.index);

        debug!(count = memories.len(), "read memory collection");
        Ok(memories)
    }

    /// Delete the record at `index`.
    pub async fn delete(&self, index: i64) -> Result<(), MemoriesError> {
        let batch = vec![WriteOp::Delete {
            path: Self::memory_path(index),
        }];

        debug!(index, "deleting memory");
        self.store.commit(batch).await.map_err(MemoriesError::Delete)
    }
}
