//! Error taxonomy: one coarse kind per repository operation family, each
//! wrapping the underlying store fault as its source.
//!
//! Callers branch on the kind alone; the wrapped [`StoreError`] stays
//! reachable through `std::error::Error::source` for diagnostics.

use thiserror::Error;

/// Fault reported by a store client.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network or backend failure while talking to the remote store.
    #[error("transport failure: {0}")]
    Transport(String),

    /// No document or blob exists at the given path.
    #[error("nothing stored at {0}")]
    NotFound(String),

    /// A stored field did not have the expected shape. Unrecoverable for the
    /// read that encountered it.
    #[error("document {path}: malformed field {field:?}")]
    MalformedField { path: String, field: String },

    /// A caller-supplied collection snapshot disagrees with the store.
    #[error("snapshot out of date: caller saw {snapshot} documents, store holds {stored}")]
    StaleSnapshot { snapshot: usize, stored: usize },

    /// A write batch exceeds the store's commit limit.
    #[error("batch of {0} operations exceeds the commit limit")]
    BatchTooLarge(usize),
}

/// Errors from the plans repository.
#[derive(Debug, Error)]
pub enum PlansError {
    #[error("plan upload failed")]
    Upload(#[source] StoreError),

    #[error("plan read failed")]
    Read(#[source] StoreError),

    #[error("plan delete failed")]
    Delete(#[source] StoreError),

    #[error("plan swap failed")]
    Swap(#[source] StoreError),
}

/// Errors from the memories repository.
#[derive(Debug, Error)]
pub enum MemoriesError {
    #[error("memory upload failed")]
    Upload(#[source] StoreError),

    #[error("memory read failed")]
    Read(#[source] StoreError),

    #[error("memory delete failed")]
    Delete(#[source] StoreError),
}

/// Errors from the images repository.
#[derive(Debug, Error)]
pub enum ImagesError {
    #[error("image upload failed")]
    Upload(#[source] StoreError),

    #[error("image download failed")]
    Load(#[source] StoreError),

    #[error("image delete failed")]
    Delete(#[source] StoreError),
}
