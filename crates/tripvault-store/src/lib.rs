//! Persistence layer for the tripvault platform.
//!
//! The remote backend is a keyed document store (flat collections, one level
//! of sub-collection nesting, atomic write batches) plus a keyed blob store.
//! Both are reached through the client traits in [`client`]; [`memory`]
//! provides in-process implementations used as the reference semantics and
//! the test double.
//!
//! On top of the clients sit three repositories:
//!
//! - [`plans::PlansRepository`]: the ordered plan collection. Plans live at
//!   dense integer-string keys, and every structural mutation (delete with
//!   reindex, swap) rewrites all affected slots in one atomic batch.
//! - [`memories::MemoriesRepository`]: flat memory records.
//! - [`images::ImagesRepository`]: memory image blobs behind an in-process
//!   write-through [`images::ImageCache`].

pub mod client;
pub mod document;
pub mod dto;
pub mod error;
pub mod images;
pub mod memories;
pub mod memory;
pub mod paths;
pub mod plans;

pub use client::{BlobStore, DocumentStore, MAX_BATCH_OPERATIONS, WriteBatch, WriteOp};
pub use document::{DocumentPath, Fields, Value};
pub use error::{ImagesError, MemoriesError, PlansError, StoreError};
pub use images::{ImageCache, ImagesRepository};
pub use memories::MemoriesRepository;
pub use memory::{InMemoryBlobStore, InMemoryDocumentStore};
pub use plans::PlansRepository;
