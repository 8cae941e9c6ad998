//! Memory image persistence with an in-process write-through cache.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::client::BlobStore;
use crate::error::ImagesError;
use crate::paths;

/// Unbounded in-process cache of image bytes, keyed by opaque string.
///
/// Entries appear on first successful load or explicit put and are never
/// evicted. The remote blob store stays the source of truth, so the cache
/// can be dropped and rebuilt without data loss. Constructed and owned by
/// the caller and handed to whatever needs it; there is no hidden
/// process-wide instance.
#[derive(Debug, Default)]
pub struct ImageCache {
    images: Mutex<HashMap<String, Arc<[u8]>>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached bytes for `key`, if present.
    pub fn get(&self, key: &str) -> Option<Arc<[u8]>> {
        self.images
            .lock()
            .expect("image cache lock poisoned")
            .get(key)
            .cloned()
    }

    /// Store `image` under `key`, replacing any existing entry.
    pub fn put(&self, key: &str, image: Arc<[u8]>) {
        self.images
            .lock()
            .expect("image cache lock poisoned")
            .insert(key.to_owned(), image);
    }

    /// Return the cached bytes for `key`, or run `loader` to fetch them.
    ///
    /// On a hit the loader never runs. On a miss a successful load populates
    /// the cache before returning; a failed load propagates the error and
    /// leaves the entry absent, so a later call retries instead of serving a
    /// cached failure.
    pub async fn fetch_or_load<F, Fut, E>(&self, key: &str, loader: F) -> Result<Arc<[u8]>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<u8>, E>>,
    {
        if let Some(image) = self.get(key) {
            return Ok(image);
        }

        let image: Arc<[u8]> = loader().await?.into();
        self.put(key, Arc::clone(&image));
        Ok(image)
    }
}

/// Image persistence for memory records: a remote blob store behind a
/// write-through [`ImageCache`].
///
/// Blobs live at `memories/{key}`. Upload populates the cache on success;
/// read goes through the cache; delete removes only the remote blob, since
/// the cache has no eviction.
pub struct ImagesRepository {
    blobs: Arc<dyn BlobStore>,
    cache: Arc<ImageCache>,
}

impl ImagesRepository {
    pub fn new(blobs: Arc<dyn BlobStore>, cache: Arc<ImageCache>) -> Self {
        Self { blobs, cache }
    }

    /// Upload image bytes for `key`, caching them once the remote write
    /// succeeds.
    pub async fn upload(&self, key: &str, image: Vec<u8>) -> Result<(), ImagesError> {
        let path = paths::memory_image_path(key);
        self.blobs
            .put(&path, &image)
            .await
            .map_err(ImagesError::Upload)?;
        self.cache.put(key, image.into());

        debug!(key, "uploaded image");
        Ok(())
    }

    /// Image bytes for `key`: a cache hit, or a remote download that then
    /// populates the cache.
    pub async fn read(&self, key: &str) -> Result<Arc<[u8]>, ImagesError> {
        let path = paths::memory_image_path(key);
        self.cache
            .fetch_or_load(key, || async move { self.blobs.fetch(&path).await })
            .await
            .map_err(ImagesError::Load)
    }

    /// Remove the remote blob for `key`. Any cached copy is left in place.
    pub async fn delete(&self, key: &str) -> Result<(), ImagesError> {
        self.blobs
            .delete(&paths::memory_image_path(key))
            .await
            .map_err(ImagesError::Delete)?;

        debug!(key, "deleted image");
        Ok(())
    }
}
