//! In-process object store, used by tests and dry runs.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{Result, StoreError};
use crate::tagging::Tag;
use crate::uri::S3Uri;
use crate::ObjectStore;

#[derive(Debug, Clone, Default)]
struct Object {
    body: Vec<u8>,
    tags: Vec<Tag>,
}

/// Objects and tags held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<S3Uri, Object>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn objects(&self) -> MutexGuard<'_, HashMap<S3Uri, Object>> {
        self.objects.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert an object synchronously, replacing its body and keeping its tags.
    pub fn insert(&self, uri: &S3Uri, body: impl Into<Vec<u8>>) {
        self.objects().entry(uri.clone()).or_default().body = body.into();
    }

    /// Body of an object, if present.
    pub fn body(&self, uri: &S3Uri) -> Option<Vec<u8>> {
        self.objects().get(uri).map(|obj| obj.body.clone())
    }

    /// Tag set of an object, if present.
    pub fn tags(&self, uri: &S3Uri) -> Option<Vec<Tag>> {
        self.objects().get(uri).map(|obj| obj.tags.clone())
    }

    /// All object locations, sorted.
    pub fn keys(&self) -> Vec<S3Uri> {
        let mut keys: Vec<_> = self.objects().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn not_found(uri: &S3Uri) -> StoreError {
        StoreError::NotFound {
            uri: uri.to_string(),
        }
    }
}

impl ObjectStore for MemoryStore {
    async fn get_object(&self, uri: &S3Uri) -> Result<Vec<u8>> {
        self.body(uri).ok_or_else(|| Self::not_found(uri))
    }

    async fn put_object(&self, uri: &S3Uri, body: Vec<u8>) -> Result<()> {
        self.insert(uri, body);
        Ok(())
    }

    async fn get_object_tagging(&self, uri: &S3Uri) -> Result<Vec<Tag>> {
        self.tags(uri).ok_or_else(|| Self::not_found(uri))
    }

    async fn put_object_tagging(&self, uri: &S3Uri, tags: Vec<Tag>) -> Result<()> {
        let mut objects = self.objects();
        let obj = objects.get_mut(uri).ok_or_else(|| Self::not_found(uri))?;
        obj.tags = tags;
        Ok(())
    }
}
