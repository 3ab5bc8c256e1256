//! Object store backed by a local directory.
//!
//! `s3://bucket/key` maps to `<root>/bucket/key`. Tag sets are kept as JSON
//! sidecars under `<root>/.tags/bucket/key.json`.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tokio::fs;

use crate::error::{Result, StoreError};
use crate::tagging::Tag;
use crate::uri::S3Uri;
use crate::ObjectStore;

const TAGS_DIR: &str = ".tags";

/// A directory tree standing in for a bucket namespace.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path of an object. Fails with [`StoreError::InvalidUri`]
    /// when the bucket or key would resolve outside the root.
    pub fn object_path(&self, uri: &S3Uri) -> Result<PathBuf> {
        check_contained(uri)?;
        Ok(self.root.join(&uri.bucket).join(&uri.key))
    }

    fn tags_path(&self, uri: &S3Uri) -> Result<PathBuf> {
        check_contained(uri)?;
        Ok(self
            .root
            .join(TAGS_DIR)
            .join(&uri.bucket)
            .join(format!("{}.json", uri.key)))
    }

    fn map_not_found(uri: &S3Uri, err: std::io::Error) -> StoreError {
        if err.kind() == ErrorKind::NotFound {
            StoreError::NotFound {
                uri: uri.to_string(),
            }
        } else {
            StoreError::Io(err)
        }
    }
}

/// Only plain path segments are allowed: no `..`, no absolute paths, and the
/// bucket must be a single segment other than the tag sidecar directory.
fn check_contained(uri: &S3Uri) -> Result<()> {
    let plain = |part: &str| {
        Path::new(part)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    };
    let bucket_ok = Path::new(&uri.bucket).components().count() == 1
        && plain(&uri.bucket)
        && uri.bucket != TAGS_DIR;
    if bucket_ok && plain(&uri.key) {
        Ok(())
    } else {
        Err(StoreError::InvalidUri(uri.to_string()))
    }
}

async fn write_creating_parents(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, contents).await?;
    Ok(())
}

impl ObjectStore for LocalStore {
    async fn get_object(&self, uri: &S3Uri) -> Result<Vec<u8>> {
        fs::read(self.object_path(uri)?)
            .await
            .map_err(|e| Self::map_not_found(uri, e))
    }

    async fn put_object(&self, uri: &S3Uri, body: Vec<u8>) -> Result<()> {
        write_creating_parents(&self.object_path(uri)?, &body).await
    }

    async fn get_object_tagging(&self, uri: &S3Uri) -> Result<Vec<Tag>> {
        if !fs::try_exists(self.object_path(uri)?).await? {
            return Err(StoreError::NotFound {
                uri: uri.to_string(),
            });
        }
        match fs::read(self.tags_path(uri)?).await {
            Ok(raw) => Ok(serde_json::from_slice(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn put_object_tagging(&self, uri: &S3Uri, tags: Vec<Tag>) -> Result<()> {
        if !fs::try_exists(self.object_path(uri)?).await? {
            return Err(StoreError::NotFound {
                uri: uri.to_string(),
            });
        }
        let raw = serde_json::to_vec_pretty(&tags)?;
        write_creating_parents(&self.tags_path(uri)?, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_object_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let uri = S3Uri::new("bucket", "jobs/output.manifest");

        store.put_object(&uri, b"{}".to_vec()).await.unwrap();
        assert!(dir.path().join("bucket/jobs/output.manifest").exists());
        assert_eq!(store.get_object(&uri).await.unwrap(), b"{}");
    }

    #[tokio::test]
    async fn test_tags_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let uri = S3Uri::new("bucket", "output.manifest");
        store.put_object(&uri, Vec::new()).await.unwrap();

        assert!(store.get_object_tagging(&uri).await.unwrap().is_empty());
        store
            .put_object_tagging(&uri, vec![Tag::new("a", "1")])
            .await
            .unwrap();
        assert_eq!(
            store.get_object_tagging(&uri).await.unwrap(),
            vec![Tag::new("a", "1")]
        );
        assert!(dir.path().join(".tags/bucket/output.manifest.json").exists());
    }

    #[tokio::test]
    async fn test_missing_object() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let uri = S3Uri::new("bucket", "nope");
        assert!(matches!(
            store.get_object(&uri).await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.get_object_tagging(&uri).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_keys_stay_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("store");
        let store = LocalStore::new(&root);

        for uri in [
            S3Uri::new("bucket", "../escape"),
            S3Uri::new("bucket", "jobs/../../escape"),
            S3Uri::new("bucket", "/etc/escape"),
            S3Uri::new("..", "escape"),
            S3Uri::new("a/b", "escape"),
            S3Uri::new(TAGS_DIR, "escape"),
        ] {
            assert!(
                matches!(
                    store.put_object(&uri, b"x".to_vec()).await,
                    Err(StoreError::InvalidUri(_))
                ),
                "{uri} was accepted"
            );
            assert!(matches!(
                store.put_object_tagging(&uri, Vec::new()).await,
                Err(StoreError::InvalidUri(_))
            ));
        }
        assert!(!dir.path().join("escape").exists());
        assert!(!dir.path().join("bucket").exists());
        assert!(!root.exists());

        let nested = S3Uri::new("bucket", "jobs/./output.manifest");
        store.put_object(&nested, b"{}".to_vec()).await.unwrap();
        assert!(root.join("bucket/jobs/output.manifest").exists());
    }
}
