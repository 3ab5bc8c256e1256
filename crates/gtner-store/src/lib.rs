//! # gtner Store
//!
//! Object storage seam for the conversion handlers. Handlers receive an
//! [`ObjectStore`] instead of reaching for a process-wide client, so they run
//! unchanged against S3 (`s3` feature), a local directory, or memory.
//!
//! ```rust
//! use gtner_store::{MemoryStore, ObjectStore, S3Uri, Tag, add_tags};
//!
//! # tokio_test_block(async {
//! let store = MemoryStore::new();
//! let uri = S3Uri::new("bucket", "output.manifest");
//! store.put_object(&uri, b"{}".to_vec()).await.unwrap();
//!
//! add_tags(&store, &uri, &[Tag::new("a", "1")]).await.unwrap();
//! let tags = add_tags(&store, &uri, &[Tag::new("a", "2"), Tag::new("b", "3")]).await.unwrap();
//! assert_eq!(tags, vec![Tag::new("a", "2"), Tag::new("b", "3")]);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```
use std::future::Future;

pub mod error;
pub mod local;
pub mod memory;
#[cfg(feature = "s3")]
pub mod s3;
pub mod tagging;
pub mod uri;

pub use error::{Result, StoreError};
pub use local::LocalStore;
pub use memory::MemoryStore;
#[cfg(feature = "s3")]
pub use s3::S3Store;
pub use tagging::{Tag, add_tags, merge_tags, sanitize_tag_value};
pub use uri::S3Uri;

/// Crate version, reported in handler responses.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimal object storage operations needed by the handlers.
pub trait ObjectStore: Send + Sync {
    /// Read a whole object.
    fn get_object(&self, uri: &S3Uri) -> impl Future<Output = Result<Vec<u8>>> + Send;

    /// Create or replace an object.
    fn put_object(&self, uri: &S3Uri, body: Vec<u8>) -> impl Future<Output = Result<()>> + Send;

    /// Read the object's tag set.
    fn get_object_tagging(&self, uri: &S3Uri) -> impl Future<Output = Result<Vec<Tag>>> + Send;

    /// Replace the object's whole tag set.
    fn put_object_tagging(
        &self,
        uri: &S3Uri,
        tags: Vec<Tag>,
    ) -> impl Future<Output = Result<()>> + Send;
}
