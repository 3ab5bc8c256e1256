//! # Object Tagging
//!
//! S3 replaces an object's whole tag set on every write, so adding tags is a
//! read-modify-write: fetch the current set, drop the tags whose keys are
//! being set again, append the new tags and write everything back.
//!
//! Two concurrent writers on the same object race; the last write wins.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::uri::S3Uri;
use crate::ObjectStore;

/// A key/value object tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Replace characters not allowed in tag values (`$`, `[`, `]`) with `_`.
pub fn sanitize_tag_value(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '$' | '[' | ']' => '_',
            c => c,
        })
        .collect()
}

/// Merge `new_tags` into `existing`: existing tags with a colliding key are
/// removed, then the new tags are appended in order.
pub fn merge_tags(existing: Vec<Tag>, new_tags: &[Tag]) -> Vec<Tag> {
    let mut merged: Vec<Tag> = existing
        .into_iter()
        .filter(|tag| !new_tags.iter().any(|new| new.key == tag.key))
        .collect();
    merged.extend_from_slice(new_tags);
    merged
}

/// Add `new_tags` to the object at `uri` without clobbering unrelated tags.
///
/// Returns the full tag set that was written.
pub async fn add_tags<S: ObjectStore>(store: &S, uri: &S3Uri, new_tags: &[Tag]) -> Result<Vec<Tag>> {
    let existing = store.get_object_tagging(uri).await?;
    let merged = merge_tags(existing, new_tags);
    debug!(%uri, tags = merged.len(), "writing object tag set");
    store.put_object_tagging(uri, merged.clone()).await?;
    Ok(merged)
}
