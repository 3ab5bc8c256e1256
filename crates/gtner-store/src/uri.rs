//! `s3://bucket/key` object locations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Location of an object: a bucket and a key within it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct S3Uri {
    pub bucket: String,
    pub key: String,
}

impl S3Uri {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// The key up to (not including) its last `/`, or `""` for top-level keys.
    pub fn folder(&self) -> &str {
        self.key.rsplit_once('/').map_or("", |(folder, _)| folder)
    }

    /// The last path component of the key.
    pub fn file_name(&self) -> &str {
        self.key.rsplit_once('/').map_or(&self.key, |(_, name)| name)
    }

    /// The file name without its last extension.
    pub fn file_stem(&self) -> &str {
        let name = self.file_name();
        match name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => name,
        }
    }

    /// Same bucket, key replaced by `folder/name` (or `name` at top level).
    pub fn sibling(&self, folder: &str, name: &str) -> Self {
        let key = if folder.is_empty() {
            name.to_string()
        } else {
            format!("{folder}/{name}")
        };
        Self::new(self.bucket.clone(), key)
    }

    /// Same object name with its extension replaced by `ext`. Keys without an
    /// extension get `.ext` appended.
    pub fn with_extension(&self, ext: &str) -> Self {
        self.sibling(self.folder(), &format!("{}.{ext}", self.file_stem()))
    }
}

impl fmt::Display for S3Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

impl FromStr for S3Uri {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix("s3://")
            .ok_or_else(|| StoreError::InvalidUri(s.to_string()))?;
        match rest.split_once('/') {
            Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => {
                Ok(Self::new(bucket, key))
            }
            _ => Err(StoreError::InvalidUri(s.to_string())),
        }
    }
}
