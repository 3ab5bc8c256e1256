//! # Augmented Manifest Lines
//!
//! One JSON object per line. Besides `source`, a line carries one or more
//! named attributes. An annotation attribute looks like
//!
//! ```json
//! "ner": {
//!   "annotations": {
//!     "entities": [{"startOffset": 0, "endOffset": 10, "label": "organization"}],
//!     "labels": [{"label": "organization", "shortDisplayName": "ORG"}]
//!   }
//! },
//! "ner-metadata": {"entities": [{"confidence": 0.93}]}
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{GtnerError, Result};

/// Annotation attribute used when none is given.
pub const DEFAULT_ATTR: &str = "ner";

/// A deserialized line of an augmented manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ManifestLine {
    /// The raw document text.
    pub source: String,

    /// Every other top-level attribute, in document order.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// The `annotations` payload of an annotation attribute.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnnotationBlock {
    pub annotations: Annotations,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Annotations {
    #[serde(default)]
    pub entities: Vec<RawEntity>,
    #[serde(default)]
    pub labels: Vec<LabelDef>,
}

/// An entity exactly as the labeling tool wrote it. Offsets are half-open
/// character offsets into `source`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntity {
    pub start_offset: usize,
    pub end_offset: usize,
    pub label: String,
}

/// Maps a label to its short display name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDef {
    pub label: String,
    pub short_display_name: String,
}

/// The `<attr>-metadata` companion of an annotation attribute.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetadataBlock {
    #[serde(default)]
    pub entities: Vec<EntityScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EntityScore {
    pub confidence: f64,
}

impl ManifestLine {
    /// Parse one JSON line.
    pub fn parse(line: &str) -> Result<Self> {
        Ok(serde_json::from_str(line)?)
    }

    /// The source text of this document.
    pub fn text(&self) -> &str {
        &self.source
    }

    /// Length of the source text in characters, the unit used by entity offsets.
    pub fn char_len(&self) -> usize {
        self.source.chars().count()
    }

    /// Deserialize the annotation attribute `attr`.
    pub fn annotation_block(&self, attr: &str) -> Result<AnnotationBlock> {
        let value = self
            .attributes
            .get(attr)
            .ok_or_else(|| GtnerError::MissingAttribute {
                attr: attr.to_string(),
            })?;
        Ok(AnnotationBlock::deserialize(value)?)
    }

    /// Deserialize the `<attr>-metadata` attribute.
    pub fn metadata_block(&self, attr: &str) -> Result<MetadataBlock> {
        let key = format!("{attr}-metadata");
        let value = self
            .attributes
            .get(&key)
            .ok_or(GtnerError::MissingAttribute { attr: key.clone() })?;
        Ok(MetadataBlock::deserialize(value)?)
    }

    /// Name of the labeling job's attribute: the last top-level attribute whose
    /// value is an object holding `annotations`.
    pub fn labeling_job_name(&self) -> Option<&str> {
        self.attributes
            .iter()
            .filter(|(_, value)| {
                value
                    .as_object()
                    .is_some_and(|obj| obj.contains_key("annotations"))
            })
            .map(|(key, _)| key.as_str())
            .last()
    }

    /// Slice `source` by half-open character offsets.
    pub fn slice_chars(&self, start: usize, end: usize) -> Result<&str> {
        let len = self.char_len();
        if start >= end || end > len {
            return Err(GtnerError::InvalidSpan { start, end, len });
        }
        let byte_at = |idx: usize| {
            self.source
                .char_indices()
                .nth(idx)
                .map_or(self.source.len(), |(b, _)| b)
        };
        Ok(&self.source[byte_at(start)..byte_at(end)])
    }
}
