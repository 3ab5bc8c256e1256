//! Entity extraction from a manifest line.

use std::collections::HashMap;

use serde::Serialize;

use super::document::ManifestLine;
use crate::error::{GtnerError, Result};

/// Order in which entities are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityOrder {
    /// Sorted by start offset; ties keep manifest order.
    #[default]
    ByStartOffset,
    /// As they appear in the manifest.
    Manifest,
}

/// An entity span resolved against its document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySpan {
    /// The covered text.
    pub words: String,
    /// Short display name of the label.
    pub label: String,
    /// Inclusive start, in characters.
    pub start_offset: usize,
    /// Exclusive end, in characters.
    pub end_offset: usize,
    /// Annotation confidence from the metadata block.
    pub confidence: f64,
}

impl EntitySpan {
    /// The `(start, end, label)` triple used for span alignment.
    pub fn offsets(&self) -> (usize, usize, &str) {
        (self.start_offset, self.end_offset, self.label.as_str())
    }
}

/// Extract the entities of annotation attribute `attr`.
///
/// Labels are resolved to their short display names; a label absent from the
/// mapping is an error, as is a span outside the source text.
pub fn entities(doc: &ManifestLine, attr: &str, order: EntityOrder) -> Result<Vec<EntitySpan>> {
    let block = doc.annotation_block(attr)?;
    let scores = doc.metadata_block(attr)?.entities;
    let raw = block.annotations.entities;
    if raw.len() != scores.len() {
        return Err(GtnerError::ConfidenceMismatch {
            entities: raw.len(),
            scores: scores.len(),
        });
    }

    let types: HashMap<&str, &str> = block
        .annotations
        .labels
        .iter()
        .map(|def| (def.label.as_str(), def.short_display_name.as_str()))
        .collect();

    let mut spans = raw
        .iter()
        .zip(&scores)
        .map(|(ent, score)| -> Result<EntitySpan> {
            let label = types
                .get(ent.label.as_str())
                .ok_or_else(|| GtnerError::UnknownLabel {
                    label: ent.label.clone(),
                })?;
            Ok(EntitySpan {
                words: doc.slice_chars(ent.start_offset, ent.end_offset)?.to_string(),
                label: (*label).to_string(),
                start_offset: ent.start_offset,
                end_offset: ent.end_offset,
                confidence: score.confidence,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if order == EntityOrder::ByStartOffset {
        spans.sort_by_key(|span| span.start_offset);
    }

    Ok(spans)
}
