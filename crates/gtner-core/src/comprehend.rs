//! # Comprehend Entity Lists
//!
//! Converts augmented manifest lines to a documents file (one document per
//! line) and an annotations CSV with one row per entity. Offsets are carried
//! through from the manifest unchanged, in manifest order.

use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::debug;

use crate::error::{GtnerError, Result};
use crate::manifest::ManifestLine;

/// Header row of the annotations CSV.
pub const ANNOTATION_HEADER: [&str; 5] = ["File", "Line", "Begin Offset", "End Offset", "Type"];

/// One row of the annotations CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationRow {
    pub file: String,
    pub line: usize,
    pub begin_offset: usize,
    pub end_offset: usize,
    pub entity_type: String,
}

/// The document text written to the documents file.
pub fn convert_to_dataset(doc: &ManifestLine) -> &str {
    doc.text()
}

/// Annotation rows for the document at `index` of the documents file `file`.
///
/// The annotation block is the labeling job's attribute (see
/// [`ManifestLine::labeling_job_name`]); labels are upper-cased.
pub fn convert_to_annotations(
    index: usize,
    doc: &ManifestLine,
    file: &str,
) -> Result<Vec<AnnotationRow>> {
    let job = doc
        .labeling_job_name()
        .ok_or(GtnerError::MissingAnnotations)?;
    let block = doc.annotation_block(job)?;

    Ok(block
        .annotations
        .entities
        .into_iter()
        .map(|ent| AnnotationRow {
            file: file.to_string(),
            line: index,
            begin_offset: ent.start_offset,
            end_offset: ent.end_offset,
            entity_type: ent.label.to_uppercase(),
        })
        .collect())
}

/// Writes the documents file and the annotations CSV side by side.
pub struct ComprehendWriter<D: Write, A: Write> {
    data: csv::Writer<D>,
    annotations: csv::Writer<A>,
    data_file_name: String,
    documents: usize,
}

impl<D: Write, A: Write> ComprehendWriter<D, A> {
    /// Create the writers and emit the annotations header. `data_file_name` is
    /// the value of the `File` column.
    pub fn new(data: D, annotations: A, data_file_name: impl Into<String>) -> Result<Self> {
        let data = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(data);
        let mut annotations = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(annotations);
        annotations.write_record(ANNOTATION_HEADER)?;

        Ok(Self {
            data,
            annotations,
            data_file_name: data_file_name.into(),
            documents: 0,
        })
    }

    /// Append one document. Returns the number of annotation rows written.
    pub fn write_document(&mut self, doc: &ManifestLine) -> Result<usize> {
        let rows = convert_to_annotations(self.documents, doc, &self.data_file_name)?;
        self.data.write_record([convert_to_dataset(doc)])?;
        for row in &rows {
            self.annotations.serialize(row)?;
        }
        self.documents += 1;
        Ok(rows.len())
    }

    /// Convert every non-blank line of a manifest.
    pub fn write_manifest<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let rows = ManifestLine::parse(&line)
                .and_then(|doc| self.write_document(&doc))
                .map_err(|e| e.at_line(idx + 1))?;
            debug!(line = idx + 1, rows, "converted document");
        }
        Ok(self.documents)
    }

    /// Flush both writers and return the number of documents written.
    pub fn finish(mut self) -> Result<usize> {
        self.data.flush()?;
        self.annotations.flush()?;
        Ok(self.documents)
    }
}
