//! Manifest to Comprehend entity-list conversion handler.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, instrument};

use gtner_core::ComprehendWriter;
use gtner_store::{ObjectStore, S3Uri, add_tags};

use crate::context::{InvocationContext, LambdaInfo, version_metadata};
use crate::error::Result;
use crate::event::S3Event;

const DOCUMENTS_DIR: &str = "comprehend/documents";
const ANNOTATIONS_DIR: &str = "comprehend/annotations";

/// Output locations for a manifest at `<folder>/<stem>.manifest`.
pub fn output_uris(input: &S3Uri) -> (S3Uri, S3Uri) {
    let folder = input.folder();
    let stem = input.file_stem();
    let join = |dir: &str| {
        if folder.is_empty() {
            dir.to_string()
        } else {
            format!("{folder}/{dir}")
        }
    };
    (
        input.sibling(&join(DOCUMENTS_DIR), &format!("{stem}.txt")),
        input.sibling(&join(ANNOTATIONS_DIR), &format!("{stem}.csv")),
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComprehendFiles {
    pub input_file: String,
    pub data_file: String,
    pub ann_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComprehendResponse {
    pub files: ComprehendFiles,
    pub lambda: LambdaInfo,
    pub metadata: BTreeMap<String, String>,
}

/// Exports the manifest named by an S3 event as a documents file plus an
/// annotations CSV.
pub struct ComprehendHandler<S> {
    store: S,
}

impl<S: ObjectStore> ComprehendHandler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[instrument(skip_all, fields(request_id = %ctx.request_id))]
    pub async fn handle(
        &self,
        event: &S3Event,
        ctx: &InvocationContext,
    ) -> Result<ComprehendResponse> {
        let input = event.first_object()?;
        let (data_file, ann_file) = output_uris(&input);
        info!(input_file = %input, data_file = %data_file, ann_file = %ann_file, "exporting manifest");

        add_tags(&self.store, &input, &ctx.trace_tags()).await?;

        let manifest = self.store.get_object(&input).await?;
        let mut data = Vec::new();
        let mut annotations = Vec::new();
        let mut writer = ComprehendWriter::new(&mut data, &mut annotations, data_file.file_name())?;
        writer.write_manifest(manifest.as_slice())?;
        let documents = writer.finish()?;

        self.store.put_object(&data_file, data).await?;
        self.store.put_object(&ann_file, annotations).await?;
        info!(documents, "wrote comprehend dataset");

        Ok(ComprehendResponse {
            files: ComprehendFiles {
                input_file: input.to_string(),
                data_file: data_file.to_string(),
                ann_file: ann_file.to_string(),
            },
            lambda: ctx.info(),
            metadata: version_metadata(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_uris() {
        let (data, ann) = output_uris(&S3Uri::new("b", "jobs/x/output.manifest"));
        assert_eq!(data.key, "jobs/x/comprehend/documents/output.txt");
        assert_eq!(ann.key, "jobs/x/comprehend/annotations/output.csv");
    }

    #[test]
    fn test_output_uris_top_level() {
        let (data, ann) = output_uris(&S3Uri::new("b", "output.manifest"));
        assert_eq!(data.key, "comprehend/documents/output.txt");
        assert_eq!(ann.key, "comprehend/annotations/output.csv");
    }
}
