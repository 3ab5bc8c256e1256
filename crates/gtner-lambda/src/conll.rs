//! Manifest to CoNLL-2003 conversion handler.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, instrument};

use gtner_core::{Conll2003Converter, ConverterConfig};
use gtner_store::{ObjectStore, S3Uri, add_tags};

use crate::context::{InvocationContext, LambdaInfo, version_metadata};
use crate::error::Result;
use crate::event::S3Event;

const MANIFEST_EXT: &str = "manifest";

/// Key of the tagged-token file written next to a manifest: a trailing
/// `manifest` becomes `iob`, anything else gets `.iob` appended.
pub fn iob_uri(input: &S3Uri) -> S3Uri {
    let key = match input.key.strip_suffix(MANIFEST_EXT) {
        Some(base) => format!("{base}iob"),
        None => format!("{}.iob", input.key),
    };
    S3Uri::new(input.bucket.clone(), key)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConllFiles {
    pub input_file: String,
    pub output_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConllResponse {
    pub files: ConllFiles,
    pub lambda: LambdaInfo,
    pub metadata: BTreeMap<String, String>,
}

/// Converts the manifest named by an S3 event into a `.iob` object.
pub struct ConllHandler<S> {
    store: S,
    converter: Conll2003Converter,
}

impl<S: ObjectStore> ConllHandler<S> {
    /// Fails when the configured codec is not BILOU or BIO.
    pub fn new(store: S, config: ConverterConfig) -> Result<Self> {
        Ok(Self {
            store,
            converter: Conll2003Converter::new(config)?,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tag the input, convert it in memory, then write the output. A manifest
    /// that fails to convert leaves no output object behind.
    #[instrument(skip_all, fields(request_id = %ctx.request_id))]
    pub async fn handle(&self, event: &S3Event, ctx: &InvocationContext) -> Result<ConllResponse> {
        let input = event.first_object()?;
        let output = iob_uri(&input);
        info!(input_file = %input, output_file = %output, "converting manifest");

        add_tags(&self.store, &input, &ctx.trace_tags()).await?;

        let manifest = String::from_utf8(self.store.get_object(&input).await?)?;
        let lines = self.converter.convert_manifest(&manifest)?;

        let mut body = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
        for line in &lines {
            body.push_str(line);
            body.push('\n');
        }
        self.store.put_object(&output, body.into_bytes()).await?;
        info!(lines = lines.len(), "wrote tagged tokens");

        Ok(ConllResponse {
            files: ConllFiles {
                input_file: input.to_string(),
                output_file: output.to_string(),
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
    fn test_iob_uri() {
        let uri = S3Uri::new("b", "jobs/my-job/manifests/output/output.manifest");
        assert_eq!(iob_uri(&uri).key, "jobs/my-job/manifests/output/output.iob");

        let uri = S3Uri::new("b", "data/output.jsonl");
        assert_eq!(iob_uri(&uri).key, "data/output.jsonl.iob");
    }
}
