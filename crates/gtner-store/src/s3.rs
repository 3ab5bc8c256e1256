//! Amazon S3 backend.

use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Tag as S3Tag, Tagging};

use crate::error::{Result, StoreError};
use crate::tagging::Tag;
use crate::uri::S3Uri;
use crate::ObjectStore;

/// Object store talking to S3 through the AWS SDK.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
}

fn backend_error(operation: &'static str, uri: &S3Uri, err: impl std::error::Error) -> StoreError {
    StoreError::Backend {
        operation,
        uri: uri.to_string(),
        message: DisplayErrorContext(err).to_string(),
    }
}

impl S3Store {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the default credential and region chain.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config))
    }
}

impl ObjectStore for S3Store {
    async fn get_object(&self, uri: &S3Uri) -> Result<Vec<u8>> {
        let out = self
            .client
            .get_object()
            .bucket(&uri.bucket)
            .key(&uri.key)
            .send()
            .await
            .map_err(|e| backend_error("GetObject", uri, e))?;
        let body = out
            .body
            .collect()
            .await
            .map_err(|e| backend_error("GetObject", uri, e))?;
        Ok(body.into_bytes().to_vec())
    }

    async fn put_object(&self, uri: &S3Uri, body: Vec<u8>) -> Result<()> {
        self.client
            .put_object()
            .bucket(&uri.bucket)
            .key(&uri.key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| backend_error("PutObject", uri, e))?;
        Ok(())
    }

    async fn get_object_tagging(&self, uri: &S3Uri) -> Result<Vec<Tag>> {
        let out = self
            .client
            .get_object_tagging()
            .bucket(&uri.bucket)
            .key(&uri.key)
            .send()
            .await
            .map_err(|e| backend_error("GetObjectTagging", uri, e))?;
        Ok(out
            .tag_set()
            .iter()
            .map(|tag| Tag::new(tag.key(), tag.value()))
            .collect())
    }

    async fn put_object_tagging(&self, uri: &S3Uri, tags: Vec<Tag>) -> Result<()> {
        let tag_set = tags
            .into_iter()
            .map(|tag| {
                S3Tag::builder()
                    .key(tag.key)
                    .value(tag.value)
                    .build()
                    .map_err(|e| backend_error("PutObjectTagging", uri, e))
            })
            .collect::<Result<Vec<_>>>()?;
        let tagging = Tagging::builder()
            .set_tag_set(Some(tag_set))
            .build()
            .map_err(|e| backend_error("PutObjectTagging", uri, e))?;

        self.client
            .put_object_tagging()
            .bucket(&uri.bucket)
            .key(&uri.key)
            .tagging(tagging)
            .send()
            .await
            .map_err(|e| backend_error("PutObjectTagging", uri, e))?;
        Ok(())
    }
}
