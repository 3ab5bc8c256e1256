//! Invocation metadata recorded on converted objects.

use std::collections::BTreeMap;
use std::env;

use serde::Serialize;

use gtner_store::{Tag, sanitize_tag_value};

pub const TAG_REQUEST_ID: &str = "lambda_req_id";
pub const TAG_LOG_GROUP: &str = "lambda_log_group";
pub const TAG_LOG_STREAM: &str = "lambda_log_stream";

/// Identifies the invocation that converted an object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvocationContext {
    pub request_id: String,
    pub log_group: String,
    pub log_stream: String,
}

impl InvocationContext {
    pub fn new(
        request_id: impl Into<String>,
        log_group: impl Into<String>,
        log_stream: impl Into<String>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            log_group: log_group.into(),
            log_stream: log_stream.into(),
        }
    }

    /// Read the log group and stream from the Lambda environment.
    pub fn from_env(request_id: impl Into<String>) -> Self {
        Self::new(
            request_id,
            env::var("AWS_LAMBDA_LOG_GROUP_NAME").unwrap_or_default(),
            env::var("AWS_LAMBDA_LOG_STREAM_NAME").unwrap_or_default(),
        )
    }

    /// Tags written to the source object. Values are sanitized for S3.
    pub fn trace_tags(&self) -> Vec<Tag> {
        vec![
            Tag::new(TAG_REQUEST_ID, sanitize_tag_value(&self.request_id)),
            Tag::new(TAG_LOG_GROUP, sanitize_tag_value(&self.log_group)),
            Tag::new(TAG_LOG_STREAM, sanitize_tag_value(&self.log_stream)),
        ]
    }

    pub fn info(&self) -> LambdaInfo {
        LambdaInfo {
            lambda_req_id: self.request_id.clone(),
            lambda_log_group: self.log_group.clone(),
            lambda_log_stream_raw: self.log_stream.clone(),
            lambda_log_stream_trs: sanitize_tag_value(&self.log_stream),
        }
    }
}

/// The `lambda` section of a handler response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LambdaInfo {
    pub lambda_req_id: String,
    pub lambda_log_group: String,
    pub lambda_log_stream_raw: String,
    pub lambda_log_stream_trs: String,
}

/// Crate versions reported in handler responses.
pub fn version_metadata() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("gtner-core".to_string(), gtner_core::VERSION.to_string()),
        ("gtner-store".to_string(), gtner_store::VERSION.to_string()),
        ("gtner-lambda".to_string(), env!("CARGO_PKG_VERSION").to_string()),
    ])
}
