//! S3 event notifications.

use serde::{Deserialize, Serialize};

use gtner_store::S3Uri;

use crate::error::{HandlerError, Result};

/// An S3 event notification, as delivered to the handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S3EventRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S3Object {
    /// URL-encoded object key.
    pub key: String,
}

impl S3Event {
    /// Build a single-record event, mostly for local runs and tests.
    pub fn for_object(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            records: vec![S3EventRecord {
                s3: S3Entity {
                    bucket: S3Bucket { name: bucket.into() },
                    object: S3Object { key: key.into() },
                },
            }],
        }
    }

    /// Location of the object in the first record. Only the first record of an
    /// event is processed.
    pub fn first_object(&self) -> Result<S3Uri> {
        let record = self.records.first().ok_or(HandlerError::NoRecords)?;
        let key = decode_key(&record.s3.object.key)?;
        Ok(S3Uri::new(record.s3.bucket.name.clone(), key))
    }
}

/// Decode an event object key: `+` is a space, then percent escapes.
pub fn decode_key(key: &str) -> Result<String> {
    let spaced = key.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| HandlerError::InvalidKey(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_event() {
        let event: S3Event = serde_json::from_str(
            r#"{"Records":[{"eventName":"ObjectCreated:Put","s3":{"s3SchemaVersion":"1.0","bucket":{"name":"vm-gtner-blog","arn":"arn:aws:s3:::vm-gtner-blog"},"object":{"key":"jobs/output.manifest","size":42}}}]}"#,
        )
        .unwrap();
        let uri = event.first_object().unwrap();
        assert_eq!(uri.to_string(), "s3://vm-gtner-blog/jobs/output.manifest");
    }

    #[test]
    fn test_no_records() {
        let event: S3Event = serde_json::from_str("{}").unwrap();
        assert!(matches!(event.first_object(), Err(HandlerError::NoRecords)));
    }

    #[test]
    fn test_decode_key() {
        assert_eq!(decode_key("my+job/out%2Bput.manifest").unwrap(), "my job/out+put.manifest");
        assert_eq!(decode_key("plain/key").unwrap(), "plain/key");
        assert!(decode_key("bad%FF%FE").is_err());
    }
}
