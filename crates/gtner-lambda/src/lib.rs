//! # gtner Lambda
//!
//! S3-triggered handlers that convert a Ground Truth output manifest as soon
//! as it lands in a bucket:
//!
//! - [`ConllHandler`] writes CoNLL-2003 tagged tokens next to the manifest.
//! - [`ComprehendHandler`] writes a documents file and an annotations CSV
//!   under `comprehend/`.
//!
//! Both tag the input object with the invocation's request id and log
//! location. Handlers are generic over [`gtner_store::ObjectStore`]; the
//! `lambda` feature adds the runtime binaries backed by S3.
//!
//! ```rust
//! use gtner_core::ConverterConfig;
//! use gtner_lambda::{ConllHandler, InvocationContext, S3Event};
//! use gtner_store::{MemoryStore, S3Uri};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let store = MemoryStore::new();
//! store.insert(
//!     &S3Uri::new("bucket", "job/output.manifest"),
//!     r#"{"source":"Hi Bob","ner":{"annotations":{"entities":[{"startOffset":3,"endOffset":6,"label":"p"}],"labels":[{"label":"p","shortDisplayName":"PER"}]}},"ner-metadata":{"entities":[{"confidence":1.0}]}}"#,
//! );
//!
//! let handler = ConllHandler::new(store, ConverterConfig::new()).unwrap();
//! let event = S3Event::for_object("bucket", "job/output.manifest");
//! let response = handler.handle(&event, &InvocationContext::new("req-1", "group", "stream")).await.unwrap();
//! assert_eq!(response.files.output_file, "s3://bucket/job/output.iob");
//! # });
//! ```
pub mod comprehend;
pub mod conll;
pub mod context;
pub mod error;
pub mod event;

pub use comprehend::{ComprehendHandler, ComprehendResponse, output_uris};
pub use conll::{ConllHandler, ConllResponse, iob_uri};
pub use context::{InvocationContext, LambdaInfo, version_metadata};
pub use error::{HandlerError, Result};
pub use event::{S3Event, decode_key};
