//! # gtner
//!
//! Ground Truth named-entity manifests to training data.
//!
//! This crate re-exports the workspace:
//!
//! - [`convert`]: manifest model, tokenizer, BILOU/BIO tagging, CoNLL-2003 and
//!   Comprehend converters, train/test split, label tools.
//! - [`store`]: object storage seam with S3 tagging.
//! - [`lambda`]: S3-triggered conversion handlers.
//! - [`trainer`]: spaCy and transformers training launchers.
pub use gtner_core as convert;
pub use gtner_lambda as lambda;
pub use gtner_store as store;
pub use gtner_trainer as trainer;

pub use gtner_core::{
    Conll2003Converter, ConverterConfig, GtnerError, ManifestLine, Tag, TagScheme, VERSION,
};
pub use gtner_lambda::{ComprehendHandler, ConllHandler, S3Event};
pub use gtner_store::{ObjectStore, S3Uri};
