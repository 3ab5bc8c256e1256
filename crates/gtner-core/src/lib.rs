//! # gtner Core
//!
//! Reads augmented manifests produced by Ground Truth named-entity labeling
//! jobs and converts them to training formats: CoNLL-2003 tagged tokens
//! (BILOU or BIO) and Comprehend entity lists (documents + annotations CSV).
//!
//! ## Quick Start
//!
//! ```rust
//! use gtner_core::conll::{Conll2003Converter, ConverterConfig};
//!
//! let line = r#"{"source":"Alice lives in Paris","ner":{"annotations":{"entities":[{"startOffset":15,"endOffset":20,"label":"city"}],"labels":[{"label":"city","shortDisplayName":"LOC"}]}},"ner-metadata":{"entities":[{"confidence":0.97}]}}"#;
//!
//! let converter = Conll2003Converter::new(ConverterConfig::new().with_codec("bio")).unwrap();
//! let lines = converter.convert_line(line).unwrap();
//!
//! assert_eq!(lines[0], "Alice _ _ O");
//! assert_eq!(lines[3], "Paris _ _ B-LOC");
//! ```
pub mod comprehend;
pub mod conll;
pub mod error;
pub mod labels;
pub mod logging;
pub mod manifest;
pub mod split;
pub mod tagging;

/// Crate version, reported in handler responses.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export primary API
pub use comprehend::{AnnotationRow, ComprehendWriter, convert_to_annotations, convert_to_dataset};
pub use conll::{Conll2003Converter, ConverterConfig, DOCSTART};
pub use error::{GtnerError, Result};
pub use labels::{LabelCollector, bilou_to_bio_line};
pub use logging::{LogFormat, init_tracing};
pub use manifest::{DEFAULT_ATTR, EntityOrder, EntitySpan, ManifestLine, entities};
pub use split::{SplitGroup, SplitRecord, sentences, split, write_split};
pub use tagging::{Prefix, Tag, TagScheme, Token, Tokenize, Tokenizer, biluo_tags};
