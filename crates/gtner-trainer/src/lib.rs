//! # gtner Trainer
//!
//! Launchers for training jobs on converted CoNLL-2003 data. Each launcher
//! owns a few flags (model directory and data channels, defaulting to the
//! SageMaker `SM_*` variables) and forwards everything else to the training
//! routine:
//!
//! - [`SpacyTrainer`] coerces the forwarded `--name value` pairs into typed
//!   hyperparameters for `spacy train`.
//! - [`TransformersTrainer`] passes them verbatim to `run_ner.py`.
//!
//! Names the launcher sets itself are locked; overriding one fails before any
//! child process starts.
pub mod args;
pub mod cli;
pub mod error;
pub mod hyperparams;
pub mod process;
pub mod spacy;
pub mod transformers;

pub use args::{KnownFlag, partition_args};
pub use cli::{SpacyArgs, TransformersArgs};
pub use error::{Result, TrainError};
pub use hyperparams::{HyperValue, Hyperparameters, coerce, parse_hyperparameters};
pub use spacy::SpacyTrainer;
pub use transformers::TransformersTrainer;
