//! Launcher command lines.
//!
//! Defaults follow the SageMaker training-container contract: channels and the
//! model directory come from `SM_*` variables.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::args::{KnownFlag, partition_args};
use crate::spacy::SpacyTrainer;
use crate::transformers::TransformersTrainer;

const HELP: [KnownFlag; 2] = [KnownFlag::switch("-h"), KnownFlag::switch("--help")];

/// Train a spaCy NER model on CoNLL-2003 `.iob` channels.
#[derive(Debug, Clone, Parser)]
#[command(name = "spacy-train", version)]
pub struct SpacyArgs {
    /// Model output directory
    #[arg(long = "model_dir", env = "SM_MODEL_DIR", default_value = "model")]
    pub model_dir: PathBuf,

    /// Train channel
    #[arg(long, env = "SM_CHANNEL_TRAIN", default_value = "train")]
    pub train: PathBuf,

    /// Test channel, used as dev data
    #[arg(long, env = "SM_CHANNEL_TEST", default_value = "test")]
    pub test: PathBuf,

    /// Python interpreter with spaCy installed
    #[arg(long, env = "GTNER_PYTHON", default_value = "python")]
    pub python: String,
}

impl SpacyArgs {
    pub const KNOWN: &'static [KnownFlag] = &[
        KnownFlag::value("--model_dir"),
        KnownFlag::value("--train"),
        KnownFlag::value("--test"),
        KnownFlag::value("--python"),
        HELP[0],
        HELP[1],
    ];

    /// Parse the launcher's flags; returns the pass-through hyperparameters.
    pub fn try_parse_known<I, S>(args: I) -> Result<(Self, Vec<String>), clap::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (own, rest) = partition_args(args, Self::KNOWN);
        Ok((Self::try_parse_from(own)?, rest))
    }

    pub fn parse_known() -> (Self, Vec<String>) {
        let (own, rest) = partition_args(args_lossy(), Self::KNOWN);
        (Self::parse_from(own), rest)
    }

    pub fn trainer(&self) -> SpacyTrainer {
        SpacyTrainer::new(&self.python, &self.model_dir, &self.train, &self.test)
    }
}

/// Fine-tune a transformers token classifier with `run_ner.py`.
#[derive(Debug, Clone, Parser)]
#[command(name = "transformers-train", version)]
pub struct TransformersArgs {
    /// Model output directory
    #[arg(long = "model_dir", env = "SM_MODEL_DIR", default_value = "model")]
    pub model_dir: PathBuf,

    /// Train channel holding train.txt
    #[arg(long, env = "SM_CHANNEL_TRAIN", default_value = "train")]
    pub train: PathBuf,

    /// Dev channel holding dev.txt; empty disables evaluation
    #[arg(long, env = "SM_CHANNEL_DEV", default_value = "")]
    pub dev: String,

    /// Channel holding label.txt
    #[arg(long, env = "SM_CHANNEL_LABEL")]
    pub label: Option<PathBuf>,

    /// Show run_ner.py's help
    #[arg(long = "train-help")]
    pub train_help: bool,

    /// Where tensorboard runs are moved after training
    #[arg(long = "output_data_dir", env = "SM_OUTPUT_DATA_DIR", default_value = "output", hide = true)]
    pub output_data_dir: PathBuf,

    /// Python interpreter with transformers installed
    #[arg(long, env = "GTNER_PYTHON", default_value = "python")]
    pub python: String,

    /// Path to run_ner.py
    #[arg(long = "run_ner", env = "GTNER_RUN_NER", default_value = "run_ner.py")]
    pub run_ner: String,
}

impl TransformersArgs {
    pub const KNOWN: &'static [KnownFlag] = &[
        KnownFlag::value("--model_dir"),
        KnownFlag::value("--train"),
        KnownFlag::value("--dev"),
        KnownFlag::value("--label"),
        KnownFlag::switch("--train-help"),
        KnownFlag::value("--output_data_dir"),
        KnownFlag::value("--python"),
        KnownFlag::value("--run_ner"),
        HELP[0],
        HELP[1],
    ];

    /// Parse the launcher's flags; returns the arguments for `run_ner.py`.
    pub fn try_parse_known<I, S>(args: I) -> Result<(Self, Vec<String>), clap::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (own, rest) = partition_args(args, Self::KNOWN);
        Ok((Self::try_parse_from(own)?, rest))
    }

    pub fn parse_known() -> (Self, Vec<String>) {
        let (own, rest) = partition_args(args_lossy(), Self::KNOWN);
        (Self::parse_from(own), rest)
    }

    pub fn trainer(&self) -> TransformersTrainer {
        TransformersTrainer {
            python: self.python.clone(),
            script: self.run_ner.clone(),
            model_dir: self.model_dir.clone(),
            train: self.train.clone(),
            dev: (!self.dev.is_empty()).then(|| PathBuf::from(&self.dev)),
            label: self.label.clone(),
            output_data_dir: self.output_data_dir.clone(),
        }
    }
}

fn args_lossy() -> impl Iterator<Item = String> {
    std::env::args_os().map(|arg: OsString| arg.to_string_lossy().into_owned())
}
