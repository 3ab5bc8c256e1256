//! spaCy training launcher.
//!
//! Converts the `.iob` files of both channels to spaCy's JSON format, then
//! trains an English NER pipeline and keeps only the final model.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::error::{Result, TrainError};
use crate::hyperparams::{Hyperparameters, SPACY_LOCKED, parse_hyperparameters};
use crate::process;

/// The only entry of the model directory kept after training.
pub const FINAL_MODEL: &str = "model-final";

#[derive(Debug, Clone)]
pub struct SpacyTrainer {
    pub python: String,
    pub model_dir: PathBuf,
    pub train: PathBuf,
    pub test: PathBuf,
}

impl SpacyTrainer {
    pub fn new(
        python: impl Into<String>,
        model_dir: impl Into<PathBuf>,
        train: impl Into<PathBuf>,
        test: impl Into<PathBuf>,
    ) -> Self {
        Self {
            python: python.into(),
            model_dir: model_dir.into(),
            train: train.into(),
            test: test.into(),
        }
    }

    /// `.iob` files of the train channel, then the test channel.
    pub fn iob_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = iob_files(&self.train)?;
        files.extend(iob_files(&self.test)?);
        Ok(files)
    }

    /// Converts one `.iob` file; the JSON output lands next to it.
    pub fn convert_command(&self, iob: &Path) -> Command {
        let mut cmd = Command::new(&self.python);
        cmd.args(["-m", "spacy", "convert"])
            .arg(iob)
            .arg(iob.parent().unwrap_or_else(|| Path::new(".")))
            .args([
                "--converter",
                "iob",
                "--model",
                "en_core_web_sm",
                "--seg-sents",
                "--n-sents",
                "10",
            ]);
        cmd
    }

    pub fn train_command(&self, params: &Hyperparameters) -> Command {
        let mut cmd = Command::new(&self.python);
        cmd.args(["-m", "spacy", "train", "en"])
            .arg(&self.model_dir)
            .arg(&self.train)
            .arg(&self.test)
            .args(["--pipeline", "ner"])
            .args(params.to_flags());
        cmd
    }

    /// Convert, train and package. Locked hyperparameters are rejected before
    /// any child process starts.
    pub fn run<S: AsRef<str>>(&self, passthrough: &[S]) -> Result<()> {
        let params = parse_hyperparameters(passthrough);
        params.check_locked(SPACY_LOCKED)?;

        for iob in self.iob_files()? {
            process::run(&mut self.convert_command(&iob))?;
        }

        info!(
            hyperparameters = %serde_json::to_string(&params).unwrap_or_default(),
            "spacy train with hyperparameters"
        );
        process::run(&mut self.train_command(&params))?;

        let removed = package_model(&self.model_dir)?;
        info!(removed = removed.len(), "packaged {}", FINAL_MODEL);
        Ok(())
    }
}

/// Sorted `.iob` files directly under `dir`.
pub fn iob_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(TrainError::MissingDirectory(dir.to_path_buf()));
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "iob") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Delete every entry of `model_dir` except [`FINAL_MODEL`]. Returns the
/// removed paths.
pub fn package_model(model_dir: &Path) -> Result<Vec<PathBuf>> {
    if !model_dir.is_dir() {
        return Err(TrainError::MissingDirectory(model_dir.to_path_buf()));
    }
    let mut removed = Vec::new();
    for entry in fs::read_dir(model_dir)? {
        let entry = entry?;
        if entry.file_name() == FINAL_MODEL {
            continue;
        }
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
        removed.push(path);
    }
    removed.sort();
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_train_command() {
        let trainer = SpacyTrainer::new("python3", "/opt/ml/model", "train", "test");
        let params = parse_hyperparameters(&["--n-iter", "2", "--use-gpu", "None", "--debug", "True"]);
        let cmd = trainer.train_command(&params);

        assert_eq!(cmd.get_program(), "python3");
        assert_eq!(
            args(&cmd),
            [
                "-m", "spacy", "train", "en", "/opt/ml/model", "train", "test", "--pipeline",
                "ner", "--n-iter", "2", "--debug",
            ]
        );
    }

    #[test]
    fn test_convert_command() {
        let trainer = SpacyTrainer::new("python", "model", "train", "test");
        let cmd = trainer.convert_command(Path::new("train/output.iob"));
        assert_eq!(
            args(&cmd),
            [
                "-m", "spacy", "convert", "train/output.iob", "train", "--converter", "iob",
                "--model", "en_core_web_sm", "--seg-sents", "--n-sents", "10",
            ]
        );
    }

    #[test]
    fn test_locked_rejected_before_running() {
        let trainer = SpacyTrainer::new("gtner-no-such-python", "model", "missing", "missing");
        let err = trainer.run(&["--pipeline", "tagger"]).unwrap_err();
        assert!(matches!(err, TrainError::LockedArguments { .. }));
    }
}
