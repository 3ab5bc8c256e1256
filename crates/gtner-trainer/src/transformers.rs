//! Transformers `run_ner.py` launcher.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::Result;
use crate::hyperparams::{TRANSFORMERS_LOCKED, check_locked};
use crate::process;

pub const TRAIN_FILE: &str = "train.txt";
pub const DEV_FILE: &str = "dev.txt";
pub const LABEL_FILE: &str = "label.txt";
/// Where `run_ner.py` writes its tensorboard data.
pub const RUNS_DIR: &str = "runs";

#[derive(Debug, Clone)]
pub struct TransformersTrainer {
    pub python: String,
    pub script: String,
    pub model_dir: PathBuf,
    pub train: PathBuf,
    /// Dev channel; evaluation is enabled when set.
    pub dev: Option<PathBuf>,
    /// Directory holding `label.txt`.
    pub label: Option<PathBuf>,
    pub output_data_dir: PathBuf,
}

impl TransformersTrainer {
    /// Fail if a pass-through flag is one the launcher sets itself.
    pub fn check_passthrough<S: AsRef<str>>(passthrough: &[S]) -> Result<()> {
        let flags = passthrough
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|arg| arg.starts_with('-'))
            .map(|arg| arg.split_once('=').map_or(arg, |(name, _)| name));
        check_locked(flags, TRANSFORMERS_LOCKED)
    }

    pub fn help_command(&self) -> Command {
        let mut cmd = Command::new(&self.python);
        cmd.arg(&self.script).arg("-h");
        cmd
    }

    pub fn train_command<S: AsRef<str>>(&self, passthrough: &[S]) -> Command {
        let mut cmd = Command::new(&self.python);
        cmd.arg(&self.script).arg("--do_train");
        if self.dev.is_some() {
            cmd.args(["--do_eval", "--evaluate_during_train"]);
        }
        cmd.arg("--data_dir")
            .arg(&self.train)
            .arg("--output_dir")
            .arg(&self.model_dir);
        if let Some(label) = &self.label {
            cmd.arg("--label").arg(label.join(LABEL_FILE));
        }
        cmd.args(passthrough.iter().map(AsRef::<str>::as_ref));
        cmd
    }

    /// Hard-link `<dev>/dev.txt` into the train channel, where `run_ner.py`
    /// expects it. Returns `false` when there is no dev channel or the target
    /// already exists.
    pub fn link_dev(&self) -> Result<bool> {
        let Some(dev) = &self.dev else {
            return Ok(false);
        };
        let source = dev.join(DEV_FILE);
        let target = self.train.join(DEV_FILE);
        match fs::hard_link(&source, &target) {
            Ok(()) => {
                info!(source = %source.display(), target = %target.display(), "linked dev data");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                warn!(target = %target.display(), "already exists; skip hard linking");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Run `run_ner.py -h`, or train and collect the tensorboard runs.
    pub fn run<S: AsRef<str>>(&self, passthrough: &[S], train_help: bool) -> Result<()> {
        if train_help {
            return process::run(&mut self.help_command());
        }

        Self::check_passthrough(passthrough)?;
        self.link_dev()?;
        process::run(&mut self.train_command(passthrough))?;

        if let Some(dest) = collect_runs(Path::new(RUNS_DIR), &self.output_data_dir)? {
            info!(dest = %dest.display(), "moved tensorboard runs");
        }
        Ok(())
    }
}

/// Move `runs` to `output_data_dir`: into it when it is an existing
/// directory, otherwise to that path. A missing `runs` is skipped.
pub fn collect_runs(runs: &Path, output_data_dir: &Path) -> Result<Option<PathBuf>> {
    if !runs.exists() {
        warn!(runs = %runs.display(), "no tensorboard runs to collect");
        return Ok(None);
    }
    let dest = if output_data_dir.is_dir() {
        output_data_dir.join(runs.file_name().unwrap_or(runs.as_os_str()))
    } else {
        output_data_dir.to_path_buf()
    };
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    if fs::rename(runs, &dest).is_err() {
        // Across filesystems: copy, then remove.
        copy_dir_all(runs, &dest)?;
        fs::remove_dir_all(runs)?;
    }
    Ok(Some(dest))
}

fn copy_dir_all(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
