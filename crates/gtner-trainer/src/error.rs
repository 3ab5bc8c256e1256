use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while preparing or running a training job.
#[derive(Debug, Error)]
pub enum TrainError {
    /// Caller-supplied arguments override names the launcher sets itself.
    #[error("overridden args {violations:?} in locked args {locked:?}")]
    LockedArguments {
        violations: Vec<String>,
        locked: Vec<String>,
    },

    /// A child process could not be started.
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A child process exited unsuccessfully.
    #[error("{program} failed with exit code {code:?}")]
    CommandFailed { program: String, code: Option<i32> },

    /// A channel or model directory is missing.
    #[error("directory not found: {0}")]
    MissingDirectory(PathBuf),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for trainer operations.
pub type Result<T> = std::result::Result<T, TrainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_arguments_message() {
        let err = TrainError::LockedArguments {
            violations: vec!["lang".into()],
            locked: vec!["lang".into(), "pipeline".into()],
        };
        assert_eq!(
            err.to_string(),
            r#"overridden args ["lang"] in locked args ["lang", "pipeline"]"#
        );
    }

    #[test]
    fn command_failed_message() {
        let err = TrainError::CommandFailed {
            program: "python".into(),
            code: Some(2),
        };
        assert_eq!(err.to_string(), "python failed with exit code Some(2)");
    }
}
