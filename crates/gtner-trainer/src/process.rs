//! Running the training routine as a child process.

use std::process::Command;

use tracing::info;

use crate::error::{Result, TrainError};

/// Environment that makes the training libraries log plain lines.
pub const PLAIN_LOG_ENV: &[(&str, &str)] = &[
    ("ANSI_COLORS_DISABLE", "1"),
    ("WASABI_NO_PRETTY", "1"),
    ("WASABI_LOG_FRIENDLY", "1"),
    ("LOG_FRIENDLY", "1"),
];

/// Render a command for logs.
pub fn display_command(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|arg| arg.to_string_lossy().into_owned()));
    parts.join(" ")
}

/// Run `cmd` in the foreground with plain-log settings, failing on a non-zero
/// exit.
pub fn run(cmd: &mut Command) -> Result<()> {
    cmd.envs(PLAIN_LOG_ENV.iter().copied());
    let program = cmd.get_program().to_string_lossy().into_owned();
    info!(command = %display_command(cmd), "running");

    let status = cmd.status().map_err(|source| TrainError::Spawn {
        program: program.clone(),
        source,
    })?;
    if !status.success() {
        return Err(TrainError::CommandFailed {
            program,
            code: status.code(),
        });
    }
    Ok(())
}
