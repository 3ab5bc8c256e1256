//! Structured logging bootstrap shared by the gtner binaries.

use std::io;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogFormat {
    pub timestamps: bool,
    pub targets: bool,
    pub ansi: bool,
    /// Write to stderr instead of stdout.
    pub stderr: bool,
}

impl LogFormat {
    /// Lambda functions: CloudWatch timestamps each stdout line itself.
    pub const LAMBDA: Self = Self {
        timestamps: false,
        targets: true,
        ansi: false,
        stderr: false,
    };

    /// Training containers forward stdout to their log service.
    pub const CONTAINER: Self = Self {
        timestamps: true,
        targets: false,
        ansi: false,
        stderr: false,
    };

    /// Interactive tools keep stdout for their own output.
    pub const TERMINAL: Self = Self {
        timestamps: true,
        targets: true,
        ansi: true,
        stderr: true,
    };
}

/// Install a global subscriber. `RUST_LOG` overrides the default `info`
/// filter. A subscriber that is already installed is left in place.
pub fn init_tracing(format: LogFormat) -> Result<(), TryInitError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let writer = if format.stderr {
        BoxMakeWriter::new(io::stderr)
    } else {
        BoxMakeWriter::new(io::stdout)
    };
    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_target(format.targets)
        .with_ansi(format.ansi)
        .with_level(true);
    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if format.timestamps {
        fmt_layer.boxed()
    } else {
        fmt_layer.without_time().boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(env_filter))
        .try_init()?;

    tracing::debug!(?format, "tracing initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_ok() {
        assert!(init_tracing(LogFormat::LAMBDA).is_ok());
        assert!(init_tracing(LogFormat::CONTAINER).is_ok());
        assert!(tracing::dispatcher::has_been_set());
    }
}
