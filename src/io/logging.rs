use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::model::config::LogConfig;

/// Environment variable overriding the configured log filter
pub const LOG_ENV: &str = "HABITUI_LOG";

/// Where log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// CLI commands log to stderr
    Stderr,
    /// The TUI owns the terminal and only logs to the configured file
    FileOnly,
}

fn filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. Installing twice is not an error.
pub fn init(config: &LogConfig, target: LogTarget) -> io::Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter(config));

    let result = match (&config.file, target) {
        (Some(file), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(Path::new(file))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        (None, LogTarget::Stderr) => builder.with_writer(io::stderr).try_init(),
        (None, LogTarget::FileOnly) => return Ok(()),
    };
    if result.is_err() {
        tracing::debug!("log subscriber already installed");
    }
    Ok(())
}
