//! Tracing subscriber setup
//!
//! Console output, daily-rotated file output, or both, in either a
//! human-readable or JSON format. `RUST_LOG` takes precedence over the
//! configured level.

use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow!("Invalid log format: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogOutput {
    #[default]
    Console,
    File,
    Both,
}

impl FromStr for LogOutput {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "console" | "stdout" => Ok(LogOutput::Console),
            "file" => Ok(LogOutput::File),
            "both" => Ok(LogOutput::Both),
            _ => Err(anyhow!("Invalid log output: {}", s)),
        }
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must live as long
/// as the process logs to a file.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let format: LogFormat = config.format.parse()?;
    let output: LogOutput = config.output.parse()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("catalog_loader={},sqlx=warn", config.level)))
        .context("Invalid log level")?;

    let mut layers = Vec::new();
    let mut guard = None;

    if matches!(output, LogOutput::Console | LogOutput::Both) {
        let layer = fmt::layer().with_writer(std::io::stdout);
        layers.push(match format {
            LogFormat::Pretty => layer.boxed(),
            LogFormat::Json => layer.json().boxed(),
        });
    }

    if matches!(output, LogOutput::File | LogOutput::Both) {
        std::fs::create_dir_all(&config.directory).context("Failed to create log directory")?;
        let appender = tracing_appender::rolling::daily(&config.directory, &config.file_prefix);
        let (writer, worker_guard) = tracing_appender::non_blocking(appender);
        guard = Some(worker_guard);

        let layer = fmt::layer().with_writer(writer).with_ansi(false);
        layers.push(match format {
            LogFormat::Pretty => layer.boxed(),
            LogFormat::Json => layer.json().boxed(),
        });
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(layers)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
