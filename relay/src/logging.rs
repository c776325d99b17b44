//! Logging setup for the relay.
//!
//! Console output goes to stderr and honours `RUST_LOG` when no level is
//! given. The optional log file only records relay events, so a replay log
//! holds the accept/reject trail without dependency noise.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::{LoggingError, LoggingResult};

/// Base name of relay log files: `relay.log`, or `relay.<date>.log` when rotated.
pub const LOG_FILE_PREFIX: &str = "relay";
const LOG_FILE_SUFFIX: &str = "log";
const RELAY_TARGET: &str = "btc_relay";

/// Keeps the background log writer alive. Dropping it flushes pending entries.
#[derive(Debug)]
pub struct LoggingGuard {
    _worker_guard: Option<WorkerGuard>,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level filter. `None` reads `RUST_LOG`, falling back to INFO.
    pub level: Option<LevelFilter>,
    /// Write to stderr.
    pub console: bool,
    pub file: Option<LogFileConfig>,
}

/// How often the relay starts a new log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Every run appends to `relay.log`.
    #[default]
    Never,
    Hourly,
    Daily,
}

impl LogRotation {
    fn rotation(self) -> Rotation {
        match self {
            LogRotation::Never => Rotation::NEVER,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Daily => Rotation::DAILY,
        }
    }
}

impl FromStr for LogRotation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "never" => Ok(LogRotation::Never),
            "hourly" => Ok(LogRotation::Hourly),
            "daily" => Ok(LogRotation::Daily),
            other => Err(format!("unknown log rotation '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogFileConfig {
    pub log_dir: PathBuf,
    pub rotation: LogRotation,
    /// Rotated files kept in `log_dir`. Ignored without rotation.
    pub max_files: usize,
}

impl LogFileConfig {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            rotation: LogRotation::Never,
            max_files: 10,
        }
    }

    pub fn with_rotation(mut self, rotation: LogRotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }
}

/// Console-only logging at `level`.
pub fn init_console_logging(level: LevelFilter) -> LoggingResult<LoggingGuard> {
    init_logging(LoggingConfig {
        level: Some(level),
        console: true,
        file: None,
    })
}

/// Install the global tracing subscriber.
///
/// With neither console nor file output configured nothing is installed
/// and tracing macros stay no-ops.
pub fn init_logging(config: LoggingConfig) -> LoggingResult<LoggingGuard> {
    if !config.console && config.file.is_none() {
        return Ok(LoggingGuard {
            _worker_guard: None,
        });
    }

    let level = config.level.unwrap_or(LevelFilter::INFO);

    let (file_layer, guard) = match config.file {
        Some(ref file_config) => {
            let (writer, guard) = open_log_file(file_config)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(Targets::new().with_target(RELAY_TARGET, level));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let console_layer = config.console.then(|| {
        let filter = match config.level {
            Some(level) => EnvFilter::new(level.to_string()),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(LevelFilter::INFO.to_string())),
        };
        fmt::layer().with_target(true).with_writer(std::io::stderr).with_filter(filter)
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| LoggingError::SubscriberInit(e.to_string()))?;

    Ok(LoggingGuard {
        _worker_guard: guard,
    })
}

fn file_appender(config: &LogFileConfig) -> LoggingResult<RollingFileAppender> {
    fs::create_dir_all(&config.log_dir)?;

    let mut builder = RollingFileAppender::builder()
        .rotation(config.rotation.rotation())
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX);
    if config.rotation != LogRotation::Never {
        builder = builder.max_log_files(config.max_files.max(1));
    }

    builder.build(&config.log_dir).map_err(|e| LoggingError::FileAppender(e.to_string()))
}

fn open_log_file(config: &LogFileConfig) -> LoggingResult<(NonBlocking, WorkerGuard)> {
    Ok(tracing_appender::non_blocking(file_appender(config)?))
}
