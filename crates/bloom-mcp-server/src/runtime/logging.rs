//! Logging config and setup
//!
//! Logs never go to stdout, which carries MCP messages when serving over stdio.

mod log_rotation_kind;

use std::path::Path;

use log_rotation_kind::LogRotationKind;
use serde::{Deserialize, Deserializer};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE_PREFIX: &str = "bloom_mcp_server";

/// Logging related options
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Logging {
    /// The log level to use for tracing
    #[serde(deserialize_with = "level_from_str")]
    pub level: Level,

    /// Directory to write log files to instead of stderr
    pub path: Option<std::path::PathBuf>,

    /// Log file rotation period, used only with `path`
    pub rotation: LogRotationKind,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            path: None,
            rotation: LogRotationKind::Hourly,
        }
    }
}

fn level_from_str<'de, D>(deserializer: D) -> Result<Level, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer)?
        .parse()
        .map_err(serde::de::Error::custom)
}

impl Logging {
    fn env_filter(&self) -> Result<EnvFilter, anyhow::Error> {
        let mut env_filter = EnvFilter::from_default_env().add_directive(self.level.into());

        // rmcp logs every message at info
        if self.level == Level::INFO {
            env_filter = env_filter.add_directive("rmcp=warn".parse()?);
        }
        Ok(env_filter)
    }

    /// Install the global subscriber
    ///
    /// The returned guard flushes file output on drop, so it must live as long as the server.
    pub fn setup(&self) -> Result<Option<WorkerGuard>, anyhow::Error> {
        let (writer, guard, with_ansi) = match self.path.as_deref().and_then(|path| {
            self.file_appender(path)
                .inspect_err(|e| eprintln!("Failed to set up log file: {e}"))
                .ok()
        }) {
            Some(appender) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                (BoxMakeWriter::new(non_blocking), Some(guard), false)
            }
            None => {
                if self.path.is_some() {
                    eprintln!("Log file setup failed - falling back to stderr");
                }
                (BoxMakeWriter::new(std::io::stderr), None, true)
            }
        };

        tracing_subscriber::registry()
            .with(self.env_filter()?)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(with_ansi)
                    .with_target(false),
            )
            .try_init()?;

        Ok(guard)
    }

    fn file_appender(&self, path: &Path) -> Result<RollingFileAppender, anyhow::Error> {
        std::fs::create_dir_all(path)?;
        Ok(RollingFileAppender::builder()
            .rotation(self.rotation.into())
            .filename_prefix(LOG_FILE_PREFIX)
            .filename_suffix("log")
            .build(path)?)
    }
}
