// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

//! Log output of the binaries working with the ledger.
//!
//! Logs go to stderr and, when `FURY_LOG_DIR` is set, to `<FURY_LOG_DIR>/<log_name>.log`.
//! `RUST_LOG` filters the events, `RUST_LOG_SPAN_EVENTS` lists the span events to report
//! (`new`, `enter`, `exit`, `close`, `active` or `full`) and `RUST_LOG_FORMAT` picks the
//! output format. `NO_COLOR` disables colors on stderr.

use std::{
    env,
    fs::{File, OpenOptions},
    io,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

use is_terminal::IsTerminal as _;
use thiserror::Error;
use tracing::Subscriber;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, format::FmtSpan, MakeWriter},
    layer::{Layer, SubscriberExt as _},
    registry::LookupSpan,
    util::{SubscriberInitExt as _, TryInitError},
    EnvFilter,
};

/// An error setting up the log output.
#[derive(Debug, Error)]
pub enum TracingError {
    /// `RUST_LOG_FORMAT` names an unknown format.
    #[error("invalid RUST_LOG_FORMAT `{0}`, expected `plain`, `json` or `pretty`")]
    InvalidFormat(String),

    /// The log file could not be opened for appending.
    #[error("failed to open log file {}", path.display())]
    LogFile {
        /// The path of the log file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// A global subscriber was already installed.
    #[error(transparent)]
    Init(#[from] TryInitError),
}

/// The format of the log lines.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    /// Single-line human-readable events.
    #[default]
    Plain,
    /// One JSON object per event.
    Json,
    /// Multi-line human-readable events.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = TracingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(LogFormat::Plain),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(TracingError::InvalidFormat(other.to_string())),
        }
    }
}

impl LogFormat {
    fn layer<S, W>(
        self,
        writer: W,
        span_events: FmtSpan,
        ansi: bool,
    ) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
        W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
    {
        let layer = fmt::layer()
            .with_span_events(span_events)
            .with_writer(writer)
            .with_ansi(ansi);
        match self {
            LogFormat::Plain => layer.boxed(),
            LogFormat::Json => layer.json().boxed(),
            LogFormat::Pretty => layer.pretty().boxed(),
        }
    }
}

/// The log settings read from the environment.
#[derive(Clone, Debug)]
pub struct LogConfig {
    /// The format of both stderr and the log file.
    pub format: LogFormat,
    /// The span events to report.
    pub span_events: FmtSpan,
    /// Whether stderr gets colors.
    pub color: bool,
    /// The directory of the log file, if any.
    pub log_dir: Option<PathBuf>,
}

impl LogConfig {
    /// Reads the settings from the environment variables.
    pub fn from_env() -> Result<Self, TracingError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TracingError> {
        let format = match lookup("RUST_LOG_FORMAT") {
            Some(format) => format.parse()?,
            None => LogFormat::default(),
        };
        let span_events = lookup("RUST_LOG_SPAN_EVENTS")
            .map_or(FmtSpan::NONE, |events| parse_span_events(&events));
        let color = lookup("NO_COLOR").map_or(true, |value| value.is_empty())
            && io::stderr().is_terminal();
        let log_dir = lookup("FURY_LOG_DIR").map(PathBuf::from);
        Ok(LogConfig {
            format,
            span_events,
            color,
            log_dir,
        })
    }

    /// Installs the global subscriber. Log files are named after `log_name`.
    pub fn init(&self, log_name: &str) -> Result<(), TracingError> {
        let env_filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy();
        let stderr_layer = self
            .format
            .layer(io::stderr, self.span_events.clone(), self.color);
        let file_layer = match &self.log_dir {
            Some(log_dir) => {
                let file = open_log_file(log_dir, log_name)?;
                Some(
                    self.format
                        .layer(Arc::new(file), self.span_events.clone(), false),
                )
            }
            None => None,
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(stderr_layer)
            .try_init()?;
        Ok(())
    }
}

/// Installs the global subscriber configured by the environment.
pub fn init(log_name: &str) -> Result<(), TracingError> {
    LogConfig::from_env()?.init(log_name)
}

fn open_log_file(log_dir: &Path, log_name: &str) -> Result<File, TracingError> {
    let path = log_dir.join(log_name).with_extension("log");
    OpenOptions::new()
        .append(true)
        .create(true)
        .open(&path)
        .map_err(|error| TracingError::LogFile { path, error })
}

// Unknown events are ignored.
fn parse_span_events(events: &str) -> FmtSpan {
    events.split(',').fold(FmtSpan::NONE, |span_events, event| {
        span_events
            | match event.trim() {
                "new" => FmtSpan::NEW,
                "enter" => FmtSpan::ENTER,
                "exit" => FmtSpan::EXIT,
                "close" => FmtSpan::CLOSE,
                "active" => FmtSpan::ACTIVE,
                "full" => FmtSpan::FULL,
                _ => FmtSpan::NONE,
            }
    })
}
