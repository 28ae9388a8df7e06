//! Application event log: an injected [`Logger`] with a file-backed implementation.
//!
//! Lines have the form `[<RFC 3339 UTC, millis>] [<level>] <message>`.
//! Console diagnostics go through `tracing`; this log records what the service did.

use crate::error::ConfigError;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Log,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Log => "log",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for application events. Implementations must not panic.
pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);

    fn info(&self, message: &str) {
        self.log(LogLevel::Log, message);
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    /// Error event; `trace` is appended on its own line when present.
    fn error(&self, message: &str, trace: Option<&str>) {
        match trace {
            Some(trace) => self.log(LogLevel::Error, &format!("{} \n {}", message, trace)),
            None => self.log(LogLevel::Error, message),
        }
    }
}

pub fn format_line(at: DateTime<Utc>, level: LogLevel, message: &str) -> String {
    format!(
        "[{}] [{}] {}\n",
        at.to_rfc3339_opts(SecondsFormat::Millis, true),
        level,
        message
    )
}

/// Appends event lines to a single file. The file is created if missing and never rotated.
pub struct FileLogger {
    path: PathBuf,
    writer: Mutex<RollingFileAppender>,
}

impl FileLogger {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ConfigError::LogFile(format!("no file name in '{}'", path.display())))?;
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)
            .map_err(|e| ConfigError::LogFile(format!("create {}: {}", dir.display(), e)))?;
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(file_name)
            .build(&dir)
            .map_err(|e| ConfigError::LogFile(format!("open {}: {}", path.display(), e)))?;
        Ok(FileLogger {
            path: dir.join(file_name),
            writer: Mutex::new(appender),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Logger for FileLogger {
    fn log(&self, level: LogLevel, message: &str) {
        let line = format_line(Utc::now(), level, message);
        let result = match self.writer.lock() {
            Ok(mut w) => w.write_all(line.as_bytes()).and_then(|_| w.flush()),
            Err(_) => {
                tracing::warn!(path = %self.path.display(), "log writer poisoned, dropping event");
                return;
            }
        };
        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to append log line");
        }
    }
}

/// Keeps formatted lines in memory, tagged with their level, for inspection in tests.
#[derive(Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.collect(|_| true)
    }

    /// Lines logged at `level`, in order.
    pub fn lines_at(&self, level: LogLevel) -> Vec<String> {
        self.collect(|l| l == level)
    }

    fn collect(&self, keep: impl Fn(LogLevel) -> bool) -> Vec<String> {
        match self.entries.lock() {
            Ok(entries) => entries
                .iter()
                .filter(|(level, _)| keep(*level))
                .map(|(_, line)| line.clone())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((level, format_line(Utc::now(), level, message)));
        }
    }
}
