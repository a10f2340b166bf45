use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid range: start {start} must be below end {end}")]
    InvalidRange { start: u32, end: u32 },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("server answered with HTTP {code}")]
    HttpStatus { code: u16 },

    #[error("request timed out, check your connection")]
    Timeout,

    #[error("too many redirects, check if the archive host has moved")]
    TooManyRedirects,

    #[error("transport error: {detail}")]
    Transport { detail: String },

    #[error("corrupt archive {path}: {reason}")]
    CorruptArchive { path: PathBuf, reason: String },

    #[error("archive {path} has no entry named {entry}")]
    MissingEntry { path: PathBuf, entry: String },

    #[error("not a TWIC archive name: {path}")]
    UnrecognizedArchiveName { path: PathBuf },

    #[error("worker task failed: {0}")]
    Task(String),

    #[error("report error: {0}")]
    Report(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Sorts a reqwest failure into the per-item taxonomy.
    pub fn from_request(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else if err.is_redirect() {
            Error::TooManyRedirects
        } else if let Some(status) = err.status() {
            Error::HttpStatus {
                code: status.as_u16(),
            }
        } else {
            Error::Transport {
                detail: err.to_string(),
            }
        }
    }

    /// Short label used in log lines and outcome reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidRange { .. } => "invalid_range",
            Error::InvalidConfig { .. } => "invalid_config",
            Error::HttpStatus { .. } => "http_status",
            Error::Timeout => "timeout",
            Error::TooManyRedirects => "too_many_redirects",
            Error::Transport { .. } => "transport",
            Error::CorruptArchive { .. } => "corrupt_archive",
            Error::MissingEntry { .. } => "missing_entry",
            Error::UnrecognizedArchiveName { .. } => "unrecognized_archive_name",
            Error::Task(_) => "task",
            Error::Report(_) => "report",
            Error::Io(_) => "io",
        }
    }

    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Error::InvalidConfig {
            message: message.into(),
        }
    }
}
