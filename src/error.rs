#![forbid(unsafe_code)]

//! Error type shared by every stage of the update pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = StudioError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StudioError {
    /// A metadata file exists but holds nothing besides whitespace.
    #[error("file {} is empty or contains only whitespace", .path.display())]
    EmptyFile { path: PathBuf },

    /// Opening or reading a local file failed; the original `io::Error` is kept.
    #[error("reading {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid client secret {}: {reason}", .path.display())]
    ClientSecret { path: PathBuf, reason: String },

    #[error("authorization failed: {0}")]
    Authorization(String),

    #[error("token exchange rejected ({error}){}", colon_suffix(.description))]
    TokenExchange {
        error: String,
        description: Option<String>,
    },

    #[error("YouTube API returned {status}{}: {message}", paren_suffix(.reason))]
    Api {
        status: u16,
        reason: Option<String>,
        message: String,
    },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("console input closed")]
    InputClosed,

    #[error("interrupted by operator")]
    Interrupted,
}

fn colon_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(": {detail}"))
        .unwrap_or_default()
}

fn paren_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(" ({detail})"))
        .unwrap_or_default()
}

impl StudioError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StudioError::Io {
            path: path.into(),
            source,
        }
    }

    /// Kind of the underlying I/O failure, when there is one.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            StudioError::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}
