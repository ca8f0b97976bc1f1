use std::io;
use std::str::Utf8Error;
use thiserror::Error;

use crate::DocumentId;

pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Debug, Error)]
pub enum IndexError {
    /// A document or stop-word source could not be reached. Aborts the run.
    #[error("source unavailable: {operation} {target}: {source}")]
    SourceUnavailable {
        operation: &'static str,
        target: String,
        #[source]
        source: io::Error,
    },

    /// The bytes of a single document are not valid under the decode policy.
    #[error("cannot decode document {id}: {source}")]
    DecodeFailure {
        id: DocumentId,
        #[source]
        source: Utf8Error,
    },

    #[error("failed to write artifact {name}: {source}")]
    SinkWriteFailure {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to render {name}: {reason}")]
    RenderFailure { name: String, reason: String },

    #[error("invalid configuration {path}: {reason}")]
    Config { path: String, reason: String },
}

impl IndexError {
    pub(crate) fn unavailable(operation: &'static str, target: impl Into<String>, source: io::Error) -> Self {
        IndexError::SourceUnavailable { operation, target: target.into(), source }
    }

    /// True for errors that must abort the whole run. The others only cost
    /// one document or one artifact.
    pub fn is_fatal(&self) -> bool {
        matches!(self, IndexError::SourceUnavailable { .. } | IndexError::Config { .. })
    }
}
