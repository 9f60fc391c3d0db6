use std::io;

use thiserror::Error;

use crate::decoder::DecodeError;

/// Errors surfaced while constructing or pulling from a
/// [`Splitter`](crate::Splitter).
///
/// Every error returned from a pull is fatal: the splitter releases its
/// source and finishes. Nothing is retried automatically.
#[derive(Error, Debug)]
pub enum SplitError {
    /// The file, URL, or stream could not be opened. No splitter is created.
    #[error("cannot open {origin}: {source}")]
    SourceUnavailable {
        /// Path or URL that failed to open.
        origin: String,
        /// Underlying cause.
        source: Box<dyn core::error::Error + Send + Sync>,
    },
    /// Reading from an opened source failed mid-enumeration.
    #[error("failed to read from source: {0}")]
    SourceReadFailure(#[source] io::Error),
    /// The raw bytes are not valid under the declared encoding.
    #[error(transparent)]
    InvalidEncoding(#[from] DecodeError),
    /// The splitter was configured with an unusable value.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

impl SplitError {
    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            Self::SourceReadFailure(_) => ErrorKind::SourceReadFailure,
            Self::InvalidEncoding(_) => ErrorKind::InvalidEncoding,
            Self::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
        }
    }

    pub(crate) fn unavailable(
        origin: impl Into<String>,
        source: impl Into<Box<dyn core::error::Error + Send + Sync>>,
    ) -> Self {
        Self::SourceUnavailable {
            origin: origin.into(),
            source: source.into(),
        }
    }
}

/// Category of a [`SplitError`], convenient for matching without borrowing
/// the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`SplitError::SourceUnavailable`].
    SourceUnavailable,
    /// See [`SplitError::SourceReadFailure`].
    SourceReadFailure,
    /// See [`SplitError::InvalidEncoding`].
    InvalidEncoding,
    /// See [`SplitError::InvalidConfiguration`].
    InvalidConfiguration,
}

/// A rejected configuration value.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A separator set must contain at least one character.
    #[error("separator set is empty")]
    EmptySeparators,
    /// The chunk size requested from the source must be positive.
    #[error("buffer size must be greater than zero")]
    ZeroBufferSize,
}
