//! Adapters that turn strings, blobs, files, URLs and open streams into the
//! single kind of byte source a splitter reads from.

use core::fmt;
use std::{
    fs::File,
    io::{self, Cursor, Read},
    path::{Path, PathBuf},
};

use crate::{encoding::TextEncoding, error::SplitError};

/// Where a [`Splitter`](crate::Splitter) gets its raw bytes.
///
/// The one capability a source offers is "give me up to N bytes, or report
/// that there are none left". Dropping the source releases whatever it holds
/// (file handle, HTTP connection); a splitter drops its source as soon as the
/// source is exhausted or fails.
pub struct ByteSource {
    kind: Kind,
}

enum Kind {
    Text(Cursor<String>),
    Bytes(Cursor<Vec<u8>>),
    File {
        path: PathBuf,
        file: File,
    },
    #[cfg(feature = "url")]
    Url {
        url: url::Url,
        response: reqwest::blocking::Response,
    },
    Stream(Box<dyn Read + Send>),
    Closed,
}

impl ByteSource {
    /// Reads from an in-memory string. The text is UTF-8 by construction and
    /// is decoded as UTF-8 whatever encoding the splitter is given.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: Kind::Text(Cursor::new(text.into())),
        }
    }

    /// Reads from an in-memory byte blob.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: Kind::Bytes(Cursor::new(bytes.into())),
        }
    }

    /// Opens the file at `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::SourceUnavailable`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SplitError> {
        let path = path.as_ref();
        let file =
            File::open(path).map_err(|err| SplitError::unavailable(path.display().to_string(), err))?;
        tracing::debug!(path = %path.display(), "opened file source");
        Ok(Self {
            kind: Kind::File {
                path: path.to_path_buf(),
                file,
            },
        })
    }

    /// Issues a blocking GET for `url` and reads the response body.
    ///
    /// Timeouts are those of the default blocking `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::SourceUnavailable`] if the request fails or the
    /// server answers with a non-success status.
    #[cfg(feature = "url")]
    pub fn fetch(url: &url::Url) -> Result<Self, SplitError> {
        let response = reqwest::blocking::get(url.clone())
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|err| SplitError::unavailable(url.as_str(), err))?;
        tracing::debug!(%url, status = %response.status(), "opened url source");
        Ok(Self {
            kind: Kind::Url {
                url: url.clone(),
                response,
            },
        })
    }

    /// Reads from an already open byte stream.
    pub fn reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            kind: Kind::Stream(Box::new(reader)),
        }
    }

    /// Fills `buf` with up to `buf.len()` bytes. `Ok(0)` means the source is
    /// exhausted.
    pub(crate) fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            let result = match &mut self.kind {
                Kind::Text(cursor) => cursor.read(buf),
                Kind::Bytes(cursor) => cursor.read(buf),
                Kind::File { file, .. } => file.read(buf),
                #[cfg(feature = "url")]
                Kind::Url { response, .. } => response.read(buf),
                Kind::Stream(reader) => reader.read(buf),
                Kind::Closed => Ok(0),
            };
            match result {
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                result => return result,
            }
        }
    }

    /// Releases the underlying resource. Later reads report exhaustion.
    pub(crate) fn close(&mut self) {
        if !self.is_closed() {
            tracing::debug!(source = self.kind_name(), "releasing source");
            self.kind = Kind::Closed;
        }
    }

    /// The encoding this source's bytes are known to be in, if any.
    pub(crate) fn fixed_encoding(&self) -> Option<TextEncoding> {
        match self.kind {
            Kind::Text(_) => Some(TextEncoding::UTF_8),
            _ => None,
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        matches!(self.kind, Kind::Closed)
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self.kind {
            Kind::Text(_) => "text",
            Kind::Bytes(_) => "bytes",
            Kind::File { .. } => "file",
            #[cfg(feature = "url")]
            Kind::Url { .. } => "url",
            Kind::Stream(_) => "stream",
            Kind::Closed => "closed",
        }
    }
}

impl fmt::Debug for ByteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("ByteSource");
        out.field("kind", &self.kind_name());
        match &self.kind {
            Kind::File { path, .. } => {
                out.field("path", path);
            }
            #[cfg(feature = "url")]
            Kind::Url { url, .. } => {
                out.field("url", &url.as_str());
            }
            _ => {}
        }
        out.finish()
    }
}
