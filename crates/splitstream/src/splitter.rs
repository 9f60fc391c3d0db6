//! The pull API.
//!
//! A [`Splitter`] moves through three states:
//!
//! - `Buffering`: the source may still produce bytes. A pull scans the
//!   buffered text; when no separator is buffered it reads one chunk,
//!   decodes it, appends it and scans again.
//! - `Draining`: the source is exhausted and released. Pulls emit the
//!   separated tokens still buffered, then the final token.
//! - `Finished`: terminal. Pulls return end-of-sequence without I/O.
//!
//! A read error moves straight to `Finished` and is returned from the pull
//! that hit it. A decode error is deferred: the text decoded before the bad
//! sequence is scanned first, and the error is returned by the pull that
//! would otherwise refill. The tokens before an error therefore never depend
//! on the chunk size.

use core::iter::FusedIterator;
use std::{io::Read, path::Path};

use tracing::{debug, trace};

use crate::{
    buffer::TextBuffer,
    decoder::{ChunkDecoder, DecodeError},
    encoding::TextEncoding,
    error::{ConfigError, SplitError},
    options::SplitterOptions,
    scanner::Scanner,
    separators::SeparatorSet,
    source::ByteSource,
};

/// Upper bound on a single read, however large `buffer_size` is.
const MAX_READ: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Buffering,
    Draining,
    Finished,
}

/// Splits a byte stream into tokens, one per pull.
///
/// `Splitter` implements [`Iterator`] with `Result<String, SplitError>` items
/// and is fused: once it returns `None` it keeps returning `None`.
///
/// ```rust
/// use splitstream::{SeparatorSet, Splitter};
///
/// let mut splitter = Splitter::from_text("a,,b", SeparatorSet::from(','));
/// assert_eq!(splitter.next_token()?.as_deref(), Some("a"));
/// // `drain_all` only returns what is left.
/// assert_eq!(splitter.drain_all()?, ["", "b"]);
/// assert_eq!(splitter.next_token()?, None);
/// # Ok::<(), splitstream::SplitError>(())
/// ```
#[derive(Debug)]
pub struct Splitter {
    source: ByteSource,
    decoder: ChunkDecoder,
    buffer: TextBuffer,
    scanner: Scanner,
    encoding: TextEncoding,
    buffer_size: usize,
    /// Reused raw read buffer.
    chunk: Vec<u8>,
    /// Raised by the last refill, returned once the text before it is spent.
    deferred: Option<DecodeError>,
    state: State,
}

impl Splitter {
    /// Creates a splitter over `source` with default options.
    #[must_use]
    pub fn new(source: ByteSource, encoding: TextEncoding, separators: SeparatorSet) -> Self {
        Self::build(source, encoding, separators, SplitterOptions::default())
    }

    /// Creates a splitter over `source` with explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidConfiguration`] if `options.buffer_size`
    /// is zero.
    pub fn with_options(
        source: ByteSource,
        encoding: TextEncoding,
        separators: SeparatorSet,
        options: SplitterOptions,
    ) -> Result<Self, SplitError> {
        options.validate()?;
        Ok(Self::build(source, encoding, separators, options))
    }

    fn build(
        source: ByteSource,
        encoding: TextEncoding,
        separators: SeparatorSet,
        options: SplitterOptions,
    ) -> Self {
        let encoding = match source.fixed_encoding() {
            Some(fixed) if fixed != encoding => {
                debug!(requested = %encoding, using = %fixed, "source fixes its encoding");
                fixed
            }
            _ => encoding,
        };
        Self {
            source,
            decoder: ChunkDecoder::new(encoding),
            buffer: TextBuffer::new(),
            scanner: Scanner::new(separators, options.trailing_empty),
            encoding,
            buffer_size: options.buffer_size,
            chunk: Vec::new(),
            deferred: None,
            state: State::Buffering,
        }
    }

    /// Splits an in-memory string.
    #[must_use]
    pub fn from_text(text: impl Into<String>, separators: SeparatorSet) -> Self {
        Self::new(ByteSource::text(text), TextEncoding::UTF_8, separators)
    }

    /// Splits a byte blob decoded with `encoding`.
    #[must_use]
    pub fn from_bytes(
        bytes: impl Into<Vec<u8>>,
        encoding: TextEncoding,
        separators: SeparatorSet,
    ) -> Self {
        Self::new(ByteSource::bytes(bytes), encoding, separators)
    }

    /// Splits the UTF-8 file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::SourceUnavailable`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>, separators: SeparatorSet) -> Result<Self, SplitError> {
        Self::open_with_encoding(path, TextEncoding::UTF_8, separators)
    }

    /// Splits the file at `path` decoded with `encoding`.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::SourceUnavailable`] if the file cannot be opened.
    pub fn open_with_encoding(
        path: impl AsRef<Path>,
        encoding: TextEncoding,
        separators: SeparatorSet,
    ) -> Result<Self, SplitError> {
        Ok(Self::new(ByteSource::open(path)?, encoding, separators))
    }

    /// Splits the UTF-8 body served at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::SourceUnavailable`] if the request fails.
    #[cfg(feature = "url")]
    pub fn fetch(url: &url::Url, separators: SeparatorSet) -> Result<Self, SplitError> {
        Self::fetch_with_encoding(url, TextEncoding::UTF_8, separators)
    }

    /// Splits the body served at `url` decoded with `encoding`.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::SourceUnavailable`] if the request fails.
    #[cfg(feature = "url")]
    pub fn fetch_with_encoding(
        url: &url::Url,
        encoding: TextEncoding,
        separators: SeparatorSet,
    ) -> Result<Self, SplitError> {
        Ok(Self::new(ByteSource::fetch(url)?, encoding, separators))
    }

    /// Splits an open UTF-8 byte stream.
    #[must_use]
    pub fn from_reader(reader: impl Read + Send + 'static, separators: SeparatorSet) -> Self {
        Self::from_reader_with_encoding(reader, TextEncoding::UTF_8, separators)
    }

    /// Splits an open byte stream decoded with `encoding`.
    #[must_use]
    pub fn from_reader_with_encoding(
        reader: impl Read + Send + 'static,
        encoding: TextEncoding,
        separators: SeparatorSet,
    ) -> Self {
        Self::new(ByteSource::reader(reader), encoding, separators)
    }

    /// The encoding raw bytes are decoded with.
    #[must_use]
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// The characters tokens are split on.
    #[must_use]
    pub fn separators(&self) -> &SeparatorSet {
        self.scanner.separators()
    }

    /// How many raw bytes the next refill requests.
    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Changes how many raw bytes future refills request. Text already
    /// buffered is unaffected. A single read never asks for more than 1 MiB.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidConfiguration`] if `size` is zero; the
    /// current size is kept.
    pub fn set_buffer_size(&mut self, size: usize) -> Result<(), SplitError> {
        if size == 0 {
            return Err(ConfigError::ZeroBufferSize.into());
        }
        self.buffer_size = size;
        Ok(())
    }

    /// Whether the source is exhausted. Buffered tokens may remain.
    #[must_use]
    pub fn is_finished_buffering(&self) -> bool {
        self.state != State::Buffering
    }

    /// Whether every token has been returned. Further pulls return
    /// end-of-sequence without touching the source.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == State::Finished
    }

    /// Returns the next token, or `Ok(None)` once there are none left.
    ///
    /// May block on the source while refilling.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::SourceReadFailure`] or
    /// [`SplitError::InvalidEncoding`]. Either one finishes the splitter. An
    /// encoding error comes after every token decoded before the bad bytes.
    pub fn next_token(&mut self) -> Result<Option<String>, SplitError> {
        loop {
            match self.state {
                State::Finished => return Ok(None),
                State::Buffering => {
                    if let Some(token) = self.scanner.scan(&mut self.buffer) {
                        return Ok(Some(token));
                    }
                    let refilled = match self.deferred.take() {
                        Some(err) => Err(err.into()),
                        None => self.refill(),
                    };
                    if let Err(err) = refilled {
                        self.fail(&err);
                        return Err(err);
                    }
                }
                State::Draining => {
                    if let Some(token) = self.scanner.scan(&mut self.buffer) {
                        return Ok(Some(token));
                    }
                    self.state = State::Finished;
                    debug!("splitter finished");
                    return Ok(self.scanner.finish(&mut self.buffer));
                }
            }
        }
    }

    /// Collects every remaining token.
    ///
    /// Tokens already pulled are not repeated; this does not rewind.
    ///
    /// # Errors
    ///
    /// Returns the first error a pull hits; tokens collected before it are
    /// discarded.
    pub fn drain_all(&mut self) -> Result<Vec<String>, SplitError> {
        self.by_ref().collect()
    }

    /// Reads one chunk from the source and appends its decoded text. On
    /// exhaustion flushes the decoder, releases the source and moves to
    /// `Draining`. Decode errors are deferred, not returned.
    fn refill(&mut self) -> Result<(), SplitError> {
        self.buffer.compact();
        let requested = self.buffer_size.min(MAX_READ);
        self.chunk.resize(requested, 0);

        let read = self
            .source
            .read_chunk(&mut self.chunk)
            .map_err(SplitError::SourceReadFailure)?;

        if read == 0 {
            let flushed = self.decoder.finish(self.buffer.tail_mut());
            self.source.close();
            self.chunk = Vec::new();
            if let Err(err) = flushed {
                self.defer(err);
                return Ok(());
            }
            self.state = State::Draining;
            debug!(pending = self.buffer.pending().len(), "source exhausted");
            return Ok(());
        }

        let before = self.buffer.pending().len();
        if let Err(err) = self.decoder.decode(&self.chunk[..read], self.buffer.tail_mut()) {
            self.defer(err);
        }
        trace!(
            requested,
            read,
            decoded = self.buffer.pending().len() - before,
            "refilled buffer"
        );
        Ok(())
    }

    /// Stops reading after a decode error. The text decoded before it stays
    /// buffered.
    fn defer(&mut self, err: DecodeError) {
        debug!(error = %err, pending = self.buffer.pending().len(), "deferring decode error");
        self.source.close();
        self.chunk = Vec::new();
        self.deferred = Some(err);
    }

    fn fail(&mut self, err: &SplitError) {
        debug!(error = %err, source = self.source.kind_name(), "splitter failed");
        self.source.close();
        self.chunk = Vec::new();
        self.state = State::Finished;
    }
}

impl Iterator for Splitter {
    type Item = Result<String, SplitError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

impl FusedIterator for Splitter {}
