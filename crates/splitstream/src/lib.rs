//! A streaming, pull-based splitter.
//!
//! [`Splitter`] reads raw bytes from a [`ByteSource`] in chunks, decodes them
//! incrementally under a fixed [`TextEncoding`], and yields the substrings
//! between characters of a [`SeparatorSet`], one token per pull. The input is
//! never materialized in full: memory stays bounded by the longest token plus
//! one chunk.
//!
//! ```rust
//! use splitstream::{SeparatorSet, Splitter};
//!
//! let separators = SeparatorSet::try_from(",;")?;
//! let mut splitter = Splitter::from_text("a,b;;c", separators);
//! assert_eq!(splitter.drain_all()?, ["a", "b", "", "c"]);
//! assert!(splitter.is_finished());
//! # Ok::<(), splitstream::SplitError>(())
//! ```
//!
//! Character sequences that straddle a chunk boundary are carried over and
//! completed by the next chunk, so the chunk size never affects the tokens:
//!
//! ```rust
//! use splitstream::{SeparatorSet, Splitter, TextEncoding};
//!
//! let mut splitter = Splitter::from_bytes(
//!     "żółw|ćma".as_bytes(),
//!     TextEncoding::UTF_8,
//!     SeparatorSet::try_from("|")?,
//! );
//! splitter.set_buffer_size(1)?;
//! assert_eq!(splitter.drain_all()?, ["żółw", "ćma"]);
//! # Ok::<(), splitstream::SplitError>(())
//! ```

mod buffer;
mod decoder;
mod encoding;
mod error;
mod options;
mod scanner;
mod separators;
mod source;
mod splitter;

#[cfg(test)]
mod tests;

pub use decoder::DecodeError;
pub use encoding::TextEncoding;
pub use error::{ConfigError, ErrorKind, SplitError};
pub use options::{DEFAULT_BUFFER_SIZE, SplitterOptions, TrailingEmpty};
pub use separators::SeparatorSet;
pub use source::ByteSource;
pub use splitter::Splitter;
