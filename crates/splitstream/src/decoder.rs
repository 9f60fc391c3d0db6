//! Incremental decoding of raw chunks into text.
//!
//! A chunk boundary may fall inside a multi-byte character. The decoder keeps
//! such an incomplete tail (the *remainder*) and completes it with the leading
//! bytes of the next chunk, so chunking never changes the decoded text.
//!
//! UTF-8 is decoded on a dedicated path that holds the remainder explicitly.
//! Every other encoding goes through an [`encoding_rs::Decoder`], which keeps
//! its remainder internally; for those we only remember the last few bytes fed
//! so errors can report the offending sequence.

use bstr::BString;
use encoding_rs::{Decoder, DecoderResult};
use thiserror::Error;

use crate::encoding::TextEncoding;

/// Longest byte sequence any supported encoding needs for one character.
const MAX_SEQUENCE: usize = 4;

/// Raw bytes that cannot be decoded under the declared encoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The input contains a sequence that is invalid regardless of how it is
    /// chunked.
    #[error("malformed {encoding} sequence {bytes:?} at byte {offset}")]
    Malformed {
        /// Name of the declared encoding.
        encoding: &'static str,
        /// Absolute offset of the first offending byte in the raw stream.
        offset: u64,
        /// The offending bytes.
        bytes: BString,
    },
    /// The input ended in the middle of a character.
    #[error("input ends inside an incomplete {encoding} sequence {bytes:?}")]
    Truncated {
        /// Name of the declared encoding.
        encoding: &'static str,
        /// The dangling bytes.
        bytes: BString,
    },
}

enum Backend {
    Utf8 {
        remainder: Vec<u8>,
    },
    Encoded {
        decoder: Decoder,
        recent: Vec<u8>,
    },
}

/// Stateful decoder for one stream of chunks.
pub(crate) struct ChunkDecoder {
    encoding: TextEncoding,
    backend: Backend,
    /// Raw bytes fed so far.
    consumed: u64,
}

impl ChunkDecoder {
    pub(crate) fn new(encoding: TextEncoding) -> Self {
        let backend = if encoding.is_utf8() {
            Backend::Utf8 {
                remainder: Vec::with_capacity(MAX_SEQUENCE),
            }
        } else {
            Backend::Encoded {
                decoder: encoding.inner().new_decoder_without_bom_handling(),
                recent: Vec::with_capacity(MAX_SEQUENCE),
            }
        };
        Self {
            encoding,
            backend,
            consumed: 0,
        }
    }

    /// Decodes `chunk`, preceded by the remainder of the previous call, and
    /// appends the text to `dst`. An incomplete trailing sequence is held
    /// back for the next call.
    pub(crate) fn decode(&mut self, chunk: &[u8], dst: &mut String) -> Result<(), DecodeError> {
        let name = self.encoding.name();
        let result = match &mut self.backend {
            Backend::Utf8 { remainder } => decode_utf8(name, remainder, chunk, self.consumed, dst),
            Backend::Encoded { decoder, recent } => {
                decode_encoded(name, decoder, recent, chunk, self.consumed, dst)
            }
        };
        self.consumed += chunk.len() as u64;
        result
    }

    /// Flushes the decoder at end of input. Any remainder left at this point
    /// can never be completed and is reported as [`DecodeError::Truncated`].
    pub(crate) fn finish(&mut self, dst: &mut String) -> Result<(), DecodeError> {
        let encoding = self.encoding.name();
        match &mut self.backend {
            Backend::Utf8 { remainder } if remainder.is_empty() => Ok(()),
            Backend::Utf8 { remainder } => Err(DecodeError::Truncated {
                encoding,
                bytes: BString::from(core::mem::take(remainder)),
            }),
            Backend::Encoded { decoder, recent } => loop {
                reserve(decoder, 0, dst);
                let (result, _) = decoder.decode_to_string_without_replacement(&[], dst, true);
                match result {
                    DecoderResult::InputEmpty => return Ok(()),
                    DecoderResult::OutputFull => {}
                    DecoderResult::Malformed(bad, _) => {
                        let start = recent.len().saturating_sub(usize::from(bad));
                        return Err(DecodeError::Truncated {
                            encoding,
                            bytes: BString::from(&recent[start..]),
                        });
                    }
                }
            },
        }
    }
}

impl core::fmt::Debug for ChunkDecoder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChunkDecoder")
            .field("encoding", &self.encoding)
            .field("consumed", &self.consumed)
            .finish_non_exhaustive()
    }
}

fn decode_utf8(
    encoding: &'static str,
    remainder: &mut Vec<u8>,
    mut chunk: &[u8],
    mut offset: u64,
    dst: &mut String,
) -> Result<(), DecodeError> {
    if !remainder.is_empty() {
        let held = remainder.len();
        let take = chunk.len().min(MAX_SEQUENCE - held);
        remainder.extend_from_slice(&chunk[..take]);
        match bstr::decode_utf8(remainder.as_slice()) {
            (Some(ch), len) => {
                dst.push(ch);
                let used = len - held;
                chunk = &chunk[used..];
                offset += used as u64;
                remainder.clear();
            }
            // Still a valid prefix: the whole chunk went into the remainder.
            (None, len) if len == remainder.len() => return Ok(()),
            (None, len) => {
                return Err(DecodeError::Malformed {
                    encoding,
                    offset: offset - held as u64,
                    bytes: BString::from(&remainder[..len]),
                });
            }
        }
    }

    match core::str::from_utf8(chunk) {
        Ok(text) => dst.push_str(text),
        Err(err) => {
            let valid = err.valid_up_to();
            // SAFETY: `from_utf8` validated every byte before `valid_up_to`.
            dst.push_str(unsafe { core::str::from_utf8_unchecked(&chunk[..valid]) });
            match err.error_len() {
                None => remainder.extend_from_slice(&chunk[valid..]),
                Some(len) => {
                    return Err(DecodeError::Malformed {
                        encoding,
                        offset: offset + valid as u64,
                        bytes: BString::from(&chunk[valid..valid + len]),
                    });
                }
            }
        }
    }
    Ok(())
}

fn decode_encoded(
    encoding: &'static str,
    decoder: &mut Decoder,
    recent: &mut Vec<u8>,
    mut src: &[u8],
    mut offset: u64,
    dst: &mut String,
) -> Result<(), DecodeError> {
    loop {
        reserve(decoder, src.len(), dst);
        let (result, read) = decoder.decode_to_string_without_replacement(src, dst, false);
        match result {
            DecoderResult::InputEmpty => {
                remember(recent, src);
                return Ok(());
            }
            DecoderResult::OutputFull => {
                remember(recent, &src[..read]);
                src = &src[read..];
                offset += read as u64;
            }
            DecoderResult::Malformed(bad, after) => {
                let end = read - usize::from(after);
                let mut window = core::mem::take(recent);
                window.extend_from_slice(&src[..end]);
                let start = window.len().saturating_sub(usize::from(bad));
                return Err(DecodeError::Malformed {
                    encoding,
                    offset: (offset + end as u64).saturating_sub(u64::from(bad)),
                    bytes: BString::from(&window[start..]),
                });
            }
        }
    }
}

fn reserve(decoder: &Decoder, len: usize, dst: &mut String) {
    let additional = decoder
        .max_utf8_buffer_length_without_replacement(len)
        .unwrap_or(len);
    dst.reserve(additional.max(MAX_SEQUENCE));
}

/// Keeps the last `MAX_SEQUENCE` bytes fed to an `encoding_rs` decoder.
fn remember(recent: &mut Vec<u8>, bytes: &[u8]) {
    if bytes.len() >= MAX_SEQUENCE {
        recent.clear();
        recent.extend_from_slice(&bytes[bytes.len() - MAX_SEQUENCE..]);
    } else {
        recent.extend_from_slice(bytes);
        let excess = recent.len().saturating_sub(MAX_SEQUENCE);
        recent.drain(..excess);
    }
}
