use crate::error::ConfigError;

/// Number of raw bytes requested from the source per refill unless
/// configured otherwise.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// What to do with an empty final token.
///
/// The final token is the text after the last separator. It is empty when the
/// input ends with a separator or when the input is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TrailingEmpty {
    /// Emit it, so the token count is always the separator count plus one:
    /// `""` yields `[""]` and `"a,"` yields `["a", ""]`.
    #[default]
    Emit,
    /// Drop it: `""` yields nothing and `"a,"` yields `["a"]`. Empty tokens
    /// between separators are still emitted.
    Skip,
}

/// Configuration options for a [`Splitter`](crate::Splitter).
///
/// # Examples
///
/// ```rust
/// use splitstream::{ByteSource, SeparatorSet, Splitter, SplitterOptions, TextEncoding, TrailingEmpty};
///
/// let options = SplitterOptions {
///     buffer_size: 64,
///     trailing_empty: TrailingEmpty::Skip,
/// };
/// let mut splitter = Splitter::with_options(
///     ByteSource::text("one\ntwo\n"),
///     TextEncoding::UTF_8,
///     SeparatorSet::newlines(),
///     options,
/// )?;
/// assert_eq!(splitter.drain_all()?, ["one", "two"]);
/// # Ok::<(), splitstream::SplitError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SplitterOptions {
    /// How many raw bytes to request from the source per refill.
    ///
    /// Larger values mean fewer reads; the splitter holds at most the longest
    /// token plus one chunk in memory. Can be changed later with
    /// [`Splitter::set_buffer_size`](crate::Splitter::set_buffer_size).
    ///
    /// # Default
    ///
    /// [`DEFAULT_BUFFER_SIZE`] (4096)
    pub buffer_size: usize,

    /// Whether an empty final token is emitted.
    ///
    /// # Default
    ///
    /// [`TrailingEmpty::Emit`]
    pub trailing_empty: TrailingEmpty,
}

impl SplitterOptions {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_size == 0 {
            return Err(ConfigError::ZeroBufferSize);
        }
        Ok(())
    }
}

impl Default for SplitterOptions {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            trailing_empty: TrailingEmpty::default(),
        }
    }
}
