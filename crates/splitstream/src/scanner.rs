//! Separator scanning over the [`TextBuffer`].

use crate::{buffer::TextBuffer, options::TrailingEmpty, separators::SeparatorSet};

/// Finds tokens in buffered text. Holds no text of its own.
#[derive(Debug, Clone)]
pub(crate) struct Scanner {
    separators: SeparatorSet,
    trailing_empty: TrailingEmpty,
}

impl Scanner {
    pub(crate) fn new(separators: SeparatorSet, trailing_empty: TrailingEmpty) -> Self {
        Self {
            separators,
            trailing_empty,
        }
    }

    pub(crate) fn separators(&self) -> &SeparatorSet {
        &self.separators
    }

    /// Returns the token ending at the next separator, consuming both.
    ///
    /// `None` means no separator is buffered yet: the caller refills and
    /// calls again. Only text appended since the last call is searched.
    pub(crate) fn scan(&self, buffer: &mut TextBuffer) -> Option<String> {
        let from = buffer.scanned();
        if let Some((idx, len)) = self.separators.find_in(buffer.unscanned()) {
            return Some(buffer.take_token(from + idx, len));
        }
        buffer.mark_scanned();
        None
    }

    /// Returns the final token once the source is exhausted and no separator
    /// remains. `None` only when the final token is empty and the policy
    /// drops it.
    pub(crate) fn finish(&self, buffer: &mut TextBuffer) -> Option<String> {
        debug_assert!(self.separators.find_in(buffer.pending()).is_none());
        let rest = buffer.take_rest();
        match self.trailing_empty {
            TrailingEmpty::Skip if rest.is_empty() => None,
            TrailingEmpty::Emit | TrailingEmpty::Skip => Some(rest),
        }
    }
}
