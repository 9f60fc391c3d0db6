/// Decoded text that has not been emitted yet.
///
/// `text[..cursor]` is dead: it was returned inside some token (or was the
/// separator after one) and is discarded by the next [`compact`]. Everything
/// from `cursor` on is unconsumed. `scanned` marks how far the scanner has
/// already looked for a separator, so a refill never causes a rescan.
///
/// Both offsets are byte offsets on char boundaries, with
/// `cursor <= scanned <= text.len()`.
///
/// [`compact`]: TextBuffer::compact
#[derive(Debug, Default)]
pub(crate) struct TextBuffer {
    text: String,
    cursor: usize,
    scanned: usize,
}

impl TextBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Gives the decoder access to the end of the buffer. Callers only
    /// append.
    pub(crate) fn tail_mut(&mut self) -> &mut String {
        &mut self.text
    }

    /// Drops the dead prefix so memory stays proportional to the longest
    /// token plus one chunk.
    pub(crate) fn compact(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.text.drain(..self.cursor);
        self.scanned -= self.cursor;
        self.cursor = 0;
    }

    /// Unconsumed text.
    pub(crate) fn pending(&self) -> &str {
        &self.text[self.cursor..]
    }

    /// Text the scanner has not looked at yet.
    pub(crate) fn unscanned(&self) -> &str {
        &self.text[self.scanned..]
    }

    /// Records that everything currently buffered was searched without
    /// finding a separator.
    pub(crate) fn mark_scanned(&mut self) {
        self.scanned = self.text.len();
    }

    /// Emits `text[cursor..end]` and moves the cursor past the separator of
    /// `separator_len` bytes that starts at `end`.
    pub(crate) fn take_token(&mut self, end: usize, separator_len: usize) -> String {
        debug_assert!(self.cursor <= end && end + separator_len <= self.text.len());
        let token = self.text[self.cursor..end].to_owned();
        self.cursor = end + separator_len;
        self.scanned = self.cursor;
        token
    }

    /// Emits everything left and leaves the buffer drained.
    pub(crate) fn take_rest(&mut self) -> String {
        let rest = self.text.split_off(self.cursor);
        self.text.clear();
        self.cursor = 0;
        self.scanned = 0;
        rest
    }

    pub(crate) fn scanned(&self) -> usize {
        self.scanned
    }
}
