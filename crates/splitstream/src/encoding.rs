use core::fmt;

use encoding_rs::Encoding;

/// The text encoding a [`Splitter`](crate::Splitter) decodes raw bytes with.
///
/// A thin, copyable handle on an [`encoding_rs::Encoding`]. The encoding is
/// fixed for the lifetime of a splitter and bytes are decoded verbatim: a
/// leading byte-order mark is neither stripped nor used to switch encodings.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding(&'static Encoding);

impl TextEncoding {
    /// UTF-8, the default.
    pub const UTF_8: Self = Self(&encoding_rs::UTF_8_INIT);
    /// UTF-16, little-endian.
    pub const UTF_16LE: Self = Self(&encoding_rs::UTF_16LE_INIT);
    /// UTF-16, big-endian.
    pub const UTF_16BE: Self = Self(&encoding_rs::UTF_16BE_INIT);
    /// windows-1252, which is also what the WHATWG labels `latin1` and
    /// `iso-8859-1` resolve to.
    pub const WINDOWS_1252: Self = Self(&encoding_rs::WINDOWS_1252_INIT);
    /// `Shift_JIS`.
    pub const SHIFT_JIS: Self = Self(&encoding_rs::SHIFT_JIS_INIT);

    /// Resolves a WHATWG encoding label such as `"utf-8"`, `"latin1"` or
    /// `"utf-16le"`. Returns `None` for unknown labels.
    #[must_use]
    pub fn for_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.as_bytes()).map(Self)
    }

    /// The canonical name of the encoding.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.0.name()
    }

    #[must_use]
    pub(crate) fn is_utf8(self) -> bool {
        self.0 == encoding_rs::UTF_8
    }

    pub(crate) fn inner(self) -> &'static Encoding {
        self.0
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::UTF_8
    }
}

impl From<&'static Encoding> for TextEncoding {
    fn from(encoding: &'static Encoding) -> Self {
        Self(encoding)
    }
}

impl fmt::Debug for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextEncoding").field(&self.name()).finish()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
