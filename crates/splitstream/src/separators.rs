use crate::error::ConfigError;

/// Characters with the Unicode `White_Space` property.
const WHITE_SPACE: &[char] = &[
    '\u{0009}', '\u{000A}', '\u{000B}', '\u{000C}', '\u{000D}', '\u{0020}', '\u{0085}', '\u{00A0}',
    '\u{1680}', '\u{2000}', '\u{2001}', '\u{2002}', '\u{2003}', '\u{2004}', '\u{2005}', '\u{2006}',
    '\u{2007}', '\u{2008}', '\u{2009}', '\u{200A}', '\u{2028}', '\u{2029}', '\u{202F}', '\u{205F}',
    '\u{3000}',
];

const NEWLINES: &[char] = &[
    '\u{000A}', '\u{000B}', '\u{000C}', '\u{000D}', '\u{0085}', '\u{2028}', '\u{2029}',
];

/// An immutable, non-empty set of separator characters.
///
/// Membership is the only question a splitter asks of the set. ASCII members
/// live in a bitmap; anything else in a sorted list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorSet {
    ascii: u128,
    others: Vec<char>,
}

impl SeparatorSet {
    /// Builds a set from characters. Duplicates are collapsed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySeparators`] if `chars` yields nothing.
    pub fn new(chars: impl IntoIterator<Item = char>) -> Result<Self, ConfigError> {
        let mut ascii = 0u128;
        let mut others = Vec::new();
        for ch in chars {
            if ch.is_ascii() {
                ascii |= 1 << (ch as u32);
            } else {
                others.push(ch);
            }
        }
        others.sort_unstable();
        others.dedup();

        if ascii == 0 && others.is_empty() {
            return Err(ConfigError::EmptySeparators);
        }
        Ok(Self { ascii, others })
    }

    /// Line terminators: U+000A through U+000D, U+0085, U+2028 and U+2029.
    #[must_use]
    pub fn newlines() -> Self {
        Self::from_table(NEWLINES)
    }

    /// Every character with the Unicode `White_Space` property, newlines
    /// included.
    #[must_use]
    pub fn whitespace_and_newlines() -> Self {
        Self::from_table(WHITE_SPACE)
    }

    fn from_table(table: &[char]) -> Self {
        match Self::new(table.iter().copied()) {
            Ok(set) => set,
            Err(_) => unreachable!("separator tables are non-empty"),
        }
    }

    /// Whether `ch` is a separator.
    #[inline]
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        if ch.is_ascii() {
            self.ascii & (1 << (ch as u32)) != 0
        } else {
            self.others.binary_search(&ch).is_ok()
        }
    }

    /// Number of distinct separators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ascii.count_ones() as usize + self.others.len()
    }

    /// Always `false`: an empty set cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The separators in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        (0u8..128)
            .filter(|&b| self.ascii & (1 << b) != 0)
            .map(char::from)
            .chain(self.others.iter().copied())
    }

    /// Finds the first separator in `haystack`, returning its byte offset and
    /// its encoded length.
    #[inline]
    pub(crate) fn find_in(&self, haystack: &str) -> Option<(usize, usize)> {
        if self.others.is_empty() {
            // ASCII bytes never occur inside a multi-byte UTF-8 sequence.
            return haystack
                .bytes()
                .position(|b| b < 128 && self.ascii & (1 << b) != 0)
                .map(|idx| (idx, 1));
        }
        haystack
            .char_indices()
            .find(|&(_, ch)| self.contains(ch))
            .map(|(idx, ch)| (idx, ch.len_utf8()))
    }
}

impl TryFrom<&str> for SeparatorSet {
    type Error = ConfigError;

    /// Every character of the string is a separator.
    fn try_from(chars: &str) -> Result<Self, Self::Error> {
        Self::new(chars.chars())
    }
}

impl TryFrom<&[char]> for SeparatorSet {
    type Error = ConfigError;

    fn try_from(chars: &[char]) -> Result<Self, Self::Error> {
        Self::new(chars.iter().copied())
    }
}

impl From<char> for SeparatorSet {
    fn from(ch: char) -> Self {
        let mut set = Self {
            ascii: 0,
            others: Vec::new(),
        };
        if ch.is_ascii() {
            set.ascii = 1 << (ch as u32);
        } else {
            set.others.push(ch);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;
    use rstest::rstest;

    use super::*;

    #[test]
    fn empty_set_is_rejected() {
        assert_eq!(SeparatorSet::try_from(""), Err(ConfigError::EmptySeparators));
        assert_eq!(
            SeparatorSet::new(core::iter::empty()),
            Err(ConfigError::EmptySeparators)
        );
    }

    #[test]
    fn duplicates_collapse() {
        let set = SeparatorSet::try_from(",,→→;").unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().collect::<String>(), ",;→");
        assert!(!set.is_empty());
    }

    #[rstest]
    #[case(",", "abc,def", Some((3, 1)))]
    #[case(",;", "ab;c,d", Some((2, 1)))]
    #[case(",", "żółw,x", Some((7, 1)))]
    #[case("→", "a→b", Some((1, 3)))]
    #[case("→,", "ż,→", Some((2, 1)))]
    #[case(",", "no separators", None)]
    #[case("\u{7f}", "a\u{7f}", Some((1, 1)))]
    fn find_in_returns_byte_offsets(
        #[case] separators: &str,
        #[case] haystack: &str,
        #[case] expected: Option<(usize, usize)>,
    ) {
        let set = SeparatorSet::try_from(separators).unwrap();
        assert_eq!(set.find_in(haystack), expected);
    }

    #[test]
    fn predefined_sets() {
        let newlines = SeparatorSet::newlines();
        assert!(newlines.contains('\n'));
        assert!(newlines.contains('\r'));
        assert!(newlines.contains('\u{2028}'));
        assert!(!newlines.contains(' '));

        let ws = SeparatorSet::whitespace_and_newlines();
        for ch in ws.iter() {
            assert!(ch.is_whitespace(), "{ch:?}");
        }
        assert!(ws.contains('\u{3000}'));
        assert_eq!(ws.len(), WHITE_SPACE.len());
    }

    #[test]
    fn from_char() {
        assert_eq!(SeparatorSet::from('|'), SeparatorSet::try_from("|").unwrap());
        assert_eq!(SeparatorSet::from('¦'), SeparatorSet::try_from("¦").unwrap());
    }

    #[quickcheck]
    fn find_in_agrees_with_str_find(text: String, extra: char) -> bool {
        let chars = [',', '\n', extra];
        let set = SeparatorSet::try_from(&chars[..]).unwrap();
        let expected = text
            .find(|c| chars.contains(&c))
            .map(|idx| (idx, text[idx..].chars().next().map_or(0, char::len_utf8)));
        set.find_in(&text) == expected
    }
}
