//! Lexemes produced by the segmenters.
pub(crate) mod path;
pub(crate) mod set;

use std::cmp::Ordering;
use std::fmt;

/// Type of a lexeme.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[repr(u8)]
pub enum LexemeType {
    /// Unclassified.
    Unknown,
    /// Run of Latin letters.
    English,
    /// Run of digits, possibly containing `,` or `.`.
    Digit,
    /// Run of letters and digits joined by connector symbols, such as `windows2000` or `a@b.com`.
    MixedLetter,
    /// Word found in the main lexicon.
    ChineseWord,
    /// Single Han character not covered by any word.
    ChineseChar,
    /// Single Hiragana, Katakana or Hangul character not covered by any word.
    OtherCjkChar,
    /// Run of Chinese numeral characters.
    ChineseNumeral,
    /// Measure word following a numeral.
    Classifier,
    /// Numeral followed by a classifier, compounded in smart mode.
    NumeralClassifierCompound,
}

impl Default for LexemeType {
    fn default() -> Self {
        Self::Unknown
    }
}

impl LexemeType {
    /// Gets the name of the type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::English => "ENGLISH",
            Self::Digit => "ARABIC",
            Self::MixedLetter => "LETTER",
            Self::ChineseWord => "CN_WORD",
            Self::ChineseChar => "CN_CHAR",
            Self::OtherCjkChar => "OTHER_CJK",
            Self::ChineseNumeral => "TYPE_CNUM",
            Self::Classifier => "COUNT",
            Self::NumeralClassifierCompound => "TYPE_CQUAN",
        }
    }
}

impl fmt::Display for LexemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate token located in the analysis window.
///
/// `offset` is the position of the window in the whole input,
/// and `begin` is the position in the window.
/// Two lexemes are equal if they have the same offset, begin and length.
#[derive(Clone, Default, Debug)]
pub(crate) struct Lexeme {
    pub(crate) offset: usize,
    pub(crate) begin: usize,
    pub(crate) length: usize,
    pub(crate) lexeme_type: LexemeType,
    pub(crate) text: String,
}

impl Lexeme {
    #[inline(always)]
    pub(crate) const fn new(
        offset: usize,
        begin: usize,
        length: usize,
        lexeme_type: LexemeType,
    ) -> Self {
        Self {
            offset,
            begin,
            length,
            lexeme_type,
            text: String::new(),
        }
    }

    /// Creates a lexeme covering `begin..=last` in the window,
    /// or `None` if the range is reversed.
    #[inline(always)]
    pub(crate) const fn spanning(
        offset: usize,
        begin: usize,
        last: usize,
        lexeme_type: LexemeType,
    ) -> Option<Self> {
        if last < begin {
            return None;
        }
        Some(Self::new(offset, begin, last - begin + 1, lexeme_type))
    }

    /// End position in the window (exclusive).
    #[inline(always)]
    pub(crate) const fn end(&self) -> usize {
        self.begin + self.length
    }

    /// Begin position in the whole input.
    #[inline(always)]
    pub(crate) const fn begin_position(&self) -> usize {
        self.offset + self.begin
    }

    /// End position in the whole input (exclusive).
    #[inline(always)]
    pub(crate) const fn end_position(&self) -> usize {
        self.offset + self.begin + self.length
    }

    /// Absorbs the adjacent lexeme `next`, changing the type.
    ///
    /// Returns `false` without modification if `next` does not start
    /// exactly where this lexeme ends.
    pub(crate) fn append(&mut self, next: &Self, lexeme_type: LexemeType) -> bool {
        if self.end_position() != next.begin_position() {
            return false;
        }
        self.length += next.length;
        self.lexeme_type = lexeme_type;
        true
    }
}

impl PartialEq for Lexeme {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && self.begin == other.begin && self.length == other.length
    }
}

impl Eq for Lexeme {}

impl Ord for Lexeme {
    /// Orders by the begin position, placing longer lexemes first.
    fn cmp(&self, other: &Self) -> Ordering {
        self.begin
            .cmp(&other.begin)
            .then_with(|| other.length.cmp(&self.length))
            .then_with(|| self.offset.cmp(&other.offset))
    }
}

impl PartialOrd for Lexeme {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
