//! Dictionary for tokenization.
pub(crate) mod builder;
pub(crate) mod trie;

use std::io::{Read, Write};

use bincode::{Decode, Encode};

use crate::common;
use crate::errors::{Result, SampanError};

pub use trie::{Hit, Trie};

/// Magic bytes at the head of an exported dictionary.
pub const MODEL_MAGIC: &[u8] = b"SampanDictionary 0.1\n";

/// Kind of a lexicon stored in [`Dictionary`].
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum LexiconKind {
    /// Words recognized by the CJK segmenter, including the classifiers following numbers.
    Main,
    /// Measure words. Loaded but not consulted by the segmenters.
    Quantifier,
    /// Words removed from the output.
    StopWord,
    /// Surnames. Loaded but not consulted by the segmenters.
    Surname,
    /// Suffixes. Loaded but not consulted by the segmenters.
    Suffix,
    /// Prepositions. Loaded but not consulted by the segmenters.
    Preposition,
}

impl LexiconKind {
    /// Gets the name used in messages.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Quantifier => "quantifier",
            Self::StopWord => "stopword",
            Self::Surname => "surname",
            Self::Suffix => "suffix",
            Self::Preposition => "preposition",
        }
    }
}

/// Inner data of [`Dictionary`].
#[derive(Default, Decode, Encode)]
struct DictionaryInner {
    main: Trie,
    quantifier: Trie,
    stop_word: Trie,
    surname: Trie,
    suffix: Trie,
    preposition: Trie,
}

/// Dictionary for tokenization.
///
/// It is built once and then only read by tokenizers,
/// so one instance can be shared among threads.
#[derive(Default)]
pub struct Dictionary(DictionaryInner);

impl Dictionary {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the reference to the lexicon of the kind.
    #[inline(always)]
    pub const fn lexicon(&self, kind: LexiconKind) -> &Trie {
        match kind {
            LexiconKind::Main => &self.0.main,
            LexiconKind::Quantifier => &self.0.quantifier,
            LexiconKind::StopWord => &self.0.stop_word,
            LexiconKind::Surname => &self.0.surname,
            LexiconKind::Suffix => &self.0.suffix,
            LexiconKind::Preposition => &self.0.preposition,
        }
    }

    fn lexicon_mut(&mut self, kind: LexiconKind) -> &mut Trie {
        match kind {
            LexiconKind::Main => &mut self.0.main,
            LexiconKind::Quantifier => &mut self.0.quantifier,
            LexiconKind::StopWord => &mut self.0.stop_word,
            LexiconKind::Surname => &mut self.0.surname,
            LexiconKind::Suffix => &mut self.0.suffix,
            LexiconKind::Preposition => &mut self.0.preposition,
        }
    }

    /// Registers a word to the lexicon of the kind.
    pub fn insert_word(&mut self, kind: LexiconKind, word: &str) {
        self.lexicon_mut(kind).insert(word.chars());
    }

    /// Unregisters a word from the lexicon of the kind.
    ///
    /// Returns `true` if the word was registered.
    pub fn disable_word(&mut self, kind: LexiconKind, word: &str) -> bool {
        self.lexicon_mut(kind).disable(word.chars())
    }

    /// Checks if `chars[begin..begin + length]` is a stop word.
    #[inline(always)]
    pub fn is_stop_word(&self, chars: &[char], begin: usize, length: usize) -> bool {
        self.0.stop_word.match_at(chars, begin, length).is_match()
    }

    /// Exports the dictionary data.
    ///
    /// # Errors
    ///
    /// When bincode generates an error, it will be returned as is.
    pub fn write<W>(&self, mut wtr: W) -> Result<usize>
    where
        W: Write,
    {
        wtr.write_all(MODEL_MAGIC)?;
        let num_bytes =
            bincode::encode_into_std_write(&self.0, &mut wtr, common::bincode_config())?;
        Ok(MODEL_MAGIC.len() + num_bytes)
    }

    /// Creates a dictionary from a reader.
    ///
    /// # Errors
    ///
    /// [`SampanError`] is returned when the data does not start with [`MODEL_MAGIC`],
    /// or bincode generates an error.
    pub fn read<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut magic = [0; MODEL_MAGIC.len()];
        rdr.read_exact(&mut magic)?;
        if magic != MODEL_MAGIC {
            return Err(SampanError::invalid_argument(
                "rdr",
                "The magic number of the input model mismatches.",
            ));
        }
        let data = bincode::decode_from_std_read(&mut rdr, common::bincode_config())?;
        Ok(Self(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_read() {
        let mut dict = Dictionary::new();
        for w in ["中华", "中华人民", "人民", "一", "二", "三", "四"] {
            dict.insert_word(LexiconKind::Main, w);
        }
        dict.insert_word(LexiconKind::Quantifier, "个");
        dict.insert_word(LexiconKind::StopWord, "的");
        dict.insert_word(LexiconKind::Surname, "李");

        let mut data = vec![];
        let num_bytes = dict.write(&mut data).unwrap();
        assert_eq!(num_bytes, data.len());

        let other = Dictionary::read(data.as_slice()).unwrap();
        let main = other.lexicon(LexiconKind::Main);
        assert_eq!(main.num_words(), 7);
        assert!(main.contains("中华人民"));
        assert!(main.contains("四"));
        assert!(!main.contains("中华人"));
        assert!(other.lexicon(LexiconKind::Quantifier).contains("个"));
        assert!(other.lexicon(LexiconKind::Surname).contains("李"));
        assert!(other.is_stop_word(&['的'], 0, 1));

        let text: Vec<char> = "中华人民".chars().collect();
        let hit = main.match_at(&text, 0, 2);
        assert!(hit.is_match() && hit.is_prefix());
    }

    #[test]
    fn test_read_bad_magic() {
        let data = b"NotADictionary 0.0\n\0\0\0\0";
        assert!(Dictionary::read(&data[..]).is_err());
    }

    #[test]
    fn test_stop_word_exact() {
        let mut dict = Dictionary::new();
        dict.insert_word(LexiconKind::StopWord, "的确");
        let text: Vec<char> = "的确".chars().collect();
        assert!(dict.is_stop_word(&text, 0, 2));
        assert!(!dict.is_stop_word(&text, 0, 1));
    }
}
