use std::io::{BufRead, BufReader, Read};

use crate::dictionary::{Dictionary, LexiconKind};
use crate::errors::{Result, SampanError};

const BOM: &str = "\u{FEFF}";

/// Reads a word list, calling `f` for each word.
///
/// Returns the number of words read.
fn for_each_word<R, F>(kind: LexiconKind, rdr: R, mut f: F) -> Result<usize>
where
    R: Read,
    F: FnMut(&str),
{
    let mut rdr = BufReader::new(rdr);
    let mut line = vec![];
    let mut lineno = 0;
    let mut num_words = 0;
    loop {
        line.clear();
        if rdr.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        lineno += 1;
        let text = std::str::from_utf8(&line).map_err(|e| {
            SampanError::invalid_format(
                kind.as_str(),
                format!("The line {lineno} is not valid UTF-8: {e}"),
            )
        })?;
        let text = if lineno == 1 {
            text.strip_prefix(BOM).unwrap_or(text)
        } else {
            text
        };
        let word = text.trim();
        if word.is_empty() {
            continue;
        }
        f(word);
        num_words += 1;
    }
    Ok(num_words)
}

impl Dictionary {
    /// Creates a new instance from word lists.
    ///
    /// Each list has one word per line. Surrounding whitespace is trimmed,
    /// empty lines are skipped, and a leading byte order mark is ignored.
    ///
    /// # Arguments
    ///
    ///  - `main_rdr`: A reader of the main word list.
    ///  - `quantifier_rdr`: A reader of the quantifier word list.
    ///  - `stop_word_rdr`: A reader of the stop word list.
    ///
    /// # Errors
    ///
    /// [`SampanError`] is returned when a list is not valid UTF-8 or cannot be read.
    pub fn from_readers<M, Q, S>(main_rdr: M, quantifier_rdr: Q, stop_word_rdr: S) -> Result<Self>
    where
        M: Read,
        Q: Read,
        S: Read,
    {
        Self::new()
            .words_from_reader(LexiconKind::Main, main_rdr)?
            .words_from_reader(LexiconKind::Quantifier, quantifier_rdr)?
            .words_from_reader(LexiconKind::StopWord, stop_word_rdr)
    }

    /// Adds words of a list to the lexicon of the kind.
    ///
    /// # Errors
    ///
    /// [`SampanError`] is returned when the list is not valid UTF-8 or cannot be read.
    pub fn words_from_reader<R>(mut self, kind: LexiconKind, rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let num_words = for_each_word(kind, rdr, |w| self.insert_word(kind, w))?;
        log::info!(
            "Loaded {num_words} words into the {} lexicon ({} registered)",
            kind.as_str(),
            self.lexicon(kind).num_words(),
        );
        Ok(self)
    }

    /// Removes words of a list from the lexicon of the kind.
    ///
    /// Words not registered are ignored.
    ///
    /// # Errors
    ///
    /// [`SampanError`] is returned when the list is not valid UTF-8 or cannot be read.
    pub fn disabled_words_from_reader<R>(mut self, kind: LexiconKind, rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut num_disabled = 0;
        let num_words = for_each_word(kind, rdr, |w| {
            if self.disable_word(kind, w) {
                num_disabled += 1;
            }
        })?;
        log::info!(
            "Disabled {num_disabled} of {num_words} words in the {} lexicon",
            kind.as_str(),
        );
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_readers() {
        let main = "\u{FEFF}中华\n  人民 \n\n中华人民共和国\r\n";
        let quantifier = "个\n条";
        let stop_word = "的\n了\n";
        let dict =
            Dictionary::from_readers(main.as_bytes(), quantifier.as_bytes(), stop_word.as_bytes())
                .unwrap();

        let main = dict.lexicon(LexiconKind::Main);
        assert_eq!(main.num_words(), 3);
        assert!(main.contains("中华"));
        assert!(main.contains("人民"));
        assert!(main.contains("中华人民共和国"));
        assert_eq!(dict.lexicon(LexiconKind::Quantifier).num_words(), 2);
        assert!(dict.is_stop_word(&['了'], 0, 1));
    }

    #[test]
    fn test_extension_and_disabled() {
        let dict = Dictionary::from_readers("中华\n中华人民".as_bytes(), &[][..], &[][..])
            .unwrap()
            .words_from_reader(LexiconKind::Main, "人民".as_bytes())
            .unwrap()
            .words_from_reader(LexiconKind::StopWord, "啊".as_bytes())
            .unwrap()
            .disabled_words_from_reader(LexiconKind::Main, "中华\n不存在".as_bytes())
            .unwrap();

        let main = dict.lexicon(LexiconKind::Main);
        assert!(!main.contains("中华"));
        assert!(main.contains("中华人民"));
        assert!(main.contains("人民"));
        assert_eq!(main.num_words(), 2);
        assert!(dict.is_stop_word(&['啊'], 0, 1));
    }

    #[test]
    fn test_invalid_utf8() {
        let data = b"\xE4\xB8\xAD\n\xFF\xFE\n";
        let result = Dictionary::new().words_from_reader(LexiconKind::Surname, &data[..]);
        match result {
            Err(SampanError::InvalidFormat(e)) => {
                assert_eq!(e.name, "surname");
                assert!(e.msg.contains("line 2"));
            }
            _ => panic!("an InvalidFormat error is expected"),
        }
    }
}
