use std::collections::VecDeque;
use std::io::Read;

use hashbrown::{HashMap, HashSet};

use crate::character::{self, CharType};
use crate::common::BUFF_EXHAUST_CRITICAL;
use crate::dictionary::Dictionary;
use crate::lexeme::path::LexemePath;
use crate::lexeme::set::LexemeSet;
use crate::lexeme::{Lexeme, LexemeType};
use crate::reader::CharReader;

/// State of the analysis over a window of the input stream.
///
/// The window has a fixed capacity. Characters after the cursor are carried over
/// to the next window when the window is refilled.
pub(crate) struct AnalyzeContext {
    segment_buff: Vec<char>,
    char_types: Vec<CharType>,
    buff_offset: usize,
    cursor: usize,
    available: usize,
    buff_locker: HashSet<&'static str>,
    org_lexemes: LexemeSet,
    path_map: HashMap<usize, LexemePath>,
    results: VecDeque<Lexeme>,
}

impl AnalyzeContext {
    pub(crate) fn new(window_size: usize) -> Self {
        Self {
            segment_buff: vec!['\0'; window_size],
            char_types: vec![CharType::Insignificant; window_size],
            buff_offset: 0,
            cursor: 0,
            available: 0,
            buff_locker: HashSet::new(),
            org_lexemes: LexemeSet::new(),
            path_map: HashMap::new(),
            results: VecDeque::new(),
        }
    }

    #[inline(always)]
    pub(crate) fn segment_buff(&self) -> &[char] {
        &self.segment_buff
    }

    #[inline(always)]
    pub(crate) const fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline(always)]
    pub(crate) const fn buff_offset(&self) -> usize {
        self.buff_offset
    }

    #[inline(always)]
    pub(crate) const fn available(&self) -> usize {
        self.available
    }

    #[inline(always)]
    pub(crate) fn current_char(&self) -> char {
        self.segment_buff[self.cursor]
    }

    #[inline(always)]
    pub(crate) fn current_char_type(&self) -> CharType {
        self.char_types[self.cursor]
    }

    /// Loads characters into the window and returns the number of valid characters.
    ///
    /// Except on the first call, the characters after the cursor are moved
    /// to the head of the window before reading.
    pub(crate) fn fill_buffer<R>(&mut self, reader: &mut CharReader<R>) -> usize
    where
        R: Read,
    {
        let read_count = if self.available == 0 {
            reader.read_chars(&mut self.segment_buff)
        } else {
            let rest = self.available - self.cursor - 1;
            self.segment_buff
                .copy_within(self.cursor + 1..self.available, 0);
            rest + reader.read_chars(&mut self.segment_buff[rest..])
        };
        self.available = read_count;
        self.cursor = 0;
        read_count
    }

    pub(crate) fn init_cursor(&mut self) {
        self.cursor = 0;
        self.classify_current();
    }

    /// Moves the cursor forward, returning `false` if it is at the last valid character.
    pub(crate) fn move_cursor(&mut self) -> bool {
        if self.cursor + 1 < self.available {
            self.cursor += 1;
            self.classify_current();
            true
        } else {
            false
        }
    }

    #[inline(always)]
    fn classify_current(&mut self) {
        self.char_types[self.cursor] = character::classify(self.segment_buff[self.cursor]);
    }

    pub(crate) fn lock_buffer(&mut self, name: &'static str) {
        self.buff_locker.insert(name);
    }

    pub(crate) fn unlock_buffer(&mut self, name: &'static str) {
        self.buff_locker.remove(name);
    }

    /// Checks if any segmenter is in the middle of a match.
    #[inline(always)]
    pub(crate) fn is_buffer_locked(&self) -> bool {
        !self.buff_locker.is_empty()
    }

    /// Checks if the cursor reaches the last valid character.
    #[inline(always)]
    pub(crate) const fn is_buffer_consumed(&self) -> bool {
        self.cursor + 1 == self.available
    }

    /// Checks if the scan should pause to shift and refill the window.
    pub(crate) fn need_refill_buffer(&self) -> bool {
        self.available == self.segment_buff.len()
            && self.cursor + 1 < self.available
            && self.cursor + BUFF_EXHAUST_CRITICAL > self.available
            && !self.is_buffer_locked()
    }

    /// Advances the window offset by the number of consumed characters.
    pub(crate) fn mark_buffer_offset(&mut self) {
        self.buff_offset += self.cursor + 1;
    }

    /// Offers a lexeme to the pool. A lexeme with an already pooled span is dropped.
    pub(crate) fn add_lexeme(&mut self, lexeme: Lexeme) {
        self.org_lexemes.insert(lexeme);
    }

    /// Gets the last lexeme of the pool in the lexeme order.
    #[inline(always)]
    pub(crate) fn last_pooled(&self) -> Option<&Lexeme> {
        self.org_lexemes.last()
    }

    pub(crate) fn org_lexemes_mut(&mut self) -> &mut LexemeSet {
        &mut self.org_lexemes
    }

    /// Registers the resolved path of a cluster by its beginning position.
    pub(crate) fn add_lexeme_path(&mut self, path: LexemePath) {
        if path.is_empty() {
            return;
        }
        let prev = self.path_map.insert(path.path_begin(), path);
        debug_assert!(prev.is_none(), "two paths start at the same position");
    }

    fn output_single(&mut self, index: usize) {
        let lexeme_type = match self.char_types[index] {
            CharType::Han => LexemeType::ChineseChar,
            CharType::OtherCjk => LexemeType::OtherCjkChar,
            CharType::Latin => LexemeType::English,
            CharType::Digit => LexemeType::Digit,
            CharType::Insignificant => return,
        };
        self.results
            .push_back(Lexeme::new(self.buff_offset, index, 1, lexeme_type));
    }

    /// Moves the resolved lexemes of the scanned part of the window to the output queue.
    ///
    /// Characters not covered by any path are output one by one.
    pub(crate) fn output_to_result(&mut self) {
        let mut index = 0;
        while index <= self.cursor {
            if self.char_types[index] == CharType::Insignificant {
                index += 1;
                continue;
            }
            let Some(mut path) = self.path_map.remove(&index) else {
                self.output_single(index);
                index += 1;
                continue;
            };
            while let Some(lexeme) = path.pop_first() {
                for i in index..lexeme.begin {
                    self.output_single(i);
                }
                index = index.max(lexeme.end());
                self.results.push_back(lexeme);
            }
        }
        self.path_map.clear();
    }

    /// Merges numerals and classifiers following `lexeme` in the queue.
    fn compound(&mut self, lexeme: &mut Lexeme) {
        if lexeme.lexeme_type == LexemeType::Digit {
            let merged = match self.results.front() {
                Some(next) if next.lexeme_type == LexemeType::ChineseNumeral => {
                    lexeme.append(next, LexemeType::ChineseNumeral)
                }
                Some(next) if next.lexeme_type == LexemeType::Classifier => {
                    lexeme.append(next, LexemeType::NumeralClassifierCompound)
                }
                _ => false,
            };
            if merged {
                self.results.pop_front();
            }
        }
        if lexeme.lexeme_type == LexemeType::ChineseNumeral {
            let merged = match self.results.front() {
                Some(next) if next.lexeme_type == LexemeType::Classifier => {
                    lexeme.append(next, LexemeType::NumeralClassifierCompound)
                }
                _ => false,
            };
            if merged {
                self.results.pop_front();
            }
        }
    }

    /// Pops the next lexeme from the output queue, skipping stop words.
    ///
    /// The text of the returned lexeme is filled from the window.
    pub(crate) fn next_lexeme(&mut self, dict: &Dictionary, smart: bool) -> Option<Lexeme> {
        while let Some(mut lexeme) = self.results.pop_front() {
            if smart {
                self.compound(&mut lexeme);
            }
            if dict.is_stop_word(&self.segment_buff, lexeme.begin, lexeme.length) {
                continue;
            }
            lexeme.text = self.segment_buff[lexeme.begin..lexeme.end()]
                .iter()
                .collect();
            return Some(lexeme);
        }
        None
    }

    /// Clears the state before the next scan pass.
    pub(crate) fn clear_pass(&mut self) {
        self.buff_locker.clear();
        self.org_lexemes.clear();
        self.path_map.clear();
    }

    pub(crate) fn reset(&mut self) {
        self.clear_pass();
        self.results.clear();
        self.buff_offset = 0;
        self.cursor = 0;
        self.available = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(text: &str, window_size: usize) -> AnalyzeContext {
        let mut ctx = AnalyzeContext::new(window_size);
        let mut reader = CharReader::new(text.as_bytes());
        ctx.fill_buffer(&mut reader);
        ctx.init_cursor();
        while ctx.move_cursor() {}
        ctx
    }

    #[test]
    fn test_fill_buffer_shift() {
        let text: String = std::iter::repeat('a').take(6).chain("bcd".chars()).collect();
        let mut reader = CharReader::new(text.as_bytes());
        let mut ctx = AnalyzeContext::new(8);
        assert_eq!(ctx.fill_buffer(&mut reader), 8);
        ctx.init_cursor();
        for _ in 0..5 {
            assert!(ctx.move_cursor());
        }
        assert_eq!(ctx.cursor(), 5);
        ctx.mark_buffer_offset();
        assert_eq!(ctx.buff_offset(), 6);

        assert_eq!(ctx.fill_buffer(&mut reader), 3);
        assert_eq!(&ctx.segment_buff()[..3], &['b', 'c', 'd']);
        ctx.init_cursor();
        assert!(ctx.move_cursor());
        assert!(ctx.move_cursor());
        assert!(!ctx.move_cursor());
        assert!(ctx.is_buffer_consumed());
        ctx.mark_buffer_offset();
        assert_eq!(ctx.buff_offset(), 9);
        assert_eq!(ctx.fill_buffer(&mut reader), 0);
    }

    #[test]
    fn test_need_refill_buffer() {
        let window_size = BUFF_EXHAUST_CRITICAL + 20;
        let text: String = std::iter::repeat('中').take(window_size + 5).collect();
        let mut reader = CharReader::new(text.as_bytes());
        let mut ctx = AnalyzeContext::new(window_size);
        ctx.fill_buffer(&mut reader);
        ctx.init_cursor();
        while !ctx.need_refill_buffer() {
            assert!(ctx.move_cursor());
        }
        assert_eq!(ctx.cursor(), window_size - BUFF_EXHAUST_CRITICAL + 1);

        ctx.lock_buffer("TEST");
        assert!(!ctx.need_refill_buffer());
        ctx.unlock_buffer("TEST");
        assert!(ctx.need_refill_buffer());

        while ctx.move_cursor() {}
        assert!(!ctx.need_refill_buffer());
    }

    #[test]
    fn test_output_to_result_fills_gaps() {
        let mut ctx = filled("中a 国人", 16);
        let mut path = LexemePath::new();
        assert!(path.add_not_cross_lexeme(&Lexeme::new(0, 0, 1, LexemeType::ChineseWord)));
        assert!(path.add_not_cross_lexeme(&Lexeme::new(0, 4, 1, LexemeType::ChineseWord)));
        ctx.add_lexeme_path(path);
        ctx.output_to_result();

        let dict = Dictionary::new();
        let mut got = vec![];
        while let Some(l) = ctx.next_lexeme(&dict, true) {
            got.push((l.text, l.lexeme_type));
        }
        assert_eq!(
            got,
            vec![
                ("中".to_string(), LexemeType::ChineseWord),
                ("a".to_string(), LexemeType::English),
                ("国".to_string(), LexemeType::ChineseChar),
                ("人".to_string(), LexemeType::ChineseWord),
            ]
        );
    }

    #[test]
    fn test_compound_digit_classifier() {
        let mut ctx = filled("2005年", 16);
        let mut digit = LexemePath::new();
        assert!(digit.add_not_cross_lexeme(&Lexeme::new(0, 0, 4, LexemeType::Digit)));
        let mut classifier = LexemePath::new();
        assert!(classifier.add_not_cross_lexeme(&Lexeme::new(0, 4, 1, LexemeType::Classifier)));
        ctx.add_lexeme_path(digit);
        ctx.add_lexeme_path(classifier);
        ctx.output_to_result();

        let dict = Dictionary::new();
        let l = ctx.next_lexeme(&dict, true).unwrap();
        assert_eq!(l.begin_position(), 0);
        assert_eq!(l.length, 5);
        assert_eq!(l.lexeme_type, LexemeType::NumeralClassifierCompound);
        assert_eq!(l.text, "2005年");
        assert!(ctx.next_lexeme(&dict, true).is_none());
    }

    #[test]
    fn test_compound_two_rounds() {
        let mut ctx = filled("3万个", 16);
        for (begin, length, ty) in [
            (0, 1, LexemeType::Digit),
            (1, 1, LexemeType::ChineseNumeral),
            (2, 1, LexemeType::Classifier),
        ] {
            let mut path = LexemePath::new();
            assert!(path.add_not_cross_lexeme(&Lexeme::new(0, begin, length, ty)));
            ctx.add_lexeme_path(path);
        }
        ctx.output_to_result();

        let dict = Dictionary::new();
        let l = ctx.next_lexeme(&dict, false).unwrap();
        assert_eq!(l.lexeme_type, LexemeType::Digit);
        ctx.reset();

        let mut ctx = filled("3万个", 16);
        for (begin, length, ty) in [
            (0, 1, LexemeType::Digit),
            (1, 1, LexemeType::ChineseNumeral),
            (2, 1, LexemeType::Classifier),
        ] {
            let mut path = LexemePath::new();
            assert!(path.add_not_cross_lexeme(&Lexeme::new(0, begin, length, ty)));
            ctx.add_lexeme_path(path);
        }
        ctx.output_to_result();
        let l = ctx.next_lexeme(&dict, true).unwrap();
        assert_eq!(l.text, "3万个");
        assert_eq!(l.lexeme_type, LexemeType::NumeralClassifierCompound);
    }

    #[test]
    fn test_next_lexeme_skips_stop_words() {
        let mut ctx = filled("我的书", 16);
        ctx.output_to_result();
        let mut dict = Dictionary::new();
        dict.insert_word(crate::dictionary::LexiconKind::StopWord, "的");
        let texts: Vec<String> = std::iter::from_fn(|| ctx.next_lexeme(&dict, true))
            .map(|l| l.text)
            .collect();
        assert_eq!(texts, vec!["我", "书"]);
    }

    #[test]
    fn test_last_pooled_in_lexeme_order() {
        let mut ctx = AnalyzeContext::new(16);
        ctx.add_lexeme(Lexeme::new(0, 2, 4, LexemeType::Digit));
        ctx.add_lexeme(Lexeme::new(0, 0, 6, LexemeType::MixedLetter));
        ctx.add_lexeme(Lexeme::new(0, 0, 2, LexemeType::English));
        let last = ctx.last_pooled().unwrap();
        assert_eq!((last.begin, last.length), (2, 4));
        assert_eq!(last.lexeme_type, LexemeType::Digit);
        assert_eq!(ctx.org_lexemes_mut().len(), 3);
        ctx.clear_pass();
        assert!(ctx.last_pooled().is_none());
        assert!(ctx.org_lexemes_mut().is_empty());
    }
}
