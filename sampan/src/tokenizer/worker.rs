//! Provider of a routine for tokenization.
use std::io::Read;

use crate::reader::CharReader;
use crate::segmenter::Segmenter;
use crate::token::Token;
use crate::tokenizer::arbitrator;
use crate::tokenizer::context::AnalyzeContext;
use crate::tokenizer::Tokenizer;

/// Provider of a routine for tokenization.
///
/// It reads the input stream window by window and yields tokens one by one.
/// The internal data structures are reused over the windows.
pub struct Worker<'a, R> {
    tokenizer: &'a Tokenizer,
    reader: CharReader<R>,
    context: AnalyzeContext,
    segmenters: [Segmenter<'a>; 3],
}

impl<'a, R> Worker<'a, R>
where
    R: Read,
{
    /// Creates a new instance.
    pub(crate) fn new(tokenizer: &'a Tokenizer, input: R) -> Self {
        Self {
            tokenizer,
            reader: CharReader::new(input),
            context: AnalyzeContext::new(tokenizer.window_len()),
            segmenters: Segmenter::all(tokenizer.dictionary()),
        }
    }

    /// Resets the input stream to be tokenized.
    pub fn reset(&mut self, input: R) {
        self.reader = CharReader::new(input);
        self.context.reset();
        for s in &mut self.segmenters {
            s.reset();
        }
    }

    /// Gets the next token, or `None` at the end of the input.
    pub fn next_token(&mut self) -> Option<Token> {
        let tokenizer = self.tokenizer;
        loop {
            let next = self
                .context
                .next_lexeme(tokenizer.dictionary(), tokenizer.is_smart());
            if let Some(lexeme) = next {
                return Some(Token::new(lexeme));
            }
            if self.context.fill_buffer(&mut self.reader) == 0 {
                self.context.reset();
                return None;
            }
            self.scan();
        }
    }

    /// Analyzes the current window and moves the resolved lexemes to the output queue.
    fn scan(&mut self) {
        self.context.init_cursor();
        loop {
            for s in &mut self.segmenters {
                s.analyze(&mut self.context);
            }
            if self.context.need_refill_buffer() || !self.context.move_cursor() {
                break;
            }
        }
        for s in &mut self.segmenters {
            s.reset();
        }

        log::debug!(
            "Scanned {} of {} characters at offset {}: {} lexemes pooled",
            self.context.cursor() + 1,
            self.context.available(),
            self.context.buff_offset(),
            self.context.org_lexemes_mut().len(),
        );

        arbitrator::process(&mut self.context, self.tokenizer.is_smart());
        self.context.output_to_result();
        self.context.mark_buffer_offset();
        self.context.clear_pass();
    }
}

impl<'a, R> Iterator for Worker<'a, R>
where
    R: Read,
{
    type Item = Token;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use crate::dictionary::{Dictionary, LexiconKind};
    use crate::lexeme::LexemeType;
    use crate::Tokenizer;

    #[test]
    fn test_next_token() {
        let mut dict = Dictionary::new();
        dict.insert_word(LexiconKind::Main, "自然");
        dict.insert_word(LexiconKind::Main, "语言");
        let tokenizer = Tokenizer::new(dict).smart(true);
        let mut worker = tokenizer.new_worker("自然语言 NLP".as_bytes());

        let token = worker.next_token().unwrap();
        assert_eq!(token.surface(), "自然");
        assert_eq!(token.range_char(), 0..2);
        assert_eq!(token.lexeme_type(), LexemeType::ChineseWord);

        let token = worker.next_token().unwrap();
        assert_eq!(token.surface(), "语言");
        assert_eq!(token.range_char(), 2..4);

        let token = worker.next_token().unwrap();
        assert_eq!(token.surface(), "NLP");
        assert_eq!(token.range_char(), 5..8);
        assert_eq!(token.lexeme_type(), LexemeType::English);

        assert!(worker.next_token().is_none());
        assert!(worker.next_token().is_none());
    }

    #[test]
    fn test_reset() {
        let tokenizer = Tokenizer::new(Dictionary::new());
        let mut worker = tokenizer.new_worker("甲乙".as_bytes());
        assert_eq!(worker.next_token().unwrap().surface(), "甲");

        worker.reset("丙".as_bytes());
        let surfaces: Vec<String> = worker.map(|t| t.surface().to_string()).collect();
        assert_eq!(surfaces, vec!["丙"]);
    }

    #[test]
    fn test_empty_input() {
        let tokenizer = Tokenizer::new(Dictionary::new());
        let mut worker = tokenizer.new_worker(&b""[..]);
        assert!(worker.next_token().is_none());
        let mut worker = tokenizer.new_worker(" ,.!".as_bytes());
        assert!(worker.next_token().is_none());
    }
}
