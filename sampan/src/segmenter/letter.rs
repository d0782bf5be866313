use crate::character::CharType;
use crate::lexeme::{Lexeme, LexemeType};
use crate::tokenizer::context::AnalyzeContext;

const NAME: &str = "LETTER_SEGMENTER";

const LETTER_CONNECTORS: &[char] = &['#', '&', '+', '-', '.', '@', '_'];
const NUM_CONNECTORS: &[char] = &[',', '.'];

/// Range `start..=end` of the run being tracked.
#[derive(Clone, Copy, Default)]
struct Run(Option<(usize, usize)>);

impl Run {
    #[inline(always)]
    fn extend(&mut self, cursor: usize) {
        match &mut self.0 {
            Some((_, end)) => *end = cursor,
            None => self.0 = Some((cursor, cursor)),
        }
    }

    #[inline(always)]
    const fn is_active(&self) -> bool {
        self.0.is_some()
    }

    fn flush(&mut self, ctx: &mut AnalyzeContext, lexeme_type: LexemeType) {
        if let Some((start, end)) = self.0.take() {
            if let Some(lexeme) = Lexeme::spanning(ctx.buff_offset(), start, end, lexeme_type) {
                ctx.add_lexeme(lexeme);
            }
        }
    }
}

/// Segmenter of Latin words, numbers and their mixtures such as `windows2000`.
#[derive(Default)]
pub(crate) struct LetterSegmenter {
    english: Run,
    arabic: Run,
    mixed: Run,
}

impl LetterSegmenter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn process_english(&mut self, ctx: &mut AnalyzeContext) {
        if ctx.current_char_type() == CharType::Latin {
            self.english.extend(ctx.cursor());
        } else {
            self.english.flush(ctx, LexemeType::English);
        }
        if ctx.is_buffer_consumed() {
            self.english.flush(ctx, LexemeType::English);
        }
    }

    fn process_arabic(&mut self, ctx: &mut AnalyzeContext) {
        let char_type = ctx.current_char_type();
        if char_type == CharType::Digit {
            self.arabic.extend(ctx.cursor());
        } else if self.arabic.is_active()
            && char_type == CharType::Insignificant
            && NUM_CONNECTORS.contains(&ctx.current_char())
        {
            // A connector neither ends the number nor is part of it.
        } else {
            self.arabic.flush(ctx, LexemeType::Digit);
        }
        if ctx.is_buffer_consumed() {
            self.arabic.flush(ctx, LexemeType::Digit);
        }
    }

    fn process_mixed(&mut self, ctx: &mut AnalyzeContext) {
        let char_type = ctx.current_char_type();
        if matches!(char_type, CharType::Latin | CharType::Digit)
            || (self.mixed.is_active()
                && char_type == CharType::Insignificant
                && LETTER_CONNECTORS.contains(&ctx.current_char()))
        {
            self.mixed.extend(ctx.cursor());
        } else {
            self.mixed.flush(ctx, LexemeType::MixedLetter);
        }
        if ctx.is_buffer_consumed() {
            self.mixed.flush(ctx, LexemeType::MixedLetter);
        }
    }

    pub(crate) fn analyze(&mut self, ctx: &mut AnalyzeContext) {
        // The mixed run comes last so that pure runs keep their types in the pool.
        self.process_english(ctx);
        self.process_arabic(ctx);
        self.process_mixed(ctx);

        if self.english.is_active() || self.arabic.is_active() || self.mixed.is_active() {
            ctx.lock_buffer(NAME);
        } else {
            ctx.unlock_buffer(NAME);
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use crate::lexeme::LexemeType::*;
    use crate::segmenter::test_utils::scan;
    use crate::segmenter::{LetterSegmenter, Segmenter};

    fn letters(text: &str) -> Vec<(usize, usize, crate::lexeme::LexemeType)> {
        scan(&mut [Segmenter::Letter(LetterSegmenter::new())], text)
    }

    #[test]
    fn test_english_and_digit() {
        assert_eq!(
            letters("abc 123"),
            vec![(0, 3, English), (4, 3, Digit)]
        );
    }

    #[test]
    fn test_mixed() {
        assert_eq!(
            letters("windows2000"),
            vec![(0, 11, MixedLetter), (0, 7, English), (7, 4, Digit)]
        );
        assert_eq!(
            letters("a@b.cn"),
            vec![(0, 6, MixedLetter), (0, 1, English), (2, 1, English), (4, 2, English)]
        );
    }

    #[test]
    fn test_number_connectors() {
        assert_eq!(
            letters("1,234.5"),
            vec![(0, 7, Digit), (0, 1, MixedLetter), (2, 5, MixedLetter)]
        );
        assert_eq!(letters("12. "), vec![(0, 3, MixedLetter), (0, 2, Digit)]);
    }

    #[test]
    fn test_flush_at_end() {
        assert_eq!(letters("中a"), vec![(1, 1, English)]);
        assert_eq!(letters("中"), vec![]);
    }
}
