//! Segmenters producing candidate lexemes at each cursor position.
mod cjk;
mod letter;
mod quantifier;

use crate::dictionary::Dictionary;
use crate::tokenizer::context::AnalyzeContext;

pub(crate) use cjk::CjkSegmenter;
pub(crate) use letter::LetterSegmenter;
pub(crate) use quantifier::QuantifierSegmenter;

/// Segmenter run at every cursor position.
///
/// When two segmenters offer lexemes of the same span, the one run earlier wins,
/// so the order of [`Segmenter::all()`] is significant.
pub(crate) enum Segmenter<'a> {
    Letter(LetterSegmenter),
    Quantifier(QuantifierSegmenter<'a>),
    Cjk(CjkSegmenter<'a>),
}

impl<'a> Segmenter<'a> {
    /// Creates the segmenters in the order they run.
    pub(crate) fn all(dict: &'a Dictionary) -> [Self; 3] {
        [
            Self::Letter(LetterSegmenter::new()),
            Self::Quantifier(QuantifierSegmenter::new(dict)),
            Self::Cjk(CjkSegmenter::new(dict)),
        ]
    }

    /// Examines the character at the cursor.
    #[inline(always)]
    pub(crate) fn analyze(&mut self, ctx: &mut AnalyzeContext) {
        match self {
            Self::Letter(s) => s.analyze(ctx),
            Self::Quantifier(s) => s.analyze(ctx),
            Self::Cjk(s) => s.analyze(ctx),
        }
    }

    /// Discards the state of an unfinished match.
    #[inline(always)]
    pub(crate) fn reset(&mut self) {
        match self {
            Self::Letter(s) => s.reset(),
            Self::Quantifier(s) => s.reset(),
            Self::Cjk(s) => s.reset(),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::*;

    use crate::lexeme::{Lexeme, LexemeType};
    use crate::reader::CharReader;

    /// Runs the segmenters over the whole text in a single window,
    /// returning the pooled lexemes as `(begin, length, type)`.
    pub(crate) fn scan(
        segmenters: &mut [Segmenter],
        text: &str,
    ) -> Vec<(usize, usize, LexemeType)> {
        let mut ctx = AnalyzeContext::new(text.chars().count().max(1));
        let mut reader = CharReader::new(text.as_bytes());
        if ctx.fill_buffer(&mut reader) == 0 {
            return vec![];
        }
        ctx.init_cursor();
        loop {
            for s in segmenters.iter_mut() {
                s.analyze(&mut ctx);
            }
            if !ctx.move_cursor() {
                break;
            }
        }
        assert!(!ctx.is_buffer_locked());
        let pool = ctx.org_lexemes_mut();
        std::iter::from_fn(|| pool.pop_first())
            .map(|l: Lexeme| (l.begin, l.length, l.lexeme_type))
            .collect()
    }
}
