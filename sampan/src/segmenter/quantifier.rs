use crate::character::CharType;
use crate::dictionary::{Dictionary, Hit, LexiconKind, Trie};
use crate::lexeme::{Lexeme, LexemeType};
use crate::tokenizer::context::AnalyzeContext;

const NAME: &str = "QUAN_SEGMENTER";

/// Characters forming Chinese numerals.
pub(crate) const CHINESE_NUMERALS: &str =
    "一二两三四五六七八九十零壹贰叁肆伍陆柒捌玖拾百千万亿佰仟萬億兆卅廿";

#[inline(always)]
fn is_chinese_numeral(c: char) -> bool {
    CHINESE_NUMERALS.contains(c)
}

/// Segmenter of Chinese numerals and the classifiers following numbers.
pub(crate) struct QuantifierSegmenter<'a> {
    lexicon: &'a Trie,
    // start..=end of the numeral run being tracked
    numeral: Option<(usize, usize)>,
    hits: Vec<Hit<'a>>,
}

impl<'a> QuantifierSegmenter<'a> {
    pub(crate) fn new(dict: &'a Dictionary) -> Self {
        Self {
            lexicon: dict.lexicon(LexiconKind::Main),
            numeral: None,
            hits: vec![],
        }
    }

    fn output_numeral(&mut self, ctx: &mut AnalyzeContext) {
        if let Some((start, end)) = self.numeral.take() {
            if let Some(lexeme) =
                Lexeme::spanning(ctx.buff_offset(), start, end, LexemeType::ChineseNumeral)
            {
                ctx.add_lexeme(lexeme);
            }
        }
    }

    fn process_numeral(&mut self, ctx: &mut AnalyzeContext) {
        let cursor = ctx.cursor();
        if ctx.current_char_type() == CharType::Han && is_chinese_numeral(ctx.current_char()) {
            match &mut self.numeral {
                Some((_, end)) => *end = cursor,
                None => self.numeral = Some((cursor, cursor)),
            }
        } else {
            self.output_numeral(ctx);
        }
        if ctx.is_buffer_consumed() {
            self.output_numeral(ctx);
        }
    }

    /// Checks if a classifier can start or continue at the cursor.
    ///
    /// Without a numeral run or a pending hit, the last lexeme of the pool
    /// must be a number ending just before the cursor.
    fn need_count_scan(&self, ctx: &AnalyzeContext) -> bool {
        if self.numeral.is_some() || !self.hits.is_empty() {
            return true;
        }
        ctx.last_pooled().is_some_and(|l| {
            matches!(
                l.lexeme_type,
                LexemeType::ChineseNumeral | LexemeType::Digit
            ) && l.end() == ctx.cursor()
        })
    }

    fn process_count(&mut self, ctx: &mut AnalyzeContext) {
        if !self.need_count_scan(ctx) {
            return;
        }
        if ctx.current_char_type() == CharType::Han {
            let cursor = ctx.cursor();
            let offset = ctx.buff_offset();
            let lexicon = self.lexicon;

            self.hits.retain_mut(|hit| {
                *hit = lexicon.continue_match(*hit, ctx.segment_buff(), cursor);
                if hit.is_match() {
                    let length = cursor - hit.beg() + 1;
                    ctx.add_lexeme(Lexeme::new(offset, hit.beg(), length, LexemeType::Classifier));
                }
                hit.is_prefix()
            });

            let hit = lexicon.match_at(ctx.segment_buff(), cursor, 1);
            if hit.is_match() {
                ctx.add_lexeme(Lexeme::new(offset, cursor, 1, LexemeType::Classifier));
            }
            if hit.is_prefix() {
                self.hits.push(hit);
            }
        } else {
            self.hits.clear();
        }
        if ctx.is_buffer_consumed() {
            self.hits.clear();
        }
    }

    pub(crate) fn analyze(&mut self, ctx: &mut AnalyzeContext) {
        self.process_numeral(ctx);
        self.process_count(ctx);

        if self.numeral.is_none() && self.hits.is_empty() {
            ctx.unlock_buffer(NAME);
        } else {
            ctx.lock_buffer(NAME);
        }
    }

    pub(crate) fn reset(&mut self) {
        self.numeral = None;
        self.hits.clear();
    }
}
