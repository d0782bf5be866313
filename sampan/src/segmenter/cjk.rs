use crate::character::CharType;
use crate::dictionary::{Dictionary, Hit, LexiconKind, Trie};
use crate::lexeme::{Lexeme, LexemeType};
use crate::tokenizer::context::AnalyzeContext;

const NAME: &str = "CJK_SEGMENTER";

/// Segmenter of words in the main lexicon.
pub(crate) struct CjkSegmenter<'a> {
    lexicon: &'a Trie,
    hits: Vec<Hit<'a>>,
}

impl<'a> CjkSegmenter<'a> {
    pub(crate) fn new(dict: &'a Dictionary) -> Self {
        Self {
            lexicon: dict.lexicon(LexiconKind::Main),
            hits: vec![],
        }
    }

    pub(crate) fn analyze(&mut self, ctx: &mut AnalyzeContext) {
        if ctx.current_char_type() == CharType::Insignificant {
            self.hits.clear();
        } else {
            let cursor = ctx.cursor();
            let offset = ctx.buff_offset();
            let lexicon = self.lexicon;

            self.hits.retain_mut(|hit| {
                *hit = lexicon.continue_match(*hit, ctx.segment_buff(), cursor);
                if hit.is_match() {
                    let length = cursor - hit.beg() + 1;
                    ctx.add_lexeme(Lexeme::new(offset, hit.beg(), length, LexemeType::ChineseWord));
                }
                hit.is_prefix()
            });

            let hit = lexicon.match_at(ctx.segment_buff(), cursor, 1);
            if hit.is_match() {
                ctx.add_lexeme(Lexeme::new(offset, cursor, 1, LexemeType::ChineseWord));
            }
            if hit.is_prefix() {
                self.hits.push(hit);
            }
        }

        if ctx.is_buffer_consumed() {
            self.hits.clear();
        }

        if self.hits.is_empty() {
            ctx.unlock_buffer(NAME);
        } else {
            ctx.lock_buffer(NAME);
        }
    }

    pub(crate) fn reset(&mut self) {
        self.hits.clear();
    }
}
