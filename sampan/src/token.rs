//! Container of resultant tokens.
use std::ops::Range;

use crate::lexeme::{Lexeme, LexemeType};

/// Resultant token.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Token {
    range_char: Range<usize>,
    lexeme_type: LexemeType,
    surface: String,
}

impl Token {
    #[inline(always)]
    pub(crate) fn new(lexeme: Lexeme) -> Self {
        Self {
            range_char: lexeme.begin_position()..lexeme.end_position(),
            lexeme_type: lexeme.lexeme_type,
            surface: lexeme.text,
        }
    }

    /// Gets the position range of the token in characters of the whole input.
    #[inline(always)]
    pub fn range_char(&self) -> Range<usize> {
        self.range_char.clone()
    }

    /// Gets the number of characters of the token.
    #[inline(always)]
    pub fn len_char(&self) -> usize {
        self.range_char.len()
    }

    /// Gets the type of the token.
    #[inline(always)]
    pub const fn lexeme_type(&self) -> LexemeType {
        self.lexeme_type
    }

    /// Gets the surface string of the token.
    #[inline(always)]
    pub fn surface(&self) -> &str {
        &self.surface
    }
}
