use std::cmp::Ordering;

use crate::lexeme::set::LexemeSet;
use crate::lexeme::Lexeme;

/// Chain of lexemes covering `path_begin..path_end`.
#[derive(Clone, Default, Debug)]
pub(crate) struct LexemePath {
    set: LexemeSet,
    path_begin: usize,
    path_end: usize,
    payload_length: usize,
}

impl LexemePath {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub(crate) const fn path_begin(&self) -> usize {
        self.path_begin
    }

    #[inline(always)]
    pub(crate) const fn path_end(&self) -> usize {
        self.path_end
    }

    /// Number of characters covered by the lexemes.
    #[inline(always)]
    pub(crate) const fn payload_length(&self) -> usize {
        self.payload_length
    }

    #[inline(always)]
    pub(crate) const fn path_length(&self) -> usize {
        self.path_end - self.path_begin
    }

    #[inline(always)]
    pub(crate) const fn len(&self) -> usize {
        self.set.len()
    }

    #[inline(always)]
    pub(crate) const fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    #[inline(always)]
    pub(crate) const fn lexemes(&self) -> &LexemeSet {
        &self.set
    }

    /// Checks if the lexeme overlaps the range of the path.
    #[inline(always)]
    pub(crate) fn check_cross(&self, lexeme: &Lexeme) -> bool {
        if self.set.is_empty() {
            return false;
        }
        (self.path_begin <= lexeme.begin && lexeme.begin < self.path_end)
            || (lexeme.begin <= self.path_begin && self.path_begin < lexeme.end())
    }

    fn start(&mut self, lexeme: Lexeme) {
        self.path_begin = lexeme.begin;
        self.path_end = lexeme.end();
        self.payload_length = lexeme.length;
        self.set.insert(lexeme);
    }

    /// Appends a lexeme overlapping the path.
    ///
    /// Returns the lexeme back if it does not overlap.
    pub(crate) fn add_cross_lexeme(&mut self, lexeme: Lexeme) -> Result<(), Lexeme> {
        if self.set.is_empty() {
            self.start(lexeme);
            return Ok(());
        }
        if !self.check_cross(&lexeme) {
            return Err(lexeme);
        }
        self.path_end = self.path_end.max(lexeme.end());
        self.payload_length = self.path_length();
        self.set.insert(lexeme);
        Ok(())
    }

    /// Adds a lexeme not overlapping the path.
    ///
    /// Returns `false` if it overlaps.
    pub(crate) fn add_not_cross_lexeme(&mut self, lexeme: &Lexeme) -> bool {
        if self.set.is_empty() {
            self.start(lexeme.clone());
            return true;
        }
        if self.check_cross(lexeme) {
            return false;
        }
        self.payload_length += lexeme.length;
        self.set.insert(lexeme.clone());
        if let (Some(head), Some(tail)) = (self.set.first(), self.set.last()) {
            self.path_begin = head.begin;
            self.path_end = tail.end();
        }
        true
    }

    /// Removes the last lexeme.
    pub(crate) fn remove_tail(&mut self) -> Option<Lexeme> {
        let lexeme = self.set.pop_last()?;
        if let Some(tail) = self.set.last() {
            self.payload_length -= lexeme.length;
            self.path_end = tail.end();
        } else {
            self.path_begin = 0;
            self.path_end = 0;
            self.payload_length = 0;
        }
        Some(lexeme)
    }

    pub(crate) fn pop_first(&mut self) -> Option<Lexeme> {
        self.set.pop_first()
    }

    /// Product of the lexeme lengths, wrapping around on overflow.
    pub(crate) fn x_weight(&self) -> usize {
        self.set
            .iter()
            .fold(1usize, |acc, l| acc.wrapping_mul(l.length))
    }

    /// Sum of the lexeme lengths weighted by their 1-origin positions,
    /// wrapping around on overflow.
    pub(crate) fn p_weight(&self) -> usize {
        self.set
            .iter()
            .enumerate()
            .fold(0usize, |acc, (i, l)| {
                acc.wrapping_add((i + 1).wrapping_mul(l.length))
            })
    }

    /// Compares two candidate paths, where [`Ordering::Less`] means `self` is preferred.
    pub(crate) fn compare(&self, other: &Self) -> Ordering {
        other
            .payload_length
            .cmp(&self.payload_length)
            .then_with(|| self.len().cmp(&other.len()))
            .then_with(|| self.path_length().cmp(&other.path_length()))
            .then_with(|| other.path_end.cmp(&self.path_end))
            .then_with(|| other.x_weight().cmp(&self.x_weight()))
            .then_with(|| other.p_weight().cmp(&self.p_weight()))
    }
}
