use crate::error::{QuizError, Result};
use crate::rank::RankedTerm;

pub const MIN_BLANKS: usize = 3;
pub const MAX_BLANKS: usize = 5;

/// How many of the top-ranked terms become blanks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionPolicy {
    min_blanks: usize,
    max_blanks: usize,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            min_blanks: MIN_BLANKS,
            max_blanks: MAX_BLANKS,
        }
    }
}

impl SelectionPolicy {
    pub fn new(min_blanks: usize, max_blanks: usize) -> Result<Self> {
        if min_blanks == 0 || min_blanks > max_blanks {
            return Err(QuizError::InvalidPolicy {
                min: min_blanks,
                max: max_blanks,
            });
        }
        Ok(Self {
            min_blanks,
            max_blanks,
        })
    }

    pub fn min_blanks(&self) -> usize {
        self.min_blanks
    }

    pub fn max_blanks(&self) -> usize {
        self.max_blanks
    }

    /// Number of terms to take from a ranked list of length `n`. Never more
    /// than `n`: blanks cannot be forced beyond what exists.
    pub fn blank_count(&self, n: usize) -> usize {
        self.max_blanks.min(self.min_blanks.max(n)).min(n)
    }

    pub fn select<'a>(&self, ranked: &'a [RankedTerm]) -> &'a [RankedTerm] {
        &ranked[..self.blank_count(ranked.len())]
    }
}
