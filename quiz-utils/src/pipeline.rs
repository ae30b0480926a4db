use serde::{Deserialize, Serialize};

use crate::dictionary::{Stopwords, TermDictionary};
use crate::error::{QuizError, Result};
use crate::extract::extract_candidates;
use crate::mask::mask_spans;
use crate::rank::{AnchorPhrases, Embedder, RankedTerm, rank_terms};
use crate::select::SelectionPolicy;
use crate::span::{Span, locate_spans};
use crate::token::Token;
use crate::verify::{Verdict, verify_answers};

/// Morphological analyzer.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>>;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        (**self).tokenize(text)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, schemars::JsonSchema)]
pub struct SelectedTerm {
    pub term: String,
    pub score: f32,
    /// False when the term was selected but has no token in the passage.
    pub found: bool,
}

/// One generated fill-in-the-blank quiz.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, schemars::JsonSchema)]
pub struct Quiz {
    pub terms: Vec<SelectedTerm>,
    pub spans: Vec<Span>,
    pub quiz_text: String,
}

impl Quiz {
    /// Expected answers, in the order the blanks appear.
    pub fn answer_key(&self) -> Vec<&str> {
        self.spans.iter().map(|span| span.term.as_str()).collect()
    }

    pub fn blank_count(&self) -> usize {
        self.spans.len()
    }

    pub fn check<A: AsRef<str>>(&self, answers: &[A]) -> Vec<Verdict> {
        verify_answers(&self.answer_key(), answers)
    }
}

/// Borrowed handles to everything a quiz run needs. Cheap to build per
/// request; holds no state of its own.
pub struct QuizPipeline<'a, T, E> {
    pub tokenizer: &'a T,
    pub embedder: &'a E,
    pub dictionary: &'a TermDictionary,
    pub stopwords: &'a Stopwords,
    pub policy: SelectionPolicy,
    pub anchors: &'a AnchorPhrases,
}

impl<T: Tokenizer, E: Embedder> QuizPipeline<'_, T, E> {
    pub async fn build(&self, topic: &str, text: &str) -> Result<Quiz> {
        let tokens = self.tokenizer.tokenize(text)?;
        log::debug!("Tokenized passage into {} tokens", tokens.len());

        let candidates = extract_candidates(&tokens, self.dictionary, self.stopwords);
        if candidates.is_empty() {
            return Err(QuizError::NoCandidates);
        }
        log::debug!("Candidate terms: {candidates:?}");

        let ranked = rank_terms(self.embedder, self.anchors, topic, &candidates).await?;
        if ranked.is_empty() {
            return Err(QuizError::NoRankedTerms);
        }

        let selected: &[RankedTerm] = self.policy.select(&ranked);
        let layout = locate_spans(
            &tokens,
            &selected.iter().map(|r| r.term.as_str()).collect::<Vec<_>>(),
        );
        if layout.spans.is_empty() {
            return Err(QuizError::NoSpansFound);
        }
        if !layout.missing.is_empty() {
            log::warn!("Selected terms not found in passage: {:?}", layout.missing);
        }

        let quiz_text = mask_spans(text, &layout.spans)?;
        let terms = selected
            .iter()
            .map(|r| SelectedTerm {
                term: r.term.clone(),
                score: r.score,
                found: layout.is_found(&r.term),
            })
            .collect();

        log::info!(
            "Built quiz with {} blanks from {} candidates",
            layout.spans.len(),
            candidates.len()
        );
        Ok(Quiz {
            terms,
            spans: layout.spans,
            quiz_text,
        })
    }
}
