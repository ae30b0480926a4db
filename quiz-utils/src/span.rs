use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::token::Token;

/// Half-open `char` range of a term's first occurrence.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, schemars::JsonSchema)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub term: String,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Where the selected terms were found, in text order, and which were not.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpanLayout {
    pub spans: Vec<Span>,
    pub missing: Vec<String>,
}

impl SpanLayout {
    /// Masked terms in the order their blanks appear.
    pub fn answer_key(&self) -> Vec<&str> {
        self.spans.iter().map(|span| span.term.as_str()).collect()
    }

    pub fn is_found(&self, term: &str) -> bool {
        self.spans.iter().any(|span| span.term == term)
    }
}

/// Finds the first token matching each selected term. Matching is on whole
/// tokens, so a term is never located inside a longer word.
pub fn locate_spans<S: AsRef<str>>(tokens: &[Token], selected: &[S]) -> SpanLayout {
    let mut pending: FxHashSet<&str> = selected.iter().map(AsRef::as_ref).collect();
    let mut spans = Vec::with_capacity(pending.len());

    for token in tokens {
        if pending.is_empty() {
            break;
        }
        if pending.remove(token.form.as_str()) {
            spans.push(Span {
                start: token.start,
                end: token.end(),
                term: token.form.clone(),
            });
        }
    }

    spans.sort_by_key(|span| span.start);

    let missing = selected
        .iter()
        .map(AsRef::as_ref)
        .filter(|term| pending.contains(term))
        .map(str::to_string)
        .collect();

    SpanLayout { spans, missing }
}
