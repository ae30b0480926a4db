use indexmap::IndexSet;

use crate::dictionary::{Stopwords, TermDictionary};
use crate::token::Token;

/// Dictionary terms that occur as noun tokens, in order of first occurrence.
pub fn extract_candidates(
    tokens: &[Token],
    dictionary: &TermDictionary,
    stopwords: &Stopwords,
) -> Vec<String> {
    let mut seen: IndexSet<&str> = IndexSet::new();
    for token in tokens {
        if token.pos.is_noun_class()
            && dictionary.contains(&token.form)
            && !stopwords.contains(&token.form)
        {
            seen.insert(token.form.as_str());
        }
    }
    seen.into_iter().map(str::to_string).collect()
}
