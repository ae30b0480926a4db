use rustc_hash::FxHashSet;
use std::path::Path;

use crate::error::{QuizError, Result};

/// The set of known domain terms. Read-only once loaded.
#[derive(Clone, Debug, Default)]
pub struct TermDictionary {
    terms: FxHashSet<String>,
}

impl TermDictionary {
    /// Loads a newline-delimited term list. Lines are trimmed and blank lines
    /// skipped. A missing file yields an empty dictionary and a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!(
                    "Term dictionary {} not found, continuing with an empty dictionary",
                    path.display()
                );
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(QuizError::Dictionary {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let dictionary = Self::parse(&content);
        log::info!(
            "Loaded {} terms from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    pub fn parse(content: &str) -> Self {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TermDictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Words never offered as blanks, even when they are dictionary terms.
#[derive(Clone, Debug)]
pub struct Stopwords {
    words: FxHashSet<String>,
}

pub const DEFAULT_STOPWORDS: &[&str] = &["수학", "정리"];

impl Stopwords {
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

impl Default for Stopwords {
    fn default() -> Self {
        DEFAULT_STOPWORDS.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Stopwords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}
