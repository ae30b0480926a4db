//! Fill-in-the-blank vocabulary quizzes.
//!
//! A passage is tokenized, its dictionary nouns are ranked by similarity to a
//! topic, and the first occurrence of each of the best terms is blanked out.
//! Tokenization and embedding are supplied by the caller through the
//! [`Tokenizer`] and [`Embedder`] traits.

pub mod dictionary;
pub mod error;
pub mod extract;
pub mod mask;
pub mod pipeline;
pub mod rank;
pub mod select;
pub mod span;
pub mod token;
pub mod verify;

pub use dictionary::{Stopwords, TermDictionary};
pub use error::{Collaborator, QuizError, Result};
pub use mask::BLANK_MARKER;
pub use pipeline::{Quiz, QuizPipeline, SelectedTerm, Tokenizer};
pub use rank::{AnchorPhrases, Embedder, RankedTerm};
pub use select::{MAX_BLANKS, MIN_BLANKS, SelectionPolicy};
pub use span::Span;
pub use token::{PartOfSpeech, Token};
pub use verify::Verdict;

use serde::{Deserialize, Serialize};

/// Topic and passage a quiz or explanation is generated from.
#[derive(Debug, Serialize, Deserialize, Clone, schemars::JsonSchema)]
pub struct QuizRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, schemars::JsonSchema)]
pub struct CheckAnswersRequest {
    pub expected: Vec<String>,
    pub answers: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, schemars::JsonSchema)]
pub struct CheckAnswersResponse {
    pub verdicts: Vec<Verdict>,
    pub correct: usize,
    pub total: usize,
}

impl CheckAnswersRequest {
    pub fn grade(&self) -> CheckAnswersResponse {
        let verdicts = verify::verify_answers(&self.expected, &self.answers);
        CheckAnswersResponse {
            correct: verify::count_correct(&verdicts),
            total: self.expected.len(),
            verdicts,
        }
    }
}

/// Structured output requested from the text generation service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ConceptExplanation {
    /// A fresh 5 to 7 line explanation of the core concept, based only on the passage.
    pub concept_explanation: String,
    /// An applied calculation or descriptive problem using the concept.
    pub application_problem: String,
    /// The answer to the application problem.
    pub answer: String,
    /// Worked solution and commentary for the problem.
    pub solution: String,
}

/// JSON envelope used by every HTTP endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, schemars::JsonSchema)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApiResponse<T> {
    Success { payload: T },
    Error { message: String },
}
