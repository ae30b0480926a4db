use std::path::PathBuf;

/// External subsystems the quiz pipeline depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collaborator {
    Tokenizer,
    Embedder,
    Generator,
}

impl std::fmt::Display for Collaborator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Collaborator::Tokenizer => "tokenizer",
            Collaborator::Embedder => "embedding service",
            Collaborator::Generator => "text generation service",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("no dictionary term appears as a noun in the passage")]
    NoCandidates,
    #[error("no candidate term could be ranked against the topic")]
    NoRankedTerms,
    #[error("the selected terms do not occur in the passage")]
    NoSpansFound,
    #[error("failed to read term dictionary {path}: {source}")]
    Dictionary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid blank bounds: min {min}, max {max}")]
    InvalidPolicy { min: usize, max: usize },
    #[error("span {start}..{end} lies outside a text of {len} characters")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },
    #[error("{service} failed: {message}")]
    Collaborator {
        service: Collaborator,
        message: String,
    },
}

impl QuizError {
    pub fn collaborator(service: Collaborator, message: impl std::fmt::Display) -> Self {
        QuizError::Collaborator {
            service,
            message: message.to_string(),
        }
    }

    /// Conditions where the pipeline ran fine but the passage yields no quiz.
    pub fn is_no_quiz(&self) -> bool {
        matches!(
            self,
            QuizError::NoCandidates | QuizError::NoRankedTerms | QuizError::NoSpansFound
        )
    }
}

pub type Result<T, E = QuizError> = std::result::Result<T, E>;
