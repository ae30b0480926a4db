use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::error::{Collaborator, QuizError, Result};

/// Sentence embedding service. Vector `i` of the output must belong to
/// sentence `i` of the input.
pub trait Embedder {
    fn embed(&self, sentences: &[String]) -> impl Future<Output = Result<Vec<Vec<f32>>>> + Send;
}

/// Phrases appended to the topic and to each term before embedding, so that
/// both sides are compared as concepts of the same domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnchorPhrases {
    pub topic_suffix: String,
    pub term_suffix: String,
}

impl Default for AnchorPhrases {
    fn default() -> Self {
        Self {
            topic_suffix: "와 관련된 수학 개념".to_string(),
            term_suffix: "라는 수학 용어".to_string(),
        }
    }
}

impl AnchorPhrases {
    pub fn topic_sentence(&self, topic: &str) -> String {
        let mut sentence: String = topic.chars().filter(|c| !c.is_whitespace()).collect();
        sentence.push_str(&self.topic_suffix);
        sentence
    }

    pub fn term_sentence(&self, term: &str) -> String {
        format!("{term}{}", self.term_suffix)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, schemars::JsonSchema)]
pub struct RankedTerm {
    pub term: String,
    pub score: f32,
}

/// Cosine similarity, or `None` when either vector has zero norm or the
/// dimensions differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }
    let similarity = dot / (norm_a * norm_b);
    similarity.is_finite().then_some(similarity)
}

/// Scores every candidate against the topic and sorts by descending score.
/// Equal scores keep candidate order.
pub async fn rank_terms<E: Embedder>(
    embedder: &E,
    anchors: &AnchorPhrases,
    topic: &str,
    candidates: &[String],
) -> Result<Vec<RankedTerm>> {
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let mut sentences = Vec::with_capacity(candidates.len() + 1);
    sentences.push(anchors.topic_sentence(topic));
    sentences.extend(candidates.iter().map(|term| anchors.term_sentence(term)));

    let vectors = embedder.embed(&sentences).await?;
    if vectors.len() != sentences.len() {
        return Err(QuizError::collaborator(
            Collaborator::Embedder,
            format!(
                "expected {} vectors, received {}",
                sentences.len(),
                vectors.len()
            ),
        ));
    }

    let (topic_vector, term_vectors) = vectors.split_first().ok_or(QuizError::NoRankedTerms)?;

    let mut ranked: Vec<RankedTerm> = candidates
        .iter()
        .zip(term_vectors)
        .filter_map(|(term, vector)| match cosine_similarity(topic_vector, vector) {
            Some(score) => Some(RankedTerm {
                term: term.clone(),
                score,
            }),
            None => {
                log::warn!("No usable similarity for term {term}, dropping it");
                None
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(ranked)
}
