use dashmap::DashMap;
use quiz_utils::{Collaborator, Embedder, QuizError, Result};
use tysm::embeddings::EmbeddingsClient;
use xxhash_rust::xxh3::xxh3_64;

/// Most vectors kept in memory. Term sentences come from the finite
/// dictionary, but topic sentences are user input.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Sentence embeddings from an OpenAI-compatible `/embeddings` endpoint.
/// Vectors are memoized per model and sentence, since the same anchored term
/// sentences come up again and again.
pub struct OpenAiEmbedder {
    client: EmbeddingsClient,
    cache: DashMap<u64, Vec<f32>>, // hash -> vector
    capacity: usize,
}

impl OpenAiEmbedder {
    pub fn new(base_url: &str, api_key: String, model: String) -> Result<Self> {
        url::Url::parse(base_url).map_err(|e| {
            QuizError::collaborator(Collaborator::Embedder, format!("bad base url {base_url}: {e}"))
        })?;
        Ok(Self {
            client: EmbeddingsClient::new(api_key, model).with_url(base_url),
            cache: DashMap::new(),
            capacity: DEFAULT_CACHE_CAPACITY,
        })
    }

    pub fn with_cache_capacity(self, capacity: usize) -> Self {
        Self { capacity, ..self }
    }

    fn cache_key(&self, sentence: &str) -> u64 {
        xxh3_64(format!("{}::{sentence}", self.client.model).as_bytes())
    }

    /// Stores a vector, evicting an arbitrary entry once the cache is full.
    fn remember(&self, key: u64, vector: Vec<f32>) {
        if self.capacity == 0 {
            return;
        }
        while self.cache.len() >= self.capacity && !self.cache.contains_key(&key) {
            let Some(victim) = self.cache.iter().next().map(|entry| *entry.key()) else {
                break;
            };
            self.cache.remove(&victim);
        }
        self.cache.insert(key, vector);
    }
}

impl Embedder for OpenAiEmbedder {
    async fn embed(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors: Vec<Option<Vec<f32>>> = sentences
            .iter()
            .map(|s| self.cache.get(&self.cache_key(s)).map(|v| v.value().clone()))
            .collect();

        let mut uncached: Vec<String> = Vec::new();
        for (sentence, vector) in sentences.iter().zip(&vectors) {
            if vector.is_none() && !uncached.contains(sentence) {
                uncached.push(sentence.clone());
            }
        }

        if !uncached.is_empty() {
            log::debug!("Requesting {} embeddings", uncached.len());
            let fetched = self
                .client
                .embed(&uncached)
                .await
                .map_err(|e| QuizError::collaborator(Collaborator::Embedder, e))?;
            for (sentence, vector) in fetched {
                for (slot, _) in vectors
                    .iter_mut()
                    .zip(sentences)
                    .filter(|(slot, s)| slot.is_none() && *s == sentence)
                {
                    *slot = Some(vector.elements.clone());
                }
                self.remember(self.cache_key(sentence), vector.elements);
            }
        }
        log::debug!(
            "Embedded {} sentences ({} from cache)",
            sentences.len(),
            sentences.len() - uncached.len()
        );

        vectors
            .into_iter()
            .enumerate()
            .map(|(i, vector)| {
                vector.ok_or_else(|| {
                    QuizError::collaborator(Collaborator::Embedder, format!("no embedding for input {i}"))
                })
            })
            .collect()
    }
}
