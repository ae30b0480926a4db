pub mod config;
pub mod embeddings;
pub mod explanation;
pub mod korean_tokenizer;

use anyhow::Context;
use quiz_utils::{
    AnchorPhrases, Embedder, QuizPipeline, SelectionPolicy, Stopwords, TermDictionary, Tokenizer,
};

pub use config::QuizConfig;
pub use embeddings::OpenAiEmbedder;
pub use explanation::ExplanationGenerator;
pub use korean_tokenizer::KoreanTokenizer;

/// Long-lived collaborator handles and read-only quiz data, built once at
/// start-up and shared by every quiz run.
pub struct Services<T = KoreanTokenizer, E = OpenAiEmbedder> {
    pub tokenizer: T,
    pub embedder: E,
    pub dictionary: TermDictionary,
    pub stopwords: Stopwords,
    pub policy: SelectionPolicy,
    pub anchors: AnchorPhrases,
}

impl<T: Tokenizer, E: Embedder> Services<T, E> {
    pub fn new(tokenizer: T, embedder: E, dictionary: TermDictionary) -> Self {
        Self {
            tokenizer,
            embedder,
            dictionary,
            stopwords: Stopwords::default(),
            policy: SelectionPolicy::default(),
            anchors: AnchorPhrases::default(),
        }
    }

    pub fn pipeline(&self) -> QuizPipeline<'_, T, E> {
        QuizPipeline {
            tokenizer: &self.tokenizer,
            embedder: &self.embedder,
            dictionary: &self.dictionary,
            stopwords: &self.stopwords,
            policy: self.policy,
            anchors: &self.anchors,
        }
    }
}

impl Services {
    pub fn from_config(config: &QuizConfig) -> anyhow::Result<Self> {
        let dictionary = TermDictionary::load(&config.dictionary_path)?;

        let ko_dic = config
            .ko_dic_path
            .as_deref()
            .context("KO_DIC_PATH must point to a compiled ko-dic dictionary")?;
        let tokenizer = KoreanTokenizer::new(ko_dic)?;

        let api_key = config
            .openai_api_key
            .clone()
            .context("OPENAI_API_KEY is required for term ranking")?;
        let embedder = OpenAiEmbedder::new(
            &config.openai_base_url,
            api_key,
            config.embedding_model.clone(),
        )?;

        Ok(Self {
            tokenizer,
            embedder,
            dictionary,
            stopwords: config.stopword_set(),
            policy: config.selection_policy()?,
            anchors: AnchorPhrases::default(),
        })
    }
}
