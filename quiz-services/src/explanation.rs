use quiz_utils::{Collaborator, ConceptExplanation, QuizError, Result};
use tysm::chat_completions::ChatClient;

use crate::config::QuizConfig;

const SYSTEM_PROMPT: &str = r#"You are a mathematics tutor. The user gives you a topic and a passage about it. Using only the concepts that appear in the passage, produce:

1. concept_explanation: a new, concise explanation of the core concept in 5 to 7 lines. Do not copy the passage; rephrase it.
2. application_problem: one problem that applies the concept, either a calculation or a short descriptive question.
3. answer: the answer to that problem, as short as possible.
4. solution: the worked solution, step by step.

Never introduce concepts, theorems or facts that are not in the passage. Write in the same language as the passage. Respond with JSON."#;

/// Replies memoized by the chat client before it is emptied. Passages are
/// user input, so the memo would otherwise grow with every request.
const MAX_MEMOIZED_REPLIES: usize = 256;

/// Generates a concept explanation and an application problem through an
/// OpenAI-compatible chat completions endpoint with a strict JSON schema.
pub struct ExplanationGenerator {
    client: ChatClient,
}

impl ExplanationGenerator {
    pub fn new(base_url: &str, api_key: String, model: String) -> Result<Self> {
        url::Url::parse(base_url).map_err(|e| {
            QuizError::collaborator(Collaborator::Generator, format!("bad base url {base_url}: {e}"))
        })?;
        Ok(Self {
            client: ChatClient::new(api_key, model).with_url(base_url),
        })
    }

    /// `None` when no API key is configured.
    pub fn from_config(config: &QuizConfig) -> Result<Option<Self>> {
        let Some(api_key) = config.openai_api_key.clone() else {
            return Ok(None);
        };
        Self::new(&config.openai_base_url, api_key, config.chat_model.clone()).map(Some)
    }

    pub async fn generate(&self, topic: &str, text: &str) -> Result<ConceptExplanation> {
        if self.client.lru.len() >= MAX_MEMOIZED_REPLIES {
            self.client.lru.clear();
        }
        self.client
            .chat_with_system_prompt(SYSTEM_PROMPT, user_prompt(topic, text))
            .await
            .map_err(|e| QuizError::collaborator(Collaborator::Generator, e))
    }
}

fn user_prompt(topic: &str, text: &str) -> String {
    format!("[Topic]: {topic}\n[Passage]: {text}")
}
