use anyhow::Context;
use quiz_utils::{MAX_BLANKS, MIN_BLANKS, SelectionPolicy, Stopwords, dictionary::DEFAULT_STOPWORDS};
use std::path::PathBuf;

pub const DEFAULT_DICTIONARY_PATH: &str = "math_terms.txt";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1/";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Settings shared by the CLI and the HTTP service, read from the environment.
#[derive(Clone, Debug)]
pub struct QuizConfig {
    pub dictionary_path: PathBuf,
    /// Path or URI of a compiled ko-dic dictionary for lindera.
    pub ko_dic_path: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub min_blanks: usize,
    pub max_blanks: usize,
    pub stopwords: Vec<String>,
    /// Address the HTTP service listens on.
    pub bind_address: String,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            dictionary_path: PathBuf::from(DEFAULT_DICTIONARY_PATH),
            ko_dic_path: None,
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            min_blanks: MIN_BLANKS,
            max_blanks: MAX_BLANKS,
            stopwords: DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

impl QuizConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let parse_count = |key: &str, default: usize| -> anyhow::Result<usize> {
            match var(key) {
                Some(value) => value
                    .trim()
                    .parse()
                    .with_context(|| format!("{key} must be a positive integer, got {value:?}")),
                None => Ok(default),
            }
        };

        let openai_base_url = var("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url);
        url::Url::parse(&openai_base_url)
            .with_context(|| format!("OPENAI_BASE_URL is not a valid URL: {openai_base_url:?}"))?;

        Ok(Self {
            dictionary_path: var("TERM_DICTIONARY_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.dictionary_path),
            ko_dic_path: var("KO_DIC_PATH"),
            openai_api_key: var("OPENAI_API_KEY"),
            openai_base_url,
            embedding_model: var("EMBEDDING_MODEL").unwrap_or(defaults.embedding_model),
            chat_model: var("CHAT_MODEL").unwrap_or(defaults.chat_model),
            min_blanks: parse_count("MIN_BLANKS", defaults.min_blanks)?,
            max_blanks: parse_count("MAX_BLANKS", defaults.max_blanks)?,
            stopwords: var("QUIZ_STOPWORDS")
                .map(|value| {
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|word| !word.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or(defaults.stopwords),
            bind_address: var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
        })
    }

    pub fn selection_policy(&self) -> anyhow::Result<SelectionPolicy> {
        Ok(SelectionPolicy::new(self.min_blanks, self.max_blanks)?)
    }

    pub fn stopword_set(&self) -> Stopwords {
        self.stopwords.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = QuizConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.dictionary_path, PathBuf::from("math_terms.txt"));
        assert_eq!(config.min_blanks, 3);
        assert_eq!(config.max_blanks, 5);
        assert!(config.openai_api_key.is_none());
        assert!(config.stopword_set().contains("정리"));
        assert_eq!(config.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_bind_address() {
        let config = QuizConfig::from_lookup(lookup(&[("BIND_ADDRESS", "127.0.0.1:3000")])).unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:3000");

        let config = QuizConfig::from_lookup(lookup(&[("BIND_ADDRESS", "  ")])).unwrap();
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(QuizConfig::from_lookup(lookup(&[("OPENAI_BASE_URL", "not a url")])).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = QuizConfig::from_lookup(lookup(&[
            ("TERM_DICTIONARY_PATH", "/data/terms.txt"),
            ("KO_DIC_PATH", "/data/ko-dic"),
            ("MIN_BLANKS", "2"),
            ("MAX_BLANKS", " 4 "),
            ("QUIZ_STOPWORDS", "수학, 개념,,"),
            ("OPENAI_API_KEY", ""),
        ]))
        .unwrap();
        assert_eq!(config.dictionary_path, PathBuf::from("/data/terms.txt"));
        assert_eq!(config.ko_dic_path.as_deref(), Some("/data/ko-dic"));
        assert_eq!(config.selection_policy().unwrap().max_blanks(), 4);
        assert_eq!(config.stopwords, vec!["수학", "개념"]);
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn test_invalid_counts() {
        assert!(QuizConfig::from_lookup(lookup(&[("MIN_BLANKS", "three")])).is_err());

        let config =
            QuizConfig::from_lookup(lookup(&[("MIN_BLANKS", "6"), ("MAX_BLANKS", "5")])).unwrap();
        assert!(config.selection_policy().is_err());
    }
}
