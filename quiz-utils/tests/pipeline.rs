use std::collections::HashMap;

use quiz_utils::{
    AnchorPhrases, BLANK_MARKER, Collaborator, Embedder, PartOfSpeech, QuizError, QuizPipeline,
    Result, SelectionPolicy, Stopwords, TermDictionary, Token, Tokenizer,
};

const PASSAGE: &str = "피타고라스 정리란 직각 삼각형의 빗변을 변으로 하는 정사각형의 넓이는 두 직각변을 각각 한 변으로 하는 정사각형 넓이의 합과 같다는 정리이다.";

/// Splits on spaces and peels the longest known noun off the front of each
/// word; whatever follows is treated as a particle.
struct LexiconTokenizer {
    nouns: Vec<&'static str>,
}

impl Tokenizer for LexiconTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut offset = 0;
        for word in text.split(' ') {
            let noun = self
                .nouns
                .iter()
                .filter(|noun| word.starts_with(**noun))
                .max_by_key(|noun| noun.len());
            match noun {
                Some(noun) => {
                    let token = Token::new(*noun, PartOfSpeech::CommonNoun, offset);
                    let rest = &word[noun.len()..];
                    let rest_start = token.end();
                    tokens.push(token);
                    if !rest.is_empty() {
                        tokens.push(Token::new(rest, PartOfSpeech::Particle, rest_start));
                    }
                }
                None if !word.is_empty() => {
                    tokens.push(Token::new(word, PartOfSpeech::Verb, offset));
                }
                None => {}
            }
            offset += word.chars().count() + 1;
        }
        Ok(tokens)
    }
}

struct TableEmbedder {
    table: HashMap<String, Vec<f32>>,
}

impl Embedder for TableEmbedder {
    async fn embed(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>> {
        sentences
            .iter()
            .map(|sentence| {
                self.table.get(sentence).cloned().ok_or_else(|| {
                    QuizError::collaborator(Collaborator::Embedder, format!("no vector for {sentence}"))
                })
            })
            .collect()
    }
}

struct Fixture {
    tokenizer: LexiconTokenizer,
    embedder: TableEmbedder,
    dictionary: TermDictionary,
    stopwords: Stopwords,
    anchors: AnchorPhrases,
}

impl Fixture {
    fn new() -> Self {
        let anchors = AnchorPhrases::default();
        let mut table = HashMap::new();
        table.insert(anchors.topic_sentence("피타고라스 정리"), vec![1.0, 0.0]);
        for (term, vector) in [
            ("피타고라스", vec![0.9, 0.1]),
            ("삼각형", vec![0.6, 0.8]),
            ("넓이", vec![0.2, 1.0]),
            ("빗변", vec![0.7, 0.7]),
        ] {
            table.insert(anchors.term_sentence(term), vector);
        }

        Self {
            tokenizer: LexiconTokenizer {
                nouns: vec![
                    "피타고라스",
                    "정리",
                    "직각",
                    "삼각형",
                    "빗변",
                    "변",
                    "정사각형",
                    "넓이",
                    "직각변",
                    "합",
                ],
            },
            embedder: TableEmbedder { table },
            dictionary: ["피타고라스", "정리", "삼각형", "넓이"].into_iter().collect(),
            stopwords: Stopwords::default(),
            anchors,
        }
    }

    fn pipeline(&self, policy: SelectionPolicy) -> QuizPipeline<'_, LexiconTokenizer, TableEmbedder> {
        QuizPipeline {
            tokenizer: &self.tokenizer,
            embedder: &self.embedder,
            dictionary: &self.dictionary,
            stopwords: &self.stopwords,
            policy,
            anchors: &self.anchors,
        }
    }
}

#[tokio::test]
async fn test_pythagoras_quiz() {
    let fixture = Fixture::new();
    let quiz = fixture
        .pipeline(SelectionPolicy::default())
        .build("피타고라스 정리", PASSAGE)
        .await
        .unwrap();

    let terms: Vec<&str> = quiz.terms.iter().map(|t| t.term.as_str()).collect();
    assert_eq!(terms, vec!["피타고라스", "삼각형", "넓이"]);
    assert!(quiz.terms.iter().all(|t| t.found));
    assert!(!terms.contains(&"정리"));

    assert_eq!(quiz.answer_key(), vec!["피타고라스", "삼각형", "넓이"]);
    assert!(quiz.quiz_text.starts_with(
        "____ 정리란 직각 ____의 빗변을 변으로 하는 정사각형의 ____는 두 직각변을"
    ));
    // Only the first occurrence of a term is blanked.
    assert!(quiz.quiz_text.contains("정사각형 넓이의 합과"));
    assert!(quiz.quiz_text.ends_with("같다는 정리이다."));
}

#[tokio::test]
async fn test_masked_length_and_spans() {
    let fixture = Fixture::new();
    let quiz = fixture
        .pipeline(SelectionPolicy::default())
        .build("피타고라스 정리", PASSAGE)
        .await
        .unwrap();

    let chars: Vec<char> = PASSAGE.chars().collect();
    for span in &quiz.spans {
        let covered: String = chars[span.start..span.end].iter().collect();
        assert_eq!(covered, span.term);
    }
    assert!(quiz.spans.windows(2).all(|w| w[0].end <= w[1].start));

    let removed: usize = quiz.spans.iter().map(|s| s.term.chars().count()).sum();
    assert_eq!(
        quiz.quiz_text.chars().count(),
        chars.len() - removed + 4 * quiz.blank_count()
    );
    assert_eq!(quiz.quiz_text.matches(BLANK_MARKER).count(), quiz.blank_count());
}

#[tokio::test]
async fn test_selection_bound() {
    let fixture = Fixture::new();
    let policy = SelectionPolicy::new(1, 2).unwrap();
    let quiz = fixture
        .pipeline(policy)
        .build("피타고라스 정리", PASSAGE)
        .await
        .unwrap();

    assert_eq!(quiz.blank_count(), 2);
    assert_eq!(quiz.answer_key(), vec!["피타고라스", "삼각형"]);
}

#[tokio::test]
async fn test_check_answers() {
    let fixture = Fixture::new();
    let quiz = fixture
        .pipeline(SelectionPolicy::default())
        .build("피타고라스 정리", PASSAGE)
        .await
        .unwrap();

    let verdicts = quiz.check(&["피타고라스", "사각형"]);
    assert_eq!(verdicts.len(), 2);
    assert!(verdicts[0].correct);
    assert!(!verdicts[1].correct);
    assert_eq!(verdicts[1].expected, "삼각형");
}

#[tokio::test]
async fn test_empty_passage_has_no_candidates() {
    let fixture = Fixture::new();
    let result = fixture
        .pipeline(SelectionPolicy::default())
        .build("피타고라스 정리", "")
        .await;
    assert!(matches!(result, Err(QuizError::NoCandidates)));
}

#[tokio::test]
async fn test_empty_dictionary_has_no_candidates() {
    let mut fixture = Fixture::new();
    fixture.dictionary = TermDictionary::default();
    let result = fixture
        .pipeline(SelectionPolicy::default())
        .build("피타고라스 정리", PASSAGE)
        .await;
    assert!(matches!(result, Err(QuizError::NoCandidates)));
}

#[tokio::test]
async fn test_embedder_failure_aborts() {
    let fixture = Fixture::new();
    // The topic sentence for this topic has no vector.
    let result = fixture
        .pipeline(SelectionPolicy::default())
        .build("삼각함수", PASSAGE)
        .await;
    assert!(matches!(
        result,
        Err(QuizError::Collaborator {
            service: Collaborator::Embedder,
            ..
        })
    ));
}

#[tokio::test]
async fn test_unusable_scores_mean_no_ranked_terms() {
    let mut fixture = Fixture::new();
    let topic = fixture.anchors.topic_sentence("피타고라스 정리");
    fixture.embedder.table.insert(topic, vec![0.0, 0.0]);
    let result = fixture
        .pipeline(SelectionPolicy::default())
        .build("피타고라스 정리", PASSAGE)
        .await;
    assert!(matches!(result, Err(QuizError::NoRankedTerms)));
}
