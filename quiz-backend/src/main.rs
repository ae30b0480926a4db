use anyhow::Context;
use axum::{
    Router,
    extract::{Json, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use quiz_services::{ExplanationGenerator, KoreanTokenizer, OpenAiEmbedder, QuizConfig, Services};
use quiz_utils::{
    ApiResponse, CheckAnswersRequest, CheckAnswersResponse, ConceptExplanation, Embedder, Quiz,
    QuizError, QuizRequest, SelectedTerm, Tokenizer,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};

struct AppState<T = KoreanTokenizer, E = OpenAiEmbedder> {
    /// `None` when the tokenizer or embedding service is not configured.
    services: Option<Services<T, E>>,
    generator: Option<ExplanationGenerator>,
}

type Reply<T> = (StatusCode, Json<ApiResponse<T>>);

fn success<T>(payload: T) -> Reply<T> {
    (StatusCode::OK, Json(ApiResponse::Success { payload }))
}

fn failure<T>(status: StatusCode, message: &str) -> Reply<T> {
    (
        status,
        Json(ApiResponse::Error {
            message: message.to_string(),
        }),
    )
}

fn rejected<T>(rejection: JsonRejection) -> Reply<T> {
    log::warn!("Rejected request body: {rejection}");
    failure(
        StatusCode::BAD_REQUEST,
        &format!("Invalid request body: {}", rejection.body_text()),
    )
}

#[derive(Debug, Serialize, Deserialize, Clone, schemars::JsonSchema)]
struct VocabQuizPayload {
    quiz_text: String,
    terms: Vec<SelectedTerm>,
    answer_key: Vec<String>,
}

impl From<Quiz> for VocabQuizPayload {
    fn from(quiz: Quiz) -> Self {
        Self {
            answer_key: quiz.answer_key().into_iter().map(str::to_string).collect(),
            quiz_text: quiz.quiz_text,
            terms: quiz.terms,
        }
    }
}

async fn generate_quiz<T, E>(
    State(state): State<Arc<AppState<T, E>>>,
    request: Result<Json<QuizRequest>, JsonRejection>,
) -> Reply<ConceptExplanation> {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return rejected(rejection),
    };
    let Some(generator) = &state.generator else {
        return failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "The server has no API key configured, so content cannot be generated.",
        );
    };

    if request.topic.trim().is_empty() || request.text.trim().is_empty() {
        return failure(
            StatusCode::BAD_REQUEST,
            "Please provide both a topic and a passage.",
        );
    }

    match generator.generate(&request.topic, &request.text).await {
        Ok(explanation) => success(explanation),
        Err(e) => {
            log::error!("Explanation generation failed: {e}");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Content generation failed on the server. Check the API key and model.",
            )
        }
    }
}

async fn vocab_quiz<T, E>(
    State(state): State<Arc<AppState<T, E>>>,
    request: Result<Json<QuizRequest>, JsonRejection>,
) -> Reply<VocabQuizPayload>
where
    T: Tokenizer + Send + Sync,
    E: Embedder + Send + Sync,
{
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return rejected(rejection),
    };
    let Some(services) = &state.services else {
        return failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "The server is not configured to build vocabulary quizzes.",
        );
    };

    let request_id = uuid::Uuid::new_v4();
    log::info!(
        "[{request_id}] Building quiz for topic {:?} ({} characters of text)",
        request.topic,
        request.text.chars().count()
    );

    match services
        .pipeline()
        .build(&request.topic, &request.text)
        .await
    {
        Ok(quiz) => {
            log::info!("[{request_id}] Quiz ready with {} blanks", quiz.blank_count());
            success(quiz.into())
        }
        Err(QuizError::NoCandidates | QuizError::NoRankedTerms) => failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            "No terms related to the topic were found in the passage.",
        ),
        Err(QuizError::NoSpansFound) => failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            "The selected terms do not actually appear in the passage.",
        ),
        Err(e) => {
            log::error!("[{request_id}] Quiz generation failed: {e}");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Quiz generation failed on the server.",
            )
        }
    }
}

async fn check_answers(
    request: Result<Json<CheckAnswersRequest>, JsonRejection>,
) -> Reply<CheckAnswersResponse> {
    match request {
        Ok(Json(request)) => success(request.grade()),
        Err(rejection) => rejected(rejection),
    }
}

fn router<T, E>(state: Arc<AppState<T, E>>) -> Router
where
    T: Tokenizer + Send + Sync + 'static,
    E: Embedder + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    Router::new()
        .route("/", get(|| async { "Hello from the quiz backend!" }))
        .route("/generate_quiz", post(generate_quiz::<T, E>))
        .route("/vocab_quiz", post(vocab_quiz::<T, E>))
        .route("/check_answers", post(check_answers))
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Start-up warnings such as a missing term dictionary show without `RUST_LOG`.
const DEFAULT_LOG_FILTER: &str = "info";

fn logger_builder() -> env_logger::Builder {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logger_builder().init();

    let config = QuizConfig::from_env()?;

    let services = match Services::from_config(&config) {
        Ok(services) => Some(services),
        Err(e) => {
            log::warn!("Vocabulary quizzes are disabled: {e:#}");
            None
        }
    };
    let generator = ExplanationGenerator::from_config(&config)
        .context("Failed to set up the explanation generator")?;
    if generator.is_none() {
        log::warn!("OPENAI_API_KEY is not set. The server will run, but content generation will fail.");
    }

    let app = router(Arc::new(AppState {
        services,
        generator,
    }));

    let address = &config.bind_address;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    log::info!("Listening on {address}");
    axum::serve(listener, app).await?;
    Ok(())
}
