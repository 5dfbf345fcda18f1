use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use crate::{
    error::AppError,
    extractors::AppJson,
    inference::{
        dto::{
            AnswerResponse, QuestionRequest, QuizRequest, QuizResponse, SummarizeRequest,
            SummaryResponse,
        },
        services,
    },
    state::AppState,
};

pub fn inference_routes() -> Router<AppState> {
    Router::new()
        .route("/generate-quiz", post(generate_quiz))
        .route("/summarize", post(summarize))
        .route("/answer-question", post(answer_question))
}

#[instrument(skip(state, payload))]
pub async fn generate_quiz(
    State(state): State<AppState>,
    AppJson(payload): AppJson<QuizRequest>,
) -> Result<Json<QuizResponse>, AppError> {
    let out = services::generate_quiz(&state.generator, payload.topic, payload.difficulty).await?;
    Ok(Json(out))
}

#[instrument(skip(state, payload))]
pub async fn summarize(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SummarizeRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let out = services::summarize(&state.summarizer, &payload.text).await?;
    Ok(Json(out))
}

#[instrument(skip(state, payload))]
pub async fn answer_question(
    State(state): State<AppState>,
    AppJson(payload): AppJson<QuestionRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let out =
        services::answer_question(&state.generator, &payload.question, &payload.context).await?;
    Ok(Json(out))
}
