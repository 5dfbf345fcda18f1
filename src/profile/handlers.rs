use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::AppError,
    extractors::AppJson,
    profile::{
        dto::{SelectSubjectRequest, SelectSubjectResponse, TutorResponse},
        services,
    },
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/select-subject", post(select_subject))
        .route("/tutor-response/:username", get(tutor_response))
}

#[instrument(skip(state, payload))]
pub async fn select_subject(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SelectSubjectRequest>,
) -> Result<Json<SelectSubjectResponse>, AppError> {
    let out = services::select_subject(
        state.store.as_ref(),
        &payload.username,
        &payload.grade,
        &payload.subject,
    )
    .await?;
    Ok(Json(out))
}

#[instrument(skip(state))]
pub async fn tutor_response(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<TutorResponse>, AppError> {
    let out = services::get_tutor_response(state.store.as_ref(), &username).await?;
    Ok(Json(out))
}
