use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{RecommendationRequest, RecommendationResponse},
    services::{keywords::interest_keywords, level::LevelTier, recommendations},
};

use super::AppState;

#[derive(Debug, Serialize)]
pub struct InterestsResponse {
    pub interests: Vec<String>,
    pub levels: Vec<String>,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Interest keywords and levels understood by the recommender
pub async fn list_interests() -> Json<InterestsResponse> {
    Json(InterestsResponse {
        interests: interest_keywords(),
        levels: LevelTier::KNOWN.iter().map(ToString::to_string).collect(),
    })
}

/// Recommend open issues for the requested skills, level and interest
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Json(request) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    tracing::info!(
        request_id = %request_id,
        skills = %request.skills,
        level = %request.level,
        interest = %request.interest,
        "Processing recommendation request"
    );

    let response = recommendations::recommend(state.gateway.clone(), &state.settings, request).await?;

    tracing::info!(
        request_id = %request_id,
        returned = response.issues.len(),
        "Recommendation completed"
    );

    Ok(Json(response))
}
