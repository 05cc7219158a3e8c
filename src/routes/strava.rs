use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, routing::post, Json, Router};
use serde::Deserialize;

use crate::{
    error::AppError,
    state::AppState,
    strava::{extract_activity_id, StravaClient},
    types::activity::ActivitySummary,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/strava/import", post(import_activity))
}

#[derive(Debug, Deserialize)]
struct ImportRequest {
    /// Activity id or activity URL.
    activity: String,
}

async fn import_activity(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ImportRequest>,
) -> Result<Json<ActivitySummary>, AppError> {
    let access_token = bearer_token(&headers)
        .ok_or_else(|| AppError::Unauthorized("Missing Strava Bearer token".to_string()))?;
    let activity_id = extract_activity_id(&payload.activity).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Could not find a Strava activity id in {:?}",
            payload.activity
        ))
    })?;

    let client = StravaClient::new(state.config().strava_api_base.clone(), access_token);
    let activity = client
        .get_activity_with_streams(activity_id)
        .await
        .map_err(|err| {
            tracing::warn!("Strava import of activity {} failed: {}", activity_id, err);
            err
        })?;
    let activity = Arc::new(activity);
    state.insert_activity(activity.clone());

    tracing::info!(
        "Imported Strava activity {} for {} ({} points, {:.2} km)",
        activity.id(),
        activity.athlete().name,
        activity.points().len(),
        activity.total_distance() / 1000.0
    );

    Ok(Json(activity.summary()))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("authorization")?;
    let raw = value.to_str().ok()?;
    raw.strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}
