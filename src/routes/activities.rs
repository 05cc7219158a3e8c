use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::error::AppError;
use crate::pipeline::samples::sample_activities;
use crate::state::AppState;
use crate::types::activity::{Activity, ActivitySummary};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/samples", post(load_samples))
        .route("/api/activities/:activity_id", get(get_activity))
}

async fn load_samples(State(state): State<AppState>) -> Result<Json<Vec<ActivitySummary>>, AppError> {
    let activities = sample_activities()
        .map_err(|err| AppError::Internal(format!("Failed to build sample activities: {}", err)))?;

    let summaries = activities
        .into_iter()
        .map(|activity| {
            let summary = activity.summary();
            state.insert_activity(Arc::new(activity));
            summary
        })
        .collect::<Vec<_>>();

    tracing::info!("Loaded {} sample activities", summaries.len());
    Ok(Json(summaries))
}

async fn get_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
) -> Result<Json<Activity>, AppError> {
    let activity = state
        .get_activity(&activity_id)
        .ok_or_else(|| AppError::NotFound(format!("activity {}", activity_id)))?;
    Ok(Json(Activity::clone(&activity)))
}
