use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::pipeline::race::{RaceFrame, RaceSession};
use crate::state::AppState;
use crate::types::playback::{PlaybackCommand, TickOutcome};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/races", post(create_race))
        .route("/api/races/:race_id", get(get_frame).delete(delete_race))
        .route(
            "/api/races/:race_id/activities",
            post(add_activity).delete(clear_activities),
        )
        .route(
            "/api/races/:race_id/activities/:activity_id",
            delete(remove_activity),
        )
        .route("/api/races/:race_id/control", post(control))
        .route("/api/races/:race_id/tick", post(tick))
}

#[derive(Debug, Default, Deserialize)]
struct CreateRaceRequest {
    #[serde(default)]
    activity_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CreateRaceResponse {
    race_id: String,
    frame: RaceFrame,
}

#[derive(Debug, Deserialize)]
struct FrameQuery {
    time: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct AddActivityRequest {
    activity_id: String,
}

#[derive(Debug, Deserialize)]
struct TickRequest {
    delta_seconds: f64,
}

#[derive(Debug, Serialize)]
struct TickResponse {
    outcome: TickOutcome,
    frame: RaceFrame,
}

fn race_not_found(race_id: &str) -> AppError {
    AppError::NotFound(format!("race {}", race_id))
}

async fn create_race(
    State(state): State<AppState>,
    payload: Option<Json<CreateRaceRequest>>,
) -> Result<Json<CreateRaceResponse>, AppError> {
    let Json(request) = payload.unwrap_or_default();

    let mut session = RaceSession::new();
    for activity_id in &request.activity_ids {
        let activity = state
            .get_activity(activity_id)
            .ok_or_else(|| AppError::NotFound(format!("activity {}", activity_id)))?;
        session.add_activity(activity)?;
    }

    let frame = session.frame();
    let race_id = state.create_race(session);
    tracing::info!(
        "Created race {} with {} activities ({:.0} s timeline)",
        race_id,
        frame.entries.len(),
        frame.max_time
    );

    Ok(Json(CreateRaceResponse { race_id, frame }))
}

async fn get_frame(
    State(state): State<AppState>,
    Path(race_id): Path<String>,
    Query(query): Query<FrameQuery>,
) -> Result<Json<RaceFrame>, AppError> {
    let frame = state
        .with_race(&race_id, |race| match query.time {
            Some(time) => race.frame_at(time),
            None => race.frame(),
        })
        .ok_or_else(|| race_not_found(&race_id))?;
    Ok(Json(frame))
}

async fn delete_race(
    State(state): State<AppState>,
    Path(race_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.remove_race(&race_id) {
        return Err(race_not_found(&race_id));
    }
    tracing::info!("Deleted race {}", race_id);
    Ok(StatusCode::NO_CONTENT)
}

async fn add_activity(
    State(state): State<AppState>,
    Path(race_id): Path<String>,
    Json(request): Json<AddActivityRequest>,
) -> Result<Json<RaceFrame>, AppError> {
    let activity = state
        .get_activity(&request.activity_id)
        .ok_or_else(|| AppError::NotFound(format!("activity {}", request.activity_id)))?;

    let frame = state
        .with_race(&race_id, |race| {
            race.add_activity(activity)?;
            Ok::<_, AppError>(race.frame())
        })
        .ok_or_else(|| race_not_found(&race_id))??;

    tracing::info!("Added activity {} to race {}", request.activity_id, race_id);
    Ok(Json(frame))
}

async fn remove_activity(
    State(state): State<AppState>,
    Path((race_id, activity_id)): Path<(String, String)>,
) -> Result<Json<RaceFrame>, AppError> {
    let frame = state
        .with_race(&race_id, |race| {
            race.remove_activity(&activity_id)?;
            Ok::<_, AppError>(race.frame())
        })
        .ok_or_else(|| race_not_found(&race_id))??;

    tracing::info!("Removed activity {} from race {}", activity_id, race_id);
    Ok(Json(frame))
}

async fn clear_activities(
    State(state): State<AppState>,
    Path(race_id): Path<String>,
) -> Result<Json<RaceFrame>, AppError> {
    let frame = state
        .with_race(&race_id, |race| {
            race.clear();
            race.frame()
        })
        .ok_or_else(|| race_not_found(&race_id))?;

    tracing::info!("Cleared activities of race {}", race_id);
    Ok(Json(frame))
}

async fn control(
    State(state): State<AppState>,
    Path(race_id): Path<String>,
    Json(command): Json<PlaybackCommand>,
) -> Result<Json<RaceFrame>, AppError> {
    let frame = state
        .with_race(&race_id, |race| {
            race.apply(command)?;
            Ok::<_, AppError>(race.frame())
        })
        .ok_or_else(|| race_not_found(&race_id))??;

    tracing::debug!(
        "Race {}: {:?} -> t={:.1}s playing={} speed={}x",
        race_id,
        command,
        frame.current_time,
        frame.is_playing,
        frame.playback_speed
    );
    Ok(Json(frame))
}

async fn tick(
    State(state): State<AppState>,
    Path(race_id): Path<String>,
    Json(request): Json<TickRequest>,
) -> Result<Json<TickResponse>, AppError> {
    let (outcome, frame) = state
        .with_race(&race_id, |race| {
            let outcome = race.tick(request.delta_seconds)?;
            Ok::<_, AppError>((outcome, race.frame()))
        })
        .ok_or_else(|| race_not_found(&race_id))??;

    if outcome == TickOutcome::Finished {
        tracing::debug!("Race {} reached the end at {:.1}s", race_id, frame.current_time);
    }
    Ok(Json(TickResponse { outcome, frame }))
}
