use std::sync::Arc;

use axum::extract::Multipart;
use axum::{extract::State, routing::post, Json, Router};

use crate::error::AppError;
use crate::pipeline::{ingest, parse};
use crate::state::AppState;
use crate::types::activity::{ActivitySummary, FileFormat};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/upload", post(upload))
}

async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ActivitySummary>, AppError> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;
    let mut athlete: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                filename = field.file_name().map(|s| s.to_string());
                file_bytes = Some(field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read file bytes: {}", e))
                })?.to_vec());
            }
            "athlete" => {
                athlete = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read athlete name: {}", e))
                })?);
            }
            _ => {}
        }
    }

    let bytes = file_bytes.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    let filename = filename.ok_or_else(|| AppError::BadRequest("No filename provided".to_string()))?;

    let format = FileFormat::from_filename(&filename)
        .ok_or_else(|| AppError::BadRequest("Unsupported file format".to_string()))?;

    tracing::info!("Parsing {} file: {}", format.as_str(), filename);

    let parsed = parse::parse(&bytes, format)?;
    let activity = Arc::new(ingest::from_track(&parsed, athlete.as_deref())?);
    state.insert_activity(activity.clone());

    tracing::info!(
        "Uploaded file {} as activity {} ({} points, {:.2} km, {:.0} s)",
        filename,
        activity.id(),
        activity.points().len(),
        activity.total_distance() / 1000.0,
        activity.total_time()
    );

    Ok(Json(activity.summary()))
}
