use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid GPX: {0}")]
    InvalidGpx(String),
    #[error("No track points found in file")]
    EmptyFile,
    #[error("No valid track points found")]
    NoValidPoints,
    #[error("Sample {0} has a non-numeric coordinate or time")]
    InvalidSample(usize),
    #[error("Track must start at time 0, got {0}")]
    StartNotZero(f64),
    #[error("Track time goes backwards at point {0}")]
    TimeOutOfOrder(usize),
    #[error("Track distance goes backwards at point {0}")]
    DistanceOutOfOrder(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum StravaError {
    #[error("Unauthorized: please re-authenticate with Strava")]
    Unauthorized,
    #[error("Forbidden: you do not have access to this {0}")]
    Forbidden(&'static str),
    #[error("Strava {0} not found")]
    NotFound(&'static str),
    #[error("Strava request failed: {0}")]
    Upstream(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, thiserror::Error)]
pub enum RaceError {
    #[error("Activity {0} is already in this race")]
    DuplicateActivity(String),
    #[error("Activity {0} is not in this race")]
    UnknownActivity(String),
    #[error("Invalid playback speed: {0}")]
    InvalidSpeed(f64),
    #[error("Invalid time: {0}")]
    InvalidTime(f64),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Strava(#[from] StravaError),
    #[error(transparent)]
    Race(#[from] RaceError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Parse(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Strava(err) => match err {
                StravaError::Unauthorized => StatusCode::UNAUTHORIZED,
                StravaError::Forbidden(_) => StatusCode::FORBIDDEN,
                StravaError::NotFound(_) => StatusCode::NOT_FOUND,
                StravaError::Upstream(_) => StatusCode::BAD_GATEWAY,
                StravaError::Parse(_) => StatusCode::BAD_REQUEST,
            },
            AppError::Race(err) => match err {
                RaceError::DuplicateActivity(_) => StatusCode::CONFLICT,
                RaceError::UnknownActivity(_) => StatusCode::NOT_FOUND,
                RaceError::InvalidSpeed(_) | RaceError::InvalidTime(_) => StatusCode::BAD_REQUEST,
            },
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
