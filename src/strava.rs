use reqwest::StatusCode;

use crate::error::StravaError;
use crate::pipeline::ingest;
use crate::types::activity::Activity;
use crate::types::strava::{StravaDetailedActivity, StravaStreamSet};

const STREAM_KEYS: &str = "latlng,time,distance,altitude";

/// Read-only Strava API client for a single, already-authorized athlete.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl StravaClient {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    pub async fn get_activity(&self, activity_id: u64) -> Result<StravaDetailedActivity, StravaError> {
        let url = format!("{}/activities/{}", self.base_url, activity_id);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|err| StravaError::Upstream(format!("Failed to fetch activity: {}", err)))?;

        check_status(response, "activity")
            .await?
            .json()
            .await
            .map_err(|err| StravaError::Upstream(format!("Invalid activity response: {}", err)))
    }

    pub async fn get_activity_streams(&self, activity_id: u64) -> Result<StravaStreamSet, StravaError> {
        let url = format!(
            "{}/activities/{}/streams?keys={}&key_by_type=true&resolution=medium",
            self.base_url, activity_id, STREAM_KEYS
        );
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|err| StravaError::Upstream(format!("Failed to fetch activity streams: {}", err)))?;

        check_status(response, "activity streams")
            .await?
            .json()
            .await
            .map_err(|err| StravaError::Upstream(format!("Invalid streams response: {}", err)))
    }

    /// Fetches the activity record and its streams concurrently and builds a
    /// replayable activity from them.
    pub async fn get_activity_with_streams(&self, activity_id: u64) -> Result<Activity, StravaError> {
        let (record, streams) = tokio::try_join!(
            self.get_activity(activity_id),
            self.get_activity_streams(activity_id)
        )?;
        Ok(ingest::from_strava(&record, &streams)?)
    }
}

async fn check_status(
    response: reqwest::Response,
    resource: &'static str,
) -> Result<reqwest::Response, StravaError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::UNAUTHORIZED => Err(StravaError::Unauthorized),
        StatusCode::FORBIDDEN => Err(StravaError::Forbidden(resource)),
        StatusCode::NOT_FOUND => Err(StravaError::NotFound(resource)),
        status => {
            let body = response.text().await.unwrap_or_default();
            Err(StravaError::Upstream(format!(
                "{} request failed ({}): {}",
                resource, status, body
            )))
        }
    }
}

/// Accepts a bare activity id or any link containing `/activities/<id>`.
pub fn extract_activity_id(input: &str) -> Option<u64> {
    let input = input.trim();
    if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
        return input.parse().ok();
    }

    let (_, rest) = input.split_once("/activities/")?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
