use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StravaAthlete {
    pub id: u64,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
}

impl StravaAthlete {
    pub fn display_name(&self) -> String {
        let first = self.firstname.as_deref().unwrap_or("");
        let last = self.lastname.as_deref().unwrap_or("");
        let name = format!("{} {}", first, last).trim().to_string();
        if name.is_empty() {
            "Unknown Athlete".to_string()
        } else {
            name
        }
    }
}

/// `GET /activities/{id}` response, reduced to the fields a replay needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StravaDetailedActivity {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// Meters.
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    pub athlete: StravaAthlete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StravaStream<T> {
    pub data: Vec<T>,
}

/// `GET /activities/{id}/streams?key_by_type=true` response. Every stream is
/// indexed by sample and may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StravaStreamSet {
    #[serde(default)]
    pub latlng: Option<StravaStream<[f64; 2]>>,
    /// Seconds from start.
    #[serde(default)]
    pub time: Option<StravaStream<f64>>,
    /// Cumulative meters.
    #[serde(default)]
    pub distance: Option<StravaStream<f64>>,
    #[serde(default)]
    pub altitude: Option<StravaStream<f64>>,
}
