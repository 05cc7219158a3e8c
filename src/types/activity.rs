use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// One GPS sample. `time` is seconds since the activity start and `distance`
/// is cumulative meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityPoint {
    pub lat: f64,
    pub lng: f64,
    pub time: f64,
    pub elevation: Option<f64>,
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Athlete {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// A recorded track ready for replay.
///
/// Only [`Activity::new`] builds one, so every instance holds a non-empty,
/// time-sorted point sequence starting at time 0 with non-decreasing distance.
#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    id: String,
    name: String,
    athlete: Athlete,
    points: Vec<ActivityPoint>,
    total_distance: f64,
    total_time: f64,
    start_time: DateTime<Utc>,
}

impl Activity {
    pub fn new(
        id: String,
        name: String,
        athlete: Athlete,
        points: Vec<ActivityPoint>,
        total_distance: f64,
        start_time: DateTime<Utc>,
    ) -> Result<Self, ParseError> {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Err(ParseError::NoValidPoints);
        };
        if first.time != 0.0 {
            return Err(ParseError::StartNotZero(first.time));
        }
        let total_time = last.time;

        let mut last_time: Option<f64> = None;
        let mut last_distance: Option<f64> = None;
        for (idx, point) in points.iter().enumerate() {
            if !point.lat.is_finite() || !point.lng.is_finite() || !point.time.is_finite() {
                return Err(ParseError::InvalidSample(idx));
            }
            if last_time.is_some_and(|prev| point.time < prev) {
                return Err(ParseError::TimeOutOfOrder(idx));
            }
            last_time = Some(point.time);
            if let Some(distance) = point.distance {
                if let Some(prev) = last_distance {
                    if distance < prev {
                        return Err(ParseError::DistanceOutOfOrder(idx));
                    }
                }
                last_distance = Some(distance);
            }
        }

        Ok(Self {
            id,
            name,
            athlete,
            points,
            total_distance: if total_distance.is_finite() {
                total_distance.max(0.0)
            } else {
                0.0
            },
            total_time,
            start_time,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn athlete(&self) -> &Athlete {
        &self.athlete
    }

    pub fn points(&self) -> &[ActivityPoint] {
        &self.points
    }

    /// Meters.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Seconds; always the last point's `time`.
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn summary(&self) -> ActivitySummary {
        ActivitySummary {
            id: self.id.clone(),
            name: self.name.clone(),
            athlete: self.athlete.clone(),
            point_count: self.points.len(),
            total_distance: self.total_distance,
            total_time: self.total_time,
            start_time: self.start_time,
        }
    }
}

impl AsRef<Activity> for Activity {
    fn as_ref(&self) -> &Activity {
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub id: String,
    pub name: String,
    pub athlete: Athlete,
    pub point_count: usize,
    pub total_distance: f64,
    pub total_time: f64,
    pub start_time: DateTime<Utc>,
}

/// Raw sample as read from a source document, before time normalization and
/// distance accumulation.
#[derive(Debug, Clone)]
pub struct TrackPoint {
    pub lat: f64,
    pub lng: f64,
    pub elevation: Option<f64>,
    pub time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum FileFormat {
    Gpx,
}

impl FileFormat {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = filename.rsplit('.').next()?.to_lowercase();
        match ext.as_str() {
            "gpx" => Some(FileFormat::Gpx),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Gpx => "gpx",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParsedTrack {
    pub name: Option<String>,
    pub points: Vec<TrackPoint>,
}
