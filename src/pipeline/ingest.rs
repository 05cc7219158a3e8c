use chrono::Utc;
use uuid::Uuid;

use crate::error::ParseError;
use crate::pipeline::geo::haversine_distance;
use crate::pipeline::parse;
use crate::types::activity::{Activity, ActivityPoint, Athlete, FileFormat, ParsedTrack};
use crate::types::palette::Palette;
use crate::types::strava::{StravaDetailedActivity, StravaStreamSet};

pub const DEFAULT_ATHLETE_NAME: &str = "GPX Upload";
const DEFAULT_GPX_NAME: &str = "GPX Activity";
const DEFAULT_STRAVA_NAME: &str = "Strava Activity";

/// Parses a GPX document and turns it into a replayable activity.
pub fn from_gpx(bytes: &[u8], athlete_name: Option<&str>) -> Result<Activity, ParseError> {
    let parsed = parse::parse(bytes, FileFormat::Gpx)?;
    from_track(&parsed, athlete_name)
}

/// Normalizes parsed samples: time becomes seconds since the first sample and
/// distance is accumulated along the track.
pub fn from_track(parsed: &ParsedTrack, athlete_name: Option<&str>) -> Result<Activity, ParseError> {
    let Some(first) = parsed.points.first() else {
        return Err(ParseError::NoValidPoints);
    };

    // One untimed sample is enough to fall back to one sample per second.
    let timed = parsed.points.iter().all(|p| p.time.is_some());
    let start = if timed { first.time } else { None };

    let mut points = Vec::with_capacity(parsed.points.len());
    let mut total_distance = 0.0;
    for (idx, point) in parsed.points.iter().enumerate() {
        let time = match (start, point.time) {
            (Some(start), Some(time)) => (time - start).num_milliseconds().div_euclid(1000) as f64,
            _ => idx as f64,
        };

        if idx > 0 {
            let prev = &parsed.points[idx - 1];
            total_distance += haversine_distance(prev.lat, prev.lng, point.lat, point.lng);
        }

        points.push(ActivityPoint {
            lat: point.lat,
            lng: point.lng,
            time,
            elevation: point.elevation,
            distance: Some(total_distance),
        });
    }

    let athlete_name = athlete_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_ATHLETE_NAME);
    let id = Uuid::new_v4().simple().to_string();
    let athlete = Athlete {
        id: format!("gpx_{}", id),
        name: athlete_name.to_string(),
        color: Palette::upload().pick_random().to_string(),
    };

    Activity::new(
        format!("gpx_{}", id),
        parsed
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_GPX_NAME.to_string()),
        athlete,
        points,
        total_distance,
        start.unwrap_or_else(Utc::now),
    )
}

/// Zips a remote activity's parallel streams into one activity.
///
/// Streams are matched by sample index. Missing or short elevation and
/// distance streams leave those fields empty; a missing or short time stream
/// falls back to one sample per second.
pub fn from_strava(
    record: &StravaDetailedActivity,
    streams: &StravaStreamSet,
) -> Result<Activity, ParseError> {
    let latlng = streams
        .latlng
        .as_ref()
        .map(|s| s.data.as_slice())
        .unwrap_or(&[]);
    if latlng.is_empty() {
        return Err(ParseError::EmptyFile);
    }

    let time_data = streams
        .time
        .as_ref()
        .map(|s| s.data.as_slice())
        .filter(|data| data.len() >= latlng.len());
    let distance_data = streams.distance.as_ref().map(|s| s.data.as_slice());
    let altitude_data = streams.altitude.as_ref().map(|s| s.data.as_slice());

    let mut points: Vec<ActivityPoint> = Vec::with_capacity(latlng.len());
    let mut time_offset: Option<f64> = None;
    for (idx, &[lat, lng]) in latlng.iter().enumerate() {
        if !lat.is_finite() || !lng.is_finite() || (lat == 0.0 && lng == 0.0) {
            continue;
        }

        let raw_time = time_data
            .and_then(|data| data.get(idx))
            .copied()
            .unwrap_or(idx as f64);
        let offset = *time_offset.get_or_insert(raw_time);

        points.push(ActivityPoint {
            lat,
            lng,
            time: raw_time - offset,
            elevation: altitude_data.and_then(|data| data.get(idx)).copied(),
            distance: distance_data.and_then(|data| data.get(idx)).copied(),
        });
    }

    let total_distance = points
        .iter()
        .rev()
        .find_map(|p| p.distance)
        .unwrap_or(record.distance);

    let athlete = Athlete {
        id: record.athlete.id.to_string(),
        name: record.athlete.display_name(),
        color: Palette::athlete().pick(record.athlete.id).to_string(),
    };
    let name = if record.name.trim().is_empty() {
        DEFAULT_STRAVA_NAME.to_string()
    } else {
        record.name.clone()
    };

    Activity::new(
        record.id.to_string(),
        name,
        athlete,
        points,
        total_distance,
        record.start_date.unwrap_or_else(Utc::now),
    )
}
