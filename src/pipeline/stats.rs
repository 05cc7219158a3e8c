use serde::Serialize;

use crate::pipeline::interpolate::interpolate;
use crate::pipeline::ranking::progress_percent;
use crate::pipeline::speed::estimate_speed;
use crate::types::activity::Activity;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivityStats {
    /// Meters covered.
    pub distance: f64,
    pub speed_kmh: f64,
    pub progress_percent: f64,
    pub time_elapsed: f64,
    pub lat: f64,
    pub lng: f64,
    pub elevation: Option<f64>,
}

/// Where an activity is, and how fast it moves, at race time `time`.
pub fn activity_stats(activity: &Activity, time: f64) -> ActivityStats {
    let points = activity.points();
    let position = interpolate(points, time);
    let distance = position.and_then(|p| p.distance).unwrap_or(0.0);

    ActivityStats {
        distance,
        speed_kmh: estimate_speed(points, time),
        progress_percent: progress_percent(activity, distance),
        time_elapsed: time,
        lat: position.map(|p| p.lat).unwrap_or_default(),
        lng: position.map(|p| p.lng).unwrap_or_default(),
        elevation: position.and_then(|p| p.elevation),
    }
}

/// `"850m"` below a kilometer, `"1.23km"` above.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}m", meters.round() as i64)
    } else {
        format!("{:.2}km", meters / 1000.0)
    }
}

pub fn format_speed(kmh: f64) -> String {
    format!("{:.1} km/h", kmh)
}

/// Minutes per kilometer as `m:ss`.
pub fn format_pace(kmh: f64) -> String {
    if kmh <= 0.0 || !kmh.is_finite() {
        return "--:--".to_string();
    }

    let pace_minutes = 60.0 / kmh;
    let mut minutes = pace_minutes.floor() as u64;
    let mut seconds = ((pace_minutes - minutes as f64) * 60.0).round() as u64;
    if seconds == 60 {
        minutes += 1;
        seconds = 0;
    }
    format!("{}:{:02}", minutes, seconds)
}

/// Race clock as `m:ss`.
pub fn format_clock(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
