use std::f64::consts::PI;

use chrono::{TimeZone, Utc};

use crate::error::ParseError;
use crate::types::activity::{Activity, ActivityPoint, Athlete};

const PARK_LAT: f64 = 59.9311;
const PARK_LNG: f64 = 10.7579;
const LOOP_DISTANCE_M: f64 = 3200.0;
const SAMPLE_INTERVAL_SECS: usize = 10;

struct SampleRunner {
    id: &'static str,
    name: &'static str,
    athlete_id: &'static str,
    athlete_name: &'static str,
    color: &'static str,
    offset_lat: f64,
    offset_lng: f64,
    duration_secs: usize,
}

const SAMPLES: [SampleRunner; 4] = [
    SampleRunner {
        id: "sample-1",
        name: "Morning Run with Sarah",
        athlete_id: "sarah-123",
        athlete_name: "Sarah Johnson",
        color: "#FF6B6B",
        offset_lat: 0.0,
        offset_lng: 0.0,
        duration_secs: 1800,
    },
    SampleRunner {
        id: "sample-2",
        name: "Park Loop Challenge",
        athlete_id: "mike-456",
        athlete_name: "Mike Chen",
        color: "#4ECDC4",
        offset_lat: 0.001,
        offset_lng: 0.001,
        duration_secs: 1650,
    },
    SampleRunner {
        id: "sample-3",
        name: "Easy Jog",
        athlete_id: "anna-789",
        athlete_name: "Anna Peterson",
        color: "#45B7D1",
        offset_lat: -0.001,
        offset_lng: 0.002,
        duration_secs: 2100,
    },
    SampleRunner {
        id: "sample-4",
        name: "Speed Training",
        athlete_id: "tom-012",
        athlete_name: "Tom Wilson",
        color: "#F7DC6F",
        offset_lat: 0.002,
        offset_lng: -0.001,
        duration_secs: 1500,
    },
];

/// Four runners on the same park loop, finishing at different times.
pub fn sample_activities() -> Result<Vec<Activity>, ParseError> {
    let start_time = Utc
        .with_ymd_and_hms(2025, 1, 15, 8, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);

    SAMPLES
        .iter()
        .map(|runner| {
            Activity::new(
                runner.id.to_string(),
                runner.name.to_string(),
                Athlete {
                    id: runner.athlete_id.to_string(),
                    name: runner.athlete_name.to_string(),
                    color: runner.color.to_string(),
                },
                loop_points(runner.offset_lat, runner.offset_lng, runner.duration_secs),
                LOOP_DISTANCE_M,
                start_time,
            )
        })
        .collect()
}

/// Elliptical loop (~500 m by ~700 m) sampled every 10 s at an even pace.
fn loop_points(offset_lat: f64, offset_lng: f64, duration_secs: usize) -> Vec<ActivityPoint> {
    const RADIUS_LAT: f64 = 0.005;
    const RADIUS_LNG: f64 = 0.007;

    let total = (duration_secs / SAMPLE_INTERVAL_SECS).max(1);
    (0..=total)
        .map(|i| {
            let progress = i as f64 / total as f64;
            let angle = progress * 2.0 * PI;
            ActivityPoint {
                lat: PARK_LAT + offset_lat + angle.cos() * RADIUS_LAT,
                lng: PARK_LNG + offset_lng + angle.sin() * RADIUS_LNG,
                time: progress * duration_secs as f64,
                elevation: Some(100.0 + (angle * 2.0).sin() * 20.0),
                distance: Some(progress * LOOP_DISTANCE_M),
            }
        })
        .collect()
}
