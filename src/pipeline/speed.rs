use crate::pipeline::interpolate::interpolate;
use crate::types::activity::ActivityPoint;

const PRIMARY_WINDOW_SECS: f64 = 10.0;
const FALLBACK_WINDOW_SECS: f64 = 5.0;
/// The primary window needs at least this much recorded time to be trusted.
const PRIMARY_MIN_ELAPSED_SECS: f64 = 2.0;

pub const MPS_TO_KMH: f64 = 3.6;

/// Instantaneous speed in km/h at `time`.
pub fn estimate_speed(points: &[ActivityPoint], time: f64) -> f64 {
    estimate_speed_mps(points, time) * MPS_TO_KMH
}

/// Instantaneous speed in m/s at `time`, never negative.
///
/// Averages over the trailing 10 s of samples, then the trailing 5 s, then the
/// whole activity so far; the first estimate above zero wins.
pub fn estimate_speed_mps(points: &[ActivityPoint], time: f64) -> f64 {
    let mut speed = window_speed(points, time, PRIMARY_WINDOW_SECS, PRIMARY_MIN_ELAPSED_SECS);

    if speed == 0.0 {
        speed = window_speed(points, time, FALLBACK_WINDOW_SECS, 0.0);
    }

    if speed == 0.0 && time > 0.0 {
        let distance = interpolate(points, time)
            .and_then(|p| p.distance)
            .unwrap_or(0.0);
        speed = distance / time;
    }

    if speed.is_finite() {
        speed.max(0.0)
    } else {
        0.0
    }
}

/// Average speed between the first and last sample inside
/// `[max(0, time - window), time]`. `min_elapsed` of zero only requires the
/// samples to be apart in time.
fn window_speed(points: &[ActivityPoint], time: f64, window: f64, min_elapsed: f64) -> f64 {
    let window_start = (time - window).max(0.0);
    let lo = points.partition_point(|p| p.time < window_start);
    let hi = points.partition_point(|p| p.time <= time);
    if hi <= lo + 1 {
        return 0.0;
    }

    let first = &points[lo];
    let last = &points[hi - 1];
    let elapsed = last.time - first.time;
    let delta = last.distance.unwrap_or(0.0) - first.distance.unwrap_or(0.0);

    let long_enough = if min_elapsed > 0.0 {
        elapsed >= min_elapsed
    } else {
        elapsed > 0.0
    };
    if long_enough && delta >= 0.0 {
        delta / elapsed
    } else {
        0.0
    }
}
