use crate::types::activity::ActivityPoint;

/// Position of a track at `time` seconds, linearly interpolated between the
/// two samples around it.
///
/// Times before the first sample return the first sample unchanged, times
/// after the last return the last one. Returns `None` only for an empty slice.
pub fn interpolate(points: &[ActivityPoint], time: f64) -> Option<ActivityPoint> {
    let first = points.first()?;
    let last = points.last()?;

    if time.is_nan() || time <= first.time {
        return Some(*first);
    }
    if time >= last.time {
        return Some(*last);
    }

    // first.time < time < last.time, so 1 <= upper < len
    let upper = points.partition_point(|p| p.time < time);
    let prev = &points[upper - 1];
    let next = &points[upper];

    let span = next.time - prev.time;
    if span <= 0.0 {
        return Some(*prev);
    }
    let progress = ((time - prev.time) / span).clamp(0.0, 1.0);

    Some(ActivityPoint {
        lat: lerp(prev.lat, next.lat, progress),
        lng: lerp(prev.lng, next.lng, progress),
        time,
        elevation: lerp_optional(prev.elevation, next.elevation, progress),
        distance: lerp_optional(prev.distance, next.distance, progress),
    })
}

fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

fn lerp_optional(start: Option<f64>, end: Option<f64>, t: f64) -> Option<f64> {
    match (start, end) {
        (Some(start), Some(end)) => Some(lerp(start, end, t)),
        (start, _) => start,
    }
}
