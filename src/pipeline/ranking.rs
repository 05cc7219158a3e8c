use serde::Serialize;

use crate::pipeline::interpolate::interpolate;
use crate::types::activity::Activity;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Standing {
    /// Index into the slice passed to [`standings`].
    pub index: usize,
    /// 1-based race position.
    pub position: usize,
    pub distance: f64,
    pub progress_percent: f64,
    pub is_leader: bool,
    pub is_finished: bool,
}

/// Distance covered at `time`; samples without distance count as zero.
pub fn distance_at(activity: &Activity, time: f64) -> f64 {
    interpolate(activity.points(), time)
        .and_then(|p| p.distance)
        .unwrap_or(0.0)
}

/// Share of the activity's total distance covered, in percent.
pub fn progress_percent(activity: &Activity, distance: f64) -> f64 {
    if activity.total_distance() > 0.0 {
        distance / activity.total_distance() * 100.0
    } else {
        0.0
    }
}

/// Activity indices ordered by distance covered at `time`, furthest first.
/// Equal distances keep their input order.
pub fn rank<A: AsRef<Activity>>(activities: &[A], time: f64) -> Vec<usize> {
    let distances: Vec<f64> = activities
        .iter()
        .map(|activity| distance_at(activity.as_ref(), time))
        .collect();

    let mut order: Vec<usize> = (0..activities.len()).collect();
    order.sort_by(|&a, &b| distances[b].total_cmp(&distances[a]));
    order
}

/// Ranked standings at `time`. Finished activities keep their place by
/// distance; the leader flag is only raised while the leader is still racing.
pub fn standings<A: AsRef<Activity>>(activities: &[A], time: f64) -> Vec<Standing> {
    rank(activities, time)
        .into_iter()
        .enumerate()
        .map(|(place, index)| {
            let activity = activities[index].as_ref();
            let distance = distance_at(activity, time);
            let progress = progress_percent(activity, distance);
            let is_finished = progress >= 100.0;
            Standing {
                index,
                position: place + 1,
                distance,
                progress_percent: progress,
                is_leader: place == 0 && !is_finished,
                is_finished,
            }
        })
        .collect()
}
