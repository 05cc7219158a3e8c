use std::sync::Arc;

use serde::Serialize;

use crate::error::RaceError;
use crate::pipeline::clock::PlaybackClock;
use crate::pipeline::ranking::standings;
use crate::pipeline::stats::{
    activity_stats, format_clock, format_distance, format_pace, format_speed, ActivityStats,
};
use crate::types::activity::{Activity, Athlete};
use crate::types::playback::{PlaybackCommand, TickOutcome};

/// One race: a set of activities replayed against a single clock.
///
/// Every derived value is recomputed from the immutable activities on each
/// frame, so sessions never share mutable state.
#[derive(Debug, Clone, Default)]
pub struct RaceSession {
    activities: Vec<Arc<Activity>>,
    clock: PlaybackClock,
}

#[derive(Debug, Clone, Serialize)]
pub struct RaceFrame {
    pub current_time: f64,
    pub max_time: f64,
    pub is_playing: bool,
    pub playback_speed: f64,
    pub clock: String,
    /// Leader first.
    pub entries: Vec<FrameEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameEntry {
    pub activity_id: String,
    pub activity_name: String,
    pub athlete: Athlete,
    pub position: usize,
    pub is_leader: bool,
    pub is_finished: bool,
    pub stats: ActivityStats,
    pub display: DisplayStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct DisplayStats {
    pub distance: String,
    pub speed: String,
    pub pace: String,
    pub time: String,
}

impl RaceSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activities(&self) -> &[Arc<Activity>] {
        &self.activities
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    /// Direct clock access for frame-driven callers. The timeline length
    /// still follows the activity set on the next membership change.
    pub fn clock_mut(&mut self) -> &mut PlaybackClock {
        &mut self.clock
    }

    pub fn max_time(&self) -> f64 {
        self.clock.max_time()
    }

    pub fn add_activity(&mut self, activity: Arc<Activity>) -> Result<(), RaceError> {
        if self.activities.iter().any(|a| a.id() == activity.id()) {
            return Err(RaceError::DuplicateActivity(activity.id().to_string()));
        }
        self.activities.push(activity);
        self.refresh_max_time();
        Ok(())
    }

    pub fn remove_activity(&mut self, activity_id: &str) -> Result<Arc<Activity>, RaceError> {
        let idx = self
            .activities
            .iter()
            .position(|a| a.id() == activity_id)
            .ok_or_else(|| RaceError::UnknownActivity(activity_id.to_string()))?;
        let removed = self.activities.remove(idx);
        self.refresh_max_time();
        Ok(removed)
    }

    /// Drops every activity, e.g. when the viewer signs out.
    pub fn clear(&mut self) {
        self.activities.clear();
        self.refresh_max_time();
    }

    pub fn apply(&mut self, command: PlaybackCommand) -> Result<(), RaceError> {
        match command {
            PlaybackCommand::Play => self.clock.play(),
            PlaybackCommand::Pause => self.clock.pause(),
            PlaybackCommand::Toggle => self.clock.toggle(),
            PlaybackCommand::Reset => self.clock.reset(),
            PlaybackCommand::Seek { time } => {
                if !time.is_finite() {
                    return Err(RaceError::InvalidTime(time));
                }
                self.clock.seek(time);
            }
            PlaybackCommand::Speed { speed } => {
                if !speed.is_finite() || speed < 0.0 {
                    return Err(RaceError::InvalidSpeed(speed));
                }
                self.clock.set_speed(speed);
            }
        }
        Ok(())
    }

    pub fn tick(&mut self, delta_seconds: f64) -> Result<TickOutcome, RaceError> {
        if !delta_seconds.is_finite() || delta_seconds < 0.0 {
            return Err(RaceError::InvalidTime(delta_seconds));
        }
        Ok(self.clock.tick(delta_seconds))
    }

    /// Snapshot at the clock's current time.
    pub fn frame(&self) -> RaceFrame {
        self.build_frame(self.clock.current_time())
    }

    /// Snapshot at an arbitrary time without moving the clock.
    pub fn frame_at(&self, time: f64) -> RaceFrame {
        let time = if time.is_nan() {
            0.0
        } else {
            time.clamp(0.0, self.clock.max_time())
        };
        self.build_frame(time)
    }

    fn build_frame(&self, time: f64) -> RaceFrame {
        let entries = standings(&self.activities, time)
            .into_iter()
            .map(|standing| {
                let activity = &self.activities[standing.index];
                let stats = activity_stats(activity, time);
                FrameEntry {
                    activity_id: activity.id().to_string(),
                    activity_name: activity.name().to_string(),
                    athlete: activity.athlete().clone(),
                    position: standing.position,
                    is_leader: standing.is_leader,
                    is_finished: standing.is_finished,
                    display: DisplayStats {
                        distance: format_distance(stats.distance),
                        speed: format_speed(stats.speed_kmh),
                        pace: format_pace(stats.speed_kmh),
                        time: format_clock(stats.time_elapsed),
                    },
                    stats,
                }
            })
            .collect();

        RaceFrame {
            current_time: time,
            max_time: self.clock.max_time(),
            is_playing: self.clock.is_playing(),
            playback_speed: self.clock.playback_speed(),
            clock: format_clock(time),
            entries,
        }
    }

    fn refresh_max_time(&mut self) {
        let max_time = self
            .activities
            .iter()
            .map(|a| a.total_time())
            .fold(0.0, f64::max);
        self.clock.set_max_time(max_time);
    }
}
