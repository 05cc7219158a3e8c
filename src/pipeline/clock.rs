use crate::types::playback::{PlaybackState, TickOutcome};

/// Playback multipliers offered to viewers.
pub const SPEED_OPTIONS: [f64; 6] = [0.5, 1.0, 1.5, 2.0, 3.0, 5.0];

/// Virtual race clock, advanced once per displayed frame.
///
/// `current_time` always stays within `[0, max_time]`.
#[derive(Debug, Clone, Default)]
pub struct PlaybackClock {
    state: PlaybackState,
    max_time: f64,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn current_time(&self) -> f64 {
        self.state.current_time
    }

    pub fn playback_speed(&self) -> f64 {
        self.state.playback_speed
    }

    pub fn max_time(&self) -> f64 {
        self.max_time
    }

    /// Updates the end of the timeline after the activity set changed.
    pub fn set_max_time(&mut self, max_time: f64) {
        self.max_time = if max_time.is_finite() {
            max_time.max(0.0)
        } else {
            0.0
        };
        self.state.current_time = self.state.current_time.clamp(0.0, self.max_time);
    }

    pub fn play(&mut self) {
        self.state.is_playing = true;
    }

    pub fn pause(&mut self) {
        self.state.is_playing = false;
    }

    pub fn toggle(&mut self) {
        self.state.is_playing = !self.state.is_playing;
    }

    pub fn seek(&mut self, time: f64) {
        self.state.current_time = if time.is_nan() {
            0.0
        } else {
            time.clamp(0.0, self.max_time)
        };
    }

    /// Non-finite or negative multipliers are ignored.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() && speed >= 0.0 {
            self.state.playback_speed = speed;
        }
    }

    pub fn reset(&mut self) {
        self.state.current_time = 0.0;
        self.state.is_playing = false;
    }

    /// Advances by `delta_seconds` of wall time scaled by the playback speed.
    /// Reaching the end of the timeline pauses the clock in the same tick.
    pub fn tick(&mut self, delta_seconds: f64) -> TickOutcome {
        if !self.state.is_playing {
            return TickOutcome::Idle;
        }

        let step = delta_seconds * self.state.playback_speed;
        let step = if step.is_finite() { step.max(0.0) } else { 0.0 };
        let next = (self.state.current_time + step).min(self.max_time);
        self.state.current_time = next;

        if next >= self.max_time {
            self.state.current_time = self.max_time;
            self.state.is_playing = false;
            TickOutcome::Finished
        } else {
            TickOutcome::Advanced
        }
    }
}
