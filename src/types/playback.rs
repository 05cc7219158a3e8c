use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub is_playing: bool,
    /// Seconds on the shared race timeline.
    pub current_time: f64,
    pub playback_speed: f64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            playback_speed: 1.0,
        }
    }
}

/// What a single `tick` did to the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickOutcome {
    /// The clock was stopped; nothing moved.
    Idle,
    Advanced,
    /// Reached the end of the timeline and paused itself.
    Finished,
}

/// A discrete viewer command on the race clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum PlaybackCommand {
    Play,
    Pause,
    Toggle,
    Reset,
    Seek { time: f64 },
    Speed { speed: f64 },
}
