pub mod activity;
pub mod palette;
pub mod playback;
pub mod strava;
