pub mod activities;
pub mod health;
pub mod races;
pub mod strava;
pub mod upload;
