pub mod clock;
pub mod geo;
pub mod ingest;
pub mod interpolate;
pub mod parse;
pub mod race;
pub mod ranking;
pub mod samples;
pub mod speed;
pub mod stats;
