use std::sync::Arc;

use racereplay_rs::error::RaceError;
use racereplay_rs::pipeline::race::RaceSession;
use racereplay_rs::pipeline::samples::sample_activities;
use racereplay_rs::pipeline::stats::{format_clock, format_distance, format_pace, format_speed};
use racereplay_rs::types::activity::Activity;
use racereplay_rs::types::playback::{PlaybackCommand, TickOutcome};

fn samples() -> Vec<Arc<Activity>> {
    sample_activities()
        .expect("samples")
        .into_iter()
        .map(Arc::new)
        .collect()
}

fn session_with_samples() -> RaceSession {
    let mut session = RaceSession::new();
    for activity in samples() {
        session.add_activity(activity).expect("add");
    }
    session
}

#[test]
fn samples_cover_the_same_loop() {
    let activities = sample_activities().expect("samples");
    let ids: Vec<&str> = activities.iter().map(|a| a.id()).collect();
    assert_eq!(ids, vec!["sample-1", "sample-2", "sample-3", "sample-4"]);

    let durations: Vec<f64> = activities.iter().map(|a| a.total_time()).collect();
    assert_eq!(durations, vec![1800.0, 1650.0, 2100.0, 1500.0]);
    assert!(activities.iter().all(|a| a.total_distance() == 3200.0));
    assert!(activities
        .iter()
        .all(|a| a.points().last().and_then(|p| p.distance) == Some(3200.0)));
}

#[test]
fn timeline_spans_the_longest_activity() {
    let mut session = session_with_samples();
    assert_eq!(session.max_time(), 2100.0);

    session.remove_activity("sample-3").expect("remove");
    assert_eq!(session.max_time(), 1800.0);

    session.clear();
    assert_eq!(session.max_time(), 0.0);
    assert!(session.frame().entries.is_empty());
}

#[test]
fn duplicate_and_unknown_activities_are_rejected() {
    let mut session = session_with_samples();
    let again = samples().remove(0);

    assert!(matches!(
        session.add_activity(again),
        Err(RaceError::DuplicateActivity(id)) if id == "sample-1"
    ));
    assert!(matches!(
        session.remove_activity("nope"),
        Err(RaceError::UnknownActivity(_))
    ));
    assert_eq!(session.activities().len(), 4);
}

#[test]
fn fastest_runner_leads_mid_race() {
    let session = session_with_samples();
    let frame = session.frame_at(900.0);

    let order: Vec<&str> = frame
        .entries
        .iter()
        .map(|e| e.activity_id.as_str())
        .collect();
    assert_eq!(order, vec!["sample-4", "sample-2", "sample-1", "sample-3"]);
    assert!(frame.entries[0].is_leader);
    assert_eq!(frame.entries[0].position, 1);
    assert_eq!(frame.entries[3].position, 4);
    assert_eq!(frame.clock, "15:00");
    // frame_at does not move the clock
    assert_eq!(session.clock().current_time(), 0.0);
}

#[test]
fn frame_carries_display_strings() {
    let session = session_with_samples();
    let frame = session.frame_at(900.0);
    let sarah = frame
        .entries
        .iter()
        .find(|e| e.activity_id == "sample-1")
        .expect("entry");

    // 3200 m over 1800 s, halfway through.
    assert!((sarah.stats.distance - 1600.0).abs() < 1e-6);
    assert!((sarah.stats.speed_kmh - 6.4).abs() < 1e-6);
    assert!((sarah.stats.progress_percent - 50.0).abs() < 1e-6);
    assert_eq!(sarah.display.distance, "1.60km");
    assert_eq!(sarah.display.speed, "6.4 km/h");
    assert!(sarah.display.pace.starts_with("9:2"));
    assert_eq!(sarah.display.time, "15:00");
}

#[test]
fn race_plays_to_the_end() {
    let mut session = session_with_samples();
    session.apply(PlaybackCommand::Play).expect("play");
    session
        .apply(PlaybackCommand::Speed { speed: 5.0 })
        .expect("speed");

    let mut finished = 0;
    for _ in 0..1000 {
        if session.tick(1.0).expect("tick") == TickOutcome::Finished {
            finished += 1;
        }
    }

    assert_eq!(finished, 1);
    let frame = session.frame();
    assert_eq!(frame.current_time, 2100.0);
    assert!(!frame.is_playing);
    assert!(frame.entries.iter().all(|e| e.is_finished));
    assert!(frame.entries.iter().all(|e| !e.is_leader));
}

#[test]
fn clock_can_be_driven_directly() {
    let mut session = session_with_samples();
    session.clock_mut().play();
    session.clock_mut().set_speed(2.0);
    session.clock_mut().tick(15.0);

    let frame = session.frame();
    assert_eq!(frame.current_time, 30.0);
    assert!(frame.is_playing);
    assert_eq!(frame.playback_speed, 2.0);
}

#[test]
fn invalid_commands_leave_the_clock_alone() {
    let mut session = session_with_samples();
    session
        .apply(PlaybackCommand::Seek { time: 120.0 })
        .expect("seek");

    assert!(matches!(
        session.apply(PlaybackCommand::Speed { speed: -2.0 }),
        Err(RaceError::InvalidSpeed(_))
    ));
    assert!(matches!(
        session.apply(PlaybackCommand::Seek { time: f64::NAN }),
        Err(RaceError::InvalidTime(_))
    ));
    assert!(matches!(session.tick(-0.5), Err(RaceError::InvalidTime(_))));

    assert_eq!(session.clock().current_time(), 120.0);
    assert_eq!(session.clock().playback_speed(), 1.0);
}

#[test]
fn sessions_do_not_share_clocks() {
    let mut first = session_with_samples();
    let mut second = session_with_samples();

    first.apply(PlaybackCommand::Play).expect("play");
    first.tick(30.0).expect("tick");
    second
        .apply(PlaybackCommand::Seek { time: 500.0 })
        .expect("seek");

    assert_eq!(first.clock().current_time(), 30.0);
    assert!(first.clock().is_playing());
    assert_eq!(second.clock().current_time(), 500.0);
    assert!(!second.clock().is_playing());
}

#[test]
fn playback_commands_parse_from_json() {
    let seek: PlaybackCommand =
        serde_json::from_str(r#"{"action":"seek","time":42.5}"#).expect("seek");
    assert_eq!(seek, PlaybackCommand::Seek { time: 42.5 });

    let play: PlaybackCommand = serde_json::from_str(r#"{"action":"play"}"#).expect("play");
    assert_eq!(play, PlaybackCommand::Play);

    assert!(serde_json::from_str::<PlaybackCommand>(r#"{"action":"rewind"}"#).is_err());
}

#[test]
fn formatting() {
    assert_eq!(format_distance(850.4), "850m");
    assert_eq!(format_distance(1234.0), "1.23km");
    assert_eq!(format_speed(12.345), "12.3 km/h");
    assert_eq!(format_pace(12.0), "5:00");
    assert_eq!(format_pace(0.0), "--:--");
    assert_eq!(format_clock(65.9), "1:05");
    assert_eq!(format_clock(3725.0), "62:05");
}
