use racereplay_rs::error::ParseError;
use racereplay_rs::pipeline::geo::{haversine_distance, EARTH_RADIUS_M};
use racereplay_rs::pipeline::ingest::{from_gpx, from_strava, DEFAULT_ATHLETE_NAME};
use racereplay_rs::types::palette::Palette;
use racereplay_rs::types::strava::{
    StravaAthlete, StravaDetailedActivity, StravaStream, StravaStreamSet,
};

/// Latitude step that covers 1 km along a meridian.
fn km_in_degrees() -> f64 {
    (1000.0 / EARTH_RADIUS_M).to_degrees()
}

fn three_point_gpx() -> String {
    let step = km_in_degrees();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test">
  <metadata><name>Meridian Run</name></metadata>
  <trk><trkseg>
    <trkpt lat="45.0" lon="7.0"><ele>200</ele><time>2026-03-01T08:00:00Z</time></trkpt>
    <trkpt lat="{}" lon="7.0"><ele>210</ele><time>2026-03-01T08:01:00Z</time></trkpt>
    <trkpt lat="{}" lon="7.0"><ele>205</ele><time>2026-03-01T08:02:00Z</time></trkpt>
  </trkseg></trk>
</gpx>"#,
        45.0 + step,
        45.0 + 2.0 * step
    )
}

#[test]
fn gpx_points_a_kilometer_apart_sum_to_two_kilometers() {
    let activity = from_gpx(three_point_gpx().as_bytes(), Some("Rider")).expect("activity");

    assert!((activity.total_distance() - 2000.0).abs() < 20.0);
    assert_eq!(activity.total_time(), 120.0);
    assert_eq!(activity.name(), "Meridian Run");
    assert_eq!(activity.athlete().name, "Rider");
    assert!(Palette::upload()
        .colors
        .contains(&activity.athlete().color.as_str()));

    let points = activity.points();
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].time, 0.0);
    assert_eq!(points[1].time, 60.0);
    assert_eq!(points[0].distance, Some(0.0));
    assert_eq!(points[2].elevation, Some(205.0));
    assert_eq!(
        activity.start_time().to_rfc3339(),
        "2026-03-01T08:00:00+00:00"
    );
}

#[test]
fn gpx_without_timestamps_uses_one_sample_per_second() {
    let gpx = r#"<gpx><trk><trkseg>
        <trkpt lat="10.0" lon="20.0"/>
        <trkpt lat="10.001" lon="20.0"/>
        <trkpt lat="10.002" lon="20.0"/>
    </trkseg></trk></gpx>"#;
    let activity = from_gpx(gpx.as_bytes(), None).expect("activity");

    let times: Vec<f64> = activity.points().iter().map(|p| p.time).collect();
    assert_eq!(times, vec![0.0, 1.0, 2.0]);
    assert_eq!(activity.total_time(), 2.0);
    assert_eq!(activity.name(), "GPX Activity");
    assert_eq!(activity.athlete().name, DEFAULT_ATHLETE_NAME);
}

#[test]
fn gpx_drops_points_without_a_fix() {
    let gpx = r#"<gpx><trk><trkseg>
        <trkpt lat="0" lon="0"><time>2026-03-01T08:00:00Z</time></trkpt>
        <trkpt lat="10.0" lon="20.0"><time>2026-03-01T08:00:05Z</time></trkpt>
        <trkpt lat="abc" lon="20.0"><time>2026-03-01T08:00:06Z</time></trkpt>
        <trkpt lat="10.001" lon="20.0"><time>2026-03-01T08:00:10Z</time></trkpt>
    </trkseg></trk></gpx>"#;
    let activity = from_gpx(gpx.as_bytes(), None).expect("activity");

    assert_eq!(activity.points().len(), 2);
    assert_eq!(activity.points()[0].time, 0.0);
    assert_eq!(activity.total_time(), 5.0);
}

#[test]
fn gpx_timestamps_without_offset_are_utc() {
    let gpx = r#"<gpx><trk><trkseg>
        <trkpt lat="45.0" lon="7.0"><time>2024-01-01T10:00:00</time></trkpt>
        <trkpt lat="45.001" lon="7.0"><time>2024-01-01T10:01:00</time></trkpt>
        <trkpt lat="45.002" lon="7.0"><time>2024-01-01T10:02:00.500</time></trkpt>
    </trkseg></trk></gpx>"#;
    let activity = from_gpx(gpx.as_bytes(), None).expect("activity");

    let times: Vec<f64> = activity.points().iter().map(|p| p.time).collect();
    assert_eq!(times, vec![0.0, 60.0, 120.0]);
    assert_eq!(activity.total_time(), 120.0);
    assert_eq!(
        activity.start_time().to_rfc3339(),
        "2024-01-01T10:00:00+00:00"
    );
}

#[test]
fn gpx_name_in_cdata_is_read() {
    let gpx = r#"<gpx><trk><name><![CDATA[Hills & Valleys]]></name><trkseg>
        <trkpt lat="45.0" lon="7.0"/>
        <trkpt lat="45.001" lon="7.0"/>
    </trkseg></trk></gpx>"#;
    let activity = from_gpx(gpx.as_bytes(), None).expect("activity");
    assert_eq!(activity.name(), "Hills & Valleys");
}

#[test]
fn gpx_without_usable_points_fails() {
    let no_points = r#"<gpx><trk><trkseg></trkseg></trk></gpx>"#;
    assert!(matches!(
        from_gpx(no_points.as_bytes(), None),
        Err(ParseError::EmptyFile)
    ));

    let only_zeros = r#"<gpx><trk><trkseg><trkpt lat="0" lon="0"/></trkseg></trk></gpx>"#;
    assert!(matches!(
        from_gpx(only_zeros.as_bytes(), None),
        Err(ParseError::NoValidPoints)
    ));
}

#[test]
fn malformed_gpx_fails() {
    let broken = r#"<gpx><trk><trkseg><trkpt lat="1" lon="1"></trkseg></gpx>"#;
    assert!(matches!(
        from_gpx(broken.as_bytes(), None),
        Err(ParseError::InvalidGpx(_))
    ));
}

#[test]
fn gpx_with_backwards_timestamps_fails() {
    let gpx = r#"<gpx><trk><trkseg>
        <trkpt lat="10.0" lon="20.0"><time>2026-03-01T08:00:10Z</time></trkpt>
        <trkpt lat="10.001" lon="20.0"><time>2026-03-01T08:00:00Z</time></trkpt>
    </trkseg></trk></gpx>"#;
    assert!(matches!(
        from_gpx(gpx.as_bytes(), None),
        Err(ParseError::TimeOutOfOrder(1))
    ));
}

#[test]
fn haversine_matches_known_distance() {
    let london_paris = haversine_distance(51.5074, -0.1278, 48.8566, 2.3522);
    assert!((london_paris - 343_560.0).abs() < 1000.0);
    assert_eq!(haversine_distance(45.0, 7.0, 45.0, 7.0), 0.0);
}

fn record(athlete_id: u64) -> StravaDetailedActivity {
    StravaDetailedActivity {
        id: 987654321,
        name: "Lunch Ride".to_string(),
        distance: 1234.0,
        start_date: None,
        athlete: StravaAthlete {
            id: athlete_id,
            firstname: Some("Jo".to_string()),
            lastname: Some("Smith ".to_string()),
        },
    }
}

fn stream<T>(data: Vec<T>) -> Option<StravaStream<T>> {
    Some(StravaStream { data })
}

#[test]
fn strava_streams_are_zipped_by_index() {
    let streams = StravaStreamSet {
        latlng: stream(vec![[45.0, 7.0], [45.001, 7.0], [45.002, 7.0]]),
        time: stream(vec![5.0, 15.0, 25.0]),
        distance: stream(vec![0.0, 110.0, 220.0]),
        altitude: stream(vec![300.0, 301.0]),
    };
    let activity = from_strava(&record(40), &streams).expect("activity");

    let points = activity.points();
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].time, 0.0);
    assert_eq!(points[2].time, 20.0);
    assert_eq!(points[1].distance, Some(110.0));
    assert_eq!(points[1].elevation, Some(301.0));
    assert_eq!(points[2].elevation, None);
    assert_eq!(activity.total_distance(), 220.0);
    assert_eq!(activity.total_time(), 20.0);
    assert_eq!(activity.id(), "987654321");
    assert_eq!(activity.athlete().name, "Jo Smith");
    assert_eq!(activity.athlete().id, "40");
    // 40 mod 32 == 8
    assert_eq!(activity.athlete().color, "#E74C3C");
}

#[test]
fn strava_color_is_stable_per_athlete() {
    let streams = StravaStreamSet {
        latlng: stream(vec![[45.0, 7.0], [45.001, 7.0]]),
        ..Default::default()
    };
    let first = from_strava(&record(7), &streams).expect("activity");
    let second = from_strava(&record(7), &streams).expect("activity");
    assert_eq!(first.athlete().color, second.athlete().color);
}

#[test]
fn strava_missing_auxiliary_streams_leave_fields_empty() {
    let streams = StravaStreamSet {
        latlng: stream(vec![[45.0, 7.0], [45.001, 7.0], [45.002, 7.0]]),
        ..Default::default()
    };
    let mut unnamed = record(1);
    unnamed.athlete.firstname = None;
    unnamed.athlete.lastname = None;
    let activity = from_strava(&unnamed, &streams).expect("activity");

    let times: Vec<f64> = activity.points().iter().map(|p| p.time).collect();
    assert_eq!(times, vec![0.0, 1.0, 2.0]);
    assert!(activity.points().iter().all(|p| p.distance.is_none()));
    assert!(activity.points().iter().all(|p| p.elevation.is_none()));
    assert_eq!(activity.total_distance(), 1234.0);
    assert_eq!(activity.athlete().name, "Unknown Athlete");
}

#[test]
fn strava_without_coordinates_fails() {
    let streams = StravaStreamSet {
        time: stream(vec![0.0, 1.0]),
        ..Default::default()
    };
    assert!(matches!(
        from_strava(&record(1), &streams),
        Err(ParseError::EmptyFile)
    ));

    let zeros = StravaStreamSet {
        latlng: stream(vec![[0.0, 0.0]]),
        ..Default::default()
    };
    assert!(matches!(
        from_strava(&record(1), &zeros),
        Err(ParseError::NoValidPoints)
    ));
}

#[test]
fn strava_stream_json_deserializes() {
    let json = r#"{
        "latlng": {"type": "latlng", "data": [[45.0, 7.0], [45.001, 7.0]], "series_type": "distance", "original_size": 2, "resolution": "medium"},
        "time": {"type": "time", "data": [0, 4], "series_type": "distance", "original_size": 2, "resolution": "medium"}
    }"#;
    let streams: StravaStreamSet = serde_json::from_str(json).expect("streams");
    assert_eq!(streams.latlng.as_ref().map(|s| s.data.len()), Some(2));
    assert!(streams.distance.is_none());

    let activity = from_strava(&record(3), &streams).expect("activity");
    assert_eq!(activity.total_time(), 4.0);
}
