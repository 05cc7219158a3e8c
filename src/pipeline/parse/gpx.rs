use crate::error::ParseError;
use crate::pipeline::parse::Parser;
use crate::types::activity::{ParsedTrack, TrackPoint};
use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

pub struct GpxParser;

impl Parser for GpxParser {
    fn parse(&self, bytes: &[u8]) -> Result<ParsedTrack, ParseError> {
        let mut reader = Reader::from_reader(bytes);
        reader.trim_text(true);

        let mut points = Vec::new();
        let mut trkpt_count = 0usize;
        let mut track_name: Option<String> = None;
        let mut in_trkpt = false;
        let mut current_point: Option<TrackPoint> = None;
        let mut current_element = String::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = local_name(&e)?;
                    if name == "trkpt" {
                        trkpt_count += 1;
                        in_trkpt = true;
                        current_point = read_trkpt(&e)?;
                    } else {
                        current_element = name;
                    }
                }
                Ok(Event::Empty(e)) => {
                    // <trkpt lat=".." lon=".."/> carries no children
                    if local_name(&e)? == "trkpt" {
                        trkpt_count += 1;
                        if let Some(point) = read_trkpt(&e)? {
                            points.push(point);
                        }
                    }
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| ParseError::InvalidGpx(e.to_string()))?;
                    read_text(
                        &text,
                        &current_element,
                        in_trkpt,
                        current_point.as_mut(),
                        &mut track_name,
                    );
                }
                Ok(Event::CData(e)) => {
                    let text = std::str::from_utf8(&e)
                        .map_err(|e| ParseError::InvalidGpx(e.to_string()))?;
                    read_text(
                        text,
                        &current_element,
                        in_trkpt,
                        current_point.as_mut(),
                        &mut track_name,
                    );
                }
                Ok(Event::End(e)) => {
                    let name = e.local_name();
                    let name_str = std::str::from_utf8(name.as_ref())
                        .map_err(|e| ParseError::InvalidGpx(e.to_string()))?;

                    if name_str == "trkpt" {
                        if let Some(point) = current_point.take() {
                            points.push(point);
                        }
                        in_trkpt = false;
                    }
                    current_element.clear();
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(ParseError::InvalidGpx(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        if trkpt_count == 0 {
            return Err(ParseError::EmptyFile);
        }
        if points.is_empty() {
            return Err(ParseError::NoValidPoints);
        }

        Ok(ParsedTrack {
            name: track_name,
            points,
        })
    }
}

fn read_text(
    text: &str,
    element: &str,
    in_trkpt: bool,
    point: Option<&mut TrackPoint>,
    track_name: &mut Option<String>,
) {
    let text = text.trim();
    if in_trkpt {
        if let Some(point) = point {
            match element {
                "ele" => point.elevation = text.parse().ok(),
                "time" => point.time = parse_time(text),
                _ => {}
            }
        }
    } else if element == "name" && track_name.is_none() && !text.is_empty() {
        *track_name = Some(text.to_string());
    }
}

/// xsd:dateTime allows a missing offset; those timestamps are read as UTC.
fn parse_time(text: &str) -> Option<DateTime<Utc>> {
    text.parse::<DateTime<Utc>>()
        .ok()
        .or_else(|| text.parse::<NaiveDateTime>().ok().map(|t| t.and_utc()))
}

fn local_name(e: &BytesStart<'_>) -> Result<String, ParseError> {
    let name = e.local_name();
    std::str::from_utf8(name.as_ref())
        .map(str::to_string)
        .map_err(|e| ParseError::InvalidGpx(e.to_string()))
}

/// Reads the coordinates of a `trkpt`. Missing, unparseable or `(0, 0)`
/// coordinates mean the receiver had no fix, so the point is dropped.
fn read_trkpt(e: &BytesStart<'_>) -> Result<Option<TrackPoint>, ParseError> {
    let mut lat: Option<f64> = None;
    let mut lng: Option<f64> = None;

    for attr in e.attributes() {
        let attr = attr.map_err(|e| ParseError::InvalidGpx(e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| ParseError::InvalidGpx(e.to_string()))?;
        let value = std::str::from_utf8(&attr.value)
            .map_err(|e| ParseError::InvalidGpx(e.to_string()))?;

        match key {
            "lat" => lat = value.trim().parse().ok(),
            "lon" => lng = value.trim().parse().ok(),
            _ => {}
        }
    }

    let (Some(lat), Some(lng)) = (lat, lng) else {
        return Ok(None);
    };
    if !lat.is_finite() || !lng.is_finite() || (lat == 0.0 && lng == 0.0) {
        return Ok(None);
    }

    Ok(Some(TrackPoint {
        lat,
        lng,
        elevation: None,
        time: None,
    }))
}
