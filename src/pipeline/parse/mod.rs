mod gpx;

use crate::error::ParseError;
use crate::types::activity::{FileFormat, ParsedTrack};

pub trait Parser {
    fn parse(&self, bytes: &[u8]) -> Result<ParsedTrack, ParseError>;
}

pub fn parse(bytes: &[u8], format: FileFormat) -> Result<ParsedTrack, ParseError> {
    match format {
        FileFormat::Gpx => gpx::GpxParser.parse(bytes),
    }
}
