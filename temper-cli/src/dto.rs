use serde::Deserialize;
use serde::Serialize;

use crate::error::ResultExt;
use crate::CliResult;

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum TemperDto {
    Scale(ScaleDto),
    Check(CheckDto),
}

impl TemperDto {
    pub fn to_yaml(&self) -> CliResult<String> {
        serde_yaml::to_string(self).handle_error("Could not serialize output")
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ScaleDto {
    pub temperament: String,
    pub abbreviation: String,
    pub num_notes_per_octave: usize,
    pub reference_note: String,
    pub root_note: String,
    pub reference_frequency_in_hz: f64,
    pub items: Vec<ScaleItemDto>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ScaleItemDto {
    pub note_index: i32,
    pub note: String,
    pub octave: i32,
    pub frequency_in_hz: f64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CheckDto {
    pub file_check: String,
    pub version: Option<String>,
    pub temperaments: Vec<CheckedTemperamentDto>,
}

/// Line numbers are zero-based positions in `note_lines`, i.e. the unison is line 0.
#[derive(Debug, Deserialize, Serialize)]
pub struct CheckedTemperamentDto {
    pub name: String,
    pub abbreviation: String,
    pub num_notes_per_octave: usize,
    pub value_ordering: String,
    pub unordered_lines: Vec<usize>,
    pub note_name_error: String,
    pub duplicate_note_lines: Vec<usize>,
    pub has_errors: bool,
}
