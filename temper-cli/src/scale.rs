use clap::Args;
use temper::note::{MusicalNote, DEFAULT_OCTAVE};
use temper::note_names::NoteNames;
use temper::scale::{defaults, MusicalScale};
use temper::store::{ScaleUpdate, TemperamentStore};
use temper::temperament::TemperamentWithNoteNames;
use temper::tuning::Tuning;

use crate::dto::{ScaleDto, ScaleItemDto, TemperDto};
use crate::error::ResultExt;
use crate::temperaments::CustomOptions;
use crate::{App, CliResult};

#[derive(Args)]
pub(crate) struct ScaleOptions {
    /// Stable ID or abbreviation of the temperament [default: 12-EDO]
    #[arg(long = "temperament", allow_negative_numbers = true)]
    temperament: Option<String>,

    #[command(flatten)]
    custom: CustomOptions,

    /// Frequency of the reference note in Hz
    #[arg(long = "ref-freq", env = "TEMPER_REF_FREQ", default_value_t = defaults::REFERENCE_FREQUENCY)]
    reference_frequency: f64,

    /// Lowest frequency of the scale in Hz
    #[arg(long = "min-freq", env = "TEMPER_MIN_FREQ", default_value_t = defaults::FREQUENCY_MIN)]
    frequency_min: f64,

    /// Highest frequency of the scale in Hz
    #[arg(long = "max-freq", env = "TEMPER_MAX_FREQ", default_value_t = defaults::FREQUENCY_MAX)]
    frequency_max: f64,

    /// Spelling of the reference note, e.g. A or C#/Db [default: depends on the note names]
    #[arg(long = "ref-note")]
    reference_note: Option<String>,

    /// Octave of the reference note
    #[arg(long = "ref-octave", allow_negative_numbers = true)]
    reference_octave: Option<i32>,

    /// Spelling of the note the temperament starts at [default: first note name]
    #[arg(long = "root")]
    root_note: Option<String>,
}

impl ScaleOptions {
    pub fn to_scale(&self) -> CliResult<MusicalScale> {
        let builder = TemperamentStore::default_scale_builder()
            .frequency_range(self.frequency_min, self.frequency_max);
        let mut store = self.custom.create_store(builder)?;

        let temperament = self.select_temperament(&store)?;
        let note_names = temperament.resolved_note_names();

        let reference_note = match (&self.reference_note, self.reference_octave) {
            (None, None) => None,
            (spelling, octave) => {
                let note_names = require_note_names(&temperament, note_names.as_ref())?;
                let note = match spelling {
                    Some(spelling) => resolve_note(note_names, spelling)?,
                    None => note_names.default_reference_note(),
                };
                Some(note.with_octave(octave.unwrap_or(DEFAULT_OCTAVE)))
            }
        };
        let root_note = match &self.root_note {
            Some(spelling) => Some(resolve_note(
                require_note_names(&temperament, note_names.as_ref())?,
                spelling,
            )?),
            None => None,
        };

        store.set_scale(ScaleUpdate {
            temperament: Some(temperament),
            reference_note,
            root_note,
            reference_frequency: Some(self.reference_frequency),
            stretch_tuning: None,
        })?;
        Ok(store.musical_scale().clone())
    }

    fn select_temperament(&self, store: &TemperamentStore) -> CliResult<TemperamentWithNoteNames> {
        let Some(selector) = &self.temperament else {
            return Ok(store.default_temperament().clone());
        };
        let found = match selector.parse::<i64>() {
            Ok(stable_id) => store.find(stable_id),
            Err(_) => store.temperaments().find(|temperament| {
                temperament
                    .temperament
                    .abbreviation()
                    .eq_ignore_ascii_case(selector)
            }),
        };
        found
            .cloned()
            .handle_error(&format!("Unknown temperament '{selector}'"))
    }
}

fn require_note_names<'a>(
    temperament: &TemperamentWithNoteNames,
    note_names: Option<&'a NoteNames>,
) -> CliResult<&'a NoteNames> {
    note_names.handle_error(&format!(
        "No note names available for {} notes per octave",
        temperament.temperament.num_notes_per_octave()
    ))
}

/// Looks up the table entry that contains `spelling`, so `Db` selects the entry `C#/Db`.
fn resolve_note(note_names: &NoteNames, spelling: &str) -> CliResult<MusicalNote> {
    let requested: MusicalNote = spelling.parse()?;
    note_names
        .notes()
        .iter()
        .find(|candidate| candidate.matches(&requested, true))
        .copied()
        .handle_error(&format!("Note '{spelling}' is not part of the note names"))
}

#[derive(Args)]
pub(crate) struct NotesOptions {
    /// Number of notes per octave
    num_notes: usize,
}

impl NotesOptions {
    pub fn run(&self, app: &mut App) -> CliResult {
        let note_names = NoteNames::predefined(self.num_notes).handle_error(&format!(
            "No note names available for {} notes per octave",
            self.num_notes
        ))?;
        let reference_note = note_names.default_reference_note();

        for (index, note) in note_names.notes().iter().enumerate() {
            let marker = if note.equals_ignoring_octave(&reference_note) {
                "  (reference)"
            } else {
                ""
            };
            app.writeln(format_args!("{index:>2}  {note}{marker}"))?;
        }
        Ok(())
    }
}

#[derive(Args)]
pub(crate) struct DumpOptions {
    #[command(flatten)]
    scale: ScaleOptions,
}

impl DumpOptions {
    pub fn run(&self, app: &mut App) -> CliResult {
        let scale = self.scale.to_scale()?;
        let temperament = scale.temperament();

        let items = (scale.note_index_begin()..scale.note_index_end())
            .filter_map(|note_index| {
                let note = scale.note(note_index);
                Some(ScaleItemDto {
                    note_index,
                    note: note.to_string(),
                    octave: note.octave,
                    frequency_in_hz: scale.frequency(note_index)?,
                })
            })
            .collect();

        let dto = TemperDto::Scale(ScaleDto {
            temperament: temperament.name().to_owned(),
            abbreviation: temperament.abbreviation().to_owned(),
            num_notes_per_octave: scale.num_notes_per_octave(),
            reference_note: format!("{:#}", scale.reference_note()),
            root_note: scale.root_note().to_string(),
            reference_frequency_in_hz: scale.reference_frequency(),
            items,
        });
        app.write(dto.to_yaml()?)?;
        Ok(())
    }
}

#[derive(Args)]
pub(crate) struct FindOptions {
    /// Frequency in Hz
    frequency: f64,

    #[command(flatten)]
    scale: ScaleOptions,
}

impl FindOptions {
    pub fn run(&self, app: &mut App) -> CliResult {
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(format!("Invalid frequency {}", self.frequency).into());
        }

        let scale = self.scale.to_scale()?;
        let approximation = scale.find_by_frequency(self.frequency);
        let note_index = approximation.approx_value;

        app.writeln(format_args!(
            "Closest note: {:#} (index {note_index})",
            scale.note(note_index)
        ))?;
        if let Some(frequency) = scale.frequency(note_index) {
            app.writeln(format_args!("Frequency: {frequency:.3} Hz"))?;
        }
        app.writeln(format_args!(
            "Fractional index: {:.3}",
            scale.frequency_index(self.frequency)
        ))?;
        app.writeln(format_args!(
            "Deviation: {:+.2} cents",
            approximation.deviation.as_cents()
        ))?;
        Ok(())
    }
}
