//! In-memory collection of predefined and custom temperaments plus the active scale.

use crate::editable::EditableTemperament;
use crate::note::MusicalNote;
use crate::note_names::NoteNames;
use crate::scale::MusicalScale;
use crate::scale::MusicalScaleBuilder;
use crate::scale::ScaleBuildError;
use crate::scale::StretchTuning;
use crate::temperament::predefined_temperaments;
use crate::temperament::Temperament;
use crate::temperament::TemperamentWithNoteNames;

/// Parameters to change in [`TemperamentStore::set_scale`]. `None` keeps or derives the current
/// value.
#[derive(Clone, Debug, Default)]
pub struct ScaleUpdate {
    pub temperament: Option<TemperamentWithNoteNames>,
    pub reference_note: Option<MusicalNote>,
    pub root_note: Option<MusicalNote>,
    pub reference_frequency: Option<f64>,
    pub stretch_tuning: Option<StretchTuning>,
}

/// Predefined temperaments, user-defined temperaments and the scale currently in use.
///
/// Predefined temperaments have negative stable IDs, custom temperaments receive positive ones.
///
/// # Examples
///
/// ```
/// # use temper::store::{ScaleUpdate, TemperamentStore};
/// # use temper::temperament::{Temperament, TemperamentWithNoteNames};
/// let mut store = TemperamentStore::with_default_scale().unwrap();
/// assert_eq!(store.musical_scale().temperament().abbreviation(), "EDO12");
///
/// let edo7 = Temperament::equal_division(7).with_name("7-EDO", "EDO7", "");
/// store.append(vec![TemperamentWithNoteNames::new(edo7, None)]);
/// assert_eq!(store.custom_temperaments()[0].stable_id(), Some(1));
///
/// let edo19 = store.predefined_temperaments()[2].clone();
/// store
///     .set_scale(ScaleUpdate {
///         temperament: Some(edo19),
///         reference_frequency: Some(442.0),
///         ..Default::default()
///     })
///     .unwrap();
/// assert_eq!(store.musical_scale().num_notes_per_octave(), 19);
/// assert_eq!(store.musical_scale().frequency(0), Some(442.0));
/// ```
#[derive(Clone, Debug)]
pub struct TemperamentStore {
    predefined: Vec<TemperamentWithNoteNames>,
    custom: Vec<TemperamentWithNoteNames>,
    musical_scale: MusicalScale,
}

impl TemperamentStore {
    pub fn new(musical_scale: MusicalScale) -> Self {
        Self {
            predefined: predefined_temperaments()
                .into_iter()
                .map(|temperament| TemperamentWithNoteNames::new(temperament, None))
                .collect(),
            custom: Vec::new(),
            musical_scale,
        }
    }

    /// Store whose active scale is built by [`TemperamentStore::default_scale_builder`].
    pub fn with_default_scale() -> Result<Self, ScaleBuildError> {
        Ok(Self::new(Self::default_scale_builder().build()?))
    }

    /// Builder for the factory default scale: the first 12-step equal temperament of the
    /// database with default note names, reference pitch and frequency range.
    pub fn default_scale_builder() -> MusicalScaleBuilder {
        let temperament = predefined_temperaments()
            .into_iter()
            .find(is_twelve_tone_equal)
            .unwrap_or_else(|| Temperament::equal_division(12));
        MusicalScale::builder(temperament)
    }

    pub fn predefined_temperaments(&self) -> &[TemperamentWithNoteNames] {
        &self.predefined
    }

    pub fn custom_temperaments(&self) -> &[TemperamentWithNoteNames] {
        &self.custom
    }

    /// Predefined temperaments followed by custom temperaments.
    pub fn temperaments(&self) -> impl Iterator<Item = &TemperamentWithNoteNames> {
        self.predefined.iter().chain(&self.custom)
    }

    pub fn default_temperament(&self) -> &TemperamentWithNoteNames {
        self.predefined
            .iter()
            .find(|predefined| is_twelve_tone_equal(&predefined.temperament))
            .unwrap_or(&self.predefined[0])
    }

    pub fn find(&self, stable_id: i64) -> Option<&TemperamentWithNoteNames> {
        self.temperaments()
            .find(|temperament| temperament.stable_id() == Some(stable_id))
    }

    /// Editable lines of a stored temperament, e.g. as template for a new custom temperament.
    pub fn editable_temperament(&self, stable_id: i64) -> Option<EditableTemperament> {
        self.find(stable_id)
            .map(EditableTemperament::from_temperament)
    }

    pub fn musical_scale(&self) -> &MusicalScale {
        &self.musical_scale
    }

    pub fn set_musical_scale(&mut self, musical_scale: MusicalScale) {
        self.musical_scale = musical_scale;
    }

    /// Rebuilds the active scale with some parameters replaced.
    ///
    /// The note names are taken from the new temperament, else from the current scale if the
    /// number of notes agrees, else from the built-in table. Reference and root note survive if
    /// they exist in the resolved note names. On error the active scale remains unchanged.
    pub fn set_scale(&mut self, update: ScaleUpdate) -> Result<(), ScaleBuildError> {
        let current = &self.musical_scale;
        let (temperament, own_note_names) = match update.temperament {
            Some(with_names) => (with_names.temperament, with_names.note_names),
            None => (current.temperament().clone(), None),
        };

        let note_names = match own_note_names {
            Some(note_names) => Some(note_names),
            None if current.num_notes_per_octave() == temperament.num_notes_per_octave() => {
                Some(current.note_names().clone())
            }
            None => NoteNames::predefined(temperament.num_notes_per_octave()),
        };
        let keep_if_known = |note: MusicalNote| {
            note_names
                .as_ref()
                .map_or(false, |note_names| note_names.has_note(&note))
                .then_some(note)
        };
        let reference_note = update
            .reference_note
            .or_else(|| keep_if_known(current.reference_note()));
        let root_note = update
            .root_note
            .or_else(|| keep_if_known(current.root_note()));

        let musical_scale = MusicalScale::builder(temperament)
            .note_names(note_names)
            .reference_note(reference_note)
            .root_note(root_note)
            .reference_frequency(
                update
                    .reference_frequency
                    .unwrap_or(current.reference_frequency()),
            )
            .frequency_range(current.frequency_min(), current.frequency_max())
            .stretch_tuning(update.stretch_tuning.unwrap_or(current.stretch_tuning()))
            .build()?;

        self.musical_scale = musical_scale;
        Ok(())
    }

    /// Replaces the custom temperaments.
    ///
    /// If the list contains the active temperament, the active scale is rebuilt from it. If this
    /// fails, the store falls back to the default temperament.
    pub fn write_custom_temperaments(&mut self, temperaments: Vec<TemperamentWithNoteNames>) {
        let active_id = self.active_stable_id();
        let active = temperaments
            .iter()
            .find(|temperament| active_id.is_some() && temperament.stable_id() == active_id)
            .cloned();
        self.custom = temperaments;

        if let Some(active) = active {
            log::debug!("Updating active scale from temperament {active_id:?}");
            let update = ScaleUpdate {
                temperament: Some(active),
                ..Default::default()
            };
            if let Err(error) = self.set_scale(update) {
                log::warn!(
                    "Cannot build scale from modified temperament ({error:?}), using default"
                );
                self.activate_default_temperament();
            }
        }
    }

    /// Adds `temperament` if its stable ID is unknown or absent, else replaces the existing one.
    pub fn add_new_or_replace(&mut self, temperament: TemperamentWithNoteNames) {
        let mut custom = self.custom.clone();
        match temperament.stable_id().and_then(|stable_id| {
            custom
                .iter()
                .position(|existing| existing.stable_id() == Some(stable_id))
        }) {
            Some(index) => custom[index] = temperament,
            None => {
                let temperament = match temperament.stable_id() {
                    Some(_) => temperament,
                    None => temperament.with_stable_id(self.new_stable_id(&custom)),
                };
                custom.push(temperament);
            }
        }
        self.write_custom_temperaments(custom);
    }

    /// Adds `temperaments` at the end of the custom list, each with a new stable ID.
    pub fn append(&mut self, temperaments: Vec<TemperamentWithNoteNames>) {
        let mut custom = self.custom.clone();
        for temperament in temperaments {
            let stable_id = self.new_stable_id(&custom);
            custom.push(temperament.with_stable_id(stable_id));
        }
        self.write_custom_temperaments(custom);
    }

    /// Adds `temperaments` in front of the custom list, each with a new stable ID.
    pub fn prepend(&mut self, temperaments: Vec<TemperamentWithNoteNames>) {
        let mut custom = self.custom.clone();
        for (index, temperament) in temperaments.into_iter().enumerate() {
            let stable_id = self.new_stable_id(&custom);
            custom.insert(index, temperament.with_stable_id(stable_id));
        }
        self.write_custom_temperaments(custom);
    }

    /// Replaces the custom list, numbering the stable IDs 1, 2, ... but skipping the ID of the
    /// active temperament.
    pub fn replace_all(&mut self, temperaments: Vec<TemperamentWithNoteNames>) {
        let active_id = self.active_stable_id();
        let mut stable_id = 0;
        let custom = temperaments
            .into_iter()
            .map(|temperament| {
                stable_id += 1;
                if Some(stable_id) == active_id {
                    stable_id += 1;
                }
                temperament.with_stable_id(stable_id)
            })
            .collect();
        self.write_custom_temperaments(custom);
    }

    /// Removes the custom temperaments with the given stable IDs.
    ///
    /// Removing the active temperament activates the default temperament.
    pub fn remove(&mut self, stable_ids: &[i64]) {
        let custom = self
            .custom
            .iter()
            .filter(|temperament| {
                !temperament
                    .stable_id()
                    .map_or(false, |stable_id| stable_ids.contains(&stable_id))
            })
            .cloned()
            .collect();
        self.write_custom_temperaments(custom);

        if self
            .active_stable_id()
            .map_or(false, |stable_id| stable_ids.contains(&stable_id) && stable_id > 0)
        {
            log::debug!("Active temperament removed, using default");
            self.activate_default_temperament();
        }
    }

    fn active_stable_id(&self) -> Option<i64> {
        self.musical_scale.temperament().stable_id()
    }

    /// One above the largest ID in use, skipping the ID of the active temperament.
    fn new_stable_id(&self, existing: &[TemperamentWithNoteNames]) -> i64 {
        let active_id = self.active_stable_id();
        let mut stable_id = existing
            .iter()
            .filter_map(TemperamentWithNoteNames::stable_id)
            .fold(0, i64::max)
            + 1;
        while Some(stable_id) == active_id {
            stable_id += 1;
        }
        log::debug!("Assigning stable ID {stable_id}");
        stable_id
    }

    fn activate_default_temperament(&mut self) {
        let update = ScaleUpdate {
            temperament: Some(self.default_temperament().clone()),
            ..Default::default()
        };
        if let Err(error) = self.set_scale(update) {
            log::warn!("Cannot build default scale ({error:?}), keeping previous scale");
        }
    }
}

fn is_twelve_tone_equal(temperament: &Temperament) -> bool {
    temperament.equal_division_count() == Some(12)
}
