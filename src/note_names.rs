//! Tables of note spellings covering one octave.

mod tables;

use crate::note::MusicalNote;
use crate::note::DEFAULT_OCTAVE;

/// Divisions of the octave for which a built-in spelling table exists.
pub const PREDEFINED_SIZES: [usize; 11] = [12, 15, 17, 19, 22, 24, 27, 29, 31, 41, 53];

/// Ordered spellings of all notes within one octave together with a default reference note.
///
/// # Examples
///
/// ```
/// # use temper::note::{BaseNote, MusicalNote, NoteModifier};
/// # use temper::note_names::NoteNames;
/// let note_names = NoteNames::predefined(12).unwrap();
/// assert_eq!(note_names.len(), 12);
/// assert_eq!(note_names.default_reference_note().to_string(), "A");
/// assert_eq!(note_names.default_reference_note().octave, 4);
///
/// let d_sharp = MusicalNote::new(BaseNote::E, NoteModifier::Flat)
///     .with_enharmonic(BaseNote::D, NoteModifier::Sharp)
///     .with_octave(2);
/// assert_eq!(note_names.index_of(&d_sharp), Some(3));
///
/// assert!(NoteNames::predefined(13).is_none());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NoteNames {
    name: String,
    description: String,
    notes: Vec<MusicalNote>,
    default_reference_note: MusicalNote,
    stable_id: i64,
}

impl NoteNames {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        notes: Vec<MusicalNote>,
        default_reference_note: MusicalNote,
        stable_id: i64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            notes,
            default_reference_note,
            stable_id,
        }
    }

    /// Returns the built-in table for `num_notes` divisions of the octave, if one exists.
    ///
    /// The stable ID of a built-in table is `-num_notes`.
    pub fn predefined(num_notes: usize) -> Option<Self> {
        let (notes, reference_index) = tables::TABLES
            .iter()
            .find(|(notes, _)| notes.len() == num_notes)?;
        Some(Self {
            name: String::new(),
            description: String::new(),
            notes: notes.to_vec(),
            default_reference_note: notes[*reference_index].with_octave(DEFAULT_OCTAVE),
            stable_id: -(num_notes as i64),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn notes(&self) -> &[MusicalNote] {
        &self.notes
    }

    pub fn default_reference_note(&self) -> MusicalNote {
        self.default_reference_note
    }

    pub fn stable_id(&self) -> i64 {
        self.stable_id
    }

    pub fn with_stable_id(self, stable_id: i64) -> Self {
        Self { stable_id, ..self }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<MusicalNote> {
        self.notes.get(index).copied()
    }

    /// Position of `note` within the octave. The octave of `note` is ignored.
    pub fn index_of(&self, note: &MusicalNote) -> Option<usize> {
        self.notes
            .iter()
            .position(|candidate| candidate.equals_ignoring_octave(note))
    }

    pub fn has_note(&self, note: &MusicalNote) -> bool {
        self.index_of(note).is_some()
    }

    /// Exchanges primary and enharmonic spellings of all notes, including the reference note.
    ///
    /// Name, description and stable ID stay untouched since the table still describes the
    /// same notes.
    pub fn switch_enharmonics(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            notes: self
                .notes
                .iter()
                .map(|note| note.switch_enharmonic())
                .collect(),
            default_reference_note: self.default_reference_note.switch_enharmonic(),
            stable_id: self.stable_id,
        }
    }

    /// Checks if the spellings of `notes` are identical to the spellings of `self`.
    ///
    /// Octaves are not compared.
    pub fn has_same_spellings(&self, notes: &[MusicalNote]) -> bool {
        self.notes.len() == notes.len()
            && self
                .notes
                .iter()
                .zip(notes)
                .all(|(own, other)| own.equals_ignoring_octave(other))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::note::BaseNote;
    use crate::note::NoteModifier;

    use super::*;

    #[test]
    fn predefined_tables_have_expected_size_and_reference_note() {
        for num_notes in PREDEFINED_SIZES {
            let note_names = NoteNames::predefined(num_notes).unwrap();
            let reference_note = note_names.default_reference_note();

            assert_eq!(note_names.len(), num_notes);
            assert_eq!(note_names.stable_id(), -(num_notes as i64));
            assert_eq!(
                reference_note.primary.map(|s| (s.base, s.modifier)),
                Some((BaseNote::A, NoteModifier::Natural)),
                "{num_notes}"
            );
            assert_eq!(reference_note.octave, 4);
            assert!(note_names.has_note(&reference_note));
        }
    }

    #[test]
    fn predefined_tables_contain_no_duplicates() {
        for num_notes in PREDEFINED_SIZES {
            let notes = NoteNames::predefined(num_notes).unwrap().notes().to_vec();
            for (index, note) in notes.iter().enumerate() {
                assert_eq!(
                    NoteNames::predefined(num_notes).unwrap().index_of(note),
                    Some(index),
                    "{note} in {num_notes}"
                );
            }
        }
    }

    #[test]
    fn unsupported_sizes() {
        for num_notes in [0, 1, 7, 13, 14, 16, 18, 20, 23, 30, 72] {
            assert!(NoteNames::predefined(num_notes).is_none());
        }
    }

    #[test]
    fn spelling_of_19_edo() {
        let spellings: Vec<_> = NoteNames::predefined(19)
            .unwrap()
            .notes()
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            spellings,
            [
                "C", "C#", "Db", "D", "D#", "Eb", "E", "E#/Fb", "F", "F#", "Gb", "G", "G#", "Ab",
                "A", "A#", "Bb", "B", "B#/Cb+1"
            ]
        );
    }

    #[test]
    fn switch_enharmonics_is_involutive() {
        for num_notes in PREDEFINED_SIZES {
            let note_names = NoteNames::predefined(num_notes).unwrap();
            let switched = note_names.switch_enharmonics();

            assert_eq!(switched.name(), note_names.name());
            assert_eq!(switched.stable_id(), note_names.stable_id());
            assert_eq!(switched.switch_enharmonics(), note_names);
        }

        let switched = NoteNames::predefined(12).unwrap().switch_enharmonics();
        assert_eq!(switched.get(1).unwrap().to_string(), "Db/C#");
        assert_eq!(switched.get(0).unwrap().to_string(), "C");
    }

    #[test]
    fn same_spellings_ignore_octaves() {
        let note_names = NoteNames::predefined(12).unwrap();
        let mut notes: Vec<_> = note_names
            .notes()
            .iter()
            .map(|note| note.with_octave(2))
            .collect();

        assert!(note_names.has_same_spellings(&notes));

        notes[1] = notes[1].switch_enharmonic();
        assert!(!note_names.has_same_spellings(&notes));
        assert!(!note_names.has_same_spellings(&notes[..11]));
    }
}
