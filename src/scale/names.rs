use crate::math;
use crate::note::MusicalNote;
use crate::note_names::NoteNames;

/// Maps note indices relative to a reference note to spelled notes and back.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleNoteNames {
    note_names: NoteNames,
    reference_note: MusicalNote,
    reference_index_within_octave: usize,
}

impl ScaleNoteNames {
    /// Returns `None` if `reference_note` is not part of `note_names`.
    pub fn new(note_names: NoteNames, reference_note: MusicalNote) -> Option<Self> {
        let reference_index_within_octave = note_names.index_of(&reference_note)?;
        Some(Self {
            note_names,
            reference_note,
            reference_index_within_octave,
        })
    }

    pub fn note_names(&self) -> &NoteNames {
        &self.note_names
    }

    pub fn reference_note(&self) -> MusicalNote {
        self.reference_note
    }

    pub fn len(&self) -> usize {
        self.note_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.note_names.is_empty()
    }

    /// The note at `note_index`, where index 0 is the reference note.
    ///
    /// # Examples
    ///
    /// ```
    /// # use temper::note_names::NoteNames;
    /// # use temper::scale::ScaleNoteNames;
    /// let note_names = NoteNames::predefined(12).unwrap();
    /// let reference_note = note_names.default_reference_note();
    /// let scale_note_names = ScaleNoteNames::new(note_names, reference_note).unwrap();
    ///
    /// assert_eq!(format!("{:#}", scale_note_names.note_of_index(0)), "A 4");
    /// assert_eq!(format!("{:#}", scale_note_names.note_of_index(3)), "C 5");
    /// assert_eq!(format!("{:#}", scale_note_names.note_of_index(-10)), "B 3");
    /// assert_eq!(format!("{:#}", scale_note_names.note_of_index(-57)), "C 0");
    /// ```
    pub fn note_of_index(&self, note_index: i32) -> MusicalNote {
        let (octave_shift, index_within_octave) = math::div_mod_i32(
            note_index + self.reference_index_within_octave as i32,
            self.note_names.len() as i32,
        );
        self.note_names.notes()[index_within_octave as usize]
            .with_octave(self.reference_note.octave + octave_shift)
    }

    /// Index of `note` relative to the reference note or `None` if the note is not part of the
    /// note names.
    pub fn index_of_note(&self, note: &MusicalNote) -> Option<i32> {
        let index_within_octave = self.note_names.index_of(note)?;
        Some(
            (note.octave - self.reference_note.octave) * self.note_names.len() as i32
                + index_within_octave as i32
                - self.reference_index_within_octave as i32,
        )
    }

    pub fn has_note(&self, note: &MusicalNote) -> bool {
        self.note_names.has_note(note)
    }

    /// Exchanges primary and enharmonic spellings of the note names and the reference note.
    pub fn switch_enharmonics(&self) -> Self {
        Self {
            note_names: self.note_names.switch_enharmonics(),
            reference_note: self.reference_note.switch_enharmonic(),
            reference_index_within_octave: self.reference_index_within_octave,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::note::BaseNote;

    use super::*;

    fn note(spelling: &str, octave: i32) -> MusicalNote {
        spelling.parse::<MusicalNote>().unwrap().with_octave(octave)
    }

    #[test]
    fn index_and_note_are_inverse() {
        for num_notes in [12, 19, 31, 53] {
            let note_names = NoteNames::predefined(num_notes).unwrap();
            let reference_note = note_names.default_reference_note();
            let scale_note_names = ScaleNoteNames::new(note_names, reference_note).unwrap();

            for note_index in -200..200 {
                let note = scale_note_names.note_of_index(note_index);
                assert_eq!(scale_note_names.index_of_note(&note), Some(note_index));
            }
        }
    }

    #[test]
    fn octave_wraps_at_first_table_entry() {
        let note_names = NoteNames::predefined(12).unwrap();
        let scale_note_names = ScaleNoteNames::new(note_names, note("C", 4)).unwrap();

        assert_eq!(scale_note_names.note_of_index(-1), note("B", 3));
        assert_eq!(scale_note_names.note_of_index(11), note("B", 4));
        assert_eq!(scale_note_names.note_of_index(12), note("C", 5));
        assert_eq!(scale_note_names.index_of_note(&note("A", 4)), Some(9));
        assert_eq!(scale_note_names.index_of_note(&note("Bb/A#", 2)), Some(-14));
    }

    #[test]
    fn unknown_notes() {
        let note_names = NoteNames::predefined(12).unwrap();

        assert!(ScaleNoteNames::new(note_names.clone(), note("A#", 4)).is_none());

        let scale_note_names =
            ScaleNoteNames::new(note_names, note_names_reference_a()).unwrap();
        assert_eq!(scale_note_names.index_of_note(&note("C^", 4)), None);
        assert_eq!(scale_note_names.index_of_note(&note("A#/Bb", 4)), None);
        assert!(!scale_note_names.has_note(&note("Db", 4)));
    }

    #[test]
    fn switched_enharmonics_keep_indices() {
        let note_names = NoteNames::predefined(12).unwrap();
        let scale_note_names = ScaleNoteNames::new(note_names, note_names_reference_a()).unwrap();
        let switched = scale_note_names.switch_enharmonics();

        assert_eq!(switched.note_of_index(1), note("A#/Bb", 4));
        assert_eq!(switched.index_of_note(&note("A#/Bb", 4)), Some(1));
        assert!(switched.reference_note().is_plain(BaseNote::A));
    }

    fn note_names_reference_a() -> MusicalNote {
        note("A", 4)
    }
}
