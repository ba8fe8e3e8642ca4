//! Unvalidated temperaments as read from a file or typed in by a user.

use crate::note::BaseNote;
use crate::note::MusicalNote;
use crate::note::DEFAULT_OCTAVE;
use crate::note_names::NoteNames;
use crate::ratio::RationalNumber;
use crate::temperament::Temperament;
use crate::temperament::TemperamentWithNoteNames;

/// One row of an [`EditableTemperament`]: an optional spelling plus a cents value and/or a ratio.
#[derive(Clone, Debug, PartialEq)]
pub struct NoteLine {
    pub note: Option<MusicalNote>,
    pub cents: Option<f64>,
    pub ratio: Option<RationalNumber>,
}

impl NoteLine {
    pub fn new(
        note: Option<MusicalNote>,
        cents: Option<f64>,
        ratio: Option<RationalNumber>,
    ) -> Self {
        Self { note, cents, ratio }
    }

    /// The cents value of the line. A ratio takes precedence over an explicit cents value.
    ///
    /// Returns `None` if neither is present or if the ratio is not positive.
    ///
    /// ```
    /// # use assert_approx_eq::assert_approx_eq;
    /// # use temper::editable::NoteLine;
    /// # use temper::ratio::RationalNumber;
    /// let line = NoteLine::new(None, Some(700.0), Some(RationalNumber::new(3, 2)));
    /// assert_approx_eq!(line.resolve_cents().unwrap(), 701.955001);
    ///
    /// assert_eq!(NoteLine::new(None, Some(700.0), None).resolve_cents(), Some(700.0));
    /// assert_eq!(NoteLine::new(None, None, None).resolve_cents(), None);
    /// ```
    pub fn resolve_cents(&self) -> Option<f64> {
        match self.ratio {
            Some(ratio) => ratio.as_ratio().map(|ratio| ratio.as_cents()),
            None => self.cents,
        }
    }
}

/// A temperament with possibly incomplete or inconsistent contents.
///
/// `note_lines` contains the unison as first and the octave as last line, i.e. one line more
/// than notes per octave. A `None` line could not be read.
#[derive(Clone, Debug, PartialEq)]
pub struct EditableTemperament {
    pub name: String,
    pub abbreviation: String,
    pub description: String,
    pub note_lines: Vec<Option<NoteLine>>,
    pub stable_id: Option<i64>,
}

impl EditableTemperament {
    /// Expands a stored temperament into editable lines.
    ///
    /// Every line receives the spelling of the resolved note names, placed in octave 4 and the
    /// octave line in octave 5.
    pub fn from_temperament(temperament: &TemperamentWithNoteNames) -> Self {
        let note_names = temperament.resolved_note_names();
        let inner = &temperament.temperament;
        let num_notes_per_octave = inner.num_notes_per_octave();

        let note_lines = inner
            .cents()
            .iter()
            .enumerate()
            .map(|(index, &cents)| {
                let octave = DEFAULT_OCTAVE + (index / num_notes_per_octave) as i32;
                let note = note_names
                    .as_ref()
                    .and_then(|note_names| note_names.get(index % num_notes_per_octave))
                    .map(|note| note.with_octave(octave));
                let ratio = inner
                    .rational_numbers()
                    .and_then(|ratios| ratios.get(index))
                    .copied();
                Some(NoteLine::new(note, Some(cents), ratio))
            })
            .collect();

        Self {
            name: inner.name().to_owned(),
            abbreviation: inner.abbreviation().to_owned(),
            description: inner.description().to_owned(),
            note_lines,
            stable_id: inner.stable_id(),
        }
    }

    /// Number of notes per octave, i.e. the number of lines without the octave line.
    pub fn num_notes_per_octave(&self) -> usize {
        self.note_lines.len().saturating_sub(1)
    }

    pub fn value_ordering(&self) -> (ValueOrdering, Vec<bool>) {
        let cents: Vec<_> = self
            .note_lines
            .iter()
            .map(|line| line.as_ref().and_then(NoteLine::resolve_cents))
            .collect();
        check_value_ordering(&cents)
    }

    pub fn note_name_error(&self) -> (NoteNameError, Vec<bool>) {
        let notes: Vec<_> = self
            .note_lines
            .iter()
            .map(|line| line.as_ref().and_then(|line| line.note))
            .collect();
        check_note_names(&notes)
    }

    /// Checks whether the temperament can be turned into a usable [`Temperament`].
    ///
    /// Spellings are only checked if there is no built-in note-name table to fall back to.
    pub fn has_errors(&self) -> bool {
        if self.note_lines.is_empty() {
            return true;
        }
        let lacks_value = |line: &Option<NoteLine>| match line {
            Some(line) => line.cents.is_none() && line.ratio.is_none(),
            None => true,
        };
        if self.note_lines.iter().any(lacks_value) {
            return true;
        }
        if self.value_ordering().0 != ValueOrdering::Increasing {
            return true;
        }
        if NoteNames::predefined(self.num_notes_per_octave()).is_some() {
            return false;
        }
        self.note_name_error().0 != NoteNameError::None
    }

    /// Resolves the lines into a temperament with note names.
    ///
    /// If all lines carry a ratio, the temperament is ratio-based. The note names are `None`,
    /// meaning "use the built-in table", if any spelling is missing or if all spellings coincide
    /// with the built-in table. Returns `None` if a line lacks a usable value, if spellings are
    /// missing without a built-in table to fall back to or if there are fewer than two lines.
    ///
    /// Ordering and duplicate spellings are not checked here, see
    /// [`EditableTemperament::has_errors`].
    pub fn to_temperament_with_note_names(&self) -> Option<TemperamentWithNoteNames> {
        if self.note_lines.len() < 2 {
            return None;
        }
        let num_notes_per_octave = self.num_notes_per_octave();

        let mut cents = Vec::with_capacity(self.note_lines.len());
        let mut ratios = Vec::with_capacity(self.note_lines.len());
        let mut notes = Vec::with_capacity(self.note_lines.len());
        for line in &self.note_lines {
            let line = line.as_ref()?;
            cents.push(line.resolve_cents()?);
            ratios.push(line.ratio);
            notes.push(line.note);
        }

        let temperament = match ratios.iter().copied().collect::<Option<Vec<_>>>() {
            Some(ratios) => Temperament::from_rational_numbers(ratios),
            None => Temperament::from_cents(cents),
        }
        .with_name(&self.name, &self.abbreviation, &self.description);
        let temperament = match self.stable_id {
            Some(stable_id) => temperament.with_stable_id(stable_id),
            None => temperament,
        };

        let predefined = NoteNames::predefined(num_notes_per_octave);
        let note_names = match notes.into_iter().collect::<Option<Vec<_>>>() {
            None if predefined.is_none() => return None,
            None => None,
            Some(mut notes) => {
                // Drop the octave line
                notes.truncate(num_notes_per_octave);
                match predefined {
                    Some(predefined) if predefined.has_same_spellings(&notes) => None,
                    _ => Some(self.custom_note_names(notes)?),
                }
            }
        };

        Some(TemperamentWithNoteNames::new(temperament, note_names))
    }

    /// Prefers a plain A as reference note, otherwise the first note.
    fn custom_note_names(&self, notes: Vec<MusicalNote>) -> Option<NoteNames> {
        let notes: Vec<_> = notes
            .into_iter()
            .map(|note| note.with_octave(DEFAULT_OCTAVE))
            .collect();
        let reference_note = *notes
            .iter()
            .find(|note| note.is_plain(BaseNote::A))
            .or_else(|| notes.first())?;
        Some(NoteNames::new(
            "",
            "",
            notes,
            reference_note,
            self.stable_id.unwrap_or_default(),
        ))
    }
}

/// Outcome of [`check_value_ordering`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ValueOrdering {
    /// All values are strictly increasing.
    Increasing,

    /// At least one value is not larger than its predecessor.
    Unordered,

    /// At least one value is missing. Takes precedence over [`ValueOrdering::Unordered`].
    Undefined,
}

/// Outcome of [`check_note_names`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NoteNameError {
    None,

    /// A spelling appears more than once, ignoring the octave.
    Duplicates,

    /// At least one spelling is missing. Takes precedence over [`NoteNameError::Duplicates`].
    Undefined,
}

/// Checks that `cents` is strictly increasing.
///
/// The returned flags mark every value that is not larger than its predecessor.
///
/// ```
/// # use temper::editable::{check_value_ordering, ValueOrdering};
/// let (ordering, decreasing) = check_value_ordering(&[Some(0.0), Some(300.0), Some(200.0)]);
/// assert_eq!(ordering, ValueOrdering::Unordered);
/// assert_eq!(decreasing, [false, false, true]);
///
/// let (ordering, _) = check_value_ordering(&[Some(0.0), Some(300.0), None, Some(200.0)]);
/// assert_eq!(ordering, ValueOrdering::Undefined);
/// ```
pub fn check_value_ordering(cents: &[Option<f64>]) -> (ValueOrdering, Vec<bool>) {
    let mut ordering = ValueOrdering::Increasing;
    let mut decreasing = vec![false; cents.len()];

    for (index, pair) in cents.windows(2).enumerate() {
        match (pair[0], pair[1]) {
            (Some(previous), Some(current)) => {
                if current <= previous {
                    decreasing[index + 1] = true;
                    if ordering != ValueOrdering::Undefined {
                        ordering = ValueOrdering::Unordered;
                    }
                }
            }
            _ => ordering = ValueOrdering::Undefined,
        }
    }

    (ordering, decreasing)
}

/// Checks that the spellings are complete and unique, ignoring octaves.
///
/// Every entry needs a spelling. The last entry is the octave of the first one and is therefore
/// excluded from the duplicate check. The returned flags mark every duplicate spelling.
pub fn check_note_names(notes: &[Option<MusicalNote>]) -> (NoteNameError, Vec<bool>) {
    let mut error = NoteNameError::None;
    let mut duplicates = vec![false; notes.len()];
    let checked = &notes[..notes.len().saturating_sub(1)];

    if notes.last().map_or(false, Option::is_none) {
        error = NoteNameError::Undefined;
    }

    for (index, note) in checked.iter().enumerate() {
        let Some(note) = note else {
            error = NoteNameError::Undefined;
            continue;
        };
        for (other_index, other) in checked.iter().enumerate().skip(index + 1) {
            if other.map_or(false, |other| note.equals_ignoring_octave(&other)) {
                duplicates[index] = true;
                duplicates[other_index] = true;
                if error != NoteNameError::Undefined {
                    error = NoteNameError::Duplicates;
                }
            }
        }
    }

    (error, duplicates)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::note::NoteModifier;
    use crate::temperament::predefined_temperaments;

    use super::*;

    fn note(spelling: &str) -> MusicalNote {
        spelling.parse().unwrap()
    }

    fn line(spelling: &str, cents: f64) -> Option<NoteLine> {
        Some(NoteLine::new(Some(note(spelling)), Some(cents), None))
    }

    fn editable(note_lines: Vec<Option<NoteLine>>) -> EditableTemperament {
        EditableTemperament {
            name: "Test".to_owned(),
            abbreviation: "T".to_owned(),
            description: String::new(),
            note_lines,
            stable_id: None,
        }
    }

    /// Five equal steps with user-defined spellings.
    fn edo5() -> EditableTemperament {
        editable(vec![
            line("C", 0.0),
            line("D", 240.0),
            line("E", 480.0),
            line("G", 720.0),
            line("A", 960.0),
            line("C", 1200.0),
        ])
    }

    #[test]
    fn value_ordering() {
        assert_eq!(
            check_value_ordering(&[Some(0.0), Some(100.0), Some(1200.0)]),
            (ValueOrdering::Increasing, vec![false; 3])
        );
        assert_eq!(
            check_value_ordering(&[Some(0.0), Some(100.0), Some(100.0)]),
            (ValueOrdering::Unordered, vec![false, false, true])
        );
        assert_eq!(
            check_value_ordering(&[Some(0.0), Some(-1.0), None, Some(1200.0)]),
            (ValueOrdering::Undefined, vec![false, true, false, false])
        );
        assert_eq!(
            check_value_ordering(&[Some(5.0)]),
            (ValueOrdering::Increasing, vec![false])
        );
        assert_eq!(check_value_ordering(&[]), (ValueOrdering::Increasing, vec![]));
    }

    #[test]
    fn note_name_errors() {
        let notes = [Some(note("C")), Some(note("D")), Some(note("C"))];
        assert_eq!(
            check_note_names(&notes),
            (NoteNameError::None, vec![false, false, false])
        );

        let notes = [
            Some(note("C")),
            Some(note("D")),
            Some(note("C").with_octave(7)),
            Some(note("E")),
        ];
        assert_eq!(
            check_note_names(&notes),
            (NoteNameError::Duplicates, vec![true, false, true, false])
        );

        let notes = [Some(note("C")), None, Some(note("C")), Some(note("E"))];
        assert_eq!(
            check_note_names(&notes),
            (NoteNameError::Undefined, vec![true, false, true, false])
        );

        let notes = [Some(note("C")), Some(note("D")), None];
        assert_eq!(
            check_note_names(&notes),
            (NoteNameError::Undefined, vec![false, false, false])
        );

        // Enharmonic pairs are distinct from their single spellings
        let notes = [Some(note("C#/Db")), Some(note("C#")), Some(note("D"))];
        assert_eq!(check_note_names(&notes).0, NoteNameError::None);
    }

    #[test]
    fn errors_of_custom_sizes_depend_on_spellings() {
        assert!(!edo5().has_errors());

        let mut duplicate = edo5();
        duplicate.note_lines[3] = line("D", 720.0);
        assert!(duplicate.has_errors());

        let mut missing_note = edo5();
        missing_note.note_lines[2] = Some(NoteLine::new(None, Some(480.0), None));
        assert!(missing_note.has_errors());

        let mut octave_without_note = edo5();
        octave_without_note.note_lines[5] = Some(NoteLine::new(None, Some(1200.0), None));
        assert!(octave_without_note.has_errors());
        assert_eq!(
            octave_without_note.note_name_error(),
            (NoteNameError::Undefined, vec![false; 6])
        );
        assert_eq!(octave_without_note.to_temperament_with_note_names(), None);
    }

    #[test]
    fn errors_independent_of_spellings() {
        assert!(editable(vec![]).has_errors());

        let mut unreadable = edo5();
        unreadable.note_lines[1] = None;
        assert!(unreadable.has_errors());

        let mut without_value = edo5();
        without_value.note_lines[1] = Some(NoteLine::new(Some(note("D")), None, None));
        assert!(without_value.has_errors());

        let mut unordered = edo5();
        unordered.note_lines[2] = line("E", 200.0);
        assert!(unordered.has_errors());

        let mut zero_ratio = edo5();
        zero_ratio.note_lines[1] =
            Some(NoteLine::new(Some(note("D")), None, Some(RationalNumber::zero())));
        assert!(zero_ratio.has_errors());
    }

    #[test]
    fn spellings_are_ignored_if_a_built_in_table_exists() {
        let lines = (0..=12)
            .map(|step| Some(NoteLine::new(None, Some(f64::from(step) * 100.0), None)))
            .collect();
        let temperament = editable(lines);
        assert!(!temperament.has_errors());

        let resolved = temperament.to_temperament_with_note_names().unwrap();
        assert_eq!(resolved.note_names, None);
        assert_eq!(resolved.temperament.num_notes_per_octave(), 12);
        assert_eq!(resolved.temperament.rational_numbers(), None);
        assert_eq!(resolved.temperament.name(), "Test");
    }

    #[test]
    fn custom_spellings_without_table() {
        let resolved = edo5().to_temperament_with_note_names().unwrap();
        let note_names = resolved.note_names.unwrap();

        assert_eq!(
            note_names
                .notes()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            ["C", "D", "E", "G", "A"]
        );
        assert_eq!(note_names.default_reference_note(), note("A").with_octave(4));
        assert_eq!(resolved.temperament.cents()[3], 720.0);

        let mut missing_note = edo5();
        missing_note.note_lines[2] = Some(NoteLine::new(None, Some(480.0), None));
        assert_eq!(missing_note.to_temperament_with_note_names(), None);
    }

    #[test]
    fn reference_note_falls_back_to_first_note() {
        let temperament = editable(vec![
            line("D", 0.0),
            line("Bb/A#", 500.0),
            line("E", 700.0),
            line("D", 1200.0),
        ]);
        let note_names = temperament
            .to_temperament_with_note_names()
            .unwrap()
            .note_names
            .unwrap();
        assert_eq!(note_names.default_reference_note(), note("D"));

        let temperament = editable(vec![
            line("D", 0.0),
            line("Bb/A", 500.0),
            line("E", 700.0),
            line("D", 1200.0),
        ]);
        let note_names = temperament
            .to_temperament_with_note_names()
            .unwrap()
            .note_names
            .unwrap();
        assert_eq!(note_names.default_reference_note(), note("Bb/A"));
    }

    #[test]
    fn ratios_only_if_all_lines_have_one() {
        let ratio_line = |numer, denom| {
            Some(NoteLine::new(
                None,
                None,
                Some(RationalNumber::new(numer, denom)),
            ))
        };
        let temperament = editable(vec![ratio_line(1, 1), ratio_line(3, 2), ratio_line(2, 1)]);
        let resolved = temperament.to_temperament_with_note_names();
        // No built-in table for two notes and no spellings
        assert_eq!(resolved, None);

        let mut ratios = Vec::new();
        for step in 0..=12 {
            ratios.push(ratio_line(12 + step, 12));
        }
        let resolved = editable(ratios.clone())
            .to_temperament_with_note_names()
            .unwrap();
        assert_eq!(
            resolved.temperament.rational_numbers().unwrap()[12],
            RationalNumber::from_int(2)
        );

        ratios[5] = Some(NoteLine::new(None, Some(450.0), None));
        let resolved = editable(ratios).to_temperament_with_note_names().unwrap();
        assert_eq!(resolved.temperament.rational_numbers(), None);
        assert_eq!(resolved.temperament.cents()[5], 450.0);
    }

    #[test]
    fn built_in_spellings_collapse_to_none() {
        for temperament in predefined_temperaments() {
            let with_names = TemperamentWithNoteNames::new(temperament, None);
            let editable = EditableTemperament::from_temperament(&with_names);
            assert!(!editable.has_errors());

            let resolved = editable.to_temperament_with_note_names().unwrap();
            assert_eq!(resolved.note_names, None);
            assert_eq!(resolved.temperament.cents(), with_names.temperament.cents());
            assert_eq!(resolved.stable_id(), with_names.stable_id());
        }
    }

    #[test]
    fn switched_spellings_are_kept() {
        let temperament = predefined_temperaments().remove(0);
        let note_names = NoteNames::predefined(12).unwrap().switch_enharmonics();
        let with_names = TemperamentWithNoteNames::new(temperament, Some(note_names.clone()));

        let editable = EditableTemperament::from_temperament(&with_names);
        let last_line = editable.note_lines[12].as_ref().unwrap();
        assert_eq!(last_line.note, Some(note("C").with_octave(5)));

        let resolved = editable.to_temperament_with_note_names().unwrap();
        let resolved_names = resolved.note_names.unwrap();
        assert_eq!(resolved_names.notes(), note_names.notes());
        assert!(resolved_names
            .default_reference_note()
            .is_plain(BaseNote::A));
        assert_eq!(
            resolved_names.notes()[1],
            MusicalNote::new(BaseNote::D, NoteModifier::Flat)
                .with_enharmonic(BaseNote::C, NoteModifier::Sharp)
        );
    }
}
