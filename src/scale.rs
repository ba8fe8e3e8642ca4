//! Concrete note frequencies derived from a temperament, note names and a reference pitch.

mod frequencies;
mod names;

use crate::note::MusicalNote;
use crate::note_names::NoteNames;
use crate::ratio::Ratio;
use crate::temperament::Temperament;
use crate::tuning::Approximation;
use crate::tuning::Tuning;

pub use self::frequencies::ScaleFrequencies;
pub use self::names::ScaleNoteNames;

/// Default values used by [`MusicalScaleBuilder`].
pub mod defaults {
    pub const REFERENCE_FREQUENCY: f64 = 440.0;
    pub const FREQUENCY_MIN: f64 = 16.0;
    pub const FREQUENCY_MAX: f64 = 16000.0;
}

/// Transforms unstretched note frequencies, e.g. to follow the inharmonicity of piano strings.
///
/// The only available variant is the identity transform.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StretchTuning;

impl StretchTuning {
    pub fn stretched_frequency(self, unstretched_frequency: f64) -> f64 {
        unstretched_frequency
    }
}

/// A temperament laid out over the audible range and anchored at a reference frequency.
///
/// Notes are addressed by an integer index relative to the reference note, i.e. index 0
/// always sounds at the reference frequency (provided it lies within the frequency range).
///
/// # Examples
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// # use temper::scale::MusicalScale;
/// # use temper::temperament::Temperament;
/// let scale = MusicalScale::builder(Temperament::equal_division(12))
///     .build()
///     .unwrap();
///
/// assert_eq!(scale.frequency(0), Some(440.0));
/// assert_approx_eq!(scale.frequency(3).unwrap(), 523.251131);
/// assert_eq!(format!("{:#}", scale.note(3)), "C 5");
///
/// let c5 = "C".parse::<temper::note::MusicalNote>().unwrap().with_octave(5);
/// assert_eq!(scale.note_index(&c5), Some(3));
/// assert_eq!(scale.closest_note_index(530.0), 3);
/// assert_approx_eq!(scale.frequency_index(452.892984), 0.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MusicalScale {
    temperament: Temperament,
    root_note: MusicalNote,
    reference_frequency: f64,
    frequency_min: f64,
    frequency_max: f64,
    stretch_tuning: StretchTuning,
    note_names: ScaleNoteNames,
    frequencies: ScaleFrequencies,
}

impl MusicalScale {
    pub fn builder(temperament: Temperament) -> MusicalScaleBuilder {
        MusicalScaleBuilder {
            temperament,
            note_names: None,
            root_note: None,
            reference_note: None,
            reference_frequency: defaults::REFERENCE_FREQUENCY,
            frequency_min: defaults::FREQUENCY_MIN,
            frequency_max: defaults::FREQUENCY_MAX,
            stretch_tuning: StretchTuning,
        }
    }

    pub fn temperament(&self) -> &Temperament {
        &self.temperament
    }

    pub fn note_names(&self) -> &NoteNames {
        self.note_names.note_names()
    }

    pub fn scale_note_names(&self) -> &ScaleNoteNames {
        &self.note_names
    }

    pub fn root_note(&self) -> MusicalNote {
        self.root_note
    }

    pub fn reference_note(&self) -> MusicalNote {
        self.note_names.reference_note()
    }

    pub fn reference_frequency(&self) -> f64 {
        self.reference_frequency
    }

    pub fn frequency_min(&self) -> f64 {
        self.frequency_min
    }

    pub fn frequency_max(&self) -> f64 {
        self.frequency_max
    }

    pub fn stretch_tuning(&self) -> StretchTuning {
        self.stretch_tuning
    }

    pub fn num_notes_per_octave(&self) -> usize {
        self.temperament.num_notes_per_octave()
    }

    pub fn frequencies(&self) -> &ScaleFrequencies {
        &self.frequencies
    }

    /// Smallest available note index (included).
    pub fn note_index_begin(&self) -> i32 {
        self.frequencies.index_start()
    }

    /// Largest available note index (excluded).
    pub fn note_index_end(&self) -> i32 {
        self.frequencies.index_end()
    }

    /// The spelled note with octave at `note_index`.
    pub fn note(&self, note_index: i32) -> MusicalNote {
        self.note_names.note_of_index(note_index)
    }

    /// Frequency of an integer note index within `note_index_begin()..note_index_end()`.
    pub fn frequency(&self, note_index: i32) -> Option<f64> {
        self.frequencies.get(note_index)
    }

    /// Frequency of a fractional note index. Interpolates between notes and extrapolates
    /// beyond the available range.
    pub fn frequency_at(&self, note_index: f64) -> f64 {
        self.frequencies.get_interpolated(note_index)
    }

    /// Fractional note index of `frequency`.
    pub fn frequency_index(&self, frequency: f64) -> f64 {
        self.frequencies.frequency_index(frequency)
    }

    /// Index of the note closest to `frequency` on a logarithmic scale.
    pub fn closest_note_index(&self, frequency: f64) -> i32 {
        self.frequencies.closest_index(frequency)
    }

    /// Index of a spelled note or `None` if the note is not part of the note names.
    pub fn note_index(&self, note: &MusicalNote) -> Option<i32> {
        self.note_names.index_of_note(note)
    }

    /// Returns the same scale with primary and enharmonic spellings exchanged.
    pub fn switch_enharmonics(&self) -> Self {
        Self {
            root_note: self.root_note.switch_enharmonic(),
            note_names: self.note_names.switch_enharmonics(),
            ..self.clone()
        }
    }
}

impl Tuning<i32> for MusicalScale {
    fn frequency_of(&self, note_index: i32) -> Option<f64> {
        self.frequency(note_index)
    }

    fn find_by_frequency(&self, frequency_hz: f64) -> Approximation<i32> {
        let approx_value = self.closest_note_index(frequency_hz);
        let closest_frequency = self
            .frequency(approx_value)
            .unwrap_or_else(|| self.frequency_at(f64::from(approx_value)));
        Approximation {
            approx_value,
            deviation: Ratio::between_frequencies(closest_frequency, frequency_hz),
        }
    }
}

/// Collects the parameters of a [`MusicalScale`].
///
/// Unset parameters fall back to the built-in note names for the temperament's size, the first
/// entry of the note names as root note, their default reference note and the values in
/// [`defaults`].
#[derive(Clone, Debug)]
pub struct MusicalScaleBuilder {
    temperament: Temperament,
    note_names: Option<NoteNames>,
    root_note: Option<MusicalNote>,
    reference_note: Option<MusicalNote>,
    reference_frequency: f64,
    frequency_min: f64,
    frequency_max: f64,
    stretch_tuning: StretchTuning,
}

impl MusicalScaleBuilder {
    pub fn note_names(mut self, note_names: impl Into<Option<NoteNames>>) -> Self {
        self.note_names = note_names.into();
        self
    }

    pub fn root_note(mut self, root_note: impl Into<Option<MusicalNote>>) -> Self {
        self.root_note = root_note.into();
        self
    }

    pub fn reference_note(mut self, reference_note: impl Into<Option<MusicalNote>>) -> Self {
        self.reference_note = reference_note.into();
        self
    }

    pub fn reference_frequency(mut self, reference_frequency: f64) -> Self {
        self.reference_frequency = reference_frequency;
        self
    }

    pub fn frequency_range(mut self, frequency_min: f64, frequency_max: f64) -> Self {
        self.frequency_min = frequency_min;
        self.frequency_max = frequency_max;
        self
    }

    pub fn stretch_tuning(mut self, stretch_tuning: StretchTuning) -> Self {
        self.stretch_tuning = stretch_tuning;
        self
    }

    pub fn build(self) -> Result<MusicalScale, ScaleBuildError> {
        let num_notes_per_octave = self.temperament.num_notes_per_octave();
        if !self
            .temperament
            .cents()
            .windows(2)
            .all(|pair| pair[0] < pair[1])
        {
            return Err(ScaleBuildError::TemperamentNotIncreasing);
        }

        let frequencies_valid = [
            self.reference_frequency,
            self.frequency_min,
            self.frequency_max,
        ]
        .iter()
        .all(|frequency| frequency.is_finite() && *frequency > 0.0);
        if !frequencies_valid || self.frequency_min >= self.frequency_max {
            return Err(ScaleBuildError::InvalidFrequencies {
                reference_frequency: self.reference_frequency,
                frequency_min: self.frequency_min,
                frequency_max: self.frequency_max,
            });
        }

        let note_names = match self.note_names {
            Some(note_names) => note_names,
            None => NoteNames::predefined(num_notes_per_octave).ok_or(
                ScaleBuildError::NoNoteNamesAvailable {
                    num_notes_per_octave,
                },
            )?,
        };
        if note_names.len() != num_notes_per_octave {
            return Err(ScaleBuildError::NoteNamesSizeMismatch {
                num_notes_per_octave,
                num_note_names: note_names.len(),
            });
        }

        let root_note = match self.root_note {
            Some(root_note) => root_note,
            None => note_names.notes()[0],
        };
        let reference_note = self
            .reference_note
            .unwrap_or_else(|| note_names.default_reference_note());

        let note_names = ScaleNoteNames::new(note_names, reference_note)
            .ok_or(ScaleBuildError::UnknownReferenceNote(reference_note))?;

        let root_index = note_names
            .index_of_note(&root_note.with_octave(reference_note.octave))
            .ok_or(ScaleBuildError::UnknownRootNote(root_note))?;
        let reference_index_within_octave = if root_index <= 0 {
            (-root_index) as usize
        } else {
            num_notes_per_octave - root_index as usize
        };

        let frequencies = ScaleFrequencies::create(
            self.temperament.cents(),
            reference_index_within_octave,
            self.reference_frequency,
            self.frequency_min,
            self.frequency_max,
            self.stretch_tuning,
        );
        if frequencies.len() < 2 {
            return Err(ScaleBuildError::TooFewNotesInRange {
                num_notes: frequencies.len(),
            });
        }

        Ok(MusicalScale {
            temperament: self.temperament,
            root_note,
            reference_frequency: self.reference_frequency,
            frequency_min: self.frequency_min,
            frequency_max: self.frequency_max,
            stretch_tuning: self.stretch_tuning,
            note_names,
            frequencies,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScaleBuildError {
    /// The cents of the temperament are not strictly increasing.
    TemperamentNotIncreasing,

    /// A frequency is not a finite positive number or the minimum is not below the maximum.
    InvalidFrequencies {
        reference_frequency: f64,
        frequency_min: f64,
        frequency_max: f64,
    },

    /// No note names were given and there is no built-in table for this size.
    NoNoteNamesAvailable { num_notes_per_octave: usize },

    /// The number of note names differs from the number of notes per octave.
    NoteNamesSizeMismatch {
        num_notes_per_octave: usize,
        num_note_names: usize,
    },

    /// The reference note is not part of the note names.
    UnknownReferenceNote(MusicalNote),

    /// The root note is not part of the note names.
    UnknownRootNote(MusicalNote),

    /// Fewer than two notes lie between the minimum and the maximum frequency.
    TooFewNotesInRange { num_notes: usize },
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use crate::note::BaseNote;
    use crate::ratio::RationalNumber;
    use crate::temperament::predefined_temperaments;

    use super::*;

    fn note(spelling: &str, octave: i32) -> MusicalNote {
        spelling.parse::<MusicalNote>().unwrap().with_octave(octave)
    }

    fn werckmeister_vi() -> Temperament {
        predefined_temperaments()
            .into_iter()
            .find(|temperament| temperament.abbreviation() == "WVI")
            .unwrap()
    }

    #[test]
    fn reference_frequency_is_exact() {
        for temperament in predefined_temperaments() {
            for reference_frequency in [415.0, 440.0, 443.5] {
                let scale = MusicalScale::builder(temperament.clone())
                    .reference_frequency(reference_frequency)
                    .build()
                    .unwrap();
                assert_eq!(scale.frequency(0), Some(reference_frequency));
            }
        }
    }

    #[test]
    fn closest_note_index_round_trip() {
        for temperament in predefined_temperaments() {
            let scale = MusicalScale::builder(temperament).build().unwrap();
            let begin = scale.note_index_begin();
            let end = scale.note_index_end();
            assert!(begin < 0 && end > 0);

            for note_index in begin..end {
                let frequency = scale.frequency(note_index).unwrap();
                assert!(frequency > 16.0 && frequency < 16000.0);
                assert_eq!(scale.closest_note_index(frequency), note_index);
                assert_approx_eq!(
                    scale.frequency_index(frequency),
                    f64::from(note_index),
                    1e-9
                );
            }
        }
    }

    #[test]
    fn notes_and_indices_agree() {
        let scale = MusicalScale::builder(Temperament::equal_division(31))
            .build()
            .unwrap();

        assert_eq!(scale.reference_note(), note("A", 4));
        assert_eq!(scale.root_note(), note("C", 4));
        for note_index in scale.note_index_begin()..scale.note_index_end() {
            let note = scale.note(note_index);
            assert_eq!(scale.note_index(&note), Some(note_index));
        }
        assert_eq!(scale.note_index(&note("C#", 4)), Some(-21));
        assert_eq!(scale.note_index(&note("C#/Db", 4)), None);
    }

    #[test]
    fn root_note_selects_tuning_of_the_reference_note() {
        // Werckmeister VI rooted at C: A is 196/117 above C
        let scale = MusicalScale::builder(werckmeister_vi()).build().unwrap();
        let c4 = scale
            .frequency(scale.note_index(&note("C", 4)).unwrap())
            .unwrap();
        assert_approx_eq!(440.0 / c4, 196.0 / 117.0);

        // Rooted at A, the temperament starts at the reference note
        let scale = MusicalScale::builder(werckmeister_vi())
            .root_note(note("A", 4))
            .build()
            .unwrap();
        let b4 = scale
            .frequency(scale.note_index(&note("B", 4)).unwrap())
            .unwrap();
        assert_approx_eq!(b4 / 440.0, 196.0 / 175.0);
    }

    #[test]
    fn root_note_after_reference_note() {
        let scale = MusicalScale::builder(werckmeister_vi())
            .root_note(note("B", 2))
            .build()
            .unwrap();

        // A is the 11th note (index 10) of an octave starting at B
        let a4 = scale.frequency(0).unwrap();
        let b3 = scale.frequency(-10).unwrap();
        assert_eq!(scale.note(-10), note("B", 3));
        assert_approx_eq!(a4 / b3, 196.0 / 110.0);
    }

    #[test]
    fn pure_tuning_with_custom_reference_note() {
        let ratios = [
            (1, 1),
            (16, 15),
            (9, 8),
            (6, 5),
            (5, 4),
            (4, 3),
            (45, 32),
            (3, 2),
            (8, 5),
            (5, 3),
            (9, 5),
            (15, 8),
            (2, 1),
        ];
        let pure = Temperament::from_rational_numbers(
            ratios
                .iter()
                .map(|&(numer, denom)| RationalNumber::new(numer, denom))
                .collect(),
        );
        let scale = MusicalScale::builder(pure)
            .reference_note(note("C", 4))
            .reference_frequency(264.0)
            .build()
            .unwrap();

        assert_eq!(scale.frequency(0), Some(264.0));
        assert_approx_eq!(scale.frequency(9).unwrap(), 440.0);
        assert_approx_eq!(scale.frequency(7).unwrap(), 396.0);
        assert!(scale.note(9).is_plain(BaseNote::A));
    }

    #[test]
    fn find_by_frequency() {
        let scale = MusicalScale::builder(Temperament::equal_division(12))
            .build()
            .unwrap();

        let approximation = scale.find_by_frequency(445.0);
        assert_eq!(approximation.approx_value, 0);
        assert_approx_eq!(approximation.deviation.as_cents(), 19.56, 1e-2);

        assert_eq!(scale.frequency_of(12), Some(880.0));
        assert_eq!(scale.frequency_of(1000), None);
    }

    #[test]
    fn switch_enharmonics() {
        let scale = MusicalScale::builder(Temperament::equal_division(12))
            .build()
            .unwrap();
        let switched = scale.switch_enharmonics();

        assert_eq!(switched.note(1).to_string(), "A#/Bb");
        assert_eq!(switched.frequency(1), scale.frequency(1));
        assert_eq!(switched.switch_enharmonics(), scale);
    }

    #[test]
    fn build_errors() {
        let edo13 = MusicalScale::builder(Temperament::equal_division(13)).build();
        assert_eq!(
            edo13,
            Err(ScaleBuildError::NoNoteNamesAvailable {
                num_notes_per_octave: 13
            })
        );

        let mismatch = MusicalScale::builder(Temperament::equal_division(12))
            .note_names(NoteNames::predefined(19).unwrap())
            .build();
        assert_eq!(
            mismatch,
            Err(ScaleBuildError::NoteNamesSizeMismatch {
                num_notes_per_octave: 12,
                num_note_names: 19
            })
        );

        let unknown_root = MusicalScale::builder(Temperament::equal_division(12))
            .root_note(note("C^", 4))
            .build();
        assert_eq!(
            unknown_root,
            Err(ScaleBuildError::UnknownRootNote(note("C^", 4)))
        );

        let unknown_reference = MusicalScale::builder(Temperament::equal_division(12))
            .reference_note(note("A#", 4))
            .build();
        assert_eq!(
            unknown_reference,
            Err(ScaleBuildError::UnknownReferenceNote(note("A#", 4)))
        );

        let unordered =
            MusicalScale::builder(Temperament::from_cents(vec![0.0, 700.0, 500.0, 1200.0]))
                .build();
        assert_eq!(unordered, Err(ScaleBuildError::TemperamentNotIncreasing));

        let inverted_range = MusicalScale::builder(Temperament::equal_division(12))
            .frequency_range(1000.0, 100.0)
            .build();
        assert!(matches!(
            inverted_range,
            Err(ScaleBuildError::InvalidFrequencies { .. })
        ));

        let narrow_range = MusicalScale::builder(Temperament::equal_division(12))
            .frequency_range(441.0, 460.0)
            .build();
        assert_eq!(
            narrow_range,
            Err(ScaleBuildError::TooFewNotesInRange { num_notes: 0 })
        );
    }
}
