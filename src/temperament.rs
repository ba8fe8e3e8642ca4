//! Interval ladders dividing one octave into notes.

mod database;

use crate::fifths::ChainOfFifths;
use crate::fifths::CircleOfFifths;
use crate::note_names::NoteNames;
use crate::ratio::Ratio;
use crate::ratio::RationalNumber;
use crate::ratio::CENTS_PER_OCTAVE;

pub use self::database::predefined_temperaments;

/// Cumulative intervals of one octave, starting at 0 cents and ending at the octave.
///
/// All construction paths normalize into the same cents representation. Depending on how the
/// temperament was created, exact ratios or a circle/chain of fifths are retained alongside.
///
/// # Examples
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// # use temper::ratio::RationalNumber;
/// # use temper::temperament::Temperament;
/// let edo19 = Temperament::equal_division(19);
/// assert_eq!(edo19.num_notes_per_octave(), 19);
/// assert_eq!(edo19.cents()[19], 1200.0);
/// assert_eq!(edo19.equal_division_count(), Some(19));
///
/// let just = Temperament::from_rational_numbers(vec![
///     RationalNumber::from_int(1),
///     RationalNumber::new(5, 4),
///     RationalNumber::new(3, 2),
///     RationalNumber::from_int(2),
/// ])
/// .with_name("Major triad", "Triad", "");
/// assert_eq!(just.num_notes_per_octave(), 3);
/// assert_approx_eq!(just.cents()[1], 386.313714);
/// assert_eq!(just.rational_numbers().unwrap()[2].to_string(), "3/2");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Temperament {
    name: String,
    abbreviation: String,
    description: String,
    cents: Vec<f64>,
    rational_numbers: Option<Vec<RationalNumber>>,
    circle_of_fifths: Option<CircleOfFifths>,
    chain_of_fifths: Option<ChainOfFifths>,
    equal_division: Option<usize>,
    stable_id: Option<i64>,
}

impl Temperament {
    /// Creates a temperament from cumulative cents, including the octave value.
    ///
    /// # Panics
    ///
    /// Panics if fewer than two values are given.
    pub fn from_cents(cents: Vec<f64>) -> Self {
        assert!(
            cents.len() >= 2,
            "A temperament needs a unison and an octave but got {} values",
            cents.len()
        );
        Self {
            name: String::new(),
            abbreviation: String::new(),
            description: String::new(),
            cents,
            rational_numbers: None,
            circle_of_fifths: None,
            chain_of_fifths: None,
            equal_division: None,
            stable_id: None,
        }
    }

    /// Creates a temperament from exact ratios relative to the first note, including the octave.
    ///
    /// # Panics
    ///
    /// Panics if fewer than two values are given or if any ratio is not positive.
    pub fn from_rational_numbers(rational_numbers: Vec<RationalNumber>) -> Self {
        let cents = rational_numbers
            .iter()
            .map(|&number| match number.as_ratio() {
                Some(ratio) => ratio.as_cents(),
                None => panic!("Ratio {number} is not positive"),
            })
            .collect();
        Self {
            rational_numbers: Some(rational_numbers),
            ..Self::from_cents(cents)
        }
    }

    /// Creates a 12-note temperament from a circle of fifths starting at C.
    pub fn from_circle_of_fifths(circle_of_fifths: CircleOfFifths) -> Self {
        let cents = circle_of_fifths
            .ratios()
            .iter()
            .map(|&ratio| Ratio::from_float(ratio).as_cents())
            .collect();
        Self {
            circle_of_fifths: Some(circle_of_fifths),
            ..Self::from_cents(cents)
        }
    }

    /// Creates a temperament from the sorted ratios of an open chain of fifths.
    pub fn from_chain_of_fifths(chain_of_fifths: ChainOfFifths) -> Self {
        let cents = chain_of_fifths
            .sorted_ratios()
            .into_iter()
            .map(|ratio| Ratio::from_float(ratio).as_cents())
            .chain([CENTS_PER_OCTAVE])
            .collect();
        Self {
            chain_of_fifths: Some(chain_of_fifths),
            ..Self::from_cents(cents)
        }
    }

    /// Divides the octave into `num_divisions` equal steps.
    ///
    /// The 12-step division additionally carries the equivalent circle of fifths.
    ///
    /// # Panics
    ///
    /// Panics if `num_divisions` is zero.
    pub fn equal_division(num_divisions: usize) -> Self {
        assert!(num_divisions > 0, "Number of divisions must be positive");
        let cents = (0..=num_divisions)
            .map(|step| step as f64 * CENTS_PER_OCTAVE / num_divisions as f64)
            .collect();
        Self {
            circle_of_fifths: (num_divisions == 12).then(CircleOfFifths::edo12),
            equal_division: Some(num_divisions),
            ..Self::from_cents(cents)
        }
    }

    pub fn with_name(
        self,
        name: impl Into<String>,
        abbreviation: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            abbreviation: abbreviation.into(),
            description: description.into(),
            ..self
        }
    }

    pub fn with_stable_id(self, stable_id: i64) -> Self {
        Self {
            stable_id: Some(stable_id),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Cumulative cents of length `num_notes_per_octave() + 1`.
    pub fn cents(&self) -> &[f64] {
        &self.cents
    }

    pub fn rational_numbers(&self) -> Option<&[RationalNumber]> {
        self.rational_numbers.as_deref()
    }

    pub fn circle_of_fifths(&self) -> Option<&CircleOfFifths> {
        self.circle_of_fifths.as_ref()
    }

    pub fn chain_of_fifths(&self) -> Option<&ChainOfFifths> {
        self.chain_of_fifths.as_ref()
    }

    pub fn equal_division_count(&self) -> Option<usize> {
        self.equal_division
    }

    pub fn stable_id(&self) -> Option<i64> {
        self.stable_id
    }

    pub fn num_notes_per_octave(&self) -> usize {
        self.cents.len() - 1
    }

    /// Size of the period between the first and the last value.
    pub fn octave_cents(&self) -> f64 {
        self.cents[self.cents.len() - 1] - self.cents[0]
    }
}

/// A temperament bundled with optional bespoke note names.
///
/// `note_names == None` means that the built-in table for the temperament's size applies.
#[derive(Clone, Debug, PartialEq)]
pub struct TemperamentWithNoteNames {
    pub temperament: Temperament,
    pub note_names: Option<NoteNames>,
}

impl TemperamentWithNoteNames {
    pub fn new(temperament: Temperament, note_names: Option<NoteNames>) -> Self {
        Self {
            temperament,
            note_names,
        }
    }

    pub fn stable_id(&self) -> Option<i64> {
        self.temperament.stable_id()
    }

    /// Returns a copy where both the temperament and its note names carry `stable_id`.
    pub fn with_stable_id(&self, stable_id: i64) -> Self {
        Self {
            temperament: self.temperament.clone().with_stable_id(stable_id),
            note_names: self
                .note_names
                .clone()
                .map(|note_names| note_names.with_stable_id(stable_id)),
        }
    }

    /// The bespoke note names or, if absent, the built-in table for the temperament's size.
    pub fn resolved_note_names(&self) -> Option<NoteNames> {
        self.note_names
            .clone()
            .or_else(|| NoteNames::predefined(self.temperament.num_notes_per_octave()))
    }
}
