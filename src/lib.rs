//! Musical temperaments, note-name tables and the mapping between note indices and frequencies.
//!
//! A [`temperament::Temperament`] divides an octave into notes. Combined with
//! [`note_names::NoteNames`], a reference note and a reference frequency it yields a
//! [`scale::MusicalScale`] that can be queried in both directions, note to frequency and
//! frequency to note.
//!
//! User-defined temperaments are exchanged as text via [`interchange`], validated via
//! [`editable`] and managed, together with the predefined ones, by [`store`].
//!
//! # Examples
//!
//! ```
//! # use assert_approx_eq::assert_approx_eq;
//! # use temper::scale::MusicalScale;
//! # use temper::temperament::predefined_temperaments;
//! let werckmeister_iii = predefined_temperaments()
//!     .into_iter()
//!     .find(|temperament| temperament.abbreviation() == "WIII")
//!     .unwrap();
//!
//! let scale = MusicalScale::builder(werckmeister_iii)
//!     .reference_frequency(415.0)
//!     .build()
//!     .unwrap();
//!
//! // E is a pure fourth below A
//! let index = scale.closest_note_index(311.0);
//! assert_eq!(format!("{:#}", scale.note(index)), "E 4");
//! assert_approx_eq!(scale.frequency(index).unwrap(), 311.25);
//! ```

pub mod editable;
pub mod fifths;
pub mod interchange;
pub mod math;
pub mod note;
pub mod note_names;
pub mod ratio;
pub mod scale;
pub mod store;
pub mod temperament;
pub mod tuning;
