//! Line-oriented text format for exchanging user-defined temperaments.
//!
//! The format is a superset of the Scala `.scl` format. Several temperaments can be concatenated
//! and each pitch line can carry the spelling of its note.
//!
//! ```text
//! ! version=0.1.0
//! !
//! ! Werckmeister_VI.scl
//! ! abbreviation=WVI
//! !
//! Werckmeister VI
//! 12
//! !
//!  98/93    note=C#/Db
//!  ...
//!  2/1    note=C
//! ```

mod import;

use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::Read;

use crate::editable::EditableTemperament;
use crate::temperament::TemperamentWithNoteNames;

pub use self::import::TemperamentImportError;

const VERSION_KEY: &str = "version";
const ABBREVIATION_KEY: &str = "abbreviation";
const DESCRIPTION_KEY: &str = "description";
const NOTE_KEY: &str = "note";

/// Version written into the header of exported files.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Written instead of an empty name, since a blank name line cannot be read back.
const UNNAMED: &str = "Unnamed";

/// Classification of a parsed interchange file.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FileCheck {
    /// At least one temperament was read.
    Ok,

    /// The file is well-formed but contains no (complete) temperament.
    Empty,

    /// A number of notes or a pitch line could not be read.
    Invalid,
}

/// Result of reading an interchange file.
///
/// # Examples
///
/// ```
/// # use temper::interchange::FileCheck;
/// # use temper::interchange::ImportedTemperaments;
/// let text = "\
/// ! version=1.0
/// !
/// Pentatonic
/// 5
/// !
///  200.0    note=D
///  400.0    note=E
///  700.0    note=G
///  900.0    note=A
///  1200.0   note=C
/// ";
/// let imported = ImportedTemperaments::parse(text);
/// assert_eq!(imported.file_check, FileCheck::Ok);
/// assert_eq!(imported.version.as_deref(), Some("1.0"));
///
/// let pentatonic = &imported.temperaments[0];
/// assert_eq!(pentatonic.name, "Pentatonic");
/// assert_eq!(pentatonic.num_notes_per_octave(), 5);
/// assert!(!pentatonic.has_errors());
///
/// let invalid = ImportedTemperaments::parse("Pentatonic\nfive\n");
/// assert_eq!(invalid.file_check, FileCheck::Invalid);
/// assert!(invalid.temperaments.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ImportedTemperaments {
    pub file_check: FileCheck,
    pub version: Option<String>,
    /// Empty if the file is invalid.
    pub temperaments: Vec<EditableTemperament>,
}

impl ImportedTemperaments {
    /// Reads temperaments from `reader`. Only I/O failures are reported as error.
    pub fn import(reader: impl Read) -> Result<Self, TemperamentImportError> {
        import::import_temperaments(reader)
    }

    pub fn parse(text: &str) -> Self {
        import::parse_temperaments(text)
    }
}

/// Creates a [`Display`] representation of `temperaments` in the interchange format.
pub fn export(temperaments: &[TemperamentWithNoteNames]) -> TemperamentsExport<'_> {
    TemperamentsExport {
        temperaments,
        version: VERSION,
    }
}

pub struct TemperamentsExport<'a> {
    temperaments: &'a [TemperamentWithNoteNames],
    version: &'a str,
}

impl<'a> TemperamentsExport<'a> {
    pub fn with_version(self, version: &'a str) -> Self {
        Self { version, ..self }
    }
}

impl Display for TemperamentsExport<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "! {VERSION_KEY}={}", self.version)?;
        for temperament in self.temperaments {
            writeln!(f, "!")?;
            write_temperament(f, temperament)?;
        }
        Ok(())
    }
}

fn write_temperament(f: &mut Formatter, with_names: &TemperamentWithNoteNames) -> fmt::Result {
    let temperament = &with_names.temperament;
    let single_line = |text: &str| text.replace('\n', " ");
    let name = match single_line(temperament.name()) {
        name if name.trim().is_empty() => UNNAMED.to_owned(),
        name => name,
    };
    let abbreviation = single_line(temperament.abbreviation());
    let description = single_line(temperament.description());

    writeln!(f, "! {}.scl", name.replace(' ', "_"))?;
    if !abbreviation.is_empty() {
        writeln!(f, "! {ABBREVIATION_KEY}={abbreviation}")?;
    }
    if !description.is_empty() {
        writeln!(f, "! {DESCRIPTION_KEY}={description}")?;
    }

    let num_notes = temperament.num_notes_per_octave();
    writeln!(f, "!")?;
    writeln!(f, "{name}")?;
    writeln!(f, "{num_notes}")?;
    writeln!(f, "!")?;

    let note_names = with_names.resolved_note_names();
    for index in 1..=num_notes {
        match temperament.rational_numbers() {
            Some(rational_numbers) => write!(f, " {}", rational_numbers[index])?,
            None => write!(f, " {:.2}", temperament.cents()[index])?,
        }
        if let Some(note) = note_names
            .as_ref()
            .and_then(|note_names| note_names.get(index % num_notes))
        {
            write!(f, "    {NOTE_KEY}={note}")?;
        }
        writeln!(f)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;

    use crate::note::BaseNote;
    use crate::note::MusicalNote;
    use crate::note_names::NoteNames;
    use crate::ratio::RationalNumber;
    use crate::scale::MusicalScale;
    use crate::temperament::predefined_temperaments;
    use crate::temperament::Temperament;

    use super::*;

    fn note(spelling: &str) -> MusicalNote {
        spelling.parse().unwrap()
    }

    fn just_triad() -> TemperamentWithNoteNames {
        let temperament = Temperament::from_rational_numbers(vec![
            RationalNumber::one(),
            RationalNumber::new(9, 8),
            RationalNumber::new(5, 4),
            RationalNumber::from_int(2),
        ])
        .with_name("Just triad\nsteps", "JT", "");
        let note_names = NoteNames::new(
            "",
            "",
            vec![note("C"), note("D"), note("E")],
            note("C"),
            0,
        );
        TemperamentWithNoteNames::new(temperament, Some(note_names))
    }

    #[test]
    fn export_format() {
        let edo12 = TemperamentWithNoteNames::new(predefined_temperaments().remove(0), None);
        let exported = export(&[just_triad(), edo12])
            .with_version("1.2.3")
            .to_string();

        assert_eq!(
            exported.lines().take(24).collect::<Vec<_>>(),
            [
                "! version=1.2.3",
                "!",
                "! Just_triad_steps.scl",
                "! abbreviation=JT",
                "!",
                "Just triad steps",
                "3",
                "!",
                " 9/8    note=D",
                " 5/4    note=E",
                " 2/1    note=C",
                "!",
                "! 12-tone_equal_temperament.scl",
                "! abbreviation=EDO12",
                "! description=Octave divided into 12 equal steps.",
                "!",
                "12-tone equal temperament",
                "12",
                "!",
                " 100.00    note=C#/Db",
                " 200.00    note=D",
                " 300.00    note=Eb/D#",
                " 400.00    note=E",
                " 500.00    note=F",
            ]
        );
        assert_eq!(exported.lines().last(), Some(" 1200.00    note=C"));
    }

    #[test]
    fn unnamed_temperaments_can_be_read_back() {
        let unnamed = TemperamentWithNoteNames::new(Temperament::equal_division(19), None);
        let exported = export(&[unnamed]).to_string();
        let imported = ImportedTemperaments::parse(&exported);

        assert_eq!(imported.file_check, FileCheck::Ok);
        assert_eq!(imported.version.as_deref(), Some(VERSION));
        assert_eq!(imported.temperaments[0].name, UNNAMED);
        assert_eq!(imported.temperaments[0].num_notes_per_octave(), 19);
    }

    #[test]
    fn round_trip_of_predefined_temperaments() {
        let temperaments: Vec<_> = predefined_temperaments()
            .into_iter()
            .map(|temperament| TemperamentWithNoteNames::new(temperament, None))
            .collect();
        let exported = export(&temperaments).to_string();
        let imported = ImportedTemperaments::parse(&exported);

        assert_eq!(imported.file_check, FileCheck::Ok);
        assert_eq!(imported.temperaments.len(), temperaments.len());

        for (original, editable) in temperaments.iter().zip(&imported.temperaments) {
            let original = &original.temperament;
            assert!(!editable.has_errors(), "{}", original.name());
            assert_eq!(editable.stable_id, None);

            let resolved = editable.to_temperament_with_note_names().unwrap();
            assert_eq!(resolved.note_names, None, "{}", original.name());

            let temperament = resolved.temperament;
            assert_eq!(temperament.name(), original.name());
            assert_eq!(temperament.abbreviation(), original.abbreviation());
            assert_eq!(temperament.description(), original.description());
            assert_eq!(temperament.rational_numbers(), original.rational_numbers());
            for (&cents, &expected) in temperament.cents().iter().zip(original.cents()) {
                assert_approx_eq!(cents, expected, 0.005);
            }
        }
    }

    #[test]
    fn round_trip_of_custom_note_names() {
        let exported = export(&[just_triad()]).to_string();
        let imported = ImportedTemperaments::parse(&exported);
        let editable = &imported.temperaments[0];

        let notes: Vec<_> = editable
            .note_lines
            .iter()
            .map(|line| line.as_ref().unwrap().note.unwrap().to_string())
            .collect();
        assert_eq!(notes, ["C", "D", "E", "C"]);

        let resolved = editable.to_temperament_with_note_names().unwrap();
        assert_eq!(resolved.note_names, just_triad().note_names);
        assert_eq!(
            resolved.temperament.rational_numbers(),
            just_triad().temperament.rational_numbers()
        );
    }

    #[test]
    fn a_rooted_equal_temperament_with_explicit_unison() {
        let spellings = [
            "A", "A#/Bb", "B", "C", "C#/Db", "D", "D#/Eb", "E", "F", "F#/Gb", "G", "G#/Ab", "A",
        ];
        let mut text = "! version=1\n!\nTest\n12\n!\n 0/1 note=A\n".to_owned();
        for (step, spelling) in spellings.iter().enumerate().skip(1) {
            text.push_str(&format!(" {:.2} note={spelling}\n", step as f64 * 100.0));
        }

        let imported = ImportedTemperaments::parse(&text);
        assert_eq!(imported.file_check, FileCheck::Ok);

        let resolved = imported.temperaments[0]
            .to_temperament_with_note_names()
            .unwrap();
        let expected_cents: Vec<_> = (0..=12).map(|step| f64::from(step) * 100.0).collect();
        assert_eq!(resolved.temperament.num_notes_per_octave(), 12);
        assert_eq!(resolved.temperament.cents(), expected_cents);

        let scale = MusicalScale::builder(resolved.temperament)
            .note_names(resolved.note_names)
            .build()
            .unwrap();
        assert!(scale.note(0).is_plain(BaseNote::A));
        assert_eq!(scale.note(0).octave, 4);
        assert_eq!(scale.note(3).to_string(), "C");
        assert_eq!(scale.frequency(0), Some(440.0));
    }

    #[test]
    fn metadata_belongs_to_the_following_block() {
        let text = "\
! version=2
! abbreviation=first
First
2
 700.0 note=C
 1200.0 note=D
! description=Second description
!
Second
2
 3/2
 2
Third
1
 1200.0
";
        let imported = ImportedTemperaments::parse(text);
        assert_eq!(imported.file_check, FileCheck::Ok);

        let [first, second, third] = &imported.temperaments[..] else {
            panic!("Expected three temperaments");
        };
        assert_eq!(
            (first.name.as_str(), first.abbreviation.as_str()),
            ("First", "first")
        );
        assert_eq!(first.description, "");
        assert_eq!(second.abbreviation, "");
        assert_eq!(second.description, "Second description");
        assert_eq!(third.name, "Third");
        assert_eq!(third.description, "");

        // The unison is spelled like the octave
        assert_eq!(first.note_lines[0].as_ref().unwrap().note, Some(note("D")));
        assert_eq!(
            second.note_lines[2].as_ref().unwrap().ratio,
            Some(RationalNumber::from_int(2))
        );
        assert_eq!(third.note_lines.len(), 2);
    }

    #[test]
    fn empty_files() {
        let empty = ImportedTemperaments::parse("");
        assert_eq!(empty.file_check, FileCheck::Empty);
        assert_eq!(empty.version, None);

        let header_only = ImportedTemperaments::parse("! version=3\n!\n");
        assert_eq!(header_only.file_check, FileCheck::Empty);
        assert_eq!(header_only.version.as_deref(), Some("3"));

        let no_notes = ImportedTemperaments::parse("Nothing\n0\n");
        assert_eq!(no_notes.file_check, FileCheck::Empty);

        let incomplete = ImportedTemperaments::parse("Incomplete\n3\n100.0\n200.0\n");
        assert_eq!(incomplete.file_check, FileCheck::Empty);
        assert!(incomplete.temperaments.is_empty());
    }

    #[test]
    fn invalid_files() {
        for text in [
            "Bad count\nx\n",
            "Negative count\n-3\n100.0\n",
            "Bad value\n2\n100.0\nabc\n",
            "Negative ratio\n2\n-3/2\n2/1\n",
            "Zero denominator\n2\n3/0\n2/1\n",
            "Late zero\n2\n3/2\n0/1\n",
            "Huge denominator\n1\n1/-9223372036854775808\n",
            "Zero over huge denominator\n2\n0/-9223372036854775808\n2/1\n",
            "Valid\n1\n2/1\nBad count\n1.5\n",
        ] {
            let imported = ImportedTemperaments::parse(text);
            assert_eq!(imported.file_check, FileCheck::Invalid, "{text}");
            assert!(imported.temperaments.is_empty(), "{text}");
        }
    }

    #[test]
    fn import_from_reader() {
        let exported = export(&[just_triad()]).to_string();
        let imported = ImportedTemperaments::import(exported.as_bytes()).unwrap();
        assert_eq!(imported, ImportedTemperaments::parse(&exported));
    }
}
