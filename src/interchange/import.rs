use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::mem;

use crate::editable::EditableTemperament;
use crate::editable::NoteLine;
use crate::note::MusicalNote;
use crate::ratio::RationalNumber;

use super::FileCheck;
use super::ImportedTemperaments;
use super::ABBREVIATION_KEY;
use super::DESCRIPTION_KEY;
use super::NOTE_KEY;
use super::VERSION_KEY;

pub(crate) fn import_temperaments(
    reader: impl Read,
) -> Result<ImportedTemperaments, TemperamentImportError> {
    let mut importer = TemperamentImporter::default();
    for (line_number, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        if let Err(error) = importer.consume(line_number + 1, &line) {
            return Ok(error.into());
        }
    }
    Ok(importer.finalize())
}

pub(crate) fn parse_temperaments(text: &str) -> ImportedTemperaments {
    let mut importer = TemperamentImporter::default();
    for (line_number, line) in text.lines().enumerate() {
        if let Err(error) = importer.consume(line_number + 1, line) {
            return error.into();
        }
    }
    importer.finalize()
}

#[derive(Default)]
struct TemperamentImporter {
    version: Option<String>,
    abbreviation: Option<String>,
    description: Option<String>,
    block: BlockImporter,
    temperaments: Vec<EditableTemperament>,
}

#[derive(Default)]
enum BlockImporter {
    #[default]
    ExpectingName,
    ExpectingNumberOfNotes(String),
    ConsumingNoteLines {
        name: String,
        num_notes: usize,
        unison: Option<NoteLine>,
        note_lines: Vec<NoteLine>,
    },
}

impl TemperamentImporter {
    fn consume(&mut self, line_number: usize, line: &str) -> Result<(), ParseError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        if let Some(comment) = trimmed.strip_prefix('!') {
            self.consume_comment(comment);
            return Ok(());
        }

        self.block = match mem::take(&mut self.block) {
            BlockImporter::ExpectingName => {
                BlockImporter::ExpectingNumberOfNotes(trimmed.to_owned())
            }
            BlockImporter::ExpectingNumberOfNotes(name) => {
                let num_notes = trimmed
                    .parse()
                    .map_err(|_| ParseError(line_number, ParseErrorKind::NumberOfNotes))?;
                if num_notes == 0 {
                    log::debug!("Dropping temperament '{name}' without notes (line {line_number})");
                    self.abbreviation = None;
                    self.description = None;
                    BlockImporter::ExpectingName
                } else {
                    BlockImporter::ConsumingNoteLines {
                        name,
                        num_notes,
                        unison: None,
                        note_lines: Vec::new(),
                    }
                }
            }
            BlockImporter::ConsumingNoteLines {
                name,
                num_notes,
                mut unison,
                mut note_lines,
            } => {
                let note_line = parse_note_line(trimmed)
                    .ok_or(ParseError(line_number, ParseErrorKind::NoteValue))?;
                if note_lines.is_empty() && unison.is_none() && is_unison(&note_line) {
                    unison = Some(note_line);
                } else if note_line.ratio.map_or(false, |ratio| ratio.as_ratio().is_none()) {
                    return Err(ParseError(line_number, ParseErrorKind::NonPositiveRatio));
                } else {
                    note_lines.push(note_line);
                }

                if note_lines.len() == num_notes {
                    self.push_temperament(name, unison, note_lines);
                    BlockImporter::ExpectingName
                } else {
                    BlockImporter::ConsumingNoteLines {
                        name,
                        num_notes,
                        unison,
                        note_lines,
                    }
                }
            }
        };

        Ok(())
    }

    fn consume_comment(&mut self, comment: &str) {
        let Some((key, value)) = comment.split_once('=') else {
            return;
        };
        let value = Some(value.trim().to_owned());
        match key.trim() {
            VERSION_KEY => self.version = value,
            ABBREVIATION_KEY => self.abbreviation = value,
            DESCRIPTION_KEY => self.description = value,
            _ => {}
        }
    }

    /// Prepends the unison, spelled like the explicit unison line or else like the octave.
    fn push_temperament(
        &mut self,
        name: String,
        unison: Option<NoteLine>,
        note_lines: Vec<NoteLine>,
    ) {
        let unison_note = unison
            .and_then(|unison| unison.note)
            .or_else(|| note_lines.last().and_then(|octave| octave.note));
        let unison = NoteLine::new(unison_note, Some(0.0), Some(RationalNumber::one()));

        self.temperaments.push(EditableTemperament {
            name,
            abbreviation: self.abbreviation.take().unwrap_or_default(),
            description: self.description.take().unwrap_or_default(),
            note_lines: [unison].into_iter().chain(note_lines).map(Some).collect(),
            stable_id: None,
        });
    }

    fn finalize(self) -> ImportedTemperaments {
        if let BlockImporter::ConsumingNoteLines {
            name,
            num_notes,
            note_lines,
            ..
        } = &self.block
        {
            log::debug!(
                "Ignoring incomplete temperament '{name}' ({} of {num_notes} notes)",
                note_lines.len()
            );
        }

        let file_check = if self.temperaments.is_empty() {
            FileCheck::Empty
        } else {
            FileCheck::Ok
        };
        ImportedTemperaments {
            file_check,
            version: self.version,
            temperaments: self.temperaments,
        }
    }
}

/// Reads `<value> [note=<spelling>]`.
///
/// Values containing a `.` are cents, all other values are ratios or integers. An unreadable
/// spelling leaves the note empty.
fn parse_note_line(line: &str) -> Option<NoteLine> {
    let (value, rest) = match line.split_once(char::is_whitespace) {
        Some((value, rest)) => (value, rest.trim()),
        None => (line, ""),
    };

    let (cents, ratio) = if value.contains('.') {
        let cents = value.parse::<f64>().ok().filter(|cents| cents.is_finite())?;
        (Some(cents), None)
    } else {
        (None, Some(value.parse::<RationalNumber>().ok()?))
    };

    Some(NoteLine::new(parse_note(rest), cents, ratio))
}

fn parse_note(entry: &str) -> Option<MusicalNote> {
    let (key, spelling) = entry.split_once('=')?;
    if key.trim() != NOTE_KEY {
        return None;
    }
    spelling.parse().ok()
}

/// An explicit unison in front of the counted notes: `0.0`, `1/1` or `0/1`.
fn is_unison(note_line: &NoteLine) -> bool {
    match note_line.ratio {
        Some(ratio) => ratio.is_zero() || ratio == RationalNumber::one(),
        None => note_line.cents == Some(0.0),
    }
}

/// Error reported when reading an interchange file fails.
///
/// Malformed content does not cause an error but is reported as [`FileCheck::Invalid`].
#[derive(Debug)]
pub enum TemperamentImportError {
    IoError(io::Error),
}

impl From<io::Error> for TemperamentImportError {
    fn from(v: io::Error) -> Self {
        Self::IoError(v)
    }
}

struct ParseError(usize, ParseErrorKind);

/// Specifies which kind of item is suspected to be malformed.
#[derive(Debug)]
enum ParseErrorKind {
    /// Invalid or negative number of notes.
    NumberOfNotes,

    /// Neither a cents value nor a ratio.
    NoteValue,

    /// Ratio of zero or below.
    NonPositiveRatio,
}

impl From<ParseError> for ImportedTemperaments {
    fn from(ParseError(line_number, kind): ParseError) -> Self {
        log::debug!("Invalid temperament file: {kind:?} in line {line_number}");
        Self {
            file_check: FileCheck::Invalid,
            version: None,
            temperaments: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_line_values() {
        let line = parse_note_line("100.5").unwrap();
        assert_eq!((line.cents, line.ratio, line.note), (Some(100.5), None, None));

        let line = parse_note_line("3/2    note=G").unwrap();
        assert_eq!(line.ratio, Some(RationalNumber::new(3, 2)));
        assert_eq!(line.note, Some("G".parse().unwrap()));

        let line = parse_note_line("2 note = Eb/D#").unwrap();
        assert_eq!(line.ratio, Some(RationalNumber::from_int(2)));
        assert_eq!(line.note.unwrap().to_string(), "Eb/D#");

        for invalid in ["abc", "100.0.0", "3/2/1", "3/0", "1.0e999", "1,5"] {
            assert!(parse_note_line(invalid).is_none(), "{invalid}");
        }
    }

    #[test]
    fn malformed_spellings_leave_the_note_empty() {
        for line in [
            "100.0 note=H",
            "100.0 note=C#x",
            "100.0 note=",
            "100.0 name=C",
            "100.0 C",
        ] {
            let parsed = parse_note_line(line).unwrap();
            assert_eq!(parsed.cents, Some(100.0), "{line}");
            assert_eq!(parsed.note, None, "{line}");
        }
    }

    #[test]
    fn explicit_unison() {
        for value in ["0.0", "0.00", "1/1", "0/1", "1"] {
            assert!(is_unison(&parse_note_line(value).unwrap()), "{value}");
        }
        for value in ["0.1", "2/1", "-0/1x"] {
            assert!(
                parse_note_line(value).map_or(true, |line| !is_unison(&line)),
                "{value}"
            );
        }
    }
}
