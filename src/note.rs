//! Spelled musical notes with accidentals, octave offsets and enharmonic alternatives.

use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

/// Octave assigned to notes that are parsed or tabulated without an explicit octave.
pub const DEFAULT_OCTAVE: i32 = 4;

/// One of the seven natural note letters.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BaseNote {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl BaseNote {
    pub const ALL: [BaseNote; 7] = [
        BaseNote::C,
        BaseNote::D,
        BaseNote::E,
        BaseNote::F,
        BaseNote::G,
        BaseNote::A,
        BaseNote::B,
    ];

    pub fn letter(self) -> char {
        match self {
            BaseNote::C => 'C',
            BaseNote::D => 'D',
            BaseNote::E => 'E',
            BaseNote::F => 'F',
            BaseNote::G => 'G',
            BaseNote::A => 'A',
            BaseNote::B => 'B',
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|base| base.letter() == letter)
    }
}

/// Accidental of a note.
///
/// Apart from flats and sharps, up (`^`) and down (`v`) arrows describe the small steps of
/// the larger equal divisions of the octave.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NoteModifier {
    FlatDownDown,
    FlatDown,
    Flat,
    FlatUp,
    FlatUpUp,
    NaturalDownDown,
    NaturalDown,
    Natural,
    NaturalUp,
    NaturalUpUp,
    SharpDownDown,
    SharpDown,
    Sharp,
    SharpUp,
    SharpUpUp,
}

impl NoteModifier {
    pub const ALL: [NoteModifier; 15] = [
        NoteModifier::FlatDownDown,
        NoteModifier::FlatDown,
        NoteModifier::Flat,
        NoteModifier::FlatUp,
        NoteModifier::FlatUpUp,
        NoteModifier::NaturalDownDown,
        NoteModifier::NaturalDown,
        NoteModifier::Natural,
        NoteModifier::NaturalUp,
        NoteModifier::NaturalUpUp,
        NoteModifier::SharpDownDown,
        NoteModifier::SharpDown,
        NoteModifier::Sharp,
        NoteModifier::SharpUp,
        NoteModifier::SharpUpUp,
    ];

    /// Textual token of the modifier as used by the interchange format.
    ///
    /// ```
    /// # use temper::note::NoteModifier;
    /// assert_eq!(NoteModifier::Natural.token(), "");
    /// assert_eq!(NoteModifier::FlatDownDown.token(), "vvb");
    /// assert_eq!(NoteModifier::SharpUp.token(), "^#");
    /// ```
    pub fn token(self) -> &'static str {
        match self {
            NoteModifier::FlatDownDown => "vvb",
            NoteModifier::FlatDown => "vb",
            NoteModifier::Flat => "b",
            NoteModifier::FlatUp => "^b",
            NoteModifier::FlatUpUp => "^^b",
            NoteModifier::NaturalDownDown => "vv",
            NoteModifier::NaturalDown => "v",
            NoteModifier::Natural => "",
            NoteModifier::NaturalUp => "^",
            NoteModifier::NaturalUpUp => "^^",
            NoteModifier::SharpDownDown => "vv#",
            NoteModifier::SharpDown => "v#",
            NoteModifier::Sharp => "#",
            NoteModifier::SharpUp => "^#",
            NoteModifier::SharpUpUp => "^^#",
        }
    }

    /// Splits the longest matching modifier token off the beginning of `s`.
    fn split_prefix(s: &str) -> (Self, &str) {
        let modifier = Self::ALL
            .into_iter()
            .filter(|modifier| s.starts_with(modifier.token()))
            .max_by_key(|modifier| modifier.token().len())
            .unwrap_or(NoteModifier::Natural);
        (modifier, &s[modifier.token().len()..])
    }
}

/// Letter, accidental and octave offset of one spelling of a note.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Spelling {
    pub base: BaseNote,
    pub modifier: NoteModifier,
    /// Offset added to the octave of the note when displaying this spelling, e.g. B# in an
    /// octave starting at C is spelled as belonging to the next octave.
    pub octave_offset: i32,
}

impl Spelling {
    pub const fn new(base: BaseNote, modifier: NoteModifier) -> Self {
        Self {
            base,
            modifier,
            octave_offset: 0,
        }
    }

    pub fn is_plain(self, base: BaseNote) -> bool {
        self.base == base && self.modifier == NoteModifier::Natural
    }

    fn parse_prefix(s: &str) -> Result<(Self, &str), String> {
        let mut chars = s.chars();
        let base = chars
            .next()
            .and_then(BaseNote::from_letter)
            .ok_or_else(|| format!("Expected a note letter at '{s}'"))?;
        let (modifier, rest) = NoteModifier::split_prefix(chars.as_str());
        let (octave_offset, rest) = split_octave_offset(rest)?;
        Ok((
            Self {
                base,
                modifier,
                octave_offset,
            },
            rest,
        ))
    }
}

fn split_octave_offset(s: &str) -> Result<(i32, &str), String> {
    if !s.starts_with(['+', '-']) {
        return Ok((0, s));
    }
    let end = s[1..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |pos| pos + 1);
    let offset = s[..end]
        .parse()
        .map_err(|_| format!("Invalid octave offset '{}'", &s[..end]))?;
    Ok((offset, &s[end..]))
}

impl Display for Spelling {
    /// ```
    /// # use temper::note::{BaseNote, NoteModifier, Spelling};
    /// let spelling = Spelling::new(BaseNote::C, NoteModifier::SharpDown);
    /// assert_eq!(spelling.to_string(), "Cv#");
    ///
    /// let spelling = Spelling { octave_offset: 1, ..Spelling::new(BaseNote::B, NoteModifier::Sharp) };
    /// assert_eq!(spelling.to_string(), "B#+1");
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base.letter(), self.modifier.token())?;
        if self.octave_offset != 0 {
            write!(f, "{:+}", self.octave_offset)?;
        }
        Ok(())
    }
}

/// A spelled note, optionally with an enharmonic alternative, located in a specific octave.
///
/// A note without a primary spelling is allowed as long as an enharmonic spelling exists.
/// This is how the interchange format writes `-/Db`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MusicalNote {
    pub primary: Option<Spelling>,
    pub enharmonic: Option<Spelling>,
    pub octave: i32,
}

impl MusicalNote {
    pub const fn new(base: BaseNote, modifier: NoteModifier) -> Self {
        Self {
            primary: Some(Spelling::new(base, modifier)),
            enharmonic: None,
            octave: DEFAULT_OCTAVE,
        }
    }

    pub const fn with_enharmonic(self, base: BaseNote, modifier: NoteModifier) -> Self {
        Self {
            enharmonic: Some(Spelling::new(base, modifier)),
            ..self
        }
    }

    pub const fn with_octave(self, octave: i32) -> Self {
        Self { octave, ..self }
    }

    pub const fn with_octave_offset(self, octave_offset: i32) -> Self {
        Self {
            primary: match self.primary {
                Some(spelling) => Some(Spelling {
                    octave_offset,
                    ..spelling
                }),
                None => None,
            },
            ..self
        }
    }

    pub const fn with_enharmonic_octave_offset(self, octave_offset: i32) -> Self {
        Self {
            enharmonic: match self.enharmonic {
                Some(spelling) => Some(Spelling {
                    octave_offset,
                    ..spelling
                }),
                None => None,
            },
            ..self
        }
    }

    /// Returns the note with primary and enharmonic spelling exchanged.
    ///
    /// Notes without an enharmonic spelling are returned unchanged.
    ///
    /// ```
    /// # use temper::note::{BaseNote, MusicalNote, NoteModifier};
    /// let c_sharp = MusicalNote::new(BaseNote::C, NoteModifier::Sharp)
    ///     .with_enharmonic(BaseNote::D, NoteModifier::Flat);
    /// assert_eq!(c_sharp.switch_enharmonic().to_string(), "Db/C#");
    /// assert_eq!(c_sharp.switch_enharmonic().switch_enharmonic(), c_sharp);
    ///
    /// let d = MusicalNote::new(BaseNote::D, NoteModifier::Natural);
    /// assert_eq!(d.switch_enharmonic(), d);
    /// ```
    pub fn switch_enharmonic(self) -> Self {
        match self.enharmonic {
            None => self,
            Some(enharmonic) => Self {
                primary: Some(enharmonic),
                enharmonic: self.primary,
                octave: self.octave,
            },
        }
    }

    /// Compares all spelling attributes but ignores the octave.
    pub fn equals_ignoring_octave(&self, other: &MusicalNote) -> bool {
        self.primary == other.primary && self.enharmonic == other.enharmonic
    }

    /// Checks whether any spelling of `self` coincides with any spelling of `other`.
    ///
    /// ```
    /// # use temper::note::{BaseNote, MusicalNote, NoteModifier};
    /// let c_sharp = MusicalNote::new(BaseNote::C, NoteModifier::Sharp)
    ///     .with_enharmonic(BaseNote::D, NoteModifier::Flat);
    /// let d_flat = MusicalNote::new(BaseNote::D, NoteModifier::Flat);
    /// assert!(c_sharp.matches(&d_flat, false));
    /// assert!(!c_sharp.matches(&d_flat.with_octave(5), false));
    /// assert!(c_sharp.matches(&d_flat.with_octave(5), true));
    /// assert!(!c_sharp.matches(&MusicalNote::new(BaseNote::D, NoteModifier::Natural), true));
    /// ```
    pub fn matches(&self, other: &MusicalNote, ignore_octave: bool) -> bool {
        if !ignore_octave && self.octave != other.octave {
            return false;
        }
        let own = [self.primary, self.enharmonic];
        let others = [other.primary, other.enharmonic];
        own.iter()
            .flatten()
            .any(|spelling| others.iter().flatten().any(|other| spelling == other))
    }

    /// Checks whether the primary or the enharmonic spelling is the natural `base`, regardless of
    /// octave offsets.
    pub fn is_plain(&self, base: BaseNote) -> bool {
        [self.primary, self.enharmonic]
            .iter()
            .flatten()
            .any(|spelling| spelling.is_plain(base))
    }
}

impl Display for MusicalNote {
    /// Writes the note in the compact spelling syntax of the interchange format.
    ///
    /// The alternate flag appends the octave.
    ///
    /// ```
    /// # use temper::note::{BaseNote, MusicalNote, NoteModifier};
    /// let note = MusicalNote::new(BaseNote::A, NoteModifier::Sharp)
    ///     .with_enharmonic(BaseNote::B, NoteModifier::Flat);
    /// assert_eq!(note.to_string(), "A#/Bb");
    /// assert_eq!(format!("{note:#}"), "A#/Bb 4");
    /// assert_eq!(format!("{note:>7}"), "  A#/Bb");
    ///
    /// let enharmonic_only = MusicalNote {
    ///     primary: None,
    ///     ..note.switch_enharmonic()
    /// };
    /// assert_eq!(enharmonic_only.to_string(), "-/A#");
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut formatted = match self.primary {
            Some(primary) => primary.to_string(),
            None => "-".to_owned(),
        };
        if let Some(enharmonic) = self.enharmonic {
            formatted.push('/');
            formatted.push_str(&enharmonic.to_string());
        }
        if f.alternate() {
            formatted.push(' ');
            formatted.push_str(&self.octave.to_string());
        }
        f.pad(&formatted)
    }
}

/// Parses the compact spelling syntax `<Base><Modifier>[±Offset][/<Base><Modifier>[±Offset]]`.
///
/// A leading `-` stands for a missing primary spelling. The octave is set to [`DEFAULT_OCTAVE`].
///
/// ```
/// # use temper::note::{BaseNote, MusicalNote, NoteModifier};
/// let note: MusicalNote = "Cv#/D^b".parse().unwrap();
/// assert_eq!(
///     note,
///     MusicalNote::new(BaseNote::C, NoteModifier::SharpDown)
///         .with_enharmonic(BaseNote::D, NoteModifier::FlatUp)
/// );
///
/// let note: MusicalNote = "B^^/Cvv+1".parse().unwrap();
/// assert_eq!(note.enharmonic.unwrap().octave_offset, 1);
///
/// let note: MusicalNote = "- /Db".parse().unwrap();
/// assert_eq!(note.primary, None);
///
/// assert!("H".parse::<MusicalNote>().is_err());
/// assert!("-".parse::<MusicalNote>().is_err());
/// ```
impl FromStr for MusicalNote {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (primary, rest) = match s.strip_prefix('-') {
            Some(rest) => (None, rest.trim_start()),
            None => {
                let (spelling, rest) = Spelling::parse_prefix(s)?;
                (Some(spelling), rest.trim_start())
            }
        };

        let enharmonic = match rest.strip_prefix('/') {
            Some(rest) => {
                let (spelling, rest) = Spelling::parse_prefix(rest.trim_start())?;
                if !rest.trim().is_empty() {
                    return Err(format!("Unexpected trailing characters in '{s}'"));
                }
                Some(spelling)
            }
            None if rest.is_empty() => None,
            None => return Err(format!("Unexpected trailing characters in '{s}'")),
        };

        if primary.is_none() && enharmonic.is_none() {
            return Err(format!("Note '{s}' has neither a spelling nor an enharmonic"));
        }

        Ok(Self {
            primary,
            enharmonic,
            octave: DEFAULT_OCTAVE,
        })
    }
}
