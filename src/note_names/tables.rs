//! Built-in note spellings for the supported equal divisions of the octave.

use crate::note::BaseNote;
use crate::note::BaseNote::*;
use crate::note::MusicalNote;
use crate::note::NoteModifier;
use crate::note::NoteModifier::*;

const fn n(base: BaseNote, modifier: NoteModifier) -> MusicalNote {
    MusicalNote::new(base, modifier)
}

/// Note spellings and the index of the default reference note (A) for each supported division.
pub(super) static TABLES: [(&[MusicalNote], usize); 11] = [
    (&NOTES_12, 9),
    (&NOTES_15, 11),
    (&NOTES_17, 13),
    (&NOTES_19, 14),
    (&NOTES_22, 17),
    (&NOTES_24, 18),
    (&NOTES_27, 21),
    (&NOTES_29, 22),
    (&NOTES_31, 23),
    (&NOTES_41, 31),
    (&NOTES_53, 40),
];

static NOTES_12: [MusicalNote; 12] = [
    n(C, Natural),
    n(C, Sharp).with_enharmonic(D, Flat),
    n(D, Natural),
    n(E, Flat).with_enharmonic(D, Sharp),
    n(E, Natural),
    n(F, Natural),
    n(F, Sharp).with_enharmonic(G, Flat),
    n(G, Natural),
    n(G, Sharp).with_enharmonic(A, Flat),
    n(A, Natural),
    n(B, Flat).with_enharmonic(A, Sharp),
    n(B, Natural),
];

static NOTES_15: [MusicalNote; 15] = [
    n(C, Natural),
    n(C, Sharp).with_enharmonic(D, Flat),
    n(D, Natural),
    n(D, Sharp),
    n(E, Flat),
    n(E, Natural),
    n(F, Natural),
    n(F, Sharp).with_enharmonic(G, Flat),
    n(G, Natural),
    n(G, Sharp),
    n(A, Flat),
    n(A, Natural),
    n(A, Sharp),
    n(B, Flat),
    n(B, Natural),
];

static NOTES_17: [MusicalNote; 17] = [
    n(C, Natural),
    n(C, NaturalUp),
    n(D, NaturalDown),
    n(D, Natural),
    n(D, NaturalUp),
    n(E, NaturalDown),
    n(E, Natural),
    n(F, Natural),
    n(F, NaturalUp),
    n(G, NaturalDown),
    n(G, Natural),
    n(G, NaturalUp),
    n(A, NaturalDown),
    n(A, Natural),
    n(A, NaturalUp),
    n(B, NaturalDown),
    n(B, Natural),
];

static NOTES_19: [MusicalNote; 19] = [
    n(C, Natural),
    n(C, Sharp),
    n(D, Flat),
    n(D, Natural),
    n(D, Sharp),
    n(E, Flat),
    n(E, Natural),
    n(E, Sharp).with_enharmonic(F, Flat),
    n(F, Natural),
    n(F, Sharp),
    n(G, Flat),
    n(G, Natural),
    n(G, Sharp),
    n(A, Flat),
    n(A, Natural),
    n(A, Sharp),
    n(B, Flat),
    n(B, Natural),
    n(B, Sharp).with_enharmonic(C, Flat).with_enharmonic_octave_offset(1),
];

static NOTES_22: [MusicalNote; 22] = [
    n(C, Natural),
    n(C, NaturalUp),
    n(C, SharpDown).with_enharmonic(D, FlatUp),
    n(D, NaturalDown),
    n(D, Natural),
    n(D, NaturalUp),
    n(D, SharpDown).with_enharmonic(E, FlatUp),
    n(E, NaturalDown),
    n(E, Natural),
    n(F, Natural),
    n(F, NaturalUp),
    n(F, SharpDown).with_enharmonic(G, FlatUp),
    n(G, NaturalDown),
    n(G, Natural),
    n(G, NaturalUp),
    n(G, SharpDown).with_enharmonic(A, FlatUp),
    n(A, NaturalDown),
    n(A, Natural),
    n(A, NaturalUp),
    n(A, SharpDown).with_enharmonic(B, FlatUp),
    n(B, NaturalDown),
    n(B, Natural),
];

static NOTES_24: [MusicalNote; 24] = [
    n(C, Natural),
    n(C, NaturalUp),
    n(C, Sharp).with_enharmonic(D, Flat),
    n(D, NaturalDown),
    n(D, Natural),
    n(D, NaturalUp),
    n(D, Sharp).with_enharmonic(E, Flat),
    n(E, NaturalDown),
    n(E, Natural),
    n(E, NaturalUp).with_enharmonic(F, NaturalDown),
    n(F, Natural),
    n(F, NaturalUp),
    n(F, Sharp).with_enharmonic(G, Flat),
    n(G, NaturalDown),
    n(G, Natural),
    n(G, NaturalUp),
    n(G, Sharp).with_enharmonic(A, Flat),
    n(A, NaturalDown),
    n(A, Natural),
    n(A, NaturalUp),
    n(A, Sharp).with_enharmonic(B, Flat),
    n(B, NaturalDown),
    n(B, Natural),
    n(B, NaturalUp).with_enharmonic(C, NaturalDown).with_enharmonic_octave_offset(1),
];

static NOTES_27: [MusicalNote; 27] = [
    n(C, Natural),
    n(C, NaturalUp),
    n(C, NaturalUpUp),
    n(D, NaturalDownDown),
    n(D, NaturalDown),
    n(D, Natural),
    n(D, NaturalUp),
    n(D, NaturalUpUp),
    n(E, NaturalDownDown),
    n(E, NaturalDown),
    n(E, Natural),
    n(F, Natural),
    n(F, NaturalUp),
    n(F, NaturalUpUp),
    n(G, NaturalDownDown),
    n(G, NaturalDown),
    n(G, Natural),
    n(G, NaturalUp),
    n(G, NaturalUpUp),
    n(A, NaturalDownDown),
    n(A, NaturalDown),
    n(A, Natural),
    n(A, NaturalUp),
    n(A, NaturalUpUp),
    n(B, NaturalDownDown),
    n(B, NaturalDown),
    n(B, Natural),
];

static NOTES_29: [MusicalNote; 29] = [
    n(C, Natural),
    n(C, NaturalUp),
    n(C, SharpDown).with_enharmonic(D, Flat),
    n(C, Sharp).with_enharmonic(D, FlatUp),
    n(D, NaturalDown),
    n(D, Natural),
    n(D, NaturalUp),
    n(D, SharpDown).with_enharmonic(E, Flat),
    n(D, Sharp).with_enharmonic(E, FlatUp),
    n(E, NaturalDown),
    n(E, Natural),
    n(E, NaturalUp).with_enharmonic(F, NaturalDown),
    n(F, Natural),
    n(F, NaturalUp),
    n(F, SharpDown).with_enharmonic(G, Flat),
    n(F, Sharp).with_enharmonic(G, FlatUp),
    n(G, NaturalDown),
    n(G, Natural),
    n(G, NaturalUp),
    n(G, SharpDown).with_enharmonic(A, Flat),
    n(G, Sharp).with_enharmonic(A, FlatUp),
    n(A, NaturalDown),
    n(A, Natural),
    n(A, NaturalUp),
    n(A, SharpDown).with_enharmonic(B, Flat),
    n(A, Sharp).with_enharmonic(B, FlatUp),
    n(B, NaturalDown),
    n(B, Natural),
    n(B, NaturalUp).with_enharmonic(C, NaturalDown).with_enharmonic_octave_offset(1),
];

static NOTES_31: [MusicalNote; 31] = [
    n(C, Natural),
    n(C, NaturalUp),
    n(C, Sharp),
    n(D, Flat),
    n(D, NaturalDown),
    n(D, Natural),
    n(D, NaturalUp),
    n(D, Sharp),
    n(E, Flat),
    n(E, NaturalDown),
    n(E, Natural),
    n(E, NaturalUp),
    n(F, NaturalDown),
    n(F, Natural),
    n(F, NaturalUp),
    n(F, Sharp),
    n(G, Flat),
    n(G, NaturalDown),
    n(G, Natural),
    n(G, NaturalUp),
    n(G, Sharp),
    n(A, Flat),
    n(A, NaturalDown),
    n(A, Natural),
    n(A, NaturalUp),
    n(A, Sharp),
    n(B, Flat),
    n(B, NaturalDown),
    n(B, Natural),
    n(B, NaturalUp),
    n(C, NaturalDown).with_octave_offset(1),
];

static NOTES_41: [MusicalNote; 41] = [
    n(C, Natural),
    n(C, NaturalUp),
    n(C, NaturalUpUp).with_enharmonic(D, FlatDown),
    n(C, SharpDown).with_enharmonic(D, Flat),
    n(D, FlatUp).with_enharmonic(C, Sharp),
    n(D, NaturalDownDown).with_enharmonic(C, SharpUp),
    n(D, NaturalDown),
    n(D, Natural),
    n(D, NaturalUp),
    n(D, NaturalUpUp).with_enharmonic(E, FlatDown),
    n(D, SharpDown).with_enharmonic(E, Flat),
    n(E, FlatUp).with_enharmonic(D, Sharp),
    n(E, NaturalDownDown).with_enharmonic(D, SharpUp),
    n(E, NaturalDown),
    n(E, Natural),
    n(E, NaturalUp),
    n(F, NaturalDown),
    n(F, Natural),
    n(F, NaturalUp),
    n(F, NaturalUpUp).with_enharmonic(G, FlatDown),
    n(F, SharpDown).with_enharmonic(G, Flat),
    n(G, FlatUp).with_enharmonic(F, Sharp),
    n(G, NaturalDownDown).with_enharmonic(F, SharpUp),
    n(G, NaturalDown),
    n(G, Natural),
    n(G, NaturalUp),
    n(G, NaturalUpUp).with_enharmonic(A, FlatDown),
    n(G, SharpDown).with_enharmonic(A, Flat),
    n(A, FlatUp).with_enharmonic(G, Sharp),
    n(A, NaturalDownDown).with_enharmonic(G, SharpUp),
    n(A, NaturalDown),
    n(A, Natural),
    n(A, NaturalUp),
    n(A, NaturalUpUp).with_enharmonic(B, FlatDown),
    n(A, SharpDown).with_enharmonic(B, Flat),
    n(B, FlatUp).with_enharmonic(A, Sharp),
    n(B, NaturalDownDown).with_enharmonic(A, SharpUp),
    n(B, NaturalDown),
    n(B, Natural),
    n(B, NaturalUp),
    n(C, NaturalDown).with_octave_offset(1),
];

static NOTES_53: [MusicalNote; 53] = [
    n(C, Natural),
    n(C, NaturalUp),
    n(C, NaturalUpUp),
    n(C, SharpDownDown).with_enharmonic(D, FlatDown),
    n(C, SharpDown).with_enharmonic(D, Flat),
    n(D, FlatUp).with_enharmonic(C, Sharp),
    n(D, FlatUpUp).with_enharmonic(C, SharpUp),
    n(D, NaturalDownDown),
    n(D, NaturalDown),
    n(D, Natural),
    n(D, NaturalUp),
    n(D, NaturalUpUp),
    n(D, SharpDownDown).with_enharmonic(E, FlatDown),
    n(D, SharpDown).with_enharmonic(E, Flat),
    n(E, FlatUp).with_enharmonic(D, Sharp),
    n(E, FlatUpUp).with_enharmonic(D, SharpUp),
    n(E, NaturalDownDown),
    n(E, NaturalDown),
    n(E, Natural),
    n(E, NaturalUp),
    n(E, NaturalUpUp).with_enharmonic(F, NaturalDownDown),
    n(F, NaturalDown),
    n(F, Natural),
    n(F, NaturalUp),
    n(F, NaturalUpUp),
    n(F, SharpDownDown).with_enharmonic(G, FlatDown),
    n(F, SharpDown).with_enharmonic(G, Flat),
    n(G, FlatUp).with_enharmonic(F, Sharp),
    n(G, FlatUpUp).with_enharmonic(F, SharpUp),
    n(G, NaturalDownDown),
    n(G, NaturalDown),
    n(G, Natural),
    n(G, NaturalUp),
    n(G, NaturalUpUp),
    n(G, SharpDownDown).with_enharmonic(A, FlatDown),
    n(G, SharpDown).with_enharmonic(A, Flat),
    n(A, FlatUp).with_enharmonic(G, Sharp),
    n(A, FlatUpUp).with_enharmonic(G, SharpUp),
    n(A, NaturalDownDown),
    n(A, NaturalDown),
    n(A, Natural),
    n(A, NaturalUp),
    n(A, NaturalUpUp),
    n(A, SharpDownDown).with_enharmonic(B, FlatDown),
    n(A, SharpDown).with_enharmonic(B, Flat),
    n(B, FlatUp).with_enharmonic(A, Sharp),
    n(B, FlatUpUp).with_enharmonic(A, SharpUp),
    n(B, NaturalDownDown),
    n(B, NaturalDown),
    n(B, Natural),
    n(B, NaturalUp),
    n(B, NaturalUpUp).with_enharmonic(C, NaturalDownDown).with_enharmonic_octave_offset(1),
    n(C, NaturalDown).with_octave_offset(1),
];
