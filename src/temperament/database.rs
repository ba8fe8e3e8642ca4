use crate::fifths::CircleOfFifths;
use crate::ratio::RationalNumber;

use super::Temperament;

const EQUAL_DIVISIONS: [usize; 10] = [12, 17, 19, 22, 24, 27, 29, 31, 41, 53];

const PURE: [(i64, i64); 13] = [
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

const WERCKMEISTER_VI: [(i64, i64); 13] = [
    (1, 1),
    (196, 186),
    (196, 175),
    (196, 165),
    (196, 156),
    (196, 147),
    (196, 139),
    (196, 131),
    (196, 124),
    (196, 117),
    (196, 110),
    (196, 104),
    (2, 1),
];

/// C C# D D# Eb E F F# G G# Ab A A# Bb B C'
const EXTENDED_QUARTER_COMMA_MEANTONE: [f64; 16] = [
    0.0, 76.05, 193.16, 269.21, 310.26, 386.31, 503.42, 579.47, 696.58, 772.63, 813.69, 889.74,
    965.78, 1006.84, 1082.89, 1200.0,
];

/// All built-in temperaments. The stable IDs are -1, -2, ... in list order.
///
/// # Examples
///
/// ```
/// # use temper::temperament::predefined_temperaments;
/// let temperaments = predefined_temperaments();
/// assert_eq!(temperaments[0].abbreviation(), "EDO12");
/// assert_eq!(temperaments[0].stable_id(), Some(-1));
/// assert!(temperaments.iter().any(|t| t.name() == "Werckmeister III"));
/// ```
pub fn predefined_temperaments() -> Vec<Temperament> {
    let mut temperaments = Vec::new();

    for num_divisions in EQUAL_DIVISIONS {
        temperaments.push(Temperament::equal_division(num_divisions).with_name(
            format!("{num_divisions}-tone equal temperament"),
            format!("EDO{num_divisions}"),
            format!("Octave divided into {num_divisions} equal steps."),
        ));
    }

    temperaments.push(
        Temperament::from_circle_of_fifths(CircleOfFifths::pythagorean()).with_name(
            "Pythagorean tuning",
            "Pyth",
            "",
        ),
    );
    temperaments.push(
        Temperament::from_rational_numbers(rational_numbers(&PURE)).with_name(
            "Pure tuning",
            "Pure",
            "Just intonation with pure thirds and fifths relative to the root note.",
        ),
    );
    temperaments.push(
        Temperament::from_circle_of_fifths(CircleOfFifths::quarter_comma_meantone()).with_name(
            "Quarter-comma meantone",
            "1/4MT",
            "Fifths narrowed by a quarter syntonic comma, resulting in pure major thirds.",
        ),
    );
    temperaments.push(
        Temperament::from_cents(EXTENDED_QUARTER_COMMA_MEANTONE.to_vec()).with_name(
            "Extended quarter-comma meantone",
            "Ext1/4MT",
            "Quarter-comma meantone with separate notes for D#/Eb, G#/Ab and A#/Bb.",
        ),
    );
    temperaments.push(
        Temperament::from_circle_of_fifths(CircleOfFifths::third_comma_meantone()).with_name(
            "Third-comma meantone",
            "1/3MT",
            "Fifths narrowed by a third syntonic comma, resulting in pure minor thirds.",
        ),
    );
    temperaments.push(
        Temperament::from_circle_of_fifths(CircleOfFifths::fifth_comma_meantone()).with_name(
            "Fifth-comma meantone",
            "1/5MT",
            "Fifths narrowed by a fifth syntonic comma.",
        ),
    );

    for (circle, name, abbreviation) in [
        (CircleOfFifths::werckmeister_iii(), "Werckmeister III", "WIII"),
        (CircleOfFifths::werckmeister_iv(), "Werckmeister IV", "WIV"),
        (CircleOfFifths::werckmeister_v(), "Werckmeister V", "WV"),
    ] {
        temperaments.push(
            Temperament::from_circle_of_fifths(circle).with_name(name, abbreviation, ""),
        );
    }
    temperaments.push(
        Temperament::from_rational_numbers(rational_numbers(&WERCKMEISTER_VI)).with_name(
            "Werckmeister VI",
            "WVI",
            "Also known as septenarius tuning, all ratios are based on the number 196.",
        ),
    );

    for (circle, name, abbreviation, description) in [
        (CircleOfFifths::kirnberger1(), "Kirnberger I", "KI", ""),
        (CircleOfFifths::kirnberger2(), "Kirnberger II", "KII", ""),
        (CircleOfFifths::kirnberger3(), "Kirnberger III", "KIII", ""),
        (
            CircleOfFifths::neidhardt1(),
            "Neidhardt I",
            "NI",
            "For a village (1732).",
        ),
        (
            CircleOfFifths::neidhardt2(),
            "Neidhardt II",
            "NII",
            "For a village (1724) or a small town (1732).",
        ),
        (
            CircleOfFifths::neidhardt3(),
            "Neidhardt III",
            "NIII",
            "For a small town (1724) or a large town (1732).",
        ),
        (CircleOfFifths::vallotti(), "Vallotti", "Val", ""),
        (CircleOfFifths::young2(), "Young II", "YII", ""),
    ] {
        temperaments.push(
            Temperament::from_circle_of_fifths(circle).with_name(name, abbreviation, description),
        );
    }

    temperaments
        .into_iter()
        .zip(1i64..)
        .map(|(temperament, position)| temperament.with_stable_id(-position))
        .collect()
}

fn rational_numbers(values: &[(i64, i64)]) -> Vec<RationalNumber> {
    values
        .iter()
        .map(|&(numer, denom)| RationalNumber::new(numer, denom))
        .collect()
}
