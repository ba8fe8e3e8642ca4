//! Temperaments described by modifying the pure fifths of a circle or chain of fifths.

use std::ops::Add;
use std::ops::Neg;
use std::ops::Sub;

use crate::ratio::RationalNumber;

/// The Pythagorean comma 531441/524288, i.e. twelve pure fifths minus seven octaves.
pub fn pythagorean_comma() -> RationalNumber {
    RationalNumber::new(531441, 524288)
}

/// The syntonic comma 81/80, i.e. four pure fifths minus a pure major third and two octaves.
pub fn syntonic_comma() -> RationalNumber {
    RationalNumber::new(81, 80)
}

/// The schisma 32805/32768, the difference between the Pythagorean and the syntonic comma.
pub fn schisma() -> RationalNumber {
    RationalNumber::new(32805, 32768)
}

/// Deviation of a fifth from the pure fifth 3/2 expressed as rational powers of three commas.
///
/// Since 1 Pythagorean comma = 1 syntonic comma + 1 schisma, the same deviation can be
/// written in several ways. Every constructor and operator normalizes the representation.
///
/// # Examples
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// # use temper::fifths::FifthModification;
/// # use temper::ratio::RationalNumber;
/// let quarter_comma = FifthModification::syntonic(RationalNumber::new(-1, 4));
/// assert_approx_eq!(quarter_comma.as_float(), 0.996_899_19);
///
/// // A syntonic comma plus a schisma is a Pythagorean comma
/// let sum = FifthModification::syntonic(RationalNumber::one())
///     + FifthModification::schisma(RationalNumber::one());
/// assert_eq!(sum, FifthModification::pythagorean(RationalNumber::one()));
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct FifthModification {
    pythagorean_comma: RationalNumber,
    syntonic_comma: RationalNumber,
    schisma: RationalNumber,
}

impl FifthModification {
    pub fn new(
        pythagorean_comma: RationalNumber,
        syntonic_comma: RationalNumber,
        schisma: RationalNumber,
    ) -> Self {
        Self {
            pythagorean_comma,
            syntonic_comma,
            schisma,
        }
        .simplified()
    }

    pub fn pythagorean(amount: RationalNumber) -> Self {
        Self::new(amount, RationalNumber::zero(), RationalNumber::zero())
    }

    pub fn syntonic(amount: RationalNumber) -> Self {
        Self::new(RationalNumber::zero(), amount, RationalNumber::zero())
    }

    pub fn schisma(amount: RationalNumber) -> Self {
        Self::new(RationalNumber::zero(), RationalNumber::zero(), amount)
    }

    pub fn pythagorean_comma(&self) -> RationalNumber {
        self.pythagorean_comma
    }

    pub fn syntonic_comma(&self) -> RationalNumber {
        self.syntonic_comma
    }

    pub fn schisma_amount(&self) -> RationalNumber {
        self.schisma
    }

    pub fn is_pure(&self) -> bool {
        self.pythagorean_comma.is_zero() && self.syntonic_comma.is_zero() && self.schisma.is_zero()
    }

    /// Linear factor by which the pure fifth is altered.
    pub fn as_float(&self) -> f64 {
        pythagorean_comma()
            .as_float()
            .powf(self.pythagorean_comma.as_float())
            * syntonic_comma()
                .as_float()
                .powf(self.syntonic_comma.as_float())
            * schisma().as_float().powf(self.schisma.as_float())
    }

    fn simplified(self) -> Self {
        let zero = RationalNumber::zero();
        if self.syntonic_comma == self.schisma {
            Self {
                pythagorean_comma: self.pythagorean_comma + self.schisma,
                syntonic_comma: zero,
                schisma: zero,
            }
        } else if self.pythagorean_comma == -self.schisma {
            Self {
                pythagorean_comma: zero,
                syntonic_comma: self.syntonic_comma + self.pythagorean_comma,
                schisma: zero,
            }
        } else if self.pythagorean_comma == -self.syntonic_comma {
            Self {
                pythagorean_comma: zero,
                syntonic_comma: zero,
                schisma: self.schisma + self.pythagorean_comma,
            }
        } else {
            self
        }
    }
}

impl Add for FifthModification {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.pythagorean_comma + rhs.pythagorean_comma,
            self.syntonic_comma + rhs.syntonic_comma,
            self.schisma + rhs.schisma,
        )
    }
}

impl Sub for FifthModification {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl Neg for FifthModification {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.pythagorean_comma, -self.syntonic_comma, -self.schisma)
    }
}

/// Twelve fifths starting at C and closing at C one octave (after seven octave reductions) above.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct CircleOfFifths {
    pub c_g: FifthModification,
    pub g_d: FifthModification,
    pub d_a: FifthModification,
    pub a_e: FifthModification,
    pub e_b: FifthModification,
    pub b_f_sharp: FifthModification,
    pub f_sharp_c_sharp: FifthModification,
    pub c_sharp_g_sharp: FifthModification,
    pub g_sharp_e_flat: FifthModification,
    pub e_flat_b_flat: FifthModification,
    pub b_flat_f: FifthModification,
    pub f_c: FifthModification,
}

/// Position within the chromatic octave reached after `k + 1` fifths and the number of octaves
/// to reduce by.
const CIRCLE_STEPS: [(usize, i32); 12] = [
    (7, 0),
    (2, 1),
    (9, 1),
    (4, 2),
    (11, 2),
    (6, 3),
    (1, 4),
    (8, 4),
    (3, 5),
    (10, 5),
    (5, 6),
    (12, 6),
];

impl CircleOfFifths {
    /// Builds a circle from its fifths in the order C-G, G-D, ..., F-C.
    pub fn from_fifths(fifths: [FifthModification; 12]) -> Self {
        let [
            c_g,
            g_d,
            d_a,
            a_e,
            e_b,
            b_f_sharp,
            f_sharp_c_sharp,
            c_sharp_g_sharp,
            g_sharp_e_flat,
            e_flat_b_flat,
            b_flat_f,
            f_c,
        ] = fifths;
        Self {
            c_g,
            g_d,
            d_a,
            a_e,
            e_b,
            b_f_sharp,
            f_sharp_c_sharp,
            c_sharp_g_sharp,
            g_sharp_e_flat,
            e_flat_b_flat,
            b_flat_f,
            f_c,
        }
    }

    /// The fifths in the order C-G, G-D, ..., F-C.
    pub fn fifths(&self) -> [FifthModification; 12] {
        [
            self.c_g,
            self.g_d,
            self.d_a,
            self.a_e,
            self.e_b,
            self.b_f_sharp,
            self.f_sharp_c_sharp,
            self.c_sharp_g_sharp,
            self.g_sharp_e_flat,
            self.e_flat_b_flat,
            self.b_flat_f,
            self.f_c,
        ]
    }

    /// Ratios of the notes C, C#, D, ..., B, C' relative to C.
    ///
    /// # Examples
    ///
    /// ```
    /// # use assert_approx_eq::assert_approx_eq;
    /// # use temper::fifths::CircleOfFifths;
    /// let ratios = CircleOfFifths::pythagorean().ratios();
    /// assert_eq!(ratios.len(), 13);
    /// assert_approx_eq!(ratios[0], 1.0);
    /// assert_approx_eq!(ratios[7], 1.5);
    /// assert_approx_eq!(ratios[2], 9.0 / 8.0);
    /// assert_approx_eq!(ratios[12], 2.0);
    /// ```
    pub fn ratios(&self) -> [f64; 13] {
        let three_half = RationalNumber::new(3, 2);
        let mut ratios = [1.0; 13];
        let mut total_correction = FifthModification::default();
        for (k, (fifth, (index, num_octaves))) in
            self.fifths().into_iter().zip(CIRCLE_STEPS).enumerate()
        {
            total_correction = total_correction + fifth;
            let pure_ratio = three_half.pow(k as u32 + 1) / (1i64 << num_octaves);
            ratios[index] = pure_ratio.as_float() * total_correction.as_float();
        }
        ratios
    }

    /// All fifths pure. The wolf fifth F#-C# absorbs the Pythagorean comma.
    pub fn pythagorean() -> Self {
        let mut circle = Self::uniform(FifthModification::default());
        circle.f_sharp_c_sharp = pc(-1, 1);
        circle
    }

    /// Every fifth is narrowed by 1/12 of the Pythagorean comma.
    pub fn edo12() -> Self {
        Self::uniform(pc(-1, 12))
    }

    /// Pure major thirds. The wolf sits between G# and Eb.
    pub fn quarter_comma_meantone() -> Self {
        Self::meantone(4)
    }

    /// Pure minor thirds.
    pub fn third_comma_meantone() -> Self {
        Self::meantone(3)
    }

    pub fn fifth_comma_meantone() -> Self {
        Self::meantone(5)
    }

    pub fn werckmeister_iii() -> Self {
        Self::from_fifths([
            pc(-1, 4),
            pc(-1, 4),
            pc(-1, 4),
            pure(),
            pure(),
            pc(-1, 4),
            pure(),
            pure(),
            pure(),
            pure(),
            pure(),
            pure(),
        ])
    }

    pub fn werckmeister_iv() -> Self {
        Self::from_fifths([
            pc(-1, 3),
            pure(),
            pc(-1, 3),
            pure(),
            pc(-1, 3),
            pure(),
            pc(-1, 3),
            pure(),
            pc(1, 3),
            pc(1, 3),
            pc(-1, 3),
            pure(),
        ])
    }

    pub fn werckmeister_v() -> Self {
        Self::from_fifths([
            pure(),
            pure(),
            pc(-1, 4),
            pc(-1, 4),
            pure(),
            pure(),
            pc(-1, 4),
            pc(-1, 4),
            pc(1, 4),
            pure(),
            pure(),
            pc(-1, 4),
        ])
    }

    pub fn kirnberger1() -> Self {
        Self::from_fifths([
            pure(),
            pure(),
            sc(-1, 1),
            pure(),
            pure(),
            pure(),
            sch(-1, 1),
            pure(),
            pure(),
            pure(),
            pure(),
            pure(),
        ])
    }

    pub fn kirnberger2() -> Self {
        Self::from_fifths([
            pure(),
            pure(),
            sc(-1, 2),
            sc(-1, 2),
            pure(),
            pure(),
            sch(-1, 1),
            pure(),
            pure(),
            pure(),
            pure(),
            pure(),
        ])
    }

    pub fn kirnberger3() -> Self {
        Self::from_fifths([
            sc(-1, 4),
            sc(-1, 4),
            sc(-1, 4),
            sc(-1, 4),
            pure(),
            pure(),
            sch(-1, 1),
            pure(),
            pure(),
            pure(),
            pure(),
            pure(),
        ])
    }

    /// "For a village", 1732.
    pub fn neidhardt1() -> Self {
        Self::from_fifths([
            pc(-1, 12),
            pc(-1, 6),
            pc(-1, 4),
            pc(-1, 4),
            pure(),
            pc(-1, 12),
            pure(),
            pc(-1, 12),
            pure(),
            pure(),
            pc(-1, 12),
            pure(),
        ])
    }

    /// "For a village", 1724 and "for a small town", 1732.
    pub fn neidhardt2() -> Self {
        Self::from_fifths([
            pc(-1, 6),
            pc(-1, 6),
            pc(-1, 6),
            pc(-1, 6),
            pc(-1, 12),
            pc(-1, 12),
            pure(),
            pure(),
            pc(-1, 12),
            pc(-1, 12),
            pure(),
            pure(),
        ])
    }

    /// "For a small town", 1724 and "for a large town", 1732.
    pub fn neidhardt3() -> Self {
        Self::from_fifths([
            pc(-1, 6),
            pc(-1, 6),
            pc(-1, 6),
            pc(-1, 12),
            pure(),
            pc(-1, 12),
            pc(-1, 12),
            pc(-1, 12),
            pure(),
            pure(),
            pc(-1, 12),
            pc(-1, 12),
        ])
    }

    pub fn vallotti() -> Self {
        Self::from_fifths([
            pc(-1, 6),
            pc(-1, 6),
            pc(-1, 6),
            pc(-1, 6),
            pc(-1, 6),
            pure(),
            pure(),
            pure(),
            pure(),
            pure(),
            pure(),
            pc(-1, 6),
        ])
    }

    pub fn young2() -> Self {
        Self::from_fifths([
            pc(-1, 6),
            pc(-1, 6),
            pc(-1, 6),
            pc(-1, 6),
            pc(-1, 6),
            pc(-1, 6),
            pure(),
            pure(),
            pure(),
            pure(),
            pure(),
            pure(),
        ])
    }

    fn uniform(fifth: FifthModification) -> Self {
        Self::from_fifths([fifth; 12])
    }

    /// Eleven fifths narrowed by `1/fraction` syntonic comma, G#-Eb closes the circle.
    fn meantone(fraction: i64) -> Self {
        let mut circle = Self::uniform(sc(-1, fraction));
        circle.g_sharp_e_flat = FifthModification::new(
            RationalNumber::from_int(-1),
            RationalNumber::new(11, fraction),
            RationalNumber::zero(),
        );
        circle
    }
}

fn pure() -> FifthModification {
    FifthModification::default()
}

fn pc(numer: i64, denom: i64) -> FifthModification {
    FifthModification::pythagorean(RationalNumber::new(numer, denom))
}

fn sc(numer: i64, denom: i64) -> FifthModification {
    FifthModification::syntonic(RationalNumber::new(numer, denom))
}

fn sch(numer: i64, denom: i64) -> FifthModification {
    FifthModification::schisma(RationalNumber::new(numer, denom))
}

/// An open chain of fifths, e.g. `Ab-Eb-Bb-F-C-G-D-A-E-B-F#-C#`.
///
/// `fifths[i]` lies between note `i` and note `i + 1` of the chain. The note at `root_index`
/// has the ratio 1.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ChainOfFifths {
    pub fifths: Vec<FifthModification>,
    pub root_index: usize,
}

impl ChainOfFifths {
    pub fn new(fifths: Vec<FifthModification>, root_index: usize) -> Self {
        assert!(
            root_index <= fifths.len(),
            "Root index {root_index} exceeds chain with {} fifths",
            fifths.len()
        );
        Self { fifths, root_index }
    }

    /// Number of notes in the chain, i.e. notes per octave.
    pub fn num_notes(&self) -> usize {
        self.fifths.len() + 1
    }

    /// The modification that closes the chain to a circle of fifths.
    ///
    /// ```
    /// # use temper::fifths::{ChainOfFifths, FifthModification};
    /// # use temper::ratio::RationalNumber;
    /// let chain = ChainOfFifths::new(vec![FifthModification::default(); 11], 4);
    /// assert_eq!(
    ///     chain.closing_circle_correction(),
    ///     FifthModification::pythagorean(RationalNumber::from_int(-1))
    /// );
    /// ```
    pub fn closing_circle_correction(&self) -> FifthModification {
        self.fifths.iter().fold(
            FifthModification::pythagorean(RationalNumber::from_int(-1)),
            |total, &fifth| total - fifth,
        )
    }

    /// Ratios relative to the root note, reduced to [1, 2), in chain order.
    pub fn ratios_along_fifths(&self) -> Vec<f64> {
        let three_half = RationalNumber::new(3, 2);
        let two = RationalNumber::from_int(2);
        let one = RationalNumber::one();

        let mut ratios = vec![1.0; self.num_notes()];

        let mut total_correction = FifthModification::default();
        let mut fifth_ratio = one;
        for index in self.root_index..self.fifths.len() {
            total_correction = total_correction + self.fifths[index];
            fifth_ratio = fifth_ratio * three_half;
            if fifth_ratio > two {
                fifth_ratio = fifth_ratio / 2;
            }
            ratios[index + 1] = fifth_ratio.as_float() * total_correction.as_float();
        }

        let mut total_correction = FifthModification::default();
        let mut fifth_ratio = one;
        for index in (0..self.root_index).rev() {
            total_correction = total_correction - self.fifths[index];
            fifth_ratio = fifth_ratio / three_half;
            if fifth_ratio < one {
                fifth_ratio = fifth_ratio * 2;
            }
            ratios[index] = fifth_ratio.as_float() * total_correction.as_float();
        }

        ratios
    }

    /// Ratios relative to the root note in ascending order.
    pub fn sorted_ratios(&self) -> Vec<f64> {
        let mut ratios = self.ratios_along_fifths();
        ratios.sort_by(f64::total_cmp);
        ratios
    }
}
