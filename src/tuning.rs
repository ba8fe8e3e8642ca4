//! Mapping between note addresses and frequencies.

use crate::ratio::Ratio;

/// A [`Tuning`] maps notes or, in general, addresses of type `N` to a frequency or vice versa.
pub trait Tuning<N> {
    /// Finds the frequency in Hz for the given note or address, if the tuning covers it.
    fn frequency_of(&self, note_or_address: N) -> Option<f64>;

    /// Finds the closest note or address for the given frequency in Hz.
    fn find_by_frequency(&self, frequency_hz: f64) -> Approximation<N>;
}

/// Result of a [`Tuning::find_by_frequency`] lookup.
///
/// `deviation` is the ratio between the frequency of `approx_value` and the searched frequency,
/// i.e. positive cents mean that the searched frequency is sharp.
#[derive(Copy, Clone, Debug)]
pub struct Approximation<N> {
    pub approx_value: N,
    pub deviation: Ratio,
}
