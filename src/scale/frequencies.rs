use crate::ratio;

use super::StretchTuning;

/// Dense, strictly increasing list of note frequencies addressed by an index relative to the
/// reference note.
///
/// Index 0 is the reference note. Valid integer indices are `index_start()..index_end()`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleFrequencies {
    frequencies: Vec<f64>,
    reference_position: i32,
}

impl ScaleFrequencies {
    /// Walks up and down the cents ladder, starting at the reference note, until the frequency
    /// bounds are reached.
    ///
    /// `cents` must include the period value, e.g. `[0.0, 100.0, ..., 1200.0]`.
    /// `reference_index_within_octave` is the position of the reference note within `cents`.
    /// Frequencies at or beyond the bounds are not stored.
    pub fn create(
        cents: &[f64],
        reference_index_within_octave: usize,
        reference_frequency: f64,
        frequency_min: f64,
        frequency_max: f64,
        stretch_tuning: StretchTuning,
    ) -> Self {
        let num_notes_per_octave = cents.len() - 1;
        let period = cents[num_notes_per_octave] - cents[0];
        let cents_of_reference = cents[reference_index_within_octave];
        let frequency_of = |octave_counter: f64, index_within_octave: usize| {
            let cents = octave_counter + cents[index_within_octave] - cents_of_reference;
            stretch_tuning
                .stretched_frequency(ratio::cents_to_frequency(cents, reference_frequency))
        };

        let mut higher_frequencies = Vec::new();
        let mut reference_offset_high = 0;
        let mut octave_counter = 0.0;
        let mut index_within_octave = reference_index_within_octave;
        let mut current_frequency = stretch_tuning.stretched_frequency(reference_frequency);
        while current_frequency < frequency_max {
            if current_frequency > frequency_min {
                higher_frequencies.push(current_frequency);
            } else {
                reference_offset_high -= 1;
            }
            index_within_octave += 1;
            if index_within_octave == num_notes_per_octave {
                index_within_octave = 0;
                octave_counter += period;
            }
            current_frequency = frequency_of(octave_counter, index_within_octave);
        }

        let mut lower_frequencies = Vec::new();
        let mut reference_offset_low = 0;
        let mut octave_counter = 0.0;
        let mut index_within_octave = reference_index_within_octave;
        let mut current_frequency = stretch_tuning.stretched_frequency(reference_frequency);
        while current_frequency > frequency_min {
            if current_frequency < frequency_max {
                lower_frequencies.push(current_frequency);
            } else {
                reference_offset_low -= 1;
            }
            if index_within_octave == 0 {
                index_within_octave = num_notes_per_octave - 1;
                octave_counter -= period;
            } else {
                index_within_octave -= 1;
            }
            current_frequency = frequency_of(octave_counter, index_within_octave);
        }

        let num_lower = lower_frequencies.len() as i32;
        let (frequencies, reference_position) = if higher_frequencies.is_empty() {
            lower_frequencies.reverse();
            (lower_frequencies, num_lower - 1 - reference_offset_low)
        } else if lower_frequencies.is_empty() {
            (higher_frequencies, reference_offset_high)
        } else {
            lower_frequencies.reverse();
            lower_frequencies.extend_from_slice(&higher_frequencies[1..]);
            (lower_frequencies, num_lower - 1)
        };

        let mut scale_frequencies = Self {
            frequencies,
            reference_position,
        };
        if let Some(frequency) = usize::try_from(reference_position)
            .ok()
            .and_then(|position| scale_frequencies.frequencies.get_mut(position))
        {
            *frequency = reference_frequency;
        }
        scale_frequencies
    }

    /// First available index (included).
    pub fn index_start(&self) -> i32 {
        -self.reference_position
    }

    /// Last available index (excluded).
    pub fn index_end(&self) -> i32 {
        self.index_start() + self.frequencies.len() as i32
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.frequencies
    }

    /// Frequency of an integer index or `None` if the index is out of range.
    pub fn get(&self, index: i32) -> Option<f64> {
        usize::try_from(index + self.reference_position)
            .ok()
            .and_then(|position| self.frequencies.get(position))
            .copied()
    }

    /// Frequency of a fractional index.
    ///
    /// Values between two notes are interpolated logarithmically. Indices outside of the
    /// available range are extrapolated using the step size of the outermost notes.
    ///
    /// # Panics
    ///
    /// Panics if fewer than two frequencies are available.
    pub fn get_interpolated(&self, index: f64) -> f64 {
        assert!(
            self.frequencies.len() >= 2,
            "Interpolation requires at least two frequencies"
        );
        let start = self.index_start();
        let end = self.index_end();
        let lower = index.floor() as i32;

        let anchor = if lower < start {
            start
        } else if lower >= end - 1 {
            end - 2
        } else {
            lower
        };
        let anchor_frequency = self.at(anchor);
        let step = self.at(anchor + 1) / anchor_frequency;
        if lower >= end - 1 {
            self.at(end - 1) * step.powf(index - f64::from(end - 1))
        } else {
            anchor_frequency * step.powf(index - f64::from(anchor))
        }
    }

    /// Fractional index of `frequency`. Inverse of [`ScaleFrequencies::get_interpolated`].
    pub fn frequency_index(&self, frequency: f64) -> f64 {
        if self.frequencies.is_empty() {
            return 0.0;
        }

        let closest_index = self.closest_index(frequency);
        let closest_frequency = self.at(closest_index);
        let start = self.index_start();
        let end = self.index_end();

        if frequency == closest_frequency || self.frequencies.len() == 1 {
            f64::from(closest_index)
        } else if closest_index > start
            && (frequency < closest_frequency || closest_index == end - 1)
        {
            f64::from(closest_index)
                - (closest_frequency / frequency).log10()
                    / (closest_frequency / self.at(closest_index - 1)).log10()
        } else if closest_index < end - 1
            && (frequency > closest_frequency || closest_index == start)
        {
            f64::from(closest_index)
                + (closest_frequency / frequency).log10()
                    / (closest_frequency / self.at(closest_index + 1)).log10()
        } else {
            f64::from(closest_index)
        }
    }

    /// Index whose frequency is closest to `frequency` on a logarithmic scale.
    ///
    /// Frequencies outside of the range map to the first or last index.
    pub fn closest_index(&self, frequency: f64) -> i32 {
        if self.frequencies.is_empty() {
            return 0;
        }

        let position_after = self.frequencies.partition_point(|&f| f < frequency);
        let position = if position_after == 0 {
            0
        } else if position_after >= self.frequencies.len() {
            self.frequencies.len() - 1
        } else if self.frequencies[position_after] == frequency {
            position_after
        } else {
            let position_before = position_after - 1;
            let distance_below = (frequency / self.frequencies[position_before]).log10();
            let distance_above = (self.frequencies[position_after] / frequency).log10();
            if distance_below < distance_above {
                position_before
            } else {
                position_after
            }
        };
        position as i32 - self.reference_position
    }

    fn at(&self, index: i32) -> f64 {
        self.frequencies[(index + self.reference_position) as usize]
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    fn edo12_cents() -> Vec<f64> {
        (0..=12).map(|step| f64::from(step) * 100.0).collect()
    }

    fn edo12(reference_frequency: f64, min: f64, max: f64) -> ScaleFrequencies {
        ScaleFrequencies::create(
            &edo12_cents(),
            9,
            reference_frequency,
            min,
            max,
            StretchTuning::default(),
        )
    }

    #[test]
    fn frequencies_cover_range_exclusively() {
        let frequencies = edo12(440.0, 16.0, 16000.0);

        assert_eq!(frequencies.get(0), Some(440.0));
        assert_approx_eq!(frequencies.get(12).unwrap(), 880.0);
        assert_approx_eq!(frequencies.get(-12).unwrap(), 220.0);
        assert_approx_eq!(frequencies.get(3).unwrap(), 523.251131);

        let all = frequencies.as_slice();
        assert!(all[0] > 16.0);
        assert!(all[all.len() - 1] < 16000.0);
        assert!(all.windows(2).all(|pair| pair[0] < pair[1]));

        // C0 at 16.35 Hz is the lowest note, B9 at 15804 Hz the highest one
        assert_eq!(frequencies.index_start(), -57);
        assert_eq!(frequencies.index_end(), 63);
        assert_eq!(frequencies.get(-58), None);
        assert_eq!(frequencies.get(63), None);
    }

    #[test]
    fn non_octave_period() {
        // Two steps of a tritave
        let cents = [0.0, 950.977500, 1901.955001];
        let frequencies =
            ScaleFrequencies::create(&cents, 0, 100.0, 50.0, 1000.0, StretchTuning::default());

        assert_eq!(frequencies.get(0), Some(100.0));
        assert_approx_eq!(frequencies.get(2).unwrap(), 300.0);
        assert_approx_eq!(frequencies.get(4).unwrap(), 900.0);
        assert_eq!(frequencies.index_start(), -1);
        assert_eq!(frequencies.index_end(), 5);
    }

    #[test]
    fn reference_frequency_above_range() {
        let frequencies = edo12(440.0, 100.0, 300.0);

        assert_eq!(frequencies.get(0), None);
        assert_approx_eq!(frequencies.get(-12).unwrap(), 220.0);
        assert_eq!(frequencies.index_end(), -6);
        assert!(frequencies.as_slice()[frequencies.len() - 1] < 300.0);
    }

    #[test]
    fn reference_frequency_below_range() {
        let frequencies = edo12(440.0, 1000.0, 2000.0);

        assert_eq!(frequencies.get(0), None);
        assert_approx_eq!(frequencies.get(24).unwrap(), 1760.0);
        assert_eq!(frequencies.index_start(), 15);
        assert!(frequencies.as_slice()[0] > 1000.0);
    }

    #[test]
    fn interpolation_and_extrapolation() {
        let frequencies = edo12(440.0, 420.0, 500.0);
        // A4 A#4 B4
        assert_eq!(frequencies.index_start(), 0);
        assert_eq!(frequencies.index_end(), 3);

        assert_approx_eq!(frequencies.get_interpolated(0.5), 452.892984);
        assert_approx_eq!(frequencies.get_interpolated(-1.0), 415.304698);
        assert_approx_eq!(frequencies.get_interpolated(3.0), 523.251131);
        assert_approx_eq!(frequencies.get_interpolated(2.0), 493.883301);
    }

    #[test]
    fn frequency_index_is_inverse_of_interpolation() {
        let frequencies = edo12(440.0, 16.0, 16000.0);

        for index in [-57.0, -20.25, -0.5, 0.0, 0.3, 7.75, 62.0, 70.5, -60.0] {
            let frequency = frequencies.get_interpolated(index);
            assert_approx_eq!(frequencies.frequency_index(frequency), index, 1e-9);
        }
    }

    #[test]
    fn closest_index() {
        let frequencies = edo12(440.0, 16.0, 16000.0);

        for index in frequencies.index_start()..frequencies.index_end() {
            let frequency = frequencies.get(index).unwrap();
            assert_eq!(frequencies.closest_index(frequency), index);
            assert_eq!(frequencies.closest_index(frequency * 1.02), index);
            assert_eq!(frequencies.closest_index(frequency / 1.02), index);
        }

        assert_eq!(frequencies.closest_index(1.0), -57);
        assert_eq!(frequencies.closest_index(20000.0), 62);
    }
}
