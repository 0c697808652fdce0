//! Discrete step accumulation for frame stepping and time scrubbing
//!
//! Continuous pixel travel is converted into whole steps. Steps are always
//! derived from the total displacement since contact, so the emitted sum
//! depends only on where the pointer is, never on how finely the path
//! was sampled.

/// Converts pointer displacement into integer steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepAccumulator {
    pixels_per_step: f32,
    emitted: i64,
    displacement: f32,
}

impl StepAccumulator {
    /// `pixels_per_step` must be finite and positive
    pub fn new(pixels_per_step: f32) -> Self {
        Self {
            pixels_per_step,
            emitted: 0,
            displacement: 0.0,
        }
    }

    /// Advance to a new displacement along the scrub axis
    ///
    /// Returns the steps not yet emitted, truncated toward zero. The
    /// fractional remainder stays pending for the next call.
    pub fn advance(&mut self, displacement: f32) -> i64 {
        // Float to int casts saturate, the difference must too
        let total = (displacement / self.pixels_per_step).trunc() as i64;
        let steps = total.saturating_sub(self.emitted);
        self.emitted = total;
        self.displacement = displacement;
        steps
    }

    /// Sum of all steps emitted so far
    pub fn emitted(&self) -> i64 {
        self.emitted
    }

    /// Sub-step travel past the last emitted step
    pub fn remainder(&self) -> f32 {
        self.displacement - self.emitted as f32 * self.pixels_per_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_toward_zero() {
        let mut acc = StepAccumulator::new(10.0);
        assert_eq!(acc.advance(9.0), 0);
        assert_eq!(acc.advance(19.0), 1);
        assert_eq!(acc.advance(-9.0), -1);
        assert_eq!(acc.advance(-21.0), -2);
        assert_eq!(acc.emitted(), -2);
    }

    #[test]
    fn test_sampling_independent() {
        let mut coarse = StepAccumulator::new(12.0);
        let coarse_sum = coarse.advance(100.0);

        let mut fine = StepAccumulator::new(12.0);
        let fine_sum: i64 = (1..=10).map(|i| fine.advance(i as f32 * 10.0)).sum();

        assert_eq!(coarse_sum, 8);
        assert_eq!(fine_sum, coarse_sum);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut acc = StepAccumulator::new(10.0);
        assert_eq!(acc.advance(25.0), 2);
        assert_eq!(acc.remainder(), 5.0);
        assert_eq!(acc.advance(30.0), 1);
        assert_eq!(acc.remainder(), 0.0);
        assert_eq!(acc.advance(-4.0), -3);
        assert_eq!(acc.remainder(), -4.0);
    }

    #[test]
    fn test_tiny_step_saturates() {
        let mut acc = StepAccumulator::new(1e-37);
        assert_eq!(acc.advance(30.0), i64::MAX);
        assert_eq!(acc.advance(-30.0), i64::MIN);
        assert_eq!(acc.advance(-30.0), 0);
    }
}
