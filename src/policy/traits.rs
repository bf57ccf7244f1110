//! Scoring interface between episodes and evaluation models.
//!
//! A scorer estimates WHITE's probability of winning from an observation.
//! Models usually live outside Rust (ONNX sessions, Python callables); this
//! trait is the seam they plug into.

use crate::core::observation::Observation;

/// Estimates the probability that WHITE wins, in `[0, 1]`.
///
/// The estimate is always from WHITE's side, whichever player the
/// observation was encoded for. BLACK's selector inverts it.
pub trait WinProbability {
    /// Score one observation.
    fn white_win_probability(&self, observation: &Observation) -> f64;

    /// Score several observations in one call.
    ///
    /// Must return one score per observation, in the same order. Override
    /// when the model is cheaper to run batched.
    fn white_win_probability_batch(&self, observations: &[Observation]) -> Vec<f64> {
        observations
            .iter()
            .map(|o| self.white_win_probability(o))
            .collect()
    }
}

impl<F> WinProbability for F
where
    F: Fn(&Observation) -> f64,
{
    fn white_win_probability(&self, observation: &Observation) -> f64 {
        self(observation)
    }
}

/// Scores every observation the same (baseline for testing).
///
/// Every candidate ties, so a selector using it always takes the first
/// legal action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantScore(pub f64);

impl Default for ConstantScore {
    fn default() -> Self {
        Self(0.5)
    }
}

impl WinProbability for ConstantScore {
    fn white_win_probability(&self, _observation: &Observation) -> f64 {
        self.0
    }
}
