//! Observation vectors and the declared observation/action spaces.
//!
//! Observations are player-relative feature vectors of fixed length
//! [`OBSERVATION_LEN`]. Each coordinate has a closed bound:
//!
//! - indices 3, 7, ..., 95 and 101, 105, ..., 193: `[0, 6]`
//! - indices 96 and 194 (bar counts): `[0, 7.5]`
//! - everything else: `[0, 1]`

use serde::{Deserialize, Serialize};

use super::error::{GammonError, Result};

/// Number of features in an observation.
pub const OBSERVATION_LEN: usize = 198;

/// Size of the declared discrete action space.
///
/// A placeholder cardinality only: real actions are variable-length move
/// sequences and are never addressed by this index.
pub const ACTION_SPACE_SIZE: usize = 64;

/// A feature vector produced by the engine for one player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    values: Vec<f64>,
}

impl Observation {
    /// Wrap raw feature values.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// A zero-filled observation of the standard length.
    pub fn zeros() -> Self {
        Self {
            values: vec![0.0; OBSERVATION_LEN],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Check length and per-coordinate bounds against `space`.
    ///
    /// Returns the first violation found.
    pub fn check(&self, space: &ObservationSpace) -> Result<()> {
        if self.values.len() != space.len() {
            return Err(GammonError::ObservationShape {
                expected: space.len(),
                actual: self.values.len(),
            });
        }
        for (index, ((&value, &low), &high)) in self
            .values
            .iter()
            .zip(&space.low)
            .zip(&space.high)
            .enumerate()
        {
            // NaN fails both comparisons, so test containment positively.
            if !(value >= low && value <= high) {
                return Err(GammonError::ObservationOutOfBounds {
                    index,
                    value,
                    low,
                    high,
                });
            }
        }
        Ok(())
    }
}

impl From<Vec<f64>> for Observation {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

/// Box-shaped observation space: per-coordinate `[low, high]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObservationSpace {
    low: Vec<f64>,
    high: Vec<f64>,
}

impl ObservationSpace {
    /// The backgammon feature bounds.
    pub fn backgammon() -> Self {
        let low = vec![0.0; OBSERVATION_LEN];
        let mut high = vec![1.0; OBSERVATION_LEN];
        for i in (3..97).step_by(4) {
            high[i] = 6.0;
        }
        high[96] = 7.5;
        for i in (101..195).step_by(4) {
            high[i] = 6.0;
        }
        high[194] = 7.5;
        Self { low, high }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.low.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.low.is_empty()
    }

    /// Bounds of one coordinate.
    #[must_use]
    pub fn bounds(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.low.get(index)?, *self.high.get(index)?))
    }

    #[must_use]
    pub fn low(&self) -> &[f64] {
        &self.low
    }

    #[must_use]
    pub fn high(&self) -> &[f64] {
        &self.high
    }

    /// Whether the observation has the right length and respects every bound.
    #[must_use]
    pub fn contains(&self, observation: &Observation) -> bool {
        observation.check(self).is_ok()
    }
}

/// Discrete space `{0, ..., n - 1}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscreteSpace {
    pub n: usize,
}

impl DiscreteSpace {
    /// The declared backgammon action space.
    pub const fn backgammon() -> Self {
        Self {
            n: ACTION_SPACE_SIZE,
        }
    }
}
