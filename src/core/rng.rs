//! Deterministic dice for episodes and drivers.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Context streams**: Independent sequences for different purposes
//! - **Opening roll**: Two distinct dice, doubles are re-rolled
//!
//! ```
//! use gammon_env::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let opening = rng.opening_roll();
//! assert_ne!(opening.first, opening.second);
//!
//! // Mid-game dice come from a separate stream of the same seed.
//! let mut dice = rng.for_context("dice");
//! let roll = dice.roll();
//! assert!((1..=6).contains(&roll.first));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::Hasher;

use super::action::Roll;

/// Deterministic RNG for dice.
///
/// Uses ChaCha8 for speed while keeping sequences reproducible across
/// platforms.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed,
    /// independent of the toolchain's std hasher.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write_u64(self.seed);
        hasher.write(context.as_bytes());
        let context_seed = hasher.finish();

        Self::new(context_seed)
    }

    /// A single die in `1..=6`.
    pub fn roll_die(&mut self) -> i8 {
        self.inner.gen_range(1..=6)
    }

    /// Two independent dice.
    pub fn roll(&mut self) -> Roll {
        Roll::new(self.roll_die(), self.roll_die())
    }

    /// Two distinct dice for deciding who moves first.
    pub fn opening_roll(&mut self) -> Roll {
        opening_roll_with(|| self.roll_die())
    }

    /// Capture the stream position for checkpointing.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Draw pairs from `die` until the two values differ.
///
/// Terminates with probability 1 for any die that is not constant.
pub fn opening_roll_with(mut die: impl FnMut() -> i8) -> Roll {
    loop {
        let roll = Roll::new(die(), die());
        if !roll.is_double() {
            return roll;
        }
    }
}

/// Serializable RNG state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
