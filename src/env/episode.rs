//! Resettable backgammon episode.
//!
//! ## Lifecycle
//!
//! `Fresh` → `reset` → `Active` → (`step`)* → `Terminal` → `reset` → `Active` ...
//!
//! An episode is built once around an engine and reused across games.
//! `reset` reseeds the opening-roll dice, clears the counters and the board.
//! `step` applies one player's action and reports what the *opponent* now
//! sees. It never changes whose turn it is: drivers call
//! [`Episode::next_opponent`] between steps, which leaves room to inspect the
//! outcome before committing the turn.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut episode = Episode::new(engine, EpisodeConfig::default());
//! let (_obs, info) = episode.reset(42)?;
//! let mut roll = Some(info.roll);
//! loop {
//!     let dice = roll.take().unwrap_or_else(|| dice_rng.roll());
//!     let actions = episode.get_legal_actions(dice)?;
//!     let choice = selector.choose(&episode, episode.current_player(), actions.as_deref())?;
//!     let outcome = episode.step(choice.map(|c| c.action))?;
//!     if outcome.terminated {
//!         break;
//!     }
//!     episode.next_opponent()?;
//! }
//! ```

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::action::{Action, Roll};
use crate::core::color::{Color, ColorMap, ColorMapper, PlayerId};
use crate::core::config::EpisodeConfig;
use crate::core::error::{GammonError, Result};
use crate::core::observation::{DiscreteSpace, Observation, ObservationSpace};
use crate::core::rng::GameRng;
use crate::rules::{GameEngine, GameResult, WinKind};

/// Where an episode is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EpisodePhase {
    /// Constructed, never reset.
    Fresh,
    /// A game is in progress.
    Active,
    /// The game ended (winner or round cap). Only `reset` moves on.
    Terminal,
}

/// Mutable per-game bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeState {
    /// Acting color. `NoColor` only before the first reset.
    pub current_player: Color,
    /// Completed `step` calls since the last reset.
    pub round_count: u32,
    /// Opposing checkers sent to the bar, by the hitting color.
    pub hits: ColorMap<u32>,
}

impl EpisodeState {
    #[must_use]
    pub fn white_hits(&self) -> u32 {
        self.hits[Color::White]
    }

    #[must_use]
    pub fn black_hits(&self) -> u32 {
        self.hits[Color::Black]
    }
}

/// Extra data returned by [`Episode::reset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetInfo {
    /// First player, as a driver-facing id.
    pub current_player: PlayerId,
    /// The opening roll; never a double.
    pub roll: Roll,
}

/// Extra data returned by [`Episode::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    pub winner: Color,
    pub kind: WinKind,
}

/// Result of one [`Episode::step`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// The board from the opponent's perspective.
    pub observation: Observation,
    /// `1.0` when the episode terminated with WHITE as winner, else `0.0`.
    pub reward: f64,
    /// A winner exists or the round cap was exceeded.
    pub terminated: bool,
    /// Always `false`: the round cap is reported through `terminated`.
    pub truncated: bool,
    pub info: StepInfo,
}

/// A backgammon game exposed as a resettable episode.
///
/// Single-owner and synchronous: every engine call completes before the next
/// one is issued.
pub struct Episode<E: GameEngine> {
    engine: E,
    config: EpisodeConfig,
    mapper: ColorMapper,
    observation_space: ObservationSpace,
    rng: GameRng,
    state: EpisodeState,
    phase: EpisodePhase,
}

impl<E: GameEngine> Episode<E> {
    /// Wrap an engine. The player-id mode is taken from `config` and fixed
    /// for the episode's lifetime.
    pub fn new(engine: E, config: EpisodeConfig) -> Self {
        Self {
            engine,
            mapper: ColorMapper::new(config.external_mode),
            config,
            observation_space: ObservationSpace::backgammon(),
            rng: GameRng::new(0),
            state: EpisodeState::default(),
            phase: EpisodePhase::Fresh,
        }
    }

    /// Start a new game.
    ///
    /// Reseeds the dice, zeroes the counters, resets the board and rolls for
    /// the first player: doubles are re-rolled, the higher die takes the
    /// first turn (first die WHITE, second die BLACK).
    ///
    /// Returns the first player's observation.
    pub fn reset(&mut self, seed: u64) -> Result<(Observation, ResetInfo)> {
        self.phase = EpisodePhase::Fresh;
        self.rng = GameRng::new(seed);
        self.state = EpisodeState::default();
        self.engine.reset()?;

        let roll = self.rng.opening_roll();
        let first = if roll.first > roll.second {
            Color::White
        } else {
            Color::Black
        };
        self.state.current_player = first;

        let observation = self.observe(first)?;
        let info = ResetInfo {
            current_player: self.mapper.to_external(first)?,
            roll,
        };
        self.phase = EpisodePhase::Active;

        debug!("reset seed={} opening roll {} -> {} starts", seed, roll, first);
        Ok((observation, info))
    }

    /// Play `action` for the current player.
    ///
    /// `None` and the empty action are both a pass. Moves are applied in
    /// order; a rejected move aborts the step with earlier moves left
    /// applied. The round counter advances by one on every completed step.
    pub fn step(&mut self, action: Option<&Action>) -> Result<StepOutcome> {
        match self.phase {
            EpisodePhase::Fresh => return Err(GammonError::NotReset),
            EpisodePhase::Terminal => return Err(GammonError::EpisodeTerminated),
            EpisodePhase::Active => {}
        }

        let mover = self.state.current_player.require_player()?;
        let mut hits = 0;
        if let Some(action) = action {
            for &mv in action.iter() {
                if self.engine.apply_move(mover, mv)? {
                    // Counted per move so a later rejection keeps it.
                    self.state.hits[mover] += 1;
                    hits += 1;
                }
            }
        }

        let observation = self.observe(mover.opponent()?)?;
        let result = self.engine.result()?;
        let capped = self.state.round_count > self.config.max_rounds;
        let terminated = result.is_decided() || capped;
        let reward = if terminated && result.winner == Color::White {
            1.0
        } else {
            0.0
        };

        self.state.round_count += 1;
        if terminated {
            self.phase = EpisodePhase::Terminal;
            if capped && !result.is_decided() {
                warn!(
                    "episode stopped at round cap {} without a winner",
                    self.config.max_rounds
                );
            }
        }

        debug!(
            "round {} {} moved {} checkers, {} hits, terminated={}",
            self.state.round_count,
            mover,
            action.map_or(0, Action::len),
            hits,
            terminated
        );

        Ok(StepOutcome {
            observation,
            reward,
            terminated,
            truncated: false,
            info: StepInfo {
                winner: result.winner,
                kind: result.kind,
            },
        })
    }

    /// The other color of `player`, or of the current player if `None`.
    pub fn get_opponent(&self, player: Option<Color>) -> Result<Color> {
        player.unwrap_or(self.state.current_player).opponent()
    }

    /// Hand the turn to the opponent and return the new current player.
    pub fn next_opponent(&mut self) -> Result<PlayerId> {
        if self.phase == EpisodePhase::Fresh {
            return Err(GammonError::NotReset);
        }
        let next = self.state.current_player.opponent()?;
        self.state.current_player = next;
        self.mapper.to_external(next)
    }

    /// Features of the current board for `player`, or of the board after
    /// `action` without applying it.
    pub fn get_features(&self, player: Color, action: Option<&Action>) -> Result<Observation> {
        let player = player.require_player()?;
        match action {
            None => self.observe(player),
            Some(action) => {
                let observation = self.engine.encode_action(player, action)?;
                self.check(observation)
            }
        }
    }

    /// Legal actions of the current player for `roll`.
    ///
    /// A negative first die reverses direction: both dice are negated before
    /// the engine is queried. Returns `None` when the roll cannot be played.
    pub fn get_legal_actions(&self, roll: Roll) -> Result<Option<Vec<Action>>> {
        if self.phase == EpisodePhase::Fresh {
            return Err(GammonError::NotReset);
        }
        let roll = roll.validated()?;
        let actions = self
            .engine
            .legal_actions(self.state.current_player, roll)?;
        Ok(if actions.is_empty() { None } else { Some(actions) })
    }

    /// Winner reported by the engine.
    pub fn result(&self) -> Result<GameResult> {
        Ok(self.engine.result()?)
    }

    #[must_use]
    pub fn current_player(&self) -> Color {
        self.state.current_player
    }

    /// Current player as a driver-facing id.
    pub fn current_player_id(&self) -> Result<PlayerId> {
        self.mapper.to_external(self.state.current_player)
    }

    #[must_use]
    pub fn rounds(&self) -> u32 {
        self.state.round_count
    }

    /// Checkers sent to the bar by `color`; zero for `NoColor`.
    #[must_use]
    pub fn hits(&self, color: Color) -> u32 {
        self.state.hits.get(color).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase == EpisodePhase::Terminal
    }

    #[must_use]
    pub fn state(&self) -> &EpisodeState {
        &self.state
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[must_use]
    pub fn mapper(&self) -> ColorMapper {
        self.mapper
    }

    #[must_use]
    pub fn config(&self) -> &EpisodeConfig {
        &self.config
    }

    #[must_use]
    pub fn observation_space(&self) -> &ObservationSpace {
        &self.observation_space
    }

    #[must_use]
    pub fn action_space(&self) -> DiscreteSpace {
        DiscreteSpace::backgammon()
    }

    fn observe(&self, color: Color) -> Result<Observation> {
        let observation = self.engine.encode(color)?;
        self.check(observation)
    }

    fn check(&self, observation: Observation) -> Result<Observation> {
        if self.config.check_observations {
            observation.check(&self.observation_space)?;
        }
        Ok(observation)
    }
}
