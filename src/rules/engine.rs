//! Game engine contract.
//!
//! The engine owns the board: layout, move legality, feature encoding and win
//! detection. Episodes only consume it through this trait.

use serde::{Deserialize, Serialize};

use crate::core::action::{Action, Move, Roll};
use crate::core::color::Color;
use crate::core::error::EngineError;
use crate::core::observation::Observation;

/// How a game was won.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinKind {
    /// Game still running.
    #[default]
    None,
    Normal,
    Gammon,
    Backgammon,
}

impl WinKind {
    /// Points scored for this kind of win.
    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            WinKind::None => 0,
            WinKind::Normal => 1,
            WinKind::Gammon => 2,
            WinKind::Backgammon => 3,
        }
    }
}

/// Result of a game as reported by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameResult {
    /// `NoColor` while undecided.
    pub winner: Color,
    pub kind: WinKind,
}

impl GameResult {
    /// An undecided game.
    #[must_use]
    pub const fn undecided() -> Self {
        Self {
            winner: Color::NoColor,
            kind: WinKind::None,
        }
    }

    /// A finished game.
    #[must_use]
    pub const fn won(winner: Color, kind: WinKind) -> Self {
        Self { winner, kind }
    }

    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.winner != Color::NoColor
    }
}

/// Backgammon engine trait.
///
/// Every call is blocking. Implementations decide legality and encoding;
/// callers never inspect the board directly.
///
/// ## Implementation Notes
///
/// - `apply_move`: Report illegal input as `EngineError::IllegalMove`
/// - `encode_action`: Must not mutate the board
/// - `legal_actions`: Return an empty vec when the roll cannot be played
/// - `result`: `Color::NoColor` winner while the game continues
pub trait GameEngine {
    /// Put the board back into the starting layout.
    fn reset(&mut self) -> Result<(), EngineError>;

    /// Move one checker of `color`.
    ///
    /// Returns whether an opposing checker was sent to the bar.
    fn apply_move(&mut self, color: Color, mv: Move) -> Result<bool, EngineError>;

    /// Encode the board from `color`'s perspective.
    fn encode(&self, color: Color) -> Result<Observation, EngineError>;

    /// Encode the board as it would be after `action`, without applying it.
    fn encode_action(&self, color: Color, action: &Action) -> Result<Observation, EngineError>;

    /// All legal actions of `color` for `roll`, in engine order.
    fn legal_actions(&self, color: Color, roll: Roll) -> Result<Vec<Action>, EngineError>;

    /// Current winner, if any.
    fn result(&self) -> Result<GameResult, EngineError>;
}

impl<E: GameEngine + ?Sized> GameEngine for Box<E> {
    fn reset(&mut self) -> Result<(), EngineError> {
        (**self).reset()
    }

    fn apply_move(&mut self, color: Color, mv: Move) -> Result<bool, EngineError> {
        (**self).apply_move(color, mv)
    }

    fn encode(&self, color: Color) -> Result<Observation, EngineError> {
        (**self).encode(color)
    }

    fn encode_action(&self, color: Color, action: &Action) -> Result<Observation, EngineError> {
        (**self).encode_action(color, action)
    }

    fn legal_actions(&self, color: Color, roll: Roll) -> Result<Vec<Action>, EngineError> {
        (**self).legal_actions(color, roll)
    }

    fn result(&self) -> Result<GameResult, EngineError> {
        (**self).result()
    }
}
