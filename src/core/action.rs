//! Moves, actions and dice rolls.
//!
//! An `Action` is one player's whole turn: an ordered list of up to four
//! half-moves. Order matters because later moves can depend on the board
//! produced by earlier ones. An empty action is a pass.
//!
//! Positions live in the engine's index space:
//!
//! ```text
//!    13 14 15 16 17 18  25   19 20 21 22 23 24 27
//!   +-------------------+---+-------------------+---+
//!   |                   | B |    BLACK HOME     | O |
//!   |                   | A |                   | F |
//!   |                   | R |    WHITE HOME     | F |
//!   +-------------------+---+-------------------+---+
//!    12 11 10  9  8  7   0    6  5  4  3  2  1  26
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::{GammonError, Result};

/// Bar position of BLACK checkers.
pub const BLACK_BAR_POS: i8 = 0;
/// Lowest board point.
pub const BOARD_MIN_POS: i8 = 1;
/// Highest board point.
pub const BOARD_MAX_POS: i8 = 24;
/// Bar position of WHITE checkers.
pub const WHITE_BAR_POS: i8 = 25;
/// Borne-off tray of WHITE.
pub const WHITE_OFF_POS: i8 = 26;
/// Borne-off tray of BLACK.
pub const BLACK_OFF_POS: i8 = 27;
/// Total number of positions.
pub const NUM_POSITIONS: i8 = 28;

/// Maximum half-moves in one action (a double roll).
pub const MAX_MOVES: usize = 4;

/// A single checker relocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Origin position.
    pub pos: i8,
    /// Destination position.
    pub to: i8,
}

impl Move {
    #[must_use]
    pub const fn new(pos: i8, to: i8) -> Self {
        Self { pos, to }
    }
}

fn position_name(pos: i8) -> String {
    match pos {
        BLACK_BAR_POS | WHITE_BAR_POS => "bar".to_string(),
        WHITE_OFF_POS | BLACK_OFF_POS => "off".to_string(),
        _ => pos.to_string(),
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", position_name(self.pos), position_name(self.to))
    }
}

/// An ordered sequence of at most [`MAX_MOVES`] moves.
///
/// The length bound is enforced on every construction path, including
/// deserialization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SmallVec<[Move; 4]>", into = "SmallVec<[Move; 4]>")]
pub struct Action {
    moves: SmallVec<[Move; 4]>,
}

impl Action {
    /// The empty action: no legal move this turn.
    #[must_use]
    pub fn pass() -> Self {
        Self::default()
    }

    /// Create an action from moves applied in the given order.
    pub fn new(moves: &[Move]) -> Result<Self> {
        if moves.len() > MAX_MOVES {
            return Err(GammonError::ActionTooLong(moves.len()));
        }
        Ok(Self {
            moves: SmallVec::from_slice(moves),
        })
    }

    /// Append a move.
    pub fn push(&mut self, mv: Move) -> Result<()> {
        if self.moves.len() == MAX_MOVES {
            return Err(GammonError::ActionTooLong(MAX_MOVES + 1));
        }
        self.moves.push(mv);
        Ok(())
    }

    /// The moves in application order.
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// True for the pass action.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter()
    }
}

impl TryFrom<SmallVec<[Move; 4]>> for Action {
    type Error = GammonError;

    fn try_from(moves: SmallVec<[Move; 4]>) -> Result<Self> {
        if moves.len() > MAX_MOVES {
            return Err(GammonError::ActionTooLong(moves.len()));
        }
        Ok(Self { moves })
    }
}

impl From<Action> for SmallVec<[Move; 4]> {
    fn from(action: Action) -> Self {
        action.moves
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.moves.is_empty() {
            return f.write_str("pass");
        }
        for (i, mv) in self.moves.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{mv}")?;
        }
        Ok(())
    }
}

/// A pair of dice values.
///
/// A negative first die marks a reversed-direction query: both values are
/// negated before the engine sees them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Roll {
    pub first: i8,
    pub second: i8,
}

impl Roll {
    #[must_use]
    pub const fn new(first: i8, second: i8) -> Self {
        Self { first, second }
    }

    /// Both dice show the same value.
    #[must_use]
    pub const fn is_double(self) -> bool {
        self.first == self.second
    }

    /// Flip the direction marker: negate both dice when the first is negative.
    #[must_use]
    pub const fn normalized(self) -> Self {
        if self.first < 0 {
            Self {
                first: self.first.wrapping_neg(),
                second: self.second.wrapping_neg(),
            }
        } else {
            self
        }
    }

    /// Normalize and check both dice lie in `1..=6`.
    pub fn validated(self) -> Result<Self> {
        let roll = self.normalized();
        if (1..=6).contains(&roll.first) && (1..=6).contains(&roll.second) {
            Ok(roll)
        } else {
            Err(GammonError::MalformedRoll {
                first: self.first,
                second: self.second,
            })
        }
    }
}

impl std::fmt::Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}
