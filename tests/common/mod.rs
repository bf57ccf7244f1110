//! Scripted engine shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;

use gammon_env::core::error::MoveRejection;
use gammon_env::core::OBSERVATION_LEN;
use gammon_env::{
    Action, Color, EngineError, GameEngine, GameResult, Move, Observation, Roll, WinKind,
};

/// Engine whose behavior is configured up front.
///
/// - Moves landing on a point in `hit_targets` count as hits
/// - A move with `pos == to` is rejected
/// - With `race_to = Some(n)`, the first color to apply `n` moves wins
/// - `legal_actions` returns `legal` (or two moves derived from the roll when
///   `legal` is empty), and nothing for rolls whose first die is `blocked_die`
/// - `encode_action` writes the score from `lookahead` at index 2, or the
///   action's length over four for actions not listed there
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    pub legal: Vec<Action>,
    pub blocked_die: Option<i8>,
    pub hit_targets: Vec<i8>,
    pub race_to: Option<usize>,
    pub win_kind: WinKind,
    pub lookahead: Vec<(Action, f64)>,

    pub moves: Vec<(Color, Move)>,
    pub resets: usize,
    pub queried: RefCell<Vec<(Color, Roll)>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_legal(mut self, legal: Vec<Action>) -> Self {
        self.legal = legal;
        self
    }

    pub fn with_blocked_die(mut self, die: i8) -> Self {
        self.blocked_die = Some(die);
        self
    }

    pub fn with_hit_targets(mut self, targets: &[i8]) -> Self {
        self.hit_targets = targets.to_vec();
        self
    }

    pub fn with_race_to(mut self, moves: usize, kind: WinKind) -> Self {
        self.race_to = Some(moves);
        self.win_kind = kind;
        self
    }

    pub fn with_lookahead(mut self, lookahead: Vec<(Action, f64)>) -> Self {
        self.lookahead = lookahead;
        self
    }

    pub fn moves_by(&self, color: Color) -> usize {
        self.moves.iter().filter(|(c, _)| *c == color).count()
    }
}

impl GameEngine for ScriptedEngine {
    fn reset(&mut self) -> Result<(), EngineError> {
        self.resets += 1;
        self.moves.clear();
        self.queried.borrow_mut().clear();
        Ok(())
    }

    fn apply_move(&mut self, color: Color, mv: Move) -> Result<bool, EngineError> {
        if mv.pos == mv.to {
            return Err(EngineError::IllegalMove {
                mv,
                reason: MoveRejection::MoveToOrigin,
            });
        }
        self.moves.push((color, mv));
        Ok(self.hit_targets.contains(&mv.to))
    }

    fn encode(&self, color: Color) -> Result<Observation, EngineError> {
        let mut values = vec![0.0; OBSERVATION_LEN];
        values[0] = if color == Color::White { 1.0 } else { 0.0 };
        values[1] = if color == Color::Black { 1.0 } else { 0.0 };
        Ok(Observation::new(values))
    }

    fn encode_action(&self, color: Color, action: &Action) -> Result<Observation, EngineError> {
        let mut values = self.encode(color)?.into_vec();
        values[2] = self
            .lookahead
            .iter()
            .find(|(candidate, _)| candidate == action)
            .map_or(action.len() as f64 / 4.0, |(_, score)| *score);
        Ok(Observation::new(values))
    }

    fn legal_actions(&self, color: Color, roll: Roll) -> Result<Vec<Action>, EngineError> {
        self.queried.borrow_mut().push((color, roll));
        if self.blocked_die == Some(roll.first) {
            return Ok(Vec::new());
        }
        if !self.legal.is_empty() {
            return Ok(self.legal.clone());
        }
        let single = Move::new(13, 13 - roll.first);
        let double = Move::new(13 - roll.first, 13 - roll.first - roll.second);
        Ok(vec![
            Action::new(&[single]).map_err(|e| EngineError::Backend(e.to_string()))?,
            Action::new(&[single, double]).map_err(|e| EngineError::Backend(e.to_string()))?,
        ])
    }

    fn result(&self) -> Result<GameResult, EngineError> {
        if let Some(target) = self.race_to {
            for color in Color::PLAYERS {
                if self.moves_by(color) >= target {
                    return Ok(GameResult::won(color, self.win_kind));
                }
            }
        }
        Ok(GameResult::undecided())
    }
}

/// Shorthand for an action built from `(pos, to)` pairs.
pub fn action(moves: &[(i8, i8)]) -> Action {
    let moves: Vec<Move> = moves.iter().map(|&(pos, to)| Move::new(pos, to)).collect();
    Action::new(&moves).unwrap()
}
