//! Adapter exposing a Python game object as a `GameEngine`.
//!
//! The object must provide:
//!
//! - `reset()`
//! - `move(color, pos, to) -> bool` (true on a hit)
//! - `encode(color) -> sequence[float]`
//! - `encode_action(color, moves) -> sequence[float]`, `moves` a list of `(pos, to)`
//! - `get_actions(color, [die1, die2]) -> list[action]`
//! - `result()` with a `winner` (and optionally `kind`) attribute, or a plain winner int
//!
//! Colors are passed as their raw integer values (0 none, 1 white, 2 black).
//! Actions may be `Action` objects from this module, objects with
//! `num_move()`/`get_move(i)`, or sequences of moves; moves may be `Move`
//! objects, objects with `pos`/`to` attributes or `(pos, to)` tuples.

use pyo3::prelude::*;

use crate::core::{Action, Color, EngineError, Move, Observation, Roll};
use crate::rules::{GameEngine, GameResult, WinKind};

use super::py_core::{PyAction, PyMove};

fn backend(err: PyErr) -> EngineError {
    EngineError::Backend(err.to_string())
}

/// Flat float vector from a list, tuple or array-like of any dtype.
pub(crate) fn extract_floats(obj: &Bound<'_, PyAny>) -> PyResult<Vec<f64>> {
    if obj.hasattr("ravel")? {
        return obj.call_method0("ravel")?.call_method0("tolist")?.extract();
    }
    obj.extract()
}

fn extract_move(obj: &Bound<'_, PyAny>) -> PyResult<Move> {
    if let Ok(mv) = obj.extract::<PyMove>() {
        return Ok(mv.0);
    }
    if let Ok((pos, to)) = obj.extract::<(i8, i8)>() {
        return Ok(Move::new(pos, to));
    }
    let pos: i8 = obj.getattr("pos")?.extract()?;
    let to: i8 = obj.getattr("to")?.extract()?;
    Ok(Move::new(pos, to))
}

fn extract_action(obj: &Bound<'_, PyAny>) -> PyResult<Action> {
    if let Ok(action) = obj.extract::<PyAction>() {
        return Ok(action.0);
    }
    let mut moves = Vec::new();
    if obj.hasattr("num_move")? {
        let count: usize = obj.call_method0("num_move")?.extract()?;
        for i in 0..count {
            moves.push(extract_move(&obj.call_method1("get_move", (i,))?)?);
        }
    } else {
        for item in obj.iter()? {
            moves.push(extract_move(&item?)?);
        }
    }
    Ok(Action::new(&moves)?)
}

fn win_kind_from_raw(raw: u8) -> WinKind {
    match raw {
        1 => WinKind::Normal,
        2 => WinKind::Gammon,
        3 => WinKind::Backgammon,
        _ => WinKind::None,
    }
}

/// `GameEngine` backed by a Python object.
pub struct PyEngine {
    game: PyObject,
}

impl PyEngine {
    pub fn new(game: PyObject) -> Self {
        Self { game }
    }
}

impl GameEngine for PyEngine {
    fn reset(&mut self) -> Result<(), EngineError> {
        Python::with_gil(|py| {
            self.game.call_method0(py, "reset").map_err(backend)?;
            Ok(())
        })
    }

    fn apply_move(&mut self, color: Color, mv: Move) -> Result<bool, EngineError> {
        Python::with_gil(|py| {
            self.game
                .call_method1(py, "move", (color.raw(), mv.pos, mv.to))
                .and_then(|hit| hit.extract::<bool>(py))
                .map_err(backend)
        })
    }

    fn encode(&self, color: Color) -> Result<Observation, EngineError> {
        Python::with_gil(|py| {
            self.game
                .call_method1(py, "encode", (color.raw(),))
                .and_then(|vec| extract_floats(vec.bind(py)))
                .map(Observation::new)
                .map_err(backend)
        })
    }

    fn encode_action(&self, color: Color, action: &Action) -> Result<Observation, EngineError> {
        let moves: Vec<(i8, i8)> = action.iter().map(|m| (m.pos, m.to)).collect();
        Python::with_gil(|py| {
            self.game
                .call_method1(py, "encode_action", (color.raw(), moves))
                .and_then(|vec| extract_floats(vec.bind(py)))
                .map(Observation::new)
                .map_err(backend)
        })
    }

    fn legal_actions(&self, color: Color, roll: Roll) -> Result<Vec<Action>, EngineError> {
        Python::with_gil(|py| {
            let actions = self
                .game
                .call_method1(py, "get_actions", (color.raw(), vec![roll.first, roll.second]))
                .map_err(backend)?;
            if actions.is_none(py) {
                return Ok(Vec::new());
            }
            let mut out = Vec::new();
            for item in actions.bind(py).iter().map_err(backend)? {
                let item = item.map_err(backend)?;
                out.push(extract_action(&item).map_err(backend)?);
            }
            Ok(out)
        })
    }

    fn result(&self) -> Result<GameResult, EngineError> {
        Python::with_gil(|py| {
            let result = self.game.call_method0(py, "result").map_err(backend)?;
            let result = result.bind(py);
            if let Ok(raw) = result.extract::<u8>() {
                return Ok(GameResult::won(
                    Color::from_raw(raw).unwrap_or_default(),
                    WinKind::None,
                ));
            }
            let winner: u8 = result
                .getattr("winner")
                .and_then(|w| w.extract())
                .map_err(backend)?;
            let kind: u8 = match result.getattr("kind") {
                Ok(kind) => kind.extract().map_err(backend)?,
                Err(_) => 0,
            };
            Ok(GameResult::won(
                Color::from_raw(winner).unwrap_or_default(),
                win_kind_from_raw(kind),
            ))
        })
    }
}
