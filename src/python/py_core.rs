//! Core type bindings for Python.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::core::{Action, Color, GammonError, Move};

impl From<GammonError> for PyErr {
    fn from(err: GammonError) -> Self {
        match err {
            GammonError::Engine(_) => PyRuntimeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Python enum for Color.
#[pyclass(name = "Color", eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum PyColor {
    NOCOLOR = 0,
    WHITE = 1,
    BLACK = 2,
}

impl From<PyColor> for Color {
    fn from(color: PyColor) -> Self {
        match color {
            PyColor::NOCOLOR => Color::NoColor,
            PyColor::WHITE => Color::White,
            PyColor::BLACK => Color::Black,
        }
    }
}

impl From<Color> for PyColor {
    fn from(color: Color) -> Self {
        match color {
            Color::NoColor => PyColor::NOCOLOR,
            Color::White => PyColor::WHITE,
            Color::Black => PyColor::BLACK,
        }
    }
}

/// Python wrapper for Move.
#[pyclass(name = "Move")]
#[derive(Clone, Copy, Debug)]
pub struct PyMove(pub Move);

#[pymethods]
impl PyMove {
    #[new]
    fn new(pos: i8, to: i8) -> Self {
        Self(Move::new(pos, to))
    }

    #[getter]
    fn pos(&self) -> i8 {
        self.0.pos
    }

    #[getter]
    fn to(&self) -> i8 {
        self.0.to
    }

    fn __repr__(&self) -> String {
        format!("Move({})", self.0)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

/// Python wrapper for Action.
#[pyclass(name = "Action")]
#[derive(Clone, Debug)]
pub struct PyAction(pub Action);

#[pymethods]
impl PyAction {
    /// Create an action from up to four moves.
    #[new]
    #[pyo3(signature = (moves = Vec::new()))]
    fn new(moves: Vec<PyMove>) -> PyResult<Self> {
        let moves: Vec<Move> = moves.into_iter().map(|m| m.0).collect();
        Ok(Self(Action::new(&moves)?))
    }

    /// Number of moves.
    fn num_move(&self) -> usize {
        self.0.len()
    }

    /// Move at index `i`.
    fn get_move(&self, i: usize) -> PyResult<PyMove> {
        self.0
            .moves()
            .get(i)
            .map(|&m| PyMove(m))
            .ok_or_else(|| PyValueError::new_err(format!("move index {} out of range", i)))
    }

    fn __len__(&self) -> usize {
        self.0.len()
    }

    fn __repr__(&self) -> String {
        format!("Action({})", self.0)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let mut hasher = DefaultHasher::new();
        self.0.hash(&mut hasher);
        hasher.finish()
    }
}
