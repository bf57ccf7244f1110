//! Episode bindings for Python.

use std::time::{SystemTime, UNIX_EPOCH};

use numpy::{PyArray1, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::core::{Action, Color, EpisodeConfig, Observation, Roll, DEFAULT_MAX_ROUNDS};
use crate::env::{Episode, EpisodePhase};
use crate::policy::{lookahead_features, select_scored};
use crate::rules::WinKind;

use super::py_core::{PyAction, PyColor};
use super::py_engine::{extract_floats, PyEngine};

fn to_numpy<'py>(py: Python<'py>, observation: Observation) -> Bound<'py, PyArray1<f64>> {
    PyArray1::from_vec_bound(py, observation.into_vec())
}

fn kind_name(kind: WinKind) -> &'static str {
    match kind {
        WinKind::None => "none",
        WinKind::Normal => "normal",
        WinKind::Gammon => "gammon",
        WinKind::Backgammon => "backgammon",
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Backgammon episode driving a Python engine object.
///
/// ```python
/// env = gammon_env.Episode(game, max_rounds=10000)
/// obs, info = env.reset(seed=7)
/// roll = info["roll"]
/// actions = env.get_legal_actions(roll)
/// obs, reward, terminated, truncated, info = env.step(actions[0] if actions else None)
/// env.next_opponent()
/// ```
#[pyclass(name = "Episode")]
pub struct PyEpisode {
    inner: Episode<PyEngine>,
}

#[pymethods]
impl PyEpisode {
    /// Wrap a game object.
    ///
    /// # Arguments
    /// - game: Engine object (see module docs for the expected methods)
    /// - max_rounds: Round cap before the episode is cut off (default: 10000)
    /// - external_mode: Report players as 0/1 instead of raw colors (default: False)
    /// - check_observations: Validate encodings against the bounds (default: True)
    #[new]
    #[pyo3(signature = (
        game,
        max_rounds = DEFAULT_MAX_ROUNDS,
        external_mode = false,
        check_observations = true
    ))]
    fn new(game: PyObject, max_rounds: u32, external_mode: bool, check_observations: bool) -> Self {
        let config = EpisodeConfig::default()
            .with_max_rounds(max_rounds)
            .with_external_mode(external_mode)
            .with_observation_checks(check_observations);
        Self {
            inner: Episode::new(PyEngine::new(game), config),
        }
    }

    /// Start a new game. Returns `(observation, info)`.
    #[pyo3(signature = (seed = None))]
    fn reset<'py>(
        &mut self,
        py: Python<'py>,
        seed: Option<u64>,
    ) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyDict>)> {
        let (observation, info) = self.inner.reset(seed.unwrap_or_else(clock_seed))?;
        let dict = PyDict::new_bound(py);
        dict.set_item("current_player", info.current_player.value())?;
        dict.set_item("roll", (info.roll.first, info.roll.second))?;
        Ok((to_numpy(py, observation), dict))
    }

    /// Play an action (or `None` to pass) for the current player.
    ///
    /// Returns `(observation, reward, terminated, truncated, info)`.
    #[pyo3(signature = (action = None))]
    #[allow(clippy::type_complexity)]
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        action: Option<PyAction>,
    ) -> PyResult<(Bound<'py, PyArray1<f64>>, f64, bool, bool, Bound<'py, PyDict>)> {
        let outcome = self.inner.step(action.as_ref().map(|a| &a.0))?;
        let info = PyDict::new_bound(py);
        info.set_item("winner", PyColor::from(outcome.info.winner).into_py(py))?;
        info.set_item("kind", kind_name(outcome.info.kind))?;
        Ok((
            to_numpy(py, outcome.observation),
            outcome.reward,
            outcome.terminated,
            outcome.truncated,
            info,
        ))
    }

    /// Legal actions of the current player, or `None` if the roll cannot be played.
    fn get_legal_actions(&self, roll: (i8, i8)) -> PyResult<Option<Vec<PyAction>>> {
        let actions = self.inner.get_legal_actions(Roll::new(roll.0, roll.1))?;
        Ok(actions.map(|actions| actions.into_iter().map(PyAction).collect()))
    }

    /// Features for `player`, after `action` if given.
    #[pyo3(signature = (player, action = None))]
    fn get_features<'py>(
        &self,
        py: Python<'py>,
        player: PyColor,
        action: Option<PyAction>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let observation = self
            .inner
            .get_features(player.into(), action.as_ref().map(|a| &a.0))?;
        Ok(to_numpy(py, observation))
    }

    /// Opponent of `player`, or of the current player.
    #[pyo3(signature = (player = None))]
    fn get_opponent(&self, player: Option<PyColor>) -> PyResult<PyColor> {
        Ok(self.inner.get_opponent(player.map(Color::from))?.into())
    }

    /// Pass the turn and return the new current player id.
    fn next_opponent(&mut self) -> PyResult<u8> {
        Ok(self.inner.next_opponent()?.value())
    }

    /// Pick the best of `actions` for `player`.
    ///
    /// `scorer` is called once with a 2-D array of look-ahead observations and
    /// must return one WHITE win probability per row. Returns
    /// `(index, action, score)` or `None` when there is nothing to choose.
    #[pyo3(signature = (player, actions, scorer))]
    #[allow(clippy::type_complexity)]
    fn choose_action(
        &self,
        py: Python<'_>,
        player: PyColor,
        actions: Option<Vec<PyAction>>,
        scorer: PyObject,
    ) -> PyResult<Option<(usize, PyAction, f64)>> {
        let player = Color::from(player).require_player()?;
        let actions: Vec<Action> = match actions {
            Some(actions) if !actions.is_empty() => actions.into_iter().map(|a| a.0).collect(),
            _ => return Ok(None),
        };

        let observations = lookahead_features(&self.inner, player, &actions)?;
        let width = observations.first().map_or(0, Observation::len);
        let flat: Vec<f64> = observations.into_iter().flat_map(Observation::into_vec).collect();
        let batch = PyArray1::from_vec_bound(py, flat)
            .reshape([actions.len(), width])
            .map_err(|e| PyValueError::new_err(format!("{}", e)))?;

        let scores = extract_floats(scorer.call1(py, (batch,))?.bind(py))?;
        Ok(select_scored(player, &actions, &scores)?
            .map(|choice| (choice.index, PyAction(choice.action.clone()), choice.score)))
    }

    #[getter]
    fn current_player(&self) -> PyColor {
        self.inner.current_player().into()
    }

    #[getter]
    fn current_player_id(&self) -> PyResult<u8> {
        Ok(self.inner.current_player_id()?.value())
    }

    #[getter]
    fn rounds(&self) -> u32 {
        self.inner.rounds()
    }

    #[getter]
    fn white_hits(&self) -> u32 {
        self.inner.hits(Color::White)
    }

    #[getter]
    fn black_hits(&self) -> u32 {
        self.inner.hits(Color::Black)
    }

    #[getter]
    fn phase(&self) -> &'static str {
        match self.inner.phase() {
            EpisodePhase::Fresh => "fresh",
            EpisodePhase::Active => "active",
            EpisodePhase::Terminal => "terminal",
        }
    }

    #[getter]
    fn max_rounds(&self) -> u32 {
        self.inner.config().max_rounds
    }

    #[getter]
    fn observation_low<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice_bound(py, self.inner.observation_space().low())
    }

    #[getter]
    fn observation_high<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice_bound(py, self.inner.observation_space().high())
    }

    #[getter]
    fn action_space_n(&self) -> usize {
        self.inner.action_space().n
    }

    fn __repr__(&self) -> String {
        format!(
            "Episode(player={}, rounds={}, phase={})",
            self.inner.current_player(),
            self.inner.rounds(),
            self.phase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Move;
    use pyo3::exceptions::PyRuntimeError;
    use pyo3::types::PyModule;

    /// Two-action race: WHITE wins once four of its checker moves are played.
    const RACE: &str = r#"
class Race:
    def __init__(self):
        self.reset()

    def reset(self):
        self.played = {1: 0, 2: 0}

    def move(self, color, pos, to):
        if pos == to:
            raise ValueError("move to origin")
        self.played[color] += 1
        return False

    def encode(self, color):
        return [0.0] * 198

    def encode_action(self, color, moves):
        obs = [0.0] * 198
        obs[2] = len(moves) / 4.0
        return obs

    def get_actions(self, color, roll):
        a, b = roll
        return [[(13, 13 - a)], [(13, 13 - a), (13 - a, 13 - a - b)]]

    def result(self):
        return 1 if self.played[1] >= 4 else 0

def score(batch):
    return batch[:, 2]
"#;

    fn with_race<F>(f: F)
    where
        F: for<'py> FnOnce(Python<'py>, PyEpisode, Bound<'py, PyAny>),
    {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let module = PyModule::from_code_bound(py, RACE, "race.py", "race").unwrap();
            let game = module.getattr("Race").unwrap().call0().unwrap().unbind();
            let scorer = module.getattr("score").unwrap();
            f(py, PyEpisode::new(game, DEFAULT_MAX_ROUNDS, false, true), scorer);
        });
    }

    #[test]
    fn test_python_game_plays_to_white_win() {
        with_race(|py, mut episode, scorer| {
            let (observation, info) = episode.reset(py, Some(5)).unwrap();
            assert_eq!(observation.to_vec().unwrap().len(), 198);
            let mut roll: (i8, i8) = info.get_item("roll").unwrap().unwrap().extract().unwrap();

            let mut terminal = None;
            for _ in 0..20 {
                let player = episode.current_player();
                let actions = episode.get_legal_actions(roll).unwrap();
                let (index, action, _) = episode
                    .choose_action(py, player, actions, scorer.clone().unbind())
                    .unwrap()
                    .unwrap();
                // WHITE takes the longer action, BLACK the shorter one.
                assert_eq!(index, usize::from(player == PyColor::WHITE));

                let (_, reward, terminated, truncated, info) =
                    episode.step(py, Some(action)).unwrap();
                assert!(!truncated);
                if terminated {
                    terminal = Some((reward, info));
                    break;
                }
                episode.next_opponent().unwrap();
                roll = (3, 1);
            }

            let (reward, info) = terminal.unwrap();
            assert_eq!(reward, 1.0);
            let winner: PyColor = info.get_item("winner").unwrap().unwrap().extract().unwrap();
            assert_eq!(winner, PyColor::WHITE);
            assert_eq!(episode.phase(), "terminal");
            assert_eq!(episode.white_hits(), 0);
        });
    }

    #[test]
    fn test_python_exception_raises_runtime_error() {
        with_race(|py, mut episode, _| {
            episode.reset(py, Some(5)).unwrap();
            let bad = PyAction(Action::new(&[Move::new(8, 8)]).unwrap());

            let err = episode.step(py, Some(bad)).unwrap_err();
            assert!(err.is_instance_of::<PyRuntimeError>(py));
            assert_eq!(episode.rounds(), 0);
        });
    }

    #[test]
    fn test_choose_action_without_actions() {
        with_race(|py, mut episode, scorer| {
            episode.reset(py, Some(1)).unwrap();
            let player = episode.current_player();
            let choice = episode
                .choose_action(py, player, None, scorer.unbind())
                .unwrap();
            assert!(choice.is_none());
        });
    }
}
