//! Python bindings for the backgammon episode.
//!
//! The board engine stays in Python: any object with the methods listed in
//! [`py_engine`] can be wrapped by `Episode`.
//!
//! # Quick Start
//!
//! ```python
//! import gammon_env as ge
//!
//! env = ge.Episode(game)
//! obs, info = env.reset(seed=42)
//! roll = info["roll"]
//! while True:
//!     actions = env.get_legal_actions(roll)
//!     choice = env.choose_action(env.current_player, actions, model.predict)
//!     obs, reward, terminated, _, info = env.step(choice[1] if choice else None)
//!     if terminated:
//!         break
//!     env.next_opponent()
//!     roll = (random.randint(1, 6), random.randint(1, 6))
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_engine;
mod py_episode;

pub use py_core::*;
pub use py_episode::*;

/// gammon_env: backgammon episodes with greedy move selection.
#[pymodule]
fn gammon_env(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyColor>()?;
    m.add_class::<PyMove>()?;
    m.add_class::<PyAction>()?;
    m.add_class::<PyEpisode>()?;

    m.add("OBSERVATION_LEN", crate::core::OBSERVATION_LEN)?;
    m.add("ACTION_SPACE_SIZE", crate::core::ACTION_SPACE_SIZE)?;
    m.add("DEFAULT_MAX_ROUNDS", crate::core::DEFAULT_MAX_ROUNDS)?;

    Ok(())
}
