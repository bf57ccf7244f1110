//! Action selection driven by a win-probability model.
//!
//! ## Overview
//!
//! - **Traits**: `WinProbability`, implemented for closures
//! - **Selection**: `ActionSelector`, `select_best`
//! - **Baseline**: `ConstantScore` for testing
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gammon_env::policy::ActionSelector;
//!
//! let selector = ActionSelector::new(|obs: &Observation| model.run(obs));
//! let actions = episode.get_legal_actions(roll)?;
//! let choice = selector.choose(&episode, episode.current_player(), actions.as_deref())?;
//! episode.step(choice.map(|c| c.action))?;
//! ```

pub mod selector;
pub mod traits;

pub use selector::{
    lookahead_features, player_score, select_best, select_scored, ActionSelector, Selection,
};
pub use traits::{ConstantScore, WinProbability};
