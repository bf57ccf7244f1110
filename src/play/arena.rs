//! Match driver: plays full games between two selectors.
//!
//! Each game resets the episode with its own seed, plays the opening roll as
//! the first turn, and draws later rolls from a dice stream derived from the
//! same seed. Between steps the driver hands the turn over explicitly.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::action::Action;
use crate::core::color::Color;
use crate::core::error::{GammonError, Result};
use crate::core::rng::GameRng;
use crate::env::Episode;
use crate::policy::{ActionSelector, Selection, WinProbability};
use crate::rules::GameEngine;

use super::record::{GameRecord, MatchSummary, TurnRecord};

/// Configuration for a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of games to play.
    pub games: usize,

    /// Game `i` is reset with seed `base_seed + i`.
    pub base_seed: u64,

    /// Keep a `TurnRecord` for every turn.
    pub record_turns: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 100,
            base_seed: 0,
            record_turns: false,
        }
    }
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    pub fn with_turn_records(mut self, record: bool) -> Self {
        self.record_turns = record;
        self
    }

    /// Seed of the `index`-th game.
    pub fn game_seed(&self, index: usize) -> u64 {
        self.base_seed.wrapping_add(index as u64)
    }
}

/// Plays games with one selector per color.
pub struct Arena<W, B> {
    white: ActionSelector<W>,
    black: ActionSelector<B>,
    config: MatchConfig,
}

impl<W: WinProbability, B: WinProbability> Arena<W, B> {
    pub fn new(white: ActionSelector<W>, black: ActionSelector<B>, config: MatchConfig) -> Self {
        Self {
            white,
            black,
            config,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Play one game to termination.
    pub fn play_game<E: GameEngine>(&self, episode: &mut Episode<E>, seed: u64) -> Result<GameRecord> {
        let (_, opening) = episode.reset(seed)?;
        let mut dice = GameRng::new(seed).for_context("dice");
        let mut record = GameRecord::new(seed, opening.roll, episode.current_player());
        let mut pending_roll = Some(opening.roll);

        loop {
            let player = episode.current_player();
            let roll = pending_roll.take().unwrap_or_else(|| dice.roll());
            let actions = episode.get_legal_actions(roll)?;
            let candidates = actions.as_ref().map_or(0, Vec::len);

            let selection = self.select(episode, player, actions.as_deref())?;
            let score = selection.map(|s| s.score);
            let action = selection.map(|s| s.action.clone());
            debug!(
                "round {} {} roll {} picks {} of {}",
                episode.rounds() + 1,
                player,
                roll,
                action.as_ref().map_or_else(|| "pass".to_string(), ToString::to_string),
                candidates
            );

            if self.config.record_turns {
                record.turns.push(TurnRecord {
                    player,
                    roll,
                    candidates,
                    action: action.clone(),
                    score,
                });
            }

            let outcome = episode.step(action.as_ref())?;
            if outcome.terminated {
                record.winner = outcome.info.winner;
                record.kind = outcome.info.kind;
                break;
            }
            episode.next_opponent()?;
        }

        record.rounds = episode.rounds();
        record.white_hits = episode.hits(Color::White);
        record.black_hits = episode.hits(Color::Black);
        Ok(record)
    }

    /// Play `config.games` games and return their records.
    pub fn play_games<E: GameEngine>(&self, episode: &mut Episode<E>) -> Result<Vec<GameRecord>> {
        let mut records = Vec::with_capacity(self.config.games);
        for index in 0..self.config.games {
            let record = self.play_game(episode, self.config.game_seed(index))?;
            match record.winner {
                Color::NoColor => info!(
                    "game {}: no winner after {} rounds",
                    index + 1,
                    record.rounds
                ),
                winner => info!(
                    "game {}: {} won after {} rounds",
                    index + 1,
                    winner,
                    record.rounds
                ),
            }
            records.push(record);
        }
        Ok(records)
    }

    /// Play `config.games` games and summarize them.
    pub fn play_match<E: GameEngine>(&self, episode: &mut Episode<E>) -> Result<MatchSummary> {
        let records = self.play_games(episode)?;
        let summary = MatchSummary::from_records(&records);
        info!(
            "result: white wins {}/{}",
            summary.white_wins, summary.games
        );
        Ok(summary)
    }

    fn select<'a, E: GameEngine>(
        &self,
        episode: &Episode<E>,
        player: Color,
        actions: Option<&'a [Action]>,
    ) -> Result<Option<Selection<'a>>> {
        match player {
            Color::White => self.white.choose(episode, player, actions),
            Color::Black => self.black.choose(episode, player, actions),
            Color::NoColor => Err(GammonError::InvalidColor(player)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.games, 100);
        assert_eq!(config.base_seed, 0);
        assert!(!config.record_turns);
    }

    #[test]
    fn test_builder_and_seeds() {
        let config = MatchConfig::new()
            .with_games(3)
            .with_base_seed(u64::MAX)
            .with_turn_records(true);

        assert_eq!(config.games, 3);
        assert!(config.record_turns);
        assert_eq!(config.game_seed(0), u64::MAX);
        assert_eq!(config.game_seed(1), 0);
    }

    #[test]
    fn test_config_serialization() {
        let config = MatchConfig::default().with_games(10);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
