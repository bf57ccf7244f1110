//! Greedy action selection by win probability.
//!
//! For each legal action the selector asks the episode for the look-ahead
//! observation, scores all of them in one batch and keeps the action with
//! the highest win probability for the acting player. BLACK maximizes
//! `1 - p` since scorers report WHITE's chances.
//!
//! Candidates are scanned in engine order and only a strictly greater score
//! replaces the incumbent, so ties go to the earliest action. Replays depend
//! on that.

use log::trace;

use crate::core::action::Action;
use crate::core::color::Color;
use crate::core::error::{GammonError, Result};
use crate::core::observation::Observation;
use crate::env::Episode;
use crate::rules::GameEngine;

use super::traits::WinProbability;

/// The chosen action and its score from the acting player's side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection<'a> {
    /// Position in the candidate list.
    pub index: usize,
    pub action: &'a Action,
    /// Win probability of the acting player.
    pub score: f64,
}

/// Convert WHITE's win probability into `player`'s.
#[must_use]
pub fn player_score(player: Color, white_score: f64) -> f64 {
    if player == Color::Black {
        1.0 - white_score
    } else {
        white_score
    }
}

/// Index and adjusted score of the best candidate.
///
/// `white_scores` are WHITE's win probabilities in candidate order. Returns
/// `None` for an empty slice.
pub fn select_best(player: Color, white_scores: &[f64]) -> Result<Option<(usize, f64)>> {
    let player = player.require_player()?;
    let mut best: Option<(usize, f64)> = None;

    for (index, &white_score) in white_scores.iter().enumerate() {
        let score = player_score(player, white_score);
        trace!("{} candidate {} scores {:.4}", player, index, score);
        match best {
            Some((_, incumbent)) if !(score > incumbent) => {}
            _ => best = Some((index, score)),
        }
    }

    Ok(best)
}

/// Picks the action that maximizes the acting player's win probability.
#[derive(Clone, Debug, Default)]
pub struct ActionSelector<S> {
    scorer: S,
}

impl<S: WinProbability> ActionSelector<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Choose among `actions` for `player`.
    ///
    /// `None` or an empty list means the roll cannot be played and yields
    /// `Ok(None)`: pass `None` on to `step`.
    pub fn choose<'a, E: GameEngine>(
        &self,
        episode: &Episode<E>,
        player: Color,
        actions: Option<&'a [Action]>,
    ) -> Result<Option<Selection<'a>>> {
        let player = player.require_player()?;
        let actions = match actions {
            Some(actions) if !actions.is_empty() => actions,
            _ => return Ok(None),
        };

        let observations = lookahead_features(episode, player, actions)?;
        let scores = self.scorer.white_win_probability_batch(&observations);
        select_scored(player, actions, &scores)
    }
}

/// Look-ahead observations of `actions` from `player`'s side, in order.
pub fn lookahead_features<E: GameEngine>(
    episode: &Episode<E>,
    player: Color,
    actions: &[Action],
) -> Result<Vec<Observation>> {
    actions
        .iter()
        .map(|action| episode.get_features(player, Some(action)))
        .collect()
}

/// Pick from `actions` given WHITE's score for each of them.
///
/// The scores must line up with the candidates one to one.
pub fn select_scored<'a>(
    player: Color,
    actions: &'a [Action],
    white_scores: &[f64],
) -> Result<Option<Selection<'a>>> {
    if white_scores.len() != actions.len() {
        return Err(GammonError::ScoreCountMismatch {
            expected: actions.len(),
            actual: white_scores.len(),
        });
    }

    Ok(select_best(player, white_scores)?.map(|(index, score)| Selection {
        index,
        action: &actions[index],
        score,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::Move;

    #[test]
    fn test_white_takes_highest() {
        let best = select_best(Color::White, &[0.2, 0.8, 0.5]).unwrap();
        assert_eq!(best, Some((1, 0.8)));
    }

    #[test]
    fn test_black_inverts() {
        let (index, score) = select_best(Color::Black, &[0.2, 0.8, 0.5]).unwrap().unwrap();
        assert_eq!(index, 0);
        assert!((score - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_ties_keep_earliest() {
        assert_eq!(
            select_best(Color::White, &[0.4, 0.7, 0.7, 0.1]).unwrap(),
            Some((1, 0.7))
        );
        assert_eq!(
            select_best(Color::Black, &[0.5, 0.5, 0.5]).unwrap(),
            Some((0, 0.5))
        );
    }

    #[test]
    fn test_first_candidate_is_incumbent() {
        // A zero score still wins when it is the only candidate.
        assert_eq!(select_best(Color::White, &[0.0]).unwrap(), Some((0, 0.0)));
    }

    #[test]
    fn test_empty_scores() {
        assert_eq!(select_best(Color::White, &[]).unwrap(), None);
    }

    #[test]
    fn test_nocolor_rejected() {
        assert_eq!(
            select_best(Color::NoColor, &[0.5]),
            Err(GammonError::InvalidColor(Color::NoColor))
        );
    }

    #[test]
    fn test_player_score() {
        assert_eq!(player_score(Color::White, 0.3), 0.3);
        assert!((player_score(Color::Black, 0.3) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_select_scored_returns_action() {
        let actions = vec![
            Action::new(&[Move::new(13, 10)]).unwrap(),
            Action::new(&[Move::new(24, 20)]).unwrap(),
        ];
        let choice = select_scored(Color::Black, &actions, &[0.6, 0.3])
            .unwrap()
            .unwrap();
        assert_eq!(choice.index, 1);
        assert_eq!(choice.action, &actions[1]);
        assert!((choice.score - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_select_scored_count_mismatch() {
        let actions = vec![Action::new(&[Move::new(13, 10)]).unwrap()];
        assert_eq!(
            select_scored(Color::White, &actions, &[0.1, 0.2]),
            Err(GammonError::ScoreCountMismatch {
                expected: 1,
                actual: 2,
            })
        );
        assert_eq!(select_scored(Color::White, &[], &[]).unwrap(), None);
    }
}
