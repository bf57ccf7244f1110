//! Game records and match summaries.
//!
//! A record captures one finished game: seed, opening roll, outcome,
//! counters and optionally every turn. Records serialize with bincode for
//! compact storage.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::action::{Action, Roll};
use crate::core::color::Color;
use crate::rules::WinKind;

/// One turn of a recorded game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// The player who moved.
    pub player: Color,

    /// Dice used for this turn.
    pub roll: Roll,

    /// Number of legal actions offered.
    pub candidates: usize,

    /// The action taken; `None` for a pass.
    pub action: Option<Action>,

    /// Win probability of the chosen action from the mover's side.
    pub score: Option<f64>,
}

/// A complete game played by an `Arena`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Seed passed to `Episode::reset`.
    pub seed: u64,

    pub opening_roll: Roll,

    pub first_player: Color,

    /// `NoColor` when the round cap ended the game.
    pub winner: Color,

    pub kind: WinKind,

    /// Completed steps.
    pub rounds: u32,

    pub white_hits: u32,

    pub black_hits: u32,

    /// Per-turn history, empty unless turn recording is enabled.
    pub turns: Vec<TurnRecord>,
}

impl GameRecord {
    /// Start a record for a freshly reset game.
    pub fn new(seed: u64, opening_roll: Roll, first_player: Color) -> Self {
        Self {
            seed,
            opening_roll,
            first_player,
            winner: Color::NoColor,
            kind: WinKind::None,
            rounds: 0,
            white_hits: 0,
            black_hits: 0,
            turns: Vec::new(),
        }
    }

    /// Whether the game produced a winner.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.winner != Color::NoColor
    }

    /// Serialize with bincode.
    pub fn to_bytes(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    /// Deserialize from bincode bytes.
    pub fn from_bytes(bytes: &[u8]) -> bincode::Result<Self> {
        bincode::deserialize(bytes)
    }
}

/// Aggregate results of a match.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub games: usize,
    pub white_wins: usize,
    pub black_wins: usize,
    /// Games stopped by the round cap.
    pub unfinished: usize,
    pub total_rounds: u64,
    /// Finished games by win kind.
    pub win_kinds: FxHashMap<WinKind, usize>,
}

impl MatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarize a list of records.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a GameRecord>) -> Self {
        let mut summary = Self::new();
        for record in records {
            summary.record(record);
        }
        summary
    }

    /// Add one game.
    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        self.total_rounds += u64::from(game.rounds);
        match game.winner {
            Color::White => self.white_wins += 1,
            Color::Black => self.black_wins += 1,
            Color::NoColor => self.unfinished += 1,
        }
        if game.is_finished() {
            *self.win_kinds.entry(game.kind).or_insert(0) += 1;
        }
    }

    /// Fraction of all games won by WHITE.
    #[must_use]
    pub fn white_win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.white_wins as f64 / self.games as f64
    }

    #[must_use]
    pub fn average_rounds(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_rounds as f64 / self.games as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::Move;

    fn finished(winner: Color, kind: WinKind, rounds: u32) -> GameRecord {
        let mut record = GameRecord::new(1, Roll::new(4, 2), Color::White);
        record.winner = winner;
        record.kind = kind;
        record.rounds = rounds;
        record
    }

    #[test]
    fn test_new_record_is_unfinished() {
        let record = GameRecord::new(7, Roll::new(6, 1), Color::White);
        assert!(!record.is_finished());
        assert_eq!(record.kind, WinKind::None);
        assert!(record.turns.is_empty());
    }

    #[test]
    fn test_summary_counts() {
        let records = vec![
            finished(Color::White, WinKind::Normal, 40),
            finished(Color::Black, WinKind::Gammon, 60),
            finished(Color::White, WinKind::Normal, 50),
            finished(Color::NoColor, WinKind::None, 10),
        ];
        let summary = MatchSummary::from_records(&records);

        assert_eq!(summary.games, 4);
        assert_eq!(summary.white_wins, 2);
        assert_eq!(summary.black_wins, 1);
        assert_eq!(summary.unfinished, 1);
        assert_eq!(summary.total_rounds, 160);
        assert_eq!(summary.win_kinds.get(&WinKind::Normal), Some(&2));
        assert_eq!(summary.win_kinds.get(&WinKind::Gammon), Some(&1));
        assert_eq!(summary.win_kinds.get(&WinKind::None), None);
        assert!((summary.white_win_rate() - 0.5).abs() < 1e-12);
        assert!((summary.average_rounds() - 40.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_summary_rates() {
        let summary = MatchSummary::new();
        assert_eq!(summary.white_win_rate(), 0.0);
        assert_eq!(summary.average_rounds(), 0.0);
    }

    #[test]
    fn test_record_bytes() {
        let mut record = finished(Color::Black, WinKind::Backgammon, 33);
        record.turns.push(TurnRecord {
            player: Color::White,
            roll: Roll::new(4, 2),
            candidates: 3,
            action: Some(Action::new(&[Move::new(8, 4), Move::new(6, 4)]).unwrap()),
            score: Some(0.61),
        });
        record.turns.push(TurnRecord {
            player: Color::Black,
            roll: Roll::new(6, 6),
            candidates: 0,
            action: None,
            score: None,
        });

        let bytes = record.to_bytes().unwrap();
        assert_eq!(GameRecord::from_bytes(&bytes).unwrap(), record);
    }
}
