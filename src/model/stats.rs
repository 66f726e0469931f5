use super::record::Record;
use serde::Serialize;

/// Aggregate KPIs over a record collection.
///
/// `best_win` and `best_multi` are `None` only for an empty collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_winnings: f64,
    pub best_win: Option<Record>,
    pub best_multi: Option<Record>,
    pub avg_multi: f64,
    pub unique_games: usize,
    pub count: usize,
}

/// Per-player totals for the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRollup {
    pub player: String,
    pub total: f64,
    pub maxwin: bool,
}

impl PlayerRollup {
    pub fn new(player: impl Into<String>) -> Self {
        PlayerRollup {
            player: player.into(),
            total: 0.0,
            maxwin: false,
        }
    }

    /// Fold one record into this rollup
    pub fn add(&mut self, record: &Record) {
        self.total += record.win;
        self.maxwin = self.maxwin || record.is_max_win;
    }
}
