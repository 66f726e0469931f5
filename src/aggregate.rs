//! KPI and per-player aggregation over a record collection

use crate::model::{PlayerRollup, Record, SummaryStats};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// First record holding the largest `key`; earlier records win ties
fn best_by<F>(records: &[Record], key: F) -> Option<&Record>
where
    F: Fn(&Record) -> f64,
{
    let mut best: Option<&Record> = None;
    for record in records {
        match best {
            Some(current) if key(record) <= key(current) => {}
            _ => best = Some(record),
        }
    }
    best
}

/// Compute the KPI tiles for `records`
pub fn compute_stats(records: &[Record]) -> SummaryStats {
    let total_winnings = records.iter().map(|r| r.win).sum();

    let avg_multi = if records.is_empty() {
        0.0
    } else {
        records.iter().map(|r| r.x).sum::<f64>() / records.len() as f64
    };

    let unique_games = records
        .iter()
        .map(|r| r.game.as_str())
        .filter(|g| !g.is_empty())
        .collect::<HashSet<_>>()
        .len();

    SummaryStats {
        total_winnings,
        best_win: best_by(records, |r| r.win).cloned(),
        best_multi: best_by(records, |r| r.x).cloned(),
        avg_multi,
        unique_games,
        count: records.len(),
    }
}

/// Group records by trimmed player name, highest total first.
///
/// Records without a player are skipped. Players with equal totals keep the
/// order in which they first appeared.
pub fn player_rollups(records: &[Record]) -> Vec<PlayerRollup> {
    let mut rollups: Vec<PlayerRollup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let Some(player) = record.player_key() else {
            continue;
        };
        let slot = *index.entry(player.to_string()).or_insert_with(|| {
            rollups.push(PlayerRollup::new(player));
            rollups.len() - 1
        });
        rollups[slot].add(record);
    }

    // sort_by is stable
    rollups.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
    rollups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn win(game: &str, player: &str, win: f64, x: f64) -> Record {
        Record::new()
            .with_game(game)
            .with_player(player)
            .with_win(win)
            .with_multiplier(x)
    }

    #[test]
    fn test_totals_and_best_win() {
        let records = vec![
            win("Gates", "A", 10.0, 2.0),
            win("Sweet Bonanza", "B", 20.0, 8.0),
            win("Gates", "C", 30.0, 5.0),
        ];
        let stats = compute_stats(&records);
        assert_eq!(stats.total_winnings, 60.0);
        assert_eq!(stats.best_win.as_ref().map(|r| r.win), Some(30.0));
        assert_eq!(stats.best_multi.as_ref().map(|r| r.player.as_str()), Some("B"));
        assert_eq!(stats.avg_multi, 5.0);
        assert_eq!(stats.unique_games, 2);
        assert_eq!(stats.count, 3);
    }

    #[test]
    fn test_empty_collection() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total_winnings, 0.0);
        assert_eq!(stats.avg_multi, 0.0);
        assert!(stats.best_win.is_none());
        assert!(stats.best_multi.is_none());
        assert_eq!(stats.unique_games, 0);
        assert_eq!(stats.count, 0);
    }

    #[test]
    fn test_ties_keep_first_record() {
        let records = vec![
            win("Gates", "first", 50.0, 10.0),
            win("Gates", "second", 50.0, 10.0),
        ];
        let stats = compute_stats(&records);
        assert_eq!(stats.best_win.unwrap().player, "first");
        assert_eq!(stats.best_multi.unwrap().player, "first");
    }

    #[test]
    fn test_all_zero_still_has_best() {
        let records = vec![win("", "A", 0.0, 0.0)];
        let stats = compute_stats(&records);
        assert!(stats.best_win.is_some());
        assert_eq!(stats.unique_games, 0);
    }

    #[test]
    fn test_rollup_sums_and_maxwin() {
        let records = vec![
            win("Gates", "A", 5.0, 1.0),
            win("Gates", " A ", 7.0, 1.0).with_max_win(true),
            win("Gates", "", 100.0, 1.0),
            win("Gates", "B", 3.0, 1.0),
        ];
        let rollups = player_rollups(&records);
        assert_eq!(rollups.len(), 2);
        assert_eq!(
            rollups[0],
            PlayerRollup {
                player: "A".to_string(),
                total: 12.0,
                maxwin: true,
            }
        );
        assert_eq!(rollups[1].player, "B");
        assert!(!rollups[1].maxwin);
    }

    #[test]
    fn test_rollup_sorted_descending_stable() {
        let records = vec![
            win("G", "low", 1.0, 0.0),
            win("G", "tie1", 5.0, 0.0),
            win("G", "high", 9.0, 0.0),
            win("G", "tie2", 5.0, 0.0),
        ];
        let names: Vec<String> = player_rollups(&records).into_iter().map(|r| r.player).collect();
        assert_eq!(names, vec!["high", "tie1", "tie2", "low"]);
    }
}
