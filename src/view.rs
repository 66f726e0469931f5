//! Replay card browsing: free-text search and sort orders

use crate::model::Record;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    HighestX,
    BiggestWin,
    /// Only max-win records, newest first
    Maxwin,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::HighestX => "highest-x",
            SortKey::BiggestWin => "biggest-win",
            SortKey::Maxwin => "maxwin",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "highest-x" => Ok(SortKey::HighestX),
            "biggest-win" => Ok(SortKey::BiggestWin),
            "maxwin" => Ok(SortKey::Maxwin),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

/// Order by date, undated records last regardless of direction
fn compare_dates(a: &Record, b: &Record, newest_first: bool) -> Ordering {
    match (parse_date(&a.date), parse_date(&b.date)) {
        (Some(da), Some(db)) => {
            if newest_first {
                db.cmp(&da)
            } else {
                da.cmp(&db)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Whether `record` matches an already lower-cased query
pub fn matches_query(record: &Record, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    [&record.title, &record.game, &record.provider, &record.player]
        .iter()
        .any(|field| field.to_lowercase().contains(query))
        || record.tags.join(" ").to_lowercase().contains(query)
}

/// Filter and order the replay cards.
///
/// Pure over its inputs; callers re-run it on every query or sort change.
pub fn filter_replays<'a>(records: &'a [Record], query: &str, sort: SortKey) -> Vec<&'a Record> {
    let query = query.trim().to_lowercase();
    let mut selected: Vec<&Record> = records
        .iter()
        .filter(|r| matches_query(r, &query))
        .collect();

    match sort {
        SortKey::Maxwin => {
            selected.retain(|r| r.is_max_win);
            selected.sort_by(|a, b| compare_dates(a, b, true));
        }
        SortKey::Newest => selected.sort_by(|a, b| compare_dates(a, b, true)),
        SortKey::Oldest => selected.sort_by(|a, b| compare_dates(a, b, false)),
        SortKey::HighestX => selected.sort_by(|a, b| descending(a.x, b.x)),
        SortKey::BiggestWin => selected.sort_by(|a, b| descending(a.win, b.win)),
    }

    selected
}
