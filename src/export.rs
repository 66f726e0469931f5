//! Writing normalized records and whole datasets back out (CSV, JSON, XLSX)

use crate::badges::BadgeConfig;
use crate::error::{ReplayError, Result};
use crate::model::Record;
use crate::source::Dataset;
use crate::xlsx::write_dataset_to_xlsx;
use std::path::Path;

const CSV_HEADERS: [&str; 12] = [
    "title", "provider", "game", "player", "date", "bet", "win", "x", "videoUrl", "thumb", "tags",
    "isMaxWin",
];

/// Write records as comma-separated text with one header row
pub fn write_records_csv(records: &[Record], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADERS)?;

    for r in records {
        writer.write_record([
            r.title.clone(),
            r.provider.clone(),
            r.game.clone(),
            r.player.clone(),
            r.date.clone(),
            r.bet.to_string(),
            r.win.to_string(),
            r.x.to_string(),
            r.video_url.clone(),
            r.thumb.clone(),
            r.tags.join(", "),
            r.is_max_win.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write records as a pretty-printed JSON array (same shape the loader accepts)
pub fn write_records_json(records: &[Record], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, records)?;
    Ok(())
}

/// Write a dataset in the format named by the extension of `path`.
///
/// `csv` and `json` hold the combined statistics pool; `xlsx` holds the
/// replay, leaderboard and summary sheets.
pub fn write_dataset(dataset: &Dataset, badges: &BadgeConfig, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => write_records_csv(&dataset.combined(), path),
        "json" => write_records_json(&dataset.combined(), path),
        "xlsx" => write_dataset_to_xlsx(dataset, badges, path),
        _ => Err(ReplayError::UnsupportedFormat(ext)),
    }
}
