use crate::badges::{BadgeConfig, LeaderboardEntry};
use crate::error::Result;
use crate::model::{Record, SummaryStats};
use crate::source::Dataset;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

/// Write replays, leaderboard and KPIs of a dataset to an Excel workbook
pub fn write_dataset_to_xlsx(dataset: &Dataset, badges: &BadgeConfig, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    write_replays_sheet(sheet, &dataset.replays())?;

    let sheet = workbook.add_worksheet();
    write_players_sheet(sheet, &dataset.leaderboard(badges))?;

    let sheet = workbook.add_worksheet();
    write_summary_sheet(sheet, &dataset.summary(), dataset.replays().len())?;

    workbook.save(path)?;
    Ok(())
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border_bottom(FormatBorder::Thin)
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let format = header_format();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &format)?;
    }
    Ok(())
}

/// One row per replay card
fn write_replays_sheet(sheet: &mut Worksheet, records: &[Record]) -> Result<()> {
    sheet.set_column_width(0, 28)?; // Title
    sheet.set_column_width(1, 14)?; // Provider
    sheet.set_column_width(2, 24)?; // Game
    sheet.set_column_width(3, 14)?; // Player
    sheet.set_column_width(4, 12)?; // Date
    sheet.set_column_width(5, 10)?; // Bet
    sheet.set_column_width(6, 12)?; // Win
    sheet.set_column_width(7, 8)?; // X
    sheet.set_column_width(8, 9)?; // Max win
    sheet.set_column_width(9, 20)?; // Tags
    sheet.set_column_width(10, 40)?; // Video

    write_headers(
        sheet,
        &["Title", "Provider", "Game", "Player", "Date", "Bet", "Win", "X", "Max Win", "Tags", "Video"],
    )?;

    let money_format = Format::new().set_align(FormatAlign::Right).set_num_format("#,##0.00 €");
    let multi_format = Format::new().set_align(FormatAlign::Right).set_num_format("0.00\"x\"");
    let center_format = Format::new().set_align(FormatAlign::Center);

    for (idx, r) in records.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, &r.title)?;
        sheet.write_string(row, 1, &r.provider)?;
        sheet.write_string(row, 2, &r.game)?;
        sheet.write_string(row, 3, &r.player)?;
        sheet.write_string_with_format(row, 4, &r.date, &center_format)?;
        sheet.write_number_with_format(row, 5, r.bet, &money_format)?;
        sheet.write_number_with_format(row, 6, r.win, &money_format)?;
        sheet.write_number_with_format(row, 7, r.x, &multi_format)?;
        if r.is_max_win {
            sheet.write_string_with_format(row, 8, "MAX WIN", &center_format)?;
        }
        sheet.write_string(row, 9, r.tags.join(", "))?;
        sheet.write_string(row, 10, &r.video_url)?;
    }

    if !records.is_empty() {
        sheet.autofilter(0, 0, records.len() as u32, 10)?;
    }

    sheet.set_name("Replays")?;
    Ok(())
}

/// Leaderboard in rank order
fn write_players_sheet(sheet: &mut Worksheet, entries: &[LeaderboardEntry]) -> Result<()> {
    sheet.set_column_width(0, 6)?; // Rank
    sheet.set_column_width(1, 18)?; // Player
    sheet.set_column_width(2, 14)?; // Total
    sheet.set_column_width(3, 9)?; // Max win
    sheet.set_column_width(4, 30)?; // Badges
    sheet.set_column_width(5, 32)?; // Avatar

    write_headers(sheet, &["Rank", "Player", "Total", "Max Win", "Badges", "Avatar"])?;

    let money_format = Format::new().set_align(FormatAlign::Right).set_num_format("#,##0.00 €");
    let center_format = Format::new().set_align(FormatAlign::Center);

    for (idx, entry) in entries.iter().enumerate() {
        let row = (idx + 1) as u32;
        let badges: Vec<String> = entry
            .badges
            .iter()
            .map(|b| format!("{} {}", b.icon, b.tip))
            .collect();

        sheet.write_number_with_format(row, 0, row as f64, &center_format)?;
        sheet.write_string(row, 1, &entry.rollup.player)?;
        sheet.write_number_with_format(row, 2, entry.rollup.total, &money_format)?;
        if entry.rollup.maxwin {
            sheet.write_string_with_format(row, 3, "👑", &center_format)?;
        }
        sheet.write_string(row, 4, badges.join(" | "))?;
        if let Some(ref avatar) = entry.avatar {
            sheet.write_string(row, 5, avatar)?;
        }
    }

    sheet.set_name("Players")?;
    Ok(())
}

/// Key/value KPI listing
fn write_summary_sheet(sheet: &mut Worksheet, stats: &SummaryStats, replay_count: usize) -> Result<()> {
    sheet.set_column_width(0, 20)?;
    sheet.set_column_width(1, 16)?;
    sheet.set_column_width(2, 24)?;
    sheet.set_column_width(3, 14)?;

    write_headers(sheet, &["KPI", "Value", "Game", "Player"])?;

    let label_format = Format::new().set_bold();
    let money_format = Format::new().set_align(FormatAlign::Right).set_num_format("#,##0.00 €");
    let number_format = Format::new().set_align(FormatAlign::Right).set_num_format("0.00");

    sheet.write_string_with_format(1, 0, "Total winnings", &label_format)?;
    sheet.write_number_with_format(1, 1, stats.total_winnings, &money_format)?;

    sheet.write_string_with_format(2, 0, "Replays", &label_format)?;
    sheet.write_number(2, 1, replay_count as f64)?;

    sheet.write_string_with_format(3, 0, "Records", &label_format)?;
    sheet.write_number(3, 1, stats.count as f64)?;

    sheet.write_string_with_format(4, 0, "Unique games", &label_format)?;
    sheet.write_number(4, 1, stats.unique_games as f64)?;

    sheet.write_string_with_format(5, 0, "Average multiplier", &label_format)?;
    sheet.write_number_with_format(5, 1, stats.avg_multi, &number_format)?;

    sheet.write_string_with_format(6, 0, "Best win", &label_format)?;
    if let Some(ref best) = stats.best_win {
        sheet.write_number_with_format(6, 1, best.win, &money_format)?;
        sheet.write_string(6, 2, &best.game)?;
        sheet.write_string(6, 3, &best.player)?;
    }

    sheet.write_string_with_format(7, 0, "Best multiplier", &label_format)?;
    if let Some(ref best) = stats.best_multi {
        sheet.write_number_with_format(7, 1, best.x, &number_format)?;
        sheet.write_string(7, 2, &best.game)?;
        sheet.write_string(7, 3, &best.player)?;
    }

    sheet.set_name("Summary")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delimited::read_records;

    #[test]
    fn test_write_workbook() {
        let csv = "game;player;win;x;videourl\nSweet Bonanza;Domi;150,5;12;https://x\nGates;Jonas;0;0;\n";
        let dataset = Dataset::new(read_records(csv), Vec::new());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replays.xlsx");

        write_dataset_to_xlsx(&dataset, &BadgeConfig::default(), &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_write_empty_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        write_dataset_to_xlsx(&Dataset::empty(), &BadgeConfig::default(), &path).unwrap();
        assert!(path.exists());
    }
}
