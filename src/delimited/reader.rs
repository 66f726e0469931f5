use super::columns::{normalize_header, ColumnMap, Field};
use super::tokenizer::{detect_delimiter, first_line, tokenize};
use crate::model::Record;
use crate::normalize::{normalize_date, normalize_number};
use lazy_static::lazy_static;
use regex::Regex;

/// Image used when neither the row nor the game table provides one
pub const DEFAULT_THUMB: &str = "assets/img/gates_of_olympus.svg";

const GAME_THUMBS: &[(&str, &str)] = &[
    ("gates of olympus", "assets/img/gates_of_olympus.svg"),
    ("wanted dead or a wild", "assets/img/wanted_dead_or_a_wild.svg"),
    ("sweet bonanza", "assets/img/sweet_bonanza.svg"),
];

lazy_static! {
    static ref MAX_WIN: Regex = Regex::new(r"(?i)max\s*win").unwrap();
    static ref TAG_SEPARATOR: Regex = Regex::new(r"[,;]\s*").unwrap();
}

/// Built-in thumbnail for a game name, matched case-insensitively
pub fn guess_thumb(game: &str) -> &'static str {
    let key = game.to_lowercase();
    GAME_THUMBS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, path)| *path)
        .unwrap_or(DEFAULT_THUMB)
}

/// Split a tags cell on `,` / `;`, dropping blanks and case-insensitive repeats
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for fragment in TAG_SEPARATOR.split(raw) {
        let tag = fragment.trim();
        if tag.is_empty() {
            continue;
        }
        let key = tag.to_lowercase();
        if tags.iter().any(|t| t.to_lowercase() == key) {
            continue;
        }
        tags.push(tag.to_string());
    }
    tags
}

/// Whether a tag list or free text marks a record as a max win
pub fn detect_max_win(tags: &[String], title: &str, game: &str) -> bool {
    tags.iter().any(|t| t.to_lowercase() == "maxwin") || MAX_WIN.is_match(title) || MAX_WIN.is_match(game)
}

/// `game` followed by ` {x}x` when the multiplier is set
pub fn make_title(game: &str, x: f64) -> String {
    if x != 0.0 {
        format!("{} {}x", game, x).trim().to_string()
    } else {
        game.trim().to_string()
    }
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Build one record from a data row, or `None` for a blank row
pub fn build_record(columns: &ColumnMap, row: &[String]) -> Option<Record> {
    if is_blank_row(row) {
        return None;
    }

    let game = columns.get(row, Field::Game).to_string();
    let x = normalize_number(columns.get(row, Field::Multiplier));
    let title = make_title(&game, x);

    let user_thumb = columns.get(row, Field::Thumb).trim();
    let thumb = if user_thumb.is_empty() {
        guess_thumb(&game).to_string()
    } else {
        user_thumb.to_string()
    };

    let tags = parse_tags(columns.get(row, Field::Tags));
    let is_max_win = detect_max_win(&tags, &title, &game);

    Some(Record {
        provider: columns.get(row, Field::Provider).to_string(),
        player: columns.get(row, Field::Player).to_string(),
        date: normalize_date(columns.get(row, Field::Date)),
        bet: normalize_number(columns.get(row, Field::Bet)),
        win: normalize_number(columns.get(row, Field::Win)),
        video_url: columns.get(row, Field::VideoUrl).to_string(),
        title,
        game,
        x,
        thumb,
        tags,
        is_max_win,
    })
}

/// Parse a full delimited export into records.
///
/// The delimiter is detected from the header line; blank rows are skipped.
pub fn read_records(text: &str) -> Vec<Record> {
    let delimiter = detect_delimiter(first_line(text));
    let mut rows = tokenize(text, delimiter).into_iter();

    let header = match rows.next() {
        Some(cells) => normalize_header(&cells),
        None => return Vec::new(),
    };
    let columns = ColumnMap::from_header(&header);

    let missing = columns.missing();
    if !missing.is_empty() {
        log::debug!("Header has no column for {:?}", missing);
    }

    let records: Vec<Record> = rows.filter_map(|row| build_record(&columns, &row)).collect();
    log::debug!(
        "Read {} records (delimiter '{}', {} columns)",
        records.len(),
        delimiter,
        header.len()
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn columns(names: &[&str]) -> ColumnMap {
        ColumnMap::from_header(&normalize_header(&row(names)))
    }

    #[test]
    fn test_title_and_multiplier() {
        assert_eq!(make_title("Sweet Bonanza", 12.0), "Sweet Bonanza 12x");
        assert_eq!(make_title("Gates", 12.5), "Gates 12.5x");
        assert_eq!(make_title("Gates", 0.0), "Gates");
        assert_eq!(make_title("", 3.0), "3x");
    }

    #[test]
    fn test_guess_thumb() {
        assert_eq!(guess_thumb("Sweet BONANZA"), "assets/img/sweet_bonanza.svg");
        assert_eq!(guess_thumb("Wanted Dead or a Wild"), "assets/img/wanted_dead_or_a_wild.svg");
        assert_eq!(guess_thumb("Book of Dead"), DEFAULT_THUMB);
        assert_eq!(guess_thumb(""), DEFAULT_THUMB);
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("bonus, MaxWin;retrigger"), vec!["bonus", "MaxWin", "retrigger"]);
        assert_eq!(parse_tags("a,,b; ;"), vec!["a", "b"]);
        assert_eq!(parse_tags("Bonus,bonus"), vec!["Bonus"]);
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn test_max_win_from_tag() {
        let cols = columns(&["game", "x", "tags"]);
        let record = build_record(&cols, &row(&["Gates", "500", "bonus;MAXWIN"])).unwrap();
        assert!(record.is_max_win);
        assert_eq!(record.title, "Gates 500x");
    }

    #[test]
    fn test_max_win_from_text() {
        let cols = columns(&["game"]);
        let record = build_record(&cols, &row(&["Big Max Win Special"])).unwrap();
        assert!(record.is_max_win);
        let record = build_record(&cols, &row(&["maxwin hunt"])).unwrap();
        assert!(record.is_max_win);
        let record = build_record(&cols, &row(&["Gates"])).unwrap();
        assert!(!record.is_max_win);
    }

    #[test]
    fn test_blank_row_skipped() {
        let cols = columns(&["game", "win"]);
        assert!(build_record(&cols, &row(&["  ", ""])).is_none());
        assert!(build_record(&cols, &row(&[""])).is_none());
    }

    #[test]
    fn test_user_thumb_trimmed() {
        let cols = columns(&["game", "Image"]);
        let record = build_record(&cols, &row(&["Gates", "  thumbs/g.png "])).unwrap();
        assert_eq!(record.thumb, "thumbs/g.png");
        let record = build_record(&cols, &row(&["Sweet Bonanza", "   "])).unwrap();
        assert_eq!(record.thumb, "assets/img/sweet_bonanza.svg");
    }

    #[test]
    fn test_full_row() {
        let cols = columns(&[
            "Provider", "Game", "Palyer", "Date", "Bet", "Win", "X", "videoUrl", "Tags",
        ]);
        let record = build_record(
            &cols,
            &row(&[
                "Pragmatic",
                "Gates of Olympus",
                "Moses",
                "5.3.2024",
                "2,00 €",
                "1.234,56 €",
                "617,28",
                "https://youtu.be/abc",
                "bonus",
            ]),
        )
        .unwrap();
        assert_eq!(record.provider, "Pragmatic");
        assert_eq!(record.player, "Moses");
        assert_eq!(record.date, "2024-03-05");
        assert_eq!(record.bet, 2.0);
        assert_eq!(record.win, 1234.56);
        assert_eq!(record.x, 617.28);
        assert_eq!(record.title, "Gates of Olympus 617.28x");
        assert_eq!(record.video_url, "https://youtu.be/abc");
        assert_eq!(record.thumb, "assets/img/gates_of_olympus.svg");
        assert_eq!(record.tags, vec!["bonus"]);
    }

    #[test]
    fn test_read_records_end_to_end() {
        let csv = "game;player;win;x;videourl\nSweet Bonanza;Domi;150,5;12;https://x\nGates;Domi;0;0;\n";
        let records = read_records(csv);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Sweet Bonanza 12x");
        assert_eq!(records[0].win, 150.5);
        assert!(records[0].has_video());
        assert!(!records[1].has_video());
        assert_eq!(records[1].title, "Gates");
    }

    #[test]
    fn test_read_records_comma_with_quotes_and_blank_lines() {
        let csv = "game,player,win,tags\r\n\"Wanted, Dead\",Jonas,\"1,234.50\",\"a;b\"\r\n\r\n,,,\r\n";
        let records = read_records(csv);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].game, "Wanted, Dead");
        assert_eq!(records[0].win, 1234.5);
        assert_eq!(records[0].tags, vec!["a", "b"]);
    }

    #[test]
    fn test_read_records_empty() {
        assert!(read_records("").is_empty());
        assert!(read_records("game;win\n").is_empty());
    }
}
