/// Logical fields a replay export may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Provider,
    Game,
    Player,
    Date,
    Bet,
    Win,
    Multiplier,
    VideoUrl,
    Thumb,
    Tags,
}

/// Header spellings accepted per field, tried in order.
///
/// `palyer` and `videoUrl` are spellings that older exports used.
pub const FIELD_ALIASES: &[(Field, &[&str])] = &[
    (Field::Provider, &["provider"]),
    (Field::Game, &["game"]),
    (Field::Player, &["player", "palyer"]),
    (Field::Date, &["date"]),
    (Field::Bet, &["bet"]),
    (Field::Win, &["win"]),
    (Field::Multiplier, &["x"]),
    (Field::VideoUrl, &["videourl", "videoUrl"]),
    (Field::Thumb, &["thumb", "thumbnail", "image", "img"]),
    (Field::Tags, &["tags"]),
];

impl Field {
    pub fn all() -> impl Iterator<Item = Field> {
        FIELD_ALIASES.iter().map(|(field, _)| *field)
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        FIELD_ALIASES
            .iter()
            .find(|(field, _)| field == self)
            .map(|(_, names)| *names)
            .unwrap_or(&[])
    }
}

/// Normalize raw header cells: trimmed, lower-cased, BOM removed
pub fn normalize_header(cells: &[String]) -> Vec<String> {
    cells
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
        .collect()
}

/// Position of the first candidate name present in `header`.
///
/// Candidates are tried in the order given, so an earlier alias wins even if a
/// later one appears further left in the header.
pub fn resolve_column(header: &[String], candidates: &[&str]) -> Option<usize> {
    candidates.iter().find_map(|name| {
        let name = name.to_lowercase();
        header.iter().position(|h| *h == name)
    })
}

/// Column positions for every [`Field`], resolved once per header
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    positions: Vec<(Field, usize)>,
}

impl ColumnMap {
    pub fn from_header(header: &[String]) -> Self {
        let positions = Field::all()
            .filter_map(|field| resolve_column(header, field.aliases()).map(|i| (field, i)))
            .collect();
        ColumnMap { positions }
    }

    pub fn position(&self, field: Field) -> Option<usize> {
        self.positions
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, i)| *i)
    }

    /// Raw cell for `field`, or `""` when the column or cell is missing
    pub fn get<'a>(&self, row: &'a [String], field: Field) -> &'a str {
        self.position(field)
            .and_then(|i| row.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn missing(&self) -> Vec<Field> {
        Field::all().filter(|f| self.position(*f).is_none()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<String> {
        normalize_header(&names.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn test_normalize_header() {
        let h = header(&["\u{feff}Game", " Player ", "VIDEOURL"]);
        assert_eq!(h, vec!["game", "player", "videourl"]);
    }

    #[test]
    fn test_resolve_prefers_caller_order() {
        let h = header(&["img", "thumbnail"]);
        assert_eq!(resolve_column(&h, &["thumb", "thumbnail", "image", "img"]), Some(1));
    }

    #[test]
    fn test_resolve_case_insensitive_candidate() {
        let h = header(&["game", "videoUrl"]);
        assert_eq!(resolve_column(&h, &["videoUrl"]), Some(1));
        assert_eq!(resolve_column(&h, &["missing"]), None);
    }

    #[test]
    fn test_misspelled_player_column() {
        let h = header(&["game", "palyer", "win"]);
        let map = ColumnMap::from_header(&h);
        assert_eq!(map.position(Field::Player), Some(1));
    }

    #[test]
    fn test_player_wins_over_misspelling() {
        let h = header(&["palyer", "player"]);
        let map = ColumnMap::from_header(&h);
        assert_eq!(map.position(Field::Player), Some(1));
    }

    #[test]
    fn test_alias_table_covers_every_field() {
        assert_eq!(Field::all().count(), 10);
        assert_eq!(Field::Player.aliases(), &["player", "palyer"]);
        assert_eq!(Field::VideoUrl.aliases(), &["videourl", "videoUrl"]);
        assert_eq!(Field::Thumb.aliases(), &["thumb", "thumbnail", "image", "img"]);
        for field in Field::all() {
            assert!(!field.aliases().is_empty(), "{:?} has no aliases", field);
        }
    }

    #[test]
    fn test_get_missing_cell() {
        let h = header(&["game", "win", "x"]);
        let map = ColumnMap::from_header(&h);
        let row = vec!["Gates".to_string()];
        assert_eq!(map.get(&row, Field::Game), "Gates");
        assert_eq!(map.get(&row, Field::Win), "");
        assert_eq!(map.get(&row, Field::Tags), "");
        assert!(map.missing().contains(&Field::Tags));
    }
}
