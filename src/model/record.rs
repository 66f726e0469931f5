use crate::normalize::normalize_number;
use serde::{Deserialize, Deserializer, Serialize};

/// One normalized replay entry.
///
/// Records built from delimited text come out of
/// [`crate::delimited::reader::build_record`]; JSON sources deserialize
/// straight into this shape, so every field is optional there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub provider: String,
    #[serde(deserialize_with = "null_as_default")]
    pub game: String,
    #[serde(deserialize_with = "null_as_default")]
    pub player: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "lenient_number")]
    pub bet: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub win: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub x: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub video_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thumb: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_max_win: bool,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_game(mut self, game: impl Into<String>) -> Self {
        self.game = game.into();
        self
    }

    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = player.into();
        self
    }

    pub fn with_win(mut self, win: f64) -> Self {
        self.win = win;
        self
    }

    pub fn with_multiplier(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = url.into();
        self
    }

    pub fn with_max_win(mut self, is_max_win: bool) -> Self {
        self.is_max_win = is_max_win;
        self
    }

    /// True when the record belongs in the replay view
    pub fn has_video(&self) -> bool {
        !self.video_url.trim().is_empty()
    }

    /// Player name as used for grouping, `None` when blank
    pub fn player_key(&self) -> Option<&str> {
        let name = self.player.trim();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
    Null,
}

/// Accept `12.5`, `"12,5 €"` or `null` for numeric fields.
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) if n.is_finite() => n.max(0.0),
        NumberOrText::Number(_) | NumberOrText::Null => 0.0,
        NumberOrText::Text(s) => normalize_number(&s),
    };
    Ok(value)
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
