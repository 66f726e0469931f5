//! Leaderboard achievements
//!
//! Threshold badges are computed from the rollup itself. Manual badges and
//! the newcomer/veteran lists come from an injected [`BadgeConfig`].

use crate::error::Result;
use crate::model::PlayerRollup;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Display metadata for a configured badge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeDef {
    pub icon: String,
    pub tip: String,
}

/// Badge assignments, usually loaded from a JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgeConfig {
    pub defs: HashMap<String, BadgeDef>,
    pub players: HashMap<String, Vec<String>>,
    pub newcomers: Vec<String>,
    pub veterans: Vec<String>,
    /// Player name to avatar image path or URL
    pub avatars: HashMap<String, String>,
}

impl BadgeConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    fn is_newcomer(&self, player: &str) -> bool {
        self.newcomers.iter().any(|p| p == player)
    }

    fn is_veteran(&self, player: &str) -> bool {
        self.veterans.iter().any(|p| p == player)
    }

    /// Configured avatar for `player`; blank entries count as none
    pub fn avatar(&self, player: &str) -> Option<&str> {
        self.avatars
            .get(player)
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
    }

    /// Manual badges for `player`, in configured order; unknown keys are skipped
    fn manual_badges(&self, player: &str) -> Vec<Badge> {
        let keys = match self.players.get(player) {
            Some(keys) => keys,
            None => return Vec::new(),
        };
        keys.iter()
            .filter_map(|key| {
                self.defs.get(key).map(|def| Badge {
                    key: format!("gzb-{}", key),
                    icon: def.icon.clone(),
                    tip: def.tip.clone(),
                })
            })
            .collect()
    }
}

/// A badge as shown next to a player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub key: String,
    pub icon: String,
    pub tip: String,
}

impl Badge {
    fn new(key: &str, icon: &str, tip: &str) -> Self {
        Badge {
            key: key.to_string(),
            icon: icon.to_string(),
            tip: tip.to_string(),
        }
    }
}

/// Total-winnings thresholds and their badges
const TOTAL_THRESHOLDS: [(f64, &str, &str, &str); 3] = [
    (10_000.0, "a1", "🥉", "≥ 10.000 € Gesamtgewinn"),
    (50_000.0, "a2", "🥈", "≥ 50.000 € Gesamtgewinn"),
    (100_000.0, "a3", "🥇", "≥ 100.000 € Gesamtgewinn"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rollup: PlayerRollup,
    pub initials: String,
    /// Shown instead of the initials when set
    pub avatar: Option<String>,
    pub badges: Vec<Badge>,
}

/// Up to two upper-cased initials, `?` for an empty name
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .take(2)
        .filter_map(|part| part.chars().next())
        .collect();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters.to_uppercase()
    }
}

/// Badges earned by one player
pub fn badges_for(rollup: &PlayerRollup, config: &BadgeConfig) -> Vec<Badge> {
    let mut badges: Vec<Badge> = TOTAL_THRESHOLDS
        .iter()
        .filter(|(min, ..)| rollup.total >= *min)
        .map(|(_, key, icon, tip)| Badge::new(key, icon, tip))
        .collect();

    if rollup.maxwin {
        badges.push(Badge::new("a4", "👑", "Mindestens ein MAXWIN"));
    }
    if config.is_newcomer(&rollup.player) {
        badges.push(Badge::new("a5", "🆕", "Newcomer"));
    }
    if config.is_veteran(&rollup.player) {
        badges.push(Badge::new("a6", "🛡️", "Veteran"));
    }

    badges.extend(config.manual_badges(&rollup.player));
    badges
}

/// Decorate rollups with initials, avatars and badges, keeping their order
pub fn leaderboard(rollups: &[PlayerRollup], config: &BadgeConfig) -> Vec<LeaderboardEntry> {
    rollups
        .iter()
        .map(|rollup| LeaderboardEntry {
            initials: initials(&rollup.player),
            avatar: config.avatar(&rollup.player).map(str::to_string),
            badges: badges_for(rollup, config),
            rollup: rollup.clone(),
        })
        .collect()
}
