//! Loading replay data from local files or HTTP(S) URLs

use crate::aggregate::{compute_stats, player_rollups};
use crate::badges::{leaderboard, BadgeConfig, LeaderboardEntry};
use crate::delimited::read_records;
use crate::error::{ReplayError, Result};
use crate::model::{PlayerRollup, Record, SummaryStats};
use std::path::Path;
use std::time::Duration;

const USER_AGENT: &str = concat!("replay-stats/", env!("CARGO_PKG_VERSION"));

/// Where to load data from and how
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Primary replay export (path or URL)
    pub source: String,
    /// Optional supplementary stats (JSON, same record shape)
    pub extra: Option<String>,
    /// HTTP request timeout
    pub timeout: Duration,
}

impl LoadConfig {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            extra: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_extra(mut self, extra: Option<String>) -> Self {
        self.extra = extra;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Parsed URL when `location` is an http(s) address
fn as_http_url(location: &str) -> Option<url::Url> {
    url::Url::parse(location)
        .ok()
        .filter(|u| u.scheme() == "http" || u.scheme() == "https")
}

fn fetch_url(url: &url::Url, timeout: Duration) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ReplayError::Http(format!("Failed to create HTTP client: {}", e)))?;

    let response = client
        .get(url.as_str())
        .header("Cache-Control", "no-store")
        .send()
        .map_err(|e| ReplayError::Http(format!("Failed to fetch {}: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ReplayError::Http(format!(
            "{} returned {} {}",
            url,
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }

    response
        .text()
        .map_err(|e| ReplayError::Http(format!("Failed to read response: {}", e)))
}

/// Read the raw text behind a path or URL
pub fn read_source(location: &str, timeout: Duration) -> Result<String> {
    match as_http_url(location) {
        Some(url) => {
            log::debug!("Fetching {}", url);
            fetch_url(&url, timeout)
        }
        None => Ok(std::fs::read_to_string(Path::new(location))?),
    }
}

/// True when the path (or URL path) ends in `.json`
fn is_json_location(location: &str) -> bool {
    let path = match as_http_url(location) {
        Some(url) => url.path().to_string(),
        None => location.to_string(),
    };
    Path::new(&path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Parse a JSON array of records
pub fn parse_json_records(text: &str) -> Result<Vec<Record>> {
    Ok(serde_json::from_str(text)?)
}

/// Load the primary record collection; JSON or delimited text by extension
pub fn load_records(location: &str, timeout: Duration) -> Result<Vec<Record>> {
    let text = read_source(location, timeout)?;
    if is_json_location(location) {
        parse_json_records(&text)
    } else {
        Ok(read_records(&text))
    }
}

/// Load supplementary records, degrading to an empty collection on any failure
pub fn load_extra(location: &str, timeout: Duration) -> Vec<Record> {
    match read_source(location, timeout).and_then(|text| parse_json_records(&text)) {
        Ok(records) => records,
        Err(e) => {
            log::warn!("Ignoring supplementary stats from {}: {}", location, e);
            Vec::new()
        }
    }
}

/// One load cycle's worth of records
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Every record from the primary source
    pub stats_pool: Vec<Record>,
    /// Supplementary records that only feed the statistics
    pub extra: Vec<Record>,
}

impl Dataset {
    pub fn new(stats_pool: Vec<Record>, extra: Vec<Record>) -> Self {
        Dataset { stats_pool, extra }
    }

    /// What to render when the primary source failed
    pub fn empty() -> Self {
        Self::default()
    }

    /// Records with a video link, in source order
    pub fn replays(&self) -> Vec<Record> {
        self.stats_pool.iter().filter(|r| r.has_video()).cloned().collect()
    }

    /// Primary records followed by the supplementary ones
    pub fn combined(&self) -> Vec<Record> {
        self.stats_pool.iter().chain(self.extra.iter()).cloned().collect()
    }

    pub fn summary(&self) -> SummaryStats {
        compute_stats(&self.combined())
    }

    pub fn rollups(&self) -> Vec<PlayerRollup> {
        player_rollups(&self.combined())
    }

    pub fn leaderboard(&self, badges: &BadgeConfig) -> Vec<LeaderboardEntry> {
        leaderboard(&self.rollups(), badges)
    }
}

/// Run a full load cycle.
///
/// A failing primary source is returned as an error; callers are expected to
/// log it and fall back to [`Dataset::empty`].
pub fn load_dataset(config: &LoadConfig) -> Result<Dataset> {
    let stats_pool = load_records(&config.source, config.timeout)?;
    let extra = config
        .extra
        .as_deref()
        .map(|location| load_extra(location, config.timeout))
        .unwrap_or_default();

    log::info!(
        "Loaded {} records ({} with video) and {} supplementary records",
        stats_pool.len(),
        stats_pool.iter().filter(|r| r.has_video()).count(),
        extra.len()
    );

    Ok(Dataset::new(stats_pool, extra))
}
