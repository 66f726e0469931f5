use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

use replay_stats::badges::BadgeConfig;
use replay_stats::export;
use replay_stats::format::{format_currency, format_date, format_multiplier, or_dash, DASH};
use replay_stats::view::{filter_replays, SortKey};
use replay_stats::{load_dataset, Dataset, LoadConfig, Record};

#[derive(Parser)]
#[command(name = "replay-stats")]
#[command(about = "Browse replay exports and compute KPIs and player leaderboards", long_about = None)]
struct Cli {
    /// HTTP timeout in seconds for URL sources
    #[arg(long, global = true, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show KPI tiles (total winnings, best win, best multiplier)
    Summary {
        /// Replay export (CSV/semicolon file, JSON file or http(s) URL)
        #[arg(env = "REPLAY_SOURCE")]
        source: String,

        /// Supplementary stats JSON (path or URL); failures are ignored
        #[arg(long, env = "REPLAY_EXTRA")]
        extra: Option<String>,
    },

    /// List replay cards, optionally searched and sorted
    Replays {
        /// Replay export (CSV/semicolon file, JSON file or http(s) URL)
        #[arg(env = "REPLAY_SOURCE")]
        source: String,

        /// Free-text search over title, game, provider, player and tags
        #[arg(short, long, default_value = "")]
        query: String,

        /// Sort order
        #[arg(short, long, value_enum, default_value_t = SortKey::Newest)]
        sort: SortKey,
    },

    /// Show the player leaderboard with badges
    Players {
        /// Replay export (CSV/semicolon file, JSON file or http(s) URL)
        #[arg(env = "REPLAY_SOURCE")]
        source: String,

        /// Supplementary stats JSON (path or URL); failures are ignored
        #[arg(long, env = "REPLAY_EXTRA")]
        extra: Option<String>,

        /// Badge configuration JSON
        #[arg(long, env = "REPLAY_BADGES")]
        badges: Option<PathBuf>,
    },

    /// Export normalized data (format from extension: csv, json, xlsx)
    Export {
        /// Replay export (CSV/semicolon file, JSON file or http(s) URL)
        #[arg(env = "REPLAY_SOURCE")]
        source: String,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Supplementary stats JSON (path or URL); failures are ignored
        #[arg(long, env = "REPLAY_EXTRA")]
        extra: Option<String>,

        /// Badge configuration JSON (xlsx only)
        #[arg(long, env = "REPLAY_BADGES")]
        badges: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let timeout = Duration::from_secs(cli.timeout);

    match cli.command {
        Commands::Summary { source, extra } => {
            let dataset = load_or_empty(&LoadConfig::new(source).with_extra(extra).with_timeout(timeout));
            summary(&dataset);
        }
        Commands::Replays { source, query, sort } => {
            let dataset = load_or_empty(&LoadConfig::new(source).with_timeout(timeout));
            replays(&dataset, &query, sort);
        }
        Commands::Players { source, extra, badges } => {
            let config = load_badges(badges.as_deref())?;
            let dataset = load_or_empty(&LoadConfig::new(source).with_extra(extra).with_timeout(timeout));
            players(&dataset, &config);
        }
        Commands::Export { source, output, extra, badges } => {
            let config = load_badges(badges.as_deref())?;
            let load = LoadConfig::new(source).with_extra(extra).with_timeout(timeout);
            let dataset = load_dataset(&load).context("Failed to load replay data")?;
            export_dataset(&dataset, &config, &output)?;
        }
    }

    Ok(())
}

/// Load the dataset, rendering with empty data if the primary source fails
fn load_or_empty(config: &LoadConfig) -> Dataset {
    match load_dataset(config) {
        Ok(dataset) => dataset,
        Err(e) => {
            log::error!("Failed to load {}: {}", config.source, e);
            Dataset::empty()
        }
    }
}

fn load_badges(path: Option<&Path>) -> Result<BadgeConfig> {
    match path {
        Some(path) => BadgeConfig::from_file(path)
            .with_context(|| format!("Failed to read badge config {}", path.display())),
        None => Ok(BadgeConfig::default()),
    }
}

fn best_line(best: Option<&Record>, value: impl Fn(&Record) -> String) -> String {
    match best {
        Some(r) => format!(
            "{}  🎮 {}  👤 {}",
            value(r),
            or_dash(&r.game),
            or_dash(&r.player)
        ),
        None => DASH.to_string(),
    }
}

fn summary(dataset: &Dataset) {
    let stats = dataset.summary();

    println!("Total winnings:  {}", format_currency(stats.total_winnings));
    println!("Replays:         {}", dataset.replays().len());
    println!("Records:         {}", stats.count);
    println!("Unique games:    {}", stats.unique_games);
    println!("Avg multiplier:  {:.2}x", stats.avg_multi);
    println!(
        "Best win:        {}",
        best_line(stats.best_win.as_ref(), |r| format_currency(r.win))
    );
    println!(
        "Best multiplier: {}",
        best_line(stats.best_multi.as_ref(), |r| format!("{}x", r.x))
    );
}

fn replays(dataset: &Dataset, query: &str, sort: SortKey) {
    let all = dataset.replays();
    let shown = filter_replays(&all, query, sort);

    println!("{} of {} replays ({})", shown.len(), all.len(), sort);
    println!();

    for r in shown {
        let headline = if r.is_max_win {
            format!("MAX WIN 🪙 {}", format_currency(r.win))
        } else {
            format!("🪙 {}", format_currency(r.win))
        };
        println!("{}", headline);
        println!(
            "  🎮 {}  🏷️ {}  ⚡ {}",
            or_dash(if r.game.is_empty() { &r.title } else { &r.game }),
            or_dash(&r.provider),
            format_multiplier(r.x)
        );
        println!("  📅 {}  👤 {}", format_date(&r.date), or_dash(&r.player));
        println!("  ↗ {}", r.video_url.trim());
        println!();
    }
}

fn players(dataset: &Dataset, config: &BadgeConfig) {
    let entries = dataset.leaderboard(config);
    if entries.is_empty() {
        println!("No players");
        return;
    }

    for (rank, entry) in entries.iter().enumerate() {
        let icons: String = entry.badges.iter().map(|b| b.icon.as_str()).collect();
        println!(
            "{:>3}. [{:<2}] {:<20} {:>16}  {}",
            rank + 1,
            entry.initials,
            entry.rollup.player,
            format_currency(entry.rollup.total),
            icons
        );
        if let Some(ref avatar) = entry.avatar {
            println!("       🖼 {}", avatar);
        }
    }
}

fn export_dataset(dataset: &Dataset, config: &BadgeConfig, output: &Path) -> Result<()> {
    println!("Writing {}", output.display());
    export::write_dataset(dataset, config, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Done!");
    Ok(())
}
