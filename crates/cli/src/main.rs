use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use catalog::{load_catalog, Item};
use engine::{JsonFileStore, PersonalizationEngine};
use pipeline::{RecommendOptions, ScoredCandidate};

/// WatchWise - Personalized Viewing Recommendations
#[derive(Parser)]
#[command(name = "watchwise")]
#[command(about = "Single-user recommendation engine with preference learning", long_about = None)]
struct Cli {
    /// Path to the item catalog JSON file
    #[arg(short, long, default_value = "data/catalog.json")]
    catalog: PathBuf,

    /// Directory holding the persisted user state
    #[arg(short, long, default_value = ".watchwise")]
    state_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record that an item was watched
    Watch {
        /// Catalog ID of the watched item
        item_id: String,

        /// Watch duration in seconds
        #[arg(long)]
        duration: Option<u32>,

        /// Mark the view as completed (full preference weight)
        #[arg(long)]
        completed: bool,
    },

    /// Rate a previously watched item on a 1-10 scale
    Rate {
        /// Catalog ID of the rated item
        item_id: String,

        /// Rating value from 1 to 10
        rating: f32,
    },

    /// Get personalized recommendations
    Recommend {
        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        count: usize,

        /// Include items already watched
        #[arg(long)]
        include_watched: bool,

        /// Only consider items with at least this declared rating
        #[arg(long, default_value = "0.0")]
        min_rating: f32,

        /// Diversity penalty factor (0 disables the diversity pass)
        #[arg(long, default_value = "0.3")]
        diversity: f32,
    },

    /// Find items similar in content to a reference item
    Similar {
        /// Catalog ID of the reference item
        item_id: String,

        /// Number of similar items to return
        #[arg(long, default_value = "6")]
        count: usize,
    },

    /// Rank items by genres trending in recent viewing history
    Trending {
        /// Number of items to return
        #[arg(long, default_value = "10")]
        count: usize,

        /// Trailing window in days
        #[arg(long, default_value = "7")]
        days: i64,
    },

    /// Get fully scored recommendations within one genre
    Genre {
        /// Genre to restrict candidates to (exact match)
        genre: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        count: usize,
    },

    /// Show viewing statistics and top preferences
    Stats,

    /// Export the full engine state as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Import engine state from an exported JSON file
    Import {
        /// File produced by the export command
        input: PathBuf,
    },

    /// Clear all recorded state
    Reset,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut engine = PersonalizationEngine::new(Box::new(JsonFileStore::new(&cli.state_dir)));

    match cli.command {
        Commands::Watch {
            item_id,
            duration,
            completed,
        } => handle_watch(&mut engine, &cli.catalog, &item_id, duration, completed)?,
        Commands::Rate { item_id, rating } => handle_rate(&mut engine, &item_id, rating)?,
        Commands::Recommend {
            count,
            include_watched,
            min_rating,
            diversity,
        } => {
            let options = RecommendOptions {
                exclude_watched: !include_watched,
                min_rating,
                diversity_factor: diversity,
            };
            let items = load_items(&cli.catalog)?;
            let results = engine.recommendations(&items, count, &options);
            print_scored("Recommendations", &results);
        }
        Commands::Similar { item_id, count } => {
            let items = load_items(&cli.catalog)?;
            let reference = find_item(&items, &item_id)?;
            let results = engine.more_like_this(reference, &items, count);
            print_scored(&format!("Similar to '{}'", reference.title), &results);
        }
        Commands::Trending { count, days } => {
            let items = load_items(&cli.catalog)?;
            let results = engine.trending(&items, count, days);
            print_scored(&format!("Trending (last {} days)", days), &results);
        }
        Commands::Genre { genre, count } => {
            let items = load_items(&cli.catalog)?;
            let results = engine.genre_recommendations(&genre, &items, count);
            print_scored(&format!("Top picks in {}", genre), &results);
        }
        Commands::Stats => handle_stats(&engine),
        Commands::Export { output } => handle_export(&engine, output)?,
        Commands::Import { input } => handle_import(&mut engine, &input)?,
        Commands::Reset => {
            engine.reset();
            println!("{} All state cleared", "✓".green());
        }
    }

    Ok(())
}

fn load_items(path: &Path) -> Result<Vec<Item>> {
    load_catalog(path).with_context(|| format!("Failed to load catalog from {}", path.display()))
}

fn find_item<'a>(items: &'a [Item], item_id: &str) -> Result<&'a Item> {
    items
        .iter()
        .find(|item| item.id == item_id)
        .ok_or_else(|| anyhow!("Item '{}' not found in catalog", item_id))
}

/// Handle the 'watch' command
fn handle_watch(
    engine: &mut PersonalizationEngine,
    catalog_path: &Path,
    item_id: &str,
    duration: Option<u32>,
    completed: bool,
) -> Result<()> {
    let items = load_items(catalog_path)?;
    let item = find_item(&items, item_id)?;
    engine.record_view(item, duration, completed);
    let kind = if completed { "completed" } else { "partial" };
    println!("{} Recorded {} view of '{}'", "✓".green(), kind, item.title);
    Ok(())
}

/// Handle the 'rate' command
fn handle_rate(engine: &mut PersonalizationEngine, item_id: &str, rating: f32) -> Result<()> {
    if !(1.0..=10.0).contains(&rating) {
        return Err(anyhow!("Rating must be between 1 and 10, got {}", rating));
    }
    engine.rate_item(item_id, rating);
    println!("{} Rated '{}' {:.1}/10", "✓".green(), item_id, rating);
    Ok(())
}

/// Handle the 'stats' command
fn handle_stats(engine: &PersonalizationEngine) {
    let stats = engine.statistics();

    println!("{}", "Viewing Statistics".bold().blue());
    println!("{}Total views: {}", "• ".green(), stats.total_views);
    println!(
        "{}Unique items watched: {}",
        "• ".green(),
        stats.unique_items_watched
    );
    println!("{}Ratings given: {}", "• ".cyan(), stats.ratings_count);
    println!("{}Average rating: {:.1}", "• ".cyan(), stats.average_rating);
    println!("{}Viewing streak: {} days", "• ".cyan(), stats.viewing_streak);
    if let Some(last) = &stats.last_viewed {
        println!("{}Last viewed: {}", "• ".cyan(), last.title);
    }

    print_top("Top genres", &stats.top_genres);
    print_top("Top actors", &stats.top_actors);
    print_top("Top directors", &stats.top_directors);
}

fn print_top(label: &str, entries: &[(String, f32)]) {
    if entries.is_empty() {
        return;
    }
    println!("{}:", label);
    for (name, weight) in entries {
        println!("  - {} ({:.1})", name, weight);
    }
}

/// Handle the 'export' command
fn handle_export(engine: &PersonalizationEngine, output: Option<PathBuf>) -> Result<()> {
    let data = engine.export_data();
    let payload = serde_json::to_string_pretty(&data).context("Failed to serialize state")?;
    match output {
        Some(path) => {
            std::fs::write(&path, payload)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} Exported state to {}", "✓".green(), path.display());
        }
        None => println!("{}", payload),
    }
    Ok(())
}

/// Handle the 'import' command
fn handle_import(engine: &mut PersonalizationEngine, input: &Path) -> Result<()> {
    let payload = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&payload).context("Import file is not valid JSON")?;
    if engine.import_data(value) {
        println!("{} Imported state from {}", "✓".green(), input.display());
        Ok(())
    } else {
        Err(anyhow!("Import file does not match the export format"))
    }
}

/// Helper function to format and print a scored result list
fn print_scored(header: &str, results: &[ScoredCandidate]) {
    println!("{}", format!("{}:", header).bold().blue());
    if results.is_empty() {
        println!("  (no results)");
        return;
    }
    for (rank, candidate) in results.iter().enumerate() {
        let genres = candidate.item.genres.join(", ");
        println!(
            "{}. {} ({}) [{}] - Score: {:.3}",
            (rank + 1).to_string().green(),
            candidate.item.title,
            candidate.item.year.unwrap_or(0),
            genres,
            candidate.score
        );
    }
}
