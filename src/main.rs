//! SnapCook - ingredient detection demo front end
//!
//! Drives the core pipeline from the command line: feeds it recorded
//! classifier output, applies pantry edits, and prints the pantry and the
//! ranked recipe ideas a UI would render.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use snapcook_core::config::{get_config_dir, load_config, AppConfig};
use snapcook_core::recipes::{builtin_catalog, load_catalog};
use snapcook_core::session::SnapSession;
use snapcook_core::RawDetection;

/// SnapCook - turn photographed objects into ranked recipe ideas
#[derive(Parser, Debug)]
#[command(name = "snapcook")]
#[command(about = "Rank recipes against ingredients detected in photos")]
struct Args {
    /// JSON file with recorded classifier output: one array of
    /// {label, confidence} objects per image
    #[arg(short, long)]
    detections: Option<PathBuf>,

    /// Manually add a pantry item (repeatable)
    #[arg(short, long)]
    add: Vec<String>,

    /// Suppress a detected item (repeatable)
    #[arg(short, long)]
    remove: Vec<String>,

    /// JSON recipe catalog replacing the built-in one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum number of ranked recipes (overrides the configured cap)
    #[arg(short, long)]
    limit: Option<usize>,

    /// List the recipe catalog and exit
    #[arg(long)]
    list_catalog: bool,
}

/// Let `--limit` override the configured result cap.
fn apply_result_limit(config: &mut AppConfig, limit: Option<usize>) {
    if let Some(limit) = limit {
        config.thresholds.max_results = limit;
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => match get_config_dir().map(|dir| dir.join("config.toml")) {
            Ok(path) if path.exists() => load_config(&path)?,
            _ => AppConfig::default(),
        },
    };
    apply_result_limit(&mut config, args.limit);

    let catalog_path = args.catalog.as_ref().or(config.catalog.path.as_ref());
    let catalog = match catalog_path {
        Some(path) => {
            info!("Loading recipe catalog from {:?}", path);
            load_catalog(path)?
        }
        None => builtin_catalog(),
    };

    // List catalog mode
    if args.list_catalog {
        println!("Recipe catalog ({} entries):", catalog.len());
        for recipe in &catalog {
            println!(
                "  {} ({} min) - {}",
                recipe.title,
                recipe.minutes,
                recipe.ingredients.join(", ")
            );
        }
        return Ok(());
    }

    let mut session = SnapSession::new(
        config.thresholds.confidence_threshold,
        config.thresholds.ranking_config(),
    );

    if let Some(path) = &args.detections {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read detections file: {:?}", path))?;
        let batches: Vec<Vec<RawDetection>> = serde_json::from_str(&content)
            .context("Detections file must be an array of per-image detection arrays")?;

        for (index, batch) in batches.iter().enumerate() {
            session.record_photo(&format!("image-{}", index), batch);
        }
    }

    for label in &args.remove {
        session.remove_item(label);
    }
    for label in &args.add {
        session.add_item(label);
    }

    let pantry = session.pantry();
    println!("Your ingredients:");
    if pantry.is_empty() {
        println!("  (none)");
    } else {
        for (label, count) in pantry.entries() {
            println!("  {} x{}", label, count);
        }
    }

    let ranked = session.find_recipes(&catalog);
    println!("\nRecipe ideas:");
    for scored in ranked {
        println!(
            "  [{:.2}] {} ({} min)",
            scored.score, scored.recipe.title, scored.recipe.minutes
        );
        println!("        Ingredients: {}", scored.ingredients_line());
        println!("        Steps: {}", scored.steps_line());
    }

    Ok(())
}
