// ABOUTME: food-search CLI: run hybrid food searches, show the discovery view, preview goal tags
// ABOUTME: Reads configuration from the environment and prints tables or JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Search all layers
//! food-search search pollo
//!
//! # Only backend recipes tagged VOLUMEN, as JSON
//! food-search search arroz --layer recipe --tag VOLUMEN --json
//!
//! # Browse view
//! food-search discover
//!
//! # Goal tags for a bundled or found food
//! food-search enrich "pechuga de pollo"
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use food_search::config::FoodSearchConfig;
use food_search::engine::{enrich_tags, LayerFilter, SearchOptions};
use food_search::logging::LoggingConfig;
use food_search::models::{normalize_name, FoodItem};
use food_search::FoodService;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "food-search",
    about = "Hybrid food library search",
    long_about = "Searches the bundled catalog, the backend food library and Open Food Facts, \
                  merging results by name with user-owned items first."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Search foods across layers
    Search {
        /// Search text (may be empty to browse)
        #[arg(default_value = "")]
        query: String,

        /// Only items carrying this tag
        #[arg(long)]
        tag: Option<String>,

        /// Layer filter: all, local, cloud, api, recipe, raw
        #[arg(long, default_value = "all")]
        layer: String,

        /// Do not consult Open Food Facts
        #[arg(long)]
        skip_external: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show favorites, quick picks and the enriched catalog
    Discover {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the goal tags derived for a food
    Enrich {
        /// Food name (exact match after normalization, else first search hit)
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init().context("Failed to initialize logging")?;

    let config = FoodSearchConfig::from_env().context("Invalid configuration")?;
    let service = FoodService::from_config(&config).context("Failed to build food service")?;
    debug!("food-search ready");

    match cli.command {
        Command::Search {
            query,
            tag,
            layer,
            skip_external,
            json,
        } => {
            let layer: LayerFilter = layer.parse()?;
            let mut options = SearchOptions::default().with_layer(layer);
            if let Some(tag) = tag {
                options = options.with_tag(tag);
            }
            if skip_external {
                options = options.internal_only();
            }

            let foods = service.engine().search(&query, &options).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&foods)?);
            } else if foods.is_empty() {
                println!("No foods found for '{query}'");
            } else {
                print_table(&foods);
            }
        }
        Command::Discover { json } => {
            let view = service.discovery().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("Favorites ({})", view.favorites.len());
                print_table(&view.favorites);
                println!("\nQuick picks ({})", view.recent.len());
                print_table(&view.recent);
                println!("\nCatalog ({})", view.catalog.len());
                print_table(&view.catalog);
            }
        }
        Command::Enrich { name } => {
            let wanted = normalize_name(&name);
            let options = SearchOptions::default();
            let foods = service.engine().search(&name, &options).await;
            let food = foods
                .iter()
                .find(|f| f.dedupe_key() == wanted)
                .or_else(|| foods.first())
                .with_context(|| format!("No food matches '{name}'"))?;

            let enriched = enrich_tags(food);
            println!("{} [{}]", enriched.name, enriched.layer);
            println!(
                "  {:.0} kcal | P {:.1} g | C {:.1} g | F {:.1} g",
                enriched.nutrients.kcal,
                enriched.nutrients.protein,
                enriched.nutrients.carbs,
                enriched.nutrients.fat
            );
            let tags: Vec<&str> = enriched.tags.iter().map(String::as_str).collect();
            println!("  tags: {}", tags.join(", "));
        }
    }

    Ok(())
}

fn print_table(foods: &[FoodItem]) {
    println!(
        "{:<6} {:<40} {:>6} {:>6} {:>6} {:>6}",
        "LAYER", "NAME", "KCAL", "PROT", "CARB", "FAT"
    );
    println!("{}", "-".repeat(75));
    for food in foods {
        println!(
            "{:<6} {:<40} {:>6.0} {:>6.1} {:>6.1} {:>6.1}",
            food.layer.as_str(),
            truncate(&food.name, 40),
            food.nutrients.kcal,
            food.nutrients.protein,
            food.nutrients.carbs,
            food.nutrients.fat
        );
    }
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_owned()
    } else {
        let mut short: String = name.chars().take(width - 1).collect();
        short.push('~');
        short
    }
}
