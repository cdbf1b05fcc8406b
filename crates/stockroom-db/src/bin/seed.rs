//! # Seed Data Generator
//!
//! Populates the database with sample products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products (default)
//! cargo run -p stockroom-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p stockroom-db --bin seed -- --count 1000
//!
//! # Specify database path
//! cargo run -p stockroom-db --bin seed -- --db ./data/stockroom.db
//! ```
//!
//! Products are written in one `bulk_create` call, so a failed seed leaves
//! the table empty. A table that already has rows is left alone.

use anyhow::Context;
use clap::Parser;
use std::time::Instant;
use stockroom_core::validation::validate_batch;
use stockroom_core::ProductPayload;
use stockroom_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// Product families for realistic test data
const FAMILIES: &[(&str, &[&str])] = &[
    (
        "Hardware",
        &[
            "Claw Hammer",
            "Phillips Screwdriver",
            "Adjustable Wrench",
            "Tape Measure",
            "Spirit Level",
            "Utility Knife",
            "Hex Key Set",
            "Wood Chisel",
        ],
    ),
    (
        "Garden",
        &[
            "Pruning Shears",
            "Watering Can",
            "Garden Hose",
            "Trowel",
            "Rake",
            "Seed Tray",
        ],
    ),
    (
        "Office",
        &[
            "Stapler",
            "Notebook",
            "Ballpoint Pen",
            "Desk Lamp",
            "Paper Clips",
            "Sticky Notes",
            "Highlighter",
        ],
    ),
    (
        "Kitchen",
        &[
            "Chef Knife",
            "Cutting Board",
            "Mixing Bowl",
            "Measuring Cups",
            "Whisk",
            "Colander",
        ],
    ),
];

/// Size variants with their price multiplier
const SIZES: &[(&str, f64)] = &[("Small", 1.0), ("Medium", 1.4), ("Large", 1.9), ("Pro", 2.6)];

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Stockroom seed data generator")]
struct Args {
    /// Number of products to generate
    #[arg(short, long, default_value_t = 200)]
    count: usize,

    /// Database file path
    #[arg(short, long, default_value = "./database.db")]
    db: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    println!("Stockroom Seed Data Generator");
    println!("=============================");
    println!("Database: {}", args.db);
    println!("Products: {}", args.count);
    println!();

    let db = Database::new(DbConfig::new(&args.db))
        .await
        .with_context(|| format!("opening database {}", args.db))?;
    println!("✓ Connected to database");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        db.close().await;
        return Ok(());
    }

    let payloads = generate_payloads(args.count);
    if payloads.is_empty() {
        println!("Nothing to generate.");
        db.close().await;
        return Ok(());
    }

    let drafts = validate_batch(payloads).context("generated payloads failed validation")?;

    let start = Instant::now();
    let created = db
        .products()
        .bulk_create(&drafts)
        .await
        .context("inserting seed products")?;
    let elapsed = start.elapsed();

    println!("✓ Generated {} products in {:?}", created.len(), elapsed);

    let hits = db.products().search("Knife").await?;
    println!("  Search 'Knife': {} results", hits.len());

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds `count` payloads by cycling families, items and sizes.
///
/// Names repeat with a batch suffix once every combination is used.
fn generate_payloads(count: usize) -> Vec<ProductPayload> {
    let combos: Vec<(&str, &str, f64)> = FAMILIES
        .iter()
        .flat_map(|(_, items)| items.iter())
        .flat_map(|item| {
            SIZES
                .iter()
                .map(move |(size, multiplier)| (*item, *size, *multiplier))
        })
        .collect();

    (0..count)
        .map(|seed| {
            let (item, size, multiplier) = combos[seed % combos.len()];
            let batch = seed / combos.len();

            let name = if batch == 0 {
                format!("{} {}", item, size)
            } else {
                format!("{} {} #{}", item, size, batch + 1)
            };

            // Base $1.99 - $9.98, scaled by size, rounded to cents
            let base = 1.99 + ((seed * 17) % 800) as f64 / 100.0;
            let price = (base * multiplier * 100.0).round() / 100.0;

            ProductPayload {
                name: Some(name),
                price: Some(price),
                stock: Some((seed % 101) as i64),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_payloads_are_valid() {
        let payloads = generate_payloads(250);
        assert_eq!(payloads.len(), 250);
        assert!(validate_batch(payloads).is_ok());
    }

    #[test]
    fn test_seed_errors_carry_context() {
        let err = validate_batch(generate_payloads(0))
            .context("generated payloads failed validation")
            .unwrap_err();

        assert_eq!(err.to_string(), "generated payloads failed validation");
        assert_eq!(err.root_cause().to_string(), "products is empty");
    }

    #[test]
    fn test_generated_names_are_unique() {
        let payloads = generate_payloads(300);
        let mut names: Vec<String> = payloads.into_iter().filter_map(|p| p.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 300);
    }
}
