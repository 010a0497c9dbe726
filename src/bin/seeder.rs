//! CLI tool that fills the database with test data.
//!
//! # Usage
//!
//! ```bash
//! # Insert the fixed fixtures (two users, three short links, three visits)
//! cargo run --bin seeder
//!
//! # Generate random records instead
//! cargo run --bin seeder -- --factory --users 50 --short-links 200 --visits 1000
//!
//! # Skip the confirmation prompt
//! cargo run --bin seeder -- --factory -y
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//!
//! Seeding runs users, then short links, then visits. Factory mode draws
//! owners and visited links from whatever is already stored. A failure
//! stops the run; records inserted before it are kept.

use shortlink_admin::config::{Config, mask_connection_string};
use shortlink_admin::infrastructure::persistence::{
    PgShortLinkRepository, PgUserRepository, PgVisitRepository,
};
use shortlink_admin::seeding::{
    DatabaseSeeder, SeedMode, Seeder, SeederConfig, ShortLinkSeeder, UserSeeder, VisitSeeder,
};

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Seeds the shortlink-admin database with fixtures or generated data.
#[derive(Parser)]
#[command(name = "seeder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Generate random records instead of inserting the fixed fixtures
    #[arg(short, long)]
    factory: bool,

    /// Users to generate (factory mode)
    #[arg(long, default_value_t = 10)]
    users: usize,

    /// Short links to generate (factory mode)
    #[arg(long, default_value_t = 10)]
    short_links: usize,

    /// Visits to generate (factory mode)
    #[arg(long, default_value_t = 10)]
    visits: usize,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,
}

impl Cli {
    fn seeder_config(&self) -> SeederConfig {
        SeederConfig {
            mode: if self.factory {
                SeedMode::Factory
            } else {
                SeedMode::Manual
            },
            user_count: self.users,
            short_link_count: self.short_links,
            visit_count: self.visits,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.seeder_config();

    let database_url = Config::load_database_url()?;

    println!("{}", "🌱 Database Seeder".bright_blue().bold());
    println!();
    println!("  Database: {}", mask_connection_string(&database_url).cyan());
    println!("  Mode:     {}", config.mode.to_string().cyan());
    if config.mode == SeedMode::Factory {
        println!(
            "  Records:  {} users, {} short links, {} visits",
            config.user_count, config.short_link_count, config.visit_count
        );
    }
    println!();

    if !cli.yes {
        let confirmed = Confirm::new()
            .with_prompt("Insert seed data into this database?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let seeder = build_seeder(config, Arc::new(pool));

    match seeder.seed_all().await {
        Ok(summary) => {
            println!();
            println!("{}", "✅ Seeding completed".green().bold());
            for (name, inserted) in summary {
                println!("  {:<12} {}", name, inserted.to_string().bright_yellow());
            }
            Ok(())
        }
        Err(e) => {
            println!();
            println!("{}", "❌ Seeding failed".red().bold());
            println!("  {}", e.to_string().red());
            println!(
                "{}",
                "Records inserted before the failure were kept.".yellow()
            );
            Err(e.into())
        }
    }
}

/// Wires the seeders in foreign-key order.
fn build_seeder(config: SeederConfig, pool: Arc<PgPool>) -> DatabaseSeeder {
    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let short_links = Arc::new(PgShortLinkRepository::new(pool.clone()));
    let visits = Arc::new(PgVisitRepository::new(pool));

    let seeders: Vec<Box<dyn Seeder>> = vec![
        Box::new(UserSeeder::new(
            users.clone(),
            config.mode,
            config.user_count,
        )),
        Box::new(ShortLinkSeeder::new(
            short_links.clone(),
            users,
            config.mode,
            config.short_link_count,
        )),
        Box::new(VisitSeeder::new(
            visits,
            short_links,
            config.mode,
            config.visit_count,
        )),
    ];

    DatabaseSeeder::new(config.mode, seeders)
}
