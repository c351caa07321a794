//! CLI administration tool for recipe-share.
//!
//! Loads reference ingredients, manages tags, shows statistics and runs database
//! maintenance without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Load ingredients from a `name,measurement_unit` CSV file
//! cargo run --bin admin -- ingredients import data/ingredients.csv
//!
//! # Look up ingredients by name prefix
//! cargo run --bin admin -- ingredients search "мук"
//!
//! # Manage tags
//! cargo run --bin admin -- tags create "Breakfast" breakfast
//! cargo run --bin admin -- tags list
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use recipe_share::application::services::{IngredientService, TagService};
use recipe_share::domain::entities::NewTag;
use recipe_share::infrastructure::persistence::{PgIngredientRepository, PgTagRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

type PgIngredientService = IngredientService<PgIngredientRepository>;
type PgTagService = TagService<PgTagRepository>;

/// CLI tool for managing recipe-share.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage reference ingredients
    Ingredients {
        #[command(subcommand)]
        action: IngredientAction,
    },

    /// Manage recipe tags
    Tags {
        #[command(subcommand)]
        action: TagAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Ingredient subcommands.
#[derive(Subcommand)]
enum IngredientAction {
    /// Import ingredients from a CSV file (`name,measurement_unit`)
    Import {
        /// Path to the CSV file
        file: PathBuf,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Search ingredients by name prefix
    Search {
        /// Name prefix (prompted when omitted)
        prefix: Option<String>,

        /// Maximum number of results
        #[arg(short, long, default_value_t = 20)]
        limit: i64,
    },
}

/// Tag subcommands.
#[derive(Subcommand)]
enum TagAction {
    /// Create a tag
    Create {
        /// Display name
        name: String,

        /// URL slug (letters, digits, `-` and `_`)
        slug: String,
    },

    /// List all tags
    List,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Ingredients { action } => handle_ingredient_action(action, &pool).await?,
        Commands::Tags { action } => handle_tag_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches ingredient commands.
async fn handle_ingredient_action(action: IngredientAction, pool: &PgPool) -> Result<()> {
    let service = IngredientService::new(Arc::new(PgIngredientRepository::new(Arc::new(
        pool.clone(),
    ))));

    match action {
        IngredientAction::Import { file, yes } => import_ingredients(&service, file, yes).await?,
        IngredientAction::Search { prefix, limit } => {
            search_ingredients(&service, prefix, limit).await?
        }
    }

    Ok(())
}

/// Imports a CSV file of ingredients.
///
/// The whole file is parsed before anything is written, so a malformed
/// line leaves the table untouched.
async fn import_ingredients(service: &PgIngredientService, file: PathBuf, yes: bool) -> Result<()> {
    println!("{}", "📥 Import Ingredients".bright_blue().bold());
    println!();

    let before = service
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!("  File:     {}", file.display().to_string().cyan());
    println!("  Existing: {}", before.to_string().bright_black());
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Import this file?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let reader =
        File::open(&file).with_context(|| format!("Failed to open {}", file.display()))?;

    let inserted = service
        .import_csv(reader)
        .await
        .map_err(|e| anyhow::anyhow!("Import failed: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ Imported ingredients:".green().bold(),
        inserted.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Prints ingredients matching a name prefix.
async fn search_ingredients(
    service: &PgIngredientService,
    prefix: Option<String>,
    limit: i64,
) -> Result<()> {
    let prefix = match prefix {
        Some(p) => p,
        None => Input::new()
            .with_prompt("Name prefix")
            .allow_empty(true)
            .interact_text()?,
    };

    let ingredients = service
        .search(&prefix, Some(limit))
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    if ingredients.is_empty() {
        println!("{}", "No ingredients found".yellow());
        return Ok(());
    }

    println!("{}", "🥕 Ingredients".bright_blue().bold());
    println!();
    for ingredient in ingredients {
        println!(
            "  {:>6}  {} ({})",
            ingredient.id.to_string().bright_black(),
            ingredient.name.cyan(),
            ingredient.measurement_unit
        );
    }
    println!();

    Ok(())
}

/// Dispatches tag commands.
async fn handle_tag_action(action: TagAction, pool: &PgPool) -> Result<()> {
    let service: PgTagService =
        TagService::new(Arc::new(PgTagRepository::new(Arc::new(pool.clone()))));

    match action {
        TagAction::Create { name, slug } => {
            let tag = service
                .create(NewTag { name, slug })
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create tag: {}", e))?;

            println!(
                "{} {} ({})",
                "✅ Created tag".green().bold(),
                tag.name.cyan(),
                tag.slug.bright_black()
            );
        }
        TagAction::List => {
            let tags = service
                .list()
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

            if tags.is_empty() {
                println!("{}", "No tags yet".yellow());
                return Ok(());
            }

            println!("{}", "🏷  Tags".bright_blue().bold());
            println!();
            for tag in tags {
                println!(
                    "  {:>6}  {} ({})",
                    tag.id.to_string().bright_black(),
                    tag.name.cyan(),
                    tag.slug
                );
            }
            println!();
        }
    }

    Ok(())
}

/// Displays system statistics.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let ingredients_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ingredients")
        .fetch_one(pool)
        .await?;

    let recipes_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
        .fetch_one(pool)
        .await?;

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
        .fetch_one(pool)
        .await?;

    let cart_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shopping_cart")
        .fetch_one(pool)
        .await?;

    let tags_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags")
        .fetch_one(pool)
        .await?;

    let favorites_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorites")
        .fetch_one(pool)
        .await?;

    let subscriptions_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions")
        .fetch_one(pool)
        .await?;

    println!(
        "  Ingredients:   {}",
        ingredients_count.to_string().bright_green().bold()
    );
    println!(
        "  Recipes:       {}",
        recipes_count.to_string().bright_green().bold()
    );
    println!(
        "  Short links:   {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Cart entries:  {}",
        cart_count.to_string().bright_green().bold()
    );
    println!(
        "  Tags:          {}",
        tags_count.to_string().bright_green().bold()
    );
    println!(
        "  Favorites:     {}",
        favorites_count.to_string().bright_green().bold()
    );
    println!(
        "  Subscriptions: {}",
        subscriptions_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
