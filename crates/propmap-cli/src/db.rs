//! Database maintenance commands: migrations, connectivity and seeding.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use propmap_core::AppConfig;

/// Sub-commands available under `db`.
#[derive(Debug, Subcommand)]
pub enum DbCommands {
    /// Apply pending migrations
    Migrate,
    /// Check connectivity and report how many listings can appear on the map
    Ping,
    /// Upsert listings from a YAML seed file
    Seed {
        /// Seed file (defaults to `PROPMAP_LISTINGS_PATH`)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

/// Dispatch a `db` sub-command.
///
/// # Errors
///
/// Returns an error if the database is unreachable, a migration fails, or the
/// seed file cannot be loaded.
pub(crate) async fn run_db(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    command: DbCommands,
) -> anyhow::Result<()> {
    match command {
        DbCommands::Migrate => {
            let applied = propmap_db::run_migrations(pool).await?;
            println!("applied {applied} migration(s)");
        }
        DbCommands::Ping => {
            let located = propmap_db::health_check(pool).await?;
            println!("database ok; {located} active listing(s) with coordinates");
        }
        DbCommands::Seed { path } => {
            let path = path.unwrap_or_else(|| config.listings_path.clone());
            run_seed(pool, &path).await?;
        }
    }
    Ok(())
}

async fn run_seed(pool: &sqlx::PgPool, path: &Path) -> anyhow::Result<()> {
    let file = propmap_core::load_listings(path)?;
    tracing::info!(path = %path.display(), listings = file.listings.len(), "seeding listings");

    let upserted = propmap_db::seed_listings(pool, &file.listings).await?;
    println!("seeded {upserted} listing(s) from {}", path.display());
    Ok(())
}
