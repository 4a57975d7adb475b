mod db;
mod map;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::db::DbCommands;
use crate::map::{ClusterArgs, SearchArgs};

#[derive(Debug, Parser)]
#[command(name = "propmap-cli")]
#[command(about = "Property map search command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Search active listings within a radius and print the page as JSON
    Search(SearchArgs),
    /// Build the map view for a viewport and print it as JSON
    Clusters(ClusterArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("propmap-cli ready; run with --help for commands");
        return Ok(());
    };

    let config = propmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let pool_config = propmap_db::PoolConfig::from_app_config(&config);
    let pool = propmap_db::connect_pool(&config.database_url, pool_config).await?;

    match command {
        Commands::Db { command } => db::run_db(&pool, &config, command).await?,
        Commands::Search(args) => map::run_search(pool, &config, &args).await?,
        Commands::Clusters(args) => map::run_clusters(pool, &config, &args).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
