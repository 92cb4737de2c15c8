//! # Devises
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the local store adapter and seed it if empty
//! - Pick the exchange source
//! - Answer a single command on behalf of the presentation layer

mod config;
mod source;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use devises_hex::CurrencyRepository;
use devises_repo::{SeedData, build_repo};
use devises_types::SeedState;

#[derive(Parser)]
#[command(name = "devises")]
#[command(author, version, about = "Currency list and exchange-rate lookups", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored currencies
    Currencies,
    /// Look up exchange rates
    Exchange {
        /// Currency codes (comma-separated, e.g. USD,EUR)
        #[arg(value_delimiter = ',', required = true)]
        codes: Vec<String>,
    },
    /// Seed the store if needed and report the outcome
    SeedStatus,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "debug"
    } else {
        "info,devises_hex=debug"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::Config::from_env()?;
    tracing::info!("Using database: {}", config.database_url);

    // Build store (handles connection and migration)
    let store = build_repo(&config.database_url).await?;

    let seed = match &config.seed_path {
        Some(path) => SeedData::from_path(path)?,
        None => SeedData::bundled()?,
    };

    let source = source::Source::from_config(&config);
    let repo = CurrencyRepository::bootstrap(store, source, seed.into_records()).await;
    if repo.seed_state() == SeedState::Failed {
        tracing::warn!("Currency store is not seeded; the currency list may be empty");
    }

    match cli.command {
        Commands::Currencies => {
            let currencies = repo.get_currency_list().first().await?;
            println!("{}", serde_json::to_string_pretty(&currencies)?);
        }
        Commands::Exchange { codes } => {
            let codes: Vec<String> = codes
                .iter()
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .collect();
            let exchange = repo.get_available_exchange(codes.join(",")).first().await?;
            println!("{}", serde_json::to_string_pretty(&exchange)?);
        }
        Commands::SeedStatus => {
            println!("{}", repo.seed_state());
        }
    }

    Ok(())
}
