//! Campus Market CLI - catalog checks and local store maintenance.
//!
//! # Usage
//!
//! ```bash
//! # Check the static catalog file the site serves
//! market-cli catalog check --path crates/storefront/static/data.json
//!
//! # Check a remote catalog
//! market-cli catalog check --url https://cdn.example.com/data.json
//!
//! # Summarize a local store file
//! market-cli store show --store market-store.json
//!
//! # Print user-published listings, newest first
//! market-cli store listings --store market-store.json
//!
//! # Remove the comment thread of product 3 and log out
//! market-cli store clear --store market-store.json --comments 3 --session
//! ```
//!
//! # Commands
//!
//! - `catalog check` - Decode the static catalog and report problems
//! - `store show` - Session, listing count, and comment threads
//! - `store listings` - User-published listings
//! - `store clear` - Delete stored data (the only removal path)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use url::Url;

mod commands;

#[derive(Parser)]
#[command(name = "market-cli")]
#[command(author, version, about = "Campus Market CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the static catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Inspect or clear a local store file
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Decode the catalog and report duplicate ids and odd prices
    Check {
        /// Catalog file (defaults to `MARKET_CATALOG_PATH` or the bundled file)
        #[arg(short, long, conflicts_with = "url")]
        path: Option<PathBuf>,

        /// Fetch the catalog from this URL instead
        #[arg(short, long)]
        url: Option<Url>,
    },
}

#[derive(Subcommand)]
enum StoreAction {
    /// Summarize the store contents
    Show(StoreArgs),
    /// Print user-published listings
    Listings(StoreArgs),
    /// Delete stored data
    Clear {
        #[command(flatten)]
        store: StoreArgs,

        /// Remove the login session
        #[arg(long)]
        session: bool,

        /// Remove every user-published listing
        #[arg(long)]
        listings: bool,

        /// Remove the comment thread of this product (repeatable)
        #[arg(long = "comments", value_name = "ID")]
        comments: Vec<String>,

        /// Remove everything in the store
        #[arg(long)]
        all: bool,
    },
}

#[derive(Args)]
struct StoreArgs {
    /// Store file (the storefront's `MARKET_STORE_PATH`)
    #[arg(short, long, env = "MARKET_STORE_PATH")]
    store: PathBuf,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Check { path, url } => {
                commands::catalog::check(path, url).await?;
            }
        },
        Commands::Store { action } => match action {
            StoreAction::Show(args) => commands::store::show(&args.store)?,
            StoreAction::Listings(args) => commands::store::listings(&args.store)?,
            StoreAction::Clear {
                store,
                session,
                listings,
                comments,
                all,
            } => {
                let targets = commands::store::ClearTargets {
                    session,
                    listings,
                    comments,
                    all,
                };
                commands::store::clear(&store.store, &targets)?;
            }
        },
    }
    Ok(())
}
