//! mublog CLI
//!
//! Offline-first micro-blog client: local post cache, paginated sync, and
//! create/update publishing.
//!
//! # Commands
//!
//! - `sync` - Pull the full remote post history into the local cache
//! - `publish` - Create or update a post from a compose document
//! - `upload` - Upload a media attachment and print its URL
//! - `list` - Show cached posts
//! - `search` - Search cached posts
//! - `categories` - Show every tag known to the cache

mod commands;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use mublog_client::ClientConfig;
use mublog_store::Database;

/// mublog command-line client.
#[derive(Parser)]
#[command(name = "mublog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the remote service (or MUBLOG_ENDPOINT)
    #[arg(global = true, short, long)]
    endpoint: Option<String>,

    /// Bearer token (or MUBLOG_TOKEN)
    #[arg(global = true, short, long)]
    token: Option<String>,

    /// Path to the cache database (defaults to the platform data dir)
    #[arg(global = true, long)]
    db: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pull the full remote post history into the local cache
    Sync {
        /// Wipe the cache first, dropping posts the server no longer returns
        #[arg(long)]
        reset: bool,
    },

    /// Create or update a post from a compose document
    Publish {
        /// Compose document: header lines, a --- separator, then the body
        file: PathBuf,

        /// Cache id of the post being updated
        #[arg(long, requires = "update_url")]
        update_id: Option<String>,

        /// Canonical URL of the post being updated
        #[arg(long, requires = "update_id")]
        update_url: Option<String>,
    },

    /// Upload a media attachment and print its URL
    Upload {
        /// File to upload
        file: PathBuf,

        /// Alt text; when given, prints ready-to-paste image markup
        #[arg(long)]
        alt: Option<String>,
    },

    /// Show cached posts, newest first
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Search cached posts by title, content, or category
    Search {
        /// Substring to look for
        term: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show every tag known to the cache
    Categories,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Sync { reset } => {
            let config = client_config(cli.endpoint, cli.token)?;
            let mut db = open_db(cli.db.as_deref())?;
            commands::sync::run(&config, &mut db, reset)?;
        }
        Commands::Publish {
            file,
            update_id,
            update_url,
        } => {
            let config = client_config(cli.endpoint, cli.token)?;
            let mut db = open_db(cli.db.as_deref())?;
            commands::publish::run(&config, &mut db, &file, update_id, update_url)?;
        }
        Commands::Upload { file, alt } => {
            let config = client_config(cli.endpoint, cli.token)?;
            commands::upload::run(&config, &file, alt.as_deref())?;
        }
        Commands::List { format } => {
            let db = open_db(cli.db.as_deref())?;
            commands::list::run(&db, &format)?;
        }
        Commands::Search { term, format } => {
            let db = open_db(cli.db.as_deref())?;
            commands::search::run(&db, &term, &format)?;
        }
        Commands::Categories => {
            let db = open_db(cli.db.as_deref())?;
            commands::categories::run(&db)?;
        }
    }

    Ok(())
}

fn open_db(path: Option<&Path>) -> Result<Database, Box<dyn std::error::Error>> {
    let db = match path {
        Some(path) => Database::open_at(path)?,
        None => Database::open()?,
    };
    Ok(db)
}

fn client_config(
    endpoint: Option<String>,
    token: Option<String>,
) -> Result<ClientConfig, Box<dyn std::error::Error>> {
    let endpoint = endpoint
        .or_else(|| std::env::var("MUBLOG_ENDPOINT").ok())
        .ok_or("no endpoint configured; pass --endpoint or set MUBLOG_ENDPOINT")?;
    let token = token
        .or_else(|| std::env::var("MUBLOG_TOKEN").ok())
        .ok_or("no token configured; pass --token or set MUBLOG_TOKEN")?;
    Ok(ClientConfig::new(endpoint, token))
}
