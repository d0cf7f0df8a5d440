//! scrybound CLI - validated queries against the card catalog API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{canonicalize, cards, schemas, search, set, sets, validate, Options};

#[derive(Parser)]
#[command(name = "scrybound", version)]
#[command(about = "Card catalog queries behind a validating trust boundary")]
struct Cli {
    /// Log pipeline steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// API base URL (overrides the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Client config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Output the validated structure as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every set, oldest first
    Sets,
    /// List one page of all cards
    Cards {
        /// Page number (default: 1)
        #[arg(long)]
        page: Option<u32>,
    },
    /// Show one set
    Set {
        /// Set code, e.g. rna
        code: String,
    },
    /// Full-text card search
    Search {
        /// Search query
        query: String,
        /// Restrict results to one set
        #[arg(long)]
        set: Option<String>,
    },
    /// Run a local payload through the trust boundary
    Validate {
        /// Payload file
        file: PathBuf,
        /// Schema name (see `scrybound schemas`)
        #[arg(long)]
        schema: String,
        /// Content-Type the payload is declared with
        #[arg(long, default_value = scrybound_client::JSON_CONTENT_TYPE)]
        content_type: String,
        /// Validate only this top-level key
        #[arg(long)]
        keyfilter: Option<String>,
    },
    /// Show canonical text for a UTF-8 payload
    Canonicalize {
        /// Input file (or stdin if not provided)
        input: Option<PathBuf>,
    },
    /// List registered schema names
    Schemas,
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let opts = Options {
        api_url: cli.api_url,
        config: cli.config,
        json: cli.json,
    };

    let result = match cli.command {
        Commands::Sets => sets::run(&opts),
        Commands::Cards { page } => cards::run(&opts, page),
        Commands::Set { code } => set::run(&opts, &code),
        Commands::Search { query, set } => search::run(&opts, &query, set.as_deref()),
        Commands::Validate {
            file,
            schema,
            content_type,
            keyfilter,
        } => validate::run(&opts, &file, &schema, &content_type, keyfilter.as_deref()),
        Commands::Canonicalize { input } => canonicalize::run(&opts, input.as_deref()),
        Commands::Schemas => schemas::run(&opts),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
