//! HTTP connection resolver CLI.
//!
//! Loads a TOML configuration, resolves its `connection(s)` and
//! `credential(s)` sections and prints the canonical connections as JSON.
//!
//! ```text
//! connection-resolver --config service.toml resolve
//! connection-resolver --config service.toml --correlation-id 42 resolve-all
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use connection_resolver::config::load_config;
use connection_resolver::observability::logging::{init_logging, DEFAULT_FILTER};
use connection_resolver::HttpConnectionResolver;

#[derive(Parser)]
#[command(name = "connection-resolver")]
#[command(about = "Resolve and validate HTTP connection parameters", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: PathBuf,

    /// Correlation id for tracing; generated when omitted.
    #[arg(long)]
    correlation_id: Option<String>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = DEFAULT_FILTER)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the first usable connection
    Resolve,
    /// Resolve every configured connection
    ResolveAll,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&cli.log_level)?;

    let correlation_id = cli
        .correlation_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let config = load_config(&cli.config)?;
    tracing::info!(
        path = %cli.config.display(),
        keys = config.len(),
        correlation_id = %correlation_id,
        "Configuration loaded"
    );

    let mut resolver = HttpConnectionResolver::new();
    resolver.configure(&config);

    let output = match cli.command {
        Commands::Resolve => {
            let connection = resolver.resolve(Some(&correlation_id)).await?;
            serde_json::to_string_pretty(&connection)?
        }
        Commands::ResolveAll => {
            let connections = resolver.resolve_all(Some(&correlation_id)).await?;
            serde_json::to_string_pretty(&connections)?
        }
    };

    println!("{}", output);
    Ok(())
}
