//! OrionX command line client
//!
//! Subcommands:
//! - ping: check credentials and connectivity
//! - me / balances: account information
//! - markets / market / orderbook / stats: market data
//! - query: send an arbitrary GraphQL document

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use orionx::endpoints::markets::DEFAULT_ORDERBOOK_LIMIT;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "orionx")]
#[command(about = "Signed GraphQL client for the OrionX exchange", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON configuration file (ORIONX_* environment variables are used otherwise)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log request bodies, headers and raw responses
    #[arg(long, global = true)]
    debug: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that the API answers with the configured credentials
    Ping,

    /// Show the current user's profile
    Me,

    /// List wallet balances
    Balances,

    /// List all markets
    Markets,

    /// Show one market
    Market {
        /// Market code, e.g. BTCCLP
        code: String,
    },

    /// Show a market's order book
    Orderbook {
        /// Market code, e.g. BTCCLP
        code: String,

        /// Levels per side
        #[arg(short, long, default_value_t = DEFAULT_ORDERBOOK_LIMIT)]
        limit: u32,
    },

    /// Show last price, spread and top of book for a market
    Stats {
        /// Market code, e.g. BTCCLP
        code: String,
    },

    /// Send a raw GraphQL document
    Query {
        /// GraphQL query or mutation
        document: String,

        /// Variables as a JSON object
        #[arg(long)]
        variables: Option<String>,
    },
}

fn setup_logging(verbose: bool, debug: bool, log_file: Option<&Path>) -> Result<()> {
    // Filter out noisy external crates
    let level = if verbose || debug { "debug" } else { "info" };
    let filter_str = format!(
        "{},hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn,h2=warn",
        level
    );
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(true);

    let file_layer = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)?;
            let name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Invalid log file path: {}", path.display()))?;
            let appender = tracing_appender::rolling::never(dir, name);

            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(appender)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(path) = log_file {
        info!("Log file: {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.debug, cli.log_file.as_deref())?;

    let ctx = commands::Context {
        config_path: cli.config,
        debug: cli.debug,
    };

    match cli.command {
        Commands::Ping => commands::ping::run(&ctx),
        Commands::Me => commands::account::me(&ctx),
        Commands::Balances => commands::account::balances(&ctx),
        Commands::Markets => commands::market::list(&ctx),
        Commands::Market { code } => commands::market::show(&ctx, &code),
        Commands::Orderbook { code, limit } => commands::market::orderbook(&ctx, &code, limit),
        Commands::Stats { code } => commands::market::stats(&ctx, &code),
        Commands::Query {
            document,
            variables,
        } => commands::query::run(&ctx, &document, variables.as_deref()),
    }
}
