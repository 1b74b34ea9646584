//! Spendweb main entry point

use anyhow::Context;
use clap::Parser;
use spendweb_api::{start_server, AppState};
use spendweb_client::{ApiClient, CategoryService, TransactionService};
use spendweb_config::{Config, GuardKind};
use spendweb_core::Store;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "spendweb")]
#[command(author = "Spendweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight web client for a personal expense-tracking service", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Base URL of the expense API (overrides config and VITE_API_BASE_URL)
    #[arg(long)]
    api_base_url: Option<String>,

    /// Enforce a route guard on the form pages (always_allow, session_token, role_based)
    #[arg(long)]
    guard: Option<GuardKind>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config_missing = !args.config.exists();
    let mut config = Config::load_or_default(&args.config)
        .map_err(|e| anyhow::anyhow!("{}", e.to_details()))
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
    config.apply_env_overrides();
    if let Some(url) = args.api_base_url {
        config.api.base_url = url;
    }
    if let Some(guard) = args.guard {
        config.auth.guard = guard;
        config.auth.enforce = true;
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("{}", e.to_details()))
        .context("Invalid configuration")?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();
    if config_missing {
        log::warn!("Config file {} not found, using built-in defaults", args.config.display());
    }
    log::info!("Expense API: {}", config.api.base_url);
    if config.auth.enforce {
        log::info!("Route guard: {}", config.auth.guard);
    }

    let client = ApiClient::from_config(&config.api).context("Failed to build HTTP client")?;
    let categories = Arc::new(CategoryService::new(client.clone()));
    let payments = Arc::new(TransactionService::new(client));
    let store = Arc::new(Store::new());

    let state = AppState::new(config, categories, payments, store.clone());

    let rt = Runtime::new()?;
    let served = rt.block_on(start_server(state, shutdown_signal()));

    store.teardown();
    served.context("Server error")
}

/// Resolves on Ctrl-C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutdown signal received"),
        Err(e) => {
            log::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}
