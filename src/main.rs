//! bank_ledger console application
//!
//! Builds the registry explicitly at startup, optionally seeds demo
//! accounts, and hands the registry to the menu loop.

use std::io;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bank_ledger::{cli, AccountRegistry, Config};

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bank_ledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("starting bank_ledger");

    let registry = Arc::new(AccountRegistry::new());

    if config.seed_demo_data {
        cli::seed_demo_accounts(&registry)?;
        println!("Demo accounts loaded!");
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    cli::run(&registry, &mut input, &mut output)?;

    tracing::info!("bank_ledger shut down");
    Ok(())
}
