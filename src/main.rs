//! Pokedex - Interactive PokeAPI explorer
//!
//! Every API response is kept in an expiring in-memory cache so revisiting a
//! page or Pokemon does not hit the network again.

use std::io::{self, BufReader};
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokecache::repl::{self, Session};
use pokecache::{Cache, Config, PokeApiClient};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the response cache and start its reaper
/// 4. Build the PokeAPI client and REPL session
/// 5. Run the REPL until `exit`, end of input or Ctrl+C
/// 6. Stop the cache reaper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with REPL output on stdout.
    // Defaults to "warn", can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn,pokecache=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: sweep_interval={:?}, ttl={:?}, api={}",
        config.cache.sweep_interval,
        config.cache.effective_ttl(),
        config.api_base_url
    );

    let cache = Arc::new(Cache::from_config(config.cache).context("invalid cache configuration")?);
    let client = PokeApiClient::new(&config.api_base_url, cache.clone(), config.http_timeout)
        .context("failed to build HTTP client")?;
    let mut session = Session::new(client);

    let mut lines = repl::spawn_line_reader(BufReader::new(io::stdin()));
    let mut stdout = io::stdout();

    tokio::select! {
        result = repl::run(&mut session, &mut lines, &mut stdout) => result?,
        _ = signal::ctrl_c() => {
            println!();
            info!("Received Ctrl+C, shutting down");
        }
    }

    // Release the client's handle so the cache can be shut down by value
    drop(session);
    match Arc::try_unwrap(cache) {
        Ok(cache) => cache.shutdown().await,
        Err(cache) => cache.close(),
    }

    info!("Pokedex shutdown complete");
    Ok(())
}
