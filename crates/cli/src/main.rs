use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pricewatch_core::{
    load_catalog, load_config, save_catalog, total_value, validate_config, CdpEngine, Config,
    ScrapeEngine, SessionPool, ShutdownCoordinator,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    /// Refresh prices for every item due for a scrape.
    Scrape,
    /// Print the aggregate catalog value.
    Total { ignore_highest: usize },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // Setup failures can predate logging init, so report on stderr.
        eprintln!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let mode = parse_mode(std::env::args().skip(1))?;

    // Determine config path
    let config_path = std::env::var("PRICEWATCH_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.json"));

    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;

    init_tracing(&config.log_level);
    info!("pricewatch {} (config: {:?})", VERSION, config_path);

    match mode {
        Mode::Scrape => scrape(&config).await,
        Mode::Total { ignore_highest } => total(&config, ignore_highest),
    }
}

async fn scrape(config: &Config) -> Result<()> {
    let mut catalog = load_catalog(&config.output_file)
        .with_context(|| format!("Failed to load catalog from {:?}", config.output_file))?;

    let pool = Arc::new(SessionPool::new(
        Arc::new(CdpEngine::new()),
        config.session_options(),
    ));
    let (coordinator, shutdown) = ShutdownCoordinator::new();
    let engine = ScrapeEngine::new(config, Arc::clone(&pool), shutdown);

    let mut interrupted = false;
    let summary = {
        let run = engine.run(&mut catalog);
        tokio::pin!(run);

        loop {
            tokio::select! {
                result = &mut run => break result.context("Scrape run failed")?,
                _ = shutdown_signal(), if !interrupted => {
                    interrupted = true;
                    coordinator.request_shutdown();
                    // Release every live browser on this context, so the
                    // cleanup is guaranteed to finish before we exit.
                    // In-flight workers see their sessions fail and drain.
                    pool.close_all().await;
                    coordinator.begin_drain();
                }
            }
        }
    };

    save_catalog(&config.output_file, &catalog)
        .with_context(|| format!("Failed to save catalog to {:?}", config.output_file))?;

    if interrupted {
        warn!(
            "Run interrupted: {} of {} eligible item(s) dispatched",
            summary.dispatched, summary.eligible
        );
    }
    info!(
        "Run complete: {} updated, {} failed ({} eligible of {} items)",
        summary.successful, summary.failed, summary.eligible, summary.total
    );

    coordinator.terminate();
    Ok(())
}

fn total(config: &Config, ignore_highest: usize) -> Result<()> {
    let catalog = load_catalog(&config.output_file)
        .with_context(|| format!("Failed to load catalog from {:?}", config.output_file))?;

    let value = total_value(&catalog, ignore_highest);
    info!(
        "Total value of all scraped prices (ignoring {} highest-cost items): ${:.2}",
        ignore_highest, value
    );
    println!("${value:.2}");
    Ok(())
}

fn parse_mode(args: impl Iterator<Item = String>) -> Result<Mode> {
    let args: Vec<String> = args.collect();
    match args.first().map(String::as_str) {
        None => Ok(Mode::Scrape),
        Some("total") => {
            let mut ignore_highest = 0;
            let mut rest = args[1..].iter();
            while let Some(arg) = rest.next() {
                match arg.as_str() {
                    "--ignore-highest" => {
                        ignore_highest = rest
                            .next()
                            .context("--ignore-highest requires a value")?
                            .parse()
                            .context("--ignore-highest requires a number")?;
                    }
                    other => bail!("Unknown argument: {other}"),
                }
            }
            Ok(Mode::Total { ignore_highest })
        }
        Some(other) => bail!("Unknown mode: {other} (expected no mode or \"total\")"),
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.to_lowercase())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
