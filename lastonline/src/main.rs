mod console;

use anyhow::Context as _;
use lastonline::LastOnline;
use lastonline::config::HostConfig;
use lastonline::helpers::now;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::console::{Console, Step};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let host = HostConfig::from_env();

    // Initialize tracing for structured logging
    #[cfg(debug_assertions)]
    let log_level = "debug";
    #[cfg(not(debug_assertions))]
    let log_level = "info";

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(host.log_filter.as_deref().unwrap_or(log_level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
    tracing::info!("Starting LastOnline host...");
    tracing::info!("Configuration: data_dir={}", host.data_dir.display());

    let mut plugin = LastOnline::start(&host.data_dir)
        .with_context(|| format!("failed to enable LastOnline in {}", host.data_dir.display()))?;
    let mut console = Console::open(plugin.data_dir())?;

    let mut save_timer = tokio::time::interval(plugin.config().save_interval());
    // The first tick completes immediately
    save_timer.tick().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read console input")? else {
                    tracing::info!("Console closed");
                    break;
                };
                match console.handle(&mut plugin, &line, now()) {
                    Ok(Step::Output(text)) => println!("{text}"),
                    Ok(Step::Silent) => {}
                    Ok(Step::Stop) => break,
                    Err(e) => tracing::warn!("{e:#}"),
                }
            }
            _ = save_timer.tick() => {
                if plugin.on_tick() {
                    tracing::debug!("Periodic save completed");
                }
                console.flush();
            }
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    tracing::error!("Failed to listen for shutdown signal: {}", e);
                }
                tracing::info!("Shutdown requested");
                break;
            }
        }
    }

    console.flush();
    plugin.stop();
    Ok(())
}
