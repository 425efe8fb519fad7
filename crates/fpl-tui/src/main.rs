// FPL dashboard entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Fetch and prepare the player table behind a loading panel
// 4. Run the dashboard until the user quits

use fpl_core::config;
use fpl_core::fetch::{BootstrapSource, HttpBootstrapSource};
use fpl_core::pipeline;
use fpl_tui::app::AppState;
use fpl_tui::tui;

use anyhow::Context;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("FPL dashboard starting up");

    // The terminal is still in normal mode here, so config errors go to stderr.
    let config = config::load_config()
        .inspect_err(|e| error!("Config error: {}", e))
        .context("failed to load configuration")?;
    info!("Config loaded: api={}", config.api.url);

    let source = HttpBootstrapSource::from_config(&config.api)
        .context("failed to build HTTP client")?;
    let described = source.describe();

    let startup = async move {
        let data = pipeline::load(&source)
            .await
            .with_context(|| format!("failed to load FPL data from {}", source.describe()))?;
        info!(
            "Working table ready: {} players ({} dropped, {} unmapped)",
            data.working.len(),
            data.working.dropped,
            data.working.unmapped
        );
        Ok::<_, anyhow::Error>(AppState::new(config, data))
    };

    if let Err(e) = tui::run(&described, startup).await {
        error!("Dashboard exited with error: {:#}", e);
        return Err(e);
    }

    info!("FPL dashboard shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("fpl-dashboard.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fpl_core=info,fpl_tui=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
