// Startup pipeline: fetch -> normalize -> derive, run once.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::bootstrap::{BootstrapDocument, SchemaError};
use crate::derive::{derive, WorkingTable};
use crate::fetch::{BootstrapSource, FetchError};
use crate::normalize::{normalize, CoercionError};

/// Any failure that aborts startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("network error: {0}")]
    Fetch(#[from] FetchError),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("coercion error: {0}")]
    Coercion(#[from] CoercionError),
}

/// The working table plus provenance for the status bar.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub working: WorkingTable,
    pub source: String,
    pub fetched_at: DateTime<Utc>,
    /// Players in the payload before the value filter.
    pub total_players: usize,
    pub phase_count: usize,
    pub event_count: usize,
}

/// Run the one-shot stages against `source`.
pub async fn load(source: &dyn BootstrapSource) -> Result<LoadedData, LoadError> {
    let described = source.describe();
    info!("Loading bootstrap document from {}", described);

    let result = run(source).await;
    match &result {
        Ok(data) => info!(
            "Loaded {} of {} players ({} phases, {} events)",
            data.working.len(),
            data.total_players,
            data.phase_count,
            data.event_count
        ),
        Err(e) => error!("Failed to load bootstrap document from {}: {}", described, e),
    }
    result
}

async fn run(source: &dyn BootstrapSource) -> Result<LoadedData, LoadError> {
    let json = source.fetch().await?;
    let fetched_at = Utc::now();

    let doc = BootstrapDocument::from_value(&json)?;
    let table = normalize(&doc)?;
    if table.unmapped_positions + table.unmapped_teams > 0 {
        warn!(
            "{} players with unknown position, {} with unknown team",
            table.unmapped_positions, table.unmapped_teams
        );
    }

    let total_players = table.players.len();
    let working = derive(table);

    Ok(LoadedData {
        working,
        source: source.describe(),
        fetched_at,
        total_players,
        phase_count: doc.phase_count,
        event_count: doc.event_count,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
