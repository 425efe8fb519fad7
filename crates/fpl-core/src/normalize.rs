// Normalizer: bootstrap records -> player table.
//
// Coerces numeric-as-text fields to f64 and resolves position and team names
// through the lookup tables carried in the same payload.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use crate::bootstrap::{BootstrapDocument, NumericText, RawElement};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// A field expected to hold a number held something else.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("player {player_id} ({web_name}): field `{field}` is not numeric: {raw:?}")]
pub struct CoercionError {
    pub player_id: u32,
    pub web_name: String,
    pub field: &'static str,
    pub raw: String,
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// One row of the player table.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: u32,
    pub first_name: String,
    pub web_name: String,
    /// Raw team id from the payload.
    pub team_id: u32,
    /// Resolved team name; `None` when the id is not in the team table.
    pub team: Option<String>,
    /// Raw position id (`element_type`) from the payload.
    pub element_type: u32,
    /// Resolved position name; `None` when the id is not in the position table.
    pub position: Option<String>,
    pub now_cost: i64,
    pub minutes: i64,
    pub transfers_in: i64,
    pub transfers_out: i64,
    pub bonus: i64,
    pub bps: i64,
    pub goals_scored: i64,
    pub goals_conceded: i64,
    pub assists: i64,
    pub clean_sheets: i64,
    pub saves: i64,
    pub own_goals: i64,
    pub penalties_saved: i64,
    pub penalties_missed: i64,
    pub total_points: i64,
    pub direct_freekicks_order: Option<u32>,
    pub corners_and_indirect_freekicks_order: Option<u32>,
    pub penalties_order: Option<u32>,
    pub selected_by_percent: f64,
    pub influence: f64,
    pub creativity: f64,
    pub threat: f64,
    pub ict_index: f64,
    pub points_per_game: f64,
    pub value_season: f64,
}

impl Player {
    pub fn net_transfers(&self) -> i64 {
        self.transfers_in - self.transfers_out
    }
}

/// Output of normalization: every player plus unresolved-lookup counts.
#[derive(Debug, Clone, Default)]
pub struct PlayerTable {
    pub players: Vec<Player>,
    pub unmapped_positions: usize,
    pub unmapped_teams: usize,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Build the player table from a bootstrap document.
///
/// Coercion failures abort immediately. Unresolved position/team ids do not:
/// the player is kept with `None` in that field and counted.
pub fn normalize(doc: &BootstrapDocument) -> Result<PlayerTable, CoercionError> {
    let positions: HashMap<u32, &str> = doc
        .element_types
        .iter()
        .map(|t| (t.id, t.singular_name.as_str()))
        .collect();
    let teams: HashMap<u32, &str> = doc
        .teams
        .iter()
        .map(|t| (t.id, t.name.as_str()))
        .collect();

    let mut table = PlayerTable {
        players: Vec::with_capacity(doc.elements.len()),
        ..PlayerTable::default()
    };

    for raw in &doc.elements {
        let position = positions.get(&raw.element_type).map(|s| s.to_string());
        if position.is_none() {
            warn!(
                "player {} ({}) has unknown element_type {}",
                raw.id, raw.web_name, raw.element_type
            );
            table.unmapped_positions += 1;
        }
        let team = teams.get(&raw.team).map(|s| s.to_string());
        if team.is_none() {
            warn!("player {} ({}) has unknown team {}", raw.id, raw.web_name, raw.team);
            table.unmapped_teams += 1;
        }

        table.players.push(build_player(raw, position, team)?);
    }

    debug!(
        players = table.players.len(),
        unmapped_positions = table.unmapped_positions,
        unmapped_teams = table.unmapped_teams,
        "normalized player table"
    );
    Ok(table)
}

fn build_player(
    raw: &RawElement,
    position: Option<String>,
    team: Option<String>,
) -> Result<Player, CoercionError> {
    let coerce = |field: &'static str, value: &NumericText| coerce_f64(raw, field, value);

    Ok(Player {
        id: raw.id,
        first_name: raw.first_name.clone(),
        web_name: raw.web_name.clone(),
        team_id: raw.team,
        team,
        element_type: raw.element_type,
        position,
        now_cost: raw.now_cost,
        minutes: raw.minutes,
        transfers_in: raw.transfers_in,
        transfers_out: raw.transfers_out,
        bonus: raw.bonus,
        bps: raw.bps,
        goals_scored: raw.goals_scored,
        goals_conceded: raw.goals_conceded,
        assists: raw.assists,
        clean_sheets: raw.clean_sheets,
        saves: raw.saves,
        own_goals: raw.own_goals,
        penalties_saved: raw.penalties_saved,
        penalties_missed: raw.penalties_missed,
        total_points: raw.total_points,
        direct_freekicks_order: raw.direct_freekicks_order,
        corners_and_indirect_freekicks_order: raw.corners_and_indirect_freekicks_order,
        penalties_order: raw.penalties_order,
        selected_by_percent: coerce("selected_by_percent", &raw.selected_by_percent)?,
        influence: coerce("influence", &raw.influence)?,
        creativity: coerce("creativity", &raw.creativity)?,
        threat: coerce("threat", &raw.threat)?,
        ict_index: coerce("ict_index", &raw.ict_index)?,
        points_per_game: coerce("points_per_game", &raw.points_per_game)?,
        value_season: coerce("value_season", &raw.value_season)?,
    })
}

/// Coerce a number-or-text field to a finite f64.
fn coerce_f64(
    raw: &RawElement,
    field: &'static str,
    value: &NumericText,
) -> Result<f64, CoercionError> {
    let parsed = match value {
        NumericText::Number(n) => Some(*n),
        NumericText::Text(s) => s.trim().parse::<f64>().ok(),
    };

    match parsed {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(CoercionError {
            player_id: raw.id,
            web_name: raw.web_name.clone(),
            field,
            raw: match value {
                NumericText::Number(n) => n.to_string(),
                NumericText::Text(s) => s.clone(),
            },
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
