// Deriver: computes `value` and drops players with no positive value.
//
// Also computes the filter domain (distinct positions/teams, observed value
// and cost bounds) once, from the working table.

use tracing::info;

use crate::filter::Interval;
use crate::normalize::{Player, PlayerTable};

/// Group label used for players whose position or team id did not resolve.
pub const UNMAPPED_LABEL: &str = "(unmapped)";

/// A player of the working table together with its derived value.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingPlayer {
    pub player: Player,
    /// Seasonal value as f64. Strictly positive.
    pub value: f64,
}

impl WorkingPlayer {
    pub fn position_label(&self) -> &str {
        self.player.position.as_deref().unwrap_or(UNMAPPED_LABEL)
    }

    pub fn team_label(&self) -> &str {
        self.player.team.as_deref().unwrap_or(UNMAPPED_LABEL)
    }

    pub fn cost(&self) -> f64 {
        self.player.now_cost as f64
    }
}

/// Full observed domain of each filter dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    /// Distinct position labels in first-appearance order.
    pub positions: Vec<String>,
    /// Distinct team labels in first-appearance order.
    pub teams: Vec<String>,
    pub value: Interval,
    pub cost: Interval,
}

impl Domain {
    fn observe(players: &[WorkingPlayer]) -> Self {
        let mut positions: Vec<String> = Vec::new();
        let mut teams: Vec<String> = Vec::new();
        for p in players {
            if !positions.iter().any(|s| s == p.position_label()) {
                positions.push(p.position_label().to_string());
            }
            if !teams.iter().any(|s| s == p.team_label()) {
                teams.push(p.team_label().to_string());
            }
        }

        Domain {
            positions,
            teams,
            value: Interval::spanning(players.iter().map(|p| p.value)),
            cost: Interval::spanning(players.iter().map(|p| p.cost())),
        }
    }

    /// Index of a team label in the domain; used for stable chart colours.
    pub fn team_index(&self, label: &str) -> Option<usize> {
        self.teams.iter().position(|t| t == label)
    }
}

/// The post-derivation, pre-interactive-filter dataset.
#[derive(Debug, Clone)]
pub struct WorkingTable {
    pub players: Vec<WorkingPlayer>,
    pub domain: Domain,
    /// Players removed because their value was zero or negative.
    pub dropped: usize,
    /// Retained players whose position or team did not resolve.
    pub unmapped: usize,
}

impl WorkingTable {
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Compute `value` for every player and keep only `value > 0`.
pub fn derive(table: PlayerTable) -> WorkingTable {
    let total = table.players.len();

    let players: Vec<WorkingPlayer> = table
        .players
        .into_iter()
        .map(|player| WorkingPlayer {
            value: player.value_season,
            player,
        })
        .filter(|p| p.value > 0.0)
        .collect();

    let dropped = total - players.len();
    let unmapped = players
        .iter()
        .filter(|p| p.player.position.is_none() || p.player.team.is_none())
        .count();
    let domain = Domain::observe(&players);

    info!(
        "Working table: {} players kept, {} dropped with non-positive value",
        players.len(),
        dropped
    );

    WorkingTable {
        players,
        domain,
        dropped,
        unmapped,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal player used across the crate's unit tests.
    pub(crate) fn player(
        id: u32,
        name: &str,
        position: &str,
        team: &str,
        value: f64,
        cost: i64,
    ) -> Player {
        Player {
            id,
            first_name: String::new(),
            web_name: name.to_string(),
            team_id: 0,
            team: Some(team.to_string()),
            element_type: 0,
            position: Some(position.to_string()),
            now_cost: cost,
            minutes: 0,
            transfers_in: 0,
            transfers_out: 0,
            bonus: 0,
            bps: 0,
            goals_scored: 0,
            goals_conceded: 0,
            assists: 0,
            clean_sheets: 0,
            saves: 0,
            own_goals: 0,
            penalties_saved: 0,
            penalties_missed: 0,
            total_points: 0,
            direct_freekicks_order: None,
            corners_and_indirect_freekicks_order: None,
            penalties_order: None,
            selected_by_percent: 0.0,
            influence: 0.0,
            creativity: 0.0,
            threat: 0.0,
            ict_index: 0.0,
            points_per_game: 0.0,
            value_season: value,
        }
    }

    /// The A/B/C table: C has zero value and is dropped.
    pub(crate) fn abc_table() -> WorkingTable {
        derive(PlayerTable {
            players: vec![
                player(1, "A", "Forward", "X", 5.0, 50),
                player(2, "B", "Midfielder", "Y", 8.0, 60),
                player(3, "C", "Forward", "X", 0.0, 40),
            ],
            ..PlayerTable::default()
        })
    }

    #[test]
    fn drops_zero_and_negative_value() {
        let table = derive(PlayerTable {
            players: vec![
                player(1, "A", "Forward", "X", 5.0, 50),
                player(2, "Neg", "Defender", "X", -1.0, 45),
                player(3, "Zero", "Defender", "Y", 0.0, 40),
            ],
            ..PlayerTable::default()
        });
        assert_eq!(table.len(), 1);
        assert_eq!(table.dropped, 2);
        assert!(table.players.iter().all(|p| p.value > 0.0));
    }

    #[test]
    fn abc_scenario_keeps_a_and_b() {
        let table = abc_table();
        let names: Vec<&str> = table.players.iter().map(|p| p.player.web_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(table.dropped, 1);
    }

    #[test]
    fn domain_is_observed_from_working_table() {
        let table = abc_table();
        assert_eq!(table.domain.positions, vec!["Forward", "Midfielder"]);
        assert_eq!(table.domain.teams, vec!["X", "Y"]);
        assert_eq!(table.domain.value, Interval::new(5.0, 8.0));
        // C (cost 40) was dropped, so the cost domain starts at 50.
        assert_eq!(table.domain.cost, Interval::new(50.0, 60.0));
        assert_eq!(table.domain.team_index("Y"), Some(1));
        assert_eq!(table.domain.team_index("Z"), None);
    }

    #[test]
    fn unmapped_players_form_their_own_group() {
        let mut orphan = player(4, "D", "Forward", "X", 2.0, 45);
        orphan.team = None;
        let table = derive(PlayerTable {
            players: vec![player(1, "A", "Forward", "X", 5.0, 50), orphan],
            ..PlayerTable::default()
        });
        assert_eq!(table.unmapped, 1);
        assert_eq!(table.domain.teams, vec!["X".to_string(), UNMAPPED_LABEL.to_string()]);
        assert_eq!(table.players[1].team_label(), UNMAPPED_LABEL);
    }

    #[test]
    fn empty_table_has_degenerate_domain() {
        let table = derive(PlayerTable::default());
        assert!(table.is_empty());
        assert!(table.domain.positions.is_empty());
        assert_eq!(table.domain.value, Interval::new(0.0, 0.0));
    }
}
