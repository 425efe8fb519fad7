// Application state and orchestration logic.
//
// Owns the filter controller and everything derived from the filtered view.
// Each `Action` produces a new filter state (or bonus statistic); the
// headline metrics and chart models are then recomputed before the next
// frame is drawn.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use fpl_core::charts::{bonus_points, points_by_cost, transfers_and_popularity, BonusStat, ScatterPlot};
use fpl_core::config::Config;
use fpl_core::controller::FilterController;
use fpl_core::derive::WorkingPlayer;
use fpl_core::filter::{Choice, Interval};
use fpl_core::metrics::{compute_headline, Headline, MetricCard};
use fpl_core::pipeline::LoadedData;

use crate::protocol::{Action, Bound, ListFilter, RangeFilter, TabId};

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// The three chart models for the current view.
#[derive(Debug, Clone)]
pub struct Charts {
    pub points_by_cost: ScatterPlot,
    pub transfers: ScatterPlot,
    pub bonus: ScatterPlot,
}

impl Charts {
    /// The chart shown on a tab; `None` for the Players tab.
    pub fn for_tab(&self, tab: TabId) -> Option<&ScatterPlot> {
        match tab {
            TabId::PointsByCost => Some(&self.points_by_cost),
            TabId::Transfers => Some(&self.transfers),
            TabId::Bonus => Some(&self.bonus),
            TabId::Players => None,
        }
    }
}

/// Where the data came from, for the status bar.
#[derive(Debug, Clone)]
pub struct Provenance {
    pub source: String,
    pub fetched_at: DateTime<Utc>,
    /// Players in the payload before the value filter.
    pub total_players: usize,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub config: Config,
    pub controller: FilterController,
    pub bonus_stat: BonusStat,
    pub headline: Headline,
    pub charts: Charts,
    pub provenance: Provenance,
}

impl AppState {
    pub fn new(config: Config, data: LoadedData) -> Self {
        let provenance = Provenance {
            source: data.source,
            fetched_at: data.fetched_at,
            total_players: data.total_players,
        };
        let controller = FilterController::new(data.working);
        let bonus_stat = BonusStat::default();
        let (headline, charts) = present(&controller, bonus_stat);

        AppState {
            config,
            controller,
            bonus_stat,
            headline,
            charts,
            provenance,
        }
    }

    /// Apply an action and recompute the presentation.
    pub fn handle(&mut self, action: Action) {
        debug!("Handling action: {:?}", action);
        match action {
            Action::Toggle { list, choice } => self.toggle(list, &choice),
            Action::MoveBound {
                range,
                bound,
                steps,
            } => self.move_bound(range, bound, steps),
            Action::CycleBonusStat { forward } => {
                self.bonus_stat = if forward {
                    self.bonus_stat.next()
                } else {
                    self.bonus_stat.prev()
                };
            }
            Action::ResetFilters => {
                info!("Filters reset");
                self.controller.reset();
            }
        }
        self.refresh();
    }

    fn toggle(&mut self, list: ListFilter, choice: &Choice) {
        let state = self.controller.state();
        let next = match list {
            ListFilter::Position => state.with_positions(state.positions.toggled(choice)),
            ListFilter::Team => state.with_teams(state.teams.toggled(choice)),
        };
        self.controller.update(next);
    }

    fn move_bound(&mut self, range: RangeFilter, bound: Bound, steps: i32) {
        let state = self.controller.state();
        let domain = self.controller.domain();
        let (current, limits, step) = match range {
            RangeFilter::Value => (state.value, domain.value, self.config.controls.value_step),
            RangeFilter::Cost => (state.cost, domain.cost, self.config.controls.cost_step),
        };
        let moved = match bound {
            Bound::Lo => current.step_lo(steps, step, &limits),
            Bound::Hi => current.step_hi(steps, step, &limits),
        };
        let next = match range {
            RangeFilter::Value => state.with_value(moved),
            RangeFilter::Cost => state.with_cost(moved),
        };
        self.controller.update(next);
    }

    fn refresh(&mut self) {
        let (headline, charts) = present(&self.controller, self.bonus_stat);
        self.headline = headline;
        self.charts = charts;
    }

    /// The eight metric cards with the configured currency prefix.
    pub fn cards(&self) -> [MetricCard; 8] {
        self.headline.cards(&self.config.display.currency_prefix)
    }

    /// Players panel rows, best value first.
    pub fn ranked_players(&self) -> Vec<&WorkingPlayer> {
        self.controller.ranked_rows()
    }

    pub fn range(&self, range: RangeFilter) -> (Interval, Interval) {
        let state = self.controller.state();
        let domain = self.controller.domain();
        match range {
            RangeFilter::Value => (state.value, domain.value),
            RangeFilter::Cost => (state.cost, domain.cost),
        }
    }

    /// Entries of a multi-select list: the sentinel first, then the domain.
    pub fn list_entries(&self, list: ListFilter) -> Vec<Choice> {
        let domain = self.controller.domain();
        let labels = match list {
            ListFilter::Position => &domain.positions,
            ListFilter::Team => &domain.teams,
        };
        std::iter::once(Choice::All)
            .chain(labels.iter().map(|l| Choice::Item(l.clone())))
            .collect()
    }

    pub fn is_chosen(&self, list: ListFilter, choice: &Choice) -> bool {
        let state = self.controller.state();
        match list {
            ListFilter::Position => state.positions.contains(choice),
            ListFilter::Team => state.teams.contains(choice),
        }
    }
}

fn present(controller: &FilterController, bonus_stat: BonusStat) -> (Headline, Charts) {
    let rows = controller.rows();
    let domain = controller.domain();
    let headline = compute_headline(&rows);
    let charts = Charts {
        points_by_cost: points_by_cost(&rows, domain),
        transfers: transfers_and_popularity(&rows, domain),
        bonus: bonus_points(&rows, domain, bonus_stat),
    };
    (headline, charts)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
