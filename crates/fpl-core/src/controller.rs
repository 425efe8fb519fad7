// Filter controller: owns the working table and the current filter state,
// and keeps the filtered view in step with it.

use tracing::debug;

use crate::derive::{Domain, WorkingPlayer, WorkingTable};
use crate::filter::{apply, FilterState, FilteredView};

#[derive(Debug, Clone)]
pub struct FilterController {
    working: WorkingTable,
    initial: FilterState,
    state: FilterState,
    view: FilteredView,
}

impl FilterController {
    /// Start with every filter at its widest setting.
    pub fn new(working: WorkingTable) -> Self {
        let initial = FilterState::initial(&working.domain);
        let view = apply(&working, &initial);
        FilterController {
            working,
            state: initial.clone(),
            initial,
            view,
        }
    }

    /// Replace the filter state and recompute the view from scratch.
    pub fn update(&mut self, next: FilterState) {
        if next == self.state {
            return;
        }
        self.view = apply(&self.working, &next);
        self.state = next;
        debug!(
            shown = self.view.len(),
            total = self.working.len(),
            "filter state updated"
        );
    }

    /// Restore the initial filter state.
    pub fn reset(&mut self) {
        self.update(self.initial.clone());
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn initial(&self) -> &FilterState {
        &self.initial
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn working(&self) -> &WorkingTable {
        &self.working
    }

    pub fn domain(&self) -> &Domain {
        &self.working.domain
    }

    /// Rows of the current view in working-table order.
    pub fn rows(&self) -> Vec<&WorkingPlayer> {
        self.view.rows(&self.working)
    }

    /// Rows of the current view by value descending, lowest id first on ties.
    pub fn ranked_rows(&self) -> Vec<&WorkingPlayer> {
        let mut rows = self.rows();
        rows.sort_by(|a, b| {
            b.value
                .total_cmp(&a.value)
                .then_with(|| a.player.id.cmp(&b.player.id))
        });
        rows
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
