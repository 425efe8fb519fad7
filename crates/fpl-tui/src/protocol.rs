// Message types shared between the input handler, the app state and the
// renderer.

use fpl_core::filter::Choice;

/// Main panel tabs, selected with the number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabId {
    #[default]
    PointsByCost,
    Transfers,
    Bonus,
    Players,
}

impl TabId {
    pub const ALL: [TabId; 4] = [
        TabId::PointsByCost,
        TabId::Transfers,
        TabId::Bonus,
        TabId::Players,
    ];
}

/// Sidebar control that receives arrow and toggle keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Positions,
    Teams,
    Value,
    Cost,
    BonusStat,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Positions,
        Focus::Teams,
        Focus::Value,
        Focus::Cost,
        Focus::BonusStat,
    ];

    fn index(self) -> usize {
        Focus::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Focus::ORDER[(self.index() + 1) % Focus::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Focus::ORDER.len();
        Focus::ORDER[(self.index() + len - 1) % len]
    }
}

/// The two multi-select filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    Position,
    Team,
}

/// The two range filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeFilter {
    Value,
    Cost,
}

/// Which end of a range the arrow keys move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bound {
    #[default]
    Lo,
    Hi,
}

/// A change to the dashboard's filter or chart settings.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Toggle { list: ListFilter, choice: Choice },
    MoveBound { range: RangeFilter, bound: Bound, steps: i32 },
    CycleBonusStat { forward: bool },
    ResetFilters,
}

/// What a key press asks of the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    Apply(Action),
    Quit,
}
