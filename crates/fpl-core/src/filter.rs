// Interactive filters over the working table.
//
// `FilterState` is an immutable value: every control change builds a new one,
// and `apply` recomputes the filtered view from scratch.

use crate::derive::{Domain, WorkingPlayer, WorkingTable};

// ---------------------------------------------------------------------------
// Interval
// ---------------------------------------------------------------------------

/// Closed interval `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
}

impl Interval {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Interval { lo, hi }
    }

    /// Smallest interval covering every value; `[0, 0]` when there are none.
    pub fn spanning(values: impl IntoIterator<Item = f64>) -> Self {
        let mut iter = values.into_iter();
        let Some(first) = iter.next() else {
            return Interval::new(0.0, 0.0);
        };
        iter.fold(Interval::new(first, first), |acc, v| {
            Interval::new(acc.lo.min(v), acc.hi.max(v))
        })
    }

    pub fn contains(&self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }

    pub fn span(&self) -> f64 {
        self.hi - self.lo
    }

    /// Move the lower bound, keeping `domain.lo <= lo <= hi`.
    pub fn with_lo(&self, lo: f64, domain: &Interval) -> Self {
        Interval::new(lo.max(domain.lo).min(self.hi), self.hi)
    }

    /// Move the upper bound, keeping `lo <= hi <= domain.hi`.
    pub fn with_hi(&self, hi: f64, domain: &Interval) -> Self {
        Interval::new(self.lo, hi.min(domain.hi).max(self.lo))
    }

    /// Move the lower bound by `steps` increments of `step`. The result sits
    /// on the grid anchored at `domain.lo`, then is clamped like `with_lo`.
    pub fn step_lo(&self, steps: i32, step: f64, domain: &Interval) -> Self {
        let target = self.lo + f64::from(steps) * step;
        self.with_lo(snap_to_grid(target, domain.lo, step), domain)
    }

    /// Move the upper bound by `steps` increments of `step`, on the grid
    /// anchored at `domain.hi`.
    pub fn step_hi(&self, steps: i32, step: f64, domain: &Interval) -> Self {
        let target = self.hi + f64::from(steps) * step;
        self.with_hi(snap_to_grid(target, domain.hi, step), domain)
    }
}

/// Decimal places kept after snapping, so `3.0 + 3 * 0.1` lands on `3.3`.
const GRID_DECIMALS: i32 = 9;

/// Nearest point to `x` of the form `anchor + k * step`, with the float
/// noise of the multiplication rounded away.
fn snap_to_grid(x: f64, anchor: f64, step: f64) -> f64 {
    let on_grid = anchor + ((x - anchor) / step).round() * step;
    let scale = 10f64.powi(GRID_DECIMALS);
    (on_grid * scale).round() / scale
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// One entry of a multi-select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// The "Select all" sentinel.
    All,
    Item(String),
}

impl Choice {
    pub fn item(label: impl Into<String>) -> Self {
        Choice::Item(label.into())
    }
}

/// The raw contents of a multi-select control.
///
/// While `Choice::All` is part of the selection, the effective set is the
/// whole domain no matter which other items are also chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    chosen: Vec<Choice>,
}

impl Selection {
    /// A selection containing only the sentinel.
    pub fn all() -> Self {
        Selection {
            chosen: vec![Choice::All],
        }
    }

    pub fn of<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Self {
        Selection {
            chosen: items.into_iter().map(|s| Choice::Item(s.into())).collect(),
        }
    }

    pub fn chosen(&self) -> &[Choice] {
        &self.chosen
    }

    pub fn contains(&self, choice: &Choice) -> bool {
        self.chosen.contains(choice)
    }

    pub fn includes_all(&self) -> bool {
        self.contains(&Choice::All)
    }

    /// Add the choice if absent, remove it if present.
    pub fn toggled(&self, choice: &Choice) -> Self {
        let mut chosen = self.chosen.clone();
        match chosen.iter().position(|c| c == choice) {
            Some(i) => {
                chosen.remove(i);
            }
            None => chosen.push(choice.clone()),
        }
        Selection { chosen }
    }

    /// Whether a record with this label passes the selection.
    pub fn admits(&self, label: &str) -> bool {
        self.chosen.iter().any(|c| match c {
            Choice::All => true,
            Choice::Item(item) => item == label,
        })
    }

    /// The labels this selection lets through, in domain order.
    pub fn effective<'a>(&self, domain: &'a [String]) -> Vec<&'a str> {
        domain
            .iter()
            .filter(|label| self.admits(label))
            .map(String::as_str)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// FilterState
// ---------------------------------------------------------------------------

/// The four filter dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Position,
    Team,
    Value,
    Cost,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Position,
        Dimension::Team,
        Dimension::Value,
        Dimension::Cost,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub positions: Selection,
    pub teams: Selection,
    pub value: Interval,
    pub cost: Interval,
}

impl FilterState {
    /// Everything selected, both ranges spanning the observed domain.
    pub fn initial(domain: &Domain) -> Self {
        FilterState {
            positions: Selection::all(),
            teams: Selection::all(),
            value: domain.value,
            cost: domain.cost,
        }
    }

    pub fn with_positions(&self, positions: Selection) -> Self {
        FilterState {
            positions,
            ..self.clone()
        }
    }

    pub fn with_teams(&self, teams: Selection) -> Self {
        FilterState {
            teams,
            ..self.clone()
        }
    }

    pub fn with_value(&self, value: Interval) -> Self {
        FilterState {
            value,
            ..self.clone()
        }
    }

    pub fn with_cost(&self, cost: Interval) -> Self {
        FilterState {
            cost,
            ..self.clone()
        }
    }

    /// Predicate for a single dimension.
    pub fn admits(&self, dimension: Dimension, player: &WorkingPlayer) -> bool {
        match dimension {
            Dimension::Position => self.positions.admits(player.position_label()),
            Dimension::Team => self.teams.admits(player.team_label()),
            Dimension::Value => self.value.contains(player.value),
            Dimension::Cost => self.cost.contains(player.cost()),
        }
    }

    /// Conjunction of all four predicates.
    pub fn matches(&self, player: &WorkingPlayer) -> bool {
        Dimension::ALL.iter().all(|d| self.admits(*d, player))
    }
}

// ---------------------------------------------------------------------------
// FilteredView
// ---------------------------------------------------------------------------

/// Indices into the working table of the rows passing the filter, in table
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    indices: Vec<usize>,
}

impl FilteredView {
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn rows<'a>(&self, table: &'a WorkingTable) -> Vec<&'a WorkingPlayer> {
        self.indices.iter().map(|&i| &table.players[i]).collect()
    }

    /// Keep only the rows that also pass the given dimensions.
    pub fn refine(&self, table: &WorkingTable, state: &FilterState, dims: &[Dimension]) -> Self {
        FilteredView {
            indices: self
                .indices
                .iter()
                .copied()
                .filter(|&i| dims.iter().all(|d| state.admits(*d, &table.players[i])))
                .collect(),
        }
    }
}

/// Filter the working table by every dimension of `state`.
pub fn apply(table: &WorkingTable, state: &FilterState) -> FilteredView {
    FilteredView {
        indices: table
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| state.matches(p))
            .map(|(i, _)| i)
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::derive;
    use crate::derive::tests::{abc_table, player};
    use crate::normalize::PlayerTable;

    fn names(table: &WorkingTable, view: &FilteredView) -> Vec<String> {
        view.rows(table)
            .iter()
            .map(|p| p.player.web_name.clone())
            .collect()
    }

    /// Eight players over three positions, three teams, varied value/cost.
    fn league() -> WorkingTable {
        derive(PlayerTable {
            players: vec![
                player(1, "Raya", "Goalkeeper", "Arsenal", 4.2, 50),
                player(2, "Saliba", "Defender", "Arsenal", 6.1, 60),
                player(3, "Saka", "Midfielder", "Arsenal", 8.8, 90),
                player(4, "Martinez", "Goalkeeper", "Aston Villa", 5.0, 50),
                player(5, "Watkins", "Forward", "Aston Villa", 7.3, 85),
                player(6, "Isak", "Forward", "Newcastle", 9.9, 85),
                player(7, "Trippier", "Defender", "Newcastle", 3.1, 65),
                player(8, "Gordon", "Midfielder", "Newcastle", 6.6, 70),
            ],
            ..PlayerTable::default()
        })
    }

    #[test]
    fn interval_spanning_and_contains() {
        let iv = Interval::spanning([3.0, -1.0, 7.5]);
        assert_eq!(iv, Interval::new(-1.0, 7.5));
        assert!(iv.contains(-1.0));
        assert!(iv.contains(7.5));
        assert!(!iv.contains(7.6));
        assert_eq!(Interval::spanning(std::iter::empty()), Interval::new(0.0, 0.0));
    }

    #[test]
    fn interval_bounds_stay_inside_domain_and_ordered() {
        let domain = Interval::new(1.0, 10.0);
        let iv = Interval::new(3.0, 6.0);
        assert_eq!(iv.with_lo(-5.0, &domain), Interval::new(1.0, 6.0));
        assert_eq!(iv.with_lo(8.0, &domain), Interval::new(6.0, 6.0));
        assert_eq!(iv.with_hi(42.0, &domain), Interval::new(3.0, 10.0));
        assert_eq!(iv.with_hi(2.0, &domain), Interval::new(3.0, 3.0));
    }

    #[test]
    fn stepping_lands_on_decimal_grid() {
        let domain = Interval::new(3.0, 9.0);
        let mut iv = domain;
        for _ in 0..3 {
            iv = iv.step_lo(1, 0.1, &domain);
        }
        assert_eq!(iv.lo, 3.3);
        assert!(iv.contains(3.3));

        // Accumulated repeated steps agree with one big step.
        let mut hi = domain;
        for _ in 0..7 {
            hi = hi.step_hi(-1, 0.1, &domain);
        }
        assert_eq!(hi.hi, domain.step_hi(-7, 0.1, &domain).hi);
        assert_eq!(hi.hi, 8.3);
    }

    #[test]
    fn stepping_off_grid_bound_snaps_and_clamps() {
        let domain = Interval::new(45.0, 60.0);
        let iv = Interval::new(47.4, 60.0);
        assert_eq!(iv.step_lo(1, 1.0, &domain).lo, 48.0);
        assert_eq!(iv.step_lo(-10, 1.0, &domain).lo, 45.0);
        assert_eq!(iv.step_hi(-100, 1.0, &domain), Interval::new(47.4, 47.4));
    }

    #[test]
    fn selection_toggle_adds_and_removes() {
        let sel = Selection::all().toggled(&Choice::All);
        assert!(sel.chosen().is_empty());
        let sel = sel.toggled(&Choice::item("Forward"));
        assert!(sel.admits("Forward"));
        assert!(!sel.admits("Defender"));
        let sel = sel.toggled(&Choice::item("Forward"));
        assert!(!sel.admits("Forward"));
    }

    #[test]
    fn sentinel_wins_over_partial_selection() {
        let table = league();
        let domain = &table.domain.positions;
        let partial = Selection::of(["Forward"]);
        let with_sentinel = partial.toggled(&Choice::All);
        assert_eq!(partial.effective(domain), vec!["Forward"]);
        assert_eq!(
            with_sentinel.effective(domain),
            domain.iter().map(String::as_str).collect::<Vec<_>>()
        );
    }

    #[test]
    fn sentinel_equals_full_domain() {
        let table = league();
        let initial = FilterState::initial(&table.domain);
        let explicit = initial
            .with_positions(Selection::of(table.domain.positions.clone()))
            .with_teams(Selection::of(table.domain.teams.clone()));
        assert_eq!(apply(&table, &initial), apply(&table, &explicit));
        assert_eq!(apply(&table, &initial).len(), table.len());
    }

    #[test]
    fn empty_selection_yields_empty_view() {
        let table = league();
        let state = FilterState::initial(&table.domain).with_teams(Selection::of(Vec::<String>::new()));
        assert!(apply(&table, &state).is_empty());
    }

    #[test]
    fn apply_is_pure() {
        let table = league();
        let state = FilterState::initial(&table.domain)
            .with_positions(Selection::of(["Forward", "Midfielder"]))
            .with_cost(Interval::new(70.0, 90.0));
        let first = apply(&table, &state);
        let second = apply(&table, &state);
        assert_eq!(first, second);
        assert_eq!(names(&table, &first), vec!["Saka", "Watkins", "Isak", "Gordon"]);
    }

    #[test]
    fn composition_order_does_not_matter() {
        let table = league();
        let state = FilterState::initial(&table.domain)
            .with_positions(Selection::of(["Defender", "Midfielder", "Forward"]))
            .with_teams(Selection::of(["Arsenal", "Newcastle"]))
            .with_value(Interval::new(5.0, 9.0))
            .with_cost(Interval::new(55.0, 90.0));

        let all_at_once = apply(&table, &state);

        let everything = FilteredView {
            indices: (0..table.len()).collect(),
        };
        let categorical_first = everything
            .refine(&table, &state, &[Dimension::Position, Dimension::Team])
            .refine(&table, &state, &[Dimension::Value, Dimension::Cost]);
        let ranges_first = everything
            .refine(&table, &state, &[Dimension::Cost, Dimension::Value])
            .refine(&table, &state, &[Dimension::Team, Dimension::Position]);

        assert_eq!(all_at_once, categorical_first);
        assert_eq!(all_at_once, ranges_first);
        assert_eq!(names(&table, &all_at_once), vec!["Saliba", "Saka", "Gordon"]);
    }

    #[test]
    fn widening_never_shrinks_and_narrowing_never_grows() {
        let table = league();
        let domain = table.domain.clone();
        let base = FilterState::initial(&domain).with_value(Interval::new(5.0, 8.0));
        let base_len = apply(&table, &base).len();

        let mut lo = 5.0;
        while lo > domain.value.lo {
            lo -= 0.5;
            let wider = base.with_value(base.value.with_lo(lo, &domain.value));
            assert!(apply(&table, &wider).len() >= base_len);
        }

        let mut prev = apply(&table, &FilterState::initial(&domain)).len();
        let mut hi = domain.cost.hi;
        while hi > domain.cost.lo {
            hi -= 5.0;
            let narrower = FilterState::initial(&domain)
                .with_cost(domain.cost.with_hi(hi, &domain.cost));
            let len = apply(&table, &narrower).len();
            assert!(len <= prev);
            prev = len;
        }
    }

    #[test]
    fn abc_value_range_keeps_only_b_and_domain_is_unchanged() {
        let table = abc_table();
        let state = FilterState::initial(&table.domain).with_value(Interval::new(6.0, 10.0));
        let view = apply(&table, &state);
        assert_eq!(names(&table, &view), vec!["B"]);
        assert_eq!(table.domain.positions, vec!["Forward", "Midfielder"]);
        assert_eq!(table.domain.teams, vec!["X", "Y"]);
    }

    #[test]
    fn abc_cost_range_can_empty_the_view() {
        let table = abc_table();
        let state = FilterState::initial(&table.domain).with_cost(Interval::new(0.0, 1.0));
        assert!(apply(&table, &state).is_empty());
    }
}
