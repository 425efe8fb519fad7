// Scatter plot models for the three dashboard charts.
//
// Pure data: the TUI turns a `ScatterPlot` into a ratatui `Chart`. Points are
// grouped into one series per (team, size tier) so colour and marker size can
// be set per series.

use std::fmt;
use std::str::FromStr;

use crate::derive::{Domain, WorkingPlayer};
use crate::filter::Interval;
use crate::normalize::Player;

// ---------------------------------------------------------------------------
// BonusStat
// ---------------------------------------------------------------------------

/// Statistic plotted on the x-axis of the bonus chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BonusStat {
    #[default]
    GoalsScored,
    GoalsConceded,
    Assists,
    CleanSheets,
    Saves,
    OwnGoals,
    PenaltiesSaved,
}

impl BonusStat {
    pub const ALL: [BonusStat; 7] = [
        BonusStat::GoalsScored,
        BonusStat::GoalsConceded,
        BonusStat::Assists,
        BonusStat::CleanSheets,
        BonusStat::Saves,
        BonusStat::OwnGoals,
        BonusStat::PenaltiesSaved,
    ];

    /// Column name in the bootstrap payload.
    pub fn column(self) -> &'static str {
        match self {
            BonusStat::GoalsScored => "goals_scored",
            BonusStat::GoalsConceded => "goals_conceded",
            BonusStat::Assists => "assists",
            BonusStat::CleanSheets => "clean_sheets",
            BonusStat::Saves => "saves",
            BonusStat::OwnGoals => "own_goals",
            BonusStat::PenaltiesSaved => "penalties_saved",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BonusStat::GoalsScored => "Goals Scored",
            BonusStat::GoalsConceded => "Goals Conceded",
            BonusStat::Assists => "Assists",
            BonusStat::CleanSheets => "Clean Sheets",
            BonusStat::Saves => "Saves",
            BonusStat::OwnGoals => "Own Goals",
            BonusStat::PenaltiesSaved => "Penalties Saved",
        }
    }

    pub fn value(self, player: &Player) -> i64 {
        match self {
            BonusStat::GoalsScored => player.goals_scored,
            BonusStat::GoalsConceded => player.goals_conceded,
            BonusStat::Assists => player.assists,
            BonusStat::CleanSheets => player.clean_sheets,
            BonusStat::Saves => player.saves,
            BonusStat::OwnGoals => player.own_goals,
            BonusStat::PenaltiesSaved => player.penalties_saved,
        }
    }

    fn index(self) -> usize {
        BonusStat::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        BonusStat::ALL[(self.index() + 1) % BonusStat::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let len = BonusStat::ALL.len();
        BonusStat::ALL[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for BonusStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for BonusStat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BonusStat::ALL
            .into_iter()
            .find(|stat| stat.column() == s)
            .ok_or_else(|| format!("unknown bonus statistic: {s}"))
    }
}

// ---------------------------------------------------------------------------
// Size tiers
// ---------------------------------------------------------------------------

/// Terminal stand-in for scatter point size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeTier {
    Small,
    Medium,
    Large,
}

/// Bucket `x` into thirds of `range`. A degenerate range maps to `Medium`.
pub fn size_tier(x: f64, range: &Interval) -> SizeTier {
    let span = range.span();
    if span <= 0.0 {
        return SizeTier::Medium;
    }
    let t = (x - range.lo) / span;
    if t < 1.0 / 3.0 {
        SizeTier::Small
    } else if t < 2.0 / 3.0 {
        SizeTier::Medium
    } else {
        SizeTier::Large
    }
}

// ---------------------------------------------------------------------------
// Plot model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    PointsByCost,
    TransfersAndPopularity,
    BonusPoints,
}

/// Points of one team at one size tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub team: String,
    /// Position of the team in the unfiltered domain; drives the colour.
    pub team_index: usize,
    pub tier: SizeTier,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A dashed guide line across the whole plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub orientation: Orientation,
    pub at: f64,
    pub label: String,
}

impl ReferenceLine {
    /// Two points spanning the plot along the line's direction.
    pub fn endpoints(&self, x_bounds: &Interval, y_bounds: &Interval) -> [(f64, f64); 2] {
        match self.orientation {
            Orientation::Horizontal => [(x_bounds.lo, self.at), (x_bounds.hi, self.at)],
            Orientation::Vertical => [(self.at, y_bounds.lo), (self.at, y_bounds.hi)],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    pub kind: ChartKind,
    pub title: String,
    pub caption: &'static str,
    pub x_label: String,
    pub y_label: String,
    pub x_bounds: Interval,
    pub y_bounds: Interval,
    pub series: Vec<Series>,
    pub reference_lines: Vec<ReferenceLine>,
}

impl ScatterPlot {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }
}

/// Axis and size accessors for one chart.
struct Axes<X, Y, S> {
    x: X,
    y: Y,
    size: S,
}

fn scatter<X, Y, S>(rows: &[&WorkingPlayer], domain: &Domain, axes: Axes<X, Y, S>) -> Vec<Series>
where
    X: Fn(&WorkingPlayer) -> f64,
    Y: Fn(&WorkingPlayer) -> f64,
    S: Fn(&WorkingPlayer) -> f64,
{
    let size_range = Interval::spanning(rows.iter().map(|p| (axes.size)(p)));

    let mut series: Vec<Series> = Vec::new();
    for p in rows {
        let team_index = domain.team_index(p.team_label()).unwrap_or(0);
        let tier = size_tier((axes.size)(p), &size_range);
        let point = ((axes.x)(p), (axes.y)(p));
        match series
            .iter_mut()
            .find(|s| s.team_index == team_index && s.tier == tier)
        {
            Some(s) => s.points.push(point),
            None => series.push(Series {
                team: p.team_label().to_string(),
                team_index,
                tier,
                points: vec![point],
            }),
        }
    }
    series.sort_by_key(|s| (s.team_index, s.tier));
    series
}

/// Axis bounds with a little padding so edge points stay visible.
fn padded_bounds(values: impl IntoIterator<Item = f64>) -> Interval {
    let mut values = values.into_iter().peekable();
    if values.peek().is_none() {
        return Interval::new(0.0, 1.0);
    }
    let raw = Interval::spanning(values);
    let pad = if raw.span() > 0.0 { raw.span() * 0.05 } else { 1.0 };
    Interval::new(raw.lo - pad, raw.hi + pad)
}

fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

fn bounds_of(series: &[Series]) -> (Interval, Interval) {
    let points = || series.iter().flat_map(|s| s.points.iter());
    (
        padded_bounds(points().map(|p| p.0)),
        padded_bounds(points().map(|p| p.1)),
    )
}

/// Cost vs total points, sized by value, with mean guide lines.
pub fn points_by_cost(rows: &[&WorkingPlayer], domain: &Domain) -> ScatterPlot {
    let series = scatter(
        rows,
        domain,
        Axes {
            x: |p: &WorkingPlayer| p.cost(),
            y: |p: &WorkingPlayer| p.player.total_points as f64,
            size: |p: &WorkingPlayer| p.value,
        },
    );
    let (x_bounds, y_bounds) = bounds_of(&series);

    let mut reference_lines = Vec::new();
    if let Some(avg) = mean(rows.iter().map(|p| p.player.total_points as f64)) {
        reference_lines.push(ReferenceLine {
            orientation: Orientation::Horizontal,
            at: avg,
            label: format!("mean points {avg:.1}"),
        });
    }
    if let Some(avg) = mean(rows.iter().map(|p| p.cost())) {
        reference_lines.push(ReferenceLine {
            orientation: Orientation::Vertical,
            at: avg,
            label: format!("mean cost {avg:.1}"),
        });
    }

    ScatterPlot {
        kind: ChartKind::PointsByCost,
        title: "Player Points by Cost".to_string(),
        caption: "Relationship between player cost and total points; larger markers carry more value.",
        x_label: "Player Cost".to_string(),
        y_label: "Total Points".to_string(),
        x_bounds,
        y_bounds,
        series,
        reference_lines,
    }
}

/// Selected-by % vs net transfers, sized by value.
pub fn transfers_and_popularity(rows: &[&WorkingPlayer], domain: &Domain) -> ScatterPlot {
    let series = scatter(
        rows,
        domain,
        Axes {
            x: |p: &WorkingPlayer| p.player.selected_by_percent,
            y: |p: &WorkingPlayer| p.player.net_transfers() as f64,
            size: |p: &WorkingPlayer| p.value,
        },
    );
    let (x_bounds, y_bounds) = bounds_of(&series);

    ScatterPlot {
        kind: ChartKind::TransfersAndPopularity,
        title: "Player Transfers and Popularity".to_string(),
        caption: "Player popularity assessed through ownership and net transfers.",
        x_label: "Selected By %".to_string(),
        y_label: "Net Transfers".to_string(),
        x_bounds,
        y_bounds,
        series,
        reference_lines: Vec::new(),
    }
}

/// Chosen statistic vs bonus points, sized by total points.
pub fn bonus_points(rows: &[&WorkingPlayer], domain: &Domain, stat: BonusStat) -> ScatterPlot {
    let series = scatter(
        rows,
        domain,
        Axes {
            x: move |p: &WorkingPlayer| stat.value(&p.player) as f64,
            y: |p: &WorkingPlayer| p.player.bonus as f64,
            size: |p: &WorkingPlayer| p.player.total_points as f64,
        },
    );
    let (x_bounds, y_bounds) = bounds_of(&series);

    ScatterPlot {
        kind: ChartKind::BonusPoints,
        title: "Bonus Points".to_string(),
        caption: "Bonus points against the selected statistic; larger markers scored more points.",
        x_label: stat.label().to_string(),
        y_label: "Bonus".to_string(),
        x_bounds,
        y_bounds,
        series,
        reference_lines: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
