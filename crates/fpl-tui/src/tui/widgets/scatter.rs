// Scatter chart widget: draws a `ScatterPlot` model with ratatui's Chart.
//
// One dataset per (team, size tier). Team colour comes from the palette by
// domain index; size tier picks the marker. Reference lines are drawn as
// two-point line datasets.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph, Wrap};
use ratatui::Frame;

use fpl_core::charts::{ScatterPlot, SizeTier};
use fpl_core::filter::Interval;

/// Fixed team palette; indexed by a team's position in the domain.
const TEAM_PALETTE: [Color; 20] = [
    Color::Red,
    Color::LightBlue,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::LightRed,
    Color::Blue,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightMagenta,
    Color::LightCyan,
    Color::Rgb(255, 140, 0),
    Color::Rgb(128, 0, 128),
    Color::Rgb(0, 128, 128),
    Color::Rgb(165, 42, 42),
    Color::Rgb(255, 192, 203),
    Color::Rgb(128, 128, 0),
    Color::Rgb(0, 0, 128),
    Color::Rgb(192, 192, 192),
];

pub fn team_color(team_index: usize) -> Color {
    TEAM_PALETTE[team_index % TEAM_PALETTE.len()]
}

pub fn tier_marker(tier: SizeTier) -> Marker {
    match tier {
        SizeTier::Small => Marker::Braille,
        SizeTier::Medium => Marker::Dot,
        SizeTier::Large => Marker::Block,
    }
}

/// Three axis labels: low end, midpoint, high end.
pub fn axis_labels(bounds: &Interval) -> Vec<String> {
    let mid = (bounds.lo + bounds.hi) / 2.0;
    [bounds.lo, mid, bounds.hi].iter().map(|x| format_tick(*x)).collect()
}

fn format_tick(x: f64) -> String {
    if x.abs() >= 1000.0 {
        format!("{x:.0}")
    } else {
        format!("{x:.1}")
    }
}

/// Render the chart plus its caption.
pub fn render(frame: &mut Frame, area: Rect, plot: &ScatterPlot) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(2)])
        .split(area);

    let caption = Paragraph::new(Span::styled(
        plot.caption,
        Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
    ))
    .wrap(Wrap { trim: true });
    frame.render_widget(caption, sections[1]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(plot.title.clone()).style(Style::default().add_modifier(Modifier::BOLD)));

    if plot.is_empty() {
        let paragraph = Paragraph::new("No players match the current filters.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, sections[0]);
        return;
    }

    let guides: Vec<[(f64, f64); 2]> = plot
        .reference_lines
        .iter()
        .map(|line| line.endpoints(&plot.x_bounds, &plot.y_bounds))
        .collect();

    let mut named: Vec<usize> = Vec::new();
    let mut datasets: Vec<Dataset> = plot
        .series
        .iter()
        .map(|series| {
            let mut dataset = Dataset::default()
                .marker(tier_marker(series.tier))
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(team_color(series.team_index)))
                .data(&series.points);
            if !named.contains(&series.team_index) {
                named.push(series.team_index);
                dataset = dataset.name(series.team.clone());
            }
            dataset
        })
        .collect();

    datasets.extend(plot.reference_lines.iter().zip(guides.iter()).map(|(line, ends)| {
        Dataset::default()
            .name(line.label.clone())
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&ends[..])
    }));

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(plot.x_label.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds([plot.x_bounds.lo, plot.x_bounds.hi])
                .labels(axis_labels(&plot.x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title(plot.y_label.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds([plot.y_bounds.lo, plot.y_bounds.hi])
                .labels(axis_labels(&plot.y_bounds)),
        )
        .legend_position(Some(LegendPosition::TopRight))
        .hidden_legend_constraints((Constraint::Ratio(1, 3), Constraint::Ratio(1, 2)));

    frame.render_widget(chart, sections[0]);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
