// Filter sidebar: position/team multi-selects, value/cost ranges and the
// bonus statistic picker.
//
// Lists always show the full domain. The focused control gets a yellow
// border; the cursor is only highlighted while its list has focus.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use fpl_core::filter::{Choice, Interval};

use crate::app::AppState;
use crate::protocol::{Bound, Focus, ListFilter, RangeFilter};
use crate::tui::ViewState;

/// Render a multi-select list.
pub fn render_list(frame: &mut Frame, area: Rect, app: &AppState, view: &ViewState, list: ListFilter) {
    let (title, focus, cursor) = match list {
        ListFilter::Position => ("Position", Focus::Positions, view.position_cursor),
        ListFilter::Team => ("Team", Focus::Teams, view.team_cursor),
    };
    let focused = view.focus == focus;
    let sentinel_on = app.is_chosen(list, &Choice::All);

    let items: Vec<ListItem> = app
        .list_entries(list)
        .iter()
        .map(|choice| {
            let chosen = app.is_chosen(list, choice);
            let implied = sentinel_on && !chosen;
            let mark = checkbox(chosen, implied);
            let label = match choice {
                Choice::All => "Select all",
                Choice::Item(label) => label.as_str(),
            };
            let style = if implied {
                Style::default().add_modifier(Modifier::DIM)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{mark} "), style),
                Span::styled(label.to_string(), style),
            ]))
        })
        .collect();

    let mut list_widget = List::new(items).block(control_block(title, focused));
    if focused {
        list_widget = list_widget
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
    }

    let mut state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list_widget, area, &mut state);
}

/// `[x]` chosen, `[~]` let through by "Select all", `[ ]` excluded.
pub fn checkbox(chosen: bool, implied: bool) -> &'static str {
    match (chosen, implied) {
        (true, _) => "[x]",
        (false, true) => "[~]",
        (false, false) => "[ ]",
    }
}

/// Render a range control: both bounds and a bar over the domain.
pub fn render_range(frame: &mut Frame, area: Rect, app: &AppState, view: &ViewState, range: RangeFilter) {
    let (title, focus, active) = match range {
        RangeFilter::Value => ("Value", Focus::Value, view.value_bound),
        RangeFilter::Cost => ("Cost", Focus::Cost, view.cost_bound),
    };
    let focused = view.focus == focus;
    let (selected, domain) = app.range(range);
    let prefix = app.config.display.currency_prefix.as_str();

    let bound_style = |bound: Bound| {
        if focused && bound == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    };

    let bounds = Line::from(vec![
        Span::styled(format_bound(range, selected.lo, prefix), bound_style(Bound::Lo)),
        Span::raw(" to "),
        Span::styled(format_bound(range, selected.hi, prefix), bound_style(Bound::Hi)),
    ]);
    let inner_width = area.width.saturating_sub(2) as usize;
    let bar = Line::from(Span::styled(
        range_bar(inner_width, &selected, &domain),
        Style::default().fg(Color::Cyan),
    ));

    let paragraph = Paragraph::new(vec![bounds, bar]).block(control_block(title, focused));
    frame.render_widget(paragraph, area);
}

pub fn format_bound(range: RangeFilter, x: f64, currency_prefix: &str) -> String {
    match range {
        RangeFilter::Value => format!("{x:.1}"),
        RangeFilter::Cost => format!("{currency_prefix}{x:.0}"),
    }
}

/// A `width`-cell bar over `domain`, filled where `selected` covers it.
pub fn range_bar(width: usize, selected: &Interval, domain: &Interval) -> String {
    let span = domain.span();
    (0..width)
        .map(|i| {
            if span <= 0.0 {
                return '█';
            }
            let lo = domain.lo + span * i as f64 / width as f64;
            let hi = domain.lo + span * (i + 1) as f64 / width as f64;
            if selected.lo <= hi && lo <= selected.hi {
                '█'
            } else {
                '─'
            }
        })
        .collect()
}

/// Render the bonus statistic single-select.
pub fn render_bonus_stat(frame: &mut Frame, area: Rect, app: &AppState, view: &ViewState) {
    let focused = view.focus == Focus::BonusStat;
    let line = Line::from(vec![
        Span::styled("◀ ", Style::default().fg(Color::Gray)),
        Span::styled(
            app.bonus_stat.label(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", Style::default().fg(Color::Gray)),
    ]);
    let paragraph = Paragraph::new(line).block(control_block("Bonus Statistic", focused));
    frame.render_widget(paragraph, area);
}

fn control_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::sample_app;
    use crate::protocol::Action;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn checkbox_marks() {
        assert_eq!(checkbox(true, false), "[x]");
        assert_eq!(checkbox(false, true), "[~]");
        assert_eq!(checkbox(false, false), "[ ]");
    }

    #[test]
    fn range_bar_fills_selected_part() {
        let domain = Interval::new(0.0, 10.0);
        assert_eq!(range_bar(10, &domain, &domain), "██████████");
        assert_eq!(range_bar(10, &Interval::new(0.0, 4.5), &domain), "█████─────");
        assert_eq!(range_bar(4, &Interval::new(5.0, 5.0), &Interval::new(5.0, 5.0)), "████");
        assert_eq!(range_bar(0, &domain, &domain), "");
    }

    #[test]
    fn bounds_are_formatted_per_range() {
        assert_eq!(format_bound(RangeFilter::Value, 6.24, "$"), "6.2");
        assert_eq!(format_bound(RangeFilter::Cost, 60.0, "£"), "£60");
    }

    #[test]
    fn list_renders_sentinel_and_domain() {
        let app = sample_app();
        let view = ViewState::default();
        let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();
        terminal
            .draw(|frame| render_list(frame, frame.area(), &app, &view, ListFilter::Position))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("[x] Select all"));
        assert!(text.contains("[~] Forward"));
    }

    #[test]
    fn list_reflects_explicit_choices() {
        let mut app = sample_app();
        app.handle(Action::Toggle {
            list: ListFilter::Team,
            choice: Choice::All,
        });
        app.handle(Action::Toggle {
            list: ListFilter::Team,
            choice: Choice::item("Y"),
        });
        let view = ViewState::default();
        let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();
        terminal
            .draw(|frame| render_list(frame, frame.area(), &app, &view, ListFilter::Team))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("[ ] Select all"));
        assert!(text.contains("[x] Y"));
        assert!(text.contains("[ ] X"));
    }

    #[test]
    fn range_and_bonus_render_without_panic() {
        let app = sample_app();
        let view = ViewState::default();
        let mut terminal = Terminal::new(TestBackend::new(34, 4)).unwrap();
        terminal
            .draw(|frame| render_range(frame, frame.area(), &app, &view, RangeFilter::Cost))
            .unwrap();
        assert!(buffer_text(&terminal).contains("$44 to $60"));

        let mut terminal = Terminal::new(TestBackend::new(34, 3)).unwrap();
        terminal
            .draw(|frame| render_bonus_stat(frame, frame.area(), &app, &view))
            .unwrap();
        assert!(buffer_text(&terminal).contains("Goals Scored"));
    }
}
