// Status bar widget: view counts, data provenance, tab indicator.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::protocol::TabId;

/// Render the status bar into the given area.
///
/// Layout: [shown/total] [dropped] [unmapped] | [tab bar] | [fetched at]
pub fn render(frame: &mut Frame, area: Rect, app: &AppState, active: TabId) {
    let mut spans = vec![Span::styled(
        format!(" {} ", counts_text(app)),
        Style::default().fg(Color::White),
    )];

    let unmapped = app.controller.working().unmapped;
    if unmapped > 0 {
        spans.push(Span::styled(
            format!("{unmapped} unmapped "),
            Style::default().fg(Color::Yellow),
        ));
    }

    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
    spans.extend(tab_spans(active));
    spans.push(Span::styled(
        format!(
            "| {} @ {}",
            app.provenance.source,
            app.provenance.fetched_at.format("%H:%M UTC")
        ),
        Style::default().fg(Color::Gray),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// "12/560 players | 40 dropped"
pub fn counts_text(app: &AppState) -> String {
    let working = app.controller.working();
    format!(
        "{}/{} players | {} dropped",
        app.controller.view().len(),
        working.len(),
        working.dropped
    )
}

/// Tab indicator spans with the active tab highlighted.
pub fn tab_spans(active: TabId) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for tab in TabId::ALL {
        let style = if tab == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}]", tab_label(tab)), style));
        spans.push(Span::raw(" "));
    }
    spans
}

pub fn tab_label(tab: TabId) -> &'static str {
    match tab {
        TabId::PointsByCost => "1:Points/Cost",
        TabId::Transfers => "2:Transfers",
        TabId::Bonus => "3:Bonus",
        TabId::Players => "4:Players",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
