// Full-screen panels shown before the dashboard exists: the loading notice
// and the startup failure report.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// One line per link of the error chain, outermost first.
pub fn error_lines(err: &anyhow::Error) -> Vec<String> {
    err.chain()
        .enumerate()
        .map(|(i, cause)| {
            if i == 0 {
                cause.to_string()
            } else {
                format!("caused by: {cause}")
            }
        })
        .collect()
}

pub fn render_failure(frame: &mut Frame, area: Rect, err: &anyhow::Error) {
    let mut lines = vec![
        Line::from(Span::styled(
            "The dashboard could not start.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];
    lines.extend(error_lines(err).into_iter().map(Line::raw));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Press any key to exit. Details are in logs/fpl-dashboard.log.",
        Style::default().fg(Color::Gray),
    )));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Startup failed "),
    );
    frame.render_widget(paragraph, area);
}

pub fn render_loading(frame: &mut Frame, area: Rect, source: &str) {
    let paragraph = Paragraph::new(vec![
        Line::raw(""),
        Line::from(Span::styled(
            "Loading FPL data...",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(source.to_string(), Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
