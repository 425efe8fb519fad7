// Metric cards: the eight headline figures in two rows of four.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use fpl_core::metrics::{MetricCard, PLACEHOLDER};

/// Render each card into its area; `cards` and `areas` are in the same order.
pub fn render(frame: &mut Frame, areas: &[Rect; 8], cards: &[MetricCard; 8]) {
    for (card, area) in cards.iter().zip(areas.iter()) {
        render_card(frame, *area, card);
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &MetricCard) {
    let style = if card.text == PLACEHOLDER {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };

    let paragraph = Paragraph::new(Span::styled(card.text.clone(), style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(card.label),
        );
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::sample_app;
    use crate::tui::layout::build_layout;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn cards_show_labels_and_values() {
        let app = sample_app();
        let mut terminal = Terminal::new(TestBackend::new(160, 50)).unwrap();
        terminal
            .draw(|frame| {
                let layout = build_layout(frame.area());
                render(frame, &layout.cards, &app.cards());
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("MVP Player"));
        assert!(text.contains("Most Transferred Out"));
        assert!(text.contains("$60"));
    }
}
