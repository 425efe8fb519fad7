// Players panel: the filtered view as a table, best value first.
//
// Columns: #, Name, Pos, Team, Cost, Value, Pts, Sel%, Net

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use fpl_core::derive::WorkingPlayer;

/// Render the players table, skipping the first `scroll` rows.
pub fn render(frame: &mut Frame, area: Rect, players: &[&WorkingPlayer], scroll: usize, currency_prefix: &str) {
    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Name"),
        Cell::from("Pos"),
        Cell::from("Team"),
        Cell::from("Cost"),
        Cell::from("Value"),
        Cell::from("Pts"),
        Cell::from("Sel%"),
        Cell::from("Net"),
    ])
    .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let scroll = scroll.min(players.len().saturating_sub(1));
    let rows: Vec<Row> = players
        .iter()
        .enumerate()
        .skip(scroll)
        .map(|(i, p)| {
            let net = p.player.net_transfers();
            let net_style = if net < 0 {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Green)
            };
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(p.player.web_name.clone()),
                Cell::from(short_position(p.position_label())),
                Cell::from(p.team_label().to_string()),
                Cell::from(format!("{currency_prefix}{}", p.player.now_cost)),
                Cell::from(format!("{:.1}", p.value)),
                Cell::from(format!("{}", p.player.total_points)),
                Cell::from(format!("{:.1}", p.player.selected_by_percent)),
                Cell::from(format!("{net:+}")).style(net_style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(14),
        Constraint::Length(4),
        Constraint::Min(14),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Players ({})", players.len())),
        );

    frame.render_widget(table, area);
}

/// Three-letter position code; unknown labels pass through.
pub fn short_position(label: &str) -> &str {
    match label {
        "Goalkeeper" => "GKP",
        "Defender" => "DEF",
        "Midfielder" => "MID",
        "Forward" => "FWD",
        other => other,
    }
}
