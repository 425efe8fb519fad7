// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Title / subtitle (2 rows)                         |
// +--------------------------------------------------+
// | Metric cards: two rows of four (6 rows)           |
// +----------------+---------------------------------+
// | Filters (34)   | Main Panel (tabbed charts /     |
// |  Position      |   Players table)                |
// |  Team          |                                 |
// |  Value         |                                 |
// |  Cost          |                                 |
// |  Bonus stat    |                                 |
// +----------------+---------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the filter sidebar in columns.
pub const SIDEBAR_WIDTH: u16 = 34;

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    pub header: Rect,
    /// Eight card areas, row-major.
    pub cards: [Rect; 8],
    pub positions: Rect,
    pub teams: Rect,
    pub value: Rect,
    pub cost: Rect,
    pub bonus_stat: Rect,
    pub main_panel: Rect,
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(2), // title + subtitle
            Constraint::Length(6), // metric cards
            Constraint::Min(12),   // sidebar + main panel
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let cards = card_grid(vertical[2]);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(vertical[3]);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // positions: sentinel + four positions
            Constraint::Min(5),    // teams
            Constraint::Length(4), // value range
            Constraint::Length(4), // cost range
            Constraint::Length(3), // bonus statistic
        ])
        .split(horizontal[0]);

    AppLayout {
        status_bar: vertical[0],
        header: vertical[1],
        cards,
        positions: sidebar[0],
        teams: sidebar[1],
        value: sidebar[2],
        cost: sidebar[3],
        bonus_stat: sidebar[4],
        main_panel: horizontal[1],
        help_bar: vertical[4],
    }
}

fn card_grid(area: Rect) -> [Rect; 8] {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(area);
    let columns = |row: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(row)
    };
    let top = columns(rows[0]);
    let bottom = columns(rows[1]);
    [
        top[0], top[1], top[2], top[3], bottom[0], bottom[1], bottom[2], bottom[3],
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_area() -> Rect {
        Rect::new(0, 0, 160, 50)
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area());
        let mut rects = vec![
            ("status_bar", layout.status_bar),
            ("header", layout.header),
            ("positions", layout.positions),
            ("teams", layout.teams),
            ("value", layout.value),
            ("cost", layout.cost),
            ("bonus_stat", layout.bonus_stat),
            ("main_panel", layout.main_panel),
            ("help_bar", layout.help_bar),
        ];
        rects.extend(layout.cards.iter().map(|r| ("card", *r)));
        for (name, rect) in &rects {
            assert!(
                rect.width > 0 && rect.height > 0,
                "{} has zero area: {:?}",
                name,
                rect
            );
        }
    }

    #[test]
    fn bars_are_one_row() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.help_bar.y, 49);
    }

    #[test]
    fn cards_form_two_rows_of_four() {
        let layout = build_layout(test_area());
        let top_y = layout.cards[0].y;
        assert!(layout.cards[..4].iter().all(|r| r.y == top_y && r.height == 3));
        assert!(layout.cards[4..].iter().all(|r| r.y == top_y + 3));
        assert!(layout.cards[1].x > layout.cards[0].x);
    }

    #[test]
    fn sidebar_sits_left_of_main_panel() {
        let layout = build_layout(test_area());
        assert_eq!(layout.positions.width, SIDEBAR_WIDTH);
        assert_eq!(layout.main_panel.x, SIDEBAR_WIDTH);
        assert_eq!(layout.main_panel.width, 160 - SIDEBAR_WIDTH);
        assert!(layout.teams.y > layout.positions.y);
        assert!(layout.bonus_stat.y > layout.cost.y);
    }
}
