// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding purely visual state (focus, cursors,
// active tab, scroll). Key presses either mutate it directly or become an
// `Action` that the `AppState` applies before the next ~30 fps render tick.

pub mod input;
pub mod layout;
pub mod widgets;

use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{DefaultTerminal, Frame};
use tracing::{error, info};

use crate::app::AppState;
use crate::protocol::{Action, Bound, Focus, ListFilter, RangeFilter, TabId, UserCommand};

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state. Nothing here affects which players are shown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Sidebar control receiving arrow/toggle keys.
    pub focus: Focus,
    /// Which tab is active in the main panel.
    pub active_tab: TabId,
    pub position_cursor: usize,
    pub team_cursor: usize,
    /// Bound moved by the arrow keys on the Value control.
    pub value_bound: Bound,
    /// Bound moved by the arrow keys on the Cost control.
    pub cost_bound: Bound,
    /// First visible row of the Players panel.
    pub players_scroll: usize,
    /// Whether the quit confirmation dialog is showing.
    pub confirm_quit: bool,
}

impl ViewState {
    pub fn cursor_mut(&mut self, list: ListFilter) -> &mut usize {
        match list {
            ListFilter::Position => &mut self.position_cursor,
            ListFilter::Team => &mut self.team_cursor,
        }
    }

    pub fn bound_mut(&mut self, range: RangeFilter) -> &mut Bound {
        match range {
            RangeFilter::Value => &mut self.value_bound,
            RangeFilter::Cost => &mut self.cost_bound,
        }
    }
}

/// Apply an action to the app and keep the Players scroll inside the new view.
pub fn dispatch(app: &mut AppState, view: &mut ViewState, action: Action) {
    app.handle(action);
    let last_row = app.controller.view().len().saturating_sub(1);
    view.players_scroll = view.players_scroll.min(last_row);
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, app: &AppState, view: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, app, view.active_tab);
    render_header(frame, &layout, app);
    widgets::metrics::render(frame, &layout.cards, &app.cards());

    widgets::filters::render_list(frame, layout.positions, app, view, ListFilter::Position);
    widgets::filters::render_list(frame, layout.teams, app, view, ListFilter::Team);
    widgets::filters::render_range(frame, layout.value, app, view, RangeFilter::Value);
    widgets::filters::render_range(frame, layout.cost, app, view, RangeFilter::Cost);
    widgets::filters::render_bonus_stat(frame, layout.bonus_stat, app, view);

    match app.charts.for_tab(view.active_tab) {
        Some(plot) => widgets::scatter::render(frame, layout.main_panel, plot),
        None => widgets::players::render(
            frame,
            layout.main_panel,
            &app.ranked_players(),
            view.players_scroll,
            &app.config.display.currency_prefix,
        ),
    }

    render_help_bar(frame, &layout, view.focus);

    if view.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

fn render_header(frame: &mut Frame, layout: &AppLayout, app: &AppState) {
    let display = &app.config.display;
    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(
            format!(" {}", display.title),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}", display.subtitle),
            Style::default().fg(Color::Gray),
        )),
    ]);
    frame.render_widget(paragraph, layout.header);
}

/// Key hints for the focused control followed by the global keys.
pub fn help_text(focus: Focus) -> String {
    let local = match focus {
        Focus::Positions | Focus::Teams => "↑↓:Move Space:Toggle",
        Focus::Value | Focus::Cost => "↑↓:Bound ←→:Step PgUp/PgDn:x10",
        Focus::BonusStat => "←→:Statistic",
    };
    format!(" {local} | Tab:Next control | 1-4:Tabs | j/k:Scroll | Esc:Reset | q:Quit")
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, focus: Focus) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        help_text(focus),
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the terminal UI.
///
/// Draws a loading panel while `startup` runs. If startup fails the error
/// chain is shown until a key is pressed and the error is returned;
/// otherwise the dashboard runs until the user quits.
pub async fn run<F>(source: &str, startup: F) -> anyhow::Result<()>
where
    F: Future<Output = anyhow::Result<AppState>>,
{
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = drive(&mut terminal, source, startup).await;

    ratatui::restore();
    result
}

async fn drive<F>(terminal: &mut DefaultTerminal, source: &str, startup: F) -> anyhow::Result<()>
where
    F: Future<Output = anyhow::Result<AppState>>,
{
    let mut events = EventStream::new();

    terminal
        .draw(|frame| widgets::failure::render_loading(frame, frame.area(), source))
        .context("failed to draw loading panel")?;

    match startup.await {
        Ok(app) => event_loop(terminal, &mut events, app).await,
        Err(err) => {
            error!("Startup failed: {:#}", err);
            terminal
                .draw(|frame| widgets::failure::render_failure(frame, frame.area(), &err))
                .context("failed to draw failure panel")?;
            wait_for_key(&mut events).await;
            Err(err)
        }
    }
}

async fn event_loop(
    terminal: &mut DefaultTerminal,
    events: &mut EventStream,
    mut app: AppState,
) -> anyhow::Result<()> {
    let mut view = ViewState::default();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        match input::handle_key(key_event, &mut view, &app) {
                            Some(UserCommand::Quit) => {
                                info!("Quit requested");
                                break;
                            }
                            Some(UserCommand::Apply(action)) => dispatch(&mut app, &mut view, action),
                            None => {}
                        }
                    }
                    // Resize is picked up by the next draw.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        return Err(anyhow::Error::new(e).context("failed to read terminal input"));
                    }
                    None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal
                    .draw(|frame| render_frame(frame, &app, &view))
                    .context("failed to draw dashboard")?;
            }
        }
    }

    Ok(())
}

async fn wait_for_key(events: &mut EventStream) {
    while let Some(event) = events.next().await {
        match event {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break,
            Ok(_) => {}
            Err(_) => break,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
