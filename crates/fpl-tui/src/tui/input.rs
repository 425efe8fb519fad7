// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the event
// loop, or into local ViewState mutations (focus, cursors, tabs, scroll).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::ViewState;
use crate::app::AppState;
use crate::protocol::{Action, Bound, Focus, ListFilter, RangeFilter, TabId, UserCommand};

/// Bound moves per PageUp/PageDown press.
const PAGE_STEPS: i32 = 10;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press changes the dashboard's
/// data or ends the session. Returns `None` when it was handled locally by
/// mutating `ViewState`.
pub fn handle_key(key_event: KeyEvent, view: &mut ViewState, app: &AppState) -> Option<UserCommand> {
    // Windows reports Release as well as Press.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c') {
        return Some(UserCommand::Quit);
    }

    if view.confirm_quit {
        return handle_confirm_quit(key_event, view);
    }

    match key_event.code {
        KeyCode::Tab => {
            view.focus = view.focus.next();
            None
        }
        KeyCode::BackTab => {
            view.focus = view.focus.prev();
            None
        }

        KeyCode::Char('1') => select_tab(view, TabId::PointsByCost),
        KeyCode::Char('2') => select_tab(view, TabId::Transfers),
        KeyCode::Char('3') => select_tab(view, TabId::Bonus),
        KeyCode::Char('4') => select_tab(view, TabId::Players),

        KeyCode::Char('j') => {
            let max = app.controller.view().len().saturating_sub(1);
            view.players_scroll = (view.players_scroll + 1).min(max);
            None
        }
        KeyCode::Char('k') => {
            view.players_scroll = view.players_scroll.saturating_sub(1);
            None
        }

        KeyCode::Esc => {
            view.players_scroll = 0;
            Some(UserCommand::Apply(Action::ResetFilters))
        }

        KeyCode::Char('q') => {
            view.confirm_quit = true;
            None
        }

        _ => handle_focused(key_event.code, view, app),
    }
}

fn select_tab(view: &mut ViewState, tab: TabId) -> Option<UserCommand> {
    view.active_tab = tab;
    None
}

/// Keys whose meaning depends on the focused sidebar control.
fn handle_focused(code: KeyCode, view: &mut ViewState, app: &AppState) -> Option<UserCommand> {
    match view.focus {
        Focus::Positions => handle_list(code, view, app, ListFilter::Position),
        Focus::Teams => handle_list(code, view, app, ListFilter::Team),
        Focus::Value => handle_range(code, view, RangeFilter::Value),
        Focus::Cost => handle_range(code, view, RangeFilter::Cost),
        Focus::BonusStat => match code {
            KeyCode::Right | KeyCode::Down => {
                Some(UserCommand::Apply(Action::CycleBonusStat { forward: true }))
            }
            KeyCode::Left | KeyCode::Up => {
                Some(UserCommand::Apply(Action::CycleBonusStat { forward: false }))
            }
            _ => None,
        },
    }
}

fn handle_list(
    code: KeyCode,
    view: &mut ViewState,
    app: &AppState,
    list: ListFilter,
) -> Option<UserCommand> {
    let entries = app.list_entries(list);
    let cursor = view.cursor_mut(list);
    match code {
        KeyCode::Up => {
            *cursor = cursor.saturating_sub(1);
            None
        }
        KeyCode::Down => {
            *cursor = (*cursor + 1).min(entries.len().saturating_sub(1));
            None
        }
        KeyCode::Char(' ') | KeyCode::Enter => entries.get(*cursor).map(|choice| {
            UserCommand::Apply(Action::Toggle {
                list,
                choice: choice.clone(),
            })
        }),
        _ => None,
    }
}

fn handle_range(code: KeyCode, view: &mut ViewState, range: RangeFilter) -> Option<UserCommand> {
    let bound = view.bound_mut(range);
    let steps = match code {
        KeyCode::Up => {
            *bound = Bound::Lo;
            return None;
        }
        KeyCode::Down => {
            *bound = Bound::Hi;
            return None;
        }
        KeyCode::Left => -1,
        KeyCode::Right => 1,
        KeyCode::PageDown => -PAGE_STEPS,
        KeyCode::PageUp => PAGE_STEPS,
        _ => return None,
    };
    Some(UserCommand::Apply(Action::MoveBound {
        range,
        bound: *bound,
        steps,
    }))
}

/// While the quit dialog is open only y/q confirm and n/Esc cancel.
fn handle_confirm_quit(key_event: KeyEvent, view: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view.confirm_quit = false;
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::sample_app;
    use crossterm::event::{KeyEventState, KeyModifiers};
    use fpl_core::filter::Choice;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    // -- Focus and tabs --

    #[test]
    fn tab_and_backtab_move_focus() {
        let app = sample_app();
        let mut view = ViewState::default();
        assert!(handle_key(key(KeyCode::Tab), &mut view, &app).is_none());
        assert_eq!(view.focus, Focus::Teams);
        handle_key(key(KeyCode::BackTab), &mut view, &app);
        handle_key(key(KeyCode::BackTab), &mut view, &app);
        assert_eq!(view.focus, Focus::BonusStat);
    }

    #[test]
    fn number_keys_switch_tabs() {
        let app = sample_app();
        let mut view = ViewState::default();
        handle_key(key(KeyCode::Char('4')), &mut view, &app);
        assert_eq!(view.active_tab, TabId::Players);
        handle_key(key(KeyCode::Char('2')), &mut view, &app);
        assert_eq!(view.active_tab, TabId::Transfers);
    }

    // -- Lists --

    #[test]
    fn list_cursor_is_clamped() {
        let app = sample_app();
        let mut view = ViewState::default();
        handle_key(key(KeyCode::Up), &mut view, &app);
        assert_eq!(view.position_cursor, 0);
        for _ in 0..20 {
            handle_key(key(KeyCode::Down), &mut view, &app);
        }
        // Sentinel plus four positions.
        assert_eq!(view.position_cursor, 4);
    }

    #[test]
    fn space_toggles_entry_under_cursor() {
        let app = sample_app();
        let mut view = ViewState::default();
        let cmd = handle_key(key(KeyCode::Char(' ')), &mut view, &app);
        assert_eq!(
            cmd,
            Some(UserCommand::Apply(Action::Toggle {
                list: ListFilter::Position,
                choice: Choice::All,
            }))
        );

        view.focus = Focus::Teams;
        handle_key(key(KeyCode::Down), &mut view, &app);
        let cmd = handle_key(key(KeyCode::Enter), &mut view, &app);
        assert_eq!(
            cmd,
            Some(UserCommand::Apply(Action::Toggle {
                list: ListFilter::Team,
                choice: Choice::item("X"),
            }))
        );
        assert_eq!(view.position_cursor, 0, "team cursor is independent");
    }

    // -- Ranges --

    #[test]
    fn arrows_pick_bound_and_move_it() {
        let app = sample_app();
        let mut view = ViewState {
            focus: Focus::Cost,
            ..ViewState::default()
        };
        handle_key(key(KeyCode::Down), &mut view, &app);
        assert_eq!(view.cost_bound, Bound::Hi);

        let cmd = handle_key(key(KeyCode::Left), &mut view, &app);
        assert_eq!(
            cmd,
            Some(UserCommand::Apply(Action::MoveBound {
                range: RangeFilter::Cost,
                bound: Bound::Hi,
                steps: -1,
            }))
        );

        handle_key(key(KeyCode::Up), &mut view, &app);
        let cmd = handle_key(key(KeyCode::PageUp), &mut view, &app);
        assert_eq!(
            cmd,
            Some(UserCommand::Apply(Action::MoveBound {
                range: RangeFilter::Cost,
                bound: Bound::Lo,
                steps: 10,
            }))
        );
        assert_eq!(view.value_bound, Bound::Lo, "value bound untouched");
    }

    #[test]
    fn bonus_focus_cycles_statistic() {
        let app = sample_app();
        let mut view = ViewState {
            focus: Focus::BonusStat,
            ..ViewState::default()
        };
        assert_eq!(
            handle_key(key(KeyCode::Right), &mut view, &app),
            Some(UserCommand::Apply(Action::CycleBonusStat { forward: true }))
        );
        assert_eq!(
            handle_key(key(KeyCode::Left), &mut view, &app),
            Some(UserCommand::Apply(Action::CycleBonusStat { forward: false }))
        );
    }

    // -- Scroll, reset, quit --

    #[test]
    fn players_scroll_is_bounded_by_view() {
        let app = sample_app();
        let mut view = ViewState::default();
        for _ in 0..10 {
            handle_key(key(KeyCode::Char('j')), &mut view, &app);
        }
        assert_eq!(view.players_scroll, 3);
        handle_key(key(KeyCode::Char('k')), &mut view, &app);
        assert_eq!(view.players_scroll, 2);
    }

    #[test]
    fn esc_resets_filters() {
        let app = sample_app();
        let mut view = ViewState {
            players_scroll: 2,
            ..ViewState::default()
        };
        let cmd = handle_key(key(KeyCode::Esc), &mut view, &app);
        assert_eq!(cmd, Some(UserCommand::Apply(Action::ResetFilters)));
        assert_eq!(view.players_scroll, 0);
    }

    #[test]
    fn q_asks_before_quitting() {
        let app = sample_app();
        let mut view = ViewState::default();
        assert!(handle_key(key(KeyCode::Char('q')), &mut view, &app).is_none());
        assert!(view.confirm_quit);

        // Other keys are blocked while the dialog is open.
        assert!(handle_key(key(KeyCode::Char(' ')), &mut view, &app).is_none());
        assert!(handle_key(key(KeyCode::Char('n')), &mut view, &app).is_none());
        assert!(!view.confirm_quit);

        handle_key(key(KeyCode::Char('q')), &mut view, &app);
        assert_eq!(
            handle_key(key(KeyCode::Char('y')), &mut view, &app),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn ctrl_c_quits_immediately() {
        let app = sample_app();
        let mut view = ViewState::default();
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut view, &app),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn release_events_are_ignored() {
        let app = sample_app();
        let mut view = ViewState::default();
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(handle_key(release, &mut view, &app).is_none());
        assert!(!view.confirm_quit);
    }
}
