pub mod state;
pub mod view;

use crate::config::Config;
use crate::logging;
use crate::storage::{self, LocalStorage};
use crate::store::TodoList;
use crate::tui::state::{AppState, InputMode};
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, time::Duration};

const HELP_MESSAGE: &str = "a: Add | e: Edit | Space: Done | d: Del | q: Quit";

pub fn run() -> Result<()> {
    // A broken config file should not keep the list from opening.
    let (config, config_err) = match Config::load() {
        Ok(cfg) => (cfg, None),
        Err(e) => {
            eprintln!("warning: ignoring config: {e:#}");
            (Config::default(), Some(e))
        }
    };

    let data_dir = LocalStorage::data_dir(config.data_dir.as_deref());
    if let Some(dir) = &data_dir {
        if let Err(e) = logging::init(log_level(&config), dir) {
            eprintln!("warning: file logging disabled: {e:#}");
        }
    }
    info!("afaire {} starting", env!("CARGO_PKG_VERSION"));
    // stderr is about to disappear behind the alternate screen; restate the
    // config warning where it survives.
    if let Some(e) = &config_err {
        warn!("config file ignored: {e:#}");
    }

    let store = match &data_dir {
        Some(dir) => TodoList::open(dir.join(storage::SLOT_FILE)),
        None => TodoList::detached(),
    };
    let mut app_state = AppState::new(store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app_state);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("afaire exiting");
    result
}

/// Config override first, then the build-profile default.
fn log_level(config: &Config) -> &str {
    config
        .log_level
        .as_deref()
        .unwrap_or(logging::default_level())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| view::draw(f, state))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Mouse(mouse_event) => match mouse_event.kind {
                    MouseEventKind::ScrollDown => state.next(),
                    MouseEventKind::ScrollUp => state.previous(),
                    _ => {}
                },
                Event::Key(key) => handle_key(state, key),
                _ => {} // Resize redraws on the next tick anyway
            }
        }

        if state.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Dialogs swallow every key while they are up. The notice wins over the
    // delete prompt, matching the draw order.
    if state.store.notice().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.store.dismiss_notice();
        }
        return;
    }
    if state.store.pending_delete().is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                state.store.confirm_delete();
                state.clamp_selection();
                state.message = format!("Deleted. {} left.", state.store.tasks().len());
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                state.store.cancel_delete();
                state.message = HELP_MESSAGE.to_string();
            }
            _ => {}
        }
        return;
    }

    match state.mode {
        InputMode::Normal => handle_normal_key(state, key),
        InputMode::Creating | InputMode::Editing => handle_input_key(state, key),
    }
}

fn handle_normal_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => state.should_quit = true,

        KeyCode::Char('a') => {
            state.mode = InputMode::Creating;
            state.reset_input();
            state.message = "New todo. Enter: save | Esc: cancel".to_string();
        }

        KeyCode::Char('e') => {
            if let Some(id) = state.selected_id() {
                let Some((text, editing)) =
                    state.store.task(&id).map(|t| (t.text.clone(), t.editing))
                else {
                    return;
                };
                if !editing {
                    state.store.toggle_edit(&id);
                }
                state.mode = InputMode::Editing;
                state.editing_id = Some(id);
                state.set_input(&text);
                state.message = "Edit todo. Enter: save | Esc: cancel".to_string();
            }
        }

        // Navigation
        KeyCode::Down | KeyCode::Char('j') => state.next(),
        KeyCode::Up | KeyCode::Char('k') => state.previous(),
        KeyCode::PageDown => state.jump_forward(10), // Jump 10 items
        KeyCode::PageUp => state.jump_backward(10),

        // Actions
        KeyCode::Char(' ') => {
            if let Some(id) = state.selected_id() {
                state.store.toggle_complete(&id);
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = state.selected_id() {
                state.store.request_delete(&id);
            }
        }
        _ => {}
    }
}

fn handle_input_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            if state.input_buffer.is_empty() {
                return;
            }
            let text = state.input_buffer.clone();
            let accepted = match state.mode {
                InputMode::Editing => match state.editing_id.clone() {
                    Some(id) => state.store.submit_edit(&text, &id),
                    None => false,
                },
                _ => state.store.add_task(&text),
            };
            // A rejected name leaves the form open so it can be fixed once
            // the notice is dismissed.
            if accepted {
                if state.mode == InputMode::Creating {
                    state.message = format!("Added. {} total.", state.store.tasks().len());
                } else {
                    state.message = "Saved.".to_string();
                }
                state.mode = InputMode::Normal;
                state.editing_id = None;
                state.reset_input();
            }
        }
        KeyCode::Esc => {
            // Cancelling an edit puts the row back in viewing mode.
            if state.mode == InputMode::Editing
                && let Some(id) = state.editing_id.take()
                && state.store.task(&id).is_some_and(|t| t.editing)
            {
                state.store.toggle_edit(&id);
            }
            state.mode = InputMode::Normal;
            state.reset_input();
            state.message = HELP_MESSAGE.to_string();
        }
        KeyCode::Char(c) => state.enter_char(c),
        KeyCode::Backspace => state.delete_char(),
        KeyCode::Left => state.move_cursor_left(),
        KeyCode::Right => state.move_cursor_right(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::{HELP_MESSAGE, handle_key, log_level};
    use crate::config::Config;
    use crate::store::TodoList;
    use crate::tui::state::{AppState, InputMode};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::empty()));
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    fn app() -> AppState {
        AppState::new(TodoList::detached())
    }

    #[test]
    fn add_flow_creates_a_task() {
        let mut state = app();
        press(&mut state, KeyCode::Char('a'));
        assert_eq!(state.mode, InputMode::Creating);
        type_text(&mut state, "water the plants");
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.mode, InputMode::Normal);
        assert_eq!(state.store.tasks().len(), 1);
        assert_eq!(state.store.tasks()[0].text, "water the plants");
    }

    #[test]
    fn empty_submit_keeps_the_form_open() {
        let mut state = app();
        press(&mut state, KeyCode::Char('a'));
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.mode, InputMode::Creating);
        assert!(state.store.tasks().is_empty());
    }

    #[test]
    fn duplicate_add_shows_notice_and_keeps_the_buffer() {
        let mut state = app();
        state.store.add_task("call mom");
        press(&mut state, KeyCode::Char('a'));
        type_text(&mut state, "call mom");
        press(&mut state, KeyCode::Enter);
        assert!(state.store.notice().is_some());
        assert_eq!(state.mode, InputMode::Creating);
        assert_eq!(state.input_buffer, "call mom");
        // The notice swallows keys until dismissed.
        press(&mut state, KeyCode::Char('x'));
        assert_eq!(state.input_buffer, "call mom");
        press(&mut state, KeyCode::Enter);
        assert!(state.store.notice().is_none());
        assert_eq!(state.mode, InputMode::Creating);
    }

    #[test]
    fn delete_asks_before_removing() {
        let mut state = app();
        state.store.add_task("old entry");
        press(&mut state, KeyCode::Char('d'));
        assert!(state.store.pending_delete().is_some());
        assert_eq!(state.store.tasks().len(), 1);
        press(&mut state, KeyCode::Char('n'));
        assert!(state.store.pending_delete().is_none());
        assert_eq!(state.store.tasks().len(), 1);
        press(&mut state, KeyCode::Char('d'));
        press(&mut state, KeyCode::Char('y'));
        assert!(state.store.tasks().is_empty());
    }

    #[test]
    fn space_toggles_completion() {
        let mut state = app();
        state.store.add_task("laundry");
        press(&mut state, KeyCode::Char(' '));
        assert!(state.store.tasks()[0].completed);
        press(&mut state, KeyCode::Char(' '));
        assert!(!state.store.tasks()[0].completed);
    }

    #[test]
    fn edit_flow_renames_and_leaves_edit_mode() {
        let mut state = app();
        state.store.add_task("tidy desk");
        press(&mut state, KeyCode::Char('e'));
        assert_eq!(state.mode, InputMode::Editing);
        assert_eq!(state.input_buffer, "tidy desk");
        assert!(state.store.tasks()[0].editing);
        type_text(&mut state, " today");
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.mode, InputMode::Normal);
        assert_eq!(state.store.tasks()[0].text, "tidy desk today");
        assert!(!state.store.tasks()[0].editing);
    }

    #[test]
    fn edit_key_reopens_a_row_restored_mid_edit() {
        let mut state = app();
        state.store.add_task("restored");
        let id = state.store.tasks()[0].id.clone();
        // As if the slot was reloaded with the row still in edit mode.
        state.store.toggle_edit(&id);

        press(&mut state, KeyCode::Char('e'));
        assert_eq!(state.mode, InputMode::Editing);
        assert_eq!(state.input_buffer, "restored");
        assert!(state.store.tasks()[0].editing, "the row stays mid-edit");

        press(&mut state, KeyCode::Esc);
        assert_eq!(state.mode, InputMode::Normal);
        assert!(!state.store.tasks()[0].editing);
    }

    #[test]
    fn log_level_prefers_the_config_override() {
        let config = Config {
            log_level: Some("trace".to_string()),
            ..Config::default()
        };
        assert_eq!(log_level(&config), "trace");

        let defaults = Config::default();
        let fallback = log_level(&defaults);
        assert!(fallback == "debug" || fallback == "info");
    }

    #[test]
    fn escape_cancels_an_edit_without_renaming() {
        let mut state = app();
        state.store.add_task("tidy desk");
        press(&mut state, KeyCode::Char('e'));
        type_text(&mut state, " never mind");
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.mode, InputMode::Normal);
        assert_eq!(state.store.tasks()[0].text, "tidy desk");
        assert!(!state.store.tasks()[0].editing);
        assert_eq!(state.message, HELP_MESSAGE);
    }

    #[test]
    fn deleting_the_last_row_clamps_the_selection() {
        let mut state = app();
        state.store.add_task("one");
        state.store.add_task("two");
        press(&mut state, KeyCode::Down);
        assert_eq!(state.list_state.selected(), Some(1));
        press(&mut state, KeyCode::Char('d'));
        press(&mut state, KeyCode::Char('y'));
        assert_eq!(state.store.tasks().len(), 1);
        assert_eq!(state.list_state.selected(), Some(0));
    }

    #[test]
    fn quit_key_sets_the_flag() {
        let mut state = app();
        press(&mut state, KeyCode::Char('q'));
        assert!(state.should_quit);
    }
}
