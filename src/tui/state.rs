use crate::store::TodoList;
use crate::tui::HELP_MESSAGE;
use ratatui::widgets::ListState;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Creating,
    Editing,
}

pub struct AppState {
    pub store: TodoList,
    pub list_state: ListState,
    pub mode: InputMode,
    pub input_buffer: String,
    pub cursor_position: usize,
    /// Id of the task the edit form is bound to while `mode == Editing`.
    pub editing_id: Option<String>,
    pub message: String,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(store: TodoList) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            store,
            list_state,
            mode: InputMode::Normal,
            input_buffer: String::new(),
            cursor_position: 0,
            editing_id: None,
            message: HELP_MESSAGE.to_string(),
            should_quit: false,
        }
    }

    /// Id of the task under the cursor, if any.
    pub fn selected_id(&self) -> Option<String> {
        let idx = self.list_state.selected()?;
        self.store.tasks().get(idx).map(|t| t.id.clone())
    }

    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }
    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }
    pub fn enter_char(&mut self, new_char: char) {
        let byte_index = self
            .input_buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len());
        self.input_buffer.insert(byte_index, new_char);
        self.move_cursor_right();
    }
    pub fn delete_char(&mut self) {
        if self.cursor_position != 0 {
            let current_index = self.cursor_position;
            let from_left_to_current_index = current_index - 1;
            let before_char_to_delete = self.input_buffer.chars().take(from_left_to_current_index);
            let after_char_to_delete = self.input_buffer.chars().skip(current_index);
            self.input_buffer = before_char_to_delete.chain(after_char_to_delete).collect();
            self.move_cursor_left();
        }
    }
    pub fn reset_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }
    /// Pre-fills the input (edit form) with the cursor at the end.
    pub fn set_input(&mut self, text: &str) {
        self.input_buffer = text.to_string();
        self.cursor_position = self.input_buffer.chars().count();
    }
    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.input_buffer.chars().count())
    }

    /// Keeps the selection on a real row after the list shrinks.
    pub fn clamp_selection(&mut self) {
        let len = self.store.tasks().len();
        let sel = self.list_state.selected().unwrap_or(0);
        if len == 0 {
            self.list_state.select(Some(0));
        } else if sel >= len {
            self.list_state.select(Some(len - 1));
        }
    }

    pub fn next(&mut self) {
        let len = self.store.tasks().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.store.tasks().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn jump_forward(&mut self, step: usize) {
        if self.store.tasks().is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        // Clamp to the last item (don't wrap around like next())
        let new_index = (current + step).min(self.store.tasks().len() - 1);
        self.list_state.select(Some(new_index));
    }

    pub fn jump_backward(&mut self, step: usize) {
        if self.store.tasks().is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        // Clamp to 0 (don't wrap around)
        let new_index = current.saturating_sub(step);
        self.list_state.select(Some(new_index));
    }
}
