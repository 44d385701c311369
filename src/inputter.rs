use ratatui::crossterm::event::{self, KeyCode, KeyModifiers};
use tracing::trace;

/// What a keystroke did to the search prompt. `Edited` streams on every
/// change so the table filters as the user types; `Cancelled` carries the
/// query to restore.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    Edited(String),
    Submitted(String),
    Cancelled(String),
    Unchanged,
}

/// Line editor for the search prompt. Remembers the query that was active
/// when the prompt opened, so Esc can put it back.
#[derive(Default)]
pub struct Inputter {
    buffer: String,
    cursor: usize,
    original: String,
}

impl Inputter {
    /// Open the prompt seeded with the currently active query.
    pub fn begin(&mut self, current: &str) {
        self.original = current.to_string();
        self.buffer = current.to_string();
        self.cursor = self.buffer.chars().count();
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn read(&mut self, key: event::KeyEvent) -> SearchEvent {
        let event = match (key.code, key.modifiers) {
            (KeyCode::Enter, KeyModifiers::NONE) => SearchEvent::Submitted(self.buffer.clone()),
            (KeyCode::Esc, KeyModifiers::NONE) => {
                let restored = self.original.clone();
                self.buffer = restored.clone();
                SearchEvent::Cancelled(restored)
            }
            (KeyCode::Backspace, KeyModifiers::NONE) => self.backspace(),
            (KeyCode::Left, KeyModifiers::NONE) => self.left(),
            (KeyCode::Right, KeyModifiers::NONE) => self.right(),
            (code, modifiers) => self.key(code, modifiers),
        };
        trace!("Search prompt: {:?}", event);
        event
    }

    fn backspace(&mut self) -> SearchEvent {
        if self.cursor == 0 {
            return SearchEvent::Unchanged;
        }
        self.cursor -= 1;
        self.buffer.remove(self.byte_pos());
        SearchEvent::Edited(self.buffer.clone())
    }

    fn left(&mut self) -> SearchEvent {
        self.cursor = self.cursor.saturating_sub(1);
        SearchEvent::Unchanged
    }

    fn right(&mut self) -> SearchEvent {
        if self.cursor < self.buffer.chars().count() {
            self.cursor += 1;
        }
        SearchEvent::Unchanged
    }

    fn key(&mut self, code: KeyCode, _modifiers: KeyModifiers) -> SearchEvent {
        if let Some(chr) = code.as_char() {
            self.buffer.insert(self.byte_pos(), chr);
            self.cursor += 1;
            return SearchEvent::Edited(self.buffer.clone());
        }
        SearchEvent::Unchanged
    }

    fn byte_pos(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.buffer.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEvent;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_streams_edits() {
        let mut input = Inputter::default();
        input.begin("");
        assert_eq!(
            input.read(press(KeyCode::Char('c'))),
            SearchEvent::Edited("c".to_string())
        );
        assert_eq!(
            input.read(press(KeyCode::Char('s'))),
            SearchEvent::Edited("cs".to_string())
        );
        assert_eq!(
            input.read(press(KeyCode::Enter)),
            SearchEvent::Submitted("cs".to_string())
        );
    }

    #[test]
    fn escape_restores_the_prompt_opening_query() {
        let mut input = Inputter::default();
        input.begin("hall");
        input.read(press(KeyCode::Backspace));
        input.read(press(KeyCode::Char('x')));
        assert_eq!(
            input.read(press(KeyCode::Esc)),
            SearchEvent::Cancelled("hall".to_string())
        );
    }

    #[test]
    fn editing_in_the_middle_respects_char_boundaries() {
        let mut input = Inputter::default();
        input.begin("ab");
        input.read(press(KeyCode::Left));
        assert_eq!(
            input.read(press(KeyCode::Char('é'))),
            SearchEvent::Edited("aéb".to_string())
        );
        assert_eq!(
            input.read(press(KeyCode::Backspace)),
            SearchEvent::Edited("ab".to_string())
        );
    }

    #[test]
    fn backspace_at_start_is_a_no_op() {
        let mut input = Inputter::default();
        input.begin("a");
        input.read(press(KeyCode::Left));
        assert_eq!(input.read(press(KeyCode::Backspace)), SearchEvent::Unchanged);
        assert_eq!(input.text(), "a");
    }
}
