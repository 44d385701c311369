use std::time::Duration;
use tracing::trace;

use ratatui::crossterm::event::{self, Event, KeyCode};

use crate::domain::{AppConfig, InvigilError, Message};
use crate::model::Model;

pub struct Controller {
    event_poll_time: u64,
}

impl Controller {
    pub fn new(cfg: &AppConfig) -> Self {
        Self {
            event_poll_time: cfg.event_poll_time,
        }
    }

    pub fn handle_event(&self, model: &Model) -> Result<Option<Message>, InvigilError> {
        if event::poll(Duration::from_millis(self.event_poll_time))?
            && let Event::Key(key) = event::read()?
            && key.kind == event::KeyEventKind::Press
        {
            // While the search prompt is open every key belongs to it.
            if model.raw_keyevents() {
                return Ok(Some(Message::RawKey(key)));
            }
            return Ok(self.handle_key(key));
        }
        Ok(None)
    }

    fn handle_key(&self, key: event::KeyEvent) -> Option<Message> {
        let message = match key.code {
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Char('?') => Some(Message::Help),
            KeyCode::Char('0') | KeyCode::Char('d') => Some(Message::ShowDashboard),
            KeyCode::Char('1') => Some(Message::ShowExams),
            KeyCode::Char('2') => Some(Message::ShowVenues),
            KeyCode::Char('3') => Some(Message::ShowInvigilators),
            KeyCode::Up | KeyCode::Char('k') => Some(Message::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Message::MoveDown),
            KeyCode::Left | KeyCode::Char('h') => Some(Message::MoveLeft),
            KeyCode::Right | KeyCode::Char('l') => Some(Message::MoveRight),
            KeyCode::Char('n') | KeyCode::PageDown => Some(Message::NextPage),
            KeyCode::Char('p') | KeyCode::PageUp => Some(Message::PrevPage),
            KeyCode::Char('r') => Some(Message::CycleRowsPerPage),
            KeyCode::Char('s') => Some(Message::RequestSort),
            KeyCode::Char(' ') => Some(Message::ToggleSelect),
            KeyCode::Char('a') => Some(Message::ToggleSelectAll),
            KeyCode::Char('e') | KeyCode::Enter => Some(Message::ToggleExpand),
            KeyCode::Char('c') => Some(Message::CopyRows),
            KeyCode::Char('R') => Some(Message::Refresh),
            KeyCode::Char('/') => Some(Message::EnterSearch),
            KeyCode::Esc => Some(Message::Exit),
            _ => None,
        };
        trace!("Mapped: {key:?} => {message:?}");
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyEvent, KeyModifiers};

    fn controller() -> Controller {
        Controller::new(&AppConfig::default())
    }

    #[test]
    fn table_keys_map_to_messages() {
        let c = controller();
        let cases = [
            ('q', Message::Quit),
            ('s', Message::RequestSort),
            ('a', Message::ToggleSelectAll),
            ('/', Message::EnterSearch),
            ('R', Message::Refresh),
            ('2', Message::ShowVenues),
        ];
        for (chr, expected) in cases {
            let key = KeyEvent::new(KeyCode::Char(chr), KeyModifiers::NONE);
            assert_eq!(c.handle_key(key), Some(expected), "key {chr:?}");
        }
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let c = controller();
        let key = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(c.handle_key(key), None);
    }
}
