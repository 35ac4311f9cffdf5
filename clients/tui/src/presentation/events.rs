//! Terminal input plumbing: where events come from and what keys mean.

use crate::input::Keystroke;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

/// Non-blocking source of terminal events.
pub trait EventSource {
    /// Next pending event, or `None` if nothing is waiting right now.
    fn next_event(&mut self) -> io::Result<Option<Event>>;
}

/// Reads the real terminal through crossterm.
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> io::Result<Option<Event>> {
        if event::poll(Duration::ZERO)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}

/// Scripted events, oldest first.
impl EventSource for VecDeque<Event> {
    fn next_event(&mut self) -> io::Result<Option<Event>> {
        Ok(self.pop_front())
    }
}

/// Esc, `q` and Ctrl-C close the trainer.
pub fn is_close_request(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Only presses are queued; repeats and releases are dropped.
pub fn is_press(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

pub fn keystroke(key: &KeyEvent) -> Keystroke {
    match key.code {
        KeyCode::Char(c @ '0'..='9') => Keystroke::Digit(c as u8 - b'0'),
        KeyCode::Char('-') => Keystroke::Minus,
        KeyCode::Backspace => Keystroke::Backspace,
        // Some terminals report a bare carriage return or line feed instead of Enter.
        KeyCode::Enter | KeyCode::Char('\r') | KeyCode::Char('\n') => Keystroke::Confirm,
        _ => Keystroke::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_keystroke_mapping() {
        assert_eq!(keystroke(&key(KeyCode::Char('0'))), Keystroke::Digit(0));
        assert_eq!(keystroke(&key(KeyCode::Char('9'))), Keystroke::Digit(9));
        assert_eq!(keystroke(&key(KeyCode::Char('-'))), Keystroke::Minus);
        assert_eq!(keystroke(&key(KeyCode::Backspace)), Keystroke::Backspace);
        assert_eq!(keystroke(&key(KeyCode::Enter)), Keystroke::Confirm);
        assert_eq!(keystroke(&key(KeyCode::Char('\r'))), Keystroke::Confirm);
        assert_eq!(keystroke(&key(KeyCode::Char('x'))), Keystroke::Other);
        assert_eq!(keystroke(&key(KeyCode::Left)), Keystroke::Other);
    }

    #[test]
    fn test_close_requests() {
        assert!(is_close_request(&key(KeyCode::Esc)));
        assert!(is_close_request(&key(KeyCode::Char('q'))));
        assert!(is_close_request(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_close_request(&key(KeyCode::Char('c'))));
        assert!(!is_close_request(&key(KeyCode::Enter)));
    }

    #[test]
    fn test_scripted_source_drains_in_order() {
        let mut source: VecDeque<Event> = VecDeque::from(vec![
            Event::Key(key(KeyCode::Char('1'))),
            Event::Key(key(KeyCode::Char('2'))),
        ]);
        assert_eq!(
            source.next_event().unwrap(),
            Some(Event::Key(key(KeyCode::Char('1'))))
        );
        assert_eq!(
            source.next_event().unwrap(),
            Some(Event::Key(key(KeyCode::Char('2'))))
        );
        assert_eq!(source.next_event().unwrap(), None);
    }
}
