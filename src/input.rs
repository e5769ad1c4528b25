use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::heading::Heading;

/// Player commands consumed by the tick loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Steer(Heading),
    Quit,
}

/// Maps one key event to a command. Unknown keys map to `None`.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'C') => Some(Command::Quit),
            _ => None,
        };
    }

    let command = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Command::Steer(Heading::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Command::Steer(Heading::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Command::Steer(Heading::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Command::Steer(Heading::Right),
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Command::Quit,
        _ => return None,
    };

    Some(command)
}

/// Reads terminal key events through crossterm.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `timeout` for a key that maps to a command.
    ///
    /// Unmapped keys and non-key events are swallowed; the call returns
    /// `None` once the timeout passes without a mapped key.
    pub fn poll_command(&mut self, timeout: Duration) -> io::Result<Option<Command>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(map_key(key)),
            _ => Ok(None),
        }
    }

    /// Blocks until any key is pressed.
    pub fn wait_for_key(&mut self) -> io::Result<()> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::{Command, map_key};
    use crate::heading::Heading;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_map_to_the_same_headings() {
        assert_eq!(map_key(press(KeyCode::Up)), Some(Command::Steer(Heading::Up)));
        assert_eq!(
            map_key(press(KeyCode::Char('w'))),
            Some(Command::Steer(Heading::Up))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('A'))),
            Some(Command::Steer(Heading::Left))
        );
        assert_eq!(
            map_key(press(KeyCode::Right)),
            Some(Command::Steer(Heading::Right))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('s'))),
            Some(Command::Steer(Heading::Down))
        );
    }

    #[test]
    fn quit_keys() {
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
        assert_eq!(map_key(press(KeyCode::Enter)), None);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn key_releases_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(map_key(release), None);
    }
}
