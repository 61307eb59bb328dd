use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::grid::Direction;

/// High-level input events consumed by the app loop.
///
/// The mapping is screen-agnostic; each screen decides what an event means
/// in its current phase.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Confirm,
    ToggleMode,
    CycleTheme,
    OpenLeaderboard,
    OpenWatch,
    Back,
    Quit,
}

/// Polls the terminal for input without blocking the frame loop.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns at most one input event per call.
    ///
    /// Key repeats and releases are ignored so held keys do not flood the
    /// intent with stale turns.
    pub fn poll_input(&mut self) -> io::Result<Option<GameInput>> {
        if !event::poll(Duration::from_millis(0))? {
            return Ok(None);
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(None);
            }
            return Ok(map_key(key.code));
        }

        Ok(None)
    }
}

fn map_key(code: KeyCode) -> Option<GameInput> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s') => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a') => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d') => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Char(' ') => Some(GameInput::Pause),
        KeyCode::Enter => Some(GameInput::Confirm),
        KeyCode::Char('m') => Some(GameInput::ToggleMode),
        KeyCode::Char('t') => Some(GameInput::CycleTheme),
        KeyCode::Char('l') => Some(GameInput::OpenLeaderboard),
        KeyCode::Char('v') => Some(GameInput::OpenWatch),
        KeyCode::Esc => Some(GameInput::Back),
        KeyCode::Char('q') => Some(GameInput::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use super::{GameInput, map_key};
    use crate::grid::Direction;

    #[test]
    fn arrows_and_wasd_map_to_the_same_directions() {
        assert_eq!(
            map_key(KeyCode::Up),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key(KeyCode::Char('w')),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key(KeyCode::Char('a')),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            map_key(KeyCode::Right),
            Some(GameInput::Direction(Direction::Right))
        );
    }

    #[test]
    fn control_keys_map_to_app_events() {
        assert_eq!(map_key(KeyCode::Char(' ')), Some(GameInput::Pause));
        assert_eq!(map_key(KeyCode::Enter), Some(GameInput::Confirm));
        assert_eq!(map_key(KeyCode::Char('m')), Some(GameInput::ToggleMode));
        assert_eq!(map_key(KeyCode::Char('t')), Some(GameInput::CycleTheme));
        assert_eq!(map_key(KeyCode::Char('l')), Some(GameInput::OpenLeaderboard));
        assert_eq!(map_key(KeyCode::Char('v')), Some(GameInput::OpenWatch));
        assert_eq!(map_key(KeyCode::Esc), Some(GameInput::Back));
        assert_eq!(map_key(KeyCode::Char('q')), Some(GameInput::Quit));
    }

    #[test]
    fn unmapped_keys_are_dropped() {
        assert_eq!(map_key(KeyCode::Char('x')), None);
        assert_eq!(map_key(KeyCode::Tab), None);
    }
}
