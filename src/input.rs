use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for the snake.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in clockwise order starting at `Up`.
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the one-cell step `(dx, dy)` in screen orientation (`y` grows downward).
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Restart,
    Quit,
}

/// Maps one key press to a game input.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => {
            Some(GameInput::Direction(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => {
            Some(GameInput::Direction(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => {
            Some(GameInput::Direction(Direction::Right))
        }
        KeyCode::Enter | KeyCode::Char(' ' | 'r' | 'R') => Some(GameInput::Restart),
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(GameInput::Quit),
        _ => None,
    }
}

/// Waits up to `timeout` for a terminal event and maps it to a game input.
///
/// Returns `Ok(None)` on timeout or for events with no game meaning.
pub fn poll_input(timeout: Duration) -> io::Result<Option<GameInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) => Ok(map_key(key)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use super::{Direction, GameInput, direction_change_is_valid, map_key};

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn opposite_deltas_cancel_out() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            let (ox, oy) = direction.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn reversal_is_rejected() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(Direction::Down, Direction::Up));
        assert!(!direction_change_is_valid(
            Direction::Left,
            Direction::Right
        ));
        assert!(!direction_change_is_valid(
            Direction::Right,
            Direction::Left
        ));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Up));
    }

    #[test]
    fn arrow_keys_and_wasd_map_to_directions() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(
            map_key(press(KeyCode::Left)),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('w'))),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(map_key(press(KeyCode::Enter)), Some(GameInput::Restart));
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(GameInput::Quit));
        assert_eq!(map_key(press(KeyCode::Tab)), None);
    }

    #[test]
    fn ctrl_c_quits_and_key_release_is_ignored() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c), Some(GameInput::Quit));

        let mut release = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), None);
    }
}
