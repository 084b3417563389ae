use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for the snake.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All headings in clockwise order starting from `Up`.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

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

    /// Returns the unit step `(dx, dy)` for this heading. `y` grows downwards.
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

/// High-level input events consumed by the session loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Restart,
    Quit,
}

impl GameInput {
    /// Maps one key press to a game input. Each arrow/WASD key maps to exactly
    /// one heading.
    #[must_use]
    pub fn from_key_event(event: KeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        match (event.modifiers, event.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Self::Quit),
            (_, KeyCode::Esc) | (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Self::Quit),
            (_, KeyCode::Enter) => Some(Self::Restart),
            (_, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('w' | 'k')) => {
                Some(Self::Direction(Direction::Up))
            }
            (_, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('s' | 'j')) => {
                Some(Self::Direction(Direction::Down))
            }
            (_, KeyCode::Left) | (KeyModifiers::NONE, KeyCode::Char('a' | 'h')) => {
                Some(Self::Direction(Direction::Left))
            }
            (_, KeyCode::Right) | (KeyModifiers::NONE, KeyCode::Char('d' | 'l')) => {
                Some(Self::Direction(Direction::Right))
            }
            _ => None,
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
    use rstest::rstest;

    use super::{Direction, GameInput, direction_change_is_valid};

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
            assert_eq!((dx + ox, dy + oy), (0, 0), "{direction:?}");
        }
    }

    #[test]
    fn direction_change_rejects_reverse() {
        for direction in Direction::ALL {
            assert!(!direction_change_is_valid(direction, direction.opposite()));
            assert!(direction_change_is_valid(direction, direction));
        }

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Right));
    }

    #[rstest]
    #[case(KeyCode::Up, Some(GameInput::Direction(Direction::Up)))]
    #[case(KeyCode::Char('w'), Some(GameInput::Direction(Direction::Up)))]
    #[case(KeyCode::Down, Some(GameInput::Direction(Direction::Down)))]
    #[case(KeyCode::Char('s'), Some(GameInput::Direction(Direction::Down)))]
    #[case(KeyCode::Left, Some(GameInput::Direction(Direction::Left)))]
    #[case(KeyCode::Char('a'), Some(GameInput::Direction(Direction::Left)))]
    #[case(KeyCode::Right, Some(GameInput::Direction(Direction::Right)))]
    #[case(KeyCode::Char('d'), Some(GameInput::Direction(Direction::Right)))]
    #[case(KeyCode::Enter, Some(GameInput::Restart))]
    #[case(KeyCode::Char('q'), Some(GameInput::Quit))]
    #[case(KeyCode::Esc, Some(GameInput::Quit))]
    #[case(KeyCode::Char('x'), None)]
    fn key_press_maps_to_input(#[case] code: KeyCode, #[case] expected: Option<GameInput>) {
        let event = KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(GameInput::from_key_event(event), expected);
    }

    #[test]
    fn ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(GameInput::from_key_event(event), Some(GameInput::Quit));
    }

    #[test]
    fn key_release_is_ignored() {
        let event = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(GameInput::from_key_event(event), None);
    }
}
