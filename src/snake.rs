use std::collections::VecDeque;
use std::fmt;

use crate::config::GridSize;
use crate::input::{Direction, direction_change_is_valid};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: u16,
    pub y: u16,
}

impl Coord {
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one step along `direction`, wrapping
    /// around the edges of the grid on both axes.
    #[must_use]
    pub fn stepped(self, direction: Direction, bounds: GridSize) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: wrap_axis(i32::from(self.x) + dx, bounds.width),
            y: wrap_axis(i32::from(self.y) + dy, bounds.height),
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

fn wrap_axis(value: i32, upper_bound: u16) -> u16 {
    let wrapped = value.rem_euclid(i32::from(upper_bound));
    // rem_euclid keeps the value in 0..upper_bound, which always fits in u16.
    u16::try_from(wrapped).unwrap_or_default()
}

/// Snake body plus its heading and the once-per-tick steering latch.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Coord>,
    direction: Direction,
    direction_changed: bool,
}

impl Snake {
    /// Creates a snake of `len` segments with its head at the centre of
    /// `bounds` and the body trailing downwards, facing `direction`.
    #[must_use]
    pub fn centered(bounds: GridSize, len: usize, direction: Direction) -> Self {
        let head = Coord::new(bounds.width / 2, bounds.height / 2);
        let mut body = VecDeque::with_capacity(len);
        let mut segment = head;
        for _ in 0..len {
            body.push_back(segment);
            segment = segment.stepped(Direction::Down, bounds);
        }

        Self {
            body,
            direction,
            direction_changed: false,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Coord>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "a snake needs at least one segment");
        Self {
            body: VecDeque::from(segments),
            direction,
            direction_changed: false,
        }
    }

    /// Requests a heading change.
    ///
    /// Only the first accepted request between two ticks takes effect, and a
    /// request for the direct opposite of the current heading is ignored
    /// without using up the tick's change. Returns whether the heading was
    /// updated.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.direction_changed || !direction_change_is_valid(self.direction, direction) {
            return false;
        }

        self.direction = direction;
        self.direction_changed = true;
        true
    }

    /// Re-arms steering for the next tick.
    pub fn reset_steering(&mut self) {
        self.direction_changed = false;
    }

    /// Returns the head position for the next movement tick.
    #[must_use]
    pub fn next_head_position(&self, bounds: GridSize) -> Coord {
        self.head().stepped(self.direction, bounds)
    }

    /// Pushes a new head segment.
    pub fn push_head(&mut self, head: Coord) {
        self.body.push_front(head);
    }

    /// Removes and returns the tail segment, keeping at least the head.
    pub fn pop_tail(&mut self) -> Option<Coord> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Coord {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }


    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Coord) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current heading.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Coord> {
        self.body.iter()
    }
}
