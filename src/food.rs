use std::collections::HashSet;

use rand::Rng;

use crate::config::GridSize;
use crate::error::GameError;
use crate::snake::{Coord, Snake};

/// Random draws tried per item before falling back to scanning the grid.
pub const MAX_REJECTION_ATTEMPTS: usize = 64;

/// Food items currently on the board.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct FoodSet {
    items: HashSet<Coord>,
}

impl FoodSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if food lies at `position`.
    #[must_use]
    pub fn contains(&self, position: Coord) -> bool {
        self.items.contains(&position)
    }

    /// Adds food at `position`. Returns false if it was already there.
    pub fn insert(&mut self, position: Coord) -> bool {
        self.items.insert(position)
    }

    /// Removes the food at `position`, returning whether there was any.
    pub fn remove(&mut self, position: Coord) -> bool {
        self.items.remove(&position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over food positions in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Coord> {
        self.items.iter()
    }

    /// Places `count` new items on cells free of snake and existing food.
    ///
    /// Each item is drawn uniformly at random and redrawn on collision. After
    /// [`MAX_REJECTION_ATTEMPTS`] misses the free cells are enumerated and one
    /// is picked uniformly, so a crowded grid never loops forever.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
        count: usize,
    ) -> Result<(), GameError> {
        for _ in 0..count {
            let position = self.free_position(rng, bounds, snake)?;
            self.items.insert(position);
        }
        Ok(())
    }

    fn free_position<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
    ) -> Result<Coord, GameError> {
        let is_free = |position: Coord| !snake.occupies(position) && !self.contains(position);

        for _ in 0..MAX_REJECTION_ATTEMPTS {
            let candidate = Coord::new(
                rng.gen_range(0..bounds.width),
                rng.gen_range(0..bounds.height),
            );
            if is_free(candidate) {
                return Ok(candidate);
            }
        }

        spawn_position(rng, bounds, is_free)
    }
}

/// Picks a uniformly random cell satisfying `is_free`, scanning the whole grid.
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    is_free: impl Fn(Coord) -> bool,
) -> Result<Coord, GameError> {
    let mut candidates = Vec::new();

    for y in 0..bounds.height {
        for x in 0..bounds.width {
            let position = Coord::new(x, y);
            if is_free(position) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        return Err(GameError::GridExhausted {
            width: bounds.width,
            height: bounds.height,
        });
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}
