use torus_snake::config::GameConfig;
use torus_snake::food::FoodSet;
use torus_snake::game::{Cell, GameState, GameStatus};
use torus_snake::input::Direction;
use torus_snake::snake::{Coord, Snake};

fn food_at(positions: &[Coord]) -> FoodSet {
    let mut food = FoodSet::new();
    for position in positions {
        food.insert(*position);
    }
    food
}

#[test]
fn stepwise_food_collection_wrap_and_self_collision() {
    let config = GameConfig {
        score_per_food: 10,
        ..GameConfig::with_size(6, 5)
    };
    let mut state = GameState::new_with_seed(config, 42).expect("valid config");
    state.snake = Snake::from_segments(
        vec![Coord::new(1, 1), Coord::new(2, 1), Coord::new(3, 1)],
        Direction::Left,
    );
    state.food = food_at(&[
        Coord::new(0, 1),
        Coord::new(5, 1),
        Coord::new(3, 4),
        Coord::new(3, 3),
        Coord::new(3, 2),
        Coord::new(3, 0),
    ]);

    // Eat at the left edge.
    assert_eq!(state.tick().expect("tick"), GameStatus::Running);
    assert_eq!(state.score(), 10);
    assert_eq!(state.snake.len(), 4);
    assert_eq!(state.head(), Coord::new(0, 1));

    // Wrap to the right edge and eat again.
    assert_eq!(state.tick().expect("tick"), GameStatus::Running);
    assert_eq!(state.head(), Coord::new(5, 1));
    assert_eq!(state.score(), 20);
    assert_eq!(state.snake.len(), 5);
    assert_eq!(state.classify(5, 1), Cell::Snake);
    assert!(state.food.iter().all(|f| !state.snake.occupies(*f)));

    // Curl back into the body: up, right (wraps to x = 0), down.
    assert!(state.set_direction(Direction::Up));
    assert_eq!(state.tick().expect("tick"), GameStatus::Running);
    assert_eq!(state.head(), Coord::new(5, 0));

    assert!(state.set_direction(Direction::Right));
    assert_eq!(state.tick().expect("tick"), GameStatus::Running);
    assert_eq!(state.head(), Coord::new(0, 0));

    assert!(state.set_direction(Direction::Down));
    assert_eq!(state.tick().expect("tick"), GameStatus::Lost);
    assert!(state.is_lost());

    let score = state.score();
    let snake: Vec<Coord> = state.snake.segments().copied().collect();
    assert_eq!(state.tick().expect("tick"), GameStatus::Lost);
    assert_eq!(state.score(), score);
    assert_eq!(state.snake.segments().copied().collect::<Vec<_>>(), snake);
}

#[test]
fn same_seed_replays_same_game() {
    let config = GameConfig::with_size(12, 12);
    let mut first = GameState::new_with_seed(config, 7).expect("valid config");
    let mut second = GameState::new_with_seed(config, 7).expect("valid config");

    let turns = [Direction::Up, Direction::Right, Direction::Down, Direction::Right];
    for step in 0..200 {
        let turn = turns[step % turns.len()];
        first.set_direction(turn);
        second.set_direction(turn);

        let a = first.tick().expect("tick");
        let b = second.tick().expect("tick");
        assert_eq!(a, b);
        assert_eq!(first.snapshot(), second.snapshot());
        assert_eq!(first.food, second.food);
        if a.is_lost() {
            break;
        }
    }
}
