use grid_snake::config::{BoardConfig, SessionConfig};
use grid_snake::game::GameSession;
use grid_snake::input::Direction;
use grid_snake::snake::{Position, Snake};
use proptest::prelude::*;

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn config() -> SessionConfig {
    SessionConfig {
        board: BoardConfig::from_cells(16, 12, 20),
        ..SessionConfig::default()
    }
}

proptest! {
    #[test]
    fn length_changes_only_when_food_is_eaten(
        seed in any::<u64>(),
        turns in prop::collection::vec(proptest::option::of(direction()), 1..200),
    ) {
        let mut session = GameSession::new_with_seed(config(), seed).expect("valid config");

        for turn in turns {
            if let Some(direction) = turn {
                session.change_direction(direction);
            }
            let before = session.snake().len();
            let events = session.tick();
            let expected = if events.ate_food.is_some() { before + 1 } else { before };
            prop_assert_eq!(session.snake().len(), expected);
        }
    }

    #[test]
    fn food_is_in_bounds_and_off_the_snake(
        seed in any::<u64>(),
        turns in prop::collection::vec(direction(), 1..200),
    ) {
        let mut session = GameSession::new_with_seed(config(), seed).expect("valid config");

        for direction in turns {
            session.change_direction(direction);
            let events = session.tick();
            if let Some(food) = events.new_food_at {
                prop_assert!(session.bounds().contains(food));
                prop_assert!(session.segments().all(|segment| segment.distance_squared(food) >= 1));
            }
            if events.died {
                break;
            }
        }
    }

    #[test]
    fn finished_session_is_frozen(
        seed in any::<u64>(),
        extra_ticks in 1usize..20,
        turns in prop::collection::vec(direction(), 0..10),
    ) {
        let mut session = GameSession::new_with_seed(config(), seed).expect("valid config");
        session.change_direction(Direction::Up);
        while !session.is_over() {
            session.tick();
        }

        let score = session.score();
        let body: Vec<Position> = session.segments().collect();
        let food = session.food();

        for direction in turns {
            session.change_direction(direction);
        }
        for _ in 0..extra_ticks {
            let events = session.tick();
            prop_assert!(events.died);
            prop_assert_eq!(events.ate_food, None);
        }

        prop_assert_eq!(session.score(), score);
        prop_assert_eq!(session.segments().collect::<Vec<_>>(), body);
        prop_assert_eq!(session.food(), food);
    }

    #[test]
    fn move_shifts_every_segment_into_its_predecessors_cell(
        turns in prop::collection::vec(direction(), 1..50),
        grow_on in prop::collection::vec(any::<bool>(), 50),
    ) {
        let mut snake = Snake::new(Position::new(0, 0), 3);

        for (direction, grow) in turns.into_iter().zip(grow_on) {
            let heading = snake.direction();
            snake.change_direction(direction);
            if direction == heading.opposite() {
                prop_assert_eq!(snake.direction(), heading);
            } else {
                prop_assert_eq!(snake.direction(), direction);
            }

            if grow {
                let len = snake.len();
                snake.grow();
                prop_assert_eq!(snake.len(), len + 1);
            }

            let before: Vec<Position> = snake.segments().copied().collect();
            snake.move_forward();
            let after: Vec<Position> = snake.segments().copied().collect();

            prop_assert_eq!(after.len(), before.len());
            prop_assert_eq!(Some(after[0]), before[0].step(snake.direction()));
            for index in 1..after.len() {
                prop_assert_eq!(after[index], before[index - 1]);
            }
        }
    }
}
