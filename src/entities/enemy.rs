use rand::Rng;

use super::{Bounds, Entity, Tick};
use crate::config::Arena;

pub const ENEMY_WIDTH: i32 = 30;
pub const ENEMY_HEIGHT: i32 = 30;

/// How far past an edge an enemy may drift before it is recycled
const TOP_MARGIN: i32 = 10;
const SIDE_MARGIN: i32 = 25;

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    pub speed_x: i32,
    pub speed_y: i32,
}

impl Enemy {
    /// Creates an enemy just above the visible playfield
    pub fn spawn<R: Rng>(arena: &Arena, rng: &mut R) -> Self {
        let (x, y) = Self::random_position(arena, rng);
        Self {
            x,
            y,
            speed_x: rng.random_range(-2..2),
            speed_y: Self::random_speed_y(rng),
        }
    }

    fn random_position<R: Rng>(arena: &Arena, rng: &mut R) -> (i32, i32) {
        let x = rng.random_range(0..arena.width - ENEMY_WIDTH);
        let y = rng.random_range(-100..-40);
        (x, y)
    }

    fn random_speed_y<R: Rng>(rng: &mut R) -> i32 {
        rng.random_range(1..4)
    }

    pub fn is_out_of_bounds(&self, arena: &Arena) -> bool {
        let bounds = self.bounds();
        bounds.top() > arena.height.saturating_add(TOP_MARGIN)
            || bounds.left() < -SIDE_MARGIN
            || bounds.right() > arena.width.saturating_add(SIDE_MARGIN)
    }

    /// Puts the enemy back above the screen with a new vertical speed.
    /// Horizontal drift is kept as is.
    fn recycle<R: Rng>(&mut self, arena: &Arena, rng: &mut R) {
        let (x, y) = Self::random_position(arena, rng);
        self.x = x;
        self.y = y;
        self.speed_y = Self::random_speed_y(rng);
    }
}

impl Entity for Enemy {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, ENEMY_WIDTH, ENEMY_HEIGHT)
    }

    fn velocity(&self) -> (i32, i32) {
        (self.speed_x, self.speed_y)
    }

    fn update<R: Rng>(&mut self, tick: &mut Tick<'_, R>) {
        self.y += self.speed_y;
        self.x += self.speed_x;

        if self.is_out_of_bounds(&tick.arena) {
            self.recycle(&tick.arena, tick.rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::HeldKeys;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn step(enemy: &mut Enemy, rng: &mut StdRng) {
        let mut tick = Tick {
            keys: HeldKeys::default(),
            arena: Arena::default(),
            rng,
        };
        enemy.update(&mut tick);
    }

    fn assert_fresh_spawn(enemy: &Enemy, arena: &Arena) {
        assert!((0..arena.width - ENEMY_WIDTH).contains(&enemy.x));
        assert!((-100..-40).contains(&enemy.y));
        assert!((1..4).contains(&enemy.speed_y));
        assert!((-2..2).contains(&enemy.speed_x));
    }

    #[test]
    fn test_enemy_spawn_ranges() {
        let arena = Arena::default();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            let enemy = Enemy::spawn(&arena, &mut rng);
            assert_fresh_spawn(&enemy, &arena);
        }
    }

    #[test]
    fn test_enemy_moves_by_velocity() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut enemy = Enemy {
            x: 100,
            y: 100,
            speed_x: -2,
            speed_y: 3,
        };
        step(&mut enemy, &mut rng);
        assert_eq!((enemy.x, enemy.y), (98, 103));
    }

    #[test]
    fn test_enemy_recycled_below_screen_keeps_drift() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut enemy = Enemy {
            x: 100,
            y: 609,
            speed_x: 1,
            speed_y: 3,
        };
        step(&mut enemy, &mut rng);
        assert!((-100..-40).contains(&enemy.y));
        assert!((0..770).contains(&enemy.x));
        assert!((1..4).contains(&enemy.speed_y));
        assert_eq!(enemy.speed_x, 1);
    }

    #[test]
    fn test_enemy_recycled_past_left_edge() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut enemy = Enemy {
            x: -25,
            y: 300,
            speed_x: -2,
            speed_y: 1,
        };
        step(&mut enemy, &mut rng);
        assert!((-100..-40).contains(&enemy.y));
        assert_eq!(enemy.speed_x, -2);
    }

    #[test]
    fn test_enemy_recycled_past_right_edge() {
        let mut rng = StdRng::seed_from_u64(5);
        // right edge 825 -> 826 after moving
        let mut enemy = Enemy {
            x: 795,
            y: 300,
            speed_x: 1,
            speed_y: 1,
        };
        step(&mut enemy, &mut rng);
        assert!((-100..-40).contains(&enemy.y));
    }

    #[test]
    fn test_enemy_inside_margin_is_not_recycled() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut enemy = Enemy {
            x: 300,
            y: 605,
            speed_x: 0,
            speed_y: 3,
        };
        step(&mut enemy, &mut rng);
        // top at 608 is still within the 10px margin below 600
        assert_eq!(enemy.y, 608);
    }

    #[test]
    fn test_enemy_bounds_check_at_extreme_arena() {
        let arena = Arena {
            width: i32::MAX,
            height: i32::MAX,
        };
        let enemy = Enemy {
            x: 10,
            y: 10,
            speed_x: 1,
            speed_y: 1,
        };
        assert!(!enemy.is_out_of_bounds(&arena));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_enemy_stays_near_playfield(seed in any::<u64>(), frames in 0usize..2000) {
                let arena = Arena::default();
                let mut rng = StdRng::seed_from_u64(seed);
                let mut enemy = Enemy::spawn(&arena, &mut rng);
                for _ in 0..frames {
                    step(&mut enemy, &mut rng);
                    prop_assert!(!enemy.is_out_of_bounds(&arena));
                    prop_assert!((1..4).contains(&enemy.speed_y));
                    prop_assert!((-2..2).contains(&enemy.speed_x));
                }
            }
        }
    }
}
