mod enemy;
mod game_state;
mod player;
mod projectile;

use rand::Rng;

use crate::config::Arena;
use crate::input::HeldKeys;

// Re-export all public types
pub use enemy::{ENEMY_HEIGHT, ENEMY_WIDTH, Enemy};
pub use game_state::GameState;
pub use player::{PLAYER_HEIGHT, PLAYER_WIDTH, Player, ProjectileSpawner};
pub use projectile::{PROJECTILE_HEIGHT, PROJECTILE_SPEED, PROJECTILE_WIDTH, Projectile};

/// Axis-aligned bounding box in playfield pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Everything an entity may read or consume while advancing one frame
pub struct Tick<'a, R: Rng> {
    pub keys: HeldKeys,
    pub arena: Arena,
    pub rng: &'a mut R,
}

/// Shared shape of every moving, drawable, boxed thing in the playfield
pub trait Entity {
    fn bounds(&self) -> Bounds;

    /// Pixels per frame along (x, y)
    fn velocity(&self) -> (i32, i32);

    fn update<R: Rng>(&mut self, tick: &mut Tick<'_, R>);

    /// Expired entities are dropped by the world before collisions run
    fn is_expired(&self) -> bool {
        false
    }
}
