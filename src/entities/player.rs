use rand::Rng;

use super::projectile::Projectile;
use super::{Bounds, Entity, Tick};
use crate::config::Arena;

pub const PLAYER_WIDTH: i32 = 50;
pub const PLAYER_HEIGHT: i32 = 40;
const PLAYER_SPEED: i32 = 8;
/// Gap between the ship and the bottom of the playfield
const BOTTOM_MARGIN: i32 = 10;

/// Anything that can take ownership of a freshly fired projectile
pub trait ProjectileSpawner {
    fn spawn_projectile(&mut self, projectile: Projectile);
}

impl ProjectileSpawner for Vec<Projectile> {
    fn spawn_projectile(&mut self, projectile: Projectile) {
        self.push(projectile);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub speed: i32,
    pub shoot_delay_ms: u64,
    pub last_shot_ms: u64,
}

impl Player {
    /// Places the ship at the bottom center of the arena. The cooldown
    /// starts running at `now_ms`, so the first shot has to wait for it.
    pub fn new(arena: &Arena, now_ms: u64, shoot_delay_ms: u64) -> Self {
        Self {
            x: arena.width / 2 - PLAYER_WIDTH / 2,
            y: arena.height - BOTTOM_MARGIN - PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
            shoot_delay_ms,
            last_shot_ms: now_ms,
        }
    }

    pub fn can_fire(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_shot_ms) > self.shoot_delay_ms
    }

    /// Fires one projectile from the nose of the ship if the cooldown allows.
    /// Returns whether a projectile was spawned.
    pub fn fire(&mut self, now_ms: u64, spawner: &mut impl ProjectileSpawner) -> bool {
        if !self.can_fire(now_ms) {
            return false;
        }

        self.last_shot_ms = now_ms;
        let bounds = self.bounds();
        spawner.spawn_projectile(Projectile::new(bounds.center_x(), bounds.top()));
        true
    }

    pub fn move_left(&mut self) {
        if self.x > 0 {
            self.x = (self.x - self.speed).max(0);
        }
    }

    pub fn move_right(&mut self, max_x: i32) {
        if self.x + PLAYER_WIDTH < max_x {
            self.x = (self.x + self.speed).min(max_x - PLAYER_WIDTH);
        }
    }
}

impl Entity for Player {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    fn velocity(&self) -> (i32, i32) {
        (self.speed, 0)
    }

    fn update<R: Rng>(&mut self, tick: &mut Tick<'_, R>) {
        if tick.keys.left {
            self.move_left();
        }
        if tick.keys.right {
            self.move_right(tick.arena.width);
        }
    }
}
