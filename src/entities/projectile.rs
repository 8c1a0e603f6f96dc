use rand::Rng;

use super::{Bounds, Entity, Tick};

pub const PROJECTILE_WIDTH: i32 = 5;
pub const PROJECTILE_HEIGHT: i32 = 15;
/// Upward, so negative
pub const PROJECTILE_SPEED: i32 = -10;

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub x: i32,
    pub y: i32,
    pub velocity_y: i32,
}

impl Projectile {
    /// Places the projectile with its horizontal center at `center_x`
    /// and its bottom edge at `bottom`
    pub fn new(center_x: i32, bottom: i32) -> Self {
        Self {
            x: center_x - PROJECTILE_WIDTH / 2,
            y: bottom - PROJECTILE_HEIGHT,
            velocity_y: PROJECTILE_SPEED,
        }
    }
}

impl Entity for Projectile {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }

    fn velocity(&self) -> (i32, i32) {
        (0, self.velocity_y)
    }

    fn update<R: Rng>(&mut self, _tick: &mut Tick<'_, R>) {
        self.y += self.velocity_y;
    }

    fn is_expired(&self) -> bool {
        self.bounds().bottom() < 0
    }
}
