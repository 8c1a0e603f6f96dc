// Library exports for the binary and for testing
pub use app::App;
pub use clock::{Clock, FramePacer, ManualClock, SystemClock};
pub use config::{Arena, Settings};
pub use entities::{
    Bounds, ENEMY_HEIGHT, ENEMY_WIDTH, Enemy, Entity, GameState, PLAYER_HEIGHT, PLAYER_WIDTH,
    PROJECTILE_HEIGHT, PROJECTILE_SPEED, PROJECTILE_WIDTH, Player, Projectile, ProjectileSpawner,
    Tick,
};
pub use font::{Labels, Typeface};
pub use input::{HeldKeys, InputAction, InputManager};
pub use world::{Context, POINTS_PER_ENEMY, World};

pub mod app;
pub mod clock;
pub mod config;
pub mod entities;
pub mod font;
pub mod input;
pub mod renderer;
pub mod world;
