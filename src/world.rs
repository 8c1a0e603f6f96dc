//! Session state and the per-frame rules of the game.

use rand::Rng;

use crate::clock::Clock;
use crate::config::{Arena, Settings};
use crate::entities::{Enemy, Entity, GameState, Player, Projectile, Tick};
use crate::input::{HeldKeys, InputAction};

/// Points awarded per enemy shot down
pub const POINTS_PER_ENEMY: u32 = 10;

/// Everything a session needs from the outside world, built once at startup
pub struct Context<C: Clock, R: Rng> {
    pub arena: Arena,
    pub clock: C,
    pub rng: R,
    pub enemy_count: usize,
    pub shoot_delay_ms: u64,
}

impl<C: Clock, R: Rng> Context<C, R> {
    pub fn new(settings: &Settings, clock: C, rng: R) -> Self {
        Self {
            arena: settings.arena(),
            clock,
            rng,
            enemy_count: settings.enemies,
            shoot_delay_ms: settings.shoot_delay_ms,
        }
    }
}

/// One game session: the player, the enemy pool, projectiles in flight and the score
pub struct World<C: Clock, R: Rng> {
    context: Context<C, R>,
    state: GameState,
    player: Player,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    score: u32,
    frame_count: u64,
}

impl<C: Clock, R: Rng> World<C, R> {
    pub fn new(context: Context<C, R>) -> Self {
        let player = Player::new(&context.arena, context.clock.now_ms(), context.shoot_delay_ms);
        let mut world = Self {
            context,
            state: GameState::Running,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            score: 0,
            frame_count: 0,
        };
        world.populate();
        tracing::info!(
            enemies = world.enemies.len(),
            width = world.context.arena.width,
            height = world.context.arena.height,
            "session started"
        );
        world
    }

    fn populate(&mut self) {
        let arena = self.context.arena;
        self.enemies = (0..self.context.enemy_count)
            .map(|_| Enemy::spawn(&arena, &mut self.context.rng))
            .collect();
    }

    /// Throws the whole session away and starts over in place
    pub fn restart(&mut self) {
        self.player = Player::new(
            &self.context.arena,
            self.context.clock.now_ms(),
            self.context.shoot_delay_ms,
        );
        self.projectiles.clear();
        self.score = 0;
        self.frame_count = 0;
        self.populate();
        self.state = GameState::Running;
        tracing::info!("session restarted");
    }

    /// Applies one discrete action. Actions that make no sense in the
    /// current state are ignored.
    pub fn handle(&mut self, action: InputAction) {
        match (self.state, action) {
            (GameState::Terminated, _) => {}
            (_, InputAction::Quit) => self.terminate(),
            (GameState::Running, InputAction::Fire) => {
                let now = self.context.clock.now_ms();
                if self.player.fire(now, &mut self.projectiles) {
                    tracing::debug!(now, "fired");
                }
            }
            (GameState::GameOver, InputAction::Restart) => self.restart(),
            (GameState::GameOver, InputAction::Escape) => self.terminate(),
            _ => {}
        }
    }

    fn terminate(&mut self) {
        tracing::info!(score = self.score, "terminated");
        self.state = GameState::Terminated;
    }

    /// Advances every entity by one frame and resolves collisions.
    /// Does nothing unless the game is running.
    pub fn step(&mut self, keys: HeldKeys) {
        if self.state != GameState::Running {
            return;
        }
        self.frame_count += 1;

        let mut tick = Tick {
            keys,
            arena: self.context.arena,
            rng: &mut self.context.rng,
        };

        self.player.update(&mut tick);
        for enemy in &mut self.enemies {
            enemy.update(&mut tick);
        }
        for projectile in &mut self.projectiles {
            projectile.update(&mut tick);
        }
        self.projectiles.retain(|p| !p.is_expired());

        self.check_collisions();
    }

    fn check_collisions(&mut self) {
        // Projectiles hitting enemies
        let mut hit_enemies = Vec::new();
        let mut spent = vec![false; self.projectiles.len()];

        for (e_idx, enemy) in self.enemies.iter().enumerate() {
            let enemy_bounds = enemy.bounds();
            let mut hit = false;
            for (p_idx, projectile) in self.projectiles.iter().enumerate() {
                if !spent[p_idx] && projectile.bounds().overlaps(&enemy_bounds) {
                    spent[p_idx] = true;
                    hit = true;
                }
            }
            if hit {
                hit_enemies.push(e_idx);
            }
        }

        let mut spent = spent.into_iter();
        self.projectiles.retain(|_| !spent.next().unwrap_or(false));

        // Remove in reverse order to avoid index issues
        for &idx in hit_enemies.iter().rev() {
            self.enemies.remove(idx);
        }
        for _ in &hit_enemies {
            self.score += POINTS_PER_ENEMY;
            let replacement = Enemy::spawn(&self.context.arena, &mut self.context.rng);
            self.enemies.push(replacement);
        }
        if !hit_enemies.is_empty() {
            tracing::debug!(hits = hit_enemies.len(), score = self.score, "enemies destroyed");
        }

        // Enemies ramming the player
        let player_bounds = self.player.bounds();
        let before = self.enemies.len();
        self.enemies.retain(|e| !e.bounds().overlaps(&player_bounds));
        if self.enemies.len() != before {
            self.state = GameState::GameOver;
            tracing::info!(score = self.score, frames = self.frame_count, "game over");
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable access for scripted scenarios
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut Vec<Enemy> {
        &mut self.enemies
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn projectiles_mut(&mut self) -> &mut Vec<Projectile> {
        &mut self.projectiles
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn arena(&self) -> Arena {
        self.context.arena
    }

    pub fn clock(&self) -> &C {
        &self.context.clock
    }
}
