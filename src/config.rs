//! Command line settings for a game session.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::{Result, eyre::eyre};

use crate::entities::{ENEMY_WIDTH, PLAYER_HEIGHT, PLAYER_WIDTH};

/// Largest playfield side accepted; keeps edge arithmetic far from `i32` limits
pub const MAX_ARENA_SIDE: i32 = 16_384;

/// Logical playfield size in pixels. The renderer scales it to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// A terminal space shooter. Move with the arrow keys, fire with space.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Settings {
    /// Playfield width in logical pixels
    #[arg(long, default_value_t = 800)]
    pub width: i32,

    /// Playfield height in logical pixels
    #[arg(long, default_value_t = 600)]
    pub height: i32,

    /// Frame rate cap
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Number of enemies kept in play
    #[arg(long, default_value_t = 8)]
    pub enemies: usize,

    /// Minimum time between two shots
    #[arg(long, default_value_t = 300)]
    pub shoot_delay_ms: u64,

    /// Seed for enemy placement, random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where diagnostics are written (the terminal is busy drawing the game)
    #[arg(long, default_value = "debug.log")]
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        let arena = Arena::default();
        Self {
            width: arena.width,
            height: arena.height,
            fps: 60,
            enemies: 8,
            shoot_delay_ms: 300,
            seed: None,
            log_file: PathBuf::from("debug.log"),
        }
    }
}

impl Settings {
    pub fn arena(&self) -> Arena {
        Arena {
            width: self.width,
            height: self.height,
        }
    }

    /// Rejects settings the game loop cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(eyre!("--fps must be at least 1"));
        }
        if self.enemies == 0 {
            return Err(eyre!("--enemies must be at least 1"));
        }
        if self.width <= ENEMY_WIDTH.max(PLAYER_WIDTH) {
            return Err(eyre!(
                "--width {} is too narrow, need more than {}",
                self.width,
                ENEMY_WIDTH.max(PLAYER_WIDTH)
            ));
        }
        if self.height <= PLAYER_HEIGHT + 10 {
            return Err(eyre!(
                "--height {} is too short, need more than {}",
                self.height,
                PLAYER_HEIGHT + 10
            ));
        }
        if self.width > MAX_ARENA_SIDE || self.height > MAX_ARENA_SIDE {
            return Err(eyre!(
                "playfield {}x{} is too large, each side must be at most {}",
                self.width,
                self.height,
                MAX_ARENA_SIDE
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_layout() {
        let settings = Settings::parse_from(["space_shooter"]);
        assert_eq!(settings.arena(), Arena::default());
        assert_eq!(settings.fps, 60);
        assert_eq!(settings.enemies, 8);
        assert_eq!(settings.shoot_delay_ms, 300);
        assert_eq!(settings.seed, None);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_parse_overrides() {
        let settings = Settings::parse_from([
            "space_shooter",
            "--enemies",
            "3",
            "--seed",
            "42",
            "--width",
            "1024",
        ]);
        assert_eq!(settings.enemies, 3);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.arena().width, 1024);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_fps = Settings {
            fps: 0,
            ..Settings::default()
        };
        assert!(zero_fps.validate().is_err());

        let no_enemies = Settings {
            enemies: 0,
            ..Settings::default()
        };
        assert!(no_enemies.validate().is_err());

        let narrow = Settings {
            width: 40,
            ..Settings::default()
        };
        assert!(narrow.validate().is_err());

        let short = Settings {
            height: 30,
            ..Settings::default()
        };
        assert!(short.validate().is_err());

        let huge_width = Settings {
            width: i32::MAX,
            ..Settings::default()
        };
        assert!(huge_width.validate().is_err());

        let huge_height = Settings {
            height: MAX_ARENA_SIDE + 1,
            ..Settings::default()
        };
        assert!(huge_height.validate().is_err());

        let largest = Settings {
            width: MAX_ARENA_SIDE,
            height: MAX_ARENA_SIDE,
            ..Settings::default()
        };
        assert!(largest.validate().is_ok());
    }
}
