//! Gameplay configuration
//!
//! Every tunable of a match lives in [`GameConfig`]. It is built once, checked
//! with [`GameConfig::validate`], and then handed by value to the match and
//! every wave it spawns; nothing in the simulation reads ambient globals.
//!
//! Missing keys in a JSON file fall back to the defaults in [`crate::consts`],
//! so a minimal file can override just the values you care about:
//!
//! ```json
//! { "alien_rows": 3, "aliens_in_row": 8, "player_lives": 5 }
//! ```

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors produced while loading or validating a [`GameConfig`]
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read
    Io(std::io::Error),
    /// The config text is not valid JSON for [`GameConfig`]
    Parse(serde_json::Error),
    /// A value is outside its usable range
    Invalid {
        /// Name of the offending field
        field: &'static str,
        /// Human-readable description of the accepted range
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {e}"),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid config value `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Immutable gameplay tunables for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub game_width: f32,
    pub game_height: f32,

    // === Ship ===
    pub ship_width: f32,
    pub ship_height: f32,
    /// Ship center y
    pub ship_bottom: f32,
    pub ship_spawn_x: f32,
    /// Horizontal distance per move command
    pub ship_movement: f32,

    // === Alien formation ===
    pub alien_width: f32,
    pub alien_height: f32,
    pub alien_h_sep: f32,
    pub alien_v_sep: f32,
    /// Gap between the top of the playfield and the top row
    pub alien_ceiling: f32,
    pub alien_rows: usize,
    pub aliens_in_row: usize,
    pub alien_h_walk: f32,
    pub alien_v_walk: f32,
    /// Seconds between formation steps with no kills
    pub alien_step_interval: f32,
    /// Interval multiplier applied once per kill
    pub speed_up: f32,
    pub alien_sprites: u8,
    pub defense_line: f32,

    // === Bolts ===
    pub bolt_width: f32,
    pub bolt_height: f32,
    pub bolt_speed: f32,
    /// Enemy fire delay is drawn from `1..=bolt_rate` formation steps
    pub bolt_rate: u32,
    pub heat_seeking_difficulty: i32,

    // === Barriers ===
    pub barrier_width: f32,
    pub barrier_height: f32,
    pub barrier_hp: u32,
    pub left_barrier_x: f32,
    pub right_barrier_x: f32,
    pub barrier_y: f32,

    // === Scoring ===
    pub player_lives: u32,
    pub points_per_kill: i64,
    pub miss_penalty: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_width: GAME_WIDTH,
            game_height: GAME_HEIGHT,

            ship_width: SHIP_WIDTH,
            ship_height: SHIP_HEIGHT,
            ship_bottom: SHIP_BOTTOM,
            ship_spawn_x: SHIP_SPAWN_X,
            ship_movement: SHIP_MOVEMENT,

            alien_width: ALIEN_WIDTH,
            alien_height: ALIEN_HEIGHT,
            alien_h_sep: ALIEN_H_SEP,
            alien_v_sep: ALIEN_V_SEP,
            alien_ceiling: ALIEN_CEILING,
            alien_rows: ALIEN_ROWS,
            aliens_in_row: ALIENS_IN_ROW,
            alien_h_walk: ALIEN_H_WALK,
            alien_v_walk: ALIEN_V_WALK,
            alien_step_interval: ALIEN_SPEED,
            speed_up: SPEED_UP,
            alien_sprites: ALIEN_SPRITES,
            defense_line: DEFENSE_LINE,

            bolt_width: BOLT_WIDTH,
            bolt_height: BOLT_HEIGHT,
            bolt_speed: BOLT_SPEED,
            bolt_rate: BOLT_RATE,
            heat_seeking_difficulty: HEAT_SEEKING_DIFFICULTY,

            barrier_width: BARRIER_WIDTH,
            barrier_height: BARRIER_HEIGHT,
            barrier_hp: BARRIER_HP,
            left_barrier_x: LEFT_BARRIER_X,
            right_barrier_x: RIGHT_BARRIER_X,
            barrier_y: BARRIER_Y,

            player_lives: PLAYER_LIVES,
            points_per_kill: POINTS_PER_KILL,
            miss_penalty: MISS_PENALTY,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON text and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    /// Check that every value is inside the range the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a finite number greater than zero",
                })
            }
        }

        positive("game_width", self.game_width)?;
        positive("game_height", self.game_height)?;
        positive("ship_width", self.ship_width)?;
        positive("ship_height", self.ship_height)?;
        positive("ship_movement", self.ship_movement)?;
        positive("alien_width", self.alien_width)?;
        positive("alien_height", self.alien_height)?;
        positive("alien_h_walk", self.alien_h_walk)?;
        positive("alien_v_walk", self.alien_v_walk)?;
        positive("alien_step_interval", self.alien_step_interval)?;
        positive("bolt_width", self.bolt_width)?;
        positive("bolt_height", self.bolt_height)?;
        positive("bolt_speed", self.bolt_speed)?;
        positive("barrier_width", self.barrier_width)?;
        positive("barrier_height", self.barrier_height)?;

        if self.alien_rows == 0 {
            return Err(ConfigError::Invalid {
                field: "alien_rows",
                reason: "must be at least 1",
            });
        }
        if self.aliens_in_row == 0 {
            return Err(ConfigError::Invalid {
                field: "aliens_in_row",
                reason: "must be at least 1",
            });
        }
        if self.alien_sprites == 0 {
            return Err(ConfigError::Invalid {
                field: "alien_sprites",
                reason: "must be at least 1",
            });
        }
        if !(self.speed_up > 0.0 && self.speed_up <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "speed_up",
                reason: "must be in (0, 1]",
            });
        }
        if self.bolt_rate == 0 {
            return Err(ConfigError::Invalid {
                field: "bolt_rate",
                reason: "must be at least 1",
            });
        }
        if self.heat_seeking_difficulty < 0 {
            return Err(ConfigError::Invalid {
                field: "heat_seeking_difficulty",
                reason: "must not be negative",
            });
        }
        if self.barrier_hp == 0 {
            return Err(ConfigError::Invalid {
                field: "barrier_hp",
                reason: "must be at least 1",
            });
        }
        if self.player_lives == 0 {
            return Err(ConfigError::Invalid {
                field: "player_lives",
                reason: "must be at least 1",
            });
        }
        let (min_x, max_x) = self.ship_x_range();
        if max_x - min_x < self.ship_movement {
            return Err(ConfigError::Invalid {
                field: "ship_width",
                reason: "ship travel range must be at least one movement step wide",
            });
        }
        if !(min_x..=max_x).contains(&self.ship_spawn_x) {
            return Err(ConfigError::Invalid {
                field: "ship_spawn_x",
                reason: "must lie inside the ship travel range",
            });
        }
        Ok(())
    }

    /// Total number of aliens in a fresh wave
    pub fn alien_count(&self) -> usize {
        self.alien_rows * self.aliens_in_row
    }

    /// Inclusive x range the ship center may occupy
    pub fn ship_x_range(&self) -> (f32, f32) {
        let half = self.ship_width / 2.0;
        (half, self.game_width - half)
    }

    /// Alien x beyond which the formation turns back left
    pub fn formation_right_bound(&self) -> f32 {
        self.game_width - self.alien_h_sep - self.alien_width / 2.0
    }

    /// Alien x below which the formation turns back right
    pub fn formation_left_bound(&self) -> f32 {
        self.alien_h_sep + self.alien_width / 2.0
    }

    /// Where the ship spawns
    pub fn ship_spawn(&self) -> Vec2 {
        Vec2::new(self.ship_spawn_x, self.ship_bottom)
    }

    /// Bolt dimensions
    pub fn bolt_size(&self) -> Vec2 {
        Vec2::new(self.bolt_width, self.bolt_height)
    }

    /// Score for a wave's kill and miss counts
    pub fn score(&self, kills: u32, misses: u32) -> i64 {
        kills as i64 * self.points_per_kill - misses as i64 * self.miss_penalty
    }
}
