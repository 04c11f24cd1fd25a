//! Alien Invaders - simulation core of a fixed-grid arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, wave engine, match phases)
//! - `config`: Immutable gameplay tunables, loadable from JSON
//! - `input`: Abstract key-state query consumed by the simulation
//! - `renderer`: Plain draw-command description of a frame

pub mod config;
pub mod input;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use input::{InputSource, Key, TickInput};
pub use sim::{GamePhase, GameRng, Match, Outcome, RandomSource, Wave};
pub use renderer::{DrawCmd, Renderer};

/// Default gameplay constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 700.0;

    /// Ship
    pub const SHIP_WIDTH: f32 = 44.0;
    pub const SHIP_HEIGHT: f32 = 44.0;
    pub const SHIP_BOTTOM: f32 = 32.0;
    pub const SHIP_MOVEMENT: f32 = 5.0;
    pub const SHIP_SPAWN_X: f32 = 400.0;

    /// Aliens
    pub const ALIEN_WIDTH: f32 = 33.0;
    pub const ALIEN_HEIGHT: f32 = 33.0;
    pub const ALIEN_H_SEP: f32 = 16.0;
    pub const ALIEN_V_SEP: f32 = 16.0;
    pub const ALIEN_CEILING: f32 = 100.0;
    pub const ALIEN_ROWS: usize = 5;
    pub const ALIENS_IN_ROW: usize = 12;
    pub const ALIEN_H_WALK: f32 = 8.0; // ALIEN_WIDTH / 4, truncated
    pub const ALIEN_V_WALK: f32 = 16.0; // ALIEN_HEIGHT / 2, truncated
    /// Seconds between formation steps before any speed-up
    pub const ALIEN_SPEED: f32 = 1.0;
    /// Step interval multiplier per kill (interval * SPEED_UP^kills)
    pub const SPEED_UP: f32 = 0.97;
    /// Number of alien sprites; every two rows share one
    pub const ALIEN_SPRITES: u8 = 3;

    /// Aliens at or below this line (plus half their height) have invaded
    pub const DEFENSE_LINE: f32 = 100.0;

    /// Laser bolts
    pub const BOLT_WIDTH: f32 = 4.0;
    pub const BOLT_HEIGHT: f32 = 16.0;
    pub const BOLT_SPEED: f32 = 10.0;
    /// Upper bound (in formation steps) of the random enemy fire delay
    pub const BOLT_RATE: u32 = 5;
    /// Max horizontal homing per tick for enemy bolts
    pub const HEAT_SEEKING_DIFFICULTY: i32 = 2;

    /// Barriers
    pub const BARRIER_WIDTH: f32 = 100.0;
    pub const BARRIER_HEIGHT: f32 = 20.0;
    pub const BARRIER_HP: u32 = 10;
    pub const LEFT_BARRIER_X: f32 = 200.0;
    pub const RIGHT_BARRIER_X: f32 = 600.0;
    pub const BARRIER_Y: f32 = 150.0;

    /// Match
    pub const PLAYER_LIVES: u32 = 3;
    pub const POINTS_PER_KILL: i64 = 100;
    pub const MISS_PENALTY: i64 = 25;
}
