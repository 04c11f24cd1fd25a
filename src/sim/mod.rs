//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Randomness only through [`RandomSource`]
//! - Stable iteration order (grid cells row-major, projectiles by spawn order)
//! - No rendering or platform dependencies

pub mod entities;
pub mod game;
pub mod geometry;
pub mod grid;
pub mod rng;
pub mod wave;

#[cfg(test)]
pub(crate) mod test_support;

pub use entities::{Alien, Barrier, Projectile, ProjectileKind, Ship};
pub use game::{GamePhase, Match, MatchSummary, Outcome, PauseReason};
pub use geometry::{Rect, collides, contains};
pub use grid::AlienGrid;
pub use rng::{GameRng, RandomSource};
pub use wave::{Direction, Wave};
