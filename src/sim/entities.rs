//! Ship, alien, projectile and barrier data
//!
//! Entities are passive: they move when told to and answer containment
//! queries. The wave engine decides when either happens.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, collides};
use crate::config::GameConfig;

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal distance per move command
    pub step: f32,
    /// Inclusive x range the center may occupy
    pub min_x: f32,
    pub max_x: f32,
    pub alive: bool,
}

impl Ship {
    pub fn new(config: &GameConfig) -> Self {
        let (min_x, max_x) = config.ship_x_range();
        Self {
            pos: config.ship_spawn(),
            size: Vec2::new(config.ship_width, config.ship_height),
            step: config.ship_movement,
            min_x,
            max_x,
            alive: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn move_left(&mut self) {
        self.pos.x -= self.step;
        self.stay_on_screen();
    }

    pub fn move_right(&mut self) {
        self.pos.x += self.step;
        self.stay_on_screen();
    }

    /// Push the ship back inside its range in whole steps
    fn stay_on_screen(&mut self) {
        assert!(self.step > 0.0, "ship step must be positive (got {})", self.step);
        while self.pos.x < self.min_x {
            self.pos.x += self.step;
        }
        while self.pos.x > self.max_x {
            self.pos.x -= self.step;
        }
    }

    pub fn collides_with_enemy_projectile(&self, projectile: &Projectile) -> bool {
        projectile.kind == ProjectileKind::Enemy && collides(&self.rect(), &projectile.rect())
    }
}

/// One alien of the formation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alien {
    pub pos: Vec2,
    pub size: Vec2,
    /// Index into the alien sprite palette
    pub sprite: u8,
}

impl Alien {
    pub fn new(pos: Vec2, size: Vec2, sprite: u8) -> Self {
        Self { pos, size, sprite }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn collides_with_player_projectile(&self, projectile: &Projectile) -> bool {
        projectile.kind == ProjectileKind::Player && collides(&self.rect(), &projectile.rect())
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Player,
    Enemy,
}

/// A laser bolt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical speed magnitude per tick
    pub speed: f32,
    /// Horizontal drift applied on the latest tick
    pub drift: f32,
    kind: ProjectileKind,
}

impl Projectile {
    pub fn new(pos: Vec2, size: Vec2, speed: f32, kind: ProjectileKind) -> Self {
        Self {
            pos,
            size,
            speed,
            drift: 0.0,
            kind,
        }
    }

    /// Fixed at creation
    #[inline]
    pub fn kind(&self) -> ProjectileKind {
        self.kind
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn corners(&self) -> [Vec2; 4] {
        self.rect().corners()
    }

    pub fn move_up(&mut self) {
        self.pos.y += self.speed;
    }

    pub fn move_down(&mut self) {
        self.pos.y -= self.speed;
    }

    pub fn drift_x(&mut self, dx: f32) {
        self.pos.x += dx;
        self.drift = dx;
    }
}

/// A destructible shield between the ship and the formation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barrier {
    pub pos: Vec2,
    pub size: Vec2,
    hp: u32,
}

impl Barrier {
    pub fn new(pos: Vec2, size: Vec2, hp: u32) -> Self {
        Self { pos, size, hp }
    }

    #[inline]
    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn register_hit(&mut self) {
        self.hp = self.hp.saturating_sub(1);
    }

    pub fn is_destroyed(&self) -> bool {
        self.hp == 0
    }

    /// Bolts of either kind are stopped by barriers
    pub fn collides_with_projectile(&self, projectile: &Projectile) -> bool {
        collides(&self.rect(), &projectile.rect())
    }
}
