//! Wave engine
//!
//! One wave owns the ship, the alien formation, both barriers and every bolt
//! in flight. [`Wave::update`] advances all of it by one tick in a fixed order;
//! later phases consume what earlier phases produced.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::{Barrier, Projectile, ProjectileKind, Ship};
use super::grid::AlienGrid;
use super::rng::RandomSource;
use crate::config::GameConfig;
use crate::input::{InputSource, Key};

/// Horizontal marching direction of the formation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// A single playthrough of ship, formation, barriers and bolts
#[derive(Debug, Clone, Serialize)]
pub struct Wave {
    #[serde(skip)]
    config: GameConfig,
    ship: Ship,
    aliens: AlienGrid,
    projectiles: Vec<Projectile>,
    left_barrier: Option<Barrier>,
    right_barrier: Option<Barrier>,
    direction: Direction,
    /// Seconds since the last formation step
    time: f32,
    /// Formation steps since the last enemy shot
    steps: u32,
    /// Steps to wait before the next enemy shot, drawn after each shot
    steps_until_fire: Option<u32>,
    player_bolt_live: bool,
    kills: u32,
    missed_shots: u32,
    breached: bool,
}

impl Wave {
    /// Build a fresh wave; panics if `config` fails [`GameConfig::validate`]
    pub fn new(config: &GameConfig) -> Self {
        if let Err(e) = config.validate() {
            panic!("invalid game config: {e}");
        }
        let barrier_size = Vec2::new(config.barrier_width, config.barrier_height);
        let wave = Self {
            config: config.clone(),
            ship: Ship::new(config),
            aliens: AlienGrid::new(config),
            projectiles: Vec::new(),
            left_barrier: Some(Barrier::new(
                Vec2::new(config.left_barrier_x, config.barrier_y),
                barrier_size,
                config.barrier_hp,
            )),
            right_barrier: Some(Barrier::new(
                Vec2::new(config.right_barrier_x, config.barrier_y),
                barrier_size,
                config.barrier_hp,
            )),
            direction: Direction::Right,
            time: 0.0,
            steps: 0,
            steps_until_fire: None,
            player_bolt_live: false,
            kills: 0,
            missed_shots: 0,
            breached: false,
        };
        log::info!(
            "New wave: {}x{} aliens, barriers at {} hp",
            config.alien_rows,
            config.aliens_in_row,
            config.barrier_hp
        );
        wave
    }

    /// Advance the wave by one tick of `dt` seconds
    pub fn update(&mut self, input: &impl InputSource, dt: f32, rng: &mut impl RandomSource) {
        assert!(
            dt.is_finite() && dt >= 0.0,
            "dt must be a finite, non-negative number of seconds (got {dt})"
        );

        self.time += dt;
        self.update_ship(input);
        self.march_formation(dt);
        self.update_player_bolts(input);
        self.update_enemy_bolts(rng);
        self.resolve_ship_hits();
        self.resolve_alien_hits();
        self.check_defense_line();
        self.resolve_barrier_hits();
    }

    fn update_ship(&mut self, input: &impl InputSource) {
        if input.is_key_down(Key::Left) {
            self.ship.move_left();
        } else if input.is_key_down(Key::Right) {
            self.ship.move_right();
        }
    }

    /// Seconds between formation steps; shrinks with every kill
    pub fn step_interval(&self) -> f32 {
        self.config.alien_step_interval * self.config.speed_up.powi(self.kills as i32)
    }

    fn march_formation(&mut self, dt: f32) {
        let walk = self.config.alien_h_walk;

        if self.time >= self.step_interval() {
            self.time = 0.0;
            self.steps += 1;
            self.aliens.translate(Vec2::new(self.direction.sign() * walk, 0.0));
        }

        let right_end = self.config.formation_right_bound();
        let left_end = self.config.formation_left_bound();
        let mut reversed = false;
        for (_, alien) in self.aliens.iter() {
            if alien.pos.x > right_end {
                self.direction = Direction::Left;
                reversed = true;
            }
            if alien.pos.x < left_end {
                self.direction = Direction::Right;
                reversed = true;
            }
        }

        // Only the tick that stepped into the wall drops the formation
        if reversed && self.time < dt {
            log::trace!("Formation reversed to {:?}", self.direction);
            self.aliens.translate(Vec2::new(
                self.direction.sign() * walk,
                -self.config.alien_v_walk,
            ));
        }
    }

    fn update_player_bolts(&mut self, input: &impl InputSource) {
        if input.is_key_down(Key::Fire) && !self.player_bolt_live {
            let origin = Vec2::new(
                self.ship.pos.x,
                self.config.ship_bottom + self.config.ship_height,
            );
            self.projectiles.push(Projectile::new(
                origin,
                self.config.bolt_size(),
                self.config.bolt_speed,
                ProjectileKind::Player,
            ));
            self.player_bolt_live = true;
        }

        let top = self.config.game_height;
        let mut missed = 0;
        self.projectiles.retain_mut(|p| {
            if p.kind() != ProjectileKind::Player {
                return true;
            }
            p.move_up();
            if p.pos.y >= top {
                missed += 1;
                false
            } else {
                true
            }
        });

        if missed > 0 {
            self.missed_shots += missed;
            self.player_bolt_live = false;
            log::debug!("Player bolt missed ({} total)", self.missed_shots);
        }
    }

    fn update_enemy_bolts(&mut self, rng: &mut impl RandomSource) {
        let rate = self.config.bolt_rate as i32;
        let threshold = *self
            .steps_until_fire
            .get_or_insert_with(|| rng.range_inclusive(1, rate) as u32);

        if self.steps >= threshold {
            let occupied = self.aliens.occupied_columns();
            if occupied.is_empty() {
                log::debug!("No aliens left to fire");
            } else {
                let column = occupied[rng.index(occupied.len())];
                if let Some(shooter) = self.aliens.lowest_in_column(column) {
                    log::debug!("Alien in column {} fires from {}", column, shooter.pos);
                    self.projectiles.push(Projectile::new(
                        shooter.pos,
                        self.config.bolt_size(),
                        self.config.bolt_speed,
                        ProjectileKind::Enemy,
                    ));
                }
            }
            self.steps = 0;
            self.steps_until_fire = None;
        }

        let ship_x = self.ship.pos.x;
        let homing = self.config.heat_seeking_difficulty;
        for p in self
            .projectiles
            .iter_mut()
            .filter(|p| p.kind() == ProjectileKind::Enemy)
        {
            p.move_down();
            if p.pos.x > ship_x {
                p.drift_x(rng.range_inclusive(-homing, 0) as f32);
            } else if p.pos.x < ship_x {
                p.drift_x(rng.range_inclusive(0, homing) as f32);
            }
        }
        self.projectiles
            .retain(|p| p.kind() != ProjectileKind::Enemy || p.pos.y >= 0.0);
    }

    /// Drop every projectile whose flag is set
    fn compact_projectiles(&mut self, removed: &[bool]) {
        let mut flags = removed.iter();
        self.projectiles
            .retain(|_| !flags.next().copied().unwrap_or(false));
    }

    fn resolve_ship_hits(&mut self) {
        let removed: Vec<bool> = self
            .projectiles
            .iter()
            .map(|p| self.ship.collides_with_enemy_projectile(p))
            .collect();
        if removed.contains(&true) {
            self.ship.alive = false;
            log::debug!("Ship destroyed at {}", self.ship.pos);
            self.compact_projectiles(&removed);
        }
    }

    fn resolve_alien_hits(&mut self) {
        let mut removed = vec![false; self.projectiles.len()];
        let mut dead = Vec::new();

        for ((row, col), alien) in self.aliens.iter() {
            let hit = self
                .projectiles
                .iter()
                .enumerate()
                .find(|(i, p)| !removed[*i] && alien.collides_with_player_projectile(p));
            if let Some((i, _)) = hit {
                removed[i] = true;
                dead.push((row, col));
            }
        }

        if dead.is_empty() {
            return;
        }
        for (row, col) in dead {
            self.aliens.remove(row, col);
            self.kills += 1;
            log::debug!("Alien ({}, {}) destroyed, {} kills", row, col, self.kills);
        }
        self.player_bolt_live = false;
        self.compact_projectiles(&removed);
    }

    fn check_defense_line(&mut self) {
        let line = self.config.defense_line + self.config.alien_height / 2.0;
        if !self.breached && self.aliens.iter().any(|(_, a)| a.pos.y <= line) {
            self.breached = true;
            log::info!("Aliens crossed the defense line");
        }
    }

    fn resolve_barrier_hits(&mut self) {
        let mut removed = vec![false; self.projectiles.len()];

        for (i, p) in self.projectiles.iter().enumerate() {
            for slot in [&mut self.left_barrier, &mut self.right_barrier] {
                let Some(barrier) = slot.as_mut() else {
                    continue;
                };
                if !barrier.collides_with_projectile(p) {
                    continue;
                }
                barrier.register_hit();
                removed[i] = true;
                if p.kind() == ProjectileKind::Player {
                    self.player_bolt_live = false;
                }
                if barrier.is_destroyed() {
                    log::debug!("Barrier at {} destroyed", barrier.pos);
                    *slot = None;
                }
                break;
            }
        }

        self.compact_projectiles(&removed);
    }

    // === Queries ===

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn aliens(&self) -> &AlienGrid {
        &self.aliens
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn left_barrier(&self) -> Option<&Barrier> {
        self.left_barrier.as_ref()
    }

    pub fn right_barrier(&self) -> Option<&Barrier> {
        self.right_barrier.as_ref()
    }

    /// Left barrier hit points, 0 once destroyed
    pub fn left_barrier_hp(&self) -> u32 {
        self.left_barrier.as_ref().map_or(0, Barrier::hp)
    }

    /// Right barrier hit points, 0 once destroyed
    pub fn right_barrier_hp(&self) -> u32 {
        self.right_barrier.as_ref().map_or(0, Barrier::hp)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn missed_shots(&self) -> u32 {
        self.missed_shots
    }

    pub fn ship_alive(&self) -> bool {
        self.ship.alive
    }

    /// Sticky once any alien reaches the defense line
    pub fn breached(&self) -> bool {
        self.breached
    }

    pub fn player_bolt_live(&self) -> bool {
        self.player_bolt_live
    }

    /// True once every alien of the formation is destroyed
    pub fn cleared(&self) -> bool {
        self.kills as usize == self.config.alien_count()
    }

    /// Bring the ship back after a lost life
    pub fn revive_ship(&mut self) {
        self.ship.alive = true;
    }
}

#[cfg(test)]
impl Wave {
    pub(crate) fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    pub(crate) fn grid_mut(&mut self) -> &mut AlienGrid {
        &mut self.aliens
    }

    pub(crate) fn push_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }
}
