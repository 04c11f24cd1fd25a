//! Frame description module
//!
//! The simulation never draws. [`frame`] turns a [`Match`] into a flat list
//! of [`DrawCmd`]s in painter's order; a front end only has to implement
//! [`Renderer`] to display it.

pub mod ascii;

use glam::Vec2;

use crate::sim::{GamePhase, Match, ProjectileKind, RandomSource, Wave};

pub use ascii::AsciiCanvas;

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const DEFENSE_LINE: [f32; 4] = [0.3, 0.3, 0.4, 1.0];
    pub const SHIP: [f32; 4] = [0.2, 0.8, 0.4, 1.0];
    pub const PLAYER_BOLT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const ENEMY_BOLT: [f32; 4] = [1.0, 0.4, 0.2, 1.0];
    pub const BARRIER: [f32; 4] = [0.4, 0.7, 1.0, 1.0];
    pub const HUD: [f32; 4] = [0.9, 0.9, 0.9, 1.0];
    pub const MESSAGE: [f32; 4] = [0.9, 0.85, 0.3, 1.0]; // Gold/yellow

    /// One tint per alien sprite, cycled if the palette is larger
    pub const ALIENS: [[f32; 4]; 3] = [
        [0.6, 0.2, 0.8, 1.0],
        [0.2, 0.6, 1.0, 1.0],
        [1.0, 0.3, 0.5, 1.0],
    ];
}

/// What a sprite command depicts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sprite {
    Ship,
    /// Alien with its palette index
    Alien(u8),
    PlayerBolt,
    EnemyBolt,
    /// Barrier with remaining hit points
    Barrier(u32),
}

impl Sprite {
    pub fn color(self) -> [f32; 4] {
        match self {
            Sprite::Ship => colors::SHIP,
            Sprite::Alien(i) => colors::ALIENS[i as usize % colors::ALIENS.len()],
            Sprite::PlayerBolt => colors::PLAYER_BOLT,
            Sprite::EnemyBolt => colors::ENEMY_BOLT,
            Sprite::Barrier(_) => colors::BARRIER,
        }
    }
}

/// Horizontal anchoring of a text label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One drawing instruction in playfield coordinates (y up)
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear {
        color: [f32; 4],
    },
    Sprite {
        sprite: Sprite,
        center: Vec2,
        size: Vec2,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: [f32; 4],
    },
    Text {
        text: String,
        pos: Vec2,
        align: Align,
        color: [f32; 4],
    },
}

/// Anything that can display draw commands
pub trait Renderer {
    fn draw(&mut self, cmd: &DrawCmd);
}

impl Renderer for Vec<DrawCmd> {
    fn draw(&mut self, cmd: &DrawCmd) {
        self.push(cmd.clone());
    }
}

/// Describe the current frame of a match
pub fn frame<R: RandomSource>(game: &Match<R>) -> Vec<DrawCmd> {
    let config = game.config();
    let size = Vec2::new(config.game_width, config.game_height);
    let center = size / 2.0;

    let mut cmds = vec![DrawCmd::Clear {
        color: colors::BACKGROUND,
    }];

    if game.phase() == GamePhase::Idle {
        push_message(&mut cmds, game.message(), center);
        if let Some(hint) = game.hint() {
            cmds.push(DrawCmd::Text {
                text: hint.to_string(),
                pos: center - Vec2::new(0.0, 40.0),
                align: Align::Center,
                color: colors::HUD,
            });
        }
        return cmds;
    }

    if let Some(wave) = game.wave() {
        push_wave(&mut cmds, wave);
        push_hud(&mut cmds, game, wave, size);
    }
    push_message(&mut cmds, game.message(), center);

    cmds
}

/// Draw a match through any renderer
pub fn render<R: RandomSource>(game: &Match<R>, renderer: &mut impl Renderer) {
    for cmd in frame(game) {
        renderer.draw(&cmd);
    }
}

fn push_wave(cmds: &mut Vec<DrawCmd>, wave: &Wave) {
    let config = wave.config();

    cmds.push(DrawCmd::Line {
        from: Vec2::new(0.0, config.defense_line),
        to: Vec2::new(config.game_width, config.defense_line),
        color: colors::DEFENSE_LINE,
    });

    for (_, alien) in wave.aliens().iter() {
        cmds.push(DrawCmd::Sprite {
            sprite: Sprite::Alien(alien.sprite),
            center: alien.pos,
            size: alien.size,
        });
    }

    for barrier in [wave.left_barrier(), wave.right_barrier()].into_iter().flatten() {
        cmds.push(DrawCmd::Sprite {
            sprite: Sprite::Barrier(barrier.hp()),
            center: barrier.pos,
            size: barrier.size,
        });
    }

    let ship = wave.ship();
    if ship.alive {
        cmds.push(DrawCmd::Sprite {
            sprite: Sprite::Ship,
            center: ship.pos,
            size: ship.size,
        });
    }

    for p in wave.projectiles() {
        let sprite = match p.kind() {
            ProjectileKind::Player => Sprite::PlayerBolt,
            ProjectileKind::Enemy => Sprite::EnemyBolt,
        };
        cmds.push(DrawCmd::Sprite {
            sprite,
            center: p.pos,
            size: p.size,
        });
    }
}

fn push_hud<R: RandomSource>(cmds: &mut Vec<DrawCmd>, game: &Match<R>, wave: &Wave, size: Vec2) {
    let y = size.y - 20.0;
    let labels = [
        (format!("Score: {}", game.score()), 10.0, Align::Left),
        (format!("Lives: {}", game.lives()), size.x * 0.35, Align::Center),
        (format!("Missed: {}", wave.missed_shots()), size.x * 0.6, Align::Center),
        (
            format!(
                "Barriers: {} / {}",
                wave.left_barrier_hp(),
                wave.right_barrier_hp()
            ),
            size.x - 10.0,
            Align::Right,
        ),
    ];
    for (text, x, align) in labels {
        cmds.push(DrawCmd::Text {
            text,
            pos: Vec2::new(x, y),
            align,
            color: colors::HUD,
        });
    }
}

fn push_message(cmds: &mut Vec<DrawCmd>, message: Option<&str>, center: Vec2) {
    if let Some(text) = message {
        cmds.push(DrawCmd::Text {
            text: text.to_string(),
            pos: center,
            align: Align::Center,
            color: colors::MESSAGE,
        });
    }
}
