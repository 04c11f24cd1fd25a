//! Match state machine
//!
//! A match owns lives, score and the current phase, and drives the single
//! live [`Wave`]. Each tick runs the handler of the phase the match was in
//! when the tick started. Only the transient phases chain: spawning resolves
//! to active and resuming resolves to active or over within the tick that
//! entered them.

use serde::{Deserialize, Serialize};

use super::rng::{GameRng, RandomSource};
use super::wave::Wave;
use crate::config::{ConfigError, GameConfig};
use crate::input::{InputSource, Key};

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, no wave
    Idle,
    /// Building a fresh wave; resolves on the next tick after a restart
    Spawning,
    /// Wave is ticking
    Active,
    /// Wave frozen after a lost ship or a pause request
    Paused,
    /// Deciding between continuing and ending (lasts within a single tick)
    Resuming,
    /// Match ended
    Over,
}

/// Why the match is paused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseReason {
    ShipDestroyed,
    Requested,
}

/// How the match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    OutOfLives,
    Victory,
    Invaded,
}

impl Outcome {
    pub fn message(self) -> &'static str {
        match self {
            Outcome::OutOfLives => "YOU RAN OUT OF LIVES!",
            Outcome::Victory => "YOU WIN!",
            Outcome::Invaded => "THE ALIENS HAVE INVADED!",
        }
    }
}

pub const TITLE_MESSAGE: &str = "Press 'S' to play";
pub const TITLE_HINT: &str = "BEWARE: Aliens have guided missiles";
pub const SHIP_HIT_MESSAGE: &str = "Ship hit: Press 'S' to continue";
pub const PAUSED_MESSAGE: &str = "Paused: Press 'S' to continue";

/// Serializable end-of-run report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub phase: GamePhase,
    pub outcome: Option<Outcome>,
    pub lives: u32,
    pub score: i64,
    pub kills: u32,
    pub missed_shots: u32,
    pub ticks: u64,
}

/// One match: lives, score, phase and the live wave
#[derive(Debug, Clone)]
pub struct Match<R = GameRng> {
    config: GameConfig,
    rng: R,
    phase: GamePhase,
    wave: Option<Wave>,
    lives: u32,
    score: i64,
    pause_reason: Option<PauseReason>,
    outcome: Option<Outcome>,
    ticks: u64,
}

impl Match<GameRng> {
    /// Default tuning with a seeded generator
    pub fn with_seed(seed: u64) -> Self {
        Self::build(GameConfig::default(), GameRng::new(seed))
    }
}

impl<R: RandomSource> Match<R> {
    /// Validate `config` and start on the title screen
    pub fn new(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, rng))
    }

    fn build(config: GameConfig, rng: R) -> Self {
        let lives = config.player_lives;
        Self {
            config,
            rng,
            phase: GamePhase::Idle,
            wave: None,
            lives,
            score: 0,
            pause_reason: None,
            outcome: None,
            ticks: 0,
        }
    }

    /// Advance the match by one frame of `dt` seconds
    pub fn tick(&mut self, input: &impl InputSource, dt: f32) {
        assert!(
            dt.is_finite() && dt >= 0.0,
            "dt must be a finite, non-negative number of seconds (got {dt})"
        );
        self.ticks += 1;
        let before = self.phase;

        match self.phase {
            GamePhase::Idle => self.handle_idle(input),
            GamePhase::Spawning => self.handle_spawning(),
            GamePhase::Active => self.handle_active(input, dt),
            GamePhase::Paused => self.handle_paused(input),
            GamePhase::Resuming => self.handle_resuming(),
            GamePhase::Over => self.handle_over(input),
        }

        if self.phase != before {
            log::info!(
                "Phase {:?} -> {:?} (lives {}, score {})",
                before,
                self.phase,
                self.lives,
                self.score
            );
        }
    }

    fn handle_idle(&mut self, input: &impl InputSource) {
        if input.is_key_down(Key::Start) {
            self.phase = GamePhase::Spawning;
            self.handle_spawning();
        }
    }

    fn handle_spawning(&mut self) {
        self.wave = Some(Wave::new(&self.config));
        self.pause_reason = None;
        self.outcome = None;
        self.phase = GamePhase::Active;
    }

    fn handle_active(&mut self, input: &impl InputSource, dt: f32) {
        let wave = self
            .wave
            .as_mut()
            .expect("an active match always holds a wave");

        wave.update(input, dt, &mut self.rng);
        self.score = self.config.score(wave.kills(), wave.missed_shots());

        if !wave.ship_alive() {
            self.lives = self.lives.saturating_sub(1);
            self.pause_reason = Some(PauseReason::ShipDestroyed);
            self.phase = GamePhase::Paused;
        } else if wave.breached() {
            self.finish(Outcome::Invaded);
        } else if wave.cleared() {
            self.finish(Outcome::Victory);
        } else if input.is_key_down(Key::Pause) {
            self.pause_reason = Some(PauseReason::Requested);
            self.phase = GamePhase::Paused;
        }
    }

    fn handle_paused(&mut self, input: &impl InputSource) {
        if self.lives > 0 && !input.is_key_down(Key::Continue) {
            return;
        }
        if self.lives > 0 && self.pause_reason == Some(PauseReason::ShipDestroyed) {
            if let Some(wave) = self.wave.as_mut() {
                wave.revive_ship();
            }
        }
        self.phase = GamePhase::Resuming;
        self.handle_resuming();
    }

    fn handle_resuming(&mut self) {
        if self.lives > 0 {
            self.pause_reason = None;
            self.phase = GamePhase::Active;
        } else {
            self.finish(Outcome::OutOfLives);
        }
    }

    fn handle_over(&mut self, input: &impl InputSource) {
        if input.is_key_down(Key::Restart) {
            log::info!("Restarting after {:?}", self.outcome);
            self.wave = None;
            self.lives = self.config.player_lives;
            self.score = 0;
            self.phase = GamePhase::Spawning;
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
        self.phase = GamePhase::Over;
    }

    // === Queries ===

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// `kills * points_per_kill - missed_shots * miss_penalty` as of the last active tick
    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn wave(&self) -> Option<&Wave> {
        self.wave.as_ref()
    }

    pub fn pause_reason(&self) -> Option<PauseReason> {
        self.pause_reason
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Headline text for the current phase, if any
    pub fn message(&self) -> Option<&'static str> {
        match self.phase {
            GamePhase::Idle => Some(TITLE_MESSAGE),
            GamePhase::Paused => match self.pause_reason {
                Some(PauseReason::ShipDestroyed) => Some(SHIP_HIT_MESSAGE),
                Some(PauseReason::Requested) => Some(PAUSED_MESSAGE),
                None => None,
            },
            GamePhase::Over => self.outcome.map(Outcome::message),
            GamePhase::Spawning | GamePhase::Active | GamePhase::Resuming => None,
        }
    }

    /// Secondary title-screen text
    pub fn hint(&self) -> Option<&'static str> {
        (self.phase == GamePhase::Idle).then_some(TITLE_HINT)
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            phase: self.phase,
            outcome: self.outcome,
            lives: self.lives,
            score: self.score,
            kills: self.wave.as_ref().map_or(0, Wave::kills),
            missed_shots: self.wave.as_ref().map_or(0, Wave::missed_shots),
            ticks: self.ticks,
        }
    }

    #[cfg(test)]
    pub(crate) fn wave_mut(&mut self) -> Option<&mut Wave> {
        self.wave.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::TickInput;
    use crate::sim::entities::Alien;
    use glam::Vec2;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn press(f: impl FnOnce(&mut TickInput)) -> TickInput {
        let mut input = TickInput::default();
        f(&mut input);
        input
    }

    fn started(config: GameConfig) -> Match {
        let mut game = Match::new(config, GameRng::new(77)).unwrap();
        game.tick(&press(|i| i.start = true), 0.0);
        game
    }

    /// One-alien formation with the alien placed at `pos`
    fn single_alien(pos: Vec2) -> Match {
        let config = GameConfig {
            alien_rows: 1,
            aliens_in_row: 1,
            ..GameConfig::default()
        };
        let mut game = started(config);
        let wave = game.wave_mut().unwrap();
        wave.grid_mut().get_mut(0, 0).unwrap().pos = pos;
        game
    }

    fn destroy_ship(game: &mut Match) {
        game.wave_mut().unwrap().ship_mut().alive = false;
    }

    #[test]
    fn test_idle_until_start() {
        let mut game = Match::with_seed(1);
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.message(), Some(TITLE_MESSAGE));
        assert_eq!(game.hint(), Some(TITLE_HINT));

        game.tick(&TickInput::default(), DT);
        assert_eq!(game.phase(), GamePhase::Idle);
        assert!(game.wave().is_none());

        // Spawning resolves within the same tick
        game.tick(&press(|i| i.start = true), DT);
        assert_eq!(game.phase(), GamePhase::Active);
        let wave = game.wave().unwrap();
        assert_eq!(wave.kills(), 0);
        assert_eq!(game.lives(), game.config().player_lives);
        assert_eq!(game.message(), None);
    }

    #[test]
    fn test_last_life_lost_ends_match() {
        let config = GameConfig {
            player_lives: 1,
            ..GameConfig::default()
        };
        let mut game = started(config);
        destroy_ship(&mut game);

        game.tick(&TickInput::default(), 0.0);
        assert_eq!(game.phase(), GamePhase::Paused);
        assert_eq!(game.lives(), 0);

        // No key needed with zero lives: Paused -> Resuming -> Over
        game.tick(&TickInput::default(), 0.0);
        assert_eq!(game.phase(), GamePhase::Over);
        assert_eq!(game.outcome(), Some(Outcome::OutOfLives));
        assert_eq!(game.message(), Some("YOU RAN OUT OF LIVES!"));
    }

    #[test]
    fn test_death_pause_shown_even_with_continue_held() {
        let mut game = started(GameConfig::default());
        destroy_ship(&mut game);
        let resume = press(|i| i.resume = true);

        game.tick(&resume, 0.0);
        assert_eq!(game.phase(), GamePhase::Paused);
        assert_eq!(game.message(), Some(SHIP_HIT_MESSAGE));
        assert!(!game.wave().unwrap().ship_alive());

        game.tick(&resume, 0.0);
        assert_eq!(game.phase(), GamePhase::Active);
        assert!(game.wave().unwrap().ship_alive());
    }

    #[test]
    fn test_last_life_with_continue_held_still_pauses_first() {
        let config = GameConfig {
            player_lives: 1,
            ..GameConfig::default()
        };
        let mut game = started(config);
        destroy_ship(&mut game);
        let resume = press(|i| i.resume = true);

        game.tick(&resume, 0.0);
        assert_eq!(game.phase(), GamePhase::Paused);
        game.tick(&resume, 0.0);
        assert_eq!(game.phase(), GamePhase::Over);
        assert!(!game.wave().unwrap().ship_alive());
    }

    #[test]
    fn test_over_screen_shown_with_restart_held() {
        let mut game = single_alien(Vec2::new(400.0, 110.0));
        let restart = press(|i| i.restart = true);

        game.tick(&restart, 0.0);
        assert_eq!(game.phase(), GamePhase::Over);
        assert_eq!(game.outcome(), Some(Outcome::Invaded));
        assert!(game.wave().is_some());

        game.tick(&restart, 0.0);
        assert_eq!(game.phase(), GamePhase::Spawning);
    }

    #[test]
    fn test_ship_hit_waits_for_continue() {
        let mut game = started(GameConfig::default());
        destroy_ship(&mut game);
        game.tick(&TickInput::default(), 0.0);
        assert_eq!(game.phase(), GamePhase::Paused);
        assert_eq!(game.lives(), 2);
        assert_eq!(game.pause_reason(), Some(PauseReason::ShipDestroyed));
        assert_eq!(game.message(), Some(SHIP_HIT_MESSAGE));

        // Frozen while paused
        let x = game.wave().unwrap().ship().pos.x;
        game.tick(&press(|i| i.left = true), DT);
        assert_eq!(game.phase(), GamePhase::Paused);
        assert_eq!(game.wave().unwrap().ship().pos.x, x);

        game.tick(&press(|i| i.resume = true), DT);
        assert_eq!(game.phase(), GamePhase::Active);
        assert!(game.wave().unwrap().ship_alive());
        assert_eq!(game.lives(), 2);
    }

    #[test]
    fn test_user_pause_and_resume() {
        let mut game = started(GameConfig::default());
        game.tick(&press(|i| i.pause = true), DT);
        assert_eq!(game.phase(), GamePhase::Paused);
        assert_eq!(game.pause_reason(), Some(PauseReason::Requested));
        assert_eq!(game.message(), Some(PAUSED_MESSAGE));
        assert_eq!(game.lives(), game.config().player_lives);

        game.tick(&press(|i| i.resume = true), DT);
        assert_eq!(game.phase(), GamePhase::Active);
        assert_eq!(game.pause_reason(), None);
    }

    #[test]
    fn test_clearing_formation_wins() {
        let mut game = single_alien(Vec2::new(400.0, 200.0));
        let fire = press(|i| i.fire = true);

        for _ in 0..30 {
            if game.phase() != GamePhase::Active {
                break;
            }
            game.tick(&fire, 0.0);
        }

        assert_eq!(game.phase(), GamePhase::Over);
        assert_eq!(game.outcome(), Some(Outcome::Victory));
        assert_eq!(game.message(), Some("YOU WIN!"));
        assert_eq!(game.score(), game.config().points_per_kill);
        assert!(game.wave().unwrap().ship_alive());
    }

    #[test]
    fn test_breach_ends_match() {
        let mut game = single_alien(Vec2::new(400.0, 110.0));
        game.tick(&TickInput::default(), 0.0);
        assert_eq!(game.phase(), GamePhase::Over);
        assert_eq!(game.outcome(), Some(Outcome::Invaded));
        assert_eq!(game.message(), Some("THE ALIENS HAVE INVADED!"));
    }

    #[test]
    fn test_ship_loss_takes_precedence_over_breach() {
        let mut game = single_alien(Vec2::new(400.0, 110.0));
        destroy_ship(&mut game);
        game.tick(&TickInput::default(), 0.0);
        assert_eq!(game.phase(), GamePhase::Paused);
    }

    #[test]
    fn test_restart_after_win_starts_fresh_match() {
        let mut game = single_alien(Vec2::new(400.0, 200.0));
        let fire = press(|i| i.fire = true);
        while game.phase() == GamePhase::Active {
            game.tick(&fire, 0.0);
        }
        assert_eq!(game.outcome(), Some(Outcome::Victory));

        game.tick(&press(|i| i.restart = true), DT);
        assert_eq!(game.phase(), GamePhase::Spawning);
        assert!(game.wave().is_none());
        assert_eq!(game.score(), 0);

        game.tick(&TickInput::default(), DT);
        assert_eq!(game.phase(), GamePhase::Active);
        assert_eq!(game.outcome(), None);
        assert_eq!(game.wave().unwrap().kills(), 0);
        assert_eq!(game.lives(), game.config().player_lives);
    }

    #[test]
    fn test_restart_after_loss() {
        let config = GameConfig {
            player_lives: 1,
            ..GameConfig::default()
        };
        let mut game = started(config);
        destroy_ship(&mut game);
        game.tick(&TickInput::default(), 0.0);
        game.tick(&TickInput::default(), 0.0);
        assert_eq!(game.phase(), GamePhase::Over);

        game.tick(&press(|i| i.restart = true), 0.0);
        game.tick(&TickInput::default(), 0.0);
        assert_eq!(game.phase(), GamePhase::Active);
        assert_eq!(game.lives(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            player_lives: 0,
            ..GameConfig::default()
        };
        assert!(Match::new(config, GameRng::new(0)).is_err());
    }

    #[test]
    fn test_summary_reports_wave_counters() {
        let mut game = single_alien(Vec2::new(400.0, 200.0));
        let fire = press(|i| i.fire = true);
        while game.phase() == GamePhase::Active {
            game.tick(&fire, 0.0);
        }
        let summary = game.summary();
        assert_eq!(summary.kills, 1);
        assert_eq!(summary.outcome, Some(Outcome::Victory));
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"Victory\""));
    }

    #[test]
    #[should_panic(expected = "dt must be")]
    fn test_nan_dt_is_rejected() {
        let mut game = Match::with_seed(1);
        game.tick(&TickInput::default(), f32::NAN);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_score_tracks_wave_counters(
            seed in any::<u64>(),
            inputs in prop::collection::vec(any::<(bool, bool, bool, bool, bool)>(), 1..900),
        ) {
            let mut game = Match::with_seed(seed);
            let mut lives = game.lives();
            for (left, right, fire, pause, resume) in inputs {
                let input = TickInput {
                    left,
                    right,
                    fire,
                    pause,
                    resume,
                    start: true,
                    restart: false,
                };
                game.tick(&input, DT);

                prop_assert!(game.lives() <= lives);
                lives = game.lives();
                if let Some(wave) = game.wave() {
                    prop_assert_eq!(game.score(), game.config().score(wave.kills(), wave.missed_shots()));
                }
                prop_assert!(game.phase() != GamePhase::Spawning && game.phase() != GamePhase::Resuming);
            }
        }
    }

    #[test]
    fn test_alien_grid_untouched_while_paused() {
        let mut game = started(GameConfig::default());
        game.tick(&press(|i| i.pause = true), DT);
        let before: Vec<Alien> = game.wave().unwrap().aliens().iter().map(|(_, a)| a.clone()).collect();
        for _ in 0..120 {
            game.tick(&TickInput::default(), DT);
        }
        let after: Vec<Alien> = game.wave().unwrap().aliens().iter().map(|(_, a)| a.clone()).collect();
        assert_eq!(before.len(), after.len());
        for (a, b) in before.iter().zip(&after) {
            assert_eq!(a.pos, b.pos);
        }
    }
}
