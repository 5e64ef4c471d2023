//! Scene director
//!
//! Owns whichever scene is active (title or a round), feeds it sub-stepped
//! frame time, and performs the transitions a finished fade asks for.

use crate::settings::Settings;
use crate::sim::{Round, TickInput, TickOutcome, fade_alpha, nearest_asteroid, tick};
use crate::{clamp, normalize_angle};

/// The active scene
#[derive(Debug, Clone)]
pub enum Scene {
    /// Waiting for SPACE; `fader > 0` while fading into wave 1
    Title { fader: f64 },
    /// A wave in progress
    Round(Round),
}

/// Top-level game: settings plus the active scene
#[derive(Debug, Clone)]
pub struct Game {
    pub settings: Settings,
    pub scene: Scene,
    /// Rounds started so far, mixed into each round's seed
    rounds_started: u64,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        let mut game = Self {
            settings,
            scene: Scene::Title { fader: 0.0 },
            rounds_started: 0,
        };
        if !game.settings.title_screen {
            game.start_round(1);
        }
        game
    }

    /// Replace the active scene with a fresh round at `level`
    pub fn start_round(&mut self, level: u32) {
        let seed = self
            .settings
            .seed
            .wrapping_add(u64::from(level).wrapping_mul(2654435761))
            .wrapping_add(self.rounds_started.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        self.rounds_started += 1;
        self.scene = Scene::Round(Round::new(level, self.settings.tuning, seed));
    }

    fn show_title(&mut self) {
        log::info!("Returning to title");
        self.scene = Scene::Title { fader: 0.0 };
    }

    /// Run one frame's worth of simulation; returns the number of sub-steps
    pub fn advance(&mut self, frame_dt: f64, input: &TickInput) -> u32 {
        let (steps, dt) = split_frame(
            frame_dt,
            self.settings.max_frame_dt,
            self.settings.max_step_dt,
        );
        for _ in 0..steps {
            self.step(input, dt);
        }
        steps
    }

    /// Advance the active scene by exactly `dt` and apply any transition
    pub fn step(&mut self, input: &TickInput, dt: f64) {
        let fade_duration = self.settings.tuning.fade_duration;
        match &mut self.scene {
            Scene::Title { fader } => {
                if *fader <= 0.0 {
                    if input.fire {
                        *fader = fade_duration;
                    }
                } else {
                    *fader -= dt;
                    if *fader <= 0.0 {
                        self.start_round(1);
                    }
                }
            }
            Scene::Round(round) => match tick(round, input, dt) {
                TickOutcome::Running | TickOutcome::Fading => {}
                TickOutcome::Lost => {
                    if self.settings.title_screen {
                        self.show_title();
                    } else {
                        self.start_round(1);
                    }
                }
                TickOutcome::Cleared { next_level } => self.start_round(next_level),
            },
        }
    }

    pub fn round(&self) -> Option<&Round> {
        match &self.scene {
            Scene::Round(round) => Some(round),
            Scene::Title { .. } => None,
        }
    }

    pub fn round_mut(&mut self) -> Option<&mut Round> {
        match &mut self.scene {
            Scene::Round(round) => Some(round),
            Scene::Title { .. } => None,
        }
    }

    /// Current wave, if a round is active
    pub fn level(&self) -> Option<u32> {
        self.round().map(|r| r.level)
    }

    /// Opacity of the full-screen fade overlay
    pub fn fade_alpha(&self) -> f64 {
        match &self.scene {
            Scene::Title { fader } if *fader > 0.0 => {
                fade_alpha(*fader, self.settings.tuning.fade_duration)
            }
            Scene::Title { .. } => 0.0,
            Scene::Round(round) => round.fade_alpha(),
        }
    }

    /// Idle/demo mode: an input that plays the game by itself
    ///
    /// Aims at the nearest asteroid through the torus, taps fire when lined
    /// up, and backs off when a rock gets close.
    pub fn demo_input(&self) -> TickInput {
        let round = match &self.scene {
            Scene::Title { .. } => {
                return TickInput {
                    fire: true,
                    ..Default::default()
                };
            }
            Scene::Round(round) => round,
        };

        let ship = &round.ship;
        let Some((_, to_target)) = nearest_asteroid(round, ship.body.position()) else {
            return TickInput::default();
        };

        let bearing = to_target.y.atan2(to_target.x);
        let error = normalize_angle(bearing - ship.heading);
        let aligned = error.abs() < 0.08;

        TickInput {
            // LEFT decreases the heading
            left: error < -0.02,
            right: error > 0.02,
            up: false,
            down: to_target.length() < 100.0,
            fire: aligned && !ship.fire_lock,
        }
    }
}

/// Clamp a frame delta and cut it into equal sub-steps no longer than `max_step_dt`
///
/// Always yields at least one step so a zero-length frame still samples input.
pub fn split_frame(frame_dt: f64, max_frame_dt: f64, max_step_dt: f64) -> (u32, f64) {
    let dt = if frame_dt.is_finite() {
        clamp(frame_dt, 0.0, max_frame_dt)
    } else {
        0.0
    };
    let steps = ((dt / max_step_dt).ceil() as u32).max(1);
    (steps, dt / f64::from(steps))
}
