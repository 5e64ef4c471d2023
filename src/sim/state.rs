//! Entities and round state
//!
//! Ship, asteroids and projectiles share a [`Body`]. A body's position can
//! only be written through methods that wrap it onto the plane, so every
//! entity is always inside `[0, W) x [0, H)`.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::torus::Plane;
use crate::consts::{
    ASTEROID_MAX_TIER, ASTEROID_OUTLINE_MIN_POINTS, ASTEROID_OUTLINE_POINT_RANGE, ASTEROID_RADII,
};
use crate::settings::Tuning;
use crate::{clamp, heading_vector, vector_length};

/// State common to every simulated entity
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    position: DVec2,
    /// Pixels per second
    pub velocity: DVec2,
    /// Collision radius; `<= 0` disables collision
    pub radius: f64,
    /// Soft-delete marker, purged at the end of the tick
    pub alive: bool,
}

impl Body {
    pub fn new(position: DVec2, velocity: DVec2, radius: f64, plane: &Plane) -> Self {
        Self {
            position: plane.wrap_point(position),
            velocity,
            radius,
            alive: true,
        }
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Set the position, wrapped onto the plane; returns the stored value
    #[inline]
    pub fn set_position(&mut self, position: DVec2, plane: &Plane) -> DVec2 {
        self.position = plane.wrap_point(position);
        self.position
    }

    /// Move by `offset`, wrapping across the plane edges
    #[inline]
    pub fn translate(&mut self, offset: DVec2, plane: &Plane) -> DVec2 {
        self.set_position(self.position + offset, plane)
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        vector_length(self.velocity)
    }
}

/// Behaviour shared by ship, asteroids and projectiles
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Integrate one step of motion
    fn advance(&mut self, dt: f64, plane: &Plane) {
        let offset = self.body().velocity * dt;
        self.body_mut().translate(offset, plane);
    }

    fn collide_radius(&self) -> f64 {
        self.body().radius
    }

    fn is_alive(&self) -> bool {
        self.body().alive
    }
}

/// The player's triangular ship
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub body: Body,
    /// Radians; 0 points along +X
    pub heading: f64,
    /// Pixels/s²
    pub accel: f64,
    /// Radians/s
    pub turn_rate: f64,
    /// Pixels/s
    pub top_speed: f64,
    /// Set while the fire key is held so one press fires one shot
    pub fire_lock: bool,
}

impl Ship {
    pub fn new(position: DVec2, tuning: &Tuning) -> Self {
        Self {
            body: Body::new(position, DVec2::ZERO, tuning.ship_radius, &tuning.plane),
            heading: 0.0,
            accel: tuning.ship_accel,
            turn_rate: tuning.ship_turn_rate(),
            top_speed: tuning.ship_top_speed,
            fire_lock: false,
        }
    }

    /// Where projectiles leave the ship (two radii ahead of the center)
    pub fn nose(&self) -> DVec2 {
        self.body.position() + heading_vector(self.heading) * self.body.radius * 2.0
    }

    /// Apply turning and thrust for one step
    ///
    /// `turn_sign` and `thrust_sign` are -1, 0 or +1 (see `TickInput`).
    pub fn steer(&mut self, turn_sign: f64, thrust_sign: f64, dt: f64) {
        if turn_sign != 0.0 {
            self.heading -= self.turn_rate * dt * turn_sign;
        }
        if thrust_sign != 0.0 {
            self.body.velocity += heading_vector(self.heading) * self.accel * dt * thrust_sign;
        }
    }

    /// Edge-detect the fire key; true only on the released -> held transition
    pub fn pull_trigger(&mut self, fire_held: bool) -> bool {
        if !fire_held {
            self.fire_lock = false;
            return false;
        }
        if self.fire_lock {
            return false;
        }
        self.fire_lock = true;
        true
    }

    /// Scale velocity down to `top_speed`, never up
    pub fn cap_speed(&mut self) {
        let speed = self.body.speed();
        if speed > 0.0 {
            let capped = clamp(speed, 0.0, self.top_speed);
            self.body.velocity *= capped / speed;
        }
    }
}

impl Entity for Ship {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn advance(&mut self, dt: f64, plane: &Plane) {
        self.cap_speed();
        let offset = self.body.velocity * dt;
        self.body.translate(offset, plane);
    }
}

/// A rock of size tier 0..=2
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub body: Body,
    pub tier: u8,
    /// Decorative silhouette: sorted angle fractions in [0, 1), render-only
    pub outline: Vec<f64>,
}

impl Asteroid {
    /// Collision radius for a tier (clamped to the largest tier)
    pub fn radius_for_tier(tier: u8) -> f64 {
        ASTEROID_RADII[usize::from(tier.min(ASTEROID_MAX_TIER))]
    }

    pub fn new(position: DVec2, velocity: DVec2, tier: u8, plane: &Plane) -> Self {
        Self {
            body: Body::new(position, velocity, Self::radius_for_tier(tier), plane),
            tier: tier.min(ASTEROID_MAX_TIER),
            outline: Vec::new(),
        }
    }

    /// Spawn with a random heading, speed and silhouette
    pub fn spawn(position: DVec2, tier: u8, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let angle = rng.random::<f64>() * std::f64::consts::TAU;
        let speed = tuning.asteroid_min_speed + rng.random::<f64>() * tuning.asteroid_speed_range;
        let mut asteroid = Self::new(
            position,
            heading_vector(angle) * speed,
            tier,
            &tuning.plane,
        );
        asteroid.outline = random_outline(rng);
        asteroid
    }

    /// Tier 0 breaks into nothing
    pub fn can_split(&self) -> bool {
        self.tier > 0
    }
}

impl Entity for Asteroid {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// Evenly spread points with a small jitter each, like a lumpy polygon
pub(crate) fn random_outline(rng: &mut impl Rng) -> Vec<f64> {
    let n = ASTEROID_OUTLINE_MIN_POINTS + rng.random_range(0..ASTEROID_OUTLINE_POINT_RANGE);
    (0..n)
        .map(|i| rng.random::<f64>() / (2 * n) as f64 + i as f64 / n as f64)
        .collect()
}

/// A shot fired by the ship
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub body: Body,
    /// Seconds left to live; `None` lives until it hits an asteroid
    pub ttl: Option<f64>,
}

impl Projectile {
    pub fn new(position: DVec2, velocity: DVec2, tuning: &Tuning) -> Self {
        Self {
            body: Body::new(position, velocity, tuning.projectile_radius, &tuning.plane),
            ttl: tuning.projectile_ttl,
        }
    }
}

impl Entity for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn advance(&mut self, dt: f64, plane: &Plane) {
        let offset = self.body.velocity * dt;
        self.body.translate(offset, plane);
        if let Some(ttl) = self.ttl.as_mut() {
            *ttl -= dt;
            if *ttl <= 0.0 {
                self.body.alive = false;
            }
        }
    }
}

/// Why a round is fading out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeReason {
    /// Ship hit an asteroid; round is lost
    ShipDestroyed,
    /// Every asteroid is gone; next wave follows
    WaveCleared,
}

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundPhase {
    /// Physics runs every tick
    Playing,
    /// Physics frozen while the fade timer (seconds) runs down
    FadingOut { reason: FadeReason, timer: f64 },
}

/// One wave of play: the ship, the rocks and the shots in flight
#[derive(Debug, Clone)]
pub struct Round {
    /// Wave number (>= 1); also the number of asteroids spawned
    pub level: u32,
    pub ship: Ship,
    /// Live asteroids in spawn order
    pub asteroids: Vec<Asteroid>,
    /// Live projectiles in firing order
    pub projectiles: Vec<Projectile>,
    pub phase: RoundPhase,
    pub tuning: Tuning,
    /// Simulated seconds spent in `Playing`
    pub elapsed: f64,
    pub(crate) rng: Pcg32,
}

impl Round {
    /// Start wave `level` with `level` large asteroids ringed around the ship
    pub fn new(level: u32, tuning: Tuning, seed: u64) -> Self {
        let level = level.max(1);
        let mut round = Self::empty(level, tuning, seed);
        for position in ring_positions(level as usize, &tuning.plane) {
            let asteroid = Asteroid::spawn(position, ASTEROID_MAX_TIER, &tuning, &mut round.rng);
            round.asteroids.push(asteroid);
        }
        log::info!("Wave {} begins with {} asteroids", level, round.asteroids.len());
        round
    }

    /// A round with only the ship, for building custom scenarios
    pub fn empty(level: u32, tuning: Tuning, seed: u64) -> Self {
        Self {
            level: level.max(1),
            ship: Ship::new(tuning.plane.center(), &tuning),
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            phase: RoundPhase::Playing,
            tuning,
            elapsed: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn plane(&self) -> Plane {
        self.tuning.plane
    }

    pub fn live_projectiles(&self) -> usize {
        self.projectiles.iter().filter(|p| p.is_alive()).count()
    }

    /// Launch a projectile from the ship's nose if under the cap
    pub fn fire_projectile(&mut self) -> bool {
        if self.live_projectiles() >= self.tuning.max_projectiles {
            log::debug!("Shot ignored, {} projectiles in flight", self.live_projectiles());
            return false;
        }
        let direction = heading_vector(self.ship.heading);
        let projectile = Projectile::new(
            self.ship.nose(),
            direction * self.tuning.projectile_speed,
            &self.tuning,
        );
        self.projectiles.push(projectile);
        true
    }

    /// Enter the fade; the first reason wins
    pub fn begin_fade(&mut self, reason: FadeReason) {
        if self.phase == RoundPhase::Playing {
            self.phase = RoundPhase::FadingOut {
                reason,
                timer: self.tuning.fade_duration,
            };
        }
    }

    /// Seconds left on the fade, if fading
    pub fn fader(&self) -> Option<f64> {
        match self.phase {
            RoundPhase::FadingOut { timer, .. } if timer > 0.0 => Some(timer),
            _ => None,
        }
    }

    /// Overlay opacity: 0 while playing, rising to 1 as the fade ends
    pub fn fade_alpha(&self) -> f64 {
        self.fader()
            .map(|timer| fade_alpha(timer, self.tuning.fade_duration))
            .unwrap_or(0.0)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == RoundPhase::Playing
    }
}

/// Overlay opacity for a fade timer
pub fn fade_alpha(timer: f64, duration: f64) -> f64 {
    clamp(1.0 - timer / duration, 0.0, 1.0)
}

/// `n` evenly spaced points on an ellipse halfway between the center and the edges
pub fn ring_positions(n: usize, plane: &Plane) -> Vec<DVec2> {
    (0..n)
        .map(|i| {
            let alpha = std::f64::consts::TAU * i as f64 / n as f64;
            DVec2::new(
                plane.width * 0.5 * (1.0 + alpha.cos() * 0.5),
                plane.height * 0.5 * (1.0 + alpha.sin() * 0.5),
            )
        })
        .collect()
}
