//! Simulation tick
//!
//! One call advances a round by `dt` seconds: move everything, find every
//! overlapping pair, apply the outcomes, drop the dead, then let the wave
//! controller look at what is left.

use glam::DVec2;

use super::collision::{Contact, circle_circle_collision, set_velocity_component_sign};
use super::state::{Asteroid, Entity, FadeReason, Round, RoundPhase, random_outline};
use super::torus::Plane;
use crate::consts::{
    FRAGMENT_EJECT_SIGNS, THRUST_SIGN_FORWARD, THRUST_SIGN_REVERSE, TURN_SIGN_LEFT,
    TURN_SIGN_RIGHT,
};
use crate::platform::{InputState, Key};

/// Held keys for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

impl TickInput {
    /// Snapshot the latched key state
    pub fn from_input(input: &InputState) -> Self {
        Self {
            left: input.is_down(Key::Left),
            right: input.is_down(Key::Right),
            up: input.is_down(Key::Up),
            down: input.is_down(Key::Down),
            fire: input.is_down(Key::Space),
        }
    }

    /// Turn direction; opposing keys cancel
    pub fn turn_sign(&self) -> f64 {
        match (self.left, self.right) {
            (true, false) => TURN_SIGN_LEFT,
            (false, true) => TURN_SIGN_RIGHT,
            _ => 0.0,
        }
    }

    /// Thrust direction; opposing keys cancel
    pub fn thrust_sign(&self) -> f64 {
        match (self.up, self.down) {
            (true, false) => THRUST_SIGN_FORWARD,
            (false, true) => THRUST_SIGN_REVERSE,
            _ => 0.0,
        }
    }
}

/// What the round looks like after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still playing
    Running,
    /// Frozen behind the fade overlay
    Fading,
    /// Fade finished after the ship was destroyed
    Lost,
    /// Fade finished after the wave was cleared
    Cleared { next_level: u32 },
}

/// Advance the round by `dt` seconds
pub fn tick(round: &mut Round, input: &TickInput, dt: f64) -> TickOutcome {
    if let RoundPhase::FadingOut { reason, timer } = round.phase {
        let timer = timer - dt;
        round.phase = RoundPhase::FadingOut {
            reason,
            timer: timer.max(0.0),
        };
        if timer > 0.0 {
            return TickOutcome::Fading;
        }
        return match reason {
            FadeReason::ShipDestroyed => TickOutcome::Lost,
            FadeReason::WaveCleared => TickOutcome::Cleared {
                next_level: round.level + 1,
            },
        };
    }

    round.elapsed += dt;

    move_entities(round, input, dt);
    resolve_collisions(round);
    prune_dead(round);
    check_population(round)
}

/// Projectiles, then asteroids, then the ship (which may fire)
fn move_entities(round: &mut Round, input: &TickInput, dt: f64) {
    let plane = round.plane();

    for projectile in &mut round.projectiles {
        projectile.advance(dt, &plane);
    }
    for asteroid in &mut round.asteroids {
        asteroid.advance(dt, &plane);
    }

    round.ship.steer(input.turn_sign(), input.thrust_sign(), dt);
    if round.ship.pull_trigger(input.fire) && round.fire_projectile() {
        log::debug!(
            "Fired projectile ({} in flight)",
            round.live_projectiles()
        );
    }
    round.ship.advance(dt, &plane);
}

/// Ship hits, then projectile hits, then asteroid bounces
///
/// Fragments are appended after the scan and join collision checks next tick.
fn resolve_collisions(round: &mut Round) {
    let plane = round.plane();

    let ship_hit = round
        .asteroids
        .iter()
        .any(|a| circle_circle_collision(&a.body, &round.ship.body, &plane).is_some());
    if ship_hit && round.is_playing() {
        log::info!("Ship destroyed on wave {}", round.level);
        round.begin_fade(FadeReason::ShipDestroyed);
    }

    let Round {
        asteroids,
        projectiles,
        tuning,
        rng,
        ..
    } = round;

    let mut fragments = Vec::new();
    for asteroid in asteroids.iter_mut() {
        for projectile in projectiles.iter_mut() {
            let Some(contact) = circle_circle_collision(&asteroid.body, &projectile.body, &plane)
            else {
                continue;
            };
            asteroid.body.alive = false;
            projectile.body.alive = false;

            let pieces = split_asteroid(asteroid, &contact, tuning.fragment_speed_factor, &plane);
            log::debug!(
                "Tier {} asteroid destroyed, {} fragments",
                asteroid.tier,
                pieces.len()
            );
            for mut piece in pieces {
                piece.outline = random_outline(rng);
                fragments.push(piece);
            }
            break;
        }
    }

    bounce_asteroids(asteroids, &plane);
    asteroids.extend(fragments);
}

/// Break an asteroid hit along `contact` (asteroid -> projectile)
///
/// Tier `k > 0` yields two tier `k - 1` fragments placed one parent radius
/// either side of the center, perpendicular to the impact, flying apart at
/// `speed_factor` times the parent's speed. Tier 0 yields nothing.
pub fn split_asteroid(
    parent: &Asteroid,
    contact: &Contact,
    speed_factor: f64,
    plane: &Plane,
) -> Vec<Asteroid> {
    if !parent.can_split() {
        return Vec::new();
    }

    let eject = contact.normal().perp();
    let speed = parent.body.speed() * speed_factor;
    let offset = Asteroid::radius_for_tier(parent.tier);
    let center = parent.body.position();

    FRAGMENT_EJECT_SIGNS
        .iter()
        .map(|&sign| {
            Asteroid::new(
                center + eject * offset * sign,
                eject * speed * sign,
                parent.tier - 1,
                plane,
            )
        })
        .collect()
}

/// Push every overlapping pair apart along their collision normal
fn bounce_asteroids(asteroids: &mut [Asteroid], plane: &Plane) {
    for j in 1..asteroids.len() {
        let (head, tail) = asteroids.split_at_mut(j);
        let b = &mut tail[0];
        for a in head.iter_mut() {
            let Some(contact) = circle_circle_collision(&a.body, &b.body, plane) else {
                continue;
            };
            let normal = contact.normal();
            a.body.velocity = set_velocity_component_sign(a.body.velocity, -1.0, normal);
            b.body.velocity = set_velocity_component_sign(b.body.velocity, -1.0, -normal);
        }
    }
}

/// Stable removal of everything marked dead
fn prune_dead(round: &mut Round) {
    round.asteroids.retain(|a| a.is_alive());
    round.projectiles.retain(|p| p.is_alive());
}

/// Start the wave-clear fade once the field is empty
fn check_population(round: &mut Round) -> TickOutcome {
    if round.asteroids.is_empty() && round.is_playing() {
        log::info!("Wave {} cleared", round.level);
        round.begin_fade(FadeReason::WaveCleared);
    }
    if round.is_playing() {
        TickOutcome::Running
    } else {
        TickOutcome::Fading
    }
}

/// Nearest asteroid to a point, with the toroidal offset toward it
pub fn nearest_asteroid(round: &Round, from: DVec2) -> Option<(&Asteroid, DVec2)> {
    let plane = round.plane();
    round
        .asteroids
        .iter()
        .map(|a| (a, plane.delta(from, a.body.position())))
        .min_by(|(_, a), (_, b)| {
            a.length_squared()
                .partial_cmp(&b.length_squared())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}
