//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order, pruned with `retain`)
//! - No rendering or platform dependencies beyond the input snapshot

pub mod collision;
pub mod state;
pub mod tick;
pub mod torus;

pub use collision::{Contact, FALLBACK_NORMAL, circle_circle_collision, set_velocity_component_sign};
pub use state::{
    Asteroid, Body, Entity, FadeReason, Projectile, Round, RoundPhase, Ship, fade_alpha,
    ring_positions,
};
pub use tick::{TickInput, TickOutcome, nearest_asteroid, split_asteroid, tick};
pub use torus::{Plane, wrap, wrapped_difference};
