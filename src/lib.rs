//! Space Triangle - an asteroid shooter on a wraparound plane
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, toroidal collisions, waves)
//! - `game`: Scene director (title, rounds, frame sub-stepping)
//! - `renderer`: Draw command list and vertex tessellation
//! - `platform`: Input latch and frame clock
//! - `settings`: Data-driven tuning

pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Game, Scene};
pub use settings::{Settings, SettingsError, Tuning};

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Default plane dimensions (a 640x480 canvas)
    pub const PLANE_WIDTH: f64 = 640.0;
    pub const PLANE_HEIGHT: f64 = 480.0;

    /// Asteroid radius by tier (0 = smallest, cannot split)
    pub const ASTEROID_RADII: [f64; 3] = [18.0, 25.0, 35.0];
    /// Tier given to freshly spawned wave asteroids
    pub const ASTEROID_MAX_TIER: u8 = (ASTEROID_RADII.len() - 1) as u8;
    /// Spawn speed is `MIN + rand * RANGE` (pixels/s)
    pub const ASTEROID_MIN_SPEED: f64 = 25.0;
    pub const ASTEROID_SPEED_RANGE: f64 = 50.0;
    /// Decorative outline point count is `MIN + rand(0..RANGE)`
    pub const ASTEROID_OUTLINE_MIN_POINTS: usize = 7;
    pub const ASTEROID_OUTLINE_POINT_RANGE: usize = 4;

    /// Fragments fly apart at this multiple of the parent's speed
    pub const FRAGMENT_SPEED_FACTOR: f64 = 1.4;
    /// Ejection sign for the first and second fragment along perp(normal)
    pub const FRAGMENT_EJECT_SIGNS: [f64; 2] = [1.0, -1.0];

    /// Ship defaults
    pub const SHIP_RADIUS: f64 = 10.0;
    pub const SHIP_ACCEL: f64 = 120.0;
    pub const SHIP_TURN_RATE_DEG: f64 = 130.0;
    pub const SHIP_TOP_SPEED: f64 = 150.0;
    /// heading -= turn_rate * dt * sign; LEFT turns counter-clockwise on a y-down screen
    pub const TURN_SIGN_LEFT: f64 = 1.0;
    pub const TURN_SIGN_RIGHT: f64 = -1.0;
    /// Thrust sign along the heading vector
    pub const THRUST_SIGN_FORWARD: f64 = 1.0;
    pub const THRUST_SIGN_REVERSE: f64 = -1.0;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f64 = 5.0;
    pub const PROJECTILE_SPEED: f64 = 240.0;
    pub const MAX_PROJECTILES: usize = 5;

    /// Scene transition fade (seconds)
    pub const FADE_DURATION: f64 = 0.8;

    /// Longest frame delta accepted by the frame driver (stall guard)
    pub const MAX_FRAME_DT: f64 = 0.1;
    /// Longest single simulation sub-step
    pub const MAX_STEP_DT: f64 = 1.0 / 60.0;
    /// Most sub-steps a single frame may be split into
    pub const MAX_SUBSTEPS: u32 = 32;
}

/// Euclidean length of a vector
#[inline]
pub fn vector_length(v: DVec2) -> f64 {
    (v.x * v.x + v.y * v.y).sqrt()
}

/// Unit vector and original length, or `None` for the zero vector
#[inline]
pub fn normalize(v: DVec2) -> Option<(DVec2, f64)> {
    let len = vector_length(v);
    if len > 0.0 && len.is_finite() {
        Some((v / len, len))
    } else {
        None
    }
}

/// Like [`normalize`], but substitutes `fallback` (length 0) for degenerate input
#[inline]
pub fn normalize_or(v: DVec2, fallback: DVec2) -> (DVec2, f64) {
    normalize(v).unwrap_or((fallback, 0.0))
}

/// Clamp `x` into `[lo, hi]` (`lo <= hi` assumed, never panics)
#[inline]
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    while angle >= PI {
        angle -= TAU;
    }
    while angle < -PI {
        angle += TAU;
    }
    angle
}

/// Unit vector for a heading angle (radians)
#[inline]
pub fn heading_vector(heading: f64) -> DVec2 {
    DVec2::new(heading.cos(), heading.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_length() {
        assert_eq!(vector_length(DVec2::new(3.0, 4.0)), 5.0);
        assert_eq!(vector_length(DVec2::ZERO), 0.0);
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert!(normalize(DVec2::ZERO).is_none());
        let (dir, len) = normalize_or(DVec2::ZERO, DVec2::X);
        assert_eq!(dir, DVec2::X);
        assert_eq!(len, 0.0);
    }

    #[test]
    fn test_normalize() {
        let (dir, len) = normalize(DVec2::new(0.0, -2.0)).unwrap();
        assert_eq!(len, 2.0);
        assert!((dir - DVec2::new(0.0, -1.0)).length() < 1e-12);
    }

    #[test]
    fn test_normalize_angle() {
        use std::f64::consts::PI;
        assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-12);
        assert!((normalize_angle(-1.5 * PI) - 0.5 * PI).abs() < 1e-12);
        assert_eq!(normalize_angle(0.25), 0.25);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(5.5, 0.0, 10.0), 5.5);
    }
}
