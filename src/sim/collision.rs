//! Collision detection and response on the torus
//!
//! Everything here is circle vs circle. The separation vector comes from the
//! toroidal metric, so two asteroids on opposite edges of the plane can touch.

use glam::DVec2;

use super::state::Body;
use super::torus::Plane;
use crate::{normalize_or, vector_length};

/// Direction used when two centers coincide exactly
pub const FALLBACK_NORMAL: DVec2 = DVec2::X;

/// Result of an overlapping circle pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Toroidal separation vector from the first body toward the second
    pub delta: DVec2,
    /// How far the circles interpenetrate (always > 0)
    pub overlap: f64,
}

impl Contact {
    /// Unit collision normal pointing from the first body toward the second
    pub fn normal(&self) -> DVec2 {
        normalize_or(self.delta, FALLBACK_NORMAL).0
    }

    /// The same contact seen from the second body
    pub fn reversed(&self) -> Self {
        Self {
            delta: -self.delta,
            overlap: self.overlap,
        }
    }
}

/// Check two bodies for overlap on the torus
///
/// Dead bodies and bodies with a non-positive radius never collide.
/// Detection is symmetric, the returned `delta` points from `a` to `b`.
pub fn circle_circle_collision(a: &Body, b: &Body, plane: &Plane) -> Option<Contact> {
    if a.radius <= 0.0 || b.radius <= 0.0 || !a.alive || !b.alive {
        return None;
    }

    let delta = plane.delta(a.position(), b.position());
    let overlap = a.radius + b.radius - vector_length(delta);

    if overlap > 0.0 {
        Some(Contact { delta, overlap })
    } else {
        None
    }
}

/// Force the component of `velocity` along unit `axis` to have `sign`,
/// keeping its magnitude and the tangential component.
///
/// With `sign = -1` and `axis` pointing at the other body, the result moves
/// away from it. This is the arcade bounce, not a momentum exchange.
#[inline]
pub fn set_velocity_component_sign(velocity: DVec2, sign: f64, axis: DVec2) -> DVec2 {
    let along = velocity.dot(axis);
    let tangent = axis.perp();
    let across = velocity.dot(tangent);
    axis * (along.abs() * sign) + tangent * across
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body(x: f64, y: f64, radius: f64, plane: &Plane) -> Body {
        Body::new(DVec2::new(x, y), DVec2::ZERO, radius, plane)
    }

    #[test]
    fn test_overlap_depth() {
        let plane = Plane::new(640.0, 480.0);
        let a = body(100.0, 100.0, 18.0, &plane);
        let b = body(110.0, 100.0, 25.0, &plane);

        let contact = circle_circle_collision(&a, &b, &plane).unwrap();
        assert!((contact.overlap - 33.0).abs() < 1e-12);
        assert_eq!(contact.delta, DVec2::new(10.0, 0.0));
    }

    #[test]
    fn test_overlap_depth_across_edge() {
        // Toroidal distance 10 through the x = 0 edge
        let plane = Plane::new(640.0, 480.0);
        let a = body(635.0, 240.0, 18.0, &plane);
        let b = body(5.0, 240.0, 25.0, &plane);

        let contact = circle_circle_collision(&a, &b, &plane).unwrap();
        assert!((contact.overlap - 33.0).abs() < 1e-12);
        assert!(contact.delta.x > 0.0);
    }

    #[test]
    fn test_touching_is_not_collision() {
        let plane = Plane::default();
        let a = body(100.0, 100.0, 10.0, &plane);
        let b = body(120.0, 100.0, 10.0, &plane);
        assert!(circle_circle_collision(&a, &b, &plane).is_none());
    }

    #[test]
    fn test_disabled_bodies_never_collide() {
        let plane = Plane::default();
        let a = body(100.0, 100.0, 10.0, &plane);
        let placeholder = body(100.0, 100.0, 0.0, &plane);
        assert!(circle_circle_collision(&a, &placeholder, &plane).is_none());
        assert!(circle_circle_collision(&placeholder, &a, &plane).is_none());

        let mut dead = body(100.0, 100.0, 10.0, &plane);
        dead.alive = false;
        assert!(circle_circle_collision(&a, &dead, &plane).is_none());
    }

    #[test]
    fn test_coincident_centers_use_fallback_normal() {
        let plane = Plane::default();
        let a = body(50.0, 50.0, 10.0, &plane);
        let b = body(50.0, 50.0, 10.0, &plane);
        let contact = circle_circle_collision(&a, &b, &plane).unwrap();
        assert_eq!(contact.overlap, 20.0);
        assert_eq!(contact.normal(), FALLBACK_NORMAL);
    }

    #[test]
    fn test_set_velocity_component_sign() {
        // Moving right toward a body on the right: normal component flips
        let v = set_velocity_component_sign(DVec2::new(30.0, 5.0), -1.0, DVec2::X);
        assert!((v - DVec2::new(-30.0, 5.0)).length() < 1e-12);

        // Already moving away: unchanged
        let v = set_velocity_component_sign(DVec2::new(-30.0, 5.0), -1.0, DVec2::X);
        assert!((v - DVec2::new(-30.0, 5.0)).length() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_detection_is_symmetric(
            ax in 0.0..640.0f64, ay in 0.0..480.0f64,
            bx in 0.0..640.0f64, by in 0.0..480.0f64,
            ar in 0.0..60.0f64, br in 0.0..60.0f64,
        ) {
            let plane = Plane::new(640.0, 480.0);
            let a = body(ax, ay, ar, &plane);
            let b = body(bx, by, br, &plane);
            let ab = circle_circle_collision(&a, &b, &plane);
            let ba = circle_circle_collision(&b, &a, &plane);
            prop_assert_eq!(ab.is_some(), ba.is_some());
            if let (Some(ab), Some(ba)) = (ab, ba) {
                prop_assert_eq!(ab.delta, -ba.delta);
            }
        }

        #[test]
        fn prop_bounce_preserves_speed(
            vx in -100.0..100.0f64, vy in -100.0..100.0f64, angle in 0.0..6.28f64,
        ) {
            let axis = DVec2::new(angle.cos(), angle.sin());
            let v = DVec2::new(vx, vy);
            let out = set_velocity_component_sign(v, -1.0, axis);
            prop_assert!((out.length() - v.length()).abs() < 1e-9);
            prop_assert!(out.dot(axis) <= 1e-9);
        }
    }
}
