//! Toroidal plane geometry
//!
//! Both axes wrap: leaving the right edge re-enters on the left, and the
//! shortest path between two points may cross an edge. Every distance and
//! collision computation goes through [`wrapped_difference`].

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{PLANE_HEIGHT, PLANE_WIDTH};

/// Map `x` into `[lo, hi)` by adding or subtracting exactly one span.
///
/// Not a general modulo: `x` must already lie within one span of the
/// interval, which holds because per-tick displacement is far smaller than
/// the plane.
#[inline]
pub fn wrap(x: f64, lo: f64, hi: f64) -> f64 {
    let span = hi - lo;
    let wrapped = if x < lo {
        x + span
    } else if x >= hi {
        (x - span).max(lo)
    } else {
        x
    };
    // Tiny negative inputs can round up onto `hi`
    if wrapped >= hi { lo } else { wrapped }
}

/// Signed shortest displacement from `x` to `y` on a circular axis of
/// circumference `hi - lo`.
///
/// Compares the direct delta with the complementary wraparound delta and
/// returns the shorter one, signed to point from `x` toward `y`.
#[inline]
pub fn wrapped_difference(x: f64, y: f64, lo: f64, hi: f64) -> f64 {
    let direct = wrap(y, lo, hi) - wrap(x, lo, hi);
    let around = (hi - lo) - direct.abs();
    if direct.abs() <= around {
        direct
    } else {
        -around * direct.signum()
    }
}

/// [`wrap`] onto `[0, span)` for inputs any distance away
fn wrap_far(x: f64, span: f64) -> f64 {
    if (-span..2.0 * span).contains(&x) {
        return wrap(x, 0.0, span);
    }
    let r = x.rem_euclid(span);
    if r >= span { 0.0 } else { r }
}

/// The wraparound play field, `[0, width) x [0, height)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub width: f64,
    pub height: f64,
}

impl Default for Plane {
    fn default() -> Self {
        Self::new(PLANE_WIDTH, PLANE_HEIGHT)
    }
}

impl Plane {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Wrap a point onto the plane
    ///
    /// Points more than one span outside fall back to a full modulo.
    #[inline]
    pub fn wrap_point(&self, p: DVec2) -> DVec2 {
        DVec2::new(wrap_far(p.x, self.width), wrap_far(p.y, self.height))
    }

    /// Shortest toroidal displacement from `from` to `to`
    #[inline]
    pub fn delta(&self, from: DVec2, to: DVec2) -> DVec2 {
        DVec2::new(
            wrapped_difference(from.x, to.x, 0.0, self.width),
            wrapped_difference(from.y, to.y, 0.0, self.height),
        )
    }

    /// Shortest toroidal distance between two points
    #[inline]
    pub fn distance(&self, a: DVec2, b: DVec2) -> f64 {
        crate::vector_length(self.delta(a, b))
    }

    pub fn contains(&self, p: DVec2) -> bool {
        (0.0..self.width).contains(&p.x) && (0.0..self.height).contains(&p.y)
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width * 0.5, self.height * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const W: f64 = 640.0;

    #[test]
    fn test_wrap_edges() {
        assert_eq!(wrap(640.0, 0.0, W), 0.0);
        assert_eq!(wrap(-1.0, 0.0, W), 639.0);
        assert_eq!(wrap(650.0, 0.0, W), 10.0);
        assert_eq!(wrap(0.0, 0.0, W), 0.0);
        assert_eq!(wrap(-1e-17, 0.0, W), 0.0);
    }

    #[test]
    fn test_wrapped_difference_crosses_edge() {
        // 630 -> 10 is 20px to the right through the edge
        assert_eq!(wrapped_difference(630.0, 10.0, 0.0, W), 20.0);
        assert_eq!(wrapped_difference(10.0, 630.0, 0.0, W), -20.0);
        // Direct path when shorter
        assert_eq!(wrapped_difference(100.0, 150.0, 0.0, W), 50.0);
        assert_eq!(wrapped_difference(150.0, 100.0, 0.0, W), -50.0);
    }

    #[test]
    fn test_wrapped_difference_large_negative_direct() {
        // direct = -500 is longer than the 140px wraparound
        assert_eq!(wrapped_difference(600.0, 100.0, 0.0, W), 140.0);
    }

    #[test]
    fn test_plane_distance_through_corner() {
        let plane = Plane::new(640.0, 480.0);
        let d = plane.distance(DVec2::new(635.0, 475.0), DVec2::new(2.0, 1.0));
        assert!((d - (7.0f64 * 7.0 + 6.0 * 6.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_point_far_outside() {
        let plane = Plane::new(640.0, 480.0);
        assert_eq!(plane.wrap_point(DVec2::new(-700.0, 240.0)), DVec2::new(580.0, 240.0));
        assert_eq!(plane.wrap_point(DVec2::new(1300.0, -1000.0)), DVec2::new(20.0, 440.0));
        assert_eq!(plane.wrap_point(DVec2::new(650.0, 10.0)), DVec2::new(10.0, 10.0));
    }

    proptest! {
        #[test]
        fn prop_wrap_idempotent(x in -W..(2.0 * W)) {
            let once = wrap(x, 0.0, W);
            prop_assert!((0.0..W).contains(&once));
            prop_assert_eq!(wrap(once, 0.0, W), once);
        }

        #[test]
        fn prop_wrap_point_always_inside(x in -1e6..1e6f64, y in -1e6..1e6f64) {
            let plane = Plane::new(W, 480.0);
            prop_assert!(plane.contains(plane.wrap_point(DVec2::new(x, y))));
        }

        #[test]
        fn prop_wrapped_difference_bounded(a in 0.0..W, b in 0.0..W) {
            let d = wrapped_difference(a, b, 0.0, W);
            prop_assert!(d.abs() <= W / 2.0 + 1e-9);
        }

        #[test]
        fn prop_wrapped_difference_antisymmetric(a in 0.0..W, b in 0.0..W) {
            let ab = wrapped_difference(a, b, 0.0, W);
            let ba = wrapped_difference(b, a, 0.0, W);
            prop_assert_eq!(ab, -ba);
        }

        #[test]
        fn prop_wrapped_difference_lands_on_target(a in 0.0..W, b in 0.0..W) {
            let d = wrapped_difference(a, b, 0.0, W);
            let landed = wrap(a + d, 0.0, W);
            let err = wrapped_difference(landed, b, 0.0, W).abs();
            prop_assert!(err < 1e-9);
        }
    }
}
