//! Shape generation for 2D primitives
//!
//! Outlines come out as line lists (two vertices per segment), filled
//! shapes as triangle lists.

use glam::{DVec2, Vec2};
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::heading_vector;
use crate::sim::Plane;

/// Segments used when an asteroid has no silhouette of its own
const FALLBACK_OUTLINE_POINTS: usize = 12;

/// Closed polyline as line-list pairs
pub fn line_loop(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity(points.len() * 2);
    for (i, p1) in points.iter().enumerate() {
        let p2 = points[(i + 1) % points.len()];
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }
    vertices
}

/// Nose and the two rear corners of the ship
pub fn ship_points(position: DVec2, heading: f64, radius: f64) -> [DVec2; 3] {
    let dir = heading_vector(heading);
    let side = DVec2::new(-dir.y, dir.x) * radius * 1.5;
    let rear = position - dir * radius;
    [position + dir * radius * 2.0, rear + side, rear - side]
}

/// Ship outline
pub fn ship(position: DVec2, heading: f64, radius: f64, color: [f32; 4]) -> Vec<Vertex> {
    let points = ship_points(position, heading, radius).map(|p| p.as_vec2());
    line_loop(&points, color)
}

/// Asteroid silhouette, repeated at every neighbouring copy of the plane
///
/// A rock straddling an edge then shows up on both sides.
pub fn asteroid(
    position: DVec2,
    radius: f64,
    outline: &[f64],
    plane: &Plane,
    color: [f32; 4],
) -> Vec<Vertex> {
    let fractions: Vec<f64> = if outline.is_empty() {
        (0..FALLBACK_OUTLINE_POINTS)
            .map(|i| i as f64 / FALLBACK_OUTLINE_POINTS as f64)
            .collect()
    } else {
        outline.to_vec()
    };

    let mut vertices = Vec::with_capacity(fractions.len() * 2 * 9);
    for oy in -1..=1 {
        for ox in -1..=1 {
            let offset = DVec2::new(f64::from(ox) * plane.width, f64::from(oy) * plane.height);
            let center = position + offset;
            let points: Vec<Vec2> = fractions
                .iter()
                .map(|f| (center + heading_vector(f * std::f64::consts::TAU) * radius).as_vec2())
                .collect();
            vertices.extend(line_loop(&points, color));
        }
    }
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Full-plane quad (two triangles)
pub fn overlay(plane: &Plane, color: [f32; 4]) -> Vec<Vertex> {
    let w = plane.width as f32;
    let h = plane.height as f32;
    vec![
        Vertex::new(0.0, 0.0, color),
        Vertex::new(w, 0.0, color),
        Vertex::new(0.0, h, color),
        Vertex::new(0.0, h, color),
        Vertex::new(w, 0.0, color),
        Vertex::new(w, h, color),
    ]
}
