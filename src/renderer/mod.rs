//! Rendering front end
//!
//! The simulation is turned into an ordered list of [`DrawCommand`]s, which
//! [`tessellate`] flattens into vertex batches a host can upload as-is.

pub mod shapes;
pub mod vertex;

pub use vertex::{Vertex, colors};

use glam::DVec2;

use crate::game::{Game, Scene};
use crate::sim::{Plane, Round};

/// Segments in a projectile disc
const PROJECTILE_SEGMENTS: u32 = 16;

/// One thing to draw, in world coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Ship {
        position: DVec2,
        radius: f64,
        heading: f64,
    },
    Asteroid {
        position: DVec2,
        radius: f64,
        outline: Vec<f64>,
    },
    Projectile {
        position: DVec2,
        radius: f64,
    },
    /// Title card; the host renders the text centered on the plane
    Title {
        heading: &'static str,
        prompt: &'static str,
    },
    /// Full-screen black overlay
    Fade { alpha: f64 },
}

pub const TITLE_HEADING: &str = "TRIANGULO ESPACIAL";
pub const TITLE_PROMPT: &str = "Press <SPACE> to begin";

/// Primitive topology of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Lines,
    Triangles,
}

/// Vertices sharing one topology, drawn in order
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub topology: Topology,
    pub vertices: Vec<Vertex>,
}

/// Draw commands for the current frame
///
/// Order is asteroids, projectiles, the ship, then the fade overlay.
pub fn draw_list(game: &Game) -> Vec<DrawCommand> {
    let mut commands = match &game.scene {
        Scene::Round(round) => round_commands(round),
        Scene::Title { .. } => vec![DrawCommand::Title {
            heading: TITLE_HEADING,
            prompt: TITLE_PROMPT,
        }],
    };

    let alpha = game.fade_alpha();
    if alpha > 0.0 {
        commands.push(DrawCommand::Fade { alpha });
    }
    commands
}

fn round_commands(round: &Round) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(round.asteroids.len() + round.projectiles.len() + 1);

    commands.extend(round.asteroids.iter().map(|a| DrawCommand::Asteroid {
        position: a.body.position(),
        radius: a.body.radius,
        outline: a.outline.clone(),
    }));
    commands.extend(round.projectiles.iter().map(|p| DrawCommand::Projectile {
        position: p.body.position(),
        radius: p.body.radius,
    }));
    commands.push(DrawCommand::Ship {
        position: round.ship.body.position(),
        radius: round.ship.body.radius,
        heading: round.ship.heading,
    });
    commands
}

/// Flatten draw commands into batches, merging neighbours of equal topology
pub fn tessellate(commands: &[DrawCommand], plane: &Plane) -> Vec<Batch> {
    let mut batches: Vec<Batch> = Vec::new();

    for command in commands {
        let (topology, vertices) = match command {
            // Text has no vertices of its own
            DrawCommand::Title { .. } => continue,
            DrawCommand::Ship {
                position,
                radius,
                heading,
            } => (
                Topology::Lines,
                shapes::ship(*position, *heading, *radius, colors::SHIP),
            ),
            DrawCommand::Asteroid {
                position,
                radius,
                outline,
            } => (
                Topology::Lines,
                shapes::asteroid(*position, *radius, outline, plane, colors::ASTEROID),
            ),
            DrawCommand::Projectile { position, radius } => (
                Topology::Triangles,
                shapes::circle(
                    position.as_vec2(),
                    *radius as f32,
                    colors::PROJECTILE,
                    PROJECTILE_SEGMENTS,
                ),
            ),
            DrawCommand::Fade { alpha } => (
                Topology::Triangles,
                shapes::overlay(plane, colors::fade(*alpha as f32)),
            ),
        };

        match batches.last_mut() {
            Some(last) if last.topology == topology => last.vertices.extend(vertices),
            _ => batches.push(Batch { topology, vertices }),
        }
    }

    batches
}
