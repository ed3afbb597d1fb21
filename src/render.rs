// render.rs - Draw the field onto a 2D surface
//
// Each frame: clear, one filled dot per particle, then a faint line for
// every pair closer than the tier's connection distance.

use crate::sim::{Particle, ParticleField};
use crate::tier::TierProfile;

/// Gray-400
pub const PARTICLE_RGB: (u8, u8, u8) = (156, 163, 175);
pub const LINE_WIDTH: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub fn particle(a: f64) -> Self {
        let (r, g, b) = PARTICLE_RGB;
        Self { r, g, b, a }
    }

    /// CSS color string for canvas styles
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Anything the field can be drawn onto
pub trait Surface {
    /// Match the backing store to the viewport
    fn resize(&mut self, w: f64, h: f64);
    fn clear(&mut self, w: f64, h: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba);
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba);
}

/// Line between two nearby particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub opacity: f64,
}

/// Every unordered pair (i < j) within connection distance
pub fn connections<'a>(
    particles: &'a [Particle],
    profile: TierProfile,
) -> impl Iterator<Item = Connection> + 'a {
    let max = profile.connection_distance;
    particles.iter().enumerate().flat_map(move |(i, p)| {
        particles[i + 1..].iter().enumerate().filter_map(move |(k, q)| {
            let dx = p.x - q.x;
            let dy = p.y - q.y;
            let d = (dx * dx + dy * dy).sqrt();
            if d >= max { return None; }
            Some(Connection {
                a: i,
                b: i + 1 + k,
                distance: d,
                opacity: (1.0 - d / max) * profile.connection_opacity,
            })
        })
    })
}

pub fn render<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S) {
    surface.clear(field.width(), field.height());

    let particles = field.particles();
    for p in particles {
        surface.fill_circle(p.x, p.y, p.size, Rgba::particle(p.opacity));
    }

    for c in connections(particles, field.profile()) {
        let (p, q) = (&particles[c.a], &particles[c.b]);
        surface.stroke_line((p.x, p.y), (q.x, q.y), LINE_WIDTH, Rgba::particle(c.opacity));
    }
}
