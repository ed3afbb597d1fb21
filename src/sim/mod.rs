// sim/ - Particle field simulation
//
// Particles live in one contiguous Vec that is thrown away and resampled
// whenever the viewport changes.

mod particle;

pub use particle::{Fate, PEAK_OPACITY, Particle};

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::tier::{DeviceTier, TierProfile};

/// Ambient particle field
pub struct ParticleField {
    // Viewport dimensions
    w: f64,
    h: f64,

    tier: DeviceTier,
    particles: Vec<Particle>,

    rng: SmallRng,
}

impl ParticleField {
    /// Field seeded from an entropy source
    pub fn new(w: f64, h: f64) -> Self {
        Self::with_seed(w, h, entropy_seed())
    }

    /// Field with a reproducible particle sequence
    pub fn with_seed(w: f64, h: f64, seed: u64) -> Self {
        let mut field = Self {
            w,
            h,
            tier: DeviceTier::from_width(w),
            particles: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
        };
        field.populate();
        field
    }

    /// Adopt a new viewport and resample every particle
    pub fn resize(&mut self, w: f64, h: f64) {
        self.w = w;
        self.h = h;
        self.tier = DeviceTier::from_width(w);
        self.populate();
    }

    fn populate(&mut self) {
        let count = self.tier.profile().particle_count(self.w, self.h);
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(Particle::spawn(&mut self.rng, self.w, self.h));
        }
        log::debug!(
            "particle field rebuilt: {:?} {}x{} -> {} particles",
            self.tier, self.w, self.h, count
        );
    }

    /// Advance one frame. Expired particles are swapped for fresh ones,
    /// which sit out the rest of this frame.
    pub fn step(&mut self) {
        let (w, h) = (self.w, self.h);
        for i in 0..self.particles.len() {
            if self.particles[i].advance(w, h) == Fate::Expired {
                self.particles[i] = Particle::spawn(&mut self.rng, w, h);
            }
        }
    }

    pub fn particles(&self) -> &[Particle] { &self.particles }
    pub fn len(&self) -> usize { self.particles.len() }
    pub fn is_empty(&self) -> bool { self.particles.is_empty() }
    pub fn width(&self) -> f64 { self.w }
    pub fn height(&self) -> f64 { self.h }
    pub fn tier(&self) -> DeviceTier { self.tier }
    pub fn profile(&self) -> TierProfile { self.tier.profile() }
}

#[cfg(target_arch = "wasm32")]
fn entropy_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (hi << 32) | lo
}

#[cfg(not(target_arch = "wasm32"))]
fn entropy_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0xDEAD_BEEF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_count_follows_tier() {
        let field = ParticleField::with_seed(1024.0, 768.0, 1);
        assert_eq!(field.tier(), DeviceTier::Desktop);
        assert_eq!(field.len(), 52);

        let field = ParticleField::with_seed(375.0, 667.0, 1);
        assert_eq!(field.tier(), DeviceTier::Mobile);
        assert_eq!(field.len(), 10);
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = ParticleField::with_seed(1280.0, 720.0, 42);
        let b = ParticleField::with_seed(1280.0, 720.0, 42);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_invariants_hold_over_many_frames() {
        let mut field = ParticleField::with_seed(900.0, 700.0, 3);
        let (w, h) = (field.width(), field.height());
        for _ in 0..2000 {
            field.step();
            for p in field.particles() {
                assert!(p.life as f64 <= p.max_life);
                assert!((0.0..=PEAK_OPACITY).contains(&p.opacity));
                assert!((0.0..=w).contains(&p.x));
                assert!((0.0..=h).contains(&p.y));
            }
        }
    }

    #[test]
    fn test_expiring_particle_is_replaced() {
        let mut field = ParticleField::with_seed(1024.0, 768.0, 9);
        {
            let p = &mut field.particles[0];
            p.max_life = 300.0;
            p.life = 299;
        }
        let before = field.particles[0].clone();
        field.step();

        let p = &field.particles[0];
        assert_eq!(p.life, 0);
        assert!(p.max_life >= 200.0 && p.max_life < 500.0);
        assert_ne!(p.vx, before.vx);
    }

    #[test]
    fn test_replacement_skips_current_frame() {
        let mut field = ParticleField::with_seed(1024.0, 768.0, 11);
        field.particles[0].max_life = 1.0;
        field.step();
        // A replacement that had been advanced would report life 1
        assert_eq!(field.particles[0].life, 0);
        assert!(field.particles[1..].iter().all(|p| p.life == 1));
    }

    #[test]
    fn test_resize_resamples_everything() {
        let mut field = ParticleField::with_seed(1440.0, 900.0, 5);
        assert_eq!(field.len(), 80);
        for _ in 0..10 { field.step(); }

        field.resize(375.0, 667.0);
        assert_eq!(field.tier(), DeviceTier::Mobile);
        assert_eq!(field.len(), 10);
        for p in field.particles() {
            assert_eq!(p.life, 0);
            assert!(p.x < 375.0 && p.y < 667.0);
        }
    }

    #[test]
    fn test_tiny_viewport_is_empty() {
        let mut field = ParticleField::with_seed(100.0, 100.0, 0);
        assert!(field.is_empty());
        field.step();
        assert!(field.is_empty());
    }
}
