// particle.rs - Ambient particles
//
// Each particle drifts at a constant velocity, fades in over the first
// tenth of its life and out over the last tenth, then gets respawned.

use rand::Rng;

// Sampling ranges
const SPEED: f64 = 0.25;
const SIZE_MIN: f64 = 0.5;
const SIZE_MAX: f64 = 2.5;
const OPACITY_MIN: f64 = 0.1;
const LIFE_MIN: f64 = 200.0;
const LIFE_MAX: f64 = 500.0;

// Fade envelope
pub const PEAK_OPACITY: f64 = 0.4;
const FADE_BAND: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub opacity: f64,
    pub life: u32,
    pub max_life: f64,
}

/// Outcome of one frame of motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Alive,
    Expired,
}

impl Particle {
    /// Fresh particle somewhere on screen
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64) -> Self {
        let max_life = rng.gen_range(LIFE_MIN..LIFE_MAX);
        Self {
            x: sample(rng, width),
            y: sample(rng, height),
            vx: rng.gen_range(-SPEED..SPEED),
            vy: rng.gen_range(-SPEED..SPEED),
            size: rng.gen_range(SIZE_MIN..SIZE_MAX),
            opacity: rng.gen_range(OPACITY_MIN..PEAK_OPACITY),
            life: 0,
            max_life,
        }
    }

    /// Elapsed fraction of the lifespan
    #[inline]
    pub fn lifecycle(&self) -> f64 {
        self.life as f64 / self.max_life
    }

    /// Move, age, fade and wrap. The caller replaces expired particles.
    pub fn advance(&mut self, width: f64, height: f64) -> Fate {
        self.x += self.vx;
        self.y += self.vy;
        self.life += 1;

        // Between the two bands the last value is held
        let f = self.lifecycle();
        if f < FADE_BAND {
            self.opacity = (f / FADE_BAND) * PEAK_OPACITY;
        } else if f > 1.0 - FADE_BAND {
            self.opacity = (((1.0 - f) / FADE_BAND) * PEAK_OPACITY).max(0.0);
        }

        // Hard snap to the opposite edge
        if self.x < 0.0 { self.x = width; }
        if self.x > width { self.x = 0.0; }
        if self.y < 0.0 { self.y = height; }
        if self.y > height { self.y = 0.0; }

        if self.life as f64 >= self.max_life {
            Fate::Expired
        } else {
            Fate::Alive
        }
    }
}

#[inline]
fn sample<R: Rng + ?Sized>(rng: &mut R, extent: f64) -> f64 {
    if extent > 0.0 { rng.gen_range(0.0..extent) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn still(x: f64, y: f64) -> Particle {
        Particle {
            x, y,
            vx: 0.0, vy: 0.0,
            size: 1.0,
            opacity: 0.2,
            life: 0,
            max_life: 300.0,
        }
    }

    #[test]
    fn test_spawn_ranges() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = Particle::spawn(&mut rng, 800.0, 600.0);
            assert!(p.x >= 0.0 && p.x < 800.0);
            assert!(p.y >= 0.0 && p.y < 600.0);
            assert!(p.vx >= -0.25 && p.vx < 0.25);
            assert!(p.vy >= -0.25 && p.vy < 0.25);
            assert!(p.size >= 0.5 && p.size < 2.5);
            assert!(p.opacity >= 0.1 && p.opacity < 0.4);
            assert!(p.max_life >= 200.0 && p.max_life < 500.0);
            assert_eq!(p.life, 0);
        }
    }

    #[test]
    fn test_spawn_on_empty_viewport() {
        let mut rng = SmallRng::seed_from_u64(1);
        let p = Particle::spawn(&mut rng, 0.0, 0.0);
        assert_eq!((p.x, p.y), (0.0, 0.0));
    }

    #[test]
    fn test_fade_in() {
        let mut p = still(10.0, 10.0);
        p.life = 14;
        p.advance(100.0, 100.0);
        // f = 15 / 300 = 0.05 -> half of peak
        assert!((p.opacity - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_steady_band_holds_last_value() {
        let mut p = still(10.0, 10.0);
        p.life = 29;
        p.advance(100.0, 100.0);
        // f = 0.1 exactly: neither band applies
        assert_eq!(p.opacity, 0.2);

        p.opacity = 0.37;
        p.life = 150;
        p.advance(100.0, 100.0);
        assert_eq!(p.opacity, 0.37);
    }

    #[test]
    fn test_fade_out() {
        let mut p = still(10.0, 10.0);
        p.life = 284;
        p.advance(100.0, 100.0);
        // f = 285 / 300 = 0.95 -> half of peak
        assert!((p.opacity - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_right_edge_snaps_to_zero() {
        let mut p = still(100.0, 50.0);
        p.vx = 0.01;
        p.advance(100.0, 100.0);
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 50.0);
    }

    #[test]
    fn test_wrap_left_and_top_snap_to_far_edge() {
        let mut p = still(0.1, 0.1);
        p.vx = -0.2;
        p.vy = -0.2;
        p.advance(640.0, 480.0);
        assert_eq!(p.x, 640.0);
        assert_eq!(p.y, 480.0);
    }

    #[test]
    fn test_wrap_bottom_edge() {
        let mut p = still(5.0, 480.0);
        p.vy = 0.25;
        p.advance(640.0, 480.0);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_expiry() {
        let mut p = still(10.0, 10.0);
        p.life = 298;
        assert_eq!(p.advance(100.0, 100.0), Fate::Alive);
        assert_eq!(p.advance(100.0, 100.0), Fate::Expired);
        assert_eq!(p.opacity, 0.0);
    }

    #[test]
    fn test_fractional_lifespan_expires_on_next_whole_frame() {
        let mut p = still(10.0, 10.0);
        p.max_life = 250.5;
        p.life = 250;
        assert_eq!(p.advance(100.0, 100.0), Fate::Expired);
    }
}
