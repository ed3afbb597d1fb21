// tier.rs - Device tiers and per-tier density tuning
//
// The viewport width picks a tier; the tier fixes how dense the field is
// and how far apart two particles may be and still get a connecting line.

const MOBILE_MAX_WIDTH: f64 = 768.0;
const TABLET_MAX_WIDTH: f64 = 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceTier {
    Mobile,
    Tablet,
    Desktop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierProfile {
    /// Viewport area (px²) per particle
    pub density_divisor: f64,
    pub max_particles: usize,
    pub connection_distance: f64,
    /// Line alpha at zero distance
    pub connection_opacity: f64,
}

impl DeviceTier {
    pub fn from_width(width: f64) -> Self {
        if width < MOBILE_MAX_WIDTH {
            Self::Mobile
        } else if width < TABLET_MAX_WIDTH {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    pub fn profile(self) -> TierProfile {
        match self {
            Self::Mobile => TierProfile {
                density_divisor: 25_000.0,
                max_particles: 30,
                connection_distance: 80.0,
                connection_opacity: 0.05,
            },
            Self::Tablet => TierProfile {
                density_divisor: 20_000.0,
                max_particles: 50,
                connection_distance: 120.0,
                connection_opacity: 0.1,
            },
            Self::Desktop => TierProfile {
                density_divisor: 15_000.0,
                max_particles: 80,
                connection_distance: 120.0,
                connection_opacity: 0.1,
            },
        }
    }
}

impl TierProfile {
    /// min(floor(w * h / divisor), cap)
    pub fn particle_count(&self, width: f64, height: f64) -> usize {
        let area = (width * height).max(0.0);
        let n = (area / self.density_divisor).floor() as usize;
        n.min(self.max_particles)
    }
}
