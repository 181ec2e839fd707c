use eframe::egui::{Pos2, Vec2, pos2, vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::FieldConfig;
use crate::error::EngineError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Pos2,
    pub velocity: Vec2,
    pub size: f32,
}

impl Particle {
    pub fn at_rest(position: Pos2, size: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    // Negative and non-finite sides collapse to zero; host resizes go through here.
    pub fn new(width: f32, height: f32) -> Self {
        fn side(value: f32) -> f32 {
            if value.is_finite() { value.max(0.0) } else { 0.0 }
        }

        Self {
            width: side(width),
            height: side(height),
        }
    }

    pub fn checked(width: f32, height: f32) -> Result<Self, EngineError> {
        if width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0 {
            Ok(Self { width, height })
        } else {
            Err(EngineError::InvalidExtent { width, height })
        }
    }

    pub fn from_size(size: Vec2) -> Self {
        Self::new(size.x, size.y)
    }

    pub fn center(&self) -> Pos2 {
        pos2(self.width * 0.5, self.height * 0.5)
    }

    pub fn contains(&self, position: Pos2) -> bool {
        (0.0..self.width).contains(&position.x) && (0.0..self.height).contains(&position.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub position: Option<Pos2>,
    pub radius: f32,
}

impl PointerState {
    pub fn absent(radius: f32) -> Self {
        Self {
            position: None,
            radius,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SeedRanges {
    pub max_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
}

impl SeedRanges {
    pub fn from_config(config: &FieldConfig) -> Self {
        Self {
            max_speed: config.max_seed_speed,
            min_size: config.min_size,
            max_size: config.max_size,
        }
    }
}

pub struct ParticleField {
    particles: Vec<Particle>,
    extent: Extent,
    pointer: PointerState,
    ranges: SeedRanges,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(config: &FieldConfig, extent: Extent) -> Self {
        let mut field = Self::from_particles(
            config,
            extent,
            Vec::with_capacity(config.particle_count),
        );
        field.reseed(extent, config.particle_count);
        field
    }

    /// Builds a field around a fixed particle set. Later reseeds still draw
    /// from `config`.
    pub fn from_particles(config: &FieldConfig, extent: Extent, particles: Vec<Particle>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            particles,
            extent,
            pointer: PointerState::absent(config.pointer_radius),
            ranges: SeedRanges::from_config(config),
            rng,
        }
    }

    pub fn reseed(&mut self, extent: Extent, count: usize) {
        self.extent = extent;
        self.particles.clear();
        self.particles.reserve(count);

        let ranges = self.ranges;
        for _ in 0..count {
            let position = pos2(
                sample_below(&mut self.rng, extent.width),
                sample_below(&mut self.rng, extent.height),
            );
            let velocity = vec2(
                sample_symmetric(&mut self.rng, ranges.max_speed),
                sample_symmetric(&mut self.rng, ranges.max_speed),
            );
            let size = if ranges.max_size > ranges.min_size {
                self.rng.random_range(ranges.min_size..=ranges.max_size)
            } else {
                ranges.min_size
            };

            self.particles.push(Particle {
                position,
                velocity,
                size,
            });
        }

        log::debug!(
            "reseeded {} particles into {:.0}x{:.0}",
            count,
            extent.width,
            extent.height
        );
    }

    pub fn set_pointer(&mut self, position: Option<Pos2>) {
        self.pointer.position = position;
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

fn sample_below(rng: &mut StdRng, upper: f32) -> f32 {
    if upper > 0.0 {
        rng.random_range(0.0..upper)
    } else {
        0.0
    }
}

fn sample_symmetric(rng: &mut StdRng, magnitude: f32) -> f32 {
    if magnitude > 0.0 {
        rng.random_range(-magnitude..=magnitude)
    } else {
        0.0
    }
}
