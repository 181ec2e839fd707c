use eframe::egui::Vec2;

use crate::config::FieldConfig;
use crate::field::{ParticleField, PointerState};

#[derive(Clone, Copy, Debug)]
pub struct PhysicsConfig {
    pub repulsion_strength: f32,
    pub damping: f32,
}

impl PhysicsConfig {
    pub fn from_config(config: &FieldConfig) -> Self {
        Self {
            repulsion_strength: config.repulsion_strength,
            damping: config.damping,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::from_config(&FieldConfig::default())
    }
}

pub fn repulsion_force(distance: f32, radius: f32) -> f32 {
    if distance < radius {
        (radius - distance) / radius
    } else {
        0.0
    }
}

pub fn step_physics(field: &mut ParticleField, config: PhysicsConfig) {
    let pointer = field.pointer();
    step_with_pointer(field, pointer, config);
}

/// One tick: integrate, reflect, repel, damp, in that order.
///
/// Reflection flips the velocity component only; a particle that crossed an
/// edge stays outside for this tick and is carried back by the next one.
pub fn step_with_pointer(field: &mut ParticleField, pointer: PointerState, config: PhysicsConfig) {
    let extent = field.extent();

    for particle in field.particles_mut() {
        particle.position += particle.velocity;

        if particle.position.x < 0.0 || particle.position.x > extent.width {
            particle.velocity.x = -particle.velocity.x;
        }
        if particle.position.y < 0.0 || particle.position.y > extent.height {
            particle.velocity.y = -particle.velocity.y;
        }

        if let Some(pointer_pos) = pointer.position {
            let delta: Vec2 = pointer_pos - particle.position;
            let distance = delta.length();
            if distance < pointer.radius {
                let force = repulsion_force(distance, pointer.radius);
                let angle = delta.y.atan2(delta.x);
                particle.velocity.x -= angle.cos() * force * config.repulsion_strength;
                particle.velocity.y -= angle.sin() * force * config.repulsion_strength;
            }
        }

        particle.velocity *= config.damping;
    }
}
