use crate::config::FieldConfig;
use crate::field::Particle;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct ConnectionConfig {
    pub max_distance: f32,
    pub max_opacity: f32,
}

impl ConnectionConfig {
    pub fn from_config(config: &FieldConfig) -> Self {
        Self {
            max_distance: config.connection_distance,
            max_opacity: config.max_connection_opacity,
        }
    }

    pub fn opacity_at(&self, distance: f32) -> Option<f32> {
        if distance < self.max_distance {
            Some((1.0 - distance / self.max_distance) * self.max_opacity)
        } else {
            None
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::from_config(&FieldConfig::default())
    }
}

#[derive(Debug, Default)]
pub struct ConnectionIndex {
    connections: Vec<Connection>,
}

impl ConnectionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compute(&mut self, particles: &[Particle], config: ConnectionConfig) {
        self.connections.clear();

        for i in 0..particles.len() {
            let from = particles[i].position;
            for (offset, other) in particles[(i + 1)..].iter().enumerate() {
                let distance = from.distance(other.position);
                if let Some(opacity) = config.opacity_at(distance) {
                    self.connections.push(Connection {
                        from: i,
                        to: i + 1 + offset,
                        opacity,
                    });
                }
            }
        }
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }
}
