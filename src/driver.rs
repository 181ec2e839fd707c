use eframe::egui::Pos2;

use crate::config::FieldConfig;
use crate::connections::{ConnectionConfig, ConnectionIndex};
use crate::field::{Extent, ParticleField};
use crate::physics::{PhysicsConfig, step_physics};
use crate::render::{FrameRenderer, RenderSurface};

pub trait TickSource {
    fn request_frame(&mut self);
}

#[derive(Debug)]
pub struct BoundedTicks {
    remaining: usize,
    pending: bool,
    delivered: usize,
}

impl BoundedTicks {
    pub fn new(frames: usize) -> Self {
        Self {
            remaining: frames,
            pending: false,
            delivered: 0,
        }
    }

    pub fn next_frame(&mut self) -> bool {
        if !self.pending || self.remaining == 0 {
            return false;
        }
        self.pending = false;
        self.remaining -= 1;
        self.delivered += 1;
        true
    }

    pub fn delivered(&self) -> usize {
        self.delivered
    }

    pub fn is_armed(&self) -> bool {
        self.pending
    }
}

impl TickSource for BoundedTicks {
    fn request_frame(&mut self) {
        self.pending = true;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Resize(Extent),
    PointerMove(Pos2),
    PointerLeave,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
    Stopped,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub ticks: u64,
    pub connections: usize,
}

pub struct FrameDriver {
    field: ParticleField,
    connections: ConnectionIndex,
    renderer: FrameRenderer,
    physics: PhysicsConfig,
    connection_config: ConnectionConfig,
    particle_count: usize,
    state: DriverState,
    stats: FrameStats,
}

impl FrameDriver {
    pub fn new(config: &FieldConfig, extent: Extent) -> Self {
        Self::with_field(config, ParticleField::new(config, extent))
    }

    pub fn with_field(config: &FieldConfig, field: ParticleField) -> Self {
        Self {
            field,
            connections: ConnectionIndex::new(),
            renderer: FrameRenderer::new(config.palette),
            physics: PhysicsConfig::from_config(config),
            connection_config: ConnectionConfig::from_config(config),
            particle_count: config.particle_count,
            state: DriverState::Idle,
            stats: FrameStats::default(),
        }
    }

    pub fn start(&mut self, ticks: &mut impl TickSource) {
        if self.state == DriverState::Running {
            return;
        }
        self.state = DriverState::Running;
        log::info!(
            "particle field running with {} particles in {:.0}x{:.0}",
            self.field.particles().len(),
            self.field.extent().width,
            self.field.extent().height
        );
        ticks.request_frame();
    }

    pub fn stop(&mut self) {
        if self.state == DriverState::Running {
            log::info!("particle field stopped after {} ticks", self.stats.ticks);
        }
        self.state = DriverState::Stopped;
    }

    pub fn on_frame(
        &mut self,
        surface: &mut impl RenderSurface,
        ticks: &mut impl TickSource,
    ) -> bool {
        if self.state != DriverState::Running {
            log::trace!("frame ignored in state {:?}", self.state);
            return false;
        }

        step_physics(&mut self.field, self.physics);
        self.connections
            .compute(self.field.particles(), self.connection_config);
        self.renderer
            .draw(surface, &self.field, self.connections.connections());

        self.stats.ticks += 1;
        self.stats.connections = self.connections.connections().len();
        ticks.request_frame();
        true
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Resize(extent) => {
                if extent != self.field.extent() {
                    self.field.reseed(extent, self.particle_count);
                }
            }
            InputEvent::PointerMove(position) => self.field.set_pointer(Some(position)),
            InputEvent::PointerLeave => {
                log::debug!("pointer left the surface");
                self.field.set_pointer(None);
            }
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }
}

pub fn run_bounded(
    driver: &mut FrameDriver,
    surface: &mut impl RenderSurface,
    ticks: &mut BoundedTicks,
) -> usize {
    let mut ran = 0;
    while ticks.next_frame() {
        if driver.on_frame(surface, ticks) {
            ran += 1;
        }
    }
    ran
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;
    use crate::render::RecordingSurface;

    fn config(count: usize) -> FieldConfig {
        FieldConfig {
            particle_count: count,
            seed: Some(11),
            ..FieldConfig::default()
        }
    }

    #[test]
    fn idle_driver_ignores_frames() {
        let mut driver = FrameDriver::new(&config(4), Extent::new(200.0, 200.0));
        let mut surface = RecordingSurface::new();
        let mut ticks = BoundedTicks::new(3);

        assert_eq!(driver.state(), DriverState::Idle);
        assert!(!driver.on_frame(&mut surface, &mut ticks));
        assert!(!ticks.is_armed());
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn start_arms_and_each_frame_rearms() {
        let mut driver = FrameDriver::new(&config(4), Extent::new(200.0, 200.0));
        let mut surface = RecordingSurface::new();
        let mut ticks = BoundedTicks::new(5);

        driver.start(&mut ticks);
        assert_eq!(driver.state(), DriverState::Running);
        assert!(ticks.is_armed());

        assert_eq!(run_bounded(&mut driver, &mut surface, &mut ticks), 5);
        assert_eq!(ticks.delivered(), 5);
        assert_eq!(driver.stats().ticks, 5);
        assert!(ticks.is_armed());
        assert_eq!(surface.circle_count(), 4);
    }

    #[test]
    fn stop_ends_the_loop() {
        let mut driver = FrameDriver::new(&config(2), Extent::new(100.0, 100.0));
        let mut surface = RecordingSurface::new();
        let mut ticks = BoundedTicks::new(10);

        driver.start(&mut ticks);
        assert!(ticks.next_frame());
        assert!(driver.on_frame(&mut surface, &mut ticks));
        driver.stop();

        assert_eq!(run_bounded(&mut driver, &mut surface, &mut ticks), 0);
        assert_eq!(driver.state(), DriverState::Stopped);
        assert_eq!(driver.stats().ticks, 1);
        assert_eq!(ticks.delivered(), 2);
    }

    #[test]
    fn resize_reseeds_into_new_extent() {
        let mut driver = FrameDriver::new(&config(150), Extent::new(800.0, 600.0));
        let extent = Extent::new(300.0, 200.0);
        driver.handle_input(InputEvent::Resize(extent));

        assert_eq!(driver.field().particles().len(), 150);
        assert_eq!(driver.field().extent(), extent);
        assert!(
            driver
                .field()
                .particles()
                .iter()
                .all(|particle| extent.contains(particle.position))
        );
    }

    #[test]
    fn resize_after_with_field_uses_its_config() {
        let config = FieldConfig {
            particle_count: 6,
            min_size: 5.0,
            max_size: 5.0,
            max_seed_speed: 0.0,
            pointer_radius: 20.0,
            seed: Some(3),
            ..FieldConfig::default()
        };
        let field = ParticleField::from_particles(&config, Extent::new(800.0, 600.0), Vec::new());
        let mut driver = FrameDriver::with_field(&config, field);
        assert_eq!(driver.field().pointer().radius, 20.0);

        driver.handle_input(InputEvent::Resize(Extent::new(200.0, 200.0)));

        assert_eq!(driver.field().particles().len(), 6);
        for particle in driver.field().particles() {
            assert_eq!(particle.size, 5.0);
            assert_eq!(particle.velocity, eframe::egui::Vec2::ZERO);
        }
        assert_eq!(driver.field().pointer().radius, 20.0);
    }

    #[test]
    fn unchanged_resize_keeps_particles() {
        let mut driver = FrameDriver::new(&config(8), Extent::new(800.0, 600.0));
        let before = driver.field().particles().to_vec();
        driver.handle_input(InputEvent::Resize(Extent::new(800.0, 600.0)));
        assert_eq!(before, driver.field().particles());
    }

    #[test]
    fn pointer_events_update_field() {
        let mut driver = FrameDriver::new(&config(1), Extent::new(100.0, 100.0));
        driver.handle_input(InputEvent::PointerMove(pos2(12.0, 34.0)));
        assert_eq!(driver.field().pointer().position, Some(pos2(12.0, 34.0)));

        driver.handle_input(InputEvent::PointerLeave);
        assert_eq!(driver.field().pointer().position, None);
    }

    #[test]
    fn drivers_do_not_share_state() {
        let mut first = FrameDriver::new(&config(3), Extent::new(100.0, 100.0));
        let second = FrameDriver::new(&config(3), Extent::new(100.0, 100.0));

        first.handle_input(InputEvent::PointerMove(pos2(1.0, 1.0)));
        first.handle_input(InputEvent::Resize(Extent::new(50.0, 50.0)));

        assert_eq!(second.field().pointer().position, None);
        assert_eq!(second.field().extent(), Extent::new(100.0, 100.0));
    }
}
