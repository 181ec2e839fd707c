pub mod app;
pub mod config;
pub mod connections;
pub mod driver;
pub mod error;
pub mod field;
pub mod physics;
pub mod render;

pub use app::ParticleFieldApp;
pub use config::{ConfigError, FieldConfig, Palette};
pub use connections::{Connection, ConnectionConfig, ConnectionIndex};
pub use driver::{
    BoundedTicks, DriverState, FrameDriver, FrameStats, InputEvent, TickSource, run_bounded,
};
pub use error::EngineError;
pub use field::{Extent, Particle, ParticleField, PointerState};
pub use physics::{PhysicsConfig, repulsion_force, step_physics, step_with_pointer};
pub use render::{DrawCommand, FrameRenderer, PainterSurface, RecordingSurface, RenderSurface};
