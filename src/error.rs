use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("render surface unavailable: {0}")]
    SurfaceUnavailable(&'static str),

    #[error("invalid surface extent {width} x {height}")]
    InvalidExtent { width: f32, height: f32 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
