//! Configuration management for the Game of Life simulator

pub mod settings;

pub use settings::{
    CliOverrides, GlyphConfig, LoggingConfig, Settings, SimulationConfig, StorageConfig, ViewportConfig,
    MAX_VIEWPORT_AREA,
};
