//! Configuration settings for the Game of Life simulator

use crate::game_of_life::Coordinate;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest number of cells a viewport may show
pub const MAX_VIEWPORT_AREA: usize = 1_000_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub viewport: ViewportConfig,
    pub glyphs: GlyphConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Generation number given to newly created universes
    pub initial_generation: u64,
    /// Most coordinates a single transition may touch; `None` disables the check
    pub biomass_limit: Option<usize>,
}

/// Visible window of the plane, half-open on both axes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphConfig {
    pub live: char,
    pub dead: char,
    pub header: char,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `conway_universe=debug`
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                initial_generation: 0,
                biomass_limit: Some(1_000_000),
            },
            viewport: ViewportConfig {
                min_x: -10,
                max_x: 10,
                min_y: -10,
                max_y: 10,
            },
            glyphs: GlyphConfig {
                live: '*',
                dead: ' ',
                header: 'C',
            },
            storage: StorageConfig {
                directory: PathBuf::from("universes"),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults
    pub fn from_file_or_default(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.viewport.width() == 0 || self.viewport.height() == 0 {
            anyhow::bail!(
                "Viewport must be non-empty, got x {}..{} and y {}..{}",
                self.viewport.min_x,
                self.viewport.max_x,
                self.viewport.min_y,
                self.viewport.max_y
            );
        }

        if !self.viewport.fits_screen() {
            anyhow::bail!(
                "Viewport x {}..{} and y {}..{} exceeds {} cells",
                self.viewport.min_x,
                self.viewport.max_x,
                self.viewport.min_y,
                self.viewport.max_y,
                MAX_VIEWPORT_AREA
            );
        }

        if self.simulation.biomass_limit == Some(0) {
            anyhow::bail!("Biomass limit must be positive");
        }

        if self.logging.level.trim().is_empty() {
            anyhow::bail!("Logging level cannot be empty");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(limit) = cli_overrides.biomass_limit {
            self.simulation.biomass_limit = Some(limit);
        }
        if let Some(ref directory) = cli_overrides.storage_dir {
            self.storage.directory = directory.clone();
        }
        if let Some(ref level) = cli_overrides.log_level {
            self.logging.level = level.clone();
        }
    }
}

impl ViewportConfig {
    /// Columns shown, saturating at `usize::MAX`
    pub fn width(&self) -> usize {
        span(self.min_x, self.max_x)
    }

    /// Rows shown, saturating at `usize::MAX`
    pub fn height(&self) -> usize {
        span(self.min_y, self.max_y)
    }

    /// Cells shown, or `None` if the count does not fit in `usize`
    pub fn area(&self) -> Option<usize> {
        self.width().checked_mul(self.height())
    }

    /// Whether the viewport is small enough to render
    pub fn fits_screen(&self) -> bool {
        self.area().is_some_and(|area| area <= MAX_VIEWPORT_AREA)
    }

    /// Whether `point` falls inside the viewport
    pub fn contains(&self, point: &Coordinate) -> bool {
        (self.min_x..self.max_x).contains(&point.x()) && (self.min_y..self.max_y).contains(&point.y())
    }
}

fn span(min: i64, max: i64) -> usize {
    if max > min {
        usize::try_from(max.abs_diff(min)).unwrap_or(usize::MAX)
    } else {
        0
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub biomass_limit: Option<usize>,
    pub storage_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}
