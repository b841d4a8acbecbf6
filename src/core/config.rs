//! Battle configuration with documented defaults
//!
//! Values can be loaded from TOML; anything missing falls back to the defaults below.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::battle::constants::{DEFAULT_GRID_RADIUS, DEFAULT_LOG_CAPACITY};
use crate::core::error::{Result, TacticsError};

/// Screen-space layout of the hex grid
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance from a hex center to a corner, in pixels, before isometric scaling
    pub hex_size: f32,

    /// Horizontal isometric squash applied after the flat-topped projection
    pub iso_scale_x: f32,

    /// Vertical isometric squash applied after the flat-topped projection
    ///
    /// At 0.5 the grid reads as tilted back by 60 degrees.
    pub iso_scale_y: f32,

    /// Pixel position of hex (0, 0)
    pub offset_x: f32,
    pub offset_y: f32,

    /// Factor applied to `hex_size` per zoom step
    pub zoom_step: f32,

    /// Smallest and largest hex size reachable by zooming
    pub min_hex_size: f32,
    pub max_hex_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            hex_size: 40.0,
            iso_scale_x: 1.0,
            iso_scale_y: 0.5,
            // Center of a 1280x720 window
            offset_x: 640.0,
            offset_y: 360.0,
            zoom_step: 1.25,
            min_hex_size: 10.0,
            max_hex_size: 160.0,
        }
    }
}

/// Configuration for a single battle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Number of lines the combat log keeps before dropping the oldest
    pub combat_log_capacity: usize,

    /// Battlefield bounds: q and r both range over `-grid_radius..=grid_radius`
    pub grid_radius: i32,

    /// Seed for dice and initiative; `None` draws one from the OS
    pub seed: Option<u64>,

    pub layout: LayoutConfig,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            combat_log_capacity: DEFAULT_LOG_CAPACITY,
            grid_radius: DEFAULT_GRID_RADIUS,
            seed: None,
            layout: LayoutConfig::default(),
        }
    }
}

impl BattleConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BattleConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.combat_log_capacity == 0 {
            return Err(TacticsError::Config(
                "combat_log_capacity must be at least 1".into(),
            ));
        }

        if self.grid_radius < 0 {
            return Err(TacticsError::Config(format!(
                "grid_radius ({}) must not be negative",
                self.grid_radius
            )));
        }

        let layout = &self.layout;
        if layout.hex_size <= 0.0 || layout.iso_scale_x <= 0.0 || layout.iso_scale_y <= 0.0 {
            return Err(TacticsError::Config(
                "hex_size and isometric scales must be positive".into(),
            ));
        }

        if layout.zoom_step <= 1.0 {
            return Err(TacticsError::Config(format!(
                "zoom_step ({}) must be greater than 1",
                layout.zoom_step
            )));
        }

        if layout.min_hex_size > layout.max_hex_size {
            return Err(TacticsError::Config(format!(
                "min_hex_size ({}) should be <= max_hex_size ({})",
                layout.min_hex_size, layout.max_hex_size
            )));
        }

        Ok(())
    }
}
