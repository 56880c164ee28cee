//! Level generation configuration
//!
//! `LevelConfig` is plain data with serde support so a game can ship its
//! tunables as a TOML file. Every field has a default from `constants`, so a
//! file only needs the keys it overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{generation, geometry, physics};
use crate::generation::layout::odd_size_range;

/// Tunables for the generator, emitter and resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Fixed seed; `None` draws a fresh seed per layout
    pub seed: Option<u64>,

    pub base_rooms: u32,
    pub rooms_per_level: u32,
    pub min_rooms: u32,
    pub max_rooms: u32,

    pub room_size_min: f32,
    pub room_size_max: f32,
    pub cell_size: f32,
    pub cell_margin: f32,

    pub extra_connection_attempts: u32,

    pub corridor_width: f32,
    pub doorway_width: f32,

    pub wall_height: f32,
    pub wall_thickness: f32,
    pub floor_thickness: f32,

    /// Resolution passes per `MovementResolver::resolve` call
    pub resolver_iterations: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            seed: None,
            base_rooms: generation::BASE_ROOMS,
            rooms_per_level: generation::ROOMS_PER_LEVEL,
            min_rooms: generation::MIN_ROOMS,
            max_rooms: generation::MAX_ROOMS,
            room_size_min: generation::ROOM_SIZE_MIN,
            room_size_max: generation::ROOM_SIZE_MAX,
            cell_size: generation::CELL_SIZE,
            cell_margin: generation::CELL_MARGIN,
            extra_connection_attempts: generation::EXTRA_CONNECTION_ATTEMPTS,
            corridor_width: geometry::CORRIDOR_WIDTH,
            doorway_width: geometry::DOORWAY_WIDTH,
            wall_height: geometry::WALL_HEIGHT,
            wall_thickness: geometry::WALL_THICKNESS,
            floor_thickness: geometry::FLOOR_THICKNESS,
            resolver_iterations: physics::RESOLVER_ITERATIONS,
        }
    }
}

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {field} {reason}")]
    Invalid { field: String, reason: String },
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.into(),
    }
}

impl LevelConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: LevelConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("[LevelConfig] Loaded {} bytes from {}", source.len(), path.display());
        Self::from_toml_str(&source)
    }

    /// Same config with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the relationships the generator relies on.
    ///
    /// Doorways must fit inside the smallest wall and must not be wider than
    /// the corridor feeding them; rooms plus margins must fit a grid cell.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_rooms > self.max_rooms {
            return Err(invalid(
                "min_rooms",
                format!("({}) exceeds max_rooms ({})", self.min_rooms, self.max_rooms),
            ));
        }

        for (field, value) in [
            ("room_size_min", self.room_size_min),
            ("room_size_max", self.room_size_max),
            ("cell_size", self.cell_size),
            ("corridor_width", self.corridor_width),
            ("doorway_width", self.doorway_width),
            ("wall_height", self.wall_height),
            ("wall_thickness", self.wall_thickness),
            ("floor_thickness", self.floor_thickness),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {}", value)));
            }
        }

        if !(self.cell_margin.is_finite() && self.cell_margin >= 0.0) {
            return Err(invalid("cell_margin", "must not be negative"));
        }

        if self.room_size_min > self.room_size_max {
            return Err(invalid(
                "room_size_min",
                format!(
                    "({}) exceeds room_size_max ({})",
                    self.room_size_min, self.room_size_max
                ),
            ));
        }

        if odd_size_range(self.room_size_min, self.room_size_max).is_none() {
            return Err(invalid(
                "room_size_max",
                format!(
                    "no odd whole room size between {} and {}",
                    self.room_size_min, self.room_size_max
                ),
            ));
        }

        if self.doorway_width >= self.room_size_min {
            return Err(invalid(
                "doorway_width",
                format!(
                    "({}) must be smaller than room_size_min ({})",
                    self.doorway_width, self.room_size_min
                ),
            ));
        }

        if self.doorway_width > self.corridor_width {
            return Err(invalid(
                "doorway_width",
                format!(
                    "({}) must not exceed corridor_width ({})",
                    self.doorway_width, self.corridor_width
                ),
            ));
        }

        let needed = self.room_size_max + self.cell_margin * 2.0;
        if needed > self.cell_size {
            return Err(invalid(
                "cell_size",
                format!(
                    "({}) cannot hold a room of {} plus margins {}",
                    self.cell_size, self.room_size_max, self.cell_margin
                ),
            ));
        }

        if self.resolver_iterations == 0 || self.resolver_iterations > physics::MAX_RESOLVER_ITERATIONS {
            return Err(invalid(
                "resolver_iterations",
                format!(
                    "must be between 1 and {}, got {}",
                    physics::MAX_RESOLVER_ITERATIONS,
                    self.resolver_iterations
                ),
            ));
        }

        Ok(())
    }
}
