use serde::{Deserialize, Serialize};

use crate::error::{AtlasError, Result};

/// Upper bound used when no explicit limit is configured; matches the largest
/// texture size most GPUs accept.
pub const DEFAULT_MAX_DIMENSION: u32 = 16384;

/// Configuration for [`AtlasBuilder`](crate::AtlasBuilder).
///
/// The packing strategy itself is fixed (single row, tallest first); this only
/// bounds the output and controls the fill of unused atlas pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasConfig {
    /// Maximum atlas width in pixels.
    #[serde(default = "default_max_dimension")]
    pub max_width: u32,
    /// Maximum atlas height in pixels.
    #[serde(default = "default_max_dimension")]
    pub max_height: u32,
    /// RGBA fill for atlas pixels not covered by any image (below shorter images).
    #[serde(default)]
    pub background_color: [u8; 4],
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_DIMENSION,
            max_height: DEFAULT_MAX_DIMENSION,
            background_color: [0, 0, 0, 0],
        }
    }
}

fn default_max_dimension() -> u32 {
    DEFAULT_MAX_DIMENSION
}

impl AtlasConfig {
    /// Create a fluent builder for `AtlasConfig`.
    pub fn builder() -> AtlasConfigBuilder {
        AtlasConfigBuilder::new()
    }

    /// Validates the configuration.
    ///
    /// Returns an error if either maximum dimension is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(AtlasError::InvalidDimensions {
                width: self.max_width,
                height: self.max_height,
            });
        }
        Ok(())
    }
}

/// Builder for `AtlasConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct AtlasConfigBuilder {
    cfg: AtlasConfig,
}

impl AtlasConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: AtlasConfig::default(),
        }
    }
    pub fn with_max_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.max_width = w;
        self.cfg.max_height = h;
        self
    }
    pub fn background_color(mut self, rgba: [u8; 4]) -> Self {
        self.cfg.background_color = rgba;
        self
    }
    pub fn build(self) -> AtlasConfig {
        self.cfg
    }
}
