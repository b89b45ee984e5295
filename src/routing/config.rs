//! Configuration for the routing engine

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a router configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read router config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse router config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Default values applied to every line definition
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Clearance reserved in front of the connected edge for the arrow head
    pub arrow_margin: f64,

    /// Horizontal clearance around every box
    pub horizontal_margin: f64,

    /// Vertical clearance around every box
    pub vertical_margin: f64,

    /// Arrow margin used once the first fallback shrinks it
    pub bar_margin: f64,

    /// Try again without nested-parent obstacles before shrinking margins
    pub avoid_nested_parents: bool,

    /// Device pixel ratio of the target display, used for edge snapping
    pub device_pixel_ratio: f64,

    /// Resolve logical `start`/`end` sides for right-to-left layout
    pub rtl: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            arrow_margin: 12.0,
            horizontal_margin: 5.0,
            vertical_margin: 2.0,
            bar_margin: 10.0,
            avoid_nested_parents: true,
            device_pixel_ratio: 1.0,
            rtl: false,
        }
    }
}

impl RouterConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a configuration from a TOML string; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the arrow margin
    pub fn with_arrow_margin(mut self, margin: f64) -> Self {
        self.arrow_margin = margin;
        self
    }

    /// Set the horizontal and vertical margins
    pub fn with_margins(mut self, horizontal: f64, vertical: f64) -> Self {
        self.horizontal_margin = horizontal;
        self.vertical_margin = vertical;
        self
    }

    /// Set the bar margin
    pub fn with_bar_margin(mut self, margin: f64) -> Self {
        self.bar_margin = margin;
        self
    }

    /// Enable or disable the nested-parent fallback
    pub fn with_avoid_nested_parents(mut self, avoid: bool) -> Self {
        self.avoid_nested_parents = avoid;
        self
    }

    /// Set the device pixel ratio
    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// Enable or disable right-to-left side resolution
    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }
}
