//! Configuration for SVG rendering

use serde::Deserialize;

/// Configuration options for SVG output
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SvgConfig {
    /// Padding around the viewBox
    pub viewbox_padding: f64,

    /// Whether to include XML declaration and standalone attributes
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "or-" for "or-connection")
    pub class_prefix: Option<String>,

    /// Largest radius used to round connector corners; 0 draws sharp corners
    pub corner_radius: f64,

    /// Whether to draw the boxes as well as the connectors
    pub draw_boxes: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            viewbox_padding: 20.0,
            standalone: true,
            pretty_print: true,
            class_prefix: Some("or-".to_string()),
            corner_radius: 0.0,
            draw_boxes: true,
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewBox padding
    pub fn with_viewbox_padding(mut self, padding: f64) -> Self {
        self.viewbox_padding = padding;
        self
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    /// Set the connector corner radius
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set whether boxes are drawn
    pub fn with_draw_boxes(mut self, draw: bool) -> Self {
        self.draw_boxes = draw;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SvgConfig::default();
        assert_eq!(config.viewbox_padding, 20.0);
        assert!(config.standalone);
        assert!(config.pretty_print);
        assert_eq!(config.class_prefix, Some("or-".to_string()));
        assert_eq!(config.corner_radius, 0.0);
        assert!(config.draw_boxes);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SvgConfig::new()
            .with_viewbox_padding(10.0)
            .with_standalone(false)
            .with_pretty_print(false)
            .with_class_prefix("my-")
            .with_corner_radius(4.0);

        assert_eq!(config.viewbox_padding, 10.0);
        assert!(!config.standalone);
        assert!(!config.pretty_print);
        assert_eq!(config.class_prefix, Some("my-".to_string()));
        assert_eq!(config.corner_radius, 4.0);
    }
}
