//! Ortho Router - orthogonal connector routing between rectangular boxes
//!
//! This library routes axis-aligned connector lines around obstacle boxes and
//! renders the result as SVG. Scenes are described in TOML.
//!
//! # Example
//!
//! ```rust
//! use ortho_router::render;
//!
//! let svg = render(r#"
//!     [[box]]
//!     id = "a"
//!     start = 0
//!     end = 50
//!     top = 0
//!     bottom = 20
//!
//!     [[box]]
//!     id = "b"
//!     start = 200
//!     end = 250
//!     top = 100
//!     bottom = 120
//!
//!     [[line]]
//!     from = "a"
//!     to = "b"
//! "#).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod error;
pub mod renderer;
pub mod routing;
pub mod scene;

pub use error::SceneError;
pub use renderer::{render_svg, SvgConfig};
pub use routing::{find_path, LineDef, PathFinder, RouteError, RoutedPath, RouterConfig};
pub use scene::{RoutedLine, Scene};

use thiserror::Error;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error loading or validating the scene
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    /// Invalid routing input
    #[error("routing error: {0}")]
    Route(#[from] RouteError),
}

impl RenderError {
    /// Format the error with source context where available
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            RenderError::Scene(err) => err.format(source, filename),
            RenderError::Route(err) => format!("Error: {}", err),
        }
    }
}

/// Overrides applied on top of the scene file's own settings
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Force right-to-left resolution of `start`/`end` sides
    pub rtl: Option<bool>,
    /// Override the connector corner radius
    pub corner_radius: Option<f64>,
    /// Print each routed line to stderr
    pub debug: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set right-to-left layout
    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = Some(rtl);
        self
    }

    /// Set the connector corner radius
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = Some(radius);
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    fn apply(&self, scene: &mut Scene) {
        if let Some(rtl) = self.rtl {
            scene.router.rtl = rtl;
        }
        if let Some(radius) = self.corner_radius {
            scene.svg.corner_radius = radius;
        }
    }
}

/// Parse a scene and route every line in it
///
/// # Example
///
/// ```rust
/// use ortho_router::{route_scene, RenderConfig};
///
/// let lines = route_scene(r#"
///     [[box]]
///     id = "a"
///     start = 0
///     end = 40
///     top = 0
///     bottom = 20
///
///     [[box]]
///     id = "b"
///     start = 100
///     end = 140
///     top = 0
///     bottom = 20
///
///     [[line]]
///     from = "a"
///     to = "b"
/// "#, &RenderConfig::default()).unwrap();
///
/// assert_eq!(lines.len(), 1);
/// assert!(lines[0].path.is_some());
/// ```
pub fn route_scene(source: &str, config: &RenderConfig) -> Result<Vec<RoutedLine>, RenderError> {
    let (_, lines) = load_and_route(source, config)?;
    Ok(lines)
}

/// Render a TOML scene to SVG with default configuration
pub fn render(source: &str) -> Result<String, RenderError> {
    render_with_config(source, RenderConfig::default())
}

/// Render a TOML scene to SVG with command-line overrides
///
/// # Example
///
/// ```rust
/// use ortho_router::{render_with_config, RenderConfig};
///
/// let config = RenderConfig::new().with_corner_radius(4.0);
/// let svg = render_with_config("", config).unwrap();
/// assert!(svg.contains("<svg"));
/// ```
pub fn render_with_config(source: &str, config: RenderConfig) -> Result<String, RenderError> {
    let (scene, lines) = load_and_route(source, &config)?;
    Ok(render_svg(&scene, &lines, &scene.svg))
}

fn load_and_route(source: &str, config: &RenderConfig) -> Result<(Scene, Vec<RoutedLine>), RenderError> {
    let mut scene = Scene::from_toml_str(source)?;
    config.apply(&mut scene);

    let lines = scene.route()?;

    if config.debug {
        eprintln!("=== Routing Debug ===");
        for line in &lines {
            match &line.path {
                Some(path) => {
                    eprintln!(
                        "[{} -> {}] attempts={} fallbacks={:?} hide_marker={} length={:.1}",
                        line.from,
                        line.to,
                        path.attempts,
                        path.fallbacks,
                        path.hide_marker,
                        path.length()
                    );
                    for segment in &path.segments {
                        eprintln!(
                            "  ({:.1}, {:.1}) -> ({:.1}, {:.1})",
                            segment.x1, segment.y1, segment.x2, segment.y2
                        );
                    }
                }
                None => eprintln!("[{} -> {}] no route, drawn direct", line.from, line.to),
            }
        }
        eprintln!("=====================");
    }

    Ok((scene, lines))
}
