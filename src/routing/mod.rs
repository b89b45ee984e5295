//! Orthogonal connector routing between rectangular boxes
//!
//! A route is found on a sparse grid made of the edges and middles of the two
//! terminal boxes and every obstacle, all expanded by their margins. A
//! breadth-first wave from the start connection point fills in hop distances,
//! and the path is traced back from the end preferring fewer turns. When no
//! route exists, [`Fallback`] strategies relax the margins and the search is
//! repeated.

pub mod config;
pub mod error;
pub mod fallback;
pub mod finder;
pub mod geometry;
pub mod grid;
pub mod line_def;
pub mod optimize;
pub mod position;
pub mod trace;
pub mod wave;

pub use config::{ConfigError, RouterConfig};
pub use error::{BoxRole, RouteError};
pub use fallback::Fallback;
pub use finder::{find_path, PathFinder, RoutedPath};
pub use geometry::{Edge, Point, Rect, Segment, Side};
pub use line_def::{EffectiveLineDef, LineDef, Obstacle, ObstacleKind};
pub use position::{calculate_relative_position, should_look_for_path, RelativePosition};
