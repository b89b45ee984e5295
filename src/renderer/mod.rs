//! SVG renderer for routed scenes
//!
//! Boxes become rectangles and routed lines become paths with CSS classes
//! for styling.

pub mod config;
pub mod path;
pub mod svg;

pub use config::SvgConfig;
pub use path::{segments_to_d, ResolvedPath};
pub use svg::{render_svg, SvgBuilder};
