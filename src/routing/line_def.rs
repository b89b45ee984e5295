//! Routing requests and their resolved per-attempt form

use serde::{Deserialize, Serialize};

use super::config::RouterConfig;
use super::error::{BoxRole, RouteError};
use super::geometry::{
    connection_point, grid_box_from_box, snap_grid_boxes, Edge, Point, Rect, Side,
};

/// Role of an obstacle box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    /// An ordinary bar or event the line must route around
    #[default]
    Bar,
    /// A parent region enclosing the connected boxes, dropped first when no path exists
    NestedParent,
}

/// A box the routed line must avoid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub rect: Rect,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn bar(rect: Rect) -> Self {
        Self {
            rect,
            kind: ObstacleKind::Bar,
        }
    }

    pub fn nested_parent(rect: Rect) -> Self {
        Self {
            rect,
            kind: ObstacleKind::NestedParent,
        }
    }
}

/// A request to route one connector line
///
/// Unset margins fall back first to `horizontal_margin`/`vertical_margin` and
/// then to the [`RouterConfig`] defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct LineDef {
    pub start_box: Rect,
    pub end_box: Rect,
    pub start_side: Side,
    pub end_side: Side,
    pub start_shift: f64,
    pub end_shift: f64,
    pub start_arrow_margin: Option<f64>,
    pub end_arrow_margin: Option<f64>,
    pub horizontal_margin: Option<f64>,
    pub vertical_margin: Option<f64>,
    pub start_horizontal_margin: Option<f64>,
    pub start_vertical_margin: Option<f64>,
    pub end_horizontal_margin: Option<f64>,
    pub end_vertical_margin: Option<f64>,
    pub other_horizontal_margin: Option<f64>,
    pub other_vertical_margin: Option<f64>,
    pub obstacles: Vec<Obstacle>,
}

impl LineDef {
    /// Line from the right edge of `start_box` to the left edge of `end_box`
    pub fn new(start_box: Rect, end_box: Rect) -> Self {
        Self {
            start_box,
            end_box,
            start_side: Side::Right,
            end_side: Side::Left,
            start_shift: 0.0,
            end_shift: 0.0,
            start_arrow_margin: None,
            end_arrow_margin: None,
            horizontal_margin: None,
            vertical_margin: None,
            start_horizontal_margin: None,
            start_vertical_margin: None,
            end_horizontal_margin: None,
            end_vertical_margin: None,
            other_horizontal_margin: None,
            other_vertical_margin: None,
            obstacles: vec![],
        }
    }

    /// Set the connection sides
    pub fn with_sides(mut self, start: Side, end: Side) -> Self {
        self.start_side = start;
        self.end_side = end;
        self
    }

    /// Set the offsets along the connected edges
    pub fn with_shifts(mut self, start: f64, end: f64) -> Self {
        self.start_shift = start;
        self.end_shift = end;
        self
    }

    /// Set both arrow margins
    pub fn with_arrow_margins(mut self, start: f64, end: f64) -> Self {
        self.start_arrow_margin = Some(start);
        self.end_arrow_margin = Some(end);
        self
    }

    /// Set the shared horizontal and vertical margins
    pub fn with_margins(mut self, horizontal: f64, vertical: f64) -> Self {
        self.horizontal_margin = Some(horizontal);
        self.vertical_margin = Some(vertical);
        self
    }

    /// Add an obstacle
    pub fn with_obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    /// Add several obstacles
    pub fn with_obstacles(mut self, obstacles: impl IntoIterator<Item = Obstacle>) -> Self {
        self.obstacles.extend(obstacles);
        self
    }
}

/// A line definition with every default and override merged in
///
/// One value is built per search attempt; fallbacks derive new values instead
/// of mutating an existing one.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveLineDef {
    pub start_box: Rect,
    pub end_box: Rect,
    pub start_edge: Edge,
    pub end_edge: Edge,
    pub start_shift: f64,
    pub end_shift: f64,
    pub start_arrow_margin: f64,
    pub end_arrow_margin: f64,
    pub start_horizontal_margin: f64,
    pub start_vertical_margin: f64,
    pub end_horizontal_margin: f64,
    pub end_vertical_margin: f64,
    pub other_horizontal_margin: f64,
    pub other_vertical_margin: f64,
    pub obstacles: Vec<Obstacle>,
    /// Set when margins became too small to draw an arrow head
    pub hide_marker: bool,
}

impl EffectiveLineDef {
    /// Merge `line` with `config` and validate the result
    pub fn resolve(line: &LineDef, config: &RouterConfig) -> Result<Self, RouteError> {
        line.start_box
            .validate()
            .map_err(|reason| RouteError::invalid_box(BoxRole::Start, reason))?;
        line.end_box
            .validate()
            .map_err(|reason| RouteError::invalid_box(BoxRole::End, reason))?;
        for (index, obstacle) in line.obstacles.iter().enumerate() {
            obstacle
                .rect
                .validate()
                .map_err(|reason| RouteError::invalid_box(BoxRole::Obstacle(index), reason))?;
        }

        let horizontal = line.horizontal_margin.unwrap_or(config.horizontal_margin);
        let vertical = line.vertical_margin.unwrap_or(config.vertical_margin);

        let resolved = Self {
            start_box: line.start_box,
            end_box: line.end_box,
            start_edge: line.start_side.resolve(config.rtl),
            end_edge: line.end_side.resolve(config.rtl),
            start_shift: line.start_shift,
            end_shift: line.end_shift,
            start_arrow_margin: line.start_arrow_margin.unwrap_or(config.arrow_margin),
            end_arrow_margin: line.end_arrow_margin.unwrap_or(config.arrow_margin),
            start_horizontal_margin: line.start_horizontal_margin.unwrap_or(horizontal),
            start_vertical_margin: line.start_vertical_margin.unwrap_or(vertical),
            end_horizontal_margin: line.end_horizontal_margin.unwrap_or(horizontal),
            end_vertical_margin: line.end_vertical_margin.unwrap_or(vertical),
            other_horizontal_margin: line.other_horizontal_margin.unwrap_or(horizontal),
            other_vertical_margin: line.other_vertical_margin.unwrap_or(vertical),
            obstacles: line.obstacles.clone(),
            hide_marker: false,
        };
        resolved.validate_values()?;
        Ok(resolved)
    }

    fn validate_values(&self) -> Result<(), RouteError> {
        let margins = [
            ("start_arrow_margin", self.start_arrow_margin),
            ("end_arrow_margin", self.end_arrow_margin),
            ("start_horizontal_margin", self.start_horizontal_margin),
            ("start_vertical_margin", self.start_vertical_margin),
            ("end_horizontal_margin", self.end_horizontal_margin),
            ("end_vertical_margin", self.end_vertical_margin),
            ("other_horizontal_margin", self.other_horizontal_margin),
            ("other_vertical_margin", self.other_vertical_margin),
        ];
        for (name, value) in margins {
            if !value.is_finite() || value < 0.0 {
                return Err(RouteError::invalid_margin(name, value));
            }
        }
        for (name, value) in [("start_shift", self.start_shift), ("end_shift", self.end_shift)] {
            if !value.is_finite() {
                return Err(RouteError::invalid_margin(name, value));
            }
        }
        Ok(())
    }

    /// Exact attachment point on the start box
    pub fn start_point(&self) -> Point {
        connection_point(&self.start_box, self.start_edge, self.start_shift)
    }

    /// Exact attachment point on the end box
    pub fn end_point(&self) -> Point {
        connection_point(&self.end_box, self.end_edge, self.end_shift)
    }

    /// Margin-expanded start box
    pub fn start_grid_box(&self) -> Rect {
        grid_box_from_box(
            &self.start_box,
            Some(self.start_edge),
            self.start_arrow_margin,
            self.start_horizontal_margin,
            self.start_vertical_margin,
        )
    }

    /// Margin-expanded end box, before snapping
    pub fn end_grid_box(&self) -> Rect {
        grid_box_from_box(
            &self.end_box,
            Some(self.end_edge),
            self.end_arrow_margin,
            self.end_horizontal_margin,
            self.end_vertical_margin,
        )
    }

    /// Start and end grid boxes with near-equal edges snapped together
    pub fn grid_boxes(&self, snap_threshold: f64) -> (Rect, Rect) {
        let start = self.start_grid_box();
        let end = snap_grid_boxes(&start, &self.end_grid_box(), snap_threshold);
        (start, end)
    }

    /// Margin-expanded obstacle boxes
    pub fn obstacle_grid_boxes(&self) -> Vec<Rect> {
        self.obstacles
            .iter()
            .map(|obstacle| {
                grid_box_from_box(
                    &obstacle.rect,
                    None,
                    0.0,
                    self.other_horizontal_margin,
                    self.other_vertical_margin,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxes() -> (Rect, Rect) {
        (
            Rect::new(0.0, 50.0, 0.0, 20.0),
            Rect::new(200.0, 250.0, 100.0, 120.0),
        )
    }

    #[test]
    fn test_resolve_applies_config_defaults() {
        let (a, b) = boxes();
        let line = EffectiveLineDef::resolve(&LineDef::new(a, b), &RouterConfig::default())
            .expect("Should resolve");
        assert_eq!(line.start_edge, Edge::Right);
        assert_eq!(line.end_edge, Edge::Left);
        assert_eq!(line.start_arrow_margin, 12.0);
        assert_eq!(line.end_horizontal_margin, 5.0);
        assert_eq!(line.other_vertical_margin, 2.0);
        assert!(!line.hide_marker);
    }

    #[test]
    fn test_resolve_prefers_specific_overrides() {
        let (a, b) = boxes();
        let mut def = LineDef::new(a, b).with_margins(8.0, 4.0);
        def.start_horizontal_margin = Some(1.0);
        let line = EffectiveLineDef::resolve(&def, &RouterConfig::default()).expect("Should resolve");
        assert_eq!(line.start_horizontal_margin, 1.0);
        assert_eq!(line.end_horizontal_margin, 8.0);
        assert_eq!(line.other_vertical_margin, 4.0);
    }

    #[test]
    fn test_resolve_uses_rtl_for_logical_sides() {
        let (a, b) = boxes();
        let def = LineDef::new(a, b).with_sides(Side::End, Side::Start);
        let config = RouterConfig::default().with_rtl(true);
        let line = EffectiveLineDef::resolve(&def, &config).expect("Should resolve");
        assert_eq!(line.start_edge, Edge::Left);
        assert_eq!(line.end_edge, Edge::Right);
    }

    #[test]
    fn test_resolve_rejects_malformed_boxes() {
        let (a, b) = boxes();
        let bad = Rect::new(10.0, 0.0, 0.0, 10.0);

        let err = EffectiveLineDef::resolve(&LineDef::new(bad, b), &RouterConfig::default())
            .unwrap_err();
        assert!(matches!(err, RouteError::InvalidBox { role: BoxRole::Start, .. }));

        let def = LineDef::new(a, b).with_obstacle(Obstacle::bar(bad));
        let err = EffectiveLineDef::resolve(&def, &RouterConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            RouteError::InvalidBox {
                role: BoxRole::Obstacle(0),
                ..
            }
        ));
    }

    #[test]
    fn test_resolve_rejects_negative_margin() {
        let (a, b) = boxes();
        let def = LineDef::new(a, b).with_arrow_margins(-1.0, 12.0);
        let err = EffectiveLineDef::resolve(&def, &RouterConfig::default()).unwrap_err();
        assert_eq!(err, RouteError::invalid_margin("start_arrow_margin", -1.0));
    }

    #[test]
    fn test_connection_points() {
        let (a, b) = boxes();
        let line = EffectiveLineDef::resolve(&LineDef::new(a, b), &RouterConfig::default())
            .expect("Should resolve");
        assert_eq!(line.start_point(), Point::new(50.0, 10.0));
        assert_eq!(line.end_point(), Point::new(200.0, 110.0));
    }
}
