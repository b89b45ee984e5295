//! Geometry primitives for connector routing
//!
//! Boxes are addressed by `start`/`end` on the horizontal axis and `top`/`bottom`
//! on the vertical axis. Logical sides (`start`/`end`) are resolved to physical
//! edges with an explicit right-to-left flag.

use serde::{Deserialize, Serialize};

/// Largest distance, in pixels, at which two grid-box edges are snapped together
pub const MAX_SNAP_THRESHOLD: f64 = 0.75;

/// Tolerance used when comparing segment endpoints
pub const COORD_TOLERANCE: f64 = 0.1;

/// A 2D point in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check whether two points coincide within [`COORD_TOLERANCE`]
    pub fn approx_eq(&self, other: &Point) -> bool {
        (self.x - other.x).abs() < COORD_TOLERANCE && (self.y - other.y).abs() < COORD_TOLERANCE
    }
}

/// The two axes of the routing plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub start: f64,
    pub end: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(start: f64, end: f64, top: f64, bottom: f64) -> Self {
        Self {
            start,
            end,
            top,
            bottom,
        }
    }

    /// Create a box from its top-left corner and size
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, x + width, y, y + height)
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.start + self.width() / 2.0,
            self.top + self.height() / 2.0,
        )
    }

    /// Leading coordinate along an axis
    pub fn low(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.start,
            Axis::Vertical => self.top,
        }
    }

    /// Trailing coordinate along an axis
    pub fn high(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.end,
            Axis::Vertical => self.bottom,
        }
    }

    /// Size along an axis
    pub fn extent(&self, axis: Axis) -> f64 {
        self.high(axis) - self.low(axis)
    }

    /// Describe why this box is malformed, if it is
    pub fn validate(&self) -> Result<(), String> {
        let coords = [self.start, self.end, self.top, self.bottom];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(format!("non-finite coordinate in {:?}", self));
        }
        if self.start > self.end {
            return Err(format!("start {} is after end {}", self.start, self.end));
        }
        if self.top > self.bottom {
            return Err(format!("top {} is below bottom {}", self.top, self.bottom));
        }
        Ok(())
    }

    /// True if the point lies strictly inside the box (boundary excluded)
    pub fn contains_strictly(&self, point: Point) -> bool {
        point.x > self.start && point.x < self.end && point.y > self.top && point.y < self.bottom
    }

    /// Grow each edge outward by the given amount
    pub fn expand(&self, left: f64, right: f64, top: f64, bottom: f64) -> Rect {
        Rect::new(
            self.start - left,
            self.end + right,
            self.top - top,
            self.bottom + bottom,
        )
    }

    /// Smallest box containing both
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::new(
            self.start.min(other.start),
            self.end.max(other.end),
            self.top.min(other.top),
            self.bottom.max(other.bottom),
        )
    }
}

/// Physical edge of a box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// Axis along which a line leaves this edge
    pub fn axis(self) -> Axis {
        match self {
            Edge::Left | Edge::Right => Axis::Horizontal,
            Edge::Top | Edge::Bottom => Axis::Vertical,
        }
    }
}

/// Connection side as supplied by callers, including logical `start`/`end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
    Start,
    End,
}

impl Side {
    /// Resolve to a physical edge; `start`/`end` flip under right-to-left layout
    pub fn resolve(self, rtl: bool) -> Edge {
        match self {
            Side::Left => Edge::Left,
            Side::Right => Edge::Right,
            Side::Top => Edge::Top,
            Side::Bottom => Edge::Bottom,
            Side::Start if rtl => Edge::Right,
            Side::Start => Edge::Left,
            Side::End if rtl => Edge::Left,
            Side::End => Edge::Right,
        }
    }
}

impl From<Edge> for Side {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::Top => Side::Top,
            Edge::Bottom => Side::Bottom,
            Edge::Left => Side::Left,
            Edge::Right => Side::Right,
        }
    }
}

/// Map a logical side to the physical edge it attaches to
pub fn normalize_side(side: Side, rtl: bool) -> Edge {
    side.resolve(rtl)
}

/// Point in the middle of `edge`, moved by `shift` along that edge
pub fn connection_point(rect: &Rect, edge: Edge, shift: f64) -> Point {
    let center = rect.center();
    match edge {
        Edge::Top => Point::new(center.x + shift, rect.top),
        Edge::Bottom => Point::new(center.x + shift, rect.bottom),
        Edge::Left => Point::new(rect.start, center.y + shift),
        Edge::Right => Point::new(rect.end, center.y + shift),
    }
}

/// Move `point` perpendicular to `edge` until it lies on that edge of `rect`
pub fn project_onto_edge(rect: &Rect, edge: Edge, point: Point) -> Point {
    match edge {
        Edge::Top => Point::new(point.x, rect.top),
        Edge::Bottom => Point::new(point.x, rect.bottom),
        Edge::Left => Point::new(rect.start, point.y),
        Edge::Right => Point::new(rect.end, point.y),
    }
}

/// Expand a box by its margins to obtain the box used for grid construction
///
/// The edge a line attaches to gets `max(arrow_margin, margin)` so there is room
/// for the arrow head; every other edge gets the plain margin. Without an edge
/// (obstacles) all four edges use the plain margins.
pub fn grid_box_from_box(
    rect: &Rect,
    edge: Option<Edge>,
    arrow_margin: f64,
    horizontal_margin: f64,
    vertical_margin: f64,
) -> Rect {
    let (mut left, mut right) = (horizontal_margin, horizontal_margin);
    let (mut top, mut bottom) = (vertical_margin, vertical_margin);

    match edge {
        Some(Edge::Left) => left = arrow_margin.max(horizontal_margin),
        Some(Edge::Right) => right = arrow_margin.max(horizontal_margin),
        Some(Edge::Top) => top = arrow_margin.max(vertical_margin),
        Some(Edge::Bottom) => bottom = arrow_margin.max(vertical_margin),
        None => {}
    }

    rect.expand(left, right, top, bottom)
}

/// Edge-snapping distance for a display with the given device pixel ratio
pub fn snap_threshold(device_pixel_ratio: f64) -> f64 {
    if device_pixel_ratio > 0.0 && device_pixel_ratio.is_finite() {
        (1.0 / device_pixel_ratio).min(MAX_SNAP_THRESHOLD)
    } else {
        MAX_SNAP_THRESHOLD
    }
}

/// Snap the end grid box's edges onto the start grid box's edges where they
/// differ by less than `threshold`
pub fn snap_grid_boxes(start: &Rect, end: &Rect, threshold: f64) -> Rect {
    let snap = |value: f64, anchors: [f64; 2]| {
        anchors
            .into_iter()
            .find(|anchor| (value - anchor).abs() < threshold)
            .unwrap_or(value)
    };

    Rect::new(
        snap(end.start, [start.start, start.end]),
        snap(end.end, [start.start, start.end]),
        snap(end.top, [start.top, start.bottom]),
        snap(end.bottom, [start.top, start.bottom]),
    )
}

/// Pick the pair of edges that best connects two boxes
pub fn best_edges(from: &Rect, to: &Rect) -> (Edge, Edge) {
    let dx = to.center().x - from.center().x;
    let dy = to.center().y - from.center().y;

    let h_overlap = from.start < to.end && from.end > to.start;
    let v_overlap = from.top < to.bottom && from.bottom > to.top;

    let vertical = if h_overlap != v_overlap {
        h_overlap
    } else {
        dy.abs() > dx.abs()
    };

    if vertical {
        if dy > 0.0 {
            (Edge::Bottom, Edge::Top)
        } else {
            (Edge::Top, Edge::Bottom)
        }
    } else if dx >= 0.0 {
        (Edge::Right, Edge::Left)
    } else {
        (Edge::Left, Edge::Right)
    }
}

/// A straight horizontal or vertical piece of a routed path
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn between(from: Point, to: Point) -> Self {
        Self::new(from.x, from.y, to.x, to.y)
    }

    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn is_horizontal(&self) -> bool {
        (self.y1 - self.y2).abs() < COORD_TOLERANCE
    }

    pub fn is_vertical(&self) -> bool {
        (self.x1 - self.x2).abs() < COORD_TOLERANCE
    }

    /// Both endpoints coincide
    pub fn is_degenerate(&self) -> bool {
        self.start().approx_eq(&self.end())
    }

    pub fn length(&self) -> f64 {
        (self.x2 - self.x1).abs() + (self.y2 - self.y1).abs()
    }

    pub fn approx_eq(&self, other: &Segment) -> bool {
        self.start().approx_eq(&other.start()) && self.end().approx_eq(&other.end())
    }
}

/// Corner points of a contiguous segment list
pub fn path_points(segments: &[Segment]) -> Vec<Point> {
    let mut points = Vec::with_capacity(segments.len() + 1);
    if let Some(first) = segments.first() {
        points.push(first.start());
    }
    points.extend(segments.iter().map(Segment::end));
    points
}

/// Total length of a segment list
pub fn path_length(segments: &[Segment]) -> f64 {
    segments.iter().map(Segment::length).sum()
}
