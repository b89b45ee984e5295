//! Connector path rendering
//!
//! Converts routed segments into SVG path `d` attribute strings, optionally
//! rounding each corner.

use crate::routing::geometry::{path_points, Point, Segment};

/// A command in a resolved connector path
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Move to starting point
    MoveTo(Point),
    /// Straight line to point
    LineTo(Point),
    /// Quarter-circle corner ending at a point
    ArcTo {
        end: Point,
        radius: f64,
        sweep: bool, // true = clockwise in SVG coordinates (y-down)
    },
}

/// A connector path ready for SVG rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPath {
    pub segments: Vec<PathSegment>,
}

impl ResolvedPath {
    /// Convert to SVG path `d` attribute string
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();

        for seg in &self.segments {
            if !d.is_empty() {
                d.push(' ');
            }
            match seg {
                PathSegment::MoveTo(p) => d.push_str(&format!("M{} {}", p.x, p.y)),
                PathSegment::LineTo(p) => d.push_str(&format!("L{} {}", p.x, p.y)),
                PathSegment::ArcTo { end, radius, sweep } => {
                    let sw = if *sweep { 1 } else { 0 };
                    d.push_str(&format!(
                        "A{} {} 0 0 {} {} {}",
                        radius, radius, sw, end.x, end.y
                    ));
                }
            }
        }

        d
    }
}

/// Build a connector path, rounding corners with at most `corner_radius`
///
/// Each corner's radius is clamped to half the shorter of its two segments so
/// neighbouring arcs never overlap.
pub fn resolve_connector(segments: &[Segment], corner_radius: f64) -> ResolvedPath {
    let points = path_points(segments);
    let Some((&first, rest)) = points.split_first() else {
        return ResolvedPath { segments: vec![] };
    };

    let mut commands = vec![PathSegment::MoveTo(first)];
    let mut previous = first;

    for (i, &corner) in rest.iter().enumerate() {
        let Some(&next) = rest.get(i + 1) else {
            commands.push(PathSegment::LineTo(corner));
            break;
        };

        let incoming = distance(previous, corner);
        let outgoing = distance(corner, next);
        let radius = corner_radius.min(incoming / 2.0).min(outgoing / 2.0);

        if radius <= 0.0 {
            commands.push(PathSegment::LineTo(corner));
        } else {
            let (ix, iy) = unit(previous, corner);
            let (ox, oy) = unit(corner, next);
            let before = Point::new(corner.x - ix * radius, corner.y - iy * radius);
            let after = Point::new(corner.x + ox * radius, corner.y + oy * radius);
            commands.push(PathSegment::LineTo(before));
            commands.push(PathSegment::ArcTo {
                end: after,
                radius,
                sweep: ix * oy - iy * ox > 0.0,
            });
        }
        previous = corner;
    }

    ResolvedPath { segments: commands }
}

/// Convert routed segments straight to an SVG `d` string
pub fn segments_to_d(segments: &[Segment], corner_radius: f64) -> String {
    resolve_connector(segments, corner_radius).to_svg_d()
}

fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).abs() + (b.y - a.y).abs()
}

fn unit(from: Point, to: Point) -> (f64, f64) {
    let length = distance(from, to);
    if length == 0.0 {
        (0.0, 0.0)
    } else {
        ((to.x - from.x) / length, (to.y - from.y) / length)
    }
}
