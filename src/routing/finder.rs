//! Top-level path search with fallback retries

use serde::Serialize;
use tracing::{debug, trace};

use super::config::RouterConfig;
use super::error::RouteError;
use super::fallback::Fallback;
use super::geometry::{path_length, path_points, project_onto_edge, snap_threshold, Point, Segment};
use super::grid::{Grid, GridSpec};
use super::line_def::{EffectiveLineDef, LineDef};
use super::optimize::{attach_stubs, optimize};
use super::position::should_look_for_path;
use super::trace::trace_back;
use super::wave::propagate;

/// A successfully routed connector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedPath {
    /// Axis-aligned segments from the start connection point to the end one
    pub segments: Vec<Segment>,
    /// The arrow head should not be drawn; margins were too tight for it
    pub hide_marker: bool,
    /// Fallbacks applied before the search succeeded, in order
    pub fallbacks: Vec<Fallback>,
    /// Number of searches run, including the successful one
    pub attempts: usize,
}

impl RoutedPath {
    /// Polyline view of the segments
    pub fn points(&self) -> Vec<Point> {
        path_points(&self.segments)
    }

    /// Total path length in pixels
    pub fn length(&self) -> f64 {
        path_length(&self.segments)
    }
}

/// Routes connector lines with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct PathFinder {
    config: RouterConfig,
}

impl PathFinder {
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Route `line`, retrying with the configured fallback chain
    ///
    /// `Ok(None)` means no orthogonal route exists (or routing was skipped for
    /// nearly coincident boxes); the caller decides how to degrade.
    pub fn find_path(&self, line: &LineDef) -> Result<Option<RoutedPath>, RouteError> {
        let chain = Fallback::default_chain(&self.config);
        self.find_path_with(line, &chain)
    }

    /// Route `line`, retrying with an explicit list of fallbacks
    ///
    /// Fallbacks accumulate: each one relaxes the definition left by the
    /// previous ones. Boxes rejected by [`should_look_for_path`] return
    /// `Ok(None)` before any fallback; relaxing margins cannot untangle them.
    pub fn find_path_with(
        &self,
        line: &LineDef,
        fallbacks: &[Fallback],
    ) -> Result<Option<RoutedPath>, RouteError> {
        let mut current = EffectiveLineDef::resolve(line, &self.config)?;
        let threshold = snap_threshold(self.config.device_pixel_ratio);

        if !should_look_for_path(&current, threshold) {
            debug!(
                start_edge = ?current.start_edge,
                end_edge = ?current.end_edge,
                "boxes too narrow and nested, skipping routing"
            );
            return Ok(None);
        }

        let mut applied = Vec::new();
        let mut attempts = 1;
        if let Some(segments) = self.find_path_once(&current, attempts) {
            return Ok(Some(routed(segments, &current, applied, attempts)));
        }

        for &fallback in fallbacks {
            let Some(next) = fallback.apply(&current, &self.config) else {
                trace!(fallback = fallback.name(), "fallback not applicable");
                continue;
            };
            current = next;
            applied.push(fallback);
            attempts += 1;
            debug!(fallback = fallback.name(), attempt = attempts, "retrying with fallback");

            if let Some(segments) = self.find_path_once(&current, attempts) {
                return Ok(Some(routed(segments, &current, applied, attempts)));
            }
        }

        debug!(attempts, "no path found after exhausting fallbacks");
        Ok(None)
    }

    /// One grid build, wave, and trace for a fixed line definition
    fn find_path_once(&self, line: &EffectiveLineDef, attempt: usize) -> Option<Vec<Segment>> {
        let threshold = snap_threshold(self.config.device_pixel_ratio);
        let (start_box, end_box) = line.grid_boxes(threshold);
        let start_point = line.start_point();
        let end_point = line.end_point();
        let start_grid_point = project_onto_edge(&start_box, line.start_edge, start_point);
        let end_grid_point = project_onto_edge(&end_box, line.end_edge, end_point);
        let obstacles = line.obstacle_grid_boxes();

        let mut grid = Grid::build(&GridSpec {
            start_box,
            end_box,
            start_point: start_grid_point,
            end_point: end_grid_point,
            start_edge: line.start_edge,
            end_edge: line.end_edge,
            obstacles: &obstacles,
        });
        debug!(
            attempt,
            columns = grid.width(),
            rows = grid.height(),
            obstacles = obstacles.len(),
            "built routing grid"
        );

        let (sx, sy) = grid.index_of(start_grid_point)?;
        let (ex, ey) = grid.index_of(end_grid_point)?;
        propagate(&mut grid, sx, sy);
        trace!(
            attempt,
            distance = grid.get(ex, ey).map(|p| p.distance),
            "wave reached end"
        );

        let path = trace_back(&grid, ex, ey, line.end_edge)?;
        let segments = optimize(&attach_stubs(
            start_point,
            start_grid_point,
            path,
            end_grid_point,
            end_point,
        ));

        if segments.is_empty() {
            None
        } else {
            Some(segments)
        }
    }
}

fn routed(
    segments: Vec<Segment>,
    line: &EffectiveLineDef,
    fallbacks: Vec<Fallback>,
    attempts: usize,
) -> RoutedPath {
    RoutedPath {
        segments,
        hide_marker: line.hide_marker,
        fallbacks,
        attempts,
    }
}

/// Route a single line with the given configuration
pub fn find_path(line: &LineDef, config: &RouterConfig) -> Result<Option<RoutedPath>, RouteError> {
    PathFinder::new(config.clone()).find_path(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::geometry::{Rect, Side};
    use crate::routing::line_def::Obstacle;
    use pretty_assertions::assert_eq;

    fn scenario_boxes() -> (Rect, Rect) {
        (
            Rect::new(0.0, 50.0, 0.0, 20.0),
            Rect::new(200.0, 250.0, 100.0, 120.0),
        )
    }

    #[test]
    fn test_open_route_is_three_segments() {
        let (a, b) = scenario_boxes();
        let path = PathFinder::default()
            .find_path(&LineDef::new(a, b))
            .expect("valid input")
            .expect("path");

        assert_eq!(
            path.segments,
            vec![
                Segment::new(50.0, 10.0, 62.0, 10.0),
                Segment::new(62.0, 10.0, 62.0, 110.0),
                Segment::new(62.0, 110.0, 200.0, 110.0),
            ]
        );
        assert_eq!(path.attempts, 1);
        assert!(path.fallbacks.is_empty());
        assert!(!path.hide_marker);
        assert_eq!(path.length(), 12.0 + 100.0 + 138.0);
    }

    #[test]
    fn test_invalid_box_is_an_error() {
        let (a, _) = scenario_boxes();
        let result = PathFinder::default().find_path(&LineDef::new(a, Rect::new(5.0, 1.0, 0.0, 1.0)));
        assert!(matches!(result, Err(RouteError::InvalidBox { .. })));
    }

    #[test]
    fn test_nested_parent_is_dropped_first() {
        let (a, b) = scenario_boxes();
        // The parent region fully encloses both boxes' grid boxes
        let def = LineDef::new(a, b)
            .with_obstacle(Obstacle::nested_parent(Rect::new(-100.0, 400.0, -100.0, 300.0)));
        let path = PathFinder::default()
            .find_path(&def)
            .expect("valid input")
            .expect("path");
        assert_eq!(path.fallbacks, vec![Fallback::DropNestedObstacles]);
        assert_eq!(path.attempts, 2);
    }

    #[test]
    fn test_vertical_sides() {
        let def = LineDef::new(
            Rect::new(0.0, 40.0, 0.0, 20.0),
            Rect::new(100.0, 140.0, 100.0, 120.0),
        )
        .with_sides(Side::Bottom, Side::Top);
        let path = PathFinder::default()
            .find_path(&def)
            .expect("valid input")
            .expect("path");

        let first = path.segments.first().expect("segment");
        let last = path.segments.last().expect("segment");
        assert_eq!(first.start(), Point::new(20.0, 20.0));
        assert!(first.is_vertical());
        assert_eq!(last.end(), Point::new(120.0, 100.0));
        assert!(last.is_vertical());
    }

    #[test]
    fn test_empty_fallback_list_reports_no_path() {
        let (a, b) = scenario_boxes();
        let def = LineDef::new(a, b)
            .with_obstacle(Obstacle::nested_parent(Rect::new(-100.0, 400.0, -100.0, 300.0)));
        let result = PathFinder::default()
            .find_path_with(&def, &[])
            .expect("valid input");
        assert!(result.is_none());
    }
}
