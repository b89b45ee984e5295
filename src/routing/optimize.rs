//! Path finishing: arrow stubs and segment merging

use super::geometry::{Point, Segment};

/// Connect the exact attachment points to the grid path
///
/// `start_grid` and `end_grid` are where the grid path begins and ends; when the
/// grid path is empty they are the same node.
pub fn attach_stubs(
    start: Point,
    start_grid: Point,
    path: Vec<Segment>,
    end_grid: Point,
    end: Point,
) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(path.len() + 2);
    segments.push(Segment::between(start, start_grid));
    segments.extend(path);
    segments.push(Segment::between(end_grid, end));
    segments
}

/// Drop empty and repeated segments and join collinear neighbours
///
/// Running this on its own output returns the same list.
pub fn optimize(path: &[Segment]) -> Vec<Segment> {
    let mut optimized: Vec<Segment> = Vec::with_capacity(path.len());

    for segment in path {
        if segment.is_degenerate() {
            continue;
        }
        let Some(last) = optimized.last_mut() else {
            optimized.push(*segment);
            continue;
        };

        if last.approx_eq(segment) {
            continue;
        }

        let joined = last.end().approx_eq(&segment.start());
        if joined && last.is_horizontal() && segment.is_horizontal() {
            last.x2 = segment.x2;
        } else if joined && last.is_vertical() && segment.is_vertical() {
            last.y2 = segment.y2;
        } else {
            optimized.push(*segment);
            continue;
        }

        if last.is_degenerate() {
            optimized.pop();
        }
    }

    optimized
}
