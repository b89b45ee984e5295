//! Path reconstruction from a propagated distance field

use std::cmp::Reverse;

use super::geometry::{Axis, Edge, Segment};
use super::grid::{Direction, Grid, GridPoint};

/// Walk back from `(ix, iy)` to the wave origin and return the path in
/// start-to-end order
///
/// At every step the candidate that keeps the current axis wins, then the one
/// with the larger row index, then the one with the smaller column index.
/// Returns `None` if the end cell is blocked or was never reached.
pub fn trace_back(grid: &Grid, ix: usize, iy: usize, end_edge: Edge) -> Option<Vec<Segment>> {
    let mut current = *grid.get(ix, iy)?;
    if !current.permitted || !current.is_reached() {
        return None;
    }

    let mut axis = end_edge.axis();
    let mut segments = Vec::with_capacity(current.distance as usize);

    while current.distance > 0 {
        let (direction, previous) = best_candidate(grid, &current, axis)?;
        segments.push(Segment::between(previous.point(), current.point()));
        axis = direction.axis();
        current = previous;
    }

    segments.reverse();
    Some(segments)
}

fn best_candidate(grid: &Grid, current: &GridPoint, axis: Axis) -> Option<(Direction, GridPoint)> {
    Direction::ALL
        .into_iter()
        .filter_map(|direction| {
            grid.neighbor(current.ix, current.iy, direction)
                .filter(|p| p.permitted && p.distance == current.distance - 1)
                .map(|p| (direction, *p))
        })
        .min_by_key(|(direction, p)| (direction.axis() != axis, Reverse(p.iy), p.ix))
}
