//! Breadth-first distance propagation (Lee's wave algorithm)

use std::collections::VecDeque;

use super::grid::{Direction, Grid};

/// Fill in hop distances from `(ix, iy)` to every reachable permitted cell
///
/// A neighbor's distance is fixed when it is discovered, and it is only queued
/// when that improves on what it already holds, so each cell settles once.
pub fn propagate(grid: &mut Grid, ix: usize, iy: usize) {
    let Some(origin) = grid.get_mut(ix, iy) else {
        return;
    };
    origin.distance = 0;

    let mut queue = VecDeque::from([(ix, iy)]);
    while let Some((cx, cy)) = queue.pop_front() {
        let Some(current) = grid.get(cx, cy) else {
            continue;
        };
        let next_distance = current.distance + 1;

        for direction in Direction::ALL {
            let Some(neighbor) = grid.neighbor(cx, cy, direction) else {
                continue;
            };
            if !neighbor.permitted || neighbor.distance <= next_distance {
                continue;
            }
            let (nx, ny) = (neighbor.ix, neighbor.iy);
            if let Some(cell) = grid.get_mut(nx, ny) {
                cell.distance = next_distance;
                queue.push_back((nx, ny));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::geometry::{Edge, Point, Rect};
    use crate::routing::grid::{GridSpec, UNREACHED};

    fn spec(obstacles: &[Rect]) -> GridSpec<'_> {
        GridSpec {
            start_box: Rect::new(-5.0, 62.0, -2.0, 22.0),
            end_box: Rect::new(188.0, 255.0, 98.0, 122.0),
            start_point: Point::new(62.0, 10.0),
            end_point: Point::new(188.0, 110.0),
            start_edge: Edge::Right,
            end_edge: Edge::Left,
            obstacles,
        }
    }

    #[test]
    fn test_open_grid_distances_are_manhattan_hops() {
        let mut grid = Grid::build(&spec(&[]));
        propagate(&mut grid, 2, 1);

        assert_eq!(grid.get(2, 1).map(|p| p.distance), Some(0));
        assert_eq!(grid.get(3, 4).map(|p| p.distance), Some(4));
        assert_eq!(grid.get(0, 0).map(|p| p.distance), Some(3));
    }

    #[test]
    fn test_blocked_cells_stay_unreached() {
        let mut grid = Grid::build(&spec(&[]));
        propagate(&mut grid, 2, 1);

        assert_eq!(grid.get(1, 1).map(|p| p.distance), Some(UNREACHED));
        assert_eq!(grid.get(4, 4).map(|p| p.distance), Some(UNREACHED));
    }

    #[test]
    fn test_detour_around_blocked_cell_is_longer() {
        let mut grid = Grid::build(&spec(&[]));
        propagate(&mut grid, 2, 1);

        // (0, 1) sits behind the blocked start-box center
        assert_eq!(grid.get(0, 1).map(|p| p.distance), Some(4));
    }

    #[test]
    fn test_enclosed_end_is_unreached() {
        // The inner box's edges lie inside the outer box, so every neighbor of the end is blocked
        let walls = [
            Rect::new(100.0, 350.0, 0.0, 250.0),
            Rect::new(140.0, 300.0, 60.0, 160.0),
        ];
        let mut grid = Grid::build(&spec(&walls));
        propagate(&mut grid, 2, 1);

        let (ix, iy) = grid.index_of(Point::new(188.0, 110.0)).expect("end on grid");
        assert!(!grid.get(ix, iy).expect("cell").is_reached());
    }

    #[test]
    fn test_out_of_range_origin_is_ignored() {
        let mut grid = Grid::build(&spec(&[]));
        propagate(&mut grid, 99, 99);
        assert!(grid.points().all(|p| !p.is_reached()));
    }
}
