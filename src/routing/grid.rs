//! Sparse routing grid built from box edges and connection points

use super::geometry::{Axis, Edge, Point, Rect};

/// Distance of a cell the wave has not reached
pub const UNREACHED: u32 = u32::MAX;

/// One step between grid-adjacent cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }
}

/// A grid cell: a pixel coordinate plus search state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub x: f64,
    pub y: f64,
    pub ix: usize,
    pub iy: usize,
    pub distance: u32,
    pub permitted: bool,
}

impl GridPoint {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_reached(&self) -> bool {
        self.distance != UNREACHED
    }
}

/// Inputs to grid construction
#[derive(Debug, Clone)]
pub struct GridSpec<'a> {
    pub start_box: Rect,
    pub end_box: Rect,
    /// Start connection point projected onto `start_box`
    pub start_point: Point,
    /// End connection point projected onto `end_box`
    pub end_point: Point,
    pub start_edge: Edge,
    pub end_edge: Edge,
    /// Margin-expanded obstacle boxes
    pub obstacles: &'a [Rect],
}

/// Table of grid points, stored row-major
#[derive(Debug, Clone)]
pub struct Grid {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    points: Vec<GridPoint>,
}

impl Grid {
    /// Build the grid for one search attempt
    pub fn build(spec: &GridSpec<'_>) -> Grid {
        let mut xs = Vec::with_capacity(6 + 3 * spec.obstacles.len());
        let mut ys = Vec::with_capacity(6 + 3 * spec.obstacles.len());

        push_box_lines(&mut xs, &mut ys, &spec.start_box, spec.start_edge, spec.start_point);
        push_box_lines(&mut xs, &mut ys, &spec.end_box, spec.end_edge, spec.end_point);
        for obstacle in spec.obstacles {
            let center = obstacle.center();
            xs.extend([obstacle.start, center.x, obstacle.end]);
            ys.extend([obstacle.top, center.y, obstacle.bottom]);
        }

        let xs = sorted_unique(xs);
        let ys = sorted_unique(ys);

        let mut points = Vec::with_capacity(xs.len() * ys.len());
        for (iy, &y) in ys.iter().enumerate() {
            for (ix, &x) in xs.iter().enumerate() {
                let point = Point::new(x, y);
                let permitted = point == spec.start_point
                    || point == spec.end_point
                    || is_free(point, spec);
                points.push(GridPoint {
                    x,
                    y,
                    ix,
                    iy,
                    distance: UNREACHED,
                    permitted,
                });
            }
        }

        Grid { xs, ys, points }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.xs.len()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.ys.len()
    }

    pub fn get(&self, ix: usize, iy: usize) -> Option<&GridPoint> {
        if ix < self.width() && iy < self.height() {
            self.points.get(iy * self.width() + ix)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, ix: usize, iy: usize) -> Option<&mut GridPoint> {
        if ix < self.width() && iy < self.height() {
            let width = self.width();
            self.points.get_mut(iy * width + ix)
        } else {
            None
        }
    }

    /// Grid indices of a pixel coordinate, if it lies on the grid
    pub fn index_of(&self, point: Point) -> Option<(usize, usize)> {
        let ix = self.xs.iter().position(|&x| x == point.x)?;
        let iy = self.ys.iter().position(|&y| y == point.y)?;
        Some((ix, iy))
    }

    /// Grid-adjacent cell one step away in `direction`
    pub fn neighbor(&self, ix: usize, iy: usize, direction: Direction) -> Option<&GridPoint> {
        match direction {
            Direction::Left => ix.checked_sub(1).and_then(|nx| self.get(nx, iy)),
            Direction::Right => self.get(ix + 1, iy),
            Direction::Up => iy.checked_sub(1).and_then(|ny| self.get(ix, ny)),
            Direction::Down => self.get(ix, iy + 1),
        }
    }

    pub fn points(&self) -> impl Iterator<Item = &GridPoint> {
        self.points.iter()
    }
}

/// Add the three lines a terminal box contributes on each axis
///
/// Along the connected edge the connection coordinate replaces the box middle,
/// so the connection point is always a grid node.
fn push_box_lines(xs: &mut Vec<f64>, ys: &mut Vec<f64>, rect: &Rect, edge: Edge, point: Point) {
    let center = rect.center();
    let (mid_x, mid_y) = match edge.axis() {
        Axis::Vertical => (point.x, center.y),
        Axis::Horizontal => (center.x, point.y),
    };
    xs.extend([rect.start, mid_x, rect.end]);
    ys.extend([rect.top, mid_y, rect.bottom]);
}

fn sorted_unique(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

fn is_free(point: Point, spec: &GridSpec<'_>) -> bool {
    !spec.start_box.contains_strictly(point)
        && !spec.end_box.contains_strictly(point)
        && spec
            .obstacles
            .iter()
            .all(|obstacle| !obstacle.contains_strictly(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_without_obstacles<'a>() -> GridSpec<'a> {
        GridSpec {
            start_box: Rect::new(-5.0, 62.0, -2.0, 22.0),
            end_box: Rect::new(188.0, 255.0, 98.0, 122.0),
            start_point: Point::new(62.0, 10.0),
            end_point: Point::new(188.0, 110.0),
            start_edge: Edge::Right,
            end_edge: Edge::Left,
            obstacles: &[],
        }
    }

    #[test]
    fn test_grid_coordinates_sorted_and_unique() {
        let grid = Grid::build(&spec_without_obstacles());
        assert_eq!(grid.xs, vec![-5.0, 28.5, 62.0, 188.0, 221.5, 255.0]);
        assert_eq!(grid.ys, vec![-2.0, 10.0, 22.0, 98.0, 110.0, 122.0]);
        assert_eq!(grid.points().count(), grid.width() * grid.height());
    }

    #[test]
    fn test_box_interiors_are_blocked() {
        let grid = Grid::build(&spec_without_obstacles());
        let blocked: Vec<_> = grid
            .points()
            .filter(|p| !p.permitted)
            .map(|p| (p.x, p.y))
            .collect();
        assert_eq!(blocked, vec![(28.5, 10.0), (221.5, 110.0)]);
    }

    #[test]
    fn test_connection_points_are_on_grid() {
        let spec = spec_without_obstacles();
        let grid = Grid::build(&spec);
        assert_eq!(grid.index_of(spec.start_point), Some((2, 1)));
        assert_eq!(grid.index_of(spec.end_point), Some((3, 4)));
        assert_eq!(grid.index_of(Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn test_vertical_connection_uses_connection_x() {
        let spec = GridSpec {
            start_box: Rect::new(0.0, 40.0, -12.0, 22.0),
            end_box: Rect::new(100.0, 140.0, 90.0, 130.0),
            start_point: Point::new(27.0, -12.0),
            end_point: Point::new(120.0, 90.0),
            start_edge: Edge::Top,
            end_edge: Edge::Top,
            obstacles: &[],
        };
        let grid = Grid::build(&spec);
        assert!(grid.xs.contains(&27.0));
        assert!(!grid.xs.contains(&20.0));
        assert!(grid.ys.contains(&5.0));
    }

    #[test]
    fn test_connection_point_inside_obstacle_stays_permitted() {
        let obstacles = [Rect::new(150.0, 200.0, 100.0, 120.0)];
        let spec = GridSpec {
            obstacles: &obstacles,
            ..spec_without_obstacles()
        };
        let grid = Grid::build(&spec);
        let (ix, iy) = grid.index_of(spec.end_point).expect("end point on grid");
        assert!(grid.get(ix, iy).expect("cell").permitted);

        let (ox, oy) = grid.index_of(Point::new(175.0, 110.0)).expect("obstacle center");
        assert!(!grid.get(ox, oy).expect("cell").permitted);
    }

    #[test]
    fn test_neighbors_respect_bounds() {
        let grid = Grid::build(&spec_without_obstacles());
        assert!(grid.neighbor(0, 0, Direction::Left).is_none());
        assert!(grid.neighbor(0, 0, Direction::Up).is_none());
        assert_eq!(grid.neighbor(0, 0, Direction::Right).map(|p| p.ix), Some(1));
        assert_eq!(grid.neighbor(5, 5, Direction::Down), None);
    }

    #[test]
    fn test_cells_start_unreached() {
        let grid = Grid::build(&spec_without_obstacles());
        assert!(grid.points().all(|p| !p.is_reached()));
    }
}
