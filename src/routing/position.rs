//! Relative placement of two boxes along one axis

use super::geometry::{Axis, Rect};
use super::line_def::EffectiveLineDef;

/// Where box A sits relative to box B along an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum RelativePosition {
    /// A ends at or before B starts
    Before = 0,
    /// A starts before B and ends inside it
    OverlapsStart = 1,
    /// A lies within B
    Inside = 2,
    /// B lies within A
    Contains = -2,
    /// A starts inside B and ends after it
    OverlapsEnd = 3,
    /// A starts at or after B ends
    After = 4,
}

impl RelativePosition {
    /// True when the two ranges share some extent
    pub fn overlaps(self) -> bool {
        !matches!(self, RelativePosition::Before | RelativePosition::After)
    }
}

/// Classify `a` against `b` along `axis`
pub fn calculate_relative_position(a: &Rect, b: &Rect, axis: Axis) -> RelativePosition {
    let (a_low, a_high) = (a.low(axis), a.high(axis));
    let (b_low, b_high) = (b.low(axis), b.high(axis));

    if a_high <= b_low {
        RelativePosition::Before
    } else if a_low >= b_high {
        RelativePosition::After
    } else if a_low >= b_low && a_high <= b_high {
        RelativePosition::Inside
    } else if a_low < b_low && a_high > b_high {
        RelativePosition::Contains
    } else if a_low < b_low {
        RelativePosition::OverlapsStart
    } else {
        RelativePosition::OverlapsEnd
    }
}

/// Decide whether routing is worth attempting at all
///
/// Returns `false` for narrow boxes that overlap on the cross axis when the
/// arrow clearance would reorder them along the connection axis. A routed line
/// would loop around both boxes in that case, so callers draw a direct line.
pub fn should_look_for_path(line: &EffectiveLineDef, snap_threshold: f64) -> bool {
    let axis = line.start_edge.axis();
    if line.end_edge.axis() != axis {
        return true;
    }

    let too_narrow = |rect: &Rect, arrow_margin: f64| rect.extent(axis) < arrow_margin * 2.0;
    if !too_narrow(&line.start_box, line.start_arrow_margin)
        && !too_narrow(&line.end_box, line.end_arrow_margin)
    {
        return true;
    }

    let cross = calculate_relative_position(&line.start_box, &line.end_box, axis.cross());
    if !cross.overlaps() {
        return true;
    }

    let (start_grid, end_grid) = line.grid_boxes(snap_threshold);
    calculate_relative_position(&line.start_box, &line.end_box, axis)
        == calculate_relative_position(&start_grid, &end_grid, axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::config::RouterConfig;
    use crate::routing::line_def::LineDef;

    fn range(low: f64, high: f64) -> Rect {
        Rect::new(low, high, 0.0, 10.0)
    }

    #[test]
    fn test_relative_position_states() {
        let b = range(10.0, 20.0);
        let h = Axis::Horizontal;
        assert_eq!(calculate_relative_position(&range(0.0, 5.0), &b, h), RelativePosition::Before);
        assert_eq!(calculate_relative_position(&range(0.0, 10.0), &b, h), RelativePosition::Before);
        assert_eq!(
            calculate_relative_position(&range(5.0, 15.0), &b, h),
            RelativePosition::OverlapsStart
        );
        assert_eq!(calculate_relative_position(&range(12.0, 18.0), &b, h), RelativePosition::Inside);
        assert_eq!(calculate_relative_position(&range(5.0, 25.0), &b, h), RelativePosition::Contains);
        assert_eq!(
            calculate_relative_position(&range(15.0, 25.0), &b, h),
            RelativePosition::OverlapsEnd
        );
        assert_eq!(calculate_relative_position(&range(20.0, 30.0), &b, h), RelativePosition::After);
    }

    #[test]
    fn test_relative_position_ordinals() {
        assert_eq!(RelativePosition::Before as i8, 0);
        assert_eq!(RelativePosition::Contains as i8, -2);
        assert_eq!(RelativePosition::After as i8, 4);
    }

    #[test]
    fn test_vertical_axis_uses_top_and_bottom() {
        let a = Rect::new(0.0, 10.0, 0.0, 5.0);
        let b = Rect::new(0.0, 10.0, 10.0, 20.0);
        assert_eq!(calculate_relative_position(&a, &b, Axis::Vertical), RelativePosition::Before);
        assert_eq!(calculate_relative_position(&a, &b, Axis::Horizontal), RelativePosition::Inside);
    }

    #[test]
    fn test_wide_boxes_are_always_routed() {
        let def = LineDef::new(
            Rect::new(0.0, 50.0, 0.0, 20.0),
            Rect::new(200.0, 250.0, 100.0, 120.0),
        );
        let line = EffectiveLineDef::resolve(&def, &RouterConfig::default()).expect("Should resolve");
        assert!(should_look_for_path(&line, 0.75));
    }

    #[test]
    fn test_narrow_nested_boxes_skip_routing() {
        let def = LineDef::new(
            Rect::new(100.0, 110.0, 0.0, 20.0),
            Rect::new(104.0, 112.0, 0.0, 20.0),
        );
        let line = EffectiveLineDef::resolve(&def, &RouterConfig::default()).expect("Should resolve");
        assert!(!should_look_for_path(&line, 0.75));
    }

    #[test]
    fn test_narrow_boxes_without_cross_overlap_are_routed() {
        let def = LineDef::new(
            Rect::new(100.0, 110.0, 0.0, 20.0),
            Rect::new(104.0, 112.0, 50.0, 70.0),
        );
        let line = EffectiveLineDef::resolve(&def, &RouterConfig::default()).expect("Should resolve");
        assert!(should_look_for_path(&line, 0.75));
    }
}
