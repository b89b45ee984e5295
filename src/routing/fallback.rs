//! Constraint-relaxing strategies tried when no path is found

use serde::Serialize;

use super::config::RouterConfig;
use super::line_def::{EffectiveLineDef, ObstacleKind};

/// Horizontal margin above which [`Fallback::ShrinkHorizontalMargin`] applies
const MIN_SHRINKABLE_HORIZONTAL_MARGIN: f64 = 2.0;

/// Horizontal margin used after shrinking
const SHRUNK_HORIZONTAL_MARGIN: f64 = 1.0;

/// One way of relaxing a line definition before retrying the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// Stop avoiding parent regions that enclose the connected boxes
    DropNestedObstacles,
    /// Reduce arrow margins to the bar margin
    ShrinkArrowMargins,
    /// Remove arrow margins entirely
    ResetArrowMargins,
    /// Reduce horizontal margins to one pixel and hide the arrow head
    ShrinkHorizontalMargin,
}

impl Fallback {
    /// The strategies applied, in order, for a given configuration
    pub fn default_chain(config: &RouterConfig) -> Vec<Fallback> {
        let mut chain = Vec::with_capacity(4);
        if config.avoid_nested_parents {
            chain.push(Fallback::DropNestedObstacles);
        }
        chain.extend([
            Fallback::ShrinkArrowMargins,
            Fallback::ResetArrowMargins,
            Fallback::ShrinkHorizontalMargin,
        ]);
        chain
    }

    /// Derive a relaxed line definition, or `None` if this strategy has nothing left to relax
    pub fn apply(self, line: &EffectiveLineDef, config: &RouterConfig) -> Option<EffectiveLineDef> {
        match self {
            Fallback::DropNestedObstacles => {
                if !line
                    .obstacles
                    .iter()
                    .any(|o| o.kind == ObstacleKind::NestedParent)
                {
                    return None;
                }
                let mut next = line.clone();
                next.obstacles.retain(|o| o.kind != ObstacleKind::NestedParent);
                Some(next)
            }
            Fallback::ShrinkArrowMargins => {
                let limit = config.bar_margin;
                if line.start_arrow_margin <= limit && line.end_arrow_margin <= limit {
                    return None;
                }
                Some(EffectiveLineDef {
                    start_arrow_margin: line.start_arrow_margin.min(limit),
                    end_arrow_margin: line.end_arrow_margin.min(limit),
                    ..line.clone()
                })
            }
            Fallback::ResetArrowMargins => {
                if line.start_arrow_margin <= 0.0 && line.end_arrow_margin <= 0.0 {
                    return None;
                }
                Some(EffectiveLineDef {
                    start_arrow_margin: 0.0,
                    end_arrow_margin: 0.0,
                    ..line.clone()
                })
            }
            Fallback::ShrinkHorizontalMargin => {
                let widest = line
                    .start_horizontal_margin
                    .max(line.end_horizontal_margin)
                    .max(line.other_horizontal_margin);
                if widest <= MIN_SHRINKABLE_HORIZONTAL_MARGIN {
                    return None;
                }
                Some(EffectiveLineDef {
                    start_horizontal_margin: line.start_horizontal_margin.min(SHRUNK_HORIZONTAL_MARGIN),
                    end_horizontal_margin: line.end_horizontal_margin.min(SHRUNK_HORIZONTAL_MARGIN),
                    other_horizontal_margin: line.other_horizontal_margin.min(SHRUNK_HORIZONTAL_MARGIN),
                    hide_marker: true,
                    ..line.clone()
                })
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Fallback::DropNestedObstacles => "drop_nested_obstacles",
            Fallback::ShrinkArrowMargins => "shrink_arrow_margins",
            Fallback::ResetArrowMargins => "reset_arrow_margins",
            Fallback::ShrinkHorizontalMargin => "shrink_horizontal_margin",
        }
    }
}
