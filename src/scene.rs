//! TOML scene format: boxes, the lines between them, and render settings
//!
//! ```toml
//! [router]
//! arrow_margin = 10
//!
//! [[box]]
//! id = "client"
//! start = 0
//! end = 80
//! top = 0
//! bottom = 40
//!
//! [[box]]
//! id = "server"
//! start = 200
//! end = 280
//! top = 120
//! bottom = 160
//!
//! [[line]]
//! from = "client"
//! to = "server"
//! start_side = "bottom"
//! end_side = "left"
//! ```
//!
//! Sides left out of a line are picked from the boxes' relative position.
//! Every other box is an obstacle unless `avoid_boxes = false`; boxes named
//! in `nested_parents` are obstacles the router may drop when no path exists.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SceneError;
use crate::renderer::SvgConfig;
use crate::routing::geometry::{best_edges, Point, Rect, Side};
use crate::routing::{EffectiveLineDef, LineDef, Obstacle, PathFinder, RoutedPath, RouterConfig};
use crate::RenderError;

/// A named box in the scene
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneBox {
    pub id: String,
    pub start: f64,
    pub end: f64,
    pub top: f64,
    pub bottom: f64,
}

impl SceneBox {
    pub fn rect(&self) -> Rect {
        Rect::new(self.start, self.end, self.top, self.bottom)
    }
}

fn default_true() -> bool {
    true
}

/// A connector between two boxes
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneLine {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub start_side: Option<Side>,
    #[serde(default)]
    pub end_side: Option<Side>,
    #[serde(default)]
    pub start_shift: f64,
    #[serde(default)]
    pub end_shift: f64,
    #[serde(default)]
    pub start_arrow_margin: Option<f64>,
    #[serde(default)]
    pub end_arrow_margin: Option<f64>,
    #[serde(default)]
    pub horizontal_margin: Option<f64>,
    #[serde(default)]
    pub vertical_margin: Option<f64>,
    #[serde(default)]
    pub other_horizontal_margin: Option<f64>,
    #[serde(default)]
    pub other_vertical_margin: Option<f64>,
    /// Route around every box that is not an endpoint
    #[serde(default = "default_true")]
    pub avoid_boxes: bool,
    /// Boxes enclosing an endpoint
    #[serde(default)]
    pub nested_parents: Vec<String>,
}

/// A complete scene file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    #[serde(default, rename = "box")]
    pub boxes: Vec<SceneBox>,
    #[serde(default, rename = "line")]
    pub lines: Vec<SceneLine>,
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub svg: SvgConfig,
}

/// Routing outcome for one scene line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedLine {
    pub from: String,
    pub to: String,
    /// Attachment point on the `from` box
    pub start: Point,
    /// Attachment point on the `to` box
    pub end: Point,
    /// `None` when no orthogonal route exists
    pub path: Option<RoutedPath>,
}

impl Scene {
    /// Parse and validate a scene from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, SceneError> {
        let scene: Scene = toml::from_str(content)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load a scene from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check box ids are unique and every line references defined boxes
    pub fn validate(&self) -> Result<(), SceneError> {
        let mut defined = HashSet::new();
        for scene_box in &self.boxes {
            if !defined.insert(scene_box.id.clone()) {
                return Err(SceneError::DuplicateBox {
                    id: scene_box.id.clone(),
                });
            }
        }

        for line in &self.lines {
            let references = [&line.from, &line.to]
                .into_iter()
                .chain(line.nested_parents.iter());
            for name in references {
                if !defined.contains(name) {
                    return Err(SceneError::UndefinedBox {
                        name: name.clone(),
                        suggestions: find_similar(&defined, name, 2),
                    });
                }
            }
        }
        Ok(())
    }

    /// Look up a box by id
    pub fn get_box(&self, id: &str) -> Option<&SceneBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    fn rect_of(&self, id: &str) -> Result<Rect, SceneError> {
        self.get_box(id)
            .map(SceneBox::rect)
            .ok_or_else(|| SceneError::UndefinedBox {
                name: id.to_string(),
                suggestions: find_similar(&self.box_ids(), id, 2),
            })
    }

    fn box_ids(&self) -> HashSet<String> {
        self.boxes.iter().map(|b| b.id.clone()).collect()
    }

    /// Build the routing request for a scene line
    pub fn line_def(&self, line: &SceneLine) -> Result<LineDef, SceneError> {
        let start_box = self.rect_of(&line.from)?;
        let end_box = self.rect_of(&line.to)?;

        let (auto_start, auto_end) = best_edges(&start_box, &end_box);
        let start_side = line.start_side.unwrap_or(Side::from(auto_start));
        let end_side = line.end_side.unwrap_or(Side::from(auto_end));

        let mut obstacles = Vec::new();
        for parent in &line.nested_parents {
            obstacles.push(Obstacle::nested_parent(self.rect_of(parent)?));
        }
        if line.avoid_boxes {
            obstacles.extend(
                self.boxes
                    .iter()
                    .filter(|b| b.id != line.from && b.id != line.to)
                    .filter(|b| !line.nested_parents.contains(&b.id))
                    .map(|b| Obstacle::bar(b.rect())),
            );
        }

        let mut def = LineDef::new(start_box, end_box)
            .with_sides(start_side, end_side)
            .with_shifts(line.start_shift, line.end_shift)
            .with_obstacles(obstacles);
        def.start_arrow_margin = line.start_arrow_margin;
        def.end_arrow_margin = line.end_arrow_margin;
        def.horizontal_margin = line.horizontal_margin;
        def.vertical_margin = line.vertical_margin;
        def.other_horizontal_margin = line.other_horizontal_margin;
        def.other_vertical_margin = line.other_vertical_margin;
        Ok(def)
    }

    /// Route every line with the scene's router configuration
    pub fn route(&self) -> Result<Vec<RoutedLine>, RenderError> {
        let finder = PathFinder::new(self.router.clone());
        let mut routed = Vec::with_capacity(self.lines.len());

        for line in &self.lines {
            let def = self.line_def(line)?;
            let effective = EffectiveLineDef::resolve(&def, &self.router)?;
            let path = finder.find_path(&def)?;
            if path.is_none() {
                debug!(from = %line.from, to = %line.to, "line left unrouted");
            }
            routed.push(RoutedLine {
                from: line.from.clone(),
                to: line.to.clone(),
                start: effective.start_point(),
                end: effective.end_point(),
                path,
            });
        }
        Ok(routed)
    }
}

/// Compute Levenshtein edit distance between two strings
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut current = vec![i + 1; b_chars.len() + 1];
        for (j, &cb) in b_chars.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        previous = current;
    }

    previous[b_chars.len()]
}

/// Box ids within `max_distance` edits of `target`, closest first
fn find_similar(defined: &HashSet<String>, target: &str, max_distance: usize) -> Vec<String> {
    let mut candidates: Vec<(usize, &String)> = defined
        .iter()
        .map(|name| (levenshtein(name, target), name))
        .filter(|(distance, _)| *distance > 0 && *distance <= max_distance)
        .collect();
    candidates.sort();
    candidates.into_iter().take(3).map(|(_, name)| name.clone()).collect()
}
