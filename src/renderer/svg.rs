//! SVG generation from routed scenes

use crate::routing::geometry::{Point, Rect};
use crate::scene::{RoutedLine, Scene};

use super::path::segments_to_d;
use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    defs: Vec<String>,
    elements: Vec<String>,
    connections: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            defs: vec![],
            elements: vec![],
            connections: vec![],
            indent: 1,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add the arrow marker definition for connectors
    pub fn add_arrow_marker(&mut self) {
        let prefix = self.prefix();
        // orient="auto" turns the marker to follow the final segment
        self.defs.push(format!(
            r#"<marker id="{prefix}arrow" viewBox="0 0 10 10" refX="8" refY="5" markerWidth="4" markerHeight="4" markerUnits="strokeWidth" orient="auto">
      <path d="M0,0 L10,5 L0,10 Z" fill="context-stroke"/>
    </marker>"#
        ));
    }

    /// Add a box as a rectangle
    pub fn add_box(&mut self, id: &str, rect: &Rect) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<rect id="{}" class="{}box" x="{}" y="{}" width="{}" height="{}"/>"#,
            self.indent_str(),
            escape_xml(id),
            prefix,
            rect.start,
            rect.top,
            rect.width(),
            rect.height()
        ));
    }

    /// Add a routed connector path
    pub fn add_connector(&mut self, d: &str, classes: &[String], marker_end: bool) {
        let prefix = self.prefix();
        let class_list = std::iter::once(format!("{}connection", prefix))
            .chain(classes.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");

        let marker = if marker_end {
            format!(r#" marker-end="url(#{prefix}arrow)""#)
        } else {
            String::new()
        };

        self.connections.push(format!(
            r#"{}<path class="{}" d="{}" fill="none"{}/>"#,
            self.indent_str(),
            class_list,
            d,
            marker
        ));
    }

    /// Add a straight line for a connector that could not be routed
    pub fn add_direct_line(&mut self, from: Point, to: Point, classes: &[String]) {
        let prefix = self.prefix();
        let class_list = std::iter::once(format!("{}connection-direct", prefix))
            .chain(classes.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");

        self.connections.push(format!(
            r#"{}<line class="{}" x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
            self.indent_str(),
            class_list,
            from.x,
            from.y,
            to.x,
            to.y
        ));
    }

    /// Build the final SVG string
    pub fn build(self, viewbox: Rect) -> String {
        let padding = self.config.viewbox_padding;
        let vb_x = viewbox.start - padding;
        let vb_y = viewbox.top - padding;
        let vb_w = viewbox.width() + 2.0 * padding;
        let vb_h = viewbox.height() + 2.0 * padding;

        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            vb_x, vb_y, vb_w, vb_h
        ));
        svg.push_str(nl);

        if !self.defs.is_empty() {
            svg.push_str("  <defs>");
            svg.push_str(nl);
            for def in &self.defs {
                svg.push_str("    ");
                svg.push_str(def);
                svg.push_str(nl);
            }
            svg.push_str("  </defs>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        // Connectors render on top of boxes
        for conn in &self.connections {
            svg.push_str(conn);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a scene and its routed lines to SVG
pub fn render_svg(scene: &Scene, lines: &[RoutedLine], config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());

    if lines.iter().any(|l| l.path.as_ref().is_some_and(|p| !p.hide_marker)) {
        builder.add_arrow_marker();
    }

    if config.draw_boxes {
        for scene_box in &scene.boxes {
            builder.add_box(&scene_box.id, &scene_box.rect());
        }
    }

    for line in lines {
        let classes = vec![
            format!("from-{}", escape_xml(&line.from)),
            format!("to-{}", escape_xml(&line.to)),
        ];
        match &line.path {
            Some(path) => {
                let d = segments_to_d(&path.segments, config.corner_radius);
                builder.add_connector(&d, &classes, !path.hide_marker);
            }
            None => builder.add_direct_line(line.start, line.end, &classes),
        }
    }

    let viewbox = scene_extent(scene, lines).unwrap_or_else(|| Rect::new(0.0, 0.0, 0.0, 0.0));
    builder.build(viewbox)
}

/// Box containing every box and every routed segment
fn scene_extent(scene: &Scene, lines: &[RoutedLine]) -> Option<Rect> {
    let boxes = scene.boxes.iter().map(|b| b.rect());
    let segments = lines
        .iter()
        .filter_map(|l| l.path.as_ref())
        .flat_map(|p| p.segments.iter())
        .map(|s| {
            Rect::new(
                s.x1.min(s.x2),
                s.x1.max(s.x2),
                s.y1.min(s.y2),
                s.y1.max(s.y2),
            )
        });
    boxes.chain(segments).reduce(|acc, r| acc.union(&r))
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;

    const TWO_BOXES: &str = r#"
[[box]]
id = "a"
start = 0
end = 50
top = 0
bottom = 20

[[box]]
id = "b"
start = 200
end = 250
top = 100
bottom = 120

[[line]]
from = "a"
to = "b"
"#;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
    }

    #[test]
    fn test_render_boxes_and_connector() {
        let scene = Scene::from_toml_str(TWO_BOXES).expect("Should parse");
        let lines = scene.route().expect("Should route");
        let svg = render_svg(&scene, &lines, &SvgConfig::default());

        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"<rect id="a" class="or-box" x="0" y="0" width="50" height="20"/>"#));
        assert!(svg.contains(r#"d="M50 10 L62 10 L62 110 L200 110""#));
        assert!(svg.contains(r#"marker-end="url(#or-arrow)""#));
        assert!(svg.contains(r#"viewBox="-20 -20 290 160""#));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_render_without_boxes_or_prefix() {
        let mut scene = Scene::from_toml_str(TWO_BOXES).expect("Should parse");
        scene.svg = SvgConfig::default()
            .with_draw_boxes(false)
            .without_class_prefix()
            .with_standalone(false);
        let lines = scene.route().expect("Should route");
        let svg = render_svg(&scene, &lines, &scene.svg);

        assert!(!svg.contains("<rect"));
        assert!(!svg.contains("<?xml"));
        assert!(svg.contains(r#"class="connection from-a to-b""#));
    }

    #[test]
    fn test_ids_are_escaped_in_classes() {
        let source = TWO_BOXES
            .replace("id = \"a\"", "id = 'a\"b'")
            .replace("from = \"a\"", "from = 'a\"b'");
        let scene = Scene::from_toml_str(&source).expect("Should parse");
        let lines = scene.route().expect("Should route");
        let svg = render_svg(&scene, &lines, &SvgConfig::default());

        assert!(!svg.contains("from-a\"b"));
        assert!(svg.contains(r#"class="or-connection from-a&quot;b to-b""#));
        assert!(svg.contains(r#"id="a&quot;b""#));
    }

    #[test]
    fn test_hidden_marker_omits_arrow() {
        let scene = Scene::from_toml_str(TWO_BOXES).expect("Should parse");
        let mut lines = scene.route().expect("Should route");
        if let Some(path) = lines[0].path.as_mut() {
            path.hide_marker = true;
        }
        let svg = render_svg(&scene, &lines, &SvgConfig::default());

        assert!(!svg.contains("marker-end"));
        assert!(!svg.contains("<marker"));
        assert!(svg.contains("<path class=\"or-connection"));
    }

    #[test]
    fn test_direct_line_when_unrouted() {
        let mut builder = SvgBuilder::new(SvgConfig::default().with_pretty_print(false));
        builder.add_direct_line(Point::new(0.0, 0.0), Point::new(10.0, 5.0), &[]);
        let svg = builder.build(Rect::new(0.0, 10.0, 0.0, 5.0));
        assert!(svg.contains(r#"<line class="or-connection-direct" x1="0" y1="0" x2="10" y2="5"/>"#));
    }
}
