use crate::config::RenderConfig;
use crate::ir::Graph;
use crate::layout::{Bounds, Layout, Point, TextBlock};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

pub const ARROW_MARKER_ID: &str = "arrow";

/// Arrowhead shared by every edge line on a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowMarker {
    pub id: String,
    pub width: f32,
    pub height: f32,
    pub ref_x: f32,
    pub ref_y: f32,
    pub path: String,
    pub fill: String,
}

impl ArrowMarker {
    pub fn for_theme(theme: &Theme) -> Self {
        Self {
            id: ARROW_MARKER_ID.to_string(),
            width: 10.0,
            height: 10.0,
            ref_x: 10.0,
            ref_y: 5.0,
            path: "M 0 0 L 10 5 L 0 10 z".to_string(),
            fill: theme.line_color.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeBox {
    pub id: String,
    pub anchor: Point,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: String,
    pub label: TextBlock,
    pub note: Option<TextBlock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl LineCap {
    fn as_str(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLine {
    pub from: String,
    pub to: String,
    pub start: Point,
    pub end: Point,
    pub stroke: String,
    pub stroke_width: f32,
    pub line_cap: LineCap,
    /// Id of the marker drawn at `end`.
    pub marker_end: String,
}

/// Output sink the emitter draws into.
pub trait Surface {
    /// Remove every box and line. Marker definitions survive.
    fn clear(&mut self);
    fn define_arrow_marker(&mut self, marker: ArrowMarker);
    /// Fix the surface's coordinate space to exactly `bounds`, independent
    /// of how large the surface is displayed.
    fn set_view_box(&mut self, bounds: Bounds);
    fn draw_box(&mut self, node_box: NodeBox);
    fn draw_line(&mut self, line: EdgeLine);
}

/// In-memory surface holding the primitives of the current diagram.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub view_box: Option<Bounds>,
    pub markers: Vec<ArrowMarker>,
    pub boxes: Vec<NodeBox>,
    pub lines: Vec<EdgeLine>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arrow_marker(&self) -> Option<&ArrowMarker> {
        self.markers.iter().find(|marker| marker.id == ARROW_MARKER_ID)
    }
}

impl Surface for Scene {
    fn clear(&mut self) {
        self.boxes.clear();
        self.lines.clear();
    }

    fn define_arrow_marker(&mut self, marker: ArrowMarker) {
        self.markers.push(marker);
    }

    fn set_view_box(&mut self, bounds: Bounds) {
        self.view_box = Some(bounds);
    }

    fn draw_box(&mut self, node_box: NodeBox) {
        self.boxes.push(node_box);
    }

    fn draw_line(&mut self, line: EdgeLine) {
        self.lines.push(line);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub boxes: usize,
    pub lines: usize,
    pub skipped_edges: usize,
}

/// Turns a computed layout into surface primitives.
///
/// One emitter belongs to one surface: it remembers whether the arrow
/// marker has been defined there so repeated renders define it only once.
#[derive(Debug, Default)]
pub struct RenderEmitter {
    arrow_marker_initialized: bool,
}

impl RenderEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arrow_marker_initialized(&self) -> bool {
        self.arrow_marker_initialized
    }

    /// Replace everything on `surface` with the boxes and lines for `graph`.
    ///
    /// `layout` must have been computed from `graph.nodes`. Edges whose
    /// endpoints have no position are skipped without error.
    pub fn emit<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        graph: &Graph,
        layout: &Layout,
        theme: &Theme,
    ) -> RenderSummary {
        surface.clear();
        self.ensure_arrow_marker(surface, theme);

        let mut summary = RenderSummary::default();
        for (node, placed) in graph.nodes.iter().zip(&layout.nodes) {
            let origin = placed.origin();
            surface.draw_box(NodeBox {
                id: node.id.clone(),
                anchor: placed.anchor,
                x: origin.x,
                y: origin.y,
                width: placed.width,
                height: placed.height,
                fill: node.fill().unwrap_or(theme.accent_color.as_str()).to_string(),
                label: placed.label.clone(),
                note: placed.note.clone(),
            });
            summary.boxes += 1;
        }

        surface.set_view_box(layout.bounds);

        for edge in &graph.edges {
            let Some((start, end)) = layout.edge_endpoints(edge) else {
                tracing::debug!(from = ?edge.from, to = ?edge.to, "skipping edge with unknown endpoint");
                summary.skipped_edges += 1;
                continue;
            };
            surface.draw_line(EdgeLine {
                from: edge.from.clone().unwrap_or_default(),
                to: edge.to.clone().unwrap_or_default(),
                start,
                end,
                stroke: theme.line_color.clone(),
                stroke_width: theme.line_width,
                line_cap: LineCap::Round,
                marker_end: ARROW_MARKER_ID.to_string(),
            });
            summary.lines += 1;
        }

        tracing::debug!(
            boxes = summary.boxes,
            lines = summary.lines,
            skipped = summary.skipped_edges,
            "emitted diagram"
        );
        summary
    }

    fn ensure_arrow_marker<S: Surface + ?Sized>(&mut self, surface: &mut S, theme: &Theme) {
        if self.arrow_marker_initialized {
            return;
        }
        surface.define_arrow_marker(ArrowMarker::for_theme(theme));
        self.arrow_marker_initialized = true;
    }
}

/// Serialize a scene as a standalone SVG document.
///
/// Boxes are painted first and edge lines on top of them. Each line is cut
/// back to the outline of the boxes at its ends so the stroke never crosses
/// label text and the arrowhead lands on the destination box's edge.
pub fn render_svg(scene: &Scene, theme: &Theme) -> String {
    let bounds = scene.view_box.unwrap_or(Bounds {
        width: 0.0,
        height: 0.0,
    });
    let width = bounds.width;
    let height = bounds.height;
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" preserveAspectRatio=\"none\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape_xml(&theme.background)
    ));

    if !scene.markers.is_empty() {
        svg.push_str("<defs>");
        for marker in &scene.markers {
            svg.push_str(&format!(
                "<marker id=\"{}\" markerWidth=\"{}\" markerHeight=\"{}\" refX=\"{}\" refY=\"{}\" orient=\"auto\"><path d=\"{}\" fill=\"{}\"/></marker>",
                escape_xml(&marker.id),
                marker.width,
                marker.height,
                marker.ref_x,
                marker.ref_y,
                marker.path,
                escape_xml(&marker.fill)
            ));
        }
        svg.push_str("</defs>");
    }

    for node_box in &scene.boxes {
        svg.push_str(&node_box_svg(node_box, theme));
    }

    for line in &scene.lines {
        let (start, end) = visible_segment(line, &scene.boxes);
        svg.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"{}\" marker-end=\"url(#{})\"/>",
            start.x,
            start.y,
            end.x,
            end.y,
            escape_xml(&line.stroke),
            line.stroke_width,
            line.line_cap.as_str(),
            escape_xml(&line.marker_end)
        ));
    }

    svg.push_str("</svg>");
    svg
}

/// The part of `line` outside the boxes anchored at its two ends.
///
/// Falls back to the full anchor-to-anchor segment when the line has no
/// length or the boxes overlap along it.
fn visible_segment(line: &EdgeLine, boxes: &[NodeBox]) -> (Point, Point) {
    let dx = line.end.x - line.start.x;
    let dy = line.end.y - line.start.y;
    let length = dx.hypot(dy);
    if length == 0.0 {
        return (line.start, line.end);
    }
    let (ux, uy) = (dx / length, dy / length);

    let box_at = |anchor: Point| boxes.iter().rev().find(|node_box| node_box.anchor == anchor);
    let start_cut = box_at(line.start).map_or(0.0, |node_box| exit_distance(node_box, ux, uy));
    let end_cut = box_at(line.end).map_or(0.0, |node_box| exit_distance(node_box, ux, uy));
    if start_cut + end_cut >= length {
        return (line.start, line.end);
    }

    (
        Point::new(line.start.x + ux * start_cut, line.start.y + uy * start_cut),
        Point::new(line.end.x - ux * end_cut, line.end.y - uy * end_cut),
    )
}

/// Distance from a box's anchor to its outline along the unit direction.
fn exit_distance(node_box: &NodeBox, ux: f32, uy: f32) -> f32 {
    let across = if ux == 0.0 {
        f32::INFINITY
    } else {
        node_box.width / 2.0 / ux.abs()
    };
    let down = if uy == 0.0 {
        f32::INFINITY
    } else {
        node_box.height / 2.0 / uy.abs()
    };
    across.min(down)
}

fn node_box_svg(node_box: &NodeBox, theme: &Theme) -> String {
    let mut out = format!(
        "<g class=\"node\" data-id=\"{}\"><rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{r}\" ry=\"{r}\" fill=\"{}\"/>",
        escape_xml(&node_box.id),
        node_box.x,
        node_box.y,
        node_box.width,
        node_box.height,
        escape_xml(&node_box.fill),
        r = theme.corner_radius,
    );

    let note_height = node_box.note.as_ref().map_or(0.0, |note| note.height);
    let content_height = node_box.label.height + note_height;
    let top = node_box.anchor.y - content_height / 2.0;

    out.push_str(&text_block_svg(
        node_box.anchor.x,
        top,
        &node_box.label,
        theme.font_size,
        theme,
        "label",
    ));
    if let Some(note) = &node_box.note {
        out.push_str(&text_block_svg(
            node_box.anchor.x,
            top + node_box.label.height,
            note,
            theme.note_font_size,
            theme,
            "note",
        ));
    }
    out.push_str("</g>");
    out
}

fn text_block_svg(x: f32, top: f32, block: &TextBlock, font_size: f32, theme: &Theme, class: &str) -> String {
    let line_height = if block.lines.is_empty() {
        0.0
    } else {
        block.height / block.lines.len() as f32
    };
    let baseline = top + line_height / 2.0 + font_size * 0.35;
    let opacity = if class == "note" { " fill-opacity=\"0.85\"" } else { "" };

    let mut text = format!(
        "<text class=\"{class}\" x=\"{x:.2}\" y=\"{baseline:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{font_size}\" fill=\"{}\"{opacity}>",
        escape_xml(&theme.font_family),
        escape_xml(&theme.text_color),
    );
    for (idx, line) in block.lines.iter().enumerate() {
        let dy = if idx == 0 { 0.0 } else { line_height };
        text.push_str(&format!(
            "<tspan x=\"{x:.2}\" dy=\"{dy:.2}\">{}</tspan>",
            escape_xml(line)
        ));
    }
    text.push_str("</text>");
    text
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.fontdb_mut().load_system_fonts();
    if let Some(size) = usvg::Size::from_wh(render_cfg.width, render_cfg.height) {
        opt.default_size = size;
    }

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
