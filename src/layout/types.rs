use std::collections::HashMap;

use serde::Serialize;

use crate::ir::Edge;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Size of the coordinate space the drawing surface must cover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

/// Measured size of the container the diagram is drawn into.
///
/// A zero, negative or non-finite dimension counts as unmeasured and is
/// replaced by the configured fallback during layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerSize {
    pub width: f32,
    pub height: f32,
}

impl ContainerSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn unmeasured() -> Self {
        Self::default()
    }

    pub fn measured_width(&self) -> Option<f32> {
        measured(self.width)
    }

    pub fn measured_height(&self) -> Option<f32> {
        measured(self.height)
    }
}

fn measured(value: f32) -> Option<f32> {
    (value.is_finite() && value > 0.0).then_some(value)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct NodeLayout {
    pub id: String,
    pub anchor: Point,
    pub width: f32,
    pub height: f32,
    pub label: TextBlock,
    pub note: Option<TextBlock>,
}

impl NodeLayout {
    /// Top-left corner of the box centred on the anchor.
    pub fn origin(&self) -> Point {
        Point::new(
            self.anchor.x - self.width / 2.0,
            self.anchor.y - self.height / 2.0,
        )
    }
}

#[derive(Debug, Clone)]
pub struct Layout {
    /// One entry per input node, in input order.
    pub nodes: Vec<NodeLayout>,
    /// Anchor per id. With duplicate ids the later node wins.
    pub positions: HashMap<String, Point>,
    pub bounds: Bounds,
}

impl Layout {
    pub fn position(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    /// Source and destination anchors, or `None` when either endpoint is
    /// absent or names no node.
    pub fn edge_endpoints(&self, edge: &Edge) -> Option<(Point, Point)> {
        let start = self.position(edge.from.as_deref()?)?;
        let end = self.position(edge.to.as_deref()?)?;
        Some((start, end))
    }
}
