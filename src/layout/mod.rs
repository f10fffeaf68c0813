mod text;
pub(crate) mod types;
pub use types::*;
use text::*;

use std::collections::HashMap;

use crate::config::LayoutConfig;
use crate::ir::Node;
use crate::theme::Theme;

/// Place every node in a single centred column.
///
/// Anchors depend only on a node's index: `x` is the horizontal midpoint of
/// the canvas and `y = padding + index * spacing`. The canvas is at least as
/// tall as the container and always tall enough to hold every anchor.
pub fn compute_layout(
    nodes: &[Node],
    container: ContainerSize,
    theme: &Theme,
    config: &LayoutConfig,
) -> Layout {
    let bounds = canvas_bounds(nodes.len(), container, config);
    let center_x = bounds.width / 2.0;

    let mut positions = HashMap::with_capacity(nodes.len());
    let mut placed = Vec::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        let anchor = Point::new(center_x, anchor_y(index, config));
        positions.insert(node.id.clone(), anchor);
        placed.push(place_node(node, anchor, theme, config));
    }

    tracing::debug!(
        nodes = nodes.len(),
        width = bounds.width,
        height = bounds.height,
        "computed column layout"
    );

    Layout {
        nodes: placed,
        positions,
        bounds,
    }
}

pub fn anchor_y(index: usize, config: &LayoutConfig) -> f32 {
    config.padding + index as f32 * config.spacing
}

/// Height needed to fit `node_count` anchors plus top and bottom padding.
pub fn column_extent(node_count: usize, config: &LayoutConfig) -> f32 {
    config.padding * 2.0 + node_count.saturating_sub(1) as f32 * config.spacing
}

pub fn canvas_bounds(node_count: usize, container: ContainerSize, config: &LayoutConfig) -> Bounds {
    let width = container.measured_width().unwrap_or(config.fallback_width);
    let min_height = container.measured_height().unwrap_or(config.fallback_height);
    Bounds {
        width,
        height: min_height.max(column_extent(node_count, config)),
    }
}

fn place_node(node: &Node, anchor: Point, theme: &Theme, config: &LayoutConfig) -> NodeLayout {
    let family = theme.font_family.as_str();
    let label = measure_text(&node.label, theme.font_size, family, config);
    let note = node
        .note_text()
        .map(|note| measure_text(note, theme.note_font_size, family, config));

    let mut text_width = label.width;
    let mut text_height = label.height;
    if let Some(note) = &note {
        text_width = text_width.max(note.width);
        text_height += config.note_gap + note.height;
    }

    NodeLayout {
        id: node.id.clone(),
        anchor,
        width: (text_width + config.node_padding_x * 2.0).max(config.min_node_width),
        height: (text_height + config.node_padding_y * 2.0).max(config.min_node_height),
        label,
        note,
    }
}
