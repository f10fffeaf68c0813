use crate::ir::Graph;
use crate::layout::Layout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub kind: Option<String>,
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    pub skipped_edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub index: usize,
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub label_lines: Vec<String>,
    pub note_lines: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub from: Option<String>,
    pub to: Option<String>,
    pub points: Vec<[f32; 2]>,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout, graph: &Graph) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| NodeDump {
                index,
                id: node.id.clone(),
                x: node.anchor.x,
                y: node.anchor.y,
                width: node.width,
                height: node.height,
                label_lines: node.label.lines.clone(),
                note_lines: node
                    .note
                    .as_ref()
                    .map(|note| note.lines.clone())
                    .unwrap_or_default(),
            })
            .collect();

        let mut edges = Vec::new();
        let mut skipped_edges = Vec::new();
        for edge in &graph.edges {
            match layout.edge_endpoints(edge) {
                Some((start, end)) => edges.push(EdgeDump {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    points: vec![[start.x, start.y], [end.x, end.y]],
                }),
                None => skipped_edges.push(EdgeDump {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    points: Vec::new(),
                }),
            }
        }

        LayoutDump {
            kind: graph.kind.clone(),
            width: layout.bounds.width,
            height: layout.bounds.height,
            nodes,
            edges,
            skipped_edges,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout, graph: &Graph) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, graph);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
