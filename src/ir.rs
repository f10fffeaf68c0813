use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};

/// A labeled box in the diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub label: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub note: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color: None,
            note: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Fill color, ignoring an empty string the same way a missing one is.
    pub fn fill(&self) -> Option<&str> {
        self.color.as_deref().filter(|color| !color.trim().is_empty())
    }

    pub fn note_text(&self) -> Option<&str> {
        self.note.as_deref().filter(|note| !note.is_empty())
    }
}

/// A directed connection between two node ids.
///
/// An endpoint that was missing or unusable in the source document is
/// `None` and never resolves to a position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub from: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub to: Option<String>,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// Descriptive only; never consulted by layout or rendering.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(deserialize_with = "deserialize_entries")]
    pub nodes: Vec<Node>,
    #[serde(deserialize_with = "deserialize_entries")]
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.edges.push(Edge::new(from, to));
    }

    /// The four-step pipeline shown on startup.
    pub fn default_example() -> Self {
        let mut graph = Graph {
            kind: Some("flowchart".to_string()),
            ..Graph::default()
        };
        graph.add_node(
            Node::new("1", "Start")
                .with_color("#4f46e5")
                .with_note("Input received"),
        );
        graph.add_node(
            Node::new("2", "Parse Text")
                .with_color("#10b981")
                .with_note("NLP extracts nodes"),
        );
        graph.add_node(
            Node::new("3", "Render")
                .with_color("#f97316")
                .with_note("HTML + SVG"),
        );
        graph.add_node(
            Node::new("4", "Export")
                .with_color("#ef4444")
                .with_note("PNG / SVG / PDF"),
        );
        graph.add_edge("1", "2");
        graph.add_edge("2", "3");
        graph.add_edge("3", "4");
        graph
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Other(IgnoredAny),
}

impl Scalar {
    fn into_text(self) -> Option<String> {
        match self {
            Scalar::Text(value) => Some(value),
            Scalar::Number(value) => Some(value.to_string()),
            Scalar::Bool(value) => Some(value.to_string()),
            Scalar::Other(_) => None,
        }
    }
}

/// Ids and labels are compared and drawn as strings, so `7` and `"7"` are
/// the same id. `null`, arrays and objects read as absent.
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Scalar::deserialize(deserializer)?.into_text().unwrap_or_default())
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Scalar::deserialize(deserializer)?.into_text())
}

/// An entry that is not an object still takes its slot, as an empty node or
/// an edge without endpoints.
fn deserialize_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let entries = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|entry| T::deserialize(entry).unwrap_or_default())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_become_strings() {
        let node: Node = serde_json::from_str(r#"{"id": 7, "label": "Seven"}"#).unwrap();
        assert_eq!(node.id, "7");
        let edge: Edge = serde_json::from_str(r#"{"from": 7, "to": "8"}"#).unwrap();
        assert_eq!(edge, Edge::new("7", "8"));
    }

    #[test]
    fn scalar_fields_are_stringified() {
        let node: Node =
            serde_json::from_str(r#"{"id": true, "label": 5, "color": null, "note": 1.5}"#).unwrap();
        assert_eq!(node.id, "true");
        assert_eq!(node.label, "5");
        assert_eq!(node.color, None);
        assert_eq!(node.note.as_deref(), Some("1.5"));
    }

    #[test]
    fn unusable_endpoints_are_absent() {
        let edge: Edge = serde_json::from_str(r#"{"from": "a"}"#).unwrap();
        assert_eq!(edge.from.as_deref(), Some("a"));
        assert_eq!(edge.to, None);
        let edge: Edge = serde_json::from_str(r#"{"from": {"id": "a"}, "to": null}"#).unwrap();
        assert_eq!(edge, Edge::default());
    }

    #[test]
    fn non_object_entries_keep_their_slot() {
        let graph: Graph =
            serde_json::from_str(r#"{"nodes": [{"id": "a"}, 3], "edges": ["a->b"]}"#).unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[1], Node::default());
        assert_eq!(graph.edges, vec![Edge::default()]);
    }

    #[test]
    fn empty_color_and_note_are_treated_as_missing() {
        let node = Node::new("a", "A").with_color("").with_note("");
        assert_eq!(node.fill(), None);
        assert_eq!(node.note_text(), None);
    }

    #[test]
    fn default_example_is_a_linear_chain() {
        let graph = Graph::default_example();
        assert_eq!(graph.nodes.len(), 4);
        assert_eq!(graph.edges.len(), 3);
        for (edge, pair) in graph.edges.iter().zip(graph.nodes.windows(2)) {
            assert_eq!(edge.from.as_deref(), Some(pair[0].id.as_str()));
            assert_eq!(edge.to.as_deref(), Some(pair[1].id.as_str()));
        }
    }
}
