use crate::ir::Graph;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("JSON must include nodes and edges arrays.")]
    MissingArrays,
}

/// Validate a graph document and decode it.
///
/// The text must be strict JSON and an object whose `nodes` and `edges` keys
/// are both arrays. Nothing inside the arrays is validated: odd entries
/// decode to empty nodes or endpoint-less edges.
pub fn parse_graph(input: &str) -> Result<Graph, ParseError> {
    let document: Value = serde_json::from_str(input)?;
    if !has_array(&document, "nodes") || !has_array(&document, "edges") {
        return Err(ParseError::MissingArrays);
    }
    Ok(serde_json::from_value(document)?)
}

fn has_array(document: &Value, key: &str) -> bool {
    document.get(key).is_some_and(Value::is_array)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_document() {
        let graph = parse_graph(r#"{"nodes": [{"id": "a", "label": "A"}], "edges": []}"#).unwrap();
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].label, "A");
        assert!(graph.kind.is_none());
    }

    #[test]
    fn keeps_descriptive_type() {
        let graph = parse_graph(r#"{"type": "flowchart", "nodes": [], "edges": []}"#).unwrap();
        assert_eq!(graph.kind.as_deref(), Some("flowchart"));
    }

    #[test]
    fn rejects_nodes_object() {
        let err = parse_graph(r#"{"nodes": {}, "edges": []}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingArrays));
        assert_eq!(err.to_string(), "JSON must include nodes and edges arrays.");
    }

    #[test]
    fn rejects_missing_edges() {
        let err = parse_graph(r#"{"nodes": []}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingArrays));
    }

    #[test]
    fn rejects_non_object_documents() {
        for input in ["[]", "null", "42", "\"nodes\""] {
            let err = parse_graph(input).unwrap_err();
            assert!(matches!(err, ParseError::MissingArrays), "input {input}");
        }
    }

    #[test]
    fn reports_syntax_errors() {
        let err = parse_graph("{ nodes: [").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn node_without_id_still_decodes() {
        let graph = parse_graph(r#"{"nodes": [{"label": "A"}], "edges": []}"#).unwrap();
        assert_eq!(graph.nodes[0].id, "");
        assert_eq!(graph.nodes[0].label, "A");
    }

    #[test]
    fn malformed_entries_do_not_fail_the_document() {
        let graph = parse_graph(
            r#"{"nodes": [{"id": "a", "label": "A"}, {"id": "b", "label": 5}],
                "edges": [{"from": "a"}, {"from": "a", "to": null}, {"from": "a", "to": "b"}]}"#,
        )
        .unwrap();
        assert_eq!(graph.nodes[1].label, "5");
        assert_eq!(graph.edges.len(), 3);
        assert_eq!(graph.edges[0].to, None);
        assert_eq!(graph.edges[1].to, None);
    }

    #[test]
    fn rejects_object_literal_syntax() {
        let inputs = [
            "{nodes: [{id: 'x', label: 'X'}], edges: [],}",
            r#"{"nodes": [], "edges": [],}"#,
            "// comment\n{\"nodes\": [], \"edges\": []}",
        ];
        for input in inputs {
            let err = parse_graph(input).unwrap_err();
            assert!(matches!(err, ParseError::Json(_)), "input {input}");
        }
    }
}
