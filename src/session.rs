use crate::config::Config;
use crate::ir::Graph;
use crate::layout::{ContainerSize, Layout, compute_layout};
use crate::parser::{ParseError, parse_graph};
use crate::render::{RenderEmitter, RenderSummary, Scene, Surface};
use crate::theme::Theme;

pub const RENDERED_MESSAGE: &str = "Diagram rendered.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// User-facing feedback for the last render request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }

    pub fn color<'a>(&self, theme: &'a Theme) -> &'a str {
        match self.kind {
            StatusKind::Info => theme.status_color.as_str(),
            StatusKind::Error => theme.error_color.as_str(),
        }
    }
}

/// A drawing surface plus everything needed to re-render it on demand.
///
/// Creating a session renders the built-in example graph. Later documents
/// go through [`Session::render_text`], which validates before touching the
/// surface: a rejected document leaves the previous diagram in place.
pub struct Session<S: Surface = Scene> {
    config: Config,
    container: ContainerSize,
    surface: S,
    emitter: RenderEmitter,
    layout: Option<Layout>,
    graph: Option<Graph>,
    status: Status,
}

impl Session<Scene> {
    pub fn new(config: Config, container: ContainerSize) -> Self {
        Self::with_surface(config, container, Scene::new())
    }
}

impl<S: Surface> Session<S> {
    pub fn with_surface(config: Config, container: ContainerSize, surface: S) -> Self {
        let mut session = Self {
            config,
            container,
            surface,
            emitter: RenderEmitter::new(),
            layout: None,
            graph: None,
            status: Status::info(""),
        };
        session.render_graph(Graph::default_example());
        session
    }

    /// Validate `text` and render it, or report why it was rejected.
    pub fn render_text(&mut self, text: &str) -> Result<RenderSummary, ParseError> {
        match parse_graph(text) {
            Ok(graph) => Ok(self.render_graph(graph)),
            Err(err) => {
                tracing::warn!(error = %err, "rejected graph document");
                self.status = Status::error(err.to_string());
                Err(err)
            }
        }
    }

    pub fn render_graph(&mut self, graph: Graph) -> RenderSummary {
        let layout = compute_layout(
            &graph.nodes,
            self.container,
            &self.config.theme,
            &self.config.layout,
        );
        let summary = self
            .emitter
            .emit(&mut self.surface, &graph, &layout, &self.config.theme);
        self.layout = Some(layout);
        self.graph = Some(graph);
        self.status = Status::info(RENDERED_MESSAGE);
        summary
    }

    /// Record a new container size. Takes effect on the next render.
    pub fn resize(&mut self, container: ContainerSize) {
        self.container = container;
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn graph(&self) -> Option<&Graph> {
        self.graph.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;

    fn session() -> Session {
        let config = Config {
            layout: LayoutConfig {
                fast_text_metrics: true,
                ..LayoutConfig::default()
            },
            ..Config::default()
        };
        Session::new(config, ContainerSize::new(600.0, 400.0))
    }

    #[test]
    fn startup_renders_default_example() {
        let session = session();
        assert_eq!(session.surface().boxes.len(), 4);
        assert_eq!(session.surface().lines.len(), 3);
        assert_eq!(session.status(), &Status::info(RENDERED_MESSAGE));
        assert_eq!(session.graph(), Some(&Graph::default_example()));
    }

    #[test]
    fn rejected_document_keeps_previous_diagram() {
        let mut session = session();
        let before = session.surface().clone();
        let err = session.render_text(r#"{"nodes": {}, "edges": []}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingArrays));
        assert!(session.status().is_error());
        assert_eq!(session.status().color(session.theme()), "#dc2626");
        assert_eq!(session.surface(), &before);
    }

    #[test]
    fn object_literal_is_not_rendered() {
        let mut session = session();
        let before = session.surface().clone();
        let err = session
            .render_text("{nodes: [{id: 'x', label: 'X'}], edges: [],}")
            .unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
        assert!(session.status().is_error());
        assert_ne!(session.status().message, RENDERED_MESSAGE);
        assert_eq!(session.surface(), &before);
    }

    #[test]
    fn accepted_document_replaces_diagram() {
        let mut session = session();
        let summary = session
            .render_text(r#"{"nodes": [{"id": "a", "label": "A"}], "edges": [{"from": "a", "to": "zzz"}]}"#)
            .unwrap();
        assert_eq!(summary.boxes, 1);
        assert_eq!(summary.skipped_edges, 1);
        assert_eq!(session.surface().boxes.len(), 1);
        assert!(session.surface().lines.is_empty());
        assert_eq!(session.status().color(session.theme()), "#475569");
    }

    #[test]
    fn resize_applies_on_next_render() {
        let mut session = session();
        session.resize(ContainerSize::new(1000.0, 0.0));
        assert_eq!(session.layout().unwrap().bounds.width, 600.0);
        session.render_graph(Graph::default_example());
        assert_eq!(session.layout().unwrap().bounds.width, 1000.0);
        assert_eq!(session.surface().boxes[0].anchor.x, 500.0);
    }
}
