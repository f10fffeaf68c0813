#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod session;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use ir::{Edge, Graph, Node};
pub use layout::{Bounds, ContainerSize, Layout, Point, compute_layout};
pub use parser::{ParseError, parse_graph};
pub use render::{RenderEmitter, RenderSummary, Scene, Surface, render_svg};
pub use session::{Session, Status, StatusKind};
pub use theme::Theme;

/// Everything a one-shot render needs besides the document itself.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub container: ContainerSize,
}

impl RenderOptions {
    pub fn standard() -> Self {
        Self {
            theme: Theme::standard(),
            layout: LayoutConfig::default(),
            container: ContainerSize::unmeasured(),
        }
    }

    pub fn slate() -> Self {
        Self {
            theme: Theme::slate(),
            ..Self::standard()
        }
    }

    pub fn with_container(mut self, width: f32, height: f32) -> Self {
        self.container = ContainerSize::new(width, height);
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Validate a JSON graph document and render it to an SVG string.
pub fn render(input: &str) -> Result<String, ParseError> {
    render_with_options(input, RenderOptions::default())
}

pub fn render_with_options(input: &str, options: RenderOptions) -> Result<String, ParseError> {
    let graph = parse_graph(input)?;
    Ok(render_graph_svg(&graph, &options))
}

pub fn render_graph_svg(graph: &Graph, options: &RenderOptions) -> String {
    let layout = compute_layout(&graph.nodes, options.container, &options.theme, &options.layout);
    let mut scene = Scene::new();
    RenderEmitter::new().emit(&mut scene, graph, &layout, &options.theme);
    render_svg(&scene, &options.theme)
}
