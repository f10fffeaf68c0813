use serde::Deserialize;
use stackflow::{RenderOptions, render_with_options};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    width: Option<f32>,
    height: Option<f32>,
    fast_text: Option<bool>,
}

fn build_render_options(options: GraphRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("slate") {
        RenderOptions::slate()
    } else {
        RenderOptions::standard()
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        render_options.theme.font_size = font_size;
    }
    // System fonts are not reachable from wasm, so estimates are the default.
    render_options.layout.fast_text_metrics = options.fast_text.unwrap_or(true);

    render_options.with_container(
        options.width.unwrap_or_default(),
        options.height.unwrap_or_default(),
    )
}

/// Render a JSON graph document; the error string is the status message to
/// show the user.
#[wasm_bindgen]
pub fn render_graph_svg(json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<GraphRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        GraphRenderOptions::default()
    };

    let render_options = build_render_options(options);
    render_with_options(json, render_options).map_err(|error| JsValue::from_str(&error.to_string()))
}
