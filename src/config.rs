use crate::layout::ContainerSize;
use crate::theme::Theme;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Distance from the top edge to the first anchor, and the bottom
    /// margin kept below the last one.
    pub padding: f32,
    /// Vertical distance between consecutive anchors.
    pub spacing: f32,
    pub fallback_width: f32,
    pub fallback_height: f32,
    pub node_padding_x: f32,
    pub node_padding_y: f32,
    pub min_node_width: f32,
    pub min_node_height: f32,
    pub note_gap: f32,
    pub label_line_height: f32,
    pub fast_text_metrics: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 70.0,
            spacing: 120.0,
            fallback_width: 600.0,
            fallback_height: 400.0,
            node_padding_x: 24.0,
            node_padding_y: 12.0,
            min_node_width: 160.0,
            min_node_height: 48.0,
            note_gap: 4.0,
            label_line_height: 1.3,
            fast_text_metrics: false,
        }
    }
}

/// Measured size of the drawing container. Zero means "not laid out yet".
/// The canvas background is a theme color, not a render setting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl RenderConfig {
    pub fn container(&self) -> ContainerSize {
        ContainerSize::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<NumberOrString>,
    note_font_size: Option<NumberOrString>,
    accent_color: Option<String>,
    text_color: Option<String>,
    line_color: Option<String>,
    line_width: Option<NumberOrString>,
    corner_radius: Option<NumberOrString>,
    background: Option<String>,
    status_color: Option<String>,
    error_color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f32),
    String(String),
}

impl NumberOrString {
    fn as_f32(&self) -> Option<f32> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => val.trim().trim_end_matches("px").parse::<f32>().ok(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    padding: Option<f32>,
    spacing: Option<f32>,
    fallback_width: Option<f32>,
    fallback_height: Option<f32>,
    node_padding_x: Option<f32>,
    node_padding_y: Option<f32>,
    min_node_width: Option<f32>,
    min_node_height: Option<f32>,
    note_gap: Option<f32>,
    label_line_height: Option<f32>,
    fast_text_metrics: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("invalid config file {}", path.display()))
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;
    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = Theme::from_name(theme_name)
            .ok_or_else(|| anyhow::anyhow!("unknown theme '{theme_name}'"))?;
    }

    if let Some(vars) = parsed.theme_variables {
        apply_theme_variables(&mut config.theme, vars);
    }

    if let Some(layout) = parsed.layout {
        apply_layout(&mut config.layout, layout);
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
    }

    Ok(config)
}

fn apply_theme_variables(theme: &mut Theme, vars: ThemeVariables) {
    if let Some(v) = vars.font_family {
        theme.font_family = v;
    }
    if let Some(v) = vars.font_size.as_ref().and_then(NumberOrString::as_f32) {
        theme.font_size = v;
    }
    if let Some(v) = vars.note_font_size.as_ref().and_then(NumberOrString::as_f32) {
        theme.note_font_size = v;
    }
    if let Some(v) = vars.accent_color {
        theme.accent_color = v;
    }
    if let Some(v) = vars.text_color {
        theme.text_color = v;
    }
    if let Some(v) = vars.line_color {
        theme.line_color = v;
    }
    if let Some(v) = vars.line_width.as_ref().and_then(NumberOrString::as_f32) {
        theme.line_width = v;
    }
    if let Some(v) = vars.corner_radius.as_ref().and_then(NumberOrString::as_f32) {
        theme.corner_radius = v;
    }
    if let Some(v) = vars.background {
        theme.background = v;
    }
    if let Some(v) = vars.status_color {
        theme.status_color = v;
    }
    if let Some(v) = vars.error_color {
        theme.error_color = v;
    }
}

fn apply_layout(layout: &mut LayoutConfig, file: LayoutConfigFile) {
    if let Some(v) = file.padding {
        layout.padding = v;
    }
    if let Some(v) = file.spacing {
        layout.spacing = v;
    }
    if let Some(v) = file.fallback_width {
        layout.fallback_width = v;
    }
    if let Some(v) = file.fallback_height {
        layout.fallback_height = v;
    }
    if let Some(v) = file.node_padding_x {
        layout.node_padding_x = v;
    }
    if let Some(v) = file.node_padding_y {
        layout.node_padding_y = v;
    }
    if let Some(v) = file.min_node_width {
        layout.min_node_width = v;
    }
    if let Some(v) = file.min_node_height {
        layout.min_node_height = v;
    }
    if let Some(v) = file.note_gap {
        layout.note_gap = v;
    }
    if let Some(v) = file.label_line_height {
        layout.label_line_height = v;
    }
    if let Some(v) = file.fast_text_metrics {
        layout.fast_text_metrics = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.layout.padding, 70.0);
        assert_eq!(config.layout.spacing, 120.0);
        assert_eq!(config.theme.accent_color, "#4f46e5");
    }

    #[test]
    fn theme_preset_and_variables_apply_in_order() {
        let config = parse_config(
            r##"{
                "theme": "slate",
                "themeVariables": { "lineColor": "#111111", "fontSize": "18px", "lineWidth": 2 }
            }"##,
        )
        .unwrap();
        assert_eq!(config.theme.background, Theme::slate().background);
        assert_eq!(config.theme.line_color, "#111111");
        assert_eq!(config.theme.font_size, 18.0);
        assert_eq!(config.theme.line_width, 2.0);
    }

    #[test]
    fn layout_overrides() {
        let config = parse_config(
            r#"{ "layout": { "padding": 40, "spacing": 90, "fastTextMetrics": true } }"#,
        )
        .unwrap();
        assert_eq!(config.layout.padding, 40.0);
        assert_eq!(config.layout.spacing, 90.0);
        assert!(config.layout.fast_text_metrics);
        assert_eq!(config.layout.fallback_width, 600.0);
    }

    #[test]
    fn background_override_lands_on_theme() {
        let config = parse_config(
            r##"{ "theme": "slate", "themeVariables": { "background": "#000000" } }"##,
        )
        .unwrap();
        assert_eq!(config.theme.background, "#000000");
        assert_eq!(config.render.width, 0.0);
    }

    #[test]
    fn unknown_theme_is_rejected() {
        assert!(parse_config(r#"{ "theme": "neon" }"#).is_err());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = parse_config(r#"{ "flowchart": { "curve": "basis" } }"#).unwrap();
        assert_eq!(config.layout.spacing, 120.0);
    }
}
