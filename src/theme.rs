use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub note_font_size: f32,
    /// Fill for nodes that carry no color of their own.
    pub accent_color: String,
    pub text_color: String,
    pub line_color: String,
    pub line_width: f32,
    pub corner_radius: f32,
    pub background: String,
    pub status_color: String,
    pub error_color: String,
}

impl Theme {
    pub fn standard() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 16.0,
            note_font_size: 12.0,
            accent_color: "#4f46e5".to_string(),
            text_color: "#ffffff".to_string(),
            line_color: "#64748b".to_string(),
            line_width: 3.0,
            corner_radius: 14.0,
            background: "#f8fafc".to_string(),
            status_color: "#475569".to_string(),
            error_color: "#dc2626".to_string(),
        }
    }

    pub fn slate() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 16.0,
            note_font_size: 12.0,
            accent_color: "#6366f1".to_string(),
            text_color: "#f8fafc".to_string(),
            line_color: "#94a3b8".to_string(),
            line_width: 3.0,
            corner_radius: 14.0,
            background: "#0f172a".to_string(),
            status_color: "#cbd5e1".to_string(),
            error_color: "#f87171".to_string(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "standard" | "default" | "light" => Some(Self::standard()),
            "slate" | "dark" => Some(Self::slate()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::standard()
    }
}
