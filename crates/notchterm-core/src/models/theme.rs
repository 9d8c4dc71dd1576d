use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current schema version written to persisted theme documents.
pub const THEME_SCHEMA_VERSION: u32 = 1;

fn schema_version() -> u32 {
    THEME_SCHEMA_VERSION
}

/// sRGB color with alpha, stored as component values in 0.0..=1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ThemeColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl ThemeColor {
    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

/// Appearance settings for the panel and its terminal surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub tint: ThemeColor,
    pub blur_strength: f64,
    pub glow_intensity: f64,
    pub font_name: String,
    pub font_size: f64,
}

impl Theme {
    /// The base look: a light frosted tint over a medium blur.
    pub fn base() -> Self {
        Self {
            tint: ThemeColor::new(0.75, 0.8, 0.9, 0.5),
            blur_strength: 0.5,
            glow_intensity: 0.3,
            font_name: "Menlo".to_string(),
            font_size: 12.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThemePreset {
    pub id: Uuid,
    pub name: String,
    pub theme: Theme,
}

/// Persisted root for the theme document; sibling of [`super::WorkspaceState`]
/// with the same persistence contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThemeState {
    #[serde(default = "schema_version")]
    pub version: u32,
    #[serde(rename = "currentTheme")]
    pub current_theme: Theme,
    #[serde(rename = "selectedPresetID")]
    pub selected_preset_id: Option<Uuid>,
    pub presets: Vec<ThemePreset>,
}

impl ThemeState {
    /// Fresh state with the built-in presets, the first one selected.
    pub fn with_builtin_presets() -> Self {
        let base = Theme::base();
        let presets = vec![
            ThemePreset {
                id: Uuid::new_v4(),
                name: "Clear".to_string(),
                theme: base.clone(),
            },
            ThemePreset {
                id: Uuid::new_v4(),
                name: "Smoke".to_string(),
                theme: Theme {
                    tint: ThemeColor::new(0.4, 0.45, 0.5, 0.6),
                    blur_strength: 0.7,
                    glow_intensity: 0.2,
                    font_name: "Menlo".to_string(),
                    font_size: 12.0,
                },
            },
            ThemePreset {
                id: Uuid::new_v4(),
                name: "Aurora".to_string(),
                theme: Theme {
                    tint: ThemeColor::new(0.25, 0.6, 0.5, 0.6),
                    blur_strength: 0.6,
                    glow_intensity: 0.5,
                    font_name: "Menlo".to_string(),
                    font_size: 12.0,
                },
            },
        ];
        let selected = presets.first().map(|p| p.id);

        Self {
            version: THEME_SCHEMA_VERSION,
            current_theme: base,
            selected_preset_id: selected,
            presets,
        }
    }
}
