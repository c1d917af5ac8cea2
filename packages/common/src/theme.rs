use serde::Serialize;

use crate::error::ValidationError;

/// Theme id recorded when the color was typed in by hand.
pub const CUSTOM_THEME_ID: &str = "custom";
pub const DEFAULT_THEME_ID: &str = "sena-green";
pub const DEFAULT_COLOR: &str = "#2F4D2A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemePreset {
    pub id: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

pub const PRESETS: &[ThemePreset] = &[
    ThemePreset {
        id: "sena-green",
        name: "SENA Green",
        color: "#2F4D2A",
        description: "Institutional SENA color",
    },
    ThemePreset {
        id: "ocean-blue",
        name: "Ocean Blue",
        color: "#0EA5E9",
        description: "Professional and trustworthy",
    },
    ThemePreset {
        id: "forest-green",
        name: "Forest Green",
        color: "#10B981",
        description: "Natural and fresh",
    },
    ThemePreset {
        id: "sunset-orange",
        name: "Sunset Orange",
        color: "#F97316",
        description: "Energetic and vibrant",
    },
    ThemePreset {
        id: "royal-purple",
        name: "Royal Purple",
        color: "#8B5CF6",
        description: "Elegant and creative",
    },
    ThemePreset {
        id: "ruby-red",
        name: "Ruby Red",
        color: "#EF4444",
        description: "Passionate and bold",
    },
    ThemePreset {
        id: "golden-yellow",
        name: "Golden Yellow",
        color: "#EAB308",
        description: "Optimistic and warm",
    },
    ThemePreset {
        id: "midnight-blue",
        name: "Midnight Blue",
        color: "#1E3A8A",
        description: "Corporate and formal",
    },
];

pub fn find_preset(id: &str) -> Option<&'static ThemePreset> {
    PRESETS.iter().find(|t| t.id == id)
}

pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    let valid = color
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidColor(color.to_string()))
    }
}

/// Profile accent: the custom color, else the selected preset's color,
/// else the default.
pub fn primary_color(custom_color: Option<&str>, theme_id: Option<&str>) -> String {
    custom_color
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .or_else(|| theme_id.and_then(find_preset).map(|t| t.color.to_string()))
        .unwrap_or_else(|| DEFAULT_COLOR.to_string())
}

/// The design panel's state: a preset id or `custom`, plus the hex color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSelection {
    theme_id: String,
    color: String,
}

impl Default for ThemeSelection {
    fn default() -> Self {
        Self {
            theme_id: DEFAULT_THEME_ID.into(),
            color: DEFAULT_COLOR.into(),
        }
    }
}

impl ThemeSelection {
    pub fn new(theme_id: Option<&str>, color: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            theme_id: theme_id.map_or(defaults.theme_id, str::to_string),
            color: color.map_or(defaults.color, str::to_string),
        }
    }

    pub fn theme_id(&self) -> &str {
        &self.theme_id
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Pick a preset; sets both the id and its color. Unknown ids change nothing.
    pub fn select_preset(&mut self, id: &str) -> bool {
        match find_preset(id) {
            Some(preset) => {
                self.theme_id = preset.id.to_string();
                self.color = preset.color.to_string();
                true
            }
            None => false,
        }
    }

    /// Free-form edit of the hex field. Validated only when saving.
    pub fn set_custom_color(&mut self, color: &str) {
        self.theme_id = CUSTOM_THEME_ID.to_string();
        self.color = color.trim().to_string();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_hex_color(&self.color)
    }
}
