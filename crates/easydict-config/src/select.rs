use serde::{Deserialize, Serialize};

/// What the clipboard monitor does with freshly copied text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectMode {
    /// Translate immediately
    Auto,
    /// Offer a floating icon, translate on click
    #[default]
    Icon,
    /// Only the select-translate hotkey translates
    Hotkey,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectTranslateConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub mode: SelectMode,
    #[serde(default = "default_enabled")]
    pub monitor_clipboard: bool,
}

impl Default for SelectTranslateConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            mode: SelectMode::default(),
            monitor_clipboard: default_enabled(),
        }
    }
}
