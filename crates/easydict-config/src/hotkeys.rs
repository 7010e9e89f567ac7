use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotkeyEntry {
    pub enabled: bool,
    /// Combo string such as `Alt+A` or `Ctrl+Shift+F1`
    pub shortcut: String,
}

impl HotkeyEntry {
    fn enabled(shortcut: &str) -> Self {
        Self {
            enabled: true,
            shortcut: shortcut.to_string(),
        }
    }

    /// Enabled and bound to a non-empty combo
    pub fn is_active(&self) -> bool {
        self.enabled && !self.shortcut.trim().is_empty()
    }
}

fn default_input_translate() -> HotkeyEntry {
    HotkeyEntry::enabled("Alt+A")
}

fn default_select_translate() -> HotkeyEntry {
    HotkeyEntry::enabled("Alt+D")
}

fn default_screenshot_translate() -> HotkeyEntry {
    HotkeyEntry::enabled("Alt+S")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    /// Bring the window forward with an empty input
    #[serde(default = "default_input_translate")]
    pub input_translate: HotkeyEntry,
    /// Translate whatever the clipboard holds
    #[serde(default = "default_select_translate")]
    pub select_translate: HotkeyEntry,
    /// Start a screen capture for OCR
    #[serde(default = "default_screenshot_translate")]
    pub screenshot_translate: HotkeyEntry,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            input_translate: default_input_translate(),
            select_translate: default_select_translate(),
            screenshot_translate: default_screenshot_translate(),
        }
    }
}
