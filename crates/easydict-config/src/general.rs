use serde::{Deserialize, Serialize};

fn default_theme() -> String {
    "auto".to_string()
}

fn default_source_lang() -> String {
    "auto".to_string()
}

fn default_target_lang() -> String {
    "zh-CN".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// `auto`, `light` or `dark`
    #[serde(default = "default_theme")]
    pub theme: String,
    pub auto_start: bool,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    pub always_on_top: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            auto_start: false,
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            always_on_top: false,
        }
    }
}
