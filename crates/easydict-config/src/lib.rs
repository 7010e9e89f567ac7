use std::env;

use serde::{Deserialize, Serialize};

use self::general::GeneralConfig;
use self::hotkeys::HotkeyConfig;
use self::select::SelectTranslateConfig;
use self::services::ServicesConfig;

pub mod general;
pub mod hotkeys;
pub mod select;
pub mod services;

pub use self::hotkeys::HotkeyEntry;
pub use self::select::SelectMode;

fn default_timeout_seconds() -> u64 {
    30
}

fn default_clipboard_poll_ms() -> u64 {
    500
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub hotkeys: HotkeyConfig,
    pub services: ServicesConfig,
    pub general: GeneralConfig,
    pub select_translate: SelectTranslateConfig,

    /// Upper bound for one translation round trip, 0 disables the bound
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Clipboard monitor poll interval
    #[serde(default = "default_clipboard_poll_ms")]
    pub clipboard_poll_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hotkeys: HotkeyConfig::default(),
            services: ServicesConfig::default(),
            general: GeneralConfig::default(),
            select_translate: SelectTranslateConfig::default(),
            timeout_seconds: default_timeout_seconds(),
            clipboard_poll_ms: default_clipboard_poll_ms(),
        }
    }
}

impl Config {
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(timeout) = env::var("TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.timeout_seconds = timeout;
        }

        if let Some(poll) = env::var("CLIPBOARD_POLL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.clipboard_poll_ms = poll;
        }

        self
    }

    /// Whether the background clipboard monitor should push text
    pub fn clipboard_monitoring(&self) -> bool {
        self.select_translate.enabled && self.select_translate.monitor_clipboard
    }
}
