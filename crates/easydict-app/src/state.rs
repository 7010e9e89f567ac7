use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};

use easydict_config::Config;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    /// Where settings are persisted
    pub config_path: PathBuf,
    pub clipboard_monitoring: AtomicBool,
    /// Set when the hotkey bindings changed and must be registered again
    pub hotkeys_dirty: AtomicBool,
    /// Last text the app put on the clipboard itself
    own_clipboard: Mutex<Option<String>>,
}

impl AppState {
    pub fn new(config: Config, config_path: PathBuf) -> Self {
        Self {
            clipboard_monitoring: AtomicBool::new(config.clipboard_monitoring()),
            config: Arc::new(RwLock::new(config)),
            config_path,
            hotkeys_dirty: AtomicBool::new(false),
            own_clipboard: Mutex::new(None),
        }
    }

    /// Swap in freshly saved settings
    pub async fn apply(&self, config: Config) {
        self.clipboard_monitoring
            .store(config.clipboard_monitoring(), Ordering::Relaxed);
        *self.config.write().await = config;
        self.hotkeys_dirty.store(true, Ordering::Relaxed);
    }

    pub fn monitoring(&self) -> bool {
        self.clipboard_monitoring.load(Ordering::Relaxed)
    }

    pub fn remember_clipboard_write(&self, text: &str) {
        if let Ok(mut own) = self.own_clipboard.lock() {
            *own = Some(text.to_string());
        }
    }

    /// True once for text this app wrote, so the monitor can skip its own copies
    pub fn take_own_clipboard_write(&self, text: &str) -> bool {
        let Ok(mut own) = self.own_clipboard.lock() else {
            return false;
        };
        if own.as_deref() == Some(text) {
            *own = None;
            return true;
        }
        false
    }
}
