use std::str::FromStr;

use anyhow::{Context, Result};
use easydict_config::hotkeys::HotkeyConfig;
use global_hotkey::hotkey::HotKey;
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};

/// What a registered global shortcut asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    InputTranslate,
    SelectTranslate,
    ScreenshotTranslate,
}

/// Active bindings from the config, in registration order
pub fn bindings(config: &HotkeyConfig) -> Vec<(HotkeyAction, &str)> {
    [
        (HotkeyAction::InputTranslate, &config.input_translate),
        (HotkeyAction::SelectTranslate, &config.select_translate),
        (HotkeyAction::ScreenshotTranslate, &config.screenshot_translate),
    ]
    .into_iter()
    .filter(|(_, entry)| entry.is_active())
    .map(|(action, entry)| (action, entry.shortcut.trim()))
    .collect()
}

/// Parse a combo such as `Alt+A` or `Ctrl+Shift+F1`
pub fn parse_binding(combo: &str) -> Result<HotKey> {
    HotKey::from_str(combo).with_context(|| format!("Invalid shortcut '{combo}'"))
}

pub struct HotkeyManager {
    manager: GlobalHotKeyManager,
    registered: Vec<(HotKey, HotkeyAction)>,
}

impl HotkeyManager {
    pub fn new() -> Result<Self> {
        let manager = GlobalHotKeyManager::new().context("Failed to create hotkey manager")?;

        Ok(Self {
            manager,
            registered: Vec::new(),
        })
    }

    /// Replace every registration with the bindings from `config`.
    ///
    /// A binding that fails to parse or register is logged and skipped.
    /// Returns how many bindings are live afterwards.
    pub fn register_from_config(&mut self, config: &HotkeyConfig) -> usize {
        self.unregister_all();

        for (action, combo) in bindings(config) {
            let hotkey = match parse_binding(combo) {
                Ok(hotkey) => hotkey,
                Err(e) => {
                    tracing::error!("Failed to register {}: {:#}", combo, e);
                    continue;
                }
            };

            match self.manager.register(hotkey) {
                Ok(()) => {
                    tracing::info!("Hotkey {} registered for {:?}", combo, action);
                    self.registered.push((hotkey, action));
                }
                Err(e) => tracing::error!("Failed to register {}: {}", combo, e),
            }
        }

        self.registered.len()
    }

    pub fn unregister_all(&mut self) {
        for (hotkey, _) in self.registered.drain(..) {
            if let Err(e) = self.manager.unregister(hotkey) {
                tracing::warn!("Failed to unregister hotkey: {}", e);
            }
        }
    }

    /// Next pressed action, if any (non-blocking)
    pub fn poll(&self) -> Option<HotkeyAction> {
        let receiver = GlobalHotKeyEvent::receiver();
        while let Ok(event) = receiver.try_recv() {
            if event.state != HotKeyState::Pressed {
                continue;
            }

            match self.registered.iter().find(|(hotkey, _)| hotkey.id() == event.id) {
                Some((_, action)) => return Some(*action),
                None => tracing::debug!("Hotkey event for unknown id {}", event.id),
            }
        }
        None
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        self.unregister_all();
    }
}
