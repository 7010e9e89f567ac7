use easydict_config::Config;
use easydict_types::{LanguageSelection, UiEvent};

use super::Session;
use crate::profile;
use crate::render::{SETTINGS_SAVED, save_failed};

impl Session {
    /// Persist, then apply: config, monitor flag, hotkeys, timeout and default target
    pub(super) async fn save_settings(&mut self, config: Config) {
        if let Err(e) = profile::save_config(&self.state.config_path, &config) {
            tracing::error!("Failed to save settings: {:#}", e);
            self.emit(UiEvent::Toast(save_failed(&format!("{e:#}")))).await;
            return;
        }

        self.dispatcher.set_timeout(config.timeout_seconds);
        self.state.apply(config.clone()).await;

        let source = self.languages.borrow().source.clone();
        self.set_languages(LanguageSelection::new(source, config.general.target_lang.clone()))
            .await;

        tracing::info!("Settings saved to {}", self.state.config_path.display());
        self.emit(UiEvent::ConfigApplied(Box::new(config))).await;
        self.emit(UiEvent::Toast(SETTINGS_SAVED.to_string())).await;
    }
}
