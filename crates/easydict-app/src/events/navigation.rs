use easydict_types::{LanguageSelection, Panel, UiEvent};

use super::Session;

impl Session {
    /// Idempotent; returns whether the panel changed
    pub(super) fn show_main(&mut self) -> bool {
        let changed = self.machine.show_main();
        if changed {
            tracing::debug!("View -> Main");
            self.publish();
        }
        changed
    }

    /// Idempotent; returns whether the panel changed
    pub(super) fn show_settings(&mut self) -> bool {
        let changed = self.machine.show_settings();
        if changed {
            tracing::debug!("View -> Settings");
            self.publish();
        }
        changed
    }

    pub(super) async fn focus_input(&mut self) {
        self.show_main();
        self.emit(UiEvent::InputReplaced(String::new())).await;
        self.emit(UiEvent::Render(Panel::Placeholder)).await;
        self.emit(UiEvent::FocusWindow).await;
    }

    pub(super) async fn set_languages(&mut self, languages: LanguageSelection) {
        self.languages.send_replace(languages.clone());
        self.emit(UiEvent::LanguagesChanged(languages)).await;
    }

    /// No-op while the source is `auto`
    pub(super) async fn swap_languages(&mut self) {
        let swapped = self.languages.borrow().swapped();
        match swapped {
            Some(languages) => self.set_languages(languages).await,
            None => tracing::debug!("Swap ignored for auto source"),
        }
    }

    pub(super) async fn clear(&mut self) {
        self.emit(UiEvent::InputReplaced(String::new())).await;
        self.emit(UiEvent::Render(Panel::Placeholder)).await;
    }

    pub(super) async fn toggle_pin(&mut self) {
        self.pinned = !self.pinned;
        self.emit(UiEvent::SetAlwaysOnTop(self.pinned)).await;
    }
}
