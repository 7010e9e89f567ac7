use std::sync::Arc;

use async_trait::async_trait;
use easydict_core::BackendError;
use easydict_ocr::CaptureService;
use easydict_translator::TranslatorPool;
use easydict_types::TranslationResult;

use crate::state::AppState;

/// Commands the session issues to the outside world
#[async_trait]
pub trait Backend: Send + Sync {
    /// One entry per enabled service, in display order
    async fn translate_text(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<Vec<TranslationResult>, BackendError>;

    /// Resolves once the region selector is open. The recognised text
    /// arrives later as an `OcrResult`/`OcrError` trigger.
    async fn start_screenshot_ocr(&self) -> Result<(), BackendError>;

    async fn speak(&self, text: &str) -> Result<(), BackendError>;

    async fn clipboard_text(&self) -> Result<String, BackendError>;

    async fn set_clipboard_text(&self, text: &str) -> Result<(), BackendError>;
}

/// Backend wired to the real translators, screen and clipboard
pub struct DesktopBackend {
    state: Arc<AppState>,
    client: reqwest::Client,
    capture: Arc<CaptureService>,
}

impl DesktopBackend {
    pub fn new(state: Arc<AppState>, client: reqwest::Client, capture: Arc<CaptureService>) -> Self {
        Self {
            state,
            client,
            capture,
        }
    }
}

#[async_trait]
impl Backend for DesktopBackend {
    async fn translate_text(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<Vec<TranslationResult>, BackendError> {
        // Services are rebuilt per call so saved settings apply immediately
        let (pool, default_target) = {
            let config = self.state.config.read().await;
            (
                TranslatorPool::from_config(&config.services, self.client.clone()),
                config.general.target_lang.clone(),
            )
        };

        if pool.is_empty() {
            tracing::warn!("No translation service enabled");
        }

        Ok(pool.translate_all(text, source, target, &default_target).await)
    }

    async fn start_screenshot_ocr(&self) -> Result<(), BackendError> {
        self.capture
            .begin()
            .await
            .map_err(|e| BackendError::Capture(format!("{e:#}")))
    }

    async fn speak(&self, text: &str) -> Result<(), BackendError> {
        easydict_io::speech::speak(text)
            .await
            .map_err(|e| BackendError::Speech(format!("{e:#}")))
    }

    async fn clipboard_text(&self) -> Result<String, BackendError> {
        tokio::task::spawn_blocking(easydict_io::clipboard::read_text)
            .await
            .map_err(|e| BackendError::Task(e.to_string()))?
            .map_err(|e| BackendError::Clipboard(format!("{e:#}")))
    }

    async fn set_clipboard_text(&self, text: &str) -> Result<(), BackendError> {
        // Recorded before writing so the monitor's next tick already knows it
        self.state.remember_clipboard_write(text);

        let owned = text.to_string();
        let written = tokio::task::spawn_blocking(move || easydict_io::clipboard::write_text(&owned))
            .await
            .map_err(|e| BackendError::Task(e.to_string()))
            .and_then(|r| r.map_err(|e| BackendError::Clipboard(format!("{e:#}"))));

        if written.is_err() {
            self.state.take_own_clipboard_write(text);
        }
        written
    }
}
