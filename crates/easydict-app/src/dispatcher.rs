use std::sync::Arc;
use std::time::Duration;

use easydict_core::BackendError;
use easydict_types::{TranslationRequest, TranslationResult, UiEvent};
use kanal::AsyncSender;

use crate::backend::Backend;
use crate::render::COPIED;

/// Talks to the backend on behalf of the session.
///
/// Single-flight is the session's job, the dispatcher only guarantees that
/// every call comes back with an outcome.
#[derive(Clone)]
pub struct RequestDispatcher {
    backend: Arc<dyn Backend>,
    timeout: Option<Duration>,
    notices: AsyncSender<UiEvent>,
}

impl RequestDispatcher {
    pub fn new(backend: Arc<dyn Backend>, timeout_seconds: u64, notices: AsyncSender<UiEvent>) -> Self {
        Self {
            backend,
            timeout: timeout_from_secs(timeout_seconds),
            notices,
        }
    }

    pub fn set_timeout(&mut self, timeout_seconds: u64) {
        self.timeout = timeout_from_secs(timeout_seconds);
    }

    /// Never fails: a rejected call, a panic or a timeout becomes a single
    /// entry with an empty service name carrying the message.
    pub async fn translate(&self, request: &TranslationRequest) -> Vec<TranslationResult> {
        tracing::debug!(
            "Dispatching {:?} translation: {} chars, {} -> {}",
            request.origin(),
            request.text().len(),
            request.source(),
            request.target()
        );

        let backend = self.backend.clone();
        let (text, source, target) = (
            request.text().to_string(),
            request.source().to_string(),
            request.target().to_string(),
        );
        let mut call =
            tokio::spawn(async move { backend.translate_text(&text, &source, &target).await });

        let joined = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, &mut call).await {
                Ok(joined) => joined,
                Err(_) => {
                    call.abort();
                    tracing::warn!("Translation timed out after {:?}", limit);
                    return vec![request_failure(request, BackendError::Timeout(limit.as_secs()))];
                }
            },
            None => call.await,
        };

        match joined {
            Ok(Ok(results)) => results,
            Ok(Err(e)) => {
                tracing::warn!("Translation failed: {}", e);
                vec![request_failure(request, e)]
            }
            Err(e) => {
                tracing::error!("Translation task failed: {}", e);
                vec![request_failure(request, BackendError::Task(e.to_string()))]
            }
        }
    }

    /// Resolves once the capture surface is up; the text arrives later as a trigger
    pub async fn start_capture(&self) -> Result<(), BackendError> {
        let backend = self.backend.clone();
        match tokio::spawn(async move { backend.start_screenshot_ocr().await }).await {
            Ok(outcome) => outcome,
            Err(e) => Err(BackendError::Task(e.to_string())),
        }
    }

    pub fn speak(&self, text: String) {
        let backend = self.backend.clone();
        let notices = self.notices.clone();
        tokio::spawn(async move {
            if let Err(e) = backend.speak(&text).await {
                tracing::warn!("Speak failed: {}", e);
                notify(&notices, e.to_string()).await;
            }
        });
    }

    pub fn copy_to_clipboard(&self, text: String) {
        let backend = self.backend.clone();
        let notices = self.notices.clone();
        tokio::spawn(async move {
            match backend.set_clipboard_text(&text).await {
                Ok(()) => notify(&notices, COPIED.to_string()).await,
                Err(e) => {
                    tracing::warn!("Copy failed: {}", e);
                    notify(&notices, e.to_string()).await;
                }
            }
        });
    }
}

fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn request_failure(request: &TranslationRequest, error: BackendError) -> TranslationResult {
    TranslationResult::failure("", error.to_string(), request.source(), request.target())
}

async fn notify(notices: &AsyncSender<UiEvent>, message: String) {
    if let Err(e) = notices.send(UiEvent::Toast(message)).await {
        tracing::debug!("Notice dropped: {}", e);
    }
}
