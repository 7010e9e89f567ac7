use std::sync::Arc;

use easydict_types::{LanguageSelection, OcrRequest, OriginTrigger, Trigger, TranslationRequest};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::backend::Backend;
use crate::events::SessionEvent;

/// Turns raw triggers into session events.
///
/// Each trigger is handled on its own task so a slow clipboard read never
/// holds up another channel.
pub struct TriggerListener {
    backend: Arc<dyn Backend>,
    languages: watch::Receiver<LanguageSelection>,
    session: AsyncSender<SessionEvent>,
}

impl TriggerListener {
    pub fn new(
        backend: Arc<dyn Backend>,
        languages: watch::Receiver<LanguageSelection>,
        session: AsyncSender<SessionEvent>,
    ) -> Self {
        Self {
            backend,
            languages,
            session,
        }
    }

    pub async fn run(
        self,
        triggers: AsyncReceiver<Trigger>,
        cancel: CancellationToken,
    ) -> anyhow::Result<()> {
        let listener = Arc::new(self);
        let mut handlers = JoinSet::new();

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Trigger listener stopping");
                    break;
                }
                trigger = triggers.recv() => {
                    let trigger = trigger?;
                    tracing::debug!("Trigger: {:?}", std::mem::discriminant(&trigger));
                    let listener = listener.clone();
                    handlers.spawn(async move { listener.handle(trigger).await });
                }
                Some(joined) = handlers.join_next(), if !handlers.is_empty() => {
                    match joined {
                        Ok(Ok(())) => {}
                        Ok(Err(e)) => tracing::error!("Trigger handler failed: {:#}", e),
                        Err(e) => tracing::error!("Trigger handler panicked: {}", e),
                    }
                }
            }
        }

        Ok(())
    }

    pub async fn handle(&self, trigger: Trigger) -> anyhow::Result<()> {
        match trigger {
            Trigger::Manual(text) => self.translate(&text, OriginTrigger::Manual).await?,
            Trigger::FocusInput => self.send(SessionEvent::FocusInput).await?,
            Trigger::SelectTranslate { origin } => {
                self.send(SessionEvent::ShowMain).await?;
                match self.backend.clipboard_text().await {
                    Ok(text) => self.translate(&text, origin).await?,
                    Err(e) => tracing::debug!("Dropping {:?} trigger: {}", origin, e),
                }
            }
            Trigger::TriggerScreenshot => self.send(SessionEvent::Capture(OcrRequest)).await?,
            Trigger::OcrResult(text) => self.send(SessionEvent::OcrResult(text)).await?,
            Trigger::OcrError(message) => self.send(SessionEvent::OcrError(message)).await?,
            Trigger::OcrCancelled => self.send(SessionEvent::OcrCancelled).await?,
            Trigger::ClipboardTranslate(text) => {
                self.send(SessionEvent::ShowMain).await?;
                self.translate(&text, OriginTrigger::ClipboardMonitor).await?;
            }
        }
        Ok(())
    }

    /// Blank text never leaves the listener
    async fn translate(&self, text: &str, origin: OriginTrigger) -> anyhow::Result<()> {
        let request = TranslationRequest::new(text, &self.languages.borrow(), origin);
        match request {
            Some(request) => self.send(SessionEvent::Translate(request)).await,
            None => {
                tracing::debug!("Dropping blank {:?} trigger", origin);
                Ok(())
            }
        }
    }

    async fn send(&self, event: SessionEvent) -> anyhow::Result<()> {
        self.session.send(event).await?;
        Ok(())
    }
}
