use easydict_types::{OriginTrigger, Panel, TranslationRequest, TranslationResult, UiEvent};

use super::{Session, SessionEvent};
use crate::render::{NOT_RECOGNIZED, render_results};

impl Session {
    /// `Idle → Translating`, or drop the request when busy
    pub(super) async fn begin_translation(&mut self, request: TranslationRequest) {
        if !self.machine.try_begin_translating() {
            tracing::debug!(
                "Dropping {:?} request while {:?}",
                request.origin(),
                self.machine.busy()
            );
            return;
        }

        self.publish();
        self.emit(UiEvent::InputReplaced(request.text().to_string())).await;
        self.emit(UiEvent::Render(Panel::Pending)).await;

        let dispatcher = self.dispatcher.clone();
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let results = dispatcher.translate(&request).await;
            if let Err(e) = completions.send(SessionEvent::Translated(results)).await {
                tracing::error!("Translation finished after the session stopped: {}", e);
            }
        });
    }

    /// `Translating → Idle`, then render whatever came back
    pub(super) async fn finish_translation(&mut self, results: Vec<TranslationResult>) {
        self.machine.end_translating();
        self.publish();

        tracing::debug!("Rendering {} results", results.len());
        self.emit(UiEvent::Render(render_results(&results))).await;
    }

    pub(super) async fn ocr_result(&mut self, text: String) {
        self.show_main();
        self.machine.end_capturing();

        let languages = self.languages.borrow().clone();
        match TranslationRequest::new(&text, &languages, OriginTrigger::Ocr) {
            Some(request) => self.begin_translation(request).await,
            None => {
                self.emit(UiEvent::Render(Panel::Notice(NOT_RECOGNIZED.to_string())))
                    .await
            }
        }
    }
}
