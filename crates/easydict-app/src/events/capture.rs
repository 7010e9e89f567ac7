use easydict_core::BackendError;
use easydict_types::{OcrRequest, Panel, UiEvent};

use super::{Session, SessionEvent};
use crate::render::capture_failed;

impl Session {
    /// `Idle → Capturing`, or drop the request when busy
    pub(super) async fn begin_capture(&mut self, request: OcrRequest) {
        if !self.machine.try_begin_capturing() {
            tracing::debug!("Dropping {:?} while {:?}", request, self.machine.busy());
            return;
        }
        self.publish();

        let dispatcher = self.dispatcher.clone();
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let outcome = dispatcher.start_capture().await;
            if let Err(e) = completions.send(SessionEvent::CaptureStarted(outcome)).await {
                tracing::error!("Capture started after the session stopped: {}", e);
            }
        });
    }

    pub(super) async fn capture_started(&mut self, outcome: Result<(), BackendError>) {
        let Err(e) = outcome else {
            tracing::debug!("Capture surface open, waiting for a region");
            return;
        };

        tracing::warn!("Capture failed to start: {}", e);
        self.machine.end_capturing();
        self.publish();
        self.emit(UiEvent::FocusWindow).await;
        self.emit(UiEvent::Render(Panel::Notice(capture_failed(&e.to_string()))))
            .await;
    }

    pub(super) async fn ocr_error(&mut self, message: String) {
        self.show_main();
        self.machine.end_capturing();
        self.publish();
        self.emit(UiEvent::Render(Panel::Notice(capture_failed(&message))))
            .await;
    }

    pub(super) fn ocr_cancelled(&mut self) {
        if self.machine.end_capturing() {
            tracing::debug!("Capture cancelled");
        }
    }
}
