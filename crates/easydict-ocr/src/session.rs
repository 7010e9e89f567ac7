use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use easydict_types::{Trigger, UiEvent};
use kanal::AsyncSender;
use tokio::sync::Mutex;

use crate::capture::{Frame, ScreenGrabber, crop_rgba, encode_png};
use crate::recognizer::Recognizer;

/// Delay between hiding the window and grabbing the screen
const HIDE_SETTLE: Duration = Duration::from_millis(50);

/// Two-step screenshot OCR: `begin` grabs the screen and asks the front-end
/// for a region, `recognize_region` or `cancel` finishes the capture.
///
/// The outcome is reported back as a trigger (`OcrResult`, `OcrError` or
/// `OcrCancelled`), never as a return value.
pub struct CaptureService {
    grabber: Arc<dyn ScreenGrabber>,
    recognizer: Arc<dyn Recognizer>,
    frame: Mutex<Option<Frame>>,
    in_progress: AtomicBool,
    triggers: AsyncSender<Trigger>,
    ui: AsyncSender<UiEvent>,
    settle: Duration,
}

impl CaptureService {
    pub fn new(
        grabber: Arc<dyn ScreenGrabber>,
        recognizer: Arc<dyn Recognizer>,
        triggers: AsyncSender<Trigger>,
        ui: AsyncSender<UiEvent>,
    ) -> Self {
        Self {
            grabber,
            recognizer,
            frame: Mutex::new(None),
            in_progress: AtomicBool::new(false),
            triggers,
            ui,
            settle: HIDE_SETTLE,
        }
    }

    pub fn with_settle_delay(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress.load(Ordering::SeqCst)
    }

    /// Hide the window, grab the screen and open the region selector.
    ///
    /// Returns once the selector is open. A call while a capture is pending is ignored.
    pub async fn begin(&self) -> Result<()> {
        if self.in_progress.swap(true, Ordering::SeqCst) {
            tracing::debug!("[OCR] Screenshot already in progress, ignoring");
            return Ok(());
        }

        tracing::info!("[OCR] Starting screenshot capture");
        self.notify_ui(UiEvent::HideWindow).await;
        tokio::time::sleep(self.settle).await;

        let grabber = self.grabber.clone();
        let frame = match tokio::task::spawn_blocking(move || grabber.grab()).await {
            Ok(Ok(frame)) => frame,
            Ok(Err(e)) => {
                self.abort().await;
                return Err(e);
            }
            Err(e) => {
                self.abort().await;
                return Err(anyhow!("Task join error: {e}"));
            }
        };

        let (width, height) = (frame.width, frame.height);
        tracing::debug!("[OCR] Screenshot captured: {}x{}", width, height);
        *self.frame.lock().await = Some(frame);

        if let Err(e) = self.ui.send(UiEvent::SelectRegion { width, height }).await {
            self.abort().await;
            return Err(anyhow!("Failed to open region selector: {e}"));
        }

        Ok(())
    }

    /// OCR the selected region of the stored frame and report the outcome
    pub async fn recognize_region(&self, x: u32, y: u32, width: u32, height: u32) -> Result<()> {
        let frame = self
            .frame
            .lock()
            .await
            .take()
            .context("No screenshot data")?;

        tracing::debug!("[OCR] Region selected: x={}, y={}, w={}, h={}", x, y, width, height);

        let recognizer = self.recognizer.clone();
        let outcome = tokio::task::spawn_blocking(move || {
            let cropped = crop_rgba(&frame, x, y, width, height)?;
            let png = encode_png(&cropped)?;
            recognizer.recognize_text(&png)
        })
        .await;

        self.in_progress.store(false, Ordering::SeqCst);

        let trigger = match outcome {
            Ok(Ok(text)) => {
                tracing::info!("[OCR] Recognised {} chars", text.chars().count());
                Trigger::OcrResult(text)
            }
            Ok(Err(e)) => {
                tracing::warn!("[OCR] Recognition failed: {:#}", e);
                Trigger::OcrError(format!("{e:#}"))
            }
            Err(e) => {
                tracing::error!("[OCR] Recognition task failed: {}", e);
                Trigger::OcrError(format!("Task join error: {e}"))
            }
        };

        self.triggers
            .send(trigger)
            .await
            .map_err(|e| anyhow!("Failed to deliver OCR outcome: {e}"))?;
        self.notify_ui(UiEvent::FocusWindow).await;

        Ok(())
    }

    /// Drop the stored frame and release the capture without recognising anything
    pub async fn cancel(&self) -> Result<()> {
        tracing::info!("[OCR] Screenshot cancelled");
        self.frame.lock().await.take();
        self.in_progress.store(false, Ordering::SeqCst);

        self.triggers
            .send(Trigger::OcrCancelled)
            .await
            .map_err(|e| anyhow!("Failed to deliver OCR cancellation: {e}"))?;
        self.notify_ui(UiEvent::FocusWindow).await;

        Ok(())
    }

    async fn abort(&self) {
        self.frame.lock().await.take();
        self.in_progress.store(false, Ordering::SeqCst);
        self.notify_ui(UiEvent::FocusWindow).await;
    }

    async fn notify_ui(&self, event: UiEvent) {
        if let Err(e) = self.ui.send(event).await {
            tracing::warn!("[OCR] UI channel closed: {}", e);
        }
    }
}
