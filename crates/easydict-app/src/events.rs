use std::sync::Arc;

use easydict_core::{BackendError, SessionStateMachine};
use easydict_types::{
    LanguageSelection, OcrRequest, SessionSnapshot, TranslationRequest, TranslationResult, UiCommand, UiEvent,
};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::sync::watch;

use crate::dispatcher::RequestDispatcher;
use crate::state::AppState;

pub mod capture;
pub mod navigation;
pub mod settings;
pub mod translate;

/// Everything the session loop reacts to besides UI commands
#[derive(Debug)]
pub enum SessionEvent {
    /// A trigger produced a non-blank request
    Translate(TranslationRequest),
    /// A trigger asked for a screen capture
    Capture(OcrRequest),
    /// `focus-input`
    FocusInput,
    /// A trigger that implies returning to the main panel
    ShowMain,
    OcrResult(String),
    OcrError(String),
    OcrCancelled,
    /// The dispatcher finished a translation
    Translated(Vec<TranslationResult>),
    /// The dispatcher finished starting a capture
    CaptureStarted(Result<(), BackendError>),
}

/// Sole owner of the session state.
///
/// Every check-and-transition happens inside one `handle_*` call on the loop
/// task, so no two triggers can both observe `Idle`.
pub struct Session {
    machine: SessionStateMachine,
    dispatcher: RequestDispatcher,
    state: Arc<AppState>,
    languages: watch::Sender<LanguageSelection>,
    snapshot: watch::Sender<SessionSnapshot>,
    ui: AsyncSender<UiEvent>,
    /// Feeds dispatcher completions back into the loop
    completions: AsyncSender<SessionEvent>,
    pinned: bool,
}

impl Session {
    pub fn new(
        dispatcher: RequestDispatcher,
        state: Arc<AppState>,
        languages: watch::Sender<LanguageSelection>,
        snapshot: watch::Sender<SessionSnapshot>,
        ui: AsyncSender<UiEvent>,
        completions: AsyncSender<SessionEvent>,
        pinned: bool,
    ) -> Self {
        Self {
            machine: SessionStateMachine::new(),
            dispatcher,
            state,
            languages,
            snapshot,
            ui,
            completions,
            pinned,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.machine.snapshot()
    }

    pub async fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Translate(request) => self.begin_translation(request).await,
            SessionEvent::Translated(results) => self.finish_translation(results).await,
            SessionEvent::Capture(request) => self.begin_capture(request).await,
            SessionEvent::CaptureStarted(outcome) => self.capture_started(outcome).await,
            SessionEvent::OcrResult(text) => self.ocr_result(text).await,
            SessionEvent::OcrError(message) => self.ocr_error(message).await,
            SessionEvent::OcrCancelled => self.ocr_cancelled(),
            SessionEvent::FocusInput => self.focus_input().await,
            SessionEvent::ShowMain => {
                self.show_main();
            }
        }
        self.publish();
    }

    pub async fn handle_command(&mut self, command: UiCommand) {
        match command {
            UiCommand::ShowMain => {
                self.show_main();
            }
            UiCommand::ShowSettings => {
                self.show_settings();
            }
            UiCommand::SetLanguages(languages) => self.set_languages(languages).await,
            UiCommand::SwapLanguages => self.swap_languages().await,
            UiCommand::Clear => self.clear().await,
            UiCommand::TogglePin => self.toggle_pin().await,
            UiCommand::Copy(text) => self.dispatcher.copy_to_clipboard(text),
            UiCommand::Speak(text) => self.dispatcher.speak(text),
            UiCommand::SaveSettings(config) => self.save_settings(*config).await,
        }
        self.publish();
    }

    fn publish(&self) {
        self.snapshot.send_if_modified(|current| {
            let next = self.machine.snapshot();
            let changed = *current != next;
            *current = next;
            changed
        });
    }

    async fn emit(&self, event: UiEvent) {
        if let Err(e) = self.ui.send(event).await {
            tracing::warn!("UI channel closed: {}", e);
        }
    }
}

/// App's main loop
pub async fn event_loop(
    mut session: Session,
    events: AsyncReceiver<SessionEvent>,
    commands: AsyncReceiver<UiCommand>,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting session loop");
    session.publish();

    loop {
        tokio::select! {
            event = events.recv() => {
                let event = event?;
                tracing::debug!("[EVENT_LOOP] Event: {:?}", std::mem::discriminant(&event));
                session.handle_event(event).await;
            }
            command = commands.recv() => {
                let Ok(command) = command else {
                    tracing::info!("[EVENT_LOOP] Command channel closed, stopping");
                    return Ok(());
                };
                tracing::debug!("[EVENT_LOOP] Command: {:?}", std::mem::discriminant(&command));
                session.handle_command(command).await;
            }
        }
    }
}
