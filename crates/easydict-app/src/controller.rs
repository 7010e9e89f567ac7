use std::sync::Arc;

use easydict_config::Config;
use easydict_ocr::{CaptureService, Recognizer, ScreenGrabber};
use easydict_types::{LanguageSelection, SessionSnapshot, Trigger, UiCommand, UiEvent};
use easydict_ui::UiLinks;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::backend::Backend;
use crate::dispatcher::RequestDispatcher;
use crate::events::{Session, SessionEvent, event_loop};
use crate::io::watcher_io;
use crate::listener::TriggerListener;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub triggers: (AsyncSender<Trigger>, AsyncReceiver<Trigger>),
    pub session: (AsyncSender<SessionEvent>, AsyncReceiver<SessionEvent>),
    pub commands: (AsyncSender<UiCommand>, AsyncReceiver<UiCommand>),
    pub app_to_ui: (AsyncSender<UiEvent>, AsyncReceiver<UiEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            triggers: kanal::bounded_async(64),
            session: kanal::bounded_async(64),
            commands: kanal::bounded_async(64),
            app_to_ui: kanal::bounded_async(256),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
    languages: watch::Sender<LanguageSelection>,
    snapshot: watch::Sender<SessionSnapshot>,
    timeout_seconds: u64,
    pinned: bool,
}

impl AppController {
    pub fn new(state: Arc<AppState>, config: &Config) -> Self {
        let languages = LanguageSelection::new(
            config.general.source_lang.clone(),
            config.general.target_lang.clone(),
        );

        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
            languages: watch::Sender::new(languages),
            snapshot: watch::Sender::new(SessionSnapshot::default()),
            timeout_seconds: config.timeout_seconds,
            pinned: config.general.always_on_top,
        }
    }

    pub fn channels(&self) -> &ChannelSet {
        &self.channels
    }

    pub fn snapshots(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot.subscribe()
    }

    /// Capture service reporting into this controller's channels
    pub fn capture_service(
        &self,
        grabber: Arc<dyn ScreenGrabber>,
        recognizer: Arc<dyn Recognizer>,
    ) -> Arc<CaptureService> {
        Arc::new(CaptureService::new(
            grabber,
            recognizer,
            self.channels.triggers.0.clone(),
            self.channels.app_to_ui.0.clone(),
        ))
    }

    /// Session loop and trigger listener
    pub fn spawn_core(&self, backend: Arc<dyn Backend>, tasks: &mut JoinSet<anyhow::Result<()>>) {
        let dispatcher = RequestDispatcher::new(
            backend.clone(),
            self.timeout_seconds,
            self.channels.app_to_ui.0.clone(),
        );
        let session = Session::new(
            dispatcher,
            self.state.clone(),
            self.languages.clone(),
            self.snapshot.clone(),
            self.channels.app_to_ui.0.clone(),
            self.channels.session.0.clone(),
            self.pinned,
        );
        tasks.spawn(event_loop(
            session,
            self.channels.session.1.clone(),
            self.channels.commands.1.clone(),
        ));

        let listener = TriggerListener::new(
            backend,
            self.languages.subscribe(),
            self.channels.session.0.clone(),
        );
        tasks.spawn(listener.run(
            self.channels.triggers.1.clone(),
            self.cancel_token.child_token(),
        ));
    }

    pub fn spawn_tasks(
        &self,
        backend: Arc<dyn Backend>,
        capture: Arc<CaptureService>,
        config: Config,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        self.spawn_core(backend, &mut tasks);

        // UI loop
        let links = UiLinks {
            commands: self.channels.commands.0.clone(),
            triggers: self.channels.triggers.0.clone(),
            capture,
        };
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.snapshot.subscribe(),
            links,
            config,
        ));

        // Watcher IO
        tasks.spawn(watcher_io(
            self.state.clone(),
            self.cancel_token.child_token(),
            self.channels.triggers.0.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
