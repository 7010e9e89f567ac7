use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use easydict_config::Config;
use easydict_core::BackendError;
use easydict_ocr::CaptureService;
use easydict_types::{BusyKind, Panel, SessionSnapshot, Trigger, TranslationResult, UiCommand, UiEvent};
use tempfile::TempDir;
use tokio::sync::{Notify, watch};
use tokio::task::JoinSet;
use tokio::time::timeout;

use crate::backend::Backend;
use crate::controller::AppController;
use crate::state::AppState;

pub const WAIT: Duration = Duration::from_secs(3);

#[derive(Clone)]
pub enum Reply {
    Results(Vec<TranslationResult>),
    Fail(BackendError),
    Panic,
    Hang,
}

pub struct FakeBackend {
    pub reply: Reply,
    /// When set, translations wait for one `notify_one` before replying
    pub gate: Option<Arc<Notify>>,
    pub capture: Result<(), BackendError>,
    /// When set, captures go through the real capture service
    pub capture_service: Option<Arc<CaptureService>>,
    pub clipboard: Result<String, BackendError>,
    pub speech: Result<(), BackendError>,
    pub calls: Mutex<Vec<(String, String, String)>>,
    pub captures: AtomicUsize,
    pub copies: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn replying(results: Vec<TranslationResult>) -> Self {
        Self {
            reply: Reply::Results(results),
            gate: None,
            capture: Ok(()),
            capture_service: None,
            clipboard: Ok(String::new()),
            speech: Ok(()),
            calls: Mutex::new(Vec::new()),
            captures: AtomicUsize::new(0),
            copies: Mutex::new(Vec::new()),
        }
    }

    pub fn google(text: &str) -> Self {
        Self::replying(vec![TranslationResult::success("Google", text, "en", "zh-CN")])
    }

    pub fn with_reply(mut self, reply: Reply) -> Self {
        self.reply = reply;
        self
    }

    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn translate_text(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<Vec<TranslationResult>, BackendError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), source.to_string(), target.to_string()));

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match self.reply.clone() {
            Reply::Results(results) => Ok(results),
            Reply::Fail(e) => Err(e),
            Reply::Panic => panic!("backend bug"),
            Reply::Hang => std::future::pending().await,
        }
    }

    async fn start_screenshot_ocr(&self) -> Result<(), BackendError> {
        self.captures.fetch_add(1, Ordering::SeqCst);
        if let Some(capture) = &self.capture_service {
            return capture
                .begin()
                .await
                .map_err(|e| BackendError::Capture(e.to_string()));
        }
        self.capture.clone()
    }

    async fn speak(&self, _text: &str) -> Result<(), BackendError> {
        self.speech.clone()
    }

    async fn clipboard_text(&self) -> Result<String, BackendError> {
        self.clipboard.clone()
    }

    async fn set_clipboard_text(&self, text: &str) -> Result<(), BackendError> {
        self.copies.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Session loop and trigger listener running against a fake backend
pub struct Harness {
    pub controller: AppController,
    pub state: Arc<AppState>,
    pub backend: Arc<FakeBackend>,
    pub snapshots: watch::Receiver<SessionSnapshot>,
    _tasks: JoinSet<anyhow::Result<()>>,
    _dir: TempDir,
}

impl Harness {
    pub fn start(backend: FakeBackend) -> Self {
        Self::start_with(Config::default(), |_| backend)
    }

    /// `build` receives the controller so the backend can use its capture service
    pub fn start_with(config: Config, build: impl FnOnce(&AppController) -> FakeBackend) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let state = Arc::new(AppState::new(config.clone(), dir.path().join("config.json")));
        Self::start_in(dir, state, config, build)
    }

    pub fn start_with_path(config: Config, path: PathBuf, backend: FakeBackend) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let state = Arc::new(AppState::new(config.clone(), path));
        Self::start_in(dir, state, config, |_| backend)
    }

    fn start_in(
        dir: TempDir,
        state: Arc<AppState>,
        config: Config,
        build: impl FnOnce(&AppController) -> FakeBackend,
    ) -> Self {
        let controller = AppController::new(state.clone(), &config);
        let backend = Arc::new(build(&controller));

        let mut tasks = JoinSet::new();
        controller.spawn_core(backend.clone(), &mut tasks);

        Self {
            snapshots: controller.snapshots(),
            controller,
            state,
            backend,
            _tasks: tasks,
            _dir: dir,
        }
    }

    pub async fn trigger(&self, trigger: Trigger) {
        self.controller.channels().triggers.0.send(trigger).await.unwrap();
    }

    pub async fn command(&self, command: UiCommand) {
        self.controller.channels().commands.0.send(command).await.unwrap();
    }

    pub async fn next_ui(&self) -> UiEvent {
        timeout(WAIT, self.controller.channels().app_to_ui.1.recv())
            .await
            .expect("no UI event")
            .expect("UI channel closed")
    }

    /// Skip everything up to the next rendered panel
    pub async fn next_render(&self) -> Panel {
        loop {
            if let UiEvent::Render(panel) = self.next_ui().await {
                return panel;
            }
        }
    }

    /// Skip `Pending` and return the first settled panel
    pub async fn settled_render(&self) -> Panel {
        loop {
            let panel = self.next_render().await;
            if panel != Panel::Pending {
                return panel;
            }
        }
    }

    pub async fn wait_until(&mut self, check: impl FnMut(&SessionSnapshot) -> bool) {
        timeout(WAIT, self.snapshots.wait_for(check))
            .await
            .expect("session never reached the expected state")
            .expect("session stopped");
    }

    pub async fn wait_busy(&mut self, busy: BusyKind) {
        self.wait_until(|s| s.busy == busy).await;
    }

    pub fn busy(&self) -> BusyKind {
        self.snapshots.borrow().busy
    }

    /// UI events already queued, without waiting
    pub fn drain_ui(&self) -> Vec<UiEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.controller.channels().app_to_ui.1.try_recv() {
            events.push(event);
        }
        events
    }
}

/// Give spawned trigger handlers a moment to run
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(100)).await;
}
