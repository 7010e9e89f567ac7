use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use easydict_config::SelectMode;
use easydict_io::{HotkeyAction, HotkeyManager};
use easydict_types::{OriginTrigger, Trigger, UiEvent};
use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

const HOTKEY_POLL: Duration = Duration::from_millis(50);

pub fn hotkey_trigger(action: HotkeyAction) -> Trigger {
    match action {
        HotkeyAction::InputTranslate => Trigger::FocusInput,
        HotkeyAction::SelectTranslate => Trigger::SelectTranslate {
            origin: OriginTrigger::Hotkey,
        },
        HotkeyAction::ScreenshotTranslate => Trigger::TriggerScreenshot,
    }
}

/// What the clipboard monitor does with freshly copied text
#[derive(Debug, Clone, PartialEq)]
pub enum ClipboardPush {
    Trigger(Trigger),
    Offer(UiEvent),
}

pub fn clipboard_push(mode: SelectMode, text: String) -> Option<ClipboardPush> {
    match mode {
        SelectMode::Auto => Some(ClipboardPush::Trigger(Trigger::ClipboardTranslate(text))),
        SelectMode::Icon => Some(ClipboardPush::Offer(UiEvent::SelectionOffered(text))),
        SelectMode::Hotkey => None,
    }
}

/// Whether freshly copied text should reach the session. The app's own
/// copies are consumed here and never forwarded.
pub fn should_forward(state: &AppState, text: &str) -> bool {
    let own = state.take_own_clipboard_write(text);
    if own {
        tracing::debug!("Skipping clipboard text written by the app");
    }
    state.monitoring() && !own
}

/// Global hotkeys and the clipboard monitor, both feeding the trigger channel
pub async fn watcher_io(
    state: Arc<AppState>,
    cancel: CancellationToken,
    trigger_tx: AsyncSender<Trigger>,
    ui_tx: AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    spawn_hotkey_listener(state.clone(), cancel.clone(), trigger_tx.clone());

    let poll = {
        let config = state.config.read().await;
        Duration::from_millis(config.clipboard_poll_ms.max(50))
    };
    tracing::info!("Starting clipboard watcher ({:?})", poll);

    let watcher_state = state.clone();
    tokio::select! {
        result = easydict_io::clipboard::watch_clipboard(poll, move |text| {
            if !should_forward(&watcher_state, &text) {
                return;
            }
            let state = watcher_state.clone();
            let trigger_tx = trigger_tx.clone();
            let ui_tx = ui_tx.clone();
            tokio::spawn(async move {
                let mode = state.config.read().await.select_translate.mode;
                let sent = match clipboard_push(mode, text) {
                    Some(ClipboardPush::Trigger(trigger)) => trigger_tx.send(trigger).await.is_ok(),
                    Some(ClipboardPush::Offer(event)) => ui_tx.send(event).await.is_ok(),
                    None => true,
                };
                if !sent {
                    tracing::error!("Failed to forward clipboard text");
                }
            });
        }) => {
            if let Err(e) = result {
                tracing::error!("Clipboard watcher error: {}", e);
            }
        }
        _ = cancel.cancelled() => {
            tracing::info!("Clipboard watcher stopping");
        }
    }

    Ok(())
}

fn spawn_hotkey_listener(
    state: Arc<AppState>,
    cancel: CancellationToken,
    trigger_tx: AsyncSender<Trigger>,
) {
    let runtime = tokio::runtime::Handle::current();

    tokio::task::spawn_blocking(move || {
        let mut manager = match HotkeyManager::new() {
            Ok(manager) => manager,
            Err(e) => {
                tracing::error!("Failed to create hotkey manager: {:#}", e);
                return;
            }
        };

        let registered = manager.register_from_config(&state.config.blocking_read().hotkeys);
        tracing::info!("{} hotkeys registered", registered);

        while !cancel.is_cancelled() {
            if state.hotkeys_dirty.swap(false, Ordering::Relaxed) {
                let registered = manager.register_from_config(&state.config.blocking_read().hotkeys);
                tracing::info!("Hotkeys re-registered: {}", registered);
            }

            if let Some(action) = manager.poll() {
                tracing::info!("Hotkey pressed: {:?}", action);
                if runtime.block_on(trigger_tx.send(hotkey_trigger(action))).is_err() {
                    tracing::error!("Trigger channel closed");
                    break;
                }
            }

            std::thread::sleep(HOTKEY_POLL);
        }

        tracing::info!("Hotkey listener stopping");
    });
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use easydict_config::Config;

    use super::*;

    fn state(monitoring: bool) -> AppState {
        let mut config = Config::default();
        config.select_translate.monitor_clipboard = monitoring;
        AppState::new(config, PathBuf::from("config.json"))
    }

    #[test]
    fn own_copies_are_not_forwarded() {
        let state = state(true);
        state.remember_clipboard_write("你好");

        assert!(!should_forward(&state, "你好"));
        // A later copy of the same text by the user is real input
        assert!(should_forward(&state, "你好"));
        assert!(should_forward(&state, "bonjour"));
    }

    #[test]
    fn other_text_keeps_the_own_copy_pending() {
        let state = state(true);
        state.remember_clipboard_write("你好");

        assert!(should_forward(&state, "bonjour"));
        assert!(!should_forward(&state, "你好"));
    }

    #[test]
    fn nothing_is_forwarded_while_monitoring_is_off() {
        let state = state(false);
        assert!(!should_forward(&state, "bonjour"));

        state.remember_clipboard_write("你好");
        assert!(!should_forward(&state, "你好"));
        assert!(!state.take_own_clipboard_write("你好"));
    }

    #[test]
    fn hotkeys_map_to_triggers() {
        assert_eq!(hotkey_trigger(HotkeyAction::InputTranslate), Trigger::FocusInput);
        assert_eq!(
            hotkey_trigger(HotkeyAction::SelectTranslate),
            Trigger::SelectTranslate {
                origin: OriginTrigger::Hotkey
            }
        );
        assert_eq!(
            hotkey_trigger(HotkeyAction::ScreenshotTranslate),
            Trigger::TriggerScreenshot
        );
    }

    #[test]
    fn clipboard_mode_decides_the_push() {
        assert_eq!(
            clipboard_push(SelectMode::Auto, "bonjour".into()),
            Some(ClipboardPush::Trigger(Trigger::ClipboardTranslate("bonjour".into())))
        );
        assert_eq!(
            clipboard_push(SelectMode::Icon, "bonjour".into()),
            Some(ClipboardPush::Offer(UiEvent::SelectionOffered("bonjour".into())))
        );
        assert_eq!(clipboard_push(SelectMode::Hotkey, "bonjour".into()), None);
    }
}
