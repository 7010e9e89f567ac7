use std::sync::Arc;

use easydict_config::Config;
use easydict_core::BackendError;
use easydict_types::{
    ActiveView, BusyKind, CardBody, LanguageSelection, OriginTrigger, Panel, Trigger,
    TranslationResult, UiCommand, UiEvent,
};
use tokio::sync::Notify;

use super::support::{FakeBackend, Harness, Reply, settle};

fn gated(backend: FakeBackend) -> (FakeBackend, Arc<Notify>) {
    let gate = Arc::new(Notify::new());
    (
        FakeBackend {
            gate: Some(gate.clone()),
            ..backend
        },
        gate,
    )
}

#[tokio::test]
async fn manual_text_is_dispatched_once_and_rendered() {
    let mut h = Harness::start(FakeBackend::google("你好"));

    h.trigger(Trigger::Manual("hello".into())).await;

    match h.next_ui().await {
        UiEvent::InputReplaced(text) => assert_eq!(text, "hello"),
        other => panic!("expected InputReplaced, got {:?}", other),
    }
    assert_eq!(h.next_ui().await, UiEvent::Render(Panel::Pending));

    match h.next_ui().await {
        UiEvent::Render(Panel::Results(cards)) => {
            assert_eq!(cards.len(), 1);
            assert_eq!(cards[0].service, "Google");
            assert_eq!(cards[0].body, CardBody::Text("你好".into()));
            assert_eq!(cards[0].lang_info, "en → zh-CN");
        }
        other => panic!("expected result cards, got {:?}", other),
    }

    h.wait_busy(BusyKind::Idle).await;
    assert_eq!(
        h.backend.calls(),
        vec![("hello".into(), "auto".into(), "zh-CN".into())]
    );
}

#[tokio::test]
async fn clipboard_text_is_dropped_while_translating() {
    let (backend, gate) = gated(FakeBackend::google("你好"));
    let mut h = Harness::start(backend);

    h.trigger(Trigger::Manual("hello".into())).await;
    h.wait_busy(BusyKind::Translating).await;

    h.trigger(Trigger::ClipboardTranslate("bonjour".into())).await;
    settle().await;
    assert_eq!(h.backend.calls().len(), 1);

    gate.notify_one();
    match h.settled_render().await {
        Panel::Results(cards) => assert_eq!(cards[0].copy_text, "你好"),
        other => panic!("expected result cards, got {:?}", other),
    }
    h.wait_busy(BusyKind::Idle).await;

    settle().await;
    assert!(
        !h.drain_ui()
            .contains(&UiEvent::InputReplaced("bonjour".into())),
        "dropped text must not reach the input box"
    );
    assert_eq!(h.backend.calls().len(), 1);
}

#[tokio::test]
async fn capture_is_dropped_while_translating() {
    let (backend, gate) = gated(FakeBackend::google("你好"));
    let mut h = Harness::start(backend);

    h.trigger(Trigger::Manual("hello".into())).await;
    h.wait_busy(BusyKind::Translating).await;

    h.trigger(Trigger::TriggerScreenshot).await;
    settle().await;
    assert_eq!(h.backend.captures.load(std::sync::atomic::Ordering::SeqCst), 0);
    assert_eq!(h.busy(), BusyKind::Translating);

    gate.notify_one();
    h.wait_busy(BusyKind::Idle).await;
}

#[tokio::test]
async fn blank_text_never_reaches_the_dispatcher() {
    let backend = FakeBackend {
        clipboard: Ok("  \n ".into()),
        ..FakeBackend::google("你好")
    };
    let mut h = Harness::start(backend);

    h.trigger(Trigger::Manual("   ".into())).await;
    h.trigger(Trigger::ClipboardTranslate("\t".into())).await;
    h.trigger(Trigger::SelectTranslate {
        origin: OriginTrigger::Hotkey,
    })
    .await;
    settle().await;

    assert!(h.backend.calls().is_empty());
    assert_eq!(h.busy(), BusyKind::Idle);

    // The session still takes real work afterwards
    h.trigger(Trigger::Manual("hello".into())).await;
    h.settled_render().await;
    h.wait_busy(BusyKind::Idle).await;
    assert_eq!(h.backend.calls().len(), 1);
}

#[tokio::test]
async fn unreadable_clipboard_drops_select_translate() {
    let backend = FakeBackend {
        clipboard: Err(BackendError::Clipboard("locked".into())),
        ..FakeBackend::google("你好")
    };
    let h = Harness::start(backend);

    h.trigger(Trigger::SelectTranslate {
        origin: OriginTrigger::Selection,
    })
    .await;
    settle().await;

    assert!(h.backend.calls().is_empty());
    assert_eq!(h.busy(), BusyKind::Idle);
}

#[tokio::test]
async fn select_translate_uses_clipboard_text() {
    let backend = FakeBackend {
        clipboard: Ok(" selected words ".into()),
        ..FakeBackend::google("选中的词")
    };
    let mut h = Harness::start(backend);

    h.trigger(Trigger::SelectTranslate {
        origin: OriginTrigger::Hotkey,
    })
    .await;
    h.settled_render().await;
    h.wait_busy(BusyKind::Idle).await;

    assert_eq!(
        h.backend.calls(),
        vec![("selected words".into(), "auto".into(), "zh-CN".into())]
    );
}

#[tokio::test]
async fn backend_error_renders_notice_and_releases() {
    let backend = FakeBackend::google("unused")
        .with_reply(Reply::Fail(BackendError::Translate("network down".into())));
    let mut h = Harness::start(backend);

    h.trigger(Trigger::Manual("hello".into())).await;

    assert_eq!(
        h.settled_render().await,
        Panel::Notice("翻译出错: network down".into())
    );
    h.wait_busy(BusyKind::Idle).await;
}

#[tokio::test]
async fn backend_panic_still_releases_the_session() {
    let backend = FakeBackend::google("unused").with_reply(Reply::Panic);
    let mut h = Harness::start(backend);

    h.trigger(Trigger::Manual("hello".into())).await;

    match h.settled_render().await {
        Panel::Notice(message) => assert!(
            message.starts_with("翻译出错: Task error:"),
            "unexpected notice: {}",
            message
        ),
        other => panic!("expected notice, got {:?}", other),
    }
    h.wait_busy(BusyKind::Idle).await;
}

#[tokio::test]
async fn hung_backend_times_out() {
    let mut config = Config::default();
    config.timeout_seconds = 1;
    let backend = FakeBackend::google("unused").with_reply(Reply::Hang);
    let mut h = Harness::start_with(config, |_| backend);

    h.trigger(Trigger::Manual("hello".into())).await;

    assert_eq!(
        h.settled_render().await,
        Panel::Notice("翻译出错: Request timed out after 1 s".into())
    );
    h.wait_busy(BusyKind::Idle).await;
}

#[tokio::test]
async fn empty_service_pool_renders_no_results() {
    let mut h = Harness::start(FakeBackend::replying(Vec::new()));

    h.trigger(Trigger::Manual("hello".into())).await;

    assert_eq!(h.settled_render().await, Panel::Notice("没有翻译结果".into()));
    h.wait_busy(BusyKind::Idle).await;
}

#[tokio::test]
async fn partial_failures_render_per_service() {
    let backend = FakeBackend::replying(vec![
        TranslationResult::success("Google", "你好", "en", "zh-CN"),
        TranslationResult::failure("DeepL", "DeepL API key not configured", "auto", "zh-CN"),
    ]);
    let h = Harness::start(backend);

    h.trigger(Trigger::Manual("hello".into())).await;

    match h.settled_render().await {
        Panel::Results(cards) => {
            assert_eq!(cards.len(), 2);
            assert_eq!(
                cards[1].body,
                CardBody::Error("DeepL API key not configured".into())
            );
        }
        other => panic!("expected result cards, got {:?}", other),
    }
}

#[tokio::test]
async fn clipboard_trigger_forces_main_view() {
    let (backend, gate) = gated(FakeBackend::google("你好"));
    let mut h = Harness::start(backend);

    h.trigger(Trigger::Manual("hello".into())).await;
    h.wait_busy(BusyKind::Translating).await;

    h.command(UiCommand::ShowSettings).await;
    h.wait_until(|s| s.view == ActiveView::Settings).await;

    // Dropped as a request, still brings the main panel back
    h.trigger(Trigger::ClipboardTranslate("bonjour".into())).await;
    h.wait_until(|s| s.view == ActiveView::Main).await;
    assert_eq!(h.busy(), BusyKind::Translating);

    gate.notify_one();
    h.wait_busy(BusyKind::Idle).await;
    assert_eq!(h.backend.calls().len(), 1);
}

async fn open_settings(h: &mut Harness) {
    h.command(UiCommand::ShowSettings).await;
    h.wait_until(|s| s.view == ActiveView::Settings).await;
}

#[tokio::test]
async fn select_translate_forces_main_view() {
    let backend = FakeBackend {
        clipboard: Ok("hello".into()),
        ..FakeBackend::google("你好")
    };
    let mut h = Harness::start(backend);
    open_settings(&mut h).await;

    h.trigger(Trigger::SelectTranslate {
        origin: OriginTrigger::Selection,
    })
    .await;

    assert!(matches!(h.settled_render().await, Panel::Results(_)));
    assert_eq!(h.snapshots.borrow().view, ActiveView::Main);
    h.wait_busy(BusyKind::Idle).await;
}

#[tokio::test]
async fn dropped_select_translate_still_forces_main_view() {
    let backend = FakeBackend {
        clipboard: Err(BackendError::Clipboard("locked".into())),
        ..FakeBackend::google("unused")
    };
    let mut h = Harness::start(backend);
    open_settings(&mut h).await;

    h.trigger(Trigger::SelectTranslate {
        origin: OriginTrigger::Hotkey,
    })
    .await;

    h.wait_until(|s| s.view == ActiveView::Main).await;
    assert!(h.backend.calls().is_empty());
}

#[tokio::test]
async fn ocr_result_forces_main_view() {
    let mut h = Harness::start(FakeBackend::google("你好"));

    h.trigger(Trigger::TriggerScreenshot).await;
    h.wait_busy(BusyKind::Capturing).await;
    open_settings(&mut h).await;

    h.trigger(Trigger::OcrResult("hello".into())).await;

    assert_eq!(h.next_ui().await, UiEvent::InputReplaced("hello".into()));
    assert_eq!(h.snapshots.borrow().view, ActiveView::Main);
    assert!(matches!(h.settled_render().await, Panel::Results(_)));
    assert_eq!(h.snapshots.borrow().view, ActiveView::Main);
}

#[tokio::test]
async fn blank_ocr_result_forces_main_view() {
    let mut h = Harness::start(FakeBackend::google("unused"));

    h.trigger(Trigger::TriggerScreenshot).await;
    h.wait_busy(BusyKind::Capturing).await;
    open_settings(&mut h).await;

    h.trigger(Trigger::OcrResult(" ".into())).await;

    assert_eq!(h.next_render().await, Panel::Notice("未识别到文字".into()));
    assert_eq!(h.snapshots.borrow().view, ActiveView::Main);
}

#[tokio::test]
async fn ocr_error_forces_main_view() {
    let mut h = Harness::start(FakeBackend::google("unused"));

    h.trigger(Trigger::TriggerScreenshot).await;
    h.wait_busy(BusyKind::Capturing).await;
    open_settings(&mut h).await;

    h.trigger(Trigger::OcrError("permission denied".into())).await;

    assert_eq!(
        h.next_render().await,
        Panel::Notice("截图失败: permission denied".into())
    );
    assert_eq!(h.snapshots.borrow().view, ActiveView::Main);
    h.wait_busy(BusyKind::Idle).await;
}

#[tokio::test]
async fn focus_input_clears_and_focuses() {
    let mut h = Harness::start(FakeBackend::google("你好"));

    h.command(UiCommand::ShowSettings).await;
    h.wait_until(|s| s.view == ActiveView::Settings).await;

    h.trigger(Trigger::FocusInput).await;

    assert_eq!(h.next_ui().await, UiEvent::InputReplaced(String::new()));
    assert_eq!(h.next_ui().await, UiEvent::Render(Panel::Placeholder));
    assert_eq!(h.next_ui().await, UiEvent::FocusWindow);
    assert_eq!(h.snapshots.borrow().view, ActiveView::Main);
}

#[tokio::test]
async fn view_switches_are_idempotent() {
    let mut h = Harness::start(FakeBackend::google("你好"));

    h.command(UiCommand::ShowSettings).await;
    h.command(UiCommand::ShowSettings).await;
    h.wait_until(|s| s.view == ActiveView::Settings).await;

    h.command(UiCommand::ShowMain).await;
    h.command(UiCommand::ShowMain).await;
    h.wait_until(|s| s.view == ActiveView::Main).await;

    settle().await;
    assert!(h.drain_ui().is_empty());
}

#[tokio::test]
async fn swap_is_ignored_for_auto_source() {
    let h = Harness::start(FakeBackend::google("你好"));

    h.command(UiCommand::SwapLanguages).await;
    settle().await;
    assert!(h.drain_ui().is_empty());
}

#[tokio::test]
async fn language_changes_apply_to_later_requests() {
    let mut h = Harness::start(FakeBackend::google("こんにちは"));

    h.command(UiCommand::SetLanguages(LanguageSelection::new("en", "ja")))
        .await;
    assert_eq!(
        h.next_ui().await,
        UiEvent::LanguagesChanged(LanguageSelection::new("en", "ja"))
    );

    h.command(UiCommand::SwapLanguages).await;
    assert_eq!(
        h.next_ui().await,
        UiEvent::LanguagesChanged(LanguageSelection::new("ja", "en"))
    );

    h.trigger(Trigger::Manual("hello".into())).await;
    h.settled_render().await;
    h.wait_busy(BusyKind::Idle).await;

    assert_eq!(
        h.backend.calls(),
        vec![("hello".into(), "ja".into(), "en".into())]
    );
}

#[tokio::test]
async fn clear_and_pin_commands() {
    let h = Harness::start(FakeBackend::google("你好"));

    h.command(UiCommand::Clear).await;
    assert_eq!(h.next_ui().await, UiEvent::InputReplaced(String::new()));
    assert_eq!(h.next_ui().await, UiEvent::Render(Panel::Placeholder));

    h.command(UiCommand::TogglePin).await;
    assert_eq!(h.next_ui().await, UiEvent::SetAlwaysOnTop(true));
    h.command(UiCommand::TogglePin).await;
    assert_eq!(h.next_ui().await, UiEvent::SetAlwaysOnTop(false));
}

#[tokio::test]
async fn copy_and_speak_report_through_toasts() {
    let backend = FakeBackend {
        speech: Err(BackendError::Speech("no voice installed".into())),
        ..FakeBackend::google("你好")
    };
    let h = Harness::start(backend);

    h.command(UiCommand::Copy("你好".into())).await;
    assert_eq!(h.next_ui().await, UiEvent::Toast("已复制".into()));
    assert_eq!(*h.backend.copies.lock().unwrap(), vec!["你好".to_string()]);

    h.command(UiCommand::Speak("你好".into())).await;
    assert_eq!(
        h.next_ui().await,
        UiEvent::Toast("TTS error: no voice installed".into())
    );
}
