use std::sync::Arc;

use easydict_ocr::CaptureService;
use easydict_types::{SessionSnapshot, Trigger, UiCommand, UiEvent};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

pub mod command;
pub mod events;
pub mod render;
pub mod state;

use command::parse_line;
use events::{Outgoing, handle_event, render_view, resolve};
pub use state::UiState;

/// Where the terminal front-end sends what the user asks for
#[derive(Clone)]
pub struct UiLinks {
    pub commands: AsyncSender<UiCommand>,
    pub triggers: AsyncSender<Trigger>,
    pub capture: Arc<CaptureService>,
}

/// Terminal front-end: prints what the session renders and reads commands
/// from stdin. Returns when stdin closes or the user quits.
pub async fn ui_loop(
    ui_rx: AsyncReceiver<UiEvent>,
    mut snapshots: watch::Receiver<SessionSnapshot>,
    links: UiLinks,
    mut state: UiState,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut view = snapshots.borrow().view;

    println!("{}", render_view(&state, view));

    loop {
        tokio::select! {
            event = ui_rx.recv() => {
                let Ok(event) = event else {
                    tracing::info!("[UI] Event channel closed");
                    break;
                };
                if let Some(out) = handle_event(&mut state, event) {
                    println!("{out}");
                }
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = *snapshots.borrow_and_update();
                tracing::debug!("[UI] Session: {:?}", snapshot);
                if snapshot.view != view {
                    view = snapshot.view;
                    println!("{}", render_view(&state, view));
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::info!("[UI] Input closed");
                    break;
                };
                let input = parse_line(&line, state.selecting.is_some());
                let outgoing = resolve(&mut state, input);
                if !dispatch(outgoing, &links).await? {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Returns `false` when the user asked to quit
async fn dispatch(outgoing: Outgoing, links: &UiLinks) -> anyhow::Result<bool> {
    match outgoing {
        Outgoing::Command(command) => links.commands.send(command).await?,
        Outgoing::Trigger(trigger) => links.triggers.send(trigger).await?,
        Outgoing::Region {
            x,
            y,
            width,
            height,
        } => {
            let capture = links.capture.clone();
            tokio::spawn(async move {
                if let Err(e) = capture.recognize_region(x, y, width, height).await {
                    tracing::warn!("[UI] Region recognition failed: {:#}", e);
                }
            });
        }
        Outgoing::CancelRegion => {
            // cancel() reports back through the channel this loop drains
            let capture = links.capture.clone();
            tokio::spawn(async move {
                if let Err(e) = capture.cancel().await {
                    tracing::warn!("[UI] Cancel failed: {:#}", e);
                }
            });
        }
        Outgoing::Print(text) => println!("{text}"),
        Outgoing::Quit => return Ok(false),
        Outgoing::Nothing => {}
    }
    Ok(true)
}
