use easydict_config::Config;
use easydict_types::{SessionSnapshot, UiEvent};
use easydict_ui::{UiLinks, UiState};
use kanal::AsyncReceiver;
use tokio::sync::watch;

pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<UiEvent>,
    snapshots: watch::Receiver<SessionSnapshot>,
    links: UiLinks,
    config: Config,
) -> anyhow::Result<()> {
    easydict_ui::ui_loop(app_to_ui_rx, snapshots, links, UiState::new(config)).await
}
