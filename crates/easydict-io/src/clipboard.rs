use std::time::Duration;

use anyhow::Context;
use arboard::Clipboard;
use tokio::time;

pub fn read_text() -> anyhow::Result<String> {
    let mut clipboard = Clipboard::new().context("Clipboard error")?;
    clipboard.get_text().context("Clipboard read error")
}

pub fn write_text(text: &str) -> anyhow::Result<()> {
    let mut clipboard = Clipboard::new().context("Clipboard error")?;
    clipboard
        .set_text(text.to_string())
        .context("Clipboard write error")
}

/// Whether `current` is worth reporting given the last text seen
fn is_fresh(current: &str, last: &str) -> bool {
    !current.trim().is_empty() && current != last
}

/// Poll the clipboard and call `on_text` for every new non-blank text.
///
/// Whatever is on the clipboard at startup is treated as already seen.
pub async fn watch_clipboard<F>(poll: Duration, mut on_text: F) -> Result<(), anyhow::Error>
where
    F: FnMut(String) + Send + 'static,
{
    let mut last_text = read_text().unwrap_or_default();
    let mut interval = time::interval(poll);

    loop {
        interval.tick().await;
        if let Ok(text) = read_text()
            && is_fresh(&text, &last_text)
        {
            last_text = text.clone();
            on_text(text);
        }
    }
}
