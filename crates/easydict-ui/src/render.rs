use std::fmt::Write;

use easydict_config::Config;
use easydict_types::{CardBody, LanguageSelection, Panel, ResultCard};

pub const PLACEHOLDER: &str =
    "输入文本后按 Enter 翻译 / Alt+A 输入翻译  Alt+D 划词翻译 / Alt+S 截图翻译";

const PENDING: &str = "翻译中...";

pub fn render_panel(panel: &Panel) -> String {
    match panel {
        Panel::Placeholder => PLACEHOLDER.to_string(),
        Panel::Pending => PENDING.to_string(),
        Panel::Notice(message) => format!("  ! {message}"),
        Panel::Results(cards) => {
            let mut out = String::new();
            for (i, card) in cards.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                render_card(&mut out, i + 1, card);
            }
            out
        }
    }
}

fn render_card(out: &mut String, index: usize, card: &ResultCard) {
    let _ = writeln!(
        out,
        "{index}. [{}] {}  ({})",
        card.icon.label, card.service, card.lang_info
    );
    match &card.body {
        CardBody::Text(text) => {
            for line in text.lines() {
                let _ = writeln!(out, "   {line}");
            }
        }
        CardBody::Error(error) => {
            let _ = writeln!(out, "   ! {error}");
        }
    }
    // Drop the trailing newline, lines are joined by the caller
    out.pop();
}

pub fn render_languages(languages: &LanguageSelection) -> String {
    format!("[{} → {}]", languages.source, languages.target)
}

/// Settings page: the editable config as pretty JSON
pub fn render_settings(config: &Config) -> String {
    match serde_json::to_string_pretty(config) {
        Ok(json) => format!("设置 (:set <path> <value>, :save, :main)\n{json}"),
        Err(e) => format!("  ! {e}"),
    }
}
