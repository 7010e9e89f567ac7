use easydict_types::{CardBody, Panel, ResultCard, ServiceIcon, TranslationResult};

pub const NO_RESULTS: &str = "没有翻译结果";
pub const NOT_RECOGNIZED: &str = "未识别到文字";
pub const COPIED: &str = "已复制";
pub const SETTINGS_SAVED: &str = "设置已保存";

pub fn translate_failed(message: &str) -> String {
    format!("翻译出错: {message}")
}

pub fn capture_failed(message: &str) -> String {
    format!("截图失败: {message}")
}

pub fn save_failed(message: &str) -> String {
    format!("保存失败: {message}")
}

/// Build the results panel for one completed request.
///
/// An entry with an empty service name is a failure of the whole request
/// and renders as a single error card.
pub fn render_results(results: &[TranslationResult]) -> Panel {
    match results {
        [] => Panel::Notice(NO_RESULTS.to_string()),
        [only] if only.service.is_empty() => {
            Panel::Notice(translate_failed(only.error.as_deref().unwrap_or_default()))
        }
        results => Panel::Results(results.iter().map(result_card).collect()),
    }
}

fn result_card(result: &TranslationResult) -> ResultCard {
    let body = match (&result.error, &result.translated) {
        (Some(error), _) => CardBody::Error(error.clone()),
        (None, Some(text)) => CardBody::Text(text.clone()),
        (None, None) => CardBody::Text(String::new()),
    };

    ResultCard {
        service: result.service.clone(),
        icon: service_icon(&result.service),
        body,
        lang_info: format!("{} → {}", result.source_lang, result.target_lang),
        copy_text: result.translated.clone().unwrap_or_default(),
        speak_text: result.translated.clone().filter(|t| !t.trim().is_empty()),
    }
}

pub fn service_icon(service: &str) -> ServiceIcon {
    let s = service.to_lowercase();
    let (class, label) = if s.contains("google") {
        ("google", "G")
    } else if s.contains("bing") {
        ("bing", "B")
    } else if s.contains("deepl") {
        ("deepl", "D")
    } else if s.contains("baidu") || s.contains("百度") {
        ("baidu", "百")
    } else if s.contains("ai") {
        ("ai", "AI")
    } else {
        ("google", "?")
    };
    ServiceIcon { class, label }
}
