use easydict_config::Config;
use serde::{Deserialize, Serialize};

use crate::panel::Panel;

/// Where a translation request came from. Bookkeeping only, dispatch ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OriginTrigger {
    Manual,
    Hotkey,
    Selection,
    ClipboardMonitor,
    Ocr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSelection {
    pub source: String,
    pub target: String,
}

impl LanguageSelection {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Swap source and target, unless the source is `auto`
    pub fn swapped(&self) -> Option<Self> {
        if self.source == "auto" {
            return None;
        }
        Some(Self {
            source: self.target.clone(),
            target: self.source.clone(),
        })
    }
}

/// Immutable translation intent. Can only be built from non-blank text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    text: String,
    source: String,
    target: String,
    origin: OriginTrigger,
}

impl TranslationRequest {
    /// Returns `None` when `text` is empty or whitespace only
    pub fn new(text: &str, languages: &LanguageSelection, origin: OriginTrigger) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            text: text.to_string(),
            source: languages.source.clone(),
            target: languages.target.clone(),
            origin,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn origin(&self) -> OriginTrigger {
        self.origin
    }
}

/// Intent to start a screen capture. The recognised text arrives later as a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OcrRequest;

/// One entry per backend service attempted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub service: String,
    pub translated: Option<String>,
    pub source_lang: String,
    pub target_lang: String,
    pub error: Option<String>,
}

impl TranslationResult {
    pub fn success(
        service: impl Into<String>,
        translated: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            translated: Some(translated.into()),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            error: None,
        }
    }

    pub fn failure(
        service: impl Into<String>,
        error: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            translated: None,
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BusyKind {
    #[default]
    Idle,
    Translating,
    Capturing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActiveView {
    #[default]
    Main,
    Settings,
}

/// Read-only copy of the session state handed to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub busy: BusyKind,
    pub view: ActiveView,
}

/// Inbound signals, one variant per external channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Text submitted from the input box
    Manual(String),
    /// `focus-input`: bring the window forward with a cleared input
    FocusInput,
    /// `select-translate`: read the clipboard and translate it
    SelectTranslate { origin: OriginTrigger },
    /// `trigger-screenshot`
    TriggerScreenshot,
    /// `ocr-result`, possibly blank
    OcrResult(String),
    /// `ocr-error`
    OcrError(String),
    /// Region selection was dismissed without recognising anything
    OcrCancelled,
    /// `clipboard-translate`, pushed by the clipboard monitor
    ClipboardTranslate(String),
}

/// Actions issued by the front-end that do not start a translation
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    ShowMain,
    ShowSettings,
    SetLanguages(LanguageSelection),
    SwapLanguages,
    Clear,
    TogglePin,
    Copy(String),
    Speak(String),
    SaveSettings(Box<Config>),
}

/// Everything the front-end is asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Render(Panel),
    InputReplaced(String),
    LanguagesChanged(LanguageSelection),
    FocusWindow,
    HideWindow,
    SetAlwaysOnTop(bool),
    Toast(String),
    /// Clipboard text is available, accepting it fires `select-translate`
    SelectionOffered(String),
    /// A frame was captured, ask the user for a region
    SelectRegion { width: u32, height: u32 },
    ConfigApplied(Box<Config>),
}
