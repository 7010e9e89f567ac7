use anyhow::{Context, Result, bail};
use easydict_config::Config;
use easydict_types::{LanguageSelection, Panel};

/// Front-end state, mirrored from the events the session sends
pub struct UiState {
    pub input: String,
    pub languages: LanguageSelection,
    pub panel: Panel,
    pub pinned: bool,
    pub visible: bool,
    /// Frame size while the region selector is open
    pub selecting: Option<(u32, u32)>,
    /// Clipboard text offered by the floating icon
    pub offer: Option<String>,
    /// Settings as last applied
    pub config: Config,
    /// Settings being edited on the settings page
    pub draft: Config,
}

impl UiState {
    pub fn new(config: Config) -> Self {
        Self {
            input: String::new(),
            languages: LanguageSelection::new(
                config.general.source_lang.clone(),
                config.general.target_lang.clone(),
            ),
            panel: Panel::Placeholder,
            pinned: config.general.always_on_top,
            visible: true,
            selecting: None,
            offer: None,
            draft: config.clone(),
            config,
        }
    }

    /// Clipboard text of the n-th result card (1-based)
    pub fn copy_text(&self, index: usize) -> Option<String> {
        match &self.panel {
            Panel::Results(cards) => cards.get(index.checked_sub(1)?).map(|c| c.copy_text.clone()),
            _ => None,
        }
    }

    /// Speakable text of the n-th result card (1-based)
    pub fn speak_text(&self, index: usize) -> Option<String> {
        match &self.panel {
            Panel::Results(cards) => cards.get(index.checked_sub(1)?)?.speak_text.clone(),
            _ => None,
        }
    }

    /// Set one field of the draft by dotted path, e.g. `general.target_lang ja`.
    ///
    /// The value is read as JSON when it parses, otherwise as a plain string.
    pub fn set_draft(&mut self, path: &str, value: &str) -> Result<()> {
        let mut root = serde_json::to_value(&self.draft).context("Failed to serialize settings")?;

        let mut slot = &mut root;
        for key in path.split('.') {
            slot = match slot.get_mut(key) {
                Some(next) => next,
                None => bail!("Unknown setting '{path}'"),
            };
        }
        if slot.is_object() {
            bail!("'{path}' is a section, not a setting");
        }

        *slot = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

        self.draft = serde_json::from_value(root)
            .with_context(|| format!("Invalid value for '{path}': {value}"))?;
        Ok(())
    }
}
