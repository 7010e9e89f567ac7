use easydict_types::{ActiveView, LanguageSelection, OriginTrigger, Trigger, UiCommand, UiEvent};

use crate::command::Input;
use crate::render::{render_languages, render_panel, render_settings};
use crate::state::UiState;

/// What a resolved input line asks the rest of the application to do
#[derive(Debug, Clone, PartialEq)]
pub enum Outgoing {
    Command(UiCommand),
    Trigger(Trigger),
    Region { x: u32, y: u32, width: u32, height: u32 },
    CancelRegion,
    Print(String),
    Quit,
    Nothing,
}

/// Apply a session event to the UI state, returning what to print
pub fn handle_event(state: &mut UiState, event: UiEvent) -> Option<String> {
    match event {
        UiEvent::Render(panel) => {
            let out = render_panel(&panel);
            state.panel = panel;
            Some(out)
        }
        UiEvent::InputReplaced(text) => {
            state.input = text;
            (!state.input.is_empty()).then(|| format!("> {}", state.input))
        }
        UiEvent::LanguagesChanged(languages) => {
            let out = render_languages(&languages);
            state.languages = languages;
            Some(out)
        }
        UiEvent::FocusWindow => {
            state.visible = true;
            tracing::debug!("[UI] Window shown");
            None
        }
        UiEvent::HideWindow => {
            state.visible = false;
            tracing::debug!("[UI] Window hidden");
            None
        }
        UiEvent::SetAlwaysOnTop(pinned) => {
            state.pinned = pinned;
            Some(if pinned { "[pinned]" } else { "[unpinned]" }.to_string())
        }
        UiEvent::Toast(message) => Some(format!("* {message}")),
        UiEvent::SelectionOffered(text) => {
            let preview: String = text.chars().take(40).collect();
            state.offer = Some(text);
            Some(format!("[划词] {preview}  (:accept)"))
        }
        UiEvent::SelectRegion { width, height } => {
            state.selecting = Some((width, height));
            Some(format!(
                "Select a region of the {width}x{height} screenshot as `x y w h`, or `cancel`"
            ))
        }
        UiEvent::ConfigApplied(config) => {
            state.config = *config;
            state.draft = state.config.clone();
            None
        }
    }
}

/// Text shown when the visible panel switches
pub fn render_view(state: &UiState, view: ActiveView) -> String {
    match view {
        ActiveView::Main => format!(
            "{}\n{}",
            render_languages(&state.languages),
            render_panel(&state.panel)
        ),
        ActiveView::Settings => render_settings(&state.draft),
    }
}

/// Turn a parsed input line into an outgoing action
pub fn resolve(state: &mut UiState, input: Input) -> Outgoing {
    match input {
        Input::Text(text) => {
            state.input = text.clone();
            Outgoing::Trigger(Trigger::Manual(text))
        }
        Input::Focus => Outgoing::Trigger(Trigger::FocusInput),
        Input::SelectTranslate => Outgoing::Trigger(Trigger::SelectTranslate {
            origin: OriginTrigger::Hotkey,
        }),
        Input::AcceptOffer => match state.offer.take() {
            Some(_) => Outgoing::Trigger(Trigger::SelectTranslate {
                origin: OriginTrigger::Selection,
            }),
            None => Outgoing::Print("Nothing to accept".to_string()),
        },
        Input::Screenshot => Outgoing::Trigger(Trigger::TriggerScreenshot),
        Input::Region {
            x,
            y,
            width,
            height,
        } => {
            state.selecting = None;
            Outgoing::Region {
                x,
                y,
                width,
                height,
            }
        }
        Input::CancelRegion => {
            state.selecting = None;
            Outgoing::CancelRegion
        }
        Input::Main => Outgoing::Command(UiCommand::ShowMain),
        Input::Settings => {
            state.draft = state.config.clone();
            Outgoing::Command(UiCommand::ShowSettings)
        }
        Input::Swap => Outgoing::Command(UiCommand::SwapLanguages),
        Input::Clear => Outgoing::Command(UiCommand::Clear),
        Input::Pin => Outgoing::Command(UiCommand::TogglePin),
        Input::Languages { source, target } => {
            Outgoing::Command(UiCommand::SetLanguages(LanguageSelection::new(source, target)))
        }
        Input::Copy(index) => match state.copy_text(index) {
            Some(text) => Outgoing::Command(UiCommand::Copy(text)),
            None => Outgoing::Print(format!("No result #{index}")),
        },
        Input::Speak(None) if state.input.trim().is_empty() => {
            Outgoing::Print("Nothing to speak".to_string())
        }
        Input::Speak(None) => Outgoing::Command(UiCommand::Speak(state.input.clone())),
        Input::Speak(Some(index)) => match state.speak_text(index) {
            Some(text) => Outgoing::Command(UiCommand::Speak(text)),
            None => Outgoing::Print(format!("No result #{index}")),
        },
        Input::Set { path, value } => match state.set_draft(&path, &value) {
            Ok(()) => Outgoing::Print(format!("{path} = {value}")),
            Err(e) => Outgoing::Print(format!("  ! {e:#}")),
        },
        Input::Save => Outgoing::Command(UiCommand::SaveSettings(Box::new(state.draft.clone()))),
        Input::Quit => Outgoing::Quit,
        Input::Empty => Outgoing::Nothing,
        Input::Invalid(line) => Outgoing::Print(format!("Unknown command: {line}")),
    }
}
