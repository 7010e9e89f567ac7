pub mod clipboard;
pub mod hotkey;
pub mod speech;

pub use hotkey::{HotkeyAction, HotkeyManager};
