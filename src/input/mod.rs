//! Keyboard input: key events resolve to [`Command`]s through [`KeybindingConfig`].

mod command;
mod keybindings;

pub use command::Command;
pub use keybindings::{KeyCombo, KeybindingConfig};
