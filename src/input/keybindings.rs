//! Default keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use super::command::Command;

/// A key code plus modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }
}

impl From<KeyEvent> for KeyCombo {
    fn from(key: KeyEvent) -> Self {
        Self::new(key.code, key.modifiers)
    }
}

/// Maps key combinations to commands.
#[derive(Debug, Clone)]
pub struct KeybindingConfig {
    bindings: HashMap<KeyCombo, Command>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingConfig {
    pub fn new() -> Self {
        let mut bindings = HashMap::new();

        bindings.insert(KeyCombo::ctrl(KeyCode::Char('c')), Command::Quit);
        bindings.insert(KeyCombo::ctrl(KeyCode::Char('d')), Command::Disconnect);
        bindings.insert(KeyCombo::ctrl(KeyCode::Char('u')), Command::ClearField);
        bindings.insert(KeyCombo::plain(KeyCode::Enter), Command::Submit);
        bindings.insert(KeyCombo::plain(KeyCode::Tab), Command::CycleFocus);
        bindings.insert(
            KeyCombo::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            Command::CycleFocus,
        );
        bindings.insert(KeyCombo::plain(KeyCode::PageUp), Command::ScrollPageUp);
        bindings.insert(KeyCombo::plain(KeyCode::PageDown), Command::ScrollPageDown);
        bindings.insert(KeyCombo::plain(KeyCode::Backspace), Command::Backspace);
        bindings.insert(KeyCombo::plain(KeyCode::Delete), Command::Delete);
        bindings.insert(KeyCombo::plain(KeyCode::Left), Command::MoveLeft);
        bindings.insert(KeyCombo::plain(KeyCode::Right), Command::MoveRight);
        bindings.insert(KeyCombo::plain(KeyCode::Home), Command::MoveHome);
        bindings.insert(KeyCombo::plain(KeyCode::End), Command::MoveEnd);

        Self { bindings }
    }

    /// Resolve a key press. Printable characters without Ctrl/Alt insert themselves.
    pub fn dispatch(&self, key: KeyEvent) -> Option<Command> {
        if let Some(command) = self.bindings.get(&KeyCombo::from(key)) {
            return Some(command.clone());
        }
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(Command::InsertChar(c))
            }
            _ => None,
        }
    }
}
