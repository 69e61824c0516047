//! Commands produced by key and mouse input.

/// A user intent, decoupled from the key that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Close any connection and exit (Ctrl+C)
    Quit,
    /// Connect from the URL field or send from the message input (Enter)
    Submit,
    /// Request a graceful close (Ctrl+D)
    Disconnect,
    /// Move focus to the next enabled field (Tab)
    CycleFocus,

    ScrollPageUp,
    ScrollPageDown,
    /// Scroll up by lines (mouse wheel)
    ScrollUp(u16),
    ScrollDown(u16),

    // Editing the focused field
    InsertChar(char),
    Paste(String),
    Backspace,
    Delete,
    MoveLeft,
    MoveRight,
    MoveHome,
    MoveEnd,
    ClearField,
}

impl Command {
    /// Returns true if this command edits the focused field.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Command::InsertChar(_)
                | Command::Paste(_)
                | Command::Backspace
                | Command::Delete
                | Command::MoveLeft
                | Command::MoveRight
                | Command::MoveHome
                | Command::MoveEnd
                | Command::ClearField
        )
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, Command::Quit)
    }

    /// Human-readable description for the key hint bar.
    pub fn description(&self) -> &'static str {
        match self {
            Command::Quit => "Quit",
            Command::Submit => "Connect / Send",
            Command::Disconnect => "Disconnect",
            Command::CycleFocus => "Switch field",
            Command::ScrollPageUp | Command::ScrollUp(_) => "Scroll up",
            Command::ScrollPageDown | Command::ScrollDown(_) => "Scroll down",
            Command::InsertChar(_) | Command::Paste(_) => "Type",
            Command::Backspace | Command::Delete | Command::ClearField => "Delete",
            Command::MoveLeft | Command::MoveRight | Command::MoveHome | Command::MoveEnd => {
                "Move cursor"
            }
        }
    }
}
