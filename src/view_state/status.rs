//! Connection indicator and control enablement, derived from the session lifecycle.

use crate::session::Lifecycle;

/// What the status indicator shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    Connected,
    #[default]
    Disconnected,
}

impl ConnectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Disconnected => "Disconnected",
        }
    }

    pub fn detail(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "Active connection established",
            ConnectionStatus::Disconnected => "Connection closed",
        }
    }

    /// The indicator dot pulses while connected.
    pub fn is_pulsing(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }
}

impl From<Lifecycle> for ConnectionStatus {
    // Closing still reads as connected until the close callback lands
    fn from(lifecycle: Lifecycle) -> Self {
        match lifecycle {
            Lifecycle::Open | Lifecycle::Closing => ConnectionStatus::Connected,
            Lifecycle::Idle | Lifecycle::Connecting => ConnectionStatus::Disconnected,
        }
    }
}

/// Which controls accept interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub url_field: bool,
    pub connect: bool,
    pub disconnect: bool,
    pub message_input: bool,
    pub send: bool,
}

impl ControlState {
    pub fn for_lifecycle(lifecycle: Lifecycle) -> Self {
        match lifecycle {
            Lifecycle::Idle => Self {
                url_field: true,
                connect: true,
                disconnect: false,
                message_input: false,
                send: false,
            },
            Lifecycle::Connecting => Self {
                url_field: false,
                connect: false,
                disconnect: true,
                message_input: false,
                send: false,
            },
            Lifecycle::Open => Self {
                url_field: false,
                connect: false,
                disconnect: true,
                message_input: true,
                send: true,
            },
            Lifecycle::Closing => Self {
                url_field: false,
                connect: false,
                disconnect: false,
                message_input: false,
                send: false,
            },
        }
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::for_lifecycle(Lifecycle::Idle)
    }
}
