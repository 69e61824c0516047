//! Color theme constants.

use ratatui::style::Color;

use crate::models::Severity;
use crate::view_state::{ConnectionStatus, PALETTE_SIZE};

// ============================================================================
// Chrome
// ============================================================================

/// Borders of idle fields and panels
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Focused field border and title text
pub const COLOR_ACCENT: Color = Color::White;

/// Title bar text
pub const COLOR_HEADER: Color = Color::Rgb(102, 126, 234); // #667eea

/// Dim text: timestamps, placeholders, disabled controls
pub const COLOR_DIM: Color = Color::DarkGray;

/// Background for input areas
pub const COLOR_INPUT_BG: Color = Color::Rgb(20, 20, 30);

// ============================================================================
// Connection Status
// ============================================================================

pub const COLOR_CONNECTED: Color = Color::Rgb(4, 181, 117); // green #04B575

pub const COLOR_DISCONNECTED: Color = Color::Rgb(239, 68, 68); // red #EF4444

pub fn status_color(status: ConnectionStatus) -> Color {
    match status {
        ConnectionStatus::Connected => COLOR_CONNECTED,
        ConnectionStatus::Disconnected => COLOR_DISCONNECTED,
    }
}

// ============================================================================
// Notices
// ============================================================================

pub const COLOR_INFO: Color = Color::Rgb(59, 130, 246); // blue #3B82F6

pub const COLOR_ERROR: Color = Color::Rgb(239, 68, 68);

pub const COLOR_WARNING: Color = Color::Rgb(245, 158, 11); // amber #F59E0B

pub const COLOR_SUCCESS: Color = Color::Rgb(4, 181, 117);

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => COLOR_INFO,
        Severity::Error => COLOR_ERROR,
        Severity::Warning => COLOR_WARNING,
        Severity::Success => COLOR_SUCCESS,
    }
}

// ============================================================================
// Sender Palette
// ============================================================================

/// Accent color per sender, indexed by the sender's palette index.
pub const SENDER_PALETTE: [Color; PALETTE_SIZE] = [
    Color::Rgb(102, 126, 234), // indigo #667eea
    Color::Rgb(240, 147, 251), // pink #f093fb
    Color::Rgb(79, 172, 254),  // sky #4facfe
    Color::Rgb(67, 233, 123),  // green #43e97b
    Color::Rgb(250, 112, 154), // rose #fa709a
    Color::Rgb(48, 207, 208),  // teal #30cfd0
];

/// Text drawn on top of an avatar badge
pub const COLOR_AVATAR_TEXT: Color = Color::Black;

pub fn sender_color(palette_index: usize) -> Color {
    SENDER_PALETTE[palette_index % PALETTE_SIZE]
}
