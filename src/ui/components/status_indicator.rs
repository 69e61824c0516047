//! Status Indicator Component
//!
//! The connection dot and its label. A connected dot pulses by cycling
//! glyphs with the app tick; a disconnected dot is solid.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::ui::theme::{status_color, COLOR_DIM};
use crate::view_state::ConnectionStatus;

/// Pulse animation frames
const PULSE_FRAMES: [char; 4] = ['●', '◉', '○', '◉'];

/// Ticks each pulse frame stays on screen
const TICKS_PER_FRAME: u64 = 4;

const SOLID_DOT: char = '●';

pub fn status_dot(status: ConnectionStatus, tick: u64) -> char {
    if status.is_pulsing() {
        PULSE_FRAMES[((tick / TICKS_PER_FRAME) % PULSE_FRAMES.len() as u64) as usize]
    } else {
        SOLID_DOT
    }
}

/// `● Connected · Active connection established`
pub fn render_status_indicator(status: ConnectionStatus, tick: u64) -> Line<'static> {
    let color = status_color(status);
    Line::from(vec![
        Span::raw(" "),
        Span::styled(status_dot(status, tick).to_string(), Style::default().fg(color)),
        Span::raw(" "),
        Span::styled(
            status.label(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" · ", Style::default().fg(COLOR_DIM)),
        Span::styled(status.detail(), Style::default().fg(COLOR_DIM)),
    ])
}
