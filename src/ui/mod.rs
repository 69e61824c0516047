//! UI rendering for the chat screen.
//!
//! Everything here is drawn from [`App`] state; the only thing written back
//! is the message scroll range measured during the frame.

mod components;
mod input;
mod layout;
mod messages;
mod theme;

pub use layout::ChatLayout;
pub use messages::{build_message_lines, wrap_text};
pub use theme::{sender_color, severity_color, status_color, SENDER_PALETTE};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::cli::VERSION;
use components::render_status_indicator;
use input::{render_hints, render_message_input, render_url_field};
use messages::render_messages;
use theme::{COLOR_DIM, COLOR_HEADER};

const TITLE: &str = "💬 WebSocket Chat";

fn render_title(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {}", TITLE),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  v{}", VERSION), Style::default().fg(COLOR_DIM)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = render_status_indicator(app.status(), app.tick_count);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the whole chat screen.
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = ChatLayout::new(frame.area());

    render_title(frame, layout.title);
    render_status(frame, layout.status, app);
    render_url_field(frame, layout.url_field, app);
    render_messages(frame, layout.messages, app);
    render_message_input(frame, layout.message_input, app);
    render_hints(frame, layout.hints, app);
}
