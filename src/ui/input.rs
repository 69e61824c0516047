//! Endpoint field, message input and the key hint bar.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Focus};
use crate::ui::components::{render_input_field, InputFieldConfig};
use crate::ui::theme::{COLOR_ACCENT, COLOR_DIM};
use crate::view_state::ControlState;

const URL_LABEL: &str = "WebSocket URL";
const URL_PLACEHOLDER: &str = "wss://your-api-id.execute-api.region.amazonaws.com/production";
const MESSAGE_LABEL: &str = "Message";
const MESSAGE_PLACEHOLDER: &str = "Type your message...";

pub fn render_url_field(frame: &mut Frame, area: Rect, app: &App) {
    let controls = app.controls();
    let config = InputFieldConfig::new(URL_LABEL, &app.url_input)
        .focused(app.focus == Focus::UrlField)
        .enabled(controls.url_field)
        .placeholder(URL_PLACEHOLDER);
    render_input_field(frame, area, &config);
}

pub fn render_message_input(frame: &mut Frame, area: Rect, app: &App) {
    let controls = app.controls();
    let config = InputFieldConfig::new(MESSAGE_LABEL, &app.message_input)
        .focused(app.focus == Focus::MessageInput)
        .enabled(controls.message_input)
        .placeholder(MESSAGE_PLACEHOLDER);
    render_input_field(frame, area, &config);
}

fn hint(key: &'static str, action: &'static str, enabled: bool) -> Vec<Span<'static>> {
    let (key_style, action_style) = if enabled {
        (
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
            Style::default().fg(COLOR_ACCENT),
        )
    } else {
        (Style::default().fg(COLOR_DIM), Style::default().fg(COLOR_DIM))
    };
    vec![
        Span::styled(key, key_style),
        Span::styled(format!(" {}", action), action_style),
    ]
}

/// Key hints; unavailable actions are dimmed.
pub fn build_keybind_hints(controls: &ControlState, focus: Focus) -> Line<'static> {
    let submit = match focus {
        Focus::UrlField => hint("Enter", "Connect", controls.connect),
        Focus::MessageInput => hint("Enter", "Send", controls.send),
    };
    let groups = [
        submit,
        hint("Ctrl+D", "Disconnect", controls.disconnect),
        hint("Tab", "Switch", controls.url_field || controls.message_input),
        hint("PgUp/PgDn", "Scroll", true),
        hint("Ctrl+C", "Quit", true),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, group) in groups.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ·  ", Style::default().fg(COLOR_DIM)));
        }
        spans.extend(group);
    }
    Line::from(spans)
}

pub fn render_hints(frame: &mut Frame, area: Rect, app: &App) {
    let line = build_keybind_hints(&app.controls(), app.focus);
    frame.render_widget(Paragraph::new(line), area);
}
