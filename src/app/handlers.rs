//! Terminal input handling for [`App`].

use crossterm::event::{KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

use super::{App, Focus};
use crate::domain::TextField;
use crate::input::Command;

/// Lines moved per mouse wheel notch.
const WHEEL_SCROLL_LINES: u16 = 3;

impl App {
    /// Resolve and run a key press. Releases and repeats of other kinds are ignored.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if let Some(command) = self.keybindings.dispatch(key) {
            self.execute_command(command);
        }
    }

    pub fn handle_paste(&mut self, text: String) {
        self.execute_command(Command::Paste(text));
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.execute_command(Command::ScrollUp(WHEEL_SCROLL_LINES)),
            MouseEventKind::ScrollDown => {
                self.execute_command(Command::ScrollDown(WHEEL_SCROLL_LINES))
            }
            _ => {}
        }
    }

    pub fn execute_command(&mut self, command: Command) {
        let controls = self.controls();

        match command {
            Command::Quit => self.quit(),
            Command::Submit => match self.focus {
                Focus::UrlField if controls.connect => {
                    let url = self.url_input.text().to_string();
                    let _ = self.session.connect(&url);
                }
                Focus::MessageInput if controls.send => {
                    let text = self.message_input.text().to_string();
                    if self.session.send_message(&text).is_ok() {
                        self.message_input.clear();
                    }
                }
                _ => {}
            },
            Command::Disconnect => {
                if controls.disconnect {
                    self.session.disconnect();
                }
            }
            Command::CycleFocus => {
                let next = match self.focus {
                    Focus::UrlField => Focus::MessageInput,
                    Focus::MessageInput => Focus::UrlField,
                };
                let enabled = match next {
                    Focus::UrlField => controls.url_field,
                    Focus::MessageInput => controls.message_input,
                };
                if enabled {
                    self.focus = next;
                }
            }
            Command::ScrollPageUp => self.messages.scroll.scroll_up(self.page_size()),
            Command::ScrollPageDown => self.messages.scroll.scroll_down(self.page_size()),
            Command::ScrollUp(lines) => self.messages.scroll.scroll_up(lines),
            Command::ScrollDown(lines) => self.messages.scroll.scroll_down(lines),
            edit => {
                if let Some(field) = self.focused_field_mut() {
                    apply_edit(field, edit);
                }
            }
        }

        self.sync_updates();
        self.mark_dirty();
    }

    /// The focused field, if the current lifecycle lets it be edited.
    fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        let controls = self.controls();
        match self.focus {
            Focus::UrlField if controls.url_field => Some(&mut self.url_input),
            Focus::MessageInput if controls.message_input => Some(&mut self.message_input),
            _ => None,
        }
    }

    fn page_size(&self) -> u16 {
        self.viewport_height.saturating_sub(1).max(1)
    }
}

fn apply_edit(field: &mut TextField, command: Command) {
    match command {
        Command::InsertChar(c) => field.insert_char(c),
        Command::Paste(text) => field.insert_str(&text),
        Command::Backspace => field.backspace(),
        Command::Delete => field.delete(),
        Command::MoveLeft => field.move_left(),
        Command::MoveRight => field.move_right(),
        Command::MoveHome => field.move_home(),
        Command::MoveEnd => field.move_end(),
        Command::ClearField => field.clear(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    use crate::app::tests::create_test_app;
    use crate::session::Lifecycle;
    use crate::traits::{SessionSignal, TransportEvent};
    use crate::view_state::Entry;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_enter_in_url_field_connects() {
        let (mut app, connector) = create_test_app();
        app.url_input.clear();
        type_text(&mut app, "ws://localhost:9999");
        press(&mut app, KeyCode::Enter);

        assert_eq!(connector.open_count(), 1);
        assert_eq!(app.lifecycle, Lifecycle::Connecting);
        assert!(!app.controls().connect);
    }

    #[test]
    fn test_invalid_url_shows_error_notice() {
        let (mut app, connector) = create_test_app();
        app.url_input.clear();
        type_text(&mut app, "http://nope");
        press(&mut app, KeyCode::Enter);

        assert_eq!(connector.open_count(), 0);
        assert!(matches!(
            app.messages.entries(),
            [Entry::Notice(n)] if n.text == "WebSocket URL must start with wss:// or ws://"
        ));
    }

    #[tokio::test]
    async fn test_send_clears_input_on_success() {
        let (mut app, connector) = create_test_app();
        press(&mut app, KeyCode::Enter);
        let id = app.session.connection_id().unwrap();
        app.handle_signal(SessionSignal::Transport {
            id,
            event: TransportEvent::Opened,
        });
        assert_eq!(app.focus, Focus::MessageInput);

        type_text(&mut app, "hello");
        press(&mut app, KeyCode::Enter);

        let conn = connector.last_connection().unwrap();
        assert_eq!(
            conn.sent_frames(),
            vec![r#"{"action":"sendmessage","message":"hello"}"#.to_string()]
        );
        assert!(app.message_input.is_empty());
    }

    #[tokio::test]
    async fn test_failed_send_keeps_input() {
        let (mut app, connector) = create_test_app();
        press(&mut app, KeyCode::Enter);
        let id = app.session.connection_id().unwrap();
        app.handle_signal(SessionSignal::Transport {
            id,
            event: TransportEvent::Opened,
        });
        connector.last_connection().unwrap().set_send_should_fail(true);

        type_text(&mut app, "hello");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.message_input.text(), "hello");
    }

    #[test]
    fn test_typing_ignored_while_connecting() {
        let (mut app, _) = create_test_app();
        press(&mut app, KeyCode::Enter);
        let before = app.url_input.text().to_string();

        type_text(&mut app, "xyz");
        assert_eq!(app.url_input.text(), before);
        assert!(app.message_input.is_empty());
    }

    #[test]
    fn test_tab_skips_disabled_fields() {
        let (mut app, _) = create_test_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::UrlField);
    }

    #[test]
    fn test_ctrl_d_disconnects() {
        let (mut app, connector) = create_test_app();
        press(&mut app, KeyCode::Enter);
        app.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));

        assert_eq!(app.lifecycle, Lifecycle::Closing);
        assert_eq!(connector.last_connection().unwrap().close_requests().len(), 1);
    }

    #[test]
    fn test_ctrl_c_quits_and_closes() {
        let (mut app, connector) = create_test_app();
        press(&mut app, KeyCode::Enter);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert!(app.should_quit);
        assert_eq!(connector.last_connection().unwrap().close_requests().len(), 1);
    }

    #[test]
    fn test_page_keys_scroll_messages() {
        let (mut app, _) = create_test_app();
        app.viewport_height = 10;
        app.messages.scroll.set_max_scroll(50);

        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.messages.scroll.offset, 9);
        press(&mut app, KeyCode::PageDown);
        assert!(app.messages.scroll.is_at_bottom());
    }
}
