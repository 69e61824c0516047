//! Scroll state for the message list
//!
//! Offsets are counted in rendered lines from the bottom, so 0 always shows
//! the newest entry.

/// Scroll state for the message list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// Lines scrolled up from the newest entry (0 = newest visible)
    pub offset: u16,
    /// Maximum scroll value (calculated during render)
    pub max_scroll: u16,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if we're at the bottom (following new content)
    pub fn is_at_bottom(&self) -> bool {
        self.offset == 0
    }

    /// Check if we're at the top (oldest content)
    pub fn is_at_top(&self) -> bool {
        self.offset >= self.max_scroll
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.offset = self.offset.saturating_add(lines).min(self.max_scroll);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.offset = self.offset.saturating_sub(lines);
    }

    /// Snap back to the newest entry
    pub fn scroll_to_bottom(&mut self) {
        self.offset = 0;
    }

    /// Record the scrollable range from the last render and clamp the offset.
    pub fn set_max_scroll(&mut self, max_scroll: u16) {
        self.max_scroll = max_scroll;
        self.offset = self.offset.min(max_scroll);
    }

    /// Get scroll percentage (0-100)
    pub fn scroll_percentage(&self) -> u8 {
        if self.max_scroll == 0 {
            100
        } else {
            100 - ((self.offset as f32 / self.max_scroll as f32) * 100.0) as u8
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_state_default() {
        let state = ScrollState::default();
        assert_eq!(state.offset, 0);
        assert!(state.is_at_bottom());
        assert!(state.is_at_top());
    }

    #[test]
    fn test_scroll_up_is_clamped() {
        let mut state = ScrollState::new();
        state.set_max_scroll(10);
        state.scroll_up(4);
        assert_eq!(state.offset, 4);
        state.scroll_up(100);
        assert_eq!(state.offset, 10);
        assert!(state.is_at_top());
    }

    #[test]
    fn test_scroll_down_and_snap() {
        let mut state = ScrollState::new();
        state.set_max_scroll(10);
        state.scroll_up(8);
        state.scroll_down(3);
        assert_eq!(state.offset, 5);
        state.scroll_to_bottom();
        assert!(state.is_at_bottom());
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let mut state = ScrollState::new();
        state.set_max_scroll(20);
        state.scroll_up(15);
        state.set_max_scroll(5);
        assert_eq!(state.offset, 5);
    }

    #[test]
    fn test_scroll_percentage() {
        let mut state = ScrollState::new();
        assert_eq!(state.scroll_percentage(), 100);
        state.set_max_scroll(10);
        state.scroll_up(5);
        assert_eq!(state.scroll_percentage(), 50);
        state.scroll_up(5);
        assert_eq!(state.scroll_percentage(), 0);
    }
}
