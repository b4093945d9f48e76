//! Cursor and scroll state for an option list with disabled entries.
//!
//! `SelectionState` tracks the focused position and scroll offset over a list
//! where some entries cannot take focus. Movement skips disabled entries,
//! optionally wraps, and keeps the cursor inside the visible window.

/// Tracks the focused option and scroll offset for a list of options.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    cursor: Option<usize>,
    offset: usize,
    enabled: Vec<bool>,
    visible: usize,
    wrap: bool,
}

impl SelectionState {
    /// Create state for a list whose entries are enabled or not, showing
    /// `visible` rows at a time.
    pub fn new(enabled: Vec<bool>, visible: usize) -> Self {
        Self {
            cursor: None,
            offset: 0,
            enabled,
            visible,
            wrap: false,
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }
    pub fn offset(&self) -> usize {
        self.offset
    }
    pub fn count(&self) -> usize {
        self.enabled.len()
    }
    pub fn visible(&self) -> usize {
        self.visible
    }
    pub fn wraps(&self) -> bool {
        self.wrap
    }

    /// Whether the entry at `index` exists and can take focus.
    pub fn is_enabled(&self, index: usize) -> bool {
        self.enabled.get(index).copied().unwrap_or(false)
    }

    /// Replace the list. A cursor on an entry that no longer exists or is
    /// now disabled is cleared.
    pub fn set_enabled(&mut self, enabled: Vec<bool>) {
        self.enabled = enabled;
        if self.cursor.is_some_and(|c| !self.is_enabled(c)) {
            self.cursor = None;
        }
        let max_offset = self.count().saturating_sub(self.visible.max(1));
        self.offset = self.offset.min(max_offset);
        self.ensure_visible();
    }

    pub fn set_visible(&mut self, visible: usize) {
        self.visible = visible;
        self.ensure_visible();
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    pub fn first_enabled(&self) -> Option<usize> {
        self.enabled.iter().position(|&e| e)
    }

    pub fn last_enabled(&self) -> Option<usize> {
        self.enabled.iter().rposition(|&e| e)
    }

    /// Move to the next enabled entry. With no cursor this lands on the first
    /// enabled entry.
    pub fn move_down(&mut self) {
        let next = match self.cursor {
            None => self.first_enabled(),
            Some(c) => self
                .next_enabled_after(c)
                .or_else(|| self.wrap.then(|| self.first_enabled()).flatten())
                .or(Some(c)),
        };
        self.cursor = next;
        self.ensure_visible();
    }

    /// Move to the previous enabled entry. With no cursor this lands on the
    /// last enabled entry.
    pub fn move_up(&mut self) {
        let prev = match self.cursor {
            None => self.last_enabled(),
            Some(c) => self
                .prev_enabled_before(c)
                .or_else(|| self.wrap.then(|| self.last_enabled()).flatten())
                .or(Some(c)),
        };
        self.cursor = prev;
        self.ensure_visible();
    }

    pub fn home(&mut self) {
        self.cursor = self.first_enabled();
        self.ensure_visible();
    }

    pub fn end(&mut self) {
        self.cursor = self.last_enabled();
        self.ensure_visible();
    }

    /// Focus `index` if it is enabled. Returns whether the cursor moved there.
    pub fn select(&mut self, index: usize) -> bool {
        if !self.is_enabled(index) {
            return false;
        }
        self.cursor = Some(index);
        self.ensure_visible();
        true
    }

    /// Drop the cursor and scroll back to the top.
    pub fn clear(&mut self) {
        self.cursor = None;
        self.offset = 0;
    }

    /// Scroll offset for a window of `rows` rows that keeps the cursor on
    /// screen. Differs from [`offset`](Self::offset) when fewer rows fit
    /// than `visible`.
    pub fn window_offset(&self, rows: usize) -> usize {
        let Some(cursor) = self.cursor else {
            return self.offset;
        };
        if rows == 0 || cursor < self.offset {
            return self.offset.min(cursor);
        }
        if cursor >= self.offset + rows {
            cursor + 1 - rows
        } else {
            self.offset
        }
    }

    fn next_enabled_after(&self, index: usize) -> Option<usize> {
        (index + 1..self.count()).find(|&i| self.enabled[i])
    }

    fn prev_enabled_before(&self, index: usize) -> Option<usize> {
        (0..index.min(self.count())).rev().find(|&i| self.enabled[i])
    }

    fn ensure_visible(&mut self) {
        let Some(cursor) = self.cursor else {
            return;
        };
        if self.visible == 0 {
            return;
        }
        if cursor < self.offset {
            self.offset = cursor;
        } else if cursor >= self.offset + self.visible {
            self.offset = cursor + 1 - self.visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(n: usize) -> Vec<bool> {
        vec![true; n]
    }

    #[test]
    fn new_has_no_cursor() {
        let s = SelectionState::new(all(5), 3);
        assert_eq!(s.cursor(), None);
        assert_eq!(s.offset(), 0);
    }

    #[test]
    fn move_down_stops_at_end() {
        let mut s = SelectionState::new(all(3), 10);
        s.move_down();
        assert_eq!(s.cursor(), Some(0));
        s.move_down();
        s.move_down();
        assert_eq!(s.cursor(), Some(2));
        s.move_down();
        assert_eq!(s.cursor(), Some(2));
    }

    #[test]
    fn move_up_stops_at_start() {
        let mut s = SelectionState::new(all(3), 10);
        s.select(1);
        s.move_up();
        s.move_up();
        assert_eq!(s.cursor(), Some(0));
    }

    #[test]
    fn wrap_is_opt_in() {
        let mut s = SelectionState::new(all(3), 10);
        s.set_wrap(true);
        s.select(2);
        s.move_down();
        assert_eq!(s.cursor(), Some(0));
        s.move_up();
        assert_eq!(s.cursor(), Some(2));
    }

    #[test]
    fn disabled_entries_are_skipped() {
        let mut s = SelectionState::new(vec![true, false, false, true, false], 10);
        s.move_down();
        assert_eq!(s.cursor(), Some(0));
        s.move_down();
        assert_eq!(s.cursor(), Some(3));
        s.move_down(); // only a disabled entry remains
        assert_eq!(s.cursor(), Some(3));
        s.move_up();
        assert_eq!(s.cursor(), Some(0));
    }

    #[test]
    fn wrap_skips_disabled() {
        let mut s = SelectionState::new(vec![false, true, true, false], 10);
        s.set_wrap(true);
        s.select(2);
        s.move_down();
        assert_eq!(s.cursor(), Some(1));
    }

    #[test]
    fn home_end_land_on_enabled() {
        let mut s = SelectionState::new(vec![false, true, true, false], 10);
        s.end();
        assert_eq!(s.cursor(), Some(2));
        s.home();
        assert_eq!(s.cursor(), Some(1));
    }

    #[test]
    fn all_disabled_never_focuses() {
        let mut s = SelectionState::new(vec![false, false], 10);
        s.move_down();
        s.move_up();
        s.home();
        assert_eq!(s.cursor(), None);
        assert!(!s.select(0));
    }

    #[test]
    fn empty_list_is_noop() {
        let mut s = SelectionState::new(Vec::new(), 5);
        s.move_down();
        s.end();
        assert_eq!(s.cursor(), None);
    }

    #[test]
    fn select_rejects_out_of_range() {
        let mut s = SelectionState::new(all(3), 3);
        assert!(!s.select(7));
        assert_eq!(s.cursor(), None);
    }

    #[test]
    fn scrolling_keeps_cursor_visible() {
        let mut s = SelectionState::new(all(20), 5);
        s.select(10);
        assert!(s.offset() <= 10 && s.offset() + 5 > 10);
        s.home();
        assert_eq!(s.offset(), 0);
        s.end();
        assert_eq!(s.offset(), 15);
    }

    #[test]
    fn window_offset_follows_cursor_in_short_windows() {
        let mut s = SelectionState::new(all(10), 8);
        s.end();
        assert_eq!(s.offset(), 2);
        assert_eq!(s.window_offset(8), 2);
        assert_eq!(s.window_offset(3), 7);

        s.home();
        assert_eq!(s.window_offset(3), 0);

        let unfocused = SelectionState::new(all(10), 8);
        assert_eq!(unfocused.window_offset(3), 0);
    }

    #[test]
    fn set_enabled_clears_cursor_on_disabled_entry() {
        let mut s = SelectionState::new(all(4), 5);
        s.select(3);
        s.set_enabled(vec![true, true]);
        assert_eq!(s.cursor(), None);

        s.select(1);
        s.set_enabled(vec![true, false]);
        assert_eq!(s.cursor(), None);
    }

    #[test]
    fn set_enabled_clamps_offset() {
        let mut s = SelectionState::new(all(20), 5);
        s.end();
        s.set_enabled(all(3));
        assert_eq!(s.offset(), 0);
    }

    #[test]
    fn clear_resets() {
        let mut s = SelectionState::new(all(20), 5);
        s.end();
        s.clear();
        assert_eq!(s.cursor(), None);
        assert_eq!(s.offset(), 0);
    }
}
