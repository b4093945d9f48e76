use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

/// Terminal events produced by the runtime's event loop.
///
/// `TerminalEvent` is delivered to your application through the
/// [`terminal_events`](crate::subscriptions::terminal_events) subscription.
/// Hosts forward key and mouse events to the focused component and hand every
/// event to the [`Document`](crate::document::Document) so components can
/// learn about interactions that happen outside of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// A mouse event.
    Mouse(MouseEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Terminal window gained focus.
    FocusGained,
    /// Terminal window lost focus.
    FocusLost,
    /// Bracketed paste content.
    Paste(String),
}

impl TerminalEvent {
    /// The cell under the pointer when this is a primary-button press.
    ///
    /// Only presses count as interactions; releases, drags and scrolling do not.
    pub fn primary_press(&self) -> Option<Position> {
        match self {
            TerminalEvent::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Some(Position::new(*column, *row)),
            _ => None,
        }
    }
}

impl From<crossterm::event::Event> for TerminalEvent {
    fn from(event: crossterm::event::Event) -> Self {
        match event {
            crossterm::event::Event::Key(k) => TerminalEvent::Key(k),
            crossterm::event::Event::Mouse(m) => TerminalEvent::Mouse(m),
            crossterm::event::Event::Resize(w, h) => TerminalEvent::Resize(w, h),
            crossterm::event::Event::FocusGained => TerminalEvent::FocusGained,
            crossterm::event::Event::FocusLost => TerminalEvent::FocusLost,
            crossterm::event::Event::Paste(s) => TerminalEvent::Paste(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> TerminalEvent {
        TerminalEvent::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn left_press_reports_position() {
        let ev = mouse(MouseEventKind::Down(MouseButton::Left), 4, 2);
        assert_eq!(ev.primary_press(), Some(Position::new(4, 2)));
    }

    #[test]
    fn other_mouse_kinds_are_not_presses() {
        assert_eq!(mouse(MouseEventKind::Up(MouseButton::Left), 1, 1).primary_press(), None);
        assert_eq!(mouse(MouseEventKind::Down(MouseButton::Right), 1, 1).primary_press(), None);
        assert_eq!(mouse(MouseEventKind::ScrollDown, 1, 1).primary_press(), None);
        assert_eq!(TerminalEvent::FocusLost.primary_press(), None);
    }
}
