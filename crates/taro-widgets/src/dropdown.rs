//! Option list overlay for the [`Select`](crate::select::Select).
//!
//! The dropdown owns the list's navigation state and knows how to draw
//! normalized options as a scrolling overlay anchored above or below the
//! trigger. It does not own the options themselves; the select passes them
//! in on every render. The rows drawn by the last render are remembered so
//! that pointer presses can be mapped back to options.

use crate::option::{Icon, SelectOption};
use crate::resolve::Resolution;
use crate::select::PresentationMode;
use crate::selection::SelectionState;
use ratatui::layout::{Position as Point, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;
use std::cell::RefCell;
use std::str::FromStr;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Marker drawn in place of image icons.
pub const IMAGE_MARKER: &str = "▣";

/// Position of the dropdown relative to its anchor area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Render above the anchor area.
    Above,
    /// Render below the anchor area (default). Flips above when the frame
    /// has no room below but does above.
    #[default]
    Below,
}

/// Style configuration for the dropdown.
#[derive(Debug, Clone)]
pub struct DropdownStyle {
    /// Enabled options.
    pub item: Style,
    /// The option with keyboard focus.
    pub focused_item: Style,
    /// Options carrying the selected value.
    pub selected_item: Style,
    /// Disabled options.
    pub disabled_item: Style,
    /// Descriptions shown next to labels.
    pub description: Style,
    /// Marker drawn before the focused option.
    pub focus_symbol: String,
    /// Text shown when there are no options.
    pub empty_text: String,
}

impl Default for DropdownStyle {
    fn default() -> Self {
        Self {
            item: Style::default(),
            focused_item: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            selected_item: Style::default().add_modifier(Modifier::UNDERLINED),
            disabled_item: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
            description: Style::default().fg(Color::DarkGray),
            focus_symbol: "▸ ".to_string(),
            empty_text: "No options".to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct ListLayout {
    area: Rect,
    rows: Vec<(usize, Rect)>,
}

/// A scrolling option list overlay.
///
/// # Example
///
/// ```ignore
/// use taro_widgets::dropdown::{Dropdown, Position};
///
/// let dropdown = Dropdown::new()
///     .with_position(Position::Above)
///     .with_max_visible(5);
/// ```
#[derive(Debug)]
pub struct Dropdown {
    selection: SelectionState,
    max_visible: usize,
    style: DropdownStyle,
    position: Position,
    block: Option<Block<'static>>,
    layout: RefCell<ListLayout>,
}

impl Dropdown {
    /// Create a dropdown with no options.
    pub fn new() -> Self {
        Self {
            selection: SelectionState::new(Vec::new(), 8),
            max_visible: 8,
            style: DropdownStyle::default(),
            position: Position::default(),
            block: None,
            layout: RefCell::default(),
        }
    }

    /// Set the maximum number of visible rows before scrolling.
    pub fn with_max_visible(mut self, max: usize) -> Self {
        self.max_visible = max.max(1);
        self.selection.set_visible(self.max_visible);
        self
    }

    /// Set the style configuration.
    pub fn with_style(mut self, style: DropdownStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the position relative to the anchor.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Set the block (border/title container) for the dropdown.
    pub fn with_block(mut self, block: Block<'static>) -> Self {
        self.block = Some(block);
        self
    }

    /// Let arrow movement wrap from one end of the list to the other.
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.selection.set_wrap(wrap);
        self
    }

    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Track a new option list. Keyboard focus survives only if it still
    /// points at an enabled option.
    pub fn set_options(&mut self, options: &[SelectOption]) {
        self.selection
            .set_enabled(options.iter().map(|o| !o.disabled).collect());
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    /// Index of the option with keyboard focus.
    pub fn focused(&self) -> Option<usize> {
        self.selection.cursor()
    }

    /// Area covered by the last render, empty when nothing was drawn.
    pub fn rendered_area(&self) -> Rect {
        self.layout.borrow().area
    }

    /// Option indices drawn by the last render, top to bottom.
    pub fn rendered_rows(&self) -> Vec<usize> {
        self.layout.borrow().rows.iter().map(|(i, _)| *i).collect()
    }

    /// The option drawn at `point` by the last render.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.layout
            .borrow()
            .rows
            .iter()
            .find(|(_, row)| row.contains(point))
            .map(|(index, _)| *index)
    }

    /// Forget the last render, as when the list closes.
    pub fn clear_layout(&self) {
        *self.layout.borrow_mut() = ListLayout::default();
    }

    /// Where the overlay goes for `rows` rows hanging off `anchor`, clipped
    /// to `bounds`.
    fn placement(&self, anchor: Rect, rows: usize, bounds: Rect) -> Rect {
        let chrome = if self.block.is_some() { 2 } else { 0 };
        let wanted = u16::try_from(rows)
            .unwrap_or(u16::MAX)
            .saturating_add(chrome);
        let below_y = anchor.bottom();
        let room_below = bounds.bottom().saturating_sub(below_y);
        let room_above = anchor.y.saturating_sub(bounds.y);

        let above = match self.position {
            Position::Above => true,
            Position::Below => room_below < wanted && room_above > room_below,
        };
        let area = if above {
            let height = wanted.min(room_above);
            Rect::new(anchor.x, anchor.y - height, anchor.width, height)
        } else {
            Rect::new(anchor.x, below_y, anchor.width, wanted.min(room_below))
        };
        area.intersection(bounds)
    }

    /// Draw `options` below (or above) `anchor`.
    pub fn render(
        &self,
        frame: &mut Frame,
        anchor: Rect,
        options: &[SelectOption],
        resolution: &Resolution<'_>,
        mode: PresentationMode,
    ) {
        let visible_count = options.len().min(self.max_visible).max(1);
        let area = self.placement(anchor, visible_count, frame.area());
        let mut layout = ListLayout {
            area,
            rows: Vec::new(),
        };
        if area.height == 0 || area.width < 4 {
            *self.layout.borrow_mut() = ListLayout::default();
            return;
        }

        frame.render_widget(Clear, area);
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                frame.render_widget(block.clone(), area);
                inner
            }
            None => area,
        };

        if options.is_empty() {
            let text = fit(&self.style.empty_text, inner.width as usize);
            frame.render_widget(
                Paragraph::new(Span::styled(text, self.style.disabled_item)),
                inner,
            );
            *self.layout.borrow_mut() = layout;
            return;
        }

        let offset = self.selection.window_offset(inner.height as usize);
        let focused = self.selection.cursor();
        for (row, (index, option)) in options
            .iter()
            .enumerate()
            .skip(offset)
            .take(inner.height as usize)
            .enumerate()
        {
            let row_area = Rect {
                y: inner.y + row as u16,
                height: 1,
                ..inner
            };
            let line = self.row_line(
                option,
                focused == Some(index),
                resolution.is_selected(option),
                mode,
                row_area.width as usize,
            );
            frame.render_widget(Paragraph::new(line), row_area);
            layout.rows.push((index, row_area));
        }
        *self.layout.borrow_mut() = layout;
    }

    fn row_line(
        &self,
        option: &SelectOption,
        focused: bool,
        selected: bool,
        mode: PresentationMode,
        width: usize,
    ) -> Line<'static> {
        let mut style = if option.disabled {
            self.style.disabled_item
        } else {
            self.style.item
        };
        if selected {
            style = style.patch(self.style.selected_item);
        }
        if focused {
            style = style.patch(self.style.focused_item);
        }

        let prefix = if focused {
            self.style.focus_symbol.clone()
        } else {
            " ".repeat(self.style.focus_symbol.width())
        };
        let mut remaining = width.saturating_sub(prefix.width());
        let mut spans = vec![Span::styled(prefix, style)];

        if mode == PresentationMode::WithIcon {
            if let Some(icon) = &option.icon {
                let (marker, icon_style) = icon_span(icon, style);
                let marker = fit(&format!("{marker} "), remaining);
                remaining = remaining.saturating_sub(marker.width());
                spans.push(Span::styled(marker, icon_style));
            }
        }

        let label = fit(&option.label, remaining);
        remaining = remaining.saturating_sub(label.width());
        spans.push(Span::styled(label, style));

        if mode == PresentationMode::WithDescription && remaining > 2 {
            if let Some(description) = &option.description {
                let text = fit(description, remaining - 2);
                spans.push(Span::styled(format!("  {text}"), self.style.description));
            }
        }
        Line::from(spans)
    }
}

impl Default for Dropdown {
    fn default() -> Self {
        Self::new()
    }
}

/// The marker and style for an icon. Glyph colors that ratatui cannot parse
/// fall back to the row style.
pub(crate) fn icon_span(icon: &Icon, row: Style) -> (String, Style) {
    match icon {
        Icon::Glyph { glyph, color } => {
            let style = match Color::from_str(color) {
                Ok(color) => row.fg(color),
                Err(_) => row,
            };
            (glyph.clone(), style)
        }
        Icon::Image { .. } => (IMAGE_MARKER.to_string(), row),
    }
}

/// Cut `text` to `width` display columns, ending in `…` when it had to cut.
pub(crate) fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::Scalar;
    use crate::resolve::resolve;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn options() -> Vec<SelectOption> {
        vec![
            SelectOption::new("Alpha", "a"),
            SelectOption::new("Beta", "b").disabled(true),
            SelectOption::new("Gamma", "c").with_description("third"),
        ]
    }

    fn draw(
        dropdown: &Dropdown,
        anchor: Rect,
        options: &[SelectOption],
        value: Option<&Scalar>,
        mode: PresentationMode,
        size: (u16, u16),
    ) -> String {
        let mut terminal = Terminal::new(TestBackend::new(size.0, size.1)).unwrap();
        terminal
            .draw(|frame| {
                let res = resolve(options, value);
                dropdown.render(frame, anchor, options, &res, mode);
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn renders_rows_below_anchor() {
        let dropdown = Dropdown::new();
        let opts = options();
        let out = draw(
            &dropdown,
            Rect::new(0, 0, 20, 1),
            &opts,
            None,
            PresentationMode::Default,
            (20, 6),
        );
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[1].contains("Alpha"));
        assert!(lines[2].contains("Beta"));
        assert!(lines[3].contains("Gamma"));
        assert_eq!(dropdown.rendered_rows(), vec![0, 1, 2]);
        assert_eq!(dropdown.rendered_area(), Rect::new(0, 1, 20, 3));
    }

    #[test]
    fn focused_row_has_marker() {
        let mut dropdown = Dropdown::new();
        let opts = options();
        dropdown.set_options(&opts);
        dropdown.selection_mut().select(2);
        let out = draw(
            &dropdown,
            Rect::new(0, 0, 20, 1),
            &opts,
            None,
            PresentationMode::Default,
            (20, 6),
        );
        assert!(out.lines().nth(3).unwrap().starts_with("▸ Gamma"));
        assert!(out.lines().nth(1).unwrap().starts_with("  Alpha"));
    }

    #[test]
    fn empty_list_draws_no_rows() {
        let dropdown = Dropdown::new();
        let out = draw(
            &dropdown,
            Rect::new(0, 0, 20, 1),
            &[],
            None,
            PresentationMode::Default,
            (20, 4),
        );
        assert!(dropdown.rendered_rows().is_empty());
        assert!(out.contains("No options"));
    }

    #[test]
    fn scroll_window_limits_rows() {
        let mut dropdown = Dropdown::new().with_max_visible(2);
        let opts: Vec<_> = (0..5).map(|i| SelectOption::new(format!("o{i}"), i)).collect();
        dropdown.set_options(&opts);
        dropdown.selection_mut().end();
        draw(
            &dropdown,
            Rect::new(0, 0, 10, 1),
            &opts,
            None,
            PresentationMode::Default,
            (10, 8),
        );
        assert_eq!(dropdown.rendered_rows(), vec![3, 4]);
    }

    #[test]
    fn short_frame_keeps_focused_row_drawn() {
        let mut dropdown = Dropdown::new();
        let opts: Vec<_> = (0..10).map(|i| SelectOption::new(format!("o{i}"), i)).collect();
        dropdown.set_options(&opts);
        dropdown.selection_mut().end();
        let out = draw(
            &dropdown,
            Rect::new(0, 0, 20, 1),
            &opts,
            None,
            PresentationMode::Default,
            (20, 4),
        );
        assert_eq!(dropdown.rendered_rows(), vec![7, 8, 9]);
        assert!(out.lines().nth(3).unwrap().starts_with("▸ o9"));
    }

    #[test]
    fn oversized_row_count_saturates() {
        let dropdown = Dropdown::new().with_block(Block::bordered());
        let area = dropdown.placement(Rect::new(0, 0, 10, 1), usize::MAX, Rect::new(0, 0, 10, 40));
        assert_eq!(area, Rect::new(0, 1, 10, 39));
    }

    #[test]
    fn flips_above_when_no_room_below() {
        let dropdown = Dropdown::new();
        let opts = options();
        draw(
            &dropdown,
            Rect::new(0, 5, 20, 1),
            &opts,
            None,
            PresentationMode::Default,
            (20, 6),
        );
        assert_eq!(dropdown.rendered_area(), Rect::new(0, 2, 20, 3));
    }

    #[test]
    fn hit_test_maps_rows_to_options() {
        let dropdown = Dropdown::new();
        let opts = options();
        draw(
            &dropdown,
            Rect::new(2, 0, 16, 1),
            &opts,
            None,
            PresentationMode::Default,
            (20, 6),
        );
        assert_eq!(dropdown.hit_test(Point::new(5, 2)), Some(1));
        assert_eq!(dropdown.hit_test(Point::new(0, 2)), None);
        assert_eq!(dropdown.hit_test(Point::new(5, 0)), None);
        dropdown.clear_layout();
        assert_eq!(dropdown.hit_test(Point::new(5, 2)), None);
    }

    #[test]
    fn description_mode_shows_descriptions() {
        let dropdown = Dropdown::new();
        let opts = options();
        let out = draw(
            &dropdown,
            Rect::new(0, 0, 24, 1),
            &opts,
            None,
            PresentationMode::WithDescription,
            (24, 5),
        );
        assert!(out.lines().nth(3).unwrap().contains("Gamma  third"));
    }

    #[test]
    fn icon_mode_draws_markers() {
        let dropdown = Dropdown::new();
        let opts = vec![
            SelectOption::new("Red", "r").with_icon(Icon::Glyph {
                glyph: "●".into(),
                color: "red".into(),
            }),
            SelectOption::new("Pic", "p").with_icon(Icon::Image {
                url: "https://example.com/p.png".into(),
            }),
        ];
        let out = draw(
            &dropdown,
            Rect::new(0, 0, 20, 1),
            &opts,
            None,
            PresentationMode::WithIcon,
            (20, 4),
        );
        assert!(out.lines().nth(1).unwrap().contains("● Red"));
        assert!(out.lines().nth(2).unwrap().contains("▣ Pic"));
    }

    #[test]
    fn glyph_color_parses() {
        let icon = Icon::Glyph {
            glyph: "●".into(),
            color: "#ff8800".into(),
        };
        let (_, style) = icon_span(&icon, Style::default());
        assert_eq!(style.fg, Some(Color::Rgb(0xff, 0x88, 0x00)));

        let bad = Icon::Glyph {
            glyph: "●".into(),
            color: "not a color".into(),
        };
        assert_eq!(icon_span(&bad, Style::default()).1.fg, None);
    }

    #[test]
    fn fit_truncates_by_display_width() {
        assert_eq!(fit("hello", 10), "hello");
        assert_eq!(fit("hello world", 6), "hello…");
        assert_eq!(fit("世界abc", 4), "世…");
        assert_eq!(fit("abc", 0), "");
    }
}
