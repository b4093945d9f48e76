//! Select (combobox) component for choosing one value from a list of options.
//!
//! The select is a controlled component: it never owns the chosen value.
//! Choosing an option emits [`Message::Change`] and [`Message::Update`] with
//! the option's value and closes the list; the host decides whether to keep
//! the value and hands it back through [`Select::set_value`] (or
//! [`Message::SetValue`]). Until it does, the trigger keeps showing whatever
//! the host last supplied.
//!
//! The list closes when the user clicks or moves focus elsewhere. To hear
//! about interactions outside its own area, a select registers with the
//! host's [`Document`] on [`mount`](Select::mount) and surfaces notifications
//! through its [`subscriptions`](Component::subscriptions).
//!
//! # Example
//!
//! ```rust,ignore
//! let size = Select::new(["Small", "Medium", "Large"])
//!     .with_label("Size")
//!     .with_value("Medium");
//!
//! // In the host's update:
//! match msg {
//!     select::Message::Update(value) => {
//!         self.size_value = Some(value.clone());
//!         self.size.set_value(Some(value));
//!         Command::none()
//!     }
//!     msg if msg.is_output() => Command::none(),
//!     msg => self.size.update(msg).map(Msg::Size),
//! }
//! ```

use crate::a11y::{Accessibility, ListboxAttributes, OptionAttributes, Role, TriggerAttributes};
use crate::dropdown::{self, Dropdown, DropdownStyle, Position};
use crate::key::SelectKeyMap;
use crate::option::{normalize, RawOption, Scalar, SelectOption};
use crate::resolve::{self, Resolution, DEFAULT_PLACEHOLDER};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position as Point, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use std::cell::Cell;
use taro_core::command::Command;
use taro_core::component::Component;
use taro_core::document::{Document, ListenerGuard, ListenerId};
use taro_core::subscription::Subscription;
use unicode_width::UnicodeWidthStr;

/// Messages for the select component.
///
/// The first group is input the host forwards to the select. The last four
/// are output the select emits for the host; feeding them back into
/// [`Select::update`](Component::update) does nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A key press forwarded to the select. Ignored without focus.
    KeyPress(KeyEvent),
    /// A mouse event forwarded to the select.
    Mouse(MouseEvent),
    /// The trigger was activated: open if closed, close if open.
    Toggle,
    /// The option at this index was activated.
    Activate(usize),
    /// The user interacted with something outside the select.
    OutsideInteraction,
    /// The host's current value.
    SetValue(Option<Scalar>),
    /// Replace the option list.
    SetOptions(Vec<RawOption>),
    /// Enable or disable the select.
    SetDisabled(bool),
    /// Make the select read-only or editable.
    SetReadonly(bool),

    /// The list opened.
    Opened,
    /// The list closed, for any reason.
    Closed,
    /// An option was chosen; the host should store this value.
    Update(Scalar),
    /// An option was chosen. Same payload as [`Message::Update`].
    Change(Scalar),
}

impl Message {
    /// Whether this is an event emitted by the select rather than input to it.
    pub fn is_output(&self) -> bool {
        matches!(
            self,
            Message::Opened | Message::Closed | Message::Update(_) | Message::Change(_)
        )
    }
}

/// How options and the selection are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationMode {
    /// Labels only.
    #[default]
    Default,
    /// Labels with descriptions, plus a description panel under the trigger.
    WithDescription,
    /// Labels preceded by their icons.
    WithIcon,
}

/// Visual style configuration for the [`Select`] component.
#[derive(Debug, Clone)]
pub struct SelectStyle {
    /// Field label above the trigger.
    pub label: Style,
    /// Trigger text when an option is selected.
    pub text: Style,
    /// Trigger text when showing the placeholder.
    pub placeholder: Style,
    /// Patched onto the trigger while the select has focus.
    pub focused: Style,
    /// Trigger while disabled.
    pub disabled: Style,
    /// Open/closed indicator.
    pub indicator: Style,
    /// Helper text under the trigger.
    pub helper: Style,
    /// Error message under the trigger.
    pub error: Style,
    /// Description panel.
    pub description: Style,
    /// Indicator while open.
    pub open_symbol: String,
    /// Indicator while closed.
    pub closed_symbol: String,
    /// Style of the option list.
    pub dropdown: DropdownStyle,
}

impl Default for SelectStyle {
    fn default() -> Self {
        Self {
            label: Style::default().add_modifier(Modifier::BOLD),
            text: Style::default(),
            placeholder: Style::default().fg(Color::DarkGray),
            focused: Style::default().fg(Color::Cyan),
            disabled: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
            indicator: Style::default().fg(Color::DarkGray),
            helper: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red),
            description: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
            open_symbol: " ▾".to_string(),
            closed_symbol: " ▸".to_string(),
            dropdown: DropdownStyle::default(),
        }
    }
}

/// A single-choice select that presents its options in a collapsible list.
pub struct Select {
    options: Vec<SelectOption>,
    value: Option<Scalar>,
    open: bool,
    focus: bool,
    disabled: bool,
    readonly: bool,
    placeholder: String,
    label: Option<String>,
    helper_text: Option<String>,
    error_message: Option<String>,
    mode: PresentationMode,
    show_description: bool,
    custom_description: Option<String>,
    dropdown: Dropdown,
    keys: SelectKeyMap,
    style: SelectStyle,
    listener: Option<ListenerGuard>,
    trigger_area: Cell<Rect>,
}

impl Select {
    /// Create a select from any mix of scalars and option records.
    pub fn new<I>(options: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RawOption>,
    {
        let raw: Vec<RawOption> = options.into_iter().map(Into::into).collect();
        Self::from_options(normalize(&raw))
    }

    /// Create a select from already normalized options.
    pub fn from_options(options: Vec<SelectOption>) -> Self {
        let mut dropdown = Dropdown::new();
        dropdown.set_options(&options);
        Self {
            options,
            value: None,
            open: false,
            focus: false,
            disabled: false,
            readonly: false,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            label: None,
            helper_text: None,
            error_message: None,
            mode: PresentationMode::default(),
            show_description: true,
            custom_description: None,
            dropdown,
            keys: SelectKeyMap::default(),
            style: SelectStyle::default(),
            listener: None,
            trigger_area: Cell::new(Rect::default()),
        }
    }

    /// Set the placeholder text shown when no option is selected.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the field label shown above the trigger.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the helper text shown under the trigger.
    pub fn with_helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = Some(text.into());
        self
    }

    /// Set an error message. It replaces the helper text while set.
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn with_presentation_mode(mut self, mode: PresentationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Whether description mode shows the description panel. Defaults to `true`.
    pub fn with_show_description(mut self, show: bool) -> Self {
        self.show_description = show;
        self
    }

    /// Show this text in the description panel instead of the selected
    /// option's description, even when nothing is selected.
    pub fn with_custom_description(mut self, description: impl Into<String>) -> Self {
        self.custom_description = Some(description.into());
        self
    }

    /// Set the initial value.
    pub fn with_value(mut self, value: impl Into<Scalar>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    /// Let arrow keys wrap from the last enabled option to the first and back.
    pub fn with_cyclic_navigation(mut self, cyclic: bool) -> Self {
        self.dropdown = std::mem::take(&mut self.dropdown).with_wrap(cyclic);
        self
    }

    /// Set how many options the open list shows before scrolling.
    pub fn with_max_visible(mut self, max: usize) -> Self {
        self.dropdown = std::mem::take(&mut self.dropdown).with_max_visible(max);
        self
    }

    /// Set where the list opens relative to the trigger.
    pub fn with_position(mut self, position: Position) -> Self {
        self.dropdown = std::mem::take(&mut self.dropdown).with_position(position);
        self
    }

    /// Set the block (border/title container) for the option list.
    pub fn with_dropdown_block(mut self, block: Block<'static>) -> Self {
        self.dropdown = std::mem::take(&mut self.dropdown).with_block(block);
        self
    }

    pub fn with_key_map(mut self, keys: SelectKeyMap) -> Self {
        self.keys = keys;
        self
    }

    /// Set the visual style. The dropdown part is applied to the option list.
    pub fn with_style(mut self, style: SelectStyle) -> Self {
        self.dropdown = std::mem::take(&mut self.dropdown).with_style(style.dropdown.clone());
        self.style = style;
        self
    }

    /// Give this select keyboard focus.
    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Remove keyboard focus, closing the list if it is open.
    pub fn blur(&mut self) -> Command<Message> {
        self.focus = false;
        self.close("blur")
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// The value the host last supplied.
    pub fn value(&self) -> Option<&Scalar> {
        self.value.as_ref()
    }

    /// The option matching the current value.
    pub fn resolution(&self) -> Resolution<'_> {
        resolve::resolve(&self.options, self.value.as_ref())
    }

    /// Index of the selected option.
    pub fn selected_index(&self) -> Option<usize> {
        self.resolution().index
    }

    /// Text the trigger shows: the selected label or the placeholder.
    pub fn display_text(&self) -> &str {
        resolve::display_text(&self.resolution(), &self.placeholder)
    }

    /// Text of the description panel, when it is shown at all.
    pub fn description_text(&self) -> Option<&str> {
        if self.mode != PresentationMode::WithDescription || !self.show_description {
            return None;
        }
        resolve::description_text(&self.resolution(), self.custom_description.as_deref())
    }

    /// Index of the option with keyboard focus while open.
    pub fn focused_option(&self) -> Option<usize> {
        self.open.then(|| self.dropdown.focused()).flatten()
    }

    /// Option indices drawn by the last render while open.
    pub fn rendered_options(&self) -> Vec<usize> {
        if self.open {
            self.dropdown.rendered_rows()
        } else {
            Vec::new()
        }
    }

    /// Mirror the host's value.
    pub fn set_value(&mut self, value: Option<Scalar>) {
        self.value = value;
    }

    /// Replace the option list.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        self.dropdown.set_options(&self.options);
        if self.open && self.dropdown.focused().is_none() {
            self.focus_initial(false);
        }
    }

    /// Enable or disable the select. Disabling closes an open list.
    pub fn set_disabled(&mut self, disabled: bool) -> Command<Message> {
        self.disabled = disabled;
        if disabled {
            self.close("disabled")
        } else {
            Command::none()
        }
    }

    /// Make the select read-only. Becoming read-only closes an open list.
    pub fn set_readonly(&mut self, readonly: bool) -> Command<Message> {
        self.readonly = readonly;
        if readonly {
            self.close("readonly")
        } else {
            Command::none()
        }
    }

    pub fn set_error_message(&mut self, message: Option<String>) {
        self.error_message = message;
    }

    /// Start listening for interactions outside the select. Mounting twice
    /// keeps the first registration.
    pub fn mount(&mut self, document: &Document) {
        if self.listener.is_none() {
            let guard = document.register();
            log::trace!("select mounted as listener {}", guard.id().get());
            self.listener = Some(guard);
        }
    }

    /// Stop listening. Unmounting an unmounted select does nothing.
    pub fn unmount(&mut self) {
        if let Some(guard) = self.listener.take() {
            guard.release();
        }
    }

    /// The document listener id while mounted.
    pub fn listener_id(&self) -> Option<ListenerId> {
        self.listener.as_ref().map(ListenerGuard::id)
    }

    /// Rows the select needs: label, trigger, description panel and helper
    /// or error line. The open list draws over whatever is below.
    pub fn height(&self) -> u16 {
        1 + u16::from(self.label.is_some())
            + u16::from(self.description_text().is_some())
            + u16::from(self.helper_line().is_some())
    }

    /// Accessibility attributes for the current state.
    pub fn accessibility(&self) -> Accessibility {
        let resolution = self.resolution();
        let trigger = TriggerAttributes {
            role: Role::Combobox,
            expanded: self.open,
            has_popup: true,
            disabled: self.disabled,
            readonly: self.readonly,
            active_descendant: self.focused_option(),
            label: self.label.clone(),
        };
        if !self.open {
            return Accessibility {
                trigger,
                listbox: None,
                options: Vec::new(),
            };
        }
        Accessibility {
            trigger,
            listbox: Some(ListboxAttributes {
                role: Role::Listbox,
                size: self.options.len(),
            }),
            options: self
                .options
                .iter()
                .map(|option| OptionAttributes {
                    role: Role::Option,
                    selected: resolution.is_selected(option),
                    disabled: option.disabled,
                    label: option.label.clone(),
                })
                .collect(),
        }
    }

    fn can_open(&self) -> bool {
        !self.disabled && !self.readonly
    }

    fn open(&mut self, from_end: bool) -> Command<Message> {
        if self.open {
            return Command::none();
        }
        if !self.can_open() {
            log::trace!(
                "select ignored open (disabled: {}, readonly: {})",
                self.disabled,
                self.readonly
            );
            return Command::none();
        }
        self.open = true;
        self.focus_initial(from_end);
        log::debug!(
            "select opened with {} options, focus on {:?}",
            self.options.len(),
            self.dropdown.focused()
        );
        Command::message(Message::Opened)
    }

    // Focus the selected option when it can take focus, otherwise the first
    // (or last) enabled one.
    fn focus_initial(&mut self, from_end: bool) {
        let selected = self.selected_index();
        let selection = self.dropdown.selection_mut();
        selection.clear();
        if selected.is_some_and(|index| selection.select(index)) {
            return;
        }
        if from_end && selected.is_none() {
            selection.end();
        } else {
            selection.home();
        }
    }

    fn close(&mut self, reason: &str) -> Command<Message> {
        if !self.open {
            return Command::none();
        }
        self.open = false;
        self.dropdown.selection_mut().clear();
        self.dropdown.clear_layout();
        log::debug!("select closed ({reason})");
        Command::message(Message::Closed)
    }

    fn toggle(&mut self) -> Command<Message> {
        if self.open {
            self.close("trigger")
        } else {
            self.open(false)
        }
    }

    fn activate(&mut self, index: usize) -> Command<Message> {
        if !self.open {
            log::trace!("select ignored activation of {index} while closed");
            return Command::none();
        }
        let Some(option) = self.options.get(index) else {
            log::trace!("select ignored activation of missing option {index}");
            return Command::none();
        };
        if option.disabled {
            log::trace!("select ignored activation of disabled option {index}");
            return Command::none();
        }
        let value = option.value.clone();
        log::debug!("select chose option {index} ({value})");
        Command::batch([
            Command::message(Message::Change(value.clone())),
            Command::message(Message::Update(value)),
            self.close("selection"),
        ])
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        if !self.focus {
            log::trace!("select ignored {:?} without focus", key.code);
            return Command::none();
        }
        if !self.open {
            if self.keys.open.matches(&key) {
                return self.open(key.code == KeyCode::Up);
            }
            return Command::none();
        }

        let keys = &self.keys;
        if keys.next.matches(&key) {
            self.dropdown.selection_mut().move_down();
        } else if keys.previous.matches(&key) {
            self.dropdown.selection_mut().move_up();
        } else if keys.first.matches(&key) {
            self.dropdown.selection_mut().home();
        } else if keys.last.matches(&key) {
            self.dropdown.selection_mut().end();
        } else if keys.activate.matches(&key) {
            if let Some(index) = self.dropdown.focused() {
                return self.activate(index);
            }
        } else if keys.dismiss.matches(&key) {
            return self.close("escape");
        } else if keys.leave.matches(&key) {
            return self.close("focus left");
        }
        Command::none()
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Command<Message> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Command::none();
        }
        let point = Point::new(mouse.column, mouse.row);
        if self.trigger_area.get().contains(point) {
            // A disabled or read-only trigger does not take focus.
            if self.can_open() {
                self.focus = true;
            }
            return self.toggle();
        }
        if !self.open {
            return Command::none();
        }
        match self.dropdown.hit_test(point) {
            Some(index) => self.activate(index),
            None if self.dropdown.rendered_area().contains(point) => Command::none(),
            None => self.close("click outside"),
        }
    }

    fn helper_line(&self) -> Option<(&str, Style)> {
        match (&self.error_message, &self.helper_text) {
            (Some(error), _) => Some((error.as_str(), self.style.error)),
            (None, Some(helper)) => Some((helper.as_str(), self.style.helper)),
            (None, None) => None,
        }
    }

    fn trigger_line(&self, width: usize) -> Line<'_> {
        let resolution = self.resolution();
        let indicator = if self.open {
            &self.style.open_symbol
        } else {
            &self.style.closed_symbol
        };

        let mut text_style = match resolution.selected {
            Some(_) => self.style.text,
            None => self.style.placeholder,
        };
        if self.focus {
            text_style = text_style.patch(self.style.focused);
        }
        if self.disabled {
            text_style = self.style.disabled;
        }

        let mut remaining = width.saturating_sub(indicator.width());
        let mut spans = Vec::new();
        if self.mode == PresentationMode::WithIcon {
            if let Some(icon) = resolution.selected.and_then(|o| o.icon.as_ref()) {
                let (marker, style) = dropdown::icon_span(icon, text_style);
                let marker = dropdown::fit(&format!("{marker} "), remaining);
                remaining = remaining.saturating_sub(marker.width());
                spans.push(Span::styled(marker, style));
            }
        }
        let text = dropdown::fit(resolve::display_text(&resolution, &self.placeholder), remaining);
        spans.push(Span::styled(text, text_style));
        spans.push(Span::styled(indicator.as_str(), self.style.indicator));
        Line::from(spans)
    }
}

fn row(area: Rect, y: u16) -> Rect {
    Rect::new(area.x, y, area.width, 1)
}

impl Component for Select {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) => self.handle_key(key),
            Message::Mouse(mouse) => self.handle_mouse(mouse),
            Message::Toggle => self.toggle(),
            Message::Activate(index) => self.activate(index),
            Message::OutsideInteraction => self.close("outside interaction"),
            Message::SetValue(value) => {
                self.set_value(value);
                Command::none()
            }
            Message::SetOptions(raw) => {
                self.set_options(normalize(&raw));
                Command::none()
            }
            Message::SetDisabled(disabled) => self.set_disabled(disabled),
            Message::SetReadonly(readonly) => self.set_readonly(readonly),
            Message::Opened | Message::Closed | Message::Update(_) | Message::Change(_) => {
                Command::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let bottom = area.bottom();
        let mut y = area.y;

        if let Some(label) = &self.label {
            if y < bottom {
                let text = dropdown::fit(label, area.width as usize);
                frame.render_widget(
                    Paragraph::new(Span::styled(text, self.style.label)),
                    row(area, y),
                );
                y += 1;
            }
        }

        let trigger = if y < bottom { row(area, y) } else { Rect::default() };
        self.trigger_area.set(trigger);
        if !trigger.is_empty() {
            frame.render_widget(
                Paragraph::new(self.trigger_line(trigger.width as usize)),
                trigger,
            );
            y += 1;
        }

        if let Some(description) = self.description_text() {
            if y < bottom {
                let text = dropdown::fit(description, area.width as usize);
                frame.render_widget(
                    Paragraph::new(Span::styled(text, self.style.description)),
                    row(area, y),
                );
                y += 1;
            }
        }

        if let Some((text, style)) = self.helper_line() {
            if y < bottom {
                let text = dropdown::fit(text, area.width as usize);
                frame.render_widget(Paragraph::new(Span::styled(text, style)), row(area, y));
            }
        }

        if self.open && !trigger.is_empty() {
            self.dropdown.render(
                frame,
                trigger,
                &self.options,
                &self.resolution(),
                self.mode,
            );
        }

        if let Some(guard) = &self.listener {
            let list = if self.open {
                self.dropdown.rendered_area()
            } else {
                Rect::default()
            };
            guard.set_bounds([area, list]);
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        self.listener
            .iter()
            .map(|guard| guard.subscription(|| Message::OutsideInteraction))
            .collect()
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
