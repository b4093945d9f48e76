//! # Select Form Example
//!
//! Two selects on one form, owned by a host that stores their values:
//! - The host keeps the authoritative values and feeds accepted ones back
//! - Option lists from JSON (`RawOption` deserializes with serde)
//! - Description and icon presentation modes
//! - A `Document` that closes open lists on clicks elsewhere or focus loss
//! - Logging to a file through `ProgramOptions::log_file`
//!
//! Run with: `cargo run --example select_form`, then `tail -f select_form.log`.

use taro::crossterm::event::{KeyCode, KeyModifiers};
use taro::log::LevelFilter;
use taro::ratatui::layout::{Constraint, Layout, Rect};
use taro::ratatui::style::{Color, Modifier, Style};
use taro::ratatui::text::{Line, Span};
use taro::ratatui::widgets::{Block, Borders, Paragraph};
use taro::ratatui::Frame;
use taro::widgets::option::{Icon, RawOption, Scalar, SelectOption};
use taro::widgets::select::{self, PresentationMode, Select};
use taro::{
    terminal_events, Command, Component, Document, Model, ProgramOptions, Subscription,
    TerminalEvent,
};

const SHIPPING: &str = r#"[
    { "label": "Standard", "value": "standard", "description": "3 to 5 business days" },
    { "label": "Express", "value": "express", "description": "Next business day" },
    { "label": "Freight", "value": "freight", "description": "Pallets only", "disabled": true },
    "Pickup"
]"#;

struct FormApp {
    document: Document,
    shipping: Select,
    color: Select,
    focused: usize,
    shipping_value: Option<Scalar>,
    color_value: Option<Scalar>,
    events: Vec<String>,
}

#[derive(Debug)]
enum Msg {
    Terminal(TerminalEvent),
    Shipping(select::Message),
    Color(select::Message),
}

fn color_options() -> Vec<SelectOption> {
    let swatch = |glyph: &str, color: &str| Icon::Glyph {
        glyph: glyph.to_string(),
        color: color.to_string(),
    };
    vec![
        SelectOption::new("Crimson", "crimson").with_icon(swatch("●", "red")),
        SelectOption::new("Ocean", "ocean").with_icon(swatch("●", "#1e90ff")),
        SelectOption::new("Forest", "forest").with_icon(swatch("●", "green")),
        SelectOption::new("Gold", "gold")
            .with_icon(swatch("●", "yellow"))
            .disabled(true),
        SelectOption::new("Custom", "custom").with_icon(Icon::Image {
            url: "https://example.com/swatch.png".to_string(),
        }),
    ]
}

impl FormApp {
    fn selects(&self) -> [&Select; 2] {
        [&self.shipping, &self.color]
    }

    fn focus(&mut self, index: usize) -> Command<Msg> {
        self.focused = index;
        let (focus, blur) = if index == 0 {
            (&mut self.shipping, &mut self.color)
        } else {
            (&mut self.color, &mut self.shipping)
        };
        focus.focus();
        let owner = focus.listener_id();
        let cmd = if index == 0 {
            blur.blur().map(Msg::Color)
        } else {
            blur.blur().map(Msg::Shipping)
        };
        self.document.focus_changed(owner);
        cmd
    }

    fn record(&mut self, field: &str, msg: &select::Message) {
        let text = match msg {
            select::Message::Opened => format!("{field}: opened"),
            select::Message::Closed => format!("{field}: closed"),
            select::Message::Change(value) => format!("{field}: change -> {value}"),
            select::Message::Update(value) => format!("{field}: update -> {value}"),
            _ => return,
        };
        taro::log::info!("{text}");
        self.events.push(text);
        if self.events.len() > 6 {
            self.events.remove(0);
        }
    }

    fn on_terminal(&mut self, event: TerminalEvent) -> Command<Msg> {
        // Listener notifications arrive through the selects' subscriptions.
        self.document.dispatch(&event);

        match event {
            TerminalEvent::Key(key) => {
                let any_open = self.selects().iter().any(|s| s.is_open());
                match (key.code, key.modifiers) {
                    (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => {
                        Command::quit()
                    }
                    (KeyCode::Esc | KeyCode::Char('q'), _) if !any_open => Command::quit(),
                    (KeyCode::Tab | KeyCode::BackTab, _) => {
                        let close = self.forward_key(key);
                        Command::batch([close, self.focus(1 - self.focused)])
                    }
                    _ => self.forward_key(key),
                }
            }
            TerminalEvent::Mouse(mouse) => {
                let shipping = self
                    .shipping
                    .update(select::Message::Mouse(mouse))
                    .map(Msg::Shipping);
                let color = self.color.update(select::Message::Mouse(mouse)).map(Msg::Color);
                // Clicking a trigger focuses it; move host focus along.
                let clicked = if self.shipping.focused() && self.focused != 0 {
                    self.focus(0)
                } else if self.color.focused() && self.focused != 1 {
                    self.focus(1)
                } else {
                    Command::none()
                };
                Command::batch([shipping, color, clicked])
            }
            _ => Command::none(),
        }
    }

    fn forward_key(&mut self, key: taro::crossterm::event::KeyEvent) -> Command<Msg> {
        let msg = select::Message::KeyPress(key);
        if self.focused == 0 {
            self.shipping.update(msg).map(Msg::Shipping)
        } else {
            self.color.update(msg).map(Msg::Color)
        }
    }
}

impl Model for FormApp {
    type Message = Msg;
    type Flags = ();

    fn init(_: ()) -> (Self, Command<Msg>) {
        let document = Document::new();
        let raw: Vec<RawOption> = serde_json::from_str(SHIPPING).unwrap_or_default();

        let mut shipping = Select::new(raw)
            .with_label("Shipping")
            .with_placeholder("Choose a shipping method")
            .with_helper_text("Freight is unavailable for this order")
            .with_presentation_mode(PresentationMode::WithDescription)
            .with_dropdown_block(Block::default().borders(Borders::ALL));
        shipping.mount(&document);
        shipping.focus();

        let mut color = Select::from_options(color_options())
            .with_label("Color")
            .with_presentation_mode(PresentationMode::WithIcon)
            .with_error_message("Pick a color to continue")
            .with_cyclic_navigation(true)
            .with_dropdown_block(Block::default().borders(Borders::ALL));
        color.mount(&document);

        (
            FormApp {
                document,
                shipping,
                color,
                focused: 0,
                shipping_value: None,
                color_value: None,
                events: Vec::new(),
            },
            Command::none(),
        )
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Terminal(event) => self.on_terminal(event),
            Msg::Shipping(m) if m.is_output() => {
                self.record("shipping", &m);
                if let select::Message::Update(value) = m {
                    self.shipping_value = Some(value.clone());
                    self.shipping.set_value(Some(value));
                }
                Command::none()
            }
            Msg::Color(m) if m.is_output() => {
                self.record("color", &m);
                if let select::Message::Update(value) = m {
                    self.color_value = Some(value.clone());
                    self.color.set_value(Some(value));
                    self.color.set_error_message(None);
                }
                Command::none()
            }
            Msg::Shipping(m) => self.shipping.update(m).map(Msg::Shipping),
            Msg::Color(m) => self.color.update(m).map(Msg::Color),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        let [title_area, shipping_area, color_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(self.shipping.height() + 1),
            Constraint::Length(self.color.height() + 1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let title = Paragraph::new("Checkout")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, title_area);

        let field = |r: Rect| Rect {
            x: r.x + 1,
            width: r.width.saturating_sub(2).min(48),
            ..r
        };

        // The open list draws over the fields below it, so it goes last.
        if self.shipping.is_open() {
            self.color.view(frame, field(color_area));
            self.shipping.view(frame, field(shipping_area));
        } else {
            self.shipping.view(frame, field(shipping_area));
            self.color.view(frame, field(color_area));
        }

        let value = |v: &Option<Scalar>| v.as_ref().map_or("-".to_string(), Scalar::to_string);
        let mut lines = vec![Line::from(format!(
            "shipping = {}   color = {}",
            value(&self.shipping_value),
            value(&self.color_value)
        ))];
        lines.extend(
            self.events
                .iter()
                .map(|e| Line::styled(e.as_str(), Style::default().fg(Color::DarkGray))),
        );
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::TOP).title(" Events ")),
            status_area,
        );

        let help = Line::from(vec![
            Span::styled("Enter/Space", Style::default().fg(Color::Cyan)),
            Span::raw(" open/choose  "),
            Span::styled("↑↓", Style::default().fg(Color::Cyan)),
            Span::raw(" move  "),
            Span::styled("Tab", Style::default().fg(Color::Cyan)),
            Span::raw(" next field  "),
            Span::styled("q", Style::default().fg(Color::Cyan)),
            Span::raw(" quit"),
        ]);
        frame.render_widget(Paragraph::new(help), help_area);
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![terminal_events(|event| Some(Msg::Terminal(event)))];
        subs.extend(self.shipping.subscriptions().into_iter().map(|s| s.map(Msg::Shipping)));
        subs.extend(self.color.subscriptions().into_iter().map(|s| s.map(Msg::Color)));
        subs
    }
}

#[taro::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = ProgramOptions {
        mouse_capture: true,
        focus_reporting: true,
        log_file: Some("select_form.log".into()),
        log_level: LevelFilter::Debug,
        ..Default::default()
    };
    let app = taro::run_with::<FormApp>((), options).await?;
    taro::log::info!(
        "finished with shipping={:?} color={:?}",
        app.shipping_value,
        app.color_value
    );
    Ok(())
}
