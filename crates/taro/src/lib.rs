//! **taro** -- a select/combobox for [`ratatui`] on an Elm-style runtime.
//!
//! This is the umbrella crate that re-exports everything you need to build a
//! taro application from a single dependency:
//!
//! ```toml
//! [dependencies]
//! taro = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`taro_core`] are available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Subscription`], [`Document`],
//!   [`Program`], [`run`], [`run_with`], etc.).
//! * The [`widgets`] module re-exports everything from [`taro_widgets`]
//!   (the select, its option types and the dropdown overlay).
//! * [`ratatui`], [`crossterm`], [`tokio`] and [`log`] are re-exported so
//!   downstream crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use taro::widgets::select::{self, Select};
//! use taro::{Command, Component, Model};
//! use ratatui::Frame;
//!
//! struct Pick {
//!     size: Select,
//! }
//!
//! #[derive(Debug)]
//! enum Msg {
//!     Size(select::Message),
//! }
//!
//! impl Model for Pick {
//!     type Message = Msg;
//!     type Flags = ();
//!
//!     fn init(_: ()) -> (Self, Command<Msg>) {
//!         let mut size = Select::new(["Small", "Medium", "Large"]);
//!         size.focus();
//!         (Pick { size }, Command::none())
//!     }
//!     fn update(&mut self, msg: Msg) -> Command<Msg> {
//!         match msg {
//!             Msg::Size(select::Message::Update(value)) => {
//!                 self.size.set_value(Some(value));
//!                 Command::none()
//!             }
//!             Msg::Size(m) => self.size.update(m).map(Msg::Size),
//!         }
//!     }
//!     fn view(&self, frame: &mut Frame) {
//!         let area = frame.area();
//!         self.size.view(frame, area);
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     taro::run::<Pick>(()).await.unwrap();
//! }
//! ```

pub use taro_core::*;
pub mod widgets {
    pub use taro_widgets::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use log;
pub use ratatui;
pub use tokio;
