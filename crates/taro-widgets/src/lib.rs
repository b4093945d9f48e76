//! Ready-made widgets for the **taro** TUI framework.
//!
//! Every widget in this crate implements [`taro_core::Component`], so it can be
//! embedded inside any [`taro_core::Model`] and composed freely within
//! [`ratatui`] layouts.
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`select`] | Single-choice select (combobox) with a dropdown list |
//! | [`dropdown`] | Option list overlay used by the select |
//!
//! # Building blocks
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`option`] | Option types and normalization of host-supplied lists |
//! | [`resolve`] | Matching a bound value to the selected option |
//! | [`selection`] | Cursor and scroll state that skips disabled entries |
//! | [`key`] | Key-binding helpers and the select's key map |
//! | [`a11y`] | Accessibility attributes derived from widget state |

pub mod a11y;
pub mod dropdown;
pub mod key;
pub mod option;
pub mod resolve;
pub mod select;
pub mod selection;

pub use option::{normalize, Icon, RawOption, Scalar, SelectOption};
pub use select::{PresentationMode, Select, SelectStyle};
