//! Built-in subscription sources.
//!
//! - **Terminal events** ([`terminal_events`]) -- keyboard, mouse, resize,
//!   focus, and paste events from the terminal.
//!
//! Outside-interaction notifications come from
//! [`ListenerGuard::subscription`](crate::document::ListenerGuard::subscription).

mod terminal;

pub use terminal::*;
