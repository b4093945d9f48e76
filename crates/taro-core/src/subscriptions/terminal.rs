use crate::event::TerminalEvent;
use crate::subscription::{Subscription, SubscriptionId};
use crossterm::event::EventStream;
use futures::StreamExt;
use std::sync::Arc;

/// Identity marker for the terminal event subscription.
///
/// There is exactly one terminal event stream per program, so every
/// [`terminal_events`] subscription shares this id and the runtime keeps the
/// first one alive across update cycles.
pub struct TerminalEvents;

/// Create a terminal events subscription that maps each event through a
/// user-provided function.
///
/// The `map` closure receives every [`TerminalEvent`] and returns `Some(Msg)`
/// to forward it to the runtime or `None` to discard it.
///
/// # Example
///
/// ```rust,ignore
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     vec![terminal_events(|event| Some(Msg::Terminal(event)))]
/// }
/// ```
pub fn terminal_events<Msg: Send + 'static>(
    map: impl Fn(TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    let map = Arc::new(map);

    // The EventStream is built lazily when the runtime starts the
    // subscription. Building it on every subscriptions() call would poke
    // crossterm's global reader and disturb the active stream.
    Subscription::from_fn(SubscriptionId::of::<TerminalEvents>(), move || {
        let stream = EventStream::new().filter_map(move |result| {
            let map = map.clone();
            async move {
                match result {
                    Ok(event) => map(TerminalEvent::from(event)),
                    Err(err) => {
                        log::warn!("terminal event stream error: {err}");
                        None
                    }
                }
            }
        });
        Box::pin(stream)
    })
}
