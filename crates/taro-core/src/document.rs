//! Document-level listeners for interactions that happen outside a component.
//!
//! A popup-style component (a select's option list, a menu) has to close when
//! the user clicks somewhere else or focus moves away. The component cannot
//! see those events itself: they are routed to whichever widget owns them, or
//! to nobody. The [`Document`] is the one place every interaction passes
//! through. Components register with it and are told when an interaction
//! lands outside the area they last rendered.
//!
//! Registration is a scoped resource. [`Document::register`] returns a
//! [`ListenerGuard`]; the listener stays registered until the guard is
//! released or dropped, so a component torn down in any way stops receiving
//! notifications. Releasing twice is harmless.
//!
//! # Example
//!
//! ```rust,ignore
//! let document = Document::new();
//! let guard = document.register();
//! guard.set_bounds([Rect::new(0, 0, 20, 1)]);
//!
//! // Host forwards every terminal event:
//! let outside = document.dispatch(&event);
//! if outside.contains(&guard.id()) {
//!     // close the popup
//! }
//! ```

use crate::event::TerminalEvent;
use crate::subscription::{Subscription, SubscriptionId};
use futures::StreamExt;
use ratatui::layout::{Position, Rect};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

static NEXT_LISTENER: AtomicU64 = AtomicU64::new(1);

/// Identity of a registered listener. Unique for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        ListenerId(NEXT_LISTENER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Default)]
struct Listener {
    bounds: Vec<Rect>,
    sink: Option<mpsc::UnboundedSender<()>>,
}

impl Listener {
    fn contains(&self, position: Position) -> bool {
        self.bounds.iter().any(|rect| rect.contains(position))
    }
}

#[derive(Default)]
struct Registry {
    listeners: HashMap<ListenerId, Listener>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    // The registry holds plain data; a panic elsewhere cannot leave it torn.
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Cloneable handle to the shared listener registry.
///
/// One `Document` typically lives in the host model and is handed to every
/// component that needs outside-interaction detection.
#[derive(Clone, Default)]
pub struct Document {
    registry: Arc<Mutex<Registry>>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new listener. It stays registered until the returned guard
    /// is released or dropped.
    pub fn register(&self) -> ListenerGuard {
        let id = ListenerId::next();
        lock(&self.registry)
            .listeners
            .insert(id, Listener::default());
        log::trace!("document listener {} registered", id.0);
        ListenerGuard {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        lock(&self.registry).listeners.len()
    }

    /// Whether the given listener is still registered.
    pub fn is_registered(&self, id: ListenerId) -> bool {
        lock(&self.registry).listeners.contains_key(&id)
    }

    /// Route a terminal event through the document.
    ///
    /// A primary-button press notifies every listener whose recorded bounds do
    /// not contain the pressed cell. Losing terminal focus notifies every
    /// listener. Other events notify nobody.
    ///
    /// Returns the notified listeners in ascending id order. Listeners with an
    /// active [`subscription`](ListenerGuard::subscription) also receive a
    /// message through the runtime.
    pub fn dispatch(&self, event: &TerminalEvent) -> Vec<ListenerId> {
        let mut registry = lock(&self.registry);
        let targets: Vec<ListenerId> = match event {
            TerminalEvent::FocusLost => registry.listeners.keys().copied().collect(),
            _ => match event.primary_press() {
                Some(position) => registry
                    .listeners
                    .iter()
                    .filter(|(_, listener)| !listener.contains(position))
                    .map(|(id, _)| *id)
                    .collect(),
                None => Vec::new(),
            },
        };
        notify(&mut registry, targets)
    }

    /// Report that keyboard focus moved to `owner` (or to nothing).
    ///
    /// Every listener other than `owner` is notified.
    pub fn focus_changed(&self, owner: Option<ListenerId>) -> Vec<ListenerId> {
        let mut registry = lock(&self.registry);
        let targets = registry
            .listeners
            .keys()
            .copied()
            .filter(|id| Some(*id) != owner)
            .collect();
        notify(&mut registry, targets)
    }
}

fn notify(registry: &mut Registry, mut targets: Vec<ListenerId>) -> Vec<ListenerId> {
    targets.sort_unstable();
    for id in &targets {
        if let Some(listener) = registry.listeners.get_mut(id) {
            let closed = listener
                .sink
                .as_ref()
                .is_some_and(|sink| sink.send(()).is_err());
            if closed {
                listener.sink = None;
            }
        }
    }
    if !targets.is_empty() {
        log::trace!("outside interaction for listeners {targets:?}");
    }
    targets
}

/// Scoped registration with a [`Document`].
///
/// Dropping the guard deregisters the listener. The guard only holds a weak
/// reference, so it never keeps a discarded document alive.
pub struct ListenerGuard {
    id: ListenerId,
    registry: Weak<Mutex<Registry>>,
}

impl ListenerGuard {
    /// This listener's id.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether the listener is still registered with a live document.
    pub fn is_registered(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| lock(&registry).listeners.contains_key(&self.id))
    }

    /// Record the screen areas that count as "inside" this listener.
    ///
    /// Components call this from `view` with everything they drew, so the
    /// bounds follow layout changes and popups opening or closing.
    pub fn set_bounds(&self, bounds: impl IntoIterator<Item = Rect>) {
        if let Some(registry) = self.registry.upgrade() {
            if let Some(listener) = lock(&registry).listeners.get_mut(&self.id) {
                listener.bounds = bounds.into_iter().filter(|r| !r.is_empty()).collect();
            }
        }
    }

    /// Deregister the listener. Calling this more than once is a no-op.
    pub fn release(&self) {
        if let Some(registry) = self.registry.upgrade() {
            if lock(&registry).listeners.remove(&self.id).is_some() {
                log::trace!("document listener {} released", self.id.0);
            }
        }
    }

    /// A subscription delivering `map()` every time this listener is notified.
    ///
    /// The subscription id is derived from the listener id, so re-declaring it
    /// on every update keeps the same running subscription.
    pub fn subscription<Msg: Send + 'static>(
        &self,
        map: impl Fn() -> Msg + Send + Sync + 'static,
    ) -> Subscription<Msg> {
        let id = self.id;
        let registry = self.registry.clone();
        Subscription::from_fn(SubscriptionId::new::<ListenerGuard>(id.0), move || {
            let (tx, rx) = mpsc::unbounded_channel();
            if let Some(registry) = registry.upgrade() {
                if let Some(listener) = lock(&registry).listeners.get_mut(&id) {
                    listener.sink = Some(tx);
                }
            }
            Box::pin(UnboundedReceiverStream::new(rx).map(move |()| map()))
        })
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("id", &self.id)
            .field("registered", &self.is_registered())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::SubscriptionManager;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

    fn click(column: u16, row: u16) -> TerminalEvent {
        TerminalEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn register_and_release() {
        let document = Document::new();
        let guard = document.register();
        assert_eq!(document.listener_count(), 1);
        assert!(guard.is_registered());

        guard.release();
        assert_eq!(document.listener_count(), 0);
        assert!(!guard.is_registered());
    }

    #[test]
    fn double_release_is_harmless() {
        let document = Document::new();
        let guard = document.register();
        guard.release();
        guard.release();
        drop(guard);
        assert_eq!(document.listener_count(), 0);
    }

    #[test]
    fn drop_releases() {
        let document = Document::new();
        {
            let _guard = document.register();
            assert_eq!(document.listener_count(), 1);
        }
        assert_eq!(document.listener_count(), 0);
    }

    #[test]
    fn guard_outliving_document_is_inert() {
        let document = Document::new();
        let guard = document.register();
        drop(document);
        assert!(!guard.is_registered());
        guard.set_bounds([Rect::new(0, 0, 1, 1)]);
        guard.release();
    }

    #[test]
    fn listener_ids_are_unique() {
        let a = Document::new().register();
        let b = Document::new().register();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn click_outside_notifies() {
        let document = Document::new();
        let guard = document.register();
        guard.set_bounds([Rect::new(0, 0, 10, 1)]);

        assert_eq!(document.dispatch(&click(20, 5)), vec![guard.id()]);
    }

    #[test]
    fn click_inside_any_bound_is_ignored() {
        let document = Document::new();
        let guard = document.register();
        guard.set_bounds([Rect::new(0, 0, 10, 1), Rect::new(0, 1, 10, 4)]);

        assert!(document.dispatch(&click(3, 0)).is_empty());
        assert!(document.dispatch(&click(3, 3)).is_empty());
    }

    #[test]
    fn click_only_notifies_listeners_it_missed() {
        let document = Document::new();
        let left = document.register();
        let right = document.register();
        left.set_bounds([Rect::new(0, 0, 10, 1)]);
        right.set_bounds([Rect::new(20, 0, 10, 1)]);

        assert_eq!(document.dispatch(&click(2, 0)), vec![right.id()]);
    }

    #[test]
    fn focus_lost_notifies_everyone() {
        let document = Document::new();
        let a = document.register();
        let b = document.register();
        a.set_bounds([Rect::new(0, 0, 10, 1)]);

        let notified = document.dispatch(&TerminalEvent::FocusLost);
        assert_eq!(notified, vec![a.id(), b.id()]);
    }

    #[test]
    fn resize_notifies_nobody() {
        let document = Document::new();
        let _guard = document.register();
        assert!(document.dispatch(&TerminalEvent::Resize(80, 24)).is_empty());
    }

    #[test]
    fn focus_changed_skips_owner() {
        let document = Document::new();
        let a = document.register();
        let b = document.register();

        assert_eq!(document.focus_changed(Some(a.id())), vec![b.id()]);
        assert_eq!(document.focus_changed(None), vec![a.id(), b.id()]);
    }

    #[test]
    fn released_listener_is_not_notified() {
        let document = Document::new();
        let guard = document.register();
        let id = guard.id();
        drop(guard);
        assert!(!document.dispatch(&TerminalEvent::FocusLost).contains(&id));
    }

    #[tokio::test]
    async fn subscription_delivers_notifications() {
        let document = Document::new();
        let guard = document.register();
        guard.set_bounds([Rect::new(0, 0, 10, 1)]);

        let (tx, mut rx) = mpsc::unbounded_channel::<&'static str>();
        let mut manager = SubscriptionManager::new(tx);
        manager.reconcile(vec![guard.subscription(|| "outside")]);

        document.dispatch(&click(50, 10));
        assert_eq!(rx.recv().await, Some("outside"));

        manager.shutdown();
    }
}
