use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into a given [`Rect`] area.
///
/// `Component` is nearly identical to [`Model`](crate::Model) but its
/// [`view`](Component::view) method receives an `area: Rect`, making
/// components composable within layouts.  A parent model decides *where* each
/// child renders by passing it a sub-region of the frame.
///
/// Components report what happened to them through the messages in the
/// returned [`Command`].  A select, for example, answers a key press with
/// `Opened`, or with `Change`/`Update`/`Closed` when an option is chosen.
///
/// # Composition pattern
///
/// Wrap the component's message type in a variant of the parent message and
/// use [`Command::map`] to lift the child's commands.  The parent matches on
/// the child's output messages to react to them:
///
/// ```rust,ignore
/// use taro_core::{Model, Component, Command};
/// use taro_widgets::select::{self, Select};
///
/// struct App { size: Select, chosen: Option<Scalar> }
///
/// enum AppMsg { Size(select::Message) }
///
/// impl Model for App {
///     // ...
///     fn update(&mut self, msg: AppMsg) -> Command<AppMsg> {
///         match msg {
///             AppMsg::Size(select::Message::Update(value)) => {
///                 // The host owns the value; accept the proposal.
///                 self.chosen = Some(value.clone());
///                 self.size.set_value(Some(value));
///                 Command::none()
///             }
///             AppMsg::Size(m) => self.size.update(m).map(AppMsg::Size),
///         }
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    ///
    /// Parent models typically wrap this in one of their own message variants
    /// so that events can be routed to the correct child.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for side effects.
    ///
    /// The returned command uses the component's own `Message` type; the
    /// parent should call [`.map()`](Command::map) to lift it into the parent
    /// message type.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into a specific `area` of the [`Frame`].
    ///
    /// Implementations draw their main body inside `area`.  Popups (such as an
    /// option list) may draw just outside it, over whatever the parent
    /// rendered earlier.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Declare active subscriptions for this component.
    ///
    /// The parent collects child subscriptions and includes them in its own
    /// [`Model::subscriptions`](crate::Model::subscriptions), mapping messages
    /// appropriately.  The default implementation returns an empty list.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }

    /// Whether this component currently has focus.
    ///
    /// A parent can query `focused()` to decide which child should receive
    /// keyboard events.  The default implementation returns `false`.
    fn focused(&self) -> bool {
        false
    }
}
