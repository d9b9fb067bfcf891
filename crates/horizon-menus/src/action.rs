//! Invocable callbacks attached to menu entries.
//!
//! An [`Action`] is an opaque, cheaply clonable callback. Realized widgets
//! hold a clone and invoke it with an [`ActionEvent`] when activated.
//!
//! # Example
//!
//! ```
//! use horizon_menus::{Action, ActionEvent, WidgetId};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let count = Arc::new(AtomicUsize::new(0));
//! let counter = count.clone();
//! let action = Action::new(move |_event| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! action.invoke(&ActionEvent::new(WidgetId::next(), "save"));
//! assert_eq!(count.load(Ordering::SeqCst), 1);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::widget::WidgetId;

/// The event passed to an action when a widget is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEvent {
    /// The widget that was activated.
    pub source: WidgetId,
    /// The command string of the activated widget.
    pub command: String,
}

impl ActionEvent {
    /// Create a new action event.
    pub fn new(source: WidgetId, command: impl Into<String>) -> Self {
        Self {
            source,
            command: command.into(),
        }
    }
}

/// An opaque callback fired on activation.
///
/// Clones share the same callback. `Action` is `Send + Sync`.
#[derive(Clone)]
pub struct Action {
    handler: Arc<dyn Fn(&ActionEvent) + Send + Sync>,
}

impl Action {
    /// Wrap a closure as an action.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&ActionEvent) + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Invoke the callback.
    pub fn invoke(&self, event: &ActionEvent) {
        (self.handler)(event);
    }

    /// Check whether two actions share the same callback.
    pub fn ptr_eq(&self, other: &Action) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").finish_non_exhaustive()
    }
}

// ============================================================================
// Show Window Action
// ============================================================================

/// An action that asks the application to show a window.
///
/// The action carries a command name and the title of the window to show.
/// When invoked, the show callback receives the title and the triggering
/// event.
///
/// ```
/// use horizon_menus::ShowWindowAction;
///
/// let about = ShowWindowAction::new("about", |title, _event| {
///     println!("showing {title}");
/// })
/// .with_title("About Horizon");
///
/// assert_eq!(about.name(), "about");
/// assert_eq!(about.title(), "About Horizon");
/// ```
#[derive(Clone)]
pub struct ShowWindowAction {
    name: String,
    title: String,
    on_show: Arc<dyn Fn(&str, &ActionEvent) + Send + Sync>,
}

impl ShowWindowAction {
    /// Create an action whose window title equals its name.
    pub fn new<F>(name: impl Into<String>, on_show: F) -> Self
    where
        F: Fn(&str, &ActionEvent) + Send + Sync + 'static,
    {
        let name = name.into();
        Self {
            title: name.clone(),
            name,
            on_show: Arc::new(on_show),
        }
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// The command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The title of the window to show.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Convert into a plain [`Action`] for attaching to a menu entry.
    pub fn into_action(self) -> Action {
        Action::new(move |event| (self.on_show)(&self.title, event))
    }
}

impl From<ShowWindowAction> for Action {
    fn from(action: ShowWindowAction) -> Self {
        action.into_action()
    }
}

impl fmt::Debug for ShowWindowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowWindowAction")
            .field("name", &self.name)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}
