//! Popup (context) menus.
//!
//! A popup shared between a trigger detector and a tray lives behind a
//! [`Mutex`]. Callbacks never run under that lock: [`show_popup`] emits
//! `shown` after releasing it, and [`activate_popup_item`] runs the chosen
//! item's action after releasing it, so slots and actions may lock the popup
//! again.

use std::sync::Arc;

use horizon_menus_core::logging::targets;
use horizon_menus_core::{Point, Signal};
use parking_lot::Mutex;

use crate::action::Action;
use crate::toolkit::PeerId;
use crate::widget::{Activation, Widget, WidgetId};

/// A surface that can be shown at a screen position.
///
/// [`TriggerDetector`](crate::TriggerDetector) drives implementations of this
/// trait through [`show_popup`]. Showing an already visible surface
/// repositions it.
pub trait PopupSurface {
    /// Record that the surface is shown with its top-left corner at
    /// `screen_pos`, anchored to the widget `invoker`.
    ///
    /// Called with the surface locked; must not call back into user code.
    fn show_at(&mut self, invoker: WidgetId, screen_pos: Point);

    /// Signal to emit once `show_at` has returned and the lock is released.
    fn shown_signal(&self) -> Option<Arc<Signal<Point>>> {
        None
    }
}

/// Show a shared popup, then emit its `shown` signal outside the lock.
pub fn show_popup<P>(popup: &Mutex<P>, invoker: WidgetId, screen_pos: Point)
where
    P: PopupSurface + ?Sized,
{
    let shown = {
        let mut guard = popup.lock();
        guard.show_at(invoker, screen_pos);
        guard.shown_signal()
    };
    if let Some(shown) = shown {
        shown.emit(screen_pos);
    }
}

/// Activate the first item of a shared popup with command name `command`.
///
/// The popup is hidden and unlocked before the item's action runs. Returns
/// `false` if no item matched.
pub fn activate_popup_item(popup: &Mutex<PopupMenu>, command: &str) -> bool {
    let activation = popup.lock().take_activation(command);
    match activation {
        Some(activation) => {
            activation.run();
            true
        }
        None => false,
    }
}

/// A flat popup entry: label, command and action.
#[derive(Debug, Clone)]
pub struct MenuEntry {
    pub label: String,
    pub command: String,
    pub action: Action,
}

impl MenuEntry {
    pub fn new(label: impl Into<String>, command: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            command: command.into(),
            action,
        }
    }
}

/// A realized popup menu.
pub struct PopupMenu {
    id: WidgetId,
    peer: PeerId,
    label: String,
    items: Vec<Widget>,
    visible: bool,
    position: Option<Point>,
    invoker: Option<WidgetId>,

    /// Emitted with the screen position each time the popup is shown.
    pub shown: Arc<Signal<Point>>,
}

impl PopupMenu {
    pub(crate) fn new(peer: PeerId, label: impl Into<String>, items: Vec<Widget>) -> Self {
        Self {
            id: WidgetId::next(),
            peer,
            label: label.into(),
            items,
            visible: false,
            position: None,
            invoker: None,
            shown: Arc::new(Signal::new()),
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn peer(&self) -> PeerId {
        self.peer
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn items(&self) -> &[Widget] {
        &self.items
    }

    pub fn add_item(&mut self, item: Widget) {
        self.items.push(item);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Screen position of the last show.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// The widget the popup was last shown for.
    pub fn invoker(&self) -> Option<WidgetId> {
        self.invoker
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Find the first item with command name `command` and hide the popup.
    ///
    /// The returned activation is run by the caller, after releasing any lock
    /// on the popup. Returns `None` and leaves the popup as it was if no item
    /// matched.
    pub fn take_activation(&mut self, command: &str) -> Option<Activation> {
        let Some(item) = self.items.iter().find_map(|item| item.find(command)) else {
            tracing::debug!(target: targets::TRIGGER, command, "no popup item for command");
            return None;
        };
        let activation = item.activation();
        self.visible = false;
        Some(activation)
    }

    /// Activate the first item with command name `command`.
    ///
    /// Returns `false` if no item matched. A visible popup is hidden after a
    /// successful activation. For a popup behind a lock use
    /// [`activate_popup_item`] instead.
    pub fn activate(&mut self, command: &str) -> bool {
        match self.take_activation(command) {
            Some(activation) => {
                activation.run();
                true
            }
            None => false,
        }
    }
}

impl PopupSurface for PopupMenu {
    fn show_at(&mut self, invoker: WidgetId, screen_pos: Point) {
        self.visible = true;
        self.position = Some(screen_pos);
        self.invoker = Some(invoker);
    }

    fn shown_signal(&self) -> Option<Arc<Signal<Point>>> {
        Some(Arc::clone(&self.shown))
    }
}

impl std::fmt::Debug for PopupMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopupMenu")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("items", &self.items.len())
            .field("visible", &self.visible)
            .field("position", &self.position)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DescriptorBuilder;
    use crate::descriptor::MenuItemDescriptor;
    use crate::widget::MenuItem;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    fn popup_with(names: &[&str], hits: Arc<Mutex<Vec<String>>>) -> PopupMenu {
        let items = names
            .iter()
            .map(|name| {
                let hits = hits.clone();
                let desc: MenuItemDescriptor = DescriptorBuilder::new()
                    .text(*name)
                    .action(Action::new(move |event| hits.lock().push(event.command.clone())))
                    .build()
                    .unwrap();
                Widget::from(MenuItem::from_attributes(PeerId(2), desc.attributes()))
            })
            .collect();
        PopupMenu::new(PeerId(1), "Context", items)
    }

    #[test]
    fn test_show_at_records_position() {
        let mut popup = popup_with(&["Copy"], Arc::default());
        let invoker = WidgetId::next();
        assert!(!popup.is_visible());

        popup.show_at(invoker, Point::new(120.0, 48.0));
        assert!(popup.is_visible());
        assert_eq!(popup.position(), Some(Point::new(120.0, 48.0)));
        assert_eq!(popup.invoker(), Some(invoker));

        popup.show_at(invoker, Point::new(5.0, 5.0));
        assert_eq!(popup.position(), Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_shown_signal() {
        let mut popup = popup_with(&[], Arc::default());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        popup.shown.connect(move |pos| seen_clone.lock().push(*pos));

        let popup = Mutex::new(popup);
        show_popup(&popup, WidgetId::next(), Point::new(1.0, 2.0));
        assert_eq!(*seen.lock(), vec![Point::new(1.0, 2.0)]);
        assert!(popup.lock().is_visible());
    }

    #[test]
    fn test_activate_by_command() {
        let hits = Arc::new(Mutex::new(Vec::new()));
        let mut popup = popup_with(&["Cut", "Paste"], hits.clone());
        popup.show_at(WidgetId::next(), Point::ZERO);

        assert!(popup.activate("Paste"));
        assert!(!popup.is_visible());
        assert!(!popup.activate("Delete"));
        assert_eq!(*hits.lock(), vec!["Paste".to_string()]);
    }

    #[test]
    fn test_shown_slot_can_lock_popup() {
        let popup = Arc::new(Mutex::new(popup_with(&["Copy"], Arc::default())));
        let (tx, rx) = mpsc::channel();
        let slot_popup = Arc::clone(&popup);
        popup.lock().shown.connect(move |_| {
            let position = slot_popup.lock().position();
            tx.send(position).unwrap();
        });

        let shared = Arc::clone(&popup);
        thread::spawn(move || show_popup(&*shared, WidgetId::next(), Point::new(30.0, 40.0)));

        let position = rx.recv_timeout(Duration::from_secs(3)).unwrap();
        assert_eq!(position, Some(Point::new(30.0, 40.0)));
    }

    #[test]
    fn test_item_action_can_lock_popup() {
        let popup = Arc::new(Mutex::new(PopupMenu::new(PeerId(1), "Context", Vec::new())));
        let (tx, rx) = mpsc::channel();
        let action_popup = Arc::clone(&popup);
        let desc: MenuItemDescriptor = DescriptorBuilder::new()
            .text("Close")
            .action(Action::new(move |_| {
                let mut popup = action_popup.lock();
                popup.hide();
                tx.send(popup.is_visible()).unwrap();
            }))
            .build()
            .unwrap();
        popup
            .lock()
            .add_item(Widget::from(MenuItem::from_attributes(PeerId(2), desc.attributes())));
        show_popup(&*popup, WidgetId::next(), Point::ZERO);

        let shared = Arc::clone(&popup);
        let worker = thread::spawn(move || activate_popup_item(&shared, "Close"));

        assert_eq!(rx.recv_timeout(Duration::from_secs(3)), Ok(false));
        assert!(worker.join().unwrap());
        assert!(!activate_popup_item(&popup, "Open"));
    }

    #[test]
    fn test_take_activation_leaves_popup_unlocked() {
        let hits = Arc::new(Mutex::new(Vec::new()));
        let popup = Mutex::new(popup_with(&["Cut"], hits.clone()));
        show_popup(&popup, WidgetId::next(), Point::ZERO);

        let activation = popup.lock().take_activation("Cut").unwrap();
        assert_eq!(activation.event().command, "Cut");
        assert!(!popup.lock().is_visible());
        assert!(hits.lock().is_empty());

        activation.run();
        assert_eq!(*hits.lock(), vec!["Cut".to_string()]);
        assert!(popup.lock().take_activation("Delete").is_none());
    }
}
