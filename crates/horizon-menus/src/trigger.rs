//! Popup trigger detection.
//!
//! A [`TriggerDetector`] sits between a source widget's pointer events and a
//! shared popup. Every event is judged on its own: if the host marked it as
//! the platform's popup trigger, the popup is shown under the pointer.
//! Nothing is carried between a press and its release.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_menus::{
//!     HeadlessToolkit, MouseButton, Offset, Point, PointerEvent, PointerPhase,
//!     SourceGeometry, WidgetId, context_menu,
//! };
//!
//! let toolkit = HeadlessToolkit::new();
//! let source = Arc::new(SourceGeometry::new(WidgetId::next(), Offset::new(100.0, 50.0)));
//! let detector = context_menu(&toolkit, "Edit", source, Vec::new()).unwrap();
//!
//! let event = PointerEvent::new(MouseButton::Right, PointerPhase::Press, Point::new(5.0, 5.0))
//!     .with_popup_trigger(true);
//! assert!(detector.handle(&event));
//! assert_eq!(detector.popup().lock().position(), Some(Point::new(105.0, 55.0)));
//! ```

use std::sync::Arc;

use horizon_menus_core::logging::targets;
use horizon_menus_core::{
    Conventions, KeyboardModifiers, MouseButton, Offset, Point, PointerPhase,
};
use parking_lot::Mutex;

use crate::error::Result;
use crate::popup::{PopupMenu, PopupSurface, show_popup};
use crate::realize::new_popup_menu;
use crate::toolkit::Toolkit;
use crate::widget::{Widget, WidgetId};

/// A pointer button event delivered to a source widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub button: MouseButton,
    pub phase: PointerPhase,
    /// Set by the host when this event is the platform's popup gesture.
    pub popup_trigger: bool,
    /// Position relative to the source widget.
    pub local_pos: Point,
    pub modifiers: KeyboardModifiers,
}

impl PointerEvent {
    /// Create an event without the popup-trigger flag or modifiers.
    pub fn new(button: MouseButton, phase: PointerPhase, local_pos: Point) -> Self {
        Self {
            button,
            phase,
            popup_trigger: false,
            local_pos,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Create an event whose popup-trigger flag is computed from
    /// `conventions`, for hosts that do not report one.
    pub fn from_conventions(
        conventions: &Conventions,
        button: MouseButton,
        phase: PointerPhase,
        local_pos: Point,
        modifiers: KeyboardModifiers,
    ) -> Self {
        Self {
            button,
            phase,
            popup_trigger: conventions.is_popup_trigger(button, phase, modifiers),
            local_pos,
            modifiers,
        }
    }

    pub fn with_popup_trigger(mut self, popup_trigger: bool) -> Self {
        self.popup_trigger = popup_trigger;
        self
    }

    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Maps positions local to a widget into screen space.
pub trait ScreenMapper {
    /// The widget the popup is anchored to.
    fn widget_id(&self) -> WidgetId;

    /// Translate a widget-local point to screen coordinates.
    fn map_to_global(&self, local: Point) -> Point;
}

impl<T: ScreenMapper + ?Sized> ScreenMapper for &T {
    fn widget_id(&self) -> WidgetId {
        (**self).widget_id()
    }

    fn map_to_global(&self, local: Point) -> Point {
        (**self).map_to_global(local)
    }
}

impl<T: ScreenMapper + ?Sized> ScreenMapper for Arc<T> {
    fn widget_id(&self) -> WidgetId {
        (**self).widget_id()
    }

    fn map_to_global(&self, local: Point) -> Point {
        (**self).map_to_global(local)
    }
}

/// The screen placement of a source widget: its id and the screen position
/// of its top-left corner.
///
/// The origin can be updated as the widget moves.
#[derive(Debug)]
pub struct SourceGeometry {
    id: WidgetId,
    origin: Mutex<Offset>,
}

impl SourceGeometry {
    pub fn new(id: WidgetId, origin: Offset) -> Self {
        Self {
            id,
            origin: Mutex::new(origin),
        }
    }

    pub fn set_origin(&self, origin: Offset) {
        *self.origin.lock() = origin;
    }

    pub fn origin(&self) -> Offset {
        *self.origin.lock()
    }
}

impl ScreenMapper for SourceGeometry {
    fn widget_id(&self) -> WidgetId {
        self.id
    }

    fn map_to_global(&self, local: Point) -> Point {
        local.translate(self.origin())
    }
}

/// Shows a shared popup when a source widget receives the popup trigger.
pub struct TriggerDetector<P, S> {
    popup: Arc<Mutex<P>>,
    source: S,
}

impl<P: PopupSurface, S: ScreenMapper> TriggerDetector<P, S> {
    pub fn new(popup: Arc<Mutex<P>>, source: S) -> Self {
        Self { popup, source }
    }

    /// The shared popup.
    pub fn popup(&self) -> &Arc<Mutex<P>> {
        &self.popup
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Handle a button press. Returns whether the popup was shown.
    pub fn mouse_pressed(&self, event: &PointerEvent) -> bool {
        self.handle(event)
    }

    /// Handle a button release. Returns whether the popup was shown.
    pub fn mouse_released(&self, event: &PointerEvent) -> bool {
        self.handle(event)
    }

    /// Show the popup at the event position if the event is a popup trigger.
    pub fn handle(&self, event: &PointerEvent) -> bool {
        if !event.popup_trigger {
            tracing::trace!(
                target: targets::TRIGGER,
                button = ?event.button,
                phase = ?event.phase,
                "not a popup trigger"
            );
            return false;
        }

        let anchor = self.source.map_to_global(event.local_pos);
        tracing::debug!(
            target: targets::TRIGGER,
            phase = ?event.phase,
            x = anchor.x,
            y = anchor.y,
            "showing popup"
        );
        show_popup(&*self.popup, self.source.widget_id(), anchor);
        true
    }
}

impl<P, S: std::fmt::Debug> std::fmt::Debug for TriggerDetector<P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerDetector")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Attach a shared popup to a source widget.
pub fn attach_popup<P: PopupSurface, S: ScreenMapper>(
    popup: Arc<Mutex<P>>,
    source: S,
) -> TriggerDetector<P, S> {
    TriggerDetector::new(popup, source)
}

/// Create a popup menu from `items` and attach it to `source`.
pub fn context_menu<T: Toolkit, S: ScreenMapper>(
    toolkit: T,
    label: &str,
    source: S,
    items: Vec<Widget>,
) -> Result<TriggerDetector<PopupMenu, S>> {
    let popup = new_popup_menu(toolkit, label, items)?;
    Ok(attach_popup(Arc::new(Mutex::new(popup)), source))
}
