//! Convenient re-exports for typical menu construction.
//!
//! ```
//! use horizon_menus::prelude::*;
//! ```

pub use crate::{
    Action, ActionEvent, Conventions, DescriptorBuilder, HeadlessToolkit, Key, KeyCombination,
    KeyboardModifiers, MenuError, MenuItemDescriptor, MouseButton, Point, PointerEvent,
    PointerPhase, PopupMenu, PopupSurface, ScreenMapper, Toolkit, TriggerDetector, Widget,
    WidgetRealizer, activate_popup_item, bind_tray, realize, show_popup,
};
