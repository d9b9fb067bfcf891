//! Horizon Menus - declarative menu trees for desktop applications.
//!
//! This crate turns compact descriptions of menus and menu items into live
//! widget trees, detects the pointer gestures that should surface a context
//! menu, and binds named actions to a system tray icon.
//!
//! - [`DescriptorBuilder`] accumulates label, mnemonic, accelerator, action,
//!   name, icon and children, and validates them into an immutable
//!   [`MenuItemDescriptor`].
//! - [`WidgetRealizer`] turns a descriptor into a [`Widget`] through a
//!   host [`Toolkit`].
//! - [`TriggerDetector`] shows a [`PopupSurface`] when a pointer event is the
//!   platform's popup trigger.
//! - [`TrayBinder`] loads a tray image and binds actions by command.
//!
//! # Example
//!
//! ```
//! use horizon_menus::prelude::*;
//!
//! fn main() -> horizon_menus::Result<()> {
//!     let toolkit = HeadlessToolkit::new();
//!
//!     let file = MenuItemDescriptor::builder()
//!         .markup("&File")
//!         .child(
//!             MenuItemDescriptor::builder()
//!                 .text("Open")
//!                 .accelerator(KeyCombination::ctrl(Key::O))
//!                 .action(Action::new(|event| println!("open from {:?}", event.source)))
//!                 .build()?,
//!         )
//!         .child(MenuItemDescriptor::builder().text("Exit").build()?)
//!         .build()?;
//!
//!     let menu = realize(&toolkit, &file)?;
//!     assert_eq!(menu.children().len(), 2);
//!     assert!(menu.dispatch_key(KeyCombination::ctrl(Key::O)));
//!     Ok(())
//! }
//! ```

pub use horizon_menus_core::{
    Conventions, Key, KeyCombination, KeyboardModifiers, MouseButton, Offset, Platform, Point,
    PointerPhase, PopupTriggerPhase, Signal,
};

mod action;
mod builder;
mod descriptor;
mod error;
mod icon;
#[cfg(feature = "native-tray")]
pub mod native;
mod popup;
mod realize;
mod toolkit;
mod tray;
mod trigger;
mod widget;

pub mod prelude;

pub use action::{Action, ActionEvent, ShowWindowAction};
pub use builder::DescriptorBuilder;
pub use descriptor::{ItemAttributes, MenuItemDescriptor};
pub use error::{MenuError, Result};
pub use icon::{FileImageLoader, Icon, ImageLoadError, ImageLoader};
pub use popup::{MenuEntry, PopupMenu, PopupSurface, activate_popup_item, show_popup};
pub use realize::{
    WidgetRealizer, new_menu_bar, new_popup_menu, new_tool_bar, popup_from_entries, realize,
};
pub use toolkit::{HeadlessToolkit, PeerId, PeerRecord, Toolkit, ToolkitError, WidgetKind};
pub use tray::{TrayBinder, TrayIcon, bind_tray};
pub use trigger::{
    PointerEvent, ScreenMapper, SourceGeometry, TriggerDetector, attach_popup, context_menu,
};
pub use widget::{Activation, Menu, MenuBar, MenuItem, ToolBar, Widget, WidgetId};
