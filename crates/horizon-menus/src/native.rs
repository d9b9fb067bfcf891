//! Native system tray backed by the `tray-icon` crate.
//!
//! [`NativeTray`] mirrors a bound [`TrayIcon`] into the platform tray: the
//! image and tooltip become the native icon, and the items of the tray's
//! popup become its context menu. [`NativeTray::process_events`] routes
//! native clicks back into the bound icon and menu selections back into the
//! popup's items.
//!
//! On Linux this needs GTK with libappindicator (or libayatana-appindicator)
//! and a running GTK main loop.
//!
//! ```ignore
//! let native = NativeTray::show(&tray)?;
//! loop {
//!     native.process_events(&mut tray);
//!     // ... run the host event loop
//! }
//! ```

use std::collections::HashMap;

use horizon_menus_core::logging::targets;
use tray_icon::menu::{IsMenuItem, Menu as NativeMenu, MenuEvent, MenuId, MenuItem, Submenu};
use tray_icon::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent};

use crate::popup::activate_popup_item;
use crate::tray::TrayIcon;
use crate::widget::Widget;

/// Errors raised while creating the native tray.
#[derive(Debug, thiserror::Error)]
pub enum NativeTrayError {
    #[error("tray image rejected: {0}")]
    Icon(#[from] tray_icon::BadIcon),

    #[error("tray menu construction failed: {0}")]
    Menu(#[from] tray_icon::menu::Error),

    #[error("tray icon creation failed: {0}")]
    Tray(#[from] tray_icon::Error),
}

/// A visible platform tray icon.
pub struct NativeTray {
    inner: tray_icon::TrayIcon,
    commands: HashMap<MenuId, String>,
}

impl NativeTray {
    /// Show `tray` in the platform tray.
    pub fn show(tray: &TrayIcon) -> Result<Self, NativeTrayError> {
        let image = tray.image();
        let icon =
            tray_icon::Icon::from_rgba(image.rgba().to_vec(), image.width(), image.height())?;

        let menu = NativeMenu::new();
        let mut commands = HashMap::new();
        {
            let popup = tray.popup().lock();
            append_widgets(popup.items(), &mut commands, &|item| menu.append(item))?;
        }

        let inner = TrayIconBuilder::new()
            .with_icon(icon)
            .with_tooltip(tray.tooltip())
            .with_menu(Box::new(menu))
            .build()?;

        tracing::debug!(
            target: targets::TRAY,
            tooltip = tray.tooltip(),
            menu_items = commands.len(),
            "native tray shown"
        );
        Ok(Self { inner, commands })
    }

    /// Drain pending native events into `tray`.
    ///
    /// A left click activates the current command; a menu selection
    /// activates the popup item with the matching command name. Returns the
    /// number of events handled.
    pub fn process_events(&self, tray: &mut TrayIcon) -> usize {
        let mut count = 0;

        while let Ok(event) = TrayIconEvent::receiver().try_recv() {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                tray.activate();
                count += 1;
            }
        }

        while let Ok(event) = MenuEvent::receiver().try_recv() {
            match self.commands.get(event.id()) {
                Some(command) => {
                    activate_popup_item(tray.popup(), command);
                    count += 1;
                }
                None => {
                    tracing::trace!(
                        target: targets::TRAY,
                        id = ?event.id(),
                        "menu event from another menu"
                    );
                }
            }
        }

        count
    }

    /// Update the native tooltip.
    pub fn set_tooltip(&self, tooltip: &str) -> Result<(), NativeTrayError> {
        self.inner.set_tooltip(Some(tooltip))?;
        Ok(())
    }
}

impl std::fmt::Debug for NativeTray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeTray")
            .field("menu_items", &self.commands.len())
            .finish_non_exhaustive()
    }
}

fn append_widgets(
    widgets: &[Widget],
    commands: &mut HashMap<MenuId, String>,
    append: &dyn Fn(&dyn IsMenuItem) -> tray_icon::menu::Result<()>,
) -> Result<(), NativeTrayError> {
    for widget in widgets {
        match widget {
            Widget::Item(item) => {
                let native = MenuItem::new(item.text(), true, None);
                commands.insert(native.id().clone(), item.name().to_string());
                append(&native)?;
            }
            Widget::Menu(menu) => {
                let submenu = Submenu::new(menu.text(), true);
                append_widgets(menu.children(), commands, &|item| submenu.append(item))?;
                append(&submenu)?;
            }
        }
    }
    Ok(())
}
