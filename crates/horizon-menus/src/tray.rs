//! System tray icons.
//!
//! [`bind_tray`] loads the tray image, creates the tray peer and registers
//! one listener per command. Every listener remembers the command that was
//! current when it was added, so activating a command only reaches the
//! listeners registered for it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use horizon_menus::{Action, FileImageLoader, HeadlessToolkit, bind_tray, new_popup_menu};
//!
//! let toolkit = HeadlessToolkit::new();
//! let popup = Arc::new(Mutex::new(new_popup_menu(&toolkit, "Tray", Vec::new())?));
//!
//! let mut tray = bind_tray(
//!     &toolkit,
//!     FileImageLoader,
//!     "icons/app.png",
//!     "My App",
//!     popup,
//!     [
//!         ("open", Action::new(|_| println!("open"))),
//!         ("exit", Action::new(|_| std::process::exit(0))),
//!     ],
//! )?;
//!
//! tray.activate_command("open");
//! # Ok::<(), horizon_menus::MenuError>(())
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use horizon_menus_core::Signal;
use horizon_menus_core::logging::targets;
use parking_lot::Mutex;

use crate::action::{Action, ActionEvent};
use crate::error::{MenuError, Result};
use crate::icon::{Icon, ImageLoader};
use crate::popup::PopupMenu;
use crate::toolkit::{PeerId, Toolkit, WidgetKind};
use crate::widget::WidgetId;

struct TrayListener {
    command: Option<String>,
    action: Action,
}

/// A bound system tray icon.
pub struct TrayIcon {
    id: WidgetId,
    peer: PeerId,
    image: Icon,
    image_path: PathBuf,
    tooltip: String,
    popup: Arc<Mutex<PopupMenu>>,
    action_command: Option<String>,
    listeners: Vec<TrayListener>,

    /// Emitted after the listeners of an activation have run.
    pub activated: Signal<ActionEvent>,
}

impl TrayIcon {
    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn peer(&self) -> PeerId {
        self.peer
    }

    /// The tooltip, which is the application name.
    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    pub fn image(&self) -> &Icon {
        &self.image
    }

    /// The path the image was loaded from.
    pub fn image_path(&self) -> &Path {
        &self.image_path
    }

    /// The popup shown from the tray.
    pub fn popup(&self) -> &Arc<Mutex<PopupMenu>> {
        &self.popup
    }

    /// The current action command.
    pub fn action_command(&self) -> Option<&str> {
        self.action_command.as_deref()
    }

    pub fn set_action_command(&mut self, command: impl Into<String>) {
        self.action_command = Some(command.into());
    }

    /// Add a listener bound to the current action command.
    pub fn add_action_listener(&mut self, action: Action) {
        self.listeners.push(TrayListener {
            command: self.action_command.clone(),
            action,
        });
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Fire the listeners bound to the current action command.
    ///
    /// Returns the number of listeners invoked.
    pub fn activate(&self) -> usize {
        let command = self.action_command.as_deref().unwrap_or_default();
        let event = ActionEvent::new(self.id, command);
        let mut fired = 0;
        for listener in &self.listeners {
            if listener.command == self.action_command {
                listener.action.invoke(&event);
                fired += 1;
            }
        }
        tracing::debug!(target: targets::TRAY, command, fired, "tray activated");
        self.activated.emit(event);
        fired
    }

    /// Make `command` current and activate it.
    pub fn activate_command(&mut self, command: impl Into<String>) -> usize {
        self.set_action_command(command);
        self.activate()
    }
}

impl std::fmt::Debug for TrayIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrayIcon")
            .field("id", &self.id)
            .field("tooltip", &self.tooltip)
            .field("image_path", &self.image_path)
            .field("action_command", &self.action_command)
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}

/// Creates tray icons from a toolkit and an image loader.
#[derive(Debug, Clone)]
pub struct TrayBinder<T, L> {
    toolkit: T,
    loader: L,
}

impl<T: Toolkit, L: ImageLoader> TrayBinder<T, L> {
    pub fn new(toolkit: T, loader: L) -> Self {
        Self { toolkit, loader }
    }

    /// Bind a tray icon.
    ///
    /// For each `(command, action)` pair, in iteration order, the command is
    /// made current and the action is added as a listener. The last command
    /// stays current afterwards.
    ///
    /// # Errors
    ///
    /// - [`MenuError::ImageLoad`] if the image cannot be loaded.
    /// - [`MenuError::WidgetCreation`] if the toolkit refuses the tray peer.
    #[tracing::instrument(
        skip_all,
        target = "horizon_menus::tray",
        level = "trace",
        fields(app_name = %app_name)
    )]
    pub fn bind<I, C>(
        &self,
        image_path: impl AsRef<Path>,
        app_name: &str,
        popup: Arc<Mutex<PopupMenu>>,
        actions_by_command: I,
    ) -> Result<TrayIcon>
    where
        I: IntoIterator<Item = (C, Action)>,
        C: Into<String>,
    {
        let image_path = image_path.as_ref();
        let image = self
            .loader
            .load(image_path)
            .map_err(|e| MenuError::image_load(image_path, e))?;

        let peer = self
            .toolkit
            .create_peer(WidgetKind::TrayIcon, app_name)
            .map_err(|err| {
                tracing::warn!(
                    target: targets::TRAY,
                    reason = %err.reason,
                    "toolkit refused tray icon"
                );
                MenuError::from(err)
            })?;

        let mut tray = TrayIcon {
            id: WidgetId::next(),
            peer,
            image,
            image_path: image_path.to_path_buf(),
            tooltip: app_name.to_string(),
            popup,
            action_command: None,
            listeners: Vec::new(),
            activated: Signal::new(),
        };

        for (command, action) in actions_by_command {
            tray.set_action_command(command);
            tray.add_action_listener(action);
        }

        tracing::debug!(
            target: targets::TRAY,
            path = %image_path.display(),
            listeners = tray.listener_count(),
            "bound tray icon"
        );
        Ok(tray)
    }
}

/// Bind a tray icon; see [`TrayBinder::bind`].
pub fn bind_tray<T, L, I, C>(
    toolkit: T,
    loader: L,
    image_path: impl AsRef<Path>,
    app_name: &str,
    popup: Arc<Mutex<PopupMenu>>,
    actions_by_command: I,
) -> Result<TrayIcon>
where
    T: Toolkit,
    L: ImageLoader,
    I: IntoIterator<Item = (C, Action)>,
    C: Into<String>,
{
    TrayBinder::new(toolkit, loader).bind(image_path, app_name, popup, actions_by_command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::ImageLoadError;
    use crate::realize::new_popup_menu;
    use crate::toolkit::HeadlessToolkit;

    struct SolidLoader;

    impl ImageLoader for SolidLoader {
        fn load(&self, _path: &Path) -> std::result::Result<Icon, ImageLoadError> {
            Icon::from_rgba(vec![0; 16 * 16 * 4], 16, 16)
        }
    }

    struct MissingLoader;

    impl ImageLoader for MissingLoader {
        fn load(&self, _path: &Path) -> std::result::Result<Icon, ImageLoadError> {
            Err(ImageLoadError::InvalidDimensions {
                width: 0,
                height: 0,
                len: 1,
            })
        }
    }

    fn popup(toolkit: &HeadlessToolkit) -> Arc<Mutex<PopupMenu>> {
        Arc::new(Mutex::new(new_popup_menu(toolkit, "Tray", Vec::new()).unwrap()))
    }

    fn counter() -> (Arc<Mutex<usize>>, Action) {
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();
        (count, Action::new(move |_| *count_clone.lock() += 1))
    }

    #[test]
    fn test_commands_reach_only_their_listeners() {
        let toolkit = HeadlessToolkit::new();
        let (opened, open) = counter();
        let (exited, exit) = counter();

        let mut tray = bind_tray(
            &toolkit,
            SolidLoader,
            "app.png",
            "Horizon",
            popup(&toolkit),
            [("open", open), ("exit", exit)],
        )
        .unwrap();

        assert_eq!(tray.activate_command("open"), 1);
        assert_eq!((*opened.lock(), *exited.lock()), (1, 0));

        assert_eq!(tray.activate_command("exit"), 1);
        assert_eq!((*opened.lock(), *exited.lock()), (1, 1));

        assert_eq!(tray.activate_command("settings"), 0);
    }

    #[test]
    fn test_last_command_stays_current() {
        let toolkit = HeadlessToolkit::new();
        let (_, open) = counter();
        let (exited, exit) = counter();
        let tray = bind_tray(
            &toolkit,
            SolidLoader,
            "app.png",
            "Horizon",
            popup(&toolkit),
            vec![("open", open), ("exit", exit)],
        )
        .unwrap();

        assert_eq!(tray.action_command(), Some("exit"));
        assert_eq!(tray.listener_count(), 2);
        tray.activate();
        assert_eq!(*exited.lock(), 1);
    }

    #[test]
    fn test_tray_attributes() {
        let toolkit = HeadlessToolkit::new();
        let shared = popup(&toolkit);
        let tray = bind_tray(
            &toolkit,
            SolidLoader,
            "icons/tray.png",
            "Horizon",
            shared.clone(),
            Vec::<(String, Action)>::new(),
        )
        .unwrap();

        assert_eq!(tray.tooltip(), "Horizon");
        assert_eq!(tray.image().width(), 16);
        assert_eq!(tray.image_path(), Path::new("icons/tray.png"));
        assert!(Arc::ptr_eq(tray.popup(), &shared));
        assert_eq!(tray.action_command(), None);
        assert_eq!(toolkit.peer(tray.peer()).unwrap().kind, WidgetKind::TrayIcon);
    }

    #[test]
    fn test_image_failure() {
        let toolkit = HeadlessToolkit::new();
        let err = bind_tray(
            &toolkit,
            MissingLoader,
            "missing.png",
            "Horizon",
            popup(&toolkit),
            Vec::<(String, Action)>::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MenuError::ImageLoad { ref path, .. } if path == Path::new("missing.png")
        ));
    }

    #[test]
    fn test_refused_tray_peer() {
        let toolkit = HeadlessToolkit::new();
        let shared = popup(&toolkit);
        toolkit.refuse(WidgetKind::TrayIcon);
        let err = TrayBinder::new(&toolkit, SolidLoader)
            .bind("app.png", "Horizon", shared, Vec::<(String, Action)>::new())
            .unwrap_err();
        assert!(matches!(err, MenuError::WidgetCreation { kind: WidgetKind::TrayIcon, .. }));
    }

    #[test]
    fn test_activated_signal_carries_command() {
        let toolkit = HeadlessToolkit::new();
        let mut tray = bind_tray(
            &toolkit,
            SolidLoader,
            "app.png",
            "Horizon",
            popup(&toolkit),
            Vec::<(String, Action)>::new(),
        )
        .unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        tray.activated.connect(move |event| seen_clone.lock().push(event.command.clone()));

        tray.activate_command("about");
        assert_eq!(*seen.lock(), vec!["about".to_string()]);
    }
}
