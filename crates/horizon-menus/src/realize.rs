//! Turning descriptors into widgets.
//!
//! [`WidgetRealizer`] walks a descriptor tree depth first, asking the
//! [`Toolkit`] for one native peer per node. Children are realized in
//! display order and appended to their parent; the first failure aborts the
//! whole realization and no partial tree is returned.

use horizon_menus_core::logging::targets;

use crate::builder::DescriptorBuilder;
use crate::descriptor::{ItemAttributes, MenuItemDescriptor};
use crate::error::Result;
use crate::popup::{MenuEntry, PopupMenu};
use crate::toolkit::{PeerId, Toolkit, ToolkitError, WidgetKind};
use crate::widget::{Menu, MenuBar, MenuItem, ToolBar, Widget};

/// Realizes descriptors against a toolkit.
#[derive(Debug, Clone, Copy)]
pub struct WidgetRealizer<T> {
    toolkit: T,
}

impl<T: Toolkit> WidgetRealizer<T> {
    pub fn new(toolkit: T) -> Self {
        Self { toolkit }
    }

    /// Realize a descriptor and its whole subtree.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::WidgetCreation`](crate::MenuError::WidgetCreation)
    /// if the toolkit refuses any peer in the tree.
    #[tracing::instrument(
        skip_all,
        target = "horizon_menus::realize",
        level = "trace",
        fields(text = %descriptor.text())
    )]
    pub fn realize(&self, descriptor: &MenuItemDescriptor) -> Result<Widget> {
        match descriptor {
            MenuItemDescriptor::Leaf(attributes) => self.realize_item(attributes).map(Widget::Item),
            MenuItemDescriptor::Branch {
                attributes,
                children,
            } => {
                let peer = self.peer(WidgetKind::Menu, attributes)?;
                let mut menu = Menu::from_attributes(peer, attributes);
                for child in children.iter() {
                    menu.push(self.realize(child)?);
                }
                tracing::trace!(
                    target: targets::REALIZE,
                    children = menu.children().len(),
                    "realized menu"
                );
                Ok(Widget::Menu(menu))
            }
        }
    }

    fn realize_item(&self, attributes: &ItemAttributes) -> Result<MenuItem> {
        let peer = self.peer(WidgetKind::Item, attributes)?;
        if let Some(accelerator) = attributes.accelerator() {
            self.checked(self.toolkit.register_accelerator(peer, accelerator))?;
        }
        Ok(MenuItem::from_attributes(peer, attributes))
    }

    fn peer(&self, kind: WidgetKind, attributes: &ItemAttributes) -> Result<PeerId> {
        let peer = self.create_peer(kind, attributes.text())?;
        if let Some(mnemonic) = attributes.mnemonic() {
            self.checked(self.toolkit.register_mnemonic(peer, mnemonic))?;
        }
        Ok(peer)
    }

    fn create_peer(&self, kind: WidgetKind, label: &str) -> Result<PeerId> {
        self.checked(self.toolkit.create_peer(kind, label))
    }

    fn checked<R>(&self, result: std::result::Result<R, ToolkitError>) -> Result<R> {
        result.map_err(|err| {
            tracing::warn!(
                target: targets::REALIZE,
                kind = %err.kind,
                reason = %err.reason,
                "toolkit refused widget"
            );
            err.into()
        })
    }

    /// Create an empty menu bar.
    pub fn menu_bar(&self) -> Result<MenuBar> {
        Ok(MenuBar::new(self.create_peer(WidgetKind::MenuBar, "")?))
    }

    /// Create an empty toolbar.
    pub fn tool_bar(&self) -> Result<ToolBar> {
        Ok(ToolBar::new(self.create_peer(WidgetKind::ToolBar, "")?))
    }

    /// Create a popup menu holding already realized items.
    pub fn popup_menu(&self, label: &str, items: Vec<Widget>) -> Result<PopupMenu> {
        Ok(PopupMenu::new(self.create_peer(WidgetKind::Popup, label)?, label, items))
    }
}

/// Realize `descriptor` against `toolkit`.
pub fn realize<T: Toolkit>(toolkit: T, descriptor: &MenuItemDescriptor) -> Result<Widget> {
    WidgetRealizer::new(toolkit).realize(descriptor)
}

/// Create an empty menu bar.
pub fn new_menu_bar<T: Toolkit>(toolkit: T) -> Result<MenuBar> {
    WidgetRealizer::new(toolkit).menu_bar()
}

/// Create an empty toolbar.
pub fn new_tool_bar<T: Toolkit>(toolkit: T) -> Result<ToolBar> {
    WidgetRealizer::new(toolkit).tool_bar()
}

/// Create a popup menu labelled `label` holding `items`.
pub fn new_popup_menu<T: Toolkit>(
    toolkit: T,
    label: &str,
    items: Vec<Widget>,
) -> Result<PopupMenu> {
    WidgetRealizer::new(toolkit).popup_menu(label, items)
}

/// Build a flat popup menu from `(label, command, action)` entries.
///
/// Each item's command name is the entry's command, not its label.
pub fn popup_from_entries<T: Toolkit>(toolkit: T, entries: &[MenuEntry]) -> Result<PopupMenu> {
    let realizer = WidgetRealizer::new(toolkit);
    let items = entries
        .iter()
        .map(|entry| {
            let descriptor = DescriptorBuilder::new()
                .text(entry.label.as_str())
                .name(entry.command.as_str())
                .action(entry.action.clone())
                .build()?;
            realizer.realize(&descriptor)
        })
        .collect::<Result<Vec<_>>>()?;
    realizer.popup_menu("", items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, ActionEvent};
    use crate::error::MenuError;
    use crate::toolkit::HeadlessToolkit;
    use horizon_menus_core::{Key, KeyCombination};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn leaf(text: &str) -> MenuItemDescriptor {
        DescriptorBuilder::new().text(text).build().unwrap()
    }

    #[test]
    fn test_realize_leaf_copies_attributes() {
        let toolkit = HeadlessToolkit::new();
        let desc = DescriptorBuilder::new()
            .markup("&Open")
            .name("file.open")
            .accelerator(KeyCombination::ctrl(Key::O))
            .build()
            .unwrap();

        let widget = realize(&toolkit, &desc).unwrap();
        let item = widget.as_item().unwrap();
        assert_eq!(item.text(), "Open");
        assert_eq!(item.name(), "file.open");
        assert_eq!(item.mnemonic(), Some(Key::O));
        assert_eq!(item.accelerator(), Some(KeyCombination::ctrl(Key::O)));

        let record = toolkit.peer(item.peer()).unwrap();
        assert_eq!(record.kind, WidgetKind::Item);
        assert_eq!(record.label, "Open");
        assert_eq!(record.mnemonic, Some(Key::O));
        assert_eq!(record.accelerator, Some(KeyCombination::ctrl(Key::O)));
    }

    #[test]
    fn test_realize_twice_distinct_widgets() {
        let toolkit = HeadlessToolkit::new();
        let desc = DescriptorBuilder::new()
            .text("Print")
            .mnemonic(Key::P)
            .build()
            .unwrap();
        let realizer = WidgetRealizer::new(&toolkit);

        let a = realizer.realize(&desc).unwrap();
        let b = realizer.realize(&desc).unwrap();
        assert_ne!(a.id(), b.id());
        assert_ne!(a.peer(), b.peer());
        assert_eq!(a.text(), b.text());
        assert_eq!(a.mnemonic(), b.mnemonic());

        a.triggered().connect(|_| {});
        assert_eq!(b.triggered().connection_count(), 0);
    }

    #[test]
    fn test_branch_children_in_order() {
        let toolkit = HeadlessToolkit::new();
        let desc = DescriptorBuilder::new()
            .text("View")
            .children(vec![leaf("a"), leaf("b"), leaf("c")])
            .build()
            .unwrap();

        let widget = realize(&toolkit, &desc).unwrap();
        let texts: Vec<&str> = widget.children().iter().map(Widget::text).collect();
        assert_eq!(texts, ["a", "b", "c"]);
        assert_eq!(toolkit.peer_count(), 4);
        assert_eq!(toolkit.peers()[0].kind, WidgetKind::Menu);
    }

    #[test]
    fn test_branch_action_on_header() {
        let toolkit = HeadlessToolkit::new();
        let opened = Arc::new(Mutex::new(0));
        let opened_clone = opened.clone();
        let desc = DescriptorBuilder::new()
            .text("Recent")
            .child(leaf("one.txt"))
            .action(Action::new(move |_: &ActionEvent| *opened_clone.lock() += 1))
            .build()
            .unwrap();

        let widget = realize(&toolkit, &desc).unwrap();
        widget.activate();
        assert_eq!(*opened.lock(), 1);
    }

    #[test]
    fn test_refused_peer_fails() {
        let toolkit = HeadlessToolkit::new().with_refused(WidgetKind::Item);
        let desc = DescriptorBuilder::new()
            .text("File")
            .child(leaf("Open"))
            .build()
            .unwrap();

        let err = realize(&toolkit, &desc).unwrap_err();
        assert!(matches!(err, MenuError::WidgetCreation { kind: WidgetKind::Item, .. }));
    }

    #[test]
    fn test_nested_dispatch_key() {
        let toolkit = HeadlessToolkit::new();
        let hits = Arc::new(Mutex::new(Vec::new()));
        let hits_clone = hits.clone();
        let export = DescriptorBuilder::new()
            .text("PDF")
            .accelerator(KeyCombination::ctrl(Key::E))
            .action(Action::new(move |e: &ActionEvent| hits_clone.lock().push(e.command.clone())))
            .build()
            .unwrap();
        let submenu = DescriptorBuilder::new().text("Export").child(export).build().unwrap();
        let file = DescriptorBuilder::new().text("File").child(submenu).build().unwrap();

        let widget = realize(&toolkit, &file).unwrap();
        assert!(widget.dispatch_key(KeyCombination::ctrl(Key::E)));
        assert!(!widget.dispatch_key(KeyCombination::ctrl(Key::P)));
        assert_eq!(*hits.lock(), vec!["PDF".to_string()]);
    }

    #[test]
    fn test_containers() {
        let toolkit = HeadlessToolkit::new();
        let mut bar = new_menu_bar(&toolkit).unwrap();
        let file = DescriptorBuilder::new().text("File").child(leaf("Quit")).build().unwrap();
        bar.add_menu(realize(&toolkit, &file).unwrap());
        assert_eq!(bar.menus().len(), 1);

        let mut tools = new_tool_bar(&toolkit).unwrap();
        tools.add_item(realize(&toolkit, &leaf("Run")).unwrap());
        assert_eq!(tools.items()[0].text(), "Run");

        let kinds: Vec<WidgetKind> = toolkit.peers().iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            [
                WidgetKind::MenuBar,
                WidgetKind::Menu,
                WidgetKind::Item,
                WidgetKind::ToolBar,
                WidgetKind::Item
            ]
        );
    }

    #[test]
    fn test_popup_from_entries_uses_commands() {
        let toolkit = HeadlessToolkit::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let entry = |label: &str, command: &str| {
            let seen = seen.clone();
            MenuEntry::new(
                label,
                command,
                Action::new(move |e: &ActionEvent| seen.lock().push(e.command.clone())),
            )
        };

        let entries = [entry("Copy", "edit.copy"), entry("Paste", "edit.paste")];
        let mut popup = popup_from_entries(&toolkit, &entries).unwrap();
        assert_eq!(popup.items().len(), 2);
        assert!(popup.activate("edit.paste"));
        assert_eq!(*seen.lock(), vec!["edit.paste".to_string()]);
    }
}
