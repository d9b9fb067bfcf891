//! Immutable menu item descriptors.
//!
//! A [`MenuItemDescriptor`] is the validated, sealed description of one menu
//! entry before any widget exists. It is either a leaf item or a branch
//! (submenu) with an ordered, non-empty list of children. Descriptors are
//! produced only by [`DescriptorBuilder`](crate::DescriptorBuilder).

use std::sync::Arc;

use horizon_menus_core::{Key, KeyCombination};

use crate::action::Action;
use crate::builder::DescriptorBuilder;
use crate::icon::Icon;

/// The attributes shared by leaf and branch descriptors.
#[derive(Debug, Clone)]
pub struct ItemAttributes {
    pub(crate) text: String,
    pub(crate) mnemonic: Option<Key>,
    pub(crate) accelerator: Option<KeyCombination>,
    pub(crate) action: Option<Action>,
    pub(crate) name: Option<String>,
    pub(crate) icon: Option<Icon>,
}

impl ItemAttributes {
    /// The visible label. Never empty.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The mnemonic key, if any.
    pub fn mnemonic(&self) -> Option<Key> {
        self.mnemonic
    }

    /// The accelerator keystroke, if any. Always `None` on branches.
    pub fn accelerator(&self) -> Option<KeyCombination> {
        self.accelerator
    }

    /// The bound action, if any.
    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    /// The command name; defaults to the label.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.text)
    }

    /// The command name only if it was set explicitly.
    pub fn explicit_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The icon, if any.
    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }
}

/// A validated description of one menu entry.
///
/// Cloning is cheap for branches: the children sequence is shared, never
/// copied. The descriptor can be realized any number of times.
#[derive(Debug, Clone)]
pub enum MenuItemDescriptor {
    /// A leaf item that may carry an action and an accelerator.
    Leaf(ItemAttributes),
    /// A submenu with its children in display order.
    Branch {
        attributes: ItemAttributes,
        children: Arc<[MenuItemDescriptor]>,
    },
}

impl MenuItemDescriptor {
    /// Start building a descriptor.
    pub fn builder() -> DescriptorBuilder {
        DescriptorBuilder::new()
    }

    /// The attributes of this entry.
    pub fn attributes(&self) -> &ItemAttributes {
        match self {
            MenuItemDescriptor::Leaf(attributes) => attributes,
            MenuItemDescriptor::Branch { attributes, .. } => attributes,
        }
    }

    /// The visible label.
    pub fn text(&self) -> &str {
        self.attributes().text()
    }

    /// The mnemonic key, if any.
    pub fn mnemonic(&self) -> Option<Key> {
        self.attributes().mnemonic()
    }

    /// The accelerator keystroke, if any.
    pub fn accelerator(&self) -> Option<KeyCombination> {
        self.attributes().accelerator()
    }

    /// The bound action, if any.
    pub fn action(&self) -> Option<&Action> {
        self.attributes().action()
    }

    /// The command name; defaults to the label.
    pub fn name(&self) -> &str {
        self.attributes().name()
    }

    /// The icon, if any.
    pub fn icon(&self) -> Option<&Icon> {
        self.attributes().icon()
    }

    /// The children in display order; empty for leaves.
    pub fn children(&self) -> &[MenuItemDescriptor] {
        match self {
            MenuItemDescriptor::Leaf(_) => &[],
            MenuItemDescriptor::Branch { children, .. } => children,
        }
    }

    /// The shared children sequence of a branch.
    pub fn shared_children(&self) -> Option<&Arc<[MenuItemDescriptor]>> {
        match self {
            MenuItemDescriptor::Leaf(_) => None,
            MenuItemDescriptor::Branch { children, .. } => Some(children),
        }
    }

    /// Check if this is a submenu.
    pub fn is_branch(&self) -> bool {
        matches!(self, MenuItemDescriptor::Branch { .. })
    }

    /// Check if this is a leaf item.
    pub fn is_leaf(&self) -> bool {
        matches!(self, MenuItemDescriptor::Leaf(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(text: &str) -> MenuItemDescriptor {
        MenuItemDescriptor::builder().text(text).build().unwrap()
    }

    #[test]
    fn test_leaf_accessors() {
        let item = MenuItemDescriptor::builder()
            .text("Open")
            .mnemonic(Key::O)
            .accelerator(KeyCombination::ctrl(Key::O))
            .build()
            .unwrap();

        assert!(item.is_leaf());
        assert_eq!(item.text(), "Open");
        assert_eq!(item.mnemonic(), Some(Key::O));
        assert_eq!(item.accelerator(), Some(KeyCombination::ctrl(Key::O)));
        assert!(item.children().is_empty());
        assert!(item.shared_children().is_none());
        assert!(item.action().is_none());
    }

    #[test]
    fn test_name_defaults_to_text() {
        let item = leaf("Save As");
        assert_eq!(item.name(), "Save As");
        assert_eq!(item.attributes().explicit_name(), None);

        let named = MenuItemDescriptor::builder()
            .text("Save As")
            .name("file.save_as")
            .build()
            .unwrap();
        assert_eq!(named.name(), "file.save_as");
    }

    #[test]
    fn test_clone_shares_children() {
        let menu = MenuItemDescriptor::builder()
            .text("Edit")
            .children(vec![leaf("Cut"), leaf("Copy")])
            .build()
            .unwrap();
        let copy = menu.clone();

        assert!(Arc::ptr_eq(
            menu.shared_children().unwrap(),
            copy.shared_children().unwrap()
        ));
    }
}
