//! Fluent construction of menu item descriptors.
//!
//! The builder collects attributes in any order and validates them when
//! [`build`](DescriptorBuilder::build) is called. Character mnemonics and
//! accelerators are converted at build time, so a bad character surfaces as
//! an error from `build` rather than from the setter.
//!
//! # Example
//!
//! ```
//! use horizon_menus::{DescriptorBuilder, Key, KeyCombination};
//!
//! let save = DescriptorBuilder::new()
//!     .text("Save")
//!     .mnemonic_char('s')
//!     .accelerator_str("Ctrl+S")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(save.mnemonic(), Some(Key::S));
//! assert_eq!(save.accelerator(), Some(KeyCombination::ctrl(Key::S)));
//! ```

use std::sync::Arc;

use horizon_menus_core::logging::targets;
use horizon_menus_core::{
    Conventions, Key, KeyCombination, char_to_key, mnemonic_to_key, parse_mnemonic,
};

use crate::action::Action;
use crate::descriptor::{ItemAttributes, MenuItemDescriptor};
use crate::error::{MenuError, Result};
use crate::icon::Icon;

#[derive(Debug, Clone, Copy)]
enum MnemonicSource {
    Key(Key),
    Char(char),
}

#[derive(Debug, Clone)]
enum AcceleratorSource {
    Combination(KeyCombination),
    Char(char),
    Text(String),
}

/// Builder for [`MenuItemDescriptor`].
///
/// `build` borrows the builder, so one builder can stamp out several
/// descriptors; all of them share the same children sequence.
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    text: Option<String>,
    mnemonic: Option<MnemonicSource>,
    markup_mnemonic: Option<char>,
    accelerator: Option<AcceleratorSource>,
    action: Option<Action>,
    name: Option<String>,
    icon: Option<Icon>,
    children: Arc<[MenuItemDescriptor]>,
    conventions: Option<Conventions>,
}

impl Default for DescriptorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            text: None,
            mnemonic: None,
            markup_mnemonic: None,
            accelerator: None,
            action: None,
            name: None,
            icon: None,
            children: Vec::new().into(),
            conventions: None,
        }
    }

    /// Set the visible label.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self.markup_mnemonic = None;
        self
    }

    /// Set the label from `&`-markup.
    ///
    /// `"&File"` yields the label `"File"` with mnemonic F. An explicit
    /// [`mnemonic`](Self::mnemonic) wins over the marked character.
    pub fn markup(mut self, markup: &str) -> Self {
        let parsed = parse_mnemonic(markup);
        self.text = Some(parsed.display_text);
        self.markup_mnemonic = parsed.mnemonic;
        self
    }

    /// Set the mnemonic key.
    pub fn mnemonic(mut self, key: Key) -> Self {
        self.mnemonic = Some(MnemonicSource::Key(key));
        self
    }

    /// Set the mnemonic from a character (ASCII letters and digits, case
    /// insensitive).
    pub fn mnemonic_char(mut self, ch: char) -> Self {
        self.mnemonic = Some(MnemonicSource::Char(ch));
        self
    }

    /// Set the accelerator keystroke.
    pub fn accelerator(mut self, accelerator: KeyCombination) -> Self {
        self.accelerator = Some(AcceleratorSource::Combination(accelerator));
        self
    }

    /// Set the accelerator to the platform's primary modifier plus `ch`.
    pub fn accelerator_char(mut self, ch: char) -> Self {
        self.accelerator = Some(AcceleratorSource::Char(ch));
        self
    }

    /// Set the accelerator from a string such as `"Ctrl+Shift+S"`.
    pub fn accelerator_str(mut self, accelerator: &str) -> Self {
        self.accelerator = Some(AcceleratorSource::Text(accelerator.to_string()));
        self
    }

    /// Set the callback fired on activation.
    pub fn action(mut self, action: impl Into<Action>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Set the command name. Defaults to the label.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the icon.
    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Replace the children, making this a submenu.
    pub fn children(mut self, children: impl Into<Arc<[MenuItemDescriptor]>>) -> Self {
        self.children = children.into();
        self
    }

    /// Append one child.
    pub fn child(mut self, child: MenuItemDescriptor) -> Self {
        let mut children = self.children.to_vec();
        children.push(child);
        self.children = children.into();
        self
    }

    /// Use `conventions` instead of the compile target's when resolving
    /// [`accelerator_char`](Self::accelerator_char).
    pub fn conventions(mut self, conventions: Conventions) -> Self {
        self.conventions = Some(conventions);
        self
    }

    /// Validate the collected attributes and produce a descriptor.
    ///
    /// # Errors
    ///
    /// - [`MenuError::InvalidDescriptor`] if the text is missing or empty, the
    ///   accelerator string does not parse, or a submenu has an accelerator.
    /// - [`MenuError::UnsupportedMnemonic`] if a mnemonic or accelerator
    ///   character has no key code.
    pub fn build(&self) -> Result<MenuItemDescriptor> {
        let text = match self.text.as_deref() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => return Err(MenuError::invalid_descriptor("menu item text is required")),
        };

        let mnemonic = self.resolve_mnemonic()?;
        let accelerator = self.resolve_accelerator()?;

        if accelerator.is_some() && !self.children.is_empty() {
            return Err(MenuError::invalid_descriptor(format!(
                "menu '{text}' has children and cannot carry an accelerator"
            )));
        }

        tracing::trace!(
            target: targets::BUILDER,
            text = %text,
            mnemonic = ?mnemonic,
            accelerator = ?accelerator,
            children = self.children.len(),
            "built menu item descriptor"
        );

        let attributes = ItemAttributes {
            text,
            mnemonic,
            accelerator,
            action: self.action.clone(),
            name: self.name.clone(),
            icon: self.icon.clone(),
        };

        if self.children.is_empty() {
            Ok(MenuItemDescriptor::Leaf(attributes))
        } else {
            Ok(MenuItemDescriptor::Branch {
                attributes,
                children: Arc::clone(&self.children),
            })
        }
    }

    fn resolve_mnemonic(&self) -> Result<Option<Key>> {
        let ch = match self.mnemonic {
            Some(MnemonicSource::Key(key)) => return Ok(Some(key)),
            Some(MnemonicSource::Char(ch)) => ch,
            None => match self.markup_mnemonic {
                Some(ch) => ch,
                None => return Ok(None),
            },
        };
        mnemonic_to_key(ch)
            .map(Some)
            .ok_or(MenuError::UnsupportedMnemonic(ch))
    }

    fn resolve_accelerator(&self) -> Result<Option<KeyCombination>> {
        match &self.accelerator {
            None => Ok(None),
            Some(AcceleratorSource::Combination(combination)) => Ok(Some(*combination)),
            Some(AcceleratorSource::Char(ch)) => {
                let key = char_to_key(*ch).ok_or(MenuError::UnsupportedMnemonic(*ch))?;
                let conventions = self.conventions.unwrap_or_else(Conventions::current);
                Ok(Some(KeyCombination::new(key, conventions.primary_modifier)))
            }
            Some(AcceleratorSource::Text(text)) => text
                .parse::<KeyCombination>()
                .map(Some)
                .map_err(|e| MenuError::invalid_descriptor(format!("accelerator {text:?}: {e}"))),
        }
    }
}
