//! Core types for Horizon Menus.
//!
//! This crate provides the foundational pieces the menu construction layer is
//! built on:
//!
//! - **Signal/Slot System**: Type-safe notification used by realized widgets
//! - **Keyboard**: Key codes, modifier masks, keystrokes and mnemonic parsing
//! - **Geometry**: Points and local-to-screen translation
//! - **Platform Conventions**: Popup-trigger phase and primary modifier per platform
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_menus_core::Signal;
//!
//! let activated = Signal::<String>::new();
//! let id = activated.connect(|command| {
//!     println!("activated: {}", command);
//! });
//!
//! activated.emit("open".to_string());
//! activated.disconnect(id);
//! ```
//!
//! # Keystroke Example
//!
//! ```
//! use horizon_menus_core::{Key, KeyCombination};
//!
//! let save: KeyCombination = "Ctrl+S".parse().unwrap();
//! assert_eq!(save, KeyCombination::ctrl(Key::S));
//! ```

mod error;
pub mod geometry;
pub mod keyboard;
pub mod logging;
pub mod platform;
pub mod signal;

pub use error::{ConfigError, KeyParseError};
pub use geometry::{Offset, Point};
pub use keyboard::{
    Key, KeyCombination, KeyboardModifiers, MnemonicText, char_to_key, mnemonic_to_key,
    parse_mnemonic,
};
pub use platform::{Conventions, MouseButton, Platform, PointerPhase, PopupTriggerPhase};
pub use signal::{ConnectionId, Signal};
