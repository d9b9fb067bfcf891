//! Platform input conventions.
//!
//! Menus depend on two conventions that differ between desktop platforms:
//!
//! - the **popup trigger**: which button and which phase (press or release)
//!   of a pointer gesture requests a context menu;
//! - the **primary modifier**: the modifier combined with a character
//!   accelerator (Ctrl on Windows and Linux, Cmd on macOS).
//!
//! [`Conventions::current`] returns the defaults for the compile target.
//! Applications can override any field from a TOML document:
//!
//! ```
//! use horizon_menus_core::{Conventions, PopupTriggerPhase};
//!
//! let conventions = Conventions::from_toml_str(r#"
//!     platform = "windows"
//!     popup_trigger_phase = "press"
//! "#).unwrap();
//! assert_eq!(conventions.popup_trigger_phase, PopupTriggerPhase::Press);
//! assert!(conventions.primary_modifier.control);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::keyboard::KeyboardModifiers;
use crate::logging::targets;

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left = 0,
    /// Secondary button (usually right).
    Right = 1,
    /// Middle button (scroll wheel click).
    Middle = 2,
}

/// Phase of a pointer button gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// The button went down.
    Press,
    /// The button came up.
    Release,
}

/// Desktop platform families with distinct input conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl Platform {
    /// The platform of the compile target.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }
}

/// The pointer phase on which a platform raises its popup trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopupTriggerPhase {
    /// The popup trigger fires when the button goes down.
    Press,
    /// The popup trigger fires when the button comes up.
    Release,
}

impl PopupTriggerPhase {
    /// Check whether a pointer phase is the trigger phase.
    pub fn matches(self, phase: PointerPhase) -> bool {
        matches!(
            (self, phase),
            (PopupTriggerPhase::Press, PointerPhase::Press)
                | (PopupTriggerPhase::Release, PointerPhase::Release)
        )
    }
}

/// Input conventions for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conventions {
    /// The platform these conventions describe.
    pub platform: Platform,
    /// Phase on which the popup trigger is raised.
    pub popup_trigger_phase: PopupTriggerPhase,
    /// Modifier combined with character accelerators.
    pub primary_modifier: KeyboardModifiers,
    /// Whether Ctrl + primary button also raises the popup trigger.
    pub control_click_is_popup: bool,
}

/// Partial conventions as read from TOML; unset fields use the platform defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConventionsOverrides {
    platform: Option<Platform>,
    popup_trigger_phase: Option<PopupTriggerPhase>,
    primary_modifier: Option<KeyboardModifiers>,
    control_click_is_popup: Option<bool>,
}

impl Conventions {
    /// Conventions of the compile target.
    pub fn current() -> Self {
        Self::for_platform(Platform::current())
    }

    /// Default conventions for a platform.
    ///
    /// Windows raises the trigger on release; macOS, Linux and other
    /// X11-style desktops raise it on press. macOS uses Cmd as the primary
    /// modifier and treats Ctrl-click as a secondary click.
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Windows => Self {
                platform,
                popup_trigger_phase: PopupTriggerPhase::Release,
                primary_modifier: KeyboardModifiers::CTRL,
                control_click_is_popup: false,
            },
            Platform::MacOs => Self {
                platform,
                popup_trigger_phase: PopupTriggerPhase::Press,
                primary_modifier: KeyboardModifiers::META,
                control_click_is_popup: true,
            },
            Platform::Linux | Platform::Other => Self {
                platform,
                popup_trigger_phase: PopupTriggerPhase::Press,
                primary_modifier: KeyboardModifiers::CTRL,
                control_click_is_popup: false,
            },
        }
    }

    /// Parse conventions from a TOML document.
    ///
    /// Fields that are absent take the defaults of the document's `platform`
    /// (or of the compile target when `platform` is absent too).
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let overrides: ConventionsOverrides = toml::from_str(s)?;
        let base = Self::for_platform(overrides.platform.unwrap_or_else(Platform::current));
        Ok(Self {
            platform: base.platform,
            popup_trigger_phase: overrides
                .popup_trigger_phase
                .unwrap_or(base.popup_trigger_phase),
            primary_modifier: overrides.primary_modifier.unwrap_or(base.primary_modifier),
            control_click_is_popup: overrides
                .control_click_is_popup
                .unwrap_or(base.control_click_is_popup),
        })
    }

    /// Load conventions from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let conventions = Self::from_toml_str(&contents)?;
        tracing::debug!(
            target: targets::PLATFORM,
            path = %path.display(),
            platform = ?conventions.platform,
            "loaded input conventions"
        );
        Ok(conventions)
    }

    /// Decide whether a pointer event, in isolation, is the popup trigger.
    ///
    /// Only the configured phase can ever answer `true`, so a press and its
    /// matching release never both qualify.
    pub fn is_popup_trigger(
        &self,
        button: MouseButton,
        phase: PointerPhase,
        modifiers: KeyboardModifiers,
    ) -> bool {
        if !self.popup_trigger_phase.matches(phase) {
            return false;
        }
        match button {
            MouseButton::Right => true,
            MouseButton::Left => {
                self.control_click_is_popup && modifiers == KeyboardModifiers::CTRL
            }
            MouseButton::Middle => false,
        }
    }
}

impl Default for Conventions {
    fn default() -> Self {
        Self::current()
    }
}
