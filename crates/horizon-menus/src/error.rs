//! Error types for menu construction.

use std::path::PathBuf;

use crate::icon::ImageLoadError;
use crate::toolkit::{ToolkitError, WidgetKind};

/// Result type alias for menu operations.
pub type Result<T> = std::result::Result<T, MenuError>;

/// Errors surfaced by the builder, the realizer and the tray binder.
///
/// Each variant marks a programming or configuration defect at the call that
/// caused it; none is transient.
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    /// The descriptor is missing required state or has conflicting state.
    #[error("invalid menu item descriptor: {0}")]
    InvalidDescriptor(String),

    /// The character has no key code in the mnemonic table.
    #[error("unsupported mnemonic character {0:?}")]
    UnsupportedMnemonic(char),

    /// The host toolkit refused to construct a widget.
    #[error("failed to create {kind} widget: {reason}")]
    WidgetCreation { kind: WidgetKind, reason: String },

    /// A tray icon image could not be loaded.
    #[error("failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: ImageLoadError,
    },
}

impl MenuError {
    /// Create a descriptor error.
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Self::InvalidDescriptor(message.into())
    }

    /// Create an image load error.
    pub fn image_load(path: impl Into<PathBuf>, source: ImageLoadError) -> Self {
        Self::ImageLoad {
            path: path.into(),
            source,
        }
    }
}

impl From<ToolkitError> for MenuError {
    fn from(err: ToolkitError) -> Self {
        Self::WidgetCreation {
            kind: err.kind,
            reason: err.reason,
        }
    }
}
