//! The seam between menu construction and the host windowing toolkit.
//!
//! Realized widgets in this crate hold their own attributes and handlers; the
//! host toolkit only supplies native peers and the keystroke registrations
//! that go with them. Hosts implement [`Toolkit`]; tests and off-screen
//! tooling use [`HeadlessToolkit`].

use std::collections::HashSet;
use std::fmt;

use horizon_menus_core::{Key, KeyCombination};
use parking_lot::Mutex;

/// The kind of native widget a toolkit is asked to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// A top-level menu bar.
    MenuBar,
    /// A submenu (menu with a header item).
    Menu,
    /// A leaf menu item.
    Item,
    /// A toolbar.
    ToolBar,
    /// A popup (context) menu surface.
    Popup,
    /// A system tray icon.
    TrayIcon,
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WidgetKind::MenuBar => "menu bar",
            WidgetKind::Menu => "menu",
            WidgetKind::Item => "menu item",
            WidgetKind::ToolBar => "toolbar",
            WidgetKind::Popup => "popup menu",
            WidgetKind::TrayIcon => "tray icon",
        })
    }
}

/// An opaque handle to a native peer, issued by the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeerId(pub u64);

/// The toolkit refused to construct or configure a peer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("toolkit refused {kind}: {reason}")]
pub struct ToolkitError {
    /// The kind of widget being constructed.
    pub kind: WidgetKind,
    /// Toolkit-provided reason.
    pub reason: String,
}

impl ToolkitError {
    /// Create a new toolkit error.
    pub fn new(kind: WidgetKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

/// Host windowing toolkit primitives.
///
/// All methods are called synchronously on the UI thread.
pub trait Toolkit {
    /// Construct a native peer for a widget.
    fn create_peer(&self, kind: WidgetKind, label: &str) -> Result<PeerId, ToolkitError>;

    /// Register a mnemonic with the peer's menu navigation.
    fn register_mnemonic(&self, _peer: PeerId, _mnemonic: Key) -> Result<(), ToolkitError> {
        Ok(())
    }

    /// Register an accelerator in the keystroke dispatch table of a peer.
    ///
    /// Conflicting registrations are resolved by the toolkit; this crate does
    /// not validate uniqueness.
    fn register_accelerator(
        &self,
        _peer: PeerId,
        _accelerator: KeyCombination,
    ) -> Result<(), ToolkitError> {
        Ok(())
    }
}

impl<T: Toolkit + ?Sized> Toolkit for &T {
    fn create_peer(&self, kind: WidgetKind, label: &str) -> Result<PeerId, ToolkitError> {
        (**self).create_peer(kind, label)
    }

    fn register_mnemonic(&self, peer: PeerId, mnemonic: Key) -> Result<(), ToolkitError> {
        (**self).register_mnemonic(peer, mnemonic)
    }

    fn register_accelerator(
        &self,
        peer: PeerId,
        accelerator: KeyCombination,
    ) -> Result<(), ToolkitError> {
        (**self).register_accelerator(peer, accelerator)
    }
}

// ============================================================================
// Headless Toolkit
// ============================================================================

/// A peer created by [`HeadlessToolkit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerRecord {
    pub peer: PeerId,
    pub kind: WidgetKind,
    pub label: String,
    pub mnemonic: Option<Key>,
    pub accelerator: Option<KeyCombination>,
}

#[derive(Default)]
struct HeadlessState {
    peers: Vec<PeerRecord>,
    refused: HashSet<WidgetKind>,
}

/// An in-memory toolkit that records every peer it creates.
///
/// It never touches a display. Individual widget kinds can be refused to
/// exercise creation failures.
#[derive(Default)]
pub struct HeadlessToolkit {
    state: Mutex<HeadlessState>,
}

impl HeadlessToolkit {
    /// Create a toolkit that accepts every widget kind.
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse all future requests for `kind`.
    pub fn refuse(&self, kind: WidgetKind) {
        self.state.lock().refused.insert(kind);
    }

    /// Builder pattern for [`refuse`](Self::refuse).
    pub fn with_refused(self, kind: WidgetKind) -> Self {
        self.refuse(kind);
        self
    }

    /// All peers created so far, in creation order.
    pub fn peers(&self) -> Vec<PeerRecord> {
        self.state.lock().peers.clone()
    }

    /// Number of peers created so far.
    pub fn peer_count(&self) -> usize {
        self.state.lock().peers.len()
    }

    /// Look up one peer.
    pub fn peer(&self, peer: PeerId) -> Option<PeerRecord> {
        self.state.lock().peers.iter().find(|p| p.peer == peer).cloned()
    }

    fn with_peer(
        &self,
        peer: PeerId,
        f: impl FnOnce(&mut PeerRecord),
    ) -> Result<(), ToolkitError> {
        let mut state = self.state.lock();
        match state.peers.iter_mut().find(|p| p.peer == peer) {
            Some(record) => {
                f(record);
                Ok(())
            }
            None => Err(ToolkitError::new(WidgetKind::Item, format!("unknown peer {}", peer.0))),
        }
    }
}

impl Toolkit for HeadlessToolkit {
    fn create_peer(&self, kind: WidgetKind, label: &str) -> Result<PeerId, ToolkitError> {
        let mut state = self.state.lock();
        if state.refused.contains(&kind) {
            return Err(ToolkitError::new(kind, "refused by headless toolkit"));
        }
        let peer = PeerId(state.peers.len() as u64 + 1);
        state.peers.push(PeerRecord {
            peer,
            kind,
            label: label.to_string(),
            mnemonic: None,
            accelerator: None,
        });
        Ok(peer)
    }

    fn register_mnemonic(&self, peer: PeerId, mnemonic: Key) -> Result<(), ToolkitError> {
        self.with_peer(peer, |record| record.mnemonic = Some(mnemonic))
    }

    fn register_accelerator(
        &self,
        peer: PeerId,
        accelerator: KeyCombination,
    ) -> Result<(), ToolkitError> {
        self.with_peer(peer, |record| record.accelerator = Some(accelerator))
    }
}

impl fmt::Debug for HeadlessToolkit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("HeadlessToolkit")
            .field("peer_count", &state.peers.len())
            .field("refused", &state.refused)
            .finish()
    }
}
