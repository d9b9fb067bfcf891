//! Realized menu widgets.
//!
//! Widgets are produced by the [`WidgetRealizer`](crate::WidgetRealizer) from
//! descriptors. Each widget owns a copy of its descriptor's attributes, a
//! native peer handle and a fresh `triggered` signal, so two realizations of
//! the same descriptor never share mutable state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use horizon_menus_core::logging::targets;
use horizon_menus_core::{Key, KeyCombination, Signal};

use crate::action::{Action, ActionEvent};
use crate::descriptor::ItemAttributes;
use crate::icon::Icon;
use crate::toolkit::PeerId;

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identity of a realized widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Allocate a fresh id. Ids are never reused within a process.
    pub fn next() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

// ============================================================================
// Activation
// ============================================================================

/// An activation taken from a widget, ready to run.
///
/// Holds clones of the widget's action and `triggered` signal, so it can run
/// after any lock guarding the widget has been released.
#[derive(Clone)]
pub struct Activation {
    event: ActionEvent,
    action: Option<Action>,
    triggered: Arc<Signal<ActionEvent>>,
}

impl Activation {
    fn new(
        id: WidgetId,
        name: &str,
        action: Option<&Action>,
        triggered: &Arc<Signal<ActionEvent>>,
    ) -> Self {
        Self {
            event: ActionEvent::new(id, name),
            action: action.cloned(),
            triggered: Arc::clone(triggered),
        }
    }

    /// The event the action will receive.
    pub fn event(&self) -> &ActionEvent {
        &self.event
    }

    /// Fire the action, then the `triggered` signal.
    pub fn run(self) {
        tracing::trace!(
            target: targets::REALIZE,
            command = %self.event.command,
            "widget activated"
        );
        if let Some(action) = &self.action {
            action.invoke(&self.event);
        }
        self.triggered.emit(self.event);
    }
}

impl std::fmt::Debug for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Activation")
            .field("event", &self.event)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

// ============================================================================
// Menu Item
// ============================================================================

/// A leaf menu item.
pub struct MenuItem {
    id: WidgetId,
    peer: PeerId,
    text: String,
    name: String,
    mnemonic: Option<Key>,
    accelerator: Option<KeyCombination>,
    icon: Option<Icon>,
    action: Option<Action>,

    /// Emitted after the item's action has run.
    pub triggered: Arc<Signal<ActionEvent>>,
}

impl MenuItem {
    pub(crate) fn from_attributes(peer: PeerId, attributes: &ItemAttributes) -> Self {
        Self {
            id: WidgetId::next(),
            peer,
            text: attributes.text().to_string(),
            name: attributes.name().to_string(),
            mnemonic: attributes.mnemonic(),
            accelerator: attributes.accelerator(),
            icon: attributes.icon().cloned(),
            action: attributes.action().cloned(),
            triggered: Arc::new(Signal::new()),
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn peer(&self) -> PeerId {
        self.peer
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The command name, sent as [`ActionEvent::command`].
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mnemonic(&self) -> Option<Key> {
        self.mnemonic
    }

    pub fn accelerator(&self) -> Option<KeyCombination> {
        self.accelerator
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    /// Take this item's activation without running it.
    pub fn activation(&self) -> Activation {
        Activation::new(self.id, &self.name, self.action.as_ref(), &self.triggered)
    }

    /// Activate the item as if the user had chosen it.
    ///
    /// Items without an action still emit `triggered`.
    pub fn activate(&self) {
        self.activation().run();
    }

    /// Activate the item if `keystroke` is its accelerator.
    pub fn dispatch_key(&self, keystroke: KeyCombination) -> bool {
        match self.accelerator {
            Some(accelerator) if accelerator.matches(keystroke.key, keystroke.modifiers) => {
                self.activate();
                true
            }
            _ => false,
        }
    }
}

impl std::fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuItem")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("name", &self.name)
            .field("mnemonic", &self.mnemonic)
            .field("accelerator", &self.accelerator)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

// ============================================================================
// Menu
// ============================================================================

/// A submenu: a header item with ordered children.
pub struct Menu {
    id: WidgetId,
    peer: PeerId,
    text: String,
    name: String,
    mnemonic: Option<Key>,
    icon: Option<Icon>,
    action: Option<Action>,
    children: Vec<Widget>,

    /// Emitted when the header is activated.
    pub triggered: Arc<Signal<ActionEvent>>,
}

impl Menu {
    pub(crate) fn from_attributes(peer: PeerId, attributes: &ItemAttributes) -> Self {
        Self {
            id: WidgetId::next(),
            peer,
            text: attributes.text().to_string(),
            name: attributes.name().to_string(),
            mnemonic: attributes.mnemonic(),
            icon: attributes.icon().cloned(),
            action: attributes.action().cloned(),
            children: Vec::new(),
            triggered: Arc::new(Signal::new()),
        }
    }

    pub(crate) fn push(&mut self, child: Widget) {
        self.children.push(child);
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn peer(&self) -> PeerId {
        self.peer
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mnemonic(&self) -> Option<Key> {
        self.mnemonic
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    /// The children in display order.
    pub fn children(&self) -> &[Widget] {
        &self.children
    }

    /// Take the header's activation without running it.
    pub fn activation(&self) -> Activation {
        Activation::new(self.id, &self.name, self.action.as_ref(), &self.triggered)
    }

    /// Activate the header.
    pub fn activate(&self) {
        self.activation().run();
    }

    /// Activate the first descendant, in display order, whose accelerator is
    /// `keystroke`.
    pub fn dispatch_key(&self, keystroke: KeyCombination) -> bool {
        self.children.iter().any(|child| child.dispatch_key(keystroke))
    }
}

impl std::fmt::Debug for Menu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Menu")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("mnemonic", &self.mnemonic)
            .field("children", &self.children)
            .finish()
    }
}

// ============================================================================
// Widget
// ============================================================================

/// A realized menu entry: either a submenu or a leaf item.
#[derive(Debug)]
pub enum Widget {
    Menu(Menu),
    Item(MenuItem),
}

impl Widget {
    pub fn id(&self) -> WidgetId {
        match self {
            Widget::Menu(menu) => menu.id(),
            Widget::Item(item) => item.id(),
        }
    }

    pub fn peer(&self) -> PeerId {
        match self {
            Widget::Menu(menu) => menu.peer(),
            Widget::Item(item) => item.peer(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Widget::Menu(menu) => menu.text(),
            Widget::Item(item) => item.text(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Widget::Menu(menu) => menu.name(),
            Widget::Item(item) => item.name(),
        }
    }

    pub fn mnemonic(&self) -> Option<Key> {
        match self {
            Widget::Menu(menu) => menu.mnemonic(),
            Widget::Item(item) => item.mnemonic(),
        }
    }

    /// The accelerator; always `None` for submenus.
    pub fn accelerator(&self) -> Option<KeyCombination> {
        match self {
            Widget::Menu(_) => None,
            Widget::Item(item) => item.accelerator(),
        }
    }

    pub fn icon(&self) -> Option<&Icon> {
        match self {
            Widget::Menu(menu) => menu.icon(),
            Widget::Item(item) => item.icon(),
        }
    }

    pub fn action(&self) -> Option<&Action> {
        match self {
            Widget::Menu(menu) => menu.action(),
            Widget::Item(item) => item.action(),
        }
    }

    /// The `triggered` signal of the underlying widget.
    pub fn triggered(&self) -> &Signal<ActionEvent> {
        match self {
            Widget::Menu(menu) => &menu.triggered,
            Widget::Item(item) => &item.triggered,
        }
    }

    /// The children in display order; empty for items.
    pub fn children(&self) -> &[Widget] {
        match self {
            Widget::Menu(menu) => menu.children(),
            Widget::Item(_) => &[],
        }
    }

    pub fn as_menu(&self) -> Option<&Menu> {
        match self {
            Widget::Menu(menu) => Some(menu),
            Widget::Item(_) => None,
        }
    }

    pub fn as_item(&self) -> Option<&MenuItem> {
        match self {
            Widget::Item(item) => Some(item),
            Widget::Menu(_) => None,
        }
    }

    /// Depth-first search for the first widget with command name `name`.
    pub fn find(&self, name: &str) -> Option<&Widget> {
        if self.name() == name {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(name))
    }

    pub fn activation(&self) -> Activation {
        match self {
            Widget::Menu(menu) => menu.activation(),
            Widget::Item(item) => item.activation(),
        }
    }

    pub fn activate(&self) {
        self.activation().run();
    }

    /// Route a keystroke through this subtree; see [`Menu::dispatch_key`].
    pub fn dispatch_key(&self, keystroke: KeyCombination) -> bool {
        match self {
            Widget::Menu(menu) => menu.dispatch_key(keystroke),
            Widget::Item(item) => item.dispatch_key(keystroke),
        }
    }
}

impl From<Menu> for Widget {
    fn from(menu: Menu) -> Self {
        Widget::Menu(menu)
    }
}

impl From<MenuItem> for Widget {
    fn from(item: MenuItem) -> Self {
        Widget::Item(item)
    }
}

// ============================================================================
// Containers
// ============================================================================

/// A top-level menu bar.
#[derive(Debug)]
pub struct MenuBar {
    id: WidgetId,
    peer: PeerId,
    menus: Vec<Widget>,
}

impl MenuBar {
    pub(crate) fn new(peer: PeerId) -> Self {
        Self {
            id: WidgetId::next(),
            peer,
            menus: Vec::new(),
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn peer(&self) -> PeerId {
        self.peer
    }

    /// Append a menu.
    pub fn add_menu(&mut self, menu: Widget) {
        self.menus.push(menu);
    }

    pub fn menus(&self) -> &[Widget] {
        &self.menus
    }

    /// Route a keystroke to the first matching item across all menus.
    pub fn dispatch_key(&self, keystroke: KeyCombination) -> bool {
        self.menus.iter().any(|menu| menu.dispatch_key(keystroke))
    }
}

/// A toolbar holding realized entries.
#[derive(Debug)]
pub struct ToolBar {
    id: WidgetId,
    peer: PeerId,
    items: Vec<Widget>,
}

impl ToolBar {
    pub(crate) fn new(peer: PeerId) -> Self {
        Self {
            id: WidgetId::next(),
            peer,
            items: Vec::new(),
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn peer(&self) -> PeerId {
        self.peer
    }

    pub fn add_item(&mut self, item: Widget) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[Widget] {
        &self.items
    }

    pub fn dispatch_key(&self, keystroke: KeyCombination) -> bool {
        self.items.iter().any(|item| item.dispatch_key(keystroke))
    }
}
