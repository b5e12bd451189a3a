//! Document-level event listeners
//!
//! Components that need to see every key press or pointer-down (the open
//! lightbox, the projects dropdown) register a handler here and keep the
//! returned [`ListenerGuard`]. Dropping the guard removes the handler, so a
//! listener lives exactly as long as the state that installed it.

use crate::action::Action;
use crossterm::event::{KeyEvent, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type KeyHandler = Box<dyn FnMut(&KeyEvent) -> Option<Action>>;
type PointerHandler = Box<dyn FnMut(&MouseEvent) -> Option<Action>>;

/// Kind of document event a listener is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    KeyDown,
    PointerDown,
}

enum Handler {
    Key(KeyHandler),
    Pointer(PointerHandler),
}

impl Handler {
    fn kind(&self) -> ListenerKind {
        match self {
            Handler::Key(_) => ListenerKind::KeyDown,
            Handler::Pointer(_) => ListenerKind::PointerDown,
        }
    }
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

impl Registry {
    fn insert(&mut self, handler: Handler) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.handlers.push((id, handler));
        id
    }
}

/// Shared handle to the document listener registry
#[derive(Clone, Default)]
pub struct EventListeners {
    registry: Rc<RefCell<Registry>>,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a key-down listener
    pub fn on_key_down(
        &self,
        handler: impl FnMut(&KeyEvent) -> Option<Action> + 'static,
    ) -> ListenerGuard {
        self.attach(Handler::Key(Box::new(handler)))
    }

    /// Attach a pointer-down listener
    pub fn on_pointer_down(
        &self,
        handler: impl FnMut(&MouseEvent) -> Option<Action> + 'static,
    ) -> ListenerGuard {
        self.attach(Handler::Pointer(Box::new(handler)))
    }

    fn attach(&self, handler: Handler) -> ListenerGuard {
        let kind = handler.kind();
        let id = self.registry.borrow_mut().insert(handler);
        tracing::debug!("Attached {:?} listener #{}", kind, id);
        ListenerGuard {
            registry: Rc::downgrade(&self.registry),
            id,
            kind,
        }
    }

    /// Deliver a key press to every key-down listener, in attach order
    pub fn dispatch_key(&self, key: &KeyEvent) -> Vec<Action> {
        let mut registry = self.registry.borrow_mut();
        registry
            .handlers
            .iter_mut()
            .filter_map(|(_, handler)| match handler {
                Handler::Key(f) => f(key),
                Handler::Pointer(_) => None,
            })
            .collect()
    }

    /// Deliver a mouse event to every pointer-down listener.
    /// Events other than button presses are not delivered.
    pub fn dispatch_pointer(&self, mouse: &MouseEvent) -> Vec<Action> {
        if !matches!(mouse.kind, MouseEventKind::Down(_)) {
            return Vec::new();
        }
        let mut registry = self.registry.borrow_mut();
        registry
            .handlers
            .iter_mut()
            .filter_map(|(_, handler)| match handler {
                Handler::Pointer(f) => f(mouse),
                Handler::Key(_) => None,
            })
            .collect()
    }

    /// Number of attached listeners of the given kind
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.registry
            .borrow()
            .handlers
            .iter()
            .filter(|(_, h)| h.kind() == kind)
            .count()
    }
}

/// Keeps a listener attached; detaches it on drop
#[must_use = "the listener is detached as soon as the guard is dropped"]
pub struct ListenerGuard {
    registry: Weak<RefCell<Registry>>,
    id: u64,
    kind: ListenerKind,
}

impl ListenerGuard {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .handlers
                .retain(|(id, _)| *id != self.id);
            tracing::debug!("Detached {:?} listener #{}", self.kind, self.id);
        }
    }
}

/// Screen region of a component, updated on every draw.
/// An empty rect means the component is not on screen.
pub type Region = Rc<Cell<Rect>>;

/// Whether a terminal cell lies inside `rect`
pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Install a pointer-down listener that emits `dismiss` whenever a press
/// lands outside `container`
pub fn on_outside_click(
    listeners: &EventListeners,
    container: Region,
    dismiss: Action,
) -> ListenerGuard {
    listeners.on_pointer_down(move |mouse| {
        let rect = container.get();
        if rect.area() == 0 || rect_contains(rect, mouse.column, mouse.row) {
            return None;
        }
        Some(dismiss.clone())
    })
}
