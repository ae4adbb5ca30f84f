//! Host document a dialog installs its global effects into.
//!
//! Two resources are process-wide: key listeners and the body scroll lock.
//! Both are handed out as guards that undo their effect on drop, so every
//! acquisition is paired with exactly one release on whatever path the owner
//! goes away by.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Keyboard key of a keydown event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Character(char),
}

pub type KeyListener = Rc<dyn Fn(&Key)>;

/// CSS `overflow` value of the document body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Overflow {
    #[default]
    Unset,
    Auto,
    Hidden,
}

#[derive(Default)]
pub struct Document {
    listeners: RefCell<BTreeMap<u64, KeyListener>>,
    next_listener: Cell<u64>,
    scroll_locks: Cell<usize>,
    body_overflow: RefCell<Overflow>,
    /// Overflow to restore once the last scroll lock is released.
    saved_overflow: RefCell<Option<Overflow>>,
}

impl Document {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locks.get() > 0
    }

    pub fn body_overflow(&self) -> Overflow {
        self.body_overflow.borrow().clone()
    }

    /// Sets the body overflow directly, as page code outside dialogs would.
    pub fn set_body_overflow(&self, overflow: Overflow) {
        *self.body_overflow.borrow_mut() = overflow;
    }

    /// Registers a keydown listener until the guard is dropped.
    pub fn add_key_listener(self: &Rc<Self>, listener: KeyListener) -> ListenerGuard {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().insert(id, listener);
        ListenerGuard {
            document: Rc::clone(self),
            id,
        }
    }

    /// Locks body scrolling until the guard is dropped. Locks nest: the body
    /// stays locked while any guard is alive.
    pub fn lock_scroll(self: &Rc<Self>) -> ScrollLockGuard {
        let held = self.scroll_locks.get();
        if held == 0 {
            let previous = self.body_overflow.replace(Overflow::Hidden);
            *self.saved_overflow.borrow_mut() = Some(previous);
        }
        self.scroll_locks.set(held + 1);
        ScrollLockGuard {
            document: Rc::clone(self),
        }
    }

    /// Delivers a keydown event to every registered listener.
    pub fn dispatch_key(&self, key: &Key) {
        // Listeners may drop their own guard while handling the event.
        let snapshot: Vec<KeyListener> = self.listeners.borrow().values().cloned().collect();
        for listener in snapshot {
            listener(key);
        }
    }

    fn remove_listener(&self, id: u64) {
        self.listeners.borrow_mut().remove(&id);
    }

    fn release_scroll(&self) {
        let held = self.scroll_locks.get().saturating_sub(1);
        self.scroll_locks.set(held);
        if held == 0 {
            let restored = self.saved_overflow.borrow_mut().take().unwrap_or_default();
            *self.body_overflow.borrow_mut() = restored;
        }
    }
}

#[must_use = "the listener is removed when the guard is dropped"]
pub struct ListenerGuard {
    document: Rc<Document>,
    id: u64,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.document.remove_listener(self.id);
    }
}

#[must_use = "scrolling is unlocked when the guard is dropped"]
pub struct ScrollLockGuard {
    document: Rc<Document>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.document.release_scroll();
    }
}
