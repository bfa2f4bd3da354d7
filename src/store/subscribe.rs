//! Listener registration and release.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

pub(crate) type Listener<S> = Rc<dyn Fn(&S)>;

// Most stores carry a handful of subscribers; spilling to the heap is the
// uncommon case.
const INLINE_LISTENERS: usize = 4;

struct Entry<S> {
    id: u64,
    listener: Listener<S>,
}

/// Insertion-ordered listener sequence with identity-based removal.
///
/// Registration order is notification order. Two registrations of equivalent
/// closures are distinct entries; removal targets a single entry by id.
pub(crate) struct Registry<S> {
    entries: RefCell<SmallVec<[Entry<S>; INLINE_LISTENERS]>>,
    next_id: Cell<u64>,
}

impl<S> Registry<S> {
    pub(crate) fn new() -> Self {
        Self {
            entries: RefCell::new(SmallVec::new()),
            next_id: Cell::new(0),
        }
    }

    pub(crate) fn insert(&self, listener: Listener<S>) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push(Entry { id, listener });
        id
    }

    /// Removing an id that is no longer present is a no-op.
    pub(crate) fn remove(&self, id: u64) {
        self.entries.borrow_mut().retain(|entry| entry.id != id);
    }

    /// Runs every registered listener in order against the state read from
    /// `current`.
    ///
    /// The iteration bound is the entry count captured before the first
    /// call, so listeners registered during the pass wait for the next one,
    /// and entries removed during the pass are skipped. No borrow is held
    /// while a listener runs; a listener may reenter the owning store
    /// (including writes that trigger a nested pass) without corrupting the
    /// sequence. The state is re-read per call, so listeners late in the
    /// pass observe the newest state after a reentrant write.
    pub(crate) fn notify_each<F>(&self, current: F)
    where
        F: Fn() -> S,
    {
        let bound = self.entries.borrow().len();
        for index in 0..bound {
            let listener = {
                let entries = self.entries.borrow();
                match entries.get(index) {
                    Some(entry) => Rc::clone(&entry.listener),
                    None => break,
                }
            };
            let state = current();
            listener(&state);
        }
    }
}

/// A handle that releases one listener registration.
///
/// Returned by [`Store::subscribe`](crate::store::Store::subscribe).
/// [`unsubscribe`](Subscription::unsubscribe) removes exactly the
/// registration that produced the handle; calling it again is a no-op.
/// Dropping the handle does *not* detach the listener; a subscription with
/// no interest in unsubscribing can discard it.
pub struct Subscription {
    cancel: Rc<dyn Fn()>,
}

impl Subscription {
    pub(crate) fn new(cancel: Rc<dyn Fn()>) -> Self {
        Self { cancel }
    }

    /// Removes the registration behind this handle. Idempotent.
    pub fn unsubscribe(&self) {
        (self.cancel)();
    }
}

impl Clone for Subscription {
    fn clone(&self) -> Self {
        Self {
            cancel: Rc::clone(&self.cancel),
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Subscription").finish_non_exhaustive()
    }
}

static_assertions::assert_not_impl_any!(Subscription: Send, Sync);
