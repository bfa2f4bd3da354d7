//! The store contract and the root store.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use static_assertions::assert_not_impl_any;

use crate::identity::Identical;
use crate::store::lens::LensStore;
use crate::store::subscribe::{Registry, Subscription};

/// An observable state container.
///
/// A store holds one current value, replaces it wholesale on every accepted
/// write, and notifies subscribers of each accepted write synchronously and
/// in registration order. [`RootStore`] owns actual storage;
/// [`LensStore`] projects a parent store through a getter/setter pair and
/// implements the same contract, so derivation recurses to arbitrary depth.
///
/// Stores are single-threaded (`!Send`, `!Sync`) and cheap to clone: a
/// clone is another handle to the same store.
///
/// # Memoization
///
/// A memoized store (the default) swallows writes whose value is
/// [identical](Identical) to the one already held: no assignment, no
/// notification. Lens stores additionally suppress parent notifications
/// whose projection did not change, so a write to one field never wakes
/// subscribers focused elsewhere. The flag is fixed when the root is
/// created and inherited by every derived lens.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use lenstore::prelude::*;
///
/// let counter = RootStore::new(0);
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// counter.subscribe(move |value| sink.borrow_mut().push(*value));
///
/// for value in [0, 0, 1, 0, 2, 2] {
///     counter.set(value);
/// }
///
/// assert_eq!(*seen.borrow(), vec![1, 0, 2]);
/// ```
pub trait Store<S>: Clone
where
    S: Identical + Clone + 'static,
{
    /// Returns the current state snapshot.
    ///
    /// For `Rc`-held composites this is a reference-count bump.
    fn view(&self) -> S;

    /// Replaces the state and notifies subscribers.
    ///
    /// On a memoized store a write [identical](Identical) to the held value
    /// is a complete no-op. Otherwise the state is assigned and every
    /// listener registered at the start of the pass runs synchronously, in
    /// registration order, before `set` returns. A listener may call back
    /// into the store, including further writes: the nested write completes
    /// its own pass first, and the remaining listeners of the outer pass
    /// then observe the newest state.
    ///
    /// # Panics
    ///
    /// A panicking listener propagates out of `set`, aborting notification
    /// of the listeners after it in the pass. The state assignment itself
    /// has already happened at that point.
    fn set(&self, next: S);

    /// Whether writes and notifications are identity-gated.
    fn is_memoized(&self) -> bool;

    /// Registers a listener for future changes.
    ///
    /// The listener is *not* invoked with the current value; it only
    /// observes writes made after registration (see
    /// [`subscribe_with_current`](Store::subscribe_with_current) for the
    /// replaying variant). Registering the same closure twice creates two
    /// independent registrations, and both fire.
    fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&S) + 'static;

    /// Replaces the state with `reducer` applied to the current value.
    ///
    /// Equivalent to `set(reducer(&view()))`, including the identity gate.
    fn update<F>(&self, reducer: F)
    where
        F: FnOnce(&S) -> S,
    {
        let next = reducer(&self.view());
        self.set(next);
    }

    /// Invokes `listener` once with the current value, then subscribes it.
    ///
    /// The replay happens outside the change stream (a direct call, not a
    /// notification), so it composes with lens change-suppression
    /// without double delivery.
    fn subscribe_with_current<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&S) + 'static,
    {
        listener(&self.view());
        self.subscribe(listener)
    }

    /// Derives a store focused on a projection of this store's state.
    ///
    /// The derived store reads through `getter`, writes back through
    /// `setter`, and supports the full [`Store`] contract, including further
    /// derivation.
    ///
    /// The pair is a collaborator contract and is not checked at runtime:
    /// `getter` must be a pure projection, and `setter` must return a *new*
    /// parent value built from the new part plus the old whole. A setter
    /// that mutates in place and returns the same `Rc` defeats the identity
    /// gate and suppresses notifications incorrectly.
    ///
    /// # Example
    ///
    /// ```
    /// use std::rc::Rc;
    /// use lenstore::prelude::*;
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct Profile { name: String, age: u32 }
    ///
    /// let profile = RootStore::new(Rc::new(Profile { name: "Ada".into(), age: 36 }));
    /// let age = profile.lens(
    ///     |state: &Rc<Profile>| state.age,
    ///     |age, state: &Rc<Profile>| Rc::new(Profile { age, ..(**state).clone() }),
    /// );
    ///
    /// assert_eq!(age.view(), 36);
    /// age.set(37);
    /// assert_eq!(profile.view().age, 37);
    /// ```
    fn lens<T, G, St>(&self, getter: G, setter: St) -> LensStore<Self, S, T, G, St>
    where
        Self: Sized,
        T: Identical + Clone + 'static,
        G: Fn(&S) -> T + 'static,
        St: Fn(T, &S) -> S + 'static,
    {
        LensStore::new(self.clone(), getter, setter)
    }
}

struct RootInner<S> {
    state: RefCell<S>,
    listeners: Registry<S>,
    memoize: bool,
}

/// An originally-created store: the owner of a state cell and a listener
/// registry.
///
/// Constructed with [`new`](RootStore::new) (memoized) or
/// [`unmemoized`](RootStore::unmemoized). See [`Store`] for the contract.
pub struct RootStore<S> {
    inner: Rc<RootInner<S>>,
}

impl<S> RootStore<S>
where
    S: Identical + Clone + 'static,
{
    /// Creates a memoized root store holding `initial`.
    #[must_use]
    pub fn new(initial: S) -> Self {
        Self::build(initial, true)
    }

    /// Creates a root store with the identity gate disabled.
    ///
    /// Every write assigns and notifies, at this store and through every
    /// lens derived from it, regardless of whether the value changed.
    #[must_use]
    pub fn unmemoized(initial: S) -> Self {
        Self::build(initial, false)
    }

    fn build(initial: S, memoize: bool) -> Self {
        Self {
            inner: Rc::new(RootInner {
                state: RefCell::new(initial),
                listeners: Registry::new(),
                memoize,
            }),
        }
    }
}

impl<S> Store<S> for RootStore<S>
where
    S: Identical + Clone + 'static,
{
    fn view(&self) -> S {
        self.inner.state.borrow().clone()
    }

    fn set(&self, next: S) {
        let unchanged = self.inner.memoize && next.identical(&self.inner.state.borrow());
        if unchanged {
            return;
        }
        self.inner.state.replace(next);
        let inner = Rc::clone(&self.inner);
        self.inner
            .listeners
            .notify_each(move || inner.state.borrow().clone());
    }

    fn is_memoized(&self) -> bool {
        self.inner.memoize
    }

    fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&S) + 'static,
    {
        let id = self.inner.listeners.insert(Rc::new(listener));
        let inner = Rc::clone(&self.inner);
        Subscription::new(Rc::new(move || inner.listeners.remove(id)))
    }
}

impl<S> Clone for RootStore<S> {
    // Both handles drive the same store.
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for RootStore<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RootStore")
            .field("state", &self.inner.state.borrow())
            .field("memoized", &self.inner.memoize)
            .finish_non_exhaustive()
    }
}

assert_not_impl_any!(RootStore<i32>: Send, Sync);
