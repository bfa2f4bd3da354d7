//! Lens-derived stores.

use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::identity::Identical;
use crate::store::root::Store;
use crate::store::subscribe::Subscription;

/// A store whose value is a bidirectional projection of a parent store's
/// value.
///
/// A lens store owns no state: its current value is recomputed from the
/// parent on every read, and writes are rebuilt into a full parent value and
/// delegated upward, where they run the parent's own gate and fan-out.
/// Deriving from a lens store composes the projections through nested
/// closures, so chains like root → list → element → field behave like one
/// lens from the root to the leaf.
///
/// Usually constructed through [`Store::lens`].
///
/// # Type Parameters
///
/// - `P`: The parent store
/// - `S`: The parent's state type
/// - `T`: The projected state type
/// - `G`: The getter, a pure projection `Fn(&S) -> T`
/// - `St`: The setter, `Fn(T, &S) -> S`, returning a *new* parent value
pub struct LensStore<P, S, T, G, St>
where
    P: Store<S>,
    S: Identical + Clone + 'static,
    T: Identical + Clone + 'static,
    G: Fn(&S) -> T + 'static,
    St: Fn(T, &S) -> S + 'static,
{
    parent: P,
    getter: Rc<G>,
    setter: Rc<St>,
    _marker: PhantomData<(S, T)>,
}

impl<P, S, T, G, St> LensStore<P, S, T, G, St>
where
    P: Store<S>,
    S: Identical + Clone + 'static,
    T: Identical + Clone + 'static,
    G: Fn(&S) -> T + 'static,
    St: Fn(T, &S) -> S + 'static,
{
    /// Creates a lens store over `parent`.
    #[must_use]
    pub fn new(parent: P, getter: G, setter: St) -> Self {
        Self {
            parent,
            getter: Rc::new(getter),
            setter: Rc::new(setter),
            _marker: PhantomData,
        }
    }
}

impl<P, S, T, G, St> Store<T> for LensStore<P, S, T, G, St>
where
    P: Store<S>,
    S: Identical + Clone + 'static,
    T: Identical + Clone + 'static,
    G: Fn(&S) -> T + 'static,
    St: Fn(T, &S) -> S + 'static,
{
    fn view(&self) -> T {
        (self.getter)(&self.parent.view())
    }

    fn set(&self, next: T) {
        let parent_state = self.parent.view();
        if self.is_memoized() && (self.getter)(&parent_state).identical(&next) {
            return;
        }
        self.parent.set((self.setter)(next, &parent_state));
    }

    fn is_memoized(&self) -> bool {
        self.parent.is_memoized()
    }

    /// Subscribes through the parent's change stream.
    ///
    /// The wrapper registered with the parent captures the projection at
    /// subscription time. On each parent notification it recomputes the
    /// projection; while memoized, a notification whose projection is
    /// [identical](Identical) to the previous one is suppressed, so writes
    /// to unrelated parts of the parent never reach `listener`. The returned
    /// [`Subscription`] is the parent's own handle for the wrapper.
    fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let getter = Rc::clone(&self.getter);
        let memoized = self.is_memoized();
        let previous = RefCell::new((self.getter)(&self.parent.view()));
        self.parent.subscribe(move |state: &S| {
            let current = getter(state);
            if memoized && current.identical(&previous.borrow()) {
                return;
            }
            previous.replace(current.clone());
            listener(&current);
        })
    }
}

impl<P, S, T, G, St> Clone for LensStore<P, S, T, G, St>
where
    P: Store<S>,
    S: Identical + Clone + 'static,
    T: Identical + Clone + 'static,
    G: Fn(&S) -> T + 'static,
    St: Fn(T, &S) -> S + 'static,
{
    fn clone(&self) -> Self {
        Self {
            parent: self.parent.clone(),
            getter: Rc::clone(&self.getter),
            setter: Rc::clone(&self.setter),
            _marker: PhantomData,
        }
    }
}

impl<P, S, T, G, St> fmt::Debug for LensStore<P, S, T, G, St>
where
    P: Store<S>,
    S: Identical + Clone + 'static,
    T: Identical + Clone + 'static,
    G: Fn(&S) -> T + 'static,
    St: Fn(T, &S) -> S + 'static,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("LensStore").finish_non_exhaustive()
    }
}

/// Focuses a named field of an `Rc`-held struct on a store.
///
/// Expands to a [`Store::lens`](crate::store::Store::lens) call whose getter
/// clones the field and whose setter rebuilds the struct behind a fresh
/// `Rc`, leaving sibling fields shared with the previous value. The struct
/// must be `Clone` and the field type must implement
/// [`Identical`](crate::identity::Identical).
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use lenstore::field_lens;
/// use lenstore::prelude::*;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Profile { name: String, age: u32 }
///
/// let profile = RootStore::new(Rc::new(Profile { name: "Ada".into(), age: 36 }));
/// let name = field_lens!(profile, Profile, name);
///
/// name.set("Grace".into());
/// assert_eq!(name.view(), "Grace");
/// assert_eq!(profile.view().name, "Grace");
/// ```
#[macro_export]
macro_rules! field_lens {
    ($store:expr, $struct_type:ty, $field:ident) => {
        $crate::store::Store::lens(
            &$store,
            |source: &::std::rc::Rc<$struct_type>| ::std::clone::Clone::clone(&source.$field),
            |value, source: &::std::rc::Rc<$struct_type>| {
                let mut next = ::std::clone::Clone::clone(&**source);
                next.$field = value;
                ::std::rc::Rc::new(next)
            },
        )
    };
}
