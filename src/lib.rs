//! # lenstore
//!
//! An observable state container with composable, bidirectional lens views.
//!
//! A [`RootStore`](store::RootStore) holds a single value, replaces it
//! atomically, and notifies subscribers synchronously. Any store can derive
//! a [lens](store::Store::lens): a focused sub-store defined by a getter
//! (read projection) and a setter (rebuild the whole from a new part plus
//! the old whole). Lens stores are stores in their own right and can be
//! lensed again, so projection chains compose to arbitrary depth while
//! staying backed by the one root value.
//!
//! Change detection is by [identity](identity::Identical): pointer
//! identity for shared allocations, value equality for primitives, never a
//! structural comparison. Hold composite state behind `Rc` and rebuild the
//! changed path on write; untouched slices keep their identity, and
//! subscribers focused on them stay quiet.
//!
//! ## Quick start
//!
//! ```
//! use std::rc::Rc;
//! use lenstore::prelude::*;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Profile { name: String, age: u32 }
//!
//! let profile = RootStore::new(Rc::new(Profile { name: "Ada".into(), age: 36 }));
//!
//! // A derived store reads and writes through the parent.
//! let age = profile.lens(
//!     |state: &Rc<Profile>| state.age,
//!     |age, state: &Rc<Profile>| Rc::new(Profile { age, ..(**state).clone() }),
//! );
//!
//! assert_eq!(age.view(), 36);
//! age.set(37);
//! assert_eq!(profile.view().age, 37);
//! ```
//!
//! ## Notification gating
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use lenstore::prelude::*;
//!
//! let counter = RootStore::new(0);
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! let subscription = counter.subscribe(move |value| sink.borrow_mut().push(*value));
//!
//! for value in [0, 0, 1, 0, 2, 2] {
//!     counter.set(value);
//! }
//!
//! // Writes identical to the held value are swallowed.
//! assert_eq!(*seen.borrow(), vec![1, 0, 2]);
//! subscription.unsubscribe();
//! ```
//!
//! The engine is single-threaded and fully synchronous: `set` returns after
//! the last listener of the pass has run, and a listener may reenter the
//! store (the nested write completes first). There is no batching, no
//! middleware, and no persistence; this crate is the store/lens engine and
//! nothing else.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use lenstore::prelude::*;
/// ```
pub mod prelude {
    pub use crate::identity::Identical;
    pub use crate::store::{LensStore, RootStore, Store, Subscription};
}

pub mod identity;
pub mod store;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn store_round_trip() {
        // Basic smoke test
        let store = RootStore::new(1);
        store.set(2);
        assert_eq!(store.view(), 2);
    }
}
