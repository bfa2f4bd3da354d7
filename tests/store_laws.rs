//! Property-based tests for the notification contract.
//!
//! Using proptest, random write sequences verify that a memoized store's
//! notification stream is exactly the identity-filtered write stream, and
//! that an unmemoized store mirrors every write.

use std::cell::RefCell;
use std::rc::Rc;

use lenstore::prelude::*;
use proptest::prelude::*;

/// The deliveries a memoized store owes for `writes` on top of `initial`:
/// every write that differs from the value held at that moment.
fn identity_filtered(initial: i32, writes: &[i32]) -> Vec<i32> {
    let mut held = initial;
    let mut delivered = Vec::new();
    for &write in writes {
        if write != held {
            held = write;
            delivered.push(write);
        }
    }
    delivered
}

fn recording_store(store: &impl Store<i32>) -> Rc<RefCell<Vec<i32>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |value: &i32| sink.borrow_mut().push(*value));
    seen
}

proptest! {
    /// A memoized store notifies exactly once per identity change.
    #[test]
    fn prop_memoized_notifications_equal_the_filtered_writes(
        initial in -3..3_i32,
        writes in proptest::collection::vec(-3..3_i32, 0..32),
    ) {
        let store = RootStore::new(initial);
        let seen = recording_store(&store);

        for &write in &writes {
            store.set(write);
        }

        prop_assert_eq!(seen.borrow().clone(), identity_filtered(initial, &writes));
    }

    /// An unmemoized store notifies on every write, repeats included.
    #[test]
    fn prop_unmemoized_notifications_mirror_every_write(
        initial in -3..3_i32,
        writes in proptest::collection::vec(-3..3_i32, 0..32),
    ) {
        let store = RootStore::unmemoized(initial);
        let seen = recording_store(&store);

        for &write in &writes {
            store.set(write);
        }

        prop_assert_eq!(seen.borrow().clone(), writes);
    }

    /// The held value is always the last write (or the initial state).
    #[test]
    fn prop_view_returns_the_last_written_value(
        initial in -3..3_i32,
        writes in proptest::collection::vec(-3..3_i32, 0..32),
    ) {
        let store = RootStore::new(initial);

        for &write in &writes {
            store.set(write);
        }

        prop_assert_eq!(store.view(), *writes.last().unwrap_or(&initial));
    }

    /// Deliveries stop at unsubscription, wherever it lands in the stream.
    #[test]
    fn prop_unsubscribed_listeners_never_hear_later_writes(
        initial in -3..3_i32,
        before in proptest::collection::vec(-3..3_i32, 0..16),
        after in proptest::collection::vec(-3..3_i32, 0..16),
    ) {
        let store = RootStore::new(initial);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let subscription = store.subscribe(move |value: &i32| sink.borrow_mut().push(*value));

        for &write in &before {
            store.set(write);
        }
        subscription.unsubscribe();
        for &write in &after {
            store.set(write);
        }

        prop_assert_eq!(seen.borrow().clone(), identity_filtered(initial, &before));
    }
}
