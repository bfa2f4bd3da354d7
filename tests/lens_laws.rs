//! Property-based tests for lens-store laws.
//!
//! The classic lens laws, restated against a live store:
//!
//! - **PutGet**: after `lens.set(value)`, `lens.view() == value`.
//! - **GetPut**: `lens.set(lens.view())` leaves the root untouched, here
//!   strengthened to *pointer-untouched*, because the identity gate stops
//!   the write before the setter ever runs.
//! - **PutPut**: of two consecutive writes, only the last one matters.

use std::cell::RefCell;
use std::rc::Rc;

use lenstore::prelude::*;
use proptest::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct Labelled {
    label: String,
    value: i32,
}

fn labelled_store(label: &str, value: i32) -> RootStore<Rc<Labelled>> {
    RootStore::new(Rc::new(Labelled { label: label.to_owned(), value }))
}

fn value_store(store: &RootStore<Rc<Labelled>>) -> impl Store<i32> {
    store.lens(
        |state: &Rc<Labelled>| state.value,
        |value, state: &Rc<Labelled>| Rc::new(Labelled { value, ..(**state).clone() }),
    )
}

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

proptest! {
    /// PutGet: setting then viewing yields the set value, on the lens and
    /// through the root.
    #[test]
    fn prop_put_get(label in "[a-z]{0,8}", value in any::<i32>(), next in any::<i32>()) {
        let store = labelled_store(&label, value);
        let lens = value_store(&store);

        lens.set(next);

        prop_assert_eq!(lens.view(), next);
        prop_assert_eq!(store.view().value, next);
        let viewed = store.view();
        prop_assert_eq!(viewed.label.as_str(), label.as_str());
    }

    /// GetPut: writing back the current projection is a complete no-op;
    /// the root keeps its allocation.
    #[test]
    fn prop_get_put_is_a_complete_no_op(label in "[a-z]{0,8}", value in any::<i32>()) {
        let store = labelled_store(&label, value);
        let lens = value_store(&store);
        let before = store.view();

        lens.set(lens.view());

        prop_assert!(Rc::ptr_eq(&before, &store.view()));
    }

    /// PutPut: two consecutive writes are equivalent to the last one.
    #[test]
    fn prop_put_put_last_write_wins(
        label in "[a-z]{0,8}",
        value in any::<i32>(),
        first in any::<i32>(),
        second in any::<i32>(),
    ) {
        let twice = labelled_store(&label, value);
        let once = labelled_store(&label, value);

        value_store(&twice).set(first);
        value_store(&twice).set(second);
        value_store(&once).set(second);

        prop_assert_eq!(&*twice.view(), &*once.view());
    }

    /// Read-through: the lens always sees `getter(root.view())`, whichever
    /// side last wrote.
    #[test]
    fn prop_read_through(label in "[a-z]{0,8}", value in any::<i32>(), next in any::<i32>()) {
        let store = labelled_store(&label, value);
        let lens = value_store(&store);

        prop_assert_eq!(lens.view(), value);

        store.set(Rc::new(Labelled { label: label.clone(), value: next }));
        prop_assert_eq!(lens.view(), next);
    }

    /// The lens notification stream is the identity-filtered projection of
    /// its own write stream.
    #[test]
    fn prop_lens_notifications_equal_the_filtered_writes(
        initial in -3..3_i32,
        writes in proptest::collection::vec(-3..3_i32, 0..32),
    ) {
        let store = labelled_store("static", initial);
        let lens = value_store(&store);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        lens.subscribe(move |value: &i32| sink.borrow_mut().push(*value));

        for &write in &writes {
            lens.set(write);
        }

        prop_assert_eq!(seen.borrow().clone(), identity_filtered(initial, &writes));
    }
}
