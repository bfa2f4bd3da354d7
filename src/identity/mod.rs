//! Identity equality for change detection.
//!
//! Every write gate in this crate asks one question: is the incoming value
//! *the same value* as the one already held? "Same" here means identity or
//! primitive equality: pointer identity for shared allocations, plain value
//! equality for primitive-like types. It is deliberately never a structural
//! (deep) comparison.
//!
//! Composite state is expected to live behind [`Rc`], where identity is
//! [`Rc::ptr_eq`]. Rebuilding a parent value while reusing an untouched
//! child `Rc` preserves the child's identity, which is what lets a lens
//! subscriber stay quiet while an unrelated sibling field changes.
//!
//! # Examples
//!
//! ```
//! use std::rc::Rc;
//! use lenstore::identity::Identical;
//!
//! let shared = Rc::new(String::from("payload"));
//!
//! // Same allocation: identical.
//! assert!(shared.identical(&Rc::clone(&shared)));
//!
//! // Equal contents, fresh allocation: not identical.
//! assert!(!shared.identical(&Rc::new(String::from("payload"))));
//!
//! // Primitives compare by value.
//! assert!(3_u32.identical(&3));
//! ```

use std::rc::Rc;
use std::sync::Arc;

/// Identity/primitive equality between two values of the same type.
///
/// Implementations exist for the primitive types (by value), for [`String`]
/// and `&'static str` (strings are value-compared primitives in this model),
/// for [`Rc`] and [`Arc`] (by pointer), and for [`Option`] over any of these
/// (pointwise). Cheap value-like newtypes can opt in with
/// [`identical_by_value!`](crate::identical_by_value).
///
/// Types without an implementation are rejected as store state at compile
/// time:
///
/// ```compile_fail
/// use lenstore::store::{RootStore, Store};
///
/// struct Opaque;
///
/// let store = RootStore::new(Opaque);
/// ```
pub trait Identical {
    /// Returns `true` when `other` is the same value by identity or
    /// primitive equality.
    fn identical(&self, other: &Self) -> bool;
}

macro_rules! impl_identical_for_value_types {
    ($($type:ty),+ $(,)?) => {$(
        impl Identical for $type {
            #[inline]
            fn identical(&self, other: &Self) -> bool {
                self == other
            }
        }
    )+};
}

impl_identical_for_value_types!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    String,
    &'static str,
);

// IEEE comparison: a NaN state is never identical to anything, so writing
// NaN always counts as a change.
impl Identical for f32 {
    #[inline]
    #[allow(clippy::float_cmp)]
    fn identical(&self, other: &Self) -> bool {
        self == other
    }
}

impl Identical for f64 {
    #[inline]
    #[allow(clippy::float_cmp)]
    fn identical(&self, other: &Self) -> bool {
        self == other
    }
}

impl<T: ?Sized> Identical for Rc<T> {
    #[inline]
    fn identical(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identical for Arc<T> {
    #[inline]
    fn identical(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: Identical> Identical for Option<T> {
    fn identical(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(left), Some(right)) => left.identical(right),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Implements [`Identical`] through `PartialEq` for value-like types.
///
/// Meant for newtypes over primitives and other types whose equality is a
/// cheap value comparison. Do not use it to smuggle structural comparison of
/// composites into the change gate; hold those behind [`Rc`] instead.
///
/// # Example
///
/// ```
/// use lenstore::identical_by_value;
/// use lenstore::identity::Identical;
///
/// #[derive(Clone, Copy, PartialEq)]
/// struct CustomerId(u64);
///
/// identical_by_value!(CustomerId);
///
/// assert!(CustomerId(7).identical(&CustomerId(7)));
/// assert!(!CustomerId(7).identical(&CustomerId(8)));
/// ```
#[macro_export]
macro_rules! identical_by_value {
    ($($type:ty),+ $(,)?) => {$(
        impl $crate::identity::Identical for $type {
            #[inline]
            fn identical(&self, other: &Self) -> bool {
                self == other
            }
        }
    )+};
}
