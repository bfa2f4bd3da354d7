//! Observable stores and lens derivation.
//!
//! The module is built around one recursive contract:
//!
//! ```text
//! Store<S>
//!   ├── RootStore<S>           owns the state cell and the listeners
//!   └── LensStore<P, S, T, …>  projects a parent Store<S> into a Store<T>
//! ```
//!
//! A lens store is a full store (it can be read, written, subscribed to,
//! and lensed again) but is backed entirely by its parent. Writes are
//! rebuilt into parent values and travel up to the root; notifications
//! travel back down, filtered at every level so only subscribers whose
//! projection actually changed get woken.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use lenstore::prelude::*;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Team { name: String, members: Rc<Vec<String>> }
//!
//! let team = RootStore::new(Rc::new(Team {
//!     name: "search".into(),
//!     members: Rc::new(vec!["ada".into(), "grace".into()]),
//! }));
//!
//! let members = team.lens(
//!     |state: &Rc<Team>| Rc::clone(&state.members),
//!     |members, state: &Rc<Team>| Rc::new(Team { members, ..(**state).clone() }),
//! );
//!
//! members.set(Rc::new(vec!["ada".into()]));
//! assert_eq!(team.view().members.len(), 1);
//! assert_eq!(team.view().name, "search");
//! ```

mod lens;
mod root;
mod subscribe;

pub use lens::LensStore;
pub use root::{RootStore, Store};
pub use subscribe::Subscription;
