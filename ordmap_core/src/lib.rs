//! Persistent ordered maps and sets.
//!
//! [`OrdMap`] is an immutable, left-leaning red-black tree keyed by a total
//! order (`K: Ord`). Every update returns a new map; subtrees untouched by the
//! update are shared between the old and the new value, so clones are O(1)
//! and old versions stay valid. [`OrdSet`] is an `OrdMap<T, ()>`.
//!
//! The `Ord` implementation of the key type must be a total order. An
//! inconsistent comparator leaves the tree shape unspecified; this is not
//! checked at runtime.

pub mod ds;
pub mod err;
mod util;

pub use ds::map::{Iter, OrdMap};
pub use ds::set::{OrdSet, SetIter};
pub use err::InvariantViolation;
