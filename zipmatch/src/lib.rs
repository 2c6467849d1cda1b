//! Shape-aware, element-wise matching of container types.
//!
//! Two values of the same container type but different element types can be
//! aligned with [`ZipMatch::zip_match_with`] when they share the same shape: the
//! same length, the same enum variants, the same map keys, the same non-element
//! fields. Matching a list of three against a list of two fails; matching
//! `Leaf(1)` against `Node(..)` fails; matching `[1, 2]` against `['a', 'b']`
//! succeeds with `[(1, 'a'), (2, 'b')]`.
//!
//! Container types are named by their *frame token*, the type applied to
//! [`PartiallyApplied`]: `Vec<PartiallyApplied>` stands for `Vec<_>`.
//! Instances are provided for the common std containers, for [`Compose`]d
//! containers, and for the [`Free`] and [`Cofree`] recursive wrappers. For your
//! own types, `#[derive(MappableFrame, ZipMatch)]` generates both instances from
//! the type definition:
//!
//! ```rust
//! use zipmatch::{MappableFrame, PartiallyApplied, ZipMatch, ZipMatchExt};
//!
//! #[derive(Debug, PartialEq, MappableFrame, ZipMatch)]
//! enum Tree<A> {
//!     Leaf(A),
//!     Node(Box<Tree<A>>, Box<Tree<A>>),
//! }
//!
//! type TreeF = Tree<PartiallyApplied>;
//!
//! let leaf = Tree::Leaf(1);
//! let node = Tree::Node(Box::new(Tree::Leaf(2)), Box::new(Tree::Leaf(3)));
//!
//! assert_eq!(TreeF::zip_match(&leaf, &node), None);
//! assert!(TreeF::eq_default(&node, &node));
//! ```

mod cofree;
mod frame;
mod free;
mod instances;
pub mod stack_machine;
mod zip_match;

pub use cofree::Cofree;
pub use frame::{Compose, MappableFrame, PartiallyApplied};
pub use free::Free;
pub use zip_match::{Mismatch, ZipMatch, ZipMatchExt};

#[cfg(feature = "derive")]
pub use zipmatch_derive::{MappableFrame, ZipMatch};
