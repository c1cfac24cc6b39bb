//! A compact radix tree keyed by Unicode strings.
//!
//! Keys are split into segments shared between keys with a common prefix. Each level keeps its
//! branches in a sibling chain plus an index from first code point to branch, so descending one
//! level never scans more than a handful of entries.
//!
//! Beyond exact lookup the tree answers prefix queries: every stored key that is a prefix of a
//! query ([`RadixTree::get_all_prefix_matches`]), the longest one
//! ([`RadixTree::get_best_match`]), and stored keys extending a query
//! ([`RadixTree::get_longer_matches`]). A tree with string values can be written out as
//! tab-indented text records and read back with [`RadixTree::serialize`] and
//! [`RadixTree::deserialize`].
//!
//! ```rust
//! use runetree::RadixTree;
//!
//! let mut routes = RadixTree::new();
//! routes.insert("/api", "api").unwrap();
//! routes.insert("/api/users", "users").unwrap();
//! routes.insert("/static", "files").unwrap();
//!
//! let (prefix, handler) = routes.get_best_match("/api/users/42").unwrap();
//! assert_eq!(prefix, "/api/users");
//! assert_eq!(*handler, "users");
//! ```

pub mod config;
pub mod error;
pub mod iter;
mod mapping;
pub mod matches;
mod node;
pub mod partials;
pub mod serialize;
pub mod stats;
pub mod sync;
pub mod tree;
pub mod utils;

pub use config::Config;
pub use error::{FormatError, FormatErrorKind, TreeError};
pub use node::{NodeId, NodeRef};
pub use serialize::Records;
pub use stats::{TreeStats, TreeStatsTrait};
pub use sync::SyncRadixTree;
pub use tree::RadixTree;
