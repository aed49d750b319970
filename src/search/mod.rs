//! Search over the imported index
//!
//! A fixed catalog of named query expressions plus a facade that runs one
//! against the index and hands back deserialized records. Results come from
//! a single bounded fetch; there is no pagination.

pub mod catalog;
pub mod searcher;

pub use catalog::{catalog, find, NamedQuery};
pub use searcher::Searcher;
