//! # Algorithms Crate
//!
//! Classic algorithms and data structures, one self-contained module each.
//!
//! ## Modules
//!
//! - `data_structures` – Segment tree (range sums), union-find, k-d tree, arena linked list
//! - `searching` – Binary search over sorted slices
//! - `graph` – Floyd cycle detection, Tarjan bridge finding
//! - `string_algorithms` – Trie
//! - `error` – `AlgorithmError`, shared by every fallible operation
//!
//! ---
//!
//! ## Usage Example
//!
//! ```rust
//! use algorithms::data_structures::segment_tree::SegmentTree;
//!
//! let mut tree = SegmentTree::build(&[1, 3, 5]).unwrap();
//! assert_eq!(tree.range_sum(0, 2), Ok(9));
//! tree.update(1, 2).unwrap();
//! assert_eq!(tree.range_sum(0, 2), Ok(8));
//! ```
//!
//! ---
//!
//! Structures are single-threaded; wrap one in a mutex to share it.

pub mod computation_map;
pub mod data_structures;
pub mod error;
pub mod graph;
pub mod searching;
pub mod string_algorithms;

pub use error::{AlgorithmError, Result};
