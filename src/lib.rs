//! Left-leaning red-black tree for Rust.
//!
//! This crate provides [`LlrbTree`], an ordered map from `i64` keys to `i64` values
//! implemented as a left-leaning red-black tree (LLRB). An LLRB is a binary search tree
//! encoding of a 2-3 tree: a red link glues a node to its parent to form a 3-node, and
//! red links are only ever allowed to lean left. Three local rules (rotate left, rotate
//! right, flip colors) applied on the way back up every recursive call keep the tree
//! balanced, giving O(log n) search, insertion and deletion.
//!
//! # Example
//!
//! ```
//! use llrb_tree::{Color, LlrbTree};
//!
//! let mut tree = LlrbTree::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(key, key * 10);
//! }
//!
//! assert_eq!(tree.search(4), Some(40));
//! assert_eq!(tree.root_color(), Some(Color::Black));
//!
//! tree.delete_min();
//! let keys: Vec<i64> = tree.walk().map(|(key, _, _)| key).collect();
//! assert_eq!(keys, [3, 4, 5, 7, 8, 9]);
//!
//! assert!(tree.delete(5));
//! assert!(!tree.delete(5));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Arena storage** - Nodes live in one contiguous slot arena, freed slots are reused
//! - **Lazy traversal** - [`LlrbTree::walk`] yields `(key, value, color)` in ascending key order
//!
//! # Implementation
//!
//! Every recursive helper takes the handle of a subtree root and returns the handle of
//! the (possibly rotated) subtree root, so rebalancing is expressed as a chain of
//! `Handle -> Handle` transformations rather than in-place pointer surgery.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod color;
mod raw;

pub mod llrb_tree;

pub use color::Color;
pub use llrb_tree::{LlrbTree, Walk};
