//! This crate exposes an unbalanced Binary Search Tree (BST) that exclusively owns its
//! elements, along with conversions between the tree and a sorted run of slots.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert and find stored
//! elements. BSTs are typically defined recursively using the notion of a `Node`. A `Node` stores
//! an element and will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have an element less than
//!    its own element.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have an element greater
//!    than its own element.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The tree here never rebalances itself, so its height reflects the order elements were
//! inserted in. Inserting ascending elements gives a tree as tall as it is long. Building it
//! from a sorted run with [`owned::Tree::rebuild_from_slots`] gives the shortest tree possible
//! for that many elements.
//!
//! BSTs naturally support sorted iteration by visiting the left subtree, then the subtree root,
//! then the right subtree.
//!
//! # Examples
//!
//! ```
//! use bintree::Tree;
//!
//! let mut tree = Tree::new();
//! for x in [50, 30, 70, 20, 40] {
//!     assert!(tree.insert(x).is_ok());
//! }
//!
//! assert_eq!(tree.to_string(), "20 30 40 50 70");
//! assert_eq!(tree.height_at(&50), 3);
//! assert_eq!(tree.retrieve(&40), Some(&40));
//! assert_eq!(tree.retrieve(&99), None);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
pub mod owned;


pub use error::{Error, Result};
pub use owned::Tree;
