//! A BST whose nodes are owned exclusively by their parent (or by the [`Tree`] for the root).
//! Nothing is shared between trees: cloning a tree copies every element into a new set of
//! nodes. The tree never rebalances itself.
//!
//! Ordering comes from the element's [`Ord`] implementation and lookups use its [`PartialEq`]
//! implementation. The two are assumed to agree, i.e. `a.cmp(&b) == Ordering::Equal` exactly when
//! `a == b`.
//!
//! # Examples
//!
//! ```
//! use bintree::owned::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.is_empty());
//! assert_eq!(tree.retrieve(&1), None);
//!
//! assert_eq!(tree.insert(1), Ok(()));
//! assert_eq!(tree.retrieve(&1), Some(&1));
//!
//! // Duplicates are handed back rather than stored.
//! assert_eq!(tree.insert(1), Err(1));
//!
//! // Moving the tree into slots empties it.
//! let mut slots = [None, None];
//! assert_eq!(tree.move_into_slots(&mut slots), Ok(1));
//! assert_eq!(slots, [Some(1), None]);
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use tracing::{debug, instrument, warn};

use crate::{Error, Result};

/// Spaces per level used by [`Sideways`] unless configured otherwise.
const DEFAULT_INDENT: usize = 4;

/// An unbalanced Binary Search Tree. This can be used for inserting and finding elements and for
/// converting to and from a sorted run of slots.
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    // Whole subtrees are destroyed through `release`, never by the recursive drop glue.
    left: Link<T>,
    right: Link<T>,
    element: T,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        if let Some(root) = self.root.take() {
            release(vec![root]);
        }
    }
}

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
        }
    }

    /// Replaces the contents of `self` with a deep copy of `source`. The old nodes are destroyed
    /// before any new ones are allocated.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.root = source.root.clone();
        self.len = source.len;
    }
}

impl<T> PartialEq for Tree<T>
where
    T: PartialEq,
{
    /// Two trees are equal when they have the same shape and equal elements in the same
    /// positions. Trees holding the same elements in different shapes are not equal.
    fn eq(&self, other: &Self) -> bool {
        links_eq(&self.root, &other.root)
    }
}

impl<T> Eq for Tree<T> where T: Eq {}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root())
            .finish()
    }
}

/// Writes the elements in ascending order separated by single spaces.
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut elements = self.iter();
        if let Some(first) = elements.next() {
            write!(f, "{}", first)?;
            for element in elements {
                write!(f, " {}", element)?;
            }
        }
        Ok(())
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns `true` if the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of elements in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The number of levels in the tree. An empty tree has a height of 0 and a tree with only a
    /// root has a height of 1.
    pub fn height(&self) -> usize {
        self.root().map_or(0, Node::height)
    }

    /// Destroys every node and element in the tree. Each node's subtrees are destroyed before its
    /// own element. Clearing an empty tree does nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::owned::Tree;
    ///
    /// let mut tree: Tree<_> = [2, 1, 3].into_iter().collect();
    /// tree.clear();
    ///
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.iter().next(), None);
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn clear(&mut self) {
        if let Some(root) = self.root.take() {
            debug!(len = self.len, "clearing tree");
            release(vec![root]);
        }
        self.len = 0;
    }

    /// Inserts `element` into the tree. If an equal element is already stored, nothing changes
    /// and `element` is handed back in the `Err`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::owned::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert_eq!(tree.insert(1), Ok(()));
    /// assert_eq!(tree.insert(2), Ok(()));
    /// assert_eq!(tree.insert(1), Err(1));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, element: T) -> Result<(), T>
    where
        T: Ord,
    {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match element.cmp(&node.element) {
                Ordering::Less => &mut node.left,
                Ordering::Equal => return Err(element),
                Ordering::Greater => &mut node.right,
            };
        }

        *link = Some(Node::new_boxed(element));
        self.len += 1;
        Ok(())
    }

    /// Potentially finds the stored element equal to `target`. This compares with `==` only and
    /// looks through both subtrees of every node, so it doesn't rely on the ordering at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::owned::Tree;
    ///
    /// let tree: Tree<_> = [50, 30, 70].into_iter().collect();
    ///
    /// assert_eq!(tree.retrieve(&30), Some(&30));
    /// assert_eq!(tree.retrieve(&42), None);
    /// ```
    pub fn retrieve(&self, target: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        self.root()
            .and_then(|root| root.find(target))
            .map(|node| &node.element)
    }

    /// The height of the subtree rooted at the element equal to `target`, or 0 if no element is
    /// equal to it. A leaf has a height of 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::owned::Tree;
    ///
    /// let tree: Tree<_> = [50, 30, 70, 20, 40].into_iter().collect();
    ///
    /// assert_eq!(tree.height_at(&50), 3);
    /// assert_eq!(tree.height_at(&30), 2);
    /// assert_eq!(tree.height_at(&70), 1);
    /// assert_eq!(tree.height_at(&99), 0);
    /// ```
    pub fn height_at(&self, target: &T) -> usize
    where
        T: PartialEq,
    {
        self.root()
            .and_then(|root| root.find(target))
            .map_or(0, Node::height)
    }

    /// An iterator over the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left_edge(self.root());
        iter
    }

    /// Moves every element, in ascending order, into the front of `out` and leaves the tree
    /// empty. Slots past the last element are left alone. Returns how many elements were
    /// moved.
    ///
    /// If `out` is shorter than [`len`](Self::len), nothing is moved and
    /// [`Error::CapacityExceeded`] is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::owned::Tree;
    /// use bintree::Error;
    ///
    /// let mut tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// let mut too_small = [None, None];
    /// assert_eq!(
    ///     tree.move_into_slots(&mut too_small),
    ///     Err(Error::CapacityExceeded { needed: 3, capacity: 2 })
    /// );
    ///
    /// let mut slots = [None; 4];
    /// assert_eq!(tree.move_into_slots(&mut slots), Ok(3));
    /// assert_eq!(slots, [Some(1), Some(2), Some(3), None]);
    /// assert!(tree.is_empty());
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn move_into_slots(&mut self, out: &mut [Option<T>]) -> Result<usize> {
        if out.len() < self.len {
            return Err(Error::CapacityExceeded {
                needed: self.len,
                capacity: out.len(),
            });
        }

        let moved = self.len;
        for (slot, element) in out.iter_mut().zip(mem::take(self)) {
            *slot = Some(element);
        }
        debug!(moved, capacity = out.len(), "moved tree into slots");
        Ok(moved)
    }

    /// Replaces the contents of the tree with the leading run of filled slots in `slots`. The run
    /// starts at index 0 and ends at the first `None` (or the end of `slots`). It must be sorted
    /// ascending; an unsorted run produces a tree that breaks the BST ordering.
    ///
    /// Elements are inserted middle first (rounding down) and then each half the same way, so n
    /// elements give a tree of height ⌈log2(n + 1)⌉. Each consumed slot is set to `None`. An
    /// element equal to one already inserted is left in its slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::owned::Tree;
    ///
    /// let mut slots = [10, 20, 30, 40, 50, 60, 70].map(Some);
    /// let mut tree = Tree::new();
    /// tree.rebuild_from_slots(&mut slots);
    ///
    /// assert_eq!(tree.height(), 3);
    /// assert_eq!(tree.height_at(&40), 3);
    /// assert!(slots.iter().all(Option::is_none));
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn rebuild_from_slots(&mut self, slots: &mut [Option<T>])
    where
        T: Ord,
    {
        self.clear();
        let run = slots
            .iter()
            .position(Option::is_none)
            .unwrap_or(slots.len());
        self.insert_midpoints(&mut slots[..run], 0);
        debug!(run, inserted = self.len, "built tree from slots");
    }

    /// Builds a tree from a sorted `Vec` the same way as
    /// [`rebuild_from_slots`](Self::rebuild_from_slots). Elements equal to an earlier one are
    /// dropped.
    pub fn from_sorted(elements: Vec<T>) -> Self
    where
        T: Ord,
    {
        let mut slots: Vec<_> = elements.into_iter().map(Some).collect();
        let mut tree = Self::new();
        tree.rebuild_from_slots(&mut slots);
        tree
    }

    /// Moves every element out of the tree in ascending order, leaving it empty.
    #[instrument(level = "trace", skip_all)]
    pub fn drain_sorted(&mut self) -> Vec<T> {
        debug!(len = self.len, "draining tree");
        mem::take(self).into_iter().collect()
    }

    /// Renders the tree rotated a quarter turn counter-clockwise: the right subtree above each
    /// element, the left subtree below it, and deeper elements indented further.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::owned::Tree;
    ///
    /// let tree: Tree<_> = [50, 30, 70].into_iter().collect();
    ///
    /// assert_eq!(
    ///     tree.sideways().with_indent(1).to_string(),
    ///     "   70\n  50\n   30\n"
    /// );
    /// ```
    pub fn sideways(&self) -> Sideways<'_, T> {
        Sideways {
            root: self.root(),
            indent: DEFAULT_INDENT,
        }
    }

    /// Recursive helper for [`rebuild_from_slots`](Self::rebuild_from_slots). `offset` is the
    /// index of `slots[0]` in the caller's slice.
    fn insert_midpoints(&mut self, slots: &mut [Option<T>], offset: usize)
    where
        T: Ord,
    {
        if slots.is_empty() {
            return;
        }

        let mid = (slots.len() - 1) / 2;
        if let Some(element) = slots[mid].take() {
            if let Err(duplicate) = self.insert(element) {
                warn!(index = offset + mid, "duplicate element left in its slot");
                slots[mid] = Some(duplicate);
            }
        }

        let (lower, upper) = slots.split_at_mut(mid);
        self.insert_midpoints(lower, offset);
        self.insert_midpoints(&mut upper[1..], offset + mid + 1);
    }

    fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    /// Inserts each element in turn. Elements equal to one already in the tree are dropped.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            if let Err(_duplicate) = self.insert(element) {
                debug!("dropped duplicate element");
            }
        }
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let mut iter = IntoIter {
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left_edge(self.root.take());
        iter
    }
}

/// An in-order iterator over borrowed elements, created by [`Tree::iter`].
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iter<'a, T> {
    fn push_left_edge(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_edge(node.right());
        self.remaining -= 1;
        Some(&node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// An in-order iterator that moves elements out of the tree, created by
/// [`Tree::into_iter`](IntoIterator::into_iter).
pub struct IntoIter<T> {
    // Nodes on the stack have already had their left child taken.
    stack: Vec<Box<Node<T>>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    fn push_left_edge(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        release(mem::take(&mut self.stack));
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let Node { right, element, .. } = *node;
        self.push_left_edge(right);
        self.remaining -= 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

/// A sideways rendering of a [`Tree`], created by [`Tree::sideways`]. Each element gets its own
/// line. An element at depth `d` (the root is at depth 0) is indented by `(d + 2) * indent`
/// spaces.
pub struct Sideways<'a, T> {
    root: Option<&'a Node<T>>,
    indent: usize,
}

impl<'a, T> Sideways<'a, T> {
    /// Sets how many spaces each level of depth adds. Defaults to 4.
    pub fn with_indent(self, indent: usize) -> Self {
        Self { indent, ..self }
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, node: &Node<T>, depth: usize) -> fmt::Result
    where
        T: fmt::Display,
    {
        if let Some(right) = node.right() {
            self.write_node(f, right, depth + 1)?;
        }
        writeln!(
            f,
            "{:width$}{}",
            "",
            node.element,
            width = (depth + 2) * self.indent
        )?;
        if let Some(left) = node.left() {
            self.write_node(f, left, depth + 1)?;
        }
        Ok(())
    }
}

impl<T> fmt::Display for Sideways<'_, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => self.write_node(f, root, 0),
            None => Ok(()),
        }
    }
}

impl<T> Clone for Node<T>
where
    T: Clone,
{
    // The element is copied before either subtree.
    fn clone(&self) -> Self {
        Self {
            element: self.element.clone(),
            left: self.left.clone(),
            right: self.right.clone(),
        }
    }
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("element", &self.element)
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<T> Node<T> {
    fn new_boxed(element: T) -> Box<Self> {
        Box::new(Node {
            left: None,
            right: None,
            element,
        })
    }

    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// How many levels are in the subtree rooted at this node. A node with no children has a
    /// height of 1.
    fn height(&self) -> usize {
        let left_height = self.left().map_or(0, Node::height);
        let right_height = self.right().map_or(0, Node::height);
        left_height.max(right_height) + 1
    }

    /// Depth first search for a node whose element is equal to `target`, trying this node, then
    /// the left subtree, then the right subtree.
    fn find(&self, target: &T) -> Option<&Self>
    where
        T: PartialEq,
    {
        if self.element == *target {
            return Some(self);
        }
        self.left()
            .and_then(|n| n.find(target))
            .or_else(|| self.right().and_then(|n| n.find(target)))
    }
}

/// Destroys the subtrees on `stack` without recursing, so a degenerate tree can't overflow the
/// stack. A node is only dropped once both of its children have been.
fn release<T>(mut stack: Vec<Box<Node<T>>>) {
    while let Some(mut node) = stack.pop() {
        if node.left.is_none() && node.right.is_none() {
            drop(node);
            continue;
        }

        let left = node.left.take();
        let right = node.right.take();
        stack.push(node);
        stack.extend(right);
        stack.extend(left);
    }
}

/// Compares two subtrees by shape and element equality.
fn links_eq<T>(a: &Link<T>, b: &Link<T>) -> bool
where
    T: PartialEq,
{
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            a.element == b.element && links_eq(&a.left, &b.left) && links_eq(&a.right, &b.right)
        }
        _ => false,
    }
}
