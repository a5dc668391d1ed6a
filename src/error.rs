use thiserror::Error;

/// Errors returned by fallible tree operations.
///
/// Rejecting a duplicate element is not one of these: [`Tree::insert`] hands the element back
/// instead.
///
/// [`Tree::insert`]: crate::owned::Tree::insert
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The output slots can't hold every element of the tree.
    #[error("need {needed} slots to hold the tree but only {capacity} were given")]
    CapacityExceeded {
        /// How many elements the tree holds.
        needed: usize,
        /// How many slots were passed in.
        capacity: usize,
    },
}

/// Result alias defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
