use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<T> {
    /// Insert the element into the data structure
    Insert(T),
    /// Look the element up by equality
    Retrieve(T),
    /// Look up the height of the subtree at the element
    HeightAt(T),
    /// Empty the data structure
    Clear,
    /// Compare iterators
    Iter,
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation. Clearing is rare so trees get a
    /// chance to grow.
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 0, 0, 1, 1, 2, 2, 3, 4]).unwrap() {
            0 => Op::Insert(T::arbitrary(g)),
            1 => Op::Retrieve(T::arbitrary(g)),
            2 => Op::HeightAt(T::arbitrary(g)),
            3 => Op::Clear,
            4 => Op::Iter,
            _ => unreachable!(),
        }
    }
}
