mod owned;

/// Sorts and dedups `xs`, which is the order a tree built from them should iterate in.
fn sorted_unique<T: Ord>(mut xs: Vec<T>) -> Vec<T> {
    xs.sort();
    xs.dedup();
    xs
}
