use bintree::owned::Tree;
use bintree::Error;

use quickcheck_macros::quickcheck;

use std::collections::HashSet;

use crate::sorted_unique;

fn tree_of(xs: &[i8]) -> Tree<i8> {
    xs.iter().copied().collect()
}

#[quickcheck]
fn iterates_sorted(xs: Vec<i16>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    tree.iter().copied().eq(sorted_unique(xs))
}

#[quickcheck]
fn duplicate_is_rejected(xs: Vec<i8>, x: i8) -> bool {
    let mut tree = tree_of(&xs);
    tree.extend([x]);
    let before: Vec<_> = tree.iter().copied().collect();

    tree.insert(x) == Err(x) && tree.iter().copied().eq(before)
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree = tree_of(&xs);

    xs.iter().all(|x| tree.retrieve(x) == Some(x) && tree.height_at(x) > 0)
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = tree_of(&xs);
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.retrieve(x).is_none() && tree.height_at(x) == 0)
}

#[quickcheck]
fn clone_is_equal_and_independent(xs: Vec<i8>, extra: i8) -> bool {
    let tree = tree_of(&xs);
    let mut copy = tree.clone();
    if copy != tree {
        return false;
    }

    let was_new = copy.insert(extra).is_ok();
    // A new element makes them differ and never shows up in the original.
    !was_new || (copy != tree && tree.retrieve(&extra).is_none())
}

#[quickcheck]
fn slots_round_trip(xs: Vec<i8>, spare: u8) -> bool {
    let mut tree = tree_of(&xs);
    let before: Vec<_> = tree.iter().copied().collect();
    let mut slots = vec![None; tree.len() + usize::from(spare % 4)];

    let moved = tree.move_into_slots(&mut slots);
    if moved != Ok(before.len()) || !tree.is_empty() {
        return false;
    }

    tree.rebuild_from_slots(&mut slots);
    tree.iter().copied().eq(before) && slots.iter().all(Option::is_none)
}

#[quickcheck]
fn short_slots_are_rejected(xs: Vec<i8>) -> bool {
    let mut tree = tree_of(&xs);
    if tree.is_empty() {
        return true;
    }
    let before = tree.clone();
    let mut slots = vec![None; tree.len() - 1];

    tree.move_into_slots(&mut slots)
        == Err(Error::CapacityExceeded {
            needed: before.len(),
            capacity: before.len() - 1,
        })
        && tree == before
}

#[quickcheck]
fn rebuilt_tree_has_minimal_height(xs: Vec<i8>) -> bool {
    let sorted = sorted_unique(xs);
    let n = sorted.len();
    let tree = Tree::from_sorted(sorted);

    tree.height() == (usize::BITS - n.leading_zeros()) as usize
}

#[quickcheck]
fn drain_matches_iter(xs: Vec<i8>) -> bool {
    let mut tree = tree_of(&xs);
    let expected: Vec<_> = tree.iter().copied().collect();

    tree.drain_sorted() == expected && tree.is_empty()
}
