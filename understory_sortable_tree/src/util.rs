// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::FlattenedNode;

/// Moves the element at `from` so that it ends up at `to`, shifting the elements in between.
///
/// Out-of-range indices leave the sequence untouched.
pub(crate) fn array_move<E>(items: &mut Vec<E>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Returns the flat index one past the subtree rooted at `start_ix`.
pub(crate) fn subtree_end_ix<K, T>(items: &[FlattenedNode<K, T>], start_ix: usize) -> usize {
    let start_depth = items[start_ix].depth;
    let mut ix = start_ix + 1;
    while ix < items.len() && items[ix].depth > start_depth {
        ix += 1;
    }
    ix
}

/// Rounds half-way values toward positive infinity, matching pointer-offset rounding in
/// browser-based drag toolkits (`-1.5` rounds to `-1`, `1.5` rounds to `2`).
pub(crate) fn round_half_up(value: f64) -> i64 {
    let shifted = value + 0.5;
    #[expect(
        clippy::cast_possible_truncation,
        reason = "drag depths are small; saturating float-to-int casts are fine"
    )]
    let truncated = shifted as i64;
    // `as` truncates toward zero; step down for negative non-integers to get `floor`.
    if (truncated as f64) > shifted {
        truncated - 1
    } else {
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn array_move_forward_and_backward() {
        let mut v = vec![1, 2, 3, 4];
        array_move(&mut v, 0, 2);
        assert_eq!(v, [2, 3, 1, 4]);
        array_move(&mut v, 3, 0);
        assert_eq!(v, [4, 2, 3, 1]);
    }

    #[test]
    fn array_move_ignores_out_of_range() {
        let mut v = vec![1, 2];
        array_move(&mut v, 0, 5);
        assert_eq!(v, [1, 2]);
    }

    #[test]
    fn rounding_matches_half_up() {
        assert_eq!(round_half_up(0.0), 0);
        assert_eq!(round_half_up(0.49), 0);
        assert_eq!(round_half_up(0.5), 1);
        assert_eq!(round_half_up(1.5), 2);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-1.5), -1);
        assert_eq!(round_half_up(-1.51), -2);
        assert_eq!(round_half_up(-2.0), -2);
    }
}
