//! Allocation-free permutation generation.
//!
//! Iterative Heap's algorithm over a fixed `[u8; 9]`. Each step performs a
//! single swap, so consecutive permutations differ in exactly two positions.
//! A fixed prefix can be held in place, which is how a sweep is split into
//! independent shards.

use crate::board::grid::SLOT_COUNT;

/// `n!` for the small sizes used here.
pub const fn factorial(n: usize) -> u64 {
    let mut acc = 1u64;
    let mut i = 2;
    while i <= n {
        acc *= i as u64;
        i += 1;
    }
    acc
}

/// The identity assignment `[0, 1, ..., 8]`.
pub const IDENTITY: [u8; SLOT_COUNT] = [0, 1, 2, 3, 4, 5, 6, 7, 8];

/// Iterator over every ordering of the non-fixed tail of an array.
#[derive(Debug, Clone)]
pub struct Permutations {
    items: [u8; SLOT_COUNT],
    counters: [usize; SLOT_COUNT],
    /// Number of leading positions held in place.
    fixed: usize,
    i: usize,
    started: bool,
}

impl Permutations {
    /// All `9!` orderings of `items`.
    pub fn new(items: [u8; SLOT_COUNT]) -> Self {
        Self::with_fixed_prefix(items, 0)
    }

    /// All orderings of `items[fixed..]`, leaving `items[..fixed]` untouched.
    pub fn with_fixed_prefix(items: [u8; SLOT_COUNT], fixed: usize) -> Self {
        Permutations {
            items,
            counters: [0; SLOT_COUNT],
            fixed: fixed.min(SLOT_COUNT),
            i: 1,
            started: false,
        }
    }

    /// Number of orderings this generator yields in total.
    pub fn len_total(&self) -> u64 {
        factorial(SLOT_COUNT - self.fixed)
    }
}

impl Iterator for Permutations {
    type Item = [u8; SLOT_COUNT];

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            return Some(self.items);
        }

        let n = SLOT_COUNT - self.fixed;
        let base = self.fixed;
        while self.i < n {
            let i = self.i;
            if self.counters[i] < i {
                if i % 2 == 0 {
                    self.items.swap(base, base + i);
                } else {
                    self.items.swap(base + self.counters[i], base + i);
                }
                self.counters[i] += 1;
                self.i = 1;
                return Some(self.items);
            }
            self.counters[i] = 0;
            self.i += 1;
        }
        None
    }
}

/// Lexicographic rank of a permutation of `0..9`, in `0..9!`.
///
/// Used to index visited-sets when checking sweep completeness.
pub fn permutation_rank(perm: &[u8; SLOT_COUNT]) -> u64 {
    let mut rank = 0u64;
    for i in 0..SLOT_COUNT {
        let smaller_after = perm[i + 1..].iter().filter(|&&p| p < perm[i]).count() as u64;
        rank += smaller_after * factorial(SLOT_COUNT - 1 - i);
    }
    rank
}

/// Returns true if `values` is a permutation of `0..9`.
pub fn is_permutation(values: &[usize]) -> bool {
    if values.len() != SLOT_COUNT {
        return false;
    }
    let mut seen = [false; SLOT_COUNT];
    for &v in values {
        if v >= SLOT_COUNT || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}
