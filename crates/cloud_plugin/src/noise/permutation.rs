//! Seeded permutation table used to hash integer lattice coordinates.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{DEFAULT_PERM_MAX, DEFAULT_PERM_SEED, DEFAULT_PERM_SIZE};

/// Fixed table of pseudo-random non-negative integers.
///
/// Lookups are total over `i32`: indices are wrapped with `size - 1`
/// (size is always a power of two), so negative indices such as `i - 1`
/// are valid. The table is immutable after construction and is shared by
/// reference across threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationTable {
  table: Box<[i32]>,
  wrap: i32,
  max: i32,
  seed: u64,
}

impl PermutationTable {
  /// Build a table of `size` entries (rounded up to a power of two) whose
  /// masked lookups are limited to `max`.
  pub fn new(size: usize, max: i32, seed: u64) -> Self {
    let size = size.max(2).next_power_of_two();
    let mut rng = StdRng::seed_from_u64(seed);
    // 31-bit entries: sums of two entries plus a cell coordinate stay
    // meaningful after wrapping adds.
    let table: Box<[i32]> = (0..size)
      .map(|_| (rng.random::<u32>() >> 1) as i32)
      .collect();

    Self {
      table,
      wrap: (size - 1) as i32,
      max,
      seed,
    }
  }

  pub fn size(&self) -> usize {
    self.table.len()
  }

  pub fn seed(&self) -> u64 {
    self.seed
  }

  /// True if `new(size, max, seed)` would build this exact table.
  pub fn matches(&self, size: usize, max: i32, seed: u64) -> bool {
    self.seed == seed && self.max == max && self.size() == size.max(2).next_power_of_two()
  }

  /// Index mask (`size - 1`).
  #[inline(always)]
  pub fn wrap(&self) -> i32 {
    self.wrap
  }

  /// Value mask.
  #[inline(always)]
  pub fn max(&self) -> i32 {
    self.max
  }

  /// Unmasked entry at `i`.
  #[inline(always)]
  pub fn raw(&self, i: i32) -> i32 {
    self.table[(i & self.wrap) as usize]
  }

  /// 1D lookup: `table[i & wrap] & max`.
  #[inline(always)]
  pub fn get(&self, i: i32) -> i32 {
    self.raw(i) & self.max
  }

  /// 3D double-hashed lookup, used for gradient selection.
  #[inline(always)]
  pub fn get3(&self, i: i32, j: i32, k: i32) -> i32 {
    let ij = self.raw(j.wrapping_add(self.raw(i)));
    self.raw(k.wrapping_add(ij)) & self.max
  }
}

impl Default for PermutationTable {
  fn default() -> Self {
    Self::new(DEFAULT_PERM_SIZE, DEFAULT_PERM_MAX, DEFAULT_PERM_SEED)
  }
}
