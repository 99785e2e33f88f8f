//! Lattice layout and noise table constants.
//!
//! # Scalar Field Layout
//!
//! ```text
//! Flattened 3D lattice, X fastest, Z slowest:
//!
//! Address:  0        1        ...  w-1        w        ...  w*h      ...
//! Content: [0,0,0]  [1,0,0]  ...  [w-1,0,0]  [0,1,0]  ...  [0,0,1]  ...
//!          └──────── X ───────────┘└──── X ──── ...
//!          └──────────────── one Z-slice (w*h) ─────────┘
//!
//! index = x + y * width + z * width * height
//! ```
//!
//! Each Z-slice is a contiguous `width * height` run, which is what the
//! parallel builders split on: one slice per task, no two tasks alias.
//!
//! # Coordinate System
//!
//! ```text
//!         +Y  (unit height axis used by layers)
//!          │
//!          │
//!          └───────── +X
//!         /
//!        /
//!       +Z
//! ```

use crate::types::LatticeDims;

/// Seed of the shared permutation table.
pub const DEFAULT_PERM_SEED: u64 = 1010;

/// Entry count of the shared permutation table (power of two).
pub const DEFAULT_PERM_SIZE: usize = 1024;

/// Value mask applied to permutation lookups.
pub const DEFAULT_PERM_MAX: i32 = 255;

/// Largest accepted permutation table entry count. Keeps the rounded size
/// and its `size - 1` wrap mask inside `i32`.
pub const MAX_PERM_SIZE: usize = 1 << 30;

/// Largest accepted lattice point count. Mesh indices and the extractor
/// shape are `u32`.
pub const MAX_LATTICE_POINTS: usize = u32::MAX as usize;

/// Smallest resolution accepted on any axis.
pub const MIN_RESOLUTION: usize = 2;

/// Half-extent of the normal smoothing window (3×3×3).
pub const SMOOTH_KERNEL_RADIUS: isize = 1;

/// Convert a lattice coordinate to a flat field index.
#[inline(always)]
pub fn coord_to_index(x: usize, y: usize, z: usize, dims: LatticeDims) -> usize {
  x + y * dims.width + z * dims.width * dims.height
}

/// Convert a flat field index back to a lattice coordinate.
#[inline(always)]
pub fn index_to_coord(index: usize, dims: LatticeDims) -> (usize, usize, usize) {
  let slice = dims.width * dims.height;
  let z = index / slice;
  let rem = index % slice;
  (rem % dims.width, rem / dims.width, z)
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
