//! 3×3×3 box average of a normal field.

use glam::Vec3;
use rayon::prelude::*;

use super::NormalField;
use crate::constants::{coord_to_index, SMOOTH_KERNEL_RADIUS};

/// Average each point's neighborhood of `src` into `dst`.
///
/// Out-of-lattice neighbors are dropped from both the sum and the count.
/// Vectors are averaged component-wise and not renormalized. `dst` is a
/// separate buffer so no task reads a value another task is writing.
pub fn smooth_normals(src: &NormalField, dst: &mut NormalField) {
  let dims = src.dims();
  dst.prepare(dims);

  let values = src.as_slice();
  let (w, h, d) = (dims.width as isize, dims.height as isize, dims.depth as isize);
  let r = SMOOTH_KERNEL_RADIUS;

  dst
    .data
    .par_chunks_mut(dims.slice_len())
    .enumerate()
    .for_each(|(z, slice)| {
      let z = z as isize;
      for y in 0..h {
        for x in 0..w {
          let mut sum = Vec3::ZERO;
          let mut count = 0u32;

          for k in (z - r).max(0)..=(z + r).min(d - 1) {
            for j in (y - r).max(0)..=(y + r).min(h - 1) {
              for i in (x - r).max(0)..=(x + r).min(w - 1) {
                sum += values[coord_to_index(i as usize, j as usize, k as usize, dims)];
                count += 1;
              }
            }
          }

          slice[(x + y * w) as usize] = sum / count as f32;
        }
      }
    });
}
