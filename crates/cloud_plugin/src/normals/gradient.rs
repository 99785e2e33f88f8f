//! Central-difference gradient of the density field.

use glam::Vec3;
use rayon::prelude::*;

use super::NormalField;
use crate::field::ScalarField;

/// Fill `out` with the normalized gradient at every lattice point.
///
/// Neighbors are clamped to the lattice (`max(c-1, 0)`, `min(c+1, n-1)`),
/// so edge points use a one-sided difference. Each component is
/// `field[prev] - field[next]`. Zero-length gradients stay zero.
pub fn compute_gradients(field: &ScalarField, out: &mut NormalField) {
  let dims = field.dims();
  out.prepare(dims);

  let values = field.as_slice();
  let (w, h, d) = (dims.width, dims.height, dims.depth);
  let slice_len = dims.slice_len();

  out
    .data
    .par_chunks_mut(slice_len)
    .enumerate()
    .for_each(|(z, slice)| {
      let z_prev = z.saturating_sub(1) * slice_len;
      let z_next = (z + 1).min(d - 1) * slice_len;
      let z_base = z * slice_len;

      for y in 0..h {
        let y_prev = y.saturating_sub(1) * w;
        let y_next = (y + 1).min(h - 1) * w;
        let row = y * w;

        for x in 0..w {
          let x_prev = x.saturating_sub(1);
          let x_next = (x + 1).min(w - 1);

          let gradient = Vec3::new(
            values[x_prev + row + z_base] - values[x_next + row + z_base],
            values[x + y_prev + z_base] - values[x + y_next + z_base],
            values[x + row + z_prev] - values[x + row + z_next],
          );
          slice[row + x] = gradient.normalize_or_zero();
        }
      }
    });
}
