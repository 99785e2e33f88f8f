//! Dense scalar density field and its parallel builder.
//!
//! The field is rebuilt wholesale on every request. Its allocation is kept
//! across rebuilds and only replaced when the lattice dimensions change.

use glam::Vec3;
use rayon::prelude::*;

use crate::constants::coord_to_index;
use crate::sampler::CloudSampler;
use crate::types::LatticeDims;

/// Flattened 3D density lattice, indexed `x + y*w + z*w*h`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScalarField {
  dims: LatticeDims,
  data: Vec<f32>,
}

impl ScalarField {
  /// Zero-filled field of the given size.
  pub fn new(dims: LatticeDims) -> Self {
    Self {
      dims,
      data: vec![0.0; dims.len()],
    }
  }

  /// Wrap existing values. Returns `None` if the length does not match.
  pub fn from_vec(dims: LatticeDims, data: Vec<f32>) -> Option<Self> {
    (data.len() == dims.len()).then_some(Self { dims, data })
  }

  /// Field of the given size with every point set by `f(x, y, z)`.
  pub fn from_fn(dims: LatticeDims, f: impl Fn(usize, usize, usize) -> f32) -> Self {
    let mut field = Self::new(dims);
    for z in 0..dims.depth {
      for y in 0..dims.height {
        for x in 0..dims.width {
          field.data[coord_to_index(x, y, z, dims)] = f(x, y, z);
        }
      }
    }
    field
  }

  pub fn dims(&self) -> LatticeDims {
    self.dims
  }

  pub fn as_slice(&self) -> &[f32] {
    &self.data
  }

  #[inline]
  pub fn get(&self, x: usize, y: usize, z: usize) -> f32 {
    self.data[coord_to_index(x, y, z, self.dims)]
  }

  /// Clear to zero, reallocating only when `dims` differs from the
  /// current size. Returns true if a new allocation was made.
  pub fn reset(&mut self, dims: LatticeDims) -> bool {
    if self.dims == dims && self.data.len() == dims.len() {
      self.data.fill(0.0);
      return false;
    }

    tracing::debug!(
      "scalar field resized {:?} -> {:?} ({} points)",
      self.dims,
      dims,
      dims.len()
    );
    self.dims = dims;
    self.data = vec![0.0; dims.len()];
    true
  }

  /// Smallest and largest density.
  pub fn min_max(&self) -> Option<(f32, f32)> {
    self.data.iter().fold(None, |acc, &v| match acc {
      None => Some((v, v)),
      Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
  }

  /// Number of points strictly above `threshold`.
  pub fn count_above(&self, threshold: f32) -> usize {
    self.data.iter().filter(|&&v| v > threshold).count()
  }
}

/// Unit-cube position of a lattice point: `coordinate / resolution`.
#[inline]
pub fn lattice_to_unit(x: usize, y: usize, z: usize, dims: LatticeDims) -> Vec3 {
  Vec3::new(
    x as f32 / dims.width as f32,
    y as f32 / dims.height as f32,
    z as f32 / dims.depth as f32,
  )
}

/// Evaluate the layer-shaped density at every lattice point of `field`.
///
/// The field is cleared (and resized to the sampler's resolution) first.
/// With `close_volume` the outer one-voxel shell stays at 0 so the
/// extracted surface is watertight. Z-slices are filled in parallel; each
/// slice is written by exactly one task.
#[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "field::build"))]
pub fn build(sampler: &CloudSampler, field: &mut ScalarField) {
  let config = sampler.config();
  let dims = config.dims();
  field.reset(dims);

  let border = usize::from(config.close_volume);
  let x_range = border..dims.width - border;
  let y_range = border..dims.height - border;
  let z_range = border..dims.depth - border;

  field
    .data
    .par_chunks_mut(dims.slice_len())
    .enumerate()
    .filter(|(z, _)| z_range.contains(z))
    .for_each(|(z, slice)| {
      for y in y_range.clone() {
        let row = y * dims.width;
        for x in x_range.clone() {
          slice[row + x] = sampler.sample(lattice_to_unit(x, y, z, dims), true);
        }
      }
    });
}

/// Single-threaded reference for [`build`].
pub fn build_serial(sampler: &CloudSampler, field: &mut ScalarField) {
  let config = sampler.config();
  let dims = config.dims();
  field.reset(dims);

  let border = usize::from(config.close_volume);
  for z in border..dims.depth - border {
    for y in border..dims.height - border {
      for x in border..dims.width - border {
        field.data[coord_to_index(x, y, z, dims)] =
          sampler.sample(lattice_to_unit(x, y, z, dims), true);
      }
    }
  }
}

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;
