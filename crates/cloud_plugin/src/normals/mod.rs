//! Per-vertex normals derived from the density field.
//!
//! # Processing Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ STEP 1: Raw gradient (gradient.rs)                              │
//! │   central difference per axis, clamped at lattice edges,        │
//! │   normalized; zero gradient stays zero                          │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ STEP 2: Optional box smoothing (smoothing.rs)                   │
//! │   3×3×3 vector average into a second buffer, not renormalized   │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ STEP 3: Vertex interpolation (interpolate.rs)                   │
//! │   8 cube corners, slerp along X, then Y, then Z, normalize      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The gradient points from dense to sparse, i.e. out of the cloud.

mod gradient;
mod interpolate;
mod smoothing;

pub use gradient::compute_gradients;
pub use interpolate::{interpolate_normal, interpolate_vertex_normals, slerp};
pub use smoothing::smooth_normals;

use glam::Vec3;

use crate::constants::coord_to_index;
use crate::field::ScalarField;
use crate::types::LatticeDims;

/// One vector per lattice point, same layout as [`ScalarField`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalField {
  dims: LatticeDims,
  data: Vec<Vec3>,
}

impl NormalField {
  pub fn new(dims: LatticeDims) -> Self {
    Self {
      dims,
      data: vec![Vec3::ZERO; dims.len()],
    }
  }

  pub fn dims(&self) -> LatticeDims {
    self.dims
  }

  pub fn as_slice(&self) -> &[Vec3] {
    &self.data
  }

  #[inline]
  pub fn get(&self, x: usize, y: usize, z: usize) -> Vec3 {
    self.data[coord_to_index(x, y, z, self.dims)]
  }

  /// Resize for `dims`, keeping the allocation when the size is unchanged.
  /// Contents are left for the next pass to overwrite.
  pub(crate) fn prepare(&mut self, dims: LatticeDims) {
    if self.dims != dims || self.data.len() != dims.len() {
      tracing::debug!("normal field resized {:?} -> {:?}", self.dims, dims);
      self.dims = dims;
      self.data = vec![Vec3::ZERO; dims.len()];
    }
  }
}

/// Reusable gradient and smoothing buffers.
#[derive(Clone, Debug, Default)]
pub struct NormalBuffers {
  raw: NormalField,
  smoothed: NormalField,
}

impl NormalBuffers {
  pub fn new() -> Self {
    Self::default()
  }

  /// Gradient field from the last run.
  pub fn raw(&self) -> &NormalField {
    &self.raw
  }

  /// Field the last run interpolated from.
  pub fn active(&self, smoothed: bool) -> &NormalField {
    if smoothed {
      &self.smoothed
    } else {
      &self.raw
    }
  }
}

/// Full normal pass: gradient, optional smoothing, vertex interpolation.
///
/// `positions` are in lattice-index space, as emitted by the surface
/// extractor. Returns one unit normal per position.
#[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "normals::generate"))]
pub fn generate_normals(
  field: &ScalarField,
  positions: &[Vec3],
  smooth: bool,
  buffers: &mut NormalBuffers,
) -> Vec<Vec3> {
  compute_gradients(field, &mut buffers.raw);

  let source = if smooth {
    smooth_normals(&buffers.raw, &mut buffers.smoothed);
    &buffers.smoothed
  } else {
    &buffers.raw
  };

  interpolate_vertex_normals(source, positions)
}
