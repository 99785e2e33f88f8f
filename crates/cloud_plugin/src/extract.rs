//! Isosurface extraction seam.
//!
//! The pipeline only needs "field + threshold in, lattice-space triangles
//! out". [`SurfaceNetsExtractor`] provides that through `fast-surface-nets`;
//! hosts with their own mesher implement [`IsosurfaceExtractor`] (any
//! matching closure already does).

use fast_surface_nets::ndshape::RuntimeShape;
use fast_surface_nets::{surface_nets, SurfaceNetsBuffer};
use glam::Vec3;

use crate::field::ScalarField;

/// Raw extractor output: positions in lattice-index space, 3 indices per
/// triangle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtractedMesh {
  pub positions: Vec<Vec3>,
  pub indices: Vec<u32>,
}

impl ExtractedMesh {
  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }

  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }
}

/// Converts a density field into a triangle mesh at `threshold`.
///
/// Points denser than the threshold are inside the surface.
pub trait IsosurfaceExtractor: Send + Sync {
  fn extract(&self, threshold: f32, field: &ScalarField) -> ExtractedMesh;
}

impl<F> IsosurfaceExtractor for F
where
  F: Fn(f32, &ScalarField) -> ExtractedMesh + Send + Sync,
{
  fn extract(&self, threshold: f32, field: &ScalarField) -> ExtractedMesh {
    self(threshold, field)
  }
}

/// Naive surface nets over the whole lattice.
#[derive(Clone, Copy, Debug, Default)]
pub struct SurfaceNetsExtractor;

impl SurfaceNetsExtractor {
  pub fn new() -> Self {
    Self
  }
}

impl IsosurfaceExtractor for SurfaceNetsExtractor {
  #[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "extract::surface_nets"))]
  fn extract(&self, threshold: f32, field: &ScalarField) -> ExtractedMesh {
    let dims = field.dims();
    if dims.width < 2 || dims.height < 2 || dims.depth < 2 {
      return ExtractedMesh::default();
    }

    // Signed distance convention: negative inside.
    let sdf: Vec<f32> = field.as_slice().iter().map(|&d| threshold - d).collect();

    // ndshape linearizes the first axis fastest, matching the field layout.
    let shape = RuntimeShape::<u32, 3>::new([
      dims.width as u32,
      dims.height as u32,
      dims.depth as u32,
    ]);
    let max = [
      dims.width as u32 - 1,
      dims.height as u32 - 1,
      dims.depth as u32 - 1,
    ];

    let mut buffer = SurfaceNetsBuffer::default();
    surface_nets(sdf.as_slice(), &shape, [0; 3], max, &mut buffer);

    ExtractedMesh {
      positions: buffer.positions.iter().map(|&p| Vec3::from_array(p)).collect(),
      indices: buffer.indices,
    }
  }
}
