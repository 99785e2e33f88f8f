//! Core data types shared by the field, normal, and mesh stages.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Lattice resolution along X (width), Y (height) and Z (depth).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LatticeDims {
  pub width: usize,
  pub height: usize,
  pub depth: usize,
}

impl LatticeDims {
  pub fn new(width: usize, height: usize, depth: usize) -> Self {
    Self {
      width,
      height,
      depth,
    }
  }

  /// Square XZ footprint with an independent height, the cloud layout.
  pub fn from_resolution(resolution_xz: usize, resolution_y: usize) -> Self {
    Self::new(resolution_xz, resolution_y, resolution_xz)
  }

  /// Total number of lattice points.
  #[inline]
  pub fn len(&self) -> usize {
    self.width * self.height * self.depth
  }

  /// `len` without overflow; `None` if the product does not fit `usize`.
  pub fn checked_len(&self) -> Option<usize> {
    self.width.checked_mul(self.height)?.checked_mul(self.depth)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Number of points in one Z-slice.
  #[inline]
  pub fn slice_len(&self) -> usize {
    self.width * self.height
  }

  /// Lattice extent as a float vector.
  pub fn extent(&self) -> Vec3 {
    Vec3::new(self.width as f32, self.height as f32, self.depth as f32)
  }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxAABB {
  pub min: Vec3,
  pub max: Vec3,
}

impl MinMaxAABB {
  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: Vec3::INFINITY,
      max: Vec3::NEG_INFINITY,
    }
  }

  pub fn new(min: Vec3, max: Vec3) -> Self {
    Self { min, max }
  }

  /// Box spanning the whole lattice in index space.
  pub fn from_lattice(dims: LatticeDims) -> Self {
    Self::new(Vec3::ZERO, dims.extent())
  }

  /// Expand AABB to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: Vec3) {
    self.min = self.min.min(point);
    self.max = self.max.max(point);
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    self.min.cmple(self.max).all()
  }

  pub fn center(&self) -> Vec3 {
    (self.min + self.max) * 0.5
  }

  pub fn size(&self) -> Vec3 {
    self.max - self.min
  }
}

impl Default for MinMaxAABB {
  fn default() -> Self {
    Self::empty()
  }
}

/// Mesh produced by one rebuild: positions in lattice-index space, one
/// normal per position, three indices per triangle.
#[derive(Clone, Debug, Default)]
pub struct CloudMesh {
  pub positions: Vec<Vec3>,
  pub indices: Vec<u32>,
  pub normals: Vec<Vec3>,
  /// Lattice box the mesh lives in.
  pub bounds: MinMaxAABB,
}

impl CloudMesh {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clear all buffers, preserving capacity.
  pub fn clear(&mut self) {
    self.positions.clear();
    self.indices.clear();
    self.normals.clear();
    self.bounds = MinMaxAABB::empty();
  }

  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }

  pub fn vertex_count(&self) -> usize {
    self.positions.len()
  }

  /// Number of triangles in the mesh.
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  /// Tight bounds of the emitted positions.
  pub fn vertex_bounds(&self) -> MinMaxAABB {
    let mut aabb = MinMaxAABB::empty();
    for &p in &self.positions {
      aabb.encapsulate(p);
    }
    aabb
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
