//! Trilinear-position, spherical-direction interpolation of lattice normals.

use glam::Vec3;
use rayon::prelude::*;

use super::NormalField;

/// Below this length a vector has no usable direction.
const DIRECTION_EPSILON: f32 = 1e-6;

/// Above this cosine two directions are treated as parallel.
const PARALLEL_COS: f32 = 0.9995;

/// Fallback for vertices whose interpolated normal vanishes.
const FALLBACK_NORMAL: Vec3 = Vec3::Y;

/// Spherical interpolation between two (not necessarily unit) vectors.
///
/// The direction rotates along the shorter great-circle arc while the
/// length is interpolated linearly. Antiparallel inputs rotate about an
/// arbitrary orthogonal axis. Nearly parallel inputs, or inputs without a
/// direction, fall back to a linear blend.
#[inline]
pub fn slerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
  if t <= 0.0 {
    return a;
  }
  if t >= 1.0 {
    return b;
  }

  let len_a = a.length();
  let len_b = b.length();
  if len_a < DIRECTION_EPSILON || len_b < DIRECTION_EPSILON {
    return a.lerp(b, t);
  }

  let dir_a = a / len_a;
  let dir_b = b / len_b;
  let cos = dir_a.dot(dir_b).clamp(-1.0, 1.0);
  if cos > PARALLEL_COS {
    return a.lerp(b, t);
  }
  let angle = cos.acos() * t;

  // Unit vector orthogonal to dir_a in the plane towards dir_b.
  let tangent = if cos < -PARALLEL_COS {
    dir_a.any_orthonormal_vector()
  } else {
    (dir_b - dir_a * cos).normalize()
  };

  let dir = dir_a * angle.cos() + tangent * angle.sin();
  dir * (len_a + (len_b - len_a) * t)
}

/// Clamp a lattice-space coordinate to `[0, n-1]` and split it into the
/// lower corner, the clamped upper corner, and the fraction between them.
#[inline]
fn split_axis(coord: f32, n: usize) -> (usize, usize, f32) {
  let last = (n - 1) as f32;
  let c = if coord.is_finite() {
    coord.clamp(0.0, last)
  } else {
    0.0
  };
  let lower = c.floor();
  let c0 = lower as usize;
  let c1 = (c0 + 1).min(n - 1);
  (c0, c1, c - lower)
}

/// Interpolated unit normal at a lattice-space position.
///
/// Slerps the 8 surrounding lattice normals along X, then Y, then Z and
/// normalizes. Positions outside the lattice are clamped onto it.
#[inline]
pub fn interpolate_normal(normals: &NormalField, position: Vec3) -> Vec3 {
  let dims = normals.dims();
  let (x0, x1, tx) = split_axis(position.x, dims.width);
  let (y0, y1, ty) = split_axis(position.y, dims.height);
  let (z0, z1, tz) = split_axis(position.z, dims.depth);

  let n = |x, y, z| normals.get(x, y, z);

  let near = slerp(
    slerp(n(x0, y0, z0), n(x1, y0, z0), tx),
    slerp(n(x0, y1, z0), n(x1, y1, z0), tx),
    ty,
  );
  let far = slerp(
    slerp(n(x0, y0, z1), n(x1, y0, z1), tx),
    slerp(n(x0, y1, z1), n(x1, y1, z1), tx),
    ty,
  );

  slerp(near, far, tz)
    .try_normalize()
    .unwrap_or(FALLBACK_NORMAL)
}

/// Interpolate a normal for every position, in parallel.
pub fn interpolate_vertex_normals(normals: &NormalField, positions: &[Vec3]) -> Vec<Vec3> {
  positions
    .par_iter()
    .map(|&p| interpolate_normal(normals, p))
    .collect()
}
