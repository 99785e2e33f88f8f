//! 3D simplex gradient noise remapped to [0, 1].

use glam::Vec3;

use super::PermutationTable;

/// Skew factor for 3D: (sqrt(4) - 1) / 3.
const F3: f32 = 1.0 / 3.0;
/// Unskew factor for 3D: (1 - 1/sqrt(4)) / 3.
const G3: f32 = 1.0 / 6.0;
/// Squared radius of each corner's kernel.
const KERNEL_R2: f32 = 0.6;
/// Scales the summed kernels to roughly [-1, 1].
const OUTPUT_SCALE: f32 = 32.0;
/// Input prescale that brings feature size in line with the Worley family.
const INPUT_SCALE: f32 = 0.5;

/// Dot product of `(x, y, z)` with one of 12 edge gradients picked by the
/// low 4 bits of `hash` (12..15 repeat four of them).
#[inline(always)]
fn grad(hash: i32, x: f32, y: f32, z: f32) -> f32 {
  let h = hash & 15;
  let u = if h < 8 { x } else { y };
  let v = if h < 4 {
    y
  } else if h == 12 || h == 14 {
    x
  } else {
    z
  };
  (if h & 1 != 0 { -u } else { u }) + (if h & 2 != 0 { -v } else { v })
}

/// Corner contribution `(0.6 - r²)^4 * grad`, zero outside the kernel.
#[inline(always)]
fn corner(hash: i32, offset: Vec3) -> f32 {
  let t = KERNEL_R2 - offset.length_squared();
  if t < 0.0 {
    0.0
  } else {
    let t2 = t * t;
    t2 * t2 * grad(hash, offset.x, offset.y, offset.z)
  }
}

/// Evaluate simplex noise at `p`, remapped from [-1, 1] to [0, 1].
pub fn sample_simplex(p: Vec3, perm: &PermutationTable) -> f32 {
  let p = p * INPUT_SCALE;

  // Skew the input space to find the simplex cell.
  let s = (p.x + p.y + p.z) * F3;
  let i = (p.x + s).floor() as i32;
  let j = (p.y + s).floor() as i32;
  let k = (p.z + s).floor() as i32;

  // Unskew the cell origin back to (x, y, z) space.
  let t = (i.wrapping_add(j).wrapping_add(k)) as f32 * G3;
  let origin = Vec3::new(i as f32 - t, j as f32 - t, k as f32 - t);
  let d0 = p - origin;

  // Which of the six tetrahedra holds the point.
  let (o1, o2): ([i32; 3], [i32; 3]) = if d0.x >= d0.y {
    if d0.y >= d0.z {
      ([1, 0, 0], [1, 1, 0]) // X Y Z
    } else if d0.x >= d0.z {
      ([1, 0, 0], [1, 0, 1]) // X Z Y
    } else {
      ([0, 0, 1], [1, 0, 1]) // Z X Y
    }
  } else if d0.y < d0.z {
    ([0, 0, 1], [0, 1, 1]) // Z Y X
  } else if d0.x < d0.z {
    ([0, 1, 0], [0, 1, 1]) // Y Z X
  } else {
    ([0, 1, 0], [1, 1, 0]) // Y X Z
  };

  let step1 = Vec3::new(o1[0] as f32, o1[1] as f32, o1[2] as f32);
  let step2 = Vec3::new(o2[0] as f32, o2[1] as f32, o2[2] as f32);
  let d1 = d0 - step1 + Vec3::splat(G3);
  let d2 = d0 - step2 + Vec3::splat(2.0 * G3);
  let d3 = d0 - Vec3::ONE + Vec3::splat(3.0 * G3);

  let n0 = corner(perm.get3(i, j, k), d0);
  let n1 = corner(
    perm.get3(i.wrapping_add(o1[0]), j.wrapping_add(o1[1]), k.wrapping_add(o1[2])),
    d1,
  );
  let n2 = corner(
    perm.get3(i.wrapping_add(o2[0]), j.wrapping_add(o2[1]), k.wrapping_add(o2[2])),
    d2,
  );
  let n3 = corner(
    perm.get3(i.wrapping_add(1), j.wrapping_add(1), k.wrapping_add(1)),
    d3,
  );

  (OUTPUT_SCALE * (n0 + n1 + n2 + n3) * 0.5 + 0.5).clamp(0.0, 1.0)
}
