//! Cellular (Worley) noise.
//!
//! Feature points are jittered per cell from the permutation table. The
//! search covers a 3×3 block of XY cells; each cell hash yields three
//! sub-points stacked along Z at offsets -0.5, 0.5 and 1.5 from the
//! sample's cell, so the effective neighborhood is 3×3×3.
//!
//! ```text
//!   Y
//!   │  ·  ·  ·      each · = one XY cell hash
//!   │  ·  p  ·        → three jittered points at
//!   │  ·  ·  ·          z-offsets {-0.5, 0.5, 1.5}
//!   └──────── X
//! ```

use glam::Vec3;

use super::{frac, PermutationTable};

/// Jitter scale: hash values are spread over a 7×7 grid of offsets.
const K: f32 = 1.0 / 7.0;
/// Centers the 7×7 jitter grid around zero.
const KO: f32 = 3.0 / 7.0;
/// Cell-center offsets relative to the sample's cell origin.
const OFFSET_F: [f32; 3] = [-0.5, 0.5, 1.5];
/// Initial value of the running minimum distances.
const FAR: f32 = 1e6;

/// Three smallest squared distances seen so far, ascending.
#[derive(Clone, Copy, Debug)]
struct NearestDistances([f32; 3]);

impl NearestDistances {
  fn new() -> Self {
    Self([FAR; 3])
  }

  #[inline(always)]
  fn insert(&mut self, d: f32) {
    let f = &mut self.0;
    if d < f[0] {
      f[2] = f[1];
      f[1] = f[0];
      f[0] = d;
    } else if d < f[1] {
      f[2] = f[1];
      f[1] = d;
    } else if d < f[2] {
      f[2] = d;
    }
  }
}

/// Evaluate inverted cellular noise at `p`.
///
/// Returns `clamp01((1 - clamp01(F0))^worley_pow)` where `F0` is the
/// squared distance to the nearest feature point, so cell centers map to
/// bright values.
pub fn sample_worley(p: Vec3, perm: &PermutationTable, worley_pow: f32) -> f32 {
  let cell = p.floor();
  let (pi0, pi1, pi2) = (cell.x as i32, cell.y as i32, cell.z as i32);
  let pf = p - cell;

  let hash_x = [
    perm.get(pi0.wrapping_sub(1)),
    perm.get(pi0),
    perm.get(pi0.wrapping_add(1)),
  ];
  let hash_y = [
    perm.get(pi1.wrapping_sub(1)),
    perm.get(pi1),
    perm.get(pi1.wrapping_add(1)),
  ];

  let mut nearest = NearestDistances::new();
  let max = perm.max();

  for (i, &hx) in hash_x.iter().enumerate() {
    for (j, &hy) in hash_y.iter().enumerate() {
      let ij = perm.raw(hy.wrapping_add(perm.raw(hx))).wrapping_add(pi2);
      let h = [
        perm.raw(ij.wrapping_sub(1)) & max,
        perm.raw(ij) & max,
        perm.raw(ij.wrapping_add(1)) & max,
      ];

      let ox = h.map(|v| frac(v as f32 * K) - KO);
      let oy = h.map(|v| ((v as f32 * K).floor() % 7.0) * K - KO);
      let oz = h.map(|v| frac(perm.get(v) as f32 * K) - KO);

      for s in 0..3 {
        let feature = Vec3::new(OFFSET_F[i] + ox[s], OFFSET_F[j] + oy[s], OFFSET_F[s] + oz[s]);
        nearest.insert(pf.distance_squared(feature));
      }
    }
  }

  let f0 = nearest.0[0];
  (1.0 - f0.clamp(0.0, 1.0)).powf(worley_pow).clamp(0.0, 1.0)
}
