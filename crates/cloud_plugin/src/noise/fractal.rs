//! Multi-octave fractal accumulation.

use glam::Vec3;

use super::{sample_simplex, sample_worley, PermutationTable};
use crate::config::NoiseConfig;

/// Accumulate `config.octaves` octaves of `primitive`.
///
/// Each octave multiplies the point by `detail_scale` and the amplitude by
/// `detail_intensity`. The weighted sum is divided by the sum of
/// amplitudes, so a primitive in [0, 1] yields a result in [0, 1].
///
/// `config.octaves` must be at least 1 (checked by
/// [`CloudConfig::validate`](crate::config::CloudConfig::validate)); with
/// zero octaves the result is NaN.
#[inline]
pub fn fbm(mut p: Vec3, config: &NoiseConfig, primitive: impl Fn(Vec3) -> f32) -> f32 {
  let mut value = 0.0f32;
  let mut amplitude = 1.0f32;
  let mut max_value = 0.0f32;

  for _ in 0..config.octaves {
    max_value += amplitude;
    value += amplitude * primitive(p);
    p *= config.detail_scale;
    amplitude *= config.detail_intensity;
  }

  value / max_value
}

/// Fractal Worley noise in [0, 1].
pub fn fbm_worley(p: Vec3, config: &NoiseConfig, perm: &PermutationTable, worley_pow: f32) -> f32 {
  fbm(p, config, |q| sample_worley(q, perm, worley_pow))
}

/// Fractal simplex noise in [0, 1].
pub fn fbm_simplex(p: Vec3, config: &NoiseConfig, perm: &PermutationTable) -> f32 {
  fbm(p, config, |q| sample_simplex(q, perm))
}
