//! 2D debug preview of the blended noise on the `z = 0` plane.

use glam::Vec3;
use rayon::prelude::*;

use crate::sampler::CloudSampler;

/// Square grid of raw densities, row `i` holding samples at `x = i/size`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PreviewImage {
  size: usize,
  values: Vec<f32>,
}

impl PreviewImage {
  pub fn size(&self) -> usize {
    self.size
  }

  pub fn values(&self) -> &[f32] {
    &self.values
  }

  /// Value at pixel `(i, j)`, stored at `i * size + j`.
  #[inline]
  pub fn get(&self, i: usize, j: usize) -> f32 {
    self.values[i * self.size + j]
  }

  pub fn negative_count(&self) -> usize {
    self.values.iter().filter(|&&v| v < 0.0).count()
  }

  /// Quantize to 8-bit grayscale, clamping to [0, 1].
  pub fn to_luma8(&self) -> Vec<u8> {
    self
      .values
      .iter()
      .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
      .collect()
  }
}

/// Sample `size × size` points of the unlayered noise at `(i/size, j/size, 0)`.
///
/// Rows are filled in parallel. Negative values should not occur; if any
/// do they are reported with `tracing::warn!`. A `size` whose pixel count
/// overflows `usize` yields an empty image.
#[cfg_attr(feature = "profiling", tracing::instrument(skip(sampler)))]
pub fn preview_slice(sampler: &CloudSampler, size: usize) -> PreviewImage {
  let Some(len) = size.checked_mul(size) else {
    tracing::warn!(size, "preview size overflows the pixel count");
    return PreviewImage::default();
  };
  if len == 0 {
    return PreviewImage::default();
  }

  let mut values = vec![0.0f32; len];

  let inv = 1.0 / size as f32;
  values.par_chunks_mut(size).enumerate().for_each(|(i, row)| {
    let u = i as f32 * inv;
    for (j, value) in row.iter_mut().enumerate() {
      *value = sampler.sample(Vec3::new(u, j as f32 * inv, 0.0), false);
    }
  });

  let image = PreviewImage { size, values };
  let negatives = image.negative_count();
  if negatives > 0 {
    let lowest = image.values.iter().copied().fold(f32::INFINITY, f32::min);
    tracing::warn!(negatives, lowest, "preview contains negative densities");
  }
  image
}
