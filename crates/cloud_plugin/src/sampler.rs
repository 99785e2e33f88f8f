//! Layer-shaped cloud density sampling.
//!
//! ```text
//!  unit point ──► × noise_scale ──► (1-r)·fbm_worley + r·fbm_simplex ──► contrib
//!      │                                                                   │
//!      └──── unit.y ──► Σ layer_weight(layer, unit.y) ──────────────► × weight
//! ```
//!
//! Layers read the unscaled height so bands stay fixed on [0, 1] no matter
//! how the noise is scaled. With no enabled layers the raw contribution is
//! returned untouched (not zero).

use std::sync::Arc;

use glam::Vec3;

use crate::config::{CloudConfig, Layer};
use crate::error::ConfigError;
use crate::noise::{fbm_simplex, fbm_worley, PermutationTable};

/// Weight of a single band at height `unit_y`.
///
/// `(1 - clamp01((|mid - y| / half)^curve)) * intensity`: full intensity at
/// the midpoint, zero at and beyond the edges. A curve of 0 is a hard band
/// (full intensity strictly inside, zero elsewhere).
#[inline]
pub fn layer_weight(layer: &Layer, unit_y: f32) -> f32 {
  let distance = (layer.midpoint() - unit_y).abs() / layer.half_width();

  if layer.curve == 0.0 {
    return if distance < 1.0 { layer.intensity } else { 0.0 };
  }

  (1.0 - distance.powf(layer.curve).clamp(0.0, 1.0)) * layer.intensity
}

/// Summed weight of all enabled layers, `None` when every layer is disabled.
#[inline]
pub fn layers_weight<'a>(layers: impl IntoIterator<Item = &'a Layer>, unit_y: f32) -> Option<f32> {
  let mut enabled = 0usize;
  let mut weight = 0.0f32;

  for layer in layers {
    if layer.disabled {
      continue;
    }
    weight += layer_weight(layer, unit_y);
    enabled += 1;
  }

  (enabled > 0).then_some(weight)
}

/// Point sampler over a validated configuration.
///
/// Cheap to clone; the permutation table is shared.
#[derive(Clone, Debug)]
pub struct CloudSampler {
  config: CloudConfig,
  perm: Arc<PermutationTable>,
}

impl CloudSampler {
  /// Validate `config` and build its permutation table.
  pub fn new(config: CloudConfig) -> Result<Self, ConfigError> {
    config.validate()?;
    let perm = Arc::new(PermutationTable::new(
      config.table_size,
      config.table_max,
      config.seed,
    ));
    Ok(Self { config, perm })
  }

  /// Validate `config` and pair it with an existing table.
  ///
  /// Lets repeated rebuilds with the same seed skip table construction.
  pub fn with_table(config: CloudConfig, perm: Arc<PermutationTable>) -> Result<Self, ConfigError> {
    config.validate()?;
    Ok(Self { config, perm })
  }

  pub fn config(&self) -> &CloudConfig {
    &self.config
  }

  pub fn table(&self) -> &Arc<PermutationTable> {
    &self.perm
  }

  /// Fractal Worley term at an already scaled point.
  #[inline]
  pub fn worley(&self, p: Vec3) -> f32 {
    fbm_worley(p, &self.config.worley, &self.perm, self.config.worley_pow)
  }

  /// Fractal simplex term at an already scaled point.
  #[inline]
  pub fn simplex(&self, p: Vec3) -> f32 {
    fbm_simplex(p, &self.config.simplex, &self.perm)
  }

  /// Blended noise at a unit-cube point, without layer shaping.
  #[inline]
  pub fn contribution(&self, unit: Vec3) -> f32 {
    let p = unit * self.config.noise_scale;
    let ratio = self.config.worley_to_simplex_ratio;

    let mut contrib = 0.0f32;
    if ratio < 1.0 {
      contrib += (1.0 - ratio) * self.worley(p);
    }
    if ratio > 0.0 {
      contrib += ratio * self.simplex(p);
    }
    contrib
  }

  /// Cloud density at a unit-cube point.
  #[inline]
  pub fn sample(&self, unit: Vec3, apply_layers: bool) -> f32 {
    let contrib = self.contribution(unit);
    if !apply_layers {
      return contrib;
    }

    match layers_weight(&self.config.layers, unit.y) {
      Some(weight) => contrib * weight,
      None => contrib,
    }
  }
}

#[cfg(test)]
#[path = "sampler_test.rs"]
mod sampler_test;
