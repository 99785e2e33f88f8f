//! Cloud generation configuration and validation.
//!
//! Every field has a default, so configurations can be deserialized from a
//! partial TOML document.

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{
  DEFAULT_PERM_MAX, DEFAULT_PERM_SEED, DEFAULT_PERM_SIZE, MAX_LATTICE_POINTS, MAX_PERM_SIZE,
  MIN_RESOLUTION,
};
use crate::error::{ConfigError, NoiseFamily};
use crate::types::LatticeDims;

/// Octave count and per-octave falloff of one fractal noise family.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
  /// Number of accumulated octaves. Must be at least 1.
  pub octaves: u32,
  /// Amplitude multiplier applied after each octave.
  pub detail_intensity: f32,
  /// Frequency multiplier applied after each octave.
  pub detail_scale: f32,
}

impl NoiseConfig {
  pub fn new(octaves: u32, detail_intensity: f32, detail_scale: f32) -> Self {
    Self {
      octaves,
      detail_intensity,
      detail_scale,
    }
  }

  /// Worley family defaults.
  pub fn worley() -> Self {
    Self::new(3, 0.4, 2.0)
  }

  /// Simplex family defaults.
  pub fn simplex() -> Self {
    Self::new(4, 0.5, 2.2)
  }

  fn validate(&self, family: NoiseFamily, noise_scale: f32) -> Result<(), ConfigError> {
    if self.octaves == 0 {
      return Err(ConfigError::ZeroOctaves { family });
    }
    finite(self.detail_intensity, || format!("{family}.detail_intensity"))?;
    finite(self.detail_scale, || format!("{family}.detail_scale"))?;
    if self.detail_intensity < 0.0 {
      return Err(ConfigError::NegativeDetailIntensity {
        family,
        value: self.detail_intensity,
      });
    }
    self.check_octave_range(family, noise_scale)
  }

  /// Walk the octaves the way `fbm` does and fail if the amplitude sum or
  /// the sampled frequency leaves the finite range.
  fn check_octave_range(&self, family: NoiseFamily, noise_scale: f32) -> Result<(), ConfigError> {
    let mut amplitude = 1.0f32;
    let mut amplitude_sum = 0.0f32;
    let mut frequency = noise_scale;

    for _ in 0..self.octaves {
      amplitude_sum += amplitude;
      if !amplitude_sum.is_finite() || !frequency.is_finite() {
        return Err(ConfigError::OctaveOverflow {
          family,
          octaves: self.octaves,
        });
      }
      // Nothing left to grow.
      if amplitude == 0.0 && self.detail_scale.abs() <= 1.0 {
        break;
      }
      amplitude *= self.detail_intensity;
      frequency *= self.detail_scale;
    }
    Ok(())
  }
}

impl Default for NoiseConfig {
  fn default() -> Self {
    Self::worley()
  }
}

/// `NoiseConfig` with every key optional, so a partial table keeps the
/// defaults of its own family.
#[derive(Deserialize)]
struct PartialNoiseConfig {
  octaves: Option<u32>,
  detail_intensity: Option<f32>,
  detail_scale: Option<f32>,
}

impl PartialNoiseConfig {
  fn over(self, base: NoiseConfig) -> NoiseConfig {
    NoiseConfig {
      octaves: self.octaves.unwrap_or(base.octaves),
      detail_intensity: self.detail_intensity.unwrap_or(base.detail_intensity),
      detail_scale: self.detail_scale.unwrap_or(base.detail_scale),
    }
  }
}

fn worley_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NoiseConfig, D::Error> {
  Ok(PartialNoiseConfig::deserialize(deserializer)?.over(NoiseConfig::worley()))
}

fn simplex_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NoiseConfig, D::Error> {
  Ok(PartialNoiseConfig::deserialize(deserializer)?.over(NoiseConfig::simplex()))
}

/// Vertical density band on the unit height axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layer {
  /// Diagnostic name only.
  pub name: String,
  pub disabled: bool,
  pub start: f32,
  pub stop: f32,
  pub intensity: f32,
  /// Falloff exponent. 0 is a hard-edged band.
  pub curve: f32,
}

impl Layer {
  pub fn new(name: impl Into<String>, start: f32, stop: f32, intensity: f32, curve: f32) -> Self {
    Self {
      name: name.into(),
      disabled: false,
      start,
      stop,
      intensity,
      curve,
    }
  }

  pub fn with_disabled(mut self, disabled: bool) -> Self {
    self.disabled = disabled;
    self
  }

  #[inline]
  pub fn midpoint(&self) -> f32 {
    (self.stop + self.start) * 0.5
  }

  /// Distance from the midpoint to either edge.
  #[inline]
  pub fn half_width(&self) -> f32 {
    self.stop - self.midpoint()
  }

  /// Low, thin band.
  pub fn stratus() -> Self {
    Self::new("Stratus", 0.05, 0.1, 0.8, 1.0)
  }

  /// Mid-height band with linear falloff.
  pub fn cumulus() -> Self {
    Self::new("Cumulus", 0.2, 0.5, 0.8, 1.0)
  }

  /// Tall band with a near-flat top and sharp edges.
  pub fn cumulonimbus() -> Self {
    Self::new("Cumulonimbus", 0.2, 0.9, 2.0, 40.0)
  }

  fn validate(&self) -> Result<(), ConfigError> {
    let name = &self.name;
    finite(self.start, || format!("layer '{name}'.start"))?;
    finite(self.stop, || format!("layer '{name}'.stop"))?;
    finite(self.intensity, || format!("layer '{name}'.intensity"))?;
    finite(self.curve, || format!("layer '{name}'.curve"))?;

    let half_width = self.half_width();
    if self.stop <= self.start || !half_width.is_finite() || half_width <= 0.0 {
      return Err(ConfigError::DegenerateLayer {
        name: name.clone(),
        start: self.start,
        stop: self.stop,
      });
    }
    for (field, value) in [("intensity", self.intensity), ("curve", self.curve)] {
      if value < 0.0 {
        return Err(ConfigError::NegativeLayerParameter {
          name: name.clone(),
          field,
          value,
        });
      }
    }
    Ok(())
  }
}

impl Default for Layer {
  fn default() -> Self {
    Self::new("Layer", 0.0, 1.0, 1.0, 1.0)
  }
}

/// Top-level cloud configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
  /// Frequency multiplier applied to unit-cube points before noise.
  pub noise_scale: f32,
  /// 0 = Worley only, 1 = simplex only.
  pub worley_to_simplex_ratio: f32,
  #[serde(deserialize_with = "worley_or_default")]
  pub worley: NoiseConfig,
  #[serde(deserialize_with = "simplex_or_default")]
  pub simplex: NoiseConfig,
  /// Sharpening exponent of the inverted Worley distance.
  pub worley_pow: f32,
  /// Vertical density bands. Order does not matter.
  pub layers: Vec<Layer>,
  /// Width and depth of the lattice.
  pub resolution_xz: usize,
  /// Height of the lattice.
  pub resolution_y: usize,
  /// Keep a zero shell around the lattice so the surface is watertight.
  pub close_volume: bool,
  /// Box-smooth the gradient field before interpolating vertex normals.
  pub smooth_normals: bool,
  /// Density iso-level handed to the surface extractor.
  pub coverage: f32,
  /// Permutation table seed.
  pub seed: u64,
  /// Permutation table entry count (rounded up to a power of two), at most
  /// `MAX_PERM_SIZE`.
  pub table_size: usize,
  /// Permutation lookup value mask.
  pub table_max: i32,
}

impl Default for CloudConfig {
  fn default() -> Self {
    Self {
      noise_scale: 1.0,
      worley_to_simplex_ratio: 0.5,
      worley: NoiseConfig::worley(),
      simplex: NoiseConfig::simplex(),
      worley_pow: 1.0,
      layers: vec![Layer::stratus(), Layer::cumulus(), Layer::cumulonimbus()],
      resolution_xz: 32,
      resolution_y: 32,
      close_volume: true,
      smooth_normals: true,
      coverage: 0.5,
      seed: DEFAULT_PERM_SEED,
      table_size: DEFAULT_PERM_SIZE,
      table_max: DEFAULT_PERM_MAX,
    }
  }
}

impl CloudConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_resolution(mut self, resolution_xz: usize, resolution_y: usize) -> Self {
    self.resolution_xz = resolution_xz;
    self.resolution_y = resolution_y;
    self
  }

  pub fn with_ratio(mut self, ratio: f32) -> Self {
    self.worley_to_simplex_ratio = ratio;
    self
  }

  pub fn with_layers(mut self, layers: Vec<Layer>) -> Self {
    self.layers = layers;
    self
  }

  pub fn with_seed(mut self, seed: u64) -> Self {
    self.seed = seed;
    self
  }

  pub fn with_close_volume(mut self, close_volume: bool) -> Self {
    self.close_volume = close_volume;
    self
  }

  pub fn with_smooth_normals(mut self, smooth_normals: bool) -> Self {
    self.smooth_normals = smooth_normals;
    self
  }

  /// Lattice dimensions (width = depth = `resolution_xz`).
  pub fn dims(&self) -> LatticeDims {
    LatticeDims::from_resolution(self.resolution_xz, self.resolution_y)
  }

  /// Iterate over layers that take part in shaping.
  pub fn enabled_layers(&self) -> impl Iterator<Item = &Layer> {
    self.layers.iter().filter(|layer| !layer.disabled)
  }

  /// Reject anything that would put NaN/Inf into the field or index
  /// outside the lattice. Disabled layers are never evaluated and are not
  /// checked.
  pub fn validate(&self) -> Result<(), ConfigError> {
    finite(self.noise_scale, || "noise_scale".to_string())?;
    finite(self.worley_pow, || "worley_pow".to_string())?;
    finite(self.coverage, || "coverage".to_string())?;
    finite(self.worley_to_simplex_ratio, || {
      "worley_to_simplex_ratio".to_string()
    })?;

    if !(0.0..=1.0).contains(&self.worley_to_simplex_ratio) {
      return Err(ConfigError::MixRatioOutOfRange(self.worley_to_simplex_ratio));
    }

    self.worley.validate(NoiseFamily::Worley, self.noise_scale)?;
    self.simplex.validate(NoiseFamily::Simplex, self.noise_scale)?;

    let mut intensity_sum = 0.0f32;
    for layer in self.enabled_layers() {
      layer.validate()?;
      intensity_sum += layer.intensity;
    }
    if !intensity_sum.is_finite() {
      return Err(ConfigError::LayerIntensityOverflow);
    }

    if self.table_size == 0 || self.table_size > MAX_PERM_SIZE {
      return Err(ConfigError::InvalidTableSize {
        value: self.table_size,
        max: MAX_PERM_SIZE,
      });
    }

    for (axis, value) in [
      ("resolution_xz", self.resolution_xz),
      ("resolution_y", self.resolution_y),
    ] {
      if value < MIN_RESOLUTION {
        return Err(ConfigError::InvalidResolution {
          axis,
          value,
          min: MIN_RESOLUTION,
        });
      }
    }

    let dims = self.dims();
    match dims.checked_len() {
      Some(points) if points <= MAX_LATTICE_POINTS => Ok(()),
      _ => Err(ConfigError::LatticeTooLarge {
        dims,
        max: MAX_LATTICE_POINTS,
      }),
    }
  }
}

fn finite(value: f32, field: impl FnOnce() -> String) -> Result<(), ConfigError> {
  if value.is_finite() {
    Ok(())
  } else {
    Err(ConfigError::NonFinite { field: field() })
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
