//! Configuration errors raised before any field evaluation.

use thiserror::Error;

use crate::types::LatticeDims;

/// Noise family a `NoiseConfig` belongs to, for error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseFamily {
  Worley,
  Simplex,
}

impl std::fmt::Display for NoiseFamily {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      NoiseFamily::Worley => write!(f, "worley"),
      NoiseFamily::Simplex => write!(f, "simplex"),
    }
  }
}

/// Rejected cloud configuration. Fatal to the rebuild that saw it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
  #[error("{family} noise needs at least one octave")]
  ZeroOctaves { family: NoiseFamily },

  #[error("{family} detail intensity must not be negative, got {value}")]
  NegativeDetailIntensity { family: NoiseFamily, value: f32 },

  #[error("layer '{name}' has an empty or inverted band (start {start}, stop {stop})")]
  DegenerateLayer { name: String, start: f32, stop: f32 },

  #[error("layer '{name}' has negative {field} ({value})")]
  NegativeLayerParameter {
    name: String,
    field: &'static str,
    value: f32,
  },

  #[error("resolution {axis} must be at least {min}, got {value}")]
  InvalidResolution {
    axis: &'static str,
    value: usize,
    min: usize,
  },

  #[error(
    "{family} octaves overflow f32: detail_intensity or detail_scale is too large for {octaves} octaves"
  )]
  OctaveOverflow { family: NoiseFamily, octaves: u32 },

  #[error("sum of enabled layer intensities is not a finite number")]
  LayerIntensityOverflow,

  #[error("lattice {}x{}x{} exceeds {max} points", .dims.width, .dims.height, .dims.depth)]
  LatticeTooLarge { dims: LatticeDims, max: usize },

  #[error("permutation table size must lie in [1, {max}], got {value}")]
  InvalidTableSize { value: usize, max: usize },

  #[error("worley/simplex ratio must lie in [0, 1], got {0}")]
  MixRatioOutOfRange(f32),

  #[error("{field} is not a finite number")]
  NonFinite { field: String },
}
