use super::*;

#[test]
fn test_default_config_is_valid() {
  let config = CloudConfig::default();
  assert_eq!(config.validate(), Ok(()));
  assert_eq!(config.layers.len(), 3);
  assert_eq!(config.dims(), LatticeDims::new(32, 32, 32));
}

#[test]
fn test_zero_octaves_rejected() {
  let mut config = CloudConfig::default();
  config.worley.octaves = 0;
  assert_eq!(
    config.validate(),
    Err(ConfigError::ZeroOctaves {
      family: NoiseFamily::Worley
    })
  );

  let mut config = CloudConfig::default();
  config.simplex.octaves = 0;
  assert_eq!(
    config.validate(),
    Err(ConfigError::ZeroOctaves {
      family: NoiseFamily::Simplex
    })
  );
}

#[test]
fn test_zero_width_layer_rejected() {
  let config = CloudConfig::default().with_layers(vec![Layer::new("flat", 0.3, 0.3, 1.0, 1.0)]);
  assert!(matches!(
    config.validate(),
    Err(ConfigError::DegenerateLayer { .. })
  ));
}

#[test]
fn test_inverted_layer_rejected() {
  let config = CloudConfig::default().with_layers(vec![Layer::new("upside", 0.6, 0.2, 1.0, 1.0)]);
  let err = config.validate().unwrap_err();
  assert!(err.to_string().contains("upside"), "{err}");
}

#[test]
fn test_disabled_degenerate_layer_is_ignored() {
  let config = CloudConfig::default().with_layers(vec![
    Layer::new("off", 0.5, 0.5, 1.0, 1.0).with_disabled(true),
    Layer::cumulus(),
  ]);
  assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_negative_layer_parameters_rejected() {
  let config = CloudConfig::default().with_layers(vec![Layer::new("neg", 0.1, 0.2, -1.0, 1.0)]);
  assert!(matches!(
    config.validate(),
    Err(ConfigError::NegativeLayerParameter {
      field: "intensity",
      ..
    })
  ));

  let config = CloudConfig::default().with_layers(vec![Layer::new("neg", 0.1, 0.2, 1.0, -2.0)]);
  assert!(matches!(
    config.validate(),
    Err(ConfigError::NegativeLayerParameter { field: "curve", .. })
  ));
}

#[test]
fn test_ratio_and_resolution_bounds() {
  assert_eq!(
    CloudConfig::default().with_ratio(1.5).validate(),
    Err(ConfigError::MixRatioOutOfRange(1.5))
  );
  assert!(CloudConfig::default().with_ratio(0.0).validate().is_ok());
  assert!(CloudConfig::default().with_ratio(1.0).validate().is_ok());

  assert!(matches!(
    CloudConfig::default().with_resolution(1, 32).validate(),
    Err(ConfigError::InvalidResolution {
      axis: "resolution_xz",
      ..
    })
  ));
  assert!(matches!(
    CloudConfig::default().with_resolution(32, 0).validate(),
    Err(ConfigError::InvalidResolution {
      axis: "resolution_y",
      ..
    })
  ));
}

#[test]
fn test_non_finite_rejected() {
  let mut config = CloudConfig::default();
  config.noise_scale = f32::NAN;
  assert!(matches!(config.validate(), Err(ConfigError::NonFinite { .. })));

  let mut config = CloudConfig::default();
  config.simplex.detail_scale = f32::INFINITY;
  assert_eq!(
    config.validate(),
    Err(ConfigError::NonFinite {
      field: "simplex.detail_scale".to_string()
    })
  );
}

#[test]
fn test_layer_geometry() {
  let layer = Layer::new("band", 0.2, 0.4, 1.0, 1.0);
  assert!((layer.midpoint() - 0.3).abs() < 1e-6);
  assert!((layer.half_width() - 0.1).abs() < 1e-6);
}

#[test]
fn test_enabled_layers_skips_disabled() {
  let config = CloudConfig::default().with_layers(vec![
    Layer::stratus().with_disabled(true),
    Layer::cumulus(),
  ]);
  let names: Vec<_> = config.enabled_layers().map(|l| l.name.as_str()).collect();
  assert_eq!(names, vec!["Cumulus"]);
}

#[test]
fn test_octave_amplitude_overflow_rejected() {
  // Finite per-octave intensity whose running amplitude sum reaches inf.
  let mut config = CloudConfig::default().with_ratio(0.0);
  config.worley.detail_intensity = 1e30;
  assert_eq!(
    config.validate(),
    Err(ConfigError::OctaveOverflow {
      family: NoiseFamily::Worley,
      octaves: 3
    })
  );

  // Two octaves only sum 1 + 1e30, which is fine.
  config.worley.octaves = 2;
  assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_octave_frequency_overflow_rejected() {
  let mut config = CloudConfig::default();
  config.noise_scale = 1e30;
  config.simplex.detail_scale = 1e10;
  assert!(matches!(
    config.validate(),
    Err(ConfigError::OctaveOverflow {
      family: NoiseFamily::Simplex,
      ..
    })
  ));
}

#[test]
fn test_many_damped_octaves_accepted() {
  let mut config = CloudConfig::default();
  config.worley.octaves = 64;
  config.worley.detail_intensity = 0.0;
  config.worley.detail_scale = 1.0;
  assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_layer_intensity_sum_overflow_rejected() {
  let config = CloudConfig::default().with_layers(vec![
    Layer::new("a", 0.0, 0.5, 3e38, 1.0),
    Layer::new("b", 0.5, 1.0, 3e38, 1.0),
  ]);
  assert_eq!(config.validate(), Err(ConfigError::LayerIntensityOverflow));

  // A disabled twin does not count.
  let config = CloudConfig::default().with_layers(vec![
    Layer::new("a", 0.0, 0.5, 3e38, 1.0),
    Layer::new("b", 0.5, 1.0, 3e38, 1.0).with_disabled(true),
  ]);
  assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_layer_with_overflowing_midpoint_rejected() {
  let config = CloudConfig::default().with_layers(vec![Layer::new("far", 2e38, 3e38, 1.0, 1.0)]);
  assert!(matches!(
    config.validate(),
    Err(ConfigError::DegenerateLayer { .. })
  ));
}

#[test]
fn test_table_size_bounds() {
  let mut config = CloudConfig::default();
  config.table_size = usize::MAX;
  assert_eq!(
    config.validate(),
    Err(ConfigError::InvalidTableSize {
      value: usize::MAX,
      max: MAX_PERM_SIZE
    })
  );

  config.table_size = 0;
  assert!(matches!(
    config.validate(),
    Err(ConfigError::InvalidTableSize { value: 0, .. })
  ));

  config.table_size = MAX_PERM_SIZE + 1;
  assert!(config.validate().is_err());

  config.table_size = 1;
  assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_lattice_too_large_rejected() {
  let config = CloudConfig::default().with_resolution(usize::MAX / 2, 4);
  assert!(matches!(
    config.validate(),
    Err(ConfigError::LatticeTooLarge { .. })
  ));

  // Fits usize but not the u32 index range.
  let config = CloudConfig::default().with_resolution(2048, 2048);
  let err = config.validate().unwrap_err();
  assert_eq!(
    err,
    ConfigError::LatticeTooLarge {
      dims: LatticeDims::new(2048, 2048, 2048),
      max: MAX_LATTICE_POINTS
    }
  );
  assert!(err.to_string().contains("2048x2048x2048"), "{err}");
}
